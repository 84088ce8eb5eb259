//! Wire shapes of the account API.

use serde::{Deserialize, Serialize};

use ct_core::auth::{LoginRequest, RegistrationRequest};

#[derive(Debug, Serialize)]
pub(crate) struct RegisterBody<'a> {
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'static str,
}

impl<'a> From<&'a RegistrationRequest> for RegisterBody<'a> {
    fn from(request: &'a RegistrationRequest) -> Self {
        Self {
            firstname: &request.first_name,
            lastname: &request.last_name,
            email: &request.email,
            password: request.password.expose(),
            role: request.role.api_code(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RegisterResponse {
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginBody<'a> {
    pub email: &'a str,
    pub mot_de_passe: &'a str,
    pub remember_me: bool,
}

impl<'a> From<&'a LoginRequest> for LoginBody<'a> {
    fn from(request: &'a LoginRequest) -> Self {
        Self {
            email: &request.email,
            mot_de_passe: request.password.expose(),
            remember_me: request.remember_me,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<serde_json::Value>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub accepte_terms: Option<bool>,
}
