//! Remote account API over HTTP.

mod auth_gateway;
mod dto;

pub use auth_gateway::{HttpAuthGateway, LOGIN_PATH, REGISTER_PATH};
