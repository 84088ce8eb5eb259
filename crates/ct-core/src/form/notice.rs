use std::fmt;

use serde::Serialize;

use crate::auth::Role;

/// User-visible notice raised by a flow, outside of the step error slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notice {
    /// The reset code was (nominally) sent. No mail leaves the client.
    ResetCodeSent { email: String },
    CodeVerified,
    PasswordReset,
    Registered { role: Role },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ResetCodeSent { .. } => {
                f.write_str("Code de réinitialisation envoyé à votre adresse email")
            }
            Notice::CodeVerified => f.write_str("Code vérifié avec succès."),
            Notice::PasswordReset => f.write_str(
                "Mot de passe réinitialisé avec succès ! Vous pouvez maintenant vous connecter.",
            ),
            Notice::Registered { role } => write!(f, "Inscription réussie ! Rôle : {role}"),
        }
    }
}
