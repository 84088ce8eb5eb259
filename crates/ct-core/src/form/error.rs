use serde::{Deserialize, Serialize};

use crate::auth::validation::{MIN_PASSWORD_LEN, MIN_RESET_CODE_LEN};
use crate::form::FormField;

/// Advisory message shown on a step, keyed by the violated rule.
///
/// `Display` yields the copy shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum FormError {
    #[error("Veuillez sélectionner votre rôle avant de continuer.")]
    RoleRequired,
    #[error("Tous les champs sont obligatoires.")]
    RequiredFieldsMissing,
    #[error("Veuillez entrer votre adresse e-mail.")]
    EmailRequired,
    #[error("Veuillez entrer une adresse e-mail valide.")]
    InvalidEmail,
    #[error("Vous devez accepter les conditions générales et la politique de confidentialité.")]
    TermsNotAccepted,
    #[error("Vous devez accepter les termes et conditions pour continuer.")]
    UpdatedTermsNotAccepted,
    #[error("Les mots de passe ne correspondent pas !")]
    PasswordMismatch,
    #[error("Le mot de passe doit contenir au moins {min_len} caractères.")]
    PasswordTooShort { min_len: usize },
    #[error("Veuillez entrer votre mot de passe.")]
    PasswordRequired,
    #[error("Veuillez entrer un nouveau mot de passe.")]
    NewPasswordRequired,
    #[error("Veuillez confirmer votre mot de passe.")]
    ConfirmationRequired,
    #[error("Veuillez entrer le code reçu par email.")]
    CodeRequired,
    #[error("Le code doit contenir au moins {min_len} caractères.")]
    CodeTooShort { min_len: usize },
    #[error("Cet e-mail est déjà utilisé ou les données sont invalides.")]
    RegistrationRejected,
    #[error("Erreur lors de la connexion. Veuillez réessayer.")]
    LoginRejected,
    #[error("Une erreur réseau s'est produite. Veuillez vérifier votre connexion.")]
    ConnectionFailed,
}

impl FormError {
    pub fn password_too_short() -> Self {
        FormError::PasswordTooShort {
            min_len: MIN_PASSWORD_LEN,
        }
    }

    pub fn code_too_short() -> Self {
        FormError::CodeTooShort {
            min_len: MIN_RESET_CODE_LEN,
        }
    }
}

/// A change event that does not fit the addressed input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("field {field:?} expects text")]
    ExpectedText { field: FormField },
    #[error("field {field:?} expects a checkbox value")]
    ExpectedFlag { field: FormField },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_messages_embed_thresholds() {
        assert_eq!(
            FormError::password_too_short().to_string(),
            "Le mot de passe doit contenir au moins 6 caractères."
        );
        assert_eq!(
            FormError::code_too_short().to_string(),
            "Le code doit contenir au moins 4 caractères."
        );
    }

    #[test]
    fn remote_failures_have_distinct_copy() {
        assert_ne!(
            FormError::RegistrationRejected.to_string(),
            FormError::ConnectionFailed.to_string()
        );
        assert_ne!(
            FormError::LoginRejected.to_string(),
            FormError::ConnectionFailed.to_string()
        );
    }
}
