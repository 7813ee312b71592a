use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A message submitted through the public contact form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactMessage {
    pub name: String,
    #[validate(
        email(message = "value is not a valid email address"),
        custom(function = "validate_address_shape", message = "value is not a valid email address")
    )]
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Dot-atom rules the `email` check lets through: the local part may not
/// start or end with a dot or hold two in a row, and the domain needs at
/// least two non-empty labels.
fn validate_address_shape(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return Err(ValidationError::new("email_shape"));
    };

    let local_ok = !local.is_empty()
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..");
    let domain_ok = domain.contains('.') && domain.split('.').all(|label| !label.is_empty());

    if local_ok && domain_ok {
        Ok(())
    } else {
        Err(ValidationError::new("email_shape"))
    }
}
