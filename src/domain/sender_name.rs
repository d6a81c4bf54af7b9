use validator::{Validate, ValidationError};

fn validate_sender_name(s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::new("Sender name cannot be empty"));
    }
    Ok(())
}

/// The name a visitor typed into the contact form, kept verbatim.
#[derive(Debug, Clone, Validate)]
pub struct SenderName {
    #[validate(custom(function = "validate_sender_name"))]
    name: String,
}

impl AsRef<str> for SenderName {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

impl TryFrom<String> for SenderName {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let s = SenderName { name: value };
        match s.validate() {
            Ok(_) => Ok(s),
            Err(_) => Err(format!("{:?} is not a valid sender name", s.name)),
        }
    }
}
