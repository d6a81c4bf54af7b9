use validator::{Validate, ValidationError};

fn validate_message_body(s: &str) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::new("Message cannot be empty"));
    }
    Ok(())
}

/// Free text from the visitor. Opaque: markup is content, not instructions.
#[derive(Debug, Clone, Validate)]
pub struct MessageBody {
    #[validate(custom(function = "validate_message_body"))]
    content: String,
}

impl AsRef<str> for MessageBody {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

impl TryFrom<String> for MessageBody {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let body = MessageBody { content: value };
        match body.validate() {
            Ok(_) => Ok(body),
            Err(_) => Err("The message cannot be empty".to_string()),
        }
    }
}
