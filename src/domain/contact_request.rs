use crate::domain::{EmailAddress, MessageBody, SenderName};
use htmlescape::encode_minimal;

/// Raw `POST /api/contact` body. Every field is optional so that presence can
/// be checked explicitly instead of failing inside the JSON decoder.
#[derive(serde::Deserialize, Debug, Default)]
pub struct ContactFormData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ContactRequestError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
}

/// One validated contact submission.
#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub name: SenderName,
    pub email: EmailAddress,
    pub message: MessageBody,
}

impl TryFrom<ContactFormData> for ContactRequest {
    type Error = ContactRequestError;

    fn try_from(form: ContactFormData) -> Result<Self, Self::Error> {
        // Presence is checked for all fields before the email shape.
        let (Some(name), Some(email), Some(message)) = (form.name, form.email, form.message)
        else {
            return Err(ContactRequestError::MissingFields);
        };
        let name = SenderName::try_from(name).map_err(|_| ContactRequestError::MissingFields)?;
        let message =
            MessageBody::try_from(message).map_err(|_| ContactRequestError::MissingFields)?;
        if email.trim().is_empty() {
            return Err(ContactRequestError::MissingFields);
        }
        let email = EmailAddress::try_from(email).map_err(|_| ContactRequestError::InvalidEmail)?;
        Ok(Self {
            name,
            email,
            message,
        })
    }
}

impl ContactRequest {
    pub fn notification_subject(&self) -> String {
        format!("New Contact Form Message from {}", self.name.as_ref())
    }

    pub fn notification_html(&self) -> String {
        let name = encode_minimal(self.name.as_ref());
        let email = encode_minimal(self.email.as_ref());
        let message = encode_minimal(self.message.as_ref());
        format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #10b981;">New Contact Form Submission</h2>
  <p><strong>Name:</strong> {name}</p>
  <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
  <h3 style="margin-top: 20px; border-top: 1px solid #eee; padding-top: 20px;">Message:</h3>
  <p style="white-space: pre-wrap;">{message}</p>
</div>"#
        )
    }

    pub fn notification_text(&self) -> String {
        format!(
            "New Contact Form Submission\n\nName: {}\nEmail: {}\n\nMessage:\n{}",
            self.name.as_ref(),
            self.email.as_ref(),
            self.message.as_ref()
        )
    }
}
