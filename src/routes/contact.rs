use crate::domain::{ContactFormData, ContactRequest, ContactRequestError, EmailAddress};
use crate::email_client::{DispatchAcknowledgement, EmailClient};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, post, web};
use anyhow::Context;

/// Fixed destination for contact notifications.
#[derive(Debug)]
pub struct ContactRecipient(pub EmailAddress);

#[derive(serde::Serialize, Debug)]
pub struct ContactResponse {
    pub success: bool,
    pub data: DispatchAcknowledgement,
}

#[derive(serde::Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    ValidationError(#[from] ContactRequestError),
    #[error("Failed to send message. Please try again.")]
    DispatchError(#[source] anyhow::Error),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::DispatchError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Display only: the source chain stays in the logs.
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[tracing::instrument(
    name = "Handling a contact form submission",
    skip(body, email_client, recipient),
    fields(sender_email = tracing::field::Empty, sender_name = tracing::field::Empty)
)]
#[post("/api/contact")]
pub async fn contact(
    body: Result<web::Bytes, actix_web::Error>,
    email_client: web::Data<EmailClient>,
    recipient: web::Data<ContactRecipient>,
) -> Result<HttpResponse, ContactError> {
    let form = match body {
        Ok(body) => match serde_json::from_slice::<ContactFormData>(&body) {
            Ok(form) => form,
            Err(e) => {
                tracing::warn!(error = %e, "Contact form body could not be decoded");
                ContactFormData::default()
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Contact form body could not be read");
            ContactFormData::default()
        }
    };
    let request: ContactRequest = form.try_into()?;
    let span = tracing::Span::current();
    span.record("sender_email", tracing::field::display(&request.email));
    span.record("sender_name", tracing::field::display(request.name.as_ref()));

    let acknowledgement = send_contact_notification(&email_client, &recipient.0, &request)
        .await
        .map_err(ContactError::DispatchError)?;

    Ok(HttpResponse::Ok().json(ContactResponse {
        success: true,
        data: acknowledgement,
    }))
}

#[tracing::instrument(
    name = "Send a contact notification to the site owner",
    skip(email_client, recipient, request)
)]
async fn send_contact_notification(
    email_client: &EmailClient,
    recipient: &EmailAddress,
    request: &ContactRequest,
) -> Result<DispatchAcknowledgement, anyhow::Error> {
    email_client
        .send_email(
            recipient,
            Some(&request.email),
            &request.notification_subject(),
            &request.notification_html(),
            &request.notification_text(),
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to send email: {:?}", e);
            e
        })
        .context("Failed to dispatch the contact notification")
}

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
