use crate::domain::EmailAddress;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(thiserror::Error, Debug)]
pub enum EmailClientError {
    #[error("Invalid email API base url")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Failed to build the HTTP client")]
    HttpClient(#[from] reqwest::Error),
}

/// Whatever the provider answered when it accepted an email. Not interpreted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(transparent)]
pub struct DispatchAcknowledgement(pub serde_json::Value);

#[derive(Debug)]
pub struct EmailClient {
    http_client: reqwest::Client,
    send_url: Url,
    sender: EmailAddress,
    sender_name: String,
    authorization_token: SecretString,
}

impl EmailClient {
    pub fn new(
        base_url: &str,
        sender: EmailAddress,
        sender_name: String,
        authorization_token: SecretString,
        timeout_duration: std::time::Duration,
    ) -> Result<Self, EmailClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout_duration)
            .build()?;
        // A trailing slash keeps `join` from dropping the last path segment.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        let send_url = base_url.join("emails")?;

        Ok(Self {
            http_client,
            send_url,
            sender,
            sender_name,
            authorization_token,
        })
    }

    #[tracing::instrument(
        name = "Dispatching an email",
        skip_all,
        fields(recipient = %recipient, subject = %subject)
    )]
    pub async fn send_email(
        &self,
        recipient: &EmailAddress,
        reply_to: Option<&EmailAddress>,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<DispatchAcknowledgement, reqwest::Error> {
        let from = if self.sender_name.is_empty() {
            Cow::Borrowed(self.sender.as_ref())
        } else {
            Cow::Owned(format!("{} <{}>", self.sender_name, self.sender.as_ref()))
        };
        let request_body = SendEmailRequest {
            from,
            to: vec![recipient.as_ref()],
            reply_to: reply_to.map(AsRef::as_ref),
            subject: subject.into(),
            html: html_content.into(),
            text: text_content.into(),
        };
        let body = self
            .http_client
            .post(self.send_url.clone())
            .bearer_auth(self.authorization_token.expose_secret())
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        // The email was accepted at this point; an unreadable receipt is not a failure.
        let acknowledgement = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        Ok(DispatchAcknowledgement(acknowledgement))
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SendEmailRequest<'a> {
    #[serde(borrow)]
    pub from: Cow<'a, str>,
    #[serde(borrow)]
    pub to: Vec<&'a str>,
    #[serde(borrow, default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<&'a str>,
    #[serde(borrow)]
    pub subject: Cow<'a, str>,
    #[serde(borrow)]
    pub html: Cow<'a, str>,
    #[serde(borrow)]
    pub text: Cow<'a, str>,
}
