use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

const REJECTED_FALLBACK: &str = "Failed to send message";

/// Snapshot of the form fields sent as the body of `POST /api/contact`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Acknowledgement of an accepted submission. `data` is opaque.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SubmissionReceipt {
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Failed to send message. Please try again.")]
    Transport(#[source] reqwest::Error),
    #[error("Failed to send message. Please try again.")]
    MalformedResponse(#[source] serde_json::Error),
}

#[async_trait]
pub trait ContactSubmitter: Send + Sync {
    /// Deliver one submission. Never retries.
    async fn submit(&self, submission: &ContactSubmission)
    -> Result<SubmissionReceipt, SubmitError>;
}

#[derive(Deserialize)]
struct ResponseBody {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpContactSubmitter {
    http_client: reqwest::Client,
    endpoint: Url,
}

impl HttpContactSubmitter {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        // A trailing slash keeps a path prefix in `base_url` when joining.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        let endpoint = base_url.join("api/contact")?;
        Ok(Self {
            http_client: reqwest::Client::new(),
            endpoint,
        })
    }
}

#[async_trait]
impl ContactSubmitter for HttpContactSubmitter {
    #[tracing::instrument(
        name = "Submitting the contact form",
        skip_all,
        fields(endpoint = %self.endpoint)
    )]
    async fn submit(
        &self,
        submission: &ContactSubmission,
    ) -> Result<SubmissionReceipt, SubmitError> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(submission)
            .send()
            .await
            .map_err(SubmitError::Transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(SubmitError::Transport)?;
        let body: ResponseBody =
            serde_json::from_slice(&bytes).map_err(SubmitError::MalformedResponse)?;

        if !status.is_success() || body.error.is_some() {
            let message = body
                .error
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| REJECTED_FALLBACK.to_string());
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(SubmissionReceipt {
            success: body.success,
            data: body.data,
        })
    }
}
