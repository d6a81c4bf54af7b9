use crate::client::submitter::{ContactSubmission, ContactSubmitter, SubmissionReceipt, SubmitError};
use std::time::Duration;

const SUCCESS_TITLE: &str = "Message Sent!";
const SUCCESS_DETAIL: &str = "Thank you for reaching out. I'll get back to you soon.";

/// How long each piece of feedback stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackTimings {
    /// Time the success view stays up before the form starts closing.
    pub success_countdown: Duration,
    /// Exit animation between "closing" and the close callback.
    pub exit_animation: Duration,
}

impl Default for FeedbackTimings {
    fn default() -> Self {
        Self {
            success_countdown: Duration::from_millis(3000),
            exit_animation: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Submitted,
    Closing,
}

/// What the visitor currently sees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormView {
    Form {
        error: Option<String>,
        submit_enabled: bool,
        sending: bool,
    },
    Success {
        title: &'static str,
        detail: &'static str,
    },
}

/// A request that left the form and has not been answered yet.
#[derive(Debug)]
pub struct PendingSubmission {
    attempt: u64,
    submission: ContactSubmission,
}

impl PendingSubmission {
    pub fn submission(&self) -> &ContactSubmission {
        &self.submission
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Fields incomplete or a request already in flight. Nothing was sent.
    Blocked,
    Sent,
    Failed(String),
    /// The form was closed while the request was in flight.
    Discarded,
}

/// Client-side state of the contact form.
///
/// All transitions happen through `&mut self`, so one form never runs two
/// transitions at once. The phase additionally keeps a second submit from
/// being issued while one is in flight.
pub struct ContactForm {
    name: String,
    email: String,
    message: String,
    phase: FormPhase,
    error: Option<String>,
    attempt: u64,
    timings: FeedbackTimings,
    on_close: Box<dyn FnMut() + Send>,
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("message", &self.message)
            .field("phase", &self.phase)
            .field("error", &self.error)
            .field("attempt", &self.attempt)
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}

impl ContactForm {
    pub fn new(on_close: impl FnMut() + Send + 'static) -> Self {
        Self::with_timings(FeedbackTimings::default(), on_close)
    }

    pub fn with_timings(timings: FeedbackTimings, on_close: impl FnMut() + Send + 'static) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            phase: FormPhase::Editing,
            error: None,
            attempt: 0,
            timings,
            on_close: Box::new(on_close),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Any edit clears the displayed error; nothing is re-validated until
    /// the next submit.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        if matches!(self.phase, FormPhase::Submitted | FormPhase::Closing) {
            return;
        }
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Message => self.message = value,
        }
        self.error = None;
    }

    /// Every field has something besides whitespace. Email shape is left to
    /// the server.
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|value| !value.trim().is_empty())
    }

    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Editing && self.is_complete()
    }

    pub fn view(&self) -> FormView {
        match self.phase {
            FormPhase::Submitted => FormView::Success {
                title: SUCCESS_TITLE,
                detail: SUCCESS_DETAIL,
            },
            _ => FormView::Form {
                error: self.error.clone(),
                submit_enabled: self.can_submit(),
                sending: self.phase == FormPhase::Submitting,
            },
        }
    }

    /// Enter `Submitting` and hand out the snapshot to send, or `None` when
    /// the submit control is disabled.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if !self.can_submit() {
            return None;
        }
        self.phase = FormPhase::Submitting;
        self.error = None;
        self.attempt += 1;
        Some(PendingSubmission {
            attempt: self.attempt,
            submission: ContactSubmission {
                name: self.name.clone(),
                email: self.email.clone(),
                message: self.message.clone(),
            },
        })
    }

    pub fn finish_submit(
        &mut self,
        pending: PendingSubmission,
        result: Result<SubmissionReceipt, SubmitError>,
    ) -> SubmitOutcome {
        if pending.attempt != self.attempt || self.phase != FormPhase::Submitting {
            tracing::debug!(attempt = pending.attempt, "Discarding a superseded submission result");
            return SubmitOutcome::Discarded;
        }
        match result {
            Ok(_) => {
                self.phase = FormPhase::Submitted;
                self.error = None;
                SubmitOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Contact form submission failed");
                let message = e.to_string();
                self.phase = FormPhase::Editing;
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Issue exactly one request for the current fields and wait for it.
    pub async fn submit<S>(&mut self, submitter: &S) -> SubmitOutcome
    where
        S: ContactSubmitter + ?Sized,
    {
        let Some(pending) = self.begin_submit() else {
            return SubmitOutcome::Blocked;
        };
        let result = submitter.submit(pending.submission()).await;
        self.finish_submit(pending, result)
    }

    /// Keep the success view up for the countdown, then run the closing
    /// sequence and reset every field. No-op unless a submission succeeded.
    pub async fn complete_success(&mut self) {
        if self.phase != FormPhase::Submitted {
            return;
        }
        tokio::time::sleep(self.timings.success_countdown).await;
        self.phase = FormPhase::Closing;
        tokio::time::sleep(self.timings.exit_animation).await;
        (self.on_close)();
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.error = None;
        self.phase = FormPhase::Editing;
    }

    /// Close on the visitor's request. Fields survive; the error is cleared
    /// only after the close callback has run. A request still in flight is
    /// left to finish and its result is discarded. The success view closes
    /// itself through `complete_success`, so `close` ignores it.
    pub async fn close(&mut self) {
        if matches!(self.phase, FormPhase::Closing | FormPhase::Submitted) {
            return;
        }
        self.attempt += 1;
        self.phase = FormPhase::Closing;
        tokio::time::sleep(self.timings.exit_animation).await;
        (self.on_close)();
        self.error = None;
        self.phase = FormPhase::Editing;
    }
}
