//! The contact form as seen from the visitor's side: field state, submit
//! gating, one request per attempt and time-boxed success feedback.

mod form;
mod submitter;

pub use form::{
    ContactForm, FeedbackTimings, FormField, FormPhase, FormView, PendingSubmission,
    SubmitOutcome,
};
pub use submitter::{
    ContactSubmission, ContactSubmitter, HttpContactSubmitter, SubmissionReceipt, SubmitError,
};
