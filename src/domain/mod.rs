mod contact_request;
mod email_address;
mod message_body;
mod sender_name;

pub use contact_request::{ContactFormData, ContactRequest, ContactRequestError};
pub use email_address::EmailAddress;
pub use message_body::MessageBody;
pub use sender_name::SenderName;
