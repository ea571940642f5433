//! Domain models for mail entities

mod message;
mod preview;

pub use message::{Address, FlagAction, MessageBody, MessageFlag, MessageId, MessageMetadata};
pub use preview::{DEFAULT_DATE_FORMAT, MessagePreview, format_date};
