//! Mail3 crate - Client core for wallet-address mailboxes
//!
//! This crate provides the stateful pieces of the Mail3 web client:
//! - Domain models (Address, MessageId, MessagePreview)
//! - Address-scoped Mail3 API client
//! - Draft store for the message editor
//! - Preview controller (keyed message loading, mark-seen, reply/forward/delete)
//!
//! Rendering is left to the embedding UI, which subscribes to the
//! controller's snapshots and forwards router and window events.

pub mod compose;
pub mod config;
pub mod models;
pub mod preview;
pub mod remote;

pub use compose::{DraftFields, DraftStore};
pub use config::ClientConfig;
pub use models::{
    Address, DEFAULT_DATE_FORMAT, FlagAction, MessageBody, MessageFlag, MessageId,
    MessageMetadata, MessagePreview, format_date,
};
pub use preview::{
    ActionError, ComposeAction, ComposeRoute, DeleteOutcome, FetchError, LoadState, Navigator,
    PreviewController, PreviewSnapshot, Route,
};
pub use remote::{ApiError, MailApi, MailApiClient};
