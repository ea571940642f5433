//! Remote API trait definitions

use std::future::Future;

use super::ApiError;
use crate::models::{FlagAction, MessageBody, MessageFlag, MessageId, MessageMetadata};

/// Trait for the message operations the preview controller needs
///
/// Implementations are scoped to one mailbox address. All methods are
/// asynchronous and independent; callers decide ordering.
pub trait MailApi: Send + Sync + 'static {
    /// Fetch header information and the body reference for a message
    fn get_message_metadata(
        &self,
        id: &MessageId,
    ) -> impl Future<Output = Result<MessageMetadata, ApiError>> + Send;

    /// Fetch the rendered body behind a reference from `get_message_metadata`
    fn get_message_body(
        &self,
        text_body_ref: &str,
    ) -> impl Future<Output = Result<MessageBody, ApiError>> + Send;

    /// Add or remove a server-side flag
    fn set_message_flag(
        &self,
        id: &MessageId,
        action: FlagAction,
        flag: MessageFlag,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete a message
    fn delete_message(&self, id: &MessageId) -> impl Future<Output = Result<(), ApiError>> + Send;
}
