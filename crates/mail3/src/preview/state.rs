//! Observable preview state and error types

use crate::models::{MessageId, MessagePreview};
use crate::remote::ApiError;

/// Load failure for the previewed message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to load message: {0}")]
    Metadata(#[source] ApiError),

    #[error("Failed to load message body: {0}")]
    Body(#[source] ApiError),
}

/// Failure of a user-triggered action, shown to the user
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("Failed to delete message {id}: {source}")]
    Delete { id: MessageId, source: ApiError },
}

/// Fetch state of the preview
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No message id resolved yet
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(FetchError),
}

impl LoadState {
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Failed(_))
    }
}

/// Latest committed state, as seen by the rendering layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewSnapshot {
    /// Message the state belongs to
    pub id: Option<MessageId>,
    pub state: LoadState,
    /// Present only in `Loaded`
    pub preview: Option<MessagePreview>,
}

impl PreviewSnapshot {
    pub(crate) fn loading(id: MessageId) -> Self {
        Self {
            id: Some(id),
            state: LoadState::Loading,
            preview: None,
        }
    }

    pub(crate) fn loaded(preview: MessagePreview) -> Self {
        Self {
            id: Some(preview.id.clone()),
            state: LoadState::Loaded,
            preview: Some(preview),
        }
    }

    pub(crate) fn failed(id: MessageId, error: FetchError) -> Self {
        Self {
            id: Some(id),
            state: LoadState::Failed(error),
            preview: None,
        }
    }
}

/// Result of a delete request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The server deleted the message
    Deleted,
    /// A delete for this message was already sent
    AlreadyRequested,
    /// No message id resolved yet
    Skipped,
}
