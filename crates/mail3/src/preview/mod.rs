//! Message preview screen logic
//!
//! Provides the keyed load state machine for a single message plus the
//! reply/forward/delete actions offered on it.

mod controller;
mod navigation;
mod state;

pub use controller::PreviewController;
pub use navigation::{ComposeAction, ComposeRoute, Navigator, Route};
pub use state::{ActionError, DeleteOutcome, FetchError, LoadState, PreviewSnapshot};
