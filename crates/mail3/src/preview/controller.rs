//! Message preview controller
//!
//! Coordinates loading a single message from the Mail3 API and the actions
//! the preview screen offers on it.
//!
//! Loading is keyed by message id:
//! 1. Fetch metadata, which carries the body reference
//! 2. Fetch the body
//! 3. Publish the preview and fire the "seen" flag without waiting on it
//!
//! Every re-key bumps a generation counter. A response is committed only if
//! its generation is still current, so late results for a previous id are
//! dropped even if the aborted task got that far.

use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::navigation::{ComposeAction, ComposeRoute, Navigator, Route};
use super::state::{ActionError, DeleteOutcome, FetchError, LoadState, PreviewSnapshot};
use crate::models::{DEFAULT_DATE_FORMAT, FlagAction, MessageFlag, MessageId, MessagePreview};
use crate::remote::MailApi;

struct Inner {
    id: Option<MessageId>,
    generation: u64,
    task: Option<JoinHandle<()>>,
    /// Message a delete has been sent for
    delete_requested: Option<MessageId>,
    /// Latest detached seen flag, kept so a host can wait on it
    seen_task: Option<JoinHandle<()>>,
}

struct Shared<A, N> {
    api: Arc<A>,
    navigator: Arc<N>,
    date_format: String,
    runtime: Handle,
    inner: Mutex<Inner>,
    snapshot: watch::Sender<PreviewSnapshot>,
}

impl<A: MailApi, N: Navigator> Shared<A, N> {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock().generation == generation
    }

    async fn run_fetch(self: Arc<Self>, id: MessageId, generation: u64) {
        debug!("Fetching metadata for message {}", id);
        let metadata = match self.api.get_message_metadata(&id).await {
            Ok(metadata) => metadata,
            Err(e) => return self.commit(generation, id, Err(FetchError::Metadata(e))),
        };

        if !self.is_current(generation) {
            debug!("Message {} superseded before body fetch", id);
            return;
        }

        debug!("Fetching body {} for message {}", metadata.text_body_ref, id);
        let outcome = match self.api.get_message_body(&metadata.text_body_ref).await {
            Ok(body) => Ok(MessagePreview::build(
                id.clone(),
                metadata,
                body,
                &self.date_format,
            )),
            Err(e) => Err(FetchError::Body(e)),
        };
        self.commit(generation, id, outcome);
    }

    fn commit(&self, generation: u64, id: MessageId, outcome: Result<MessagePreview, FetchError>) {
        let mut inner = self.lock();
        if inner.generation != generation {
            debug!("Discarding stale response for message {}", id);
            return;
        }
        inner.task = None;

        match outcome {
            Ok(mut preview) => {
                inner.seen_task = Some(self.mark_seen(id.clone()));
                preview.seen_marked = true;
                info!("Loaded message {}", id);
                self.snapshot.send_replace(PreviewSnapshot::loaded(preview));
            }
            Err(e) => {
                warn!("{}", e);
                self.snapshot.send_replace(PreviewSnapshot::failed(id, e));
            }
        }
    }

    /// Detached; failures are logged and never reach the load state
    fn mark_seen(&self, id: MessageId) -> JoinHandle<()> {
        let api = Arc::clone(&self.api);
        self.runtime.spawn(async move {
            match api
                .set_message_flag(&id, FlagAction::Add, MessageFlag::Seen)
                .await
            {
                Ok(()) => debug!("Marked message {} as seen", id),
                Err(e) => warn!("Failed to mark message {} as seen: {}", id, e),
            }
        })
    }
}

/// Controller behind the message preview screen
///
/// Owns the fetch sequence for the current message id and publishes
/// [`PreviewSnapshot`]s for the rendering layer. Dropping the controller
/// unmounts it.
pub struct PreviewController<A: MailApi, N: Navigator> {
    shared: Arc<Shared<A, N>>,
}

impl<A: MailApi, N: Navigator> PreviewController<A, N> {
    /// Create an idle controller whose tasks run on `runtime`
    pub fn new(api: Arc<A>, navigator: Arc<N>, runtime: Handle) -> Self {
        Self::with_date_format(api, navigator, runtime, DEFAULT_DATE_FORMAT)
    }

    /// Create an idle controller with a custom preview date format
    ///
    /// The handle may belong to a runtime the caller is not running on;
    /// fetch and flag tasks are spawned onto it either way.
    pub fn with_date_format(
        api: Arc<A>,
        navigator: Arc<N>,
        runtime: Handle,
        date_format: impl Into<String>,
    ) -> Self {
        let (snapshot, _) = watch::channel(PreviewSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                api,
                navigator,
                date_format: date_format.into(),
                runtime,
                inner: Mutex::new(Inner {
                    id: None,
                    generation: 0,
                    task: None,
                    delete_requested: None,
                    seen_task: None,
                }),
                snapshot,
            }),
        }
    }

    /// Point the controller at a message id from the navigation context
    ///
    /// Starts a new fetch sequence when the id differs from the current one
    /// and cancels the previous sequence. Passing the current id again does
    /// nothing, so callers may forward every router update.
    pub fn set_message_id(&self, id: Option<MessageId>) {
        let shared = &self.shared;
        let mut inner = shared.lock();
        if inner.id == id {
            return;
        }

        if let Some(task) = inner.task.take() {
            task.abort();
        }
        inner.generation += 1;
        inner.id = id.clone();
        inner.delete_requested = None;

        let Some(id) = id else {
            debug!("Message id cleared");
            shared.snapshot.send_replace(PreviewSnapshot::default());
            return;
        };

        info!("Loading message {}", id);
        shared.snapshot.send_replace(PreviewSnapshot::loading(id.clone()));
        let generation = inner.generation;
        let task_shared = Arc::clone(shared);
        inner.task = Some(
            shared
                .runtime
                .spawn(task_shared.run_fetch(id, generation)),
        );
    }

    /// Window regained focus. Message content is immutable, so no refetch.
    pub fn on_focus(&self) {
        debug!("Focus regained; preview not refetched");
    }

    /// Network came back. No refetch, same as focus.
    pub fn on_reconnect(&self) {
        debug!("Network reconnected; preview not refetched");
    }

    /// Cancel the in-flight load and drop the preview
    pub fn unmount(&self) {
        let mut inner = self.shared.lock();
        if let Some(task) = inner.task.take() {
            task.abort();
        }
        inner.generation += 1;
        inner.id = None;
        inner.delete_requested = None;
        self.shared.snapshot.send_replace(PreviewSnapshot::default());
    }

    /// Wait for the most recent seen flag request to finish
    ///
    /// The flag is never cancelled by re-keying or unmounting. Hosts that
    /// exit soon after a load call this before shutting the runtime down.
    pub async fn flush_seen_flag(&self) {
        let task = self.shared.lock().seen_task.take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                warn!("Seen flag task did not finish: {}", e);
            }
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PreviewSnapshot> {
        self.shared.snapshot.subscribe()
    }

    pub fn snapshot(&self) -> PreviewSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    pub fn state(&self) -> LoadState {
        self.shared.snapshot.borrow().state.clone()
    }

    pub fn preview(&self) -> Option<MessagePreview> {
        self.shared.snapshot.borrow().preview.clone()
    }

    pub fn message_id(&self) -> Option<MessageId> {
        self.shared.lock().id.clone()
    }

    /// Open the editor to reply to the current message
    ///
    /// Returns false when no message id is resolved yet.
    pub fn reply(&self) -> bool {
        self.open_compose(ComposeAction::Reply)
    }

    /// Open the editor to forward the current message
    ///
    /// Returns false when no message id is resolved yet.
    pub fn forward(&self) -> bool {
        self.open_compose(ComposeAction::Forward)
    }

    fn open_compose(&self, action: ComposeAction) -> bool {
        let Some(id) = self.message_id() else {
            debug!("No message id yet; ignoring {}", action);
            return false;
        };

        info!("Opening editor to {} message {}", action, id);
        self.shared
            .navigator
            .navigate(Route::Compose(ComposeRoute::new(id, action)));
        true
    }

    /// Delete the current message and navigate back
    ///
    /// Only one delete is sent per message: repeated calls while a delete is
    /// in flight or after it succeeded return `AlreadyRequested`. A failed
    /// delete is returned to the caller and may be retried.
    pub async fn delete(&self) -> Result<DeleteOutcome, ActionError> {
        let (id, generation) = {
            let mut inner = self.shared.lock();
            let Some(id) = inner.id.clone() else {
                debug!("No message id yet; ignoring delete");
                return Ok(DeleteOutcome::Skipped);
            };
            if inner.delete_requested.as_ref() == Some(&id) {
                debug!("Delete already requested for message {}", id);
                return Ok(DeleteOutcome::AlreadyRequested);
            }
            inner.delete_requested = Some(id.clone());
            (id, inner.generation)
        };

        info!("Deleting message {}", id);
        if let Err(source) = self.shared.api.delete_message(&id).await {
            warn!("Failed to delete message {}: {}", id, source);
            let mut inner = self.shared.lock();
            if inner.generation == generation {
                inner.delete_requested = None;
            }
            return Err(ActionError::Delete { id, source });
        }

        if self.shared.is_current(generation) {
            info!("Deleted message {}", id);
            self.shared.navigator.back();
        } else {
            debug!("Deleted message {} after navigating away; staying put", id);
        }
        Ok(DeleteOutcome::Deleted)
    }
}

impl<A: MailApi, N: Navigator> Drop for PreviewController<A, N> {
    fn drop(&mut self) {
        let mut inner = self.shared.lock();
        if let Some(task) = inner.task.take() {
            task.abort();
        }
        inner.generation += 1;
    }
}
