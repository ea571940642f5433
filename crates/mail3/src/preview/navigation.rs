//! Navigation seam between the preview controller and the router

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::MessageId;

/// What the compose screen should do with the referenced message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposeAction {
    Reply,
    Forward,
}

impl ComposeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComposeAction::Reply => "reply",
            ComposeAction::Forward => "forward",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reply" => Some(ComposeAction::Reply),
            "forward" => Some(ComposeAction::Forward),
            _ => None,
        }
    }
}

impl fmt::Display for ComposeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters handed to the compose screen
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComposeRoute {
    pub id: MessageId,
    pub action: ComposeAction,
}

impl ComposeRoute {
    pub fn new(id: MessageId, action: ComposeAction) -> Self {
        Self { id, action }
    }

    /// Encode as a URL query string (`id=...&action=reply`)
    pub fn to_query(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("id", self.id.as_str())
            .append_pair("action", self.action.as_str())
            .finish()
    }

    /// Decode from a URL query string, ignoring unknown keys
    ///
    /// Returns `None` when either parameter is missing, empty or unknown.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut id = None;
        let mut action = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "id" if !value.is_empty() => id = Some(MessageId::new(value.into_owned())),
                "action" => action = ComposeAction::parse(&value),
                _ => {}
            }
        }

        Some(Self {
            id: id?,
            action: action?,
        })
    }
}

/// Destinations the preview controller can navigate to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Message editor, seeded from an existing message
    Compose(ComposeRoute),
    /// Preview of a single message
    Message(MessageId),
}

impl Route {
    /// Path and query as the router would render it
    pub fn path(&self) -> String {
        match self {
            Route::Compose(compose) => format!("/message/edit?{}", compose.to_query()),
            Route::Message(id) => format!("/message/{}", urlencoding::encode(id.as_str())),
        }
    }
}

/// Router consumed by the preview controller
pub trait Navigator: Send + Sync + 'static {
    /// Push a new route
    fn navigate(&self, route: Route);

    /// Go back one step in history
    fn back(&self);
}
