//! Read-only view of a single message, assembled for display

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, MessageBody, MessageId, MessageMetadata};

/// Default timestamp format, e.g. "Mar 2, 12:01 am"
pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %-I:%M %P";

/// Normalized message preview
///
/// Built once per successful load and replaced wholesale whenever the
/// previewed message changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePreview {
    pub id: MessageId,
    /// Formatted timestamp
    pub date: String,
    pub subject: String,
    pub from: Address,
    pub to: Vec<Address>,
    pub body_html: String,
    /// Set once the "seen" flag has been requested for this message
    pub seen_marked: bool,
}

impl MessagePreview {
    /// Project fetched metadata and body into a preview
    pub fn build(
        id: MessageId,
        metadata: MessageMetadata,
        body: MessageBody,
        date_format: &str,
    ) -> Self {
        Self {
            id,
            date: format_date(&metadata.date, date_format),
            subject: metadata.subject,
            from: metadata.from,
            to: metadata.to,
            body_html: body.html,
            seen_marked: false,
        }
    }

    /// Recipients joined for a single header line
    pub fn recipients_line(&self) -> String {
        self.to
            .iter()
            .map(Address::display)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Format a timestamp for the preview header (UTC)
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    date.format(format).to_string()
}
