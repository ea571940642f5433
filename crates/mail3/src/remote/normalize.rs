//! Mail3 API response normalization
//!
//! Converts wire responses to domain models.

use super::api::{AddressEntry, MessageInfoResponse, MessagePartResponse};
use crate::models::{Address, MessageBody, MessageMetadata};

/// Normalize a message info response
pub fn normalize_metadata(info: MessageInfoResponse) -> MessageMetadata {
    MessageMetadata {
        date: info.date,
        subject: info.subject,
        from: normalize_address(info.from),
        to: info.to.into_iter().map(normalize_address).collect(),
        text_body_ref: info.text_body_ref,
    }
}

/// Normalize a message part response
pub fn normalize_body(part: MessagePartResponse) -> MessageBody {
    MessageBody { html: part.html }
}

fn normalize_address(entry: AddressEntry) -> Address {
    match entry.name {
        Some(name) => Address::with_name(name, &entry.address),
        None => Address::new(&entry.address),
    }
}
