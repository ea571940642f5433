//! Mail3 server integration
//!
//! This module provides:
//! - The `MailApi` contract consumed by the preview controller
//! - An address-scoped HTTP client implementing it
//! - Response normalization to domain models

mod client;
mod error;
mod normalize;
mod traits;

pub use client::MailApiClient;
pub use error::ApiError;
pub use normalize::{normalize_body, normalize_metadata};
pub use traits::MailApi;

/// Mail3 API wire types
pub mod api {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    use crate::models::{FlagAction, MessageFlag};

    /// Address as sent by the server
    #[derive(Debug, Clone, Deserialize, Serialize)]
    pub struct AddressEntry {
        pub address: String,
        #[serde(default)]
        pub name: Option<String>,
    }

    /// Response from fetching message info
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessageInfoResponse {
        pub date: DateTime<Utc>,
        #[serde(default)]
        pub subject: String,
        pub from: AddressEntry,
        #[serde(default)]
        pub to: Vec<AddressEntry>,
        pub text_body_ref: String,
    }

    /// Response from fetching a message part
    #[derive(Debug, Deserialize)]
    pub struct MessagePartResponse {
        #[serde(default)]
        pub html: String,
    }

    /// Request body for flag mutations
    #[derive(Debug, Serialize)]
    pub struct FlagRequest {
        pub action: FlagAction,
        pub flag: MessageFlag,
    }

    /// Response from the sign-in nonce endpoint
    #[derive(Debug, Deserialize)]
    pub struct NonceResponse {
        pub nonce: u64,
    }

    /// Request body for wallet registration
    #[derive(Debug, Serialize)]
    pub struct RegistrationRequest<'a> {
        pub address: &'a str,
        pub message: &'a str,
        pub signature: &'a str,
    }
}
