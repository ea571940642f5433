//! Mail3 API HTTP client
//!
//! Requests are synchronous (ureq) to stay executor-agnostic. The `MailApi`
//! implementation moves each call onto tokio's blocking pool.

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use ureq::http::Response;
use ureq::{Agent, Body, RequestBuilder};

use super::api::{
    FlagRequest, MessageInfoResponse, MessagePartResponse, NonceResponse, RegistrationRequest,
};
use super::normalize::{normalize_body, normalize_metadata};
use super::{ApiError, MailApi};
use crate::config::ClientConfig;
use crate::models::{FlagAction, MessageBody, MessageFlag, MessageId, MessageMetadata};

/// Largest response body read, HTML bodies included
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Address-scoped client for the Mail3 server
#[derive(Clone)]
pub struct MailApiClient {
    agent: Agent,
    server_url: String,
    address: String,
    session_token: Option<String>,
}

impl MailApiClient {
    /// Create a client for the mailbox named in `config`
    pub fn new(config: &ClientConfig) -> Self {
        let agent_config = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Self {
            agent: Agent::new_with_config(agent_config),
            server_url: config.server_url.trim_end_matches('/').to_string(),
            address: config.address.trim().to_lowercase(),
            session_token: config.session_token.clone(),
        }
    }

    /// The mailbox address this client is scoped to
    pub fn address(&self) -> &str {
        &self.address
    }

    /// URL for a path under this mailbox
    fn mailbox_url(&self, path: &str) -> String {
        format!(
            "{}/mailbox/account/{}/{}",
            self.server_url,
            urlencoding::encode(&self.address),
            path
        )
    }

    fn message_url(&self, id: &MessageId) -> String {
        self.mailbox_url(&format!("messages/{}", urlencoding::encode(id.as_str())))
    }

    fn authorize<B>(&self, request: RequestBuilder<B>) -> RequestBuilder<B> {
        match &self.session_token {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Fetch message info (blocking)
    pub fn fetch_message_metadata(&self, id: &MessageId) -> Result<MessageMetadata, ApiError> {
        let url = self.message_url(id);
        debug!("GET {}", url);

        let response = self.authorize(self.agent.get(&url)).call()?;
        let info: MessageInfoResponse = read_json(response)?;
        Ok(normalize_metadata(info))
    }

    /// Fetch a message body part (blocking)
    pub fn fetch_message_body(&self, text_body_ref: &str) -> Result<MessageBody, ApiError> {
        let url = self.mailbox_url(&format!("parts/{}", urlencoding::encode(text_body_ref)));
        debug!("GET {}", url);

        let response = self.authorize(self.agent.get(&url)).call()?;
        let part: MessagePartResponse = read_json(response)?;
        Ok(normalize_body(part))
    }

    /// Add or remove a flag (blocking)
    pub fn put_message_flag(
        &self,
        id: &MessageId,
        action: FlagAction,
        flag: MessageFlag,
    ) -> Result<(), ApiError> {
        let url = format!("{}/flags", self.message_url(id));
        debug!("PUT {} {:?} {:?}", url, action, flag);

        let response = self
            .authorize(self.agent.put(&url))
            .send_json(&FlagRequest { action, flag })?;
        check_status(response).map(drop)
    }

    /// Delete a message (blocking)
    pub fn remove_message(&self, id: &MessageId) -> Result<(), ApiError> {
        let url = self.message_url(id);
        debug!("DELETE {}", url);

        let response = self.authorize(self.agent.delete(&url)).call()?;
        check_status(response).map(drop)
    }

    // === Wallet sign-in ===

    /// Get the sign-in nonce for this address
    pub fn get_nonce(&self) -> Result<u64, ApiError> {
        let url = format!(
            "{}/address_nonces/{}",
            self.server_url,
            urlencoding::encode(&self.address)
        );
        let response = self.agent.get(&url).call()?;
        let nonce: NonceResponse = read_json(response)?;
        Ok(nonce.nonce)
    }

    /// Register this address with a signed message
    pub fn sign_up(&self, message: &str, signature: &str) -> Result<(), ApiError> {
        let url = format!("{}/registrations", self.server_url);
        post_json(
            &self.agent,
            &url,
            &RegistrationRequest {
                address: &self.address,
                message,
                signature,
            },
        )
    }
}

impl MailApi for MailApiClient {
    fn get_message_metadata(
        &self,
        id: &MessageId,
    ) -> impl Future<Output = Result<MessageMetadata, ApiError>> + Send {
        let client = self.clone();
        let id = id.clone();
        blocking(move || client.fetch_message_metadata(&id))
    }

    fn get_message_body(
        &self,
        text_body_ref: &str,
    ) -> impl Future<Output = Result<MessageBody, ApiError>> + Send {
        let client = self.clone();
        let text_body_ref = text_body_ref.to_string();
        blocking(move || client.fetch_message_body(&text_body_ref))
    }

    fn set_message_flag(
        &self,
        id: &MessageId,
        action: FlagAction,
        flag: MessageFlag,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        let client = self.clone();
        let id = id.clone();
        blocking(move || client.put_message_flag(&id, action, flag))
    }

    fn delete_message(&self, id: &MessageId) -> impl Future<Output = Result<(), ApiError>> + Send {
        let client = self.clone();
        let id = id.clone();
        blocking(move || client.remove_message(&id))
    }
}

/// Run a blocking request on the tokio blocking pool
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::network(format!("Request task failed: {}", e)))?
}

fn post_json<T: Serialize>(agent: &Agent, url: &str, body: &T) -> Result<(), ApiError> {
    let response = agent.post(url).send_json(body)?;
    check_status(response).map(drop)
}

/// Map non-2xx responses to `ApiError::Server`, keeping the body text
fn check_status(mut response: Response<Body>) -> Result<Response<Body>, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.body_mut().read_to_string().unwrap_or_default();
    Err(ApiError::Server {
        status: status.as_u16(),
        body,
    })
}

fn read_json<T: DeserializeOwned>(response: Response<Body>) -> Result<T, ApiError> {
    let mut response = check_status(response)?;
    let text = response
        .body_mut()
        .with_config()
        .limit(MAX_BODY_BYTES)
        .read_to_string()?;
    Ok(serde_json::from_str(&text)?)
}
