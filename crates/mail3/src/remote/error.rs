//! Errors returned by the Mail3 API

/// Failure of a single API call
///
/// Cloneable so a failed load can be kept in the observable preview state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// HTTP status when the server rejected the request
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ureq::Error> for ApiError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(status) => Self::Server {
                status,
                body: String::new(),
            },
            ureq::Error::BodyExceedsLimit(limit) => Self::Decode {
                message: format!("Response body exceeds {} bytes", limit),
            },
            other => Self::network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode {
            message: e.to_string(),
        }
    }
}
