use std::path::PathBuf;

use http::StatusCode;

use crate::models::ErrorResponse;
use crate::transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a 4xx or 5xx status.
    #[error("HTTP {status} returned by server")]
    Http { status: StatusCode, body: Vec<u8> },
    #[error("transport error")]
    Transport(#[from] TransportError),
    #[error("failed to decode JSON response body")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode JSON request body")]
    Encode(#[source] serde_json::Error),
    #[error("invalid URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid request")]
    InvalidRequest(#[from] http::Error),
    #[error("invalid header '{0}'")]
    InvalidHeader(String),
    #[error("failed to load configuration from {path:?}")]
    Config {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ClientError {
    /// Status code of a [`ClientError::Http`] failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of a [`ClientError::Http`] failure, lossily decoded.
    pub fn body_text(&self) -> Option<String> {
        match self {
            ClientError::Http { body, .. } => Some(String::from_utf8_lossy(body).into_owned()),
            _ => None,
        }
    }

    /// The API's structured error body, if the failure carried one.
    pub fn api_error(&self) -> Option<ErrorResponse> {
        match self {
            ClientError::Http { body, .. } => serde_json::from_slice(body).ok(),
            _ => None,
        }
    }
}
