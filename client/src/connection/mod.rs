mod http;
mod options;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use http::HttpConnection;
pub use options::ConnectionOptions;

/// Failure of a single request, surfaced unmodified to callers.
///
/// Rooms never retry; callers can `downcast_ref::<TransportError>()` on the
/// returned `anyhow::Error` to tell these apart from payload errors.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{method} {path} failed with status {status}")]
    Status {
        method: &'static str,
        path: String,
        status: u16,
    },

    #[error("{method} {path} could not be completed")]
    Request {
        method: &'static str,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {path} returned a body that is not JSON")]
    Decode {
        method: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{method} {path} returned an empty body")]
    EmptyBody { method: &'static str, path: String },
}

/// A file sent through `raw_post` as the multipart field `upload`
#[derive(Debug, Clone)]
pub struct UploadBody {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Authenticated request surface used by rooms.
///
/// Paths are relative to `base_uri()` and already carry their format suffix.
/// `post`, `put` and `raw_post` return `None` when the service answered with
/// an empty or non-JSON body.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Root of the account, e.g. `https://test.campfirenow.com`
    fn base_uri(&self) -> &str;

    async fn get(&self, path: &str) -> Result<Value>;

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Option<Value>>;

    async fn put(&self, path: &str, body: Value) -> Result<Option<Value>>;

    /// Multipart POST for binary payloads
    async fn raw_post(&self, path: &str, upload: UploadBody) -> Result<Option<Value>>;
}

/// Decode a response body into the shape expected from `path`
pub(crate) fn decode<T: DeserializeOwned>(value: Value, path: &str) -> Result<T> {
    serde_json::from_value(value).with_context(|| format!("Unexpected response shape from {}", path))
}
