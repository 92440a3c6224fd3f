use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use url::Url;

use super::{Connection, ConnectionOptions, TransportError, UploadBody};

const USER_AGENT: &str = concat!("campfire-client/", env!("CARGO_PKG_VERSION"));

/// Campfire authenticates API tokens as the basic-auth user with a dummy password
const TOKEN_PASSWORD: &str = "X";

/// reqwest-backed connection to one Campfire account
pub struct HttpConnection {
    http: reqwest::Client,
    base: Url,
    base_uri: String,
    token: String,
}

impl HttpConnection {
    pub fn new(options: &ConnectionOptions) -> Result<Self> {
        let base_uri = options.base_uri().trim_end_matches('/').to_string();
        // Trailing slash so that joined paths nest under any prefix in the base
        let base = Url::parse(&format!("{}/", base_uri))
            .with_context(|| format!("Invalid base URI {}", base_uri))?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base,
            base_uri,
            token: options.token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .with_context(|| format!("Invalid request path {}", path))?;

        let accept = if is_xml(path) {
            HeaderValue::from_static("application/xml")
        } else {
            HeaderValue::from_static("application/json")
        };

        Ok(self
            .http
            .request(method, url)
            .basic_auth(&self.token, Some(TOKEN_PASSWORD))
            .header(ACCEPT, accept))
    }

    async fn execute(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Option<Value>> {
        tracing::debug!(method, path, "Sending request");

        let response = request.send().await.map_err(|source| TransportError::Request {
            method,
            path: path.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(method, path, status = status.as_u16(), "Request rejected");
            return Err(TransportError::Status {
                method,
                path: path.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(|source| TransportError::Request {
            method,
            path: path.to_string(),
            source,
        })?;

        // The .xml endpoints answer with markup nobody reads
        if is_xml(path) || body.trim().is_empty() {
            return Ok(None);
        }

        let value = serde_json::from_str(&body).map_err(|source| TransportError::Decode {
            method,
            path: path.to_string(),
            source,
        })?;

        Ok(Some(value))
    }
}

#[async_trait]
impl Connection for HttpConnection {
    fn base_uri(&self) -> &str {
        &self.base_uri
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let request = self.request(Method::GET, path)?;
        self.execute("GET", path, request).await?.ok_or_else(|| {
            TransportError::EmptyBody {
                method: "GET",
                path: path.to_string(),
            }
            .into()
        })
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Option<Value>> {
        let mut request = self.request(Method::POST, path)?;
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.execute("POST", path, request).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Option<Value>> {
        let request = self.request(Method::PUT, path)?.json(&body);
        self.execute("PUT", path, request).await
    }

    async fn raw_post(&self, path: &str, upload: UploadBody) -> Result<Option<Value>> {
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)
            .with_context(|| format!("Invalid content type {}", upload.content_type))?;

        let request = self
            .request(Method::POST, path)?
            .multipart(Form::new().part("upload", part));
        self.execute("POST", path, request).await
    }
}

fn is_xml(path: &str) -> bool {
    path.split('?').next().is_some_and(|p| p.ends_with(".xml"))
}
