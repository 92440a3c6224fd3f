use std::fmt;

use anyhow::{Context, Result};

const DEFAULT_DOMAIN: &str = "campfirenow.com";

/// Account and credentials for an [`HttpConnection`](super::HttpConnection)
#[derive(Clone)]
pub struct ConnectionOptions {
    pub subdomain: String,
    pub token: String,
    pub ssl: bool,
    /// Replaces the `{subdomain}.campfirenow.com` root entirely
    pub base_uri: Option<String>,
}

impl ConnectionOptions {
    pub fn new(subdomain: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            token: token.into(),
            ssl: true,
            base_uri: None,
        }
    }

    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    pub fn without_ssl(mut self) -> Self {
        self.ssl = false;
        self
    }

    pub fn base_uri(&self) -> String {
        match &self.base_uri {
            Some(uri) => uri.clone(),
            None => {
                let scheme = if self.ssl { "https" } else { "http" };
                format!("{}://{}.{}", scheme, self.subdomain, DEFAULT_DOMAIN)
            }
        }
    }

    /// Read `CAMPFIRE_SUBDOMAIN`, `CAMPFIRE_TOKEN`, and optionally
    /// `CAMPFIRE_SSL` and `CAMPFIRE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let subdomain = lookup("CAMPFIRE_SUBDOMAIN").context("CAMPFIRE_SUBDOMAIN is not set")?;
        let token = lookup("CAMPFIRE_TOKEN").context("CAMPFIRE_TOKEN is not set")?;

        let mut options = Self::new(subdomain, token);

        if let Some(ssl) = lookup("CAMPFIRE_SSL")
            && matches!(ssl.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no")
        {
            options = options.without_ssl();
        }

        if let Some(uri) = lookup("CAMPFIRE_URL") {
            options = options.with_base_uri(uri);
        }

        Ok(options)
    }
}

impl fmt::Debug for ConnectionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionOptions")
            .field("subdomain", &self.subdomain)
            .field("token", &"<redacted>")
            .field("ssl", &self.ssl)
            .field("base_uri", &self.base_uri)
            .finish()
    }
}
