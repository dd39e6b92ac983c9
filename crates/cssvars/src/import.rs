//! Manifest sources for collection import.
//!
//! A [`ManifestSource`] produces the raw text of a manifest document. The
//! manager parses and validates it, then binds every entry. Two sources ship
//! with the crate:
//!
//! - [`HttpSource`]: `GET` a URL with `reqwest`, optionally bounded by a timeout
//! - [`StaticSource`]: a document already in memory (embedded, read from disk)
//!
//! See [`VariableManager::import_collection`](crate::VariableManager::import_collection).

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ImportError;

/// Something a manifest document can be fetched from.
#[async_trait]
pub trait ManifestSource: Send + Sync {
    /// Short human-readable description used in log lines.
    fn describe(&self) -> String;

    /// Fetches the document text.
    async fn fetch(&self) -> Result<String, ImportError>;
}

/// Fetches a manifest over HTTP(S).
///
/// Without a timeout a hung server keeps the import pending until the future
/// is dropped.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            timeout: None,
        }
    }

    /// Reuses an existing client (connection pool, proxy settings, headers).
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Fails the fetch with [`ImportError::Timeout`] after `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get(&self) -> Result<String, ImportError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ManifestSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String, ImportError> {
        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.get())
                .await
                .map_err(|_| ImportError::Timeout {
                    url: self.url.clone(),
                    timeout,
                })?,
            None => self.get().await,
        }
    }
}

/// A manifest document held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSource {
    name: String,
    body: String,
}

impl StaticSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self::named("inline", body)
    }

    /// A document with a name for log lines, such as the file it was read from.
    pub fn named(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

#[async_trait]
impl ManifestSource for StaticSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self) -> Result<String, ImportError> {
        Ok(self.body.clone())
    }
}

/// Counts of bindings written by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Plain values bound.
    pub plain: usize,
    /// Base colors bound.
    pub colors: usize,
    /// Derived shade variables bound.
    pub shades: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.plain + self.colors + self.shades
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::named("theme.json", "{}");
        assert_eq!(source.describe(), "theme.json");
        assert_eq!(source.fetch().await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn test_http_source_ok() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/vars.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"--gap": "4px"}"#)
            .create_async()
            .await;

        let source = HttpSource::new(format!("{}/vars.json", server.url()));
        assert_eq!(source.fetch().await.unwrap(), r#"{"--gap": "4px"}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_source_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing.json")
            .with_status(404)
            .create_async()
            .await;

        let source = HttpSource::new(format!("{}/missing.json", server.url()));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, ImportError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_http_source_unreachable() {
        // Port 9 (discard) on localhost is closed in test environments.
        let source = HttpSource::new("http://127.0.0.1:9/vars.json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, ImportError::Fetch(_)));
    }

    #[test]
    fn test_summary_total() {
        let summary = ImportSummary {
            plain: 1,
            colors: 2,
            shades: 4,
        };
        assert_eq!(summary.total(), 7);
    }
}
