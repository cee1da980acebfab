// crates/capacity-search-broker/src/publish.rs
// ============================================================================
// Module: Result Sinks
// Description: File, log, and HTTP sinks for final capacity publications.
// Purpose: Deliver the measured capacity to durable or remote storage.
// Dependencies: capacity-search-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! Result sinks receive one [`CapacityPublication`] per finished search.
//! [`FileResultSink`] appends JSON lines, [`LogResultSink`] writes to any
//! writer, and [`HttpResultSink`] POSTs the publication as JSON.
//! Security posture: redirects are never followed and non-success statuses
//! fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use capacity_search_core::CapacityPublication;
use capacity_search_core::PublishError;
use capacity_search_core::ResultSink;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use url::Url;

// ============================================================================
// SECTION: File Sink
// ============================================================================

/// Result sink appending publications to a JSON-lines file.
#[derive(Debug, Clone)]
pub struct FileResultSink {
    /// Target file path.
    path: PathBuf,
}

impl FileResultSink {
    /// Creates a file sink.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
        }
    }

    /// Returns the target file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for FileResultSink {
    fn publish_capacity(&self, publication: &CapacityPublication) -> Result<(), PublishError> {
        let mut line =
            serde_json::to_vec(publication).map_err(|err| PublishError::Io(err.to_string()))?;
        line.push(b'\n');
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|err| PublishError::Io(err.to_string()))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| PublishError::Io(err.to_string()))?;
        file.write_all(&line).map_err(|err| PublishError::Io(err.to_string()))?;
        file.flush().map_err(|err| PublishError::Io(err.to_string()))
    }
}

// ============================================================================
// SECTION: Log Sink
// ============================================================================

/// Result sink writing publications as JSON lines to a writer.
pub struct LogResultSink<W: Write + Send> {
    /// Output writer for publication lines.
    writer: Mutex<W>,
}

impl<W: Write + Send> LogResultSink<W> {
    /// Creates a log sink over a writer.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the sink and returns the writer.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Io`] when the writer mutex is poisoned.
    pub fn into_inner(self) -> Result<W, PublishError> {
        self.writer
            .into_inner()
            .map_err(|_| PublishError::Io("result log mutex poisoned".to_string()))
    }
}

impl<W: Write + Send> ResultSink for LogResultSink<W> {
    fn publish_capacity(&self, publication: &CapacityPublication) -> Result<(), PublishError> {
        let mut guard = self
            .writer
            .lock()
            .map_err(|_| PublishError::Io("result log mutex poisoned".to_string()))?;
        serde_json::to_writer(&mut *guard, publication)
            .map_err(|err| PublishError::Io(err.to_string()))?;
        guard.write_all(b"\n").map_err(|err| PublishError::Io(err.to_string()))?;
        guard.flush().map_err(|err| PublishError::Io(err.to_string()))?;
        drop(guard);
        Ok(())
    }
}

// ============================================================================
// SECTION: HTTP Sink
// ============================================================================

/// Result sink POSTing publications to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpResultSink {
    /// Endpoint receiving publications.
    url: Url,
    /// HTTP client used for delivery.
    client: Client,
}

impl HttpResultSink {
    /// Builds an HTTP sink with a default client.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Backend`] when the URL is not `http`/`https` or
    /// the client cannot be constructed.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, PublishError> {
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|err| PublishError::Backend(err.to_string()))?;
        Self::with_client(url, client)
    }

    /// Creates an HTTP sink with a preconfigured client.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Backend`] when the URL is not `http`/`https`.
    pub fn with_client(url: &str, client: Client) -> Result<Self, PublishError> {
        let url = Url::parse(url).map_err(|err| PublishError::Backend(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(PublishError::Backend(format!("unsupported url scheme: {scheme}")));
            }
        }
        Ok(Self {
            url,
            client,
        })
    }
}

impl ResultSink for HttpResultSink {
    fn publish_capacity(&self, publication: &CapacityPublication) -> Result<(), PublishError> {
        let body =
            serde_json::to_vec(publication).map_err(|err| PublishError::Io(err.to_string()))?;
        let response = self
            .client
            .post(self.url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|err| PublishError::Backend(err.to_string()))?;
        if !response.status().is_success() {
            return Err(PublishError::Backend(format!("http status {}", response.status())));
        }
        Ok(())
    }
}
