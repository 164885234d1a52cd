//! Raw document retrieval.

use crate::error::{IngestError, IngestResult};
use faqsync_config::FetchConfig;
use faqsync_core::Locator;
use reqwest::Client;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// Anything that can turn a locator into document bytes.
pub trait DocumentFetcher {
    fn fetch_bytes(&self, locator: &Locator) -> IngestResult<Vec<u8>>;
}

/// Downloads documents over HTTP(S).
///
/// Requests run on an owned runtime so callers stay synchronous; one request
/// is in flight at a time.
pub struct HttpFetcher {
    client: Client,
    rt: Runtime,
    url_template: String,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Create a fetcher from configuration.
    pub fn from_config(config: &FetchConfig) -> IngestResult<Self> {
        let timeout = match config.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let mut fetcher = Self::with_client(builder.build()?, &config.url_template)?;
        fetcher.timeout = timeout;
        Ok(fetcher)
    }

    /// Create a fetcher around an existing client.
    pub fn with_client(client: Client, url_template: &str) -> IngestResult<Self> {
        Ok(Self {
            client,
            rt: Runtime::new()?,
            url_template: url_template.to_string(),
            timeout: None,
        })
    }

    /// The URL a locator resolves to, if it is fetchable over HTTP.
    pub fn url_for(&self, locator: &Locator) -> Option<String> {
        locator.to_url(&self.url_template)
    }

    async fn get(&self, url: &str) -> IngestResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::HttpStatus {
                locator: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(url, e))?;
        Ok(bytes.to_vec())
    }

    fn transport_error(&self, url: &str, err: reqwest::Error) -> IngestError {
        let message = if err.is_timeout() {
            match self.timeout {
                Some(t) => format!("request timed out after {} seconds", t.as_secs()),
                None => "request timed out".to_string(),
            }
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };

        IngestError::Fetch {
            locator: url.to_string(),
            message,
        }
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch_bytes(&self, locator: &Locator) -> IngestResult<Vec<u8>> {
        let url = self.url_for(locator).ok_or_else(|| IngestError::Fetch {
            locator: locator.to_string(),
            message: "not an http locator".to_string(),
        })?;

        info!("Fetching document from {}", url);
        let bytes = self.rt.block_on(self.get(&url))?;
        info!("Document fetched successfully ({} bytes)", bytes.len());
        Ok(bytes)
    }
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl DocumentFetcher for FileFetcher {
    fn fetch_bytes(&self, locator: &Locator) -> IngestResult<Vec<u8>> {
        let Locator::File(path) = locator else {
            return Err(IngestError::Fetch {
                locator: locator.to_string(),
                message: "not a file locator".to_string(),
            });
        };

        if !path.exists() {
            return Err(IngestError::FileNotFound(path.clone()));
        }

        debug!("Reading document from {}", path.display());
        Ok(std::fs::read(path)?)
    }
}

/// Routes file locators to disk and everything else to HTTP.
pub struct LocatorFetcher {
    http: HttpFetcher,
    file: FileFetcher,
}

impl LocatorFetcher {
    pub fn new(http: HttpFetcher) -> Self {
        Self {
            http,
            file: FileFetcher,
        }
    }

    pub fn from_config(config: &FetchConfig) -> IngestResult<Self> {
        Ok(Self::new(HttpFetcher::from_config(config)?))
    }
}

impl DocumentFetcher for LocatorFetcher {
    fn fetch_bytes(&self, locator: &Locator) -> IngestResult<Vec<u8>> {
        match locator {
            Locator::File(_) => self.file.fetch_bytes(locator),
            Locator::Url(_) | Locator::DocumentId(_) => self.http.fetch_bytes(locator),
        }
    }
}
