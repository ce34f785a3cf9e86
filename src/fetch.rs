use std::time::Duration;
use thiserror::Error;

/// User-Agent sent with every request
pub const USER_AGENT: &str = concat!("catalog-scrape/", env!("CARGO_PKG_VERSION"));

/// Failure to retrieve a page. Always recoverable: the caller skips the page.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("invalid URL {0}")]
    InvalidUrl(String),
}

/// Source of page bodies.
///
/// Implementations must bound each request with a timeout and treat any
/// non-2xx response as an error.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    /// Fetch the body of `url` as text
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP client backed by reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a client with the given per-request timeout and user agent
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Create a client with the default user agent
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::new(timeout, USER_AGENT)
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let parsed = url::Url::parse(url).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;

        ::log::debug!("GET {}", parsed);
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
    }
}
