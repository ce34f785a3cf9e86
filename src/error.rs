use crate::fetch::FetchError;
use thiserror::Error;

/// Reasons a single product page is skipped
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("cannot use {url} as a base URL: {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
