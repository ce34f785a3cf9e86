//! In-memory collaborators for unit tests.

use crate::cache::{Cache, CacheError, CacheStore};
use crate::fetch::{Fetch, FetchError};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned pages and records every request made
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    errors: Mutex<HashMap<String, FetchError>>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Fail the first request to `url` with `error`; later requests get a 404
    pub fn with_error(self, url: &str, error: FetchError) -> Self {
        self.errors.lock().unwrap().insert(url.to_string(), error);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetch for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        if let Some(error) = self.errors.lock().unwrap().remove(url) {
            return Err(error);
        }

        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

/// Cache store held in memory, counting saves
#[derive(Default)]
pub struct MemoryCacheStore {
    pub saved: Mutex<Option<Cache>>,
    pub saves: Mutex<usize>,
    pub fail: bool,
}

impl CacheStore for MemoryCacheStore {
    fn load(&self) -> Cache {
        self.saved.lock().unwrap().clone().unwrap_or_default()
    }

    fn save(&self, cache: &Cache) -> Result<(), CacheError> {
        *self.saves.lock().unwrap() += 1;
        if self.fail {
            return Err(CacheError::Io {
                path: "memory".into(),
                source: std::io::Error::other("disk full"),
            });
        }
        *self.saved.lock().unwrap() = Some(cache.clone());
        Ok(())
    }
}
