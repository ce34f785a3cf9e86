use crate::results::ProductRecord;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Scraped records keyed by page URL
pub type Cache = BTreeMap<String, ProductRecord>;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cache serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistent storage for scraped records, so an interrupted run can resume
pub trait CacheStore {
    /// Load the stored records; missing or unreadable storage gives an empty cache
    fn load(&self) -> Cache;

    /// Durably store the full cache
    fn save(&self, cache: &Cache) -> Result<(), CacheError>;
}

/// Cache kept as a pretty-printed JSON object on disk
#[derive(Debug, Clone)]
pub struct JsonCacheStore {
    path: PathBuf,
}

impl JsonCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CacheError {
        CacheError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CacheStore for JsonCacheStore {
    fn load(&self) -> Cache {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ::log::debug!("No cache at {}, starting fresh", self.path.display());
                return Cache::new();
            }
            Err(e) => {
                ::log::warn!("Could not read cache {}: {}", self.path.display(), e);
                return Cache::new();
            }
        };

        match serde_json::from_str::<Cache>(&contents) {
            Ok(cache) => {
                ::log::info!(
                    "Loaded {} cached records from {}",
                    cache.len(),
                    self.path.display()
                );
                cache
            }
            Err(e) => {
                ::log::warn!("Ignoring corrupted cache {}: {}", self.path.display(), e);
                Cache::new()
            }
        }
    }

    fn save(&self, cache: &Cache) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(cache)?;

        // Write then rename so an interruption never leaves a truncated cache
        let tmp = self.path.with_extension("json.tmp");
        let mut file = File::create(&tmp).map_err(|e| self.io_error(e))?;
        file.write_all(json.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        ::log::debug!("Saved {} records to {}", cache.len(), self.path.display());
        Ok(())
    }
}
