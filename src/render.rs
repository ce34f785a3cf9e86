use crate::results::ProductRecord;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Heading of every generated catalog
pub const CATALOG_TITLE: &str = "Product Catalog";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not write catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not serialize catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Turns scraped records into a catalog document
pub trait CatalogRenderer {
    /// Write the catalog and return where it was written
    fn render(&self, records: &[ProductRecord]) -> Result<PathBuf, RenderError>;
}

#[derive(Serialize)]
struct CatalogDocument<'a> {
    title: &'a str,
    count: usize,
    products: &'a [ProductRecord],
}

/// Catalog written as a single JSON document
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogRenderer for JsonCatalog {
    fn render(&self, records: &[ProductRecord]) -> Result<PathBuf, RenderError> {
        let io_error = |source| RenderError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let document = CatalogDocument {
            title: CATALOG_TITLE,
            count: records.len(),
            products: records,
        };
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, json).map_err(io_error)?;

        ::log::info!(
            "Catalog with {} products written to {}",
            records.len(),
            self.path.display()
        );
        Ok(self.path.clone())
    }
}
