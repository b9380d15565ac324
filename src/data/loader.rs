//! Table Loader Module
//! Reads the raw cached CSV tables, falling back to an external fetch
//! collaborator when a cache file is absent.

use std::path::{Path, PathBuf};

use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::schema;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read cached table {path}: {source}")]
    Cache {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Failed to fetch table: {0}")]
    Fetch(#[source] anyhow::Error),
}

/// External collaborator that produces a table when no cache file exists.
///
/// Implemented for plain closures, so a fetch script binding or a test stub
/// can be passed directly.
pub trait TableFetcher {
    fn fetch(&self) -> anyhow::Result<DataFrame>;
}

impl<F> TableFetcher for F
where
    F: Fn() -> anyhow::Result<DataFrame>,
{
    fn fetch(&self) -> anyhow::Result<DataFrame> {
        self()
    }
}

/// Locations of the three raw cache files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    pub deliveries: PathBuf,
    pub grants: PathBuf,
    pub legacy_grants: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            deliveries: PathBuf::from(schema::DELIVERIES_CACHE),
            grants: PathBuf::from(schema::GRANTS_CACHE),
            legacy_grants: PathBuf::from(schema::LEGACY_GRANTS_CACHE),
        }
    }
}

/// Loads one raw table: the cached CSV if present, the fetch collaborator
/// otherwise. Fetched tables are never written back to disk.
pub struct TableLoader {
    cache_path: PathBuf,
    fetcher: Box<dyn TableFetcher>,
}

impl TableLoader {
    pub fn new(cache_path: impl Into<PathBuf>, fetcher: Box<dyn TableFetcher>) -> Self {
        Self {
            cache_path: cache_path.into(),
            fetcher,
        }
    }

    /// Load the table. A missing cache file is not an error; a read failure
    /// on an existing file or a failing fetcher is.
    pub fn load(&self) -> Result<DataFrame, LoaderError> {
        if self.cache_path.is_file() {
            return read_cached_csv(&self.cache_path);
        }
        debug!(
            "No cached table at {}, invoking fetcher",
            self.cache_path.display()
        );
        self.fetcher.fetch().map_err(LoaderError::Fetch)
    }
}

fn read_cached_csv(path: &Path) -> Result<DataFrame, LoaderError> {
    LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10_000))
        .with_ignore_errors(true)
        .finish()
        .and_then(LazyFrame::collect)
        .map_err(|source| LoaderError::Cache {
            path: path.to_path_buf(),
            source,
        })
}
