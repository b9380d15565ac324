//! Data module - table loading, merging and aggregation

mod aggregate;
mod dataset;
mod filter;
mod loader;
pub mod schema;

pub use aggregate::{group_agg, AggRule};
pub use dataset::{Dataset, DatasetError, Fetchers};
pub use filter::retain_crops;
pub use loader::{DataPaths, LoaderError, TableFetcher, TableLoader};
