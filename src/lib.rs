//! Korndata - Farm Delivery & Subsidy Data Aggregation
//!
//! Loads raw grain delivery and subsidy grant records for Norwegian farms and
//! shapes them into per-farm-per-year summary tables. Raw tables come from
//! cached CSV files, with a pluggable fetch collaborator as fallback; derived
//! views merge the modern and legacy grant schemas with the deliveries and
//! aggregate them with explicit per-column rules.

pub mod data;

pub use data::{
    retain_crops, AggRule, DataPaths, Dataset, DatasetError, Fetchers, LoaderError, TableFetcher,
    TableLoader,
};
