//! Dataset Module
//! Lazy-loading holder of the raw delivery and grant tables, exposing the
//! merged and aggregated per-farm-per-year views.

use std::collections::{HashMap, HashSet};

use log::info;
use polars::prelude::*;
use thiserror::Error;

use super::aggregate::group_agg;
use super::filter::retain_crops;
use super::loader::{DataPaths, LoaderError, TableFetcher, TableLoader};
use super::schema;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to load table: {0}")]
    Load(#[from] LoaderError),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// One fetch collaborator per raw table.
pub struct Fetchers {
    pub deliveries: Box<dyn TableFetcher>,
    pub grants: Box<dyn TableFetcher>,
    pub legacy_grants: Box<dyn TableFetcher>,
}

/// Holds the three raw tables and derives the aggregated views.
///
/// Each table is loaded on first use and memoized for the lifetime of the
/// instance. The memo write is a check-then-act on `&mut self`; instances are
/// not safe to share across threads without external synchronization.
pub struct Dataset {
    deliveries_loader: TableLoader,
    grants_loader: TableLoader,
    legacy_grants_loader: TableLoader,
    deliveries: Option<DataFrame>,
    grants: Option<DataFrame>,
    legacy_grants: Option<DataFrame>,
}

impl Dataset {
    /// Dataset over the fixed cache file locations.
    pub fn new(fetchers: Fetchers) -> Self {
        Self::with_paths(DataPaths::default(), fetchers)
    }

    /// Dataset over caller-supplied cache file locations.
    pub fn with_paths(paths: DataPaths, fetchers: Fetchers) -> Self {
        Self {
            deliveries_loader: TableLoader::new(paths.deliveries, fetchers.deliveries),
            grants_loader: TableLoader::new(paths.grants, fetchers.grants),
            legacy_grants_loader: TableLoader::new(paths.legacy_grants, fetchers.legacy_grants),
            deliveries: None,
            grants: None,
            legacy_grants: None,
        }
    }

    /// Deliveries merged with the modern grants, aggregated to one row per
    /// (`year`, `orgnr`), restricted to the requested crops (`None` selects
    /// the four main grains).
    ///
    /// The merge is an inner join on the shared key columns: farm-years
    /// present in only one of the two tables are silently dropped. With
    /// `exclude_hosthvete` set, only farms reporting no winter-wheat area are
    /// kept, which avoids double-counting wheat area in analyses that treat
    /// spring wheat separately.
    pub fn get_deliveries(
        &mut self,
        crops: Option<&[&str]>,
        exclude_hosthvete: bool,
    ) -> Result<DataFrame, DatasetError> {
        let mut deliveries = self.load_deliveries()?.drop(schema::KOMNR)?;

        if exclude_hosthvete {
            deliveries = deliveries
                .lazy()
                .filter(col(schema::HOSTHVETE_AREAL).eq(lit(0.0)))
                .collect()?;
        }

        let grants = self.load_grants()?;
        let data = inner_join_on_shared(&deliveries, &grants)?;

        // Combine 'vårhvete' and 'høsthvete', and 'rug' and 'rughvete',
        // then drop the source categories.
        let data = data
            .lazy()
            .with_columns([
                (col(schema::VARHVETE_AREAL) + col(schema::HOSTHVETE_AREAL))
                    .alias(schema::HVETE_AREAL),
                (col(schema::RUG_SUM) + col(schema::RUGHVETE_SUM))
                    .alias(schema::RUG_OG_RUGHVETE_SUM),
            ])
            .collect()?
            .drop_many([
                schema::VARHVETE_AREAL,
                schema::HOSTHVETE_AREAL,
                schema::RUG_SUM,
                schema::RUGHVETE_SUM,
            ]);

        let data = group_agg(
            data,
            &[schema::YEAR, schema::ORGNR],
            schema::DELIVERY_AGG_RULES,
        )?;

        Ok(retain_crops(&data, crops))
    }

    /// Deliveries merged with the legacy grant schema, aggregated to one row
    /// per (`orgnr`, `year`).
    ///
    /// Legacy grants carry no areal columns, so only the rye categories are
    /// combined. The municipality code comes from the legacy side and is
    /// averaged across the group to break ties between near-duplicate codes.
    pub fn get_legacy_data(&mut self) -> Result<DataFrame, DatasetError> {
        let deliveries = self.load_deliveries()?.drop(schema::KOMNR)?;

        let legacy_grants = self.load_legacy_grants()?;
        let data = inner_join_on_shared(&deliveries, &legacy_grants)?;

        let data = data
            .lazy()
            .with_columns([(col(schema::RUG_SUM) + col(schema::RUGHVETE_SUM))
                .alias(schema::RUG_OG_RUGHVETE_SUM)])
            .collect()?
            .drop_many([schema::RUG_SUM, schema::RUGHVETE_SUM]);

        Ok(group_agg(
            data,
            &[schema::ORGNR, schema::YEAR],
            schema::LEGACY_AGG_RULES,
        )?)
    }

    /// Legacy deliveries restricted to the grain sum columns, partitioned
    /// into one table per year.
    ///
    /// Iteration order of the returned map is unspecified; callers must not
    /// rely on it.
    pub fn get_historical_deliveries_by_year(
        &mut self,
    ) -> Result<HashMap<i64, DataFrame>, DatasetError> {
        let legacy = self.get_legacy_data()?;
        let data = legacy.select(schema::HISTORICAL_COLUMNS.iter().copied())?;

        let mut by_year = HashMap::new();
        for part in data.partition_by_stable([schema::YEAR], true)? {
            // grouping drops null keys
            let Some(year) = part.column(schema::YEAR)?.i64()?.get(0) else {
                continue;
            };
            by_year.insert(year, part);
        }
        Ok(by_year)
    }

    fn load_deliveries(&mut self) -> Result<DataFrame, DatasetError> {
        if let Some(df) = &self.deliveries {
            return Ok(df.clone());
        }
        info!("Loading deliveries...");
        let df = self.deliveries_loader.load()?;
        info!("Number of deliveries loaded: {}", df.height());
        self.deliveries = Some(df.clone());
        Ok(df)
    }

    fn load_grants(&mut self) -> Result<DataFrame, DatasetError> {
        if let Some(df) = &self.grants {
            return Ok(df.clone());
        }
        let df = self.grants_loader.load()?;
        self.grants = Some(df.clone());
        Ok(df)
    }

    fn load_legacy_grants(&mut self) -> Result<DataFrame, DatasetError> {
        if let Some(df) = &self.legacy_grants {
            return Ok(df.clone());
        }
        info!("Loading historical grants data...");
        let df = self.legacy_grants_loader.load()?;
        let years = df.column(schema::YEAR)?.i64()?;
        if let (Some(first), Some(last)) = (years.min(), years.max()) {
            info!("Historical data loaded for years {first} to {last}.");
        }
        self.legacy_grants = Some(df.clone());
        Ok(df)
    }
}

/// Inner join on every column name the two frames share (effectively
/// `year` + `orgnr` for our tables).
fn inner_join_on_shared(left: &DataFrame, right: &DataFrame) -> PolarsResult<DataFrame> {
    let right_cols: HashSet<&str> = right
        .get_column_names()
        .into_iter()
        .map(PlSmallStr::as_str)
        .collect();

    let shared: Vec<Expr> = left
        .get_column_names()
        .into_iter()
        .filter(|name| right_cols.contains(name.as_str()))
        .map(|name| col(name.as_str()))
        .collect();

    left.clone()
        .lazy()
        .join(
            right.clone().lazy(),
            shared.clone(),
            shared,
            JoinArgs::new(JoinType::Inner),
        )
        .collect()
}
