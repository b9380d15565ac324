//! Column Schema Module
//! Names of the raw table columns, cache file locations and the per-column
//! aggregation rule tables for farm-year grouping.

use super::aggregate::AggRule;

// Cache file locations for the three raw tables.
pub const DELIVERIES_CACHE: &str = "data/landbruksdir/raw/farmer_deliveries.csv";
pub const GRANTS_CACHE: &str = "data/landbruksdir/raw/farmer_grants.csv";
pub const LEGACY_GRANTS_CACHE: &str = "data/landbruksdir/raw/legacy_grants.csv";

// Identifying keys shared by delivery and grant records.
pub const YEAR: &str = "year";
pub const ORGNR: &str = "orgnr";

// Municipality / cadastral identifiers. `komnr` duplicates `kommunenr` in the
// delivery data and is dropped before merging.
pub const KOMNR: &str = "komnr";
pub const KOMMUNENR: &str = "kommunenr";
pub const GAARDSNUMMER: &str = "gaardsnummer";
pub const BRUKSNUMMER: &str = "bruksnummer";
pub const FESTENUMMER: &str = "festenummer";

// Wheat and rye categories were reclassified between schema versions:
// spring and winter wheat collapse into plain wheat, rye and triticale
// into a combined category.
pub const VARHVETE_AREAL: &str = "vårhvete_areal";
pub const HOSTHVETE_AREAL: &str = "høsthvete_areal";
pub const HVETE_AREAL: &str = "hvete_areal";
pub const RUG_SUM: &str = "rug_sum";
pub const RUGHVETE_SUM: &str = "rughvete_sum";
pub const RUG_OG_RUGHVETE_SUM: &str = "rug_og_rughvete_sum";

/// Crops kept by the delivery view when the caller does not ask for a
/// specific subset.
pub const DEFAULT_CROPS: &[&str] = &["havre", "hvete", "bygg", "rug_og_rughvete"];

/// Columns retained by the per-year historical view.
pub const HISTORICAL_COLUMNS: &[&str] = &[
    YEAR,
    ORGNR,
    "bygg_sum",
    "hvete_sum",
    "havre_sum",
    "rug_og_rughvete_sum",
];

/// Aggregation rules for the merged modern delivery + grant table, applied
/// per (`year`, `orgnr`) group. Identifiers are constant per farm-year and
/// take the first value; delivered quantities are summed; areas and grant
/// fractions are averaged.
pub(crate) const DELIVERY_AGG_RULES: &[(&str, AggRule)] = &[
    (KOMMUNENR, AggRule::First),
    (GAARDSNUMMER, AggRule::First),
    (BRUKSNUMMER, AggRule::First),
    (FESTENUMMER, AggRule::First),
    ("bygg_sum", AggRule::Sum),
    ("erter_sum", AggRule::Sum),
    ("havre_sum", AggRule::Sum),
    ("hvete_sum", AggRule::Sum),
    ("oljefro_sum", AggRule::Sum),
    (RUG_OG_RUGHVETE_SUM, AggRule::Sum),
    ("fulldyrket", AggRule::Mean),
    ("overflatedyrket", AggRule::Mean),
    ("tilskudd_dyr", AggRule::Mean),
    ("bygg_areal", AggRule::Mean),
    ("havre_areal", AggRule::Mean),
    ("rug_og_rughvete_areal", AggRule::Mean),
    (HVETE_AREAL, AggRule::Mean),
];

/// Aggregation rules for the merged legacy table, applied per (`orgnr`,
/// `year`) group. Legacy records carry duplicate rows with near-duplicate
/// municipality codes; averaging `komnr` is the tie-break.
pub(crate) const LEGACY_AGG_RULES: &[(&str, AggRule)] = &[
    (KOMNR, AggRule::Mean),
    ("bygg_sum", AggRule::Sum),
    ("erter_sum", AggRule::Sum),
    ("havre_sum", AggRule::Sum),
    ("hvete_sum", AggRule::Sum),
    (RUG_OG_RUGHVETE_SUM, AggRule::Sum),
    ("oljefro_sum", AggRule::Sum),
    ("areal_tilskudd", AggRule::Sum),
    ("husdyr_tilskudd", AggRule::Sum),
];
