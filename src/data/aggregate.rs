//! Aggregation Module
//! Generic grouped aggregation with an explicit per-column rule.

use polars::prelude::*;

/// How a column is collapsed when multiple rows fall into the same
/// farm-year group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggRule {
    /// Take the first value in the group (constant-per-group columns).
    First,
    /// Sum across the group (delivered quantities, subsidy totals).
    Sum,
    /// Average across the group (areas, cultivation fractions).
    Mean,
}

impl AggRule {
    fn expr(self, column: &str) -> Expr {
        match self {
            AggRule::First => col(column).first(),
            AggRule::Sum => col(column).sum(),
            AggRule::Mean => col(column).mean(),
        }
    }
}

/// Group `df` by `keys` and aggregate each listed column by its rule.
///
/// Groups keep first-appearance order. Columns not listed in `rules` are
/// dropped from the result, so the rule table doubles as the output schema.
pub fn group_agg(
    df: DataFrame,
    keys: &[&str],
    rules: &[(&str, AggRule)],
) -> PolarsResult<DataFrame> {
    let key_exprs: Vec<Expr> = keys.iter().map(|key| col(*key)).collect();
    let agg_exprs: Vec<Expr> = rules.iter().map(|(name, rule)| rule.expr(name)).collect();

    df.lazy().group_by_stable(key_exprs).agg(agg_exprs).collect()
}
