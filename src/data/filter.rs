//! Crop Column Filter Module
//! Restricts a summary table to a requested set of crop columns.

use std::collections::HashSet;

use polars::prelude::*;

use super::schema::DEFAULT_CROPS;

/// A crop column is any `{crop}_sum` or `{crop}_areal` column.
fn is_crop_column(name: &str) -> bool {
    name.ends_with("_sum") || name.ends_with("_areal")
}

/// Remove the crop columns that do not belong to the crops in `crops`.
///
/// Non-crop columns always pass through untouched. Requested crops with no
/// matching column in the frame are skipped silently. `None` selects
/// [`DEFAULT_CROPS`].
pub fn retain_crops(df: &DataFrame, crops: Option<&[&str]>) -> DataFrame {
    let crops = crops.unwrap_or(DEFAULT_CROPS);

    let keep: HashSet<String> = crops
        .iter()
        .flat_map(|crop| [format!("{crop}_sum"), format!("{crop}_areal")])
        .collect();

    let to_drop: Vec<PlSmallStr> = df
        .get_column_names()
        .into_iter()
        .filter(|name| is_crop_column(name.as_str()) && !keep.contains(name.as_str()))
        .cloned()
        .collect();

    df.drop_many(to_drop)
}
