//! Analysis module - medal tallies, trends, leaderboards and demographics
//!
//! Every function takes the canonical [`Dataset`](crate::data::Dataset) by
//! reference, recomputes from it and returns a freshly allocated table.

mod athletes;
mod country;
mod filters;
mod medals;
mod trends;

#[cfg(test)]
pub(crate) mod fixtures;

pub use athletes::{
    age_by_medal, height_weight, most_successful, AgeGroupStats, AthleteMedals, BodyPoint,
    HeightWeight, SexBodyStats, LEADERBOARD_SIZE,
};
pub use country::{
    region_age_profile, sport_heatmap, top_athletes_by_country, yearly_medal_tally, AgeProfile,
    CountryAthlete, SportHeatmap, YearMedals, COUNTRY_TOP_SIZE,
};
pub use filters::{list_regions, list_sports, list_years_and_regions, Selection};
pub use medals::{
    medal_tally, overall_medal_tally, MedalRatios, MedalTally, MedalTallyRow, OverallTallyRow,
    TallyGroup, TallyKey, TallyScope, TallySummary,
};
pub use trends::{
    count_over_time, gender_participation, overview, Dimension, EditionCount, GenderYear,
    Overview, SeriesSummary,
};

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// String column as owned optional values.
pub(crate) fn opt_strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, AnalysisError> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// String column with nulls replaced by an empty string.
pub(crate) fn strings(df: &DataFrame, name: &str) -> Result<Vec<String>, AnalysisError> {
    Ok(opt_strings(df, name)?
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

/// Count column as `u32`, nulls counted as zero.
pub(crate) fn counts(df: &DataFrame, name: &str) -> Result<Vec<u32>, AnalysisError> {
    let column = df.column(name)?.cast(&DataType::UInt32)?;
    Ok(column.u32()?.into_iter().map(|v| v.unwrap_or(0)).collect())
}

pub(crate) fn years(df: &DataFrame) -> Result<Vec<Option<i32>>, AnalysisError> {
    let column = df.column(crate::data::schema::YEAR)?.cast(&DataType::Int32)?;
    Ok(column.i32()?.into_iter().collect())
}

pub(crate) fn floats(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, AnalysisError> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}
