//! Data Processor Module
//! Merges the event table with the region lookup and cleans field types.

use super::dataset::Dataset;
use super::schema::{
    AGE, EVENT_COLUMNS, HEIGHT, MEDAL, NOC, NOTES, REGION, REGION_COLUMNS, ROW_INDEX, WEIGHT,
    YEAR,
};
use crate::data::Medal;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: &'static str, column: String },
}

/// Builds the canonical dataset from raw input frames.
pub struct DataProcessor;

impl DataProcessor {
    /// Left-join events to the region lookup on NOC and normalize fields.
    ///
    /// - absent medal becomes `"No Medal"`
    /// - Age/Height/Weight become Float64, unparseable values become null
    /// - Year becomes Int32
    /// - events whose NOC has no mapping keep a null `region`
    /// - source order is recorded in `row_nr` and kept after the join
    ///
    /// Only a structurally missing column is an error; bad values never are.
    pub fn prepare(events: &DataFrame, regions: &DataFrame) -> Result<Dataset, ProcessorError> {
        Self::require_columns("event", events, &EVENT_COLUMNS)?;
        Self::require_columns("region", regions, &REGION_COLUMNS)?;

        let notes = if regions.get_column_index(NOTES).is_some() {
            col(NOTES).cast(DataType::String)
        } else {
            lit(NULL).cast(DataType::String).alias(NOTES)
        };

        // A repeated NOC in the lookup would fan out event rows; keep the first.
        let lookup = regions
            .clone()
            .lazy()
            .select([
                col(NOC).cast(DataType::String),
                col(REGION).cast(DataType::String),
                notes,
            ])
            .group_by_stable([col(NOC)])
            .agg([col(REGION).first(), col(NOTES).first()]);

        let medal = col(MEDAL).cast(DataType::String);
        let df = events
            .clone()
            .lazy()
            .with_row_index(ROW_INDEX, None)
            .with_column(col(NOC).cast(DataType::String))
            .join(
                lookup,
                [col(NOC)],
                [col(NOC)],
                JoinArgs::new(JoinType::Left),
            )
            .sort([ROW_INDEX], SortMultipleOptions::default())
            .with_columns([
                when(medal.clone().is_null().or(medal.clone().eq(lit(""))))
                    .then(lit(Medal::NoMedal.as_str()))
                    .otherwise(medal)
                    .alias(MEDAL),
                col(AGE).cast(DataType::Float64),
                col(HEIGHT).cast(DataType::Float64),
                col(WEIGHT).cast(DataType::Float64),
                col(YEAR).cast(DataType::Int32),
            ])
            .collect()?;

        let unmapped = df.column(REGION)?.null_count();
        if unmapped > 0 {
            log::debug!("{} event rows have no region mapping", unmapped);
        }
        log::info!(
            "Prepared dataset: {} rows, {} columns",
            df.height(),
            df.width()
        );

        Ok(Dataset::new(df))
    }

    fn require_columns(
        table: &'static str,
        df: &DataFrame,
        columns: &[&str],
    ) -> Result<(), ProcessorError> {
        match columns.iter().find(|c| df.get_column_index(c).is_none()) {
            Some(missing) => Err(ProcessorError::MissingColumn {
                table,
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{CITY, EVENT, GAMES, NAME, SEASON, SEX, SPORT, TEAM};

    fn events() -> DataFrame {
        DataFrame::new(vec![
            Column::new(NAME.into(), ["A", "B", "C"]),
            Column::new(SEX.into(), ["M", "F", "M"]),
            Column::new(AGE.into(), ["24", "abc", ""]),
            Column::new(HEIGHT.into(), [Some(180.0), None, Some(175.5)]),
            Column::new(WEIGHT.into(), [Some(80i64), Some(60), None]),
            Column::new(TEAM.into(), ["France", "Tuvalu", "France"]),
            Column::new(NOC.into(), ["FRA", "TUV", "FRA"]),
            Column::new(GAMES.into(), ["1992 Summer", "1992 Summer", "1996 Summer"]),
            Column::new(YEAR.into(), [1992i64, 1992, 1996]),
            Column::new(SEASON.into(), ["Summer", "Summer", "Summer"]),
            Column::new(CITY.into(), ["Barcelona", "Barcelona", "Atlanta"]),
            Column::new(SPORT.into(), ["Swimming", "Athletics", "Judo"]),
            Column::new(EVENT.into(), ["100m", "Marathon", "Heavyweight"]),
            Column::new(MEDAL.into(), [Some("Gold"), None, Some("")]),
        ])
        .unwrap()
    }

    fn regions() -> DataFrame {
        DataFrame::new(vec![
            Column::new(NOC.into(), ["FRA", "GER", "FRA"]),
            Column::new(REGION.into(), ["France", "Germany", "Duplicate"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_prepare_normalizes_fields() {
        let ds = DataProcessor::prepare(&events(), &regions()).unwrap();
        let df = ds.frame();

        assert_eq!(df.height(), 3, "lookup duplicates must not fan out rows");

        let medals: Vec<_> = df.column(MEDAL).unwrap().str().unwrap().into_iter().collect();
        assert_eq!(
            medals,
            vec![Some("Gold"), Some("No Medal"), Some("No Medal")]
        );

        let ages: Vec<_> = df.column(AGE).unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(ages, vec![Some(24.0), None, None]);

        let weights: Vec<_> = df.column(WEIGHT).unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(weights, vec![Some(80.0), Some(60.0), None]);

        assert_eq!(df.column(YEAR).unwrap().dtype(), &DataType::Int32);
    }

    #[test]
    fn test_prepare_keeps_unmapped_noc() {
        let ds = DataProcessor::prepare(&events(), &regions()).unwrap();
        let regions: Vec<_> = ds
            .frame()
            .column(REGION)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(regions, vec![Some("France"), None, Some("France")]);
        assert_eq!(ds.frame().column(NOTES).unwrap().null_count(), 3);
    }

    #[test]
    fn test_prepare_missing_column() {
        let events = events().drop(MEDAL).unwrap();
        let err = DataProcessor::prepare(&events, &regions()).unwrap_err();
        assert!(matches!(
            err,
            ProcessorError::MissingColumn { table: "event", ref column } if column == MEDAL
        ));
    }
}
