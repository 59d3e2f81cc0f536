//! CSV Data Loader Module
//! Reads the event and region CSV files with Polars and prepares the dataset.

use super::dataset::Dataset;
use super::processor::{DataProcessor, ProcessorError};
use super::schema::{AGE, HEIGHT, WEIGHT};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to prepare dataset: {0}")]
    Prepare(#[from] ProcessorError),
}

/// Locations of the two input tables.
pub struct DataLoader {
    events_path: PathBuf,
    regions_path: PathBuf,
}

impl DataLoader {
    pub fn new(events_path: impl Into<PathBuf>, regions_path: impl Into<PathBuf>) -> Self {
        Self {
            events_path: events_path.into(),
            regions_path: regions_path.into(),
        }
    }

    pub fn events_path(&self) -> &Path {
        &self.events_path
    }

    pub fn regions_path(&self) -> &Path {
        &self.regions_path
    }

    /// Read both files and build the canonical dataset.
    pub fn load(&self) -> Result<Dataset, LoaderError> {
        // Read measurements as text; preparation casts them leniently.
        let measurements = [AGE, HEIGHT, WEIGHT].map(|name| (name, DataType::String));
        let events = Self::load_csv_with_dtypes(&self.events_path, &measurements)?;
        let regions = Self::load_csv(&self.regions_path)?;
        Ok(DataProcessor::prepare(&events, &regions)?)
    }

    /// Load a CSV file using Polars.
    ///
    /// `NA` cells are read as nulls; unparseable cells are nulled instead of
    /// failing the whole read.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        Self::load_csv_with_dtypes(path, &[])
    }

    /// Load a CSV file, forcing the listed columns to the given types
    /// instead of inferring them from the leading rows.
    pub fn load_csv_with_dtypes(
        path: &Path,
        dtypes: &[(&str, DataType)],
    ) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let overwrite = (!dtypes.is_empty()).then(|| {
            let schema: Schema = dtypes
                .iter()
                .map(|(name, dtype)| (PlSmallStr::from_str(name), dtype.clone()))
                .collect();
            Arc::new(schema)
        });

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_dtype_overwrite(overwrite)
            .with_null_values(Some(NullValues::AllColumnsSingle("NA".into())))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        log::info!(
            "Loaded {}: {} rows, {} columns",
            path.display(),
            df.height(),
            df.width()
        );
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_reported() {
        let loader = DataLoader::new("does/not/exist.csv", "noc_regions.csv");
        let err = loader.load().unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(ref p) if p.ends_with("exist.csv")));
    }

    #[test]
    fn test_forced_dtype_keeps_late_decimal() {
        let path = std::env::temp_dir().join(format!("late_decimal_{}.csv", std::process::id()));
        let mut csv = String::from("Name,Weight\n");
        for i in 0..10_050 {
            let weight = if i == 10_040 { "64.5" } else { "80" };
            csv.push_str(&format!("A{i},{weight}\n"));
        }
        std::fs::write(&path, csv).unwrap();

        let df = DataLoader::load_csv_with_dtypes(&path, &[(WEIGHT, DataType::String)]).unwrap();
        std::fs::remove_file(&path).unwrap();

        let weights = df.column(WEIGHT).unwrap().str().unwrap();
        assert_eq!(weights.get(10_040), Some("64.5"));
        assert_eq!(weights.null_count(), 0);
    }
}
