//! Canonical Dataset Module
//! Immutable handle over the merged event/region table.

use super::schema::{MEDAL, REGION};
use crate::data::Medal;
use polars::prelude::*;

/// The prepared, read-only event participation table.
///
/// Every aggregation receives a `&Dataset` and works on a lazy view of it, so
/// the underlying frame is never mutated after preparation. Cloning is cheap:
/// polars columns are reference counted.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    pub(crate) fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Borrow the underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Lazy view over every row.
    pub fn lazy(&self) -> LazyFrame {
        self.df.clone().lazy()
    }

    /// Lazy view restricted to rows that won an actual medal.
    pub fn medal_rows(&self) -> LazyFrame {
        self.lazy()
            .filter(col(MEDAL).neq(lit(Medal::NoMedal.as_str())))
    }

    /// Lazy view restricted to one region. Rows without a region never match.
    pub fn region_rows(&self, region: &str) -> LazyFrame {
        self.lazy().filter(col(REGION).eq(lit(region)))
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }
}
