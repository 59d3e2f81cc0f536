//! Stats module - descriptive statistics and significance tests

mod calculator;

pub use calculator::{Describe, HistogramBin, StatsCalculator};
