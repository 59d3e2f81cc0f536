//! Participation trends across Games editions.

use super::{counts, years, AnalysisError};
use crate::data::schema::{CITY, EVENT, NAME, REGION, SEX, SPORT, YEAR};
use crate::data::Dataset;
use polars::prelude::*;
use serde::Serialize;
use std::fmt;

const COUNT: &str = "Count";
const MALE: &str = "Male";
const FEMALE: &str = "Female";

/// Column whose distinct values are counted per edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Event,
    Sport,
    Region,
    Athlete,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Region,
        Dimension::Event,
        Dimension::Sport,
        Dimension::Athlete,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Dimension::Event => EVENT,
            Dimension::Sport => SPORT,
            Dimension::Region => REGION,
            Dimension::Athlete => NAME,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Dimension::Event => "Events",
            Dimension::Sport => "Sports",
            Dimension::Region => "Nations",
            Dimension::Athlete => "Athletes",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditionCount {
    pub edition: i32,
    pub count: u32,
}

/// Distinct values of `dimension` per edition, editions ascending.
///
/// An edition with no non-null value of the dimension is absent, never a
/// zero row.
pub fn count_over_time(
    ds: &Dataset,
    dimension: Dimension,
) -> Result<Vec<EditionCount>, AnalysisError> {
    let column = dimension.column();
    let df = ds
        .lazy()
        .filter(col(column).is_not_null().and(col(YEAR).is_not_null()))
        .group_by([col(YEAR)])
        .agg([col(column).n_unique().alias(COUNT)])
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?;

    Ok(years(&df)?
        .into_iter()
        .zip(counts(&df, COUNT)?)
        .map(|(edition, count)| EditionCount {
            edition: edition.unwrap_or_default(),
            count,
        })
        .collect())
}

/// Headline numbers of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub total: u64,
    pub mean: f64,
    pub max: u32,
    pub max_edition: i32,
}

impl SeriesSummary {
    /// `None` for an empty series. The earliest edition wins a tie for max.
    pub fn of(series: &[EditionCount]) -> Option<Self> {
        let peak = series
            .iter()
            .fold(None::<&EditionCount>, |best, e| match best {
                Some(b) if b.count >= e.count => Some(b),
                _ => Some(e),
            })?;
        let total: u64 = series.iter().map(|e| u64::from(e.count)).sum();
        Some(Self {
            total,
            mean: total as f64 / series.len() as f64,
            max: peak.count,
            max_edition: peak.edition,
        })
    }
}

/// Distinct counts across the whole dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub editions: usize,
    pub host_cities: usize,
    pub sports: usize,
    pub events: usize,
    pub athletes: usize,
    pub nations: usize,
}

pub fn overview(ds: &Dataset) -> Result<Overview, AnalysisError> {
    let distinct = |name: &str| -> Result<usize, AnalysisError> {
        let series = ds.frame().column(name)?.as_materialized_series().drop_nulls();
        Ok(series.n_unique()?)
    };

    Ok(Overview {
        editions: distinct(YEAR)?,
        host_cities: distinct(CITY)?,
        sports: distinct(SPORT)?,
        events: distinct(EVENT)?,
        athletes: distinct(NAME)?,
        nations: distinct(REGION)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenderYear {
    pub year: i32,
    pub male: u32,
    pub female: u32,
    pub total: u32,
    /// Female share of the total in percent.
    pub female_share: Option<f64>,
}

/// Male and female athletes per edition.
///
/// Each athlete (Name, region) counts once per edition regardless of how many
/// events they entered.
pub fn gender_participation(ds: &Dataset) -> Result<Vec<GenderYear>, AnalysisError> {
    let df = ds
        .lazy()
        .filter(col(YEAR).is_not_null())
        .group_by_stable([col(NAME), col(REGION), col(YEAR)])
        .agg([col(SEX).first()])
        .group_by([col(YEAR)])
        .agg([
            col(SEX).eq(lit("M")).sum().alias(MALE),
            col(SEX).eq(lit("F")).sum().alias(FEMALE),
        ])
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?;

    Ok(years(&df)?
        .into_iter()
        .zip(counts(&df, MALE)?)
        .zip(counts(&df, FEMALE)?)
        .filter(|((_, male), female)| male + female > 0)
        .map(|((year, male), female)| {
            let total = male + female;
            GenderYear {
                year: year.unwrap_or_default(),
                male,
                female,
                total,
                female_share: (total > 0).then(|| female as f64 / total as f64 * 100.0),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{dataset, Row};

    fn games() -> Dataset {
        dataset(&[
            Row::new("A", "USA", 1900, "Tennis", None).event("Singles"),
            Row::new("A", "USA", 1900, "Tennis", None).event("Doubles"),
            Row::new("B", "France", 1900, "Rowing", None).event("Eights"),
            Row::new("C", "France", 1896, "Rowing", None).event("Eights").sex("F"),
            Row::new("D", "Atlantis", 1904, "Rowing", None).unmapped(),
            Row::new("E", "USA", 1904, "Tennis", None).event("Singles").sex("F"),
        ])
    }

    #[test]
    fn test_events_over_time() {
        let series = count_over_time(&games(), Dimension::Event).unwrap();
        assert_eq!(
            series,
            vec![
                EditionCount { edition: 1896, count: 1 },
                EditionCount { edition: 1900, count: 3 },
                EditionCount { edition: 1904, count: 2 },
            ]
        );
    }

    #[test]
    fn test_nations_skip_unmapped_and_sorted() {
        let series = count_over_time(&games(), Dimension::Region).unwrap();
        let editions: Vec<i32> = series.iter().map(|e| e.edition).collect();
        assert_eq!(editions, vec![1896, 1900, 1904]);
        assert!(series.iter().all(|e| e.count > 0));
        assert_eq!(series[1].count, 2);
        assert_eq!(series[2].count, 1, "unmapped NOC is not a nation");
    }

    #[test]
    fn test_absent_years_have_no_row() {
        let ds = dataset(&[
            Row::new("A", "USA", 1900, "Tennis", None),
            Row::new("B", "Atlantis", 1904, "Tennis", None).unmapped(),
        ]);
        let series = count_over_time(&ds, Dimension::Region).unwrap();
        assert_eq!(series, vec![EditionCount { edition: 1900, count: 1 }]);
    }

    #[test]
    fn test_sports_over_time() {
        let series = count_over_time(&games(), Dimension::Sport).unwrap();
        assert_eq!(
            series,
            vec![
                EditionCount { edition: 1896, count: 1 },
                EditionCount { edition: 1900, count: 2 },
                EditionCount { edition: 1904, count: 2 },
            ]
        );
    }

    #[test]
    fn test_athlete_in_two_events_counts_once() {
        let series = count_over_time(&games(), Dimension::Athlete).unwrap();
        let counts: Vec<(i32, u32)> = series.iter().map(|e| (e.edition, e.count)).collect();
        // A entered Singles and Doubles in 1900
        assert_eq!(counts, vec![(1896, 1), (1900, 2), (1904, 2)]);
    }

    #[test]
    fn test_series_summary() {
        let series = count_over_time(&games(), Dimension::Event).unwrap();
        let summary = SeriesSummary::of(&series).unwrap();
        assert_eq!(summary.total, 6);
        assert_eq!(summary.mean, 2.0);
        assert_eq!(summary.max, 3);
        assert_eq!(summary.max_edition, 1900);
        assert_eq!(SeriesSummary::of(&[]), None);
    }

    #[test]
    fn test_overview_counts() {
        let o = overview(&games()).unwrap();
        assert_eq!(
            o,
            Overview {
                editions: 3,
                host_cities: 3,
                sports: 2,
                events: 4,
                athletes: 5,
                nations: 2,
            }
        );
    }

    #[test]
    fn test_gender_participation() {
        let rows = gender_participation(&games()).unwrap();
        let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1896, 1900, 1904]);

        assert_eq!((rows[0].male, rows[0].female), (0, 1));
        assert_eq!(rows[0].female_share, Some(100.0));
        assert_eq!((rows[1].male, rows[1].female), (2, 0), "A counts once in 1900");
        assert_eq!(rows[1].female_share, Some(0.0));
        assert_eq!((rows[2].male, rows[2].female), (1, 1));
        assert_eq!(rows[2].total, 2);
    }
}
