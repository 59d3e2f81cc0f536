//! Country-wise analysis: one region's medal history, sports and athletes.

use super::medals::team_medals;
use super::{counts, floats, strings, years, AnalysisError};
use crate::data::schema::{AGE, MEDAL, NAME, REGION, SPORT, YEAR};
use crate::data::{Dataset, Medal};
use crate::stats::{Describe, HistogramBin, StatsCalculator};
use polars::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Number of athletes in the country-wise leaderboard.
pub const COUNTRY_TOP_SIZE: u32 = 10;

/// Number of bins in the age histogram.
const AGE_BINS: usize = 20;

const MEDALS: &str = "Medals";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearMedals {
    pub year: i32,
    pub medals: u32,
}

/// Medals won by one region per edition, team medals counted once.
pub fn yearly_medal_tally(ds: &Dataset, region: &str) -> Result<Vec<YearMedals>, AnalysisError> {
    let df = team_medals(ds)
        .filter(
            col(MEDAL)
                .neq(lit(Medal::NoMedal.as_str()))
                .and(col(REGION).eq(lit(region)))
                .and(col(YEAR).is_not_null()),
        )
        .group_by([col(YEAR)])
        .agg([len().alias(MEDALS)])
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?;

    Ok(years(&df)?
        .into_iter()
        .zip(counts(&df, MEDALS)?)
        .map(|(year, medals)| YearMedals {
            year: year.unwrap_or_default(),
            medals,
        })
        .collect())
}

/// Medal rows per sport and edition for one region.
///
/// Sports are rows, editions are columns, both ascending. Only editions in
/// which the region won something appear. Cells count medal rows, so every
/// member of a medalling team adds one.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SportHeatmap {
    pub sports: Vec<String>,
    pub years: Vec<i32>,
    /// `counts[sport][year]`, missing combinations are zero.
    pub counts: Vec<Vec<u32>>,
}

impl SportHeatmap {
    pub fn get(&self, sport: &str, year: i32) -> u32 {
        let row = self.sports.iter().position(|s| s == sport);
        let column = self.years.iter().position(|y| *y == year);
        match (row, column) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    pub fn max(&self) -> u32 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.sports.is_empty()
    }
}

pub fn sport_heatmap(ds: &Dataset, region: &str) -> Result<SportHeatmap, AnalysisError> {
    let df = ds
        .medal_rows()
        .filter(
            col(REGION)
                .eq(lit(region))
                .and(col(SPORT).is_not_null())
                .and(col(YEAR).is_not_null()),
        )
        .group_by([col(SPORT), col(YEAR)])
        .agg([len().alias(MEDALS)])
        .collect()?;

    let cells: BTreeMap<(String, i32), u32> = strings(&df, SPORT)?
        .into_iter()
        .zip(years(&df)?)
        .zip(counts(&df, MEDALS)?)
        .map(|((sport, year), n)| ((sport, year.unwrap_or_default()), n))
        .collect();

    let sports: Vec<String> = cells
        .keys()
        .map(|(s, _)| s.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let years: Vec<i32> = cells
        .keys()
        .map(|(_, y)| *y)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let counts = sports
        .iter()
        .map(|sport| {
            years
                .iter()
                .map(|year| cells.get(&(sport.clone(), *year)).copied().unwrap_or(0))
                .collect()
        })
        .collect();

    Ok(SportHeatmap {
        sports,
        years,
        counts,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryAthlete {
    pub name: String,
    pub sport: String,
    pub total_medals: u32,
}

/// The region's ten athletes with the most medal rows.
///
/// The sport shown is the one of the athlete's first medal row.
pub fn top_athletes_by_country(
    ds: &Dataset,
    region: &str,
) -> Result<Vec<CountryAthlete>, AnalysisError> {
    let df = ds
        .medal_rows()
        .filter(col(REGION).eq(lit(region)))
        .group_by_stable([col(NAME)])
        .agg([len().alias(MEDALS), col(SPORT).first()])
        .sort_by_exprs(
            [col(MEDALS), col(NAME)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .limit(COUNTRY_TOP_SIZE)
        .collect()?;

    let names = strings(&df, NAME)?;
    let sports = strings(&df, SPORT)?;
    let medals = counts(&df, MEDALS)?;

    Ok(names
        .into_iter()
        .zip(sports)
        .zip(medals)
        .map(|((name, sport), total_medals)| CountryAthlete {
            name,
            sport,
            total_medals,
        })
        .collect())
}

/// Age distribution over every participation row of one region.
#[derive(Debug, Clone, Serialize)]
pub struct AgeProfile {
    pub region: String,
    pub stats: Describe,
    pub histogram: Vec<HistogramBin>,
}

pub fn region_age_profile(ds: &Dataset, region: &str) -> Result<AgeProfile, AnalysisError> {
    let df = ds.region_rows(region).select([col(AGE)]).collect()?;
    let ages: Vec<f64> = floats(&df, AGE)?.into_iter().flatten().collect();

    Ok(AgeProfile {
        region: region.to_string(),
        stats: StatsCalculator::describe(&ages),
        histogram: StatsCalculator::histogram(&ages, AGE_BINS),
    })
}
