//! Athlete-wise analysis: leaderboards, age and body measurements.

use super::filters::Selection;
use super::{counts, floats, opt_strings, strings, AnalysisError};
use crate::data::schema::{AGE, HEIGHT, MEDAL, NAME, REGION, SEX, SPORT, WEIGHT};
use crate::data::{Dataset, Medal};
use crate::stats::{Describe, StatsCalculator};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;

/// Number of athletes in the overall leaderboard.
pub const LEADERBOARD_SIZE: u32 = 15;

const MEDALS: &str = "Medals";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AthleteMedals {
    pub name: String,
    pub medals: u32,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub sport: Option<String>,
    pub region: Option<String>,
}

/// The fifteen athletes with the most medal rows, optionally in one sport.
///
/// Every medal row counts, so each member of a medalling team is credited.
/// Sport and region come from the athlete's first medal row.
pub fn most_successful(
    ds: &Dataset,
    sport: &Selection<String>,
) -> Result<Vec<AthleteMedals>, AnalysisError> {
    let mut lf = ds.medal_rows();
    if let Selection::Only(sport) = sport {
        lf = lf.filter(col(SPORT).eq(lit(sport.as_str())));
    }

    let mut aggs = vec![len().alias(MEDALS), col(SPORT).first(), col(REGION).first()];
    aggs.extend(
        Medal::AWARDED.map(|m| col(MEDAL).eq(lit(m.as_str())).sum().alias(m.as_str())),
    );
    let df = lf
        .group_by_stable([col(NAME)])
        .agg(aggs)
        .sort_by_exprs(
            [col(MEDALS), col(NAME)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .limit(LEADERBOARD_SIZE)
        .collect()?;

    let names = strings(&df, NAME)?;
    let medals = counts(&df, MEDALS)?;
    let gold = counts(&df, Medal::Gold.as_str())?;
    let silver = counts(&df, Medal::Silver.as_str())?;
    let bronze = counts(&df, Medal::Bronze.as_str())?;
    let sports = opt_strings(&df, SPORT)?;
    let regions = opt_strings(&df, REGION)?;

    Ok(names
        .into_iter()
        .zip(sports)
        .zip(regions)
        .enumerate()
        .map(|(i, ((name, sport), region))| AthleteMedals {
            name,
            medals: medals[i],
            gold: gold[i],
            silver: silver[i],
            bronze: bronze[i],
            sport,
            region,
        })
        .collect())
}

/// One row per athlete (Name, region), taken from their first appearance.
fn unique_athletes(ds: &Dataset) -> LazyFrame {
    ds.lazy()
        .group_by_stable([col(NAME), col(REGION)])
        .agg([
            col(SEX).first(),
            col(AGE).first(),
            col(HEIGHT).first(),
            col(WEIGHT).first(),
            col(SPORT).first(),
            col(MEDAL).first(),
        ])
}

/// Age statistics of one group of athletes.
#[derive(Debug, Clone, Serialize)]
pub struct AgeGroupStats {
    pub group: String,
    pub stats: Describe,
    /// Welch's t-test against the overall group; `None` for the overall group.
    pub p_value: Option<f64>,
    pub is_significant: bool,
    #[serde(skip)]
    pub ages: Vec<f64>,
}

/// Ages of all athletes and of gold, silver and bronze medalists.
///
/// Athletes are counted once, with the medal of their first appearance. The
/// first element is always the `Overall` group.
pub fn age_by_medal(ds: &Dataset) -> Result<Vec<AgeGroupStats>, AnalysisError> {
    let df = unique_athletes(ds).select([col(AGE), col(MEDAL)]).collect()?;
    let ages = floats(&df, AGE)?;
    let medals = strings(&df, MEDAL)?;

    let overall: Vec<f64> = ages.iter().flatten().copied().collect();

    let groups: Vec<(String, Vec<f64>)> = Medal::AWARDED
        .iter()
        .map(|medal| {
            let values = ages
                .iter()
                .zip(&medals)
                .filter(|(_, m)| Medal::parse(m) == *medal)
                .filter_map(|(age, _)| *age)
                .collect();
            (format!("{medal} Medalists"), values)
        })
        .collect();

    let mut result = vec![AgeGroupStats {
        group: "Overall".to_string(),
        stats: StatsCalculator::describe(&overall),
        p_value: None,
        is_significant: false,
        ages: overall.clone(),
    }];

    // Use rayon for parallel computation
    result.par_extend(groups.into_par_iter().map(|(group, values)| {
        let (p_value, is_significant) = StatsCalculator::perform_ttest(&values, &overall);
        AgeGroupStats {
            group,
            stats: StatsCalculator::describe(&values),
            p_value: (!p_value.is_nan()).then_some(p_value),
            is_significant,
            ages: values,
        }
    }));

    Ok(result)
}

/// Height and weight of one athlete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyPoint {
    pub name: String,
    pub sex: String,
    pub medal: Medal,
    pub height: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SexBodyStats {
    pub sex: String,
    pub height: Describe,
    pub weight: Describe,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeightWeight {
    pub sport: String,
    pub points: Vec<BodyPoint>,
    /// Pearson correlation between height and weight.
    pub correlation: Option<f64>,
    pub by_sex: Vec<SexBodyStats>,
}

/// Height against weight for the athletes of one sport.
///
/// Athletes are counted once (Name, region) and belong to the sport of their
/// first appearance. Only athletes with both measurements become points.
pub fn height_weight(ds: &Dataset, sport: &str) -> Result<HeightWeight, AnalysisError> {
    let df = unique_athletes(ds)
        .filter(col(SPORT).eq(lit(sport)))
        .collect()?;

    let names = strings(&df, NAME)?;
    let sexes = strings(&df, SEX)?;
    let medals = strings(&df, MEDAL)?;
    let heights = floats(&df, HEIGHT)?;
    let weights = floats(&df, WEIGHT)?;

    let points: Vec<BodyPoint> = names
        .into_iter()
        .zip(sexes.iter())
        .zip(medals.iter())
        .zip(heights.iter().zip(weights.iter()))
        .filter_map(|(((name, sex), medal), (height, weight))| {
            Some(BodyPoint {
                name,
                sex: sex.clone(),
                medal: Medal::parse(medal),
                height: (*height)?,
                weight: (*weight)?,
            })
        })
        .collect();

    let xs: Vec<f64> = points.iter().map(|p| p.height).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.weight).collect();

    let by_sex = ["M", "F"]
        .iter()
        .map(|sex| {
            let pick = |values: &[Option<f64>]| -> Vec<f64> {
                values
                    .iter()
                    .zip(&sexes)
                    .filter(|(_, s)| s.as_str() == *sex)
                    .filter_map(|(v, _)| *v)
                    .collect()
            };
            SexBodyStats {
                sex: sex.to_string(),
                height: StatsCalculator::describe(&pick(&heights)),
                weight: StatsCalculator::describe(&pick(&weights)),
            }
        })
        .collect();

    Ok(HeightWeight {
        sport: sport.to_string(),
        correlation: StatsCalculator::correlation(&xs, &ys),
        points,
        by_sex,
    })
}
