//! Medal tally by region or by edition.

use super::filters::Selection;
use super::{counts, strings, years, AnalysisError};
use crate::data::schema::{MEDAL, REGION, TEAM_MEDAL_KEY, YEAR};
use crate::data::{Dataset, Medal};
use polars::prelude::*;
use serde::Serialize;

/// Which rows feed the tally, and what they are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyScope<'a> {
    /// Every edition, grouped by region.
    NoFilter,
    /// One region's history, grouped by year.
    ByRegion(&'a str),
    /// One edition, grouped by region.
    ByYear(i32),
    /// One region in one edition.
    Both { year: i32, region: &'a str },
}

/// Grouping column of a tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TallyKey {
    Region,
    Year,
}

impl<'a> TallyScope<'a> {
    pub fn from_filters(year: &Selection<i32>, region: &'a Selection<String>) -> Self {
        match (year, region) {
            (Selection::Overall, Selection::Overall) => TallyScope::NoFilter,
            (Selection::Overall, Selection::Only(region)) => TallyScope::ByRegion(region),
            (Selection::Only(year), Selection::Overall) => TallyScope::ByYear(*year),
            (Selection::Only(year), Selection::Only(region)) => TallyScope::Both {
                year: *year,
                region,
            },
        }
    }

    pub fn key(&self) -> TallyKey {
        match self {
            TallyScope::ByRegion(_) => TallyKey::Year,
            _ => TallyKey::Region,
        }
    }

    fn filter(&self, lf: LazyFrame) -> LazyFrame {
        match *self {
            TallyScope::NoFilter => lf,
            TallyScope::ByRegion(region) => lf.filter(col(REGION).eq(lit(region))),
            TallyScope::ByYear(year) => lf.filter(col(YEAR).eq(lit(year))),
            TallyScope::Both { year, region } => {
                lf.filter(col(YEAR).eq(lit(year)).and(col(REGION).eq(lit(region))))
            }
        }
    }

    fn sort(&self, lf: LazyFrame) -> LazyFrame {
        match self.key() {
            TallyKey::Year => lf.sort([YEAR], SortMultipleOptions::default()),
            TallyKey::Region => lf.sort_by_exprs(
                [
                    col(Medal::Gold.as_str()),
                    col(Medal::Silver.as_str()),
                    col(Medal::Bronze.as_str()),
                    col(REGION),
                ],
                SortMultipleOptions::default()
                    .with_order_descending_multi([true, true, true, false]),
            ),
        }
    }
}

impl TallyKey {
    fn column(self) -> &'static str {
        match self {
            TallyKey::Region => REGION,
            TallyKey::Year => YEAR,
        }
    }
}

/// Value of the grouping column for one tally row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TallyGroup {
    Region(String),
    Year(i32),
}

impl std::fmt::Display for TallyGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyGroup::Region(region) => f.write_str(region),
            TallyGroup::Year(year) => write!(f, "{year}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedalTallyRow {
    pub group: TallyGroup,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
    pub total: u32,
}

/// Share of each medal kind in a row's total, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MedalRatios {
    pub gold: f64,
    pub silver: f64,
    pub bronze: f64,
}

impl MedalTallyRow {
    /// `None` when the row has no medals at all.
    pub fn ratios(&self) -> Option<MedalRatios> {
        if self.total == 0 {
            return None;
        }
        let share = |n: u32| (n as f64 / self.total as f64 * 100.0).round() / 100.0;
        Some(MedalRatios {
            gold: share(self.gold),
            silver: share(self.silver),
            bronze: share(self.bronze),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MedalTally {
    pub key: TallyKey,
    pub rows: Vec<MedalTallyRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverallTallyRow {
    #[serde(flatten)]
    pub tally: MedalTallyRow,
    pub ratios: Option<MedalRatios>,
}

/// One row per distinct team-medal key. A relay won by four athletes
/// becomes a single row.
pub(crate) fn team_medals(ds: &Dataset) -> LazyFrame {
    ds.lazy()
        .group_by_stable(TEAM_MEDAL_KEY.map(col))
        .agg([col(REGION).first()])
}

fn medal_flag(medal: Medal) -> Expr {
    when(col(MEDAL).eq(lit(medal.as_str())))
        .then(lit(1u32))
        .otherwise(lit(0u32))
        .alias(medal.as_str())
}

/// Gold/Silver/Bronze/Total per region (or per year for a single region).
///
/// Medals are deduplicated on the team-medal key before counting. Regions
/// and years that took part without winning appear with zero counts; rows
/// without a region never form a group.
pub fn medal_tally(
    ds: &Dataset,
    year: &Selection<i32>,
    region: &Selection<String>,
) -> Result<MedalTally, AnalysisError> {
    let scope = TallyScope::from_filters(year, region);
    let key = scope.key();

    let lf = scope
        .filter(team_medals(ds))
        .filter(col(key.column()).is_not_null())
        .group_by([col(key.column())])
        .agg(Medal::AWARDED.map(|m| medal_flag(m).sum()));
    let df = scope.sort(lf).collect()?;

    let groups = match key {
        TallyKey::Region => strings(&df, REGION)?
            .into_iter()
            .map(TallyGroup::Region)
            .collect::<Vec<_>>(),
        TallyKey::Year => years(&df)?
            .into_iter()
            .map(|y| TallyGroup::Year(y.unwrap_or_default()))
            .collect(),
    };
    let gold = counts(&df, Medal::Gold.as_str())?;
    let silver = counts(&df, Medal::Silver.as_str())?;
    let bronze = counts(&df, Medal::Bronze.as_str())?;

    let rows = groups
        .into_iter()
        .enumerate()
        .map(|(i, group)| MedalTallyRow {
            group,
            gold: gold[i],
            silver: silver[i],
            bronze: bronze[i],
            total: gold[i] + silver[i] + bronze[i],
        })
        .collect();

    Ok(MedalTally { key, rows })
}

/// The all-time tally by region, with medal-type ratios.
pub fn overall_medal_tally(ds: &Dataset) -> Result<Vec<OverallTallyRow>, AnalysisError> {
    let tally = medal_tally(ds, &Selection::Overall, &Selection::Overall)?;
    Ok(tally
        .rows
        .into_iter()
        .map(|tally| OverallTallyRow {
            ratios: tally.ratios(),
            tally,
        })
        .collect())
}

/// Headline numbers of a tally table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TallySummary {
    pub groups: usize,
    pub total_medals: u64,
    pub average: f64,
    /// First group holding the highest total.
    pub top_group: TallyGroup,
    pub most_gold: u32,
    pub most_silver: u32,
    pub most_bronze: u32,
}

impl TallySummary {
    /// `None` for an empty table.
    pub fn of<'a>(rows: impl IntoIterator<Item = &'a MedalTallyRow>) -> Option<Self> {
        let rows: Vec<&MedalTallyRow> = rows.into_iter().collect();
        let top = rows
            .iter()
            .fold(None::<&MedalTallyRow>, |best, r| match best {
                Some(b) if b.total >= r.total => Some(b),
                _ => Some(r),
            })?;
        let total_medals: u64 = rows.iter().map(|r| u64::from(r.total)).sum();
        let most = |value: fn(&MedalTallyRow) -> u32| {
            rows.iter().map(|r| value(r)).max().unwrap_or(0)
        };
        Some(Self {
            groups: rows.len(),
            total_medals,
            average: total_medals as f64 / rows.len() as f64,
            top_group: top.group.clone(),
            most_gold: most(|r: &MedalTallyRow| r.gold),
            most_silver: most(|r: &MedalTallyRow| r.silver),
            most_bronze: most(|r: &MedalTallyRow| r.bronze),
        })
    }
}

impl MedalTallyRow {
    /// Whether the total lies in `min..=max`.
    pub fn total_within(&self, min: u32, max: u32) -> bool {
        (min..=max).contains(&self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{dataset, relay_and_individual, Row};

    fn find<'a>(tally: &'a MedalTally, region: &str) -> &'a MedalTallyRow {
        tally
            .rows
            .iter()
            .find(|r| r.group == TallyGroup::Region(region.to_string()))
            .unwrap()
    }

    fn multi_year() -> Dataset {
        dataset(&[
            Row::new("A", "USA", 2004, "Swimming", Some("Gold")),
            Row::new("B", "USA", 2008, "Swimming", Some("Gold")).event("200m"),
            Row::new("C", "China", 2008, "Diving", Some("Gold")).event("10m"),
            Row::new("D", "China", 2008, "Diving", Some("Gold")).event("3m"),
            Row::new("E", "Kenya", 2008, "Athletics", Some("Silver")),
            Row::new("F", "Kenya", 2004, "Athletics", Some("Gold")).event("5000m"),
            Row::new("G", "Fiji", 2008, "Rugby", None),
        ])
    }

    #[test]
    fn test_team_medal_counted_once() {
        let tally = medal_tally(
            &relay_and_individual(),
            &Selection::Overall,
            &Selection::Overall,
        )
        .unwrap();

        assert_eq!(tally.key, TallyKey::Region);
        assert_eq!(find(&tally, "France").gold, 1);
        assert_eq!(find(&tally, "USA").gold, 1);
    }

    #[test]
    fn test_total_is_sum_of_kinds() {
        let tally = medal_tally(&multi_year(), &Selection::Overall, &Selection::Overall).unwrap();
        assert!(!tally.rows.is_empty());
        for row in &tally.rows {
            assert_eq!(row.total, row.gold + row.silver + row.bronze);
        }
    }

    #[test]
    fn test_year_filter_groups_by_region() {
        let tally = medal_tally(&multi_year(), &Selection::Only(2008), &Selection::Overall).unwrap();
        let regions: Vec<String> = tally.rows.iter().map(|r| r.group.to_string()).collect();
        assert_eq!(regions, vec!["China", "USA", "Kenya", "Fiji"]);
        assert_eq!(find(&tally, "China").gold, 2);
        assert_eq!(find(&tally, "Kenya").gold, 0);
        assert_eq!(find(&tally, "Kenya").silver, 1);
        assert_eq!(find(&tally, "Fiji").total, 0);
    }

    #[test]
    fn test_region_filter_groups_by_year() {
        let region = Selection::Only("Kenya".to_string());
        let tally = medal_tally(&multi_year(), &Selection::Overall, &region).unwrap();
        assert_eq!(tally.key, TallyKey::Year);
        let groups: Vec<TallyGroup> = tally.rows.iter().map(|r| r.group.clone()).collect();
        assert_eq!(groups, vec![TallyGroup::Year(2004), TallyGroup::Year(2008)]);
        assert_eq!(tally.rows[0].gold, 1);
        assert_eq!(tally.rows[1].silver, 1);
    }

    #[test]
    fn test_both_filters_single_row_or_empty() {
        let region = Selection::Only("USA".to_string());
        let tally = medal_tally(&multi_year(), &Selection::Only(2004), &region).unwrap();
        assert_eq!(tally.rows.len(), 1);
        assert_eq!(tally.rows[0].gold, 1);

        let region = Selection::Only("Fiji".to_string());
        let tally = medal_tally(&multi_year(), &Selection::Only(2004), &region).unwrap();
        assert!(tally.rows.is_empty());
    }

    #[test]
    fn test_gold_ties_break_on_region_name() {
        let ds = dataset(&[
            Row::new("A", "Norway", 2000, "Biathlon", Some("Gold")),
            Row::new("B", "Austria", 2000, "Skiing", Some("Gold")),
        ]);
        let tally = medal_tally(&ds, &Selection::Overall, &Selection::Overall).unwrap();
        let regions: Vec<String> = tally.rows.iter().map(|r| r.group.to_string()).collect();
        assert_eq!(regions, vec!["Austria", "Norway"]);
    }

    #[test]
    fn test_unmapped_rows_are_not_grouped() {
        let ds = dataset(&[
            Row::new("A", "Norway", 2000, "Biathlon", Some("Gold")),
            Row::new("B", "Atlantis", 2000, "Skiing", Some("Gold")).unmapped(),
        ]);
        let tally = medal_tally(&ds, &Selection::Overall, &Selection::Overall).unwrap();
        assert_eq!(tally.rows.len(), 1);
    }

    #[test]
    fn test_ratios_guard_zero_total() {
        let rows = overall_medal_tally(&multi_year()).unwrap();
        let fiji = rows
            .iter()
            .find(|r| r.tally.group == TallyGroup::Region("Fiji".into()))
            .unwrap();
        assert_eq!(fiji.ratios, None);

        let kenya = rows
            .iter()
            .find(|r| r.tally.group == TallyGroup::Region("Kenya".into()))
            .unwrap();
        let ratios = kenya.ratios.unwrap();
        assert_eq!(ratios.gold, 0.5);
        assert_eq!(ratios.silver, 0.5);
        assert_eq!(ratios.bronze, 0.0);
    }

    #[test]
    fn test_summary_of_filtered_rows() {
        let rows = overall_medal_tally(&multi_year()).unwrap();
        let kept: Vec<&MedalTallyRow> = rows
            .iter()
            .map(|r| &r.tally)
            .filter(|r| r.total_within(1, 2))
            .collect();
        // Fiji has no medal, everyone else has two
        assert_eq!(kept.len(), 3);

        let summary = TallySummary::of(kept).unwrap();
        assert_eq!(summary.groups, 3);
        assert_eq!(summary.total_medals, 6);
        assert_eq!(summary.average, 2.0);
        assert_eq!(summary.top_group, TallyGroup::Region("China".into()));
        assert_eq!(summary.most_gold, 2);
        assert_eq!(summary.most_silver, 1);
        assert_eq!(summary.most_bronze, 0);

        assert_eq!(TallySummary::of(&Vec::<MedalTallyRow>::new()), None);
    }
}
