//! Filter enumeration: the choices offered for year, region and sport.

use super::AnalysisError;
use crate::data::schema::{REGION, SPORT, YEAR};
use crate::data::Dataset;
use std::collections::BTreeSet;
use std::fmt;

/// A filter value: everything (`Overall`) or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    Overall,
    Only(T),
}

impl<T> Selection<T> {
    pub fn is_overall(&self) -> bool {
        matches!(self, Selection::Overall)
    }

    pub fn only(&self) -> Option<&T> {
        match self {
            Selection::Overall => None,
            Selection::Only(value) => Some(value),
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Overall
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Overall => f.write_str("Overall"),
            Selection::Only(value) => value.fmt(f),
        }
    }
}

/// Distinct years ascending and distinct regions alphabetically, each list
/// led by `Overall`. Rows without a region do not contribute a choice.
pub fn list_years_and_regions(
    ds: &Dataset,
) -> Result<(Vec<Selection<i32>>, Vec<Selection<String>>), AnalysisError> {
    let years: BTreeSet<i32> = ds.frame().column(YEAR)?.i32()?.into_iter().flatten().collect();

    let years = std::iter::once(Selection::Overall)
        .chain(years.into_iter().map(Selection::Only))
        .collect();
    let regions = std::iter::once(Selection::Overall)
        .chain(list_regions(ds)?.into_iter().map(Selection::Only))
        .collect();

    Ok((years, regions))
}

/// Distinct non-null regions, alphabetically.
pub fn list_regions(ds: &Dataset) -> Result<Vec<String>, AnalysisError> {
    distinct_strings(ds, REGION)
}

/// `Overall` followed by every sport, alphabetically.
pub fn list_sports(ds: &Dataset) -> Result<Vec<Selection<String>>, AnalysisError> {
    Ok(std::iter::once(Selection::Overall)
        .chain(distinct_strings(ds, SPORT)?.into_iter().map(Selection::Only))
        .collect())
}

fn distinct_strings(ds: &Dataset, column: &str) -> Result<Vec<String>, AnalysisError> {
    let values: BTreeSet<&str> = ds.frame().column(column)?.str()?.into_iter().flatten().collect();
    Ok(values.into_iter().map(str::to_string).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::{dataset, Row};

    #[test]
    fn test_overall_leads_both_lists() {
        let ds = dataset(&[
            Row::new("A", "USA", 2004, "Swimming", Some("Gold")),
            Row::new("B", "France", 1996, "Judo", None),
            Row::new("C", "USA", 2000, "Swimming", None).unmapped(),
        ]);

        let (years, regions) = list_years_and_regions(&ds).unwrap();
        assert_eq!(
            years,
            vec![
                Selection::Overall,
                Selection::Only(1996),
                Selection::Only(2000),
                Selection::Only(2004)
            ]
        );
        assert_eq!(
            regions,
            vec![
                Selection::Overall,
                Selection::Only("France".to_string()),
                Selection::Only("USA".to_string())
            ]
        );
        assert_eq!(
            list_sports(&ds).unwrap(),
            vec![
                Selection::Overall,
                Selection::Only("Judo".to_string()),
                Selection::Only("Swimming".to_string())
            ]
        );
    }

    #[test]
    fn test_overall_on_empty_dataset() {
        let ds = dataset(&[]);
        let (years, regions) = list_years_and_regions(&ds).unwrap();
        assert_eq!(years, vec![Selection::Overall]);
        assert_eq!(regions, vec![Selection::Overall]);
        assert_eq!(list_sports(&ds).unwrap(), vec![Selection::Overall]);
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(Selection::<i32>::Overall.to_string(), "Overall");
        assert_eq!(Selection::Only(1992).to_string(), "1992");
        assert_eq!(Selection::Only("Judo".to_string()).only().map(String::as_str), Some("Judo"));
    }
}
