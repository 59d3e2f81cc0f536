//! Synthetic datasets for unit tests.

use crate::data::schema::*;
use crate::data::{DataProcessor, Dataset};
use polars::prelude::*;
use std::collections::BTreeSet;

/// One raw event-participation row.
#[derive(Debug, Clone)]
pub struct Row {
    pub name: &'static str,
    pub region: &'static str,
    pub year: i64,
    pub sport: &'static str,
    pub medal: Option<&'static str>,
    pub team: Option<&'static str>,
    pub event: &'static str,
    pub sex: &'static str,
    pub age: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub mapped: bool,
}

impl Row {
    pub fn new(
        name: &'static str,
        region: &'static str,
        year: i64,
        sport: &'static str,
        medal: Option<&'static str>,
    ) -> Self {
        Self {
            name,
            region,
            year,
            sport,
            medal,
            team: None,
            event: "Final",
            sex: "M",
            age: Some(25.0),
            height: None,
            weight: None,
            mapped: true,
        }
    }

    pub fn team(mut self, team: &'static str) -> Self {
        self.team = Some(team);
        self
    }

    pub fn event(mut self, event: &'static str) -> Self {
        self.event = event;
        self
    }

    pub fn sex(mut self, sex: &'static str) -> Self {
        self.sex = sex;
        self
    }

    pub fn age(mut self, age: Option<f64>) -> Self {
        self.age = age;
        self
    }

    pub fn body(mut self, height: f64, weight: f64) -> Self {
        self.height = Some(height);
        self.weight = Some(weight);
        self
    }

    /// Give the row an NOC code the region lookup does not know.
    pub fn unmapped(mut self) -> Self {
        self.mapped = false;
        self
    }

    fn noc(&self) -> String {
        if self.mapped {
            self.region.to_uppercase()
        } else {
            format!("X-{}", self.region.to_uppercase())
        }
    }
}

pub fn raw_events(rows: &[Row]) -> DataFrame {
    let strs = |f: fn(&Row) -> &'static str| rows.iter().map(f).collect::<Vec<_>>();
    DataFrame::new(vec![
        Column::new(NAME.into(), strs(|r| r.name)),
        Column::new(SEX.into(), strs(|r| r.sex)),
        Column::new(AGE.into(), rows.iter().map(|r| r.age).collect::<Vec<_>>()),
        Column::new(HEIGHT.into(), rows.iter().map(|r| r.height).collect::<Vec<_>>()),
        Column::new(WEIGHT.into(), rows.iter().map(|r| r.weight).collect::<Vec<_>>()),
        Column::new(
            TEAM.into(),
            rows.iter().map(|r| r.team.unwrap_or(r.region)).collect::<Vec<_>>(),
        ),
        Column::new(NOC.into(), rows.iter().map(Row::noc).collect::<Vec<_>>()),
        Column::new(
            GAMES.into(),
            rows.iter()
                .map(|r| format!("{} Summer", r.year))
                .collect::<Vec<_>>(),
        ),
        Column::new(YEAR.into(), rows.iter().map(|r| r.year).collect::<Vec<_>>()),
        Column::new(SEASON.into(), vec!["Summer"; rows.len()]),
        Column::new(
            CITY.into(),
            rows.iter()
                .map(|r| format!("Host {}", r.year))
                .collect::<Vec<_>>(),
        ),
        Column::new(SPORT.into(), strs(|r| r.sport)),
        Column::new(EVENT.into(), strs(|r| r.event)),
        Column::new(MEDAL.into(), rows.iter().map(|r| r.medal).collect::<Vec<_>>()),
    ])
    .expect("fixture event frame")
}

pub fn raw_regions(rows: &[Row]) -> DataFrame {
    let regions: BTreeSet<&str> = rows.iter().filter(|r| r.mapped).map(|r| r.region).collect();
    let nocs: Vec<String> = regions.iter().map(|r| r.to_uppercase()).collect();
    let names: Vec<&str> = regions.into_iter().collect();
    DataFrame::new(vec![
        Column::new(NOC.into(), nocs),
        Column::new(REGION.into(), names),
    ])
    .expect("fixture region frame")
}

pub fn dataset(rows: &[Row]) -> Dataset {
    DataProcessor::prepare(&raw_events(rows), &raw_regions(rows)).expect("fixture dataset")
}

/// Four-person relay gold for France in 1992 and an individual gold for the
/// USA in 1996.
pub fn relay_and_individual() -> Dataset {
    dataset(&[
        Row::new("Anne", "France", 1992, "Swimming", Some("Gold")).event("4x100m Relay"),
        Row::new("Berthe", "France", 1992, "Swimming", Some("Gold")).event("4x100m Relay"),
        Row::new("Claire", "France", 1992, "Swimming", Some("Gold")).event("4x100m Relay"),
        Row::new("Denise", "France", 1992, "Swimming", Some("Gold")).event("4x100m Relay"),
        Row::new("Carl", "USA", 1996, "Athletics", Some("Gold")).event("100m"),
    ])
}
