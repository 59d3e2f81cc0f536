//! Column Schema Module
//! Column names of the event and region tables, plus the medal vocabulary.

use serde::Serialize;
use std::fmt;

pub const NAME: &str = "Name";
pub const SEX: &str = "Sex";
pub const AGE: &str = "Age";
pub const HEIGHT: &str = "Height";
pub const WEIGHT: &str = "Weight";
pub const TEAM: &str = "Team";
pub const NOC: &str = "NOC";
pub const GAMES: &str = "Games";
pub const YEAR: &str = "Year";
pub const SEASON: &str = "Season";
pub const CITY: &str = "City";
pub const SPORT: &str = "Sport";
pub const EVENT: &str = "Event";
pub const MEDAL: &str = "Medal";
pub const REGION: &str = "region";
pub const NOTES: &str = "notes";
/// Source row position, added during preparation.
pub const ROW_INDEX: &str = "row_nr";

/// Columns every event-participation file must provide.
pub const EVENT_COLUMNS: [&str; 14] = [
    NAME, SEX, AGE, HEIGHT, WEIGHT, TEAM, NOC, GAMES, YEAR, SEASON, CITY, SPORT, EVENT, MEDAL,
];

/// Columns every region-lookup file must provide. `notes` is optional.
pub const REGION_COLUMNS: [&str; 2] = [NOC, REGION];

/// A team event awards one medal per team, so medals won are counted once
/// per distinct value of this tuple.
pub const TEAM_MEDAL_KEY: [&str; 8] = [TEAM, NOC, GAMES, YEAR, CITY, SPORT, EVENT, MEDAL];

/// Medal outcome of a single participation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
    #[serde(rename = "No Medal")]
    NoMedal,
}

impl Medal {
    /// The three medal kinds actually awarded.
    pub const AWARDED: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    pub fn as_str(self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
            Medal::NoMedal => "No Medal",
        }
    }

    /// Parse the text form stored in the `Medal` column. Anything unknown is
    /// treated as no medal.
    pub fn parse(value: &str) -> Self {
        match value {
            "Gold" => Medal::Gold,
            "Silver" => Medal::Silver,
            "Bronze" => Medal::Bronze,
            _ => Medal::NoMedal,
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medal_text_form() {
        for medal in [Medal::Gold, Medal::Silver, Medal::Bronze, Medal::NoMedal] {
            assert_eq!(Medal::parse(medal.as_str()), medal);
        }
        assert_eq!(Medal::parse("NA"), Medal::NoMedal);
    }
}
