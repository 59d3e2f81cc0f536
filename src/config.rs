//! Command line and environment configuration.

use crate::data::DataLoader;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "olympics-dashboard",
    version,
    about = "Historical Olympics medal & participation dashboard"
)]
pub struct AppConfig {
    /// Athlete event results (one row per athlete, event and Games).
    #[arg(
        long = "events",
        value_name = "PATH",
        env = "OLYMPICS_EVENTS_CSV",
        default_value = "athlete_events.csv"
    )]
    pub events_path: PathBuf,

    /// NOC code to region lookup.
    #[arg(
        long = "regions",
        value_name = "PATH",
        env = "OLYMPICS_REGIONS_CSV",
        default_value = "noc_regions.csv"
    )]
    pub regions_path: PathBuf,
}

impl AppConfig {
    pub fn loader(&self) -> DataLoader {
        DataLoader::new(&self.events_path, &self.regions_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_paths() {
        let config = AppConfig::parse_from([
            "olympics-dashboard",
            "--events",
            "data/events.csv",
            "--regions",
            "data/regions.csv",
        ]);
        let loader = config.loader();
        assert_eq!(loader.events_path(), PathBuf::from("data/events.csv"));
        assert_eq!(loader.regions_path(), PathBuf::from("data/regions.csv"));
    }
}
