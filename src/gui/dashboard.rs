//! Dashboard Widget
//! Central scrollable panel rendering the tables and charts of the selected view.

use crate::charts::{ChartPlotter, MedalBar};
use crate::gui::control_panel::{Filters, MenuView};
use egui::{Color32, RichText, ScrollArea};
use olympics_dashboard::analysis::{
    age_by_medal, count_over_time, gender_participation, height_weight, medal_tally,
    most_successful, overall_medal_tally, overview, region_age_profile, sport_heatmap,
    top_athletes_by_country, yearly_medal_tally, AgeGroupStats, AgeProfile, AnalysisError,
    AthleteMedals, CountryAthlete, Dimension, EditionCount, GenderYear, HeightWeight, MedalTally,
    OverallTallyRow, Overview, SeriesSummary, SportHeatmap, TallyKey, TallySummary, YearMedals,
};
use olympics_dashboard::data::Dataset;
use rayon::prelude::*;
use serde::Serialize;

/// Bars shown in the medal tally chart.
const TALLY_CHART_SIZE: usize = 15;
const SECTION_SPACING: f32 = 15.0;
/// Upper bound offered by the total-medal filter.
const MAX_TOTAL_FILTER: u32 = 1000;

/// One participation series of the overall view.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeries {
    pub label: String,
    pub points: Vec<EditionCount>,
    pub summary: Option<SeriesSummary>,
}

/// Computed tables of one dashboard view.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ViewData {
    MedalTally {
        year: String,
        region: String,
        tally: MedalTally,
        /// All-time tally with medal ratios, only without filters.
        overall: Option<Vec<OverallTallyRow>>,
        trend: Option<Vec<YearMedals>>,
    },
    OverallAnalysis {
        sport: String,
        overview: Overview,
        series: Vec<TimeSeries>,
        leaderboard: Vec<AthleteMedals>,
    },
    CountryAnalysis {
        region: String,
        yearly: Vec<YearMedals>,
        heatmap: SportHeatmap,
        top_athletes: Vec<CountryAthlete>,
        ages: AgeProfile,
    },
    AthleteAnalysis {
        sport: String,
        ages: Vec<AgeGroupStats>,
        /// Needs a single sport.
        body: Option<HeightWeight>,
        gender: Vec<GenderYear>,
    },
}

impl ViewData {
    /// Run the aggregations behind the selected view.
    ///
    /// Returns `Ok(None)` for the country view while no country exists.
    pub fn compute(ds: &Dataset, filters: &Filters) -> Result<Option<Self>, AnalysisError> {
        let data = match filters.view {
            MenuView::MedalTally => {
                let no_filter = filters.year.is_overall() && filters.region.is_overall();
                ViewData::MedalTally {
                    year: filters.year.to_string(),
                    region: filters.region.to_string(),
                    tally: medal_tally(ds, &filters.year, &filters.region)?,
                    overall: no_filter.then(|| overall_medal_tally(ds)).transpose()?,
                    trend: filters
                        .region
                        .only()
                        .map(|region| yearly_medal_tally(ds, region))
                        .transpose()?,
                }
            }
            MenuView::OverallAnalysis => {
                let series = Dimension::ALL
                    .par_iter()
                    .map(|&dimension| {
                        let points = count_over_time(ds, dimension)?;
                        Ok::<_, AnalysisError>(TimeSeries {
                            label: dimension.to_string(),
                            summary: SeriesSummary::of(&points),
                            points,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                ViewData::OverallAnalysis {
                    sport: filters.sport.to_string(),
                    overview: overview(ds)?,
                    series,
                    leaderboard: most_successful(ds, &filters.sport)?,
                }
            }
            MenuView::CountryAnalysis => {
                let Some(region) = filters.country.as_deref() else {
                    return Ok(None);
                };
                ViewData::CountryAnalysis {
                    region: region.to_string(),
                    yearly: yearly_medal_tally(ds, region)?,
                    heatmap: sport_heatmap(ds, region)?,
                    top_athletes: top_athletes_by_country(ds, region)?,
                    ages: region_age_profile(ds, region)?,
                }
            }
            MenuView::AthleteAnalysis => ViewData::AthleteAnalysis {
                sport: filters.sport.to_string(),
                ages: age_by_medal(ds)?,
                body: filters
                    .sport
                    .only()
                    .map(|sport| height_weight(ds, sport))
                    .transpose()?,
                gender: gender_participation(ds)?,
            },
        };
        Ok(Some(data))
    }

    pub fn view(&self) -> MenuView {
        match self {
            ViewData::MedalTally { .. } => MenuView::MedalTally,
            ViewData::OverallAnalysis { .. } => MenuView::OverallAnalysis,
            ViewData::CountryAnalysis { .. } => MenuView::CountryAnalysis,
            ViewData::AthleteAnalysis { .. } => MenuView::AthleteAnalysis,
        }
    }
}

/// Scrollable display of the current view.
pub struct Dashboard {
    pub data: Option<ViewData>,
    /// Total-medal bounds of the global medal table.
    min_total: u32,
    max_total: u32,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            data: None,
            min_total: 0,
            max_total: MAX_TOTAL_FILTER,
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.data = None;
    }

    pub fn set_data(&mut self, data: Option<ViewData>) {
        self.data = data;
    }

    /// Draw the current view
    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Self {
            data,
            min_total,
            max_total,
        } = self;
        let Some(data) = data.as_ref() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match data {
                ViewData::MedalTally {
                    year,
                    region,
                    tally,
                    overall,
                    trend,
                } => Self::show_medal_tally(
                    ui,
                    year,
                    region,
                    tally,
                    overall.as_deref().map(|rows| (rows, &mut *min_total, &mut *max_total)),
                    trend.as_deref(),
                ),
                ViewData::OverallAnalysis {
                    sport,
                    overview,
                    series,
                    leaderboard,
                } => Self::show_overall(ui, sport, overview, series, leaderboard),
                ViewData::CountryAnalysis {
                    region,
                    yearly,
                    heatmap,
                    top_athletes,
                    ages,
                } => Self::show_country(ui, region, yearly, heatmap, top_athletes, ages),
                ViewData::AthleteAnalysis {
                    sport,
                    ages,
                    body,
                    gender,
                } => Self::show_athletes(ui, sport, ages, body.as_ref(), gender),
            });
    }

    fn heading(ui: &mut egui::Ui, text: &str) {
        ui.add_space(SECTION_SPACING);
        ui.label(RichText::new(text).size(18.0).strong());
        ui.add_space(8.0);
    }

    fn show_medal_tally(
        ui: &mut egui::Ui,
        year: &str,
        region: &str,
        tally: &MedalTally,
        overall: Option<(&[OverallTallyRow], &mut u32, &mut u32)>,
        trend: Option<&[YearMedals]>,
    ) {
        let title = match (year, region) {
            ("Overall", "Overall") => "Global Medal Distribution".to_string(),
            ("Overall", region) => format!("{region} overall performance"),
            (year, "Overall") => format!("Medal Tally in {year} Olympics"),
            (year, region) => format!("{region} performance in {year} Olympics"),
        };
        ui.label(RichText::new(format!("🏆 {title}")).size(22.0).strong());

        let (gold, silver, bronze) = tally.rows.iter().fold((0, 0, 0), |acc, r| {
            (acc.0 + r.gold, acc.1 + r.silver, acc.2 + r.bronze)
        });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            for (label, count) in [("🥇", gold), ("🥈", silver), ("🥉", bronze)] {
                ui.label(RichText::new(format!("{label} {count}")).size(18.0));
                ui.add_space(20.0);
            }
        });

        let group_header = match tally.key {
            TallyKey::Region => "Region",
            TallyKey::Year => "Year",
        };
        let rows: Vec<Vec<String>> = tally
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.group.to_string(),
                    r.gold.to_string(),
                    r.silver.to_string(),
                    r.bronze.to_string(),
                    r.total.to_string(),
                ]
            })
            .collect();

        Self::heading(ui, "Medal Table");
        ChartPlotter::draw_table(
            ui,
            "medal_tally",
            &[group_header, "Gold", "Silver", "Bronze", "Total"],
            &rows,
        );

        Self::heading(ui, "Medal Distribution");
        let bars: Vec<MedalBar> = tally
            .rows
            .iter()
            .filter(|r| r.total > 0)
            .take(TALLY_CHART_SIZE)
            .map(|r| MedalBar {
                label: r.group.to_string(),
                gold: r.gold,
                silver: r.silver,
                bronze: r.bronze,
            })
            .collect();
        ChartPlotter::draw_medal_bars(ui, "medal_bars", &bars);

        if let Some((overall, min_total, max_total)) = overall {
            Self::show_global_table(ui, overall, min_total, max_total);
        }

        if let Some(trend) = trend {
            Self::heading(ui, &format!("{region} Medal Trend Over Time"));
            ChartPlotter::draw_year_medals(ui, "medal_trend", trend);
        }
    }

    fn show_global_table(
        ui: &mut egui::Ui,
        overall: &[OverallTallyRow],
        min_total: &mut u32,
        max_total: &mut u32,
    ) {
        Self::heading(ui, "Global Medal Table");
        ui.horizontal(|ui| {
            ui.label("Minimum Total Medals:");
            ui.add(egui::DragValue::new(min_total).range(0..=MAX_TOTAL_FILTER));
            ui.add_space(20.0);
            ui.label("Maximum Total Medals:");
            ui.add(egui::DragValue::new(max_total).range(0..=MAX_TOTAL_FILTER));
        });
        ui.add_space(8.0);

        let kept: Vec<&OverallTallyRow> = overall
            .iter()
            .filter(|row| row.tally.total_within(*min_total, *max_total))
            .collect();
        let share = |value: Option<f64>| value.map_or("-".to_string(), |v| format!("{v:.2}"));
        let rows: Vec<Vec<String>> = kept
            .iter()
            .map(|row| {
                vec![
                    row.tally.group.to_string(),
                    row.tally.gold.to_string(),
                    row.tally.silver.to_string(),
                    row.tally.bronze.to_string(),
                    row.tally.total.to_string(),
                    share(row.ratios.map(|r| r.gold)),
                    share(row.ratios.map(|r| r.silver)),
                    share(row.ratios.map(|r| r.bronze)),
                ]
            })
            .collect();
        ChartPlotter::draw_table(
            ui,
            "global_medal_table",
            &[
                "Region",
                "Gold",
                "Silver",
                "Bronze",
                "Total",
                "Gold Ratio",
                "Silver Ratio",
                "Bronze Ratio",
            ],
            &rows,
        );

        Self::heading(ui, "Summary Statistics");
        match TallySummary::of(kept.iter().map(|row| &row.tally)) {
            Some(summary) => {
                for line in [
                    format!("Total Countries: {}", summary.groups),
                    format!("Total Medals: {}", summary.total_medals),
                    format!("Average Medals per Country: {:.1}", summary.average),
                    format!("Top Medal Country: {}", summary.top_group),
                    format!("Most Gold Medals: {} 🥇", summary.most_gold),
                    format!("Most Silver Medals: {} 🥈", summary.most_silver),
                    format!("Most Bronze Medals: {} 🥉", summary.most_bronze),
                ] {
                    ui.label(RichText::new(line).size(13.0));
                }
            }
            None => {
                ui.label(RichText::new("No country in this range").color(Color32::GRAY));
            }
        }
    }

    fn show_overall(
        ui: &mut egui::Ui,
        sport: &str,
        overview: &Overview,
        series: &[TimeSeries],
        leaderboard: &[AthleteMedals],
    ) {
        ui.label(RichText::new("📈 Top Statistics").size(22.0).strong());
        ui.add_space(8.0);

        let cards = [
            ("Editions", overview.editions),
            ("Host Cities", overview.host_cities),
            ("Sports", overview.sports),
            ("Events", overview.events),
            ("Athletes", overview.athletes),
            ("Nations", overview.nations),
        ];
        ui.columns(cards.len(), |columns| {
            for (ui, (label, value)) in columns.iter_mut().zip(cards) {
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(8.0)
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
                            ui.label(RichText::new(value.to_string()).size(24.0).strong());
                        });
                    });
            }
        });

        for s in series {
            Self::heading(ui, &format!("{} over the years", s.label));
            if let Some(summary) = &s.summary {
                ui.label(
                    RichText::new(format!(
                        "Peak {} in {} · mean {:.1} per edition",
                        summary.max, summary.max_edition, summary.mean
                    ))
                    .size(12.0)
                    .color(Color32::GRAY),
                );
            }
            ChartPlotter::draw_edition_line(ui, &format!("series_{}", s.label), &s.label, &s.points);
        }

        Self::heading(ui, &format!("Most Successful Athletes ({sport})"));
        Self::leaderboard_table(ui, leaderboard);
    }

    fn leaderboard_table(ui: &mut egui::Ui, leaderboard: &[AthleteMedals]) {
        let rows: Vec<Vec<String>> = leaderboard
            .iter()
            .map(|a| {
                vec![
                    a.name.clone(),
                    a.medals.to_string(),
                    a.gold.to_string(),
                    a.silver.to_string(),
                    a.bronze.to_string(),
                    a.sport.clone().unwrap_or_default(),
                    a.region.clone().unwrap_or_default(),
                ]
            })
            .collect();
        ChartPlotter::draw_table(
            ui,
            "leaderboard",
            &["Name", "Medals", "Gold", "Silver", "Bronze", "Sport", "Region"],
            &rows,
        );
    }

    fn show_country(
        ui: &mut egui::Ui,
        region: &str,
        yearly: &[YearMedals],
        heatmap: &SportHeatmap,
        top_athletes: &[CountryAthlete],
        ages: &AgeProfile,
    ) {
        ui.label(RichText::new(format!("🌍 {region}")).size(22.0).strong());

        Self::heading(ui, &format!("{region} Medal Tally Over the Years"));
        ChartPlotter::draw_year_medals(ui, "country_years", yearly);

        Self::heading(ui, &format!("{region}'s Performance in Sports"));
        ChartPlotter::draw_heatmap(ui, heatmap);

        Self::heading(ui, &format!("Top 10 Athletes from {region}"));
        let rows: Vec<Vec<String>> = top_athletes
            .iter()
            .map(|a| vec![a.name.clone(), a.sport.clone(), a.total_medals.to_string()])
            .collect();
        ChartPlotter::draw_table(ui, "country_athletes", &["Name", "Sport", "Medals"], &rows);

        Self::heading(ui, "Age Distribution");
        let s = &ages.stats;
        ui.label(
            RichText::new(format!(
                "{} rows · mean {:.1} · median {:.1} · std {:.1} · range {:.0}–{:.0}",
                s.count, s.mean, s.median, s.std, s.min, s.max
            ))
            .size(12.0)
            .color(Color32::GRAY),
        );
        ChartPlotter::draw_histogram(ui, "country_ages", "Age", &ages.histogram);
    }

    fn show_athletes(
        ui: &mut egui::Ui,
        sport: &str,
        ages: &[AgeGroupStats],
        body: Option<&HeightWeight>,
        gender: &[GenderYear],
    ) {
        ui.label(RichText::new("🏃 Athlete-wise Analysis").size(22.0).strong());

        Self::heading(ui, "Age Analysis");
        ChartPlotter::draw_age_curves(ui, "age_curves", ages);
        ui.add_space(8.0);
        ChartPlotter::draw_age_table(ui, "age_table", ages);

        Self::heading(ui, &format!("Height vs Weight ({sport})"));
        match body {
            Some(body) => {
                if let Some(r) = body.correlation {
                    ui.label(RichText::new(format!("Pearson r = {r:.3}")).size(12.0));
                }
                ChartPlotter::draw_height_weight(ui, "height_weight", body);
                let rows: Vec<Vec<String>> = body
                    .by_sex
                    .iter()
                    .map(|s| {
                        vec![
                            s.sex.clone(),
                            s.height.count.to_string(),
                            format!("{:.1}", s.height.mean),
                            format!("{:.1}", s.weight.mean),
                        ]
                    })
                    .collect();
                ChartPlotter::draw_table(
                    ui,
                    "body_by_sex",
                    &["Sex", "N", "Mean height", "Mean weight"],
                    &rows,
                );
            }
            None => {
                ui.label(
                    RichText::new("Select a sport to compare height and weight")
                        .color(Color32::GRAY),
                );
            }
        }

        Self::heading(ui, "Men vs Women Participation");
        ChartPlotter::draw_gender_lines(ui, "gender", gender);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use olympics_dashboard::analysis::Selection;
    use olympics_dashboard::data::DataProcessor;
    use polars::prelude::*;

    fn sample() -> Dataset {
        let events = df!(
            "Name" => ["A", "B", "C"],
            "Sex" => ["M", "F", "M"],
            "Age" => [24.0, 30.0, 27.0],
            "Height" => [180.0, 165.0, 175.0],
            "Weight" => [75.0, 60.0, 70.0],
            "Team" => ["France", "Japan", "France"],
            "NOC" => ["FRA", "JPN", "FRA"],
            "Games" => ["2000 Summer", "2000 Summer", "2004 Summer"],
            "Year" => [2000i64, 2000, 2004],
            "Season" => ["Summer", "Summer", "Summer"],
            "City" => ["Sydney", "Sydney", "Athina"],
            "Sport" => ["Judo", "Judo", "Fencing"],
            "Event" => ["Judo A", "Judo B", "Foil"],
            "Medal" => [Some("Gold"), None, Some("Bronze")]
        )
        .unwrap();
        let regions = df!(
            "NOC" => ["FRA", "JPN"],
            "region" => ["France", "Japan"]
        )
        .unwrap();
        DataProcessor::prepare(&events, &regions).unwrap()
    }

    #[test]
    fn test_compute_follows_selected_view() {
        let ds = sample();
        for view in [
            MenuView::MedalTally,
            MenuView::OverallAnalysis,
            MenuView::CountryAnalysis,
            MenuView::AthleteAnalysis,
        ] {
            let filters = Filters {
                view,
                country: Some("France".to_string()),
                ..Filters::default()
            };
            let data = ViewData::compute(&ds, &filters).unwrap().unwrap();
            assert_eq!(data.view(), view);
        }
    }

    #[test]
    fn test_medal_tally_extras_depend_on_filters() {
        let ds = sample();
        let data = ViewData::compute(&ds, &Filters::default()).unwrap().unwrap();
        let ViewData::MedalTally { overall, trend, .. } = data else {
            panic!("expected medal tally");
        };
        assert!(overall.is_some());
        assert!(trend.is_none());

        let filters = Filters {
            region: Selection::Only("France".to_string()),
            ..Filters::default()
        };
        let data = ViewData::compute(&ds, &filters).unwrap().unwrap();
        let ViewData::MedalTally { overall, trend, .. } = data else {
            panic!("expected medal tally");
        };
        assert!(overall.is_none());
        assert_eq!(trend.map(|t| t.len()), Some(2));
    }

    #[test]
    fn test_country_view_needs_a_country() {
        let filters = Filters {
            view: MenuView::CountryAnalysis,
            ..Filters::default()
        };
        assert!(ViewData::compute(&sample(), &filters).unwrap().is_none());
    }

    #[test]
    fn test_export_is_tagged_by_view() {
        let filters = Filters {
            view: MenuView::AthleteAnalysis,
            sport: Selection::Only("Judo".to_string()),
            ..Filters::default()
        };
        let data = ViewData::compute(&sample(), &filters).unwrap().unwrap();
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["view"], "athlete_analysis");
        assert_eq!(json["body"]["sport"], "Judo");
        assert_eq!(json["gender"][0]["year"], 2000);
    }
}
