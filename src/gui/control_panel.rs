//! Control Panel Widget
//! Left side panel with the menu, filters and status.

use egui::{Color32, ComboBox, RichText};
use olympics_dashboard::analysis::Selection;
use std::fmt::Display;
use std::path::PathBuf;

/// Dashboard page selected in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuView {
    #[default]
    MedalTally,
    OverallAnalysis,
    CountryAnalysis,
    AthleteAnalysis,
}

impl MenuView {
    const ALL: [MenuView; 4] = [
        MenuView::MedalTally,
        MenuView::OverallAnalysis,
        MenuView::CountryAnalysis,
        MenuView::AthleteAnalysis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuView::MedalTally => "Medal Tally",
            MenuView::OverallAnalysis => "Overall Analysis",
            MenuView::CountryAnalysis => "Country-wise Analysis",
            MenuView::AthleteAnalysis => "Athlete-wise Analysis",
        }
    }
}

/// Current filter values
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub view: MenuView,
    pub year: Selection<i32>,
    pub region: Selection<String>,
    pub sport: Selection<String>,
    pub country: Option<String>,
}

/// Values offered by the filter combo boxes.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub years: Vec<Selection<i32>>,
    pub regions: Vec<Selection<String>>,
    pub sports: Vec<Selection<String>>,
    pub countries: Vec<String>,
}

/// Left side control panel with data source, menu and filter controls.
pub struct ControlPanel {
    pub filters: Filters,
    pub options: FilterOptions,
    pub events_path: PathBuf,
    pub regions_path: PathBuf,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
}

impl ControlPanel {
    pub fn new(events_path: PathBuf, regions_path: PathBuf) -> Self {
        Self {
            filters: Filters::default(),
            options: FilterOptions::default(),
            events_path,
            regions_path,
            progress: 0.0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }

    /// Replace the filter choices after a dataset load, keeping any
    /// selection that is still valid.
    pub fn set_options(&mut self, options: FilterOptions) {
        if !options.years.contains(&self.filters.year) {
            self.filters.year = Selection::Overall;
        }
        if !options.regions.contains(&self.filters.region) {
            self.filters.region = Selection::Overall;
        }
        if !options.sports.contains(&self.filters.sport) {
            self.filters.sport = Selection::Overall;
        }
        let country_valid = self
            .filters
            .country
            .as_ref()
            .is_some_and(|c| options.countries.contains(c));
        if !country_valid {
            self.filters.country = options.countries.first().cloned();
        }
        self.options = options;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏅 Olympics Analysis")
                    .size(22.0)
                    .color(Color32::from_rgb(0, 140, 186)),
            );
            ui.label(
                RichText::new("1896 – 2016 Games")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                if Self::path_row(ui, "Events", &self.events_path) {
                    action = ControlPanelAction::BrowseEvents;
                }
                if Self::path_row(ui, "Regions", &self.regions_path) {
                    action = ControlPanelAction::BrowseRegions;
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Menu Section =====
        ui.label(RichText::new("📋 Select an Option").size(14.0).strong());
        ui.add_space(5.0);

        for view in MenuView::ALL {
            if ui
                .radio_value(&mut self.filters.view, view, view.label())
                .changed()
            {
                action = ControlPanelAction::FiltersChanged;
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("🔍 Filter Options").size(14.0).strong());
        ui.add_space(8.0);

        let changed = match self.filters.view {
            MenuView::MedalTally => {
                let year = Self::combo(
                    ui,
                    "year",
                    "Select Year:",
                    &mut self.filters.year,
                    &self.options.years,
                );
                let region = Self::combo(
                    ui,
                    "region",
                    "Select Country:",
                    &mut self.filters.region,
                    &self.options.regions,
                );
                year || region
            }
            MenuView::OverallAnalysis | MenuView::AthleteAnalysis => Self::combo(
                ui,
                "sport",
                "Select Sport:",
                &mut self.filters.sport,
                &self.options.sports,
            ),
            MenuView::CountryAnalysis => {
                let mut changed = false;
                ui.horizontal(|ui| {
                    ui.add_sized([110.0, 20.0], egui::Label::new("Select Country:"));
                    let selected = self.filters.country.clone().unwrap_or_default();
                    ComboBox::from_id_salt("country")
                        .width(150.0)
                        .selected_text(selected.as_str())
                        .show_ui(ui, |ui| {
                            for country in &self.options.countries {
                                let clicked = ui
                                    .selectable_label(selected == *country, country.as_str())
                                    .clicked();
                                if clicked && selected != *country {
                                    self.filters.country = Some(country.clone());
                                    changed = true;
                                }
                            }
                        });
                });
                changed
            }
        };
        if changed {
            action = ControlPanelAction::FiltersChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export JSON").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportJson;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") || self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// File name with a browse button; returns true when browse was clicked.
    fn path_row(ui: &mut egui::Ui, label: &str, path: &std::path::Path) -> bool {
        let mut clicked = false;
        ui.horizontal(|ui| {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "No file selected".to_string());
            ui.label(RichText::new(format!("{label}: {file_name}")).size(12.0));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("📂 Browse").clicked() {
                    clicked = true;
                }
            });
        });
        clicked
    }

    /// Labelled combo box over `options`; returns true when the value changed.
    fn combo<T: Clone + PartialEq + Display>(
        ui: &mut egui::Ui,
        id: &str,
        label: &str,
        value: &mut T,
        options: &[T],
    ) -> bool {
        let mut changed = false;
        ui.horizontal(|ui| {
            ui.add_sized([110.0, 20.0], egui::Label::new(label));
            ComboBox::from_id_salt(id)
                .width(150.0)
                .selected_text(value.to_string())
                .show_ui(ui, |ui| {
                    for option in options {
                        if ui
                            .selectable_label(value == option, option.to_string())
                            .clicked()
                            && value != option
                        {
                            *value = option.clone();
                            changed = true;
                        }
                    }
                });
        });
        ui.add_space(5.0);
        changed
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseEvents,
    BrowseRegions,
    FiltersChanged,
    ExportJson,
}
