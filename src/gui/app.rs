//! Olympics Dashboard Main Application
//! Main window with control panel and dashboard.

use crate::gui::control_panel::{FilterOptions, Filters};
use crate::gui::dashboard::ViewData;
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};
use anyhow::Context;
use egui::SidePanel;
use olympics_dashboard::analysis::{list_regions, list_sports, list_years_and_regions};
use olympics_dashboard::config::AppConfig;
use olympics_dashboard::data::{DataLoader, Dataset};
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Progress(f32, String),
    Complete {
        dataset: Dataset,
        options: FilterOptions,
    },
    Error(String),
}

/// View computation result from background thread
enum CalcResult {
    Complete(Option<ViewData>),
    Error(String),
}

/// Main application window.
pub struct OlympicsApp {
    dataset: Option<Dataset>,
    control_panel: ControlPanel,
    dashboard: Dashboard,

    // Async loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    // Async view computation
    calc_rx: Option<Receiver<CalcResult>>,
    is_calculating: bool,
    /// Filters changed while a computation was running.
    recalc_pending: bool,
}

impl OlympicsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self::idle(config);
        app.start_loading();
        app
    }

    fn idle(config: AppConfig) -> Self {
        Self {
            dataset: None,
            control_panel: ControlPanel::new(config.events_path, config.regions_path),
            dashboard: Dashboard::new(),
            load_rx: None,
            is_loading: false,
            calc_rx: None,
            is_calculating: false,
            recalc_pending: false,
        }
    }

    /// Load both CSV files in a background thread.
    fn start_loading(&mut self) {
        if self.is_loading {
            return;
        }

        // A computation still running belongs to the previous dataset.
        self.calc_rx = None;
        self.is_calculating = false;
        self.recalc_pending = false;

        self.dataset = None;
        self.dashboard.clear();
        self.control_panel.export_enabled = false;
        self.control_panel.set_progress(0.0, "Loading CSV files...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let loader = DataLoader::new(
            self.control_panel.events_path.clone(),
            self.control_panel.regions_path.clone(),
        );

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(10.0, "Reading CSV files...".to_string()));

            let dataset = match loader.load() {
                Ok(dataset) => dataset,
                Err(e) => {
                    log::error!("Loading failed: {e}");
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                    return;
                }
            };

            let _ = tx.send(LoadResult::Progress(60.0, "Collecting filters...".to_string()));

            let options = list_years_and_regions(&dataset).and_then(|(years, regions)| {
                Ok(FilterOptions {
                    years,
                    regions,
                    sports: list_sports(&dataset)?,
                    countries: list_regions(&dataset)?,
                })
            });

            match options {
                Ok(options) => {
                    let _ = tx.send(LoadResult::Complete { dataset, options });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Handle CSV file selection for one of the two inputs
    fn handle_browse(&mut self, events: bool) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            if events {
                self.control_panel.events_path = path;
            } else {
                self.control_panel.regions_path = path;
            }
            self.start_loading();
        }
    }

    /// Check for loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    LoadResult::Complete { dataset, options } => {
                        let status = format!(
                            "Loaded {} rows, {} regions",
                            dataset.row_count(),
                            options.countries.len()
                        );
                        self.control_panel.set_options(options);
                        self.control_panel.set_progress(100.0, &status);
                        self.dataset = Some(dataset);
                        self.is_loading = false;
                        should_keep_receiver = false;
                        self.start_calculation();
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Compute the selected view in a background thread
    fn start_calculation(&mut self) {
        if self.is_calculating {
            self.recalc_pending = true;
            return;
        }

        let Some(dataset) = self.dataset.clone() else {
            return;
        };
        let filters: Filters = self.control_panel.filters.clone();

        let (tx, rx) = channel();
        self.calc_rx = Some(rx);
        self.is_calculating = true;
        self.recalc_pending = false;

        thread::spawn(move || {
            let result = match ViewData::compute(&dataset, &filters) {
                Ok(data) => CalcResult::Complete(data),
                Err(e) => {
                    log::error!("{} failed: {e}", filters.view.label());
                    CalcResult::Error(e.to_string())
                }
            };
            let _ = tx.send(result);
        });
    }

    /// Check for computation results
    fn check_calculation_results(&mut self) {
        let rx = self.calc_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    CalcResult::Complete(data) => {
                        self.control_panel.export_enabled = data.is_some();
                        self.dashboard.set_data(data);
                    }
                    CalcResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                    }
                }
                self.is_calculating = false;
                should_keep_receiver = false;
            }

            if should_keep_receiver {
                self.calc_rx = Some(rx);
            } else if self.recalc_pending {
                self.start_calculation();
            }
        }
    }

    /// Handle JSON export of the current view
    fn handle_export_json(&mut self) {
        let Some(data) = &self.dashboard.data else {
            self.control_panel.set_progress(0.0, "Nothing to export");
            return;
        };

        let file_name = format!(
            "{}.json",
            data.view().label().to_lowercase().replace([' ', '-'], "_")
        );
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(file_name)
            .save_file()
        else {
            return;
        };

        match Self::write_json(data, &path) {
            Ok(()) => {
                log::info!("Exported view to {}", path.display());
                self.control_panel
                    .set_progress(100.0, &format!("Exported {}", path.display()));
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {e:#}"));
            }
        }
    }

    fn write_json(data: &ViewData, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(data).context("serializing view")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

impl eframe::App for OlympicsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.check_calculation_results();

        // Request repaint while loading or calculating
        if self.is_loading || self.is_calculating {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseEvents => self.handle_browse(true),
                        ControlPanelAction::BrowseRegions => self.handle_browse(false),
                        ControlPanelAction::FiltersChanged => self.start_calculation(),
                        ControlPanelAction::ExportJson => self.handle_export_json(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.is_calculating && self.dashboard.data.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                });
                return;
            }
            self.dashboard.show(ui);
        });
    }
}
