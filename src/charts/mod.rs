//! Charts module - egui_plot drawing helpers

mod plotter;

pub use plotter::{ChartPlotter, MedalBar};
