//! Chart Plotter Module
//! Interactive dashboard charts and tables using egui_plot.

use egui::{Color32, RichText, Sense};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, MarkerShape, Plot, PlotPoints, Points};
use olympics_dashboard::analysis::{
    AgeGroupStats, EditionCount, GenderYear, HeightWeight, SportHeatmap, YearMedals,
};
use olympics_dashboard::data::Medal;
use olympics_dashboard::stats::{HistogramBin, StatsCalculator};
use std::ops::RangeInclusive;

pub const GOLD_COLOR: Color32 = Color32::from_rgb(212, 175, 55);
pub const SILVER_COLOR: Color32 = Color32::from_rgb(168, 169, 173);
pub const BRONZE_COLOR: Color32 = Color32::from_rgb(176, 141, 87);
pub const NO_MEDAL_COLOR: Color32 = Color32::from_rgb(52, 152, 219);
pub const SIGNIFICANT_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

pub const PALETTE: [Color32; 6] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
];

const CHART_HEIGHT: f32 = 300.0;
const AGE_CURVE_BINS: usize = 30;

// Heatmap cell geometry
const HEAT_LABEL_WIDTH: f32 = 150.0;
const HEAT_CELL_WIDTH: f32 = 34.0;
const HEAT_CELL_HEIGHT: f32 = 18.0;

/// Medal counts of one bar in a stacked medal chart.
pub struct MedalBar {
    pub label: String,
    pub gold: u32,
    pub silver: u32,
    pub bronze: u32,
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn medal_color(medal: Medal) -> Color32 {
        match medal {
            Medal::Gold => GOLD_COLOR,
            Medal::Silver => SILVER_COLOR,
            Medal::Bronze => BRONZE_COLOR,
            Medal::NoMedal => NO_MEDAL_COLOR,
        }
    }

    /// Formatter showing `labels[i]` at integer positions only.
    fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
        move |mark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        }
    }

    /// Line chart of a per-edition count.
    pub fn draw_edition_line(ui: &mut egui::Ui, id: &str, y_label: &str, series: &[EditionCount]) {
        let points: PlotPoints = series
            .iter()
            .map(|p| [p.edition as f64, p.count as f64])
            .collect();
        let markers: PlotPoints = series
            .iter()
            .map(|p| [p.edition as f64, p.count as f64])
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Edition")
            .y_axis_label(y_label)
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).color(PALETTE[0]).width(2.0).name(y_label));
                plot_ui.points(Points::new(markers).radius(3.0).color(PALETTE[0]));
            });
    }

    /// Medals per year for one region.
    pub fn draw_year_medals(ui: &mut egui::Ui, id: &str, series: &[YearMedals]) {
        let points: PlotPoints = series
            .iter()
            .map(|p| [p.year as f64, p.medals as f64])
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Medals")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(points).color(GOLD_COLOR).width(2.0).name("Medals"));
            });
    }

    /// Gold, silver and bronze stacked per bar.
    pub fn draw_medal_bars(ui: &mut egui::Ui, id: &str, bars: &[MedalBar]) {
        let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
        let series = |value: fn(&MedalBar) -> u32| -> Vec<Bar> {
            bars.iter()
                .enumerate()
                .map(|(i, b)| Bar::new(i as f64, value(b) as f64).width(0.7))
                .collect()
        };

        let gold = BarChart::new(series(|b: &MedalBar| b.gold))
            .name(Medal::Gold.as_str())
            .color(GOLD_COLOR);
        let silver = BarChart::new(series(|b: &MedalBar| b.silver))
            .name(Medal::Silver.as_str())
            .color(SILVER_COLOR)
            .stack_on(&[&gold]);
        let bronze = BarChart::new(series(|b: &MedalBar| b.bronze))
            .name(Medal::Bronze.as_str())
            .color(BRONZE_COLOR)
            .stack_on(&[&gold, &silver]);

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .y_axis_label("Medals")
            .x_axis_formatter(Self::category_formatter(labels))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(gold);
                plot_ui.bar_chart(silver);
                plot_ui.bar_chart(bronze);
            });
    }

    /// Histogram bars at bin centers.
    pub fn draw_histogram(ui: &mut egui::Ui, id: &str, x_label: &str, bins: &[HistogramBin]) {
        let bars: Vec<Bar> = bins
            .iter()
            .map(|bin| {
                Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                    .width((bin.end - bin.start).max(f64::EPSILON))
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(x_label)
            .y_axis_label("Athletes")
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(PALETTE[0]).name(x_label));
            });
    }

    /// Share of each group per age bin.
    pub fn draw_age_curves(ui: &mut egui::Ui, id: &str, groups: &[AgeGroupStats]) {
        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label("Age")
            .y_axis_label("Share of athletes")
            .show(ui, |plot_ui| {
                for (i, group) in groups.iter().enumerate() {
                    let total = group.ages.len() as f64;
                    if total == 0.0 {
                        continue;
                    }
                    let points: PlotPoints = StatsCalculator::histogram(&group.ages, AGE_CURVE_BINS)
                        .iter()
                        .map(|bin| [(bin.start + bin.end) / 2.0, bin.count as f64 / total])
                        .collect();
                    let color = match i {
                        1 => GOLD_COLOR,
                        2 => SILVER_COLOR,
                        3 => BRONZE_COLOR,
                        _ => PALETTE[i % PALETTE.len()],
                    };
                    plot_ui.line(Line::new(points).color(color).width(2.0).name(&group.group));
                }
            });
    }

    /// Height against weight, coloured by medal and shaped by sex.
    pub fn draw_height_weight(ui: &mut egui::Ui, id: &str, data: &HeightWeight) {
        Plot::new(id)
            .height(CHART_HEIGHT + 100.0)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label("Weight (kg)")
            .y_axis_label("Height (cm)")
            .show(ui, |plot_ui| {
                for medal in [Medal::NoMedal, Medal::Bronze, Medal::Silver, Medal::Gold] {
                    for (sex, shape) in [("M", MarkerShape::Circle), ("F", MarkerShape::Cross)] {
                        let points: Vec<[f64; 2]> = data
                            .points
                            .iter()
                            .filter(|p| p.medal == medal && p.sex == sex)
                            .map(|p| [p.weight, p.height])
                            .collect();
                        if points.is_empty() {
                            continue;
                        }
                        plot_ui.points(
                            Points::new(PlotPoints::from(points))
                                .shape(shape)
                                .radius(3.0)
                                .color(Self::medal_color(medal).gamma_multiply(0.8))
                                .name(format!("{medal} ({sex})")),
                        );
                    }
                }
            });
    }

    /// Male and female athletes per year.
    pub fn draw_gender_lines(ui: &mut egui::Ui, id: &str, rows: &[GenderYear]) {
        let male: PlotPoints = rows.iter().map(|r| [r.year as f64, r.male as f64]).collect();
        let female: PlotPoints = rows
            .iter()
            .map(|r| [r.year as f64, r.female as f64])
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label("Year")
            .y_axis_label("Athletes")
            .show(ui, |plot_ui| {
                plot_ui.line(Line::new(male).color(PALETTE[0]).width(2.0).name("Male"));
                plot_ui.line(Line::new(female).color(PALETTE[1]).width(2.0).name("Female"));
            });
    }

    fn heat_color(t: f32) -> Color32 {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color32::from_rgb(lerp(255, 189), lerp(247, 0), lerp(188, 38))
    }

    /// Sport by year grid of medal counts.
    pub fn draw_heatmap(ui: &mut egui::Ui, heatmap: &SportHeatmap) {
        if heatmap.is_empty() {
            ui.label(RichText::new("No medals").color(Color32::GRAY));
            return;
        }

        let max = heatmap.max().max(1) as f32;
        let width = HEAT_LABEL_WIDTH + heatmap.years.len() as f32 * HEAT_CELL_WIDTH;
        let height = (heatmap.sports.len() + 1) as f32 * HEAT_CELL_HEIGHT;
        let text_color = ui.visuals().text_color();

        egui::ScrollArea::horizontal()
            .id_salt("sport_heatmap")
            .show(ui, |ui| {
                let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), Sense::hover());
                let painter = ui.painter_at(rect);
                let font = egui::FontId::proportional(10.0);

                for (col, year) in heatmap.years.iter().enumerate() {
                    let center = rect.left_top()
                        + egui::vec2(
                            HEAT_LABEL_WIDTH + (col as f32 + 0.5) * HEAT_CELL_WIDTH,
                            HEAT_CELL_HEIGHT / 2.0,
                        );
                    painter.text(
                        center,
                        egui::Align2::CENTER_CENTER,
                        year.to_string(),
                        font.clone(),
                        text_color,
                    );
                }

                for (row, (sport, counts)) in
                    heatmap.sports.iter().zip(&heatmap.counts).enumerate()
                {
                    let top = rect.top() + (row + 1) as f32 * HEAT_CELL_HEIGHT;
                    painter.text(
                        egui::pos2(rect.left() + 4.0, top + HEAT_CELL_HEIGHT / 2.0),
                        egui::Align2::LEFT_CENTER,
                        sport,
                        font.clone(),
                        text_color,
                    );
                    for (col, &count) in counts.iter().enumerate() {
                        let cell = egui::Rect::from_min_size(
                            egui::pos2(
                                rect.left() + HEAT_LABEL_WIDTH + col as f32 * HEAT_CELL_WIDTH,
                                top,
                            ),
                            egui::vec2(HEAT_CELL_WIDTH - 1.0, HEAT_CELL_HEIGHT - 1.0),
                        );
                        painter.rect_filled(cell, 2.0, Self::heat_color(count as f32 / max));
                        if count > 0 {
                            let color = if count as f32 / max > 0.5 {
                                Color32::WHITE
                            } else {
                                Color32::BLACK
                            };
                            painter.text(
                                cell.center(),
                                egui::Align2::CENTER_CENTER,
                                count.to_string(),
                                font.clone(),
                                color,
                            );
                        }
                    }
                }
            });
    }

    /// Striped table with a header row.
    pub fn draw_table(ui: &mut egui::Ui, id: &str, headers: &[&str], rows: &[Vec<String>]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in headers {
                            ui.label(RichText::new(*header).strong().size(12.0));
                        }
                        ui.end_row();

                        for row in rows {
                            for cell in row {
                                ui.label(RichText::new(cell).size(12.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    /// Age statistics per group, p-values highlighted when significant.
    pub fn draw_age_table(ui: &mut egui::Ui, id: &str, groups: &[AgeGroupStats]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Group", "N", "Mean", "Median", "Std", "Min", "Max", "P-value"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        let default_text_color = ui.visuals().text_color();
                        for group in groups {
                            let s = &group.stats;
                            ui.label(RichText::new(&group.group).size(11.0));
                            ui.label(RichText::new(s.count.to_string()).size(11.0));
                            for value in [s.mean, s.median, s.std, s.min, s.max] {
                                ui.label(RichText::new(format!("{value:.2}")).size(11.0));
                            }
                            match group.p_value {
                                Some(p) => {
                                    let color = if group.is_significant {
                                        SIGNIFICANT_COLOR
                                    } else {
                                        default_text_color
                                    };
                                    ui.label(RichText::new(format!("{p:.4}")).size(11.0).color(color));
                                }
                                None => {
                                    ui.label(RichText::new("-").size(11.0));
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(ChartPlotter::heat_color(0.0), Color32::from_rgb(255, 247, 188));
        assert_eq!(ChartPlotter::heat_color(1.0), Color32::from_rgb(189, 0, 38));
        assert_eq!(ChartPlotter::heat_color(2.0), ChartPlotter::heat_color(1.0));
    }

    #[test]
    fn test_category_formatter_only_labels_integers() {
        let format = ChartPlotter::category_formatter(vec!["USA".into(), "China".into()]);
        let range = 0.0..=1.0;
        let mark = |value| GridMark { value, step_size: 1.0 };
        assert_eq!(format(mark(1.0), &range), "China");
        assert_eq!(format(mark(0.5), &range), "");
        assert_eq!(format(mark(5.0), &range), "");
        assert_eq!(format(mark(-1.0), &range), "");
    }
}
