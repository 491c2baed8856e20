use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::generate_palette;
use crate::data::filter::CompactnessView;

/// Width of one bar in glazing-area units.  Glazing areas in the data are
/// 0.1 or more apart, so two bars side by side fit in one slot.
const BAR_WIDTH: f64 = 0.04;

// ---------------------------------------------------------------------------
// Mean total load chart (central panel)
// ---------------------------------------------------------------------------

/// Grouped bar chart: glazing area on x, mean total load on y, one bar
/// series per room height.  The y axis always spans 0–100.
pub fn mean_load_chart(ui: &mut Ui, view: &CompactnessView<'_>) {
    ui.heading("Total Load per Glazing Area by Room Height");
    ui.label(view.chart_title());

    let colors = generate_palette(view.series.len());
    let n_series = view.series.len() as f64;

    Plot::new("mean_load_plot")
        .legend(Legend::default())
        .x_axis_label("Glazing Area")
        .y_axis_label("Total Load")
        .include_y(0.0)
        .include_y(100.0)
        .height(320.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (series, color)) in view.series.iter().zip(colors).enumerate() {
                if series.rows.is_empty() {
                    continue;
                }
                // Centre the group on the glazing-area tick.
                let offset = (i as f64 - (n_series - 1.0) / 2.0) * BAR_WIDTH;
                let bars: Vec<Bar> = series
                    .rows
                    .iter()
                    .map(|row| {
                        Bar::new(row.glazing_area + offset, row.total_load)
                            .width(BAR_WIDTH)
                            .name(format!(
                                "Glazing Area: {}\nTotal Load: {}",
                                row.glazing_area, row.total_load_text
                            ))
                    })
                    .collect();

                let chart = BarChart::new(bars)
                    .name(format!("Room Height {}", series.height))
                    .color(color);
                plot_ui.bar_chart(chart);
            }
        });
}
