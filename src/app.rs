use eframe::egui;

use crate::data::filter::CompactnessView;
use crate::state::AppState;
use crate::ui::{heatmap, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EnergyDashApp {
    pub state: AppState,
}

impl EnergyDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for EnergyDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: compactness selector ----
        egui::SidePanel::left("compactness_panel")
            .default_width(180.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: heatmap, chart, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Energy Efficiency Dashboard");
            ui.separator();

            let Some(dashboard) = self.state.dashboard.clone() else {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a dataset to begin  (File → Open…)");
                });
                return;
            };

            if dashboard.dataset.is_empty() {
                ui.label("The dataset has a header but no rows.");
                return;
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Correlation Matrix of Energy Efficiency Factors");
                    heatmap::correlation_heatmap(ui, &dashboard.correlation);
                    ui.separator();

                    let rows = match &dashboard.mean_load {
                        Ok(rows) => rows,
                        Err(e) => {
                            ui.label(
                                egui::RichText::new(format!("Mean load unavailable: {e}"))
                                    .color(egui::Color32::RED),
                            );
                            return;
                        }
                    };
                    let Some(compactness) = self.state.selected_compactness else {
                        return;
                    };
                    let view = CompactnessView::build(rows, compactness);
                    if let Some(message) = view.no_data_message() {
                        ui.label(
                            egui::RichText::new(message)
                                .color(egui::Color32::RED)
                                .size(16.0),
                        );
                    }
                    plot::mean_load_chart(ui, &view);
                    table::summary_table(ui, &view);
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new(view.current_height_text()).size(16.0));
                    });
                });
        });
    }
}
