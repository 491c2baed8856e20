use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::filter::CompactnessView;

const HEADERS: [&str; 4] = [
    "Relative_Compactness",
    "Glazing_Area",
    "Overall_Height",
    "Total_Load",
];

/// Summary table of the aggregate rows in the current selection.
pub fn summary_table(ui: &mut Ui, view: &CompactnessView<'_>) {
    ui.add_space(8.0);
    ui.push_id("summary_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().at_least(120.0), HEADERS.len())
            .header(20.0, |mut header| {
                for title in HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for row in view.rows() {
                    body.row(18.0, |mut table_row| {
                        let cells = [
                            row.relative_compactness.to_string(),
                            row.glazing_area.to_string(),
                            row.overall_height.to_string(),
                            row.total_load_text.clone(),
                        ];
                        for cell in cells {
                            table_row.col(|ui: &mut Ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}
