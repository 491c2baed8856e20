use eframe::egui::{Align2, FontId, Pos2, Rect, RichText, Sense, Ui, Vec2};

use crate::color::{correlation_color, text_color_on};
use crate::data::aggregate::CorrelationMatrix;
use crate::data::error::AggregationError;

const CELL: Vec2 = Vec2::new(56.0, 28.0);
const LABEL_WIDTH: f32 = 200.0;
const HEADER_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Paint the correlation matrix as a grid of coloured cells.  Rows are
/// labelled by column name; column headers are the 1-based row numbers.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &Result<CorrelationMatrix, AggregationError>) {
    let matrix = match matrix {
        Ok(m) if m.is_empty() => return,
        Ok(m) => m,
        Err(e) => {
            ui.label(RichText::new(format!("Correlation heatmap unavailable: {e}")).italics());
            return;
        }
    };

    let n = matrix.len();
    let size = Vec2::new(
        LABEL_WIDTH + CELL.x * n as f32,
        HEADER_HEIGHT + CELL.y * n as f32,
    );
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let font = FontId::proportional(12.0);
    let label_color = ui.visuals().text_color();

    let cell_rect = |i: usize, j: usize| -> Rect {
        let min = Pos2::new(
            origin.x + LABEL_WIDTH + CELL.x * j as f32,
            origin.y + HEADER_HEIGHT + CELL.y * i as f32,
        );
        Rect::from_min_size(min, CELL)
    };

    for j in 0..n {
        let top = cell_rect(0, j);
        painter.text(
            Pos2::new(top.center().x, origin.y + HEADER_HEIGHT / 2.0),
            Align2::CENTER_CENTER,
            (j + 1).to_string(),
            font.clone(),
            label_color,
        );
    }

    for (i, label) in matrix.labels.iter().enumerate() {
        let left = cell_rect(i, 0);
        painter.text(
            Pos2::new(left.min.x - 6.0, left.center().y),
            Align2::RIGHT_CENTER,
            format!("{} {label}", i + 1),
            font.clone(),
            label_color,
        );

        for j in 0..n {
            let r = matrix.get(i, j);
            let fill = correlation_color(r);
            let rect = cell_rect(i, j).shrink(1.0);
            painter.rect_filled(rect, 0.0, fill);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                format!("{r:.2}"),
                font.clone(),
                text_color_on(fill),
            );
        }
    }

    legend(ui);
}

/// A small -1 … +1 colour bar under the grid.
fn legend(ui: &mut Ui) {
    const STEPS: usize = 40;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("-1");
        let (response, painter) =
            ui.allocate_painter(Vec2::new(STEPS as f32 * 4.0, 12.0), Sense::hover());
        for k in 0..STEPS {
            let r = -1.0 + 2.0 * k as f64 / (STEPS - 1) as f64;
            let min = response.rect.min + Vec2::new(k as f32 * 4.0, 0.0);
            painter.rect_filled(
                Rect::from_min_size(min, Vec2::new(4.0, 12.0)),
                0.0,
                correlation_color(r),
            );
        }
        ui.label("+1");
    });
    ui.add_space(4.0);
}
