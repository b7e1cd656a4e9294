use eframe::egui::{self, Align2, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use crate::analysis::correlation::CorrelationMatrix;
use crate::color::{diverging, text_on};

const CELL: f32 = 64.0;
const LABEL_W: f32 = 64.0;
const LABEL_H: f32 = 22.0;
const LEGEND_W: f32 = 18.0;
const LEGEND_GAP: f32 = 16.0;
const LEGEND_STEPS: usize = 40;

/// Annotated correlation heatmap with a colour scale on the right.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let vars = matrix.variables();
    let n = vars.len() as f32;
    let grid = Vec2::splat(CELL * n);
    let size = Vec2::new(LABEL_W + grid.x + LEGEND_GAP + LEGEND_W + 40.0, grid.y + LABEL_H);

    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min + Vec2::new(LABEL_W, 0.0);
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(13.0);

    for (i, row) in vars.iter().enumerate() {
        let y = origin.y + i as f32 * CELL;
        painter.text(
            Pos2::new(origin.x - 6.0, y + CELL / 2.0),
            Align2::RIGHT_CENTER,
            row.header(),
            font.clone(),
            text_color,
        );

        for (j, col) in vars.iter().enumerate() {
            let min = Pos2::new(origin.x + j as f32 * CELL, y);
            let rect = Rect::from_min_size(min, Vec2::splat(CELL));
            let r = matrix.get(*row, *col);
            let fill = diverging(r);
            painter.rect_filled(rect.shrink(0.5), 0.0, fill);

            let label = if r.is_nan() {
                "–".to_string()
            } else {
                format!("{r:.2}")
            };
            painter.text(rect.center(), Align2::CENTER_CENTER, label, font.clone(), text_on(fill));
        }
    }

    for (j, col) in vars.iter().enumerate() {
        painter.text(
            Pos2::new(origin.x + (j as f32 + 0.5) * CELL, origin.y + grid.y + 4.0),
            Align2::CENTER_TOP,
            col.header(),
            font.clone(),
            text_color,
        );
    }

    // Colour scale, +1 at the top.
    let bar_x = origin.x + grid.x + LEGEND_GAP;
    let step_h = grid.y / LEGEND_STEPS as f32;
    for s in 0..LEGEND_STEPS {
        let r = 1.0 - 2.0 * (s as f64 + 0.5) / LEGEND_STEPS as f64;
        let rect = Rect::from_min_size(
            Pos2::new(bar_x, origin.y + s as f32 * step_h),
            Vec2::new(LEGEND_W, step_h + 0.5),
        );
        painter.rect_filled(rect, 0.0, diverging(r));
    }
    painter.rect_stroke(
        Rect::from_min_size(Pos2::new(bar_x, origin.y), Vec2::new(LEGEND_W, grid.y)),
        0.0,
        Stroke::new(1.0, text_color),
        egui::StrokeKind::Inside,
    );
    for (value, frac) in [(1.0, 0.0), (0.0, 0.5), (-1.0, 1.0)] {
        painter.text(
            Pos2::new(bar_x + LEGEND_W + 4.0, origin.y + frac * grid.y),
            Align2::LEFT_CENTER,
            format!("{value:.1}"),
            font.clone(),
            text_color,
        );
    }
}
