use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};
use mq_core::{LineChart, Point};

const HEIGHT: f32 = 180.0;
const MAX_WIDTH: f32 = 320.0;
const MARGIN: f32 = 1.0;
const LINE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

/// Data-space bounds of the plot, padded so a flat line is still visible.
fn bounds(chart: &LineChart) -> (f32, f32, f32, f32) {
    let (x0, x1) = (chart.from.x.min(chart.to.x), chart.from.x.max(chart.to.x));
    let (y0, y1) = (chart.from.y.min(chart.to.y), chart.from.y.max(chart.to.y));
    (
        x0 as f32 - MARGIN,
        x1 as f32 + MARGIN,
        y0 as f32 - MARGIN,
        y1 as f32 + MARGIN,
    )
}

fn to_screen(rect: Rect, (x_min, x_max, y_min, y_max): (f32, f32, f32, f32), p: Point) -> Pos2 {
    let tx = (p.x as f32 - x_min) / (x_max - x_min);
    let ty = (p.y as f32 - y_min) / (y_max - y_min);
    pos2(
        rect.left() + tx * rect.width(),
        rect.bottom() - ty * rect.height(),
    )
}

pub fn line_chart(ui: &mut egui::Ui, chart: &LineChart) {
    let size = vec2(ui.available_width().min(MAX_WIDTH), HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let bounds = bounds(chart);
    let text_color = ui.visuals().text_color();

    painter.rect_stroke(rect, 0.0, ui.visuals().widgets.noninteractive.bg_stroke);

    let from = to_screen(rect, bounds, chart.from);
    let to = to_screen(rect, bounds, chart.to);
    painter.line_segment([from, to], Stroke::new(2.5, LINE_COLOR));
    painter.circle_filled(from, 3.5, LINE_COLOR);
    painter.circle_filled(to, 3.5, LINE_COLOR);

    for (point, pos) in [(chart.from, from), (chart.to, to)] {
        painter.text(
            pos + vec2(6.0, -6.0),
            Align2::LEFT_BOTTOM,
            format!("({}, {})", point.x, point.y),
            FontId::proportional(12.0),
            text_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_line_gets_nonzero_height() {
        let chart = LineChart {
            from: Point { x: -10, y: 5 },
            to: Point { x: -5, y: 5 },
        };
        let (_, _, y_min, y_max) = bounds(&chart);
        assert!(y_max > y_min);
    }

    #[test]
    fn steeper_slope_maps_higher_on_screen() {
        let rect = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let chart = LineChart {
            from: Point { x: -10, y: 5 },
            to: Point { x: -5, y: 15 },
        };
        let b = bounds(&chart);
        let from = to_screen(rect, b, chart.from);
        let to = to_screen(rect, b, chart.to);
        assert!(to.x > from.x);
        assert!(to.y < from.y);
        assert!(rect.contains(from) && rect.contains(to));
    }
}
