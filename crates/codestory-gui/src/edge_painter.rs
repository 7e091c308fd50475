use codestory_graph::{Color, CubicBezier, EdgePainter, StrokeStyle, Vec2, dash_polyline};
use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Shape, Stroke};
use egui::emath::TSTransform;
use egui::epaint::CubicBezierShape;

/// Segments used when a dashed curve has to be walked as a polyline.
const DASH_FLATTEN_SEGMENTS: usize = 64;

pub fn to_pos2(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

pub fn to_vec2(p: Pos2) -> Vec2 {
    Vec2::new(p.x, p.y)
}

pub fn to_color32(c: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Paints graph-space edges onto an egui painter.
///
/// Dashes are cut in graph space so the pattern stays attached to the curve
/// while zooming.
pub struct EguiEdgePainter<'a> {
    painter: &'a Painter,
    /// Graph to screen
    transform: TSTransform,
}

impl<'a> EguiEdgePainter<'a> {
    pub fn new(painter: &'a Painter, transform: TSTransform) -> Self {
        Self { painter, transform }
    }

    fn screen(&self, v: Vec2) -> Pos2 {
        self.transform * to_pos2(v)
    }

    fn screen_stroke(&self, stroke: &StrokeStyle) -> Stroke {
        Stroke::new(
            stroke.width * self.transform.scaling,
            to_color32(stroke.color),
        )
    }
}

impl EdgePainter for EguiEdgePainter<'_> {
    fn stroke_curve(&mut self, curve: &CubicBezier, stroke: &StrokeStyle) {
        let screen_stroke = self.screen_stroke(stroke);
        match &stroke.dash {
            Some(dash) if !dash.is_solid() => {
                let points = curve.flatten(DASH_FLATTEN_SEGMENTS);
                for run in dash_polyline(&points, dash) {
                    let run: Vec<Pos2> = run.into_iter().map(|p| self.screen(p)).collect();
                    self.painter.add(Shape::line(run, screen_stroke));
                }
            }
            _ => {
                let shape = CubicBezierShape::from_points_stroke(
                    [
                        self.screen(curve.start),
                        self.screen(curve.control1),
                        self.screen(curve.control2),
                        self.screen(curve.end),
                    ],
                    false,
                    Color32::TRANSPARENT,
                    screen_stroke,
                );
                self.painter.add(shape);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.painter.circle_filled(
            self.screen(center),
            radius * self.transform.scaling,
            to_color32(color),
        );
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &StrokeStyle) {
        self.painter.circle_stroke(
            self.screen(center),
            radius * self.transform.scaling,
            self.screen_stroke(stroke),
        );
    }

    fn text(&mut self, center: Vec2, text: &str, font_size: f32, color: Color) {
        self.painter.text(
            self.screen(center),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(font_size * self.transform.scaling),
            to_color32(color),
        );
    }
}
