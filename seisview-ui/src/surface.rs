use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};

/// A 2-D drawing target with its own pixel coordinate system.
///
/// Coordinates are relative to the surface: (0, 0) is the top-left corner and
/// `size()` is the bottom-right one.
pub trait Surface {
    fn size(&self) -> Vec2;
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color32);
    fn line_segment(&mut self, from: Pos2, to: Pos2, stroke: Stroke);
    /// Connect consecutive points with straight segments.
    fn polyline(&mut self, points: Vec<Pos2>, stroke: Stroke);
}

/// Draws onto an egui painter clipped to `rect`.
pub struct PainterSurface<'a> {
    painter: &'a Painter,
    rect: Rect,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a Painter, rect: Rect) -> Self {
        Self { painter, rect }
    }

    fn to_screen(&self, pos: Pos2) -> Pos2 {
        self.rect.min + pos.to_vec2()
    }
}

impl Surface for PainterSurface<'_> {
    fn size(&self) -> Vec2 {
        self.rect.size()
    }

    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.rect, 0.0, color);
    }

    fn line_segment(&mut self, from: Pos2, to: Pos2, stroke: Stroke) {
        self.painter
            .line_segment([self.to_screen(from), self.to_screen(to)], stroke);
    }

    fn polyline(&mut self, points: Vec<Pos2>, stroke: Stroke) {
        let points = points.into_iter().map(|p| self.to_screen(p)).collect();
        self.painter.add(Shape::line(points, stroke));
    }
}
