use crate::edge_router::CubicBezier;
use crate::geometry::{Rect, Vec2};

/// Number of straight segments a curve is flattened into before stroking.
pub const OUTLINE_SEGMENTS: usize = 32;

/// The filled region covered by stroking a polyline with a wide pen.
///
/// Used as the clickable area of an edge: it is wider than the painted line so
/// thin edges are still easy to hit. Joins between segments are round, the two
/// ends are cut flat.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeOutline {
    /// Center line the outline was built from.
    centerline: Vec<Vec2>,
    half_width: f32,
    bounds: Rect,
}

impl StrokeOutline {
    /// Stroke a cubic curve with the given pen width.
    pub fn from_curve(curve: &CubicBezier, width: f32) -> Self {
        Self::from_polyline(&curve.flatten(OUTLINE_SEGMENTS), width)
    }

    pub fn from_polyline(points: &[Vec2], width: f32) -> Self {
        let half_width = (width * 0.5).max(0.0);
        let bounds = Rect::from_points(points)
            .map(|r| r.expand(half_width))
            .unwrap_or(Rect::NOTHING);

        Self {
            centerline: points.to_vec(),
            half_width,
            bounds,
        }
    }

    pub fn centerline(&self) -> &[Vec2] {
        &self.centerline
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn width(&self) -> f32 {
        self.half_width * 2.0
    }

    /// Whether `point` lies inside the stroked area.
    ///
    /// A point is inside when it projects onto some segment of the center
    /// line within half the pen width, or lies within half the pen width of
    /// an interior vertex (the outer side of a bend). Projections past either
    /// end of the polyline do not count.
    pub fn contains(&self, point: Vec2) -> bool {
        if self.centerline.len() < 2 || !self.bounds.contains(point) {
            return false;
        }

        let on_segment = self.centerline.windows(2).any(|seg| {
            let (a, b) = (seg[0], seg[1]);
            let ab = b - a;
            let len_sq = ab.dot(ab);
            if len_sq <= f32::EPSILON {
                return false;
            }
            let t = (point - a).dot(ab) / len_sq;
            if !(0.0..=1.0).contains(&t) {
                return false;
            }
            let closest = a + ab * t;
            closest.distance(point) <= self.half_width
        });
        if on_segment {
            return true;
        }

        let interior = &self.centerline[1..self.centerline.len() - 1];
        interior
            .iter()
            .any(|vertex| vertex.distance(point) <= self.half_width)
    }
}

/// Clickable area of a scene item: a stroke outline plus optional discs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HitShape {
    pub outline: Option<StrokeOutline>,
    /// (center, radius)
    pub discs: Vec<(Vec2, f32)>,
}

impl HitShape {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.outline.is_none() && self.discs.is_empty()
    }

    pub fn contains(&self, point: Vec2) -> bool {
        if let Some(outline) = &self.outline {
            if outline.contains(point) {
                return true;
            }
        }
        self.discs
            .iter()
            .any(|(center, radius)| center.distance(point) <= *radius)
    }

    pub fn bounds(&self) -> Rect {
        let mut rect: Option<Rect> = self.outline.as_ref().map(StrokeOutline::bounds);
        for (center, radius) in &self.discs {
            let disc = Rect::from_center_size(*center, Vec2::new(radius * 2.0, radius * 2.0));
            rect = Some(match rect {
                Some(r) => r.union(&disc),
                None => disc,
            });
        }
        rect.unwrap_or(Rect::NOTHING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge_router::EdgeRouter;

    fn horizontal_outline() -> StrokeOutline {
        let curve = EdgeRouter::new().route(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        StrokeOutline::from_curve(&curve, 10.0)
    }

    #[test]
    fn test_outline_bounds_cover_band() {
        let outline = horizontal_outline();
        assert_eq!(outline.centerline().len(), OUTLINE_SEGMENTS + 1);
        assert_eq!(outline.width(), 10.0);

        let bounds = outline.bounds();
        assert!((bounds.min.y + 5.0).abs() < 1e-4);
        assert!((bounds.max.y - 5.0).abs() < 1e-4);
        assert!((bounds.min.x + 5.0).abs() < 1e-4);
        assert!((bounds.max.x - 105.0).abs() < 1e-3);
    }

    #[test]
    fn test_outline_contains_within_half_width() {
        let outline = horizontal_outline();
        assert!(outline.contains(Vec2::new(50.0, 0.0)));
        assert!(outline.contains(Vec2::new(50.0, 4.9)));
        assert!(outline.contains(Vec2::new(50.0, -4.9)));
        assert!(!outline.contains(Vec2::new(50.0, 5.5)));
        assert!(!outline.contains(Vec2::new(50.0, -20.0)));
    }

    #[test]
    fn test_outline_has_flat_caps() {
        let outline = horizontal_outline();
        assert!(!outline.contains(Vec2::new(-3.0, 0.0)));
        assert!(!outline.contains(Vec2::new(103.0, 0.0)));
    }

    #[test]
    fn test_outline_follows_curve() {
        let curve = EdgeRouter::new().route(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        let outline = StrokeOutline::from_curve(&curve, 10.0);
        let mid = curve.sample(0.5);
        assert!(outline.contains(mid));
        // Near the start the curve hugs y = 0, far from the opposite corner
        assert!(!outline.contains(Vec2::new(10.0, 90.0)));
    }

    #[test]
    fn test_outline_covers_outer_side_of_bends() {
        // Steep edges bend hardest near their anchors.
        let curve = EdgeRouter::new().route(Vec2::new(0.0, 0.0), Vec2::new(10.0, 300.0));
        let outline = StrokeOutline::from_curve(&curve, 10.0);
        let points = curve.flatten(OUTLINE_SEGMENTS);

        let mut checked = 0;
        for w in points.windows(3) {
            let (Some(d1), Some(d2)) = ((w[1] - w[0]).normalized(), (w[2] - w[1]).normalized())
            else {
                continue;
            };
            // Away from the center of curvature
            let Some(outer) = (d1 - d2).normalized() else {
                continue;
            };
            let probe_point = w[1] + outer * 4.0;
            assert!(
                outline.contains(probe_point),
                "{:?} is 4 units from vertex {:?} but not hit",
                probe_point,
                w[1]
            );
            checked += 1;
        }
        assert!(checked > 20);
    }

    #[test]
    fn test_round_join_on_sharp_corner() {
        let outline = StrokeOutline::from_polyline(
            &[
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
            ],
            10.0,
        );
        // Beyond both segments' projections, but inside the join
        assert!(outline.contains(Vec2::new(13.0, -3.0)));
        assert!(!outline.contains(Vec2::new(14.0, -4.0)));
        // Ends stay flat
        assert!(!outline.contains(Vec2::new(-2.0, 0.0)));
        assert!(!outline.contains(Vec2::new(10.0, 12.0)));
    }

    #[test]
    fn test_degenerate_outline() {
        let outline = StrokeOutline::from_polyline(&[Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0)], 10.0);
        assert!(!outline.contains(Vec2::new(5.0, 5.0)));
        let empty = StrokeOutline::from_polyline(&[], 10.0);
        assert!(!empty.contains(Vec2::ZERO));
        assert_eq!(empty.bounds(), Rect::NOTHING);
    }

    #[test]
    fn test_hit_shape_disc_union() {
        let mut shape = HitShape {
            outline: Some(horizontal_outline()),
            discs: Vec::new(),
        };
        assert!(!shape.contains(Vec2::new(50.0, 30.0)));

        shape.discs.push((Vec2::new(50.0, 30.0), 10.0));
        assert!(shape.contains(Vec2::new(50.0, 30.0)));
        assert!(shape.contains(Vec2::new(55.0, 35.0)));
        assert!(shape.contains(Vec2::new(50.0, 0.0)));
        assert!((shape.bounds().max.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn test_empty_hit_shape() {
        let shape = HitShape::empty();
        assert!(shape.is_empty());
        assert!(!shape.contains(Vec2::ZERO));
        assert_eq!(shape.bounds(), Rect::NOTHING);
    }
}
