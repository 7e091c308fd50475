use crate::geometry::{Rect, Vec2};

/// A cubic bezier curve segment defined by four control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub start: Vec2,
    pub control1: Vec2,
    pub control2: Vec2,
    pub end: Vec2,
}

/// Outcome of [`CubicBezier::bisect_y_at_x`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YSearch {
    /// Average y of the two bracketing samples when the search stopped.
    pub y: f32,
    /// Number of bisection steps performed.
    pub iterations: usize,
    /// |y_min - y_max| of the final bracket.
    pub spread: f32,
}

impl CubicBezier {
    /// Sample the curve at parameter t [0, 1]
    pub fn sample(&self, t: f32) -> Vec2 {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = self.start.x * mt3
            + 3.0 * self.control1.x * mt2 * t
            + 3.0 * self.control2.x * mt * t2
            + self.end.x * t3;
        let y = self.start.y * mt3
            + 3.0 * self.control1.y * mt2 * t
            + 3.0 * self.control2.y * mt * t2
            + self.end.y * t3;

        Vec2::new(x, y)
    }

    /// Uniformly sampled polyline with `segments + 1` points, first point is
    /// `start` and last point is `end`.
    pub fn flatten(&self, segments: usize) -> Vec<Vec2> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.sample(i as f32 / segments as f32))
            .collect()
    }

    /// Exact axis-aligned bounds of the curve (not just of the end points).
    ///
    /// Includes the interior extrema found at the roots of the derivative on
    /// each axis.
    pub fn bounding_box(&self) -> Rect {
        let mut rect = Rect::from_two_pos(self.start, self.end);
        let axis = |p: fn(Vec2) -> f32| {
            derivative_roots(
                p(self.start),
                p(self.control1),
                p(self.control2),
                p(self.end),
            )
        };
        for t in axis(|v| v.x).into_iter().chain(axis(|v| v.y)).flatten() {
            rect.extend_with(self.sample(t));
        }
        rect
    }

    /// Find the curve's y at a given x by bisecting the parameter range.
    ///
    /// Assumes x(t) is monotonic between the end points, which holds for the
    /// horizontal S-curves produced by [`EdgeRouter::route`]. The bracket moves
    /// towards `end` when `end.x > start.x` and towards `start` otherwise.
    /// Stops after `max_iterations` or once the bracketing y values differ by
    /// less than `tolerance`.
    pub fn bisect_y_at_x(&self, x: f32, max_iterations: usize, tolerance: f32) -> YSearch {
        let sign = if self.end.x > self.start.x { 1.0 } else { -1.0 };
        let mut min_t = 0.0f32;
        let mut max_t = 1.0f32;
        let mut min_pnt = self.sample(min_t);
        let mut max_pnt = self.sample(max_t);
        let mut iterations = 0;

        for _ in 0..max_iterations {
            iterations += 1;
            let mid_t = (min_t + max_t) * 0.5;
            let mid_pnt = self.sample(mid_t);
            if (mid_pnt.x - x) * sign < 0.0 {
                min_t = mid_t;
                min_pnt = mid_pnt;
            } else {
                max_t = mid_t;
                max_pnt = mid_pnt;
            }
            if (min_pnt.y - max_pnt.y).abs() < tolerance {
                break;
            }
        }

        YSearch {
            y: (min_pnt.y + max_pnt.y) * 0.5,
            iterations,
            spread: (min_pnt.y - max_pnt.y).abs(),
        }
    }
}

/// Parameters in (0, 1) where the derivative of a 1-D cubic bezier vanishes.
fn derivative_roots(p0: f32, p1: f32, p2: f32, p3: f32) -> [Option<f32>; 2] {
    // B'(t)/3 = a t^2 + b t + c
    let a = -p0 + 3.0 * p1 - 3.0 * p2 + p3;
    let b = 2.0 * (p0 - 2.0 * p1 + p2);
    let c = p1 - p0;
    let inside = |t: f32| (t > 0.0 && t < 1.0).then_some(t);

    if a.abs() < 1e-6 {
        if b.abs() < 1e-6 {
            return [None, None];
        }
        return [inside(-c / b), None];
    }

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return [None, None];
    }
    let sq = disc.sqrt();
    [inside((-b + sq) / (2.0 * a)), inside((-b - sq) / (2.0 * a))]
}

/// Routes code-reference edges as horizontal S-curves.
///
/// The control points are pushed horizontally away from each anchor by a
/// fraction of the horizontal distance, with y left unchanged, so the curve
/// always leaves the source and enters the target horizontally regardless of
/// the vertical offset between them.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRouter {
    /// Fraction of dx added to the source anchor for the first control point
    pub source_factor: f32,
    /// Fraction of dx subtracted from the target anchor for the second control point
    pub target_factor: f32,
}

impl Default for EdgeRouter {
    fn default() -> Self {
        Self {
            source_factor: 0.3,
            target_factor: 0.7,
        }
    }
}

impl EdgeRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the curve from the source anchor (`start`) to the target anchor (`end`).
    pub fn route(&self, start: Vec2, end: Vec2) -> CubicBezier {
        let dx = end.x - start.x;
        CubicBezier {
            start,
            control1: start + Vec2::new(dx * self.source_factor, 0.0),
            control2: end + Vec2::new(-dx * self.target_factor, 0.0),
            end,
        }
    }
}
