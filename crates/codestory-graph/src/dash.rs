//! Dash patterns for stroked paths.

use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// Alternating dash / gap lengths plus a phase offset, all in scene units.
///
/// `lengths[0]` is the first dash, `lengths[1]` the first gap, and so on. An
/// odd number of entries is repeated once to make the pattern even.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub lengths: Vec<f32>,
    /// Distance into the pattern at which the path starts.
    pub offset: f32,
}

impl DashPattern {
    pub fn new(lengths: Vec<f32>, offset: f32) -> Self {
        Self { lengths, offset }
    }

    /// The multiplexed pattern used for scheme overlays: `color_count` colors
    /// share one period, each drawing a single `unit` long dash per period,
    /// shifted by one unit per color index.
    pub fn interleaved(unit: f32, color_count: usize, index: usize) -> Self {
        let gaps = color_count.saturating_sub(1) as f32;
        Self {
            lengths: vec![unit, unit * gaps],
            offset: unit * index as f32,
        }
    }

    pub fn period(&self) -> f32 {
        let sum: f32 = self.lengths.iter().map(|l| l.max(0.0)).sum();
        if self.lengths.len() % 2 == 1 {
            sum * 2.0
        } else {
            sum
        }
    }

    /// True when the pattern has no gaps and so draws a continuous line.
    pub fn is_solid(&self) -> bool {
        self.lengths
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 1)
            .all(|(_, l)| *l <= 0.0)
            && self.lengths.len() % 2 == 0
    }

    fn even_lengths(&self) -> Vec<f32> {
        let mut lengths: Vec<f32> = self.lengths.iter().map(|l| l.max(0.0)).collect();
        if lengths.len() % 2 == 1 {
            lengths.extend_from_within(..);
        }
        lengths
    }
}

/// Split a polyline into the visible dash runs of `pattern`.
///
/// Each returned run is a polyline with at least two points. Patterns without
/// a positive period (or without gaps) yield the input polyline unchanged.
pub fn dash_polyline(points: &[Vec2], pattern: &DashPattern) -> Vec<Vec<Vec2>> {
    if points.len() < 2 {
        return Vec::new();
    }
    let period = pattern.period();
    if period <= f32::EPSILON || pattern.is_solid() {
        return vec![points.to_vec()];
    }

    let lengths = pattern.even_lengths();

    // Find where in the pattern the path starts.
    let mut phase = pattern.offset.rem_euclid(period);
    let mut index = 0;
    while phase >= lengths[index] && phase > 0.0 {
        phase -= lengths[index];
        index = (index + 1) % lengths.len();
    }
    let mut remaining = lengths[index] - phase;
    while remaining <= 0.0 {
        index = (index + 1) % lengths.len();
        remaining = lengths[index];
    }

    let mut runs = Vec::new();
    let mut current: Vec<Vec2> = Vec::new();
    let mut drawing = index % 2 == 0;
    if drawing {
        current.push(points[0]);
    }

    for seg in points.windows(2) {
        let (a, b) = (seg[0], seg[1]);
        let seg_len = a.distance(b);
        if seg_len <= f32::EPSILON {
            continue;
        }
        let dir = (b - a) * (1.0 / seg_len);
        let mut pos = 0.0;

        while seg_len - pos > remaining {
            pos += remaining;
            let p = a + dir * pos;
            if drawing {
                current.push(p);
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            } else {
                current.push(p);
            }
            drawing = !drawing;
            index = (index + 1) % lengths.len();
            remaining = lengths[index];
            // Skip zero length entries without emitting anything.
            while remaining <= 0.0 {
                if drawing {
                    current.clear();
                } else {
                    current.push(p);
                }
                drawing = !drawing;
                index = (index + 1) % lengths.len();
                remaining = lengths[index];
            }
        }

        remaining -= seg_len - pos;
        if drawing {
            current.push(b);
        }
    }

    if drawing && current.len() >= 2 {
        runs.push(current);
    }
    runs
}
