//! Edge Style System
//!
//! Maps edge interaction state to stroke colors, widths and dash patterns.

use crate::dash::DashPattern;
use crate::settings::EdgeItemSettings;
use serde::{Deserialize, Serialize};

/// RGBA color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(&self, a: u8) -> Self {
        Self { a, ..*self }
    }
}

// ============================================================================
// Color Constants
// ============================================================================

pub const COLOR_EDGE_HIGHLIGHT: Color = Color::rgba(255, 157, 38, 255);
pub const COLOR_EDGE_REVERSE: Color = Color::rgba(159, 49, 52, 200);
pub const COLOR_EDGE_FORWARD: Color = Color::rgba(150, 150, 150, 100);
pub const COLOR_EDGE_CANDIDATE: Color = Color::rgba(183, 101, 0, 200);
pub const COLOR_BADGE_OUTLINE: Color = Color::rgb(0, 0, 0);

/// A single pen pass over a path
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    /// `None` draws a solid line.
    pub dash: Option<DashPattern>,
}

impl StrokeStyle {
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }

    pub fn dashed(color: Color, width: f32, dash: DashPattern) -> Self {
        Self {
            color,
            width,
            dash: Some(dash),
        }
    }
}

/// State tracking for edge rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeState {
    /// Whether the pointer is over the edge
    pub is_hovered: bool,

    /// Whether the edge is selected
    pub is_selected: bool,

    /// Whether the edge is a candidate (proposed, not yet confirmed)
    pub is_candidate: bool,

    /// Whether the edge runs right-to-left (source node right of the target)
    pub is_reverse: bool,
}

impl EdgeState {
    /// Create a new edge state with all flags set to false
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hovered(mut self, hovered: bool) -> Self {
        self.is_hovered = hovered;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn with_candidate(mut self, candidate: bool) -> Self {
        self.is_candidate = candidate;
        self
    }

    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.is_reverse = reverse;
        self
    }

    /// Selection and hover both highlight the edge.
    pub fn is_highlighted(&self) -> bool {
        self.is_selected || self.is_hovered
    }
}

/// The base color of an edge in the given state.
///
/// Highlight wins over direction; candidate state does not change this color
/// (it only swaps the color of the stroke itself, see [`resolve_edge_passes`]),
/// so the call-order badge keeps the direction tint on candidate edges.
pub fn state_color(state: EdgeState, settings: &EdgeItemSettings) -> Color {
    let palette = &settings.palette;
    if state.is_highlighted() {
        palette.highlight
    } else if state.is_reverse {
        palette.reverse
    } else {
        palette.forward
    }
}

/// All stroke passes needed to paint an edge, in paint order.
///
/// Without scheme colors this is a single solid pass. With scheme colors an
/// optional wide solid base pass (highlight or candidate) comes first,
/// followed by one dashed pass per scheme color. The dashes of the scheme
/// passes interleave so every color gets an equal share of the curve.
pub fn resolve_edge_passes(
    state: EdgeState,
    scheme_colors: &[Color],
    settings: &EdgeItemSettings,
) -> Vec<StrokeStyle> {
    let color = state_color(state, settings);
    let emphasized = if state.is_highlighted() {
        Some(StrokeStyle::solid(color, settings.emphasized_width))
    } else if state.is_candidate {
        Some(StrokeStyle::solid(
            settings.palette.candidate,
            settings.emphasized_width,
        ))
    } else {
        None
    };

    if scheme_colors.is_empty() {
        return vec![emphasized.unwrap_or_else(|| StrokeStyle::solid(color, settings.base_width))];
    }

    let mut passes: Vec<StrokeStyle> = emphasized.into_iter().collect();
    // Dash lengths scale with the pen width of the overlay.
    let unit = settings.dash_unit * settings.base_width;
    passes.extend(scheme_colors.iter().enumerate().map(|(i, scheme_color)| {
        StrokeStyle::dashed(
            *scheme_color,
            settings.base_width,
            DashPattern::interleaved(unit, scheme_colors.len(), i),
        )
    }));
    passes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EdgeItemSettings {
        EdgeItemSettings::default()
    }

    #[test]
    fn test_plain_forward_edge() {
        let passes = resolve_edge_passes(EdgeState::new(), &[], &settings());
        assert_eq!(passes, vec![StrokeStyle::solid(COLOR_EDGE_FORWARD, 3.0)]);
    }

    #[test]
    fn test_plain_reverse_edge() {
        let passes = resolve_edge_passes(EdgeState::new().with_reverse(true), &[], &settings());
        assert_eq!(passes, vec![StrokeStyle::solid(COLOR_EDGE_REVERSE, 3.0)]);
    }

    #[test]
    fn test_hover_and_selection_highlight() {
        for state in [
            EdgeState::new().with_hovered(true),
            EdgeState::new().with_selected(true),
            EdgeState::new().with_selected(true).with_reverse(true),
        ] {
            let passes = resolve_edge_passes(state, &[], &settings());
            assert_eq!(passes, vec![StrokeStyle::solid(COLOR_EDGE_HIGHLIGHT, 9.0)]);
        }
    }

    #[test]
    fn test_candidate_edge() {
        let passes = resolve_edge_passes(EdgeState::new().with_candidate(true), &[], &settings());
        assert_eq!(passes, vec![StrokeStyle::solid(COLOR_EDGE_CANDIDATE, 9.0)]);
    }

    #[test]
    fn test_highlight_beats_candidate() {
        let state = EdgeState::new().with_candidate(true).with_hovered(true);
        let passes = resolve_edge_passes(state, &[], &settings());
        assert_eq!(passes, vec![StrokeStyle::solid(COLOR_EDGE_HIGHLIGHT, 9.0)]);
    }

    #[test]
    fn test_scheme_overlay_without_base_pass() {
        let red = Color::rgb(255, 0, 0);
        let blue = Color::rgb(0, 0, 255);
        let passes = resolve_edge_passes(EdgeState::new(), &[red, blue], &settings());

        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].color, red);
        assert_eq!(passes[1].color, blue);
        for (i, pass) in passes.iter().enumerate() {
            assert_eq!(pass.width, 3.0);
            let dash = pass.dash.as_ref().unwrap();
            assert_eq!(dash.lengths, vec![15.0, 15.0]);
            assert_eq!(dash.offset, 15.0 * i as f32);
        }
    }

    #[test]
    fn test_scheme_overlay_with_highlight_base() {
        let colors = [Color::rgb(1, 1, 1), Color::rgb(2, 2, 2), Color::rgb(3, 3, 3)];
        let passes =
            resolve_edge_passes(EdgeState::new().with_selected(true), &colors, &settings());

        assert_eq!(passes.len(), 4);
        assert_eq!(passes[0], StrokeStyle::solid(COLOR_EDGE_HIGHLIGHT, 9.0));
        assert_eq!(
            passes[3].dash,
            Some(DashPattern::new(vec![15.0, 30.0], 30.0))
        );
    }

    #[test]
    fn test_scheme_overlay_with_candidate_base() {
        let passes = resolve_edge_passes(
            EdgeState::new().with_candidate(true),
            &[Color::rgb(9, 9, 9)],
            &settings(),
        );
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0], StrokeStyle::solid(COLOR_EDGE_CANDIDATE, 9.0));
        assert!(passes[1].dash.as_ref().unwrap().is_solid());
    }

    #[test]
    fn test_state_color_ignores_candidate() {
        let state = EdgeState::new().with_candidate(true).with_reverse(true);
        assert_eq!(state_color(state, &settings()), COLOR_EDGE_REVERSE);
    }

    #[test]
    fn test_color_with_alpha() {
        let c = Color::rgb(100, 100, 100).with_alpha(10);
        assert_eq!(c, Color::rgba(100, 100, 100, 10));
    }
}
