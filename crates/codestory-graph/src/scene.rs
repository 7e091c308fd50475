//! Interfaces between scene items and the canvas that hosts them.
//!
//! The canvas (whatever toolkit draws it) implements [`EdgeScene`] and
//! [`EdgePainter`]; items implement [`SceneItem`]. Nothing here depends on a
//! GUI crate.

use crate::edge_router::CubicBezier;
use crate::geometry::{Rect, Vec2};
use crate::style::{Color, StrokeStyle};
use codestory_core::{NodeId, SourceReference};

/// Snapshot of the geometry of a node as currently laid out in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneNode {
    /// Node position (its center, in scene coordinates)
    pub pos: Vec2,
    /// Attachment point for incoming edges
    pub left_slot: Vec2,
    /// Attachment point for outgoing edges
    pub right_slot: Vec2,
}

/// Read access to live node geometry plus the editor hand-off.
///
/// Everything is called on the UI thread; implementations that need to record
/// state from `show_in_editor` use interior mutability.
pub trait EdgeScene {
    /// Current geometry of a node, `None` once the node has left the scene.
    fn node(&self, id: NodeId) -> Option<SceneNode>;

    /// Reveal the source of the given reference in the code editor.
    fn show_in_editor(&self, reference: Option<&SourceReference>);
}

/// Pointer events routed to an item by the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    HoverEnter,
    HoverLeave,
    DoubleClick { pos: Vec2 },
}

/// Drawing surface handed to [`SceneItem::paint`], in scene coordinates.
pub trait EdgePainter {
    fn stroke_curve(&mut self, curve: &CubicBezier, stroke: &StrokeStyle);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &StrokeStyle);

    /// Draw `text` centered on `center`.
    fn text(&mut self, center: Vec2, text: &str, font_size: f32, color: Color);
}

/// What the canvas needs from anything it lays out, hit tests and paints.
pub trait SceneItem {
    /// Region that must be repainted when the item changes.
    fn bounding_rect(&self) -> Rect;

    /// Whether a scene point hits the item's clickable shape.
    fn contains(&mut self, point: Vec2) -> bool;

    fn paint(&mut self, painter: &mut dyn EdgePainter);

    /// Returns `true` when the event changed how the item looks.
    fn on_pointer_event(&mut self, event: PointerEvent) -> bool;

    /// Items with lower values are painted first and hit tested last.
    fn z_value(&self) -> f32 {
        0.0
    }
}
