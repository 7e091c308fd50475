//! A code-reference edge between two nodes of the graph canvas.
//!
//! The item only knows the ids of its end nodes. Anchor positions are looked
//! up through the injected [`EdgeScene`] every time they are needed, and the
//! derived curve is cached until the anchors move.

use crate::edge_router::{CubicBezier, EdgeRouter};
use crate::geometry::{Rect, Vec2};
use crate::hit_tester::{HitShape, StrokeOutline};
use crate::scene::{EdgePainter, EdgeScene, PointerEvent, SceneItem, SceneNode};
use crate::settings::EdgeItemSettings;
use crate::style::{self, Color, EdgeState, StrokeStyle};
use codestory_core::{NodeId, SourceReference};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Edges are painted behind nodes.
pub const EDGE_Z_VALUE: f32 = -1.0;

/// Optional data attached to an edge when the graph is populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDecoration {
    /// Where the reference was found in the source code
    pub reference: Option<SourceReference>,
    /// Edge added by the user rather than found by the indexer
    pub custom_edge: bool,
}

/// Call-order badge: the ordinal and where to draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderData {
    pub ordinal: i32,
    pub label_point: Vec2,
}

/// Cached curve geometry, valid for `endpoints` only.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgePath {
    pub curve: CubicBezier,
    /// Wide outline used for hit testing
    pub outline: StrokeOutline,
}

pub struct EdgeItem {
    scene: Rc<dyn EdgeScene>,
    settings: Rc<EdgeItemSettings>,
    router: EdgeRouter,

    source: NodeId,
    target: NodeId,
    reference: Option<SourceReference>,
    custom_edge: bool,

    is_candidate: bool,
    order: Option<OrderData>,
    scheme_colors: Vec<Color>,

    /// Anchor pair the cached geometry was built for
    endpoints: Option<(Vec2, Vec2)>,
    path: Option<EdgePath>,
    /// Bumped every time `path` is rebuilt
    path_revision: u64,

    is_hover: bool,
    is_selected: bool,
}

impl fmt::Debug for EdgeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeItem")
            .field("source", &self.source)
            .field("target", &self.target)
            .field("reference", &self.reference)
            .field("order", &self.order)
            .field("endpoints", &self.endpoints)
            .field("is_hover", &self.is_hover)
            .field("is_selected", &self.is_selected)
            .finish_non_exhaustive()
    }
}

impl EdgeItem {
    /// Create the edge and build its curve from the current node positions.
    pub fn new(
        scene: Rc<dyn EdgeScene>,
        source: NodeId,
        target: NodeId,
        decoration: EdgeDecoration,
    ) -> Self {
        Self::with_settings(
            scene,
            Rc::new(EdgeItemSettings::default()),
            source,
            target,
            decoration,
        )
    }

    /// Like [`EdgeItem::new`] with settings shared between many edges.
    pub fn with_settings(
        scene: Rc<dyn EdgeScene>,
        settings: Rc<EdgeItemSettings>,
        source: NodeId,
        target: NodeId,
        decoration: EdgeDecoration,
    ) -> Self {
        let mut item = Self {
            scene,
            settings,
            router: EdgeRouter::default(),
            source,
            target,
            reference: decoration.reference,
            custom_edge: decoration.custom_edge,
            is_candidate: false,
            order: None,
            scheme_colors: Vec::new(),
            endpoints: None,
            path: None,
            path_revision: 0,
            is_hover: false,
            is_selected: false,
        };
        item.build_path();
        item
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn source_reference(&self) -> Option<&SourceReference> {
        self.reference.as_ref()
    }

    pub fn is_custom_edge(&self) -> bool {
        self.custom_edge
    }

    pub fn settings(&self) -> &EdgeItemSettings {
        &self.settings
    }

    // -- Decoration --

    pub fn is_candidate(&self) -> bool {
        self.is_candidate
    }

    pub fn set_candidate(&mut self, candidate: bool) {
        self.is_candidate = candidate;
    }

    pub fn order(&self) -> Option<OrderData> {
        self.order
    }

    pub fn set_order(&mut self, order: Option<OrderData>) {
        self.order = order;
    }

    pub fn call_order(&self) -> Option<i32> {
        self.order.map(|o| o.ordinal)
    }

    pub fn scheme_colors(&self) -> &[Color] {
        &self.scheme_colors
    }

    pub fn set_scheme_colors(&mut self, colors: Vec<Color>) {
        self.scheme_colors = colors;
    }

    // -- Interaction state --

    pub fn is_hover(&self) -> bool {
        self.is_hover
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
    }

    // -- Node lookups --

    /// Source right slot and target left slot; both zero when either node is
    /// missing from the scene.
    pub fn node_positions(&self) -> (Vec2, Vec2) {
        match self.lookup_nodes() {
            Some((src, tar)) => (src.right_slot, tar.left_slot),
            None => (Vec2::ZERO, Vec2::ZERO),
        }
    }

    /// Node positions of both ends; both zero when either node is missing.
    pub fn node_center_positions(&self) -> (Vec2, Vec2) {
        match self.lookup_nodes() {
            Some((src, tar)) => (src.pos, tar.pos),
            None => (Vec2::ZERO, Vec2::ZERO),
        }
    }

    /// Halfway between the two node positions; zero when either node is missing.
    pub fn middle_pos(&self) -> Vec2 {
        match self.lookup_nodes() {
            Some((src, tar)) => src.pos.midpoint(tar.pos),
            None => Vec2::ZERO,
        }
    }

    fn lookup_nodes(&self) -> Option<(SceneNode, SceneNode)> {
        let src = self.scene.node(self.source);
        let tar = self.scene.node(self.target);
        match (src, tar) {
            (Some(src), Some(tar)) => Some((src, tar)),
            _ => {
                tracing::debug!(
                    "Edge {} -> {}: node missing from scene (source: {}, target: {})",
                    self.source,
                    self.target,
                    src.is_some(),
                    tar.is_some()
                );
                None
            }
        }
    }

    // -- Geometry --

    /// Rebuild the cached curve if the anchors moved.
    ///
    /// Returns `false` when the cached curve was reused, i.e. both anchors are
    /// within `endpoint_tolerance` (manhattan) of the cached ones.
    pub fn build_path(&mut self) -> bool {
        let (src_pos, tar_pos) = self.node_positions();
        let tolerance = self.settings.endpoint_tolerance;
        if let Some((cached_src, cached_tar)) = self.endpoints {
            if (cached_src - src_pos).manhattan_length() < tolerance
                && (cached_tar - tar_pos).manhattan_length() < tolerance
            {
                return false;
            }
        }

        self.endpoints = Some((src_pos, tar_pos));
        self.path_revision += 1;

        let finite = [src_pos, tar_pos]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite());
        if !finite {
            tracing::debug!(
                "Edge {} -> {}: non-finite anchors {:?} / {:?}, curve dropped",
                self.source,
                self.target,
                src_pos,
                tar_pos
            );
            self.path = None;
            return true;
        }

        let curve = self.router.route(src_pos, tar_pos);
        let outline = StrokeOutline::from_curve(&curve, self.settings.hit_width);
        self.path = Some(EdgePath { curve, outline });
        true
    }

    /// Number of times the cached geometry has been (re)built.
    pub fn path_revision(&self) -> u64 {
        self.path_revision
    }

    pub fn path(&self) -> Option<&EdgePath> {
        self.path.as_ref()
    }

    pub fn curve(&self) -> Option<&CubicBezier> {
        self.path.as_ref().map(|p| &p.curve)
    }

    pub fn cached_endpoints(&self) -> Option<(Vec2, Vec2)> {
        self.endpoints
    }

    pub fn point_at_percent(&self, t: f32) -> Option<Vec2> {
        self.curve().map(|c| c.sample(t))
    }

    /// Box spanning the two live anchors.
    ///
    /// This is the anchor box, not the curve's own bounds; the horizontal
    /// S-curve never leaves it. Zero rect when a node is missing.
    pub fn bounding_rect(&self) -> Rect {
        let (src_pos, tar_pos) = self.node_positions();
        Rect::from_two_pos(src_pos, tar_pos)
    }

    /// Everything [`EdgeItem::paint`] may touch, from the cached geometry.
    pub fn painted_bounds(&self) -> Rect {
        let mut rect = match &self.path {
            Some(path) => path
                .curve
                .bounding_box()
                .expand(self.settings.emphasized_width.max(self.settings.hit_width) * 0.5),
            None => Rect::NOTHING,
        };
        if let Some(badge) = self.number_rect() {
            rect = if self.path.is_some() {
                rect.union(&badge)
            } else {
                badge
            };
        }
        rect
    }

    /// Square occupied by the call-order badge.
    pub fn number_rect(&self) -> Option<Rect> {
        self.order.map(|order| {
            let d = self.settings.badge_radius * 2.0;
            Rect::from_center_size(order.label_point, Vec2::new(d, d))
        })
    }

    /// Clickable region: the wide stroke outline plus the badge disc.
    pub fn shape(&self) -> HitShape {
        HitShape {
            outline: self.path.as_ref().map(|p| p.outline.clone()),
            discs: self
                .order
                .map(|o| vec![(o.label_point, self.settings.badge_radius)])
                .unwrap_or_default(),
        }
    }

    /// Hit test against the current geometry, rebuilding it first if needed.
    pub fn hit_test(&mut self, point: Vec2) -> bool {
        self.build_path();
        let on_stroke = self
            .path
            .as_ref()
            .is_some_and(|p| p.outline.contains(point));
        let on_badge = self
            .order
            .is_some_and(|o| o.label_point.distance(point) <= self.settings.badge_radius);
        on_stroke || on_badge
    }

    /// Curve y at the given x, from the cached geometry.
    ///
    /// Falls back to the middle of the cached anchors without a curve, and to
    /// 0 when nothing has been cached yet.
    pub fn find_curve_y_pos(&self, x: f32) -> f32 {
        let Some((src_pos, tar_pos)) = self.endpoints else {
            return 0.0;
        };
        match &self.path {
            Some(path) => {
                path.curve
                    .bisect_y_at_x(
                        x,
                        self.settings.y_search_iterations,
                        self.settings.y_search_tolerance,
                    )
                    .y
            }
            None => (src_pos.y.min(tar_pos.y) + src_pos.y.max(tar_pos.y)) * 0.5,
        }
    }

    /// Where to put a label at `x` so it sits on the curve.
    pub fn label_point_at_x(&self, x: f32) -> Vec2 {
        Vec2::new(x, self.find_curve_y_pos(x))
    }

    /// Whether `x` lies strictly between the x of the curve's two ends.
    pub fn is_x_between(&self, x: f32) -> bool {
        let Some((src_pos, tar_pos)) = self.endpoints else {
            return false;
        };
        let (a, b) = match &self.path {
            Some(path) => (path.curve.sample(0.0), path.curve.sample(1.0)),
            None => (src_pos, tar_pos),
        };
        x > a.x.min(b.x) && x < a.x.max(b.x)
    }

    // -- Painting --

    /// Interaction and direction flags that drive the stroke style.
    pub fn edge_state(&self) -> EdgeState {
        let (src_center, tar_center) = self.node_center_positions();
        EdgeState::new()
            .with_hovered(self.is_hover)
            .with_selected(self.is_selected)
            .with_candidate(self.is_candidate)
            .with_reverse(src_center.x > tar_center.x)
    }

    pub fn paint(&mut self, painter: &mut dyn EdgePainter) {
        self.build_path();
        let state = self.edge_state();

        if let Some(path) = &self.path {
            for pass in style::resolve_edge_passes(state, &self.scheme_colors, &self.settings) {
                painter.stroke_curve(&path.curve, &pass);
            }
        }

        if let Some(order) = self.order {
            let settings = &self.settings;
            let outline = settings.palette.badge_outline;
            painter.fill_circle(
                order.label_point,
                settings.badge_radius,
                style::state_color(state, settings),
            );
            painter.stroke_circle(
                order.label_point,
                settings.badge_radius,
                &StrokeStyle::solid(outline, settings.badge_outline_width),
            );
            painter.text(
                order.label_point,
                &order.ordinal.to_string(),
                settings.badge_font_size,
                outline,
            );
        }
    }

    // -- Events --

    pub fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::HoverEnter => !std::mem::replace(&mut self.is_hover, true),
            PointerEvent::HoverLeave => std::mem::replace(&mut self.is_hover, false),
            PointerEvent::DoubleClick { pos } => {
                tracing::debug!(
                    "Edge {} -> {} double-clicked at {:?}, showing {:?}",
                    self.source,
                    self.target,
                    pos,
                    self.reference
                );
                self.scene.show_in_editor(self.reference.as_ref());
                false
            }
        }
    }
}

impl SceneItem for EdgeItem {
    fn bounding_rect(&self) -> Rect {
        EdgeItem::bounding_rect(self)
    }

    fn contains(&mut self, point: Vec2) -> bool {
        self.hit_test(point)
    }

    fn paint(&mut self, painter: &mut dyn EdgePainter) {
        EdgeItem::paint(self, painter)
    }

    fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        EdgeItem::on_pointer_event(self, event)
    }

    fn z_value(&self) -> f32 {
        EDGE_Z_VALUE
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::scene::testing::MockScene;
    use proptest::prelude::*;

    fn point_strategy() -> impl Strategy<Value = Vec2> {
        (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Vec2::new(x, y))
    }

    fn item_for(a: Vec2, b: Vec2) -> (Rc<MockScene>, EdgeItem) {
        let scene = Rc::new(MockScene::default());
        scene.place_slots(NodeId(1), a - Vec2::new(50.0, 0.0), a);
        scene.place_slots(NodeId(2), b, b + Vec2::new(50.0, 0.0));
        let item = EdgeItem::new(scene.clone(), NodeId(1), NodeId(2), EdgeDecoration::default());
        (scene, item)
    }

    proptest! {
        /// The cached curve starts on the source anchor and ends on the target anchor.
        #[test]
        fn prop_curve_connects_anchors(a in point_strategy(), b in point_strategy()) {
            let (_scene, item) = item_for(a, b);
            let curve = item.curve().copied().unwrap();
            prop_assert_eq!(curve.start, a);
            prop_assert_eq!(curve.end, b);
            prop_assert_eq!(item.point_at_percent(0.0), Some(a));
        }

        /// is_x_between is exactly the open interval between the anchor xs.
        #[test]
        fn prop_is_x_between_matches_interval(
            a in point_strategy(),
            b in point_strategy(),
            x in -600.0f32..600.0
        ) {
            let (_scene, item) = item_for(a, b);
            let end = item.point_at_percent(1.0).unwrap();
            let expected = x > a.x.min(end.x) && x < a.x.max(end.x);
            prop_assert_eq!(item.is_x_between(x), expected);
            prop_assert!(!item.is_x_between(a.x));
            prop_assert!(!item.is_x_between(end.x));
        }

        /// Rebuilding with unchanged anchors never creates a new curve.
        #[test]
        fn prop_rebuild_is_idempotent(a in point_strategy(), b in point_strategy()) {
            let (_scene, mut item) = item_for(a, b);
            let revision = item.path_revision();
            prop_assert!(!item.build_path());
            prop_assert!(!item.build_path());
            prop_assert_eq!(item.path_revision(), revision);
        }

        /// The label y search never leaves the anchors' vertical range.
        #[test]
        fn prop_curve_y_within_anchor_range(
            a in point_strategy(),
            b in point_strategy(),
            frac in 0.0f32..=1.0
        ) {
            let (_scene, item) = item_for(a, b);
            let x = a.x + (b.x - a.x) * frac;
            let y = item.find_curve_y_pos(x);
            prop_assert!(y >= a.y.min(b.y) - 1e-2 && y <= a.y.max(b.y) + 1e-2);
        }
    }
}
