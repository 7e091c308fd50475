pub mod dash;
pub mod edge_item;
pub mod edge_router;
pub mod geometry;
pub mod hit_tester;
pub mod scene;
pub mod settings;
pub mod style;

pub use dash::{DashPattern, dash_polyline};
pub use edge_item::{EDGE_Z_VALUE, EdgeDecoration, EdgeItem, EdgePath, OrderData};
pub use edge_router::{CubicBezier, EdgeRouter, YSearch};
pub use geometry::{Rect, Vec2};
pub use hit_tester::{HitShape, OUTLINE_SEGMENTS, StrokeOutline};
pub use scene::{EdgePainter, EdgeScene, PointerEvent, SceneItem, SceneNode};
pub use settings::{EdgeItemSettings, EdgePalette, SettingsError};
pub use style::{
    COLOR_BADGE_OUTLINE, COLOR_EDGE_CANDIDATE, COLOR_EDGE_FORWARD, COLOR_EDGE_HIGHLIGHT,
    COLOR_EDGE_REVERSE, Color, EdgeState, StrokeStyle, resolve_edge_passes, state_color,
};
