//! Node layout backing the edge canvas.

use codestory_core::{NodeId, SourceReference};
use codestory_events::{Event, EventBus};
use codestory_graph::{EdgeScene, Rect, SceneNode, Vec2};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct DemoNode {
    pub label: String,
    /// Box in graph coordinates
    pub rect: Rect,
}

impl DemoNode {
    /// Geometry as seen by edges: slots on the middle of the left and right sides.
    pub fn scene_node(&self) -> SceneNode {
        let center = self.rect.center();
        SceneNode {
            pos: center,
            left_slot: Vec2::new(self.rect.min.x, center.y),
            right_slot: Vec2::new(self.rect.max.x, center.y),
        }
    }
}

/// Nodes of the demo graph plus the bus that editor requests go out on.
///
/// Edges hold an `Rc` to this and query it while painting, so mutation goes
/// through a `RefCell`.
pub struct DemoScene {
    nodes: RefCell<BTreeMap<NodeId, DemoNode>>,
    event_bus: EventBus,
}

impl DemoScene {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            nodes: RefCell::new(BTreeMap::new()),
            event_bus,
        }
    }

    pub fn add_node(&self, id: NodeId, label: impl Into<String>, rect: Rect) {
        self.nodes.borrow_mut().insert(
            id,
            DemoNode {
                label: label.into(),
                rect,
            },
        );
    }

    pub fn remove_node(&self, id: NodeId) -> Option<DemoNode> {
        self.nodes.borrow_mut().remove(&id)
    }

    /// Shift a node by `delta` and announce its new position.
    pub fn move_node(&self, id: NodeId, delta: Vec2) {
        let moved = {
            let mut nodes = self.nodes.borrow_mut();
            nodes.get_mut(&id).map(|node| {
                node.rect.min += delta;
                node.rect.max += delta;
                node.rect.min
            })
        };
        match moved {
            Some(pos) => self.event_bus.publish(Event::GraphNodeMove {
                id,
                x: pos.x,
                y: pos.y,
            }),
            None => tracing::warn!("Cannot move node {}: not in scene", id),
        }
    }

    /// Topmost node under a graph-space point. Later nodes are drawn on top.
    pub fn node_at(&self, point: Vec2) -> Option<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .rev()
            .find(|(_, node)| node.rect.contains(point))
            .map(|(id, _)| *id)
    }

    pub fn nodes(&self) -> Vec<(NodeId, DemoNode)> {
        self.nodes
            .borrow()
            .iter()
            .map(|(id, node)| (*id, node.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }
}

impl EdgeScene for DemoScene {
    fn node(&self, id: NodeId) -> Option<SceneNode> {
        self.nodes.borrow().get(&id).map(DemoNode::scene_node)
    }

    fn show_in_editor(&self, reference: Option<&SourceReference>) {
        match reference {
            Some(location) => {
                tracing::info!("Show in editor: {}", location);
                self.event_bus.publish(Event::ShowReference {
                    location: location.clone(),
                });
            }
            None => {
                tracing::debug!("Show in editor requested for an edge without reference");
                self.event_bus.publish(Event::ShowReferenceMissing);
            }
        }
    }
}
