//! Owns the edge items of a graph view and routes pointer input to them.

use codestory_events::{Event, EventBus};
use codestory_graph::{EdgeItem, EdgePainter, OrderData, PointerEvent, Rect, SceneItem, Vec2};

pub struct EdgeCanvas {
    items: Vec<EdgeItem>,
    hovered: Option<usize>,
    selected: Option<usize>,
    event_bus: EventBus,
}

impl EdgeCanvas {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            items: Vec::new(),
            hovered: None,
            selected: None,
            event_bus,
        }
    }

    pub fn add_edge(&mut self, item: EdgeItem) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn items(&self) -> &[EdgeItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [EdgeItem] {
        &mut self.items
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Item indices, lowest z first. Ties keep insertion order.
    pub fn paint_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by(|a, b| {
            self.items[*a]
                .z_value()
                .total_cmp(&self.items[*b].z_value())
        });
        order
    }

    /// Topmost item whose shape contains `point`.
    pub fn hit_item(&mut self, point: Vec2) -> Option<usize> {
        let order = self.paint_order();
        order
            .into_iter()
            .rev()
            .find(|&index| self.items[index].contains(point))
    }

    /// Track the pointer; `None` when it left the canvas.
    ///
    /// Returns `true` when the hovered item changed.
    pub fn pointer_moved(&mut self, point: Option<Vec2>) -> bool {
        let hit = point.and_then(|p| self.hit_item(p));
        if hit == self.hovered {
            return false;
        }
        if let Some(old) = self.hovered.take() {
            self.items[old].on_pointer_event(PointerEvent::HoverLeave);
        }
        if let Some(new) = hit {
            let item = &mut self.items[new];
            item.on_pointer_event(PointerEvent::HoverEnter);
            self.event_bus.publish(Event::EdgeHovered {
                source: item.source(),
                target: item.target(),
            });
        }
        self.hovered = hit;
        true
    }

    /// Select the item under `point`, or clear the selection on empty space.
    pub fn click(&mut self, point: Vec2) {
        let hit = self.hit_item(point);
        if hit == self.selected {
            return;
        }
        if let Some(old) = self.selected.take() {
            self.items[old].set_selected(false);
        }
        match hit {
            Some(index) => {
                let item = &mut self.items[index];
                item.set_selected(true);
                self.event_bus.publish(Event::EdgeSelected {
                    source: item.source(),
                    target: item.target(),
                });
            }
            None => self.event_bus.publish(Event::EdgeSelectionCleared),
        }
        self.selected = hit;
    }

    /// Forward a double-click to the item under `point`.
    pub fn double_click(&mut self, point: Vec2) -> bool {
        match self.hit_item(point) {
            Some(index) => {
                self.items[index].on_pointer_event(PointerEvent::DoubleClick { pos: point });
                true
            }
            None => false,
        }
    }

    /// Place each edge's call-order badge on its curve, halfway along x.
    ///
    /// `ordinals` is indexed like the items; `None` removes the badge.
    pub fn layout_order_badges(&mut self, ordinals: &[Option<i32>]) {
        for (item, ordinal) in self.items.iter_mut().zip(ordinals) {
            item.build_path();
            let order = ordinal.and_then(|ordinal| {
                let (start, end) = item.cached_endpoints()?;
                let x = (start.x + end.x) * 0.5;
                Some(OrderData {
                    ordinal,
                    label_point: item.label_point_at_x(x),
                })
            });
            item.set_order(order);
        }
    }

    pub fn clear_order_badges(&mut self) {
        for item in &mut self.items {
            item.set_order(None);
        }
    }

    /// Items whose painted area touches `view`.
    pub fn visible_items(&self, view: Rect) -> Vec<usize> {
        self.paint_order()
            .into_iter()
            .filter(|&index| self.items[index].painted_bounds().intersects(&view))
            .collect()
    }

    pub fn paint(&mut self, painter: &mut dyn EdgePainter, view: Rect) {
        for item in &mut self.items {
            item.build_path();
        }
        for index in self.visible_items(view) {
            self.items[index].paint(painter);
        }
    }
}
