use crate::demo_scene::DemoScene;
use crate::edge_canvas::EdgeCanvas;
use crate::edge_painter::{EguiEdgePainter, to_color32, to_pos2, to_vec2};
use crate::settings::AppSettings;
use codestory_core::{NodeId, SourceReference};
use codestory_events::{Event, EventBus, EventListener};
use codestory_graph::{EdgeDecoration, EdgeItem, Rect, Vec2};
use eframe::egui::{self, Align2, Color32, FontId, Sense, Stroke, StrokeKind};
use egui::emath::TSTransform;
use std::rc::Rc;

const MAX_LOG_LINES: usize = 50;
const NODE_SIZE: Vec2 = Vec2 { x: 140.0, y: 44.0 };

/// Status-bar text for an event, if it is worth showing.
pub fn describe_event(event: &Event) -> Option<String> {
    match event {
        Event::ShowReference { location } => Some(format!("Show in editor: {}", location)),
        Event::ShowReferenceMissing => Some("Edge has no source location".to_string()),
        Event::EdgeSelected { source, target } => {
            Some(format!("Selected edge {} -> {}", source, target))
        }
        Event::EdgeSelectionCleared => Some("Selection cleared".to_string()),
        Event::StatusUpdate { message } => Some(message.clone()),
        Event::EdgeHovered { .. } | Event::GraphNodeMove { .. } => None,
    }
}

/// Status event reporting how a settings save went.
fn save_status(result: anyhow::Result<()>) -> Event {
    let message = match result {
        Ok(()) => "Settings saved".to_string(),
        Err(e) => {
            tracing::error!("{:#}", e);
            format!("Saving settings failed: {}", e)
        }
    };
    Event::StatusUpdate { message }
}

pub struct EdgeCanvasApp {
    settings: AppSettings,
    event_bus: EventBus,
    scene: Rc<DemoScene>,
    canvas: EdgeCanvas,
    /// Call order per edge, indexed like the canvas items
    ordinals: Vec<Option<i32>>,
    highlight_custom_edges: bool,

    pan: egui::Vec2,
    dragging: Option<NodeId>,

    status_message: String,
    event_log: Vec<String>,
}

impl EdgeCanvasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        let event_bus = EventBus::new();
        let scene = Rc::new(DemoScene::new(event_bus.clone()));
        let mut app = Self {
            canvas: EdgeCanvas::new(event_bus.clone()),
            settings,
            event_bus,
            scene,
            ordinals: Vec::new(),
            highlight_custom_edges: false,
            pan: egui::vec2(40.0, 40.0),
            dragging: None,
            status_message: "Ready".to_string(),
            event_log: Vec::new(),
        };
        app.populate_demo_graph();
        app
    }

    fn populate_demo_graph(&mut self) {
        let nodes = [
            (1, "main", 0.0, 160.0),
            (2, "load_config", 260.0, 20.0),
            (3, "parse_args", 260.0, 160.0),
            (4, "run", 260.0, 300.0),
            (5, "Config::from_file", 540.0, 60.0),
            (6, "render_report", 540.0, 340.0),
        ];
        for (id, label, x, y) in nodes {
            self.scene.add_node(
                NodeId(id),
                label,
                Rect::from_pos_size(Vec2::new(x, y), NODE_SIZE),
            );
        }

        let edges = [
            (1, 2, Some(("src/main.rs", 12)), false, Some(2)),
            (1, 3, Some(("src/main.rs", 10)), false, Some(1)),
            (1, 4, Some(("src/main.rs", 15)), false, Some(3)),
            (2, 5, Some(("src/config.rs", 31)), false, None),
            (4, 6, None, true, None),
            // Back edge: drawn in the reverse color
            (6, 3, Some(("src/report.rs", 88)), false, None),
        ];
        let settings = Rc::new(self.settings.edge.clone());
        for (source, target, reference, custom_edge, ordinal) in edges {
            let decoration = EdgeDecoration {
                reference: reference.map(|(file, line)| SourceReference::new(file, line, 5)),
                custom_edge,
            };
            self.canvas.add_edge(EdgeItem::with_settings(
                self.scene.clone(),
                settings.clone(),
                NodeId(source),
                NodeId(target),
                decoration,
            ));
            self.ordinals.push(ordinal);
        }
        tracing::info!(
            "Demo graph: {} nodes, {} edges",
            self.scene.len(),
            self.canvas.items().len()
        );
    }

    /// Push the side-panel toggles down to the edge items.
    fn apply_decorations(&mut self) {
        let scheme_colors = if self.settings.show_scheme_colors {
            self.settings.scheme_colors.clone()
        } else {
            Vec::new()
        };
        for item in self.canvas.items_mut() {
            item.set_scheme_colors(scheme_colors.clone());
            item.set_candidate(self.highlight_custom_edges && item.is_custom_edge());
        }
        if self.settings.show_order_badges {
            self.canvas.layout_order_badges(&self.ordinals);
        } else {
            self.canvas.clear_order_badges();
        }
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("edge_options").show(ctx, |ui| {
            ui.heading("Edges");
            ui.checkbox(&mut self.settings.show_order_badges, "Call order badges");
            ui.checkbox(&mut self.settings.show_scheme_colors, "Scheme colors");
            ui.checkbox(&mut self.highlight_custom_edges, "Custom edges as candidates");
            if ui.button("Save settings").clicked() {
                self.event_bus.publish(save_status(self.settings.save()));
            }

            ui.separator();
            ui.label("Double-click an edge to show its source location.");
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for line in self.event_log.iter().rev() {
                    ui.label(line);
                }
            });
        });
    }

    fn canvas_panel(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let transform = TSTransform::from_translation(response.rect.min.to_vec2() + self.pan);
        let to_graph = |pos: egui::Pos2| to_vec2(transform.inverse() * pos);

        // Dragging a node moves it, dragging empty space pans
        if response.drag_started() {
            self.dragging = response
                .interact_pointer_pos()
                .and_then(|pos| self.scene.node_at(to_graph(pos)));
        }
        if response.dragged() {
            let delta = response.drag_delta();
            match self.dragging {
                Some(id) => self
                    .scene
                    .move_node(id, to_vec2(delta.to_pos2()) * (1.0 / transform.scaling)),
                None => self.pan += delta,
            }
        }
        if response.drag_stopped() {
            self.dragging = None;
        }

        self.canvas.pointer_moved(response.hover_pos().map(to_graph));
        if let Some(pos) = response.interact_pointer_pos() {
            if response.double_clicked() {
                self.canvas.double_click(to_graph(pos));
            } else if response.clicked() {
                self.canvas.click(to_graph(pos));
            }
        }

        self.apply_decorations();

        let view = transform.inverse() * response.rect;
        let view = Rect::from_min_max(to_vec2(view.min), to_vec2(view.max));
        painter.rect_filled(response.rect, 0.0, Color32::from_gray(245));
        self.canvas
            .paint(&mut EguiEdgePainter::new(&painter, transform), view);

        // Nodes go on top of the edges
        let border = to_color32(self.settings.edge.palette.forward.with_alpha(255));
        for (_, node) in self.scene.nodes() {
            let rect = transform
                * egui::Rect::from_min_max(to_pos2(node.rect.min), to_pos2(node.rect.max));
            painter.rect_filled(rect, 4.0, Color32::WHITE);
            painter.rect_stroke(
                rect,
                4.0,
                Stroke::new(1.0, border),
                StrokeKind::Inside,
            );
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                &node.label,
                FontId::monospace(13.0 * transform.scaling),
                Color32::from_gray(40),
            );
        }
    }
}

impl EventListener for EdgeCanvasApp {
    fn handle_event(&mut self, event: &Event) {
        tracing::debug!("Event: {:?}", event);
        if let Some(message) = describe_event(event) {
            self.event_log.push(message.clone());
            if self.event_log.len() > MAX_LOG_LINES {
                self.event_log.remove(0);
            }
            self.status_message = message;
        }
    }
}

impl eframe::App for EdgeCanvasApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.settings.save() {
            tracing::error!("{:#}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let bus = self.event_bus.clone();
        bus.dispatch_to(self);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status_message);
        });
        self.side_panel(ctx);
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.canvas_panel(ui));
    }
}
