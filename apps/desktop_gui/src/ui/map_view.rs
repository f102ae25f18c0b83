//! Paints a projected [`SenseMap`] with the egui painter. Canvas coordinates map 1:1 onto
//! the allocated rect.

use eframe::egui::{self, Align2, Color32, CornerRadius, FontId, Pos2, Stroke, StrokeKind};
use sense_map::{
    layout::{Point, Rect},
    project::{Connector, MapNode, TextLabel},
    NodeKind, SenseMap,
};

const CANVAS_FILL: Color32 = Color32::from_rgb(0xfa, 0xfa, 0xfa);
const LANE_STROKE: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);
const TEXT: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);
const MUTED_TEXT: Color32 = Color32::from_rgb(0x4b, 0x55, 0x63);
const ACTOR_FILL: Color32 = Color32::WHITE;
const BRIDGE_FILL: Color32 = Color32::from_rgb(0xdb, 0xea, 0xfe);
const BRIDGE_STROKE: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);
const FLOW_STROKE: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);
const FRICTION_STROKE: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
const PANEL_FILL: Color32 = Color32::from_rgb(0xfe, 0xf9, 0xc3);
const PANEL_STROKE: Color32 = Color32::from_rgb(0xca, 0x8a, 0x04);

struct Canvas {
    painter: egui::Painter,
    origin: Pos2,
}

impl Canvas {
    fn pos(&self, point: Point) -> Pos2 {
        self.origin + egui::vec2(point.x, point.y)
    }

    fn rect(&self, rect: Rect) -> egui::Rect {
        egui::Rect::from_min_size(
            self.pos(Point::new(rect.x, rect.y)),
            egui::vec2(rect.width, rect.height),
        )
    }

    fn boxed(&self, rect: egui::Rect, fill: Color32, stroke: Stroke) {
        self.painter.rect_filled(rect, CornerRadius::same(4), fill);
        self.painter
            .rect_stroke(rect, CornerRadius::same(4), stroke, StrokeKind::Middle);
    }

    /// Wrapped text with its top-left corner at `pos`; returns the laid-out height.
    fn wrapped(&self, pos: Pos2, text: &str, size: f32, color: Color32, width: f32) -> f32 {
        let galley = self
            .painter
            .layout(text.to_string(), FontId::proportional(size), color, width);
        let height = galley.size().y;
        self.painter.galley(pos, galley, color);
        height
    }
}

pub fn show_sense_map(ui: &mut egui::Ui, map: &SenseMap) {
    ui.heading(map.title);
    egui::ScrollArea::horizontal()
        .id_salt("sense_map_scroll")
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(egui::vec2(map.width, map.height), egui::Sense::hover());
            let canvas = Canvas {
                painter,
                origin: response.rect.min,
            };
            paint(&canvas, map);
        });
}

fn paint(canvas: &Canvas, map: &SenseMap) {
    let painter = &canvas.painter;
    painter.rect_filled(
        canvas.rect(Rect::new(0.0, 0.0, map.width, map.height)),
        CornerRadius::same(8),
        CANVAS_FILL,
    );

    for lane in &map.lanes {
        let rect = canvas.rect(lane.rect);
        painter.rect_stroke(
            rect,
            CornerRadius::same(8),
            Stroke::new(2.0, LANE_STROKE),
            StrokeKind::Inside,
        );
        painter.text(
            rect.center_top() + egui::vec2(0.0, 12.0),
            Align2::CENTER_CENTER,
            lane.title,
            FontId::proportional(13.0),
            MUTED_TEXT,
        );
    }

    for connector in &map.connectors {
        paint_connector(canvas, connector);
    }

    for node in &map.nodes {
        paint_node(canvas, node);
    }

    for label in &map.friction_labels {
        paint_friction_label(canvas, label);
    }

    let panel = &map.decision_panel;
    let panel_rect = canvas.rect(panel.rect);
    canvas.boxed(panel_rect, PANEL_FILL, Stroke::new(1.0, PANEL_STROKE));
    let inner_width = panel_rect.width() - 16.0;
    let mut cursor = panel_rect.left_top() + egui::vec2(8.0, 8.0);
    cursor.y += canvas.wrapped(cursor, panel.title, 14.0, TEXT, inner_width) + 6.0;
    for group in &panel.groups {
        cursor.y += canvas.wrapped(cursor, group.level.label(), 12.0, TEXT, inner_width) + 2.0;
        for line in &group.lines {
            cursor.y += canvas.wrapped(cursor, line, 11.0, MUTED_TEXT, inner_width) + 2.0;
        }
        cursor.y += 4.0;
    }

    let legend = &map.legend;
    let legend_rect = canvas.rect(legend.rect);
    canvas.boxed(legend_rect, Color32::WHITE, Stroke::new(1.0, LANE_STROKE));
    let column_width = legend_rect.width() / 2.0 - 16.0;
    let mut left = legend_rect.left_top() + egui::vec2(8.0, 8.0);
    left.y += canvas.wrapped(left, legend.title, 14.0, TEXT, column_width) + 6.0;
    for entry in legend.entries {
        left.y += canvas.wrapped(left, entry, 12.0, MUTED_TEXT, column_width) + 2.0;
    }
    let mut right = legend_rect.center_top() + egui::vec2(8.0, 8.0);
    right.y += canvas.wrapped(right, &legend.indicators_title, 13.0, TEXT, column_width) + 4.0;
    for indicator in &legend.indicators {
        let line = format!("- {indicator}");
        right.y += canvas.wrapped(right, &line, 12.0, MUTED_TEXT, column_width) + 2.0;
    }
}

fn paint_node(canvas: &Canvas, node: &MapNode) {
    let rect = canvas.rect(node.rect);
    let (fill, stroke) = match node.kind {
        NodeKind::Actor => (ACTOR_FILL, Stroke::new(1.0, FLOW_STROKE)),
        NodeKind::Bridge => (BRIDGE_FILL, Stroke::new(1.5, BRIDGE_STROKE)),
    };
    canvas.boxed(rect, fill, stroke);

    let width = rect.width() - 8.0;
    let title = canvas.painter.layout(
        node.title.clone(),
        FontId::proportional(12.0),
        TEXT,
        width,
    );
    match &node.tag {
        Some(tag) => {
            let tag = canvas.painter.layout(
                tag.clone(),
                FontId::proportional(11.0),
                BRIDGE_STROKE,
                width,
            );
            let total = tag.size().y + title.size().y;
            let top = rect.center().y - total / 2.0;
            let tag_pos = Pos2::new(rect.center().x - tag.size().x / 2.0, top);
            let title_pos = Pos2::new(rect.center().x - title.size().x / 2.0, top + tag.size().y);
            canvas.painter.galley(tag_pos, tag, BRIDGE_STROKE);
            canvas.painter.galley(title_pos, title, TEXT);
        }
        None => {
            let pos = rect.center() - title.size() / 2.0;
            canvas.painter.galley(pos, title, TEXT);
        }
    }
}

fn paint_connector(canvas: &Canvas, connector: &Connector) {
    let from = canvas.pos(connector.from);
    let to = canvas.pos(connector.to);
    let stroke = if connector.is_dashed() {
        Stroke::new(1.5, FRICTION_STROKE)
    } else {
        Stroke::new(2.0, FLOW_STROKE)
    };

    if connector.is_dashed() {
        canvas
            .painter
            .extend(egui::Shape::dashed_line(&[from, to], stroke, 6.0, 4.0));
    } else {
        canvas.painter.line_segment([from, to], stroke);
    }
    paint_arrow_head(&canvas.painter, from, to, stroke);
}

fn paint_arrow_head(painter: &egui::Painter, from: Pos2, to: Pos2, stroke: Stroke) {
    let direction = (to - from).normalized();
    if !direction.x.is_finite() || !direction.y.is_finite() {
        return;
    }
    let back = -direction * 10.0;
    let side = direction.rot90() * 5.0;
    painter.line_segment([to, to + back + side], stroke);
    painter.line_segment([to, to + back - side], stroke);
}

fn paint_friction_label(canvas: &Canvas, label: &TextLabel) {
    let pos = canvas.pos(label.at);
    let galley = canvas.painter.layout_no_wrap(
        label.text.clone(),
        FontId::proportional(11.0),
        FRICTION_STROKE,
    );
    let rect = egui::Rect::from_center_size(pos, galley.size()).expand(3.0);
    canvas.painter.rect_filled(rect, CornerRadius::same(3), Color32::WHITE);
    canvas
        .painter
        .galley(rect.min + egui::vec2(3.0, 3.0), galley, FRICTION_STROKE);
}
