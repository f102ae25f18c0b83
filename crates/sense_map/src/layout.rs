//! Fixed coordinates of the Sense Circulation Map.
//!
//! Every position is looked up from `(level, slot kind, slot index)`; nothing here depends
//! on how many entries a case has. Rows do not reflow, so long rows run past the canvas.

use shared::domain::Level;

pub const CANVAS_WIDTH: f32 = 800.0;
pub const CANVAS_HEIGHT: f32 = 750.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Actor,
    Bridge,
}

/// One horizontal row of equally sized slots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSpec {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    pub step: f32,
}

impl RowSpec {
    pub fn slot(&self, index: usize) -> Rect {
        Rect::new(
            self.origin.x + self.step * index as f32,
            self.origin.y,
            self.width,
            self.height,
        )
    }
}

const fn row(x: f32, y: f32, width: f32, height: f32, step: f32) -> RowSpec {
    RowSpec {
        origin: Point::new(x, y),
        width,
        height,
        step,
    }
}

pub fn lane(level: Level) -> Rect {
    match level {
        Level::Macro => Rect::new(16.0, 16.0, 768.0, 120.0),
        Level::Meso => Rect::new(16.0, 160.0, 768.0, 200.0),
        Level::Micro => Rect::new(16.0, 390.0, 768.0, 120.0),
    }
}

pub fn lane_title(level: Level) -> &'static str {
    match level {
        Level::Macro => "MACRO (norms)",
        Level::Meso => "MESO (devices and institutions)",
        Level::Micro => "MICRO (interactions)",
    }
}

pub fn row_spec(level: Level, kind: SlotKind) -> RowSpec {
    match (level, kind) {
        (Level::Macro, SlotKind::Actor) => row(96.0, 48.0, 208.0, 48.0, 224.0),
        (Level::Macro, SlotKind::Bridge) => row(336.0, 64.0, 128.0, 56.0, 144.0),
        (Level::Meso, SlotKind::Actor) => row(128.0, 230.0, 144.0, 48.0, 160.0),
        (Level::Meso, SlotKind::Bridge) => row(368.0, 210.0, 128.0, 56.0, 144.0),
        (Level::Micro, SlotKind::Actor) => row(176.0, 452.0, 128.0, 48.0, 160.0),
        (Level::Micro, SlotKind::Bridge) => row(336.0, 396.0, 128.0, 52.0, 144.0),
    }
}

/// Slot rectangle for the `index`-th node of `kind` at `level`.
pub fn slot(level: Level, kind: SlotKind, index: usize) -> Rect {
    row_spec(level, kind).slot(index)
}

/// Sense-flow arrows: norm to institution, institution to interaction, interaction back.
pub const SENSE_FLOW: [(Point, Point); 3] = [
    (Point::new(200.0, 80.0), Point::new(200.0, 230.0)),
    (Point::new(200.0, 260.0), Point::new(400.0, 396.0)),
    (Point::new(400.0, 470.0), Point::new(200.0, 260.0)),
];

/// Every friction arrow ends at the first meso actor.
pub const FRICTION_TARGET: Point = Point::new(200.0, 260.0);

/// Start of the friction arrow drawn from the `index`-th micro actor.
pub fn friction_anchor(micro_index: usize) -> Point {
    let actor = slot(Level::Micro, SlotKind::Actor, micro_index);
    Point::new(actor.center().x, actor.y)
}

pub const FRICTION_LABEL_SLOTS: [Point; 3] = [
    Point::new(240.0, 350.0),
    Point::new(330.0, 350.0),
    Point::new(420.0, 350.0),
];

pub const DECISION_PANEL: Rect = Rect::new(488.0, 48.0, 280.0, 300.0);
pub const LEGEND: Rect = Rect::new(48.0, 540.0, 704.0, 194.0);

#[cfg(test)]
mod tests {
    use super::*;

    fn right(rect: Rect) -> f32 {
        rect.x + rect.width
    }

    fn bottom(rect: Rect) -> f32 {
        rect.y + rect.height
    }

    #[test]
    fn lanes_stack_top_down_without_overlap() {
        let macro_lane = lane(Level::Macro);
        let meso_lane = lane(Level::Meso);
        let micro_lane = lane(Level::Micro);
        assert!(bottom(macro_lane) < meso_lane.y);
        assert!(bottom(meso_lane) < micro_lane.y);
        assert!(bottom(micro_lane) < LEGEND.y);
        assert!(bottom(LEGEND) <= CANVAS_HEIGHT);
    }

    #[test]
    fn slots_advance_by_a_fixed_step_per_index() {
        for level in Level::TOP_DOWN {
            for kind in [SlotKind::Actor, SlotKind::Bridge] {
                let spec = row_spec(level, kind);
                let first = slot(level, kind, 0);
                let fifth = slot(level, kind, 4);
                assert_eq!(first.x, spec.origin.x);
                assert_eq!(fifth.x, spec.origin.x + 4.0 * spec.step);
                assert_eq!(first.y, fifth.y);
                assert!(spec.step >= spec.width, "{level} {kind:?} slots overlap");
            }
        }
    }

    #[test]
    fn first_slots_sit_inside_their_lane() {
        for level in Level::TOP_DOWN {
            let lane = lane(level);
            for kind in [SlotKind::Actor, SlotKind::Bridge] {
                let first = slot(level, kind, 0);
                assert!(first.y >= lane.y && bottom(first) <= bottom(lane), "{level} {kind:?}");
                assert!(first.x >= lane.x && right(first) <= right(lane), "{level} {kind:?}");
            }
        }
    }

    #[test]
    fn micro_bridges_do_not_cover_micro_actors() {
        let bridge = slot(Level::Micro, SlotKind::Bridge, 0);
        let actor = slot(Level::Micro, SlotKind::Actor, 0);
        assert!(bottom(bridge) < actor.y);
    }

    #[test]
    fn friction_anchors_follow_the_three_micro_actor_slots() {
        assert_eq!(friction_anchor(0), Point::new(240.0, 452.0));
        assert_eq!(friction_anchor(1), Point::new(400.0, 452.0));
        assert_eq!(friction_anchor(2), Point::new(560.0, 452.0));
    }
}
