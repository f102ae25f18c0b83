use shared::domain::{CaseRecord, DecisionChain, GenerationResult, Level, MediationBridge};

use crate::layout::{self, Point, Rect, SlotKind, CANVAS_HEIGHT, CANVAS_WIDTH};

pub const MAP_TITLE: &str = "Sense Circulation Map (SCM)";
pub const BASELINE_NOTE: &str =
    "This is the initial baseline; no previous interventions are recorded.";
pub const LEGEND_ENTRIES: [&str; 3] = [
    "Solid arrow: sense flow",
    "Dashed arrow (red): friction/tension",
    "<<PMx>>: Mediation Bridge",
];

#[derive(Debug, Clone, PartialEq)]
pub struct RenderTree {
    pub summary: CycleSummary,
    pub hypotheses: Option<HypothesisSection>,
    pub map: SenseMap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    pub title: String,
    pub previous_description: Option<String>,
    pub baseline_note: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypothesisSection {
    pub change_hypothesis: String,
    pub null_hypothesis: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SenseMap {
    pub width: f32,
    pub height: f32,
    pub title: &'static str,
    pub lanes: Vec<LaneBox>,
    pub nodes: Vec<MapNode>,
    pub connectors: Vec<Connector>,
    pub friction_labels: Vec<TextLabel>,
    pub decision_panel: DecisionPanel,
    pub legend: Legend,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaneBox {
    pub level: Level,
    pub rect: Rect,
    pub title: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Actor,
    Bridge,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapNode {
    pub level: Level,
    pub kind: NodeKind,
    pub rect: Rect,
    pub title: String,
    /// `<<PMx>>` marker shown above bridge titles.
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorKind {
    SenseFlow,
    Friction,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub kind: ConnectorKind,
    pub from: Point,
    pub to: Point,
}

impl Connector {
    pub fn is_dashed(&self) -> bool {
        self.kind == ConnectorKind::Friction
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub at: Point,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionPanel {
    pub rect: Rect,
    pub title: &'static str,
    pub groups: Vec<DecisionGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionGroup {
    pub level: Level,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub rect: Rect,
    pub title: &'static str,
    pub entries: [&'static str; 3],
    pub indicators_title: String,
    pub indicators: Vec<String>,
}

/// Entries split by level, each group keeping the input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelGroups<T> {
    pub macro_: Vec<T>,
    pub meso: Vec<T>,
    pub micro: Vec<T>,
}

impl<T> LevelGroups<T> {
    pub fn at(&self, level: Level) -> &[T] {
        match level {
            Level::Macro => &self.macro_,
            Level::Meso => &self.meso,
            Level::Micro => &self.micro,
        }
    }
}

pub fn partition_by_level<T>(items: &[T], level_of: impl Fn(&T) -> Level) -> LevelGroups<&T> {
    let mut groups = LevelGroups {
        macro_: Vec::new(),
        meso: Vec::new(),
        micro: Vec::new(),
    };
    for item in items {
        match level_of(item) {
            Level::Macro => groups.macro_.push(item),
            Level::Meso => groups.meso.push(item),
            Level::Micro => groups.micro.push(item),
        }
    }
    groups
}

/// Splits the `;`-separated indicator text, dropping blank segments.
pub fn parse_indicators(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// The map is only worth showing once hypotheses exist for a stated problem.
pub fn map_is_visible(record: &CaseRecord, result: Option<&GenerationResult>) -> bool {
    result.is_some() && !record.hypothesis_q1.is_empty()
}

pub fn project(record: &CaseRecord, result: Option<&GenerationResult>) -> RenderTree {
    RenderTree {
        summary: cycle_summary(record),
        hypotheses: result.map(|result| HypothesisSection {
            change_hypothesis: result.change_hypothesis.clone(),
            null_hypothesis: result.null_hypothesis.clone(),
        }),
        map: sense_map(record),
    }
}

fn cycle_summary(record: &CaseRecord) -> CycleSummary {
    let baseline = record.cycle_stage.is_baseline();
    let previous_description = (!baseline && !record.previous_cycle_description.is_empty())
        .then(|| record.previous_cycle_description.clone());
    CycleSummary {
        title: record.cycle_title(),
        previous_description,
        baseline_note: baseline.then_some(BASELINE_NOTE),
    }
}

fn sense_map(record: &CaseRecord) -> SenseMap {
    let bridges = partition_by_level(&record.pms, |bridge| bridge.level);
    let chains = partition_by_level(&record.cdc, |chain| chain.level);

    let lanes = Level::TOP_DOWN
        .into_iter()
        .map(|level| LaneBox {
            level,
            rect: layout::lane(level),
            title: layout::lane_title(level),
        })
        .collect();

    let mut nodes = Vec::new();
    for level in Level::TOP_DOWN {
        nodes.extend(actor_nodes(record, level));
        nodes.extend(
            bridges
                .at(level)
                .iter()
                .enumerate()
                .map(|(index, bridge)| bridge_node(level, index, bridge)),
        );
    }

    let mut connectors: Vec<Connector> = layout::SENSE_FLOW
        .into_iter()
        .map(|(from, to)| Connector {
            kind: ConnectorKind::SenseFlow,
            from,
            to,
        })
        .collect();
    connectors.extend(record.frictions.iter().filter_map(|friction| {
        let source = record
            .actors
            .micro
            .iter()
            .position(|actor| actor == &friction.from)?;
        Some(Connector {
            kind: ConnectorKind::Friction,
            from: layout::friction_anchor(source),
            to: layout::FRICTION_TARGET,
        })
    }));

    let friction_labels = record
        .frictions
        .iter()
        .zip(layout::FRICTION_LABEL_SLOTS)
        .map(|(friction, at)| TextLabel {
            at,
            text: format!("friction: {}", friction.label),
        })
        .collect();

    let decision_panel = DecisionPanel {
        rect: layout::DECISION_PANEL,
        title: "CDC by level",
        groups: Level::TOP_DOWN
            .into_iter()
            .filter(|level| !chains.at(*level).is_empty())
            .map(|level| DecisionGroup {
                level,
                lines: chains.at(level).iter().map(|chain| chain_line(chain)).collect(),
            })
            .collect(),
    };

    let timespan = if record.timespan.trim().is_empty() {
        "N/A"
    } else {
        record.timespan.as_str()
    };
    let legend = Legend {
        rect: layout::LEGEND,
        title: "LEGEND and INDICATORS",
        entries: LEGEND_ENTRIES,
        indicators_title: format!("Indicators ({timespan})"),
        indicators: parse_indicators(&record.indicators),
    };

    SenseMap {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
        title: MAP_TITLE,
        lanes,
        nodes,
        connectors,
        friction_labels,
        decision_panel,
        legend,
    }
}

fn actor_nodes(record: &CaseRecord, level: Level) -> Vec<MapNode> {
    let actors = record.actors.at(level);
    let titles: Vec<String> = match level {
        Level::Micro => actors.to_vec(),
        Level::Meso => vec![first_or(actors, "Meso actor")],
        Level::Macro => vec![first_or(actors, "Macro actor")],
    };
    titles
        .into_iter()
        .enumerate()
        .map(|(index, title)| MapNode {
            level,
            kind: NodeKind::Actor,
            rect: layout::slot(level, SlotKind::Actor, index),
            title,
            tag: None,
        })
        .collect()
}

fn first_or(actors: &[String], fallback: &str) -> String {
    actors
        .first()
        .filter(|actor| !actor.is_empty())
        .cloned()
        .unwrap_or_else(|| fallback.to_string())
}

fn bridge_node(level: Level, index: usize, bridge: &MediationBridge) -> MapNode {
    let marker = if bridge.description.is_empty() {
        "PM"
    } else {
        bridge.description.as_str()
    };
    MapNode {
        level,
        kind: NodeKind::Bridge,
        rect: layout::slot(level, SlotKind::Bridge, index),
        title: bridge.name.clone(),
        tag: Some(format!("<<{marker}>>")),
    }
}

fn chain_line(chain: &DecisionChain) -> String {
    format!(
        "D: {}, S: {}, D: {}, E: {}.",
        chain.data, chain.sense, chain.decision, chain.effect
    )
}

#[cfg(test)]
#[path = "tests/project_tests.rs"]
mod tests;
