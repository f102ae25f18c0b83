use super::*;
use shared::domain::{CycleStage, EntryId, Friction};

fn bridge(id: &str, level: Level) -> MediationBridge {
    MediationBridge {
        id: EntryId::from(id),
        level,
        stage: CycleStage::Baseline,
        name: format!("name {id}"),
        description: id.to_uppercase(),
    }
}

fn chain(id: &str, level: Level) -> DecisionChain {
    DecisionChain {
        id: EntryId::from(id),
        level,
        stage: CycleStage::Baseline,
        data: format!("data {id}"),
        sense: "s".to_string(),
        decision: "d".to_string(),
        effect: "e".to_string(),
    }
}

fn ids<'a>(items: &[&'a MediationBridge]) -> Vec<&'a str> {
    items.iter().map(|item| item.id.as_str()).collect()
}

#[test]
fn partition_keeps_relative_order_within_each_level() {
    let pms = vec![
        bridge("a", Level::Micro),
        bridge("b", Level::Macro),
        bridge("c", Level::Micro),
        bridge("d", Level::Meso),
        bridge("e", Level::Macro),
        bridge("f", Level::Micro),
    ];
    let groups = partition_by_level(&pms, |item| item.level);
    assert_eq!(ids(&groups.macro_), vec!["b", "e"]);
    assert_eq!(ids(&groups.meso), vec!["d"]);
    assert_eq!(ids(&groups.micro), vec!["a", "c", "f"]);
}

#[test]
fn bridge_nodes_fill_level_slots_in_input_order() {
    let mut record = CaseRecord::default();
    record.pms = vec![
        bridge("pm1", Level::Micro),
        bridge("pm2", Level::Meso),
        bridge("pm3", Level::Micro),
    ];
    let tree = project(&record, None);
    let micro: Vec<&MapNode> = tree
        .map
        .nodes
        .iter()
        .filter(|node| node.kind == NodeKind::Bridge && node.level == Level::Micro)
        .collect();

    assert_eq!(micro.len(), 2);
    assert_eq!(micro[0].title, "name pm1");
    assert_eq!(micro[0].tag.as_deref(), Some("<<PM1>>"));
    assert_eq!(micro[0].rect, layout::slot(Level::Micro, SlotKind::Bridge, 0));
    assert_eq!(micro[1].title, "name pm3");
    assert_eq!(micro[1].rect, layout::slot(Level::Micro, SlotKind::Bridge, 1));
}

#[test]
fn bridge_without_description_is_tagged_pm() {
    let mut record = CaseRecord::default();
    record.pms[0].description.clear();
    let tree = project(&record, None);
    let node = tree
        .map
        .nodes
        .iter()
        .find(|node| node.kind == NodeKind::Bridge)
        .expect("bridge node");
    assert_eq!(node.tag.as_deref(), Some("<<PM>>"));
}

#[test]
fn crowded_levels_keep_fixed_slots_instead_of_reflowing() {
    let mut record = CaseRecord::default();
    record.pms = (0..8).map(|i| bridge(&format!("pm{i}"), Level::Macro)).collect();
    let tree = project(&record, None);
    let last = tree
        .map
        .nodes
        .iter()
        .filter(|node| node.kind == NodeKind::Bridge)
        .last()
        .expect("bridge");
    assert_eq!(last.rect, layout::slot(Level::Macro, SlotKind::Bridge, 7));
    assert!(last.rect.x + last.rect.width > tree.map.width);
}

#[test]
fn only_first_macro_and_meso_actors_are_drawn_with_fallbacks() {
    let mut record = CaseRecord::default();
    record.actors.meso.push("Second leadership body".to_string());
    record.actors.macro_.clear();
    let tree = project(&record, None);
    let titles = |level: Level| -> Vec<String> {
        tree.map
            .nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Actor && node.level == level)
            .map(|node| node.title.clone())
            .collect()
    };
    assert_eq!(titles(Level::Macro), vec!["Macro actor".to_string()]);
    assert_eq!(titles(Level::Meso), vec!["Leadership Team".to_string()]);
    assert_eq!(titles(Level::Micro).len(), 3);
}

#[test]
fn connectors_cover_sense_flow_and_every_friction() {
    let record = CaseRecord::default();
    let tree = project(&record, None);
    let frictions: Vec<&Connector> = tree
        .map
        .connectors
        .iter()
        .filter(|connector| connector.kind == ConnectorKind::Friction)
        .collect();
    let flows = tree.map.connectors.len() - frictions.len();

    assert_eq!(flows, layout::SENSE_FLOW.len());
    assert_eq!(frictions.len(), 3);
    for (index, connector) in frictions.iter().enumerate() {
        assert!(connector.is_dashed());
        assert_eq!(connector.from, layout::friction_anchor(index));
        assert_eq!(connector.to, layout::FRICTION_TARGET);
    }
}

#[test]
fn friction_from_an_unknown_actor_gets_no_connector_but_keeps_its_label() {
    let mut record = CaseRecord::default();
    record.frictions[1] = Friction {
        from: "Someone else".to_string(),
        to: "Leadership Team".to_string(),
        label: "noise".to_string(),
    };
    let tree = project(&record, None);
    let friction_count = tree
        .map
        .connectors
        .iter()
        .filter(|connector| connector.kind == ConnectorKind::Friction)
        .count();
    assert_eq!(friction_count, 2);
    assert_eq!(tree.map.friction_labels[1].text, "friction: noise");
    assert_eq!(tree.map.friction_labels[1].at, layout::FRICTION_LABEL_SLOTS[1]);
}

#[test]
fn decision_panel_groups_top_down_and_skips_empty_levels() {
    let mut record = CaseRecord::default();
    record.cdc = vec![
        chain("1", Level::Micro),
        chain("2", Level::Macro),
        chain("3", Level::Micro),
    ];
    let tree = project(&record, None);
    let groups = &tree.map.decision_panel.groups;
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].level, Level::Macro);
    assert_eq!(groups[1].level, Level::Micro);
    assert_eq!(
        groups[1].lines,
        vec![
            "D: data 1, S: s, D: d, E: e.".to_string(),
            "D: data 3, S: s, D: d, E: e.".to_string(),
        ]
    );
}

#[test]
fn indicators_split_on_semicolons_and_drop_blanks() {
    assert_eq!(
        parse_indicators("a≥1; ;b≥2"),
        vec!["a≥1".to_string(), "b≥2".to_string()]
    );
    assert!(parse_indicators("").is_empty());
    assert!(parse_indicators(" ; ;").is_empty());
}

#[test]
fn legend_falls_back_to_na_without_timespan() {
    let mut record = CaseRecord::default();
    record.indicators = "a≥1; ;b≥2".to_string();
    let tree = project(&record, None);
    assert_eq!(tree.map.legend.indicators_title, "Indicators (N/A)");
    assert_eq!(tree.map.legend.indicators.len(), 2);

    record.timespan = "4-6 weeks".to_string();
    let tree = project(&record, None);
    assert_eq!(tree.map.legend.indicators_title, "Indicators (4-6 weeks)");
}

#[test]
fn summary_describes_baseline_and_later_cycles() {
    let record = CaseRecord::default();
    let summary = project(&record, None).summary;
    assert_eq!(summary.title, "Baseline");
    assert_eq!(summary.baseline_note, Some(BASELINE_NOTE));
    assert_eq!(summary.previous_description, None);

    let mut record = CaseRecord::default();
    record.cycle_stage = CycleStage::Other;
    record.custom_cycle_stage = "Closing".to_string();
    record.previous_cycle_description = "Attendance rose".to_string();
    let summary = project(&record, None).summary;
    assert_eq!(summary.title, "Closing");
    assert_eq!(summary.baseline_note, None);
    assert_eq!(summary.previous_description.as_deref(), Some("Attendance rose"));
}

#[test]
fn hypotheses_section_mirrors_the_result() {
    let record = CaseRecord::school_example();
    assert!(project(&record, None).hypotheses.is_none());

    let result = GenerationResult {
        change_hypothesis: "H".to_string(),
        null_hypothesis: "N".to_string(),
    };
    let tree = project(&record, Some(&result));
    let section = tree.hypotheses.expect("section");
    assert_eq!(section.change_hypothesis, "H");
    assert_eq!(section.null_hypothesis, "N");
}

#[test]
fn map_needs_a_result_and_a_stated_problem() {
    let result = GenerationResult {
        change_hypothesis: "H".to_string(),
        null_hypothesis: "N".to_string(),
    };
    let mut record = CaseRecord::default();
    assert!(!map_is_visible(&record, Some(&result)));
    record.hypothesis_q1 = "Meetings run over".to_string();
    assert!(!map_is_visible(&record, None));
    assert!(map_is_visible(&record, Some(&result)));
}

#[test]
fn any_non_empty_problem_answer_shows_the_map() {
    let result = GenerationResult {
        change_hypothesis: "H".to_string(),
        null_hypothesis: "N".to_string(),
    };
    let mut record = CaseRecord::default();
    record.hypothesis_q1 = " ".to_string();
    assert!(map_is_visible(&record, Some(&result)));
}
