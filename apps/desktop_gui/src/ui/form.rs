//! Case form. Widgets read the current record and emit [`CaseEdit`]s; nothing here mutates
//! the record directly.

use std::hash::Hash;

use client_core::{BridgeField, CaseEdit, CaseStore, ChainField, FieldEdit, ListName};
use eframe::egui;
use shared::domain::{
    CaseRecord, CycleStage, DecisionChain, HypothesisQuestion, Level, MediationBridge,
};

const LEVELS: [Level; 3] = [Level::Micro, Level::Meso, Level::Macro];

fn stage_combo(ui: &mut egui::Ui, id_salt: impl Hash, current: CycleStage) -> Option<CycleStage> {
    let mut selected = current;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(current.to_string())
        .show_ui(ui, |ui| {
            for option in CycleStage::options() {
                ui.selectable_value(&mut selected, option, option.to_string());
            }
        });
    (selected != current).then_some(selected)
}

fn level_combo(ui: &mut egui::Ui, id_salt: impl Hash, current: Level) -> Option<Level> {
    let mut selected = current;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(current.label())
        .width(80.0)
        .show_ui(ui, |ui| {
            for option in LEVELS {
                ui.selectable_value(&mut selected, option, option.label());
            }
        });
    (selected != current).then_some(selected)
}

fn text_field(
    ui: &mut egui::Ui,
    current: &str,
    hint: &str,
    multiline: bool,
    enabled: bool,
) -> Option<String> {
    let mut value = current.to_string();
    let edit = if multiline {
        egui::TextEdit::multiline(&mut value).desired_rows(3)
    } else {
        egui::TextEdit::singleline(&mut value)
    };
    let response = ui.add_enabled(
        enabled,
        edit.hint_text(hint).desired_width(f32::INFINITY),
    );
    response.changed().then_some(value)
}

fn section_title(ui: &mut egui::Ui, title: &str) {
    ui.add_space(8.0);
    ui.label(egui::RichText::new(title).strong());
}

pub fn show_case_form(ui: &mut egui::Ui, store: &CaseStore, hints: &CaseRecord) -> Vec<CaseEdit> {
    let record = store.get();
    let mut edits = Vec::new();

    ui.heading("1. Enter the case data");
    ui.label("Fill in the fields below. The greyed-out hints come from the school case example.");

    section_title(ui, "Stage");
    ui.horizontal(|ui| {
        if let Some(stage) = stage_combo(ui, "cycle_stage", record.cycle_stage) {
            edits.push(CaseEdit::SetField(FieldEdit::CycleStage(stage)));
        }
        if record.cycle_stage.is_other() {
            if let Some(value) =
                text_field(ui, &record.custom_cycle_stage, "e.g. Final closing", false, true)
            {
                edits.push(CaseEdit::SetField(FieldEdit::CustomCycleStage(value)));
            }
        }
    });

    section_title(ui, "Description of the previous stage");
    if let Some(value) = text_field(
        ui,
        &record.previous_cycle_description,
        &hints.previous_cycle_description,
        true,
        !record.cycle_stage.is_baseline(),
    ) {
        edits.push(CaseEdit::SetField(FieldEdit::PreviousCycleDescription(value)));
    }

    ui.add_space(8.0);
    ui.group(|ui| {
        ui.label(egui::RichText::new("Change hypothesis questions").strong());
        for question in HypothesisQuestion::ALL {
            ui.label(question.prompt());
            if let Some(value) = text_field(
                ui,
                record.answer(question),
                hints.answer(question),
                question.is_long_form(),
                true,
            ) {
                edits.push(CaseEdit::SetField(FieldEdit::Answer(question, value)));
            }
        }
    });

    ui.add_space(8.0);
    ui.group(|ui| {
        list_header(ui, "Mediation Bridges (PM) in this stage", ListName::Pms, &mut edits);
        let removable = store.can_remove(ListName::Pms);
        for (index, bridge) in record.pms.iter().enumerate() {
            ui.separator();
            ui.push_id(bridge.id.as_str(), |ui| {
                bridge_row(ui, bridge, hints.pms.get(index), removable, &mut edits);
            });
        }
    });

    ui.add_space(8.0);
    ui.group(|ui| {
        list_header(ui, "Cognosystemic Decision Chains (CDC) in this stage", ListName::Cdc, &mut edits);
        let removable = store.can_remove(ListName::Cdc);
        for (index, chain) in record.cdc.iter().enumerate() {
            ui.separator();
            ui.push_id(chain.id.as_str(), |ui| {
                chain_row(ui, chain, hints.cdc.get(index), removable, &mut edits);
            });
        }
    });

    section_title(ui, "Indicators and targets (separated by ;)");
    if let Some(value) = text_field(ui, &record.indicators, &hints.indicators, true, true) {
        edits.push(CaseEdit::SetField(FieldEdit::Indicators(value)));
    }

    section_title(ui, "Observation period");
    if let Some(value) = text_field(ui, &record.timespan, &hints.timespan, false, true) {
        edits.push(CaseEdit::SetField(FieldEdit::Timespan(value)));
    }

    edits
}

fn list_header(ui: &mut egui::Ui, title: &str, list: ListName, edits: &mut Vec<CaseEdit>) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(title).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("+").on_hover_text("Add entry").clicked() {
                edits.push(CaseEdit::AppendItem(list));
            }
        });
    });
}

fn bridge_row(
    ui: &mut egui::Ui,
    bridge: &MediationBridge,
    hint: Option<&MediationBridge>,
    removable: bool,
    edits: &mut Vec<CaseEdit>,
) {
    let mut set = |field: BridgeField| {
        edits.push(CaseEdit::SetBridgeField {
            id: bridge.id.clone(),
            field,
        });
    };

    ui.horizontal(|ui| {
        ui.label("Level");
        if let Some(level) = level_combo(ui, "level", bridge.level) {
            set(BridgeField::Level(level));
        }
        ui.label("Stage");
        if let Some(stage) = stage_combo(ui, "stage", bridge.stage) {
            set(BridgeField::Stage(stage));
        }
    });
    ui.label("PM label (e.g. PM1)");
    let tag_hint = hint.map_or("...", |h| h.description.as_str());
    if let Some(value) = text_field(ui, &bridge.description, tag_hint, false, true) {
        set(BridgeField::Description(value));
    }
    ui.label("Description");
    let name_hint = hint.map_or("...", |h| h.name.as_str());
    if let Some(value) = text_field(ui, &bridge.name, name_hint, false, true) {
        set(BridgeField::Name(value));
    }
    if removable && ui.small_button("Remove").clicked() {
        edits.push(CaseEdit::RemoveItem {
            list: ListName::Pms,
            id: bridge.id.clone(),
        });
    }
}

fn chain_row(
    ui: &mut egui::Ui,
    chain: &DecisionChain,
    hint: Option<&DecisionChain>,
    removable: bool,
    edits: &mut Vec<CaseEdit>,
) {
    let mut fields = Vec::new();

    ui.horizontal(|ui| {
        ui.label("Level");
        if let Some(level) = level_combo(ui, "level", chain.level) {
            fields.push(ChainField::Level(level));
        }
        ui.label("Stage");
        if let Some(stage) = stage_combo(ui, "stage", chain.stage) {
            fields.push(ChainField::Stage(stage));
        }
    });

    let hinted = |label: &str, example: Option<&str>| {
        format!("{label} ({})", example.filter(|e| !e.is_empty()).unwrap_or("..."))
    };
    let columns: [(&str, &str, Option<&str>, fn(String) -> ChainField); 4] = [
        ("Data", &chain.data, hint.map(|h| h.data.as_str()), ChainField::Data),
        ("Sense", &chain.sense, hint.map(|h| h.sense.as_str()), ChainField::Sense),
        ("Decision", &chain.decision, hint.map(|h| h.decision.as_str()), ChainField::Decision),
        ("Effect", &chain.effect, hint.map(|h| h.effect.as_str()), ChainField::Effect),
    ];
    ui.columns(columns.len(), |cols| {
        for (col, (label, current, example, make)) in cols.iter_mut().zip(columns) {
            if let Some(value) = text_field(col, current, &hinted(label, example), false, true) {
                fields.push(make(value));
            }
        }
    });

    edits.extend(fields.into_iter().map(|field| CaseEdit::SetChainField {
        id: chain.id.clone(),
        field,
    }));
    if removable && ui.small_button("Remove").clicked() {
        edits.push(CaseEdit::RemoveItem {
            list: ListName::Cdc,
            id: chain.id.clone(),
        });
    }
}
