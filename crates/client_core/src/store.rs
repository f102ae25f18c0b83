//! Case data store: the single mutation surface over one [`CaseRecord`].

use shared::domain::{
    CaseRecord, CycleStage, DecisionChain, EntryId, HypothesisQuestion, Level, MediationBridge,
};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListName {
    Pms,
    Cdc,
}

impl ListName {
    pub fn as_str(self) -> &'static str {
        match self {
            ListName::Pms => "pms",
            ListName::Cdc => "cdc",
        }
    }
}

/// Top-level scalar field writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    CycleStage(CycleStage),
    CustomCycleStage(String),
    PreviousCycleDescription(String),
    Answer(HypothesisQuestion, String),
    Indicators(String),
    Timespan(String),
}

impl FieldEdit {
    fn name(&self) -> &'static str {
        match self {
            FieldEdit::CycleStage(_) => "cycleStage",
            FieldEdit::CustomCycleStage(_) => "customCycleStage",
            FieldEdit::PreviousCycleDescription(_) => "previousCycleDescription",
            FieldEdit::Answer(question, _) => question.field_name(),
            FieldEdit::Indicators(_) => "indicators",
            FieldEdit::Timespan(_) => "timespan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeField {
    Level(Level),
    Stage(CycleStage),
    Name(String),
    Description(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainField {
    Level(Level),
    Stage(CycleStage),
    Data(String),
    Sense(String),
    Decision(String),
    Effect(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseEdit {
    SetField(FieldEdit),
    SetBridgeField { id: EntryId, field: BridgeField },
    SetChainField { id: EntryId, field: ChainField },
    AppendItem(ListName),
    RemoveItem { list: ListName, id: EntryId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Changed,
    Unchanged,
}

impl Applied {
    fn from_changed(changed: bool) -> Self {
        if changed {
            Applied::Changed
        } else {
            Applied::Unchanged
        }
    }
}

fn replace(slot: &mut String, value: String) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn replace_copy<T: PartialEq + Copy>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[derive(Debug, Clone, Default)]
pub struct CaseStore {
    record: CaseRecord,
}

impl CaseStore {
    pub fn new(record: CaseRecord) -> Self {
        let mut store = Self { record };
        store.enforce_stage_rules();
        store
    }

    pub fn get(&self) -> &CaseRecord {
        &self.record
    }

    pub fn snapshot(&self) -> CaseRecord {
        self.record.clone()
    }

    pub fn len(&self, list: ListName) -> usize {
        match list {
            ListName::Pms => self.record.pms.len(),
            ListName::Cdc => self.record.cdc.len(),
        }
    }

    /// Whether a removal from `list` would be honoured.
    pub fn can_remove(&self, list: ListName) -> bool {
        self.len(list) > 1
    }

    pub fn apply(&mut self, edit: CaseEdit) -> Applied {
        match edit {
            CaseEdit::SetField(field) => self.set_field(field),
            CaseEdit::SetBridgeField { id, field } => self.set_bridge_field(&id, field),
            CaseEdit::SetChainField { id, field } => self.set_chain_field(&id, field),
            CaseEdit::AppendItem(list) => self.append_item(list),
            CaseEdit::RemoveItem { list, id } => self.remove_item(list, &id),
        }
    }

    fn set_field(&mut self, edit: FieldEdit) -> Applied {
        let name = edit.name();
        let stage = self.record.cycle_stage;
        let changed = match edit {
            FieldEdit::CycleStage(value) => {
                let mut changed = replace_copy(&mut self.record.cycle_stage, value);
                changed |= self.enforce_stage_rules();
                changed
            }
            FieldEdit::CustomCycleStage(value) => {
                if !stage.is_other() {
                    debug!(field = name, %stage, "ignored write to hidden field");
                    return Applied::Unchanged;
                }
                replace(&mut self.record.custom_cycle_stage, value)
            }
            FieldEdit::PreviousCycleDescription(value) => {
                if stage.is_baseline() {
                    debug!(field = name, %stage, "ignored write to disabled field");
                    return Applied::Unchanged;
                }
                replace(&mut self.record.previous_cycle_description, value)
            }
            FieldEdit::Answer(question, value) => replace(self.record.answer_mut(question), value),
            FieldEdit::Indicators(value) => replace(&mut self.record.indicators, value),
            FieldEdit::Timespan(value) => replace(&mut self.record.timespan, value),
        };
        Applied::from_changed(changed)
    }

    /// Clears the fields the current stage disallows. Returns whether anything was cleared.
    fn enforce_stage_rules(&mut self) -> bool {
        let stage = self.record.cycle_stage;
        let mut cleared = false;
        if !stage.is_other() && !self.record.custom_cycle_stage.is_empty() {
            self.record.custom_cycle_stage.clear();
            cleared = true;
        }
        if stage.is_baseline() && !self.record.previous_cycle_description.is_empty() {
            self.record.previous_cycle_description.clear();
            cleared = true;
        }
        if cleared {
            debug!(%stage, "cleared fields disallowed by cycle stage");
        }
        cleared
    }

    fn set_bridge_field(&mut self, id: &EntryId, field: BridgeField) -> Applied {
        let Some(entry) = self.record.pms.iter_mut().find(|entry| &entry.id == id) else {
            debug!(list = "pms", %id, "entry not found; edit ignored");
            return Applied::Unchanged;
        };
        let changed = match field {
            BridgeField::Level(level) => replace_copy(&mut entry.level, level),
            BridgeField::Stage(stage) => replace_copy(&mut entry.stage, stage),
            BridgeField::Name(value) => replace(&mut entry.name, value),
            BridgeField::Description(value) => replace(&mut entry.description, value),
        };
        Applied::from_changed(changed)
    }

    fn set_chain_field(&mut self, id: &EntryId, field: ChainField) -> Applied {
        let Some(entry) = self.record.cdc.iter_mut().find(|entry| &entry.id == id) else {
            debug!(list = "cdc", %id, "entry not found; edit ignored");
            return Applied::Unchanged;
        };
        let changed = match field {
            ChainField::Level(level) => replace_copy(&mut entry.level, level),
            ChainField::Stage(stage) => replace_copy(&mut entry.stage, stage),
            ChainField::Data(value) => replace(&mut entry.data, value),
            ChainField::Sense(value) => replace(&mut entry.sense, value),
            ChainField::Decision(value) => replace(&mut entry.decision, value),
            ChainField::Effect(value) => replace(&mut entry.effect, value),
        };
        Applied::from_changed(changed)
    }

    fn append_item(&mut self, list: ListName) -> Applied {
        let stage = self.record.cycle_stage;
        let id = match list {
            ListName::Pms => {
                let mut entry = MediationBridge::seeded(stage);
                entry.id = self.unused_id(entry.id, MediationBridge::ID_PREFIX);
                let id = entry.id.clone();
                self.record.pms.push(entry);
                id
            }
            ListName::Cdc => {
                let mut entry = DecisionChain::seeded(stage);
                entry.id = self.unused_id(entry.id, DecisionChain::ID_PREFIX);
                let id = entry.id.clone();
                self.record.cdc.push(entry);
                id
            }
        };
        debug!(list = list.as_str(), %id, %stage, "appended entry");
        Applied::Changed
    }

    fn unused_id(&self, mut candidate: EntryId, prefix: &str) -> EntryId {
        let taken = |id: &EntryId| {
            self.record.pms.iter().any(|entry| &entry.id == id)
                || self.record.cdc.iter().any(|entry| &entry.id == id)
        };
        while taken(&candidate) {
            candidate = EntryId::generate(prefix);
        }
        candidate
    }

    fn remove_item(&mut self, list: ListName, id: &EntryId) -> Applied {
        if !self.can_remove(list) {
            debug!(list = list.as_str(), %id, "refused to remove the last entry");
            return Applied::Unchanged;
        }
        let removed = match list {
            ListName::Pms => remove_first(&mut self.record.pms, |entry| &entry.id == id),
            ListName::Cdc => remove_first(&mut self.record.cdc, |entry| &entry.id == id),
        };
        if removed {
            debug!(list = list.as_str(), %id, "removed entry");
        }
        Applied::from_changed(removed)
    }
}

fn remove_first<T>(entries: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    match entries.iter().position(matches) {
        Some(index) => {
            entries.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
