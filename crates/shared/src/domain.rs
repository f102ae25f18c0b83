use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use uuid::Uuid;

/// Number of numbered intervention cycles offered after the baseline.
pub const CYCLE_COUNT: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Micro,
    Meso,
    Macro,
}

impl Level {
    /// Top-down order used by the map and the CDC panel.
    pub const TOP_DOWN: [Level; 3] = [Level::Macro, Level::Meso, Level::Micro];

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Micro => "micro",
            Level::Meso => "meso",
            Level::Macro => "macro",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Micro => "Micro",
            Level::Meso => "Meso",
            Level::Macro => "Macro",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CycleStage {
    #[default]
    Baseline,
    Cycle(u8),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cycle stage: {0:?}")]
pub struct UnknownCycleStage(pub String);

impl CycleStage {
    /// Ordered list offered by the stage selectors.
    pub fn options() -> Vec<CycleStage> {
        let mut options = Vec::with_capacity(usize::from(CYCLE_COUNT) + 2);
        options.push(CycleStage::Baseline);
        options.extend((1..=CYCLE_COUNT).map(CycleStage::Cycle));
        options.push(CycleStage::Other);
        options
    }

    pub fn is_baseline(self) -> bool {
        self == CycleStage::Baseline
    }

    pub fn is_other(self) -> bool {
        self == CycleStage::Other
    }
}

impl fmt::Display for CycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleStage::Baseline => f.write_str("Baseline"),
            CycleStage::Cycle(n) => write!(f, "Cycle {n}"),
            CycleStage::Other => f.write_str("Other"),
        }
    }
}

impl FromStr for CycleStage {
    type Err = UnknownCycleStage;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "Baseline" => Ok(CycleStage::Baseline),
            "Other" => Ok(CycleStage::Other),
            other => other
                .strip_prefix("Cycle ")
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=CYCLE_COUNT).contains(n))
                .map(CycleStage::Cycle)
                .ok_or_else(|| UnknownCycleStage(raw.to_string())),
        }
    }
}

impl Serialize for CycleStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CycleStage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// The six guiding questions behind the change hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HypothesisQuestion {
    Problem,
    Action,
    Implementer,
    Mechanism,
    ExpectedChange,
    Measurement,
}

impl HypothesisQuestion {
    pub const ALL: [HypothesisQuestion; 6] = [
        HypothesisQuestion::Problem,
        HypothesisQuestion::Action,
        HypothesisQuestion::Implementer,
        HypothesisQuestion::Mechanism,
        HypothesisQuestion::ExpectedChange,
        HypothesisQuestion::Measurement,
    ];

    pub fn prompt(self) -> &'static str {
        match self {
            HypothesisQuestion::Problem => "1. What is the problem you want to change?",
            HypothesisQuestion::Action => "2. What action or device will you implement?",
            HypothesisQuestion::Implementer => "3. Who will implement it, and at which level?",
            HypothesisQuestion::Mechanism => "4. Why do you expect that action to produce the change?",
            HypothesisQuestion::ExpectedChange => "5. What observable change do you expect?",
            HypothesisQuestion::Measurement => "6. How will you measure it, and over what time?",
        }
    }

    /// Key of the answer in the serialized record.
    pub fn field_name(self) -> &'static str {
        match self {
            HypothesisQuestion::Problem => "hypothesisQ1",
            HypothesisQuestion::Action => "hypothesisQ2",
            HypothesisQuestion::Implementer => "hypothesisQ3",
            HypothesisQuestion::Mechanism => "hypothesisQ4",
            HypothesisQuestion::ExpectedChange => "hypothesisQ5",
            HypothesisQuestion::Measurement => "hypothesisQ6",
        }
    }

    /// Long-form answers get a multi-line editor.
    pub fn is_long_form(self) -> bool {
        matches!(
            self,
            HypothesisQuestion::Problem | HypothesisQuestion::Mechanism
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actors {
    pub micro: Vec<String>,
    pub meso: Vec<String>,
    #[serde(rename = "macro")]
    pub macro_: Vec<String>,
}

impl Actors {
    pub fn at(&self, level: Level) -> &[String] {
        match level {
            Level::Micro => &self.micro,
            Level::Meso => &self.meso,
            Level::Macro => &self.macro_,
        }
    }
}

impl Default for Actors {
    fn default() -> Self {
        Self {
            micro: vec![
                "Teachers".to_string(),
                "Students".to_string(),
                "Parents/Guardians".to_string(),
            ],
            meso: vec!["Leadership Team".to_string()],
            macro_: vec!["Ministerial school-participation guidelines".to_string()],
        }
    }
}

/// Mediation bridge (PM): a named device or intervention at one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediationBridge {
    pub id: EntryId,
    pub level: Level,
    pub stage: CycleStage,
    pub name: String,
    pub description: String,
}

impl MediationBridge {
    pub const ID_PREFIX: &'static str = "pm";
    pub const DEFAULT_LEVEL: Level = Level::Meso;

    pub fn seeded(stage: CycleStage) -> Self {
        Self {
            id: EntryId::generate(Self::ID_PREFIX),
            level: Self::DEFAULT_LEVEL,
            stage,
            name: String::new(),
            description: String::new(),
        }
    }
}

/// Decision chain (CDC): data observed, sense made, decision taken, effect produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionChain {
    pub id: EntryId,
    pub level: Level,
    pub stage: CycleStage,
    pub data: String,
    pub sense: String,
    pub decision: String,
    pub effect: String,
}

impl DecisionChain {
    pub const ID_PREFIX: &'static str = "cdc";
    pub const DEFAULT_LEVEL: Level = Level::Micro;

    pub fn seeded(stage: CycleStage) -> Self {
        Self {
            id: EntryId::generate(Self::ID_PREFIX),
            level: Self::DEFAULT_LEVEL,
            stage,
            data: String::new(),
            sense: String::new(),
            decision: String::new(),
            effect: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friction {
    pub from: String,
    pub to: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub cycle_stage: CycleStage,
    pub custom_cycle_stage: String,
    pub previous_cycle_description: String,
    pub hypothesis_q1: String,
    pub hypothesis_q2: String,
    pub hypothesis_q3: String,
    pub hypothesis_q4: String,
    pub hypothesis_q5: String,
    pub hypothesis_q6: String,
    pub actors: Actors,
    pub pms: Vec<MediationBridge>,
    pub cdc: Vec<DecisionChain>,
    pub frictions: Vec<Friction>,
    pub indicators: String,
    pub timespan: String,
}

const SEEDED_FRICTION_LABELS: [&str; 3] = ["expectations", "participation", "information"];

fn seeded_frictions(actors: &Actors) -> Vec<Friction> {
    let target = actors.meso.first().cloned().unwrap_or_default();
    actors
        .micro
        .iter()
        .zip(SEEDED_FRICTION_LABELS)
        .map(|(from, label)| Friction {
            from: from.clone(),
            to: target.clone(),
            label: label.to_string(),
        })
        .collect()
}

impl Default for CaseRecord {
    fn default() -> Self {
        let actors = Actors::default();
        let frictions = seeded_frictions(&actors);
        Self {
            cycle_stage: CycleStage::Baseline,
            custom_cycle_stage: String::new(),
            previous_cycle_description: String::new(),
            hypothesis_q1: String::new(),
            hypothesis_q2: String::new(),
            hypothesis_q3: String::new(),
            hypothesis_q4: String::new(),
            hypothesis_q5: String::new(),
            hypothesis_q6: String::new(),
            actors,
            pms: vec![MediationBridge::seeded(CycleStage::Baseline)],
            cdc: vec![DecisionChain::seeded(CycleStage::Baseline)],
            frictions,
            indicators: String::new(),
            timespan: String::new(),
        }
    }
}

impl CaseRecord {
    pub fn answer(&self, question: HypothesisQuestion) -> &str {
        match question {
            HypothesisQuestion::Problem => &self.hypothesis_q1,
            HypothesisQuestion::Action => &self.hypothesis_q2,
            HypothesisQuestion::Implementer => &self.hypothesis_q3,
            HypothesisQuestion::Mechanism => &self.hypothesis_q4,
            HypothesisQuestion::ExpectedChange => &self.hypothesis_q5,
            HypothesisQuestion::Measurement => &self.hypothesis_q6,
        }
    }

    pub fn answer_mut(&mut self, question: HypothesisQuestion) -> &mut String {
        match question {
            HypothesisQuestion::Problem => &mut self.hypothesis_q1,
            HypothesisQuestion::Action => &mut self.hypothesis_q2,
            HypothesisQuestion::Implementer => &mut self.hypothesis_q3,
            HypothesisQuestion::Mechanism => &mut self.hypothesis_q4,
            HypothesisQuestion::ExpectedChange => &mut self.hypothesis_q5,
            HypothesisQuestion::Measurement => &mut self.hypothesis_q6,
        }
    }

    /// Label shown for the current stage; a custom label replaces "Other" when given.
    pub fn cycle_title(&self) -> String {
        if self.cycle_stage.is_other() && !self.custom_cycle_stage.is_empty() {
            self.custom_cycle_stage.clone()
        } else {
            self.cycle_stage.to_string()
        }
    }

    /// The filled-in "School case" used as input hints and as an optional starting record.
    pub fn school_example() -> Self {
        let actors = Actors::default();
        let frictions = seeded_frictions(&actors);
        let baseline = CycleStage::Baseline;
        Self {
            cycle_stage: baseline,
            custom_cycle_stage: String::new(),
            previous_cycle_description: "Attendance at meetings improved (78%) but perceived trust stays below 3.8/5. Guardians ask for more say in the minutes, which currently reflect only 20% of their proposals.".to_string(),
            hypothesis_q1: "Misalignment between norm and practice in school meetings, with poor traceability of agreements and constant friction.".to_string(),
            hypothesis_q2: "Implementation of Mediation Bridges (PM1, PM2, PM3).".to_string(),
            hypothesis_q3: "Leadership Team, meso level.".to_string(),
            hypothesis_q4: "It orders the interaction, translates the norm into practice and improves the traceability of agreements.".to_string(),
            hypothesis_q5: "Coherence across levels will increase, improving relational efficacy and relational justice.".to_string(),
            hypothesis_q6: "Attendance, fulfilled agreements, trust and complaints indicators; within 4-6 weeks.".to_string(),
            actors,
            pms: vec![
                MediationBridge {
                    id: EntryId::from("pm1"),
                    level: Level::Meso,
                    stage: baseline,
                    name: "Meeting protocol".to_string(),
                    description: "PM1".to_string(),
                },
                MediationBridge {
                    id: EntryId::from("pm2"),
                    level: Level::Meso,
                    stage: baseline,
                    name: "Opening script".to_string(),
                    description: "PM2".to_string(),
                },
                MediationBridge {
                    id: EntryId::from("pm3"),
                    level: Level::Meso,
                    stage: CycleStage::Cycle(1),
                    name: "Public minutes".to_string(),
                    description: "PM3".to_string(),
                },
            ],
            cdc: vec![
                DecisionChain {
                    id: EntryId::from("cdc1"),
                    level: Level::Micro,
                    stage: baseline,
                    data: "Interruptions".to_string(),
                    sense: "Misaligned expectations".to_string(),
                    decision: "Apply PM2".to_string(),
                    effect: "Fewer interruptions".to_string(),
                },
                DecisionChain {
                    id: EntryId::from("cdc2"),
                    level: Level::Meso,
                    stage: baseline,
                    data: "Agreements not recorded".to_string(),
                    sense: "Poor traceability".to_string(),
                    decision: "Combine PM1+PM3".to_string(),
                    effect: "Better coordination".to_string(),
                },
                DecisionChain {
                    id: EntryId::from("cdc3"),
                    level: Level::Macro,
                    stage: CycleStage::Cycle(1),
                    data: "Norm barely known".to_string(),
                    sense: "Norm-practice gap".to_string(),
                    decision: "Clear dissemination".to_string(),
                    effect: "Adherence increases".to_string(),
                },
            ],
            frictions,
            indicators: "attendance ≥75%; agreements fulfilled ≥75%; interruptions down ≥40%; trust ≥3.5/5; complaints ≤2/month".to_string(),
            timespan: "4-6 weeks".to_string(),
        }
    }
}

/// Both narrative outputs of one successful generation, always together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub change_hypothesis: String,
    pub null_hypothesis: String,
}
