//! Output types produced by the engine.
//!
//! A [`Recommendation`] is assembled once through [`RecommendationBuilder`]
//! and is read-only afterwards. Fields the engine could not determine stay
//! `None` so "unset" is distinguishable from a computed value.

use serde::Serialize;

use super::types::Polarity;

/// Torch manipulation for a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Technique {
    Stringer,
    Weave,
}

/// Position of a pass within the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PassRole {
    Root,
    Fill,
    Cap,
}

impl PassRole {
    /// Role of pass `index` (1-based) in a plan of `count` passes.
    pub fn for_pass(index: u32, count: u32) -> PassRole {
        if index == 1 {
            PassRole::Root
        } else if index == count {
            PassRole::Cap
        } else {
            PassRole::Fill
        }
    }

    pub fn technique(self) -> Technique {
        match self {
            PassRole::Root => Technique::Stringer,
            PassRole::Fill | PassRole::Cap => Technique::Weave,
        }
    }
}

/// The process the weld should be made with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSelection {
    /// ISO 4063 code used downstream (the preferred code when one was given)
    pub code: String,
    /// Display name, absent for codes outside the catalogue
    pub name: Option<String>,
    pub polarity: Polarity,
    /// What the material rules concluded on their own
    pub suggested_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FillerSelection {
    pub id: String,
    pub classification: String,
    pub diameter_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GasSelection {
    pub id: String,
    pub name: String,
    /// Family code the catalogue entry was matched on (e.g., "M21")
    pub family: String,
    /// [min, max] in L/min
    pub flow_rate_l_min: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureBands {
    pub preheat: String,
    pub interpass: String,
}

/// Electrical parameters for one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassPlanEntry {
    /// 1-based position in the plan
    pub pass_number: u32,
    pub pass_label: String,
    pub role: PassRole,
    pub process: String,
    pub technique: Technique,
    pub polarity: Polarity,
    /// [min, max] in A
    pub current_range_a: [f64; 2],
    /// [min, max] in V
    pub voltage_range_v: [f64; 2],
    pub travel_speed_mm_min: f64,
    #[serde(rename = "heatInputKJmm")]
    pub heat_input_kj_mm: f64,
}

/// The complete parameter recommendation for one weld.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    process: Option<ProcessSelection>,
    filler: Option<FillerSelection>,
    gas: Option<GasSelection>,
    temperatures: Option<TemperatureBands>,
    pass_plan: Vec<PassPlanEntry>,
    notes: Vec<String>,
    reasoning: Vec<String>,
    thermal_efficiency: Option<f64>,
}

impl Recommendation {
    /// The recommendation returned when there is nothing to classify.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> RecommendationBuilder {
        RecommendationBuilder::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn process(&self) -> Option<&ProcessSelection> {
        self.process.as_ref()
    }

    pub fn filler(&self) -> Option<&FillerSelection> {
        self.filler.as_ref()
    }

    pub fn gas(&self) -> Option<&GasSelection> {
        self.gas.as_ref()
    }

    pub fn temperatures(&self) -> Option<&TemperatureBands> {
        self.temperatures.as_ref()
    }

    pub fn pass_plan(&self) -> &[PassPlanEntry] {
        &self.pass_plan
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// One sentence per decision, in the order the decisions were made.
    pub fn reasoning(&self) -> &[String] {
        &self.reasoning
    }

    pub fn thermal_efficiency(&self) -> Option<f64> {
        self.thermal_efficiency
    }
}

/// Collects the parts of a [`Recommendation`] while the engine runs.
#[derive(Debug, Default)]
pub struct RecommendationBuilder {
    inner: Recommendation,
}

impl RecommendationBuilder {
    pub fn process(mut self, process: ProcessSelection, thermal_efficiency: f64) -> Self {
        self.inner.process = Some(process);
        self.inner.thermal_efficiency = Some(thermal_efficiency);
        self
    }

    pub fn filler(mut self, filler: Option<FillerSelection>) -> Self {
        self.inner.filler = filler;
        self
    }

    pub fn gas(mut self, gas: Option<GasSelection>) -> Self {
        self.inner.gas = gas;
        self
    }

    pub fn temperatures(mut self, temperatures: Option<TemperatureBands>) -> Self {
        self.inner.temperatures = temperatures;
        self
    }

    pub fn pass_plan(mut self, pass_plan: Vec<PassPlanEntry>) -> Self {
        self.inner.pass_plan = pass_plan;
        self
    }

    pub fn notes(mut self, notes: Vec<String>) -> Self {
        self.inner.notes = notes;
        self
    }

    pub fn reason<I>(mut self, sentences: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.inner.reasoning.extend(sentences);
        self
    }

    pub fn build(self) -> Recommendation {
        self.inner
    }
}
