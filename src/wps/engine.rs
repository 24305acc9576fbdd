//! Recommendation engine: sequences the material rules, the pass plan
//! generator and the notes library into one [`Recommendation`].

use std::sync::OnceLock;

use tracing::debug;

use super::material::{classify, select_filler, select_gas, temperatures_for, thermal_efficiency};
use super::notes::notes_for;
use super::pass_plan::{plan, PassPlanRequest};
use super::recommendation::Recommendation;
use super::rules::default_rules;
use super::types::{Catalogs, RulesConfig, WeldingInputs};

/// The WPS recommendation engine.
///
/// Holds the rule tables and nothing else. Evaluation is a pure function of
/// the inputs and the catalogues, so one engine can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct WpsEngine {
    rules: RulesConfig,
}

impl WpsEngine {
    /// Create an engine with the given rules (typically from `default_rules()`
    /// or `load_rules()`).
    pub fn new(rules: RulesConfig) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Derive a complete parameter set for a weld.
    ///
    /// Inputs are expected to be validated against `rules().limits` (see
    /// [`WeldingInputs::validate`]).
    /// A missing material yields an empty recommendation; every other gap
    /// leaves the affected fields unset and is explained in the reasoning.
    pub fn recommend(&self, inputs: &WeldingInputs, catalogs: &Catalogs) -> Recommendation {
        let Some(group) = inputs.material_group() else {
            debug!("No material group supplied, returning empty recommendation");
            return Recommendation::empty();
        };
        let rules = &self.rules;
        let thickness = inputs.thickness_mm;

        let process = classify(rules, group, thickness, inputs.preferred_process());
        let process_code = process.value.code.clone();
        let polarity = process.value.polarity;
        let efficiency = thermal_efficiency(rules, &process_code);

        let filler = select_filler(
            rules,
            group,
            thickness,
            &inputs.position,
            &catalogs.filler_materials,
        );
        let diameter_mm = filler
            .value
            .as_ref()
            .map_or(rules.filler.thin_diameter_mm, |f| f.diameter_mm);

        let gas = select_gas(rules, &process_code, group, thickness, &catalogs.shielding_gases);
        let temperatures = temperatures_for(rules, group, thickness);

        let pass_plan = plan(
            rules,
            &PassPlanRequest {
                joint_type: inputs.joint_type,
                thickness_mm: thickness,
                position: &inputs.position,
                process_code: &process_code,
                polarity,
                filler_diameter_mm: diameter_mm,
                thermal_efficiency: efficiency,
            },
        );
        let plan_summary = format!(
            "{} paso, birleşim tipi, kalınlık ve pozisyona göre hassas parametrelerle planlandı.",
            pass_plan.len()
        );
        let notes = notes_for(rules, &inputs.position, group, &process_code);

        debug!(
            "Recommendation for group {} at {}mm {}: process {}, {} passes",
            group,
            thickness,
            inputs.position,
            process_code,
            pass_plan.len()
        );

        Recommendation::builder()
            .process(process.value, efficiency)
            .reason(process.reasoning)
            .filler(filler.value)
            .reason(filler.reasoning)
            .gas(gas.value)
            .reason(gas.reasoning)
            .temperatures(temperatures.value)
            .reason(temperatures.reasoning)
            .pass_plan(pass_plan)
            .reason([plan_summary])
            .notes(notes)
            .build()
    }
}

impl Default for WpsEngine {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

/// Run the default engine (embedded rules) on one request.
pub fn generate_wps_recommendation(inputs: &WeldingInputs, catalogs: &Catalogs) -> Recommendation {
    static ENGINE: OnceLock<WpsEngine> = OnceLock::new();
    ENGINE.get_or_init(WpsEngine::default).recommend(inputs, catalogs)
}
