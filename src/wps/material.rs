//! Material-driven decisions: process and polarity, filler, shielding gas and
//! preheat/interpass temperatures.
//!
//! Every function returns a [`Decision`] carrying the chosen value together
//! with the sentences that explain it. Nothing here fails: an unmatched rule
//! leaves the value unset.

use tracing::debug;

use super::recommendation::{FillerSelection, GasSelection, ProcessSelection, TemperatureBands};
use super::types::{
    select_band, selects_material, FillerMaterial, MaterialFamily, PositionCode, RulesConfig,
    ShieldingGas,
};

/// A decision and the reasoning recorded for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<T> {
    pub value: T,
    pub reasoning: Vec<String>,
}

impl<T> Decision<T> {
    fn new(value: T, reasoning: Vec<String>) -> Self {
        Self { value, reasoning }
    }
}

/// Welding family of an ISO 15608 group, if it belongs to one.
pub fn family_of(rules: &RulesConfig, group: &str) -> Option<MaterialFamily> {
    rules
        .families
        .iter()
        .find(|f| f.groups.iter().any(|g| g == group))
        .map(|f| f.family)
}

/// Display name of a process code from the catalogue.
pub fn process_name(rules: &RulesConfig, code: &str) -> Option<String> {
    rules.processes.get(code).map(|p| p.name.clone())
}

/// Thermal efficiency of a process, or the default for unknown codes.
pub fn thermal_efficiency(rules: &RulesConfig, code: &str) -> f64 {
    rules
        .processes
        .get(code)
        .map_or(rules.default_efficiency, |p| p.efficiency)
}

/// Choose process and polarity for a material.
///
/// A preferred process replaces the suggested code for every downstream step,
/// but the rule's own conclusion stays first in the reasoning and the polarity
/// is always the rule's.
pub fn classify(
    rules: &RulesConfig,
    group: &str,
    thickness_mm: f64,
    preferred_process: Option<&str>,
) -> Decision<ProcessSelection> {
    let family = family_of(rules, group);
    let band = rules
        .process_rules
        .iter()
        .filter(|rule| selects_material(&rule.families, &rule.groups, group, family))
        .find_map(|rule| select_band(&rule.bands, thickness_mm))
        .unwrap_or(&rules.process_fallback);

    let mut reasoning = vec![band.rationale.clone()];
    let code = match preferred_process {
        Some(preferred) if preferred != band.process => {
            let label = match process_name(rules, preferred) {
                Some(name) => format!("{} ({})", name, preferred),
                None => preferred.to_string(),
            };
            reasoning.push(format!("Kullanıcı tarafından {} prosesi seçildi.", label));
            preferred.to_string()
        }
        _ => band.process.clone(),
    };

    debug!(
        "Process for group {} at {}mm: suggested {}, using {}",
        group, thickness_mm, band.process, code
    );

    Decision::new(
        ProcessSelection {
            name: process_name(rules, &code),
            code,
            polarity: band.polarity,
            suggested_code: band.process.clone(),
        },
        reasoning,
    )
}

/// Wire diameter for a thickness and position.
///
/// Returns the diameter and whether the out-of-position rule lowered it.
pub fn filler_diameter(
    rules: &RulesConfig,
    thickness_mm: f64,
    position: &PositionCode,
) -> (f64, bool) {
    let filler = &rules.filler;
    let by_thickness = if thickness_mm <= filler.thin_max_thickness_mm {
        filler.thin_diameter_mm
    } else {
        filler.thick_diameter_mm
    };
    if filler.out_of_position.contains(position)
        && by_thickness > filler.out_of_position_diameter_mm
    {
        (filler.out_of_position_diameter_mm, true)
    } else {
        (by_thickness, false)
    }
}

/// Pick the first catalogue filler compatible with the group and size it.
pub fn select_filler(
    rules: &RulesConfig,
    group: &str,
    thickness_mm: f64,
    position: &PositionCode,
    catalog: &[FillerMaterial],
) -> Decision<Option<FillerSelection>> {
    let Some(filler) = catalog
        .iter()
        .find(|f| f.compatible_groups.iter().any(|g| g == group))
    else {
        debug!("No filler in catalogue for group {}", group);
        return Decision::new(
            None,
            vec![format!(
                "Malzeme grubu ({}) için katalogda uygun dolgu teli bulunamadı.",
                group
            )],
        );
    };

    let mut reasoning = vec![format!(
        "Malzeme grubuna ({}) uygun {} dolgu teli seçildi.",
        group, filler.classification
    )];
    let (diameter_mm, downgraded) = filler_diameter(rules, thickness_mm, position);
    if downgraded {
        reasoning.push(format!(
            "Zor pozisyonlar için daha iyi kontrol sağlamak amacıyla tel çapı {:.1}mm'ye düşürüldü.",
            diameter_mm
        ));
    }
    reasoning.push(format!(
        "Kalınlık ({}mm) ve pozisyona ({}) göre {:.1}mm tel çapı önerildi.",
        thickness_mm, position, diameter_mm
    ));

    Decision::new(
        Some(FillerSelection {
            id: filler.id.clone(),
            classification: filler.classification.clone(),
            diameter_mm,
        }),
        reasoning,
    )
}

/// Gas family code for a process, material and thickness.
pub fn gas_family<'a>(
    rules: &'a RulesConfig,
    process_code: &str,
    group: &str,
    thickness_mm: f64,
) -> Option<(&'a str, &'a str)> {
    let family = family_of(rules, group);
    rules
        .gas_rules
        .iter()
        .filter(|rule| {
            rule.processes.is_empty() || rule.processes.iter().any(|p| p == process_code)
        })
        .filter(|rule| selects_material(&rule.families, &rule.groups, group, family))
        .find_map(|rule| select_band(&rule.bands, thickness_mm))
        .map(|band| (band.gas.as_str(), band.rationale.as_str()))
}

/// Choose a shielding gas by family code and find it in the catalogue.
pub fn select_gas(
    rules: &RulesConfig,
    process_code: &str,
    group: &str,
    thickness_mm: f64,
    catalog: &[ShieldingGas],
) -> Decision<Option<GasSelection>> {
    let Some((family, rationale)) = gas_family(rules, process_code, group, thickness_mm) else {
        return Decision::new(
            None,
            vec![format!(
                "{} prosesi ve malzeme grubu ({}) için koruyucu gaz önerisi bulunmuyor.",
                process_code, group
            )],
        );
    };

    let mut reasoning = vec![rationale.to_string()];
    let Some(gas) = catalog.iter().find(|g| g.name.starts_with(family)) else {
        debug!("No {} gas in catalogue", family);
        reasoning.push(format!("Katalogda {} ailesinden koruyucu gaz bulunamadı.", family));
        return Decision::new(None, reasoning);
    };

    let flow = &rules.gas_flow;
    reasoning.push(flow.rationale.clone());
    Decision::new(
        Some(GasSelection {
            id: gas.id.clone(),
            name: gas.name.clone(),
            family: family.to_string(),
            flow_rate_l_min: [flow.min_l_min, flow.max_l_min],
        }),
        reasoning,
    )
}

/// Preheat and interpass bands for a material and thickness.
pub fn temperatures_for(
    rules: &RulesConfig,
    group: &str,
    thickness_mm: f64,
) -> Decision<Option<TemperatureBands>> {
    let family = family_of(rules, group);
    let matched = rules
        .temperature_rules
        .iter()
        .filter(|rule| selects_material(&rule.families, &rule.groups, group, family))
        .find_map(|rule| select_band(&rule.bands, thickness_mm).map(|band| (rule, band)));

    match matched {
        Some((rule, band)) => Decision::new(
            Some(TemperatureBands {
                preheat: band.preheat.clone(),
                interpass: rule.interpass.clone(),
            }),
            vec![rule.rationale.clone()],
        ),
        None => Decision::new(None, Vec::new()),
    }
}
