//! Pass count and per-pass electrical parameters.
//!
//! Base current comes from the wire curve over thickness; voltage and travel
//! speed follow from that current. Process, position and pass-role factors are
//! then applied multiplicatively before rounding and publishing a tolerance
//! band around each value.

use tracing::debug;

use super::interpolate::{interpolate_anchors, round_to};
use super::position::modifiers_for;
use super::recommendation::{PassPlanEntry, PassRole};
use super::types::{
    ButtPassRule, FilletPassRule, JointType, PassCountRules, Polarity, PositionCode, RoleModifier,
    RulesConfig, WireCurve,
};

/// Everything the generator needs for one plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PassPlanRequest<'a> {
    pub joint_type: JointType,
    pub thickness_mm: f64,
    pub position: &'a PositionCode,
    pub process_code: &'a str,
    pub polarity: Polarity,
    pub filler_diameter_mm: f64,
    pub thermal_efficiency: f64,
}

/// Number of passes for a joint. Always at least one.
pub fn pass_count(rules: &PassCountRules, joint_type: JointType, thickness_mm: f64) -> u32 {
    match joint_type {
        JointType::Butt => butt_pass_count(&rules.butt, thickness_mm),
        JointType::Fillet => fillet_pass_count(&rules.fillet, thickness_mm),
    }
}

fn butt_pass_count(rule: &ButtPassRule, thickness_mm: f64) -> u32 {
    if let Some(index) = rule.thresholds_mm.iter().position(|&max| thickness_mm <= max) {
        return index as u32 + 1;
    }
    let last = rule.thresholds_mm.last().copied().unwrap_or(0.0);
    // float-to-int casts saturate, so only the addition needs guarding
    let extra = ((thickness_mm - last) / rule.extra_pass_step_mm).floor() as u32;
    (rule.thresholds_mm.len() as u32 + 1).saturating_add(extra)
}

fn fillet_pass_count(rule: &FilletPassRule, thickness_mm: f64) -> u32 {
    let throat = thickness_mm * rule.throat_factor;
    let index = rule
        .thresholds_mm
        .iter()
        .position(|&max| throat <= max)
        .unwrap_or(rule.thresholds_mm.len());
    index as u32 + 1
}

/// Heat input in kJ/mm.
pub fn heat_input_kj_mm(volts: f64, amps: f64, travel_speed_mm_min: f64, efficiency: f64) -> f64 {
    (volts * amps * 60.0 * efficiency) / (1000.0 * travel_speed_mm_min)
}

/// Curve for the wire diameter, or the closest diameter available.
fn curve_for(curves: &[WireCurve], diameter_mm: f64) -> Option<&WireCurve> {
    curves.iter().min_by(|a, b| {
        let da = (a.diameter_mm - diameter_mm).abs();
        let db = (b.diameter_mm - diameter_mm).abs();
        da.total_cmp(&db)
    })
}

fn role_modifier(rules: &RulesConfig, role: PassRole) -> &RoleModifier {
    match role {
        PassRole::Root => &rules.pass_roles.root,
        PassRole::Fill => &rules.pass_roles.fill,
        PassRole::Cap => &rules.pass_roles.cap,
    }
}

/// Synthesize the full pass plan.
pub fn plan(rules: &RulesConfig, request: &PassPlanRequest<'_>) -> Vec<PassPlanEntry> {
    let Some(curve) = curve_for(&rules.wire_curves, request.filler_diameter_mm) else {
        return Vec::new();
    };
    let count = pass_count(&rules.pass_count, request.joint_type, request.thickness_mm);

    let base_current =
        interpolate_anchors(request.thickness_mm, curve.thickness_mm, curve.current_a);
    let base_voltage = interpolate_anchors(base_current, curve.current_a, curve.voltage_v);
    let base_speed = interpolate_anchors(base_current, curve.current_a, curve.travel_speed_mm_min);

    let (process_current, process_voltage) = rules
        .processes
        .get(request.process_code)
        .map_or((1.0, 1.0), |p| (p.current_factor, p.voltage_factor));
    let position = modifiers_for(&rules.positions, request.position);

    debug!(
        "Planning {} passes at {}mm with {}mm wire: base {:.0}A {:.1}V {:.0}mm/min",
        count, request.thickness_mm, curve.diameter_mm, base_current, base_voltage, base_speed
    );

    let tolerance = &rules.tolerance;
    (1..=count)
        .map(|index| {
            let role = PassRole::for_pass(index, count);
            let modifier = role_modifier(rules, role);

            let current = (base_current
                * process_current
                * position.amperage_factor
                * modifier.current_factor)
                .round();
            let voltage = round_to(
                base_voltage * process_voltage * position.voltage_factor * modifier.voltage_factor,
                1,
            );
            let speed = (base_speed * position.speed_factor * modifier.speed_factor).round();

            let current_tol = (current * tolerance.current_fraction)
                .round()
                .max(tolerance.current_floor_a);
            let voltage_tol =
                round_to(voltage * tolerance.voltage_fraction, 1).max(tolerance.voltage_floor_v);

            let pass_label = if count == 1 {
                rules.single_pass_label.clone()
            } else {
                modifier.label.clone()
            };

            PassPlanEntry {
                pass_number: index,
                pass_label,
                role,
                process: request.process_code.to_string(),
                technique: role.technique(),
                polarity: request.polarity,
                current_range_a: [current - current_tol, current + current_tol],
                voltage_range_v: [
                    round_to(voltage - voltage_tol, 1),
                    round_to(voltage + voltage_tol, 1),
                ],
                travel_speed_mm_min: speed,
                heat_input_kj_mm: heat_input_kj_mm(
                    voltage,
                    current,
                    speed,
                    request.thermal_efficiency,
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wps::default_rules;
    use crate::wps::recommendation::Technique;

    fn request<'a>(
        joint_type: JointType,
        thickness_mm: f64,
        position: &'a PositionCode,
        diameter: f64,
    ) -> PassPlanRequest<'a> {
        PassPlanRequest {
            joint_type,
            thickness_mm,
            position,
            process_code: "135",
            polarity: Polarity::DcPositive,
            filler_diameter_mm: diameter,
            thermal_efficiency: 0.85,
        }
    }

    #[test]
    fn test_butt_pass_count_thresholds() {
        let rules = default_rules();
        let count = |t| pass_count(&rules.pass_count, JointType::Butt, t);
        assert_eq!(count(1.0), 1);
        assert_eq!(count(3.0), 1);
        assert_eq!(count(3.1), 2);
        assert_eq!(count(8.0), 2);
        assert_eq!(count(8.1), 3);
        assert_eq!(count(15.0), 3);
        assert_eq!(count(15.1), 4);
        assert_eq!(count(18.0), 4);
        assert_eq!(count(20.1), 5);
        assert_eq!(count(40.0), 9);
    }

    #[test]
    fn test_butt_pass_count_saturates() {
        let rules = default_rules();
        assert_eq!(pass_count(&rules.pass_count, JointType::Butt, 1e11), u32::MAX);
        assert_eq!(pass_count(&rules.pass_count, JointType::Butt, f64::MAX), u32::MAX);
    }

    #[test]
    fn test_fillet_pass_count_uses_throat() {
        let rules = default_rules();
        let count = |t| pass_count(&rules.pass_count, JointType::Fillet, t);
        assert_eq!(count(5.0), 1); // a = 3.5
        assert_eq!(count(5.7), 1); // a = 3.99
        assert_eq!(count(8.0), 2); // a = 5.6
        assert_eq!(count(12.0), 3); // a = 8.4
        assert_eq!(count(60.0), 3);
    }

    #[test]
    fn test_heat_input_formula() {
        let q = heat_input_kj_mm(22.0, 180.0, 300.0, 0.85);
        assert!((q - 0.6732).abs() < 0.001, "got {}", q);
    }

    #[test]
    fn test_single_pass_plan() {
        let rules = default_rules();
        let pa = PositionCode::PA;
        let plan = plan(&rules, &request(JointType::Butt, 2.0, &pa, 1.0));
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].pass_label, "Tek Paso");
        assert_eq!(plan[0].role, PassRole::Root);
        assert_eq!(plan[0].technique, Technique::Stringer);
    }

    #[test]
    fn test_multi_pass_labels_and_techniques() {
        let rules = default_rules();
        let pa = PositionCode::PA;
        let plan = plan(&rules, &request(JointType::Butt, 12.0, &pa, 1.2));
        let labels: Vec<_> = plan.iter().map(|p| p.pass_label.as_str()).collect();
        assert_eq!(labels, ["Kök Paso", "Dolgu Paso", "Kapak Paso"]);
        assert_eq!(plan[0].technique, Technique::Stringer);
        assert_eq!(plan[1].technique, Technique::Weave);
        assert_eq!(plan[2].technique, Technique::Weave);
        assert!(plan.iter().all(|p| p.process == "135"));
    }

    #[test]
    fn test_thick_wire_values_at_eighteen_mm() {
        let rules = default_rules();
        let pa = PositionCode::PA;
        let plan = plan(&rules, &request(JointType::Butt, 18.0, &pa, 1.2));
        assert_eq!(plan.len(), 4);

        // Base: 249.1 A, 26.14 V, 348 mm/min
        let root = &plan[0];
        assert_eq!(root.current_range_a, [206.0, 242.0]);
        assert!((root.voltage_range_v[0] - 23.6).abs() < 1e-9);
        assert!((root.voltage_range_v[1] - 26.0).abs() < 1e-9);
        assert_eq!(root.travel_speed_mm_min, 348.0);
        assert!((root.heat_input_kj_mm - 0.8141).abs() < 0.001);

        let fill = &plan[1];
        assert_eq!(fill.current_range_a, [229.0, 269.0]);

        let cap = &plan[3];
        assert_eq!(cap.current_range_a, [241.0, 283.0]);
    }

    #[test]
    fn test_root_is_cooler_and_cap_hotter() {
        let rules = default_rules();
        let pa = PositionCode::PA;
        let plan = plan(&rules, &request(JointType::Butt, 12.0, &pa, 1.2));
        let mid = |p: &PassPlanEntry| (p.current_range_a[0] + p.current_range_a[1]) / 2.0;
        assert!(mid(&plan[0]) < mid(&plan[1]));
        assert!(mid(&plan[2]) > mid(&plan[1]));
    }

    #[test]
    fn test_overhead_current_not_above_flat() {
        let rules = default_rules();
        let pa = PositionCode::PA;
        let pe = PositionCode::PE;
        for t in [2.0, 5.0, 9.0, 14.0, 22.0] {
            for diameter in [1.0, 1.2] {
                let flat = plan(&rules, &request(JointType::Butt, t, &pa, diameter));
                let overhead = plan(&rules, &request(JointType::Butt, t, &pe, diameter));
                for (f, o) in flat.iter().zip(&overhead) {
                    let f_avg = (f.current_range_a[0] + f.current_range_a[1]) / 2.0;
                    let o_avg = (o.current_range_a[0] + o.current_range_a[1]) / 2.0;
                    assert!(o_avg <= f_avg, "t={} d={}: {} > {}", t, diameter, o_avg, f_avg);
                }
            }
        }
    }

    #[test]
    fn test_ranges_ordered_and_heat_input_positive() {
        let rules = default_rules();
        let positions = [
            PositionCode::PA,
            PositionCode::PB,
            PositionCode::PC,
            PositionCode::PD,
            PositionCode::PE,
            PositionCode::PF,
            PositionCode::PG,
            PositionCode::Other("X".to_string()),
        ];
        for position in &positions {
            for joint in [JointType::Butt, JointType::Fillet] {
                for t in [0.5, 1.0, 3.0, 4.5, 8.0, 12.5, 19.0, 32.0] {
                    for process in ["135", "131", "141", "111", "999"] {
                        let mut req = request(joint, t, position, if t > 5.0 { 1.2 } else { 1.0 });
                        req.process_code = process;
                        for entry in plan(&rules, &req) {
                            assert!(entry.current_range_a[0] < entry.current_range_a[1]);
                            assert!(entry.voltage_range_v[0] < entry.voltage_range_v[1]);
                            assert!(entry.heat_input_kj_mm > 0.0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_tolerance_floor_applies_to_low_current() {
        let rules = default_rules();
        let pe = PositionCode::PE;
        let mut req = request(JointType::Butt, 1.0, &pe, 1.0);
        req.process_code = "141";
        let entry = &plan(&rules, &req)[0];
        // 100 A * 0.70 * 0.8 * 0.90 = 50 A, 8% would be 4 A
        assert_eq!(entry.current_range_a, [40.0, 60.0]);
        let width = entry.voltage_range_v[1] - entry.voltage_range_v[0];
        assert!((width - 2.0).abs() < 1e-9, "voltage band {:?}", entry.voltage_range_v);
    }

    #[test]
    fn test_unknown_diameter_uses_closest_curve() {
        let rules = default_rules();
        let pa = PositionCode::PA;
        let near_thin = plan(&rules, &request(JointType::Butt, 6.0, &pa, 0.8));
        let thin = plan(&rules, &request(JointType::Butt, 6.0, &pa, 1.0));
        assert_eq!(near_thin, thin);
    }
}
