//! TOML rule loading for the WPS recommendation engine.
//!
//! Provides two loading methods:
//! - `default_rules()` - Loads embedded rules compiled into the binary
//! - `load_rules(path)` - Loads and validates custom rules from a file path

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::types::{PositionModifier, RulesConfig};
use crate::error::WpsError;

/// Default rules embedded in the binary at compile time.
/// These are loaded from `config/wps_rules.toml`.
const DEFAULT_RULES: &str = include_str!("../../config/wps_rules.toml");

/// Load rules from a TOML file at the given path.
///
/// The file must contain every table of the embedded rules; partial overrides
/// are not merged. The parsed rules are validated before being returned.
///
/// # Example
/// ```ignore
/// let rules = load_rules(Path::new("/etc/wps/custom_rules.toml"))?;
/// ```
pub fn load_rules(path: &Path) -> Result<RulesConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file {}", path.display()))?;
    let config: RulesConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse rules file {}", path.display()))?;
    config.validate()?;
    info!("Loaded WPS rules from {}", path.display());
    Ok(config)
}

/// Get the default rules embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_rules() -> RulesConfig {
    toml::from_str(DEFAULT_RULES).expect("embedded wps_rules.toml must be valid TOML")
}

impl RulesConfig {
    /// Check the numeric invariants the engine relies on.
    pub fn validate(&self) -> Result<(), WpsError> {
        match self.positions.get("PA") {
            Some(pa) if *pa == PositionModifier::REFERENCE => {}
            Some(_) => return invalid("position PA must have all factors at 1.0"),
            None => return invalid("position table must define PA"),
        }
        for (code, m) in &self.positions {
            for factor in [m.amperage_factor, m.voltage_factor, m.speed_factor] {
                if !(factor > 0.0 && factor <= 1.0) {
                    return invalid(format!(
                        "position {} has factor {} outside (0, 1]",
                        code, factor
                    ));
                }
            }
        }

        if !(self.limits.max_thickness_mm > 0.0 && self.limits.max_thickness_mm.is_finite()) {
            return invalid("maximum thickness must be a positive finite number");
        }

        if !is_fraction(self.default_efficiency) {
            return invalid("default efficiency must be in (0, 1]");
        }
        for (code, process) in &self.processes {
            if !is_fraction(process.efficiency) {
                return invalid(format!("process {} efficiency must be in (0, 1]", code));
            }
            if process.current_factor <= 0.0 || process.voltage_factor <= 0.0 {
                return invalid(format!("process {} factors must be positive", code));
            }
        }

        if self.wire_curves.is_empty() {
            return invalid("at least one wire curve is required");
        }
        for curve in &self.wire_curves {
            let [t0, t1] = curve.thickness_mm;
            let [c0, c1] = curve.current_a;
            if t0 >= t1 || c0 >= c1 {
                return invalid(format!(
                    "wire curve {}mm needs ascending thickness and current anchors",
                    curve.diameter_mm
                ));
            }
            let mut anchors = curve.voltage_v.iter().chain(curve.travel_speed_mm_min.iter());
            if curve.diameter_mm <= 0.0 || anchors.any(|v| *v <= 0.0) {
                return invalid(format!(
                    "wire curve {}mm has non-positive anchors",
                    curve.diameter_mm
                ));
            }
        }

        check_thresholds("butt", &self.pass_count.butt.thresholds_mm)?;
        check_thresholds("fillet", &self.pass_count.fillet.thresholds_mm)?;
        if self.pass_count.butt.extra_pass_step_mm <= 0.0 {
            return invalid("butt extra pass step must be positive");
        }
        if self.pass_count.fillet.throat_factor <= 0.0 {
            return invalid("fillet throat factor must be positive");
        }

        let roles = [
            &self.pass_roles.root,
            &self.pass_roles.fill,
            &self.pass_roles.cap,
        ];
        if roles
            .iter()
            .any(|r| r.current_factor <= 0.0 || r.voltage_factor <= 0.0 || r.speed_factor <= 0.0)
        {
            return invalid("pass role factors must be positive");
        }

        let tol = &self.tolerance;
        if tol.current_floor_a <= 0.0 || tol.voltage_floor_v <= 0.0 {
            return invalid("tolerance floors must be positive");
        }
        if tol.current_fraction < 0.0 || tol.voltage_fraction < 0.0 {
            return invalid("tolerance fractions cannot be negative");
        }

        if self.gas_flow.min_l_min >= self.gas_flow.max_l_min {
            return invalid("gas flow band needs min < max");
        }
        Ok(())
    }
}

fn is_fraction(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}

fn check_thresholds(joint: &str, thresholds: &[f64]) -> Result<(), WpsError> {
    if thresholds.is_empty() || thresholds[0] <= 0.0 {
        return invalid(format!("{} pass thresholds must start above zero", joint));
    }
    if thresholds.windows(2).any(|w| w[0] >= w[1]) {
        return invalid(format!("{} pass thresholds must be ascending", joint));
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> Result<(), WpsError> {
    Err(WpsError::InvalidRules(message.into()))
}
