//! Type definitions for the WPS recommendation engine.
//!
//! Configuration types are deserialized from `wps_rules.toml`. Input types
//! mirror the JSON the hosting application sends (camelCase field names).
//! Output types live in [`super::recommendation`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::WpsError;

// =============================================================================
// CONFIGURATION TYPES (loaded from TOML)
// =============================================================================

/// Root configuration loaded from wps_rules.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// Thermal efficiency used when the process code is not in the catalogue
    pub default_efficiency: f64,
    /// Label used when the plan has a single pass
    pub single_pass_label: String,
    pub limits: InputLimits,
    /// ISO 15608 group partition into welding families
    pub families: Vec<FamilyDefinition>,
    /// Process catalogue keyed by ISO 4063 code (e.g., "135")
    pub processes: HashMap<String, ProcessInfo>,
    /// Position derating keyed by position code (e.g., "PA")
    pub positions: HashMap<String, PositionModifier>,
    /// Process/polarity rules, first match wins
    pub process_rules: Vec<ProcessRule>,
    /// Used when no process rule matches the material
    pub process_fallback: ProcessBand,
    pub filler: FillerRule,
    /// Shielding gas family rules, first match wins
    #[serde(default)]
    pub gas_rules: Vec<GasRule>,
    pub gas_flow: GasFlowRule,
    #[serde(default)]
    pub temperature_rules: Vec<TemperatureRule>,
    pub pass_count: PassCountRules,
    /// Electrical curves per wire diameter
    pub wire_curves: Vec<WireCurve>,
    pub pass_roles: PassRoles,
    pub tolerance: ToleranceRule,
    pub notes: NotesLibrary,
}

/// Bounds on accepted inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct InputLimits {
    /// Thickest section the pass-count rules are trusted for
    pub max_thickness_mm: f64,
}

/// Welding family of a base material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialFamily {
    CarbonSteel,
    AusteniticStainless,
    DuplexStainless,
    Aluminum,
}

/// Groups belonging to one material family.
#[derive(Debug, Clone, Deserialize)]
pub struct FamilyDefinition {
    pub family: MaterialFamily,
    pub groups: Vec<String>,
}

/// Catalogue entry for a welding process.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessInfo {
    /// Short display name (e.g., "MAG")
    pub name: String,
    /// Thermal efficiency used in the heat input formula
    pub efficiency: f64,
    /// Multiplier on the curve current (TIG runs colder than MAG)
    #[serde(default = "unit_factor")]
    pub current_factor: f64,
    /// Multiplier on the curve voltage
    #[serde(default = "unit_factor")]
    pub voltage_factor: f64,
}

/// Multiplicative derating coefficients for one welding position.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PositionModifier {
    pub amperage_factor: f64,
    pub voltage_factor: f64,
    pub speed_factor: f64,
}

impl PositionModifier {
    /// The flat position: no derating.
    pub const REFERENCE: PositionModifier = PositionModifier {
        amperage_factor: 1.0,
        voltage_factor: 1.0,
        speed_factor: 1.0,
    };
}

/// Electrode polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    #[serde(rename = "DC+")]
    DcPositive,
    #[serde(rename = "DC-")]
    DcNegative,
    #[serde(rename = "AC")]
    Ac,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Polarity::DcPositive => "DC+",
            Polarity::DcNegative => "DC-",
            Polarity::Ac => "AC",
        };
        f.write_str(s)
    }
}

/// A rule band that applies up to an optional thickness limit.
///
/// Bands are checked in order; a band without a limit always matches, so it
/// belongs at the end of its list.
pub trait ThicknessBand {
    fn max_thickness_mm(&self) -> Option<f64>;

    /// Whether the limit itself belongs to the band (`t <= max` vs `t < max`).
    fn inclusive(&self) -> bool {
        true
    }

    fn covers(&self, thickness_mm: f64) -> bool {
        match self.max_thickness_mm() {
            None => true,
            Some(max) if self.inclusive() => thickness_mm <= max,
            Some(max) => thickness_mm < max,
        }
    }
}

/// Pick the first band covering the thickness.
pub fn select_band<B: ThicknessBand>(bands: &[B], thickness_mm: f64) -> Option<&B> {
    bands.iter().find(|b| b.covers(thickness_mm))
}

/// Whether a rule's material selector matches a group.
///
/// An empty selector (no families and no groups) matches every material.
pub fn selects_material(
    families: &[MaterialFamily],
    groups: &[String],
    group: &str,
    family: Option<MaterialFamily>,
) -> bool {
    if families.is_empty() && groups.is_empty() {
        return true;
    }
    groups.iter().any(|g| g == group) || family.is_some_and(|f| families.contains(&f))
}

/// Process selection rule for a set of materials.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRule {
    #[serde(default)]
    pub families: Vec<MaterialFamily>,
    #[serde(default)]
    pub groups: Vec<String>,
    pub bands: Vec<ProcessBand>,
}

/// Process and polarity chosen within a thickness band.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessBand {
    #[serde(default)]
    pub max_thickness_mm: Option<f64>,
    #[serde(default = "default_true")]
    pub inclusive: bool,
    pub process: String,
    pub polarity: Polarity,
    /// Explanation recorded in the reasoning trail
    pub rationale: String,
}

impl ThicknessBand for ProcessBand {
    fn max_thickness_mm(&self) -> Option<f64> {
        self.max_thickness_mm
    }

    fn inclusive(&self) -> bool {
        self.inclusive
    }
}

/// Filler wire diameter rule.
#[derive(Debug, Clone, Deserialize)]
pub struct FillerRule {
    /// Thickness up to which the thin wire is used
    pub thin_max_thickness_mm: f64,
    pub thin_diameter_mm: f64,
    pub thick_diameter_mm: f64,
    /// Positions that force the out-of-position diameter
    pub out_of_position: Vec<PositionCode>,
    pub out_of_position_diameter_mm: f64,
}

/// Shielding gas family rule keyed on process and material.
#[derive(Debug, Clone, Deserialize)]
pub struct GasRule {
    /// Process codes this rule applies to (empty = any)
    #[serde(default)]
    pub processes: Vec<String>,
    #[serde(default)]
    pub families: Vec<MaterialFamily>,
    #[serde(default)]
    pub groups: Vec<String>,
    pub bands: Vec<GasBand>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GasBand {
    #[serde(default)]
    pub max_thickness_mm: Option<f64>,
    #[serde(default = "default_true")]
    pub inclusive: bool,
    /// Gas family code, prefix-matched against catalogue names
    pub gas: String,
    pub rationale: String,
}

impl ThicknessBand for GasBand {
    fn max_thickness_mm(&self) -> Option<f64> {
        self.max_thickness_mm
    }

    fn inclusive(&self) -> bool {
        self.inclusive
    }
}

/// Shielding gas flow band in L/min.
#[derive(Debug, Clone, Deserialize)]
pub struct GasFlowRule {
    pub min_l_min: f64,
    pub max_l_min: f64,
    pub rationale: String,
}

/// Preheat/interpass temperature rule for a set of materials.
#[derive(Debug, Clone, Deserialize)]
pub struct TemperatureRule {
    #[serde(default)]
    pub families: Vec<MaterialFamily>,
    #[serde(default)]
    pub groups: Vec<String>,
    /// Interpass ceiling, independent of thickness
    pub interpass: String,
    pub rationale: String,
    pub bands: Vec<PreheatBand>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreheatBand {
    #[serde(default)]
    pub max_thickness_mm: Option<f64>,
    #[serde(default = "default_true")]
    pub inclusive: bool,
    pub preheat: String,
}

impl ThicknessBand for PreheatBand {
    fn max_thickness_mm(&self) -> Option<f64> {
        self.max_thickness_mm
    }

    fn inclusive(&self) -> bool {
        self.inclusive
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PassCountRules {
    pub butt: ButtPassRule,
    pub fillet: FilletPassRule,
}

/// Butt joints: one pass per threshold, then one extra pass per step.
#[derive(Debug, Clone, Deserialize)]
pub struct ButtPassRule {
    /// Ascending thickness limits; `t <= thresholds[i]` gives `i + 1` passes
    pub thresholds_mm: Vec<f64>,
    /// Thickness added per extra pass beyond the last threshold
    pub extra_pass_step_mm: f64,
}

/// Fillet joints: pass count from throat thickness, capped at the last band.
#[derive(Debug, Clone, Deserialize)]
pub struct FilletPassRule {
    /// Throat thickness as a fraction of plate thickness
    pub throat_factor: f64,
    pub thresholds_mm: Vec<f64>,
}

/// Interpolation anchors for one wire diameter.
///
/// Current is interpolated over thickness; voltage and travel speed are then
/// interpolated over that current.
#[derive(Debug, Clone, Deserialize)]
pub struct WireCurve {
    pub diameter_mm: f64,
    pub thickness_mm: [f64; 2],
    pub current_a: [f64; 2],
    pub voltage_v: [f64; 2],
    pub travel_speed_mm_min: [f64; 2],
}

#[derive(Debug, Clone, Deserialize)]
pub struct PassRoles {
    pub root: RoleModifier,
    pub fill: RoleModifier,
    pub cap: RoleModifier,
}

/// Label and multipliers applied to one pass role.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleModifier {
    pub label: String,
    #[serde(default = "unit_factor")]
    pub current_factor: f64,
    #[serde(default = "unit_factor")]
    pub voltage_factor: f64,
    #[serde(default = "unit_factor")]
    pub speed_factor: f64,
}

/// Symmetric tolerance band published around the average values.
#[derive(Debug, Clone, Deserialize)]
pub struct ToleranceRule {
    pub current_floor_a: f64,
    pub current_fraction: f64,
    pub voltage_floor_v: f64,
    pub voltage_fraction: f64,
}

/// Procedural guidance for the welder.
#[derive(Debug, Clone, Deserialize)]
pub struct NotesLibrary {
    pub general: Vec<String>,
    #[serde(default)]
    pub position: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub material: Vec<MaterialNotes>,
    #[serde(default)]
    pub process: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaterialNotes {
    pub families: Vec<MaterialFamily>,
    pub notes: Vec<String>,
}

fn unit_factor() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

// =============================================================================
// INPUT TYPES (from the hosting application)
// =============================================================================

/// Standard welding position (ISO 6947).
///
/// Unknown codes are kept as `Other` and weld like the flat position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PositionCode {
    /// Flat
    PA,
    /// Horizontal fillet
    PB,
    /// Horizontal
    PC,
    /// Overhead fillet
    PD,
    /// Overhead
    PE,
    /// Vertical up
    PF,
    /// Vertical down
    PG,
    Other(String),
}

impl PositionCode {
    /// Parse a position code, ignoring case and surrounding whitespace.
    pub fn from_code(input: &str) -> PositionCode {
        match input.trim().to_uppercase().as_str() {
            "PA" => PositionCode::PA,
            "PB" => PositionCode::PB,
            "PC" => PositionCode::PC,
            "PD" => PositionCode::PD,
            "PE" => PositionCode::PE,
            "PF" => PositionCode::PF,
            "PG" => PositionCode::PG,
            _ => PositionCode::Other(input.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PositionCode::PA => "PA",
            PositionCode::PB => "PB",
            PositionCode::PC => "PC",
            PositionCode::PD => "PD",
            PositionCode::PE => "PE",
            PositionCode::PF => "PF",
            PositionCode::PG => "PG",
            PositionCode::Other(code) => code,
        }
    }
}

impl From<String> for PositionCode {
    fn from(value: String) -> Self {
        PositionCode::from_code(&value)
    }
}

impl From<PositionCode> for String {
    fn from(value: PositionCode) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JointType {
    Butt,
    Fillet,
}

/// Base material identified by its ISO 15608 group (e.g., "1.1", "8.1").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSpec {
    pub standard_group: String,
}

/// Everything the engine needs to know about the weld.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeldingInputs {
    /// Missing material short-circuits to an empty recommendation
    #[serde(default)]
    pub material: Option<MaterialSpec>,
    pub thickness_mm: f64,
    pub position: PositionCode,
    pub joint_type: JointType,
    #[serde(default)]
    pub joint_detail: Option<String>,
    /// Groove angle in degrees
    #[serde(default)]
    pub joint_angle: Option<f64>,
    #[serde(default)]
    pub root_gap_mm: Option<f64>,
    /// Overrides the suggested process for every downstream step
    #[serde(default)]
    pub preferred_process_code: Option<String>,
}

impl WeldingInputs {
    /// The material group, if a non-blank one was supplied.
    pub fn material_group(&self) -> Option<&str> {
        self.material
            .as_ref()
            .map(|m| m.standard_group.trim())
            .filter(|g| !g.is_empty())
    }

    /// The preferred process code, if a non-blank one was supplied.
    pub fn preferred_process(&self) -> Option<&str> {
        self.preferred_process_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Check the numeric inputs before handing them to the engine.
    pub fn validate(&self, limits: &InputLimits) -> Result<(), WpsError> {
        if !self.thickness_mm.is_finite() || self.thickness_mm <= 0.0 {
            return Err(WpsError::InvalidInput(format!(
                "thickness must be a positive number of mm, got {}",
                self.thickness_mm
            )));
        }
        if self.thickness_mm > limits.max_thickness_mm {
            return Err(WpsError::InvalidInput(format!(
                "thickness {}mm exceeds the supported maximum of {}mm",
                self.thickness_mm, limits.max_thickness_mm
            )));
        }
        if let Some(gap) = self.root_gap_mm {
            if !gap.is_finite() || gap < 0.0 {
                return Err(WpsError::InvalidInput(format!(
                    "root gap cannot be negative, got {}",
                    gap
                )));
            }
        }
        Ok(())
    }
}

/// Filler material catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillerMaterial {
    pub id: String,
    /// Standard classification (e.g., "ISO 14341-A G 42 4 M21 3Si1")
    pub classification: String,
    /// ISO 15608 groups this filler may be used on
    pub compatible_groups: Vec<String>,
}

/// Shielding gas catalogue entry. The name starts with its family code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShieldingGas {
    pub id: String,
    pub name: String,
}

/// Read-only reference data owned by the hosting application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalogs {
    #[serde(default)]
    pub filler_materials: Vec<FillerMaterial>,
    #[serde(default)]
    pub shielding_gases: Vec<ShieldingGas>,
}

/// A complete request: weld inputs plus the catalogues to choose from.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub inputs: WeldingInputs,
    #[serde(default)]
    pub catalogs: Catalogs,
}
