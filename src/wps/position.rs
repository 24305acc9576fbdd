//! Welding position derating lookup.

use std::collections::HashMap;

use tracing::warn;

use super::types::{PositionCode, PositionModifier};

/// Derating factors for a position.
///
/// Unknown codes (or codes missing from the table) weld like the flat
/// position `PA`.
pub fn modifiers_for(
    table: &HashMap<String, PositionModifier>,
    position: &PositionCode,
) -> PositionModifier {
    if let Some(modifier) = table.get(position.as_str()) {
        return *modifier;
    }
    warn!(
        "No derating defined for position '{}', using flat position factors",
        position
    );
    table
        .get(PositionCode::PA.as_str())
        .copied()
        .unwrap_or(PositionModifier::REFERENCE)
}
