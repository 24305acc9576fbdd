//! Welder notes: general, then position, then material, then process.
//!
//! Categories may repeat the same advice; nothing is de-duplicated.

use super::material::family_of;
use super::types::{PositionCode, RulesConfig};

pub fn notes_for(
    rules: &RulesConfig,
    position: &PositionCode,
    group: &str,
    process_code: &str,
) -> Vec<String> {
    let library = &rules.notes;
    let mut notes = library.general.clone();

    if let Some(positional) = library.position.get(position.as_str()) {
        notes.extend(positional.iter().cloned());
    }

    if let Some(family) = family_of(rules, group) {
        if let Some(material) = library.material.iter().find(|m| m.families.contains(&family)) {
            notes.extend(material.notes.iter().cloned());
        }
    }

    if let Some(process) = library.process.get(process_code) {
        notes.extend(process.iter().cloned());
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wps::default_rules;

    #[test]
    fn test_order_general_position_material_process() {
        let rules = default_rules();
        let notes = notes_for(&rules, &PositionCode::PF, "8.1", "141");
        let general = rules.notes.general.len();

        assert_eq!(notes.len(), general + 2 + 2 + 1);
        assert_eq!(notes[..general], rules.notes.general[..]);
        assert!(notes[general].starts_with("PF"));
        assert!(notes[general + 2].starts_with("Paslanmaz"));
        assert!(notes.last().unwrap().starts_with("TIG"));
    }

    #[test]
    fn test_duplex_gets_stainless_notes() {
        let rules = default_rules();
        let notes = notes_for(&rules, &PositionCode::PA, "10.1", "131");
        assert!(notes.iter().any(|n| n.starts_with("Paslanmaz")));
    }

    #[test]
    fn test_position_without_notes() {
        let rules = default_rules();
        let notes = notes_for(&rules, &PositionCode::PD, "1.1", "135");
        let general = rules.notes.general.len();
        assert_eq!(notes.len(), general + 2);
        assert!(notes[general].starts_with("Karbon"));
    }

    #[test]
    fn test_unknown_group_and_process_contribute_nothing() {
        let rules = default_rules();
        let notes = notes_for(&rules, &PositionCode::Other("ZZ".to_string()), "41.1", "135");
        assert_eq!(notes, rules.notes.general);
    }

    #[test]
    fn test_mma_note() {
        let rules = default_rules();
        let notes = notes_for(&rules, &PositionCode::PA, "41.1", "111");
        assert!(notes.last().unwrap().starts_with("MMA"));
    }
}
