//! Cable Ampacity and Conductor Properties
//!
//! Current-carrying capacity of PVC-insulated multi-core cables (IEC
//! 60364-5-52 reference methods), by conductor cross-section, material and
//! installation method. Open-air and conduit capacities are separate tables.
//!
//! ## Resistivity
//!
//! Conductor resistivity is taken at 70 °C operating temperature:
//!
//! | Material  | ρ (Ω·mm²/m) |
//! |-----------|-------------|
//! | Copper    | 0.0225      |
//! | Aluminum  | 0.036       |

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::selector::ceiling_index_by;

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ConductorMaterial {
    /// Copper
    #[default]
    #[serde(rename = "Cu")]
    Copper,
    /// Aluminum
    #[serde(rename = "Al")]
    Aluminum,
}

impl ConductorMaterial {
    /// Wire tokens, in declaration order
    pub const TOKENS: [&'static str; 2] = ["Cu", "Al"];

    /// Resistivity at 70 °C in Ω·mm²/m
    pub fn resistivity_ohm_mm2_per_m(&self) -> f64 {
        match self {
            ConductorMaterial::Copper => 0.0225,
            ConductorMaterial::Aluminum => 0.036,
        }
    }

    /// Ampacity table for this material and installation method, ascending
    /// in cross-section
    pub fn ampacity_table(&self, mounting: Mounting) -> &'static [AmpacityEntry] {
        match (self, mounting) {
            (ConductorMaterial::Copper, Mounting::Open) => COPPER_OPEN_AIR,
            (ConductorMaterial::Copper, Mounting::Conduit) => COPPER_CONDUIT,
            (ConductorMaterial::Aluminum, Mounting::Open) => ALUMINUM_OPEN_AIR,
            (ConductorMaterial::Aluminum, Mounting::Conduit) => ALUMINUM_CONDUIT,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Copper",
            ConductorMaterial::Aluminum => "Aluminum",
        }
    }
}

/// Cable installation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mounting {
    /// Clipped direct / open air
    #[default]
    Open,
    /// Enclosed in conduit or trunking
    Conduit,
}

impl Mounting {
    /// Wire tokens, in declaration order
    pub const TOKENS: [&'static str; 2] = ["open", "conduit"];
}

/// One row of an ampacity table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmpacityEntry {
    /// Conductor cross-section (mm²)
    pub cross_section_mm2: f64,
    /// Continuous current capacity (A)
    pub ampacity_a: f64,
}

const fn entry(cross_section_mm2: f64, ampacity_a: f64) -> AmpacityEntry {
    AmpacityEntry {
        cross_section_mm2,
        ampacity_a,
    }
}

/// Copper conductors, open-air installation
pub static COPPER_OPEN_AIR: &[AmpacityEntry] = &[
    entry(1.5, 19.5),
    entry(2.5, 27.0),
    entry(4.0, 36.0),
    entry(6.0, 46.0),
    entry(10.0, 65.0),
    entry(16.0, 87.0),
    entry(25.0, 114.0),
    entry(35.0, 141.0),
    entry(50.0, 182.0),
    entry(70.0, 234.0),
    entry(95.0, 284.0),
    entry(120.0, 330.0),
    entry(150.0, 381.0),
    entry(185.0, 436.0),
    entry(240.0, 515.0),
];

/// Aluminum conductors, open-air installation (no 1.5 mm² size)
pub static ALUMINUM_OPEN_AIR: &[AmpacityEntry] = &[
    entry(2.5, 21.0),
    entry(4.0, 28.0),
    entry(6.0, 36.0),
    entry(10.0, 50.0),
    entry(16.0, 67.0),
    entry(25.0, 88.0),
    entry(35.0, 109.0),
    entry(50.0, 140.0),
    entry(70.0, 181.0),
    entry(95.0, 220.0),
    entry(120.0, 255.0),
    entry(150.0, 294.0),
    entry(185.0, 337.0),
    entry(240.0, 398.0),
];

/// Copper conductors, enclosed in conduit
pub static COPPER_CONDUIT: &[AmpacityEntry] = &[
    entry(1.5, 15.0),
    entry(2.5, 21.0),
    entry(4.0, 28.0),
    entry(6.0, 36.0),
    entry(10.0, 50.0),
    entry(16.0, 68.0),
    entry(25.0, 89.0),
    entry(35.0, 110.0),
    entry(50.0, 134.0),
    entry(70.0, 171.0),
    entry(95.0, 207.0),
    entry(120.0, 239.0),
    entry(150.0, 275.0),
    entry(185.0, 314.0),
    entry(240.0, 370.0),
];

/// Aluminum conductors, enclosed in conduit
pub static ALUMINUM_CONDUIT: &[AmpacityEntry] = &[
    entry(2.5, 16.5),
    entry(4.0, 22.0),
    entry(6.0, 28.0),
    entry(10.0, 39.0),
    entry(16.0, 53.0),
    entry(25.0, 70.0),
    entry(35.0, 86.0),
    entry(50.0, 104.0),
    entry(70.0, 133.0),
    entry(95.0, 161.0),
    entry(120.0, 186.0),
    entry(150.0, 215.0),
    entry(185.0, 245.0),
    entry(240.0, 289.0),
];

/// Cross-sections are compared with this tolerance so that 2.5 parsed from
/// JSON matches the table's 2.5 regardless of representation.
const SECTION_TOLERANCE_MM2: f64 = 1e-6;

/// Ampacity for a cross-section, or `None` if the size is not catalogued
/// for this material.
pub fn ampacity(
    cross_section_mm2: f64,
    material: ConductorMaterial,
    mounting: Mounting,
) -> Option<f64> {
    material
        .ampacity_table(mounting)
        .iter()
        .find(|e| (e.cross_section_mm2 - cross_section_mm2).abs() < SECTION_TOLERANCE_MM2)
        .map(|e| e.ampacity_a)
}

/// Catalogued cross-sections for a material, ascending
pub fn cross_sections(material: ConductorMaterial) -> Vec<f64> {
    material
        .ampacity_table(Mounting::Open)
        .iter()
        .map(|e| e.cross_section_mm2)
        .collect()
}

/// Smallest cross-section whose ampacity carries `required_a`.
pub fn smallest_section_for(
    required_a: f64,
    material: ConductorMaterial,
    mounting: Mounting,
) -> CalcResult<AmpacityEntry> {
    let table = material.ampacity_table(mounting);
    let idx = ceiling_index_by(table, |e| e.ampacity_a, required_a).ok_or_else(|| {
        let largest = table.last().map(|e| e.ampacity_a).unwrap_or(0.0);
        CalcError::range_exceeded(
            format!("{} cable ampacity", material.display_name().to_lowercase()),
            required_a,
            largest,
        )
    })?;
    Ok(table[idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_ascending_in_both_columns() {
        for material in [ConductorMaterial::Copper, ConductorMaterial::Aluminum] {
            for mounting in [Mounting::Open, Mounting::Conduit] {
                let table = material.ampacity_table(mounting);
                assert!(table
                    .windows(2)
                    .all(|w| w[0].cross_section_mm2 < w[1].cross_section_mm2
                        && w[0].ampacity_a < w[1].ampacity_a));
            }
        }
    }

    #[test]
    fn test_conduit_tables_cover_same_sizes_below_open_air() {
        for material in [ConductorMaterial::Copper, ConductorMaterial::Aluminum] {
            let open = material.ampacity_table(Mounting::Open);
            let conduit = material.ampacity_table(Mounting::Conduit);
            assert_eq!(open.len(), conduit.len());
            for (o, c) in open.iter().zip(conduit) {
                assert_eq!(o.cross_section_mm2, c.cross_section_mm2);
                assert!(c.ampacity_a < o.ampacity_a);
            }
        }
    }

    #[test]
    fn test_lookup_by_section() {
        use ConductorMaterial::{Aluminum, Copper};
        assert_eq!(ampacity(2.5, Copper, Mounting::Open), Some(27.0));
        assert_eq!(ampacity(2.5, Aluminum, Mounting::Open), Some(21.0));
        assert_eq!(ampacity(240.0, Copper, Mounting::Conduit), Some(370.0));
        assert_eq!(ampacity(185.0, Aluminum, Mounting::Conduit), Some(245.0));
        assert_eq!(ampacity(2.5, Aluminum, Mounting::Conduit), Some(16.5));
        assert_eq!(ampacity(1.5, Aluminum, Mounting::Open), None);
        assert_eq!(ampacity(3.0, Copper, Mounting::Conduit), None);
    }

    #[test]
    fn test_smallest_section_for_current() {
        let e = smallest_section_for(30.0, ConductorMaterial::Copper, Mounting::Open).unwrap();
        assert_eq!(e.cross_section_mm2, 4.0);
        // In conduit 4 mm² carries only 28 A
        let e = smallest_section_for(30.0, ConductorMaterial::Copper, Mounting::Conduit).unwrap();
        assert_eq!(e.cross_section_mm2, 6.0);
        assert_eq!(e.ampacity_a, 36.0);
    }

    #[test]
    fn test_smallest_section_out_of_range() {
        let err =
            smallest_section_for(600.0, ConductorMaterial::Copper, Mounting::Open).unwrap_err();
        assert_eq!(err.error_code(), "RANGE_EXCEEDED");
    }

    #[test]
    fn test_material_tokens() {
        let json = serde_json::to_string(&ConductorMaterial::Aluminum).unwrap();
        assert_eq!(json, "\"Al\"");
        let parsed: ConductorMaterial = serde_json::from_str("\"Cu\"").unwrap();
        assert_eq!(parsed, ConductorMaterial::Copper);
    }
}
