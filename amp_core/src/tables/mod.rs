//! # Standard Tables
//!
//! Immutable engineering lookup tables and the ceiling selector that picks
//! standard ratings from them. Tables are `static` data: built into the
//! binary, shared read-only by every calculation, never mutated.
//!
//! ## Contents
//!
//! - [`ratings`] - Breaker, contactor, transformer, generator and capacitor steps
//! - [`cables`] - Conductor materials, resistivity and ampacity by mounting
//! - [`awg`] - American Wire Gauge ↔ mm² table
//! - [`lighting`] - Utilization factors by room index and reflectance
//! - [`derating`] - Altitude and temperature derating curves
//! - [`selector`] - Ceiling selection (smallest standard value ≥ requirement)
//!
//! ## Example
//!
//! ```rust
//! use amp_core::tables::ratings::TRANSFORMER_KVA;
//!
//! // 290 kVA design load selects a 315 kVA unit
//! assert_eq!(TRANSFORMER_KVA.select(290.0).unwrap(), 315.0);
//! ```

pub mod awg;
pub mod cables;
pub mod derating;
pub mod lighting;
pub mod ratings;
pub mod selector;

pub use awg::{awg_to_mm2, nearest_awg, AwgGauge, AWG_TABLE};
pub use cables::{ampacity, AmpacityEntry, ConductorMaterial, Mounting};
pub use derating::{CurvePoint, DeratingCurve};
pub use lighting::{utilization_factor, Reflectance};
pub use selector::select_ceiling;

use serde::Serialize;

use crate::errors::CalcResult;

/// A named, ascending table of standard ratings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StandardTable {
    /// Name used in error payloads, e.g. "breaker"
    pub name: &'static str,
    /// Unit of the values, e.g. "A" or "kVA"
    pub unit: &'static str,
    /// Ratings, strictly ascending
    pub values: &'static [f64],
}

impl StandardTable {
    /// Create a table. `values` must be strictly ascending.
    pub const fn new(name: &'static str, unit: &'static str, values: &'static [f64]) -> Self {
        StandardTable { name, unit, values }
    }

    /// Smallest rating ≥ `required` (see [`selector::select_ceiling`])
    pub fn select(&self, required: f64) -> CalcResult<f64> {
        selector::select_ceiling(self, required)
    }

    /// Whether `value` is one of the standard ratings
    pub fn contains(&self, value: f64) -> bool {
        self.values.iter().any(|v| *v == value)
    }

    /// Largest rating in the table
    pub fn max(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }
}

/// Snapshot of every table, for listing by external tools.
#[derive(Debug, Clone, Serialize)]
pub struct TableCatalog {
    pub ratings: Vec<StandardTable>,
    pub copper_open_air: &'static [AmpacityEntry],
    pub aluminum_open_air: &'static [AmpacityEntry],
    pub copper_conduit: &'static [AmpacityEntry],
    pub aluminum_conduit: &'static [AmpacityEntry],
    pub awg: &'static [AwgGauge],
    pub utilization_factors: &'static [lighting::UtilizationRow],
    pub altitude_derating: DeratingCurve,
    pub temperature_derating: DeratingCurve,
}

/// Collect the built-in tables into one serializable catalog
pub fn catalog() -> TableCatalog {
    TableCatalog {
        ratings: ratings::ALL.to_vec(),
        copper_open_air: cables::COPPER_OPEN_AIR,
        aluminum_open_air: cables::ALUMINUM_OPEN_AIR,
        copper_conduit: cables::COPPER_CONDUIT,
        aluminum_conduit: cables::ALUMINUM_CONDUIT,
        awg: awg::AWG_TABLE,
        utilization_factors: lighting::UTILIZATION_FACTORS,
        altitude_derating: derating::altitude_curve(),
        temperature_derating: derating::temperature_curve(),
    }
}
