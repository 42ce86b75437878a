//! # Transformer Sizing
//!
//! Aggregates a schedule of loads with individual power and demand factors,
//! adds a growth allowance and selects the next standard transformer rating.
//!
//! Each load is converted to kVA on its own before summing. With mixed power
//! factors this is not the same as dividing total kW by an average pf.
//!
//! ## Example
//!
//! ```rust
//! use amp_core::calculations::transformer::{calculate, TransformerInput, TransformerLoad};
//! use amp_core::constants::TransformerConstants;
//!
//! let input = TransformerInput {
//!     loads: vec![
//!         TransformerLoad::new("Lighting", 40.0, 0.95, 1.0),
//!         TransformerLoad::new("HVAC", 150.0, 0.85, 0.8),
//!     ],
//!     growth_margin_pct: 20.0,
//! };
//!
//! let result = calculate(&input, &TransformerConstants::default()).unwrap();
//! assert_eq!(result.selected_kva, 250.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::TransformerConstants;
use crate::equations::{apparent_power_kva, apply_margin, percent_of};
use crate::errors::{CalcError, CalcResult};
use crate::tables::ratings::TRANSFORMER_KVA;
use crate::validation;

/// Largest single load accepted (kW)
const MAX_LOAD_KW: f64 = 10_000.0;

/// One entry of the load schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerLoad {
    /// Load description
    pub name: String,
    /// Connected load (kW)
    pub kw: f64,
    /// Load power factor
    pub power_factor: f64,
    /// Fraction of connected load expected to run simultaneously
    pub demand_factor: f64,
}

impl TransformerLoad {
    pub fn new(name: impl Into<String>, kw: f64, power_factor: f64, demand_factor: f64) -> Self {
        TransformerLoad {
            name: name.into(),
            kw,
            power_factor,
            demand_factor,
        }
    }

    fn validate(&self, index: usize) -> CalcResult<()> {
        let field = |name: &str| format!("loads[{}].{}", index, name);
        validation::positive_at_most(&field("kw"), self.kw, MAX_LOAD_KW)?;
        validation::power_factor(&field("power_factor"), self.power_factor)?;
        validation::finite(&field("demand_factor"), self.demand_factor)?;
        if self.demand_factor <= 0.0 || self.demand_factor > 1.0 {
            return Err(CalcError::invalid_input(
                field("demand_factor"),
                self.demand_factor.to_string(),
                "Demand factor must be greater than 0 and at most 1",
            ));
        }
        Ok(())
    }

    /// Demand kW = kW × demand factor
    pub fn demand_kw(&self) -> f64 {
        self.kw * self.demand_factor
    }

    /// Demand kVA = demand kW / pf
    pub fn demand_kva(&self) -> f64 {
        apparent_power_kva(self.demand_kw(), self.power_factor)
    }
}

/// Input parameters for transformer sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "loads": [
///     { "name": "Lighting", "kw": 40.0, "power_factor": 0.95, "demand_factor": 1.0 },
///     { "name": "HVAC", "kw": 150.0, "power_factor": 0.85, "demand_factor": 0.8 }
///   ],
///   "growth_margin_pct": 20.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerInput {
    /// Load schedule, in entry order; at least one load
    pub loads: Vec<TransformerLoad>,
    /// Future growth allowance (%)
    pub growth_margin_pct: f64,
}

impl TransformerInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.loads.is_empty() {
            return Err(CalcError::invalid_input(
                "loads",
                "[]",
                "At least one load is required",
            ));
        }
        for (index, load) in self.loads.iter().enumerate() {
            load.validate(index)?;
        }
        validation::in_range("growth_margin_pct", self.growth_margin_pct, 0.0, 100.0)?;
        Ok(())
    }
}

/// Demand of one schedule entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadDemand {
    pub name: String,
    pub demand_kw: f64,
    pub demand_kva: f64,
}

/// Results from transformer sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformerResult {
    /// Per-load demand, in schedule order
    pub loads: Vec<LoadDemand>,
    /// Σ demand kW
    pub total_demand_kw: f64,
    /// Σ demand kVA (each load at its own pf)
    pub total_demand_kva: f64,
    /// Demand kVA with growth margin
    pub design_kva: f64,
    /// Selected standard rating (kVA)
    pub selected_kva: f64,
    /// Design kVA as % of the selected rating
    pub loading_pct: f64,
    /// Core losses (W)
    pub no_load_losses_w: f64,
    /// Winding losses at the design loading (W)
    pub load_losses_w: f64,
    /// No-load + load losses (W)
    pub total_losses_w: f64,
    /// Efficiency at design load with the schedule's power factor (%)
    pub efficiency_pct: f64,
}

/// Size a transformer for a load schedule.
pub fn calculate(
    input: &TransformerInput,
    constants: &TransformerConstants,
) -> CalcResult<TransformerResult> {
    input.validate()?;

    let loads: Vec<LoadDemand> = input
        .loads
        .iter()
        .map(|l| LoadDemand {
            name: l.name.clone(),
            demand_kw: l.demand_kw(),
            demand_kva: l.demand_kva(),
        })
        .collect();

    let total_demand_kw: f64 = loads.iter().map(|l| l.demand_kw).sum();
    let total_demand_kva: f64 = loads.iter().map(|l| l.demand_kva).sum();
    let design_kva = apply_margin(total_demand_kva, input.growth_margin_pct);

    let selected_kva = TRANSFORMER_KVA.select(design_kva)?;
    let loading_pct = percent_of(design_kva, selected_kva);

    // Core loss is constant; winding loss scales with the square of loading
    let rating_w = selected_kva * 1000.0;
    let no_load_losses_w = rating_w * constants.no_load_loss_pct / 100.0;
    let load_losses_w =
        rating_w * constants.full_load_loss_pct / 100.0 * (loading_pct / 100.0).powi(2);
    let total_losses_w = no_load_losses_w + load_losses_w;

    let output_w = apply_margin(total_demand_kw, input.growth_margin_pct) * 1000.0;
    let efficiency_pct = percent_of(output_w, output_w + total_losses_w);

    Ok(TransformerResult {
        loads,
        total_demand_kw,
        total_demand_kva,
        design_kva,
        selected_kva,
        loading_pct,
        no_load_losses_w,
        load_losses_w,
        total_losses_w,
        efficiency_pct,
    })
}
