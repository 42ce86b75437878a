//! # UPS Sizing
//!
//! Sizes UPS modules and battery capacity for an IT load with growth and
//! safety margins, for N, N+1 and 2N redundancy.
//!
//! ## Method
//!
//! ```text
//! effective kW = IT kW × (1 + growth) × (1 + safety)
//! required kVA = effective kW / pf
//! battery Ah  = effective kW × 1000 × runtime h / (V_dc × derating)
//! heat BTU/h  = effective kW × (1/η − 1) × 3412.14
//! ```
//!
//! | Redundancy | Units | Per-unit capacity        |
//! |------------|-------|--------------------------|
//! | N          | 1     | full load                |
//! | N+1        | m + 1 | load / m (m = 2 default) |
//! | 2N         | 2     | full load, each path     |
//!
//! Battery capacity is per power path: a 2N system carries this capacity on
//! each of its two independent paths.

use serde::{Deserialize, Serialize};

use crate::constants::UpsConstants;
use crate::equations::{apparent_power_kva, apply_margin, kw_to_btu_per_hour};
use crate::errors::CalcResult;
use crate::validation;

/// Largest IT load accepted (kW)
const MAX_IT_LOAD_KW: f64 = 10_000.0;

/// Selectable runtimes (minutes)
pub const RUNTIME_OPTIONS_MIN: [u32; 12] = [5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60];

/// Selectable growth margins (%)
pub const GROWTH_OPTIONS_PCT: [u32; 4] = [10, 20, 30, 40];

/// Selectable safety margins (%)
pub const SAFETY_OPTIONS_PCT: [u32; 2] = [10, 20];

/// UPS redundancy level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UpsRedundancy {
    /// Single system, no redundancy
    #[serde(rename = "N")]
    N,
    /// Parallel modules plus one spare
    #[serde(rename = "N+1")]
    NPlusOne,
    /// Two fully independent systems
    #[default]
    #[serde(rename = "2N")]
    TwoN,
}

impl UpsRedundancy {
    /// Wire tokens, in declaration order
    pub const TOKENS: [&'static str; 3] = ["N", "N+1", "2N"];

    /// System topology implied by the redundancy level
    pub fn topology(&self) -> UpsTopology {
        match self {
            UpsRedundancy::N => UpsTopology::SinglePath,
            UpsRedundancy::NPlusOne => UpsTopology::ParallelRedundant,
            UpsRedundancy::TwoN => UpsTopology::DualPath,
        }
    }
}

/// UPS system topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpsTopology {
    #[serde(rename = "Single Path")]
    SinglePath,
    #[serde(rename = "Parallel Redundant")]
    ParallelRedundant,
    #[serde(rename = "Dual Path (A+B)")]
    DualPath,
}

/// Input parameters for UPS sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "it_load_kw": 100.0,
///   "runtime_min": 10,
///   "redundancy": "2N",
///   "power_factor": 0.9,
///   "growth_margin_pct": 20,
///   "safety_margin_pct": 10
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsInput {
    /// Critical IT load (kW)
    pub it_load_kw: f64,

    /// Required battery autonomy (minutes), one of [`RUNTIME_OPTIONS_MIN`]
    pub runtime_min: u32,

    /// Redundancy level
    pub redundancy: UpsRedundancy,

    /// Load power factor
    pub power_factor: f64,

    /// Future growth allowance (%), one of [`GROWTH_OPTIONS_PCT`]
    pub growth_margin_pct: u32,

    /// Design safety allowance (%), one of [`SAFETY_OPTIONS_PCT`]
    pub safety_margin_pct: u32,
}

impl UpsInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive_at_most("it_load_kw", self.it_load_kw, MAX_IT_LOAD_KW)?;
        validation::one_of("runtime_min", self.runtime_min, &RUNTIME_OPTIONS_MIN)?;
        validation::power_factor("power_factor", self.power_factor)?;
        validation::one_of("growth_margin_pct", self.growth_margin_pct, &GROWTH_OPTIONS_PCT)?;
        validation::one_of("safety_margin_pct", self.safety_margin_pct, &SAFETY_OPTIONS_PCT)?;
        Ok(())
    }

    /// IT load with growth and safety margins applied (kW)
    pub fn effective_load_kw(&self) -> f64 {
        let grown = apply_margin(self.it_load_kw, f64::from(self.growth_margin_pct));
        apply_margin(grown, f64::from(self.safety_margin_pct))
    }
}

/// Results from UPS sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "topology": "Dual Path (A+B)",
///   "effective_load_kw": 132.0,
///   "required_kva": 146.67,
///   "ups_unit_min_kw": 132.0,
///   "ups_unit_min_kva": 146.67,
///   "unit_count": 2,
///   "installed_kw": 264.0,
///   "installed_kva": 293.33,
///   "total_battery_ah": 49.82,
///   "heat_dissipation_btu_h": 39164.8,
///   "power_factor": 0.9,
///   "growth_margin_pct": 20,
///   "safety_margin_pct": 10
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsResult {
    /// System topology for the redundancy level
    pub topology: UpsTopology,

    /// IT load with margins (kW)
    pub effective_load_kw: f64,

    /// Apparent power the system must deliver (kVA)
    pub required_kva: f64,

    /// Minimum rating of each UPS unit (kW)
    pub ups_unit_min_kw: f64,

    /// Minimum rating of each UPS unit (kVA)
    pub ups_unit_min_kva: f64,

    /// Number of UPS units including redundant ones
    pub unit_count: u32,

    /// Total installed capacity (kW)
    pub installed_kw: f64,

    /// Total installed capacity (kVA)
    pub installed_kva: f64,

    /// Battery capacity per power path (Ah at the DC bus voltage)
    pub total_battery_ah: f64,

    /// UPS heat rejection at the effective load (BTU/h)
    pub heat_dissipation_btu_h: f64,

    /// Echoed power factor
    pub power_factor: f64,

    /// Echoed growth margin (%)
    pub growth_margin_pct: u32,

    /// Echoed safety margin (%)
    pub safety_margin_pct: u32,
}

/// Size a UPS system.
pub fn calculate(input: &UpsInput, constants: &UpsConstants) -> CalcResult<UpsResult> {
    input.validate()?;

    let effective_load_kw = input.effective_load_kw();
    let required_kva = apparent_power_kva(effective_load_kw, input.power_factor);

    let (ups_unit_min_kw, unit_count) = match input.redundancy {
        UpsRedundancy::N => (effective_load_kw, 1),
        UpsRedundancy::NPlusOne => {
            let working = constants.n_plus_one_modules;
            (effective_load_kw / f64::from(working), working + 1)
        }
        UpsRedundancy::TwoN => (effective_load_kw, 2),
    };
    let ups_unit_min_kva = apparent_power_kva(ups_unit_min_kw, input.power_factor);
    let installed_kw = ups_unit_min_kw * f64::from(unit_count);

    let runtime_h = f64::from(input.runtime_min) / 60.0;
    let total_battery_ah = effective_load_kw * 1000.0 * runtime_h
        / (constants.dc_bus_voltage_v * constants.battery_derating);

    let losses_kw = effective_load_kw * (1.0 / constants.efficiency - 1.0);

    Ok(UpsResult {
        topology: input.redundancy.topology(),
        effective_load_kw,
        required_kva,
        ups_unit_min_kw,
        ups_unit_min_kva,
        unit_count,
        installed_kw,
        installed_kva: apparent_power_kva(installed_kw, input.power_factor),
        total_battery_ah,
        heat_dissipation_btu_h: kw_to_btu_per_hour(losses_kw),
        power_factor: input.power_factor,
        growth_margin_pct: input.growth_margin_pct,
        safety_margin_pct: input.safety_margin_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ups() -> UpsInput {
        UpsInput {
            it_load_kw: 100.0,
            runtime_min: 10,
            redundancy: UpsRedundancy::TwoN,
            power_factor: 0.9,
            growth_margin_pct: 20,
            safety_margin_pct: 10,
        }
    }

    fn run(input: &UpsInput) -> UpsResult {
        calculate(input, &UpsConstants::default()).unwrap()
    }

    #[test]
    fn test_reference_2n_system() {
        let result = run(&test_ups());

        // 100 × 1.2 × 1.1 = 132 kW, 132 / 0.9 = 146.67 kVA
        assert!((result.effective_load_kw - 132.0).abs() < 1e-9);
        assert!((result.required_kva - 146.667).abs() < 0.001);

        // 2N: two units, each carrying the full load
        assert_eq!(result.unit_count, 2);
        assert!((result.ups_unit_min_kw - 132.0).abs() < 1e-9);
        assert!((result.ups_unit_min_kva - 146.667).abs() < 0.001);
        assert!((result.installed_kw - 264.0).abs() < 1e-9);
        assert_eq!(result.topology, UpsTopology::DualPath);

        // 132000 × (10/60) / (480 × 0.92) = 49.82 Ah
        assert!((result.total_battery_ah - 49.82).abs() < 0.01);

        // Losses 132 × (1/0.92 − 1) = 11.478 kW
        assert!((result.heat_dissipation_btu_h - 39_165.0).abs() < 5.0);
    }

    #[test]
    fn test_n_plus_one_splits_load() {
        let mut input = test_ups();
        input.redundancy = UpsRedundancy::NPlusOne;
        let result = run(&input);
        assert_eq!(result.unit_count, 3);
        assert!((result.ups_unit_min_kw - 66.0).abs() < 1e-9);
        assert!((result.installed_kw - 198.0).abs() < 1e-9);
        assert_eq!(result.topology, UpsTopology::ParallelRedundant);
    }

    #[test]
    fn test_n_single_unit() {
        let mut input = test_ups();
        input.redundancy = UpsRedundancy::N;
        let result = run(&input);
        assert_eq!(result.unit_count, 1);
        assert_eq!(result.installed_kw, result.ups_unit_min_kw);
    }

    #[test]
    fn test_battery_monotone_in_runtime_and_load() {
        let mut prev = 0.0;
        for runtime in RUNTIME_OPTIONS_MIN {
            let mut input = test_ups();
            input.runtime_min = runtime;
            let ah = run(&input).total_battery_ah;
            assert!(ah >= prev);
            prev = ah;
        }

        let mut prev = 0.0;
        for load in [1.0, 5.0, 20.0, 100.0, 250.0, 1000.0] {
            let mut input = test_ups();
            input.it_load_kw = load;
            let ah = run(&input).total_battery_ah;
            assert!(ah >= prev);
            prev = ah;
        }
    }

    #[test]
    fn test_discrete_options_enforced() {
        let mut input = test_ups();
        input.runtime_min = 7;
        let err = calculate(&input, &UpsConstants::default()).unwrap_err();
        assert_eq!(err.error_code(), "UNRECOGNIZED_OPTION");
        assert_eq!(err.field(), Some("runtime_min"));

        let mut input = test_ups();
        input.safety_margin_pct = 30;
        assert!(calculate(&input, &UpsConstants::default()).is_err());
    }

    #[test]
    fn test_redundancy_tokens() {
        let json = serde_json::to_value(&test_ups()).unwrap();
        assert_eq!(json["redundancy"], "2N");
        let parsed: UpsRedundancy = serde_json::from_str("\"N+1\"").unwrap();
        assert_eq!(parsed, UpsRedundancy::NPlusOne);
        let topology = serde_json::to_value(UpsTopology::ParallelRedundant).unwrap();
        assert_eq!(topology, "Parallel Redundant");
    }
}
