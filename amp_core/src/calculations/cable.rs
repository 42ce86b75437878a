//! # Cable & Circuit Sizing
//!
//! Checks a final circuit: load current, cable ampacity, protective breaker,
//! voltage drop and an estimate of the prospective short-circuit current at
//! the end of the cable.
//!
//! ## Assumptions
//!
//! - Conductor resistance at 70 °C operating temperature, reactance ignored
//! - Ampacity from the reference table for the installation method (open
//!   air or conduit)
//! - Short-circuit level limited by a fixed upstream transformer and the
//!   cable resistance only (not a fault study)
//!
//! ## Example
//!
//! ```rust
//! use amp_core::calculations::cable::{calculate, CableInput, Mounting, PhaseConfiguration};
//! use amp_core::constants::CableConstants;
//! use amp_core::tables::ConductorMaterial;
//!
//! let input = CableInput {
//!     load_kw: 10.0,
//!     phases: PhaseConfiguration::ThreePhase400V,
//!     material: ConductorMaterial::Copper,
//!     cross_section_mm2: 2.5,
//!     length_m: 50.0,
//!     mounting: Mounting::Open,
//!     power_factor: 0.9,
//! };
//!
//! let result = calculate(&input, &CableConstants::default()).unwrap();
//! assert!((result.current_a - 16.04).abs() < 0.01);
//! assert_eq!(result.circuit_breaker_a, 20.0);
//! assert!(!result.voltage_drop_warning);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::CableConstants;
use crate::equations::{line_current_a, line_current_from_kva, percent_of, PhaseSystem};
use crate::errors::{CalcError, CalcResult};
use crate::tables::cables::{self, ampacity, ConductorMaterial};
use crate::tables::ratings::BREAKERS_A;
use crate::validation;

pub use crate::tables::cables::Mounting;

/// Largest load accepted by the circuit check (kW)
const MAX_LOAD_KW: f64 = 5000.0;

/// Longest cable run accepted (m)
const MAX_LENGTH_M: f64 = 10_000.0;

/// Supply arrangement of the circuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PhaseConfiguration {
    /// Single-phase 230 V
    #[serde(rename = "1F_230V")]
    SinglePhase230V,
    /// Three-phase 400 V
    #[default]
    #[serde(rename = "3F_400V")]
    ThreePhase400V,
}

impl PhaseConfiguration {
    /// Wire tokens, in declaration order
    pub const TOKENS: [&'static str; 2] = ["1F_230V", "3F_400V"];

    /// Nominal voltage (V)
    pub fn voltage_v(&self) -> f64 {
        match self {
            PhaseConfiguration::SinglePhase230V => 230.0,
            PhaseConfiguration::ThreePhase400V => 400.0,
        }
    }

    /// Phase system used for current conversion
    pub fn system(&self) -> PhaseSystem {
        match self {
            PhaseConfiguration::SinglePhase230V => PhaseSystem::SinglePhase,
            PhaseConfiguration::ThreePhase400V => PhaseSystem::ThreePhase,
        }
    }
}

/// Input parameters for a circuit check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "load_kw": 10.0,
///   "phases": "3F_400V",
///   "material": "Cu",
///   "cross_section_mm2": 2.5,
///   "length_m": 50.0,
///   "mounting": "open",
///   "power_factor": 0.9
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableInput {
    /// Connected load (kW)
    pub load_kw: f64,

    /// Supply arrangement
    pub phases: PhaseConfiguration,

    /// Conductor material
    pub material: ConductorMaterial,

    /// Conductor cross-section (mm²), must be a catalogued size
    pub cross_section_mm2: f64,

    /// One-way cable length (m)
    pub length_m: f64,

    /// Installation method
    pub mounting: Mounting,

    /// Load power factor
    pub power_factor: f64,
}

impl CableInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive_at_most("load_kw", self.load_kw, MAX_LOAD_KW)?;
        validation::power_factor("power_factor", self.power_factor)?;
        validation::positive_at_most("length_m", self.length_m, MAX_LENGTH_M)?;
        validation::finite("cross_section_mm2", self.cross_section_mm2)?;
        if ampacity(self.cross_section_mm2, self.material, self.mounting).is_none() {
            let sizes: Vec<String> = cables::cross_sections(self.material)
                .iter()
                .map(|s| s.to_string())
                .collect();
            return Err(CalcError::invalid_input(
                "cross_section_mm2",
                self.cross_section_mm2.to_string(),
                format!(
                    "Cross-section not catalogued for {}; expected one of {}",
                    self.material.display_name(),
                    sizes.join(", ")
                ),
            ));
        }
        Ok(())
    }

    /// Resistance of one conductor over the cable length (Ω)
    pub fn conductor_resistance_ohm(&self) -> f64 {
        self.material.resistivity_ohm_mm2_per_m() * self.length_m / self.cross_section_mm2
    }
}

/// Results from a circuit check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "current_a": 16.04,
///   "cable_max_a": 27.0,
///   "circuit_breaker_a": 20.0,
///   "conductor_resistance_ohm": 0.45,
///   "voltage_drop_v": 12.5,
///   "voltage_drop_pct": 3.13,
///   "short_circuit_ka": 0.51,
///   "cable_ok": true,
///   "cable_undersized": false,
///   "voltage_drop_warning": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableResult {
    /// Load current (A)
    pub current_a: f64,

    /// Cable ampacity for the material and installation method (A)
    pub cable_max_a: f64,

    /// Selected standard breaker rating (A)
    pub circuit_breaker_a: f64,

    /// Resistance of one conductor (Ω)
    pub conductor_resistance_ohm: f64,

    /// Voltage drop at load current (V)
    pub voltage_drop_v: f64,

    /// Voltage drop as % of nominal voltage
    pub voltage_drop_pct: f64,

    /// Estimated prospective short-circuit current at the cable end (kA)
    pub short_circuit_ka: f64,

    /// Cable ampacity covers the load current
    pub cable_ok: bool,

    /// Cable ampacity is below the breaker rating (breaker does not protect it)
    pub cable_undersized: bool,

    /// Voltage drop reached the warning limit
    pub voltage_drop_warning: bool,
}

impl CableResult {
    /// True when the cable is adequately protected and within the drop limit
    pub fn passes(&self) -> bool {
        self.cable_ok && !self.cable_undersized && !self.voltage_drop_warning
    }
}

/// Size and check a circuit.
///
/// # Returns
///
/// * `Ok(CableResult)` - Calculation results
/// * `Err(CalcError)` - Invalid input, or a load current above the largest
///   standard breaker (`RangeExceeded`)
pub fn calculate(input: &CableInput, constants: &CableConstants) -> CalcResult<CableResult> {
    input.validate()?;

    let voltage = input.phases.voltage_v();
    let system = input.phases.system();

    let current_a = line_current_a(input.load_kw, voltage, input.power_factor, system);

    let cable_max_a = ampacity(input.cross_section_mm2, input.material, input.mounting)
        .ok_or_else(|| {
            CalcError::invalid_input(
                "cross_section_mm2",
                input.cross_section_mm2.to_string(),
                "Cross-section not catalogued",
            )
        })?;

    let circuit_breaker_a = BREAKERS_A.select(current_a * constants.breaker_margin)?;

    // Single-phase current returns through a second conductor; three-phase
    // drop is line-to-line.
    let resistance = input.conductor_resistance_ohm();
    let voltage_drop_v = match system {
        PhaseSystem::SinglePhase => 2.0 * current_a * resistance,
        PhaseSystem::ThreePhase => system.voltage_factor() * current_a * resistance,
    };
    let voltage_drop_pct = percent_of(voltage_drop_v, voltage);

    let source_fault_kva =
        constants.source_transformer_kva / (constants.source_impedance_pct / 100.0);
    let source_limited_a = line_current_from_kva(source_fault_kva, voltage, system);
    let cable_limited_a = match system {
        PhaseSystem::SinglePhase => voltage / (2.0 * resistance),
        PhaseSystem::ThreePhase => voltage / (system.voltage_factor() * resistance),
    };
    let short_circuit_ka = source_limited_a.min(cable_limited_a) / 1000.0;

    Ok(CableResult {
        current_a,
        cable_max_a,
        circuit_breaker_a,
        conductor_resistance_ohm: resistance,
        voltage_drop_v,
        voltage_drop_pct,
        short_circuit_ka,
        cable_ok: cable_max_a >= current_a,
        cable_undersized: cable_max_a < circuit_breaker_a,
        voltage_drop_warning: voltage_drop_pct >= constants.voltage_drop_limit_pct,
    })
}
