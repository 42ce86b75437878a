//! # Generator Sizing
//!
//! Sizes a standby diesel generator for a continuous load plus the
//! transient demand of starting the largest motor, derated for site altitude
//! and ambient temperature.
//!
//! ## Method
//!
//! ```text
//! continuous kVA = P / pf
//! peak kVA       = (P + motor surge) / pf
//! derating       = altitude factor × temperature factor
//! required kVA   = max(continuous, peak) / derating
//! ```
//!
//! The selected rating is the next standard step above the requirement.
//! N+1 adds a second full-capacity set.

use serde::{Deserialize, Serialize};

use crate::constants::GeneratorConstants;
use crate::equations::{apparent_power_kva, percent_of};
use crate::errors::CalcResult;
use crate::tables::ratings::GENERATOR_KVA;
use crate::validation;

/// Largest load accepted (kW)
const MAX_LOAD_KW: f64 = 10_000.0;

/// Supported site altitude range (m)
const ALTITUDE_RANGE_M: (f64, f64) = (-500.0, 5000.0);

/// Supported ambient temperature range (°C)
const TEMPERATURE_RANGE_C: (f64, f64) = (-40.0, 60.0);

/// Generator redundancy level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GeneratorRedundancy {
    /// Single set
    #[default]
    #[serde(rename = "N")]
    N,
    /// Duty set plus one full-capacity standby set
    #[serde(rename = "N+1")]
    NPlusOne,
}

impl GeneratorRedundancy {
    /// Wire tokens, in declaration order
    pub const TOKENS: [&'static str; 2] = ["N", "N+1"];

    /// Number of generator sets installed
    pub fn total_units(&self) -> u32 {
        match self {
            GeneratorRedundancy::N => 1,
            GeneratorRedundancy::NPlusOne => 2,
        }
    }
}

/// Input parameters for generator sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_load_kw": 200.0,
///   "motor_starting_kw": 30.0,
///   "power_factor": 0.8,
///   "altitude_m": 0.0,
///   "temperature_c": 40.0,
///   "redundancy": "N"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorInput {
    /// Continuous load (kW)
    pub total_load_kw: f64,

    /// Additional transient kW drawn while the largest motor starts
    #[serde(default)]
    pub motor_starting_kw: f64,

    /// Load power factor
    pub power_factor: f64,

    /// Site altitude above sea level (m)
    pub altitude_m: f64,

    /// Design ambient temperature (°C)
    pub temperature_c: f64,

    /// Redundancy level
    pub redundancy: GeneratorRedundancy,
}

impl GeneratorInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive_at_most("total_load_kw", self.total_load_kw, MAX_LOAD_KW)?;
        validation::in_range("motor_starting_kw", self.motor_starting_kw, 0.0, MAX_LOAD_KW)?;
        validation::power_factor("power_factor", self.power_factor)?;
        let (min_altitude, max_altitude) = ALTITUDE_RANGE_M;
        validation::in_range("altitude_m", self.altitude_m, min_altitude, max_altitude)?;
        validation::in_range(
            "temperature_c",
            self.temperature_c,
            TEMPERATURE_RANGE_C.0,
            TEMPERATURE_RANGE_C.1,
        )?;
        Ok(())
    }
}

/// Results from generator sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "continuous_kva": 250.0,
///   "peak_kva": 287.5,
///   "altitude_factor": 1.0,
///   "temperature_factor": 1.0,
///   "derating_factor": 1.0,
///   "required_kva": 287.5,
///   "selected_kva": 300.0,
///   "total_units": 1,
///   "installed_kva": 300.0,
///   "fuel_lph": 63.0,
///   "loading_pct": 95.8
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorResult {
    /// Steady-state apparent power (kVA)
    pub continuous_kva: f64,
    /// Apparent power during motor starting (kVA)
    pub peak_kva: f64,
    /// Altitude derating multiplier
    pub altitude_factor: f64,
    /// Temperature derating multiplier
    pub temperature_factor: f64,
    /// Combined derating multiplier
    pub derating_factor: f64,
    /// Nameplate kVA needed after derating
    pub required_kva: f64,
    /// Selected standard rating per set (kVA)
    pub selected_kva: f64,
    /// Generator sets installed
    pub total_units: u32,
    /// Total installed rating (kVA)
    pub installed_kva: f64,
    /// Full-load fuel consumption of one running set (L/h)
    pub fuel_lph: f64,
    /// Required kVA as % of installed kVA
    pub loading_pct: f64,
}

/// Combined altitude × temperature derating for a site.
///
/// Returns `(altitude factor, temperature factor, combined)`.
pub fn derating_factor(
    altitude_m: f64,
    temperature_c: f64,
    constants: &GeneratorConstants,
) -> CalcResult<(f64, f64, f64)> {
    let altitude = constants.altitude_derating.factor_at(altitude_m)?;
    let temperature = constants.temperature_derating.factor_at(temperature_c)?;
    Ok((altitude, temperature, altitude * temperature))
}

/// Size a generator.
pub fn calculate(
    input: &GeneratorInput,
    constants: &GeneratorConstants,
) -> CalcResult<GeneratorResult> {
    input.validate()?;

    let continuous_kva = apparent_power_kva(input.total_load_kw, input.power_factor);
    let peak_kw = input.total_load_kw + input.motor_starting_kw;
    let peak_kva = apparent_power_kva(peak_kw, input.power_factor);

    let (altitude_factor, temperature_factor, derating) =
        derating_factor(input.altitude_m, input.temperature_c, constants)?;
    let required_kva = continuous_kva.max(peak_kva) / derating;

    let selected_kva = GENERATOR_KVA.select(required_kva)?;
    let total_units = input.redundancy.total_units();
    let installed_kva = selected_kva * f64::from(total_units);

    Ok(GeneratorResult {
        continuous_kva,
        peak_kva,
        altitude_factor,
        temperature_factor,
        derating_factor: derating,
        required_kva,
        selected_kva,
        total_units,
        installed_kva,
        fuel_lph: selected_kva * constants.fuel_l_per_kvah,
        loading_pct: percent_of(required_kva, installed_kva),
    })
}
