//! # Motor Starting
//!
//! Full-load and starting currents of a three-phase induction motor for a
//! chosen starting method, with the matching cable, breaker, contactor and
//! overload relay setting.
//!
//! ## Method
//!
//! ```text
//! FLA = P / (√3 · V · η · pf)
//! LRC = 6 × FLA
//! ```
//!
//! | Method       | Starting current | Starting torque |
//! |--------------|------------------|-----------------|
//! | DOL          | LRC              | 100 %           |
//! | Star-Delta   | LRC / 3          | 33 %            |
//! | Soft-Starter | 3.5 × FLA        | 50 %            |
//! | VFD          | 1.5 × FLA        | 150 %           |
//!
//! Cable and breaker are sized for 1.25 × FLA continuous. The breaker must
//! also hold the starting current below its magnetic trip (8 × rating).

use serde::{Deserialize, Serialize};

use crate::constants::MotorConstants;
use crate::equations::{line_current_a, PhaseSystem};
use crate::errors::CalcResult;
use crate::tables::cables::{smallest_section_for, ConductorMaterial, Mounting};
use crate::tables::ratings::{BREAKERS_A, CONTACTORS_A};
use crate::validation;

/// Largest motor accepted (kW)
const MAX_MOTOR_KW: f64 = 1000.0;

/// Allowed pole counts
pub const POLE_OPTIONS: [u32; 4] = [2, 4, 6, 8];

/// Motor starting method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StartingMethod {
    /// Direct-on-line
    #[default]
    #[serde(rename = "DOL")]
    DirectOnLine,
    #[serde(rename = "Star-Delta")]
    StarDelta,
    #[serde(rename = "Soft-Starter")]
    SoftStarter,
    /// Variable frequency drive
    #[serde(rename = "VFD")]
    Vfd,
}

impl StartingMethod {
    /// Wire tokens, in declaration order
    pub const TOKENS: [&'static str; 4] = ["DOL", "Star-Delta", "Soft-Starter", "VFD"];

    /// Starting current for a motor with the given FLA (A)
    pub fn starting_current(&self, fla: f64, constants: &MotorConstants) -> f64 {
        let lrc = fla * constants.locked_rotor_multiple;
        match self {
            StartingMethod::DirectOnLine => lrc,
            StartingMethod::StarDelta => lrc * constants.star_delta_fraction_of_lrc,
            StartingMethod::SoftStarter => fla * constants.soft_starter_multiple_of_fla,
            StartingMethod::Vfd => fla * constants.vfd_multiple_of_fla,
        }
    }

    /// Starting torque as % of full-load torque
    pub fn starting_torque_pct(&self, constants: &MotorConstants) -> f64 {
        match self {
            StartingMethod::DirectOnLine => constants.torque_dol_pct,
            StartingMethod::StarDelta => constants.torque_star_delta_pct,
            StartingMethod::SoftStarter => constants.torque_soft_starter_pct,
            StartingMethod::Vfd => constants.torque_vfd_pct,
        }
    }
}

/// Input parameters for motor starting.
///
/// ## JSON Example
///
/// ```json
/// {
///   "motor_kw": 15.0,
///   "voltage": 400.0,
///   "efficiency_pct": 90.0,
///   "power_factor": 0.85,
///   "starting_method": "Star-Delta",
///   "poles": 4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorInput {
    /// Rated shaft power (kW)
    pub motor_kw: f64,
    /// Line-to-line supply voltage (V), 200 to 1000
    pub voltage: f64,
    /// Full-load efficiency (%)
    pub efficiency_pct: f64,
    /// Full-load power factor
    pub power_factor: f64,
    pub starting_method: StartingMethod,
    /// Pole count, one of [`POLE_OPTIONS`]
    pub poles: u32,
}

impl MotorInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive_at_most("motor_kw", self.motor_kw, MAX_MOTOR_KW)?;
        validation::in_range("voltage", self.voltage, 200.0, 1000.0)?;
        validation::positive_at_most("efficiency_pct", self.efficiency_pct, 100.0)?;
        validation::power_factor("power_factor", self.power_factor)?;
        validation::one_of("poles", self.poles, &POLE_OPTIONS)?;
        Ok(())
    }
}

/// Results from motor starting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorResult {
    /// Full-load current (A)
    pub fla: f64,
    /// Locked-rotor current (A)
    pub lrc: f64,
    /// Current drawn while starting with the chosen method (A)
    pub starting_current: f64,
    pub starting_method: StartingMethod,
    /// Starting torque (% of full-load torque)
    pub starting_torque_pct: f64,
    pub synchronous_rpm: f64,
    pub full_load_rpm: f64,
    /// Copper cross-section for 1.25 × FLA in open air (mm²)
    pub cable_mm2: f64,
    pub circuit_breaker_a: f64,
    /// AC-3 contactor rating (A)
    pub contactor_a: f64,
    /// Overload relay setting range (A)
    pub overload_min: f64,
    pub overload_max: f64,
}

/// Full-load current of a three-phase motor (A)
pub fn full_load_current(input: &MotorInput) -> f64 {
    let input_kw = input.motor_kw / (input.efficiency_pct / 100.0);
    line_current_a(input_kw, input.voltage, input.power_factor, PhaseSystem::ThreePhase)
}

/// Size the starting and protection equipment for a motor.
pub fn calculate(input: &MotorInput, constants: &MotorConstants) -> CalcResult<MotorResult> {
    input.validate()?;

    let fla = full_load_current(input);
    let lrc = fla * constants.locked_rotor_multiple;
    let starting_current = input.starting_method.starting_current(fla, constants);

    let synchronous_rpm = 120.0 * constants.line_frequency_hz / f64::from(input.poles);
    let full_load_rpm = synchronous_rpm * (1.0 - constants.slip_fraction);

    let continuous_a = fla * constants.continuous_margin;
    let cable = smallest_section_for(continuous_a, ConductorMaterial::Copper, Mounting::Open)?;

    let breaker_min = continuous_a.max(starting_current / constants.breaker_trip_multiple);
    let circuit_breaker_a = BREAKERS_A.select(breaker_min)?;
    let contactor_a = CONTACTORS_A.select(fla)?;

    Ok(MotorResult {
        fla,
        lrc,
        starting_current,
        starting_method: input.starting_method,
        starting_torque_pct: input.starting_method.starting_torque_pct(constants),
        synchronous_rpm,
        full_load_rpm,
        cable_mm2: cable.cross_section_mm2,
        circuit_breaker_a,
        contactor_a,
        overload_min: fla * constants.overload_min_multiple,
        overload_max: fla * constants.overload_max_multiple,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_motor() -> MotorInput {
        MotorInput {
            motor_kw: 15.0,
            voltage: 400.0,
            efficiency_pct: 90.0,
            power_factor: 0.85,
            starting_method: StartingMethod::DirectOnLine,
            poles: 4,
        }
    }

    fn run(input: &MotorInput) -> CalcResult<MotorResult> {
        calculate(input, &MotorConstants::default())
    }

    #[test]
    fn test_reference_dol_motor() {
        let result = run(&test_motor()).unwrap();

        // 15000 / (√3 × 400 × 0.9 × 0.85) = 28.30 A
        assert!((result.fla - 28.301).abs() < 0.001);
        assert!((result.lrc - 169.809).abs() < 0.001);
        assert_eq!(result.starting_current, result.lrc);
        assert_eq!(result.starting_torque_pct, 100.0);

        assert_eq!(result.synchronous_rpm, 1500.0);
        assert!((result.full_load_rpm - 1440.0).abs() < 1e-9);

        // 1.25 × 28.30 = 35.38 A → 4 mm² Cu (36 A), 40 A breaker
        assert_eq!(result.cable_mm2, 4.0);
        assert_eq!(result.circuit_breaker_a, 40.0);
        assert_eq!(result.contactor_a, 32.0);
        assert!((result.overload_min - 25.471).abs() < 0.001);
        assert!((result.overload_max - 32.547).abs() < 0.001);
    }

    #[test]
    fn test_starting_methods() {
        let mut results = Vec::new();
        for method in [
            StartingMethod::DirectOnLine,
            StartingMethod::StarDelta,
            StartingMethod::SoftStarter,
            StartingMethod::Vfd,
        ] {
            let mut input = test_motor();
            input.starting_method = method;
            results.push(run(&input).unwrap());
        }
        let dol = &results[0];
        let star_delta = &results[1];
        assert!(star_delta.starting_current < dol.starting_current);
        assert!((star_delta.starting_current - 56.603).abs() < 0.001);
        assert_eq!(star_delta.starting_torque_pct, 33.0);
        assert!((results[2].starting_current - 99.055).abs() < 0.001);
        assert!((results[3].starting_current - 42.452).abs() < 0.001);
        assert_eq!(results[3].starting_torque_pct, 150.0);
    }

    #[test]
    fn test_fla_linear_in_power() {
        let base = full_load_current(&test_motor());
        for factor in [0.5, 2.0, 3.0, 10.0] {
            let mut input = test_motor();
            input.motor_kw *= factor;
            let fla = full_load_current(&input);
            assert!((fla - base * factor).abs() < 1e-9 * fla);
        }
    }

    #[test]
    fn test_protection_covers_continuous_and_start() {
        for kw in [0.75, 5.5, 22.0, 55.0, 110.0, 200.0] {
            let mut input = test_motor();
            input.motor_kw = kw;
            let result = run(&input).unwrap();
            assert!(result.circuit_breaker_a >= result.fla * 1.25);
            assert!(result.circuit_breaker_a * 8.0 >= result.starting_current);
            assert!(result.contactor_a >= result.fla);
            assert!(result.overload_min < result.fla && result.fla < result.overload_max);
        }
    }

    #[test]
    fn test_pole_count_restricted() {
        let mut input = test_motor();
        input.poles = 5;
        let err = run(&input).unwrap_err();
        assert_eq!(err.error_code(), "UNRECOGNIZED_OPTION");
        assert_eq!(err.field(), Some("poles"));
    }

    #[test]
    fn test_motor_beyond_cable_table() {
        let mut input = test_motor();
        input.motor_kw = 300.0;
        assert_eq!(run(&input).unwrap_err().error_code(), "RANGE_EXCEEDED");
    }

    #[test]
    fn test_method_tokens() {
        let method: StartingMethod = serde_json::from_str("\"Soft-Starter\"").unwrap();
        assert_eq!(method, StartingMethod::SoftStarter);
        assert_eq!(serde_json::to_value(StartingMethod::Vfd).unwrap(), "VFD");
    }
}
