//! # Power Factor Correction
//!
//! Sizes a capacitor bank to raise a load's power factor to a target value
//! and estimates the resulting line-current reduction and annual savings.
//!
//! ## Method
//!
//! ```text
//! Q = P × tan(acos(pf))
//! required kVAr = Q(current pf) − Q(target pf)
//! ```
//!
//! The bank is the next standard capacitor step at or above the requirement.
//! Supplies below 300 V are treated as single-phase, everything else as
//! three-phase.
//!
//! ## Example
//!
//! ```rust
//! use amp_core::calculations::pfc::{calculate, PfcInput};
//! use amp_core::constants::PfcConstants;
//!
//! let input = PfcInput {
//!     load_kw: 150.0,
//!     current_pf: 0.75,
//!     target_pf: 0.95,
//!     voltage: 400.0,
//! };
//! let result = calculate(&input, &PfcConstants::default()).unwrap();
//! assert_eq!(result.selected_kvar, 100.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::PfcConstants;
use crate::equations::{
    apparent_power_kva, line_current_from_kva, power_factor_from, reactive_power_kvar,
    reduction_pct, PhaseSystem,
};
use crate::errors::{CalcError, CalcResult};
use crate::tables::ratings::CAPACITOR_KVAR;
use crate::validation;

/// Largest load accepted (kW)
const MAX_LOAD_KW: f64 = 10_000.0;

/// Input parameters for power factor correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PfcInput {
    /// Real power of the load (kW)
    pub load_kw: f64,
    /// Existing power factor
    pub current_pf: f64,
    /// Desired power factor, at least `current_pf`
    pub target_pf: f64,
    /// Supply voltage (V), 100 to 1000
    pub voltage: f64,
}

impl PfcInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive_at_most("load_kw", self.load_kw, MAX_LOAD_KW)?;
        validation::power_factor("current_pf", self.current_pf)?;
        validation::power_factor("target_pf", self.target_pf)?;
        if self.target_pf < self.current_pf {
            return Err(CalcError::invalid_input(
                "target_pf",
                self.target_pf.to_string(),
                format!("Target power factor must not be below the current {}", self.current_pf),
            ));
        }
        validation::in_range("voltage", self.voltage, 100.0, 1000.0)?;
        Ok(())
    }

    /// Supply system implied by the voltage class
    pub fn phase_system(&self, constants: &PfcConstants) -> PhaseSystem {
        if self.voltage < constants.single_phase_below_v {
            PhaseSystem::SinglePhase
        } else {
            PhaseSystem::ThreePhase
        }
    }
}

/// Results from power factor correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PfcResult {
    /// Reactive power at the current pf (kVAr)
    pub q_before_kvar: f64,
    /// Reactive power at the target pf (kVAr)
    pub q_after_kvar: f64,
    /// Compensation needed to reach the target (kVAr)
    pub q_required_kvar: f64,
    /// Standard capacitor bank (kVAr); 0 when no correction is needed
    pub selected_kvar: f64,
    /// Supply system used for the current calculation
    pub phase_system: PhaseSystem,
    /// Apparent power at the current pf (kVA)
    pub apparent_before_kva: f64,
    /// Apparent power at the target pf (kVA)
    pub apparent_after_kva: f64,
    /// Line current at the current pf (A)
    pub current_before_a: f64,
    /// Line current at the target pf (A)
    pub current_after_a: f64,
    /// (I_before − I_after) / I_before (%)
    pub current_reduction_pct: f64,
    /// Power factor achieved with the selected bank
    pub corrected_pf: f64,
    /// Estimated yearly saving from reduced line losses (currency/yr)
    pub annual_savings: f64,
}

/// Size a power factor correction bank.
pub fn calculate(input: &PfcInput, constants: &PfcConstants) -> CalcResult<PfcResult> {
    input.validate()?;

    let q_before_kvar = reactive_power_kvar(input.load_kw, input.current_pf);
    let q_after_kvar = reactive_power_kvar(input.load_kw, input.target_pf);
    let q_required_kvar = (q_before_kvar - q_after_kvar).max(0.0);

    let selected_kvar = if q_required_kvar > 0.0 {
        CAPACITOR_KVAR.select(q_required_kvar)?
    } else {
        0.0
    };

    let phase_system = input.phase_system(constants);
    let apparent_before_kva = apparent_power_kva(input.load_kw, input.current_pf);
    let apparent_after_kva = apparent_power_kva(input.load_kw, input.target_pf);
    let current_before_a = line_current_from_kva(apparent_before_kva, input.voltage, phase_system);
    let current_after_a = line_current_from_kva(apparent_after_kva, input.voltage, phase_system);

    // I²R losses scale with the square of the current ratio
    let ratio = current_after_a / current_before_a;
    let saved_kw = input.load_kw * constants.line_loss_fraction * (1.0 - ratio * ratio);
    let annual_savings =
        saved_kw * constants.operating_hours_per_year * constants.energy_price_per_kwh;

    Ok(PfcResult {
        q_before_kvar,
        q_after_kvar,
        q_required_kvar,
        selected_kvar,
        phase_system,
        apparent_before_kva,
        apparent_after_kva,
        current_before_a,
        current_after_a,
        current_reduction_pct: reduction_pct(current_before_a, current_after_a),
        corrected_pf: power_factor_from(input.load_kw, q_before_kvar - selected_kvar),
        annual_savings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_pfc() -> PfcInput {
        PfcInput {
            load_kw: 150.0,
            current_pf: 0.75,
            target_pf: 0.95,
            voltage: 400.0,
        }
    }

    fn run(input: &PfcInput) -> CalcResult<PfcResult> {
        calculate(input, &PfcConstants::default())
    }

    #[test]
    fn test_reference_correction() {
        let result = run(&test_pfc()).unwrap();

        assert!((result.q_before_kvar - 132.288).abs() < 0.001);
        assert!((result.q_after_kvar - 49.303).abs() < 0.001);
        assert!((result.q_required_kvar - 82.985).abs() < 0.001);
        assert_eq!(result.selected_kvar, 100.0);
        assert_eq!(result.phase_system, PhaseSystem::ThreePhase);

        assert!((result.apparent_before_kva - 200.0).abs() < 1e-9);
        assert!((result.current_before_a - 288.675).abs() < 0.001);
        assert!((result.current_after_a - 227.901).abs() < 0.001);
        assert!((result.current_reduction_pct - 21.053).abs() < 0.001);

        // Bank is oversized, so the achieved pf beats the target
        assert!((result.corrected_pf - 0.9776).abs() < 0.0001);
        assert!(result.corrected_pf >= 0.95);

        assert!((result.annual_savings - 1017.17).abs() < 0.01);
    }

    #[test]
    fn test_no_correction_needed() {
        let mut input = test_pfc();
        input.current_pf = 0.95;
        let result = run(&input).unwrap();
        assert_eq!(result.q_required_kvar, 0.0);
        assert_eq!(result.selected_kvar, 0.0);
        assert_eq!(result.current_reduction_pct, 0.0);
        assert_eq!(result.annual_savings, 0.0);
    }

    #[test]
    fn test_reduction_in_open_interval() {
        for (from, to) in [(0.6, 0.7), (0.7, 0.9), (0.8, 0.99), (0.5, 1.0)] {
            let mut input = test_pfc();
            input.current_pf = from;
            input.target_pf = to;
            let result = run(&input).unwrap();
            assert!(result.q_required_kvar > 0.0);
            assert!(result.selected_kvar >= result.q_required_kvar);
            assert!(result.current_reduction_pct > 0.0 && result.current_reduction_pct < 100.0);
        }
    }

    #[test]
    fn test_low_voltage_is_single_phase() {
        let mut input = test_pfc();
        input.load_kw = 10.0;
        input.voltage = 230.0;
        let result = run(&input).unwrap();
        assert_eq!(result.phase_system, PhaseSystem::SinglePhase);
        // 10 kW / 0.75 = 13.33 kVA at 230 V
        assert!((result.current_before_a - 57.971).abs() < 0.001);
    }

    #[test]
    fn test_target_below_current_rejected() {
        let mut input = test_pfc();
        input.target_pf = 0.7;
        let err = run(&input).unwrap_err();
        assert_eq!(err.field(), Some("target_pf"));
        assert!(err.is_validation_failure());
    }

    #[test]
    fn test_voltage_out_of_range() {
        let mut input = test_pfc();
        input.voltage = 1100.0;
        assert_eq!(run(&input).unwrap_err().field(), Some("voltage"));
    }
}
