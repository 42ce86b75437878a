//! # Power Triangle Formulas
//!
//! Single- and three-phase conversions between real power, apparent power,
//! reactive power and line current. All functions are pure and operate only
//! on their arguments; callers validate inputs first.
//!
//! ## Notation
//!
//! - `P` = Real power (kW)
//! - `S` = Apparent power (kVA)
//! - `Q` = Reactive power (kVAr)
//! - `pf` = Power factor cos φ, in (0, 1]
//! - `V` = Line voltage (V); line-to-line for three-phase
//! - `I` = Line current (A)
//!
//! ```text
//!            S
//!          ╱│
//!        ╱  │ Q
//!      ╱ φ  │
//!     ───────
//!        P
//! ```

use serde::{Deserialize, Serialize};

/// √3, the line-to-phase factor of a balanced three-phase system
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Heat equivalent of one kilowatt (BTU/h per kW)
pub const BTU_PER_HOUR_PER_KW: f64 = 3412.14;

/// Supply system used to convert power to line current
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseSystem {
    /// Two-wire single-phase supply
    SinglePhase,
    /// Balanced three-phase supply
    ThreePhase,
}

impl PhaseSystem {
    /// Multiplier on V·I that gives apparent power: 1 or √3
    pub fn voltage_factor(&self) -> f64 {
        match self {
            PhaseSystem::SinglePhase => 1.0,
            PhaseSystem::ThreePhase => SQRT_3,
        }
    }
}

/// Apparent power from real power.
///
/// # Formula
/// S = P / pf
///
/// # Example
/// ```rust
/// use amp_core::equations::power::apparent_power_kva;
///
/// let kva = apparent_power_kva(132.0, 0.9);
/// assert!((kva - 146.667).abs() < 0.001);
/// ```
#[inline]
pub fn apparent_power_kva(p_kw: f64, pf: f64) -> f64 {
    p_kw / pf
}

/// Reactive power drawn at a given power factor.
///
/// # Formula
/// Q = P × tan(acos(pf))
///
/// At pf = 1 the result is exactly zero.
#[inline]
pub fn reactive_power_kvar(p_kw: f64, pf: f64) -> f64 {
    p_kw * pf.acos().tan()
}

/// Power factor of a load with the given real and reactive power.
///
/// # Formula
/// pf = P / √(P² + Q²)
///
/// The sign of Q (lagging or leading) does not change the magnitude.
#[inline]
pub fn power_factor_from(p_kw: f64, q_kvar: f64) -> f64 {
    p_kw / p_kw.hypot(q_kvar)
}

/// Line current for a given apparent power.
///
/// # Formula
/// - Single-phase: I = S·1000 / V
/// - Three-phase:  I = S·1000 / (√3·V)
#[inline]
pub fn line_current_from_kva(s_kva: f64, voltage_v: f64, system: PhaseSystem) -> f64 {
    s_kva * 1000.0 / (system.voltage_factor() * voltage_v)
}

/// Line current for a given real power and power factor.
///
/// # Formula
/// - Single-phase: I = P·1000 / (V·pf)
/// - Three-phase:  I = P·1000 / (√3·V·pf)
///
/// # Example
/// ```rust
/// use amp_core::equations::power::{line_current_a, PhaseSystem};
///
/// // 10 kW at 400 V three-phase, pf 0.9
/// let amps = line_current_a(10.0, 400.0, 0.9, PhaseSystem::ThreePhase);
/// assert!((amps - 16.04).abs() < 0.01);
/// ```
#[inline]
pub fn line_current_a(p_kw: f64, voltage_v: f64, pf: f64, system: PhaseSystem) -> f64 {
    line_current_from_kva(apparent_power_kva(p_kw, pf), voltage_v, system)
}

/// Scale a value up by a percentage margin: value × (1 + pct/100)
#[inline]
pub fn apply_margin(value: f64, margin_pct: f64) -> f64 {
    value * (1.0 + margin_pct / 100.0)
}

/// Express `part` as a percentage of `whole`
#[inline]
pub fn percent_of(part: f64, whole: f64) -> f64 {
    part / whole * 100.0
}

/// Relative reduction from `before` to `after`, in percent
#[inline]
pub fn reduction_pct(before: f64, after: f64) -> f64 {
    (before - after) / before * 100.0
}

/// Heat equivalent of a power in kW, in BTU/h
#[inline]
pub fn kw_to_btu_per_hour(p_kw: f64) -> f64 {
    p_kw * BTU_PER_HOUR_PER_KW
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_reactive_power_at_unity_is_zero() {
        assert!(reactive_power_kvar(100.0, 1.0).abs() < TOL);
    }

    #[test]
    fn test_reactive_power_triangle() {
        // pf 0.8 -> tan(acos(0.8)) = 0.75
        let q = reactive_power_kvar(100.0, 0.8);
        assert!((q - 75.0).abs() < 1e-6);
        assert!((power_factor_from(100.0, q) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_single_phase_current() {
        // 2.3 kW at 230 V unity pf = 10 A
        let i = line_current_a(2.3, 230.0, 1.0, PhaseSystem::SinglePhase);
        assert!((i - 10.0).abs() < TOL);
    }

    #[test]
    fn test_three_phase_current() {
        let i = line_current_a(10.0, 400.0, 0.9, PhaseSystem::ThreePhase);
        assert!((i - 16.0375).abs() < 1e-3);
    }

    #[test]
    fn test_margin_and_percent_helpers() {
        assert!((apply_margin(100.0, 20.0) - 120.0).abs() < TOL);
        assert!((percent_of(50.0, 200.0) - 25.0).abs() < TOL);
        assert!((reduction_pct(100.0, 80.0) - 20.0).abs() < TOL);
        assert!((kw_to_btu_per_hour(1.0) - 3412.14).abs() < TOL);
    }
}
