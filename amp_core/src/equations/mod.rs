//! # Electrical Equations
//!
//! Fundamental power-system formulas shared by several calculators. Keeping
//! them in one place means the cable, PFC, motor and cost calculators all use
//! the same current and power-triangle conventions.
//!
//! ## Modules
//!
//! - [`power`] - Phase conversions, power triangle, margins and percentages
//!
//! ## Conventions
//!
//! - Power in kW / kVA / kVAr, voltage in V, current in A
//! - Three-phase voltages are line-to-line
//! - Power factor is the magnitude of cos φ in (0, 1]

pub mod power;

pub use power::{
    apparent_power_kva,
    apply_margin,
    kw_to_btu_per_hour,
    line_current_a,
    line_current_from_kva,
    percent_of,
    power_factor_from,
    reactive_power_kvar,
    reduction_pct,
    PhaseSystem,
    SQRT_3,
};
