//! # Grounding Resistance
//!
//! Resistance to earth of one or more driven rods in uniform soil.
//!
//! ## Method
//!
//! Single rod (Dwight):
//!
//! ```text
//! R₁ = ρ / (2πL) × (ln(8L/d) − 1)
//! ```
//!
//! Parallel rods interfere with each other, so n rods give less than an n-fold
//! reduction. The coupling efficiency depends on the rod count and on the
//! spacing-to-length ratio:
//!
//! ```text
//! α = min(α_max, c / (s/L))
//! η = 1 / (1 + α·ln n)
//! R = R₁ / (n·η)
//! ```
//!
//! With α < 1, `n·η` grows strictly with n, so adding a rod always lowers the
//! total. When the given count misses the target, the smallest count that
//! meets it (up to the configured maximum) is reported.

use serde::{Deserialize, Serialize};

use crate::constants::GroundingConstants;
use crate::errors::{CalcError, CalcResult};
use crate::validation;

/// Input parameters for a grounding rod array.
///
/// ## JSON Example
///
/// ```json
/// {
///   "soil_resistivity_ohm_m": 100.0,
///   "rod_length_m": 3.0,
///   "rod_diameter_m": 0.016,
///   "target_resistance_ohm": 10.0,
///   "num_rods": 1,
///   "rod_spacing_m": 6.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingInput {
    /// Soil resistivity ρ (Ω·m)
    pub soil_resistivity_ohm_m: f64,
    /// Driven rod length L (m)
    pub rod_length_m: f64,
    /// Rod diameter d (m), smaller than the length
    pub rod_diameter_m: f64,
    /// Required resistance to earth (Ω)
    pub target_resistance_ohm: f64,
    /// Number of rods in the array
    pub num_rods: u32,
    /// Spacing between adjacent rods (m)
    pub rod_spacing_m: f64,
}

impl GroundingInput {
    /// Validate input parameters.
    pub fn validate(&self, constants: &GroundingConstants) -> CalcResult<()> {
        validation::positive("soil_resistivity_ohm_m", self.soil_resistivity_ohm_m)?;
        validation::positive("rod_length_m", self.rod_length_m)?;
        validation::positive("rod_diameter_m", self.rod_diameter_m)?;
        let shape = (8.0 * self.rod_length_m / self.rod_diameter_m).ln();
        if self.rod_diameter_m >= self.rod_length_m || shape <= 1.0 {
            return Err(CalcError::invalid_input(
                "rod_diameter_m",
                self.rod_diameter_m.to_string(),
                format!("Rod diameter is too large for a {} m rod", self.rod_length_m),
            ));
        }
        validation::positive("target_resistance_ohm", self.target_resistance_ohm)?;
        if self.num_rods == 0 || self.num_rods > constants.max_rods {
            return Err(CalcError::invalid_input(
                "num_rods",
                self.num_rods.to_string(),
                format!("Rod count must be between 1 and {}", constants.max_rods),
            ));
        }
        validation::positive("rod_spacing_m", self.rod_spacing_m)?;
        Ok(())
    }
}

/// Results for a grounding rod array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingResult {
    /// Resistance of one rod (Ω)
    pub single_rod_ohm: f64,
    /// Coupling efficiency η of the given array (1.0 for a single rod)
    pub coupling_factor: f64,
    /// Resistance of the given array (Ω)
    pub total_resistance_ohm: f64,
    /// Echoed target (Ω)
    pub target_ohm: f64,
    /// True if the given array meets the target
    pub meets_target: bool,
    /// Smallest rod count meeting the target at this spacing, if any
    pub rods_needed: Option<u32>,
    /// False if no count up to the maximum meets the target
    pub target_attainable: bool,
}

/// Dwight's formula for one driven rod (Ω)
pub fn single_rod_resistance(resistivity_ohm_m: f64, length_m: f64, diameter_m: f64) -> f64 {
    let shape = (8.0 * length_m / diameter_m).ln() - 1.0;
    resistivity_ohm_m / (2.0 * std::f64::consts::PI * length_m) * shape
}

/// Coupling efficiency η for `n` rods at spacing ratio s/L
pub fn coupling_efficiency(
    num_rods: u32,
    spacing_ratio: f64,
    constants: &GroundingConstants,
) -> f64 {
    let alpha = (constants.coupling_coefficient / spacing_ratio).min(constants.max_coupling_alpha);
    1.0 / (1.0 + alpha * f64::from(num_rods).ln())
}

fn array_resistance(single_rod_ohm: f64, num_rods: u32, eta: f64) -> f64 {
    single_rod_ohm / (f64::from(num_rods) * eta)
}

/// Calculate grounding resistance for a rod array.
pub fn calculate(
    input: &GroundingInput,
    constants: &GroundingConstants,
) -> CalcResult<GroundingResult> {
    input.validate(constants)?;

    let single_rod_ohm = single_rod_resistance(
        input.soil_resistivity_ohm_m,
        input.rod_length_m,
        input.rod_diameter_m,
    );
    let spacing_ratio = input.rod_spacing_m / input.rod_length_m;
    let resistance_for = |n: u32| {
        array_resistance(single_rod_ohm, n, coupling_efficiency(n, spacing_ratio, constants))
    };

    let coupling_factor = coupling_efficiency(input.num_rods, spacing_ratio, constants);
    let total_resistance_ohm = array_resistance(single_rod_ohm, input.num_rods, coupling_factor);
    let meets_target = total_resistance_ohm <= input.target_resistance_ohm;

    let rods_needed = if meets_target {
        Some(input.num_rods)
    } else {
        (input.num_rods + 1..=constants.max_rods)
            .find(|&n| resistance_for(n) <= input.target_resistance_ohm)
    };

    Ok(GroundingResult {
        single_rod_ohm,
        coupling_factor,
        total_resistance_ohm,
        target_ohm: input.target_resistance_ohm,
        meets_target,
        rods_needed,
        target_attainable: rods_needed.is_some(),
    })
}
