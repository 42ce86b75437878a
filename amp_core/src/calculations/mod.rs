//! # Electrical Sizing Calculations
//!
//! This module contains all calculator types. Each calculator follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), with `validate()`
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, constants) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! Calculators share nothing but the standard tables and the equations
//! module. None of them performs I/O or keeps state between calls.
//!
//! ## Available Calculations
//!
//! - [`cable`] - Cable current, breaker, voltage drop and short circuit
//! - [`ups`] - UPS modules and battery capacity
//! - [`transformer`] - Transformer rating for a load schedule
//! - [`generator`] - Standby generator with site derating
//! - [`pfc`] - Power factor correction bank
//! - [`lighting`] - Lumen-method luminaire count and layout
//! - [`grounding`] - Driven-rod earth resistance
//! - [`cost`] - Electricity cost and emissions
//! - [`motor`] - Motor starting current and protection

pub mod cable;
pub mod cost;
pub mod generator;
pub mod grounding;
pub mod lighting;
pub mod motor;
pub mod pfc;
pub mod transformer;
pub mod ups;

use serde::{Deserialize, Serialize};

use crate::constants::EngineConstants;
use crate::errors::CalcResult;

// Re-export commonly used types
pub use cable::{CableInput, CableResult};
pub use cost::{CostInput, CostResult};
pub use generator::{GeneratorInput, GeneratorResult};
pub use grounding::{GroundingInput, GroundingResult};
pub use lighting::{LightingInput, LightingResult};
pub use motor::{MotorInput, MotorResult};
pub use pfc::{PfcInput, PfcResult};
pub use transformer::{TransformerInput, TransformerResult};
pub use ups::{UpsInput, UpsResult};

/// Wire names of every calculator, in declaration order
pub const CALCULATORS: [&str; 9] = [
    "cable",
    "ups",
    "transformer",
    "generator",
    "pfc",
    "lighting",
    "grounding",
    "cost",
    "motor",
];

/// A request for one calculation.
///
/// Serialized flat, with the calculator name alongside the input fields:
///
/// ```json
/// {
///   "calculator": "pfc",
///   "load_kw": 150.0,
///   "current_pf": 0.75,
///   "target_pf": 0.95,
///   "voltage": 400.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationRequest {
    Cable(CableInput),
    Ups(UpsInput),
    Transformer(TransformerInput),
    Generator(GeneratorInput),
    Pfc(PfcInput),
    Lighting(LightingInput),
    Grounding(GroundingInput),
    Cost(CostInput),
    Motor(MotorInput),
}

impl CalculationRequest {
    /// Get the calculator name as a string
    pub fn calculator(&self) -> &'static str {
        match self {
            CalculationRequest::Cable(_) => "cable",
            CalculationRequest::Ups(_) => "ups",
            CalculationRequest::Transformer(_) => "transformer",
            CalculationRequest::Generator(_) => "generator",
            CalculationRequest::Pfc(_) => "pfc",
            CalculationRequest::Lighting(_) => "lighting",
            CalculationRequest::Grounding(_) => "grounding",
            CalculationRequest::Cost(_) => "cost",
            CalculationRequest::Motor(_) => "motor",
        }
    }

    /// Run the calculation against a set of engine constants.
    pub fn run(&self, constants: &EngineConstants) -> CalcResult<CalculationResponse> {
        run(self, constants)
    }
}

/// The result of one calculation, tagged with its calculator.
///
/// ```json
/// { "calculator": "pfc", "results": { "selected_kvar": 100.0, ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", content = "results", rename_all = "snake_case")]
pub enum CalculationResponse {
    Cable(CableResult),
    Ups(UpsResult),
    Transformer(TransformerResult),
    Generator(GeneratorResult),
    Pfc(PfcResult),
    Lighting(LightingResult),
    Grounding(GroundingResult),
    Cost(CostResult),
    Motor(MotorResult),
}

impl CalculationResponse {
    /// Get the calculator name as a string
    pub fn calculator(&self) -> &'static str {
        match self {
            CalculationResponse::Cable(_) => "cable",
            CalculationResponse::Ups(_) => "ups",
            CalculationResponse::Transformer(_) => "transformer",
            CalculationResponse::Generator(_) => "generator",
            CalculationResponse::Pfc(_) => "pfc",
            CalculationResponse::Lighting(_) => "lighting",
            CalculationResponse::Grounding(_) => "grounding",
            CalculationResponse::Cost(_) => "cost",
            CalculationResponse::Motor(_) => "motor",
        }
    }
}

/// Dispatch a request to its calculator.
///
/// # Example
///
/// ```rust
/// use amp_core::calculations::{run, CalculationRequest, CalculationResponse};
/// use amp_core::calculations::pfc::PfcInput;
/// use amp_core::constants::EngineConstants;
///
/// let request = CalculationRequest::Pfc(PfcInput {
///     load_kw: 150.0,
///     current_pf: 0.75,
///     target_pf: 0.95,
///     voltage: 400.0,
/// });
/// match run(&request, EngineConstants::standard()).unwrap() {
///     CalculationResponse::Pfc(result) => assert_eq!(result.selected_kvar, 100.0),
///     other => panic!("unexpected response {:?}", other),
/// }
/// ```
pub fn run(
    request: &CalculationRequest,
    constants: &EngineConstants,
) -> CalcResult<CalculationResponse> {
    let response = match request {
        CalculationRequest::Cable(input) => {
            CalculationResponse::Cable(cable::calculate(input, &constants.cable)?)
        }
        CalculationRequest::Ups(input) => {
            CalculationResponse::Ups(ups::calculate(input, &constants.ups)?)
        }
        CalculationRequest::Transformer(input) => {
            CalculationResponse::Transformer(transformer::calculate(input, &constants.transformer)?)
        }
        CalculationRequest::Generator(input) => {
            CalculationResponse::Generator(generator::calculate(input, &constants.generator)?)
        }
        CalculationRequest::Pfc(input) => {
            CalculationResponse::Pfc(pfc::calculate(input, &constants.pfc)?)
        }
        CalculationRequest::Lighting(input) => {
            CalculationResponse::Lighting(lighting::calculate(input)?)
        }
        CalculationRequest::Grounding(input) => {
            CalculationResponse::Grounding(grounding::calculate(input, &constants.grounding)?)
        }
        CalculationRequest::Cost(input) => {
            CalculationResponse::Cost(cost::calculate(input, &constants.cost)?)
        }
        CalculationRequest::Motor(input) => {
            CalculationResponse::Motor(motor::calculate(input, &constants.motor)?)
        }
    };
    Ok(response)
}
