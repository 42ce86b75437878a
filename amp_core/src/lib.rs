//! # amp_core - Electrical Sizing Calculation Engine
//!
//! `amp_core` is the computational heart of Amperage, providing the sizing
//! calculations an electrical designer runs for a building or data hall:
//! cables, UPS, transformers, generators, power factor correction, lighting,
//! grounding, energy cost and motor starting. All inputs and outputs are
//! JSON-serializable, so the engine can sit behind an HTTP handler, a CLI or
//! an assistant tool with no glue code.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types naming the offending field
//! - **Table-Driven**: Equipment is picked from standard rating tables
//!
//! ## Quick Start
//!
//! ```rust
//! use amp_core::constants::EngineConstants;
//! use amp_core::request::parse_request;
//!
//! let request = parse_request(r#"{
//!     "calculator": "cable",
//!     "load_kw": 10.0,
//!     "phases": "3F_400V",
//!     "material": "Cu",
//!     "cross_section_mm2": 2.5,
//!     "length_m": 50.0,
//!     "mounting": "open",
//!     "power_factor": 0.9
//! }"#).unwrap();
//!
//! let response = request.run(EngineConstants::standard()).unwrap();
//! let json = serde_json::to_string_pretty(&response).unwrap();
//! assert!(json.contains("circuit_breaker_a"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The nine calculators and the request/response enums
//! - [`request`] - Field-by-field parsing of raw JSON requests
//! - [`constants`] - Engineering constants, overridable from TOML
//! - [`tables`] - Standard ratings, ampacity, derating and UF tables
//! - [`equations`] - Shared power-system formulas
//! - [`validation`] - Field-identified input checks
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod constants;
pub mod equations;
pub mod errors;
pub mod request;
pub mod tables;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use calculations::{run, CalculationRequest, CalculationResponse};
pub use constants::EngineConstants;
pub use errors::{CalcError, CalcResult};
pub use request::parse_request;
