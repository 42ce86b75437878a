//! # Engine Constants
//!
//! Fixed engineering approximations used by the calculators: derating
//! multipliers, loss models, fuel and emission factors, starting-current
//! ratios. Each calculator takes its own constants struct, so a caller can
//! override one value without touching the rest.
//!
//! Every struct deserializes with `#[serde(default)]`, which makes a partial
//! TOML file valid:
//!
//! ```rust
//! use amp_core::constants::EngineConstants;
//!
//! let constants = EngineConstants::from_toml_str(r#"
//!     [cost]
//!     co2_kg_per_kwh = 0.25
//! "#).unwrap();
//! assert_eq!(constants.cost.co2_kg_per_kwh, 0.25);
//! assert_eq!(constants.cable.voltage_drop_limit_pct, 4.01);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::derating::{self, DeratingCurve};
use crate::validation;

static STANDARD: Lazy<EngineConstants> = Lazy::new(EngineConstants::default);

/// Constants for every calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConstants {
    pub cable: CableConstants,
    pub ups: UpsConstants,
    pub transformer: TransformerConstants,
    pub generator: GeneratorConstants,
    pub pfc: PfcConstants,
    pub grounding: GroundingConstants,
    pub cost: CostConstants,
    pub motor: MotorConstants,
}

impl EngineConstants {
    /// Shared instance holding the documented defaults
    pub fn standard() -> &'static EngineConstants {
        &STANDARD
    }

    /// Parse a (possibly partial) TOML override file and validate it
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let constants: EngineConstants =
            toml::from_str(source).map_err(|e| CalcError::serialization(e.to_string()))?;
        constants.validate()?;
        Ok(constants)
    }

    /// Check every constant is usable
    pub fn validate(&self) -> CalcResult<()> {
        self.cable.validate()?;
        self.ups.validate()?;
        self.transformer.validate()?;
        self.generator.validate()?;
        self.pfc.validate()?;
        self.grounding.validate()?;
        self.cost.validate()?;
        self.motor.validate()
    }
}

/// Cable & circuit sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CableConstants {
    /// Multiplier on load current before breaker selection
    pub breaker_margin: f64,
    /// Voltage drop (%) at or above which the result is flagged
    pub voltage_drop_limit_pct: f64,
    /// Upstream transformer rating assumed for short-circuit estimates (kVA)
    pub source_transformer_kva: f64,
    /// Upstream transformer impedance (%)
    pub source_impedance_pct: f64,
}

impl Default for CableConstants {
    fn default() -> Self {
        CableConstants {
            breaker_margin: 1.0,
            voltage_drop_limit_pct: 4.01,
            source_transformer_kva: 630.0,
            source_impedance_pct: 4.0,
        }
    }
}

impl CableConstants {
    pub fn validate(&self) -> CalcResult<()> {
        validation::in_range("cable.breaker_margin", self.breaker_margin, 1.0, 2.0)?;
        validation::positive("cable.voltage_drop_limit_pct", self.voltage_drop_limit_pct)?;
        validation::positive("cable.source_transformer_kva", self.source_transformer_kva)?;
        validation::positive("cable.source_impedance_pct", self.source_impedance_pct)?;
        Ok(())
    }
}

/// UPS sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpsConstants {
    /// Nominal battery DC bus voltage (V)
    pub dc_bus_voltage_v: f64,
    /// Usable fraction of nameplate battery capacity
    pub battery_derating: f64,
    /// Double-conversion efficiency used for the heat estimate
    pub efficiency: f64,
    /// Working modules sharing the load in an N+1 system
    pub n_plus_one_modules: u32,
}

impl Default for UpsConstants {
    fn default() -> Self {
        UpsConstants {
            dc_bus_voltage_v: 480.0,
            battery_derating: 0.92,
            efficiency: 0.92,
            n_plus_one_modules: 2,
        }
    }
}

impl UpsConstants {
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive("ups.dc_bus_voltage_v", self.dc_bus_voltage_v)?;
        validation::in_range("ups.battery_derating", self.battery_derating, 0.1, 1.0)?;
        validation::in_range("ups.efficiency", self.efficiency, 0.5, 1.0)?;
        if self.n_plus_one_modules == 0 {
            return Err(CalcError::invalid_input(
                "ups.n_plus_one_modules",
                "0",
                "At least one working module is required",
            ));
        }
        Ok(())
    }
}

/// Transformer sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformerConstants {
    /// No-load (core) loss as % of rating
    pub no_load_loss_pct: f64,
    /// Load (copper) loss at full load as % of rating
    pub full_load_loss_pct: f64,
}

impl Default for TransformerConstants {
    fn default() -> Self {
        TransformerConstants {
            no_load_loss_pct: 0.2,
            full_load_loss_pct: 1.0,
        }
    }
}

impl TransformerConstants {
    pub fn validate(&self) -> CalcResult<()> {
        validation::in_range("transformer.no_load_loss_pct", self.no_load_loss_pct, 0.0, 10.0)?;
        validation::in_range("transformer.full_load_loss_pct", self.full_load_loss_pct, 0.0, 10.0)?;
        Ok(())
    }
}

/// Generator sizing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConstants {
    /// Output derating by site altitude (m)
    pub altitude_derating: DeratingCurve,
    /// Output derating by ambient temperature (°C)
    pub temperature_derating: DeratingCurve,
    /// Diesel consumption per kVA of rating at full load (L/kVAh)
    pub fuel_l_per_kvah: f64,
}

impl Default for GeneratorConstants {
    fn default() -> Self {
        GeneratorConstants {
            altitude_derating: derating::altitude_curve(),
            temperature_derating: derating::temperature_curve(),
            fuel_l_per_kvah: 0.21,
        }
    }
}

impl GeneratorConstants {
    pub fn validate(&self) -> CalcResult<()> {
        self.altitude_derating.validate()?;
        self.temperature_derating.validate()?;
        validation::positive("generator.fuel_l_per_kvah", self.fuel_l_per_kvah)?;
        Ok(())
    }
}

/// Power factor correction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PfcConstants {
    /// Supplies below this voltage are treated as single-phase (V)
    pub single_phase_below_v: f64,
    /// Distribution losses as a fraction of load before correction
    pub line_loss_fraction: f64,
    /// Assumed operating hours per year
    pub operating_hours_per_year: f64,
    /// Assumed energy price (currency/kWh)
    pub energy_price_per_kwh: f64,
}

impl Default for PfcConstants {
    fn default() -> Self {
        PfcConstants {
            single_phase_below_v: 300.0,
            line_loss_fraction: 0.03,
            operating_hours_per_year: 4000.0,
            energy_price_per_kwh: 0.15,
        }
    }
}

impl PfcConstants {
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive("pfc.single_phase_below_v", self.single_phase_below_v)?;
        validation::in_range("pfc.line_loss_fraction", self.line_loss_fraction, 0.0, 0.5)?;
        validation::in_range(
            "pfc.operating_hours_per_year",
            self.operating_hours_per_year,
            0.0,
            8760.0,
        )?;
        validation::non_negative("pfc.energy_price_per_kwh", self.energy_price_per_kwh)?;
        Ok(())
    }
}

/// Grounding resistance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingConstants {
    /// Mutual-resistance coefficient c in α = c / (spacing / length)
    pub coupling_coefficient: f64,
    /// Upper bound on α for closely spaced rods (must stay below 1)
    pub max_coupling_alpha: f64,
    /// Largest rod count searched before a target is declared unattainable
    pub max_rods: u32,
}

impl Default for GroundingConstants {
    fn default() -> Self {
        GroundingConstants {
            coupling_coefficient: 0.3,
            max_coupling_alpha: 0.9,
            max_rods: 100,
        }
    }
}

impl GroundingConstants {
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive("grounding.coupling_coefficient", self.coupling_coefficient)?;
        // α < 1 keeps n·η(n) strictly increasing for every n ≥ 1
        validation::in_range("grounding.max_coupling_alpha", self.max_coupling_alpha, 0.0, 0.99)?;
        if self.max_rods == 0 {
            return Err(CalcError::invalid_input(
                "grounding.max_rods",
                "0",
                "At least one rod must be allowed",
            ));
        }
        Ok(())
    }
}

/// Electricity cost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConstants {
    /// Grid emission factor (kg CO₂ per kWh)
    pub co2_kg_per_kwh: f64,
}

impl Default for CostConstants {
    fn default() -> Self {
        CostConstants { co2_kg_per_kwh: 0.4 }
    }
}

impl CostConstants {
    pub fn validate(&self) -> CalcResult<()> {
        validation::non_negative("cost.co2_kg_per_kwh", self.co2_kg_per_kwh)?;
        Ok(())
    }
}

/// Motor starting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorConstants {
    /// Supply frequency (Hz)
    pub line_frequency_hz: f64,
    /// Full-load slip as a fraction of synchronous speed
    pub slip_fraction: f64,
    /// Locked-rotor current as a multiple of FLA
    pub locked_rotor_multiple: f64,
    /// Star-delta starting current as a fraction of LRC
    pub star_delta_fraction_of_lrc: f64,
    /// Soft-starter current limit as a multiple of FLA
    pub soft_starter_multiple_of_fla: f64,
    /// VFD starting current as a multiple of FLA
    pub vfd_multiple_of_fla: f64,
    /// Starting torque (% of full-load torque) per method
    pub torque_dol_pct: f64,
    pub torque_star_delta_pct: f64,
    pub torque_soft_starter_pct: f64,
    pub torque_vfd_pct: f64,
    /// Continuous-current margin applied to FLA for cable and breaker sizing
    pub continuous_margin: f64,
    /// Breaker magnetic trip multiple the starting current must stay under
    pub breaker_trip_multiple: f64,
    /// Overload relay band as multiples of FLA
    pub overload_min_multiple: f64,
    pub overload_max_multiple: f64,
}

impl Default for MotorConstants {
    fn default() -> Self {
        MotorConstants {
            line_frequency_hz: 50.0,
            slip_fraction: 0.04,
            locked_rotor_multiple: 6.0,
            star_delta_fraction_of_lrc: 1.0 / 3.0,
            soft_starter_multiple_of_fla: 3.5,
            vfd_multiple_of_fla: 1.5,
            torque_dol_pct: 100.0,
            torque_star_delta_pct: 33.0,
            torque_soft_starter_pct: 50.0,
            torque_vfd_pct: 150.0,
            continuous_margin: 1.25,
            breaker_trip_multiple: 8.0,
            overload_min_multiple: 0.9,
            overload_max_multiple: 1.15,
        }
    }
}

impl MotorConstants {
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive("motor.line_frequency_hz", self.line_frequency_hz)?;
        validation::in_range("motor.slip_fraction", self.slip_fraction, 0.0, 0.2)?;
        validation::in_range("motor.locked_rotor_multiple", self.locked_rotor_multiple, 1.0, 12.0)?;
        // Star-delta must start below direct-on-line
        validation::in_range(
            "motor.star_delta_fraction_of_lrc",
            self.star_delta_fraction_of_lrc,
            0.05,
            0.99,
        )?;
        validation::positive(
            "motor.soft_starter_multiple_of_fla",
            self.soft_starter_multiple_of_fla,
        )?;
        validation::positive("motor.vfd_multiple_of_fla", self.vfd_multiple_of_fla)?;
        validation::positive("motor.torque_dol_pct", self.torque_dol_pct)?;
        validation::positive("motor.torque_star_delta_pct", self.torque_star_delta_pct)?;
        validation::positive("motor.torque_soft_starter_pct", self.torque_soft_starter_pct)?;
        validation::positive("motor.torque_vfd_pct", self.torque_vfd_pct)?;
        validation::in_range("motor.continuous_margin", self.continuous_margin, 1.0, 2.0)?;
        validation::positive("motor.breaker_trip_multiple", self.breaker_trip_multiple)?;
        validation::positive("motor.overload_min_multiple", self.overload_min_multiple)?;
        if self.overload_max_multiple <= self.overload_min_multiple {
            return Err(CalcError::invalid_input(
                "motor.overload_max_multiple",
                self.overload_max_multiple.to_string(),
                "Overload band upper bound must exceed the lower bound",
            ));
        }
        Ok(())
    }
}
