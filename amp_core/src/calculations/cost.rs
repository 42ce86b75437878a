//! # Electricity Cost
//!
//! Energy consumption, tariff cost and CO₂ emissions of a load that runs a
//! fixed number of hours per day.
//!
//! Supply-side power is the load divided by the equipment efficiency. The
//! energy charge applies to supply kWh and the demand charge to supply kVA.
//! Yearly figures are exactly twelve times the monthly ones.
//!
//! ## Example
//!
//! ```rust
//! use amp_core::calculations::cost::{calculate, CostInput};
//! use amp_core::constants::CostConstants;
//!
//! let input = CostInput {
//!     load_kw: 50.0,
//!     hours_per_day: 10.0,
//!     days_per_month: 22.0,
//!     price_per_kwh: 0.15,
//!     demand_charge_per_kw: 0.0,
//!     power_factor: 0.9,
//!     efficiency_pct: 100.0,
//! };
//! let result = calculate(&input, &CostConstants::default()).unwrap();
//! assert_eq!(result.yearly_total_cost, result.monthly_total_cost * 12.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::CostConstants;
use crate::equations::apparent_power_kva;
use crate::errors::CalcResult;
use crate::validation;

/// Largest load accepted (kW)
const MAX_LOAD_KW: f64 = 100_000.0;

/// Input parameters for an electricity cost estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInput {
    /// Load at the equipment (kW)
    pub load_kw: f64,
    /// Operating hours per day, (0, 24]
    pub hours_per_day: f64,
    /// Operating days per month, (0, 31]
    pub days_per_month: f64,
    /// Energy price (currency/kWh)
    pub price_per_kwh: f64,
    /// Monthly demand charge (currency per kVA of supply demand)
    #[serde(default)]
    pub demand_charge_per_kw: f64,
    /// Load power factor
    pub power_factor: f64,
    /// Equipment efficiency (%), 1 to 100
    pub efficiency_pct: f64,
}

impl CostInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive_at_most("load_kw", self.load_kw, MAX_LOAD_KW)?;
        validation::positive_at_most("hours_per_day", self.hours_per_day, 24.0)?;
        validation::positive_at_most("days_per_month", self.days_per_month, 31.0)?;
        validation::non_negative("price_per_kwh", self.price_per_kwh)?;
        validation::non_negative("demand_charge_per_kw", self.demand_charge_per_kw)?;
        validation::power_factor("power_factor", self.power_factor)?;
        validation::in_range("efficiency_pct", self.efficiency_pct, 1.0, 100.0)?;
        Ok(())
    }
}

/// Results of an electricity cost estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    /// Supply-side power, load / efficiency (kW)
    pub effective_kw: f64,
    pub daily_kwh: f64,
    pub monthly_kwh: f64,
    pub yearly_kwh: f64,
    pub monthly_energy_cost: f64,
    pub monthly_demand_cost: f64,
    pub monthly_total_cost: f64,
    pub yearly_energy_cost: f64,
    pub yearly_demand_cost: f64,
    pub yearly_total_cost: f64,
    /// Supply-side apparent power (kVA)
    pub apparent_power_kva: f64,
    /// Yearly emissions (t CO₂)
    pub co2_yearly_t: f64,
}

/// Estimate electricity cost for a load.
pub fn calculate(input: &CostInput, constants: &CostConstants) -> CalcResult<CostResult> {
    input.validate()?;

    let effective_kw = input.load_kw / (input.efficiency_pct / 100.0);
    let daily_kwh = effective_kw * input.hours_per_day;
    let monthly_kwh = daily_kwh * input.days_per_month;
    let yearly_kwh = monthly_kwh * 12.0;

    let apparent = apparent_power_kva(effective_kw, input.power_factor);
    let monthly_energy_cost = monthly_kwh * input.price_per_kwh;
    let monthly_demand_cost = apparent * input.demand_charge_per_kw;
    let monthly_total_cost = monthly_energy_cost + monthly_demand_cost;

    Ok(CostResult {
        effective_kw,
        daily_kwh,
        monthly_kwh,
        yearly_kwh,
        monthly_energy_cost,
        monthly_demand_cost,
        monthly_total_cost,
        yearly_energy_cost: monthly_energy_cost * 12.0,
        yearly_demand_cost: monthly_demand_cost * 12.0,
        yearly_total_cost: monthly_total_cost * 12.0,
        apparent_power_kva: apparent,
        co2_yearly_t: yearly_kwh * constants.co2_kg_per_kwh / 1000.0,
    })
}
