//! # Lighting Design
//!
//! Lumen-method design of a rectangular room: the number of luminaires
//! needed for a target maintained illuminance, laid out on a regular grid.
//!
//! ## Method
//!
//! ```text
//! room index k = L·W / ((H − h_wp)·(L + W))
//! n            = ⌈E·A / (Φ·UF·MF)⌉
//! cols         = min(n, ⌈√(n·L/W)⌉),  rows = ⌈n / cols⌉
//! ```
//!
//! UF is looked up from the nearest room-index bucket for the reflectance
//! class. Reported illuminance, power and power density use the installed
//! grid (rows × cols), which may exceed the required count by less than one
//! row.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::tables::lighting::{utilization_factor, Reflectance};
use crate::validation;

/// Largest room dimension accepted (m)
const MAX_DIMENSION_M: f64 = 1000.0;

/// Input parameters for lighting design.
///
/// ## JSON Example
///
/// ```json
/// {
///   "room_length_m": 10.0,
///   "room_width_m": 8.0,
///   "room_height_m": 3.0,
///   "work_plane_m": 0.8,
///   "target_lux": 500.0,
///   "luminaire_lm": 4000.0,
///   "luminaire_w": 36.0,
///   "maintenance_factor": 0.8,
///   "reflectance": "medium"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingInput {
    /// Room length (m), the axis along which columns run
    pub room_length_m: f64,
    /// Room width (m)
    pub room_width_m: f64,
    /// Mounting height of the luminaires above floor (m)
    pub room_height_m: f64,
    /// Height of the working plane above floor (m)
    pub work_plane_m: f64,
    /// Target maintained illuminance (lux)
    pub target_lux: f64,
    /// Luminous flux per luminaire (lm)
    pub luminaire_lm: f64,
    /// Electrical power per luminaire (W)
    pub luminaire_w: f64,
    /// Maintenance factor in (0, 1]
    pub maintenance_factor: f64,
    /// Surface reflectance class
    pub reflectance: Reflectance,
}

impl LightingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validation::positive_at_most("room_length_m", self.room_length_m, MAX_DIMENSION_M)?;
        validation::positive_at_most("room_width_m", self.room_width_m, MAX_DIMENSION_M)?;
        validation::positive_at_most("room_height_m", self.room_height_m, MAX_DIMENSION_M)?;
        validation::non_negative("work_plane_m", self.work_plane_m)?;
        if self.room_height_m <= self.work_plane_m {
            return Err(CalcError::invalid_input(
                "room_height_m",
                self.room_height_m.to_string(),
                format!("Mounting height must be above the work plane ({} m)", self.work_plane_m),
            ));
        }
        validation::positive("target_lux", self.target_lux)?;
        validation::positive("luminaire_lm", self.luminaire_lm)?;
        validation::positive("luminaire_w", self.luminaire_w)?;
        validation::finite("maintenance_factor", self.maintenance_factor)?;
        if self.maintenance_factor <= 0.0 || self.maintenance_factor > 1.0 {
            return Err(CalcError::invalid_input(
                "maintenance_factor",
                self.maintenance_factor.to_string(),
                "Maintenance factor must be greater than 0 and at most 1",
            ));
        }
        Ok(())
    }

    /// Floor area (m²)
    pub fn area_m2(&self) -> f64 {
        self.room_length_m * self.room_width_m
    }

    /// Room index k
    pub fn room_index(&self) -> f64 {
        let mounting = self.room_height_m - self.work_plane_m;
        self.area_m2() / (mounting * (self.room_length_m + self.room_width_m))
    }
}

/// Results from lighting design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingResult {
    pub area_m2: f64,
    pub room_index: f64,
    /// Table bucket the room index was snapped to
    pub room_index_bucket: f64,
    pub utilization_factor: f64,
    /// Minimum luminaires for the target illuminance
    pub num_luminaires: u32,
    pub layout_rows: u32,
    pub layout_cols: u32,
    /// rows × cols
    pub installed_luminaires: u32,
    /// Maintained illuminance with the installed grid (lux)
    pub actual_lux: f64,
    pub total_power_w: f64,
    pub power_density_wm2: f64,
    /// Centre-to-centre spacing along the length (m)
    pub spacing_length_m: f64,
    /// Centre-to-centre spacing along the width (m)
    pub spacing_width_m: f64,
}

/// Design the lighting for a room.
pub fn calculate(input: &LightingInput) -> CalcResult<LightingResult> {
    input.validate()?;

    let area_m2 = input.area_m2();
    let room_index = input.room_index();
    let (room_index_bucket, uf) = utilization_factor(room_index, input.reflectance);

    let delivered_per_luminaire = input.luminaire_lm * uf * input.maintenance_factor;
    let required = (input.target_lux * area_m2 / delivered_per_luminaire).ceil();
    let num_luminaires = to_count("num_luminaires", required)?;

    // Narrow rooms put every luminaire in a single row
    let n = f64::from(num_luminaires);
    let cols = (n * input.room_length_m / input.room_width_m)
        .sqrt()
        .ceil()
        .min(n)
        .max(1.0);
    let rows = (n / cols).ceil().max(1.0);
    let layout_cols = to_count("layout_cols", cols)?;
    let layout_rows = to_count("layout_rows", rows)?;
    let installed_luminaires = layout_rows.checked_mul(layout_cols).ok_or_else(|| {
        CalcError::invalid_input(
            "installed_luminaires",
            format!("{} x {}", layout_rows, layout_cols),
            "Layout is too large",
        )
    })?;

    let installed = f64::from(installed_luminaires);
    let total_power_w = installed * input.luminaire_w;

    Ok(LightingResult {
        area_m2,
        room_index,
        room_index_bucket,
        utilization_factor: uf,
        num_luminaires,
        layout_rows,
        layout_cols,
        installed_luminaires,
        actual_lux: installed * delivered_per_luminaire / area_m2,
        total_power_w,
        power_density_wm2: total_power_w / area_m2,
        spacing_length_m: input.room_length_m / cols,
        spacing_width_m: input.room_width_m / rows,
    })
}

fn to_count(field: &str, value: f64) -> CalcResult<u32> {
    if value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX) {
        Ok(value as u32)
    } else {
        Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Luminaire count is out of range",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_room() -> LightingInput {
        LightingInput {
            room_length_m: 10.0,
            room_width_m: 8.0,
            room_height_m: 3.0,
            work_plane_m: 0.8,
            target_lux: 500.0,
            luminaire_lm: 4000.0,
            luminaire_w: 36.0,
            maintenance_factor: 0.8,
            reflectance: Reflectance::Medium,
        }
    }

    #[test]
    fn test_reference_office() {
        let result = calculate(&test_room()).unwrap();

        // k = 80 / (2.2 × 18) = 2.02 → bucket 2.0, UF 0.58
        assert!((result.room_index - 2.0202).abs() < 0.0001);
        assert_eq!(result.room_index_bucket, 2.0);
        assert_eq!(result.utilization_factor, 0.58);

        // 500 × 80 / (4000 × 0.58 × 0.8) = 21.55 → 22
        assert_eq!(result.num_luminaires, 22);
        assert_eq!(result.layout_cols, 6);
        assert_eq!(result.layout_rows, 4);
        assert_eq!(result.installed_luminaires, 24);

        assert!((result.actual_lux - 556.8).abs() < 1e-9);
        assert!((result.total_power_w - 864.0).abs() < 1e-9);
        assert!((result.power_density_wm2 - 10.8).abs() < 1e-9);
        assert!((result.spacing_width_m - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_installed_meets_target() {
        for reflectance in [Reflectance::Low, Reflectance::Medium, Reflectance::High] {
            let mut input = test_room();
            input.reflectance = reflectance;
            let result = calculate(&input).unwrap();
            assert!(result.installed_luminaires >= result.num_luminaires);
            assert!(result.actual_lux >= input.target_lux);
        }
    }

    #[test]
    fn test_corridor_is_a_single_row() {
        let mut input = test_room();
        input.room_length_m = 50.0;
        input.room_width_m = 2.0;
        input.target_lux = 100.0;
        let result = calculate(&input).unwrap();

        assert_eq!(result.layout_rows, 1);
        assert_eq!(result.layout_cols, result.num_luminaires);
        assert_eq!(result.installed_luminaires, result.num_luminaires);
        assert!((result.spacing_length_m - 50.0 / f64::from(result.num_luminaires)).abs() < 1e-9);
    }

    #[test]
    fn test_grid_is_smallest_for_any_aspect_ratio() {
        // 1:1, 5:1, 25:1 and the transposed 1:5
        for (length, width) in [(10.0, 10.0), (25.0, 5.0), (50.0, 2.0), (5.0, 25.0)] {
            for target_lux in [100.0, 300.0, 750.0] {
                let mut input = test_room();
                input.room_length_m = length;
                input.room_width_m = width;
                input.target_lux = target_lux;
                let r = calculate(&input).unwrap();

                let context = format!("{}x{} at {} lx", length, width, target_lux);
                assert!(r.installed_luminaires >= r.num_luminaires, "{}", context);
                assert!(r.layout_cols <= r.num_luminaires, "{}", context);
                assert!(r.installed_luminaires - r.num_luminaires < r.layout_cols, "{}", context);
                assert!(r.actual_lux >= target_lux - 1e-9, "{}", context);
            }
        }
    }

    #[test]
    fn test_doubling_area_never_decreases_count() {
        for (length, width) in [(4.0, 3.0), (10.0, 8.0), (20.0, 5.0), (2.0, 2.0), (50.0, 30.0)] {
            let mut input = test_room();
            input.room_length_m = length;
            input.room_width_m = width;
            let before = calculate(&input).unwrap().num_luminaires;

            input.room_length_m = length * 2.0;
            let after = calculate(&input).unwrap().num_luminaires;
            assert!(after >= before, "{}x{}: {} -> {}", length, width, before, after);
        }
    }

    #[test]
    fn test_small_room_gets_one_luminaire() {
        let mut input = test_room();
        input.room_length_m = 1.0;
        input.room_width_m = 1.0;
        input.target_lux = 50.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.num_luminaires, 1);
        assert_eq!(result.installed_luminaires, 1);
    }

    #[test]
    fn test_height_at_work_plane_rejected() {
        let mut input = test_room();
        input.room_height_m = 0.8;
        assert_eq!(calculate(&input).unwrap_err().field(), Some("room_height_m"));
    }

    #[test]
    fn test_maintenance_factor_bounds() {
        let mut input = test_room();
        input.maintenance_factor = 1.2;
        assert_eq!(calculate(&input).unwrap_err().field(), Some("maintenance_factor"));
    }
}
