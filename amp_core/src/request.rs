//! # Request Parsing
//!
//! Turns a raw JSON request into a typed [`CalculationRequest`].
//!
//! The request is read field by field, and every failure is a [`CalcError`]
//! naming the offending field:
//!
//! | Problem                                  | Error                |
//! |------------------------------------------|----------------------|
//! | Field absent or `null`                   | `MissingField`       |
//! | Enumerated field holds an unknown token  | `UnrecognizedOption` |
//! | Wrong JSON type (e.g. text for a number) | `InvalidInput`       |
//! | Text is not JSON at all                  | `SerializationError` |
//!
//! Range checks are left to each calculator's `validate()`.
//!
//! The field names read here must match the serde names of the `*Input`
//! structs; `test_every_calculator_matches_serde_form` checks both readings
//! agree for each calculator.
//!
//! ## Example
//!
//! ```rust
//! use amp_core::request::parse_request;
//!
//! let err = parse_request(r#"{"calculator": "ups", "it_load_kw": 100}"#).unwrap_err();
//! assert_eq!(err.field(), Some("runtime_min"));
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::calculations::cable::{Mounting, PhaseConfiguration};
use crate::calculations::generator::GeneratorRedundancy;
use crate::calculations::motor::StartingMethod;
use crate::calculations::transformer::TransformerLoad;
use crate::calculations::ups::UpsRedundancy;
use crate::calculations::{
    CableInput, CalculationRequest, CostInput, GeneratorInput, GroundingInput, LightingInput,
    MotorInput, PfcInput, TransformerInput, UpsInput, CALCULATORS,
};
use crate::errors::{CalcError, CalcResult};
use crate::tables::cables::ConductorMaterial;
use crate::tables::lighting::Reflectance;

/// Parse a JSON request into a typed calculation request.
pub fn parse_request(json: &str) -> CalcResult<CalculationRequest> {
    let value: Value = serde_json::from_str(json)?;
    request_from_value(&value)
}

/// Build a typed calculation request from an already-parsed JSON value.
pub fn request_from_value(value: &Value) -> CalcResult<CalculationRequest> {
    let map = value.as_object().ok_or_else(|| {
        CalcError::invalid_input("request", json_type(value), "Request must be a JSON object")
    })?;
    let fields = FieldMap::new(map, String::new());

    let calculator = fields.text("calculator")?;
    let request = match calculator.as_str() {
        "cable" => CalculationRequest::Cable(CableInput {
            load_kw: fields.number("load_kw")?,
            phases: fields.option::<PhaseConfiguration>("phases", &PhaseConfiguration::TOKENS)?,
            material: fields.option::<ConductorMaterial>("material", &ConductorMaterial::TOKENS)?,
            cross_section_mm2: fields.number("cross_section_mm2")?,
            length_m: fields.number("length_m")?,
            mounting: fields.option::<Mounting>("mounting", &Mounting::TOKENS)?,
            power_factor: fields.number("power_factor")?,
        }),
        "ups" => CalculationRequest::Ups(UpsInput {
            it_load_kw: fields.number("it_load_kw")?,
            runtime_min: fields.count("runtime_min")?,
            redundancy: fields.option::<UpsRedundancy>("redundancy", &UpsRedundancy::TOKENS)?,
            power_factor: fields.number("power_factor")?,
            growth_margin_pct: fields.count("growth_margin_pct")?,
            safety_margin_pct: fields.count("safety_margin_pct")?,
        }),
        "transformer" => {
            let loads = fields
                .list("loads")?
                .iter()
                .enumerate()
                .map(|(index, load)| {
                    Ok(TransformerLoad {
                        name: load.text_or("name", &format!("Load {}", index + 1))?,
                        kw: load.number("kw")?,
                        power_factor: load.number("power_factor")?,
                        demand_factor: load.number("demand_factor")?,
                    })
                })
                .collect::<CalcResult<Vec<_>>>()?;
            CalculationRequest::Transformer(TransformerInput {
                loads,
                growth_margin_pct: fields.number("growth_margin_pct")?,
            })
        }
        "generator" => CalculationRequest::Generator(GeneratorInput {
            total_load_kw: fields.number("total_load_kw")?,
            motor_starting_kw: fields.number_or("motor_starting_kw", 0.0)?,
            power_factor: fields.number("power_factor")?,
            altitude_m: fields.number("altitude_m")?,
            temperature_c: fields.number("temperature_c")?,
            redundancy: fields
                .option::<GeneratorRedundancy>("redundancy", &GeneratorRedundancy::TOKENS)?,
        }),
        "pfc" => CalculationRequest::Pfc(PfcInput {
            load_kw: fields.number("load_kw")?,
            current_pf: fields.number("current_pf")?,
            target_pf: fields.number("target_pf")?,
            voltage: fields.number("voltage")?,
        }),
        "lighting" => CalculationRequest::Lighting(LightingInput {
            room_length_m: fields.number("room_length_m")?,
            room_width_m: fields.number("room_width_m")?,
            room_height_m: fields.number("room_height_m")?,
            work_plane_m: fields.number("work_plane_m")?,
            target_lux: fields.number("target_lux")?,
            luminaire_lm: fields.number("luminaire_lm")?,
            luminaire_w: fields.number("luminaire_w")?,
            maintenance_factor: fields.number("maintenance_factor")?,
            reflectance: fields.option::<Reflectance>("reflectance", &Reflectance::TOKENS)?,
        }),
        "grounding" => CalculationRequest::Grounding(GroundingInput {
            soil_resistivity_ohm_m: fields.number("soil_resistivity_ohm_m")?,
            rod_length_m: fields.number("rod_length_m")?,
            rod_diameter_m: fields.number("rod_diameter_m")?,
            target_resistance_ohm: fields.number("target_resistance_ohm")?,
            num_rods: fields.count("num_rods")?,
            rod_spacing_m: fields.number("rod_spacing_m")?,
        }),
        "cost" => CalculationRequest::Cost(CostInput {
            load_kw: fields.number("load_kw")?,
            hours_per_day: fields.number("hours_per_day")?,
            days_per_month: fields.number("days_per_month")?,
            price_per_kwh: fields.number("price_per_kwh")?,
            demand_charge_per_kw: fields.number_or("demand_charge_per_kw", 0.0)?,
            power_factor: fields.number("power_factor")?,
            efficiency_pct: fields.number("efficiency_pct")?,
        }),
        "motor" => CalculationRequest::Motor(MotorInput {
            motor_kw: fields.number("motor_kw")?,
            voltage: fields.number("voltage")?,
            efficiency_pct: fields.number("efficiency_pct")?,
            power_factor: fields.number("power_factor")?,
            starting_method: fields
                .option::<StartingMethod>("starting_method", &StartingMethod::TOKENS)?,
            poles: fields.count("poles")?,
        }),
        other => return Err(CalcError::unrecognized_option("calculator", other, &CALCULATORS)),
    };
    Ok(request)
}

/// A JSON object read field by field, with error paths prefixed for
/// nested objects (e.g. `loads[2].kw`).
struct FieldMap<'a> {
    map: &'a Map<String, Value>,
    prefix: String,
}

impl<'a> FieldMap<'a> {
    fn new(map: &'a Map<String, Value>, prefix: String) -> Self {
        FieldMap { map, prefix }
    }

    fn path(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn required(&self, key: &str) -> CalcResult<&'a Value> {
        self.get(key).ok_or_else(|| CalcError::missing_field(self.path(key)))
    }

    fn wrong_type(&self, key: &str, value: &Value, expected: &str) -> CalcError {
        CalcError::invalid_input(self.path(key), json_type(value), format!("Expected {}", expected))
    }

    fn number(&self, key: &str) -> CalcResult<f64> {
        let value = self.required(key)?;
        value.as_f64().ok_or_else(|| self.wrong_type(key, value, "a number"))
    }

    fn number_or(&self, key: &str, default: f64) -> CalcResult<f64> {
        match self.get(key) {
            Some(_) => self.number(key),
            None => Ok(default),
        }
    }

    /// Non-negative whole number; `10.0` is accepted as 10
    fn count(&self, key: &str) -> CalcResult<u32> {
        let value = self.required(key)?;
        let whole = value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= f64::from(u32::MAX))
                .map(|v| v as u64)
        });
        whole
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| self.wrong_type(key, value, "a non-negative whole number"))
    }

    fn text(&self, key: &str) -> CalcResult<String> {
        let value = self.required(key)?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| self.wrong_type(key, value, "a string"))
    }

    fn text_or(&self, key: &str, default: &str) -> CalcResult<String> {
        match self.get(key) {
            Some(_) => self.text(key),
            None => Ok(default.to_owned()),
        }
    }

    /// Enumerated field: a string token from a closed set
    fn option<T: DeserializeOwned>(&self, key: &str, tokens: &[&str]) -> CalcResult<T> {
        let token = self.text(key)?;
        serde_json::from_value(Value::String(token.clone()))
            .map_err(|_| CalcError::unrecognized_option(self.path(key), token, tokens))
    }

    /// Array of objects, each read with its own indexed prefix
    fn list(&self, key: &str) -> CalcResult<Vec<FieldMap<'a>>> {
        let value = self.required(key)?;
        let items = value.as_array().ok_or_else(|| self.wrong_type(key, value, "an array"))?;
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let prefix = format!("{}{}[{}].", self.prefix, key, index);
                item.as_object()
                    .map(|map| FieldMap::new(map, prefix.clone()))
                    .ok_or_else(|| {
                        CalcError::invalid_input(
                            prefix.trim_end_matches('.').to_owned(),
                            json_type(item),
                            "Expected an object",
                        )
                    })
            })
            .collect()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::run;
    use crate::constants::EngineConstants;

    const CABLE_REQUEST: &str = r#"{
        "calculator": "cable",
        "load_kw": 10.0,
        "phases": "3F_400V",
        "material": "Cu",
        "cross_section_mm2": 2.5,
        "length_m": 50.0,
        "mounting": "open",
        "power_factor": 0.9
    }"#;

    #[test]
    fn test_parse_cable_request() {
        match parse_request(CABLE_REQUEST).unwrap() {
            CalculationRequest::Cable(input) => {
                assert_eq!(input.phases, PhaseConfiguration::ThreePhase400V);
                assert_eq!(input.material, ConductorMaterial::Copper);
                assert_eq!(input.mounting, Mounting::Open);
                assert_eq!(input.cross_section_mm2, 2.5);
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn test_parse_matches_serde_form() {
        let parsed = parse_request(CABLE_REQUEST).unwrap();
        let direct: CalculationRequest = serde_json::from_str(CABLE_REQUEST).unwrap();
        assert_eq!(parsed, direct);
    }

    #[test]
    fn test_every_calculator_matches_serde_form() {
        let requests = [
            CABLE_REQUEST,
            r#"{"calculator": "ups", "it_load_kw": 100.0, "runtime_min": 10, "redundancy": "2N",
                "power_factor": 0.9, "growth_margin_pct": 20, "safety_margin_pct": 10}"#,
            r#"{"calculator": "transformer", "growth_margin_pct": 20.0, "loads": [
                {"name": "HVAC", "kw": 150.0, "power_factor": 0.85, "demand_factor": 0.8}]}"#,
            r#"{"calculator": "generator", "total_load_kw": 200.0, "motor_starting_kw": 30.0,
                "power_factor": 0.8, "altitude_m": 500.0, "temperature_c": 30.0,
                "redundancy": "N+1"}"#,
            r#"{"calculator": "pfc", "load_kw": 150.0, "current_pf": 0.75, "target_pf": 0.95,
                "voltage": 400.0}"#,
            r#"{"calculator": "lighting", "room_length_m": 10.0, "room_width_m": 8.0,
                "room_height_m": 3.0, "work_plane_m": 0.8, "target_lux": 500.0,
                "luminaire_lm": 4000.0, "luminaire_w": 36.0, "maintenance_factor": 0.8,
                "reflectance": "medium"}"#,
            r#"{"calculator": "grounding", "soil_resistivity_ohm_m": 100.0, "rod_length_m": 3.0,
                "rod_diameter_m": 0.016, "target_resistance_ohm": 10.0, "num_rods": 4,
                "rod_spacing_m": 6.0}"#,
            r#"{"calculator": "cost", "load_kw": 50.0, "hours_per_day": 10.0,
                "days_per_month": 22.0, "price_per_kwh": 0.15, "demand_charge_per_kw": 10.0,
                "power_factor": 0.9, "efficiency_pct": 90.0}"#,
            r#"{"calculator": "motor", "motor_kw": 15.0, "voltage": 400.0, "efficiency_pct": 90.0,
                "power_factor": 0.85, "starting_method": "Star-Delta", "poles": 4}"#,
        ];
        assert_eq!(requests.len(), CALCULATORS.len());

        for (json, name) in requests.iter().zip(CALCULATORS) {
            let parsed = parse_request(json).unwrap();
            let direct: CalculationRequest = serde_json::from_str(json).unwrap();
            assert_eq!(parsed.calculator(), name);
            assert_eq!(parsed, direct, "{}", name);
        }
    }

    #[test]
    fn test_missing_field_is_named() {
        let json = r#"{"calculator": "pfc", "load_kw": 150, "current_pf": 0.75, "voltage": 400}"#;
        let err = parse_request(json).unwrap_err();
        assert_eq!(err, CalcError::missing_field("target_pf"));

        let err = parse_request(r#"{"load_kw": 150}"#).unwrap_err();
        assert_eq!(err.field(), Some("calculator"));
    }

    #[test]
    fn test_null_counts_as_missing() {
        let err = parse_request(r#"{"calculator": "pfc", "load_kw": null}"#).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_FIELD");
        assert_eq!(err.field(), Some("load_kw"));
    }

    #[test]
    fn test_unknown_token_lists_expected() {
        let json = CABLE_REQUEST.replace("\"Cu\"", "\"Fe\"");
        match parse_request(&json).unwrap_err() {
            CalcError::UnrecognizedOption { field, value, expected } => {
                assert_eq!(field, "material");
                assert_eq!(value, "Fe");
                assert_eq!(expected, "Cu, Al");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_unknown_calculator() {
        let err = parse_request(r#"{"calculator": "solar"}"#).unwrap_err();
        assert_eq!(err.error_code(), "UNRECOGNIZED_OPTION");
        assert_eq!(err.field(), Some("calculator"));
    }

    #[test]
    fn test_wrong_json_type() {
        let json = CABLE_REQUEST.replace("\"load_kw\": 10.0", "\"load_kw\": \"ten\"");
        let err = parse_request(&json).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("load_kw"));

        let err = parse_request("[1, 2, 3]").unwrap_err();
        assert_eq!(err.field(), Some("request"));

        let err = parse_request("{not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_transformer_entries_are_indexed() {
        let json = r#"{
            "calculator": "transformer",
            "growth_margin_pct": 20,
            "loads": [
                {"name": "Lighting", "kw": 40, "power_factor": 0.95, "demand_factor": 1.0},
                {"kw": 150, "power_factor": 0.85}
            ]
        }"#;
        let err = parse_request(json).unwrap_err();
        assert_eq!(err, CalcError::missing_field("loads[1].demand_factor"));

        let fixed = json.replace(
            r#""power_factor": 0.85}"#,
            r#""power_factor": 0.85, "demand_factor": 0.8}"#,
        );
        match parse_request(&fixed).unwrap() {
            CalculationRequest::Transformer(input) => {
                assert_eq!(input.loads.len(), 2);
                assert_eq!(input.loads[1].name, "Load 2");
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn test_counts_accept_whole_floats_only() {
        let base = r#"{"calculator": "ups", "it_load_kw": 100, "runtime_min": RUNTIME,
            "redundancy": "N+1", "power_factor": 0.9, "growth_margin_pct": 20,
            "safety_margin_pct": 10}"#;
        assert!(parse_request(&base.replace("RUNTIME", "10.0")).is_ok());
        let err = parse_request(&base.replace("RUNTIME", "10.5")).unwrap_err();
        assert_eq!(err.field(), Some("runtime_min"));
        let err = parse_request(&base.replace("RUNTIME", "-5")).unwrap_err();
        assert_eq!(err.field(), Some("runtime_min"));
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"calculator": "generator", "total_load_kw": 100, "power_factor": 0.8,
            "altitude_m": 0, "temperature_c": 25, "redundancy": "N"}"#;
        match parse_request(json).unwrap() {
            CalculationRequest::Generator(input) => assert_eq!(input.motor_starting_kw, 0.0),
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn test_parsed_request_runs() {
        let request = parse_request(CABLE_REQUEST).unwrap();
        let response = run(&request, EngineConstants::standard()).unwrap();
        assert_eq!(response.calculator(), "cable");
    }
}
