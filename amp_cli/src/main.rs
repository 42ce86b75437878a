//! # Amperage CLI
//!
//! JSON-in, JSON-out front end for the `amp_core` sizing engine.
//!
//! ```text
//! amp_cli calc --input request.json      # run one calculation
//! echo '{...}' | amp_cli calc            # request from stdin
//! amp_cli tables                         # dump the standard tables
//! amp_cli awg --gauge 4/0                # gauge → mm²
//! amp_cli awg --mm2 16                   # mm² → nearest gauge
//! amp_cli constants                      # effective engine constants
//! ```
//!
//! `calc` always prints an envelope on stdout:
//! `{"status": "success", "calculator": ..., "results": {...}}` or
//! `{"status": "error", "error": {...}}`. A failed calculation exits with
//! status 1. Logs go to stderr.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use amp_core::tables::awg::{awg_to_mm2, nearest_awg};
use amp_core::tables::catalog;
use amp_core::{parse_request, CalcError, CalculationResponse, EngineConstants};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "amp_cli")]
#[command(about = "Amperage - electrical sizing calculations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file overriding engine constants
    #[arg(long, global = true, env = "AMP_CONSTANTS")]
    constants: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one calculation from a JSON request
    Calc {
        /// Request file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the standard tables as JSON
    Tables,

    /// Convert between AWG and mm²
    Awg {
        /// Cross-section to match to the nearest gauge
        #[arg(long, conflicts_with = "gauge", required_unless_present = "gauge")]
        mm2: Option<f64>,

        /// Gauge designation, e.g. 12 or 4/0
        #[arg(long)]
        gauge: Option<String>,
    },

    /// Print the effective engine constants as JSON
    Constants,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let constants = load_constants(cli.constants.as_deref())?;

    match &cli.command {
        Commands::Calc { input } => {
            let source = read_request(input.as_deref())?;
            let (envelope, ok) = calculate(&source, &constants)?;
            print_json(&envelope, cli.pretty)?;
            return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
        }
        Commands::Tables => print_json(&catalog(), cli.pretty)?,
        Commands::Awg { mm2, gauge } => {
            print_json(&awg_lookup(*mm2, gauge.as_deref())?, cli.pretty)?
        }
        Commands::Constants => print_json(&constants, cli.pretty)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn load_constants(path: Option<&Path>) -> Result<EngineConstants> {
    let Some(path) = path else {
        debug!("Using built-in engine constants");
        return Ok(EngineConstants::standard().clone());
    };
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read constants file {}", path.display()))?;
    let constants = EngineConstants::from_toml_str(&source)
        .with_context(|| format!("Invalid constants file {}", path.display()))?;
    info!("Loaded engine constants from {}", path.display());
    Ok(constants)
}

fn read_request(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => {
            debug!("Reading request from {}", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read request file {}", path.display()))
        }
        None => {
            debug!("Reading request from stdin");
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read request from stdin")?;
            Ok(source)
        }
    }
}

/// Run a raw request and wrap the outcome in the response envelope.
///
/// The flag is false when the calculation itself failed.
fn calculate(source: &str, constants: &EngineConstants) -> Result<(Value, bool)> {
    let outcome = parse_request(source).and_then(|request| {
        debug!(calculator = request.calculator(), "Parsed request");
        request.run(constants)
    });
    match outcome {
        Ok(response) => {
            info!(calculator = response.calculator(), "Calculation complete");
            Ok((success_envelope(&response)?, true))
        }
        Err(err) => {
            warn!(code = err.error_code(), "Calculation failed: {}", err);
            Ok((error_envelope(&err)?, false))
        }
    }
}

fn success_envelope(response: &CalculationResponse) -> Result<Value> {
    let mut envelope = serde_json::to_value(response)?;
    match envelope.as_object_mut() {
        Some(fields) => {
            fields.insert("status".to_owned(), json!("success"));
        }
        None => bail!("Calculation response did not serialize to an object"),
    }
    Ok(envelope)
}

fn error_envelope(err: &CalcError) -> Result<Value> {
    Ok(json!({
        "status": "error",
        "error": serde_json::to_value(err)?,
        "message": err.to_string(),
    }))
}

fn awg_lookup(mm2: Option<f64>, gauge: Option<&str>) -> Result<Value> {
    match (mm2, gauge) {
        (Some(mm2), _) => {
            let found = nearest_awg(mm2)?;
            Ok(json!({ "mm2": mm2, "nearest_awg": found.awg, "nearest_awg_mm2": found.mm2 }))
        }
        (None, Some(gauge)) => match awg_to_mm2(gauge) {
            Some(area) => Ok(json!({ "awg": gauge, "mm2": area })),
            None => bail!("Unknown AWG gauge '{}'", gauge),
        },
        (None, None) => bail!("Either --mm2 or --gauge is required"),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PFC_REQUEST: &str = r#"{"calculator": "pfc", "load_kw": 150, "current_pf": 0.75,
        "target_pf": 0.95, "voltage": 400}"#;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["amp_cli", "-v", "calc", "--input", "req.json"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Calc { input } => assert_eq!(input, Some(PathBuf::from("req.json"))),
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["amp_cli", "awg", "--gauge", "4/0", "--pretty"]).unwrap();
        assert!(cli.pretty);
        assert!(matches!(cli.command, Commands::Awg { mm2: None, .. }));
    }

    #[test]
    fn test_awg_requires_one_argument() {
        assert!(Cli::try_parse_from(["amp_cli", "awg"]).is_err());
        assert!(Cli::try_parse_from(["amp_cli", "awg", "--mm2", "16", "--gauge", "6"]).is_err());
    }

    #[test]
    fn test_success_envelope() {
        let (envelope, ok) = calculate(PFC_REQUEST, EngineConstants::standard()).unwrap();
        assert!(ok);
        assert_eq!(envelope["status"], "success");
        assert_eq!(envelope["calculator"], "pfc");
        assert_eq!(envelope["results"]["selected_kvar"], 100.0);
    }

    #[test]
    fn test_error_envelope() {
        let request = PFC_REQUEST.replace("\"target_pf\": 0.95", "\"target_pf\": 0.5");
        let (envelope, ok) = calculate(&request, EngineConstants::standard()).unwrap();
        assert!(!ok);
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["error"]["type"], "InvalidInput");
        assert_eq!(envelope["error"]["details"]["field"], "target_pf");
    }

    #[test]
    fn test_awg_lookup() {
        let value = awg_lookup(None, Some("4/0")).unwrap();
        assert_eq!(value["mm2"], 107.2);
        let value = awg_lookup(Some(16.0), None).unwrap();
        assert_eq!(value["nearest_awg"], "5");
        assert!(awg_lookup(None, Some("99")).is_err());
    }
}
