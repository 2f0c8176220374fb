//! TOU planner entry point: CLI wiring and config-driven recomputation.

use std::path::Path;
use std::process;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tou_planner::config::HouseholdConfig;
use tou_planner::devices::SelectedDevice;
use tou_planner::io::export::export_profile_csv;
use tou_planner::io::snapshot::ComparisonSnapshot;
use tou_planner::sim::aggregate::recompute;

/// Parsed CLI arguments.
struct CliArgs {
    household_path: Option<String>,
    preset: Option<String>,
    profile_out: Option<String>,
    snapshot_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("tou-planner: time-of-use appliance cost and emissions planner");
    eprintln!();
    eprintln!("Usage: tou-planner [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --household <path>       Load household from TOML config file");
    eprintln!(
        "  --preset <name>          Use a built-in preset ({})",
        HouseholdConfig::PRESETS.join(", ")
    );
    eprintln!("  --profile-out <path>     Export current and optimized load profiles to CSV");
    eprintln!("  --snapshot-out <path>    Save a comparison snapshot as JSON");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after computing");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --household or --preset is given, the demo preset is used.");
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=debug) to adjust log verbosity.");
}

fn next_value(args: &[String], i: &mut usize, flag: &str, what: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("error: {flag} requires a {what} argument");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        household_path: None,
        preset: None,
        profile_out: None,
        snapshot_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--household" => cli.household_path = Some(next_value(&args, &mut i, "--household", "path")),
            "--preset" => cli.preset = Some(next_value(&args, &mut i, "--preset", "name")),
            "--profile-out" => {
                cli.profile_out = Some(next_value(&args, &mut i, "--profile-out", "path"));
            }
            "--snapshot-out" => {
                cli.snapshot_out = Some(next_value(&args, &mut i, "--snapshot-out", "path"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let value = next_value(&args, &mut i, "--port", "u16");
                if let Ok(p) = value.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{value}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Warns about devices whose schedule has fewer hours than their duration
/// needs; the optimized schedule may then cost more than the current one.
fn warn_under_covered(devices: &[SelectedDevice]) {
    for d in devices {
        let needed = d.duration_hours.ceil();
        let selected = d.blocks.selected_count();
        if (selected as f64) < needed {
            warn!(
                device = %d.device.name,
                selected,
                duration_hours = d.duration_hours,
                "selected hours do not cover the daily duration"
            );
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_args();

    // Load config: --household takes priority, then --preset, then demo default
    let household = if let Some(ref path) = cli.household_path {
        match HouseholdConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match HouseholdConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        HouseholdConfig::demo()
    };

    let errors = household.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let config = household.engine_config();
    let devices = household.selected_devices();
    warn_under_covered(&devices);
    let state = recompute(&devices, &config);

    println!("{state}");

    if let Some(ref path) = cli.profile_out {
        if let Err(e) =
            export_profile_csv(&state.current_profile, &state.optimized_profile, Path::new(path))
        {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(%path, "load profiles written");
    }

    if let Some(ref path) = cli.snapshot_out {
        if let Err(e) = ComparisonSnapshot::capture(&devices, &state).save(Path::new(path)) {
            eprintln!("error: failed to write snapshot: {e}");
            process::exit(1);
        }
        info!(%path, "snapshot written");
    }

    // Start API server if requested
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let app_state = Arc::new(tou_planner::api::AppState { config, state });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(tou_planner::api::serve(app_state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
