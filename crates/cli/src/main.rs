#![deny(unsafe_code)]
//! CLI binary for the windfield cyclone simulator.
//!
//! Subcommands:
//! - `simulate <track.json>` — run a storm to completion, report peak winds
//! - `list` — print available wind profile models

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;
use windfield_core::config::{ModelConfig, ModelKind};
use windfield_core::grid::GridRect;
use windfield_core::saffir::SaffirCategory;
use windfield_core::track::{load_storm_file, select_storm};
use windfield_model::{Phase, StormEngine};

#[derive(Parser)]
#[command(name = "windfield", about = "Tropical cyclone wind-field simulator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a storm from a track file and report peak winds.
    Simulate(SimulateArgs),
    /// List available wind profile models.
    List,
}

#[derive(Args)]
struct SimulateArgs {
    /// Path to the JSON storm track file.
    track: PathBuf,

    /// Storm name to simulate (default: first storm in the file).
    #[arg(long)]
    storm: Option<String>,

    /// Wind profile model (holland, nws23).
    #[arg(short, long)]
    model: Option<String>,

    /// Fixed physics step in seconds.
    #[arg(long)]
    step_secs: Option<f64>,

    /// Elapsed seconds fed to the clock per tick (default: one step).
    #[arg(long)]
    tick_secs: Option<f64>,

    /// Stop after this many simulated hours.
    #[arg(long)]
    max_hours: Option<f64>,

    /// Global grid step in degrees.
    #[arg(long)]
    grid_step: Option<f64>,

    /// Number of radial sample rings.
    #[arg(long)]
    radial: Option<usize>,

    /// Number of angular sample spokes.
    #[arg(long)]
    angular: Option<usize>,

    /// Radius of storm influence in km.
    #[arg(long)]
    influence: Option<f64>,

    /// Treat the storm as over land after this many simulated hours.
    #[arg(long)]
    on_land_after: Option<f64>,

    /// Write a grayscale PNG of the touched grid region.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Additional configuration as a JSON object.
    #[arg(long, default_value = "{}")]
    params: String,
}

fn simulate(json_mode: bool, args: SimulateArgs) -> Result<(), CliError> {
    let params: serde_json::Value = serde_json::from_str(&args.params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    let mut config = ModelConfig::from_json(&params)?;

    // Explicit flags win over --params
    if let Some(name) = &args.model {
        config.model = ModelKind::from_name(name)?;
    }
    if let Some(v) = args.step_secs {
        config.step_size_secs = v;
    }
    if let Some(v) = args.grid_step {
        config.grid_step_deg = v;
    }
    if let Some(v) = args.radial {
        config.n_radial_samples = v;
    }
    if let Some(v) = args.angular {
        config.n_angular_samples = v;
    }
    if let Some(v) = args.influence {
        config.influence_radius_km = v;
    }

    let tick = args.tick_secs.unwrap_or(config.step_size_secs);
    if !tick.is_finite() || tick <= 0.0 {
        return Err(CliError::Input(format!(
            "--tick-secs must be > 0, got {tick}"
        )));
    }
    // The clock clamps each tick at max_tick_secs; widen it so the requested
    // tick is accepted in full.
    config.max_tick_secs = config.max_tick_secs.max(tick);
    config.validate()?;

    let tracks = load_storm_file(&args.track)?;
    let track = select_storm(&tracks, args.storm.as_deref())?.clone();
    let storm_name = track.name().to_string();

    let mut engine = StormEngine::new(config, track)?;
    while engine.phase() != Phase::Complete {
        if args.max_hours.is_some_and(|h| engine.elapsed_hours() >= h) {
            break;
        }
        if args
            .on_land_after
            .is_some_and(|h| engine.elapsed_hours() >= h)
        {
            engine.set_on_land(true);
        }
        engine.tick(tick, |_| {});
    }

    let grid = engine.grid();
    let everywhere = GridRect {
        min_meridian: 0,
        max_meridian: grid.n_meridians() - 1,
        min_parallel: 0,
        max_parallel: grid.n_parallels() - 1,
    };
    let (peak_mps, peak_m, peak_p) = grid.peak_in(everywhere);
    let category = SaffirCategory::from_mps(peak_mps);

    if let Some(path) = &args.snapshot {
        let rect = engine
            .last_rect()
            .ok_or_else(|| CliError::Input("no steps were run; nothing to snapshot".into()))?;
        windfield_model::snapshot::write_png(grid, rect, path)?;
    }

    if json_mode {
        let info = serde_json::json!({
            "storm": storm_name,
            "model": engine.config().model.name(),
            "steps": engine.step_count(),
            "simulated_hours": engine.elapsed_hours(),
            "eye": { "lon": engine.state().eye_lon, "lat": engine.state().eye_lat },
            "peak": {
                "speed_mps": peak_mps,
                "category": category.label(),
                "lon": grid.lon_at(peak_m),
                "lat": grid.lat_at(peak_p),
            },
            "max_land_speed_mps": engine.max_land_speed(),
            "snapshot": args.snapshot.as_ref().map(|p| p.display().to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!(
            "{storm_name}: {} steps ({:.1} simulated hours, {} model)",
            engine.step_count(),
            engine.elapsed_hours(),
            engine.config().model.name(),
        );
        println!(
            "final eye position: {:.2}, {:.2}",
            engine.state().eye_lon,
            engine.state().eye_lat
        );
        println!(
            "peak wind: {:.1} m/s (Saffir-Simpson {}) at {:.2}, {:.2}",
            peak_mps,
            category.label(),
            grid.lon_at(peak_m),
            grid.lat_at(peak_p),
        );
        if engine.max_land_speed() > 0.0 {
            println!("max wind over land: {:.1} m/s", engine.max_land_speed());
        }
        if let Some(path) = &args.snapshot {
            eprintln!("snapshot -> {}", path.display());
        }
    }

    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let models = ModelKind::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "models": models,
                    "defaults": ModelConfig::default(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Models:");
                for name in models {
                    println!("  {name}");
                }
            }
            Ok(())
        }
        Command::Simulate(args) => simulate(cli.json, args),
    }
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
