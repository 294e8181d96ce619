use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ble_wayfinding::core::Point;
use ble_wayfinding::scanner::mock::SimulationParams;
use ble_wayfinding::{ConfigurationManager, LocatorEngine, MockScanner, ScanSource, NO_DATA};

#[derive(Parser)]
#[command(name = "ble-wayfinding", version, about = "BLE beacon indoor positioning")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Feed a recorded scan log (one JSON event per line) through the engine
    Replay {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        events: PathBuf,
        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Synthesize readings for a known position and report the estimate
    Simulate {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        x: f64,
        #[arg(long)]
        y: f64,
        #[arg(long, default_value_t = 20)]
        rounds: usize,
        /// Uniform RSSI noise, +/- dB
        #[arg(long, default_value_t = 0.0)]
        jitter: f64,
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    match Cli::parse().command {
        Command::Replay {
            config,
            events,
            json,
        } => replay(config, events, json),
        Command::Simulate {
            config,
            x,
            y,
            rounds,
            jitter,
            seed,
        } => simulate(config, Point::new(x, y), rounds, jitter, seed),
    }
}

fn load_engine(config: &Path) -> Result<LocatorEngine> {
    let manager = ConfigurationManager::from_file(config)
        .with_context(|| format!("loading {}", config.display()))?;
    Ok(LocatorEngine::from_manager(manager)?)
}

fn replay(config: PathBuf, events: PathBuf, json: bool) -> Result<()> {
    let engine = load_engine(&config)?;
    let log = std::fs::read_to_string(&events)
        .with_context(|| format!("reading {}", events.display()))?;
    let (mut source, errors) = MockScanner::from_jsonl(&log);
    if !errors.is_empty() {
        info!(skipped = errors.len(), "malformed lines in scan log");
    }

    if !json {
        engine.register_position_callback(|p| {
            println!(
                "[{:>8} ms] position x={:.2} m, y={:.2} m (beacons {:?})",
                p.computed_at_ms, p.x, p.y, p.beacons
            );
        });
        engine.register_proximity_callback(|epoch| {
            if epoch.closest == NO_DATA {
                println!("[{:>8} ms] closest beacon: no data", epoch.closed_at_ms);
            } else {
                println!(
                    "[{:>8} ms] closest beacon: {} ({} votes)",
                    epoch.closed_at_ms, epoch.closest, epoch.votes
                );
            }
        });
    }

    let mut last_ms = None;
    while let Some(event) = source.next_event()? {
        last_ms = Some(event.timestamp_ms);
        engine.ingest(&event);
    }
    let Some(last_ms) = last_ms else {
        bail!("{} contains no scan events", events.display());
    };
    // close the epoch the log ended in
    engine.tick(last_ms + engine.config().epoch_ms);

    if json {
        let report = serde_json::json!({
            "position": engine.current_position(),
            "closest_beacon": engine.current_closest_beacon(),
            "beacons": engine.beacon_readings(),
            "stats": engine.stats(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&engine);
    }
    Ok(())
}

fn simulate(config: PathBuf, target: Point, rounds: usize, jitter: f64, seed: u64) -> Result<()> {
    let engine = load_engine(&config)?;
    let params = SimulationParams {
        target,
        rounds,
        jitter_db: jitter,
        seed,
        device_name: engine
            .config()
            .name_filters
            .first()
            .cloned()
            .unwrap_or_default(),
        ..SimulationParams::default()
    };
    let mut source = MockScanner::simulate(engine.directory(), &params);
    let ingested = engine.run(&mut source);
    info!(ingested, "simulation complete");

    print_summary(&engine);
    match engine.current_position() {
        Some(estimate) => println!(
            "Error from true position ({:.2}, {:.2}): {:.3} m",
            target.x,
            target.y,
            estimate.point().distance_to(&target)
        ),
        None => bail!("no position could be estimated"),
    }
    Ok(())
}

fn print_summary(engine: &LocatorEngine) {
    println!("\nBeacons:");
    for reading in engine.beacon_readings() {
        let distance = reading
            .distance_m
            .map_or_else(|| "-".to_string(), |d| format!("{d:.2} m"));
        println!(
            "  {:>2} {:<20} rssi={:>7.1} dBm  dist={:>9}  {}",
            reading.index,
            reading.id,
            reading.smoothed_rssi,
            distance,
            if reading.fresh { "fresh" } else { "stale" }
        );
    }

    match engine.current_position() {
        Some(p) => println!("Position: x={:.2} m, y={:.2} m", p.x, p.y),
        None => println!("Position: unknown"),
    }
    match engine.current_closest_beacon() {
        Some(NO_DATA) | None => println!("Closest beacon: no data"),
        Some(index) => println!("Closest beacon: {index}"),
    }

    let stats = engine.stats();
    println!(
        "Events: {} seen, {} accepted, {} filtered, {} unknown; {} fixes, {} indeterminate",
        stats.events_seen,
        stats.accepted,
        stats.filtered,
        stats.unknown_device,
        stats.positions_published,
        stats.indeterminate_solves
    );
}
