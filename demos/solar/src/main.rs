//! solar — two ships routed across a three-planet waypoint graph.
//!
//! Runs the built-in scenario (or a TOML file given with `--scenario`),
//! writes every lifecycle event to the chosen sink, and mirrors each event as
//! an `info` log line.  `--track` dumps per-frame positions as JSON for an
//! external renderer.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wp_event::{CsvSink, EventSink, MemorySink, SqliteSink, TracingSink};
use wp_sim::{NoopObserver, Scenario, SimBuilder, TrackRecorder};
use wp_spatial::DijkstraRouter;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SinkKind {
    Csv,
    Sqlite,
    #[cfg(feature = "parquet")]
    Parquet,
    /// Keep events in memory only (log lines still appear).
    Memory,
}

#[derive(Parser, Debug)]
#[command(name = "solar")]
#[command(about = "Route agents across a waypoint graph and step them frame by frame")]
struct Args {
    /// Scenario TOML file.  The built-in three-planet scenario is used when
    /// omitted.
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Directory for event output files.
    #[arg(short, long, default_value = "output/solar")]
    out: PathBuf,

    /// Event sink backend.
    #[arg(long, value_enum, default_value = "sqlite")]
    sink: SinkKind,

    /// Override the scenario's frame bound.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Write per-frame agent positions to this JSON file.
    #[arg(long)]
    track: Option<PathBuf>,

    /// Keep every n-th frame in the track file.
    #[arg(long, default_value = "1")]
    track_stride: u64,

    /// More log output (-v debug, -vv trace).  `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn open_sink(kind: SinkKind, dir: &Path) -> Result<Box<dyn EventSink>> {
    info!(?kind, dir = %dir.display(), "opening event sink");
    if kind != SinkKind::Memory {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }
    Ok(match kind {
        SinkKind::Csv     => Box::new(CsvSink::new(dir)?),
        SinkKind::Sqlite  => Box::new(SqliteSink::new(dir)?),
        #[cfg(feature = "parquet")]
        SinkKind::Parquet => Box::new(wp_event::ParquetSink::new(dir)?),
        SinkKind::Memory  => Box::new(MemorySink::new()),
    })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    // 1. Scenario.
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::from_path(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::default_solar(),
    };
    if let Some(max) = args.max_ticks {
        scenario.sim.max_ticks = max;
    }

    println!("=== solar — waypoint routing ===");
    println!(
        "Waypoints: {}  |  Routes: {}  |  Agents: {}  |  Frame bound: {}",
        scenario.waypoints.len(),
        scenario.routes.len(),
        scenario.agents.len(),
        scenario.sim.max_ticks,
    );
    println!();

    // 2. Sink: the chosen backend, teed into the log.
    let sink = (open_sink(args.sink, &args.out)?, TracingSink);

    // 3. Route agents and place them.
    let mut sim = SimBuilder::from_scenario(scenario, DijkstraRouter, sink)?.build()?;
    for u in sim.unroutable() {
        println!("{u}");
    }
    for agent in sim.agents() {
        println!("{:<10} path: {}", agent.name(), format_path(agent.path()));
    }
    println!();

    // 4. Run.
    let t0 = Instant::now();
    let mut track = args.track.as_ref().map(|_| TrackRecorder::with_stride(args.track_stride));
    let summary = match track.as_mut() {
        Some(t) => sim.run(t)?,
        None    => sim.run(&mut NoopObserver)?,
    };
    let elapsed = t0.elapsed();

    // 5. Summary.
    println!(
        "{} after {} frames in {:.3} ms",
        if summary.completed { "All agents arrived" } else { "Frame bound reached" },
        summary.ticks,
        elapsed.as_secs_f64() * 1e3,
    );
    println!();
    println!("{:<10} {:<9} {:>10} {:>10}", "Agent", "State", "x", "y");
    println!("{}", "-".repeat(42));
    for agent in sim.agents() {
        let p = agent.position();
        println!("{:<10} {:<9} {:>10.2} {:>10.2}", agent.name(), agent.state(), p.x, p.y);
    }

    // 6. Flush outputs.
    sim.into_sink().finish().context("finishing event sink")?;
    if let (Some(path), Some(track)) = (&args.track, &track) {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), track)?;
        println!();
        println!("Track: {} frames → {}", track.frames().len(), path.display());
    }
    if args.sink != SinkKind::Memory {
        println!("Events written under {}", args.out.display());
    }

    Ok(())
}

fn format_path(path: &[wp_core::Point2]) -> String {
    path.iter().map(ToString::to_string).collect::<Vec<_>>().join(" → ")
}
