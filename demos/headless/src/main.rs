//! headless: runs the boids flock without a window.
//!
//! Loads a TOML settings file (or the built-in defaults), runs the frame loop
//! until `max_frames`, and appends the frame timing summary to a CSV log so
//! thread counts and populations can be compared across runs.
//!
//! ```text
//! cargo run --release -p headless -- --settings demos/headless/flock.toml --threads 8
//! RUST_LOG=boids_grid=debug cargo run -p headless -- --frames 600 --fixed-dt 0.016
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use boids_core::FlockConfig;
use boids_sim::{FixedStep, FlockSimBuilder, FrameClock, WallClock};
use boids_stats::{CsvSummaryWriter, FrameStats, SummaryRow, SummaryWriter};

#[derive(Parser, Debug)]
#[command(name = "headless", about = "Run the boids flock simulation without rendering")]
struct Args {
    /// TOML settings file.  Missing keys take their default values.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Override the number of worker threads.
    #[arg(short, long)]
    threads: Option<usize>,

    /// Override the number of frames to run (0 = until Enter is pressed).
    #[arg(short = 'n', long)]
    frames: Option<u64>,

    /// Override the population size.
    #[arg(short, long)]
    population: Option<usize>,

    /// Step every frame by this many seconds instead of wall-clock time.
    #[arg(long)]
    fixed_dt: Option<f32>,

    /// CSV file the timing summary is appended to.
    #[arg(long, default_value = "stats.csv")]
    stats_log: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();
    let config = load_config(&args).context("invalid settings")?;

    println!("=== headless: boids flock ===");
    println!(
        "Agents: {}  |  Plane: {}×{}  |  Threads: {}  |  Frames: {}",
        config.population,
        config.width,
        config.height,
        config.threads,
        if config.max_frames == 0 { "∞".to_string() } else { config.max_frames.to_string() },
    );
    println!("Press Enter to stop early; the timing summary is still written.");
    println!();

    let mut sim = FlockSimBuilder::new(config).build()?;
    let mut stats = FrameStats::new();

    let t0 = Instant::now();
    let frames = match args.fixed_dt {
        Some(dt) => sim.run(&mut StopOnEnter::spawn(FixedStep(dt))?, &mut stats),
        None => sim.run(&mut StopOnEnter::spawn(WallClock::new())?, &mut stats),
    };
    let elapsed = t0.elapsed();

    if let Some(id) = sim.check_grid_invariant() {
        tracing::warn!(%id, "grid membership out of sync with positions");
    }

    println!("Simulated {frames} frames in {:.3} s", elapsed.as_secs_f64());
    let Some(summary) = stats.summary() else {
        return Ok(());
    };
    println!(
        "  update phases: mean {:.1} µs  min {:.1} µs  max {:.1} µs  σ² {:.1} µs²",
        summary.mean_us, summary.min_us, summary.max_us, summary.variance_us2
    );

    let mut log = CsvSummaryWriter::open(&args.stats_log)
        .with_context(|| format!("opening stats log {}", args.stats_log.display()))?;
    log.write_summary(&SummaryRow::now(summary))?;
    log.finish()?;
    println!("  summary appended to {}", args.stats_log.display());

    Ok(())
}

/// Ends the run once a line arrives on stdin.  With stdin closed the run is
/// bounded by `max_frames` alone.
struct StopOnEnter<C> {
    clock: C,
    stop:  Arc<AtomicBool>,
}

impl<C: FrameClock> StopOnEnter<C> {
    fn spawn(clock: C) -> Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        thread::Builder::new()
            .name("stdin-quit".into())
            .spawn(move || {
                let mut line = String::new();
                if matches!(io::stdin().read_line(&mut line), Ok(n) if n > 0) {
                    tracing::info!("stop requested");
                    flag.store(true, Ordering::Relaxed);
                }
            })
            .context("starting stdin watcher")?;
        Ok(Self::with_flag(clock, stop))
    }

    fn with_flag(clock: C, stop: Arc<AtomicBool>) -> Self {
        Self { clock, stop }
    }
}

impl<C: FrameClock> FrameClock for StopOnEnter<C> {
    fn next_frame(&mut self) -> Option<f32> {
        if self.stop.load(Ordering::Relaxed) {
            return None;
        }
        self.clock.next_frame()
    }
}

/// Settings file (or defaults), then command-line overrides, then validation.
fn load_config(args: &Args) -> Result<FlockConfig> {
    let mut config = match &args.settings {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading settings file {}", path.display()))?;
            toml::from_str::<FlockConfig>(&text)
                .with_context(|| format!("parsing settings file {}", path.display()))?
        }
        None => FlockConfig::default(),
    };

    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    if let Some(frames) = args.frames {
        config.max_frames = frames;
    }
    if let Some(population) = args.population {
        config.population = population;
    }

    config.validate()?;
    Ok(config)
}
