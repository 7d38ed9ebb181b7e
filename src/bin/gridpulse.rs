use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use gridpulse::{
    AdvanceReport, Clock as _, CpuSurface, Engine, EngineCommand, EngineConfig, EngineStats,
    Extents, Frame, ManualClock, SpawnRequest, TraceClass,
};

#[derive(Parser, Debug)]
#[command(name = "gridpulse", version)]
struct Cli {
    /// Log engine events (overridden by `RUST_LOG`).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate up to a timestamp and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Simulate and write every frame as a numbered PNG.
    Sequence(SequenceArgs),
    /// Simulate without drawing and print population counters as JSON.
    Stats(StatsArgs),
    /// Print the default engine configuration as JSON.
    Config,
}

#[derive(Args, Debug, Clone)]
struct SimArgs {
    /// Surface width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Simulated display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// RNG seed (overrides the config file).
    #[arg(long)]
    seed: Option<u64>,

    /// Engine config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Standard root traces requested at t=0, before the interval tickers kick in.
    #[arg(long, default_value_t = 3)]
    initial: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Timestamp of the written frame, in ms.
    #[arg(long)]
    at_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also dump the frame plan as JSON.
    #[arg(long)]
    plan_json: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Number of frames to write.
    #[arg(long)]
    frames: u32,

    /// Output directory for `frame_00000.png`...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    #[command(flatten)]
    sim: SimArgs,

    /// Simulated duration in ms.
    #[arg(long)]
    duration_ms: f64,
}

#[derive(serde::Serialize)]
struct StatsSummary {
    duration_ms: f64,
    frames: u64,
    final_active: usize,
    peak_ops: usize,
    totals: AdvanceReport,
    lifetime: EngineStats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Stats(args) => cmd_stats(args),
        Command::Config => cmd_config(),
    }
}

fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "gridpulse=debug" } else { "warn" })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Engine plus the synthetic clock driving it.
struct Session {
    engine: Engine,
    clock: ManualClock,
    step_ms: f64,
}

impl Session {
    fn new(sim: &SimArgs) -> anyhow::Result<Self> {
        if !sim.fps.is_finite() || sim.fps <= 0.0 {
            anyhow::bail!("--fps must be finite and > 0");
        }
        let mut config = match &sim.config {
            Some(path) => EngineConfig::from_path(path)
                .with_context(|| format!("load config '{}'", path.display()))?,
            None => EngineConfig::default(),
        };
        if sim.seed.is_some() {
            config.seed = sim.seed;
        }

        let mut engine = Engine::new(config).context("build engine")?;
        let clock = ManualClock::new(0.0);
        engine.start(Extents::new(sim.width, sim.height), clock.now_ms());
        for _ in 0..sim.initial {
            engine.submit(EngineCommand::SpawnRequested {
                request: SpawnRequest::root(TraceClass::Standard),
                at: clock.now_ms(),
            });
        }
        Ok(Self {
            engine,
            clock,
            step_ms: 1000.0 / sim.fps,
        })
    }

    /// Pump once per refresh from t=0 through `end_ms` inclusive.
    fn run_until(
        &mut self,
        end_ms: f64,
        mut on_frame: impl FnMut(&Frame) -> anyhow::Result<()>,
    ) -> anyhow::Result<()> {
        loop {
            let now = self.clock.now_ms();
            for frame in self.engine.pump(now) {
                on_frame(&frame)?;
            }
            if now >= end_ms {
                return Ok(());
            }
            self.clock.set((now + self.step_ms).min(end_ms));
        }
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !args.at_ms.is_finite() || args.at_ms < 0.0 {
        anyhow::bail!("--at-ms must be finite and >= 0");
    }
    let mut session = Session::new(&args.sim)?;
    let mut last = None;
    session.run_until(args.at_ms, |frame| {
        last = Some(frame.clone());
        Ok(())
    })?;
    let frame = last.context("simulation produced no frame")?;

    if let Some(path) = &args.plan_json {
        let json = serde_json::to_string_pretty(&frame.plan).context("serialize frame plan")?;
        write_file(path, json.as_bytes())?;
    }

    let mut surface = CpuSurface::new(frame.plan.canvas).context("create cpu surface")?;
    write_png(&mut surface, &frame, &args.out)?;
    eprintln!(
        "wrote {} ({} traces, {} ops)",
        args.out.display(),
        frame.report.drawn,
        frame.report.ops
    );
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut session = Session::new(&args.sim)?;
    let extents = Extents::new(args.sim.width, args.sim.height);
    let mut surface = CpuSurface::new(extents).context("create cpu surface")?;
    let end_ms = f64::from(args.frames.saturating_sub(1)) * session.step_ms;

    let mut written = 0u32;
    session.run_until(end_ms, |frame| {
        if written >= args.frames {
            return Ok(());
        }
        let path = args.out_dir.join(format!("frame_{written:05}.png"));
        write_png(&mut surface, frame, &path)?;
        written += 1;
        Ok(())
    })?;

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    if !args.duration_ms.is_finite() || args.duration_ms < 0.0 {
        anyhow::bail!("--duration-ms must be finite and >= 0");
    }
    let mut session = Session::new(&args.sim)?;
    let mut totals = AdvanceReport::default();
    let mut frames = 0u64;
    let mut peak_ops = 0usize;
    session.run_until(args.duration_ms, |frame| {
        let a = frame.report.advance;
        totals.checkpoints += a.checkpoints;
        totals.completions += a.completions;
        totals.branch_children += a.branch_children;
        totals.micro_children += a.micro_children;
        totals.expired += a.expired;
        totals.merged += a.merged;
        peak_ops = peak_ops.max(frame.report.ops);
        frames += 1;
        Ok(())
    })?;

    let summary = StatsSummary {
        duration_ms: args.duration_ms,
        frames,
        final_active: session.engine.traces().len(),
        peak_ops,
        totals,
        lifetime: session.engine.stats(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serialize stats")?
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    println!("{}", EngineConfig::default().to_json_pretty()?);
    Ok(())
}

fn write_png(surface: &mut CpuSurface, frame: &Frame, out: &Path) -> anyhow::Result<()> {
    let rgba = surface
        .render(&frame.plan)
        .with_context(|| format!("render frame at {}ms", frame.now))?
        .to_straight();
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        out,
        &rgba.data,
        rgba.width,
        rgba.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
