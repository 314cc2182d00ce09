use std::{io::Write, path::PathBuf, rc::Rc, time::Duration};

use clap::Parser;
use slotreel_core::{
    ConnectedFlag, EngineConfig, MemorySlots, RandomSource, ReelEngine, SeededRandom, Silent,
    SoundCue, SpinOutcome, ThreadRandom, TokioRuntime,
};
use tokio::task::LocalSet;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slotreel", about = "Spin the reels in the terminal")]
struct Cli {
    /// JSON engine config; built-in defaults when omitted
    #[arg(long, value_parser, env = "SLOTREEL_CONFIG")]
    config: Option<PathBuf>,
    /// Number of spins to play
    #[arg(long, default_value_t = 1)]
    spins: u32,
    /// Pause between consecutive spins
    #[arg(long, default_value_t = 3000)]
    interval_ms: u64,
    /// Seed for a repeatable run
    #[arg(long)]
    seed: Option<u64>,
    /// Play without a connected wallet; each refused spin is logged and skipped
    #[arg(long)]
    disconnected: bool,
    /// Ring the terminal bell when the reels start
    #[arg(long)]
    bell: bool,
    /// Print each outcome as a JSON line
    #[arg(long)]
    json: bool,
}

// Rings on stderr so stdout stays machine-readable with --json.
struct TerminalBell;

fn ring(out: &mut impl Write) -> std::io::Result<()> {
    out.write_all(b"\x07")?;
    out.flush()
}

impl SoundCue for TerminalBell {
    fn play_reel_spin(&self) {
        if let Err(err) = ring(&mut std::io::stderr()) {
            debug!(%err, "terminal bell failed");
        }
    }
}

fn render(round: u32, outcome: &SpinOutcome) -> String {
    let marker = outcome.win.map(|w| w.marker()).unwrap_or("-");
    format!("#{:>4} {:<5} {}", round, marker, outcome.text)
}

async fn run(cli: Cli, config: EngineConfig) -> anyhow::Result<()> {
    let slots = Rc::new(MemorySlots::new(config.reel_count));
    let sound: Rc<dyn SoundCue> = if cli.bell {
        Rc::new(TerminalBell)
    } else {
        Rc::new(Silent)
    };
    let rng: Box<dyn RandomSource> = match cli.seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    };
    let engine = ReelEngine::new(
        config,
        slots.clone(),
        Rc::new(ConnectedFlag::new(!cli.disconnected)),
        sound,
        Rc::new(TokioRuntime),
        rng,
    )?;

    let played = play_rounds(
        &engine,
        cli.spins,
        Duration::from_millis(cli.interval_ms),
        cli.json,
        &mut std::io::stdout(),
    )
    .await?;
    debug!(markers = ?slots.markers(), "display after last spin");
    info!(spins = cli.spins, played, indices = ?engine.indices(), "done");
    Ok(())
}

/// Plays `spins` rounds and returns how many were accepted. Refused spins
/// are logged and the loop moves on to the next round.
async fn play_rounds(
    engine: &ReelEngine,
    spins: u32,
    interval: Duration,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<u32> {
    let mut played = 0;
    for round in 1..=spins {
        if round > 1 {
            tokio::time::sleep(interval).await;
        }
        let outcome = match engine.spin().await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%err, round, "spin refused");
                continue;
            }
        };
        played += 1;
        if json {
            writeln!(out, "{}", serde_json::to_string(&outcome)?)?;
        } else {
            writeln!(out, "{}", render(round, &outcome))?;
        }
    }
    Ok(played)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };

    LocalSet::new().run_until(run(cli, config)).await
}
