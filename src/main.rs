//! Binary entrypoint for sheetscroll.
//!
//! Stands in for the controlling surface: CLI for folder/speed/mode, a
//! stdin command thread for pause/resume/stop, and a completion channel
//! consumed back on this thread.

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use sheetscroll::{Mode, PlaybackSignals, StartOptions};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Auto-scrolling vertical strip.
    Scroll,
    /// Drag-panned horizontal overview (at most 3 pages).
    Tiled,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Scroll => Mode::Scroll,
            ModeArg::Tiled => Mode::Tiled,
        }
    }
}

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "sheetscroll", about = "Hands-free sheet music scroller")]
struct Cli {
    /// Folder holding the numbered page images (.png/.jpg/.jpeg)
    folder: PathBuf,

    /// Scroll speed; larger is faster
    #[arg(short, long, default_value_t = 2.0)]
    speed: f32,

    /// Playback layout
    #[arg(short, long, value_enum, default_value_t = ModeArg::Scroll)]
    mode: ModeArg,

    /// Hold at the bottom before looping back to the top
    #[arg(long, value_parser = humantime::parse_duration, default_value = "2m")]
    dwell: Duration,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("sheetscroll={}", level).parse()?)
        .add_directive("wgpu=warn".parse()?)
        .add_directive("winit=warn".parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

/// Read control commands from stdin and toggle the shared flags.
fn spawn_command_thread(signals: PlaybackSignals) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match line.trim() {
                "pause" => signals.signal_pause(),
                "resume" => signals.signal_resume(),
                "stop" | "quit" => {
                    signals.signal_stop();
                    break;
                }
                "" => {}
                other => warn!(command = other, "unknown command (pause/resume/stop)"),
            }
        }
    });
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    if !(cli.speed.is_finite() && cli.speed > 0.0) {
        bail!("--speed must be a positive number");
    }

    let mut options = StartOptions::new(cli.folder.clone(), cli.speed, cli.mode.into());
    options.dwell = cli.dwell;

    let session = sheetscroll::start(options)
        .with_context(|| format!("starting playback for {}", cli.folder.display()))?;
    info!(pages = session.page_count(), "loaded image set");

    let signals = PlaybackSignals::default();
    spawn_command_thread(signals.clone());

    // The completion callback fires on the render loop's thread; the
    // message is consumed here, on the controlling side.
    let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(1);
    session.run(signals, move || {
        let _ = done_tx.send(());
    })?;

    let _ = done_rx.recv();
    info!("playback finished");
    Ok(())
}
