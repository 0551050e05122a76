mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use display::{HudScore, TerminalCanvas};
use lane_crosser::config::GameConfig;
use lane_crosser::entities::{Direction, GameState};

#[derive(Parser, Debug)]
#[command(name = "lane_crosser")]
#[command(about = "Cross the board, dodge the bugs, grab the gems")]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of enemies (overrides the config file)
    #[arg(long)]
    enemies: Option<usize>,

    /// Write logs here; stdout is taken by the game screen
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_config(args: &Args) -> anyhow::Result<GameConfig> {
    let mut cfg = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(enemies) = args.enemies {
        cfg.enemy_count = enemies;
    }
    cfg.validate().context("validate config")?;
    Ok(cfg)
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Arrow keys and WASD move; every other key maps to `None`.
fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Key presses are applied to the player as they are drained at the top of
/// each frame, so the frame's collision checks see the moved player.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState<HudScore, StdRng>,
    rx: &mpsc::Receiver<Event>,
    frame: Duration,
) -> anyhow::Result<()> {
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, modifiers, .. }) = event {
                if is_quit(code, modifiers) {
                    return Ok(());
                }
                state.handle_input(direction_for(code));
            }
        }

        let dt = frame_start.duration_since(last).as_secs_f32();
        last = frame_start;

        let mut canvas = TerminalCanvas::new();
        let report = state.frame(dt, &mut canvas);
        if report.enemy_hits > 0 || report.gem_collected.is_some() {
            info!(
                frame = state.frame,
                hits = report.enemy_hits,
                gem = ?report.gem_collected,
                score = state.score.value(),
                "score changed"
            );
        }

        display::render(out, &canvas, state.score.display()).context("draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cfg = load_config(&args)?;
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    info!(enemies = cfg.enemy_count, frame_ms = cfg.frame_ms, seed = ?cfg.seed, "starting");

    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = GameState::new(&cfg, HudScore::default(), rng);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut state, &rx, Duration::from_millis(cfg.frame_ms));

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(score = state.score.value(), frames = state.frame, "game over");
    result
}
