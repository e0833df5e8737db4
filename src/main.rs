mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use bunny_run::config::GameConfig;
use bunny_run::events::GameEvent;
use bunny_run::game::{Game, Input};
use bunny_run::level::LevelDescription;
use bunny_run::snapshot;

const BUILTIN_LEVELS: [(&str, &str); 3] = [
    ("world-1", include_str!("../levels/world-1.json")),
    ("world-2", include_str!("../levels/world-2.json")),
    ("world-3", include_str!("../levels/world-3.json")),
];

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// 8 frames at 60 FPS (≈133 ms) outlasts the gap between OS key repeats.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "bunny_run", about = "Side-scrolling platformer in the terminal")]
struct Cli {
    /// Level file to play; repeat for a sequence. Defaults to the built-in worlds.
    #[arg(long = "level", value_name = "FILE")]
    levels: Vec<PathBuf>,

    /// JSON file overriding the default tuning values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start with sound events switched off.
    #[arg(long)]
    mute: bool,

    /// Write logs here (the terminal itself is the game screen).
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<GameConfig> {
    match path {
        None => Ok(GameConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json(&text).with_context(|| format!("in config {}", path.display()))
        }
    }
}

fn load_levels(paths: &[PathBuf]) -> anyhow::Result<Vec<LevelDescription>> {
    if paths.is_empty() {
        return BUILTIN_LEVELS
            .iter()
            .map(|(name, text)| {
                LevelDescription::from_json(text)
                    .with_context(|| format!("in built-in level {name}"))
            })
            .collect();
    }
    paths
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading level {}", path.display()))?;
            LevelDescription::from_json(&text)
                .with_context(|| format!("in level {}", path.display()))
        })
        .collect()
}

// ── Sound ─────────────────────────────────────────────────────────────────────

/// The terminal bell stands in for an audio device.
fn play_sounds<W: Write>(out: &mut W, events: &[GameEvent]) -> std::io::Result<()> {
    for event in events {
        debug!(?event, "sound");
        if matches!(
            event,
            GameEvent::Hurt | GameEvent::Death | GameEvent::LevelUp | GameEvent::GameOver
        ) {
            out.queue(crossterm::style::Print('\u{7}'))?;
        }
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Movement and sprint read "fresh" keys
/// every frame, so they can be held together with jumping. One-shot actions
/// (jump, pause, restart, any-key) are taken from press events only.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let frame_time = Duration::from_secs_f64(1.0 / game.config.fps as f64);
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut input = Input::default();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    input.any_key_pressed = true;
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(());
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                            input.jump_pressed = true;
                        }
                        KeyCode::Char('p') | KeyCode::Char('P') => input.pause_toggle = true,
                        KeyCode::Char('r') | KeyCode::Char('R') => input.restart_pressed = true,
                        KeyCode::Char('m') | KeyCode::Char('M') => {
                            let on = !game.events.sound_on();
                            game.events.set_sound_on(on);
                            info!(sound_on = on, "sound toggled");
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        input.move_left = any_held(
            &key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        );
        input.move_right = any_held(
            &key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        );
        input.sprint = any_held(&key_frame, &[KeyCode::Char('f'), KeyCode::Char('F')], frame);

        game.step(&input);
        let events = game.drain_events();
        play_sounds(out, &events)?;

        let (cols, rows) = terminal::size()?;
        let view = snapshot::capture(game, display::viewport_width(cols));
        display::render(out, &view, cols, rows)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref())?;

    let mut config = load_config(cli.config.as_deref())?;
    if cli.mute {
        config.sound_on = false;
    }
    let levels = load_levels(&cli.levels)?;
    let mut game = Game::new(&levels, config)?;
    info!(levels = levels.len(), "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(score = game.player.score, "exiting");
    result
}
