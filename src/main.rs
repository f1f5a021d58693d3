mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use platformer::compute::{init_state, tick};
use platformer::config::GameConfig;
use platformer::entities::{GameState, Intents};
use platformer::level::Level;

/// Environment variable naming the log file.  Logging is off when unset:
/// the game owns the terminal, so nothing may be written to stdout/stderr.
const LOG_ENV: &str = "PLATFORMER_LOG";

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// at 60 FPS, 8 frames (≈133 ms) outlasts the OS key-repeat interval, so the
/// key stays live while it is actively generating repeats.
const HOLD_WINDOW: u64 = 8;

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

/// Decode the currently held keys into this frame's intents.
fn read_intents(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> Intents {
    Intents {
        move_left: any_held(
            key_frame,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            frame,
        ),
        move_right: any_held(
            key_frame,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            frame,
        ),
        jump: any_held(
            key_frame,
            &[KeyCode::Char(' '), KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
            frame,
        ),
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging() {
    let Ok(path) = std::env::var(LOG_ENV) else {
        return;
    };
    match std::fs::File::create(&path) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
                .init();
        }
        Err(e) => eprintln!("cannot open log file {path}: {e}"),
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  PLATFORMER  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(4),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let legend: &[(&str, Color, &str)] = &[
        ("●", Color::Yellow, " Coin   — 10 points"),
        ("▓", Color::DarkRed, " Enemy  — jump on it for 100, touch it and lose a life"),
        ("▶", Color::Green, " Flag   — reach it to clear the level"),
    ];
    for (i, (sym, color, desc)) in legend.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(20), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(20), cy + 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("ENTER / SPACE : Start   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => match code {
                KeyCode::Enter | KeyCode::Char(' ') => return Ok(MenuResult::Start),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            },
            Ok(_) => {}
            Err(_) => return Ok(MenuResult::Quit),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the keys that are still
/// "fresh" become that frame's `Intents`, so running and jumping can be held
/// together.  Keyboard-enhancement terminals also send `Release`, which drops
/// the key immediately.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    level: &Level,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let frame_time = Duration::from_millis(1000 / u64::from(config.tick_rate_hz.max(1)));

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut hud = |score: u32, lives: u32| tracing::info!(score, lives, "hud update");

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if state.status.is_terminal() => {
                            return Ok(false);
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

        // Terminal states are frozen; stop ticking once one is reached.
        if !state.status.is_terminal() {
            let intents = read_intents(&key_frame, frame);
            *state = tick(state, level, config, &intents, &mut hud);
        }

        let (width, height) = terminal::size()?;
        display::render(out, state, level, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let level = match std::env::args().nth(1) {
        Some(path) => Level::load(Path::new(&path))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?,
        None => Level::default(),
    };
    let config = GameConfig::load();
    tracing::info!("Starting platformer");

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

    let result = run(&mut out, &rx, &level, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!("Exiting with error: {e}");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    level: &Level,
    config: &GameConfig,
) -> std::io::Result<()> {
    loop {
        match show_menu(out, rx)? {
            MenuResult::Quit => break,
            MenuResult::Start => {
                let mut state = init_state(level, config);
                let quit = game_loop(out, &mut state, level, config, rx)?;
                tracing::info!(
                    score = state.score,
                    lives = state.lives,
                    "session ended: {:?}",
                    state.status
                );
                if quit {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
