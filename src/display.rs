/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state and level.  No game logic is performed; this module only
/// scales world rectangles onto terminal cells and emits crossterm commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use platformer::entities::{Enemy, GameState, GameStatus, Player, Rect};
use platformer::level::Level;
use platformer::view::{enemy_visible, player_visible};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLATFORM: Color = Color::DarkYellow;
const C_COIN: Color = Color::Yellow;
const C_GOAL_POLE: Color = Color::DarkYellow;
const C_GOAL_FLAG: Color = Color::Green;
const C_PLAYER: Color = Color::Red;
const C_ENEMY: Color = Color::DarkRed;
const C_ENEMY_DEFEATED: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Maps world coordinates onto the bordered play area
/// (columns 1..width-1, rows 2..height-2).
struct Viewport {
    left: u16,
    top: u16,
    cols: u16,
    rows: u16,
    scale_x: f64,
    scale_y: f64,
}

impl Viewport {
    fn new(width: u16, height: u16, level: &Level) -> Self {
        let cols = width.saturating_sub(2).max(1);
        let rows = height.saturating_sub(4).max(1);
        Self {
            left: 1,
            top: 2,
            cols,
            rows,
            scale_x: f64::from(cols) / level.width,
            scale_y: f64::from(rows) / level.height,
        }
    }

    /// Cell span covered by `rect`, clipped to the play area.  Every visible
    /// rectangle covers at least one cell, however thin.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = (rect.x * self.scale_x).floor();
        let r0 = (rect.y * self.scale_y).floor();
        let c1 = (rect.right() * self.scale_x).ceil().max(c0 + 1.0);
        let r1 = (rect.bottom() * self.scale_y).ceil().max(r0 + 1.0);

        let c0 = c0.max(0.0);
        let r0 = r0.max(0.0);
        let c1 = c1.min(f64::from(self.cols));
        let r1 = r1.min(f64::from(self.rows));
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((
            self.left + c0 as u16,
            self.top + r0 as u16,
            self.left + c1 as u16,
            self.top + r1 as u16,
        ))
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a `width`×`height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    level: &Level,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = Viewport::new(width, height, level);

    draw_border(out, width, height)?;
    draw_hud(out, state, width)?;

    for platform in &level.platforms {
        fill(out, &view, platform, "█", C_PLATFORM)?;
    }
    for coin in &state.coins {
        fill(out, &view, coin, "●", C_COIN)?;
    }
    draw_goal(out, &view, &level.goal)?;

    for enemy in state.enemies.iter().filter(|e| enemy_visible(e)) {
        draw_enemy(out, &view, enemy)?;
    }
    if player_visible(&state.player) {
        draw_player(out, &view, &state.player)?;
    }

    draw_controls_hint(out, height)?;

    match state.status {
        GameStatus::Playing => {}
        GameStatus::GameOver => draw_overlay(out, state, width, height, "GAME  OVER", Color::Red)?,
        GameStatus::LevelComplete => {
            draw_overlay(out, state, width, height, "LEVEL COMPLETE!", Color::Green)?
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, width: u16) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("SCORE: {:>6}", state.score)))?;

    // Lives — right
    let hearts: String = "♥".repeat(state.lives as usize);
    let lives_text = format!("LIVES: {}", hearts);
    let rx = width.saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    Ok(())
}

// ── Shapes ────────────────────────────────────────────────────────────────────

fn fill<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: &str,
    color: Color,
) -> std::io::Result<()> {
    let Some((c0, r0, c1, r1)) = view.cells(rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let run = glyph.repeat((c1 - c0) as usize);
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&run))?;
    }
    Ok(())
}

fn draw_goal<W: Write>(out: &mut W, view: &Viewport, goal: &Rect) -> std::io::Result<()> {
    let Some((c0, r0, _, r1)) = view.cells(goal) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_GOAL_POLE))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print("│"))?;
    }
    out.queue(cursor::MoveTo(c0 + 1, r0))?;
    out.queue(style::SetForegroundColor(C_GOAL_FLAG))?;
    out.queue(Print("▶"))?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, view: &Viewport, player: &Player) -> std::io::Result<()> {
    fill(out, view, &player.rect(), "█", C_PLAYER)?;

    // Eyes on the side the player faces
    if let Some((c0, r0, c1, _)) = view.cells(&player.rect()) {
        let eye_col = if player.facing_right { c1 - 1 } else { c0 };
        out.queue(cursor::MoveTo(eye_col, r0))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print("o"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    if enemy.is_defeated {
        return fill(out, view, &enemy.rect(), "▁", C_ENEMY_DEFEATED);
    }
    fill(out, view, &enemy.rect(), "▓", C_ENEMY)
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE / ↑ / W : Jump   Q : Quit"))?;
    Ok(())
}

// ── End-of-session overlay ────────────────────────────────────────────────────

fn draw_overlay<W: Write>(
    out: &mut W,
    state: &GameState,
    width: u16,
    height: u16,
    title: &str,
    color: Color,
) -> std::io::Result<()> {
    let title_line = format!("║ {:^18} ║", title);
    let score_line = format!("Final Score: {:>6}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", color),
        (&title_line, color),
        ("╚════════════════════╝", color),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
