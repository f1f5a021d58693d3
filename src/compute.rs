/// Frame loop and game state machine.
///
/// `tick` takes an immutable reference to the current `GameState` plus the
/// static level, tuning and this frame's intents, and returns a brand-new
/// `GameState`.  Side effects are limited to the injected `HudSink`, which is
/// told about every score or lives change as it happens.
use crate::collision::{check_collision, check_platform_collision};
use crate::config::GameConfig;
use crate::enemy;
use crate::entities::{Enemy, GameState, GameStatus, Intents, Player, Rect};
use crate::level::Level;
use crate::physics;

// ── Score / lives observer ───────────────────────────────────────────────────

/// Receives `(score, lives)` after each individual change.  Purely
/// observational: nothing flows back into the simulation.
pub trait HudSink {
    fn report(&mut self, score: u32, lives: u32);
}

impl<F: FnMut(u32, u32)> HudSink for F {
    fn report(&mut self, score: u32, lives: u32) {
        self(score, lives)
    }
}

/// Recording sink: keeps every report in order.
impl HudSink for Vec<(u32, u32)> {
    fn report(&mut self, score: u32, lives: u32) {
        self.push((score, lives));
    }
}

/// Sink that ignores every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl HudSink for NullSink {
    fn report(&mut self, _score: u32, _lives: u32) {}
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session for `level`: player at the spawn point, every
/// enemy patrolling, every coin in place.
pub fn init_state(level: &Level, config: &GameConfig) -> GameState {
    let (spawn_x, spawn_y) = level.spawn;
    GameState {
        player: Player::new(spawn_x, spawn_y, &config.player),
        enemies: level
            .enemies
            .iter()
            .map(|s| Enemy::new(s.x, s.y, s.min_x, s.max_x, &config.enemy))
            .collect(),
        coins: level.coins.clone(),
        score: 0,
        lives: config.starting_lives,
        status: GameStatus::Playing,
        frame: 0,
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Terminal states are frozen: the state comes back unchanged and the sink is
/// not called.  A transition to `GameOver` or `LevelComplete` ends the tick
/// immediately.
pub fn tick(
    state: &GameState,
    level: &Level,
    config: &GameConfig,
    intents: &Intents,
    sink: &mut impl HudSink,
) -> GameState {
    if state.status.is_terminal() {
        return state.clone();
    }

    let mut next = state.clone();
    next.frame += 1;

    // ── 1. Intents & player physics ──────────────────────────────────────────
    physics::apply_intents(&mut next.player, intents);
    physics::step(&mut next.player);

    // ── 2. Landing on platforms ──────────────────────────────────────────────
    for platform in &level.platforms {
        if check_platform_collision(&next.player.rect(), platform)
            && physics::land(&mut next.player, platform.y)
        {
            tracing::trace!(frame = next.frame, y = platform.y, "landed");
        }
    }

    // ── 3. Horizontal world bounds ───────────────────────────────────────────
    if next.player.x < 0.0 {
        next.player.x = 0.0;
    }
    if next.player.x + next.player.width > level.width {
        next.player.x = level.width - next.player.width;
    }

    // ── 4. Enemies: patrol, then stomp vs. damage ────────────────────────────
    let mut out_of_lives = false;
    for foe in next.enemies.iter_mut() {
        enemy::update(foe);

        if !check_collision(&next.player.rect(), &foe.rect()) {
            continue;
        }

        // No `is_defeated` guard here: landing on a flattened enemy
        // flattens it again and still scores.
        if next.player.vy > 0.0 && next.player.bottom() < foe.mid_y() {
            enemy::defeat(foe);
            physics::bounce_on_enemy(&mut next.player);
            next.score += config.stomp_points;
            sink.report(next.score, next.lives);
            tracing::debug!(frame = next.frame, x = foe.x, "enemy stomped");
        } else if !foe.is_defeated && physics::take_damage(&mut next.player) {
            next.lives = next.lives.saturating_sub(1);
            sink.report(next.score, next.lives);
            tracing::debug!(frame = next.frame, lives = next.lives, "player hit");
            if next.lives == 0 {
                out_of_lives = true;
                break;
            }
        }
    }
    if out_of_lives {
        return finish(next, GameStatus::GameOver);
    }

    // ── 5. Coins ─────────────────────────────────────────────────────────────
    let player_rect = next.player.rect();
    let (collected, remaining): (Vec<Rect>, Vec<Rect>) = std::mem::take(&mut next.coins)
        .into_iter()
        .partition(|coin| check_collision(&player_rect, coin));
    next.coins = remaining;
    for coin in &collected {
        next.score += config.coin_points;
        sink.report(next.score, next.lives);
        tracing::debug!(frame = next.frame, x = coin.x, y = coin.y, "coin collected");
    }

    // ── 6. Fell out of the world ─────────────────────────────────────────────
    if next.player.y > level.height {
        next.lives = next.lives.saturating_sub(1);
        sink.report(next.score, next.lives);
        if next.lives == 0 {
            return finish(next, GameStatus::GameOver);
        }
        respawn(&mut next.player, level.spawn);
        tracing::debug!(frame = next.frame, lives = next.lives, "player fell, respawned");
    }

    // ── 7. Goal ──────────────────────────────────────────────────────────────
    if check_collision(&next.player.rect(), &level.goal) {
        return finish(next, GameStatus::LevelComplete);
    }

    next
}

/// Put the player back at the spawn point.  Only position and vertical
/// velocity are reset; invulnerability and facing carry over.
fn respawn(player: &mut Player, (x, y): (f64, f64)) {
    player.x = x;
    player.y = y;
    player.vy = 0.0;
}

fn finish(mut state: GameState, status: GameStatus) -> GameState {
    state.status = status;
    tracing::info!(
        frame = state.frame,
        score = state.score,
        lives = state.lives,
        "game ended: {status:?}"
    );
    state
}
