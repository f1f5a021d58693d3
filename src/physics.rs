/// Player kinematics: intent application, integration, landing, damage.
///
/// All functions mutate a `Player` in place; `compute::tick` works on its own
/// cloned copy so callers still see a pure state transition.
use crate::entities::{Intents, Player};

/// Horizontal damping applied after each displacement.
pub const FRICTION: f64 = 0.9;
/// Length of the post-damage invulnerability window, in ticks.
pub const INVULNERABILITY_FRAMES: u32 = 60;
/// Horizontal knockback speed when taking damage.
pub const KNOCKBACK_SPEED: f64 = 8.0;

pub fn move_left(player: &mut Player) {
    player.vx = -player.speed;
    player.facing_right = false;
}

pub fn move_right(player: &mut Player) {
    player.vx = player.speed;
    player.facing_right = true;
}

/// Start a jump if grounded.  Returns whether the jump happened.
pub fn jump(player: &mut Player) -> bool {
    if !player.can_jump {
        return false;
    }
    player.vy = player.jump_power;
    player.can_jump = false;
    true
}

/// Left is handled first, so holding both directions ends up moving right.
pub fn apply_intents(player: &mut Player, intents: &Intents) {
    if intents.move_left {
        move_left(player);
    }
    if intents.move_right {
        move_right(player);
    }
    if intents.jump && jump(player) {
        tracing::trace!(vy = player.vy, "jump");
    }
}

/// One integration step followed by the invulnerability countdown.
///
/// Displacement uses the velocity from before friction, so friction only
/// shows up on the next tick.
pub fn step(player: &mut Player) {
    player.vy += player.gravity;
    player.x += player.vx;
    player.y += player.vy;
    player.vx *= FRICTION;

    if player.is_invulnerable {
        player.invulnerability_timer += 1;
        if player.invulnerability_timer >= INVULNERABILITY_FRAMES {
            player.is_invulnerable = false;
            player.invulnerability_timer = 0;
        }
    }
}

/// Snap onto a platform top.  Ignored while still moving upward.
pub fn land(player: &mut Player, platform_y: f64) -> bool {
    if player.vy < 0.0 {
        return false;
    }
    player.y = platform_y - player.height;
    player.vy = 0.0;
    player.can_jump = true;
    true
}

/// Start the invulnerability window and knock the player back, away from
/// the direction it faces.  Returns `false` (and changes nothing) while
/// already invulnerable.
pub fn take_damage(player: &mut Player) -> bool {
    if player.is_invulnerable {
        return false;
    }
    player.is_invulnerable = true;
    player.invulnerability_timer = 0;
    player.vy = player.jump_power / 2.0;
    player.vx = if player.facing_right {
        -KNOCKBACK_SPEED
    } else {
        KNOCKBACK_SPEED
    };
    true
}

pub fn bounce_on_enemy(player: &mut Player) {
    player.vy = player.jump_power / 1.5;
    player.can_jump = false;
}
