/// Read-only render projections.  The simulation never consults these.
use crate::entities::{Enemy, Player};

/// Enemies below this line are no longer drawn (they still collide).
pub const ENEMY_VISIBILITY_CUTOFF: f64 = 600.0;
/// Blink period while invulnerable, in ticks.
const BLINK_PERIOD: u32 = 6;

/// The player blinks while invulnerable: hidden for the first half of each
/// blink period.
pub fn player_visible(player: &Player) -> bool {
    !(player.is_invulnerable && player.invulnerability_timer % BLINK_PERIOD < BLINK_PERIOD / 2)
}

pub fn enemy_visible(enemy: &Enemy) -> bool {
    enemy.y <= ENEMY_VISIBILITY_CUTOFF
}
