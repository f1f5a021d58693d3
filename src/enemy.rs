/// Enemy patrol and defeat state machine.
///
/// `Patrolling` walks between `min_x` and `max_x`, bouncing at each bound.
/// `defeat` flattens the enemy; after a short pause it sinks out of the
/// world.  There is no way back to patrolling.
use crate::entities::{Direction, Enemy};

/// Height of a flattened enemy.
pub const DEFEATED_HEIGHT: f64 = 16.0;
/// Downward shift applied when flattened.
pub const DEFEAT_DROP: f64 = 16.0;
/// Ticks a defeated enemy rests before sinking.
pub const DEFEAT_FALL_DELAY: u32 = 30;
/// Per-tick sink speed once the delay has passed.
pub const DEFEAT_FALL_SPEED: f64 = 5.0;

pub fn update(enemy: &mut Enemy) {
    if enemy.is_defeated {
        enemy.defeat_timer += 1;
        if enemy.defeat_timer >= DEFEAT_FALL_DELAY {
            enemy.y += DEFEAT_FALL_SPEED;
        }
        return;
    }

    enemy.x += enemy.speed * enemy.direction.sign();

    // Left bound wins if both would trigger.
    if enemy.x <= enemy.min_x {
        enemy.x = enemy.min_x;
        enemy.direction = Direction::Right;
    } else if enemy.x + enemy.width >= enemy.max_x {
        enemy.x = enemy.max_x - enemy.width;
        enemy.direction = Direction::Left;
    }
}

/// Flatten the enemy in place.  Calling this on an already defeated enemy
/// restarts its timer and drops it again.
pub fn defeat(enemy: &mut Enemy) {
    enemy.is_defeated = true;
    enemy.defeat_timer = 0;
    enemy.height = DEFEATED_HEIGHT;
    enemy.y += DEFEAT_DROP;
}
