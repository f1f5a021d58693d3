use platformer::compute::*;
use platformer::config::{EnemyConfig, GameConfig};
use platformer::entities::*;
use platformer::level::{EnemySpawn, Level};
use platformer::view::enemy_visible;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 800×600 world with only a ground slab, no coins or enemies, goal far right.
fn make_level() -> Level {
    Level {
        width: 800.0,
        height: 600.0,
        spawn: (50.0, 200.0),
        platforms: vec![Rect::new(0.0, 400.0, 800.0, 80.0)],
        coins: Vec::new(),
        goal: Rect::new(750.0, 300.0, 30.0, 100.0),
        enemies: Vec::new(),
    }
}

fn make_state(level: &Level) -> GameState {
    init_state(level, &GameConfig::default())
}

fn make_enemy(x: f64, y: f64) -> Enemy {
    Enemy::new(x, y, 200.0, 400.0, &EnemyConfig::default())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> Intents {
    Intents::default()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Run one tick and return the new state plus every HUD report it produced.
fn step(state: &GameState, level: &Level, intents: Intents) -> (GameState, Vec<(u32, u32)>) {
    let mut reports: Vec<(u32, u32)> = Vec::new();
    let next = tick(state, level, &GameConfig::default(), &intents, &mut reports);
    (next, reports)
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_from_default_level() {
    let level = Level::default();
    let s = init_state(&level, &GameConfig::default());
    assert_eq!((s.player.x, s.player.y), (50.0, 200.0));
    assert_eq!(s.enemies.len(), 2);
    assert_eq!(s.enemies[0].rect(), Rect::new(300.0, 340.0, 32.0, 32.0));
    assert_eq!((s.enemies[1].min_x, s.enemies[1].max_x), (500.0, 700.0));
    assert_eq!(s.coins.len(), 12);
    assert_eq!(s.score, 0);
    assert_eq!(s.lives, 3);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.frame, 0);
}

#[test]
fn init_state_honours_starting_lives() {
    let config = GameConfig { starting_lives: 5, ..GameConfig::default() };
    let s = init_state(&make_level(), &config);
    assert_eq!(s.lives, 5);
}

// ── tick — physics & platforms ────────────────────────────────────────────────

#[test]
fn tick_applies_gravity_from_spawn() {
    let level = Level::default();
    let s = make_state(&level);
    let (s2, reports) = step(&s, &level, idle());
    assert!(approx(s2.player.vy, 0.8));
    assert!(approx(s2.player.y, 200.8));
    assert_eq!(s2.frame, 1);
    assert!(reports.is_empty());
}

#[test]
fn tick_does_not_mutate_original() {
    let level = make_level();
    let s = make_state(&level);
    let _ = step(&s, &level, Intents { move_right: true, ..idle() });
    assert_eq!(s.player.x, 50.0);
    assert_eq!(s.frame, 0);
}

#[test]
fn tick_lands_on_ground() {
    let level = make_level();
    let mut s = make_state(&level);
    s.player.y = 350.0;
    s.player.vy = 3.0;
    let (s2, _) = step(&s, &level, idle());
    assert_eq!(s2.player.y, 352.0);
    assert_eq!(s2.player.vy, 0.0);
    assert!(s2.player.can_jump);
}

#[test]
fn tick_player_comes_to_rest_and_can_jump() {
    let level = make_level();
    let mut s = make_state(&level);
    for _ in 0..120 {
        s = step(&s, &level, idle()).0;
    }
    assert_eq!(s.player.y + s.player.height, 400.0);
    assert!(s.player.can_jump);

    let (s2, _) = step(&s, &level, Intents { jump: true, ..idle() });
    assert!(s2.player.vy < 0.0);
    assert!(!s2.player.can_jump);
}

#[test]
fn tick_no_landing_while_rising_through_platform() {
    let level = make_level();
    let mut s = make_state(&level);
    s.player.y = 370.0;
    s.player.vy = -10.0;
    let (s2, _) = step(&s, &level, idle());
    assert!(s2.player.vy < 0.0);
    assert!(!s2.player.can_jump);
}

// ── tick — world bounds ───────────────────────────────────────────────────────

#[test]
fn tick_clamps_left_edge() {
    let level = make_level();
    let mut s = make_state(&level);
    s.player.x = 2.0;
    let (s2, _) = step(&s, &level, Intents { move_left: true, ..idle() });
    assert_eq!(s2.player.x, 0.0);
}

#[test]
fn tick_clamps_right_edge() {
    let level = make_level();
    let mut s = make_state(&level);
    s.player.x = 766.0;
    s.player.y = 100.0;
    let (s2, _) = step(&s, &level, Intents { move_right: true, ..idle() });
    assert_eq!(s2.player.x, 768.0);
}

// ── tick — enemies ────────────────────────────────────────────────────────────

#[test]
fn tick_stomp_defeats_enemy_and_scores() {
    let level = make_level();
    let mut s = make_state(&level);
    s.enemies.push(make_enemy(300.0, 340.0));
    s.player.x = 300.0;
    s.player.y = 290.0;
    s.player.vy = 5.0;
    let (s2, reports) = step(&s, &level, idle());
    assert!(s2.enemies[0].is_defeated);
    assert_eq!(s2.enemies[0].height, 16.0);
    assert_eq!(s2.score, 100);
    assert_eq!(s2.lives, 3);
    assert_eq!(s2.player.vy, -10.0);
    assert!(!s2.player.can_jump);
    assert_eq!(reports, vec![(100, 3)]);
}

#[test]
fn tick_side_contact_damages_player() {
    let level = make_level();
    let mut s = make_state(&level);
    s.enemies.push(make_enemy(300.0, 340.0));
    s.player.x = 300.0;
    s.player.y = 330.0;
    let (s2, reports) = step(&s, &level, idle());
    assert!(!s2.enemies[0].is_defeated);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.lives, 2);
    assert!(s2.player.is_invulnerable);
    assert_eq!(s2.player.vx, -8.0);
    assert_eq!(s2.player.vy, -7.5);
    assert_eq!(reports, vec![(0, 2)]);
}

#[test]
fn tick_no_damage_while_invulnerable() {
    let level = make_level();
    let mut s = make_state(&level);
    s.enemies.push(make_enemy(300.0, 340.0));
    s.player.x = 300.0;
    s.player.y = 330.0;
    s.player.is_invulnerable = true;
    s.player.invulnerability_timer = 10;
    let (s2, reports) = step(&s, &level, idle());
    assert_eq!(s2.lives, 3);
    assert_eq!(s2.player.invulnerability_timer, 11);
    assert!(reports.is_empty());
}

#[test]
fn tick_defeated_enemy_is_harmless() {
    let level = make_level();
    let mut s = make_state(&level);
    let mut foe = make_enemy(300.0, 340.0);
    platformer::enemy::defeat(&mut foe);
    s.enemies.push(foe);
    s.player.x = 300.0;
    s.player.y = 340.0;
    s.player.vy = -1.0;
    let (s2, reports) = step(&s, &level, idle());
    assert_eq!(s2.lives, 3);
    assert_eq!(s2.score, 0);
    assert!(reports.is_empty());
}

#[test]
fn tick_stomping_defeated_enemy_flattens_again() {
    let level = make_level();
    let mut s = make_state(&level);
    let mut foe = make_enemy(300.0, 340.0);
    platformer::enemy::defeat(&mut foe); // now (300, 356, 32, 16)
    s.enemies.push(foe);
    s.player.x = 300.0;
    s.player.y = 300.0;
    s.player.vy = 8.0;
    let (s2, _) = step(&s, &level, idle());
    assert_eq!(s2.score, 100);
    assert_eq!(s2.enemies[0].y, 372.0);
    assert_eq!(s2.enemies[0].defeat_timer, 0);
}

#[test]
fn tick_stomp_requires_feet_strictly_above_midpoint() {
    let level = make_level();
    let mut s = make_state(&level);
    s.enemies.push(make_enemy(300.0, 340.0)); // mid_y = 356
    s.player.gravity = 1.0;
    s.player.x = 300.0;
    s.player.y = 303.0;
    s.player.vy = 4.0;
    // After the step: vy = 5, bottom = 308 + 48 = 356, exactly the midpoint.
    let (s2, reports) = step(&s, &level, idle());
    assert_eq!(s2.player.bottom(), s2.enemies[0].mid_y());
    assert!(!s2.enemies[0].is_defeated);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.lives, 2);
    assert_eq!(reports, vec![(0, 2)]);
}

#[test]
fn tick_zero_vy_overlap_is_damage() {
    let level = make_level();
    let mut s = make_state(&level);
    s.enemies.push(make_enemy(300.0, 340.0));
    s.player.gravity = 0.0;
    s.player.x = 300.0;
    s.player.y = 300.0; // bottom 348, above the midpoint
    let (s2, _) = step(&s, &level, idle());
    assert_eq!(s2.player.vy, -7.5); // knockback, not a bounce
    assert!(!s2.enemies[0].is_defeated);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.lives, 2);
}

#[test]
fn tick_sunk_enemy_still_collides() {
    let mut level = make_level();
    level.height = 1_000.0;
    let mut s = make_state(&level);
    let mut foe = make_enemy(300.0, 604.0);
    platformer::enemy::defeat(&mut foe); // (300, 620, 32, 16)
    assert!(!enemy_visible(&foe));
    s.enemies.push(foe);
    s.player.x = 300.0;
    s.player.y = 570.0;
    s.player.vy = 5.0;
    let (s2, reports) = step(&s, &level, idle());
    assert_eq!(s2.score, 100);
    assert_eq!(s2.enemies[0].y, 636.0);
    assert_eq!(s2.player.vy, -10.0);
    assert_eq!(reports, vec![(100, 3)]);
}

#[test]
fn tick_two_enemies_one_life_lost() {
    let level = make_level();
    let mut s = make_state(&level);
    s.enemies.push(make_enemy(300.0, 340.0));
    s.enemies.push(make_enemy(300.0, 340.0));
    s.player.x = 300.0;
    s.player.y = 330.0;
    let (s2, reports) = step(&s, &level, idle());
    assert_eq!(s2.lives, 2);
    assert!(s2.player.is_invulnerable);
    assert_eq!(reports, vec![(0, 2)]);
}

#[test]
fn tick_game_over_when_last_life_lost_to_enemy() {
    let mut level = make_level();
    level.coins.push(Rect::new(300.0, 340.0, 20.0, 20.0));
    let mut s = make_state(&level);
    s.lives = 1;
    s.enemies.push(make_enemy(300.0, 340.0));
    s.player.x = 300.0;
    s.player.y = 330.0;
    let (s2, reports) = step(&s, &level, idle());
    assert_eq!(s2.lives, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
    // The rest of the tick is skipped: the overlapping coin stays.
    assert_eq!(s2.coins.len(), 1);
    assert_eq!(s2.score, 0);
    assert_eq!(reports, vec![(0, 0)]);
}

#[test]
fn tick_enemies_patrol_every_tick() {
    let level = make_level();
    let mut s = make_state(&level);
    s.enemies.push(make_enemy(390.0, 340.0));
    let (s2, _) = step(&s, &level, idle());
    assert_eq!(s2.enemies[0].x, 368.0);
    assert_eq!(s2.enemies[0].direction, Direction::Left);
}

// ── tick — coins ──────────────────────────────────────────────────────────────

#[test]
fn tick_collects_overlapping_coin() {
    let mut level = make_level();
    level.coins = vec![
        Rect::new(100.0, 360.0, 20.0, 20.0),
        Rect::new(500.0, 360.0, 20.0, 20.0),
    ];
    let mut s = make_state(&level);
    s.player.x = 95.0;
    s.player.y = 355.0;
    let (s2, reports) = step(&s, &level, idle());
    assert_eq!(s2.coins, vec![Rect::new(500.0, 360.0, 20.0, 20.0)]);
    assert_eq!(s2.score, 10);
    assert_eq!(reports, vec![(10, 3)]);
}

#[test]
fn tick_reports_each_coin_separately() {
    let mut level = make_level();
    level.coins = vec![
        Rect::new(100.0, 360.0, 20.0, 20.0),
        Rect::new(110.0, 370.0, 20.0, 20.0),
    ];
    let mut s = make_state(&level);
    s.player.x = 95.0;
    s.player.y = 355.0;
    let (s2, reports) = step(&s, &level, idle());
    assert!(s2.coins.is_empty());
    assert_eq!(s2.score, 20);
    assert_eq!(reports, vec![(10, 3), (20, 3)]);
}

#[test]
fn tick_coin_collected_only_once() {
    let mut level = make_level();
    level.coins = vec![Rect::new(100.0, 360.0, 20.0, 20.0)];
    let mut s = make_state(&level);
    s.player.x = 95.0;
    s.player.y = 355.0;
    let (s2, _) = step(&s, &level, idle());
    let (s3, reports) = step(&s2, &level, idle());
    assert_eq!(s3.score, 10);
    assert!(reports.is_empty());
}

// ── tick — falling out of the world ───────────────────────────────────────────

#[test]
fn tick_fall_costs_a_life_and_respawns() {
    let level = make_level();
    let mut s = make_state(&level);
    s.player.y = 601.0;
    s.player.vx = 3.0;
    s.player.is_invulnerable = true;
    s.player.invulnerability_timer = 5;
    let (s2, reports) = step(&s, &level, idle());
    assert_eq!(s2.lives, 2);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!((s2.player.x, s2.player.y), (50.0, 200.0));
    assert_eq!(s2.player.vy, 0.0);
    // Only position and vertical speed are reset.
    assert!(approx(s2.player.vx, 2.7));
    assert!(s2.player.is_invulnerable);
    assert_eq!(s2.player.invulnerability_timer, 6);
    assert_eq!(reports, vec![(0, 2)]);
}

#[test]
fn tick_fall_on_last_life_is_game_over() {
    let level = make_level();
    let mut s = make_state(&level);
    s.lives = 1;
    s.player.y = 601.0;
    let (s2, _) = step(&s, &level, idle());
    assert_eq!(s2.lives, 0);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert!(s2.player.y > 600.0); // no respawn
}

// ── tick — goal & terminal states ─────────────────────────────────────────────

#[test]
fn tick_reaching_goal_completes_level() {
    let level = make_level();
    let mut s = make_state(&level);
    s.player.x = 740.0;
    s.player.y = 352.0;
    let (s2, _) = step(&s, &level, idle());
    assert_eq!(s2.status, GameStatus::LevelComplete);
}

#[test]
fn tick_terminal_state_is_frozen() {
    let mut level = make_level();
    level.coins.push(Rect::new(50.0, 200.0, 20.0, 20.0));
    for status in [GameStatus::GameOver, GameStatus::LevelComplete] {
        let mut s = make_state(&level);
        s.status = status;
        let intents = Intents { move_left: true, move_right: false, jump: true };
        let (s2, reports) = step(&s, &level, intents);
        assert_eq!(s2, s);
        assert!(reports.is_empty());
    }
}

#[test]
fn tick_null_sink_accepted() {
    let level = Level::default();
    let s = make_state(&level);
    let s2 = tick(&s, &level, &GameConfig::default(), &idle(), &mut NullSink);
    assert_eq!(s2.frame, 1);
}

// ── tick — randomized invariants ──────────────────────────────────────────────

#[test]
fn random_play_keeps_invariants() {
    let level = Level {
        enemies: vec![
            EnemySpawn { x: 300.0, y: 368.0, min_x: 200.0, max_x: 400.0 },
            EnemySpawn { x: 600.0, y: 368.0, min_x: 500.0, max_x: 700.0 },
        ],
        ..Level::default()
    };
    let config = GameConfig::default();
    let mut rng = seeded_rng();

    for _ in 0..20 {
        let mut s = init_state(&level, &config);
        let mut coins_taken = 0u32;
        for _ in 0..2_000 {
            let intents = Intents {
                move_left: rng.gen_bool(0.3),
                move_right: rng.gen_bool(0.5),
                jump: rng.gen_bool(0.1),
            };
            let before = s.clone();
            let mut reports: Vec<(u32, u32)> = Vec::new();
            s = tick(&s, &level, &config, &intents, &mut reports);

            if before.status.is_terminal() {
                assert_eq!(s, before);
                continue;
            }

            // Invulnerability timer stays inside the window.
            if s.player.is_invulnerable {
                assert!(s.player.invulnerability_timer < 60);
            } else {
                assert_eq!(s.player.invulnerability_timer, 0);
            }
            // Patrolling enemies stay inside their bounds.
            for e in s.enemies.iter().filter(|e| !e.is_defeated) {
                assert!(e.x >= e.min_x && e.x + e.width <= e.max_x);
            }
            // Coins only disappear, ten points each.
            assert!(s.coins.len() <= before.coins.len());
            coins_taken += (before.coins.len() - s.coins.len()) as u32;
            assert!(s.lives <= before.lives);
            assert!(s.score >= before.score);
            assert_eq!((s.score - before.score) % 10, 0);
            assert!(s.player.x >= 0.0 && s.player.x + s.player.width <= level.width);
            // Every change is reported, and the last report matches the state.
            if let Some(&last) = reports.last() {
                assert_eq!(last, (s.score, s.lives));
            } else {
                assert_eq!((s.score, s.lives), (before.score, before.lives));
            }
        }
        let stomps = s.enemies.iter().filter(|e| e.is_defeated).count() as u32;
        assert!(s.score >= coins_taken * 10);
        assert!(stomps == 0 || s.score >= 100);
    }
}
