mod common;

use bunny_run::config::GameConfig;
use bunny_run::entities::{EnemyKind, PickupKind};
use bunny_run::error::LevelError;
use bunny_run::events::EventQueue;
use bunny_run::level::Cell;
use bunny_run::player;
use bunny_run::session::LevelSession;

use common::{cell_rect, enemy, flat_level, pickup, session, CELL};

fn busy_level() -> bunny_run::level::LevelDescription {
    let mut level = flat_level(20);
    level.coins = vec![Cell::new(1, 8), Cell::new(4, 8), Cell::new(9, 5)];
    level.pickups = vec![
        pickup(PickupKind::Heart, 1, 8),
        pickup(PickupKind::ScoreBonus, 12, 4),
    ];
    level.enemies = vec![
        enemy(EnemyKind::Patrol, 8, 8),
        enemy(EnemyKind::Flyer, 14, 3),
    ];
    level
}

#[test]
fn session_is_built_in_pixels() {
    let s = session(&busy_level());
    assert_eq!(s.rules.width_px, 20 * CELL);
    assert_eq!(s.rules.gravity, 1);
    assert_eq!(s.rules.terminal_velocity, 32);
    assert_eq!(s.height_px, 10 * CELL);
    assert_eq!(s.start, cell_rect(1, 8));
    assert_eq!(s.remaining_time_frames, 100 * 60);
    assert_eq!(s.terrain.blocks().len(), 20);
    assert_eq!(s.coins.len(), 3);
    assert!(s.coins.iter().all(|c| c.value == 10));
    assert_eq!(s.goals[0].rect, cell_rect(18, 8));
    assert!(!s.completed);
}

#[test]
fn session_refuses_level_without_goal() {
    let mut level = flat_level(20);
    level.goals.clear();
    let err = LevelSession::new(&level, &GameConfig::default()).unwrap_err();
    assert!(matches!(err, LevelError::MissingGoal));
}

#[test]
fn session_refuses_zero_terminal_velocity() {
    let mut level = flat_level(20);
    level.terminal_velocity = 0;
    let err = LevelSession::new(&level, &GameConfig::default()).unwrap_err();
    assert!(matches!(err, LevelError::NonPositiveTerminalVelocity(0)));
}

#[test]
fn reset_restores_active_entities() {
    let config = GameConfig::default();
    let mut s = session(&busy_level());
    let fresh = s.clone();

    let mut p = player::new_player(&config);
    player::respawn(&mut p, s.start);
    let mut events = EventQueue::new(false);
    for _ in 0..60 {
        player::move_right(&mut p);
        player::update(&mut p, &mut s, &config, &mut events);
        s.update_enemies(&p.body.rect, &config);
        s.tick_timer();
    }
    assert!(s.coins.len() < fresh.coins.len());
    assert!(s.pickups.len() < fresh.pickups.len());
    assert_ne!(s.enemies, fresh.enemies);

    s.reset();
    assert_eq!(s.coins, fresh.coins);
    assert_eq!(s.pickups, fresh.pickups);
    assert_eq!(s.enemies, fresh.enemies);
    assert_eq!(s.terrain.blocks(), fresh.terrain.blocks());
    assert_eq!(s.goals, fresh.goals);
}

#[test]
fn reset_keeps_the_clock_running() {
    let mut s = session(&busy_level());
    for _ in 0..90 {
        s.tick_timer();
    }
    s.reset();
    assert_eq!(s.remaining_time_frames, 100 * 60 - 90);
}

#[test]
fn timer_stops_at_zero() {
    let mut s = session(&busy_level());
    s.remaining_time_frames = 2;
    assert!(!s.timed_out());
    for _ in 0..5 {
        s.tick_timer();
    }
    assert_eq!(s.remaining_time_frames, 0);
    assert!(s.timed_out());
}

#[test]
fn session_refuses_time_limit_that_overflows() {
    let mut level = flat_level(20);
    level.time_limit_seconds = 100_000_000;
    assert!(level.validate().is_ok());
    let err = LevelSession::new(&level, &GameConfig::default()).unwrap_err();
    assert!(matches!(err, LevelError::TimeLimitTooLarge(100_000_000)));
}
