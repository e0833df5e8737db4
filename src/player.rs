//! Player behaviour: input intents, the per-frame update, death and respawn.

use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Body, Coin, Enemy, Facing, Pickup, Player, PlayerFrame, Rect};
use crate::events::{EventQueue, GameEvent};
use crate::physics::{apply_gravity, clamp_to_world, move_and_collide, probe_ground};
use crate::pickup;
use crate::session::LevelSession;
use crate::terrain::Terrain;

const RUN_FRAMES: usize = 2;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh player with full lives and hearts, parked at the origin until the
/// first level respawns it.
pub fn new_player(config: &GameConfig) -> Player {
    Player {
        body: Body::at_rest(Rect::cell(0, 0, config.grid_size)),
        facing: Facing::Right,
        on_ground: true,
        speed: config.player_speed,
        jump_power: config.jump_power,
        score: 0,
        lives: config.start_lives,
        hearts: config.max_hearts,
        max_hearts: config.max_hearts,
        invincibility_frames: 0,
        jetpack_on: false,
        jetpack_frames: 0,
        coin_count: 0,
        frame: PlayerFrame::Idle,
        run_index: 0,
        run_steps: 0,
    }
}

// ── Input intents ────────────────────────────────────────────────────────────

pub fn move_left(player: &mut Player) {
    player.body.vx = -player.speed;
    player.facing = Facing::Left;
}

pub fn move_right(player: &mut Player) {
    player.body.vx = player.speed;
    player.facing = Facing::Right;
}

pub fn stop(player: &mut Player) {
    player.body.vx = 0;
}

pub fn set_sprint(player: &mut Player, sprinting: bool, config: &GameConfig) {
    player.speed = if sprinting {
        config.sprint_speed
    } else {
        config.player_speed
    };
}

/// Jump if there is ground within one pixel below. Returns whether it jumped.
pub fn jump(player: &mut Player, terrain: &Terrain, events: &mut EventQueue) -> bool {
    if !probe_ground(&player.body.rect, terrain) {
        return false;
    }
    player.body.vy = -player.jump_power;
    events.emit(GameEvent::Jump);
    true
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Advance the player one frame against the current level attempt.
///
/// Order matters: enemy contact is judged on last frame's position, pickups
/// and the goal on this frame's. When the player is out of hearts nothing is
/// collected; the death transition runs instead.
pub fn update(
    player: &mut Player,
    session: &mut LevelSession,
    config: &GameConfig,
    events: &mut EventQueue,
) {
    process_enemies(player, &session.enemies, config, events);

    if player.jetpack_on {
        player.body.vx = config.jetpack_speed;
    } else {
        apply_gravity(
            &mut player.body,
            session.rules.gravity,
            session.rules.terminal_velocity,
        );
    }

    let collision = move_and_collide(&mut player.body, &session.terrain);
    if collision.hit_wall {
        player.body.vx = 0;
    }
    player.on_ground = collision.landed();
    clamp_to_world(&mut player.body.rect, session.rules.width_px);
    select_frame(player);

    if player.hearts > 0 {
        collect_coins(player, &mut session.coins, config, events);
        collect_pickups(player, &mut session.pickups, config, events);
        check_goal(player, session, events);
        player.invincibility_frames = player.invincibility_frames.saturating_sub(1);
    } else {
        die(player, events);
    }
}

fn process_enemies(
    player: &mut Player,
    enemies: &[Enemy],
    config: &GameConfig,
    events: &mut EventQueue,
) {
    if player.invincibility_frames > 0 {
        return;
    }
    let rect = player.body.rect;
    if enemies.iter().any(|e| e.body.rect.overlaps(&rect)) {
        debug_assert!(player.hearts > 0, "player hit with no hearts left");
        player.hearts = player.hearts.saturating_sub(1);
        player.invincibility_frames = config.hurt_grace_frames();
        events.emit(GameEvent::Hurt);
        debug!(hearts = player.hearts, "player hurt");
    }
}

fn collect_coins(
    player: &mut Player,
    coins: &mut Vec<Coin>,
    config: &GameConfig,
    events: &mut EventQueue,
) {
    let rect = player.body.rect;
    let (hit, kept): (Vec<Coin>, Vec<Coin>) =
        coins.drain(..).partition(|c| c.rect.overlaps(&rect));
    *coins = kept;

    for coin in hit {
        events.emit(GameEvent::Coin);
        player.score += coin.value;
        player.coin_count += 1;
        if player.coin_count == config.coins_per_life {
            player.lives += 1;
            player.coin_count = 0;
            debug!(lives = player.lives, "coin bonus life");
        }
    }
}

fn collect_pickups(
    player: &mut Player,
    pickups: &mut Vec<Pickup>,
    config: &GameConfig,
    events: &mut EventQueue,
) {
    let rect = player.body.rect;
    let (hit, kept): (Vec<Pickup>, Vec<Pickup>) =
        pickups.drain(..).partition(|p| p.rect.overlaps(&rect));
    *pickups = kept;

    for item in hit {
        events.emit(GameEvent::Powerup);
        let applied = pickup::apply(player, item.kind, config);
        *player = applied.player;
        if let Some(over) = applied.reposition {
            player.body.rect.y = over.y;
        }
        debug!(kind = ?item.kind, "pickup collected");
    }
}

fn check_goal(player: &Player, session: &mut LevelSession, events: &mut EventQueue) {
    let rect = player.body.rect;
    if session.goals.iter().any(|g| g.rect.overlaps(&rect)) {
        if !session.completed {
            events.emit(GameEvent::LevelUp);
        }
        session.completed = true;
    }
}

fn select_frame(player: &mut Player) {
    player.frame = if !player.on_ground {
        PlayerFrame::Jump(player.facing)
    } else if player.body.vx != 0 {
        // Run cadence follows speed: sprinting advances the frames sooner.
        player.run_steps = (player.run_steps + 1) % player.speed.max(1);
        if player.run_steps == 0 {
            player.run_index = (player.run_index + 1) % RUN_FRAMES;
        }
        PlayerFrame::Run {
            index: player.run_index,
            facing: player.facing,
        }
    } else {
        PlayerFrame::Idle
    };
}

// ── Death, respawn, timers ───────────────────────────────────────────────────

/// Spend a life. The caller respawns the player if any are left.
pub fn die(player: &mut Player, events: &mut EventQueue) {
    player.lives = player.lives.saturating_sub(1);
    if player.lives > 0 {
        events.emit(GameEvent::Death);
    } else {
        events.emit(GameEvent::GameOver);
    }
    debug!(lives = player.lives, "player died");
}

/// Put the player back at `start` with full hearts and no active bonuses.
pub fn respawn(player: &mut Player, start: Rect) {
    player.body.rect.x = start.x;
    player.body.rect.y = start.y;
    player.body.vx = 0;
    player.body.vy = 0;
    player.hearts = player.max_hearts;
    player.invincibility_frames = 0;
    player.jetpack_on = false;
    player.jetpack_frames = 0;
    debug!(x = start.x, y = start.y, "player respawned");
}

/// Count the jetpack down one frame; it switches off when it hits zero.
pub fn tick_jetpack(player: &mut Player) {
    if !player.jetpack_on {
        return;
    }
    player.jetpack_frames = player.jetpack_frames.saturating_sub(1);
    if player.jetpack_frames == 0 {
        player.jetpack_on = false;
    }
}

/// The sprite blinks while invincible: hidden one frame in three.
pub fn is_visible(player: &Player) -> bool {
    player.invincibility_frames % 3 < 2
}
