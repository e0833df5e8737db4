//! Enemy behaviour.
//!
//! The three kinds share one update routine; what differs between them is
//! carried by [`Behavior`](crate::entities::Behavior) (gravity on/off, ledge
//! awareness on/off).

use crate::config::GameConfig;
use crate::entities::{Body, Enemy, EnemyKind, Facing, Rect};
use crate::physics::{apply_gravity, clamp_to_world, move_and_collide, WorldRules};
use crate::terrain::Terrain;

const ENEMY_FRAMES: usize = 2;

/// An enemy placed at pixel position (`x`, `y`), walking left.
pub fn new_enemy(kind: EnemyKind, x: i32, y: i32, config: &GameConfig) -> Enemy {
    let start = Body {
        rect: Rect::cell(x, y, config.grid_size),
        vx: -config.enemy_speed,
        vy: 0,
    };
    Enemy {
        kind,
        body: start,
        start,
        facing: Facing::Left,
        frame: 0,
        next_frame: 0,
        steps: 0,
    }
}

/// Advance one enemy by a frame. Enemies farther than the proximity range
/// from the player do not move or animate at all.
pub fn update_enemy(
    enemy: &mut Enemy,
    terrain: &Terrain,
    rules: &WorldRules,
    player: &Rect,
    config: &GameConfig,
) {
    if (enemy.body.rect.x - player.x).abs() >= config.proximity_range() {
        return;
    }

    let behavior = enemy.kind.behavior();
    if behavior.gravity {
        apply_gravity(&mut enemy.body, rules.gravity, rules.terminal_velocity);
    }

    let collision = move_and_collide(&mut enemy.body, terrain);
    if collision.hit_wall {
        reverse(enemy);
    }
    if behavior.edge_aware && !ground_ahead(&enemy.body, &collision.landed_on) {
        reverse(enemy);
    }

    if clamp_to_world(&mut enemy.body.rect, rules.width_px).is_some() {
        reverse(enemy);
    }

    animate(enemy, config);
}

/// Whether one of the blocks just landed on still extends past the enemy in
/// its direction of travel. An airborne enemy has no ground ahead.
fn ground_ahead(body: &Body, landed_on: &[Rect]) -> bool {
    let rect = body.rect;
    landed_on.iter().any(|block| {
        (body.vx > 0 && rect.right() <= block.right())
            || (body.vx < 0 && rect.left() >= block.left())
    })
}

pub fn reverse(enemy: &mut Enemy) {
    enemy.body.vx = -enemy.body.vx;
    enemy.facing = if enemy.body.vx < 0 {
        Facing::Left
    } else {
        Facing::Right
    };
}

fn animate(enemy: &mut Enemy, config: &GameConfig) {
    if enemy.steps == 0 {
        enemy.frame = enemy.next_frame;
        enemy.next_frame = (enemy.next_frame + 1) % ENEMY_FRAMES;
    }
    enemy.steps = (enemy.steps + 1) % config.enemy_anim_period.max(1);
}

/// Put an enemy back exactly as it was when the level was loaded.
pub fn reset_enemy(enemy: &mut Enemy) {
    enemy.body = enemy.start;
    enemy.facing = Facing::Left.from_velocity(enemy.start.vx);
    enemy.frame = 0;
    enemy.next_frame = 0;
    enemy.steps = 0;
}
