//! Read-only view of a finished frame, for whoever draws it.

use crate::entities::{Block, EnemyKind, Facing, PickupKind, PlayerFrame, Rect, Stage};
use crate::game::Game;
use crate::player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerSprite {
    pub rect: Rect,
    pub frame: PlayerFrame,
    /// False on the blink-off frames of invincibility.
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySprite {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub frame: usize,
    pub facing: Facing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickupSprite {
    pub rect: Rect,
    pub kind: PickupKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub hearts: u32,
    pub max_hearts: u32,
    pub lives: u32,
    pub coins: u32,
    /// One-based, as shown to the player.
    pub level: usize,
    pub level_count: usize,
    pub remaining_time_frames: u32,
    pub remaining_seconds: u32,
    /// Jetpack frames left, only while it is on.
    pub jetpack_frames: Option<u32>,
    pub jetpack_seconds: Option<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub stage: Stage,
    /// Left edge of the visible window in level pixels.
    pub camera_x: i32,
    pub level_width: i32,
    pub level_height: i32,
    pub blocks: Vec<Block>,
    pub goals: Vec<Rect>,
    pub coins: Vec<Rect>,
    pub pickups: Vec<PickupSprite>,
    pub enemies: Vec<EnemySprite>,
    pub player: PlayerSprite,
    pub hud: Hud,
}

/// Left edge of a `viewport_width` window that keeps the player centred,
/// without showing anything past either end of the level.
pub fn camera_offset(player_center_x: i32, level_width: i32, viewport_width: i32) -> i32 {
    let max = (level_width - viewport_width).max(0);
    (player_center_x - viewport_width / 2).clamp(0, max)
}

/// Capture everything a `viewport_width`-wide window needs to draw `game`.
/// Static terrain is culled to the window; moving things are not.
pub fn capture(game: &Game, viewport_width: i32) -> Frame {
    let session = &game.session;
    let p = &game.player;
    let fps = game.config.fps.max(1);

    let camera_x = camera_offset(p.body.rect.center_x(), session.rules.width_px, viewport_width);
    let in_view = |r: &Rect| r.right() > camera_x && r.left() < camera_x + viewport_width;

    Frame {
        stage: game.stage,
        camera_x,
        level_width: session.rules.width_px,
        level_height: session.height_px,
        blocks: session
            .terrain
            .blocks()
            .iter()
            .filter(|b| in_view(&b.rect))
            .cloned()
            .collect(),
        goals: session.goals.iter().map(|g| g.rect).collect(),
        coins: session.coins.iter().map(|c| c.rect).collect(),
        pickups: session
            .pickups
            .iter()
            .map(|item| PickupSprite { rect: item.rect, kind: item.kind })
            .collect(),
        enemies: session
            .enemies
            .iter()
            .map(|e| EnemySprite {
                rect: e.body.rect,
                kind: e.kind,
                frame: e.frame,
                facing: e.facing,
            })
            .collect(),
        player: PlayerSprite {
            rect: p.body.rect,
            frame: p.frame,
            visible: player::is_visible(p),
        },
        hud: Hud {
            score: p.score,
            hearts: p.hearts,
            max_hearts: p.max_hearts,
            lives: p.lives,
            coins: p.coin_count,
            level: game.current_level + 1,
            level_count: game.level_count(),
            remaining_time_frames: session.remaining_time_frames,
            remaining_seconds: session.remaining_time_frames / fps,
            jetpack_frames: p.jetpack_on.then_some(p.jetpack_frames),
            jetpack_seconds: p.jetpack_on.then(|| p.jetpack_frames / fps),
        },
    }
}
