//! Gravity, axis-separated collision resolution and world bounds.
//!
//! Movement is resolved one axis at a time: move horizontally and push out of
//! any block, then move vertically and push out again. Neither pass knows
//! about the other, so an actor sliding into a corner can never slip through
//! either face.

use crate::entities::{Body, Rect};
use crate::terrain::Terrain;

// ── Gravity ───────────────────────────────────────────────────────────────────

pub fn apply_gravity(body: &mut Body, gravity: i32, terminal_velocity: i32) {
    body.vy = (body.vy + gravity).min(terminal_velocity);
}

// ── Single-axis sweeps ────────────────────────────────────────────────────────

/// Move `rect` by `vx` and clamp it against every block it overlaps after
/// the move. Returns all of those blocks, including any an earlier clamp in
/// the same pass already pushed it clear of.
pub fn sweep_x(rect: &mut Rect, vx: i32, terrain: &Terrain) -> Vec<Rect> {
    rect.x += vx;
    if vx == 0 {
        return Vec::new();
    }
    let hits = terrain.overlapping(rect);
    for block in &hits {
        if vx > 0 {
            rect.set_right(block.left());
        } else {
            rect.set_left(block.right());
        }
    }
    hits
}

/// Vertical counterpart of [`sweep_x`].
pub fn sweep_y(rect: &mut Rect, vy: i32, terrain: &Terrain) -> Vec<Rect> {
    rect.y += vy;
    if vy == 0 {
        return Vec::new();
    }
    let hits = terrain.overlapping(rect);
    for block in &hits {
        if vy > 0 {
            rect.set_bottom(block.top());
        } else {
            rect.set_top(block.bottom());
        }
    }
    hits
}

// ── Full move ─────────────────────────────────────────────────────────────────

/// What a body ran into during [`move_and_collide`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collision {
    /// Hit a block on the horizontal pass. `vx` is left for the caller to
    /// zero or reverse.
    pub hit_wall: bool,
    /// Every block the body came down onto this frame, in load order.
    pub landed_on: Vec<Rect>,
}

impl Collision {
    pub fn landed(&self) -> bool {
        !self.landed_on.is_empty()
    }
}

/// Horizontal pass then vertical pass. Any vertical contact zeroes `vy`.
pub fn move_and_collide(body: &mut Body, terrain: &Terrain) -> Collision {
    let hit_wall = !sweep_x(&mut body.rect, body.vx, terrain).is_empty();

    let vy = body.vy;
    let hits = sweep_y(&mut body.rect, vy, terrain);
    if !hits.is_empty() {
        body.vy = 0;
    }

    Collision {
        hit_wall,
        landed_on: if vy > 0 { hits } else { Vec::new() },
    }
}

// ── World bounds ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Left,
    Right,
}

/// Keep `rect` inside `[0, level_width]` horizontally. Returns the edge it
/// was pushed back from, if any.
pub fn clamp_to_world(rect: &mut Rect, level_width: i32) -> Option<Boundary> {
    if rect.left() < 0 {
        rect.set_left(0);
        Some(Boundary::Left)
    } else if rect.right() > level_width {
        rect.set_right(level_width);
        Some(Boundary::Right)
    } else {
        None
    }
}

// ── Probes ────────────────────────────────────────────────────────────────────

/// True if `rect`, moved down one pixel, overlaps a block: the actor is
/// standing on (or sunk into) something solid.
pub fn probe_ground(rect: &Rect, terrain: &Terrain) -> bool {
    let probe = Rect { y: rect.y + 1, ..*rect };
    terrain.any_overlap(&probe)
}

// ── Level rules ───────────────────────────────────────────────────────────────

/// Per-level physical constants every actor is simulated under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldRules {
    /// Level width in pixels; the right-hand world boundary.
    pub width_px: i32,
    pub gravity: i32,
    pub terminal_velocity: i32,
}
