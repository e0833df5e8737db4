//! All game entity types: pure data, no logic.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in level pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// A `size` × `size` square, which is what every entity occupies.
    pub fn cell(x: i32, y: i32, size: i32) -> Self {
        Self::new(x, y, size, size)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.height;
    }

    /// Strict overlap: rectangles that merely share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Position plus velocity, shared by every moving entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Body {
    pub rect: Rect,
    pub vx: i32,
    pub vy: i32,
}

impl Body {
    pub fn at_rest(rect: Rect) -> Self {
        Self { rect, vx: 0, vy: 0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Facing implied by a horizontal velocity; zero keeps `self`.
    pub fn from_velocity(self, vx: i32) -> Facing {
        match vx.signum() {
            1 => Facing::Right,
            -1 => Facing::Left,
            _ => self,
        }
    }
}

// ── Terrain ───────────────────────────────────────────────────────────────────

/// A static solid cell. `material` only matters to whoever draws it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub rect: Rect,
    pub material: String,
}

/// The level exit. Touching it completes the level; it is never consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Goal {
    pub rect: Rect,
}

// ── Collectibles ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coin {
    pub rect: Rect,
    pub value: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PickupKind {
    /// +1 life.
    ExtraLife,
    /// +1 heart, capped at max hearts.
    Heart,
    /// +100 score.
    ScoreBonus,
    /// −200 score, floored at zero. The only hazard pickup.
    ScorePenalty,
    /// Scripted flight at a fixed height for a few seconds.
    Jetpack,
    /// Ignore enemy contact for a few seconds.
    Invincibility,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pickup {
    pub rect: Rect,
    pub kind: PickupKind,
}

// ── Player ────────────────────────────────────────────────────────────────────

/// Sprite selection for the player, resolved every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerFrame {
    Idle,
    /// One of the two run frames.
    Run { index: usize, facing: Facing },
    Jump(Facing),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    pub on_ground: bool,
    pub speed: i32,
    pub jump_power: i32,
    pub score: u32,
    pub lives: u32,
    pub hearts: u32,
    pub max_hearts: u32,
    /// Frames left during which enemy contact is ignored.
    pub invincibility_frames: u32,
    pub jetpack_on: bool,
    pub jetpack_frames: u32,
    /// Coins collected toward the next extra life.
    pub coin_count: u32,
    pub frame: PlayerFrame,
    /// Index of the run frame currently shown.
    pub run_index: usize,
    /// Frames since the run frame last advanced.
    pub run_steps: i32,
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    /// Walks back and forth, falls off ledges.
    Patrol,
    /// Walks back and forth, turns around at ledges.
    EdgeAwarePatrol,
    /// Flies horizontally, ignores gravity.
    Flyer,
}

/// Movement parameters that distinguish the enemy kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Behavior {
    pub gravity: bool,
    pub edge_aware: bool,
}

impl EnemyKind {
    pub fn behavior(self) -> Behavior {
        match self {
            EnemyKind::Patrol => Behavior { gravity: true, edge_aware: false },
            EnemyKind::EdgeAwarePatrol => Behavior { gravity: true, edge_aware: true },
            EnemyKind::Flyer => Behavior { gravity: false, edge_aware: false },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Body,
    /// Level-load position and velocity, restored on reset.
    pub start: Body,
    pub facing: Facing,
    /// Animation frame currently shown.
    pub frame: usize,
    /// Frame to show at the next animation step.
    pub next_frame: usize,
    pub steps: u32,
}

// ── Game flow ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Splash,
    Start,
    Playing,
    Paused,
    LevelCompleted,
    GameOver,
    Victory,
}
