//! Decoded level data and its validation.
//!
//! `LevelDescription` is what the simulation is built from. It can be
//! assembled in code or read from the JSON level format, whose
//! per-kind placement lists (`bears`, `monsters`, `oneups`, ...) are folded
//! into typed placements here. Presentation keys such as `background-img` or
//! `music` are accepted and ignored.

use serde::Deserialize;
use tracing::warn;

use crate::entities::{EnemyKind, PickupKind};
use crate::error::LevelError;

/// A grid cell coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockPlacement {
    pub cell: Cell,
    /// Terrain material tag (`"G"`, `"SNB"`, ...). Opaque to the simulation.
    pub material: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyPlacement {
    pub kind: EnemyKind,
    pub cell: Cell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickupPlacement {
    pub kind: PickupKind,
    pub cell: Cell,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelDescription {
    /// Width in cells.
    pub width: i32,
    /// Height in cells.
    pub height: i32,
    pub gravity: i32,
    pub terminal_velocity: i32,
    pub start: Cell,
    pub time_limit_seconds: u32,
    pub blocks: Vec<BlockPlacement>,
    pub enemies: Vec<EnemyPlacement>,
    pub pickups: Vec<PickupPlacement>,
    pub coins: Vec<Cell>,
    pub goals: Vec<Cell>,
}

impl LevelDescription {
    /// Parse and validate a level in the JSON level format.
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        let file: LevelFile = serde_json::from_str(text)?;
        let level = LevelDescription::from(file);
        level.validate()?;
        Ok(level)
    }

    /// Refuse anything a session could not be run from.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(LevelError::EmptyDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.terminal_velocity <= 0 {
            return Err(LevelError::NonPositiveTerminalVelocity(self.terminal_velocity));
        }
        if self.time_limit_seconds == 0 {
            return Err(LevelError::NoTimeLimit);
        }
        if self.goals.is_empty() {
            return Err(LevelError::MissingGoal);
        }
        if !self.contains(self.start) {
            return Err(LevelError::StartOutOfBounds {
                x: self.start.x,
                y: self.start.y,
            });
        }

        let placements = self
            .blocks
            .iter()
            .map(|b| ("block", b.cell))
            .chain(self.enemies.iter().map(|e| ("enemy", e.cell)))
            .chain(self.pickups.iter().map(|p| ("pickup", p.cell)))
            .chain(self.coins.iter().map(|&c| ("coin", c)))
            .chain(self.goals.iter().map(|&g| ("goal", g)));
        for (kind, cell) in placements {
            if !self.contains(cell) {
                return Err(LevelError::PlacementOutOfBounds {
                    kind,
                    x: cell.x,
                    y: cell.y,
                });
            }
        }

        if self.gravity <= 0 && self.enemies.iter().any(|e| e.kind.behavior().gravity) {
            warn!(gravity = self.gravity, "walking enemies will never fall in this level");
        }
        Ok(())
    }

    fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }
}

// ── JSON level format ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct LevelFile {
    width: i32,
    height: i32,
    time: u32,
    start: (i32, i32),
    gravity: i32,
    terminal_velocity: i32,
    #[serde(default)]
    blocks: Vec<(i32, i32, String)>,
    #[serde(default)]
    bears: Vec<(i32, i32)>,
    #[serde(default)]
    monsters: Vec<(i32, i32)>,
    #[serde(default)]
    flyman: Vec<(i32, i32)>,
    #[serde(default)]
    coins: Vec<(i32, i32)>,
    #[serde(default)]
    oneups: Vec<(i32, i32)>,
    #[serde(default)]
    hearts: Vec<(i32, i32)>,
    #[serde(default)]
    powerup: Vec<(i32, i32)>,
    #[serde(default)]
    bolt: Vec<(i32, i32)>,
    #[serde(default)]
    jetpack: Vec<(i32, i32)>,
    #[serde(default)]
    bubble: Vec<(i32, i32)>,
    #[serde(default)]
    flag: Vec<(i32, i32)>,
}

fn cells(list: &[(i32, i32)]) -> impl Iterator<Item = Cell> + '_ {
    list.iter().map(|&(x, y)| Cell::new(x, y))
}

impl From<LevelFile> for LevelDescription {
    fn from(file: LevelFile) -> Self {
        let enemy_lists = [
            (EnemyKind::Patrol, &file.bears),
            (EnemyKind::EdgeAwarePatrol, &file.monsters),
            (EnemyKind::Flyer, &file.flyman),
        ];
        let enemies = enemy_lists
            .iter()
            .flat_map(|&(kind, list)| cells(list).map(move |cell| EnemyPlacement { kind, cell }))
            .collect();

        let pickup_lists = [
            (PickupKind::ExtraLife, &file.oneups),
            (PickupKind::Heart, &file.hearts),
            (PickupKind::ScoreBonus, &file.powerup),
            (PickupKind::ScorePenalty, &file.bolt),
            (PickupKind::Jetpack, &file.jetpack),
            (PickupKind::Invincibility, &file.bubble),
        ];
        let pickups = pickup_lists
            .iter()
            .flat_map(|&(kind, list)| cells(list).map(move |cell| PickupPlacement { kind, cell }))
            .collect();

        LevelDescription {
            width: file.width,
            height: file.height,
            gravity: file.gravity,
            terminal_velocity: file.terminal_velocity,
            start: Cell::new(file.start.0, file.start.1),
            time_limit_seconds: file.time,
            blocks: file
                .blocks
                .iter()
                .map(|(x, y, material)| BlockPlacement {
                    cell: Cell::new(*x, *y),
                    material: material.clone(),
                })
                .collect(),
            enemies,
            pickups,
            coins: cells(&file.coins).collect(),
            goals: cells(&file.flag).collect(),
        }
    }
}
