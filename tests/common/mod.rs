#![allow(dead_code)]

use bunny_run::config::GameConfig;
use bunny_run::entities::{Block, EnemyKind, PickupKind, Rect};
use bunny_run::level::{BlockPlacement, Cell, EnemyPlacement, LevelDescription, PickupPlacement};
use bunny_run::session::LevelSession;
use bunny_run::terrain::Terrain;

pub const CELL: i32 = 64;

/// `width` × 10 cells, solid ground along row 9, start at (1, 8), goal at
/// the far end of the ground.
pub fn flat_level(width: i32) -> LevelDescription {
    LevelDescription {
        width,
        height: 10,
        gravity: 1,
        terminal_velocity: 32,
        start: Cell::new(1, 8),
        time_limit_seconds: 100,
        blocks: (0..width).map(|x| block(x, 9)).collect(),
        enemies: Vec::new(),
        pickups: Vec::new(),
        coins: Vec::new(),
        goals: vec![Cell::new(width - 2, 8)],
    }
}

pub fn block(x: i32, y: i32) -> BlockPlacement {
    BlockPlacement {
        cell: Cell::new(x, y),
        material: "G".to_string(),
    }
}

pub fn enemy(kind: EnemyKind, x: i32, y: i32) -> EnemyPlacement {
    EnemyPlacement {
        kind,
        cell: Cell::new(x, y),
    }
}

pub fn pickup(kind: PickupKind, x: i32, y: i32) -> PickupPlacement {
    PickupPlacement {
        kind,
        cell: Cell::new(x, y),
    }
}

pub fn session(level: &LevelDescription) -> LevelSession {
    LevelSession::new(level, &GameConfig::default()).expect("test level should be valid")
}

/// Pixel rect of the cell at (`x`, `y`).
pub fn cell_rect(x: i32, y: i32) -> Rect {
    Rect::cell(x * CELL, y * CELL, CELL)
}

pub fn terrain_of(cells: &[(i32, i32)]) -> Terrain {
    let blocks = cells
        .iter()
        .map(|&(x, y)| Block {
            rect: cell_rect(x, y),
            material: "G".to_string(),
        })
        .collect();
    Terrain::new(blocks, CELL)
}
