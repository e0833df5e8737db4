//! One attempt at one level.
//!
//! Terrain and goals never change once loaded. Enemies, coins and pickups are
//! the active set: the player consumes coins and pickups, enemies move, and
//! [`LevelSession::reset`] puts all of it back the way it was at load time.

use tracing::info;

use crate::config::GameConfig;
use crate::enemy::{new_enemy, reset_enemy, update_enemy};
use crate::entities::{Block, Coin, Enemy, Goal, Pickup, Rect};
use crate::error::LevelError;
use crate::level::{Cell, LevelDescription};
use crate::physics::WorldRules;
use crate::terrain::Terrain;

#[derive(Clone, Debug)]
pub struct LevelSession {
    pub rules: WorldRules,
    pub terrain: Terrain,
    pub goals: Vec<Goal>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub pickups: Vec<Pickup>,
    /// Where the player (re)spawns.
    pub start: Rect,
    pub height_px: i32,
    pub remaining_time_frames: u32,
    pub completed: bool,
    starting_coins: Vec<Coin>,
    starting_pickups: Vec<Pickup>,
}

impl LevelSession {
    pub fn new(level: &LevelDescription, config: &GameConfig) -> Result<Self, LevelError> {
        level.validate()?;
        let remaining_time_frames = level
            .time_limit_seconds
            .checked_mul(config.fps)
            .ok_or(LevelError::TimeLimitTooLarge(level.time_limit_seconds))?;

        let size = config.grid_size;
        let at = |cell: Cell| Rect::cell(cell.x * size, cell.y * size, size);

        let blocks = level
            .blocks
            .iter()
            .map(|b| Block {
                rect: at(b.cell),
                material: b.material.clone(),
            })
            .collect();
        let enemies = level
            .enemies
            .iter()
            .map(|e| new_enemy(e.kind, e.cell.x * size, e.cell.y * size, config))
            .collect();
        let coins: Vec<Coin> = level
            .coins
            .iter()
            .map(|&c| Coin {
                rect: at(c),
                value: config.coin_value,
            })
            .collect();
        let pickups: Vec<Pickup> = level
            .pickups
            .iter()
            .map(|p| Pickup {
                rect: at(p.cell),
                kind: p.kind,
            })
            .collect();

        info!(
            width = level.width,
            height = level.height,
            enemies = level.enemies.len(),
            coins = coins.len(),
            pickups = pickups.len(),
            "level loaded"
        );

        Ok(Self {
            rules: WorldRules {
                width_px: level.width * size,
                gravity: level.gravity,
                terminal_velocity: level.terminal_velocity,
            },
            terrain: Terrain::new(blocks, size),
            goals: level.goals.iter().map(|&g| Goal { rect: at(g) }).collect(),
            enemies,
            coins: coins.clone(),
            pickups: pickups.clone(),
            start: at(level.start),
            height_px: level.height * size,
            remaining_time_frames,
            completed: false,
            starting_coins: coins,
            starting_pickups: pickups,
        })
    }

    /// Restore every coin and pickup and put each enemy back at its start.
    /// The clock keeps running and terrain is left alone.
    pub fn reset(&mut self) {
        self.coins.clone_from(&self.starting_coins);
        self.pickups.clone_from(&self.starting_pickups);
        for enemy in &mut self.enemies {
            reset_enemy(enemy);
        }
        info!(remaining_frames = self.remaining_time_frames, "level reset");
    }

    pub fn update_enemies(&mut self, player: &Rect, config: &GameConfig) {
        for enemy in &mut self.enemies {
            update_enemy(enemy, &self.terrain, &self.rules, player, config);
        }
    }

    /// Count the level clock down one frame, stopping at zero.
    pub fn tick_timer(&mut self) {
        self.remaining_time_frames = self.remaining_time_frames.saturating_sub(1);
    }

    pub fn timed_out(&self) -> bool {
        self.remaining_time_frames == 0
    }
}
