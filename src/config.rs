//! Tuning constants, grouped so a front-end can load them from JSON.

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Simulation ticks per second. All frame-denominated durations scale with it.
    pub fps: u32,
    /// Edge length of a level cell and of every entity, in pixels.
    pub grid_size: i32,
    /// Width of the visible window in pixels; enemies farther than twice this freeze.
    pub viewport_width: i32,
    pub player_speed: i32,
    pub sprint_speed: i32,
    pub jump_power: i32,
    pub start_lives: u32,
    pub max_hearts: u32,
    pub coin_value: u32,
    pub coins_per_life: u32,
    pub hurt_grace_seconds: f32,
    /// Duration of the jetpack and invincibility pickups.
    pub bonus_seconds: u32,
    pub jetpack_speed: i32,
    /// Absolute y the jetpack launches the player to.
    pub jetpack_height: i32,
    pub enemy_speed: i32,
    /// Frames between enemy animation steps.
    pub enemy_anim_period: u32,
    pub score_bonus: u32,
    pub score_penalty: u32,
    /// Score per frame left on the clock when a level is finished.
    pub time_bonus_per_frame: u32,
    pub sound_on: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            grid_size: 64,
            viewport_width: 1280,
            player_speed: 5,
            sprint_speed: 10,
            jump_power: 20,
            start_lives: 3,
            max_hearts: 3,
            coin_value: 10,
            coins_per_life: 10,
            hurt_grace_seconds: 0.75,
            bonus_seconds: 3,
            jetpack_speed: 15,
            jetpack_height: 64,
            enemy_speed: 2,
            enemy_anim_period: 20,
            score_bonus: 100,
            score_penalty: 200,
            time_bonus_per_frame: 5,
            sound_on: true,
        }
    }
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.grid_size <= 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if self.coins_per_life == 0 {
            return Err(ConfigError::ZeroCoinsPerLife);
        }
        Ok(())
    }

    /// Grace window after taking a hit (0.75 s → 45 frames at 60 fps).
    pub fn hurt_grace_frames(&self) -> u32 {
        (self.hurt_grace_seconds * self.fps as f32) as u32
    }

    pub fn bonus_frames(&self) -> u32 {
        self.bonus_seconds * self.fps
    }

    /// Horizontal distance within which enemies are simulated.
    pub fn proximity_range(&self) -> i32 {
        2 * self.viewport_width
    }
}
