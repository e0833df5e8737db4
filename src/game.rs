//! Top-level game flow: stages, level progression, death and restart.
//!
//! A front-end drives this once per frame with [`Game::step`]: input is
//! applied first, then the simulation advances, then at most one stage
//! transition is taken based on what the update left behind.

use tracing::info;

use crate::config::GameConfig;
use crate::entities::{Player, Stage};
use crate::error::LevelError;
use crate::events::{EventQueue, GameEvent};
use crate::level::LevelDescription;
use crate::player;
use crate::session::LevelSession;

/// What the player asked for this frame, already translated from keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    /// Held.
    pub move_left: bool,
    /// Held.
    pub move_right: bool,
    /// Held.
    pub sprint: bool,
    /// Pressed this frame.
    pub jump_pressed: bool,
    pub pause_toggle: bool,
    pub restart_pressed: bool,
    /// Any key went down this frame (including the ones above).
    pub any_key_pressed: bool,
}

#[derive(Clone, Debug)]
pub struct Game {
    pub config: GameConfig,
    pub player: Player,
    pub stage: Stage,
    /// Zero-based index into the level list.
    pub current_level: usize,
    pub session: LevelSession,
    pub events: EventQueue,
    /// Freshly loaded session per level; copied on every (re)start.
    levels: Vec<LevelSession>,
}

impl Game {
    /// Validate every level up front and park on the splash screen.
    pub fn new(levels: &[LevelDescription], config: GameConfig) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        let levels = levels
            .iter()
            .enumerate()
            .map(|(index, level)| {
                LevelSession::new(level, &config).map_err(|e| LevelError::Level {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut game = Game {
            player: player::new_player(&config),
            stage: Stage::Splash,
            current_level: 0,
            session: levels[0].clone(),
            events: EventQueue::new(config.sound_on),
            levels,
            config,
        };
        game.start_level();
        info!(levels = game.levels.len(), "game created");
        Ok(game)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    fn is_last_level(&self) -> bool {
        self.current_level + 1 >= self.levels.len()
    }

    fn set_stage(&mut self, stage: Stage) {
        if self.stage != stage {
            info!(from = ?self.stage, to = ?stage, level = self.current_level, "stage change");
            self.stage = stage;
        }
    }

    fn start_level(&mut self) {
        self.session = self.levels[self.current_level].clone();
        self.session.reset();
        player::respawn(&mut self.player, self.session.start);
    }

    // ── Frame driver ─────────────────────────────────────────────────────────

    pub fn step(&mut self, input: &Input) {
        self.handle_input(input);
        self.update();
    }

    /// Apply one frame of input: one-shot stage keys first, then held movement.
    pub fn handle_input(&mut self, input: &Input) {
        match self.stage {
            Stage::Splash | Stage::Start => {
                if input.any_key_pressed {
                    self.set_stage(Stage::Playing);
                    self.events.emit(GameEvent::StartMusic);
                }
            }
            Stage::Playing => {
                if input.pause_toggle {
                    self.set_stage(Stage::Paused);
                    return;
                }
                if input.jump_pressed {
                    player::jump(&mut self.player, &self.session.terrain, &mut self.events);
                }
            }
            Stage::Paused => {
                if input.pause_toggle {
                    self.set_stage(Stage::Playing);
                }
            }
            Stage::LevelCompleted => {
                if input.any_key_pressed {
                    self.advance();
                }
            }
            Stage::Victory | Stage::GameOver => {
                if input.restart_pressed {
                    self.reset();
                }
            }
        }

        if self.stage == Stage::Playing {
            player::set_sprint(&mut self.player, input.sprint, &self.config);
            if !self.player.jetpack_on {
                if input.move_left {
                    player::move_left(&mut self.player);
                } else if input.move_right {
                    player::move_right(&mut self.player);
                } else {
                    player::stop(&mut self.player);
                }
            }
        }
    }

    /// Advance the simulation a frame and take at most one stage transition.
    pub fn update(&mut self) {
        if self.stage != Stage::Playing {
            return;
        }

        player::update(&mut self.player, &mut self.session, &self.config, &mut self.events);
        let player_rect = self.player.body.rect;
        self.session.update_enemies(&player_rect, &self.config);
        self.session.tick_timer();
        player::tick_jetpack(&mut self.player);

        // Completion wins over running out of time on the same frame.
        if self.session.completed {
            if self.is_last_level() {
                self.set_stage(Stage::Victory);
            } else {
                self.set_stage(Stage::LevelCompleted);
            }
            self.events.emit(GameEvent::StopMusic);
        } else if self.player.lives == 0 || self.session.timed_out() {
            if self.player.lives > 0 {
                // Out of time; dying already announced game over otherwise.
                self.events.emit(GameEvent::GameOver);
            }
            self.set_stage(Stage::GameOver);
            self.events.emit(GameEvent::StopMusic);
        } else if self.player.hearts == 0 {
            self.session.reset();
            player::respawn(&mut self.player, self.session.start);
        }
    }

    // ── Level progression ────────────────────────────────────────────────────

    /// Move on to the next level, paying out the time left on the one just
    /// finished.
    pub fn advance(&mut self) {
        if self.is_last_level() {
            return;
        }
        let bonus = self
            .session
            .remaining_time_frames
            .saturating_mul(self.config.time_bonus_per_frame);
        self.current_level += 1;
        self.start_level();
        self.player.score = self.player.score.saturating_add(bonus);
        info!(level = self.current_level, bonus, score = self.player.score, "level advanced");
        self.set_stage(Stage::Start);
    }

    /// Throw the whole run away: new player, first level, splash screen.
    pub fn reset(&mut self) {
        self.player = player::new_player(&self.config);
        self.current_level = 0;
        self.start_level();
        self.set_stage(Stage::Splash);
        info!("game reset");
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
