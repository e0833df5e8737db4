//! Fire-and-forget notifications for the audio side.
//!
//! The core never plays anything itself. It pushes symbolic events into an
//! [`EventQueue`] and the front-end drains them once per frame.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameEvent {
    Jump,
    Coin,
    Powerup,
    Hurt,
    /// A life was lost and the player will respawn.
    Death,
    LevelUp,
    GameOver,
    StartMusic,
    StopMusic,
}

#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    sound_on: bool,
    pending: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new(sound_on: bool) -> Self {
        Self { sound_on, pending: Vec::new() }
    }

    /// Queue `event`; dropped on the floor while sound is off.
    pub fn emit(&mut self, event: GameEvent) {
        if self.sound_on {
            self.pending.push(event);
        }
    }

    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    pub fn set_sound_on(&mut self, on: bool) {
        self.sound_on = on;
        if !on {
            self.pending.clear();
        }
    }

    pub fn pending(&self) -> &[GameEvent] {
        &self.pending
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }
}
