//! Bunny Run simulation core.
//!
//! Everything here is frame-stepped and free of I/O: level data comes in
//! already decoded, input comes in as intents, and the outside world gets a
//! drawable [`snapshot::Frame`] plus a queue of [`events::GameEvent`]s back.

pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod events;
pub mod game;
pub mod level;
pub mod physics;
pub mod pickup;
pub mod player;
pub mod session;
pub mod snapshot;
pub mod terrain;
