//! Pickup effects as pure transforms over the player.
//!
//! Every function takes an immutable reference to the current `Player` and
//! returns a brand-new one, the same way the rest of the game logic treats
//! state. The jetpack additionally asks for the player to be repositioned;
//! that request is returned rather than performed.

use crate::config::GameConfig;
use crate::entities::{Body, PickupKind, Player};

/// Absolute vertical position the player must be moved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerticalOverride {
    pub y: i32,
}

/// Result of collecting a pickup.
#[derive(Clone, Debug, PartialEq)]
pub struct Applied {
    pub player: Player,
    pub reposition: Option<VerticalOverride>,
}

pub fn apply(player: &Player, kind: PickupKind, config: &GameConfig) -> Applied {
    let player = match kind {
        PickupKind::ExtraLife => Player {
            lives: player.lives + 1,
            ..player.clone()
        },
        PickupKind::Heart => Player {
            hearts: (player.hearts + 1).min(player.max_hearts),
            ..player.clone()
        },
        PickupKind::ScoreBonus => Player {
            score: player.score + config.score_bonus,
            ..player.clone()
        },
        PickupKind::ScorePenalty => Player {
            score: player.score.saturating_sub(config.score_penalty),
            ..player.clone()
        },
        PickupKind::Invincibility => Player {
            invincibility_frames: config.bonus_frames(),
            ..player.clone()
        },
        PickupKind::Jetpack => Player {
            jetpack_on: true,
            jetpack_frames: config.bonus_frames(),
            body: Body {
                vx: config.jetpack_speed,
                vy: 0,
                ..player.body
            },
            ..player.clone()
        },
    };

    let reposition = match kind {
        PickupKind::Jetpack => Some(VerticalOverride { y: config.jetpack_height }),
        _ => None,
    };

    Applied { player, reposition }
}
