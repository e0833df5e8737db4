//! Configuration errors. Everything here is raised before a level starts;
//! the per-frame simulation has no failure path.

/// A level description that cannot be turned into a playable session.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("level data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level has zero width or height ({width}x{height} cells)")]
    EmptyDimensions { width: i32, height: i32 },

    #[error("terminal velocity must be positive, got {0}")]
    NonPositiveTerminalVelocity(i32),

    #[error("level has no time limit")]
    NoTimeLimit,

    #[error("time limit of {0} s does not fit in a frame counter")]
    TimeLimitTooLarge(u32),

    #[error("level has no goal -- it could never be completed")]
    MissingGoal,

    #[error("start cell ({x}, {y}) lies outside the level")]
    StartOutOfBounds { x: i32, y: i32 },

    #[error("{kind} placed at cell ({x}, {y}) lies outside the level")]
    PlacementOutOfBounds { kind: &'static str, x: i32, y: i32 },

    #[error("a game needs at least one level")]
    NoLevels,

    #[error("level {index}: {source}")]
    Level {
        index: usize,
        #[source]
        source: Box<LevelError>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fps must be at least 1")]
    ZeroFrameRate,

    #[error("grid_size must be positive")]
    ZeroGridSize,

    #[error("coins_per_life must be at least 1")]
    ZeroCoinsPerLife,
}
