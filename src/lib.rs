//! Flappy Birb - a side-scrolling arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, schedule, collisions, game state)
//! - `driver`: Merges tick and input commands and folds them over the state
//! - `replay`: Ghost runs replayed alongside the current one
//! - `render`: Render boundary (snapshots in, frames out)
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod error;
pub mod render;
pub mod replay;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{ScheduleError, TuningError};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (50 Hz)
    pub const TICK_RATE_MS: f64 = 20.0;

    /// Viewport dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 600.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;

    /// Bird sprite
    pub const BIRB_WIDTH: f32 = 42.0;
    pub const BIRB_HEIGHT: f32 = 30.0;
    /// Horizontal start position (viewport coordinates)
    pub const BIRB_START_X: f32 = 60.0;
    /// Horizontal drift per tick until the bird reaches its cap
    pub const BIRB_DRIFT: f32 = 0.5;
    /// Rightmost bird x: the sprite never crosses the viewport midpoint
    pub const BIRB_MAX_X: f32 = CANVAS_WIDTH / 2.0 - BIRB_WIDTH;

    /// Pipe width (pixels)
    pub const PIPE_WIDTH: f32 = 50.0;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.4;
    /// Velocity set by a flap (negative is up)
    pub const FLAP_VELOCITY: f32 = -6.0;
    /// World scroll per tick (pixels)
    pub const SCROLL_SPEED: f32 = 2.0;

    /// Rules
    pub const INITIAL_LIVES: u8 = 3;
    pub const HIT_COOLDOWN_TICKS: u32 = 6;
    /// Bounce magnitude range after a hit, [min, max)
    pub const BOUNCE_MIN: f32 = 4.0;
    pub const BOUNCE_MAX: f32 = 8.0;
}
