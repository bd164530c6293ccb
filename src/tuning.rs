//! Data-driven game balance
//!
//! Every physics and rule constant as a runtime value. Defaults match
//! `crate::consts`; a JSON file can override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Physics and rule parameters consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Tick interval (ms). Must match the rate the driver fires ticks at.
    pub tick_ms: f64,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub birb_width: f32,
    pub birb_height: f32,
    pub birb_start_x: f32,
    pub birb_drift: f32,
    pub pipe_width: f32,
    pub gravity: f32,
    pub flap_velocity: f32,
    pub scroll_speed: f32,
    pub initial_lives: u8,
    pub hit_cooldown_ticks: u32,
    pub bounce_min: f32,
    pub bounce_max: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_ms: TICK_RATE_MS,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            birb_width: BIRB_WIDTH,
            birb_height: BIRB_HEIGHT,
            birb_start_x: BIRB_START_X,
            birb_drift: BIRB_DRIFT,
            pipe_width: PIPE_WIDTH,
            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            scroll_speed: SCROLL_SPEED,
            initial_lives: INITIAL_LIVES,
            hit_cooldown_ticks: HIT_COOLDOWN_TICKS,
            bounce_min: BOUNCE_MIN,
            bounce_max: BOUNCE_MAX,
        }
    }
}

impl Tuning {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::debug!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    /// Reject values the simulation and the ticker cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.tick_ms.is_finite() && self.tick_ms > 0.0) {
            return Err(TuningError::Invalid(format!(
                "tick_ms must be finite and positive, got {}",
                self.tick_ms
            )));
        }
        if self.bounce_min.is_nan() || self.bounce_max.is_nan() || self.bounce_min > self.bounce_max {
            return Err(TuningError::Invalid(format!(
                "bounce_min {} exceeds bounce_max {}",
                self.bounce_min, self.bounce_max
            )));
        }
        Ok(())
    }

    /// Read overrides from a JSON file
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// World scroll per millisecond of schedule time
    #[inline]
    pub fn scroll_per_ms(&self) -> f64 {
        self.scroll_speed as f64 / self.tick_ms
    }

    /// Rightmost bird x: the sprite never crosses the viewport midpoint
    #[inline]
    pub fn birb_max_x(&self) -> f32 {
        self.canvas_width / 2.0 - self.birb_width
    }

    /// Lowest y the bird's top edge may take
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.canvas_height - self.birb_height
    }

    /// Vertical start position: bird centred in the viewport
    #[inline]
    pub fn birb_start_y(&self) -> f32 {
        self.canvas_height / 2.0 - self.birb_height / 2.0
    }
}
