//! Player input reducers

use super::state::GameState;
use crate::tuning::Tuning;

/// Flap: overwrite the bird's velocity with the upward impulse.
/// Everything else is carried over unchanged.
#[must_use]
pub fn flap(state: &GameState, tuning: &Tuning) -> GameState {
    GameState {
        bird_velocity: tuning.flap_velocity,
        ..state.clone()
    }
}
