//! Ghost runs
//!
//! Each finished run's bird track is kept for the rest of the session and
//! replayed next to later runs, tick for tick. Nothing is persisted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Bird position at one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub elapsed_ms: f64,
    /// Viewport position of the bird's top-left corner
    pub pos: Vec2,
}

/// Records the bird track of the current run
#[derive(Debug, Clone, Default)]
pub struct RunRecorder {
    track: Vec<TrackPoint>,
}

impl RunRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one snapshot. Repeated snapshots at the same time (a flap
    /// between ticks) replace the previous point.
    pub fn observe(&mut self, state: &GameState) {
        let point = TrackPoint {
            elapsed_ms: state.elapsed_ms,
            pos: Vec2::new(state.bird_x, state.bird_y),
        };
        match self.track.last_mut() {
            Some(last) if last.elapsed_ms == point.elapsed_ms => *last = point,
            _ => self.track.push(point),
        }
    }

    pub fn len(&self) -> usize {
        self.track.len()
    }

    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }

    /// Hand over the recorded track, leaving the recorder empty
    pub fn finish(&mut self) -> Ghost {
        Ghost {
            track: std::mem::take(&mut self.track),
        }
    }
}

/// A finished run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ghost {
    /// Sorted by `elapsed_ms`
    pub track: Vec<TrackPoint>,
}

impl Ghost {
    /// Position at `elapsed_ms`, or None before the first or after the last point
    pub fn position_at(&self, elapsed_ms: f64) -> Option<Vec2> {
        let first = self.track.first()?;
        let last = self.track.last()?;
        if elapsed_ms < first.elapsed_ms || elapsed_ms > last.elapsed_ms {
            return None;
        }
        // Last recorded point at or before `elapsed_ms`
        let idx = self.track.partition_point(|p| p.elapsed_ms <= elapsed_ms);
        self.track.get(idx.saturating_sub(1)).map(|p| p.pos)
    }
}

/// Every ghost of the session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GhostLibrary {
    pub ghosts: Vec<Ghost>,
}

impl GhostLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep a finished run. Empty runs are discarded.
    pub fn add(&mut self, ghost: Ghost) {
        if ghost.track.is_empty() {
            return;
        }
        log::debug!("Ghost {} stored ({} points)", self.ghosts.len(), ghost.track.len());
        self.ghosts.push(ghost);
    }

    pub fn len(&self) -> usize {
        self.ghosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ghosts.is_empty()
    }

    /// Positions of every ghost still flying at `elapsed_ms`
    pub fn positions_at(&self, elapsed_ms: f64) -> Vec<Vec2> {
        self.ghosts
            .iter()
            .filter_map(|ghost| ghost.position_at(elapsed_ms))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FixedBounce, Schedule, flap, tick};
    use crate::tuning::Tuning;

    fn recorded_run(ticks: usize) -> Ghost {
        let tuning = Tuning::default();
        let mut state = GameState::new(&Schedule::parse("h\n0.5,0.25,30", 400.0), &tuning);
        let mut recorder = RunRecorder::new();
        let mut bounce = FixedBounce(4.0);
        recorder.observe(&state);
        for _ in 0..ticks {
            state = tick(&state, &tuning, &mut bounce);
            recorder.observe(&state);
        }
        recorder.finish()
    }

    #[test]
    fn test_flap_replaces_point() {
        let tuning = Tuning::default();
        let state = GameState::new(&Schedule::default(), &tuning);
        let mut recorder = RunRecorder::new();
        recorder.observe(&state);
        recorder.observe(&flap(&state, &tuning));
        assert_eq!(recorder.len(), 1);
    }

    #[test]
    fn test_ghost_positions() {
        let ghost = recorded_run(10);
        assert_eq!(ghost.track.len(), 11);

        assert!(ghost.position_at(-1.0).is_none());
        assert_eq!(ghost.position_at(0.0), Some(ghost.track[0].pos));
        assert_eq!(ghost.position_at(40.0), Some(ghost.track[2].pos));
        // Between ticks: the earlier point
        assert_eq!(ghost.position_at(45.0), Some(ghost.track[2].pos));
        assert!(ghost.position_at(201.0).is_none());
    }

    #[test]
    fn test_library_drops_finished_ghosts() {
        let mut library = GhostLibrary::new();
        library.add(recorded_run(5));
        library.add(recorded_run(20));
        library.add(Ghost::default());
        assert_eq!(library.len(), 2);

        assert_eq!(library.positions_at(60.0).len(), 2);
        // The short run ended at 100 ms
        assert_eq!(library.positions_at(300.0).len(), 1);
        assert!(library.positions_at(1000.0).is_empty());
    }

    #[test]
    fn test_finish_empties_recorder() {
        let mut recorder = RunRecorder::new();
        recorder.observe(&GameState::new(&Schedule::default(), &Tuning::default()));
        let ghost = recorder.finish();
        assert_eq!(ghost.track.len(), 1);
        assert!(recorder.is_empty());
    }
}
