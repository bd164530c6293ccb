//! Game state and core simulation types
//!
//! A `GameState` is an immutable snapshot. The tick function never edits one
//! in place; it builds the next snapshot from the previous.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::schedule::{Schedule, ScheduleItem};
use crate::tuning::Tuning;

/// A spawned pipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Spawn-order id, never reused within a run
    pub id: u32,
    /// World x of the left edge. Fixed at spawn; only the scroll moves.
    pub frame: f32,
    pub gap_y: f32,
    pub gap_height: f32,
}

impl Pipe {
    /// Spawn a pipe for a schedule item that just came due
    pub fn spawn(id: u32, item: &ScheduleItem, tuning: &Tuning) -> Self {
        Self {
            id,
            frame: (item.appear_ms * tuning.scroll_per_ms()) as f32 + tuning.canvas_width,
            gap_y: item.gap_y,
            gap_height: item.gap_height,
        }
    }

    /// World x of the right edge
    #[inline]
    pub fn right(&self, tuning: &Tuning) -> f32 {
        self.frame + tuning.pipe_width
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Logical clock (ms); advances one tick interval per tick
    pub elapsed_ms: f64,
    /// Bird x in viewport coordinates
    pub bird_x: f32,
    /// Bird top edge (pixels from the ceiling)
    pub bird_y: f32,
    /// Vertical velocity (pixels/tick, positive is down)
    pub bird_velocity: f32,
    /// Cumulative world scroll
    pub scroll_x: f32,
    /// Pipes spawned and not yet scrolled out of view
    pub pipes: Vec<Pipe>,
    /// Next unused pipe id
    pub next_pipe: u32,
    /// Schedule items not yet due
    pub pending: Vec<ScheduleItem>,
    pub bird_lives: u8,
    /// Ticks before another life can be lost
    pub hit_cooldown: u32,
    /// Pipes passed
    pub score: u32,
    /// Schedule size at construction
    pub total_pipes: u32,
    /// Sticky end-of-game flag (won or lost)
    pub game_end: bool,
}

impl GameState {
    /// Create the initial state for a run over `schedule`
    pub fn new(schedule: &Schedule, tuning: &Tuning) -> Self {
        Self {
            elapsed_ms: 0.0,
            bird_x: tuning.birb_start_x,
            bird_y: tuning.birb_start_y(),
            bird_velocity: 0.0,
            scroll_x: 0.0,
            pipes: Vec::new(),
            next_pipe: 0,
            pending: schedule.items.clone(),
            bird_lives: tuning.initial_lives,
            hit_cooldown: 0,
            score: 0,
            total_pipes: schedule.len() as u32,
            game_end: false,
        }
    }

    /// Bird rectangle in world coordinates
    pub fn bird_rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(
            self.scroll_x + self.bird_x,
            self.bird_y,
            tuning.birb_width,
            tuning.birb_height,
        )
    }

    /// Every scheduled pipe has been passed
    pub fn is_won(&self) -> bool {
        self.score >= self.total_pipes
    }

    pub fn is_lost(&self) -> bool {
        self.bird_lives == 0
    }

    /// Viewport x of a pipe's left edge
    #[inline]
    pub fn screen_x(&self, pipe: &Pipe) -> f32 {
        pipe.frame - self.scroll_x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let tuning = Tuning::default();
        let schedule = Schedule::parse("h\n0.5,0.25,0.0\n0.5,0.25,2.0", tuning.canvas_height);
        let state = GameState::new(&schedule, &tuning);

        assert_eq!(state.total_pipes, 2);
        assert_eq!(state.pending.len(), 2);
        assert_eq!(state.bird_lives, 3);
        assert_eq!(state.next_pipe, 0);
        assert!(state.pipes.is_empty());
        assert!(!state.game_end);
        assert_eq!(state.bird_y, tuning.birb_start_y());
    }

    #[test]
    fn test_spawn_frame_offset() {
        let tuning = Tuning::default();
        let early = ScheduleItem {
            appear_ms: 0.0,
            gap_y: 200.0,
            gap_height: 100.0,
        };
        let late = ScheduleItem {
            appear_ms: 2000.0,
            ..early
        };

        assert_eq!(Pipe::spawn(0, &early, &tuning).frame, tuning.canvas_width);
        // 2000 ms = 100 ticks of scroll
        let expected = 100.0 * tuning.scroll_speed + tuning.canvas_width;
        assert!((Pipe::spawn(1, &late, &tuning).frame - expected).abs() < 1e-3);
    }
}
