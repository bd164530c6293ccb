//! Render boundary
//!
//! Renderers read snapshots and never modify them. Whatever a renderer caches
//! between frames lives in the renderer value itself, created once and
//! passed around explicitly.

use std::io::{self, Write};

use glam::Vec2;

use crate::sim::GameState;
use crate::tuning::Tuning;

/// Something that draws a game snapshot
pub trait Render {
    type Error;

    /// Draw one frame. `ghosts` are viewport positions of replayed runs.
    fn render(&mut self, state: &GameState, ghosts: &[Vec2]) -> Result<(), Self::Error>;
}

/// Width of the text lane in characters
const LANE_CHARS: usize = 40;

/// Terminal renderer: one status line per frame, with a vertical lane
/// showing the bird (`>`), ghosts (`o`) and the next pipe's gap (`:`).
pub struct HudRenderer<W: Write> {
    out: W,
    tuning: Tuning,
}

impl<W: Write> HudRenderer<W> {
    pub fn new(out: W, tuning: Tuning) -> Self {
        Self { out, tuning }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Map a y coordinate onto the text lane
    fn lane_index(&self, y: f32) -> usize {
        let t = (y / self.tuning.canvas_height).clamp(0.0, 1.0);
        ((t * (LANE_CHARS - 1) as f32).round() as usize).min(LANE_CHARS - 1)
    }

    /// Build the status line for a snapshot
    pub fn frame(&self, state: &GameState, ghosts: &[Vec2]) -> String {
        let mut lane = vec![' '; LANE_CHARS];

        // Next pipe still ahead of the bird
        let bird_right = state.bird_x + self.tuning.birb_width;
        let next_pipe = state
            .pipes
            .iter()
            .filter(|pipe| state.screen_x(pipe) + self.tuning.pipe_width >= bird_right)
            .min_by(|a, b| a.frame.total_cmp(&b.frame));
        if let Some(pipe) = next_pipe {
            let a = self.lane_index(pipe.gap_y - pipe.gap_height / 2.0);
            let b = self.lane_index(pipe.gap_y + pipe.gap_height / 2.0);
            let (from, to) = (a.min(b), a.max(b));
            for cell in &mut lane[from..=to] {
                *cell = ':';
            }
        }

        for ghost in ghosts {
            lane[self.lane_index(ghost.y + self.tuning.birb_height / 2.0)] = 'o';
        }
        lane[self.lane_index(state.bird_y + self.tuning.birb_height / 2.0)] = '>';

        let lives: String = (0..self.tuning.initial_lives)
            .map(|i| if i < state.bird_lives { '♥' } else { '·' })
            .collect();
        let distance = next_pipe
            .map(|pipe| format!("{:>4.0}px", state.screen_x(pipe) - state.bird_x))
            .unwrap_or_else(|| "   --".to_string());
        let status = if state.game_end {
            if state.is_lost() { " GAME OVER" } else { " CLEAR" }
        } else {
            ""
        };

        format!(
            "|{}| {:>6.2}s score {}/{} {} next {}{}",
            lane.into_iter().collect::<String>(),
            state.elapsed_ms / 1000.0,
            state.score,
            state.total_pipes,
            lives,
            distance,
            status
        )
    }
}

impl<W: Write> Render for HudRenderer<W> {
    type Error = io::Error;

    fn render(&mut self, state: &GameState, ghosts: &[Vec2]) -> io::Result<()> {
        let line = self.frame(state, ghosts);
        write!(self.out, "\r{}", line)?;
        self.out.flush()
    }
}
