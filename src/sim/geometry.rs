//! Axis-aligned rectangle geometry and collision classification
//!
//! All rectangles live in world coordinates: x grows with scrolling,
//! y grows downward from the viewport ceiling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Pipe;
use crate::tuning::Tuning;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Which side of the bird took the hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSide {
    /// Ceiling or an upper pipe half
    Top,
    /// Floor or a lower pipe half
    Bottom,
}

/// Strict rectangle intersection. Touching edges do not overlap.
pub fn overlap(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// Split a pipe into its (top, bottom) solid rectangles around the gap
pub fn decompose(pipe: &Pipe, tuning: &Tuning) -> (Rect, Rect) {
    let gap_top = pipe.gap_y - pipe.gap_height / 2.0;
    let gap_bottom = pipe.gap_y + pipe.gap_height / 2.0;

    let top = Rect::new(pipe.frame, 0.0, tuning.pipe_width, gap_top);
    let bottom = Rect::new(
        pipe.frame,
        gap_bottom,
        tuning.pipe_width,
        tuning.canvas_height - gap_bottom,
    );
    (top, bottom)
}

/// Classify a bird rectangle against the viewport bounds and a pipe set.
///
/// Top is checked first, so a rectangle touching both an upper and a lower
/// surface in the same tick reports `Top`.
pub fn classify_collision<'a>(
    bird: &Rect,
    pipes: impl IntoIterator<Item = &'a Pipe>,
    tuning: &Tuning,
) -> Option<HitSide> {
    let halves: Vec<(Rect, Rect)> = pipes.into_iter().map(|p| decompose(p, tuning)).collect();

    if bird.top() <= 0.0 || halves.iter().any(|(top, _)| overlap(bird, top)) {
        return Some(HitSide::Top);
    }
    if bird.bottom() >= tuning.canvas_height || halves.iter().any(|(_, bottom)| overlap(bird, bottom))
    {
        return Some(HitSide::Bottom);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(frame: f32, gap_y: f32, gap_height: f32) -> Pipe {
        Pipe {
            id: 0,
            frame,
            gap_y,
            gap_height,
        }
    }

    #[test]
    fn test_overlap_strict_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Sharing an edge is not an overlap
        assert!(!overlap(&a, &Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!overlap(&a, &Rect::new(0.0, 10.0, 10.0, 10.0)));
        // Any penetration is
        assert!(overlap(&a, &Rect::new(9.9, 9.9, 10.0, 10.0)));
        // Containment
        assert!(overlap(&a, &Rect::new(2.0, 2.0, 1.0, 1.0)));
    }

    #[test]
    fn test_decompose() {
        let tuning = Tuning::default();
        let (top, bottom) = decompose(&pipe(300.0, 200.0, 100.0), &tuning);

        assert_eq!(top, Rect::new(300.0, 0.0, tuning.pipe_width, 150.0));
        assert_eq!(bottom.top(), 250.0);
        assert_eq!(bottom.bottom(), tuning.canvas_height);
        assert_eq!(bottom.left(), 300.0);
        assert_eq!(bottom.right(), 300.0 + tuning.pipe_width);
    }

    #[test]
    fn test_classify_in_gap() {
        let tuning = Tuning::default();
        let pipes = [pipe(100.0, 200.0, 100.0)];
        let bird = Rect::new(110.0, 185.0, tuning.birb_width, tuning.birb_height);
        assert_eq!(classify_collision(&bird, &pipes, &tuning), None);
    }

    #[test]
    fn test_classify_pipe_halves() {
        let tuning = Tuning::default();
        let pipes = [pipe(100.0, 200.0, 100.0)];

        let high = Rect::new(110.0, 140.0, tuning.birb_width, tuning.birb_height);
        assert_eq!(classify_collision(&high, &pipes, &tuning), Some(HitSide::Top));

        let low = Rect::new(110.0, 230.0, tuning.birb_width, tuning.birb_height);
        assert_eq!(classify_collision(&low, &pipes, &tuning), Some(HitSide::Bottom));
    }

    #[test]
    fn test_classify_bounds() {
        let tuning = Tuning::default();
        let none: [Pipe; 0] = [];

        let ceiling = Rect::new(0.0, 0.0, tuning.birb_width, tuning.birb_height);
        assert_eq!(classify_collision(&ceiling, &none, &tuning), Some(HitSide::Top));

        let floor = Rect::new(0.0, tuning.floor_y(), tuning.birb_width, tuning.birb_height);
        assert_eq!(classify_collision(&floor, &none, &tuning), Some(HitSide::Bottom));
    }

    #[test]
    fn test_top_wins_tie() {
        let tuning = Tuning::default();
        // Gap narrower than the bird: both halves overlap
        let pipes = [pipe(100.0, 200.0, 10.0)];
        let bird = Rect::new(110.0, 185.0, tuning.birb_width, tuning.birb_height);
        assert_eq!(classify_collision(&bird, &pipes, &tuning), Some(HitSide::Top));
    }
}
