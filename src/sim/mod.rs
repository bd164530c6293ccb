//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure:
//! - Fixed logical timestep only, no wall-clock reads
//! - Randomness only through a `BounceSource`
//! - Every transition returns a new snapshot
//! - No rendering or platform dependencies

pub mod bounce;
pub mod geometry;
pub mod input;
pub mod schedule;
pub mod state;
pub mod tick;

pub use bounce::{BounceSource, FixedBounce, SeededBounce};
pub use geometry::{HitSide, Rect, classify_collision, decompose, overlap};
pub use input::flap;
pub use schedule::{Schedule, ScheduleItem};
pub use state::{GameState, Pipe};
pub use tick::tick;
