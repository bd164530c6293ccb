//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world by one logical step. `tick` is a
//! pure function of the previous snapshot, the tuning and the bounce source.

use super::bounce::BounceSource;
use super::geometry::{HitSide, Rect, classify_collision};
use super::schedule::ScheduleItem;
use super::state::{GameState, Pipe};
use crate::tuning::Tuning;

/// Advance the game state by one fixed timestep
#[must_use]
pub fn tick(state: &GameState, tuning: &Tuning, bounce: &mut impl BounceSource) -> GameState {
    let elapsed_ms = state.elapsed_ms + tuning.tick_ms;

    // Pending items whose time has come. Removal from `pending` is what makes
    // each item fire once; on the first tick this also catches t = 0.
    let (mut due, pending): (Vec<ScheduleItem>, Vec<ScheduleItem>) = state
        .pending
        .iter()
        .partition(|item| item.appear_ms <= elapsed_ms);
    due.sort_by(|a, b| a.appear_ms.total_cmp(&b.appear_ms));

    let mut next_pipe = state.next_pipe;
    let spawned: Vec<Pipe> = due
        .iter()
        .map(|item| {
            let pipe = Pipe::spawn(next_pipe, item, tuning);
            next_pipe += 1;
            log::debug!(
                "Pipe {} spawned at frame {:.1} (t={}ms)",
                pipe.id,
                pipe.frame,
                item.appear_ms
            );
            pipe
        })
        .collect();

    // Physics
    let velocity = state.bird_velocity + tuning.gravity;
    let y_raw = state.bird_y + velocity;
    let bird_x = (state.bird_x + tuning.birb_drift).min(tuning.birb_max_x());
    let scroll_x = state.scroll_x + tuning.scroll_speed;

    // Forget pipes whose right edge is behind the viewport
    let pipes: Vec<Pipe> = state
        .pipes
        .iter()
        .chain(spawned.iter())
        .filter(|pipe| pipe.right(tuning) >= state.scroll_x)
        .copied()
        .collect();

    // Collide at the position the bird is moving to
    let bird_rect = Rect::new(
        scroll_x + bird_x,
        y_raw,
        tuning.birb_width,
        tuning.birb_height,
    );
    let floor_y = tuning.floor_y();
    let side = classify_collision(&bird_rect, &pipes, tuning).or_else(|| {
        if y_raw <= 0.0 {
            Some(HitSide::Top)
        } else if y_raw >= floor_y {
            Some(HitSide::Bottom)
        } else {
            None
        }
    });

    // Pipes whose right edge the bird's left edge reached this tick
    let prev_world_x = state.scroll_x + state.bird_x;
    let next_world_x = scroll_x + bird_x;
    let passed = pipes
        .iter()
        .filter(|pipe| {
            let right = pipe.right(tuning);
            prev_world_x < right && right <= next_world_x
        })
        .count() as u32;

    let (bird_lives, hit_cooldown, bird_velocity) = match side {
        Some(side) if state.hit_cooldown == 0 => {
            let magnitude = bounce.magnitude(tuning.bounce_min, tuning.bounce_max);
            let kick = match side {
                HitSide::Top => magnitude,
                HitSide::Bottom => -magnitude,
            };
            let lives = state.bird_lives.saturating_sub(1);
            log::info!("Hit {:?} at t={}ms, {} lives left", side, elapsed_ms, lives);
            (lives, tuning.hit_cooldown_ticks, kick)
        }
        _ => (
            state.bird_lives,
            state.hit_cooldown.saturating_sub(1),
            velocity,
        ),
    };

    // A hit tick scores nothing
    let score = if side.is_some() {
        state.score
    } else {
        state.score + passed
    };

    let bird_y = y_raw.min(floor_y).max(0.0);

    let won = score >= state.total_pipes;
    let lost = bird_lives == 0;
    let game_end = state.game_end || won || lost;
    if game_end && !state.game_end {
        if lost {
            log::info!("Game over at t={}ms, score {}/{}", elapsed_ms, score, state.total_pipes);
        } else {
            log::info!("All {} pipes passed at t={}ms", state.total_pipes, elapsed_ms);
        }
    }

    GameState {
        elapsed_ms,
        bird_x,
        bird_y,
        bird_velocity,
        scroll_x,
        pipes,
        next_pipe,
        pending,
        bird_lives,
        hit_cooldown,
        score,
        total_pipes: state.total_pipes,
        game_end,
    }
}
