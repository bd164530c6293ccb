//! Browser bindings
//!
//! The page owns the timer, the key listener and the drawing. It feeds
//! commands in arrival order and reads each snapshot back as JSON.

use wasm_bindgen::prelude::*;

use crate::driver::{Command, Game};
use crate::replay::{GhostLibrary, RunRecorder};
use crate::sim::{GameState, Schedule, SeededBounce};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Flappy Birb (web) starting...");
}

/// One game session driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    game: Game<SeededBounce>,
    state: GameState,
    recorder: RunRecorder,
    ghosts: GhostLibrary,
}

#[wasm_bindgen]
impl WebGame {
    /// Build a session from fetched schedule CSV text
    #[wasm_bindgen(constructor)]
    pub fn new(schedule_csv: &str, seed: u64) -> WebGame {
        let tuning = Tuning::default();
        let schedule = Schedule::parse(schedule_csv, tuning.canvas_height);
        let game = Game::new(schedule, tuning, SeededBounce::new(seed));
        let state = game.initial_state();
        let mut recorder = RunRecorder::new();
        recorder.observe(&state);
        WebGame {
            game,
            state,
            recorder,
            ghosts: GhostLibrary::new(),
        }
    }

    /// Tick interval the page timer must fire at (ms)
    #[wasm_bindgen(getter)]
    pub fn tick_ms(&self) -> f64 {
        self.game.tuning.tick_ms
    }

    pub fn tick(&mut self) -> bool {
        self.apply(Command::Tick);
        self.state.game_end
    }

    pub fn flap(&mut self) {
        self.apply(Command::Flap);
    }

    pub fn restart(&mut self) {
        self.ghosts.add(self.recorder.finish());
        self.apply(Command::Restart);
    }

    /// Current snapshot plus ghost positions, as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let ghosts = self.ghosts.positions_at(self.state.elapsed_ms);
        serde_json::to_string(&serde_json::json!({
            "state": &self.state,
            "ghosts": ghosts,
        }))
        .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl WebGame {
    fn apply(&mut self, command: Command) {
        self.state = self.game.apply(&self.state, command);
        self.recorder.observe(&self.state);
    }
}
