//! Command merge and fold driver
//!
//! Ticks and player input become `Command`s on a single ordered stream. One
//! consumer folds them over the running state and hands every intermediate
//! snapshot to the caller. Nothing else ever writes the state.

use crate::sim::{BounceSource, GameState, Schedule, flap, tick};
use crate::tuning::Tuning;

/// A state transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Advance one fixed step
    Tick,
    /// Player flap
    Flap,
    /// Start a fresh run over the same schedule
    Restart,
}

/// Everything a transition needs besides the previous state
#[derive(Debug, Clone)]
pub struct Game<B: BounceSource> {
    pub schedule: Schedule,
    pub tuning: Tuning,
    pub bounce: B,
}

impl<B: BounceSource> Game<B> {
    pub fn new(schedule: Schedule, tuning: Tuning, bounce: B) -> Self {
        Self {
            schedule,
            tuning,
            bounce,
        }
    }

    pub fn initial_state(&self) -> GameState {
        GameState::new(&self.schedule, &self.tuning)
    }

    /// Apply one command to `state`
    pub fn apply(&mut self, state: &GameState, command: Command) -> GameState {
        match command {
            Command::Tick => tick(state, &self.tuning, &mut self.bounce),
            Command::Flap => flap(state, &self.tuning),
            Command::Restart => {
                log::info!("Restarting run");
                self.initial_state()
            }
        }
    }
}

/// Left fold over `commands`, yielding the state after each one.
///
/// Commands are applied strictly in iteration order; none are dropped.
pub fn fold<'a, B, I>(
    game: &'a mut Game<B>,
    initial: GameState,
    commands: I,
) -> impl Iterator<Item = GameState> + 'a
where
    B: BounceSource,
    I: IntoIterator<Item = Command>,
    I::IntoIter: 'a,
{
    commands.into_iter().scan(initial, move |state, command| {
        *state = game.apply(state, command);
        Some(state.clone())
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub use session::{InputHandle, Session};

#[cfg(not(target_arch = "wasm32"))]
mod session {
    use std::ops::ControlFlow;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::thread::{self, JoinHandle};
    use std::time::{Duration, Instant};

    use super::{Command, Game};
    use crate::sim::{BounceSource, GameState};

    /// Producer side for input events (flap/restart)
    #[derive(Debug, Clone)]
    pub struct InputHandle {
        tx: Sender<Command>,
        stop: Arc<AtomicBool>,
    }

    impl InputHandle {
        /// Queue a command. Returns false once the session is gone.
        pub fn send(&self, command: Command) -> bool {
            !self.is_closed() && self.tx.send(command).is_ok()
        }

        pub fn is_closed(&self) -> bool {
            self.stop.load(Ordering::Acquire)
        }
    }

    /// Periodic `Command::Tick` producer. Dropping it stops the thread and
    /// closes every input handle sharing its stop flag.
    struct Ticker {
        stop: Arc<AtomicBool>,
        handle: Option<JoinHandle<()>>,
    }

    impl Ticker {
        fn spawn(interval: Duration, tx: Sender<Command>) -> Self {
            let stop = Arc::new(AtomicBool::new(false));
            let handle = {
                let stop = Arc::clone(&stop);
                thread::spawn(move || {
                    let mut deadline = Instant::now() + interval;
                    while !stop.load(Ordering::Acquire) {
                        let now = Instant::now();
                        if deadline > now {
                            thread::sleep(deadline - now);
                        }
                        deadline += interval;
                        if stop.load(Ordering::Acquire) || tx.send(Command::Tick).is_err() {
                            break;
                        }
                    }
                    log::debug!("Ticker stopped");
                })
            };
            Self {
                stop,
                handle: Some(handle),
            }
        }
    }

    impl Drop for Ticker {
        fn drop(&mut self) {
            self.stop.store(true, Ordering::Release);
            if let Some(handle) = self.handle.take() {
                let _ = handle.join();
            }
            log::debug!("Session closed");
        }
    }

    /// A running session: a periodic ticker plus any number of input
    /// producers, all feeding one channel.
    ///
    /// Dropping the session stops the ticker and closes every input handle.
    pub struct Session {
        tx: Sender<Command>,
        rx: Receiver<Command>,
        ticker: Ticker,
    }

    impl Session {
        /// Start the ticker, firing `Command::Tick` every `interval`
        pub fn start(interval: Duration) -> Self {
            let (tx, rx) = mpsc::channel();
            let ticker = Ticker::spawn(interval, tx.clone());

            log::info!("Session started ({}ms ticks)", interval.as_millis());
            Self { tx, rx, ticker }
        }

        /// Handle for an input producer
        pub fn input(&self) -> InputHandle {
            InputHandle {
                tx: self.tx.clone(),
                stop: Arc::clone(&self.ticker.stop),
            }
        }

        /// Fold incoming commands over `initial` until `on_state` breaks or
        /// every producer has gone away. Returns the last state.
        pub fn run<B, F>(self, game: &mut Game<B>, initial: GameState, mut on_state: F) -> GameState
        where
            B: BounceSource,
            F: FnMut(Command, &GameState) -> ControlFlow<()>,
        {
            let Session { tx, rx, ticker } = self;
            // Only producers keep the channel open from here on
            drop(tx);

            let mut state = initial;
            while let Ok(command) = rx.recv() {
                state = game.apply(&state, command);
                if on_state(command, &state).is_break() {
                    break;
                }
            }
            drop(ticker);
            state
        }
    }
}
