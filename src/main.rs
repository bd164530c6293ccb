//! Flappy Birb entry point
//!
//! Native build: loads the schedule, waits for the player, then runs the
//! session in the terminal. The browser build starts from `web::wasm_start`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::io::{self, BufRead};
    use std::ops::ControlFlow;
    use std::path::PathBuf;
    use std::process::ExitCode;
    use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
    use std::thread;
    use std::time::Duration;

    use flappy_birb::driver::{Command, Game, InputHandle, Session};
    use flappy_birb::render::{HudRenderer, Render};
    use flappy_birb::replay::{GhostLibrary, RunRecorder};
    use flappy_birb::sim::{Schedule, SeededBounce};
    use flappy_birb::Tuning;

    const DEFAULT_SCHEDULE: &str = "assets/map.csv";

    struct Args {
        schedule: PathBuf,
        tuning: Option<PathBuf>,
        seed: u64,
    }

    fn parse_args() -> Args {
        let mut args = Args {
            schedule: PathBuf::from(DEFAULT_SCHEDULE),
            tuning: None,
            seed: 0,
        };
        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--tuning" => args.tuning = iter.next().map(PathBuf::from),
                "--seed" => {
                    if let Some(seed) = iter.next().and_then(|s| s.parse().ok()) {
                        args.seed = seed;
                    }
                }
                _ => args.schedule = PathBuf::from(arg),
            }
        }
        args
    }

    /// Read stdin lines on a dedicated thread
    fn spawn_stdin_reader() -> Receiver<String> {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        rx
    }

    /// Turn key lines into commands until the session closes, then hand the
    /// line receiver back for the next run
    fn forward_keys(lines: Receiver<String>, input: InputHandle) -> Receiver<String> {
        while !input.is_closed() {
            match lines.recv_timeout(Duration::from_millis(20)) {
                Ok(line) => {
                    let command = match line.trim() {
                        "r" | "R" => Command::Restart,
                        _ => Command::Flap,
                    };
                    input.send(command);
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        lines
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        log::info!("Flappy Birb (native) starting...");

        let args = parse_args();
        let tuning = match &args.tuning {
            Some(path) => match Tuning::load(path) {
                Ok(tuning) => tuning,
                Err(e) => {
                    log::error!("{}", e);
                    return ExitCode::FAILURE;
                }
            },
            None => Tuning::default(),
        };
        let schedule = match Schedule::load(&args.schedule, tuning.canvas_height) {
            Ok(schedule) => schedule,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        };

        let interval = Duration::from_secs_f64(tuning.tick_ms / 1000.0);
        let mut game = Game::new(schedule, tuning.clone(), SeededBounce::new(args.seed));
        let mut renderer = HudRenderer::new(io::stdout(), tuning);
        let mut recorder = RunRecorder::new();
        let mut ghosts = GhostLibrary::new();
        let mut lines = spawn_stdin_reader();

        println!("Enter flaps, r + Enter restarts. Press Enter to start.");
        if lines.recv().is_err() {
            return ExitCode::SUCCESS;
        }

        let mut state = game.initial_state();
        loop {
            recorder.observe(&state);
            let session = Session::start(interval);
            let input = session.input();
            let forwarder = thread::spawn(move || forward_keys(lines, input));

            let last = session.run(&mut game, state, |command, snapshot| {
                if command == Command::Restart {
                    ghosts.add(recorder.finish());
                }
                recorder.observe(snapshot);
                let positions = ghosts.positions_at(snapshot.elapsed_ms);
                if let Err(e) = renderer.render(snapshot, &positions) {
                    log::error!("Render failed: {}", e);
                    return ControlFlow::Break(());
                }
                if snapshot.game_end {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });

            lines = match forwarder.join() {
                Ok(lines) => lines,
                Err(_) => {
                    log::error!("Input thread panicked");
                    return ExitCode::FAILURE;
                }
            };

            if !last.game_end {
                return ExitCode::SUCCESS;
            }
            println!("\nScore {}/{}. Enter plays again, q quits.", last.score, last.total_pipes);
            match lines.recv() {
                Ok(line) if line.trim() != "q" => {}
                _ => return ExitCode::SUCCESS,
            }

            ghosts.add(recorder.finish());
            state = game.initial_state();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
