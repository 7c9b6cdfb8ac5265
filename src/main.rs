//! Throttle Up entry point
//!
//! On the web the JavaScript host drives `throttle_up::web::WheelieGame`.
//! Natively this runs a headless session with a simple autopilot, which is
//! handy for checking balance changes from the terminal.
//!
//! Usage: `throttle-up [seed] [difficulty]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use throttle_up::consts::FRAME_DT;
    use throttle_up::platform::MemoryStore;
    use throttle_up::sim::{GameEvent, GamePhase, create_game, start_game, tick};
    use throttle_up::{BestScore, Difficulty, Settings};

    env_logger::init();
    log::info!("Throttle Up (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let difficulty = args
        .next()
        .and_then(|s| Difficulty::parse(&s))
        .unwrap_or_default();

    let mut store = MemoryStore::new();
    let settings = Settings::from_preset(difficulty);
    let mut best = BestScore::load(&store);

    let mut state = create_game(seed);
    state.tuning = settings.tuning();
    state.best_score = best.score;
    start_game(&mut state);

    // Two minutes of simulated time at 60 Hz
    let max_frames = 60 * 120;
    let mut frames = 0;
    while frames < max_frames && state.phase != GamePhase::GameOver {
        let input = autopilot::input(&state);
        tick(&mut state, &input, FRAME_DT);
        frames += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::CoinCollected(_) => log::debug!("coin! score {}", state.score),
                GameEvent::NewBestScore(score) => {
                    if let Err(e) = best.submit(score, &mut store) {
                        log::warn!("Could not save best score: {}", e);
                    }
                }
                other => log::info!("{:?}", other),
            }
        }
    }

    println!(
        "seed {} ({}): {:?} after {:.1}s, score {}, distance {:.0} m, best wheelie {:.2}s",
        seed,
        difficulty.as_str(),
        state.crash_cause,
        frames as f32 * FRAME_DT,
        state.score,
        state.stats.distance,
        state.stats.best_wheelie
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::init, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use throttle_up::consts::BIKE_X;
    use throttle_up::sim::{EntityKind, GameState, TickInput};

    /// Angle the autopilot tries to hold
    const TARGET_ANGLE: f32 = 0.6;
    /// How far ahead obstacles are dodged
    const LOOKAHEAD: f32 = 0.35;

    /// Bang-bang throttle around the target angle, hop lanes for obstacles
    pub fn input(state: &GameState) -> TickInput {
        let bike = &state.bike;
        let throttle = if bike.angle + bike.angular_velocity * 0.25 < TARGET_ANGLE {
            1.0
        } else {
            0.0
        };

        let blocked = state.spawner.entities.iter().any(|e| {
            e.kind == EntityKind::Obstacle
                && e.lane == bike.target_lane
                && e.x > BIKE_X
                && e.x - BIKE_X < LOOKAHEAD
        });
        let lane = blocked.then(|| bike.target_lane.other());

        TickInput { throttle, lane }
    }
}
