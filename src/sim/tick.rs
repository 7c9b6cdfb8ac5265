//! Per-frame simulation tick
//!
//! Game loop that advances the session by one host frame. Every tick runs
//! the sub-updates for the current phase in a fixed order: countdown, or
//! bike physics then world scroll then spawning then collision.

use super::bike;
use super::collision;
use super::countdown::CountdownPhase;
use super::state::{CrashCause, GameEvent, GamePhase, GameState, Lane};
use crate::consts::MAX_DT;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Lift input, 0 = none, 1 = full
    pub throttle: f32,
    /// Lane to steer toward (tap/swipe)
    pub lane: Option<Lane>,
}

impl TickInput {
    pub fn throttle(throttle: f32) -> Self {
        Self {
            throttle,
            lane: None,
        }
    }
}

/// Fresh session in the idle phase
pub fn create_game(seed: u64) -> GameState {
    GameState::new(seed)
}

/// Begin a run: replace all run state and light the countdown.
///
/// Works from any phase. Tuning, seed and best score carry over, and the
/// spawn RNG restarts from the seed, so every run of a session is identical
/// to the first one for the same input.
pub fn start_game(state: &mut GameState) {
    let best_score = state.best_score;
    let tuning = std::mem::take(&mut state.tuning);

    *state = GameState::with_tuning(state.seed, tuning);
    state.best_score = best_score;
    state.phase = GamePhase::Countdown;
    state.countdown.start();
    state
        .events
        .push(GameEvent::CountdownLight(CountdownPhase::Yellow1));

    log::info!("Run starting (seed {}, best {})", state.seed, best_score);
}

/// Advance one tick with throttle only
pub fn update_game(state: &mut GameState, dt: f32, throttle: f32) {
    tick(state, &TickInput::throttle(throttle), dt);
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Long gaps (backgrounded tab) would destabilize the integrator
    let dt = if dt > 0.0 { dt.min(MAX_DT) } else { 0.0 };
    let throttle = if input.throttle > 0.0 {
        input.throttle.min(1.0)
    } else {
        0.0
    };

    match state.phase {
        GamePhase::Idle | GamePhase::GameOver => {}
        GamePhase::Countdown => tick_countdown(state, dt),
        GamePhase::Racing => tick_racing(state, input, dt, throttle),
    }
}

fn tick_countdown(state: &mut GameState, dt: f32) {
    let before = state.countdown.phase;
    let started = state.countdown.update(dt);

    if state.countdown.phase != before {
        state
            .events
            .push(GameEvent::CountdownLight(state.countdown.phase));
    }

    if started {
        state.phase = GamePhase::Racing;
        state.events.push(GameEvent::RaceStarted);
        log::info!("Racing");
    }
}

fn tick_racing(state: &mut GameState, input: &TickInput, dt: f32, throttle: f32) {
    if let Some(lane) = input.lane {
        state.bike.target_lane = lane;
    }

    // Bike physics
    let flipped = bike::update(&mut state.bike, &state.tuning.bike, dt, throttle);
    bike::steer(&mut state.bike, &state.tuning.bike, dt);
    record_stats(state, dt);
    if flipped {
        end_run(state, CrashCause::Flipped);
        return;
    }

    // World scroll
    let speed = state.bike.speed;
    state.world.update(&state.tuning.world, dt, speed);

    // Spawn and despawn
    let scroll_rate = state.tuning.world.scroll_rate(speed);
    let racing = state.is_racing();
    state
        .spawner
        .update(&state.tuning.spawn, &mut state.rng, dt, scroll_rate, racing);

    // Collision and scoring
    let result = collision::check(
        &mut state.spawner.entities,
        scroll_rate * dt,
        state.bike.lane_position,
        &state.tuning.collision,
        &mut state.score,
    );
    state
        .events
        .extend(result.coins.iter().map(|&id| GameEvent::CoinCollected(id)));
    if result.crashed() {
        end_run(state, CrashCause::Obstacle);
    }
}

fn record_stats(state: &mut GameState, dt: f32) {
    let stats = &mut state.stats;
    stats.race_time += dt;
    stats.distance += state.bike.speed * state.tuning.bike.distance_scale * dt;

    if bike::in_wheelie(&state.bike, &state.tuning.bike) {
        stats.wheelie_time += dt;
        stats.current_wheelie += dt;
        stats.best_wheelie = stats.best_wheelie.max(stats.current_wheelie);
    } else {
        stats.current_wheelie = 0.0;
    }
}

fn end_run(state: &mut GameState, cause: CrashCause) {
    state.phase = GamePhase::GameOver;
    state.crash_cause = Some(cause);
    state.events.push(GameEvent::Crashed(cause));

    log::info!(
        "Run over ({:?}): score {}, {:.0} m",
        cause,
        state.score,
        state.stats.distance
    );

    if state.score > state.best_score {
        state.best_score = state.score;
        state.events.push(GameEvent::NewBestScore(state.score));
        log::info!("New best score: {}", state.score);
    }
}
