//! Run the game loop without a terminal.
//!
//! Feeds fixed synthetic deltas and a wandering player into a seeded loop.
//! Handy for soak-testing the rules and for reproducing a session from a
//! seed.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::game_loop::{GameLoop, TickOutcome};
use crate::host::RecordingHost;

/// What happened during a headless run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u32,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub game_over: bool,
}

/// Tick the loop up to `max_ticks` times, stopping early if it stops asking to be rescheduled
pub fn run(config: GameConfig, seed: u64, max_ticks: u32) -> RunSummary {
    let mut game = GameLoop::with_seed(config, seed);
    let mut host = RecordingHost::new();
    let mut wander = StdRng::seed_from_u64(seed.wrapping_add(1));

    let mut elapsed_ms = None;
    let mut ticks = 0;
    let mut game_over = false;

    while ticks < max_ticks {
        match wander.random_range(0..4) {
            0 => game.move_player_left(),
            1 => game.move_player_right(),
            _ => {}
        }

        ticks += 1;
        if game.tick(elapsed_ms, &mut host) == TickOutcome::GameOver {
            game_over = true;
            break;
        }
        let Some(delay) = host.take_scheduled() else {
            break;
        };
        elapsed_ms = Some(delay.as_secs_f64() * 1000.0);
    }

    let state = game.state();
    let summary = RunSummary {
        ticks,
        score: state.score,
        lives: state.lives,
        level: state.difficulty_level,
        game_over,
    };
    info!("headless run finished: {summary:?}");
    summary
}
