//! Headless runner
//!
//! Drives a session without a browser: a plain loop stands in for the timer
//! and frames go to a [`CommandBuffer`].

use crate::renderer::CommandBuffer;
use crate::session::{Session, TickOutcome};
use crate::settings::Settings;
use crate::sim::{GameState, Player};

/// Tick count when `PONG_TICKS` is unset or unparsable
pub const DEFAULT_TICKS: u64 = 10_000;

/// Summary of a headless run
#[derive(Debug, Clone)]
pub struct HeadlessReport {
    pub ticks: u64,
    pub frames: u64,
    pub player1_hits: u32,
    pub player2_hits: u32,
    pub final_state: GameState,
    /// Score text of the last frame drawn
    pub last_label: Option<String>,
}

/// Tick count from the `PONG_TICKS` environment variable
pub fn ticks_from_env() -> u64 {
    match std::env::var("PONG_TICKS") {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("PONG_TICKS={:?} is not a tick count, using {}", value, DEFAULT_TICKS);
            DEFAULT_TICKS
        }),
        Err(_) => DEFAULT_TICKS,
    }
}

/// Run `ticks` ticks of an untouched match
pub fn run(settings: Settings, ticks: u64) -> HeadlessReport {
    let mut session = Session::new(settings);
    let mut buffer = CommandBuffer::default();
    let mut player1_hits = 0;
    let mut player2_hits = 0;

    for _ in 0..ticks {
        if let TickOutcome::Advanced { events } = session.tick(&mut buffer) {
            for event in events {
                match event.player {
                    Player::One => player1_hits += 1,
                    Player::Two => player2_hits += 1,
                }
            }
        }
    }

    log::info!(
        "Headless run: {} ticks, hits {}/{}, score {}",
        ticks,
        player1_hits,
        player2_hits,
        session.state().score.label()
    );

    HeadlessReport {
        ticks,
        frames: buffer.frames(),
        player1_hits,
        player2_hits,
        final_state: session.state().clone(),
        last_label: buffer.score_text().map(str::to_owned),
    }
}
