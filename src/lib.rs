//! Phase Chase - a three-phase canvas chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actors, scheduler, phase state machine)
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser glue (DOM views, canvas, sprites, input), wasm32 only

#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GamePhase, Outcome, Screen, Session};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target game loop rate
    pub const FRAME_HZ: f64 = 60.0;
    /// Phase timer period (one countdown unit)
    pub const PHASE_TIMER_MS: f64 = 1000.0;

    /// Canvas size used when the page does not provide one
    pub const DEFAULT_CANVAS_WIDTH: f32 = 600.0;
    pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_START_X: f32 = 250.0;
    pub const PLAYER_START_Y: f32 = 250.0;
    pub const PLAYER_SIZE: f32 = 80.0;
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Enemy defaults (speed grows linearly with the phase number)
    pub const ENEMY_SIZE: f32 = 80.0;
    pub const ENEMY_BASE_SPEED: f32 = 1.5;
    pub const ENEMY_SPEED_STEP: f32 = 0.5;

    /// Seconds the player must survive per phase
    pub const PHASE_SECONDS: u32 = 10;
    /// Dialogue display time before the countdown
    pub const DIALOGUE_MS: f64 = 1000.0;
    /// Numeric countdown steps ("3", "2", "1")
    pub const COUNTDOWN_STEPS: u32 = 3;
    pub const COUNTDOWN_STEP_MS: f64 = 1000.0;
    /// How long the "Go!" marker stays up once play starts
    pub const GO_MARKER_MS: f64 = 1000.0;
    /// Delay before a lost session restarts on its own
    pub const RESTART_DELAY_MS: f64 = 2000.0;
}

/// Clamp a square's top-left corner so the square stays inside `[0, w] x [0, h]`
#[inline]
pub fn clamp_square(pos: Vec2, size: f32, width: f32, height: f32) -> Vec2 {
    let max = Vec2::new((width - size).max(0.0), (height - size).max(0.0));
    pos.clamp(Vec2::ZERO, max)
}
