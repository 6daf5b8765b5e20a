//! Data-driven game balance
//!
//! Defaults mirror `crate::consts`. A page can override any subset of the
//! values with a JSON document; missing fields keep their defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Highest game loop rate; keeps the frame period at or above 1 ms
pub const MAX_FRAME_HZ: f64 = 1000.0;
/// Longest countdown accepted from an override
pub const MAX_COUNTDOWN_STEPS: u32 = 10;

/// Reasons a tuning document is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Arena size used when the canvas reports none
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    pub player_start: Vec2,
    pub player_size: f32,
    /// Units per frame
    pub player_speed: f32,

    // === Enemy ===
    pub enemy_size: f32,
    /// Units per frame in phase 1
    pub enemy_base_speed: f32,
    /// Added per phase after the first
    pub enemy_speed_step: f32,
    /// Spawn re-rolls allowed while the enemy would overlap the player
    pub spawn_attempts: u32,

    // === Timing ===
    pub phase_seconds: u32,
    pub frame_hz: f64,
    pub dialogue_ms: f64,
    pub countdown_steps: u32,
    pub countdown_step_ms: f64,
    pub go_marker_ms: f64,
    pub restart_delay_ms: f64,

    /// One line per phase; the number of lines is the number of phases
    pub dialogues: Vec<String>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,

            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,

            enemy_size: ENEMY_SIZE,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_step: ENEMY_SPEED_STEP,
            spawn_attempts: 16,

            phase_seconds: PHASE_SECONDS,
            frame_hz: FRAME_HZ,
            dialogue_ms: DIALOGUE_MS,
            countdown_steps: COUNTDOWN_STEPS,
            countdown_step_ms: COUNTDOWN_STEP_MS,
            go_marker_ms: GO_MARKER_MS,
            restart_delay_ms: RESTART_DELAY_MS,

            dialogues: vec![
                "Run... while you still can.".to_string(),
                "It's getting closer...".to_string(),
                "You can't escape this time...".to_string(),
            ],
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Use the override when it is present and valid, defaults otherwise
    pub fn load_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.map(str::trim).filter(|s| !s.is_empty()) else {
            log::info!("Using default tuning");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override ({} phases)", tuning.phase_count());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.canvas_width > 0.0 && self.canvas_height > 0.0) {
            return invalid("canvas_width/canvas_height", "must be positive");
        }
        if !(self.player_size > 0.0) {
            return invalid("player_size", "must be positive");
        }
        if !(self.enemy_size > 0.0) {
            return invalid("enemy_size", "must be positive");
        }
        if !(self.player_speed >= 0.0) {
            return invalid("player_speed", "must not be negative");
        }
        if !(self.enemy_base_speed >= 0.0 && self.enemy_speed_step >= 0.0) {
            return invalid("enemy_base_speed/enemy_speed_step", "must not be negative");
        }
        if self.phase_seconds == 0 {
            return invalid("phase_seconds", "must be at least 1");
        }
        if !(self.frame_hz > 0.0 && self.frame_hz <= MAX_FRAME_HZ) {
            return invalid("frame_hz", "must be in (0, 1000]");
        }
        if self.countdown_steps > MAX_COUNTDOWN_STEPS {
            return invalid("countdown_steps", "must be at most 10");
        }
        let delays = [
            self.dialogue_ms,
            self.countdown_step_ms,
            self.go_marker_ms,
            self.restart_delay_ms,
        ];
        if delays.iter().any(|d| !(*d >= 0.0)) {
            return invalid("*_ms", "delays must not be negative");
        }
        if self.dialogues.is_empty() {
            return invalid("dialogues", "need at least one phase");
        }
        Ok(())
    }

    /// Number of phases to survive
    pub fn phase_count(&self) -> u32 {
        self.dialogues.len() as u32
    }

    /// Dialogue line for a 1-based phase
    pub fn dialogue(&self, phase: u32) -> &str {
        let idx = phase.saturating_sub(1) as usize;
        self.dialogues.get(idx).map(String::as_str).unwrap_or("")
    }

    /// Enemy speed for a 1-based phase: base + (phase - 1) * step
    pub fn enemy_speed(&self, phase: u32) -> f32 {
        self.enemy_base_speed + phase.saturating_sub(1) as f32 * self.enemy_speed_step
    }

    /// Game loop period in milliseconds
    pub fn frame_period_ms(&self) -> f64 {
        1000.0 / self.frame_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.phase_count(), 3);
        assert!((tuning.frame_period_ms() - 1000.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_enemy_speed_per_phase() {
        let tuning = Tuning::default();
        assert_eq!(tuning.enemy_speed(1), 1.5);
        assert_eq!(tuning.enemy_speed(2), 2.0);
        assert_eq!(tuning.enemy_speed(3), 2.5);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "phase_seconds": 5, "player_start": [10.0, 20.0] }"#)
            .unwrap();
        assert_eq!(tuning.phase_seconds, 5);
        assert_eq!(tuning.player_start, Vec2::new(10.0, 20.0));
        assert_eq!(tuning.player_speed, PLAYER_SPEED);
        assert_eq!(tuning.dialogues.len(), 3);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "phase_seconds": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "phase_seconds", .. }));

        let err = Tuning::from_json(r#"{ "dialogues": [] }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "dialogues", .. }));

        let err = Tuning::from_json(r#"{ "frame_hz": 1e20 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "frame_hz", .. }));

        let err = Tuning::from_json(r#"{ "countdown_steps": 4294967295 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "countdown_steps", .. }));
        assert!(Tuning::from_json(r#"{ "countdown_steps": 10 }"#).is_ok());

        let err = Tuning::from_json("not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        assert_eq!(Tuning::load_or_default(None), Tuning::default());
        assert_eq!(Tuning::load_or_default(Some("  ")), Tuning::default());
        assert_eq!(Tuning::load_or_default(Some("{ broken")), Tuning::default());

        let tuning = Tuning::load_or_default(Some(r#"{ "dialogues": ["only one"] }"#));
        assert_eq!(tuning.phase_count(), 1);
        assert_eq!(tuning.dialogue(1), "only one");
    }
}
