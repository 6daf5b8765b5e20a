//! Game state enums and presentation events

use serde::{Deserialize, Serialize};

/// Where the current phase is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing running (home screen)
    Idle,
    /// Phase dialogue on screen
    DialogueShowing,
    /// Countdown number on screen
    CountingDown { remaining: u32 },
    /// Player and enemy moving, timer running
    Active,
    /// Every phase survived
    Won,
    /// Caught by the enemy
    Lost,
}

impl GamePhase {
    /// Dialogue or countdown
    pub fn is_intro(&self) -> bool {
        matches!(self, GamePhase::DialogueShowing | GamePhase::CountingDown { .. })
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Visible view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Home,
    Game,
    Result,
}

impl Screen {
    /// DOM id of the view element
    pub fn element_id(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Game => "game",
            Screen::Result => "result",
        }
    }

    pub const ALL: [Screen; 3] = [Screen::Home, Screen::Game, Screen::Result];
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Won => "You won!",
            Outcome::Lost => "You lost!",
        }
    }
}

/// Presentation changes, drained by the platform after each pump
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ShowScreen(Screen),
    ShowDialogue(String),
    ShowCountdown(u32),
    ShowGo,
    HideOverlay,
    /// Seconds left in the phase
    TimeLeft(u32),
    /// Actors moved (or may have); repaint the canvas
    Redraw,
    Outcome(Outcome),
}
