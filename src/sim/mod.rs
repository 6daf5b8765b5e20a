//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual time only (the platform pumps wall time in)
//! - Seeded RNG only
//! - Tick-based movement
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod input;
pub mod schedule;
pub mod sequencer;
pub mod session;
pub mod state;
pub mod tick;

pub use actor::{Actor, Arena};
pub use collision::{Aabb, actors_collide};
pub use input::InputState;
pub use schedule::{Scheduler, Task, TaskHandle};
pub use sequencer::{Sequencer, Step};
pub use session::Session;
pub use state::{GameEvent, GamePhase, Outcome, Screen};
pub use tick::{FrameOutcome, step_frame};
