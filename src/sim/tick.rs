//! One game loop iteration
//!
//! Movement is tick-based: speeds are units per frame, independent of how
//! much wall time elapsed.

use super::actor::{Actor, Arena};
use super::collision::actors_collide;
use super::input::InputState;

/// Result of a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Enemy touched the player
    pub caught: bool,
}

/// Move the player from held arrows, clamped to the arena
pub fn move_player(player: &mut Actor, input: &InputState, arena: &Arena) {
    let dir = input.arrow_axis();
    player.step_clamped(dir, arena);
}

/// Advance both actors one frame and test for a catch
pub fn step_frame(
    player: &mut Actor,
    enemy: &mut Actor,
    input: &InputState,
    arena: &Arena,
) -> FrameOutcome {
    move_player(player, input, arena);

    if enemy.moving {
        enemy.chase_step(player.pos);
    }

    FrameOutcome {
        caught: actors_collide(player, enemy),
    }
}
