//! Player and enemy entities, and the arena they move in

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::clamp_square;
use crate::tuning::Tuning;

/// The canvas area actors live in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Largest top-left corner a square of `size` can have
    pub fn max_origin(&self, size: f32) -> Vec2 {
        Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        )
    }

    pub fn clamp(&self, pos: Vec2, size: f32) -> Vec2 {
        clamp_square(pos, size, self.width, self.height)
    }

    pub fn contains(&self, pos: Vec2, size: f32) -> bool {
        let max = self.max_origin(size);
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= max.x && pos.y <= max.y
    }
}

impl From<&Tuning> for Arena {
    fn from(tuning: &Tuning) -> Self {
        Self::new(tuning.canvas_width, tuning.canvas_height)
    }
}

/// A square entity (player or enemy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: Vec2,
    /// Side length
    pub size: f32,
    /// Units moved per frame along each axis
    pub speed: f32,
    /// Whether the actor may move on its own (enemy only)
    pub moving: bool,
}

impl Actor {
    /// Player at its start position
    pub fn player(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.player_start,
            size: tuning.player_size,
            speed: tuning.player_speed,
            moving: false,
        }
    }

    /// Enemy for a 1-based phase, parked until the countdown finishes
    pub fn enemy(tuning: &Tuning, phase: u32, pos: Vec2) -> Self {
        Self {
            pos,
            size: tuning.enemy_size,
            speed: tuning.enemy_speed(phase),
            moving: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    /// Move by `dir * speed` and keep the whole square inside the arena
    pub fn step_clamped(&mut self, dir: Vec2, arena: &Arena) {
        self.pos = arena.clamp(self.pos + dir * self.speed, self.size);
    }

    /// One greedy step toward `target`, each axis independently.
    ///
    /// Diagonal closing speed is `speed * sqrt(2)`; the step is not normalized
    /// and may overshoot when closer than `speed` on an axis.
    pub fn chase_step(&mut self, target: Vec2) {
        if self.pos.x < target.x {
            self.pos.x += self.speed;
        } else if self.pos.x > target.x {
            self.pos.x -= self.speed;
        }

        if self.pos.y < target.y {
            self.pos.y += self.speed;
        } else if self.pos.y > target.y {
            self.pos.y -= self.speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_defaults() {
        let player = Actor::player(&Tuning::default());
        assert_eq!(player.pos, Vec2::new(250.0, 250.0));
        assert_eq!(player.size, 80.0);
        assert_eq!(player.speed, 5.0);
    }

    #[test]
    fn test_enemy_starts_parked() {
        let enemy = Actor::enemy(&Tuning::default(), 2, Vec2::new(10.0, 10.0));
        assert!(!enemy.moving);
        assert_eq!(enemy.speed, 2.0);
    }

    #[test]
    fn test_step_clamped_stops_at_edges() {
        let arena = Arena::new(100.0, 100.0);
        let mut actor = Actor {
            pos: Vec2::new(2.0, 78.0),
            size: 20.0,
            speed: 5.0,
            moving: false,
        };
        actor.step_clamped(Vec2::new(-1.0, 1.0), &arena);
        assert_eq!(actor.pos, Vec2::new(0.0, 80.0));
        assert!(arena.contains(actor.pos, actor.size));
    }

    #[test]
    fn test_chase_step_axis_aligned() {
        let mut enemy = Actor {
            pos: Vec2::new(0.0, 50.0),
            size: 10.0,
            speed: 2.0,
            moving: true,
        };
        // Diagonal: both axes move a full step
        enemy.chase_step(Vec2::new(10.0, 60.0));
        assert_eq!(enemy.pos, Vec2::new(2.0, 52.0));

        // Aligned on y: only x moves
        enemy.chase_step(Vec2::new(10.0, 52.0));
        assert_eq!(enemy.pos, Vec2::new(4.0, 52.0));

        // Target behind: moves back
        enemy.chase_step(Vec2::new(0.0, 0.0));
        assert_eq!(enemy.pos, Vec2::new(2.0, 50.0));
    }

    #[test]
    fn test_arena_smaller_than_actor() {
        let arena = Arena::new(10.0, 10.0);
        assert_eq!(arena.max_origin(20.0), Vec2::ZERO);
        assert_eq!(arena.clamp(Vec2::new(5.0, -3.0), 20.0), Vec2::ZERO);
    }
}
