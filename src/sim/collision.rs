//! Axis-aligned bounding box overlap
//!
//! Boxes that only share an edge do not collide; any positive overlap on
//! both axes does.

use glam::Vec2;

use super::actor::Actor;

/// Axis-aligned box given by its min and max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square with top-left corner `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::splat(size),
        }
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Whether two actors' boxes overlap
pub fn actors_collide(a: &Actor, b: &Actor) -> bool {
    a.bounds().overlaps(&b.bounds())
}
