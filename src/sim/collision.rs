//! Collision detection for axis-aligned boxes
//!
//! Both sides of every test are shrunk toward their center first, so a hit
//! only registers once the sprites visibly overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, `pos` is the top-left corner (canvas y grows down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Same center, each side scaled by `factor`
    pub fn shrunk(&self, factor: f32) -> Rect {
        let size = self.size * factor;
        Rect {
            pos: self.center() - size * 0.5,
            size,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Anything with a position and a bounding box
pub trait Bounded {
    fn bounds(&self) -> Rect;

    /// Hitbox used for collision tests
    fn hitbox(&self, scale: f32) -> Rect {
        self.bounds().shrunk(scale)
    }
}

impl Bounded for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Forgiving overlap test between two bounded things
pub fn hitboxes_overlap(a: &impl Bounded, b: &impl Bounded, scale: f32) -> bool {
    a.hitbox(scale).overlaps(&b.hitbox(scale))
}
