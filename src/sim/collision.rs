//! Axis-aligned bounding box collision
//!
//! Every entity collides as a rectangle anchored at its top-left corner.
//! Platforms push the player out along whichever axis penetrates least.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left position + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Anything that occupies a rectangle in the world
pub trait Bounds {
    fn bounds(&self) -> Rect;

    fn collides_with(&self, other: &impl Bounds) -> bool {
        collides_with(&self.bounds(), &other.bounds())
    }
}

impl Bounds for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// Strict AABB overlap; rectangles that only share an edge do not collide
#[inline]
pub fn collides_with(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}

/// How a body was pushed out of a platform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Pushed out sideways; `x` is the new left edge, horizontal velocity is cancelled
    Horizontal { x: f32 },
    /// Pushed up onto the platform's top surface
    Landed { y: f32 },
    /// Pushed down below the platform (head bump)
    Ceiling { y: f32 },
}

/// Resolve a body overlapping a platform along the axis of least penetration.
///
/// Equal penetration on both axes resolves horizontally. That tie-break is
/// arbitrary but kept stable so replays stay identical.
pub fn resolve_platform_collision(body: &Rect, platform: &Rect) -> Resolution {
    let overlap_x = (body.right() - platform.left()).min(platform.right() - body.left());
    let overlap_y = (body.bottom() - platform.top()).min(platform.bottom() - body.top());

    if overlap_x <= overlap_y {
        if body.left() < platform.left() {
            Resolution::Horizontal {
                x: platform.left() - body.size.x,
            }
        } else {
            Resolution::Horizontal { x: platform.right() }
        }
    } else if body.top() < platform.top() {
        Resolution::Landed {
            y: platform.top() - body.size.y,
        }
    } else {
        Resolution::Ceiling { y: platform.bottom() }
    }
}
