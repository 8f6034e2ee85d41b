//! Collision detection and response for axis-aligned geometry
//!
//! Everything in the field is a rectangle except the balls. The overlap test
//! works on the ball's bounding box rather than true closest-point distance,
//! so a ball grazing a rectangle corner diagonally counts as a hit. At the
//! speeds and sizes used here (ball radius 10, speed at most 14 px/frame)
//! that is indistinguishable in play.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Axis along which a collision is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Side hit: flip the horizontal velocity
    Horizontal,
    /// Top/bottom hit: flip the vertical velocity
    Vertical,
}

/// Penetration of a ball's bounding box past each edge of a rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlaps {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Overlaps {
    /// Measure how far the ball's bounding box reaches past each rect edge
    pub fn measure(center: Vec2, radius: f32, rect: &Rect) -> Self {
        Self {
            left: center.x + radius - rect.x,
            right: rect.right() - (center.x - radius),
            top: center.y + radius - rect.y,
            bottom: rect.bottom() - (center.y - radius),
        }
    }

    pub fn resolve(&self) -> Axis {
        resolve_axis(self.left, self.right, self.top, self.bottom)
    }
}

/// Check whether a ball overlaps a rectangle (edge-overlap test, strict)
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    center.x + radius > rect.x
        && center.x - radius < rect.right()
        && center.y + radius > rect.y
        && center.y - radius < rect.bottom()
}

/// Pick the axis with the smaller minimum overlap.
///
/// Horizontal only wins when strictly smaller; equal overlaps resolve
/// vertically.
pub fn resolve_axis(
    overlap_left: f32,
    overlap_right: f32,
    overlap_top: f32,
    overlap_bottom: f32,
) -> Axis {
    let min_x = overlap_left.min(overlap_right);
    let min_y = overlap_top.min(overlap_bottom);
    if min_x < min_y {
        Axis::Horizontal
    } else {
        Axis::Vertical
    }
}

/// Flip velocity along the given axis
#[inline]
pub fn reflect_axis(velocity: Vec2, axis: Axis) -> Vec2 {
    match axis {
        Axis::Horizontal => Vec2::new(-velocity.x, velocity.y),
        Axis::Vertical => Vec2::new(velocity.x, -velocity.y),
    }
}

/// Check whether a descending ball touches the paddle.
///
/// The horizontal test uses the ball center only, so a ball whose center is
/// past the paddle end falls by.
pub fn ball_paddle_contact(center: Vec2, radius: f32, velocity: Vec2, paddle: &Rect) -> bool {
    center.y + radius >= paddle.y
        && center.y - radius <= paddle.bottom()
        && center.x >= paddle.x
        && center.x <= paddle.right()
        && velocity.y > 0.0
}

/// Check whether two rectangles touch (inclusive edges)
pub fn rects_touch(a: &Rect, b: &Rect) -> bool {
    a.x <= b.right() && a.right() >= b.x && a.y <= b.bottom() && a.bottom() >= b.y
}
