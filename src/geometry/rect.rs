//! Integer screen rectangle
//!
//! Mirrors the platform rect the OS reports cutout bounds in: edges are
//! inclusive on the left/top and exclusive on the right/bottom, and a rect is
//! empty whenever it has no area.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// The canonical empty rectangle
    pub const EMPTY: Rect = Rect {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Square of side `2 * radius` around a center point
    pub fn around(center_x: i32, center_y: i32, radius: i32) -> Self {
        let mut rect = Rect::new(center_x, center_y, center_x, center_y);
        rect.inset(-radius, -radius);
        rect
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn center_x(&self) -> i32 {
        midpoint(self.left, self.right)
    }

    pub fn center_y(&self) -> i32 {
        midpoint(self.top, self.bottom)
    }

    /// Move every edge inwards; negative values grow the rect.
    ///
    /// Edges saturate at the `i32` range.
    pub fn inset(&mut self, dx: i32, dy: i32) {
        self.left = self.left.saturating_add(dx);
        self.top = self.top.saturating_add(dy);
        self.right = self.right.saturating_sub(dx);
        self.bottom = self.bottom.saturating_sub(dy);
    }

    /// Collapse any degenerate rect to the canonical empty one
    pub fn normalized(self) -> Self {
        if self.is_empty() {
            Rect::EMPTY
        } else {
            self
        }
    }
}

/// Floor of the midpoint, without overflowing
fn midpoint(a: i32, b: i32) -> i32 {
    ((i64::from(a) + i64::from(b)) >> 1) as i32
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "empty")
        } else {
            write!(f, "{},{},{},{}", self.left, self.top, self.right, self.bottom)
        }
    }
}
