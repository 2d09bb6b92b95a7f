//! Display state consumed by the cutout resolver

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, RealSize, Rotation, ScreenEdge};

/// Cutout bounding rects reported by the OS, one per screen edge.
///
/// An edge without a cutout reports the empty rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CutoutBounds {
    #[serde(default)]
    pub top: Rect,
    #[serde(default)]
    pub left: Rect,
    #[serde(default)]
    pub right: Rect,
    #[serde(default)]
    pub bottom: Rect,
}

impl CutoutBounds {
    pub fn edge(&self, edge: ScreenEdge) -> Rect {
        match edge {
            ScreenEdge::Top => self.top,
            ScreenEdge::Left => self.left,
            ScreenEdge::Right => self.right,
            ScreenEdge::Bottom => self.bottom,
        }
    }
}

/// Everything the resolver reads from the display for one query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplaySnapshot {
    pub rotation: Rotation,
    pub real_size: RealSize,
    /// `None` when the platform exposes no cutout information at all
    pub cutout: Option<CutoutBounds>,
}

impl DisplaySnapshot {
    pub fn new(rotation: Rotation, real_size: RealSize, cutout: Option<CutoutBounds>) -> Self {
        Self {
            rotation,
            real_size,
            cutout,
        }
    }

    /// OS rect for the edge the camera faces in the current rotation
    pub fn reference_bounds(&self) -> Option<Rect> {
        let edge = self.rotation.cutout_edge()?;
        self.cutout.map(|bounds| bounds.edge(edge))
    }
}

/// Source of live display state
pub trait DisplayProvider {
    /// Current display state
    fn snapshot(&self) -> DisplaySnapshot;

    /// Camera margin below the status bar top, if the platform knows it
    fn camera_top_margin(&self) -> Option<i32>;
}

/// Display provider with fixed state, e.g. from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticDisplay {
    snapshot: DisplaySnapshot,
    camera_top_margin: Option<i32>,
}

impl StaticDisplay {
    /// A negative margin means the margin is unavailable
    pub fn new(snapshot: DisplaySnapshot, camera_top_margin: Option<i32>) -> Self {
        Self {
            snapshot,
            camera_top_margin: camera_top_margin.filter(|margin| *margin >= 0),
        }
    }
}

impl DisplayProvider for StaticDisplay {
    fn snapshot(&self) -> DisplaySnapshot {
        self.snapshot
    }

    fn camera_top_margin(&self) -> Option<i32> {
        self.camera_top_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_bounds_follow_rotation() {
        let bounds = CutoutBounds {
            top: Rect::new(500, 0, 580, 80),
            left: Rect::new(0, 500, 80, 580),
            right: Rect::new(2320, 500, 2400, 580),
            bottom: Rect::EMPTY,
        };
        let size = RealSize::new(1080, 2400);

        let snapshot = DisplaySnapshot::new(Rotation::Deg0, size, Some(bounds));
        assert_eq!(snapshot.reference_bounds(), Some(bounds.top));

        let snapshot = DisplaySnapshot::new(Rotation::Deg90, RealSize::new(2400, 1080), Some(bounds));
        assert_eq!(snapshot.reference_bounds(), Some(bounds.left));

        let snapshot = DisplaySnapshot::new(Rotation::Deg270, RealSize::new(2400, 1080), Some(bounds));
        assert_eq!(snapshot.reference_bounds(), Some(bounds.right));

        let snapshot = DisplaySnapshot::new(Rotation::Deg180, size, Some(bounds));
        assert_eq!(snapshot.reference_bounds(), None);

        let snapshot = DisplaySnapshot::new(Rotation::Deg0, size, None);
        assert_eq!(snapshot.reference_bounds(), None);
    }

    #[test]
    fn test_static_display_drops_negative_margin() {
        let snapshot = DisplaySnapshot::new(Rotation::Deg0, RealSize::new(1080, 2400), None);
        assert_eq!(StaticDisplay::new(snapshot, Some(-1)).camera_top_margin(), None);
        assert_eq!(StaticDisplay::new(snapshot, Some(12)).camera_top_margin(), Some(12));
    }
}
