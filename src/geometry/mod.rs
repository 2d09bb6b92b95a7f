//! Geometry module
//!
//! Handles:
//! - Integer screen rectangles with platform rect semantics
//! - Display rotation and the cutout edge each rotation faces
//! - Fractional points used by vendor cutout descriptors

mod rect;

pub use rect::Rect;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when decoding geometry values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Invalid rotation: {0} (expected 0, 90, 180 or 270)")]
    InvalidRotation(u32),
}

/// A point of two fractional values
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Real display size in pixels, as reported for the current rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealSize {
    pub width: u32,
    pub height: u32,
}

impl RealSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Screen edge identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ScreenEdge {
    Left = 0,
    Right = 1,
    Top = 2,
    Bottom = 3,
}

/// Display rotation relative to the natural orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Decode a rotation given in degrees
    pub fn from_degrees(degrees: u32) -> Result<Self, GeometryError> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(GeometryError::InvalidRotation(other)),
        }
    }

    pub fn degrees(&self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Edge the front camera faces in this rotation.
    ///
    /// Upside-down has no edge: cutout geometry is not defined there.
    pub fn cutout_edge(&self) -> Option<ScreenEdge> {
        match self {
            Rotation::Deg0 => Some(ScreenEdge::Top),
            Rotation::Deg90 => Some(ScreenEdge::Left),
            Rotation::Deg270 => Some(ScreenEdge::Right),
            Rotation::Deg180 => None,
        }
    }
}

impl TryFrom<u32> for Rotation {
    type Error = GeometryError;

    fn try_from(degrees: u32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(degrees)
    }
}

impl From<Rotation> for u32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
