//! PunchHole - Front camera cutout geometry
//!
//! Computes the screen rectangle covered by a punch hole camera from the
//! vendor cutout descriptor, the display rotation and size, and the cutout
//! bounds reported by the OS.

pub mod config;
pub mod cutout;
pub mod feature;
pub mod geometry;

pub use cutout::{CutoutDescriptor, DisplaySnapshot, Platform, PunchHole};
pub use geometry::{Rect, RealSize, Rotation};
