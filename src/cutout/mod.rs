//! Cutout module
//!
//! Handles:
//! - Parsing the vendor punch hole descriptor
//! - Snapshotting the display state a query runs against
//! - Resolving the on-screen punch hole rectangle

mod descriptor;
mod display;
mod platform;
mod resolver;

pub use descriptor::{CutoutDescriptor, DescriptorError, DescriptorResult, CIRCLE_SHAPE};
pub use display::{CutoutBounds, DisplayProvider, DisplaySnapshot, StaticDisplay};
pub use platform::{Platform, MIN_CUTOUT_SDK, VENDOR_MANUFACTURER};
pub use resolver::{PunchHole, CENTER_TOLERANCE};
