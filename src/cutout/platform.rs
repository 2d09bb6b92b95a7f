//! Device gate for the punch hole feature

use serde::{Deserialize, Serialize};

/// First SDK level that reports display cutouts per edge
pub const MIN_CUTOUT_SDK: u32 = 29;

/// Manufacturer whose vendor store carries punch hole descriptors
pub const VENDOR_MANUFACTURER: &str = "samsung";

/// Identity of the device the query runs on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub manufacturer: String,
    pub sdk_int: u32,
}

impl Platform {
    pub fn new(manufacturer: impl Into<String>, sdk_int: u32) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            sdk_int,
        }
    }

    pub fn is_vendor_device(&self) -> bool {
        self.manufacturer.eq_ignore_ascii_case(VENDOR_MANUFACTURER)
    }

    /// Whether the OS reports cutout bounding rects
    pub fn supports_cutout_bounds(&self) -> bool {
        self.sdk_int >= MIN_CUTOUT_SDK
    }

    /// Whether punch hole detection is worth attempting at all
    pub fn supports_punch_hole(&self) -> bool {
        self.is_vendor_device() && self.supports_cutout_bounds()
    }
}
