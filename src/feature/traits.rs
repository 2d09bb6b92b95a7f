//! Feature source trait definitions
//!
//! Defines the narrow read-only contract the cutout logic needs from the
//! vendor capability store.

use std::path::PathBuf;
use thiserror::Error;

/// Value returned for string keys that are missing or unreadable
pub const DEFAULT_STRING_VALUE: &str = "";

/// Value returned for boolean keys that are missing or unreadable
pub const DEFAULT_BOOLEAN_VALUE: bool = false;

/// Errors that can occur while opening a feature source
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("Feature file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type FeatureResult<T> = Result<T, FeatureError>;

/// Read-only key/value capability store.
///
/// Lookups never fail: a missing key or an unavailable store yields the
/// default value.
pub trait FeatureSource: Send + Sync {
    /// Get a string value, or `""` when unavailable
    fn get_string(&self, key: &str) -> String;

    /// Get a boolean value, or `false` when unavailable
    fn get_boolean(&self, key: &str) -> bool;

    /// Short name used in logs and diagnostics
    fn name(&self) -> &'static str;
}

impl<T: FeatureSource + ?Sized> FeatureSource for &T {
    fn get_string(&self, key: &str) -> String {
        (**self).get_string(key)
    }

    fn get_boolean(&self, key: &str) -> bool {
        (**self).get_boolean(key)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: FeatureSource + ?Sized> FeatureSource for Box<T> {
    fn get_string(&self, key: &str) -> String {
        (**self).get_string(key)
    }

    fn get_boolean(&self, key: &str) -> bool {
        (**self).get_boolean(key)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
