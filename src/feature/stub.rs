//! Feature source for hosts without a vendor capability store

use super::traits::{FeatureSource, DEFAULT_BOOLEAN_VALUE, DEFAULT_STRING_VALUE};

/// Answers every lookup with the default value
#[derive(Debug, Clone, Copy, Default)]
pub struct StubFeatureSource;

impl StubFeatureSource {
    pub fn new() -> Self {
        Self
    }
}

impl FeatureSource for StubFeatureSource {
    fn get_string(&self, _key: &str) -> String {
        DEFAULT_STRING_VALUE.to_string()
    }

    fn get_boolean(&self, _key: &str) -> bool {
        DEFAULT_BOOLEAN_VALUE
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
