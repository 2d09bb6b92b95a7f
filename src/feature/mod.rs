//! Feature module - Vendor capability store access
//!
//! This module provides:
//! - The `FeatureSource` lookup contract
//! - A live table backed by the vendor floating-feature file
//! - A stub that answers every lookup with its default

mod stub;
mod table;
mod traits;

pub use stub::StubFeatureSource;
pub use table::FeatureTable;
pub use traits::*;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key holding the punch hole descriptor string
pub const PUNCH_HOLE_KEY: &str = "SEC_FLOATING_FEATURE_LOCKSCREEN_CONFIG_PUNCHHOLE_VI";

/// Key set on foldable (dual display) devices
pub const FOLDABLE_KEY: &str = "SEC_FLOATING_FEATURE_FRAMEWORK_SUPPORT_FOLDABLE_TYPE_FOLD";

/// Where the vendor ships its floating-feature file
pub const SYSTEM_FEATURE_FILE: &str = "/system/etc/floating_feature.xml";

/// Floating-feature file to read when none is configured
pub fn default_feature_file() -> Option<PathBuf> {
    #[cfg(target_os = "android")]
    return Some(PathBuf::from(SYSTEM_FEATURE_FILE));

    #[cfg(not(target_os = "android"))]
    return None;
}

/// Open the capability store for this host.
///
/// Reads `file` (or the platform default) once and layers `overrides` on top.
/// An unreadable file degrades to the values that are available; with nothing
/// available at all the stub source is returned.
pub fn open_source(
    file: Option<&Path>,
    overrides: &HashMap<String, String>,
) -> Box<dyn FeatureSource> {
    let path = file.map(Path::to_path_buf).or_else(default_feature_file);

    let mut table = match path {
        Some(path) => match FeatureTable::load(&path) {
            Ok(table) => Some(table),
            Err(e) => {
                tracing::warn!("Failed to read feature file: {}", e);
                None
            }
        },
        None => None,
    };

    if !overrides.is_empty() {
        table
            .get_or_insert_with(FeatureTable::new)
            .extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    match table {
        Some(table) => Box::new(table),
        None => {
            tracing::debug!("No vendor feature store available, using stub");
            Box::new(StubFeatureSource::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_open_without_anything_is_stub() {
        let source = open_source(
            Some(Path::new("/nonexistent/floating_feature.xml")),
            &HashMap::new(),
        );
        assert_eq!(source.name(), "stub");
        assert_eq!(source.get_string(PUNCH_HOLE_KEY), "");
    }

    #[test]
    fn test_open_with_overrides_only() {
        let mut overrides = HashMap::new();
        overrides.insert(PUNCH_HOLE_KEY.to_string(), "type:circle".to_string());

        let source = open_source(Some(Path::new("/nonexistent/floating_feature.xml")), &overrides);
        assert_eq!(source.name(), "floating-feature");
        assert_eq!(source.get_string(PUNCH_HOLE_KEY), "type:circle");
    }

    #[test]
    fn test_open_file_with_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "<Set><{key}>pos:0.5:0.1</{key}><{fold}>TRUE</{fold}></Set>",
            key = PUNCH_HOLE_KEY,
            fold = FOLDABLE_KEY
        )
        .unwrap();

        let mut overrides = HashMap::new();
        overrides.insert(FOLDABLE_KEY.to_string(), "false".to_string());

        let source = open_source(Some(file.path()), &overrides);
        assert_eq!(source.get_string(PUNCH_HOLE_KEY), "pos:0.5:0.1");
        assert!(!source.get_boolean(FOLDABLE_KEY));
    }
}
