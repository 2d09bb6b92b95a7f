//! Feature table backed by the vendor floating-feature file
//!
//! The vendor store is a flat XML document: one root element holding leaf
//! elements whose tag is the key and whose text is the value, e.g.
//!
//! ```text
//! <SecFloatingFeatureSet>
//!     <SEC_FLOATING_FEATURE_LOCKSCREEN_CONFIG_PUNCHHOLE_VI>pos:0.5:0.02,size:0.05:0.05,type:circle</SEC_FLOATING_FEATURE_LOCKSCREEN_CONFIG_PUNCHHOLE_VI>
//! </SecFloatingFeatureSet>
//! ```

use std::collections::HashMap;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::traits::{
    FeatureError, FeatureResult, FeatureSource, DEFAULT_BOOLEAN_VALUE, DEFAULT_STRING_VALUE,
};

/// In-memory snapshot of a vendor capability store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureTable {
    values: HashMap<String, String>,
}

impl FeatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a floating-feature file
    pub fn load(path: &Path) -> FeatureResult<Self> {
        if !path.exists() {
            return Err(FeatureError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path)?;
        let table = Self::from_xml(&contents);
        tracing::debug!("Loaded {} feature(s) from {:?}", table.len(), path);
        Ok(table)
    }

    /// Extract every leaf element of a floating-feature document.
    ///
    /// Only direct children of the root are read. Parsing stops at the first
    /// syntax error; entries completed before it are kept.
    pub fn from_xml(document: &str) -> Self {
        let mut values = HashMap::new();
        let mut reader = Reader::from_str(document);
        reader.trim_text(true);

        let mut depth = 0usize;
        // Key and text of the open root child, dropped if it has children
        let mut leaf: Option<(String, String)> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(element)) => {
                    depth += 1;
                    leaf = (depth == 2).then(|| (element_name(&element), String::new()));
                }
                Ok(Event::Empty(element)) => {
                    if depth == 1 {
                        values.insert(element_name(&element), String::new());
                    } else if depth == 2 {
                        leaf = None;
                    }
                }
                Ok(Event::Text(text)) => {
                    if let Some((_, value)) = leaf.as_mut() {
                        match text.unescape() {
                            Ok(unescaped) => value.push_str(&unescaped),
                            Err(e) => {
                                tracing::warn!("Bad entity in floating-feature text: {}", e);
                                leaf = None;
                            }
                        }
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some((_, value)) = leaf.as_mut() {
                        value.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Ok(Event::End(_)) => {
                    if depth == 2 {
                        if let Some((key, value)) = leaf.take() {
                            values.insert(key, value.trim().to_string());
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        "Malformed floating-feature document at byte {}: {}",
                        reader.buffer_position(),
                        e
                    );
                    break;
                }
            }
        }

        Self { values }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Overlay explicit values; they win over anything already present
    pub fn extend<I, K, V>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FeatureSource for FeatureTable {
    fn get_string(&self, key: &str) -> String {
        self.get(key)
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_STRING_VALUE.to_string())
    }

    fn get_boolean(&self, key: &str) -> bool {
        self.get(key)
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(DEFAULT_BOOLEAN_VALUE)
    }

    fn name(&self) -> &'static str {
        "floating-feature"
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FeatureTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = FeatureTable::new();
        table.extend(iter);
        table
    }
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{FOLDABLE_KEY, PUNCH_HOLE_KEY};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>
<SecFloatingFeatureSet>
    <!-- display <configuration> -->
    <SEC_FLOATING_FEATURE_LOCKSCREEN_CONFIG_PUNCHHOLE_VI>pos:0.5:0.02,size:0.05:0.05,type:circle</SEC_FLOATING_FEATURE_LOCKSCREEN_CONFIG_PUNCHHOLE_VI>
    <SEC_FLOATING_FEATURE_FRAMEWORK_SUPPORT_FOLDABLE_TYPE_FOLD>FALSE</SEC_FLOATING_FEATURE_FRAMEWORK_SUPPORT_FOLDABLE_TYPE_FOLD>
    <SEC_FLOATING_FEATURE_COMMON_SUPPORT_SAMSUNG_MARKETING_INFO>TRUE</SEC_FLOATING_FEATURE_COMMON_SUPPORT_SAMSUNG_MARKETING_INFO>
    <SEC_FLOATING_FEATURE_SETTINGS_CONFIG_BRAND_NAME>Galaxy &amp; Co</SEC_FLOATING_FEATURE_SETTINGS_CONFIG_BRAND_NAME>
    <SEC_FLOATING_FEATURE_CAMERA_CONFIG_EMPTY/>
</SecFloatingFeatureSet>
"#;

    #[test]
    fn test_from_xml() {
        let table = FeatureTable::from_xml(SAMPLE);

        assert_eq!(table.len(), 5);
        assert_eq!(
            table.get_string(PUNCH_HOLE_KEY),
            "pos:0.5:0.02,size:0.05:0.05,type:circle"
        );
        assert!(!table.get_boolean(FOLDABLE_KEY));
        assert!(table.get_boolean("SEC_FLOATING_FEATURE_COMMON_SUPPORT_SAMSUNG_MARKETING_INFO"));
        assert_eq!(
            table.get_string("SEC_FLOATING_FEATURE_SETTINGS_CONFIG_BRAND_NAME"),
            "Galaxy & Co"
        );
        assert_eq!(table.get("SEC_FLOATING_FEATURE_CAMERA_CONFIG_EMPTY"), Some(""));
        assert!(table.get("SecFloatingFeatureSet").is_none());
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let table = FeatureTable::from_xml("<SecFloatingFeatureSet></SecFloatingFeatureSet>");
        assert!(table.is_empty());
        assert_eq!(table.get_string(PUNCH_HOLE_KEY), "");
        assert!(!table.get_boolean(FOLDABLE_KEY));
    }

    #[test]
    fn test_truncated_document() {
        let table = FeatureTable::from_xml("<Set><KEY_A>one</KEY_A><KEY_B>two");
        assert_eq!(table.get("KEY_A"), Some("one"));
        assert!(table.get("KEY_B").is_none());
    }

    #[test]
    fn test_cdata_and_character_references() {
        let table = FeatureTable::from_xml(
            "<Set>\n  <KEY_A><![CDATA[pos:0.5:0.02 <circle> & more]]></KEY_A>\n  <KEY_B>Galaxy &#38; Co&#x21;</KEY_B>\n</Set>",
        );
        assert_eq!(table.get("KEY_A"), Some("pos:0.5:0.02 <circle> & more"));
        assert_eq!(table.get("KEY_B"), Some("Galaxy & Co!"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_nested_elements_are_not_values() {
        let table =
            FeatureTable::from_xml("<Set><GROUP><INNER>x</INNER></GROUP><KEY_A>one</KEY_A></Set>");
        assert_eq!(table.get("KEY_A"), Some("one"));
        assert!(table.get("GROUP").is_none());
        assert!(table.get("INNER").is_none());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_overrides_win() {
        let mut table = FeatureTable::from_xml(SAMPLE);
        table.extend([(FOLDABLE_KEY, "true")]);
        assert!(table.get_boolean(FOLDABLE_KEY));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = FeatureTable::load(file.path()).unwrap();
        assert!(table.get(PUNCH_HOLE_KEY).is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let result = FeatureTable::load(Path::new("/nonexistent/floating_feature.xml"));
        assert!(matches!(result, Err(FeatureError::NotFound(_))));
    }
}
