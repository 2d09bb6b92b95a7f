//! Punch hole descriptor parsing
//!
//! The vendor describes the cutout with a comma-separated list of
//! colon-delimited properties:
//!
//! ```text
//! pos:0.5:0.02,size:0.05:0.05,type:circle
//! ```
//!
//! `pos` is the cutout center and `size` its extent, both as fractions of
//! the real display size. Unknown properties are ignored.

use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use crate::geometry::PointF;

/// Shape tag of a round punch hole
pub const CIRCLE_SHAPE: &str = "circle";

/// Reasons a descriptor string was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("No punch hole descriptor available")]
    Unsupported,

    #[error("Descriptor does not apply to dual display devices")]
    DualDisplay,

    #[error("Malformed property: {token:?}")]
    Malformed { token: String },

    #[error("Invalid number in property: {token:?}")]
    InvalidNumber { token: String },

    #[error("Descriptor lacks position, size or shape")]
    Incomplete,
}

pub type DescriptorResult<T> = Result<T, DescriptorError>;

/// Vendor description of the cutout in the natural orientation
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CutoutDescriptor {
    position: Option<PointF>,
    size: Option<PointF>,
    shape: Option<String>,
}

impl CutoutDescriptor {
    pub fn new(position: PointF, size: PointF, shape: impl Into<String>) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            shape: Some(shape.into()),
        }
    }

    /// Parse a vendor descriptor.
    ///
    /// Succeeds only when position, size and shape are all present; any
    /// malformed property rejects the whole string.
    pub fn parse(raw: Option<&str>, dual_display: bool) -> DescriptorResult<Self> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(DescriptorError::Unsupported),
        };
        if dual_display {
            return Err(DescriptorError::DualDisplay);
        }

        let mut descriptor = CutoutDescriptor::default();
        for property in raw.split(',') {
            if property.starts_with("pos:") {
                descriptor.position = Some(parse_pair(property)?);
            } else if property.starts_with("size:") {
                descriptor.size = Some(parse_pair(property)?);
            } else if property.starts_with("type:") {
                let fields: Vec<&str> = property.split(':').collect();
                if fields.len() < 2 {
                    return Err(malformed(property));
                }
                descriptor.shape = Some(fields[1].to_string());
            }
        }

        if !descriptor.is_complete() {
            return Err(DescriptorError::Incomplete);
        }
        Ok(descriptor)
    }

    pub fn position(&self) -> Option<PointF> {
        self.position
    }

    pub fn size(&self) -> Option<PointF> {
        self.size
    }

    pub fn shape(&self) -> Option<&str> {
        self.shape.as_deref()
    }

    pub fn has_position(&self) -> bool {
        self.position.is_some()
    }

    pub fn has_size(&self) -> bool {
        self.size.is_some()
    }

    pub fn has_shape(&self) -> bool {
        self.shape.as_deref().is_some_and(|shape| !shape.is_empty())
    }

    pub fn is_complete(&self) -> bool {
        self.has_position() && self.has_size() && self.has_shape()
    }

    pub fn is_circle(&self) -> bool {
        self.shape.as_deref() == Some(CIRCLE_SHAPE)
    }
}

impl FromStr for CutoutDescriptor {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CutoutDescriptor::parse(Some(s), false)
    }
}

/// `name:x:y` with exactly two numeric fields
fn parse_pair(property: &str) -> DescriptorResult<PointF> {
    let fields: Vec<&str> = property.split(':').collect();
    if fields.len() != 3 {
        return Err(malformed(property));
    }

    let x = parse_fraction(property, fields[1])?;
    let y = parse_fraction(property, fields[2])?;
    Ok(PointF::new(x, y))
}

/// Float literal, optionally with a `f`/`d` type suffix as vendor stores write them
fn parse_fraction(property: &str, field: &str) -> DescriptorResult<f32> {
    let field = field.trim();
    let digits = field
        .strip_suffix(|c: char| matches!(c, 'f' | 'F' | 'd' | 'D'))
        .unwrap_or(field);
    match digits.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DescriptorError::InvalidNumber {
            token: property.to_string(),
        }),
    }
}

fn malformed(property: &str) -> DescriptorError {
    DescriptorError::Malformed {
        token: property.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "pos:0.5:0.02,size:0.05:0.05,type:circle";

    #[test]
    fn test_parse_sample() {
        let descriptor = CutoutDescriptor::parse(Some(SAMPLE), false).unwrap();

        assert_eq!(descriptor.position(), Some(PointF::new(0.5, 0.02)));
        assert_eq!(descriptor.size(), Some(PointF::new(0.05, 0.05)));
        assert_eq!(descriptor.shape(), Some("circle"));
        assert!(descriptor.is_complete());
        assert!(descriptor.is_circle());
    }

    #[test]
    fn test_dual_display_rejected() {
        assert_eq!(
            CutoutDescriptor::parse(Some(SAMPLE), true),
            Err(DescriptorError::DualDisplay)
        );
    }

    #[test]
    fn test_empty_and_missing_rejected() {
        assert_eq!(
            CutoutDescriptor::parse(None, false),
            Err(DescriptorError::Unsupported)
        );
        assert_eq!(
            CutoutDescriptor::parse(Some(""), false),
            Err(DescriptorError::Unsupported)
        );
        assert_eq!(
            CutoutDescriptor::parse(None, true),
            Err(DescriptorError::Unsupported)
        );
    }

    #[test]
    fn test_order_does_not_matter() {
        let descriptor: CutoutDescriptor = "type:circle,size:0.1:0.2,pos:0.3:0.4".parse().unwrap();
        assert_eq!(descriptor.position(), Some(PointF::new(0.3, 0.4)));
        assert_eq!(descriptor.size(), Some(PointF::new(0.1, 0.2)));
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        for raw in [
            "pos:0.5,size:0.05:0.05,type:circle",
            "pos:0.5:0.02:0.1,size:0.05:0.05,type:circle",
            "type:circle,size:0.05,pos:0.5:0.02",
            "size:0.05:0.05:,pos:0.5:0.02,type:circle",
        ] {
            assert!(
                matches!(
                    CutoutDescriptor::parse(Some(raw), false),
                    Err(DescriptorError::Malformed { .. })
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_non_numeric_rejected() {
        for raw in [
            "pos:abc:0.02,size:0.05:0.05,type:circle",
            "type:circle,pos:0.5:0.02,size:0.05:",
            "pos:0.5:NaN,size:0.05:0.05,type:circle",
            "pos:0.5:inf,size:0.05:0.05,type:circle",
        ] {
            assert!(
                matches!(
                    CutoutDescriptor::parse(Some(raw), false),
                    Err(DescriptorError::InvalidNumber { .. })
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_malformed_rejects_even_after_complete() {
        let raw = "pos:0.5:0.02,size:0.05:0.05,type:circle,pos:1";
        assert!(CutoutDescriptor::parse(Some(raw), false).is_err());
    }

    #[test]
    fn test_incomplete_rejected() {
        for raw in [
            "pos:0.5:0.02,size:0.05:0.05",
            "pos:0.5:0.02,type:circle",
            "size:0.05:0.05,type:circle",
            "pos:0.5:0.02,size:0.05:0.05,type:",
            "hello",
        ] {
            assert_eq!(
                CutoutDescriptor::parse(Some(raw), false),
                Err(DescriptorError::Incomplete),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_unknown_properties_ignored() {
        let raw = "ver:2,pos:0.5:0.02,radius:12,size:0.05:0.05,type:circle:extra";
        let descriptor = CutoutDescriptor::parse(Some(raw), false).unwrap();
        assert!(descriptor.is_circle());
    }

    #[test]
    fn test_whitespace_around_numbers() {
        let descriptor: CutoutDescriptor = "pos: 0.5 :0.25,size:0.125:0.125,type:circle"
            .parse()
            .unwrap();
        assert_eq!(descriptor.position(), Some(PointF::new(0.5, 0.25)));
    }

    #[test]
    fn test_float_type_suffixes() {
        let descriptor =
            CutoutDescriptor::parse(Some("pos:0.5f:0.25d,size:0.125F:0.125D,type:circle"), false)
                .unwrap();
        assert_eq!(descriptor.position(), Some(PointF::new(0.5, 0.25)));
        assert_eq!(descriptor.size(), Some(PointF::new(0.125, 0.125)));

        assert!(matches!(
            CutoutDescriptor::parse(Some("pos:0.5ff:0.25,size:0.1:0.1,type:circle"), false),
            Err(DescriptorError::InvalidNumber { .. })
        ));
        assert!(matches!(
            CutoutDescriptor::parse(Some("pos:f:0.25,size:0.1:0.1,type:circle"), false),
            Err(DescriptorError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_shape_is_case_sensitive() {
        let descriptor: CutoutDescriptor = "pos:0.5:0.02,size:0.05:0.05,type:Circle"
            .parse()
            .unwrap();
        assert!(descriptor.is_complete());
        assert!(!descriptor.is_circle());
    }

    #[test]
    fn test_later_property_wins() {
        let descriptor: CutoutDescriptor = "pos:0.1:0.1,pos:0.5:0.25,size:0.125:0.125,type:circle"
            .parse()
            .unwrap();
        assert_eq!(descriptor.position(), Some(PointF::new(0.5, 0.25)));
    }
}
