//! Punch hole rectangle resolution
//!
//! Projects the vendor descriptor onto the current display and reconciles it
//! with the cutout rect the OS reports for the camera edge. When no usable
//! circular descriptor exists, the OS rect is reshaped using the camera margin
//! below the status bar top instead.

use crate::feature::{FeatureSource, FOLDABLE_KEY, PUNCH_HOLE_KEY};
use crate::geometry::{PointF, Rect, Rotation};

use super::descriptor::CutoutDescriptor;
use super::display::{DisplayProvider, DisplaySnapshot};
use super::platform::Platform;

/// Largest center offset (px) tolerated between descriptor and OS rect
pub const CENTER_TOLERANCE: u32 = 1;

/// Punch hole state for one display configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PunchHole {
    descriptor: Option<CutoutDescriptor>,
}

impl PunchHole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptor(descriptor: CutoutDescriptor) -> Self {
        Self {
            descriptor: Some(descriptor),
        }
    }

    pub fn reset(&mut self) {
        self.descriptor = None;
    }

    /// Read and parse the vendor descriptor.
    ///
    /// Returns false when the device has no usable descriptor; the reason is
    /// only logged.
    pub fn initialize<F: FeatureSource + ?Sized>(&mut self, features: &F) -> bool {
        self.reset();

        let raw = features.get_string(PUNCH_HOLE_KEY);
        if raw.is_empty() {
            tracing::debug!("No punch hole descriptor in {} source", features.name());
            return false;
        }
        let dual_display = features.get_boolean(FOLDABLE_KEY);

        match CutoutDescriptor::parse(Some(&raw), dual_display) {
            Ok(descriptor) => {
                tracing::debug!("Punch hole descriptor: {:?}", descriptor);
                self.descriptor = Some(descriptor);
                true
            }
            Err(e) => {
                tracing::debug!("Rejected punch hole descriptor {:?}: {}", raw, e);
                false
            }
        }
    }

    pub fn descriptor(&self) -> Option<&CutoutDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn is_circle(&self) -> bool {
        self.descriptor.as_ref().is_some_and(CutoutDescriptor::is_circle)
    }

    /// Screen rect covered by the camera cutout, or the empty rect when it
    /// cannot be determined reliably.
    ///
    /// `camera_margin` is only used when there is no complete circular
    /// descriptor; `None` or a negative value disables that path.
    pub fn circle_rect(&self, snapshot: &DisplaySnapshot, camera_margin: Option<i32>) -> Rect {
        if snapshot.cutout.is_none() {
            tracing::debug!("Display reports no cutout");
            return Rect::EMPTY;
        }
        let rotation = snapshot.rotation;
        let Some(reference) = snapshot.reference_bounds() else {
            tracing::debug!("No camera edge at {}", rotation);
            return Rect::EMPTY;
        };

        let rect = match self.circle_geometry() {
            Some((position, size)) => project_circle(position, size, snapshot, reference),
            None => match camera_margin.filter(|margin| *margin >= 0) {
                Some(margin) => apply_camera_margin(rotation, reference, margin),
                None => {
                    tracing::debug!("No circular descriptor and no camera margin");
                    Rect::EMPTY
                }
            },
        };

        tracing::trace!("Punch hole rect at {}: {}", rotation, rect);
        rect.normalized()
    }

    /// `circle_rect` against a live display
    pub fn circle_rect_on<D: DisplayProvider + ?Sized>(&self, display: &D) -> Rect {
        self.circle_rect(&display.snapshot(), display.camera_top_margin())
    }

    /// Whether this device has a circular punch hole.
    ///
    /// Gated on the vendor and SDK level; any failure answers false.
    pub fn is_circle_device<F: FeatureSource + ?Sized>(platform: &Platform, features: &F) -> bool {
        if !platform.supports_punch_hole() {
            return false;
        }

        let mut punch_hole = PunchHole::new();
        punch_hole.initialize(features) && punch_hole.is_circle()
    }

    fn circle_geometry(&self) -> Option<(PointF, PointF)> {
        let descriptor = self
            .descriptor
            .as_ref()
            .filter(|d| d.is_complete() && d.is_circle())?;
        Some((descriptor.position()?, descriptor.size()?))
    }
}

/// Descriptor circle in screen pixels, checked against the OS rect
fn project_circle(
    position: PointF,
    size: PointF,
    snapshot: &DisplaySnapshot,
    reference: Rect,
) -> Rect {
    let real_width = snapshot.real_size.width as f32;
    let real_height = snapshot.real_size.height as f32;

    match snapshot.rotation {
        Rotation::Deg0 => {
            let center_x = (real_width * position.x) as i32;
            let center_y = (real_height * position.y) as i32;
            let radius = round_half_up((real_width * size.x).min(real_height * size.y) / 2.0);
            reconcile_horizontal(Rect::around(center_x, center_y, radius), reference)
        }
        Rotation::Deg90 => {
            let width = real_height * size.x;
            let height = real_width * size.y;
            let left = real_width * position.y - width / 2.0;
            let top = real_height * (1.0 - position.x) - height / 2.0;
            reconcile_vertical(truncated_rect(left, top, width, height), reference)
        }
        Rotation::Deg270 => {
            let width = real_height * size.x;
            let height = real_width * size.y;
            let left = real_width * (1.0 - position.y) - width / 2.0;
            let top = real_height * position.x - height / 2.0;
            reconcile_vertical(truncated_rect(left, top, width, height), reference)
        }
        Rotation::Deg180 => Rect::EMPTY,
    }
}

/// Trust the OS center and width for a camera on the top edge
fn reconcile_horizontal(mut rect: Rect, reference: Rect) -> Rect {
    if rect.center_x().abs_diff(reference.center_x()) > CENTER_TOLERANCE {
        tracing::debug!(
            "Descriptor center {} disagrees with OS cutout {}",
            rect.center_x(),
            reference
        );
        return Rect::EMPTY;
    }
    if !reference.is_empty() && reference.width() < rect.width() {
        let inset = (rect.width() - reference.width()) / 2;
        rect.inset(inset, inset);
    }
    rect
}

/// Trust the OS center and height for a camera on a side edge
fn reconcile_vertical(mut rect: Rect, reference: Rect) -> Rect {
    if rect.center_y().abs_diff(reference.center_y()) > CENTER_TOLERANCE {
        tracing::debug!(
            "Descriptor center {} disagrees with OS cutout {}",
            rect.center_y(),
            reference
        );
        return Rect::EMPTY;
    }
    if !reference.is_empty() && reference.height() < rect.height() {
        let inset = (rect.height() - reference.height()) / 2;
        rect.inset(inset, inset);
    }
    rect
}

/// Square the OS rect off, starting `margin` px from the camera edge
fn apply_camera_margin(rotation: Rotation, mut rect: Rect, margin: i32) -> Rect {
    if rect.is_empty() {
        return rect;
    }
    match rotation {
        Rotation::Deg0 => {
            rect.top = rect.top.saturating_add(margin);
            rect.bottom = rect.top.saturating_add(rect.width());
        }
        Rotation::Deg90 => {
            rect.left = margin;
            rect.right = margin.saturating_add(rect.height());
        }
        Rotation::Deg270 => {
            rect.right = rect.right.saturating_sub(margin);
            rect.left = rect.right.saturating_sub(rect.height());
        }
        Rotation::Deg180 => return Rect::EMPTY,
    }
    rect
}

fn truncated_rect(left: f32, top: f32, width: f32, height: f32) -> Rect {
    let left = left as i32;
    let top = top as i32;
    Rect::new(
        left,
        top,
        (left as f32 + width) as i32,
        (top as f32 + height) as i32,
    )
}

fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}
