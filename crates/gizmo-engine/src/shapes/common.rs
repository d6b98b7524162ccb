use glam::{Mat4, Vec4};

/// Applies the optional shape transform to a shape-local offset.
///
/// Offsets carry `w = 0`, so the transform's translation column never
/// contributes; `None` leaves the offset untouched.
#[inline]
pub(super) fn local(transform: Option<&Mat4>, offset: Vec4) -> Vec4 {
    match transform {
        Some(m) => *m * offset,
        None => offset,
    }
}

/// Point on a circle of `radius` in the XZ plane, angle measured from +Z
/// towards +X.
#[inline]
pub(super) fn xz_point(angle: f32, radius: f32) -> Vec4 {
    Vec4::new(angle.sin() * radius, 0.0, angle.cos() * radius, 0.0)
}

#[inline]
pub(super) fn clamp_segments(segments: u32) -> u32 {
    segments.max(1)
}
