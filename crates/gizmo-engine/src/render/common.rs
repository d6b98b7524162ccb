//! Pipeline state shared by the gizmo pipelines.

// ── blend ─────────────────────────────────────────────────────────────────

/// Straight (non-premultiplied) alpha blending. Gizmo colors are never
/// premultiplied, so the source color is scaled by its own alpha.
pub(super) fn straight_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::SrcAlpha,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── camera uniform ────────────────────────────────────────────────────────

pub(super) const CAMERA_VIEW: &str = "view";
pub(super) const CAMERA_PROJECTION: &str = "projection";

/// `wgpu` minimum binding size for a uniform block of `size` bytes.
pub(super) fn min_binding_size(size: u64) -> Option<std::num::NonZeroU64> {
    std::num::NonZeroU64::new(size)
}

// ── index buffers ─────────────────────────────────────────────────────────

/// Sequential indices `0..count`. Primitives are stored unshared, so the
/// index buffer is the identity mapping and only its length matters.
pub(super) fn sequential_indices(count: u32) -> Vec<u32> {
    (0..count).collect()
}
