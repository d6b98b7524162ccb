use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use crate::paint::Color;

/// GPU vertex layout (32 bytes):
///
///  offset  0  position  [f32; 4]   loc 0  (homogeneous)
///  offset 16  color     [f32; 4]   loc 1
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GizmoVertex {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl GizmoVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x4, // position
        1 => Float32x4  // color
    ];

    #[inline]
    pub fn new(position: Vec4, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color: color.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Vec4 {
        Vec4::from_array(self.position)
    }

    #[inline]
    pub fn color(&self) -> Color {
        Color::from(self.color)
    }

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GizmoVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Line primitive. Endpoint colors are independent (gradient lines).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GizmoLine {
    pub v0: GizmoVertex,
    pub v1: GizmoVertex,
}

impl GizmoLine {
    pub const VERTICES: u32 = 2;

    #[inline]
    pub fn new(v0: Vec4, v1: Vec4, color0: Color, color1: Color) -> Self {
        Self {
            v0: GizmoVertex::new(v0, color0),
            v1: GizmoVertex::new(v1, color1),
        }
    }
}

/// Triangle primitive with a single color broadcast to all corners.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct GizmoTri {
    pub v0: GizmoVertex,
    pub v1: GizmoVertex,
    pub v2: GizmoVertex,
}

impl GizmoTri {
    pub const VERTICES: u32 = 3;

    #[inline]
    pub fn new(v0: Vec4, v1: Vec4, v2: Vec4, color: Color) -> Self {
        Self {
            v0: GizmoVertex::new(v0, color),
            v1: GizmoVertex::new(v1, color),
            v2: GizmoVertex::new(v2, color),
        }
    }

    /// Color of the first corner; all corners share it for public shape APIs.
    #[inline]
    pub fn color(&self) -> Color {
        self.v0.color()
    }
}
