//! GPU rendering of gizmo geometry.
//!
//! `GizmoRenderer` consumes a frame's `Gizmos` and records wgpu commands.
//! It owns all of its GPU resources (pipelines, buffers, camera uniform).
//!
//! Convention:
//! - Vertex positions are homogeneous world-space points.
//! - The vertex shader applies `projection * view`; both are column-major
//!   `glam::Mat4` supplied per draw.

mod common;
mod ctx;
mod gizmo;
mod plan;
pub mod shader;
pub mod uniform;

pub use ctx::{RenderCtx, RenderTarget};
pub use gizmo::{DepthConfig, GizmoRenderer, GizmoRendererConfig};
pub use plan::{Batch, BatchKind, DrawPlan};
pub use uniform::{UniformBlock, UniformKind, UniformValue};
