//! Gizmo engine crate.
//!
//! Immediate-mode debug geometry: record lines and triangles into a
//! [`Gizmos`] frame buffer from anywhere, then flush them with one
//! [`GizmoRenderer::draw`] call.

pub mod device;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shapes;

pub use geometry::{GizmoCapacity, GizmoStats, Gizmos};
pub use paint::Color;
pub use render::{DepthConfig, GizmoRenderer, GizmoRendererConfig, RenderCtx, RenderTarget};
pub use shapes::SphereRange;
