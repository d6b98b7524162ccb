//! Per-frame debug geometry storage.
//!
//! Three bounded sets (lines, opaque triangles, alpha-blended triangles) are
//! filled by `add_line`/`add_tri` and by the shape generators in
//! `crate::shapes`, then uploaded by `render::GizmoRenderer`.

mod buffer;
mod gizmos;
mod vertex;

pub use buffer::FixedBuffer;
pub use gizmos::{GizmoCapacity, GizmoStats, Gizmos};
pub use vertex::{GizmoLine, GizmoTri, GizmoVertex};
