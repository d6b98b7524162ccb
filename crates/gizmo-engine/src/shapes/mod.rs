//! Parametric shape generators.
//!
//! Every generator is an `impl Gizmos` block that decomposes a shape into
//! `add_line`/`add_tri` calls. Shared conventions:
//! - `center` only translates; `transform` (if any) is applied to the
//!   shape-local offsets first, so only its rotation/scale matter
//! - `segments` (and `rings`) are clamped to at least 1
//! - ring/disk/arc/arc-ring treat a fill alpha of exactly 0 as "wireframe only"
//!
//! Extending:
//! - add a file here with an `impl Gizmos` block
//! - reuse the offset helpers in `common`

mod common;

mod aabb;
mod axes;
mod cylinder;
mod ring;
mod sphere;
mod spline;

pub use sphere::SphereRange;
