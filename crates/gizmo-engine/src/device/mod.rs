//! Headless GPU device management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue without a surface
//! - offscreen color/depth targets and CPU read-back of rendered frames

mod gpu;
mod init;
mod offscreen;

pub use gpu::Gpu;
pub use init::GpuInit;
pub use offscreen::OffscreenTarget;
