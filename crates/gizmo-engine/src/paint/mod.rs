//! Color types shared by geometry buffers and shape generators.

mod color;

pub use color::Color;
