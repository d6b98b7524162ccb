//! Typed uniform values packed into a WGSL uniform-buffer layout.
//!
//! `UniformValue` is the closed set of types a gizmo shader may declare in a
//! uniform block. `UniformBlock` lays the fields out once, keeps a CPU copy
//! of the bytes and tracks whether they changed since the last upload.

use anyhow::{bail, Result};
use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UniformKind {
    Float,
    Int,
    UInt,
    Vec2,
    Vec3,
    Vec4,
    Mat2,
    Mat3,
    Mat4,
}

impl UniformKind {
    /// Alignment in the uniform address space.
    pub const fn align(self) -> usize {
        match self {
            Self::Float | Self::Int | Self::UInt => 4,
            Self::Vec2 | Self::Mat2 => 8,
            Self::Vec3 | Self::Vec4 | Self::Mat3 | Self::Mat4 => 16,
        }
    }

    /// Size in bytes, including inner column padding.
    pub const fn size(self) -> usize {
        match self {
            Self::Float | Self::Int | Self::UInt => 4,
            Self::Vec2 => 8,
            Self::Vec3 => 12,
            Self::Vec4 | Self::Mat2 => 16,
            Self::Mat3 => 48,
            Self::Mat4 => 64,
        }
    }

    fn zero(self) -> UniformValue {
        match self {
            Self::Float => UniformValue::Float(0.0),
            Self::Int => UniformValue::Int(0),
            Self::UInt => UniformValue::UInt(0),
            Self::Vec2 => UniformValue::Vec2(Vec2::ZERO),
            Self::Vec3 => UniformValue::Vec3(Vec3::ZERO),
            Self::Vec4 => UniformValue::Vec4(Vec4::ZERO),
            Self::Mat2 => UniformValue::Mat2(Mat2::ZERO),
            Self::Mat3 => UniformValue::Mat3(Mat3::ZERO),
            Self::Mat4 => UniformValue::Mat4(Mat4::ZERO),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    UInt(u32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl UniformValue {
    pub fn kind(&self) -> UniformKind {
        match self {
            Self::Float(_) => UniformKind::Float,
            Self::Int(_) => UniformKind::Int,
            Self::UInt(_) => UniformKind::UInt,
            Self::Vec2(_) => UniformKind::Vec2,
            Self::Vec3(_) => UniformKind::Vec3,
            Self::Vec4(_) => UniformKind::Vec4,
            Self::Mat2(_) => UniformKind::Mat2,
            Self::Mat3(_) => UniformKind::Mat3,
            Self::Mat4(_) => UniformKind::Mat4,
        }
    }

    /// Writes the value at the start of `out` (at least `kind().size()` bytes).
    ///
    /// Matrices are column-major; `Mat3` columns are padded to 16 bytes.
    fn write(&self, out: &mut [u8]) {
        match self {
            Self::Float(v) => out[..4].copy_from_slice(bytemuck::bytes_of(v)),
            Self::Int(v) => out[..4].copy_from_slice(bytemuck::bytes_of(v)),
            Self::UInt(v) => out[..4].copy_from_slice(bytemuck::bytes_of(v)),
            Self::Vec2(v) => out[..8].copy_from_slice(bytemuck::bytes_of(v)),
            Self::Vec3(v) => out[..12].copy_from_slice(bytemuck::bytes_of(v)),
            Self::Vec4(v) => out[..16].copy_from_slice(bytemuck::bytes_of(v)),
            Self::Mat2(m) => out[..16].copy_from_slice(bytemuck::bytes_of(m)),
            Self::Mat3(m) => {
                for (i, col) in [m.x_axis, m.y_axis, m.z_axis].iter().enumerate() {
                    let at = i * 16;
                    out[at..at + 12].copy_from_slice(bytemuck::bytes_of(col));
                    out[at + 12..at + 16].fill(0);
                }
            }
            Self::Mat4(m) => out[..64].copy_from_slice(bytemuck::bytes_of(m)),
        }
    }
}

#[derive(Debug)]
struct UniformField {
    name: &'static str,
    offset: usize,
    value: UniformValue,
}

/// CPU mirror of one uniform buffer.
#[derive(Debug)]
pub struct UniformBlock {
    fields: Vec<UniformField>,
    bytes: Vec<u8>,
    dirty: bool,
}

impl UniformBlock {
    /// Lays out `fields` in declaration order. Every field starts zeroed and
    /// the block starts dirty so the first upload always happens.
    pub fn new(fields: &[(&'static str, UniformKind)]) -> Self {
        let mut offset = 0usize;
        let mut laid_out = Vec::with_capacity(fields.len());

        for &(name, kind) in fields {
            offset = offset.next_multiple_of(kind.align());
            laid_out.push(UniformField { name, offset, value: kind.zero() });
            offset += kind.size();
        }

        let size = offset.next_multiple_of(16).max(16);
        Self {
            fields: laid_out,
            bytes: vec![0; size],
            dirty: true,
        }
    }

    /// Buffer size in bytes (multiple of 16).
    #[inline]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.offset)
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }

    /// Updates a field. Marks the block dirty only when the value changes.
    pub fn set(&mut self, name: &str, value: UniformValue) -> Result<()> {
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            bail!("unknown uniform `{name}`");
        };
        if field.value.kind() != value.kind() {
            bail!(
                "uniform `{name}` is {:?}, got {:?}",
                field.value.kind(),
                value.kind()
            );
        }
        if field.value != value {
            field.value = value;
            value.write(&mut self.bytes[field.offset..]);
            self.dirty = true;
        }
        Ok(())
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the bytes if they changed since the last call, and marks the
    /// block clean.
    pub fn take_dirty_bytes(&mut self) -> Option<&[u8]> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(&self.bytes)
    }
}
