use glam::Vec4;

use crate::paint::Color;

use super::{FixedBuffer, GizmoLine, GizmoTri};

/// Per-set primitive budget, fixed for the lifetime of a [`Gizmos`].
///
/// The triangle budget applies independently to the opaque and the
/// alpha-blended set.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GizmoCapacity {
    pub max_lines: u32,
    pub max_tris: u32,
}

impl GizmoCapacity {
    #[inline]
    pub const fn new(max_lines: u32, max_tris: u32) -> Self {
        Self { max_lines, max_tris }
    }
}

impl Default for GizmoCapacity {
    fn default() -> Self {
        Self::new(32768, 32768)
    }
}

/// Live and dropped primitive counts for the current frame.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct GizmoStats {
    pub lines: usize,
    pub opaque_tris: usize,
    pub alpha_tris: usize,
    pub dropped_lines: usize,
    pub dropped_opaque_tris: usize,
    pub dropped_alpha_tris: usize,
}

impl GizmoStats {
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped_lines + self.dropped_opaque_tris + self.dropped_alpha_tris
    }
}

/// Immediate-mode debug geometry for one frame.
///
/// Usage per frame:
/// 1. [`clear`](Self::clear)
/// 2. any number of `add_*` calls (shape generators live in `crate::shapes`)
/// 3. hand `&Gizmos` to `render::GizmoRenderer::draw`
///
/// Each set keeps insertion order, which is also draw order. The alpha set is
/// not sorted; callers that care about blending must submit back-to-front.
#[derive(Debug)]
pub struct Gizmos {
    capacity: GizmoCapacity,

    lines: FixedBuffer<GizmoLine>,
    opaque_tris: FixedBuffer<GizmoTri>,
    alpha_tris: FixedBuffer<GizmoTri>,

    /// Reusable vertex grid for sphere tessellation.
    pub(crate) scratch: Vec<Vec4>,
}

impl Gizmos {
    pub fn new(capacity: GizmoCapacity) -> Self {
        log::debug!(
            "gizmos created: max_lines={} max_tris={}",
            capacity.max_lines,
            capacity.max_tris
        );
        Self {
            capacity,
            lines: FixedBuffer::with_capacity(capacity.max_lines as usize),
            opaque_tris: FixedBuffer::with_capacity(capacity.max_tris as usize),
            alpha_tris: FixedBuffer::with_capacity(capacity.max_tris as usize),
            scratch: Vec::new(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> GizmoCapacity {
        self.capacity
    }

    /// Drops all recorded primitives. Backing storage is kept.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.opaque_tris.clear();
        self.alpha_tris.clear();
    }

    /// Adds a single-color line.
    #[inline]
    pub fn add_line(&mut self, v0: Vec4, v1: Vec4, color: Color) {
        self.add_line_gradient(v0, v1, color, color);
    }

    /// Adds a line with independent endpoint colors.
    pub fn add_line_gradient(&mut self, v0: Vec4, v1: Vec4, color0: Color, color1: Color) {
        if !self.lines.push(GizmoLine::new(v0, v1, color0, color1)) {
            warn_first_drop("line", self.lines.dropped(), self.lines.capacity());
        }
    }

    /// Adds a triangle. Alpha exactly `1.0` routes it to the opaque set,
    /// anything else to the alpha-blended set.
    pub fn add_tri(&mut self, v0: Vec4, v1: Vec4, v2: Vec4, color: Color) {
        let tri = GizmoTri::new(v0, v1, v2, color);
        if color.is_opaque() {
            if !self.opaque_tris.push(tri) {
                warn_first_drop("opaque triangle", self.opaque_tris.dropped(), self.opaque_tris.capacity());
            }
        } else if !self.alpha_tris.push(tri) {
            warn_first_drop("alpha triangle", self.alpha_tris.dropped(), self.alpha_tris.capacity());
        }
    }

    /// `true` once neither lines nor triangles of `fill`'s set can be kept.
    pub(crate) fn is_full_for(&self, fill: Color) -> bool {
        self.lines.is_full() && self.tri_set(fill).is_full()
    }

    /// Remaining room as `(lines, triangles in fill's set)`.
    pub(crate) fn room_for(&self, fill: Color) -> (usize, usize) {
        let tris = self.tri_set(fill);
        (
            self.lines.capacity() - self.lines.len(),
            tris.capacity() - tris.len(),
        )
    }

    /// Counts primitives a generator skipped once the sets filled up.
    pub(crate) fn count_skipped(&mut self, lines: usize, tris: usize, fill: Color) {
        if lines > 0 {
            let first = self.lines.dropped() == 0;
            self.lines.add_dropped(lines);
            if first {
                warn_exhausted("line", self.lines.capacity());
            }
        }
        if tris > 0 {
            let (set, buffer) = if fill.is_opaque() {
                ("opaque triangle", &mut self.opaque_tris)
            } else {
                ("alpha triangle", &mut self.alpha_tris)
            };
            let first = buffer.dropped() == 0;
            buffer.add_dropped(tris);
            if first {
                warn_exhausted(set, buffer.capacity());
            }
        }
    }

    fn tri_set(&self, fill: Color) -> &FixedBuffer<GizmoTri> {
        if fill.is_opaque() { &self.opaque_tris } else { &self.alpha_tris }
    }

    /// Live lines in insertion order.
    #[inline]
    pub fn lines(&self) -> &[GizmoLine] {
        self.lines.as_slice()
    }

    /// Live opaque triangles in insertion order.
    #[inline]
    pub fn opaque_tris(&self) -> &[GizmoTri] {
        self.opaque_tris.as_slice()
    }

    /// Live alpha-blended triangles in insertion order.
    #[inline]
    pub fn alpha_tris(&self) -> &[GizmoTri] {
        self.alpha_tris.as_slice()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.opaque_tris.is_empty() && self.alpha_tris.is_empty()
    }

    pub fn stats(&self) -> GizmoStats {
        GizmoStats {
            lines: self.lines.len(),
            opaque_tris: self.opaque_tris.len(),
            alpha_tris: self.alpha_tris.len(),
            dropped_lines: self.lines.dropped(),
            dropped_opaque_tris: self.opaque_tris.dropped(),
            dropped_alpha_tris: self.alpha_tris.dropped(),
        }
    }
}

impl Default for Gizmos {
    fn default() -> Self {
        Self::new(GizmoCapacity::default())
    }
}

/// Logs only the first overflow of a set per frame.
#[inline]
fn warn_first_drop(set: &str, dropped: usize, capacity: usize) {
    if dropped == 1 {
        warn_exhausted(set, capacity);
    }
}

fn warn_exhausted(set: &str, capacity: usize) {
    log::warn!("gizmo {set} budget of {capacity} exhausted; further {set}s this frame are dropped");
}
