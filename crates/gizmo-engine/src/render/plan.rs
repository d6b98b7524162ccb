//! Per-frame draw plan: which sets get uploaded and drawn, and how much.

use crate::geometry::{GizmoLine, GizmoTri, Gizmos};

/// One of the three geometry sets, in draw order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BatchKind {
    Lines,
    OpaqueTris,
    AlphaTris,
}

impl BatchKind {
    pub const ALL: [Self; 3] = [Self::Lines, Self::OpaqueTris, Self::AlphaTris];

    pub fn label(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::OpaqueTris => "opaque tris",
            Self::AlphaTris => "alpha tris",
        }
    }

    /// Alpha-blended triangles test depth but never write it.
    #[inline]
    pub fn writes_depth(self) -> bool {
        !matches!(self, Self::AlphaTris)
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            Self::Lines => 0,
            Self::OpaqueTris => 1,
            Self::AlphaTris => 2,
        }
    }

    fn vertices_per_primitive(self) -> u32 {
        match self {
            Self::Lines => GizmoLine::VERTICES,
            Self::OpaqueTris | Self::AlphaTris => GizmoTri::VERTICES,
        }
    }

    fn primitive_size(self) -> u64 {
        match self {
            Self::Lines => std::mem::size_of::<GizmoLine>() as u64,
            Self::OpaqueTris | Self::AlphaTris => std::mem::size_of::<GizmoTri>() as u64,
        }
    }

    fn live(self, gizmos: &Gizmos) -> usize {
        match self {
            Self::Lines => gizmos.lines().len(),
            Self::OpaqueTris => gizmos.opaque_tris().len(),
            Self::AlphaTris => gizmos.alpha_tris().len(),
        }
    }
}

/// A single indexed draw over the live prefix of one set.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Batch {
    pub kind: BatchKind,
    pub primitives: usize,
    pub index_count: u32,
    pub upload_bytes: u64,
}

impl Batch {
    fn new(kind: BatchKind, primitives: usize) -> Self {
        Self {
            kind,
            primitives,
            index_count: primitives as u32 * kind.vertices_per_primitive(),
            upload_bytes: primitives as u64 * kind.primitive_size(),
        }
    }

    /// The bytes to upload for this batch, taken from the batch's own set.
    pub fn bytes<'g>(&self, gizmos: &'g Gizmos) -> &'g [u8] {
        match self.kind {
            BatchKind::Lines => bytemuck::cast_slice(gizmos.lines()),
            BatchKind::OpaqueTris => bytemuck::cast_slice(gizmos.opaque_tris()),
            BatchKind::AlphaTris => bytemuck::cast_slice(gizmos.alpha_tris()),
        }
    }
}

/// Batches for one frame, at most one per set, ordered
/// lines → opaque → alpha.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DrawPlan {
    batches: [Option<Batch>; 3],
}

impl DrawPlan {
    /// Returns `None` when there is nothing to draw.
    pub fn for_frame(gizmos: &Gizmos) -> Option<Self> {
        if gizmos.is_empty() {
            return None;
        }

        let mut batches = [None; 3];
        for kind in BatchKind::ALL {
            let live = kind.live(gizmos);
            if live > 0 {
                batches[kind.index()] = Some(Batch::new(kind, live));
            }
        }
        Some(Self { batches })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Batch> {
        self.batches.iter().flatten()
    }

    pub fn get(&self, kind: BatchKind) -> Option<&Batch> {
        self.batches[kind.index()].as_ref()
    }

    pub fn upload_bytes(&self) -> u64 {
        self.iter().map(|b| b.upload_bytes).sum()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;
    use crate::geometry::GizmoCapacity;
    use crate::paint::Color;

    fn p(x: f32) -> Vec4 {
        Vec4::new(x, 0.0, 0.0, 1.0)
    }

    // ── empty ─────────────────────────────────────────────────────────────

    #[test]
    fn empty_frame_has_no_plan() {
        let mut g = Gizmos::default();
        assert!(DrawPlan::for_frame(&g).is_none());

        g.add_line(p(0.0), p(1.0), Color::WHITE);
        g.clear();
        assert!(DrawPlan::for_frame(&g).is_none());
    }

    // ── sizing ────────────────────────────────────────────────────────────

    #[test]
    fn lines_upload_exact_prefix() {
        let mut g = Gizmos::default();
        for i in 0..5 {
            g.add_line(p(i as f32), p(i as f32 + 1.0), Color::WHITE);
        }

        let plan = DrawPlan::for_frame(&g).unwrap();
        let lines = plan.get(BatchKind::Lines).unwrap();
        assert_eq!(lines.primitives, 5);
        assert_eq!(lines.upload_bytes, 5 * 64);
        assert_eq!(lines.index_count, 10);
        assert_eq!(lines.bytes(&g).len(), 5 * 64);
        assert!(plan.get(BatchKind::OpaqueTris).is_none());
        assert!(plan.get(BatchKind::AlphaTris).is_none());
    }

    #[test]
    fn overflow_caps_the_batch() {
        let mut g = Gizmos::new(GizmoCapacity::new(3, 1));
        for i in 0..10 {
            g.add_line(p(i as f32), p(0.0), Color::WHITE);
        }
        let plan = DrawPlan::for_frame(&g).unwrap();
        assert_eq!(plan.get(BatchKind::Lines).unwrap().index_count, 6);
    }

    // ── ordering & sources ────────────────────────────────────────────────

    #[test]
    fn batches_run_lines_then_opaque_then_alpha() {
        let mut g = Gizmos::default();
        g.add_tri(p(0.0), p(1.0), p(2.0), Color::RED.with_alpha(0.5));
        g.add_tri(p(0.0), p(1.0), p(2.0), Color::RED);
        g.add_line(p(0.0), p(1.0), Color::WHITE);

        let plan = DrawPlan::for_frame(&g).unwrap();
        let kinds: Vec<_> = plan.iter().map(|b| b.kind).collect();
        assert_eq!(kinds, BatchKind::ALL);
        assert_eq!(plan.upload_bytes(), 64 + 96 + 96);
    }

    #[test]
    fn alpha_batch_reads_alpha_set() {
        let mut g = Gizmos::default();
        g.add_tri(p(0.0), p(1.0), p(2.0), Color::GREEN);
        g.add_tri(p(3.0), p(4.0), p(5.0), Color::BLUE.with_alpha(0.25));
        g.add_tri(p(6.0), p(7.0), p(8.0), Color::BLUE.with_alpha(0.25));

        let plan = DrawPlan::for_frame(&g).unwrap();
        let alpha = plan.get(BatchKind::AlphaTris).unwrap();
        assert_eq!(alpha.index_count, 6);
        assert_eq!(alpha.bytes(&g), bytemuck::cast_slice::<GizmoTri, u8>(g.alpha_tris()));
        assert_ne!(alpha.bytes(&g), &bytemuck::cast_slice::<GizmoTri, u8>(g.opaque_tris())[..]);
    }

    #[test]
    fn only_alpha_tris_skip_depth_writes() {
        assert!(BatchKind::Lines.writes_depth());
        assert!(BatchKind::OpaqueTris.writes_depth());
        assert!(!BatchKind::AlphaTris.writes_depth());
    }
}
