use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat4, Vec4};

use crate::geometry::Gizmos;
use crate::paint::Color;

use super::common::{clamp_segments, local};

/// Tolerance when deciding whether a longitude span closes the circle.
const FULL_CIRCLE_EPSILON: f32 = 1e-5;

/// Angular coverage of a sphere, in radians.
///
/// Longitude runs around the Y axis; latitude from the -Y pole (`-π/2`) to
/// the +Y pole (`π/2`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphereRange {
    pub longitude_min: f32,
    pub longitude_max: f32,
    pub latitude_min: f32,
    pub latitude_max: f32,
}

impl SphereRange {
    pub const FULL: Self = Self {
        longitude_min: 0.0,
        longitude_max: TAU,
        latitude_min: -FRAC_PI_2,
        latitude_max: FRAC_PI_2,
    };

    #[inline]
    pub const fn new(longitude_min: f32, longitude_max: f32, latitude_min: f32, latitude_max: f32) -> Self {
        Self { longitude_min, longitude_max, latitude_min, latitude_max }
    }

    /// `true` if the longitude span covers a whole turn, in which case the
    /// last column wraps onto the first and no seam edge is drawn.
    #[inline]
    pub fn is_full_longitude(&self) -> bool {
        (self.longitude_max - self.longitude_min).abs() >= TAU - FULL_CIRCLE_EPSILON
    }
}

impl Default for SphereRange {
    fn default() -> Self {
        Self::FULL
    }
}

impl Gizmos {
    /// Adds a UV sphere: fill triangles plus white grid lines.
    ///
    /// Each quad of the `rings × segments` grid emits two triangles, one
    /// longitude edge and one latitude edge. A partial longitude range adds a
    /// closing longitude edge per ring along its last meridian.
    ///
    /// Tessellation stops once both the line set and the fill's triangle set
    /// are full; the skipped primitives are still counted as dropped.
    #[allow(clippy::too_many_arguments)]
    pub fn add_sphere(
        &mut self,
        center: Vec4,
        radius: f32,
        rings: u32,
        segments: u32,
        fill: Color,
        transform: Option<&Mat4>,
        range: SphereRange,
    ) {
        let rings = clamp_segments(rings) as usize;
        let segments = clamp_segments(segments) as usize;
        let full = range.is_full_longitude();
        let columns = if full { segments } else { segments.saturating_add(1) };

        // Quads that can still contribute a kept line or triangle. Columns
        // past `budget + 1` in a row are never reached before the sets fill.
        let (room_lines, room_tris) = self.room_for(fill);
        let budget = room_lines.div_ceil(2).max(room_tris.div_ceil(2));
        let row_len = columns.min(budget.saturating_add(1));

        let lat_span = range.latitude_max - range.latitude_min;
        let lon_span = range.longitude_max - range.longitude_min;
        let vertex = |row: usize, col: usize| {
            let latitude = range.latitude_min + lat_span * (row as f32 / rings as f32);
            let y = radius * latitude.sin();
            let ring_radius = radius * latitude.cos();
            let theta = range.longitude_min + lon_span * (col as f32 / segments as f32);
            let offset = Vec4::new(-ring_radius * theta.sin(), y, -ring_radius * theta.cos(), 0.0);
            center + local(transform, offset)
        };

        // Two grid rows (low, high) borrowed out of `self` so the append
        // calls below can take `&mut self`.
        let mut grid = std::mem::take(&mut self.scratch);
        grid.clear();
        grid.reserve(row_len.saturating_mul(2));
        grid.extend((0..row_len).map(|col| vertex(0, col)));

        'rings: for row in 0..rings {
            grid.truncate(row_len);
            grid.extend((0..row_len).map(|col| vertex(row + 1, col)));
            let (low, high) = grid.split_at(row_len);

            for col in 0..segments {
                if self.is_full_for(fill) {
                    let quads = (rings - row)
                        .saturating_mul(segments)
                        .saturating_sub(col);
                    let closing = if full { 0 } else { rings - row };
                    self.count_skipped(
                        quads.saturating_mul(2).saturating_add(closing),
                        quads.saturating_mul(2),
                        fill,
                    );
                    break 'rings;
                }

                let next = if full { (col + 1) % segments } else { col + 1 };

                self.add_line(low[col], high[col], Color::WHITE);
                self.add_line(high[next], high[col], Color::WHITE);

                self.add_tri(high[next], low[col], low[next], fill);
                self.add_tri(high[next], high[col], low[col], fill);
            }

            if !full {
                self.add_line(low[segments], high[segments], Color::WHITE);
            }

            grid.copy_within(row_len.., 0);
        }

        self.scratch = grid;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;
    use crate::geometry::GizmoCapacity;

    fn origin() -> Vec4 {
        Vec4::new(0.0, 0.0, 0.0, 1.0)
    }

    #[test]
    fn full_sphere_has_no_seam_duplicate() {
        let (rings, segments) = (6, 10);
        let mut g = Gizmos::default();
        g.add_sphere(origin(), 1.0, rings, segments, Color::RED, None, SphereRange::FULL);

        let longitude_edges = rings * segments;
        let latitude_edges = rings * segments;
        assert_eq!(g.lines().len() as u32, longitude_edges + latitude_edges);
        assert_eq!(g.opaque_tris().len() as u32, 2 * rings * segments);
    }

    #[test]
    fn partial_longitude_closes_last_meridian() {
        let (rings, segments) = (4, 8);
        let mut g = Gizmos::default();
        let range = SphereRange::new(0.0, PI, -FRAC_PI_2, FRAC_PI_2);
        g.add_sphere(origin(), 1.0, rings, segments, Color::RED, None, range);

        let longitude_edges = rings * (segments + 1);
        let latitude_edges = rings * segments;
        assert_eq!(g.lines().len() as u32, longitude_edges + latitude_edges);
        assert_eq!(g.opaque_tris().len() as u32, 2 * rings * segments);
    }

    #[test]
    fn partial_longitude_stays_in_range() {
        let mut g = Gizmos::default();
        // Longitude 0..π maps to x <= 0 with the -sin convention.
        let range = SphereRange::new(0.0, PI, -FRAC_PI_2, FRAC_PI_2);
        g.add_sphere(origin(), 1.0, 4, 8, Color::RED, None, range);

        for line in g.lines() {
            assert!(line.v0.position[0] <= 1e-5);
            assert!(line.v1.position[0] <= 1e-5);
        }
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let mut g = Gizmos::default();
        let center = Vec4::new(1.0, 2.0, 3.0, 1.0);
        g.add_sphere(center, 2.5, 5, 7, Color::GREEN.with_alpha(0.5), None, SphereRange::default());

        assert!(g.opaque_tris().is_empty());
        for tri in g.alpha_tris() {
            for v in [tri.v0, tri.v1, tri.v2] {
                let d = (v.position() - center).truncate().length();
                assert!((d - 2.5).abs() < 1e-4, "distance {d}");
            }
        }
    }

    #[test]
    fn degenerate_counts_clamped() {
        let mut g = Gizmos::default();
        g.add_sphere(origin(), 1.0, 0, 0, Color::RED, None, SphereRange::FULL);
        assert_eq!(g.lines().len(), 2);
        assert_eq!(g.opaque_tris().len(), 2);
    }

    #[test]
    fn scratch_grid_is_reused() {
        let mut g = Gizmos::default();
        g.add_sphere(origin(), 1.0, 8, 8, Color::RED, None, SphereRange::FULL);
        let cap = g.scratch.capacity();
        g.clear();
        g.add_sphere(origin(), 1.0, 4, 4, Color::RED, None, SphereRange::FULL);
        assert_eq!(g.scratch.capacity(), cap);
    }

    // ── budget ────────────────────────────────────────────────────────────

    #[test]
    fn huge_segment_count_does_not_overflow() {
        let mut g = Gizmos::new(GizmoCapacity::new(64, 64));
        let range = SphereRange::new(0.0, 1.0, -0.5, 0.5);
        g.add_sphere(origin(), 1.0, 1, u32::MAX, Color::RED, None, range);

        let stats = g.stats();
        assert_eq!(stats.lines, 64);
        assert_eq!(stats.opaque_tris, 64);
        assert!(stats.dropped_lines > 0);
        assert!(stats.dropped_opaque_tris > 0);
        assert!(g.scratch.capacity() < 1024);
    }

    #[test]
    fn huge_grid_is_bounded_by_capacity() {
        let mut g = Gizmos::new(GizmoCapacity::new(100, 10));
        g.add_sphere(origin(), 1.0, 70_000, 70_000, Color::RED, None, SphereRange::FULL);

        let stats = g.stats();
        assert_eq!(stats.lines, 100);
        assert_eq!(stats.opaque_tris, 10);
        // 70_000² quads, each two lines and two triangles.
        assert_eq!(stats.dropped_lines, 2 * 70_000 * 70_000 - 100);
        assert_eq!(stats.dropped_opaque_tris, 2 * 70_000 * 70_000 - 10);
        assert!(g.scratch.capacity() < 1024);
    }

    #[test]
    fn truncated_sphere_keeps_prefix_of_full_tessellation() {
        let mut whole = Gizmos::default();
        whole.add_sphere(origin(), 1.0, 6, 9, Color::RED, None, SphereRange::FULL);

        let mut capped = Gizmos::new(GizmoCapacity::new(20, 7));
        capped.add_sphere(origin(), 1.0, 6, 9, Color::RED, None, SphereRange::FULL);

        assert_eq!(capped.lines(), &whole.lines()[..20]);
        assert_eq!(capped.opaque_tris(), &whole.opaque_tris()[..7]);
        let total = capped.stats().lines + capped.stats().dropped_lines;
        assert_eq!(total, whole.lines().len());
    }

    #[test]
    fn full_range_detection() {
        assert!(SphereRange::FULL.is_full_longitude());
        assert!(SphereRange::new(-PI, PI, -1.0, 1.0).is_full_longitude());
        assert!(!SphereRange::new(0.0, 1.5 * PI, -1.0, 1.0).is_full_longitude());
    }
}
