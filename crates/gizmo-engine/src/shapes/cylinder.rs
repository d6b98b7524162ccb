use std::f32::consts::TAU;

use glam::{Mat4, Vec4};

use crate::geometry::Gizmos;
use crate::paint::Color;

use super::common::{clamp_segments, local, xz_point};

impl Gizmos {
    /// Adds a Y-aligned cylinder with caps, plus white rim and side edges.
    ///
    /// Per segment: 4 triangles (top cap, bottom cap, two side halves) and
    /// 3 lines (top rim, vertical edge, bottom rim).
    pub fn add_cylinder_filled(
        &mut self,
        center: Vec4,
        radius: f32,
        half_length: f32,
        segments: u32,
        fill: Color,
        transform: Option<&Mat4>,
    ) {
        let segments = clamp_segments(segments);
        let step = TAU / segments as f32;

        let up = Vec4::new(0.0, half_length, 0.0, 0.0);
        let top_center = center + local(transform, up);
        let bottom_center = center + local(transform, -up);

        for i in 0..segments {
            let rim1 = xz_point(i as f32 * step, radius);
            let rim2 = xz_point((i + 1) as f32 * step, radius);

            let top1 = center + local(transform, rim1 + up);
            let top2 = center + local(transform, rim2 + up);
            let bottom1 = center + local(transform, rim1 - up);
            let bottom2 = center + local(transform, rim2 - up);

            self.add_tri(top_center, top1, top2, fill);
            self.add_tri(bottom_center, bottom2, bottom1, fill);
            self.add_tri(top2, top1, bottom1, fill);
            self.add_tri(bottom1, bottom2, top2, fill);

            self.add_line(top1, top2, Color::WHITE);
            self.add_line(top1, bottom1, Color::WHITE);
            self.add_line(bottom1, bottom2, Color::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_segment() {
        let mut g = Gizmos::default();
        g.add_cylinder_filled(Vec4::W, 1.0, 2.0, 12, Color::BLUE, None);
        assert_eq!(g.opaque_tris().len(), 48);
        assert_eq!(g.lines().len(), 36);
        assert!(g.lines().iter().all(|l| l.v0.color() == Color::WHITE));
    }

    #[test]
    fn zero_segments_clamped_to_one() {
        let mut g = Gizmos::default();
        g.add_cylinder_filled(Vec4::W, 1.0, 1.0, 0, Color::BLUE, None);
        assert_eq!(g.opaque_tris().len(), 4);
        assert_eq!(g.lines().len(), 3);
    }

    #[test]
    fn vertices_lie_on_caps() {
        let mut g = Gizmos::default();
        g.add_cylinder_filled(Vec4::new(0.0, 10.0, 0.0, 1.0), 2.0, 0.5, 8, Color::BLUE.with_alpha(0.5), None);

        assert!(g.opaque_tris().is_empty());
        for tri in g.alpha_tris() {
            for v in [tri.v0, tri.v1, tri.v2] {
                let y = v.position[1];
                assert!((y - 10.5).abs() < 1e-5 || (y - 9.5).abs() < 1e-5, "y = {y}");
            }
        }
    }
}
