use glam::Vec4;

use crate::geometry::Gizmos;
use crate::paint::Color;

use super::common::clamp_segments;

/// Cubic Hermite basis `(h1, h2, h3, h4)` at `s` in `[0, 1]`.
#[inline]
fn hermite_basis(s: f32) -> (f32, f32, f32, f32) {
    let s2 = s * s;
    let s3 = s2 * s;
    (
        2.0 * s3 - 3.0 * s2 + 1.0,
        -2.0 * s3 + 3.0 * s2,
        s3 - 2.0 * s2 + s,
        s3 - s2,
    )
}

impl Gizmos {
    /// Adds a cubic Hermite curve from `start` to `end` as `segments`
    /// connected lines. Interpolated points have `w = 1`.
    pub fn add_hermite_spline(
        &mut self,
        start: Vec4,
        end: Vec4,
        tangent_start: Vec4,
        tangent_end: Vec4,
        segments: u32,
        color: Color,
    ) {
        let segments = clamp_segments(segments);

        let mut prev = start;
        for i in 1..=segments {
            let (h1, h2, h3, h4) = hermite_basis(i as f32 / segments as f32);
            let mut p = start * h1 + end * h2 + tangent_start * h3 + tangent_end * h4;
            p.w = 1.0;

            self.add_line(prev, p, color);
            prev = p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basis_endpoints() {
        assert_eq!(hermite_basis(0.0), (1.0, 0.0, 0.0, 0.0));
        assert_eq!(hermite_basis(1.0), (0.0, 1.0, 0.0, 0.0));
    }

    #[test]
    fn zero_segments_draws_one_line_to_end() {
        let mut g = Gizmos::default();
        let start = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let end = Vec4::new(4.0, 2.0, -1.0, 1.0);
        g.add_hermite_spline(start, end, Vec4::new(0.0, 5.0, 0.0, 0.0), Vec4::new(3.0, 0.0, 0.0, 0.0), 0, Color::WHITE);

        assert_eq!(g.lines().len(), 1);
        assert_eq!(g.lines()[0].v0.position(), start);
        assert_eq!(g.lines()[0].v1.position(), end);
    }

    #[test]
    fn segments_are_connected() {
        let mut g = Gizmos::default();
        let start = Vec4::new(-1.0, 0.0, 0.0, 1.0);
        let end = Vec4::new(1.0, 0.0, 0.0, 1.0);
        g.add_hermite_spline(start, end, Vec4::Y, -Vec4::Y, 16, Color::GREEN);

        let lines = g.lines();
        assert_eq!(lines.len(), 16);
        for pair in lines.windows(2) {
            assert_eq!(pair[0].v1.position(), pair[1].v0.position());
        }
        assert_eq!(lines[15].v1.position(), end);
    }

    #[test]
    fn straight_tangents_give_straight_curve() {
        let mut g = Gizmos::default();
        let start = Vec4::new(0.0, 0.0, 0.0, 1.0);
        let end = Vec4::new(3.0, 0.0, 0.0, 1.0);
        let tangent = Vec4::new(3.0, 0.0, 0.0, 0.0);
        g.add_hermite_spline(start, end, tangent, tangent, 3, Color::WHITE);

        for line in g.lines() {
            assert!(line.v1.position[1].abs() < 1e-6);
            assert!(line.v1.position[2].abs() < 1e-6);
        }
        assert!((g.lines()[0].v1.position[0] - 1.0).abs() < 1e-5);
    }
}
