use glam::Mat4;

use crate::geometry::Gizmos;
use crate::paint::Color;

impl Gizmos {
    /// Adds the three basis axes of `transform` as red/green/blue lines
    /// starting at its translation, each `scale` times the basis column.
    pub fn add_transform(&mut self, transform: &Mat4, scale: f32) {
        let origin = transform.w_axis;

        self.add_line(origin, origin + transform.x_axis * scale, Color::RED);
        self.add_line(origin, origin + transform.y_axis * scale, Color::GREEN);
        self.add_line(origin, origin + transform.z_axis * scale, Color::BLUE);
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;

    #[test]
    fn identity_emits_unit_axes() {
        let mut g = Gizmos::default();
        g.add_transform(&Mat4::IDENTITY, 1.0);

        let lines = g.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].v1.position(), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(lines[1].v1.position(), Vec4::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(lines[2].v1.position(), Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(lines[0].v0.color(), Color::RED);
        assert_eq!(lines[1].v1.color(), Color::GREEN);
        assert_eq!(lines[2].v0.color(), Color::BLUE);
    }

    #[test]
    fn translation_and_scale() {
        let mut g = Gizmos::default();
        g.add_transform(&Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)), 2.0);

        let origin = Vec4::new(1.0, 2.0, 3.0, 1.0);
        for line in g.lines() {
            assert_eq!(line.v0.position(), origin);
        }
        assert_eq!(g.lines()[0].v1.position(), Vec4::new(3.0, 2.0, 3.0, 1.0));
        assert_eq!(g.lines()[2].v1.position(), Vec4::new(1.0, 2.0, 5.0, 1.0));
        assert!(g.opaque_tris().is_empty());
    }
}
