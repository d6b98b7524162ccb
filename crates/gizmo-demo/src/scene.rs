//! Showcase frame: one of every shape, laid out on a grid around the origin.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use glam::{Mat4, Quat, Vec3, Vec4};

use gizmo_engine::{Color, Gizmos, SphereRange};

/// Wireframe sentinel: fill alpha of exactly 0.
const WIRE: Color = Color::new(0.2, 0.9, 1.0, 0.0);

fn point(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 1.0)
}

/// Camera looking at the origin from above and in front.
pub fn camera(aspect: f32) -> (Mat4, Mat4) {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 7.0, 12.0), Vec3::ZERO, Vec3::Y);
    let projection = Mat4::perspective_rh(FRAC_PI_4, aspect, 0.1, 100.0);
    (view, projection)
}

/// Records the showcase. `t` in seconds drives the animated pieces.
pub fn build(gizmos: &mut Gizmos, t: f32) {
    grid(gizmos, 6, 1.0);
    gizmos.add_transform(&Mat4::IDENTITY, 1.5);

    // Back row: boxes and a cylinder.
    let spin = Mat4::from_quat(Quat::from_rotation_y(t * 0.5));
    gizmos.add_aabb(point(-4.0, 0.5, -3.0), Vec4::new(0.5, 0.5, 0.5, 0.0), Color::RED, None);
    gizmos.add_aabb_filled(
        point(-1.5, 0.75, -3.0),
        Vec4::new(0.75, 0.75, 0.5, 0.0),
        Color::rgb(0.8, 0.3, 0.2),
        Some(&spin),
    );
    gizmos.add_cylinder_filled(point(1.5, 1.0, -3.0), 0.6, 1.0, 24, Color::rgb(0.3, 0.6, 0.9), None);
    gizmos.add_transform(&Mat4::from_translation(Vec3::new(4.0, 0.0, -3.0)), 1.0);

    // Middle row: flat shapes, filled and wireframe.
    gizmos.add_ring(point(-4.0, 0.01, 0.0), 0.5, 0.9, 32, Color::GREEN.with_alpha(0.6), None);
    gizmos.add_ring(point(-4.0, 0.01, 0.0), 1.1, 1.2, 32, WIRE, None);
    gizmos.add_disk(point(-1.5, 0.01, 0.0), 0.9, 32, Color::rgb(0.9, 0.8, 0.2), None);
    gizmos.add_arc(point(1.5, 0.01, 0.0), 1.0, FRAC_PI_4, t, 16, Color::BLUE.with_alpha(0.5), None);
    gizmos.add_arc(point(1.5, 0.01, 0.0), 1.2, FRAC_PI_4, t + PI, 16, WIRE, None);
    let tilt = Mat4::from_rotation_x(FRAC_PI_2);
    gizmos.add_arc_ring(point(4.0, 1.0, 0.0), 0.6, 1.0, 0.75 * PI, 0.0, 24, Color::rgb(0.9, 0.4, 0.9), Some(&tilt));

    // Front row: spheres and a spline.
    gizmos.add_sphere(point(-3.0, 1.0, 3.0), 1.0, 12, 24, Color::rgb(0.2, 0.7, 0.3), None, SphereRange::FULL);
    gizmos.add_sphere(
        point(0.0, 1.0, 3.0),
        1.0,
        12,
        16,
        Color::rgb(0.9, 0.5, 0.1).with_alpha(0.5),
        None,
        SphereRange::new(0.0, 1.5 * PI, -FRAC_PI_4, FRAC_PI_2),
    );
    gizmos.add_hermite_spline(
        point(2.0, 0.0, 3.0),
        point(5.0, 2.0, 3.0),
        Vec4::new(0.0, 6.0, 0.0, 0.0),
        Vec4::new(6.0, 0.0, 0.0, 0.0),
        32,
        Color::rgb(1.0, 0.6, 0.0),
    );

    // Gradient spokes.
    for i in 0..12 {
        let angle = i as f32 / 12.0 * TAU;
        let tip = point(angle.cos() * 6.5, 0.0, angle.sin() * 6.5);
        gizmos.add_line_gradient(point(0.0, 0.0, 0.0), tip, Color::WHITE, Color::TRANSPARENT);
    }
}

/// Square XZ grid of `2 * half + 1` lines per axis.
fn grid(gizmos: &mut Gizmos, half: i32, spacing: f32) {
    let extent = half as f32 * spacing;
    let color = Color::rgb(0.35, 0.35, 0.4);
    for i in -half..=half {
        let o = i as f32 * spacing;
        gizmos.add_line(point(o, 0.0, -extent), point(o, 0.0, extent), color);
        gizmos.add_line(point(-extent, 0.0, o), point(extent, 0.0, o), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showcase_fits_default_capacity() {
        let mut gizmos = Gizmos::default();
        build(&mut gizmos, 0.0);

        let stats = gizmos.stats();
        assert_eq!(stats.dropped(), 0);
        assert!(stats.lines > 0);
        assert!(stats.opaque_tris > 0);
        assert!(stats.alpha_tris > 0);
    }

    #[test]
    fn rebuild_after_clear_is_identical() {
        let mut gizmos = Gizmos::default();
        build(&mut gizmos, 1.0);
        let first = gizmos.stats();
        gizmos.clear();
        build(&mut gizmos, 1.0);
        assert_eq!(gizmos.stats(), first);
    }
}
