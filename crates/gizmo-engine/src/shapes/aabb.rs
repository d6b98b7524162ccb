use glam::{Mat4, Vec4};

use crate::geometry::Gizmos;
use crate::paint::Color;

use super::common::local;

/// Corner pairs forming the 12 box edges: two face rings, then the verticals.
const EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Corner triples for the filled box, two per face, wound outwards for the
/// corner order produced by `filled_corners`.
const FACES: [[usize; 3]; 12] = [
    // top
    [2, 1, 0], [3, 2, 0],
    // bottom
    [5, 6, 4], [6, 7, 4],
    // front
    [4, 3, 0], [7, 3, 4],
    // back
    [1, 2, 5], [2, 6, 5],
    // left
    [0, 1, 4], [1, 5, 4],
    // right
    [2, 3, 7], [6, 2, 7],
];

/// Half-extent axes after the optional transform.
fn axes(extents: Vec4, transform: Option<&Mat4>) -> (Vec4, Vec4, Vec4) {
    (
        local(transform, Vec4::new(extents.x, 0.0, 0.0, 0.0)),
        local(transform, Vec4::new(0.0, extents.y, 0.0, 0.0)),
        local(transform, Vec4::new(0.0, 0.0, extents.z, 0.0)),
    )
}

impl Gizmos {
    /// Adds a wireframe box: 12 edges in `color`.
    ///
    /// `extents` are half-sizes along the local X/Y/Z axes (`w` ignored).
    pub fn add_aabb(&mut self, center: Vec4, extents: Vec4, color: Color, transform: Option<&Mat4>) {
        let (x, y, z) = axes(extents, transform);

        let corners = [
            center - x - z - y,
            center - x + z - y,
            center + x + z - y,
            center + x - z - y,
            center - x - z + y,
            center - x + z + y,
            center + x + z + y,
            center + x - z + y,
        ];

        for (a, b) in EDGES {
            self.add_line(corners[a], corners[b], color);
        }
    }

    /// Adds a filled box: white edges plus 12 triangles in `fill`.
    pub fn add_aabb_filled(&mut self, center: Vec4, extents: Vec4, fill: Color, transform: Option<&Mat4>) {
        let corners = filled_corners(center, extents, transform);

        for (a, b) in EDGES {
            self.add_line(corners[a], corners[b], Color::WHITE);
        }
        for [a, b, c] in FACES {
            self.add_tri(corners[a], corners[b], corners[c], fill);
        }
    }
}

fn filled_corners(center: Vec4, extents: Vec4, transform: Option<&Mat4>) -> [Vec4; 8] {
    let (x, y, z) = axes(extents, transform);
    [
        center - x + z + y,
        center - x - z + y,
        center + x - z + y,
        center + x + z + y,
        center - x + z - y,
        center - x - z - y,
        center + x - z - y,
        center + x + z - y,
    ]
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn endpoint_histogram(g: &Gizmos) -> Vec<(Vec4, usize)> {
        let mut seen: Vec<(Vec4, usize)> = Vec::new();
        for line in g.lines() {
            for p in [line.v0.position(), line.v1.position()] {
                match seen.iter_mut().find(|(q, _)| *q == p) {
                    Some((_, n)) => *n += 1,
                    None => seen.push((p, 1)),
                }
            }
        }
        seen
    }

    #[test]
    fn wireframe_cube_has_twelve_edges_three_per_corner() {
        let mut g = Gizmos::default();
        g.add_aabb(Vec4::new(0.0, 0.0, 0.0, 1.0), Vec4::new(1.0, 1.0, 1.0, 0.0), Color::GREEN, None);

        assert_eq!(g.lines().len(), 12);
        assert!(g.opaque_tris().is_empty());

        let hist = endpoint_histogram(&g);
        assert_eq!(hist.len(), 8);
        for (corner, n) in hist {
            assert_eq!(n, 3, "corner {corner:?}");
            assert_eq!(corner.x.abs(), 1.0);
            assert_eq!(corner.y.abs(), 1.0);
            assert_eq!(corner.z.abs(), 1.0);
            assert_eq!(corner.w, 1.0);
        }
    }

    #[test]
    fn filled_box_draws_white_edges_and_fill() {
        let mut g = Gizmos::default();
        let fill = Color::rgb(0.2, 0.4, 0.6);
        g.add_aabb_filled(Vec4::W, Vec4::ONE, fill, None);

        assert_eq!(g.lines().len(), 12);
        assert!(g.lines().iter().all(|l| l.v0.color() == Color::WHITE));
        assert_eq!(g.opaque_tris().len(), 12);
        assert!(g.opaque_tris().iter().all(|t| t.color() == fill));
        assert_eq!(endpoint_histogram(&g).len(), 8);
    }

    #[test]
    fn filled_box_faces_point_outwards() {
        let mut g = Gizmos::default();
        g.add_aabb_filled(Vec4::W, Vec4::ONE, Color::WHITE, None);

        for tri in g.opaque_tris() {
            let (a, b, c) = (
                tri.v0.position().truncate(),
                tri.v1.position().truncate(),
                tri.v2.position().truncate(),
            );
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward face at {centroid:?}");
        }
    }

    #[test]
    fn translucent_fill_goes_to_alpha_set() {
        let mut g = Gizmos::default();
        g.add_aabb_filled(Vec4::W, Vec4::ONE, Color::RED.with_alpha(0.25), None);
        assert!(g.opaque_tris().is_empty());
        assert_eq!(g.alpha_tris().len(), 12);
    }

    #[test]
    fn transform_scales_offsets_but_not_center() {
        let mut g = Gizmos::default();
        let scale = Mat4::from_scale(Vec3::splat(2.0)) * Mat4::from_translation(Vec3::new(100.0, 0.0, 0.0));
        g.add_aabb(Vec4::new(5.0, 0.0, 0.0, 1.0), Vec4::ONE, Color::WHITE, Some(&scale));

        for (corner, _) in endpoint_histogram(&g) {
            assert!(corner.x == 3.0 || corner.x == 7.0, "x = {}", corner.x);
            assert_eq!(corner.y.abs(), 2.0);
            assert_eq!(corner.z.abs(), 2.0);
        }
    }
}
