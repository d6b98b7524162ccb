//! Flat XZ-plane shapes: ring, disk, arc, arc-ring.
//!
//! Filled variants are double-sided (each face is emitted in both windings).
//! A fill alpha of exactly 0 switches to outlines drawn in the fill color
//! forced opaque.

use std::f32::consts::TAU;

use glam::{Mat4, Vec4};

use crate::geometry::Gizmos;
use crate::paint::Color;

use super::common::{clamp_segments, local, xz_point};

/// Angular domain `[start, start + step * segments]`.
#[derive(Copy, Clone)]
struct Sweep {
    start: f32,
    step: f32,
    segments: u32,
}

impl Sweep {
    fn full(segments: u32) -> Self {
        let segments = clamp_segments(segments);
        Self { start: 0.0, step: TAU / segments as f32, segments }
    }

    fn arc(half_angle: f32, rotation: f32, segments: u32) -> Self {
        let segments = clamp_segments(segments);
        Self {
            start: rotation - half_angle,
            step: (2.0 * half_angle) / segments as f32,
            segments,
        }
    }

    #[inline]
    fn angle(&self, i: u32) -> f32 {
        self.start + i as f32 * self.step
    }

    #[inline]
    fn end(&self) -> f32 {
        self.angle(self.segments)
    }
}

impl Gizmos {
    /// Adds a double-sided band between `inner_radius` and `outer_radius`.
    ///
    /// Wireframe (fill alpha 0): inner and outer rims only.
    pub fn add_ring(
        &mut self,
        center: Vec4,
        inner_radius: f32,
        outer_radius: f32,
        segments: u32,
        fill: Color,
        transform: Option<&Mat4>,
    ) {
        self.band(center, inner_radius, outer_radius, Sweep::full(segments), fill, transform);
    }

    /// Adds a double-sided disk.
    ///
    /// Wireframe (fill alpha 0): outer rim only.
    pub fn add_disk(
        &mut self,
        center: Vec4,
        radius: f32,
        segments: u32,
        fill: Color,
        transform: Option<&Mat4>,
    ) {
        self.fan(center, radius, Sweep::full(segments), fill, transform);
    }

    /// Adds a circular sector spanning `rotation ± half_angle` (radians).
    ///
    /// Wireframe (fill alpha 0): outer rim plus two radial edges from the
    /// center to the sector ends.
    #[allow(clippy::too_many_arguments)]
    pub fn add_arc(
        &mut self,
        center: Vec4,
        radius: f32,
        half_angle: f32,
        rotation: f32,
        segments: u32,
        fill: Color,
        transform: Option<&Mat4>,
    ) {
        let sweep = Sweep::arc(half_angle, rotation, segments);
        self.fan(center, radius, sweep, fill, transform);

        if fill.is_wireframe() {
            let solid = fill.solid();
            let first = center + local(transform, xz_point(sweep.start, radius));
            let last = center + local(transform, xz_point(sweep.end(), radius));
            self.add_line(center, first, solid);
            self.add_line(center, last, solid);
        }
    }

    /// Adds a banded sector spanning `rotation ± half_angle` (radians).
    ///
    /// Wireframe (fill alpha 0): inner and outer rims plus two radial edges
    /// joining them at the sector ends.
    #[allow(clippy::too_many_arguments)]
    pub fn add_arc_ring(
        &mut self,
        center: Vec4,
        inner_radius: f32,
        outer_radius: f32,
        half_angle: f32,
        rotation: f32,
        segments: u32,
        fill: Color,
        transform: Option<&Mat4>,
    ) {
        let sweep = Sweep::arc(half_angle, rotation, segments);
        self.band(center, inner_radius, outer_radius, sweep, fill, transform);

        if fill.is_wireframe() {
            let solid = fill.solid();
            for angle in [sweep.start, sweep.end()] {
                let inner = center + local(transform, xz_point(angle, inner_radius));
                let outer = center + local(transform, xz_point(angle, outer_radius));
                self.add_line(inner, outer, solid);
            }
        }
    }

    /// Triangle fan around `center` (disk, arc).
    fn fan(&mut self, center: Vec4, radius: f32, sweep: Sweep, fill: Color, transform: Option<&Mat4>) {
        let solid = fill.solid();

        for i in 0..sweep.segments {
            let v1 = center + local(transform, xz_point(sweep.angle(i), radius));
            let v2 = center + local(transform, xz_point(sweep.angle(i + 1), radius));

            if fill.is_wireframe() {
                self.add_line(v1, v2, solid);
            } else {
                self.add_tri(v2, v1, center, fill);
                self.add_tri(center, v1, v2, fill);
            }
        }
    }

    /// Quad strip between two radii (ring, arc-ring).
    fn band(
        &mut self,
        center: Vec4,
        inner_radius: f32,
        outer_radius: f32,
        sweep: Sweep,
        fill: Color,
        transform: Option<&Mat4>,
    ) {
        let solid = fill.solid();

        for i in 0..sweep.segments {
            let (a1, a2) = (sweep.angle(i), sweep.angle(i + 1));
            let outer1 = center + local(transform, xz_point(a1, outer_radius));
            let outer2 = center + local(transform, xz_point(a2, outer_radius));
            let inner1 = center + local(transform, xz_point(a1, inner_radius));
            let inner2 = center + local(transform, xz_point(a2, inner_radius));

            if fill.is_wireframe() {
                self.add_line(inner1, inner2, solid);
                self.add_line(outer1, outer2, solid);
            } else {
                self.add_tri(inner1, outer1, outer2, fill);
                self.add_tri(outer2, inner2, inner1, fill);

                self.add_tri(outer2, outer1, inner1, fill);
                self.add_tri(inner1, inner2, outer2, fill);
            }
        }
    }
}
