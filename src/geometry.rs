use std::collections::HashSet;

use glam::{Vec2, Vec3};

/// GPU ready vertex/index arrays for one renderable.
///
/// Vertices are laid out as `position.xyz` followed by `normal.xyz`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Geometry {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertex_count() as u32;
        self.vertices.extend_from_slice(&[
            position.x, position.y, position.z, normal.x, normal.y, normal.z,
        ]);
        index
    }

    /// Axis-aligned cube centered on the origin with the given edge length.
    pub fn cube(edge: f32) -> Self {
        let half = edge * 0.5;
        let mut geometry = Self::default();
        let faces: [(Vec3, Vec3, Vec3); 6] = [
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        ];
        for (normal, right, up) in faces {
            let base = geometry.vertex_count() as u32;
            for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let position = (normal + right * u + up * v) * half;
                geometry.push_vertex(position, normal);
            }
            geometry
                .indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        geometry
    }
}

/// Closed convex faces describing one glyph inside a unit em square.
///
/// Faces are wound counter-clockwise. A glyph larger than a single convex
/// region (a ring, say) tiles it with several faces that share edges.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphOutline {
    pub faces: Vec<Vec<Vec2>>,
}

/// Extrudes a glyph outline along +Z into a solid mesh.
///
/// Faces are scaled by `size` and extruded to `depth`: front caps at
/// `z = depth`, back caps at `z = 0`, and side walls only along boundary
/// edges. Edges shared by two faces are interior and produce no wall.
pub fn extrude_outline(outline: &GlyphOutline, size: f32, depth: f32) -> Geometry {
    let mut geometry = Geometry::default();

    for face in &outline.faces {
        if face.len() < 3 {
            continue;
        }
        let front: Vec<u32> = face
            .iter()
            .map(|point| geometry.push_vertex((*point * size).extend(depth), Vec3::Z))
            .collect();
        for i in 1..front.len() - 1 {
            geometry
                .indices
                .extend_from_slice(&[front[0], front[i], front[i + 1]]);
        }
        let back: Vec<u32> = face
            .iter()
            .map(|point| geometry.push_vertex((*point * size).extend(0.0), Vec3::NEG_Z))
            .collect();
        for i in 1..back.len() - 1 {
            geometry
                .indices
                .extend_from_slice(&[back[0], back[i + 1], back[i]]);
        }
    }

    for (start, end) in boundary_edges(&outline.faces) {
        let normal = wall_normal(start, end);
        let bottom_start = (start * size).extend(0.0);
        let bottom_end = (end * size).extend(0.0);
        let top_end = (end * size).extend(depth);
        let top_start = (start * size).extend(depth);
        let base = geometry.push_vertex(bottom_start, normal);
        geometry.push_vertex(bottom_end, normal);
        geometry.push_vertex(top_end, normal);
        geometry.push_vertex(top_start, normal);
        geometry
            .indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    geometry
}

type PointKey = (u32, u32);

fn point_key(point: Vec2) -> PointKey {
    (point.x.to_bits(), point.y.to_bits())
}

/// Directed edges whose reverse does not occur in any other face.
fn boundary_edges(faces: &[Vec<Vec2>]) -> Vec<(Vec2, Vec2)> {
    let mut directed: HashSet<(PointKey, PointKey)> = HashSet::new();
    for face in faces {
        for (i, start) in face.iter().enumerate() {
            let end = face[(i + 1) % face.len()];
            directed.insert((point_key(*start), point_key(end)));
        }
    }

    let mut edges = Vec::new();
    for face in faces {
        for (i, start) in face.iter().enumerate() {
            let end = face[(i + 1) % face.len()];
            if !directed.contains(&(point_key(end), point_key(*start))) {
                edges.push((*start, end));
            }
        }
    }
    edges
}

/// Outward normal of an extruded wall, for counter-clockwise winding.
fn wall_normal(start: Vec2, end: Vec2) -> Vec3 {
    let edge = end - start;
    Vec3::new(edge.y, -edge.x, 0.0).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn cube_has_expected_buffers() {
        let cube = Geometry::cube(0.5);
        assert_eq!(cube.vertex_count(), 24);
        assert_eq!(cube.triangle_count(), 12);
        for chunk in cube.vertices.chunks_exact(6) {
            let normal = Vec3::new(chunk[3], chunk[4], chunk[5]);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            let position = Vec3::new(chunk[0], chunk[1], chunk[2]);
            assert!(position.abs().max_element() <= 0.25 + 1e-6);
        }
    }

    #[test]
    fn square_extrusion_produces_caps_and_walls() {
        let outline = GlyphOutline {
            faces: vec![unit_square()],
        };
        let geometry = extrude_outline(&outline, 1.0, 0.2);
        // 4 front + 4 back + 4 walls of 4 vertices each
        assert_eq!(geometry.vertex_count(), 24);
        // 2 + 2 cap triangles plus 2 per wall
        assert_eq!(geometry.triangle_count(), 12);
    }

    #[test]
    fn shared_edges_produce_no_walls() {
        let left = unit_square();
        let right = vec![
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
        ];
        let edges = boundary_edges(&[left, right]);
        // two abutting squares share one edge pair; six edges remain
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn wall_normals_point_outward() {
        assert_eq!(
            wall_normal(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)),
            Vec3::new(0.0, -1.0, 0.0)
        );
        assert_eq!(
            wall_normal(Vec2::new(1.0, 1.0), Vec2::new(0.0, 1.0)),
            Vec3::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn front_cap_sits_at_extrusion_depth() {
        let outline = GlyphOutline {
            faces: vec![unit_square()],
        };
        let geometry = extrude_outline(&outline, 2.0, 0.4);
        let front = Vec3::new(
            geometry.vertices[0],
            geometry.vertices[1],
            geometry.vertices[2],
        );
        assert_eq!(front.z, 0.4);
        let normal = Vec3::new(
            geometry.vertices[3],
            geometry.vertices[4],
            geometry.vertices[5],
        );
        assert_eq!(normal, Vec3::Z);
        // scale applies in the plane, not along the extrusion
        assert!(geometry
            .vertices
            .chunks_exact(6)
            .all(|chunk| chunk[0] <= 2.0 && chunk[2] <= 0.4));
    }

    #[test]
    fn degenerate_faces_are_skipped() {
        let outline = GlyphOutline {
            faces: vec![vec![Vec2::ZERO, Vec2::ONE]],
        };
        let geometry = extrude_outline(&outline, 1.0, 0.2);
        // a two-point face has no caps, and its edges cancel pairwise
        assert_eq!(geometry.triangle_count(), 0);
        assert_eq!(geometry.vertex_count(), 0);
    }
}
