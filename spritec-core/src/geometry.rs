//! In-memory triangle meshes and the built-in sprite model.

use crate::math::{Rgba, Vec3, normalize_or_zero, rgba_from_u8};
use std::collections::HashMap;

/// Indexed triangle list with one normal per vertex and a flat material color.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    /// Per-vertex normals averaged over every vertex at the same position. Hard-edged meshes
    /// split vertices per face; pushing those apart along their face normals would tear the
    /// outline open at every edge.
    outline_normals: Vec<Vec3>,
    indices: Vec<u32>,
    color: Rgba,
}

impl Mesh {
    /// Build a mesh. Returns `None` if the attribute arrays disagree, the index count is not a
    /// multiple of three, or an index is out of range.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        indices: Vec<u32>,
        color: Rgba,
    ) -> Option<Self> {
        if positions.len() != normals.len() || indices.len() % 3 != 0 {
            return None;
        }
        if indices.iter().any(|&i| i as usize >= positions.len()) {
            return None;
        }
        let outline_normals = welded_normals(&positions, &normals);
        Some(Self {
            positions,
            normals,
            outline_normals,
            indices,
            color,
        })
    }

    /// Axis-aligned box centred on `center` with flat-shaded faces.
    pub fn cuboid(center: Vec3, half_extents: Vec3, color: Rgba) -> Self {
        let Vec3 { x: hx, y: hy, z: hz } = half_extents;
        // (normal, tangent u, tangent v) with u x v == normal so every face winds CCW from outside.
        let faces = [
            (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
            (Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
            (Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
            (Vec3::new(0.0, 0.0, -1.0), Vec3::new(-1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)),
        ];

        let scale = |v: Vec3| Vec3::new(v.x * hx, v.y * hy, v.z * hz);

        let mut positions = Vec::with_capacity(24);
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (n, u, v) in faces {
            let base = positions.len() as u32;
            for (su, sv) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                positions.push(center + scale(n + u * su + v * sv));
                normals.push(n);
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        let outline_normals = welded_normals(&positions, &normals);
        Self {
            positions,
            normals,
            outline_normals,
            indices,
            color,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn outline_normals(&self) -> &[Vec3] {
        &self.outline_normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn color(&self) -> Rgba {
        self.color
    }
}

fn welded_normals(positions: &[Vec3], normals: &[Vec3]) -> Vec<Vec3> {
    let key = |p: Vec3| [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
    let mut sums: HashMap<[u32; 3], Vec3> = HashMap::with_capacity(positions.len());
    for (&p, &n) in positions.iter().zip(normals) {
        let sum = sums.entry(key(p)).or_default();
        *sum += normalize_or_zero(n);
    }
    positions
        .iter()
        .map(|&p| normalize_or_zero(sums.get(&key(p)).copied().unwrap_or_default()))
        .collect()
}

/// The stock character: a blocky figure about four units tall standing on the origin.
///
/// It is deliberately asymmetric (a backpack and one raised arm) so turntable frames differ.
pub fn builtin_model() -> Vec<Mesh> {
    let skin = rgba_from_u8(0xF2, 0xC2, 0x96, 0xFF);
    let shirt = rgba_from_u8(0x3A, 0x6E, 0xC8, 0xFF);
    let pants = rgba_from_u8(0x4A, 0x3B, 0x2F, 0xFF);
    let pack = rgba_from_u8(0xB0, 0x3A, 0x2E, 0xFF);
    let hair = rgba_from_u8(0x2B, 0x1D, 0x14, 0xFF);

    vec![
        // legs
        Mesh::cuboid(Vec3::new(-0.35, 0.6, 0.0), Vec3::new(0.28, 0.6, 0.3), pants),
        Mesh::cuboid(Vec3::new(0.35, 0.6, 0.0), Vec3::new(0.28, 0.6, 0.3), pants),
        // torso
        Mesh::cuboid(Vec3::new(0.0, 1.9, 0.0), Vec3::new(0.7, 0.7, 0.4), shirt),
        // arms: left hangs, right raised
        Mesh::cuboid(Vec3::new(-0.95, 1.85, 0.0), Vec3::new(0.22, 0.65, 0.22), shirt),
        Mesh::cuboid(Vec3::new(0.95, 2.75, 0.0), Vec3::new(0.22, 0.65, 0.22), skin),
        // head and hair
        Mesh::cuboid(Vec3::new(0.0, 3.05, 0.0), Vec3::new(0.45, 0.45, 0.45), skin),
        Mesh::cuboid(Vec3::new(0.0, 3.55, -0.05), Vec3::new(0.48, 0.1, 0.5), hair),
        // backpack
        Mesh::cuboid(Vec3::new(0.0, 1.95, -0.65), Vec3::new(0.5, 0.55, 0.25), pack),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_faces_wind_counter_clockwise_from_outside() {
        let mesh = Mesh::cuboid(Vec3::zero(), Vec3::new(1.0, 2.0, 3.0), Rgba::white());
        assert_eq!(mesh.positions().len(), 24);
        assert_eq!(mesh.indices().len(), 36);
        let p = mesh.positions();
        for t in mesh.indices().chunks_exact(3) {
            let [a, b, c] = [t[0] as usize, t[1] as usize, t[2] as usize];
            let face_normal = (p[b] - p[a]).cross(p[c] - p[a]).normalized();
            assert!(
                face_normal.dot(mesh.normals()[a]) > 0.99,
                "triangle {a},{b},{c} winds inward"
            );
        }
    }

    #[test]
    fn cuboid_outline_normals_point_out_of_corners() {
        let mesh = Mesh::cuboid(Vec3::zero(), Vec3::new(1.0, 1.0, 1.0), Rgba::white());
        for (p, n) in mesh.positions().iter().zip(mesh.outline_normals()) {
            let expected = p.normalized();
            assert!((*n - expected).magnitude() < 1e-5, "{p:?} -> {n:?}");
        }
    }

    #[test]
    fn new_rejects_out_of_range_indices() {
        let p = vec![Vec3::zero(); 3];
        assert!(Mesh::new(p.clone(), p.clone(), vec![0, 1, 3], Rgba::white()).is_none());
        assert!(Mesh::new(p.clone(), p.clone(), vec![0, 1], Rgba::white()).is_none());
        assert!(Mesh::new(p.clone(), p, vec![0, 1, 2], Rgba::white()).is_some());
    }

    #[test]
    fn builtin_model_is_deterministic() {
        assert_eq!(builtin_model(), builtin_model());
    }
}
