//! Triangle meshes for the scene primitives.

use fnv::FnvHashMap;
use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Icosahedron subdivided `subdivisions` times and projected onto a sphere.
pub fn icosphere(radius: f32, subdivisions: u32) -> Mesh {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let mut positions: Vec<Vec3> = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .iter()
    .map(|p| Vec3::from_array(*p).normalize())
    .collect();
    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: FnvHashMap<(u32, u32), u32> = FnvHashMap::default();
        let mut midpoint = |a: u32, b: u32, positions: &mut Vec<Vec3>| -> u32 {
            let key = if a < b { (a, b) } else { (b, a) };
            *midpoints.entry(key).or_insert_with(|| {
                let m = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize();
                positions.push(m);
                (positions.len() - 1) as u32
            })
        };
        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(a, b, &mut positions);
            let bc = midpoint(b, c, &mut positions);
            let ca = midpoint(c, a, &mut positions);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        faces = next;
    }

    let normals = positions.clone();
    let positions = positions.into_iter().map(|p| p * radius).collect();
    Mesh {
        positions,
        normals,
        indices: faces.into_iter().flatten().collect(),
    }
}

/// Unit cube centered on the origin, flat-shaded (24 vertices).
pub fn cuboid() -> Mesh {
    let mut mesh = Mesh::default();
    let faces = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::Z, Vec3::NEG_X),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    for (n, u, v) in faces {
        let base = mesh.positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            mesh.positions.push((n + u * su + v * sv) * 0.5);
            mesh.normals.push(n);
        }
        // Wind counter-clockwise seen from outside.
        let ccw = u.cross(v).dot(n) > 0.0;
        if ccw {
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        } else {
            mesh.indices
                .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
        }
    }
    mesh
}

/// Torus in the XY plane around +Z.
pub fn torus(major: f32, minor: f32, radial_segments: u32, tubular_segments: u32) -> Mesh {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);
    let mut mesh = Mesh::default();
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let center = Vec3::new(major * u.cos(), major * u.sin(), 0.0);
            let p = Vec3::new(
                (major + minor * v.cos()) * u.cos(),
                (major + minor * v.cos()) * u.sin(),
                minor * v.sin(),
            );
            mesh.positions.push(p);
            mesh.normals.push((p - center).normalize_or_zero());
        }
    }
    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// Capsule along +Y: a cylinder of `length` capped by two hemispheres.
pub fn capsule(radius: f32, length: f32, rings: u32, segments: u32) -> Mesh {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let half = length * 0.5;
    let mut mesh = Mesh::default();
    // Latitude rows: top hemisphere, then bottom hemisphere shifted down.
    let total_rows = rings * 2 + 1;
    for r in 0..=total_rows {
        let (phi, offset) = if r <= rings {
            (r as f32 / rings as f32 * PI * 0.5, half)
        } else {
            ((r - 1) as f32 / rings as f32 * PI * 0.5, -half)
        };
        let y = phi.cos();
        let ring_r = phi.sin();
        for s in 0..=segments {
            let theta = s as f32 / segments as f32 * TAU;
            let n = Vec3::new(ring_r * theta.cos(), y, ring_r * theta.sin());
            mesh.positions.push(n * radius + Vec3::Y * offset);
            mesh.normals.push(n);
        }
    }
    let row = segments + 1;
    for r in 0..total_rows {
        for s in 0..segments {
            let a = r * row + s;
            let b = a + row;
            mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
        }
    }
    mesh
}

/// Smooth normals from face areas. `normals` is resized to match.
pub fn recompute_normals(positions: &[Vec3], indices: &[u32], normals: &mut Vec<Vec3>) {
    normals.clear();
    normals.resize(positions.len(), Vec3::ZERO);
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    for n in normals.iter_mut() {
        *n = n.normalize_or_zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icosphere_vertex_counts_follow_subdivision() {
        assert_eq!(icosphere(1.0, 0).positions.len(), 12);
        assert_eq!(icosphere(1.0, 1).positions.len(), 42);
        assert_eq!(icosphere(1.0, 2).positions.len(), 162);
        assert_eq!(icosphere(1.0, 2).triangle_count(), 320);
    }

    #[test]
    fn icosphere_lies_on_radius() {
        let m = icosphere(2.5, 2);
        for p in &m.positions {
            assert!((p.length() - 2.5).abs() < 1e-4);
        }
    }

    #[test]
    fn recomputed_sphere_normals_point_outward() {
        let m = icosphere(1.0, 2);
        let mut normals = Vec::new();
        recompute_normals(&m.positions, &m.indices, &mut normals);
        for (p, n) in m.positions.iter().zip(normals.iter()) {
            assert!(p.normalize().dot(*n) > 0.9);
        }
    }

    #[test]
    fn cuboid_faces_wind_outward() {
        let m = cuboid();
        assert_eq!(m.positions.len(), 24);
        for tri in m.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| m.positions[i as usize]);
            let face_n = (b - a).cross(c - a);
            assert!(face_n.dot(m.normals[tri[0] as usize]) > 0.0);
        }
    }

    #[test]
    fn torus_and_capsule_indices_are_in_range() {
        for m in [torus(1.0, 0.2, 12, 48), capsule(0.1, 0.4, 6, 12)] {
            let n = m.positions.len() as u32;
            assert!(m.indices.iter().all(|i| *i < n));
            assert_eq!(m.normals.len(), m.positions.len());
        }
    }
}
