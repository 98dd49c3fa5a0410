//! Procedural meshes: the placeholder head and the brain shell.

use crate::constants::{
    nose_position_vec3, BRAIN_RADIUS, BRAIN_SUBDIVISIONS, FALLBACK_HEAD_RADIUS,
    FALLBACK_HEAD_SEGMENTS, NOSE_HEIGHT, NOSE_RADIUS,
};
use crate::mesh::TriMesh;
use fnv::FnvHashMap;
use glam::{Affine3A, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Latitude/longitude sphere centered at the origin.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> TriMesh {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut positions = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    for r in 0..=rings {
        let phi = PI * r as f32 / rings as f32;
        let (sp, cp) = phi.sin_cos();
        for s in 0..=segments {
            let theta = TAU * s as f32 / segments as f32;
            let (st, ct) = theta.sin_cos();
            positions.push(Vec3::new(-ct * sp, cp, st * sp) * radius);
        }
    }
    let row = segments + 1;
    let mut indices = Vec::with_capacity((segments * rings * 2) as usize);
    for r in 0..rings {
        for s in 0..segments {
            let a = r * row + s;
            let b = a + row;
            if r != 0 {
                indices.push([a, b, a + 1]);
            }
            if r != rings - 1 {
                indices.push([a + 1, b, b + 1]);
            }
        }
    }
    TriMesh::new(positions, indices)
}

/// Cone along +Y with its base centered at `-height/2` and tip at `+height/2`.
pub fn cone(radius: f32, height: f32, segments: u32) -> TriMesh {
    let segments = segments.max(3);
    let half = height * 0.5;
    let mut positions = vec![Vec3::new(0.0, half, 0.0), Vec3::new(0.0, -half, 0.0)];
    for s in 0..segments {
        let theta = TAU * s as f32 / segments as f32;
        let (st, ct) = theta.sin_cos();
        positions.push(Vec3::new(st * radius, -half, ct * radius));
    }
    let mut indices = Vec::with_capacity(segments as usize * 2);
    for s in 0..segments {
        let a = 2 + s;
        let b = 2 + (s + 1) % segments;
        indices.push([0, a, b]);
        indices.push([1, b, a]);
    }
    TriMesh::new(positions, indices)
}

/// Subdivided icosahedron projected onto a sphere.
pub fn icosphere(radius: f32, subdivisions: u32) -> TriMesh {
    let t = (1.0 + 5.0_f32.sqrt()) * 0.5;
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
    let mut indices: Vec<[u32; 3]> = vec![
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
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let m = ((positions[a as usize] + positions[b as usize]) * 0.5).normalize();
                positions.push(m);
                positions.len() as u32 - 1
            })
        };
        let mut next = Vec::with_capacity(indices.len() * 4);
        for [a, b, c] in indices {
            let ab = midpoint(a, b, &mut positions);
            let bc = midpoint(b, c, &mut positions);
            let ca = midpoint(c, a, &mut positions);
            next.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        indices = next;
    }
    positions.iter_mut().for_each(|p| *p *= radius);
    TriMesh::new(positions, indices)
}

/// Placeholder head used when no mesh asset is available: a sphere with a
/// forward-pointing nose so the viewer can tell front from back.
pub fn fallback_head() -> TriMesh {
    let mut head = uv_sphere(
        FALLBACK_HEAD_RADIUS,
        FALLBACK_HEAD_SEGMENTS,
        FALLBACK_HEAD_SEGMENTS,
    );
    let nose = cone(NOSE_RADIUS, NOSE_HEIGHT, 24).transformed(
        Affine3A::from_rotation_translation(
            Quat::from_rotation_x(FRAC_PI_2),
            nose_position_vec3(),
        ),
    );
    head.append(&nose);
    head
}

pub fn brain_shell() -> TriMesh {
    icosphere(BRAIN_RADIUS, BRAIN_SUBDIVISIONS)
}
