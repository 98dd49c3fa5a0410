//! Triangle meshes and ray casting against them.
//!
//! A [`TriMesh`] is an indexed triangle soup in its own local space. A
//! [`HeadModel`] places one in the world and keeps a world-space copy for
//! ray casting, so hits come back in world coordinates and can be mapped
//! into the model's local frame.

use glam::{Affine3A, Vec3};

const EPS: f32 = 1e-7;

/// Half-line with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Nearest intersection of a ray with a mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    pub point: Vec3,
    /// Unit face normal, facing back toward the ray origin.
    pub normal: Vec3,
    pub distance: f32,
    pub face: usize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn max_dim(&self) -> f32 {
        self.size().max_element()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<[u32; 3]>,
}

impl TriMesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<[u32; 3]>) -> Self {
        Self { positions, indices }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }

    fn triangle(&self, face: usize) -> Option<[Vec3; 3]> {
        let [a, b, c] = *self.indices.get(face)?;
        Some([
            *self.positions.get(a as usize)?,
            *self.positions.get(b as usize)?,
            *self.positions.get(c as usize)?,
        ])
    }

    /// Nearest two-sided hit in front of the ray origin.
    ///
    /// Faces referencing missing vertices and degenerate faces are skipped.
    pub fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        let mut best: Option<SurfaceHit> = None;
        for face in 0..self.indices.len() {
            let Some([a, b, c]) = self.triangle(face) else {
                continue;
            };
            let Some(t) = intersect_triangle(ray, a, b, c) else {
                continue;
            };
            if best.is_some_and(|h| t >= h.distance) {
                continue;
            }
            let Some(mut normal) = (b - a).cross(c - a).try_normalize() else {
                continue;
            };
            if normal.dot(ray.dir) > 0.0 {
                normal = -normal;
            }
            best = Some(SurfaceHit {
                point: ray.at(t),
                normal,
                distance: t,
                face,
            });
        }
        best
    }

    /// Area-weighted smooth normals, one per position.
    pub fn vertex_normals(&self) -> Vec<Vec3> {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for face in 0..self.indices.len() {
            let Some([a, b, c]) = self.triangle(face) else {
                continue;
            };
            let n = (b - a).cross(c - a);
            for i in self.indices[face] {
                acc[i as usize] += n;
            }
        }
        acc.into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
            .collect()
    }

    pub fn append(&mut self, other: &TriMesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.indices
            .extend(other.indices.iter().map(|t| t.map(|i| i + base)));
    }

    pub fn transformed(&self, m: Affine3A) -> TriMesh {
        TriMesh {
            positions: self
                .positions
                .iter()
                .map(|p| m.transform_point3(*p))
                .collect(),
            indices: self.indices.clone(),
        }
    }
}

/// Möller–Trumbore, accepting both windings.
fn intersect_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv = 1.0 / det;
    let s = ray.origin - a;
    let u = s.dot(p) * inv;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv;
    (t > EPS).then_some(t)
}

/// A mesh placed in the world.
#[derive(Clone, Debug)]
pub struct HeadModel {
    local: TriMesh,
    world: TriMesh,
    world_from_local: Affine3A,
    local_from_world: Affine3A,
}

impl HeadModel {
    pub fn new(local: TriMesh, world_from_local: Affine3A) -> Self {
        let world = local.transformed(world_from_local);
        Self {
            local,
            world,
            world_from_local,
            local_from_world: world_from_local.inverse(),
        }
    }

    pub fn identity(local: TriMesh) -> Self {
        Self::new(local, Affine3A::IDENTITY)
    }

    /// Scale so the largest bbox side equals `target_size`, centered at the origin.
    pub fn fitted(local: TriMesh, target_size: f32) -> Self {
        let transform = match local.bounds() {
            Some(bb) if bb.max_dim() > EPS => {
                let scale = target_size / bb.max_dim();
                Affine3A::from_scale_rotation_translation(
                    Vec3::splat(scale),
                    glam::Quat::IDENTITY,
                    -bb.center() * scale,
                )
            }
            _ => Affine3A::IDENTITY,
        };
        Self::new(local, transform)
    }

    pub fn local_mesh(&self) -> &TriMesh {
        &self.local
    }

    pub fn world_mesh(&self) -> &TriMesh {
        &self.world
    }

    pub fn world_from_local(&self) -> Affine3A {
        self.world_from_local
    }

    pub fn raycast(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.world.raycast(ray)
    }

    #[inline]
    pub fn to_local(&self, world_point: Vec3) -> Vec3 {
        self.local_from_world.transform_point3(world_point)
    }

    #[inline]
    pub fn to_world(&self, local_point: Vec3) -> Vec3 {
        self.world_from_local.transform_point3(local_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_at_z(z: f32) -> TriMesh {
        TriMesh::new(
            vec![
                Vec3::new(-1.0, -1.0, z),
                Vec3::new(1.0, -1.0, z),
                Vec3::new(1.0, 1.0, z),
                Vec3::new(-1.0, 1.0, z),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn raycast_hits_both_windings() {
        let mut m = quad_at_z(0.0);
        let toward = Ray::new(Vec3::new(0.2, 0.1, 5.0), Vec3::NEG_Z);
        let hit = m.raycast(&toward).unwrap();
        assert!((hit.distance - 5.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);

        for t in m.indices.iter_mut() {
            t.swap(1, 2);
        }
        let hit = m.raycast(&toward).unwrap();
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn raycast_picks_nearest() {
        let mut m = quad_at_z(0.0);
        m.append(&quad_at_z(2.0));
        let hit = m.raycast(&Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)).unwrap();
        assert!((hit.point.z - 2.0).abs() < 1e-5);
        assert!(hit.face >= 2);
    }

    #[test]
    fn raycast_ignores_hits_behind_origin() {
        let m = quad_at_z(0.0);
        assert!(m.raycast(&Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z)).is_none());
    }

    #[test]
    fn fitted_model_centers_and_scales() {
        let mut m = quad_at_z(3.0);
        m.positions.iter_mut().for_each(|p| p.x *= 2.0);
        let head = HeadModel::fitted(m, 2.2);
        let bb = head.world_mesh().bounds().unwrap();
        assert!(bb.center().length() < 1e-5);
        assert!((bb.max_dim() - 2.2).abs() < 1e-5);
        let p = Vec3::new(0.3, -0.2, 0.0);
        assert!((head.to_world(head.to_local(p)) - p).length() < 1e-5);
    }
}
