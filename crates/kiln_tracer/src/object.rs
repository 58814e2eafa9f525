//! Scene objects: a closed set of shapes with a material and a bounding box.

use kiln_math::{Aabb, Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::geometry::{
    intersect_box, intersect_plane, intersect_sphere, intersect_triangle, BOX_AXES,
};
use crate::mesh_data::{TEAPOT_INDICES, TEAPOT_VERTS};

/// Surface response. Both flags off means diffuse only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub reflective: bool,
    pub transparent: bool,
}

impl Material {
    pub const DIFFUSE: Material = Material {
        reflective: false,
        transparent: false,
    };

    pub fn new(reflective: bool, transparent: bool) -> Self {
        Self {
            reflective,
            transparent,
        }
    }
}

/// Nearest hit on one object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    pub t: f32,
    pub normal: Vec3,
}

/// Pyramid corners for unit extent.
pub const PYRAMID_VERTS: [Vec3; 4] = [
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(1.0, 0.0, -0.5),
    Vec3::new(-0.5, -0.866, -0.5),
    Vec3::new(-0.5, 0.866, -0.5),
];

/// Pyramid faces as index triples into [`PYRAMID_VERTS`].
pub const PYRAMID_FACES: [[usize; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 2, 3]];

/// Geometry payload of a scene object.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere { center: Vec3, radius: f32 },
    Plane { point: Vec3, normal: Vec3 },
    Cuboid { center: Vec3, extents: Vec3 },
    Pyramid { center: Vec3, verts: [Vec3; 4] },
    /// Triangle soup; `verts` are relative to `center`.
    Mesh {
        center: Vec3,
        verts: Vec<Vec3>,
        indices: Vec<[u16; 3]>,
    },
}

impl Shape {
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Sphere { .. } => "sphere",
            Shape::Plane { .. } => "plane",
            Shape::Cuboid { .. } => "box",
            Shape::Pyramid { .. } => "pyramid",
            Shape::Mesh { .. } => "mesh",
        }
    }
}

/// A primitive placed in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub material: Material,
    aabb: Aabb,
}

impl SceneObject {
    fn new(shape: Shape) -> Self {
        let aabb = bounding_box(&shape);
        Self {
            shape,
            material: Material::DIFFUSE,
            aabb,
        }
    }

    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::new(Shape::Sphere {
            center,
            radius: radius.max(0.0),
        })
    }

    /// An infinite plane. Hits count from both sides.
    pub fn plane(point: Vec3, normal: Vec3) -> Self {
        Self::new(Shape::Plane {
            point,
            normal: normal.normalize_or_zero(),
        })
    }

    /// A box aligned to the world axes with half extents `extents`.
    pub fn cuboid(center: Vec3, extents: Vec3) -> Self {
        Self::new(Shape::Cuboid {
            center,
            extents: extents.abs(),
        })
    }

    /// A four-faced pyramid scaled by `extent`.
    pub fn pyramid(center: Vec3, extent: f32) -> Self {
        Self::new(Shape::Pyramid {
            center,
            verts: PYRAMID_VERTS.map(|v| v * extent),
        })
    }

    /// A triangle mesh with `verts` relative to `center`.
    ///
    /// Triangles that reference a missing vertex are dropped.
    pub fn mesh(center: Vec3, verts: Vec<Vec3>, indices: Vec<[u16; 3]>) -> Self {
        let total = indices.len();
        let indices: Vec<[u16; 3]> = indices
            .into_iter()
            .filter(|tri| tri.iter().all(|&i| (i as usize) < verts.len()))
            .collect();
        if indices.len() != total {
            log::warn!(
                "Dropped {} mesh triangles with indices past {} vertices",
                total - indices.len(),
                verts.len()
            );
        }
        Self::new(Shape::Mesh {
            center,
            verts,
            indices,
        })
    }

    /// The static teapot, scaled by `size`.
    pub fn model(center: Vec3, size: f32) -> Self {
        let points: &[[f32; 3]] = bytemuck::cast_slice(&TEAPOT_VERTS[..]);
        let verts = points.iter().map(|&p| Vec3::from_array(p) * size).collect();
        let indices = TEAPOT_INDICES
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        Self::mesh(center, verts, indices)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Bounding box, fixed at construction.
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Nearest hit strictly closer than `max_t`.
    pub fn intersect(&self, ray: &Ray, max_t: f32) -> Option<HitInfo> {
        match &self.shape {
            Shape::Sphere { center, radius } => {
                let t = intersect_sphere(ray, *center, *radius).nearest()?;
                (t < max_t).then(|| HitInfo {
                    t,
                    normal: (ray.at(t) - *center).normalize(),
                })
            }
            Shape::Plane { point, normal } => {
                let t = intersect_plane(ray, *point, *normal, true)?;
                (t < max_t).then_some(HitInfo { t, normal: *normal })
            }
            Shape::Cuboid { center, extents } => {
                let t = intersect_box(ray, *center, *extents).nearest()?;
                (t < max_t).then(|| HitInfo {
                    t,
                    normal: box_normal(ray.at(t) - *center, *extents, ray.direction),
                })
            }
            Shape::Pyramid { center, verts } => nearest_face(
                ray,
                max_t,
                PYRAMID_FACES.iter().map(|f| f.map(|i| *center + verts[i])),
            ),
            Shape::Mesh {
                center,
                verts,
                indices,
            } => nearest_face(
                ray,
                max_t,
                indices.iter().filter_map(|f| {
                    let [a, b, c] = f.map(|i| verts.get(i as usize).copied());
                    Some([*center + a?, *center + b?, *center + c?])
                }),
            ),
        }
    }
}

/// Face normal of the box side the offset `local` points through.
///
/// The axis with the largest `|dot(dir, axis)| / extent` wins; ties go to
/// the later axis. A zero-thickness axis the ray crosses is the face,
/// facing back along `ray_dir`.
fn box_normal(local: Vec3, extents: Vec3, ray_dir: Vec3) -> Vec3 {
    let extents = extents.abs();
    if let Some(i) = (0..3).find(|&i| extents[i] <= f32::EPSILON && ray_dir[i] != 0.0) {
        return if ray_dir[i] < 0.0 {
            BOX_AXES[i]
        } else {
            -BOX_AXES[i]
        };
    }

    let dir = local.normalize_or_zero();
    let score = |i: usize| dir.dot(BOX_AXES[i]).abs() / extents[i].max(f32::EPSILON);
    let (x, y, z) = (score(0), score(1), score(2));
    let axis = if x > y {
        if x > z {
            0
        } else {
            2
        }
    } else if y > z {
        1
    } else {
        2
    };
    if dir[axis] > 0.0 {
        BOX_AXES[axis]
    } else {
        -BOX_AXES[axis]
    }
}

fn nearest_face(
    ray: &Ray,
    max_t: f32,
    faces: impl Iterator<Item = [Vec3; 3]>,
) -> Option<HitInfo> {
    let mut best: Option<HitInfo> = None;
    for [v0, v1, v2] in faces {
        let Some(hit) = intersect_triangle(ray, v0, v1, v2) else {
            continue;
        };
        let limit = best.map_or(max_t, |b| b.t);
        if hit.t < limit {
            best = Some(HitInfo {
                t: hit.t,
                normal: hit.normal,
            });
        }
    }
    best
}

fn bounding_box(shape: &Shape) -> Aabb {
    match shape {
        Shape::Sphere { center, radius } => {
            Aabb::from_center_half_extents(*center, Vec3::splat(*radius))
        }
        Shape::Plane { .. } => Aabb::UNIVERSE,
        Shape::Cuboid { center, extents } => Aabb::from_center_half_extents(*center, extents.abs()),
        Shape::Pyramid { center, verts } => {
            Aabb::from_point_cloud(verts.iter().map(|v| *center + *v))
        }
        Shape::Mesh { center, verts, .. } => {
            Aabb::from_point_cloud(verts.iter().map(|v| *center + *v))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh_data::TEAPOT_VERT_COUNT;

    #[test]
    fn test_sphere_hit_respects_max_t() {
        let sphere = SceneObject::sphere(Vec3::new(0.0, 0.0, -10.0), 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let hit = sphere.intersect(&ray, f32::MAX).unwrap();
        assert_eq!(hit.t, 8.0);
        assert_eq!(hit.normal, Vec3::Z);

        assert!(sphere.intersect(&ray, 8.0).is_none());
        assert!(sphere.intersect(&ray, 8.5).is_some());
    }

    #[test]
    fn test_plane_hits_both_sides() {
        let plane = SceneObject::plane(Vec3::new(0.0, -15.0, 0.0), Vec3::new(0.0, 3.0, 0.0));
        let down = Ray::new(Vec3::ZERO, Vec3::NEG_Y);
        let up = Ray::new(Vec3::new(0.0, -20.0, 0.0), Vec3::Y);

        assert_eq!(plane.intersect(&down, f32::MAX).unwrap().t, 15.0);
        let hit = plane.intersect(&up, f32::MAX).unwrap();
        assert_eq!(hit.t, 5.0);
        assert_eq!(hit.normal, Vec3::Y);
        assert_eq!(*plane.aabb(), Aabb::UNIVERSE);
    }

    #[test]
    fn test_box_normals() {
        let cuboid = SceneObject::cuboid(Vec3::new(0.0, 0.0, -20.0), Vec3::new(4.0, 2.0, 7.0));

        let front = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = cuboid.intersect(&front, f32::MAX).unwrap();
        assert_eq!(hit.t, 13.0);
        assert_eq!(hit.normal, Vec3::Z);

        let top = Ray::new(Vec3::new(1.0, 10.0, -20.0), Vec3::NEG_Y);
        let hit = cuboid.intersect(&top, f32::MAX).unwrap();
        assert_eq!(hit.t, 8.0);
        assert_eq!(hit.normal, Vec3::Y);

        let side = Ray::new(Vec3::new(-10.0, 0.5, -22.0), Vec3::X);
        assert_eq!(cuboid.intersect(&side, f32::MAX).unwrap().normal, Vec3::NEG_X);
    }

    #[test]
    fn test_flat_box_normal_is_finite() {
        let slab = SceneObject::cuboid(Vec3::new(0.0, 0.0, -20.0), Vec3::new(4.0, 0.0, 7.0));

        let down = Ray::new(Vec3::new(1.0, 10.0, -20.0), Vec3::NEG_Y);
        let hit = slab.intersect(&down, f32::MAX).unwrap();
        assert_eq!(hit.t, 10.0);
        assert_eq!(hit.normal, Vec3::Y);

        let up = Ray::new(Vec3::new(-2.0, -5.0, -18.0), Vec3::Y);
        assert_eq!(slab.intersect(&up, f32::MAX).unwrap().normal, Vec3::NEG_Y);

        // Negative extents are stored as their magnitude
        let flipped = SceneObject::cuboid(Vec3::ZERO, Vec3::new(-1.0, 2.0, -3.0));
        let Shape::Cuboid { extents, .. } = flipped.shape else {
            panic!("not a box");
        };
        assert_eq!(extents, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_mesh_drops_bad_triangles() {
        let verts = vec![
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let mesh = SceneObject::mesh(Vec3::new(0.0, 0.0, -5.0), verts, vec![[0, 1, 2], [0, 1, 9]]);
        let Shape::Mesh { indices, .. } = &mesh.shape else {
            panic!("not a mesh");
        };
        assert_eq!(indices, &vec![[0, 1, 2]]);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(mesh.intersect(&ray, f32::MAX).unwrap().t, 5.0);
    }

    #[test]
    fn test_hand_built_mesh_skips_missing_verts() {
        let mesh = SceneObject {
            shape: Shape::Mesh {
                center: Vec3::ZERO,
                verts: vec![Vec3::new(-1.0, -1.0, -3.0), Vec3::new(1.0, -1.0, -3.0)],
                indices: vec![[0, 1, 2]],
            },
            ..SceneObject::sphere(Vec3::ZERO, 1.0)
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(mesh.intersect(&ray, f32::MAX).is_none());
    }

    #[test]
    fn test_pyramid_aabb_contains_translated_verts() {
        let center = Vec3::new(20.0, 5.0, -65.0);
        let pyramid = SceneObject::pyramid(center, 4.0);
        let Shape::Pyramid { verts, .. } = &pyramid.shape else {
            panic!("not a pyramid");
        };
        for v in verts {
            assert!(pyramid.aabb().contains_point(center + *v));
        }
        assert!(pyramid.aabb().contains_point(center));
    }

    #[test]
    fn test_pyramid_hit_from_apex_side() {
        let center = Vec3::new(0.0, 0.0, -20.0);
        let pyramid = SceneObject::pyramid(center, 4.0);
        // Apex is at z = -16, facing the origin
        let ray = Ray::new(Vec3::new(0.2, 0.1, 0.0), Vec3::NEG_Z);
        let hit = pyramid.intersect(&ray, f32::MAX).unwrap();
        assert!(hit.t > 15.9 && hit.t < 22.0);
        assert!(pyramid.intersect(&ray, hit.t).is_none());
    }

    #[test]
    fn test_model_mesh() {
        let center = Vec3::new(-5.0, -15.0, -90.0);
        let model = SceneObject::model(center, 2.5);
        let Shape::Mesh { verts, indices, .. } = &model.shape else {
            panic!("not a mesh");
        };
        assert_eq!(verts.len(), TEAPOT_VERT_COUNT);
        assert_eq!(indices.len(), 253);
        assert!(indices.iter().flatten().all(|&i| (i as usize) < verts.len()));
        for v in verts {
            assert!(model.aabb().contains_point(center + *v));
        }

        // Straight down onto the lid knob, just off its apex
        let ray = Ray::new(center + Vec3::new(0.1, 20.0, 0.05), Vec3::NEG_Y);
        let hit = model.intersect(&ray, f32::MAX).unwrap();
        assert!(hit.t > 15.0 && hit.t < 20.0);
    }

    #[test]
    fn test_material_builder() {
        let s = SceneObject::sphere(Vec3::ZERO, 1.0).with_material(Material::new(true, false));
        assert!(s.material.reflective);
        assert!(!s.material.transparent);
        assert_eq!(s.shape.name(), "sphere");
    }
}
