//! Scene contents: the object tree, lights and the ambient term.

use std::f32::consts::TAU;

use kiln_math::{Aabb, Ray, Vec3};
use log::info;
use serde::{Deserialize, Serialize};

use crate::object::{HitInfo, Material, SceneObject};
use crate::octree::{ObjectId, SceneTree};

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// Which demo objects to build and how the moving light behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Half size of the octree root box on every axis
    pub root_half_extent: f32,

    pub spheres: bool,
    pub cuboid: bool,
    pub pyramid: bool,
    /// The teapot; slow without a mesh hierarchy
    pub model: bool,
    pub walls: bool,

    /// Orbit phase advance per frame, in turns
    pub light_step: f32,

    /// Orbit radius of the moving light
    pub light_radius: f32,

    pub ambient: Vec3,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            root_half_extent: 200.0,
            spheres: true,
            cuboid: true,
            pyramid: true,
            model: false,
            walls: true,
            light_step: 0.005,
            light_radius: 35.0,
            ambient: Vec3::new(0.1, 0.125, 0.125),
        }
    }
}

const SPHERE_GRID: usize = 2;
const SPHERE_RADIUS: f32 = 3.0;
const SPHERE_INTERVAL: f32 = SPHERE_RADIUS * 2.0 + 1.0;

/// Center of the light orbit; the orbit lies in the y = 0 plane.
const LIGHT_ORBIT_CENTER: Vec3 = Vec3::new(0.0, 0.0, -50.0);

#[derive(Debug, Clone)]
pub struct Scene {
    pub tree: SceneTree,
    pub lights: Vec<Light>,
    pub ambient: Vec3,
    light_phase: f32,
    light_step: f32,
    light_radius: f32,
}

impl Scene {
    /// An empty scene with no lights.
    pub fn new(bounds: Aabb, ambient: Vec3) -> Self {
        Self {
            tree: SceneTree::new(bounds),
            lights: Vec::new(),
            ambient,
            light_phase: 0.5,
            light_step: 0.0,
            light_radius: 0.0,
        }
    }

    /// The demo room: a sphere grid, a box, a pyramid, four walls and two lights.
    pub fn demo(config: &SceneConfig) -> Self {
        let bounds =
            Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(config.root_half_extent));
        let mut scene = Self::new(bounds, config.ambient);
        scene.light_step = config.light_step;
        scene.light_radius = config.light_radius;

        if config.spheres {
            let offset = -((SPHERE_GRID - 1) as f32) * 0.5 * SPHERE_INTERVAL;
            for i in 0..SPHERE_GRID {
                for j in 0..SPHERE_GRID {
                    let center = Vec3::new(
                        offset + i as f32 * SPHERE_INTERVAL,
                        offset + j as f32 * SPHERE_INTERVAL,
                        (j % 2) as f32 * -10.0 - 60.0 + offset,
                    );
                    let material = Material::new(i % 2 == 0, j % 2 == 0);
                    scene.add(SceneObject::sphere(center, SPHERE_RADIUS).with_material(material));
                }
            }
        }

        if config.cuboid {
            scene.add(SceneObject::cuboid(
                Vec3::new(-30.0, -10.0, -90.0),
                Vec3::new(4.0, 2.0, 7.0),
            ));
        }

        if config.pyramid {
            scene.add(SceneObject::pyramid(Vec3::new(20.0, 5.0, -65.0), 4.0));
        }

        if config.model {
            scene.add(SceneObject::model(Vec3::new(-5.0, -15.0, -90.0), 2.5));
        }

        if config.walls {
            scene.add(SceneObject::plane(Vec3::new(0.0, 0.0, -100.0), Vec3::Z));
            scene.add(SceneObject::plane(Vec3::new(-40.0, 0.0, 0.0), Vec3::X));
            scene.add(SceneObject::plane(Vec3::new(40.0, 0.0, 0.0), Vec3::NEG_X));
            scene.add(SceneObject::plane(Vec3::new(0.0, -15.0, 0.0), Vec3::Y));
        }

        scene.lights.push(Light {
            position: Vec3::ZERO,
            color: Vec3::new(0.5, 0.2, 1.0),
            intensity: 0.35,
        });
        scene.lights.push(Light {
            position: Vec3::new(0.0, 50.0, -60.0),
            color: Vec3::new(1.0, 0.6, 0.6),
            intensity: 0.75,
        });
        scene.place_orbit_light();

        info!(
            "Built demo scene: {} objects in {} nodes, {} lights",
            scene.tree.len(),
            scene.tree.nodes().len(),
            scene.lights.len()
        );
        scene
    }

    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        self.tree.insert(object)
    }

    /// Current orbit phase of the moving light, in turns.
    pub fn light_phase(&self) -> f32 {
        self.light_phase
    }

    /// Advance the moving light one step along its orbit.
    pub fn update(&mut self) {
        self.light_phase += self.light_step;
        if self.light_phase > 1.0 {
            self.light_phase -= 1.0;
        }
        self.place_orbit_light();
    }

    fn place_orbit_light(&mut self) {
        let Some(light) = self.lights.first_mut() else {
            return;
        };
        let angle = TAU * self.light_phase;
        light.position = LIGHT_ORBIT_CENTER
            + Vec3::new(angle.cos(), 0.0, angle.sin()) * self.light_radius;
    }

    /// Nearest hit along `ray`, skipping `exclude`.
    pub fn intersect(&self, ray: &Ray, exclude: Option<ObjectId>) -> Option<(ObjectId, HitInfo)> {
        self.tree.intersect(ray, exclude)
    }

    pub fn object(&self, id: ObjectId) -> &SceneObject {
        self.tree.object(id)
    }
}
