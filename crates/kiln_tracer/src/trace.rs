//! Recursive Whitted-style shading.

use kiln_core::clamp_color;
use kiln_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

use crate::scene::Scene;

/// Shading constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Rays deeper than this return the background
    pub max_depth: u32,

    /// Color of misses and of rays past the depth limit
    pub background: Vec3,

    /// Offset along the normal for every secondary ray origin
    pub bias: f32,

    /// Index of refraction of transparent surfaces
    pub ior: f32,

    /// Share of the reflection in opaque mirrors
    pub reflective_weight: f32,

    pub fresnel_exponent: f32,
    pub fresnel_floor: f32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            background: Vec3::ZERO,
            bias: 1e-3,
            ior: 1.1,
            reflective_weight: 0.02,
            fresnel_exponent: 2.5,
            fresnel_floor: 0.05,
        }
    }
}

/// Shade `ray` against `scene`.
///
/// `depth` is 0 for primary rays. Reflective surfaces reached at
/// `max_depth` return the background without shading.
pub fn trace(scene: &Scene, ray: &Ray, depth: u32, config: &TraceConfig) -> Vec3 {
    if depth > config.max_depth {
        return config.background;
    }

    let Some((id, hit)) = scene.intersect(ray, None) else {
        return config.background;
    };

    let material = scene.object(id).material;
    let point = ray.at(hit.t);

    if !material.reflective {
        return clamp_color(direct_lighting(scene, point, hit.normal, config));
    }
    if depth >= config.max_depth {
        return config.background;
    }

    let dir = ray.direction;
    let inside = hit.normal.dot(dir) > 0.0;
    let normal = if inside { -hit.normal } else { hit.normal };
    let offset = normal * config.bias;

    let reflect_ray = Ray::normalized(point + offset, reflect(dir, normal));
    let reflect_color = trace(scene, &reflect_ray, depth + 1, config);

    let color = if material.transparent {
        let eta = if inside { config.ior } else { config.ior.recip() };
        let refract_color = match refract(dir, normal, eta) {
            Some(refracted) => {
                trace(scene, &Ray::normalized(point - offset, refracted), depth + 1, config)
            }
            None => reflect_color,
        };
        let kr = fresnel(normal.dot(-dir), config);
        refract_color.lerp(reflect_color, kr)
    } else {
        direct_lighting(scene, point, normal, config).lerp(reflect_color, config.reflective_weight)
    };

    clamp_color(color)
}

/// Ambient plus the unshadowed diffuse term of every light.
///
/// Shadow rays start `bias` above the surface and a light counts as blocked
/// when any hit lies strictly closer than the light.
pub fn direct_lighting(scene: &Scene, point: Vec3, normal: Vec3, config: &TraceConfig) -> Vec3 {
    let origin = point + normal * config.bias;
    let mut color = scene.ambient;

    for light in &scene.lights {
        let to_light = light.position - point;
        let distance_sq = to_light.length_squared();
        let dir = to_light.normalize_or_zero();
        if dir == Vec3::ZERO {
            continue;
        }

        let shadow_ray = Ray::new(origin, dir);
        let shadowed = scene
            .intersect(&shadow_ray, None)
            .is_some_and(|(_, shadow)| shadow.t * shadow.t < distance_sq);
        if shadowed {
            continue;
        }

        color += light.color * normal.dot(dir).max(0.0) * light.intensity;
    }

    color
}

/// Mirror `dir` about `normal`.
#[inline]
pub fn reflect(dir: Vec3, normal: Vec3) -> Vec3 {
    dir - 2.0 * normal * normal.dot(dir)
}

/// Bend `dir` through a surface whose `normal` faces against it.
///
/// `None` on total internal reflection.
pub fn refract(dir: Vec3, normal: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = (-normal).dot(dir);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(dir * eta + normal * (eta * cos_i - k.sqrt()))
}

/// Reflection weight for a surface seen at `facing` = cos of the view angle.
pub fn fresnel(facing: f32, config: &TraceConfig) -> f32 {
    let edge = (1.0 - facing).clamp(0.0, 1.0).powf(config.fresnel_exponent);
    edge + (1.0 - edge) * config.fresnel_floor
}
