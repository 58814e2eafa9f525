//! Ray / primitive intersection tests.
//!
//! All tests are pure functions of the ray and the primitive. Ray directions
//! are expected to be unit length so that `t` is a distance.

use kiln_math::{Ray, Vec3};

/// Intersection distances along a ray, nearest first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Roots {
    Miss,
    One(f32),
    Two(f32, f32),
}

impl Roots {
    /// The nearest reported distance.
    #[inline]
    pub fn nearest(self) -> Option<f32> {
        match self {
            Roots::Miss => None,
            Roots::One(t) | Roots::Two(t, _) => Some(t),
        }
    }

    pub fn count(self) -> usize {
        match self {
            Roots::Miss => 0,
            Roots::One(_) => 1,
            Roots::Two(..) => 2,
        }
    }
}

/// Sphere hit by projecting the center onto the ray.
///
/// Misses when the center projects behind the origin. When the origin is
/// inside the sphere only the far root is reported.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Roots {
    let radius_sq = radius.max(0.0) * radius.max(0.0);
    let co = center - ray.origin;
    let along = ray.direction.dot(co);
    if along < 0.0 {
        return Roots::Miss;
    }

    let distance_sq = co.dot(co) - along * along;
    if distance_sq > radius_sq {
        Roots::Miss
    } else if distance_sq == radius_sq {
        Roots::One(along)
    } else {
        let half_chord = (radius_sq - distance_sq).sqrt();
        let t0 = along - half_chord;
        let t1 = along + half_chord;
        if t0 < 0.0 {
            Roots::One(t1)
        } else {
            Roots::Two(t0, t1)
        }
    }
}

/// Ray / plane in point-normal form.
///
/// With `dual_face` off, rays arriving from behind the plane miss.
pub fn intersect_plane(ray: &Ray, point: Vec3, normal: Vec3, dual_face: bool) -> Option<f32> {
    let dot_dn = ray.direction.dot(normal);
    if dot_dn == 0.0 || (!dual_face && dot_dn > 0.0) {
        return None;
    }
    let t = (point - ray.origin).dot(normal) / dot_dn;
    (t >= 0.0).then_some(t)
}

/// The fixed basis boxes are aligned to.
pub const BOX_AXES: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];

/// Slab test against a box with half extents `extents` along [`BOX_AXES`].
///
/// Axes the ray runs parallel to are checked after the slab interval is
/// known.
pub fn intersect_box(ray: &Ray, center: Vec3, extents: Vec3) -> Roots {
    let oc = center - ray.origin;
    let extents = extents.to_array();
    let mut dir_dot = [0.0f32; 3];
    let mut oc_dot = [0.0f32; 3];
    let mut parallel = [false; 3];
    let mut span: Option<(f32, f32)> = None;

    for i in 0..3 {
        dir_dot[i] = ray.direction.dot(BOX_AXES[i]);
        oc_dot[i] = oc.dot(BOX_AXES[i]);

        if dir_dot[i] == 0.0 {
            parallel[i] = true;
            continue;
        }

        let e = if dir_dot[i] > 0.0 { extents[i] } else { -extents[i] };
        let inv = 1.0 / dir_dot[i];
        let near = (oc_dot[i] - e) * inv;
        let far = (oc_dot[i] + e) * inv;

        span = match span {
            None => Some((near, far)),
            Some((t0, t1)) => {
                let t0 = t0.max(near);
                let t1 = t1.min(far);
                if t0 > t1 {
                    return Roots::Miss;
                }
                Some((t0, t1))
            }
        };
    }

    let Some((t0, t1)) = span else {
        return Roots::Miss;
    };

    for i in 0..3 {
        if parallel[i]
            && ((oc_dot[i] - t0 * dir_dot[i]).abs() > extents[i]
                || (oc_dot[i] - t1 * dir_dot[i]).abs() > extents[i])
        {
            return Roots::Miss;
        }
    }

    if t1 < 0.0 {
        Roots::Miss
    } else if t0 < 0.0 {
        Roots::One(t1)
    } else {
        Roots::Two(t0, t1)
    }
}

/// A ray / triangle hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub t: f32,
    pub u: f32,
    pub v: f32,
    /// `normalize(cross(v2 - v0, v1 - v0))`; winding decides the side
    pub normal: Vec3,
}

/// Möller–Trumbore ray / triangle test. Hits behind the origin are rejected.
pub fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<TriangleHit> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;

    let pv = ray.direction.cross(e2);
    let det = e1.dot(pv);
    if det == 0.0 {
        return None;
    }
    let inv_det = 1.0 / det;

    let tv = ray.origin - v0;
    let u = tv.dot(pv) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qv = tv.cross(e1);
    let v = ray.direction.dot(qv) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = e2.dot(qv) * inv_det;
    if t < 0.0 {
        return None;
    }

    Some(TriangleHit {
        t,
        u,
        v,
        normal: e2.cross(e1).normalize(),
    })
}
