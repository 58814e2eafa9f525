use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box used by the scene octree.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// Unbounded shapes (planes) use [`Aabb::UNIVERSE`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB spanning `center +/- half_extents`.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::from_points(center - half_extents, center + half_extents)
    }

    /// Smallest AABB holding every point in `points`. Empty input gives [`Aabb::EMPTY`].
    pub fn from_point_cloud(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(Aabb::EMPTY, |acc, p| acc.expand_point(p))
    }

    /// Grow the box so it includes `p`.
    pub fn expand_point(&self, p: Vec3) -> Aabb {
        Self {
            x: self.x.include(p.x),
            y: self.y.include(p.y),
            z: self.z.include(p.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Returns the center point of the bounding box.
    pub fn center(&self) -> Vec3 {
        Vec3::new(self.x.center(), self.y.center(), self.z.center())
    }

    /// True if `other` lies entirely inside this box. Touching faces count as inside.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.x.contains_interval(&other.x)
            && self.y.contains_interval(&other.y)
            && self.z.contains_interval(&other.z)
    }

    /// True if the point lies inside or on the box.
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// One of the eight boxes obtained by splitting at the center on all three axes.
    ///
    /// Bit 0 of `index` selects the +X half, bit 1 the +Y half, bit 2 the +Z half.
    pub fn octant(&self, index: usize) -> Aabb {
        let c = self.center();
        let pick = |interval: Interval, mid: f32, upper: bool| {
            if upper {
                Interval::new(mid, interval.max)
            } else {
                Interval::new(interval.min, mid)
            }
        };
        Self {
            x: pick(self.x, c.x, index & 1 != 0),
            y: pick(self.y, c.y, index & 2 != 0),
            z: pick(self.z, c.z, index & 4 != 0),
        }
    }

    /// Test whether a ray enters this box anywhere along `t >= 0`.
    ///
    /// Uses the slab method. Only answers hit / no hit; no distances are reported.
    pub fn hit(&self, r: &Ray) -> bool {
        let mut ray_t = Interval::new(0.0, f32::INFINITY);

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis];
            let mut t0 = (slab.min - r.origin[axis]) * adinv;
            let mut t1 = (slab.max - r.origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            // f32::max/min drop a NaN operand, which happens for a zero direction
            // component when the origin sits exactly on a slab face.
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max < ray_t.min {
                return false;
            }
        }

        true
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.min(), Vec3::ZERO);
        assert_eq!(aabb.max(), Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_point_cloud() {
        let aabb = Aabb::from_point_cloud([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 4.0, 0.0),
            Vec3::new(0.0, 0.0, 3.0),
        ]);
        assert_eq!(aabb.min(), Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max(), Vec3::new(1.0, 4.0, 3.0));
        assert_eq!(Aabb::from_point_cloud(std::iter::empty()), Aabb::EMPTY);
    }

    #[test]
    fn test_aabb_expand_point_grows_to_cover() {
        let a = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let b = Aabb::from_points(Vec3::new(2.0, -3.0, 0.0), Vec3::new(4.0, 0.0, 5.0));
        let merged = a.expand_point(b.min()).expand_point(b.max());

        assert!(merged.contains(&a));
        assert!(merged.contains(&b));
        assert_eq!(merged.min(), Vec3::new(-1.0, -3.0, -1.0));
        assert_eq!(merged.max(), Vec3::new(4.0, 1.0, 5.0));
    }

    #[test]
    fn test_aabb_contains() {
        let outer = Aabb::from_points(Vec3::splat(-2.0), Vec3::splat(2.0));
        let inner = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let straddling = Aabb::from_points(Vec3::splat(1.0), Vec3::splat(3.0));

        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&straddling));
        assert!(!outer.contains(&Aabb::UNIVERSE));
        assert!(Aabb::UNIVERSE.contains(&outer));
    }

    #[test]
    fn test_aabb_octants_tile_parent() {
        let parent = Aabb::from_points(Vec3::new(-4.0, -2.0, 0.0), Vec3::new(4.0, 2.0, 8.0));
        let center = parent.center();

        for i in 0..8 {
            let child = parent.octant(i);
            assert!(parent.contains(&child));
            assert!(child.contains_point(center));
            let volume = child.x.size() * child.y.size() * child.z.size();
            assert!((volume - 8.0 * 4.0 * 8.0 / 8.0).abs() < 1e-4);
        }

        assert_eq!(parent.octant(0).min(), parent.min());
        assert_eq!(parent.octant(7).max(), parent.max());
        assert_eq!(parent.octant(1).max().x, 4.0);
        assert_eq!(parent.octant(2).max().y, 2.0);
        assert_eq!(parent.octant(4).max().z, 8.0);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0));

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray));

        // Ray starting inside
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.2, 0.9).normalize());
        assert!(aabb.hit(&ray));
    }

    #[test]
    fn test_aabb_universe_always_hit() {
        let ray = Ray::new(Vec3::new(3.0, -7.0, 1.0), Vec3::Y);
        assert!(Aabb::UNIVERSE.hit(&ray));
    }

    #[test]
    fn test_aabb_center() {
        let aabb = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 10.0));
        assert_eq!(aabb.center(), Vec3::new(5.0, 5.0, 5.0));
    }
}
