//! Octree over scene objects, stored as index arenas.
//!
//! Built once; objects are never moved or removed. Children are created
//! lazily the first time an object fits their octant.

use kiln_math::{Aabb, Ray};

use crate::object::{HitInfo, SceneObject};

/// Nodes at this level keep everything they receive.
pub const MAX_LEVEL: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub aabb: Aabb,
    pub level: u32,
    pub parent: Option<NodeId>,
    pub children: [Option<NodeId>; 8],
    pub objects: Vec<ObjectId>,
}

impl SceneNode {
    fn new(aabb: Aabb, level: u32, parent: Option<NodeId>) -> Self {
        Self {
            aabb,
            level,
            parent,
            children: [None; 8],
            objects: Vec::new(),
        }
    }
}

/// Spatial index plus the object arena it indexes.
#[derive(Debug, Clone)]
pub struct SceneTree {
    nodes: Vec<SceneNode>,
    objects: Vec<SceneObject>,
}

impl SceneTree {
    pub const ROOT: NodeId = NodeId(0);

    /// Empty tree whose root spans `bounds`.
    pub fn new(bounds: Aabb) -> Self {
        Self {
            nodes: vec![SceneNode::new(bounds, 0, None)],
            objects: Vec::new(),
        }
    }

    pub fn root(&self) -> &SceneNode {
        &self.nodes[Self::ROOT.0]
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn object(&self, id: ObjectId) -> &SceneObject {
        &self.objects[id.0]
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Add an object, placing it in the deepest node whose box contains it.
    ///
    /// Objects that do not fit the root box stay in the root's own list.
    pub fn insert(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(object);
        let placed = self.insert_at(Self::ROOT, id);
        debug_assert!(placed, "root insertion never fails");
        id
    }

    fn insert_at(&mut self, node_id: NodeId, id: ObjectId) -> bool {
        let object_box = *self.objects[id.0].aabb();
        let node = &self.nodes[node_id.0];

        if !node.aabb.contains(&object_box) {
            if node.parent.is_none() {
                self.nodes[node_id.0].objects.push(id);
                return true;
            }
            return false;
        }

        if node.level < MAX_LEVEL {
            for octant in 0..8 {
                let existing = self.nodes[node_id.0].children[octant];
                let child = match existing {
                    Some(child) => Some(child),
                    None => {
                        let parent = &self.nodes[node_id.0];
                        let child_box = parent.aabb.octant(octant);
                        if child_box.contains(&object_box) {
                            let child_id = NodeId(self.nodes.len());
                            let level = parent.level + 1;
                            self.nodes.push(SceneNode::new(child_box, level, Some(node_id)));
                            self.nodes[node_id.0].children[octant] = Some(child_id);
                            Some(child_id)
                        } else {
                            None
                        }
                    }
                };
                if let Some(child) = child {
                    if self.insert_at(child, id) {
                        return true;
                    }
                }
            }
        }

        self.nodes[node_id.0].objects.push(id);
        true
    }

    /// Nearest hit along `ray`, skipping `exclude`.
    ///
    /// Equal distances keep the first object found in traversal order.
    pub fn intersect(&self, ray: &Ray, exclude: Option<ObjectId>) -> Option<(ObjectId, HitInfo)> {
        let mut best = None;
        self.intersect_node(Self::ROOT, ray, exclude, &mut best);
        best
    }

    fn intersect_node(
        &self,
        node_id: NodeId,
        ray: &Ray,
        exclude: Option<ObjectId>,
        best: &mut Option<(ObjectId, HitInfo)>,
    ) {
        let node = &self.nodes[node_id.0];
        if node.parent.is_some() && !node.aabb.hit(ray) {
            return;
        }

        for &id in &node.objects {
            if Some(id) == exclude {
                continue;
            }
            let max_t = best.map_or(f32::MAX, |(_, hit)| hit.t);
            if let Some(hit) = self.objects[id.0].intersect(ray, max_t) {
                *best = Some((id, hit));
            }
        }

        for child in node.children.iter().flatten() {
            self.intersect_node(*child, ray, exclude, best);
        }
    }

    /// Check that every object in a non-root node fits inside that node's box.
    pub fn check_containment(&self) -> bool {
        self.nodes.iter().all(|node| {
            node.parent.is_none()
                || node
                    .objects
                    .iter()
                    .all(|&id| node.aabb.contains(self.objects[id.0].aabb()))
        })
    }

    /// Number of objects held by each level, root first.
    pub fn level_histogram(&self) -> [usize; MAX_LEVEL as usize + 1] {
        let mut counts = [0; MAX_LEVEL as usize + 1];
        for node in &self.nodes {
            counts[node.level as usize] += node.objects.len();
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tree() -> SceneTree {
        SceneTree::new(Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(200.0)))
    }

    #[test]
    fn test_plane_stays_at_root() {
        let mut t = tree();
        let id = t.insert(SceneObject::plane(Vec3::new(0.0, -15.0, 0.0), Vec3::Y));
        assert_eq!(t.root().objects, vec![id]);
        assert_eq!(t.nodes().len(), 1);
    }

    #[test]
    fn test_small_object_sinks_to_max_level() {
        let mut t = tree();
        let id = t.insert(SceneObject::sphere(Vec3::new(30.0, 30.0, 30.0), 1.0));
        let holder = t.nodes().iter().find(|n| n.objects.contains(&id)).unwrap();
        assert_eq!(holder.level, MAX_LEVEL);
        assert_eq!(t.nodes().len(), MAX_LEVEL as usize + 1);
        assert_eq!(t.level_histogram(), [0, 0, 0, 1]);
    }

    #[test]
    fn test_straddling_object_stays_high() {
        let mut t = tree();
        // Crosses the root center on every axis
        let id = t.insert(SceneObject::sphere(Vec3::ZERO, 5.0));
        assert_eq!(t.root().objects, vec![id]);
    }

    #[test]
    fn test_containment_after_random_inserts() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            let mut t = tree();
            for _ in 0..60 {
                let center = Vec3::new(
                    rng.gen_range(-250.0..250.0),
                    rng.gen_range(-250.0..250.0),
                    rng.gen_range(-250.0..250.0),
                );
                let object = match rng.gen_range(0..4) {
                    0 => SceneObject::sphere(center, rng.gen_range(0.1..40.0)),
                    1 => SceneObject::cuboid(
                        center,
                        Vec3::new(
                            rng.gen_range(0.1..30.0),
                            rng.gen_range(0.1..30.0),
                            rng.gen_range(0.1..30.0),
                        ),
                    ),
                    2 => SceneObject::pyramid(center, rng.gen_range(0.5..20.0)),
                    _ => SceneObject::plane(center, Vec3::Y),
                };
                t.insert(object);
            }
            assert!(t.check_containment());
            assert_eq!(t.level_histogram().iter().sum::<usize>(), 60);
            for node in t.nodes() {
                if let Some(parent) = node.parent {
                    assert!(t.node(parent).aabb.contains(&node.aabb));
                    assert_eq!(t.node(parent).level + 1, node.level);
                }
            }
        }
    }

    #[test]
    fn test_nearest_hit_and_exclude() {
        let mut t = tree();
        let near = t.insert(SceneObject::sphere(Vec3::new(0.0, 0.0, -20.0), 2.0));
        let far = t.insert(SceneObject::sphere(Vec3::new(0.0, 0.0, -60.0), 2.0));
        let wall = t.insert(SceneObject::plane(Vec3::new(0.0, 0.0, -100.0), Vec3::Z));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let (id, hit) = t.intersect(&ray, None).unwrap();
        assert_eq!(id, near);
        assert_eq!(hit.t, 18.0);

        assert_eq!(t.intersect(&ray, Some(near)).unwrap().0, far);

        let miss = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(t.intersect(&miss, None).is_none());

        let sideways = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::NEG_Z);
        assert_eq!(t.intersect(&sideways, None).unwrap().0, wall);
    }

    #[test]
    fn test_tie_keeps_first_found() {
        let mut t = tree();
        let first = t.insert(SceneObject::plane(Vec3::new(0.0, 0.0, -10.0), Vec3::Z));
        t.insert(SceneObject::plane(Vec3::new(0.0, 0.0, -10.0), Vec3::Z));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(t.intersect(&ray, None).unwrap().0, first);
    }
}
