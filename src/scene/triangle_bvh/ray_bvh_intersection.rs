use crate::geometry::{BoxIntervalPolicy, FloatType, Ray, WorldBox};

use super::{BvhNode, Leaf, TriangleBvh};

impl TriangleBvh {
    /// Collects the leaf pairs whose boxes the ray passes through.
    /// Uses the recorded depth as the level budget.
    pub fn candidate_leaf_pairs(
        &self,
        ray: &Ray,
        t_min: FloatType,
        t_max: FloatType,
        policy: BoxIntervalPolicy,
    ) -> Vec<&[Leaf; 2]> {
        self.candidate_leaf_pairs_with_budget(ray, t_min, t_max, policy, self.depth)
    }

    /// Collects the leaf pairs whose boxes the ray passes through, visiting inner nodes
    /// only while `levels` is not exhausted.
    /// Leaf pairs are returned without testing the boxes of the two leaves themselves.
    pub fn candidate_leaf_pairs_with_budget(
        &self,
        ray: &Ray,
        t_min: FloatType,
        t_max: FloatType,
        policy: BoxIntervalPolicy,
        levels: usize,
    ) -> Vec<&[Leaf; 2]> {
        let mut found = Vec::new();
        let query = BoxQuery {
            ray,
            t_min,
            t_max,
            policy,
        };

        // Boxes of inner nodes are tested by their parents, the root one is never needed.
        if let BvhNode::LeafPair { bounds, .. } = &self.root {
            if !query.hits(bounds) {
                return found;
            }
        }
        self.root.collect_leaf_pairs(&query, levels, &mut found);

        found
    }
}

struct BoxQuery<'a> {
    ray: &'a Ray,
    t_min: FloatType,
    t_max: FloatType,
    policy: BoxIntervalPolicy,
}

impl BoxQuery<'_> {
    fn hits(&self, b: &WorldBox) -> bool {
        self.policy.test(b, self.ray, self.t_min, self.t_max)
    }
}

impl BvhNode {
    /// Appends leaf pairs reachable from this node to `found`.
    /// Expects that the node's own box was already accepted.
    fn collect_leaf_pairs<'a>(
        &'a self,
        query: &BoxQuery,
        levels: usize,
        found: &mut Vec<&'a [Leaf; 2]>,
    ) {
        match self {
            BvhNode::LeafPair { leaves, .. } => found.push(leaves),
            BvhNode::Internal { left, right, .. } => {
                if levels == 0 {
                    return;
                }
                for child in [left, right] {
                    if query.hits(child.bounds()) {
                        child.collect_leaf_pairs(query, levels - 1, found);
                    }
                }
            }
        }
    }
}
