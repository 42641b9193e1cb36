//! Two level bounding volume hierarchy over flat triangles.
//!
//! Inner nodes have exactly two children, the tree ends in nodes holding a pair of
//! triangle leaves. Partitioning triangles into leaves is left to the caller; this module
//! only assembles the nodes, derives their bounds and traverses them.

mod printing;
mod ray_bvh_intersection;
mod validation;

pub use printing::{BvhStatistics, TreeDump};
pub use validation::BvhError;

use crate::geometry::WorldBox;

use super::FlatTriangle;

/// Box and the triangles assigned to it.
#[derive(Clone, Debug)]
pub struct Leaf {
    pub bounds: WorldBox,
    pub triangles: Vec<FlatTriangle>,
}

impl Leaf {
    /// Creates a leaf bounded by the triangles' vertices.
    /// Empty leaves get a degenerate box at the origin.
    pub fn new(triangles: Vec<FlatTriangle>) -> Leaf {
        let bounds = WorldBox::from_points(triangles.iter().flat_map(|t| t.vertices.iter()))
            .unwrap_or_else(WorldBox::degenerate);
        Leaf { bounds, triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

#[derive(Clone, Debug)]
pub enum BvhNode {
    Internal {
        bounds: WorldBox,
        left: Box<BvhNode>,
        right: Box<BvhNode>,
    },
    /// Last level of the tree, holds triangles directly.
    LeafPair { bounds: WorldBox, leaves: [Leaf; 2] },
}

impl BvhNode {
    /// Inner node bounded by the union of its children's bounds.
    pub fn internal(left: BvhNode, right: BvhNode) -> BvhNode {
        BvhNode::Internal {
            bounds: left.bounds().union(right.bounds()),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Terminal node bounded by the union of its non-empty leaves.
    pub fn leaf_pair(leaves: [Leaf; 2]) -> BvhNode {
        let bounds = leaves
            .iter()
            .filter(|leaf| !leaf.is_empty())
            .map(|leaf| leaf.bounds.clone())
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(WorldBox::degenerate);
        BvhNode::LeafPair { bounds, leaves }
    }

    /// Assembles leaf pairs into a balanced tree, splitting the sequence in halves.
    /// Neighbouring pairs end up under the same inner nodes, so callers should order
    /// the pairs spatially. Returns None for an empty sequence.
    pub fn from_leaf_pairs(pairs: impl IntoIterator<Item = [Leaf; 2]>) -> Option<BvhNode> {
        let mut nodes: Vec<BvhNode> = pairs.into_iter().map(BvhNode::leaf_pair).collect();
        Self::from_nodes(&mut nodes)
    }

    fn from_nodes(nodes: &mut Vec<BvhNode>) -> Option<BvhNode> {
        match nodes.len() {
            0 => None,
            1 => nodes.pop(),
            n => {
                let mut right = nodes.split_off(n / 2);
                let left = Self::from_nodes(nodes)?;
                let right = Self::from_nodes(&mut right)?;
                Some(BvhNode::internal(left, right))
            }
        }
    }

    pub fn bounds(&self) -> &WorldBox {
        match self {
            BvhNode::Internal { bounds, .. } | BvhNode::LeafPair { bounds, .. } => bounds,
        }
    }

    /// Number of inner levels below this node, zero for a leaf pair.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
            BvhNode::LeafPair { .. } => 0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TriangleBvh {
    root: BvhNode,
    /// Level budget for traversal. Inner nodes deeper than this are never visited.
    depth: usize,
}

impl TriangleBvh {
    /// Creates the hierarchy, deriving the level budget from the tree itself.
    pub fn new(root: BvhNode) -> TriangleBvh {
        let depth = root.depth();
        TriangleBvh { root, depth }
    }

    /// Creates the hierarchy with a level budget supplied by whoever built the tree.
    /// If the budget is smaller than the real depth, the deeper nodes are silently skipped
    /// during traversal; `validate` reports the mismatch.
    pub fn with_recorded_depth(root: BvhNode, depth: usize) -> TriangleBvh {
        TriangleBvh { root, depth }
    }

    /// Hierarchy without any triangles.
    pub fn empty() -> TriangleBvh {
        TriangleBvh::new(BvhNode::leaf_pair([Leaf::new(vec![]), Leaf::new(vec![])]))
    }

    pub fn root(&self) -> &BvhNode {
        &self.root
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Iterates all triangles in the tree, in no particular order.
    pub fn triangles(&self) -> impl Iterator<Item = &FlatTriangle> {
        let mut stack = vec![&self.root];
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                match node {
                    BvhNode::Internal { left, right, .. } => {
                        stack.push(right);
                        stack.push(left);
                    }
                    BvhNode::LeafPair { leaves, .. } => return Some(leaves),
                }
            }
            None
        })
        .flat_map(|leaves| leaves.iter())
        .flat_map(|leaf| leaf.triangles.iter())
    }
}

impl Default for TriangleBvh {
    fn default() -> Self {
        Self::empty()
    }
}
