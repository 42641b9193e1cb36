use std::fmt::{self, Display};

use itertools::Itertools as _;

use crate::util::Stats;

use super::{BvhNode, TriangleBvh};

#[derive(Clone, Debug, PartialEq)]
pub struct BvhStatistics {
    /// Inner levels above each leaf pair
    pub depth: Stats,
    /// Triangle count of each leaf
    pub leaf_fill: Stats,
    pub recorded_depth: usize,
}

impl Display for BvhStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Depth: {} (recorded {})", self.depth, self.recorded_depth)?;
        write!(f, "Leaf nodes fill: {}", self.leaf_fill)
    }
}

impl TriangleBvh {
    pub fn print_tree(&self) {
        print!("{}", self.tree_dump());
    }

    pub fn print_statistics(&self) {
        println!("{}", self.statistics());
    }

    pub fn statistics(&self) -> BvhStatistics {
        let mut depth = Stats::default();
        let mut leaf_fill = Stats::default();
        statistics_recursive(&self.root, 0, &mut depth, &mut leaf_fill);

        BvhStatistics {
            depth,
            leaf_fill,
            recorded_depth: self.depth,
        }
    }

    /// One line per node, children indented below their parent.
    /// Leaves list the materials of their triangles.
    pub fn tree_dump(&self) -> TreeDump<'_> {
        TreeDump(self)
    }

    pub fn tree_string(&self) -> String {
        self.tree_dump().to_string()
    }
}

/// Displays the whole tree of a `TriangleBvh`.
pub struct TreeDump<'a>(&'a TriangleBvh);

impl Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        print_recursive(f, 0, &self.0.root)
    }
}

fn statistics_recursive(node: &BvhNode, level: usize, depth: &mut Stats, leaf_fill: &mut Stats) {
    match node {
        BvhNode::Internal { left, right, .. } => {
            statistics_recursive(left, level + 1, depth, leaf_fill);
            statistics_recursive(right, level + 1, depth, leaf_fill);
        }
        BvhNode::LeafPair { leaves, .. } => {
            depth.add_sample(level);
            for leaf in leaves {
                leaf_fill.add_sample(leaf.triangles.len());
            }
        }
    }
}

fn print_recursive(f: &mut fmt::Formatter<'_>, indent: usize, node: &BvhNode) -> fmt::Result {
    let indent_str = "  ".repeat(indent);
    let bounds = node.bounds();
    let kind = match node {
        BvhNode::Internal { .. } => "I",
        BvhNode::LeafPair { .. } => "P",
    };
    writeln!(
        f,
        "{indent_str}- {kind}: {:?}-{:?}",
        bounds.min.coords.as_slice(),
        bounds.max.coords.as_slice(),
    )?;

    match node {
        BvhNode::Internal { left, right, .. } => {
            print_recursive(f, indent + 1, left)?;
            print_recursive(f, indent + 1, right)
        }
        BvhNode::LeafPair { leaves, .. } => leaves.iter().try_for_each(|leaf| {
            writeln!(
                f,
                "{indent_str}  - L: [{}]",
                leaf.triangles.iter().map(|t| t.material).join(", ")
            )
        }),
    }
}
