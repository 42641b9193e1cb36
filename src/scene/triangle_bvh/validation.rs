use thiserror::Error;

use crate::{
    geometry::{WorldBox, WorldPoint},
    scene::Object,
};

use super::{BvhNode, Leaf, TriangleBvh};

/// Broken structural guarantee of a hierarchy.
/// Traversal assumes none of these happen, it never checks them itself.
#[derive(Debug, Error, PartialEq)]
pub enum BvhError {
    #[error("Box minimum {min:?} is above its maximum {max:?}")]
    InvertedBox { min: WorldPoint, max: WorldPoint },

    #[error("Box {child:?} is not enclosed by its parent box {parent:?}")]
    ChildOutsideParent { child: WorldBox, parent: WorldBox },

    #[error("Recorded depth {recorded} does not match the tree depth {actual}")]
    DepthMismatch { recorded: usize, actual: usize },
}

impl TriangleBvh {
    /// Checks that boxes are well formed and nested, and that the recorded depth
    /// matches the shape of the tree.
    pub fn validate(&self) -> Result<(), BvhError> {
        validate_node(&self.root)?;

        let actual = self.root.depth();
        if actual != self.depth {
            return Err(BvhError::DepthMismatch {
                recorded: self.depth,
                actual,
            });
        }

        Ok(())
    }
}

fn validate_node(node: &BvhNode) -> Result<(), BvhError> {
    let bounds = node.bounds();
    validate_box(bounds)?;

    match node {
        BvhNode::Internal { left, right, .. } => {
            for child in [left, right] {
                validate_enclosed(child.bounds(), bounds)?;
                validate_node(child)?;
            }
        }
        BvhNode::LeafPair { leaves, .. } => {
            for leaf in leaves.iter().filter(|leaf| !leaf.is_empty()) {
                validate_box(&leaf.bounds)?;
                validate_enclosed(&leaf.bounds, bounds)?;
                validate_leaf(leaf)?;
            }
        }
    }

    Ok(())
}

fn validate_leaf(leaf: &Leaf) -> Result<(), BvhError> {
    leaf.triangles
        .iter()
        .try_for_each(|triangle| validate_enclosed(&triangle.get_bounding_box(), &leaf.bounds))
}

fn validate_box(b: &WorldBox) -> Result<(), BvhError> {
    if b.is_valid() {
        Ok(())
    } else {
        Err(BvhError::InvertedBox {
            min: b.min,
            max: b.max,
        })
    }
}

fn validate_enclosed(child: &WorldBox, parent: &WorldBox) -> Result<(), BvhError> {
    if parent.contains_box(child) {
        Ok(())
    } else {
        Err(BvhError::ChildOutsideParent {
            child: child.clone(),
            parent: parent.clone(),
        })
    }
}
