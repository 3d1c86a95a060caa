//! Bounded recursive octree for static bodies.
//!
//! Nodes are stored contiguously in an arena and reference each other by
//! [`NodeId`]. Items carry a kind tag so a node keeps one bucket per kind and
//! callers can ask a node for "all stars" or "all systems" without any
//! runtime type inspection.

pub mod bounds;
pub mod tree;

#[cfg(test)]
mod bounds_test;
#[cfg(test)]
mod tree_test;

pub use bounds::{Aabb, Ray};
pub use tree::{Node, NodeId, Octree, OctreeConfig, OctreeError, Spatial};
