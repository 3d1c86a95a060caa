//! Arena-based bounded octree.
//!
//! All nodes live contiguously in a `Vec` and reference each other by
//! [`NodeId`]. The root always sits at index 0. Subdividing a node appends its
//! eight children to the arena, so the children of one node are contiguous.
//!
//! Items are stored by value in per-kind buckets. A leaf splits when one of
//! its buckets grows past `max_objects`; after that only items that straddle
//! the split planes stay at the internal node.
//!
//! # Example
//!
//! ```rust
//! use nalgebra::{Point3, Vector3};
//! use octree::{Aabb, Octree, OctreeConfig, Ray, Spatial};
//!
//! #[derive(Clone, Debug)]
//! struct Marker(Point3<f64>);
//!
//! impl Spatial for Marker {
//!     type Kind = ();
//!
//!     fn bounding_box(&self) -> Aabb {
//!         Aabb::from_center(self.0, 0.01)
//!     }
//!
//!     fn kind(&self) -> Self::Kind {}
//! }
//!
//! let bounds = Aabb::from_center(Point3::origin(), 10.0);
//! let mut tree = Octree::new(bounds, OctreeConfig::default());
//! tree.insert(Marker(Point3::new(1.0, 2.0, 3.0))).unwrap();
//!
//! let ray = Ray::new(Point3::new(1.0, 2.0, -20.0), Vector3::z());
//! assert_eq!(tree.intersect_ray(&ray).len(), 1);
//! ```

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, trace};

use crate::bounds::{Aabb, Ray};

/// Anything the octree can hold.
///
/// `Kind` tags each item so a node keeps one bucket per kind and callers can
/// fetch e.g. all systems in a node without inspecting the items.
pub trait Spatial {
    type Kind: Copy + Eq + Hash + Debug;

    /// Extent of the item in the tree's coordinate frame
    fn bounding_box(&self) -> Aabb;

    fn kind(&self) -> Self::Kind;
}

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    fn new(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize, "NodeId overflow");
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A region of space and the items stored at it.
#[derive(Clone, Debug)]
pub struct Node<T: Spatial> {
    id: NodeId,
    bounds: Aabb,
    depth: usize,
    parent: Option<NodeId>,
    /// Buckets keep the order in which their kinds first arrived
    objects: IndexMap<T::Kind, Vec<T>>,
    children: Option<[NodeId; 8]>,
}

impl<T: Spatial> Node<T> {
    fn new(id: NodeId, bounds: Aabb, depth: usize, parent: Option<NodeId>) -> Self {
        Self {
            id,
            bounds,
            depth,
            parent,
            objects: IndexMap::new(),
            children: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The eight octants, indexed as in [`Aabb::octant`]
    pub fn children(&self) -> Option<&[NodeId; 8]> {
        self.children.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Items of one kind stored directly at this node.
    pub fn objects(&self, kind: T::Kind) -> &[T] {
        self.objects.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every item stored directly at this node, kind by kind in arrival
    /// order.
    pub fn all_objects(&self) -> impl Iterator<Item = &T> {
        self.objects.values().flatten()
    }

    pub fn object_count(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }
}

/// Split thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Nodes at this depth never split
    pub max_depth: usize,
    /// Per-kind item count a leaf may hold before it splits
    pub max_objects: usize,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            max_objects: 100,
        }
    }
}

#[derive(Debug, Error)]
pub enum OctreeError {
    #[error("item bounds {item:?} are not contained in the index bounds {root:?}")]
    OutOfBounds { item: Aabb, root: Aabb },
}

/// Bounded octree over items of type `T`.
#[derive(Clone, Debug)]
pub struct Octree<T: Spatial> {
    nodes: Vec<Node<T>>,
    config: OctreeConfig,
}

impl<T: Spatial> Octree<T> {
    pub fn new(bounds: Aabb, config: OctreeConfig) -> Self {
        Self {
            nodes: vec![Node::new(NodeId::ROOT, bounds, 0, None)],
            config,
        }
    }

    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    pub fn root(&self) -> &Node<T> {
        &self.nodes[NodeId::ROOT.index()]
    }

    pub fn bounds(&self) -> &Aabb {
        &self.root().bounds
    }

    pub fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.index())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of stored items
    pub fn len(&self) -> usize {
        self.nodes.iter().map(Node::object_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| n.objects.is_empty())
    }

    /// Inserts an item, splitting leaves as they fill up.
    ///
    /// # Errors
    /// [`OctreeError::OutOfBounds`] if the item's box is not fully inside the
    /// root bounds. Nothing is stored in that case.
    pub fn insert(&mut self, item: T) -> Result<(), OctreeError> {
        let item_bounds = item.bounding_box();
        let root = *self.bounds();
        if !root.contains(&item_bounds) {
            return Err(OctreeError::OutOfBounds {
                item: item_bounds,
                root,
            });
        }

        self.insert_from(NodeId::ROOT, item);
        Ok(())
    }

    /// Descends from `start` to the deepest node fully containing the item.
    fn insert_from(&mut self, start: NodeId, item: T) {
        let item_bounds = item.bounding_box();
        let mut id = start;
        while let Some(children) = self.nodes[id.index()].children {
            match children
                .iter()
                .find(|c| self.nodes[c.index()].bounds.contains(&item_bounds))
            {
                Some(&child) => id = child,
                None => break,
            }
        }

        let node = &mut self.nodes[id.index()];
        let bucket = node.objects.entry(item.kind()).or_default();
        bucket.push(item);
        let count = bucket.len();

        if node.is_leaf() && count > self.config.max_objects && node.depth < self.config.max_depth
        {
            self.subdivide(id);
        }
    }

    fn subdivide(&mut self, id: NodeId) {
        let (bounds, depth) = {
            let node = &self.nodes[id.index()];
            (node.bounds, node.depth)
        };

        let first = self.nodes.len();
        for octant in 0..8 {
            self.nodes.push(Node::new(
                NodeId::new(first + octant),
                bounds.octant(octant),
                depth + 1,
                Some(id),
            ));
        }

        let node = &mut self.nodes[id.index()];
        node.children = Some(std::array::from_fn(|i| NodeId::new(first + i)));
        let stored = std::mem::take(&mut node.objects);
        trace!(node = id.index(), depth, "subdividing octree node");

        // Kind by kind, in arrival order; items keep their order within a kind
        for item in stored.into_values().flatten() {
            self.insert_from(id, item);
        }
    }

    /// Populated leaves whose bounds the ray crosses.
    ///
    /// Items themselves are not tested; callers resolve hits against the
    /// returned leaves' contents.
    pub fn intersect_ray(&self, ray: &Ray) -> Vec<&Node<T>> {
        let mut hits = Vec::new();
        self.collect_ray(NodeId::ROOT, ray, &mut hits);
        hits
    }

    fn collect_ray<'a>(&'a self, id: NodeId, ray: &Ray, hits: &mut Vec<&'a Node<T>>) {
        let node = &self.nodes[id.index()];
        if !node.bounds.intersects_ray(ray) {
            return;
        }
        match node.children {
            None => {
                if node.object_count() > 0 {
                    hits.push(node);
                }
            }
            Some(children) => {
                for child in children {
                    self.collect_ray(child, ray, hits);
                }
            }
        }
    }

    /// Leaves either fully inside the sphere's bounding cube or fully
    /// enclosing it.
    ///
    /// This is an axis-aligned approximation: a small sphere that straddles
    /// leaf boundaries matches nothing.
    pub fn query_sphere(&self, center: Point3<f64>, radius: f64) -> Vec<&Node<T>> {
        let cube = Aabb::from_center(center, radius);
        let mut found = Vec::new();
        let mut stack = vec![NodeId::ROOT];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            if !node.bounds.intersects(&cube) {
                continue;
            }
            match node.children {
                None => {
                    if cube.contains(&node.bounds) || node.bounds.contains(&cube) {
                        found.push(node);
                    }
                }
                Some(children) => stack.extend(children.iter().rev()),
            }
        }
        found
    }

    /// Drops every item and every child; the root becomes an empty leaf.
    pub fn dispose(&mut self) {
        self.nodes.truncate(1);
        let root = &mut self.nodes[NodeId::ROOT.index()];
        root.objects.clear();
        root.children = None;
    }

    /// Disposes and moves the root to new bounds.
    pub fn reset(&mut self, bounds: Aabb) {
        self.dispose();
        self.nodes[NodeId::ROOT.index()].bounds = bounds;
    }

    /// Pre-order traversal starting at the root.
    pub fn iter(&self) -> PreOrder<'_, T> {
        PreOrder {
            tree: self,
            stack: vec![NodeId::ROOT],
        }
    }

    pub fn visit<F>(&self, visitor: F)
    where
        F: FnMut(&Node<T>),
    {
        self.iter().for_each(visitor);
    }

    pub fn select<P>(&self, mut predicate: P) -> Vec<&Node<T>>
    where
        P: FnMut(&Node<T>) -> bool,
    {
        self.iter().filter(|n| predicate(n)).collect()
    }

    pub fn leaves(&self) -> Vec<&Node<T>> {
        self.select(Node::is_leaf)
    }

    /// Number of stored items per kind.
    pub fn object_counts(&self) -> HashMap<T::Kind, usize> {
        let mut counts = HashMap::new();
        for node in &self.nodes {
            for (kind, bucket) in &node.objects {
                *counts.entry(*kind).or_insert(0) += bucket.len();
            }
        }
        counts
    }

    pub fn log_stats(&self) {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        info!(
            nodes = self.node_count(),
            max_depth,
            objects = ?self.object_counts(),
            "octree stats"
        );
    }
}

/// Iterator returned by [`Octree::iter`].
pub struct PreOrder<'a, T: Spatial> {
    tree: &'a Octree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T: Spatial> Iterator for PreOrder<'a, T> {
    type Item = &'a Node<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.index()];
        if let Some(children) = &node.children {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}
