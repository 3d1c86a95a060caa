use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::bounds::{Aabb, Ray};
use crate::tree::{Octree, OctreeConfig, OctreeError, Spatial};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Shape {
    Dot,
    Blob,
}

#[derive(Clone, Debug)]
struct Item {
    center: Point3<f64>,
    half: f64,
    shape: Shape,
}

impl Item {
    fn dot(x: f64, y: f64, z: f64) -> Self {
        Self {
            center: Point3::new(x, y, z),
            half: 1e-4,
            shape: Shape::Dot,
        }
    }
}

impl Spatial for Item {
    type Kind = Shape;

    fn bounding_box(&self) -> Aabb {
        Aabb::from_center(self.center, self.half)
    }

    fn kind(&self) -> Shape {
        self.shape
    }
}

fn cube(half: f64) -> Aabb {
    Aabb::from_center(Point3::origin(), half)
}

fn small_tree() -> Octree<Item> {
    Octree::new(
        cube(8.0),
        OctreeConfig {
            max_depth: 3,
            max_objects: 2,
        },
    )
}

#[test]
fn test_new_tree_is_single_empty_leaf() {
    let tree: Octree<Item> = Octree::new(cube(1.0), OctreeConfig::default());
    assert_eq!(tree.node_count(), 1);
    assert!(tree.root().is_leaf());
    assert!(tree.is_empty());
    assert!(tree.root().objects(Shape::Dot).is_empty());
}

#[test]
fn test_default_config() {
    let config = OctreeConfig::default();
    assert_eq!(config.max_depth, 8);
    assert_eq!(config.max_objects, 100);
}

#[test]
fn test_insert_out_of_bounds() {
    let mut tree = small_tree();
    let result = tree.insert(Item::dot(9.0, 0.0, 0.0));
    assert!(matches!(result, Err(OctreeError::OutOfBounds { .. })));
    assert!(tree.is_empty());
}

#[test]
fn test_split_after_threshold() {
    let mut tree = small_tree();
    tree.insert(Item::dot(1.0, 1.0, 1.0)).unwrap();
    tree.insert(Item::dot(-1.0, 1.0, 1.0)).unwrap();
    assert_eq!(tree.node_count(), 1);

    tree.insert(Item::dot(1.0, -1.0, -1.0)).unwrap();
    assert_eq!(tree.node_count(), 9);
    assert!(!tree.root().is_leaf());
    assert_eq!(tree.root().object_count(), 0);
    assert_eq!(tree.len(), 3);

    let children = tree.root().children().unwrap();
    let upper = tree.node(children[7]).unwrap();
    assert_eq!(upper.depth(), 1);
    assert_eq!(upper.parent(), Some(tree.root().id()));
    assert_eq!(upper.objects(Shape::Dot).len(), 1);
}

#[test]
fn test_threshold_is_per_kind() {
    let mut tree = small_tree();
    tree.insert(Item::dot(1.0, 1.0, 1.0)).unwrap();
    tree.insert(Item::dot(2.0, 1.0, 1.0)).unwrap();
    tree.insert(Item {
        shape: Shape::Blob,
        ..Item::dot(3.0, 1.0, 1.0)
    })
    .unwrap();

    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.root().objects(Shape::Dot).len(), 2);
    assert_eq!(tree.root().objects(Shape::Blob).len(), 1);
}

#[test]
fn test_straddling_item_stays_at_internal_node() {
    let mut tree = small_tree();
    for i in 0..3 {
        tree.insert(Item::dot(1.0 + i as f64, 1.0, 1.0)).unwrap();
    }
    tree.insert(Item {
        center: Point3::origin(),
        half: 0.5,
        shape: Shape::Blob,
    })
    .unwrap();

    assert!(!tree.root().is_leaf());
    assert_eq!(tree.root().objects(Shape::Blob).len(), 1);
}

#[test]
fn test_depth_and_capacity_hold_for_random_inserts() {
    let config = OctreeConfig {
        max_depth: 4,
        max_objects: 10,
    };
    let mut tree = Octree::new(cube(100.0), config);
    let mut rng = ChaChaRng::seed_from_u64(7);

    for _ in 0..5_000 {
        let p = Point3::new(
            rng.random_range(-99.0..99.0),
            rng.random_range(-99.0..99.0),
            rng.random_range(-99.0..99.0),
        );
        tree.insert(Item::dot(p.x, p.y, p.z)).unwrap();
    }

    assert_eq!(tree.len(), 5_000);
    tree.visit(|node| {
        assert!(node.depth() <= config.max_depth);
        if node.is_leaf() && node.depth() < config.max_depth {
            assert!(node.objects(Shape::Dot).len() <= config.max_objects);
        }
    });
}

#[test]
fn test_ray_through_single_populated_leaf() {
    let mut tree = small_tree();
    tree.insert(Item::dot(2.0, 2.0, 2.0)).unwrap();
    tree.insert(Item::dot(-2.0, 2.0, 2.0)).unwrap();
    tree.insert(Item::dot(2.0, -2.0, -2.0)).unwrap();

    // Parallel to z at x = y = 2 only crosses octants 3 (empty) and 7
    let ray = Ray::new(Point3::new(2.0, 2.0, -20.0), Vector3::z());
    let hits = tree.intersect_ray(&ray);

    assert_eq!(hits.len(), 1);
    assert!(hits[0].is_leaf());
    assert_eq!(hits[0].objects(Shape::Dot)[0].center, Point3::new(2.0, 2.0, 2.0));
}

#[test]
fn test_ray_missing_tree() {
    let mut tree = small_tree();
    tree.insert(Item::dot(2.0, 2.0, 2.0)).unwrap();
    let ray = Ray::new(Point3::new(20.0, 20.0, 20.0), Vector3::x());
    assert!(tree.intersect_ray(&ray).is_empty());
}

#[test]
fn test_query_sphere_enclosing_leaf() {
    let mut tree = small_tree();
    tree.insert(Item::dot(2.0, 2.0, 2.0)).unwrap();
    tree.insert(Item::dot(-2.0, 2.0, 2.0)).unwrap();
    tree.insert(Item::dot(2.0, -2.0, -2.0)).unwrap();

    // Small sphere inside octant 7
    let found = tree.query_sphere(Point3::new(4.0, 4.0, 4.0), 1.0);
    assert_eq!(found.len(), 1);
    assert!(found[0].bounds().contains(&Aabb::from_center(Point3::new(4.0, 4.0, 4.0), 1.0)));

    // Sphere covering everything returns every leaf
    let all = tree.query_sphere(Point3::origin(), 50.0);
    assert_eq!(all.len(), 8);
}

#[test]
fn test_dispose_and_reset() {
    let mut tree = small_tree();
    for i in 0..10 {
        tree.insert(Item::dot(i as f64 * 0.5, 1.0, 1.0)).unwrap();
    }
    assert!(tree.node_count() > 1);

    tree.dispose();
    assert_eq!(tree.node_count(), 1);
    assert!(tree.root().is_leaf());
    assert!(tree.is_empty());

    tree.reset(cube(100.0));
    assert_eq!(*tree.bounds(), cube(100.0));
    tree.insert(Item::dot(50.0, 0.0, 0.0)).unwrap();
    assert_eq!(tree.len(), 1);
}

#[test]
fn test_traversal_helpers() {
    let mut tree = small_tree();
    tree.insert(Item::dot(2.0, 2.0, 2.0)).unwrap();
    tree.insert(Item::dot(-2.0, 2.0, 2.0)).unwrap();
    tree.insert(Item::dot(2.0, -2.0, -2.0)).unwrap();

    let order: Vec<_> = tree.iter().map(|n| n.id()).collect();
    assert_eq!(order.len(), tree.node_count());
    assert_eq!(order[0], tree.root().id());

    assert_eq!(tree.leaves().len(), 8);
    assert_eq!(tree.select(|n| n.object_count() > 0).len(), 3);

    let mut visited = 0;
    tree.visit(|_| visited += 1);
    assert_eq!(visited, 9);
}

#[test]
fn test_object_counts() {
    let mut tree = small_tree();
    tree.insert(Item::dot(1.0, 1.0, 1.0)).unwrap();
    tree.insert(Item {
        shape: Shape::Blob,
        ..Item::dot(-1.0, 1.0, 1.0)
    })
    .unwrap();

    let counts = tree.object_counts();
    assert_eq!(counts[&Shape::Dot], 1);
    assert_eq!(counts[&Shape::Blob], 1);
}

fn blob(x: f64, y: f64, z: f64) -> Item {
    Item {
        shape: Shape::Blob,
        ..Item::dot(x, y, z)
    }
}

#[test]
fn test_split_keeps_kind_arrival_order() {
    let shapes_in_upper_octant = |first: Item, second: Item, third: Item| {
        let mut tree = small_tree();
        tree.insert(first).unwrap();
        tree.insert(second).unwrap();
        tree.insert(third).unwrap();
        tree.insert(blob(-1.0, -1.0, -1.0)).unwrap();
        // Third blob splits the root
        tree.insert(blob(-1.0, 1.0, -1.0)).unwrap();

        let upper = tree.root().children().unwrap()[7];
        tree.node(upper)
            .unwrap()
            .all_objects()
            .map(|item| item.shape)
            .collect::<Vec<_>>()
    };

    for _ in 0..4 {
        assert_eq!(
            shapes_in_upper_octant(
                Item::dot(1.0, 1.0, 1.0),
                Item::dot(2.0, 2.0, 2.0),
                blob(1.5, 1.5, 1.5)
            ),
            vec![Shape::Dot, Shape::Dot, Shape::Blob]
        );
        assert_eq!(
            shapes_in_upper_octant(
                blob(1.5, 1.5, 1.5),
                Item::dot(1.0, 1.0, 1.0),
                Item::dot(2.0, 2.0, 2.0)
            ),
            vec![Shape::Blob, Shape::Dot, Shape::Dot]
        );
    }
}
