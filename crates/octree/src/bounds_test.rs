use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};

use crate::bounds::{Aabb, Ray};

fn unit_cube() -> Aabb {
    Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))
}

#[test]
fn test_new_orders_corners() {
    let b = Aabb::new(Point3::new(2.0, -1.0, 5.0), Point3::new(-2.0, 1.0, 3.0));
    assert_eq!(b.min, Point3::new(-2.0, -1.0, 3.0));
    assert_eq!(b.max, Point3::new(2.0, 1.0, 5.0));
}

#[test]
fn test_from_points() {
    let b = Aabb::from_points(vec![
        Point3::new(1.0, 2.0, 0.0),
        Point3::new(-3.0, 0.5, 0.0),
        Point3::new(0.0, -4.0, 0.0),
    ]);
    assert_eq!(b.min, Point3::new(-3.0, -4.0, 0.0));
    assert_eq!(b.max, Point3::new(1.0, 2.0, 0.0));
    assert!(Aabb::from_points(Vec::new()).is_empty());
}

#[test]
fn test_contains_is_inclusive() {
    let b = unit_cube();
    assert!(b.contains(&b));
    assert!(b.contains(&Aabb::from_center(Point3::new(0.5, 0.5, 0.5), 0.1)));
    assert!(!b.contains(&Aabb::from_center(Point3::new(0.95, 0.5, 0.5), 0.1)));
    assert!(b.contains_point(&Point3::new(1.0, 0.0, 0.5)));
    assert!(!b.contains_point(&Point3::new(1.01, 0.0, 0.5)));
}

#[test]
fn test_expanded() {
    let b = unit_cube().expanded(2.0);
    assert_eq!(b.min, Point3::new(-2.0, -2.0, -2.0));
    assert_eq!(b.max, Point3::new(3.0, 3.0, 3.0));
}

#[test]
fn test_octants_tile_the_parent() {
    let parent = Aabb::new(Point3::new(-4.0, -2.0, 0.0), Point3::new(4.0, 2.0, 8.0));
    let mut volume = 0.0;
    for i in 0..8 {
        let child = parent.octant(i);
        assert!(parent.contains(&child));
        let size = child.size();
        assert_relative_eq!(size, parent.size() / 2.0);
        volume += size.x * size.y * size.z;
    }
    let total = parent.size();
    assert_relative_eq!(volume, total.x * total.y * total.z);

    // Bit layout: 1 = +x, 2 = +y, 4 = +z
    assert_eq!(parent.octant(0).min, parent.min);
    assert_eq!(parent.octant(7).max, parent.max);
    assert_eq!(parent.octant(5).min, Point3::new(0.0, -2.0, 4.0));
}

#[test]
fn test_ray_hits_box_ahead() {
    let ray = Ray::new(Point3::new(0.5, 0.5, -5.0), Vector3::z());
    assert!(unit_cube().intersects_ray(&ray));
}

#[test]
fn test_ray_misses_box_behind() {
    let ray = Ray::new(Point3::new(0.5, 0.5, 5.0), Vector3::z());
    assert!(!unit_cube().intersects_ray(&ray));
}

#[test]
fn test_ray_from_inside() {
    let ray = Ray::new(Point3::new(0.5, 0.5, 0.5), Vector3::new(1.0, 2.0, -3.0));
    assert!(unit_cube().intersects_ray(&ray));
}

#[test]
fn test_axis_parallel_ray_outside_slab() {
    let ray = Ray::new(Point3::new(2.0, 0.5, -5.0), Vector3::z());
    assert!(!unit_cube().intersects_ray(&ray));
}

#[test]
fn test_diagonal_ray() {
    let ray = Ray::through(Point3::new(-1.0, -1.0, -1.0), Point3::new(0.5, 0.5, 0.5));
    assert!(unit_cube().intersects_ray(&ray));

    let miss = Ray::through(Point3::new(-1.0, -1.0, -1.0), Point3::new(-1.0, 3.0, 0.0));
    assert!(!unit_cube().intersects_ray(&miss));
}

#[test]
fn test_ray_sphere_nearest_hit() {
    let ray = Ray::new(Point3::new(0.0, 0.0, -10.0), Vector3::z());
    let t = ray.intersect_sphere(&Point3::origin(), 2.0).unwrap();
    assert_relative_eq!(t, 8.0);
    assert_relative_eq!(ray.point_at(t), Point3::new(0.0, 0.0, -2.0));
}

#[test]
fn test_ray_sphere_from_inside_and_miss() {
    let ray = Ray::new(Point3::origin(), Vector3::x());
    assert_relative_eq!(ray.intersect_sphere(&Point3::origin(), 1.5).unwrap(), 1.5);

    let offset = Ray::new(Point3::new(0.0, 3.0, -10.0), Vector3::z());
    assert!(offset.intersect_sphere(&Point3::origin(), 2.0).is_none());

    let behind = Ray::new(Point3::new(0.0, 0.0, 10.0), Vector3::z());
    assert!(behind.intersect_sphere(&Point3::origin(), 2.0).is_none());
}
