//! Spiral-arm geometry and the density ordering of arm points.

use nalgebra::{Point2, Point3, Rotation2};
use octree::Aabb;

use crate::config::GenerationConfig;

/// Spiral shape: radius a + b·t, angle w·t
pub const SPIRAL_A: f64 = 10.0;
pub const SPIRAL_B: f64 = 4.0;
pub const SPIRAL_W: f64 = 0.05;

/// Extra room around the arms on top of wander and window
pub const BOUNDS_MARGIN: f64 = 300.0;

/// An arm point tagged with its rank-based distance from the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmPoint {
    pub position: Point2<f64>,
    /// (rank + 1) / n once points are sorted by distance: 1 for the rim
    pub from_center: f64,
}

/// Samples `r = a + b·t`, `θ = w·t` for integer t in [0, iterations].
pub fn spiral(iterations: usize, a: f64, b: f64, w: f64) -> Vec<Point2<f64>> {
    (0..=iterations)
        .map(|t| {
            let t = t as f64;
            let r = a + b * t;
            Point2::new(r * (w * t).cos(), r * (w * t).sin())
        })
        .collect()
}

/// One polyline per arm, arm `i` rotated by `i · 360° / arm_count`.
pub fn build_arms(config: &GenerationConfig) -> Vec<Vec<Point2<f64>>> {
    let iterations = config.arm_iterations();
    (0..config.arm_count)
        .map(|i| {
            let rotation =
                Rotation2::new((i as f64 * 360.0 / config.arm_count as f64).to_radians());
            spiral(iterations, SPIRAL_A, SPIRAL_B, SPIRAL_W)
                .into_iter()
                .map(|p| rotation * p)
                .collect()
        })
        .collect()
}

/// Flattens all arms and sorts the points by distance from the centre.
///
/// The sort is stable, so equidistant points keep arm order.
pub fn density_order(arms: &[Vec<Point2<f64>>]) -> Vec<ArmPoint> {
    let mut points: Vec<Point2<f64>> = arms.iter().flatten().copied().collect();
    points.sort_by(|a, b| a.coords.norm().total_cmp(&b.coords.norm()));

    let n = points.len() as f64;
    points
        .into_iter()
        .enumerate()
        .map(|(rank, position)| ArmPoint {
            position,
            from_center: (rank as f64 + 1.0) / n,
        })
        .collect()
}

/// Root bounds for the galaxy index: every arm point, padded so any placement
/// (wander, deviation, candidate window) stays inside.
pub fn galaxy_bounds(arms: &[Vec<Point2<f64>>], config: &GenerationConfig) -> Aabb {
    Aabb::from_points(arms.iter().flatten().map(|p| Point3::new(p.x, p.y, 0.0)))
        .expanded(config.wander_distance + config.window + BOUNDS_MARGIN)
}
