use nalgebra::{Point3, Vector3};

/// An axis-aligned bounding box in 3D space.
///
/// Bounds are closed: a box contains itself and items touching its faces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Creates a box from two opposite corners in any order.
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// A cube of half-size `half_extent` centred on `center`.
    pub fn from_center(center: Point3<f64>, half_extent: f64) -> Self {
        let h = Vector3::repeat(half_extent);
        Self {
            min: center - h,
            max: center + h,
        }
    }

    /// An inverted box that any `extend` call replaces.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        points
            .into_iter()
            .fold(Self::empty(), |bounds, p| bounds.extend(&p))
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Grows the box to include `point`.
    pub fn extend(&self, point: &Point3<f64>) -> Self {
        Self {
            min: self.min.inf(point),
            max: self.max.sup(point),
        }
    }

    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Pushes every face outwards by `margin`.
    pub fn expanded(&self, margin: f64) -> Self {
        let m = Vector3::repeat(margin);
        Self {
            min: self.min - m,
            max: self.max + m,
        }
    }

    /// True if `other` lies entirely inside this box.
    pub fn contains(&self, other: &Aabb) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && self.min.z <= other.min.z
            && self.max.x >= other.max.x
            && self.max.y >= other.max.y
            && self.max.z >= other.max.z
    }

    pub fn contains_point(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| self.min[axis] <= other.max[axis] && other.min[axis] <= self.max[axis])
    }

    /// Creates the sub-box for octant `index` (0-7).
    ///
    /// Bit 0 selects the upper half in x, bit 1 in y, bit 2 in z:
    /// ```text
    ///        z = 0              z = 1
    /// +-------+-------+  +-------+-------+
    /// |   2   |   3   |  |   6   |   7   |
    /// +-------+-------+  +-------+-------+
    /// |   0   |   1   |  |   4   |   5   |
    /// +-------+-------+  +-------+-------+
    /// ```
    pub fn octant(&self, index: usize) -> Self {
        let center = self.center();
        let pick = |bit: usize, axis: usize| {
            if index & bit != 0 {
                (center[axis], self.max[axis])
            } else {
                (self.min[axis], center[axis])
            }
        };
        let (x0, x1) = pick(1, 0);
        let (y0, y1) = pick(2, 1);
        let (z0, z1) = pick(4, 2);
        Self {
            min: Point3::new(x0, y0, z0),
            max: Point3::new(x1, y1, z1),
        }
    }

    /// Slab test: true if the ray starts inside the box or hits it ahead of
    /// its origin.
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        let mut t_near = f64::NEG_INFINITY;
        let mut t_far = f64::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir == 0.0 {
                if origin < lo || origin > hi {
                    return false;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let a = (lo - origin) * inv;
            let b = (hi - origin) * inv;
            t_near = t_near.max(a.min(b));
            t_far = t_far.min(a.max(b));
            if t_near > t_far {
                return false;
            }
        }

        t_far >= 0.0
    }
}

/// A half-line starting at `origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// Ray from `origin` through `target`.
    pub fn through(origin: Point3<f64>, target: Point3<f64>) -> Self {
        Self::new(origin, target - origin)
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// Parameter of the first hit with a sphere, if any lies ahead of the origin.
    ///
    /// Solves |o + t·d − c|² = r² for the smallest t ≥ 0.
    pub fn intersect_sphere(&self, center: &Point3<f64>, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let a = self.direction.norm_squared();
        if a == 0.0 {
            return None;
        }
        let half_b = oc.dot(&self.direction);
        let c = oc.norm_squared() - radius * radius;
        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = (-half_b - root) / a;
        if near >= 0.0 {
            return Some(near);
        }
        let far = (-half_b + root) / a;
        (far >= 0.0).then_some(far)
    }
}
