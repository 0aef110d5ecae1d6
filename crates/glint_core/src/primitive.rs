//! Renderable primitives: spheres and axis-aligned cubes.
//!
//! The shape set is small and fixed, so dispatch is a closed enum rather
//! than a trait object. Intersection returns raw entry/exit distances;
//! the renderer decides which hits are valid.

use glint_math::{Ray, Vec3};

/// Shape-specific data of a primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Sphere with the given radius
    Sphere { radius: f32 },
    /// Axis-aligned box with the given half-widths along each axis
    Cube { half_extent: Vec3 },
}

/// A renderable object: a shape placed in the world with a material.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitive {
    /// World-space center
    pub position: Vec3,
    /// Index into `Scene::materials`
    pub material_index: usize,
    /// The geometry itself
    pub shape: Shape,
}

impl Primitive {
    /// Create a sphere primitive.
    pub fn sphere(position: Vec3, radius: f32, material_index: usize) -> Self {
        Self {
            position,
            material_index,
            shape: Shape::Sphere { radius },
        }
    }

    /// Create an axis-aligned cube primitive.
    pub fn cube(position: Vec3, half_extent: Vec3, material_index: usize) -> Self {
        Self {
            position,
            material_index,
            shape: Shape::Cube { half_extent },
        }
    }

    /// Intersect a world-space ray with this primitive.
    ///
    /// Returns `(entry, exit)` distances along the ray, or `None` on a
    /// miss. Distances may be negative; callers filter for the range
    /// they care about.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        // Translate the ray into the primitive's local space
        let origin = ray.origin - self.position;

        match self.shape {
            Shape::Sphere { radius } => {
                let a = ray.direction.dot(ray.direction);
                let b = 2.0 * origin.dot(ray.direction);
                let c = origin.dot(origin) - radius * radius;

                let discriminant = b * b - 4.0 * a * c;
                if discriminant < 0.0 {
                    return None;
                }

                let sqrtd = discriminant.sqrt();
                let entry = (-b - sqrtd) / (2.0 * a);
                let exit = (-b + sqrtd) / (2.0 * a);
                Some((entry, exit))
            }
            Shape::Cube { half_extent } => {
                // Slab method. Zero direction components divide to IEEE
                // infinities, which the min/max folding absorbs.
                let t1 = (-half_extent - origin) / ray.direction;
                let t2 = (half_extent - origin) / ray.direction;

                let entry = t1.min(t2).max_element();
                let exit = t1.max(t2).min_element();

                if entry > exit || exit < 0.0 {
                    return None;
                }
                Some((entry, exit))
            }
        }
    }

    /// Surface normal at a point given in primitive-local space.
    pub fn normal(&self, local_point: Vec3) -> Vec3 {
        match self.shape {
            Shape::Sphere { .. } => local_point.normalize(),
            Shape::Cube { half_extent } => {
                // Dominant axis of the extent-normalized point decides the
                // face. Ties resolve x, then y, then z.
                let scaled = local_point / half_extent;
                let magnitude = scaled.abs();

                if magnitude.x >= magnitude.y && magnitude.x >= magnitude.z {
                    Vec3::new(scaled.x.signum(), 0.0, 0.0)
                } else if magnitude.y >= magnitude.z {
                    Vec3::new(0.0, scaled.y.signum(), 0.0)
                } else {
                    Vec3::new(0.0, 0.0, scaled.z.signum())
                }
            }
        }
    }
}
