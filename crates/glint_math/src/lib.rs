// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod ray;
pub use ray::Ray;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_uses_reexported_vec3() {
        // Ray and the glam re-export must agree on the vector type
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Z);
        assert_eq!(ray.at(2.0), Vec3::new(1.0, 2.0, 5.0));
    }
}
