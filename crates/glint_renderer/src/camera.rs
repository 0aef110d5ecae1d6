//! Pinhole camera with a cached per-pixel ray direction table.
//!
//! The renderer never derives directions itself; it reads this table,
//! one unit direction per pixel. The table is regenerated by
//! [`Camera::resize`], which must be called (together with
//! `Renderer::on_resize`) before rendering at a new resolution.
//!
//! Row orientation is top-down: row 0 of the table maps to the top row
//! of the image.

use glint_math::Vec3;

/// Perspective camera supplying primary ray data to the renderer.
#[derive(Clone, Debug)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    /// Vertical field of view in degrees
    vfov: f32,

    width: u32,
    height: u32,
    directions: Vec<Vec3>,
}

impl Camera {
    /// Create a camera at `position` looking at `look_at`.
    ///
    /// The direction table starts empty; call [`Camera::resize`] before
    /// rendering. `forward` must not be parallel to world up.
    pub fn new(position: Vec3, look_at: Vec3, vfov: f32) -> Self {
        Self {
            position,
            forward: (look_at - position).normalize(),
            vfov,
            width: 0,
            height: 0,
            directions: Vec::new(),
        }
    }

    /// World-space eye position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current table resolution as `(width, height)`.
    #[inline]
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The cached unit direction for pixel `(x, y)`, row 0 at the top.
    #[inline]
    pub fn direction(&self, x: u32, y: u32) -> Vec3 {
        self.directions[(x + y * self.width) as usize]
    }

    /// All cached directions in row-major, top-down order.
    pub fn ray_directions(&self) -> &[Vec3] {
        &self.directions
    }

    /// Regenerate the direction table for a new resolution.
    ///
    /// Zero dimensions are rejected as a no-op.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("camera resize to {}x{} rejected", width, height);
            return;
        }
        if width == self.width && height == self.height {
            return;
        }

        let right = self.forward.cross(Vec3::Y).normalize();
        let up = right.cross(self.forward);

        let tan_half_fov = (self.vfov.to_radians() / 2.0).tan();
        let aspect = width as f32 / height as f32;

        let mut directions = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                // Pixel centers mapped to [-1, 1]; +y up at the top row
                let ndc_x = ((x as f32 + 0.5) / width as f32) * 2.0 - 1.0;
                let ndc_y = 1.0 - ((y as f32 + 0.5) / height as f32) * 2.0;

                let direction = self.forward
                    + right * (ndc_x * tan_half_fov * aspect)
                    + up * (ndc_y * tan_half_fov);
                directions.push(direction.normalize());
            }
        }

        self.width = width;
        self.height = height;
        self.directions = directions;
        log::debug!("camera ray table regenerated at {}x{}", width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_fills_table() {
        let mut camera = Camera::new(Vec3::ZERO, -Vec3::Z, 90.0);
        camera.resize(8, 6);

        assert_eq!(camera.resolution(), (8, 6));
        assert_eq!(camera.ray_directions().len(), 48);
        for direction in camera.ray_directions() {
            assert!((direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_center_looks_forward() {
        let mut camera = Camera::new(Vec3::ZERO, -Vec3::Z, 60.0);
        camera.resize(101, 101);

        let center = camera.direction(50, 50);
        assert!((center - (-Vec3::Z)).length() < 1e-3);
    }

    #[test]
    fn test_rows_are_top_down() {
        let mut camera = Camera::new(Vec3::ZERO, -Vec3::Z, 60.0);
        camera.resize(4, 4);

        // Top row points above the horizon, bottom row below
        assert!(camera.direction(0, 0).y > 0.0);
        assert!(camera.direction(0, 3).y < 0.0);
    }

    #[test]
    fn test_zero_resize_is_noop() {
        let mut camera = Camera::new(Vec3::ZERO, -Vec3::Z, 60.0);
        camera.resize(4, 4);
        camera.resize(0, 4);

        assert_eq!(camera.resolution(), (4, 4));
        assert_eq!(camera.ray_directions().len(), 16);
    }
}
