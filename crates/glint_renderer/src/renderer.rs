//! Progressive render passes over image rows.
//!
//! One call to [`Renderer::render`] is one blocking pass: rows fan out
//! across the rayon pool, each worker owning the disjoint accumulation
//! and display slices for its row, and the call returns only when every
//! row is done. Scene and camera are read-only parameters scoped to the
//! call; the renderer never retains them.

use glam::Vec4;
use glint_core::{Scene, SceneError};
use glint_math::Ray;
use rayon::prelude::*;
use thiserror::Error;

use crate::camera::Camera;
use crate::film::{pack_rgba, Film};
use crate::integrator::per_pixel;
use crate::rng::{pixel_seed, PathRng};

/// Errors that abort a render pass.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// Scene configuration problem, e.g. a dangling material index.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The camera's ray table was not regenerated for the film size.
    #[error(
        "camera ray table is {camera_width}x{camera_height} \
         but the film is {film_width}x{film_height}; \
         resize both before rendering"
    )]
    ResolutionMismatch {
        camera_width: u32,
        camera_height: u32,
        film_width: u32,
        film_height: u32,
    },
}

/// Runtime render configuration.
///
/// Plain mutable values, adjusted by the embedding application between
/// passes.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    /// Keep a running mean across passes; when off, every pass starts
    /// from scratch
    pub accumulate: bool,
    /// Radius of the primary-ray jitter used for antialiasing
    pub anti_aliasing_amount: f32,
    /// Maximum number of secondary bounces per path
    pub light_bounces: u32,
    /// Independent paths averaged per pixel per pass
    pub rays_per_pixel: u32,
    /// Debug view: return first-hit normals instead of radiance
    pub display_normals: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accumulate: true,
            anti_aliasing_amount: 0.001,
            light_bounces: 5,
            rays_per_pixel: 1,
            display_normals: false,
        }
    }
}

/// The progressive path-tracing renderer.
///
/// Owns the film; everything else arrives per pass.
#[derive(Debug, Default)]
pub struct Renderer {
    /// Live render configuration
    pub settings: Settings,
    film: Film,
    has_image: bool,
}

impl Renderer {
    /// Create a renderer with default settings and an empty film.
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            film: Film::new(),
            has_image: false,
        }
    }

    /// The film holding accumulation and display buffers.
    pub fn film(&self) -> &Film {
        &self.film
    }

    /// Index of the pass about to be accumulated (1-based).
    pub fn frame_index(&self) -> u32 {
        self.film.frame_index()
    }

    /// Whether at least one pass has completed since the last resize.
    pub fn has_image(&self) -> bool {
        self.has_image
    }

    /// Packed display pixel at `(x, y)`, row 0 at the top.
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.film.pixel(x, y)
    }

    /// Reallocate film buffers for a new resolution.
    ///
    /// Must only be called between passes, on the render-driving thread.
    /// The camera has to be resized to the same resolution before the
    /// next pass. Zero dimensions are rejected as a no-op.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("renderer resize to {}x{} rejected", width, height);
            return;
        }
        if (width, height) == self.film.resolution() {
            return;
        }
        self.film.resize(width, height);
        self.has_image = false;
    }

    /// Restart progressive accumulation with the next pass.
    pub fn reset_frame_index(&mut self) {
        self.film.reset();
    }

    /// Run one full render pass, blocking until every row is finished.
    ///
    /// Rows may complete in any order, but each pixel's result depends
    /// only on `(scene, camera, frame_index, sample_index)`, so output is
    /// deterministic regardless of scheduling. The caller must not mutate
    /// `scene` or `camera` while the pass runs.
    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), RenderError> {
        let (film_width, film_height) = self.film.resolution();
        if film_width == 0 || film_height == 0 {
            log::warn!("render skipped: film has no pixels");
            return Ok(());
        }

        let (camera_width, camera_height) = camera.resolution();
        if (camera_width, camera_height) != (film_width, film_height) {
            return Err(RenderError::ResolutionMismatch {
                camera_width,
                camera_height,
                film_width,
                film_height,
            });
        }

        self.film.begin_pass();

        let settings = self.settings;
        let rays_per_pixel = settings.rays_per_pixel.max(1);
        let frame_index = self.film.frame_index();
        let eye = camera.position();
        let width = film_width as usize;

        let (accumulation, pixels) = self.film.buffers_mut();
        accumulation
            .par_chunks_mut(width)
            .zip(pixels.par_chunks_mut(width))
            .enumerate()
            .try_for_each(|(y, (accumulation_row, pixel_row))| -> Result<(), RenderError> {
                let y = y as u32;
                for x in 0..film_width {
                    let mut color = Vec4::ZERO;
                    for sample in 0..rays_per_pixel {
                        let seed = pixel_seed(x, y, film_width, frame_index, sample);
                        let mut rng = PathRng::new(seed);

                        let direction = camera.direction(x, y)
                            + rng.in_unit_sphere() * settings.anti_aliasing_amount;
                        let ray = Ray::new(eye, direction);

                        color += per_pixel(scene, ray, &mut rng, &settings)?;
                    }
                    color /= rays_per_pixel as f32;
                    color.w = 1.0;

                    let slot = x as usize;
                    accumulation_row[slot] += color;
                    pixel_row[slot] = pack_rgba(accumulation_row[slot] / frame_index as f32);
                }
                Ok(())
            })?;

        self.film.advance(settings.accumulate);
        self.has_image = true;
        log::debug!(
            "pass {} complete at {}x{}",
            frame_index,
            film_width,
            film_height
        );
        Ok(())
    }
}
