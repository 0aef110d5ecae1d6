//! Glint CPU path tracer.
//!
//! A progressive Monte Carlo renderer over the `glint_core` scene model:
//! - Brute-force ray intersection against sphere/cube primitives
//! - Stochastic diffuse/specular/refractive lobe mixing with Russian
//!   roulette termination
//! - Deterministic per-pixel seeding, so a frame is a pure function of
//!   `(scene, camera, frame index)`
//! - Row-parallel passes via rayon, accumulated into a progressive film
//!
//! Window management, scene editing, and image export are external
//! collaborators; they drive [`Renderer`] and consume [`Film`] through
//! the interfaces here.

mod camera;
mod film;
mod integrator;
mod renderer;
mod rng;

pub use camera::Camera;
pub use film::{pack_rgba, Film};
pub use integrator::{per_pixel, trace_ray, Hit};
pub use renderer::{RenderError, Renderer, Settings};
pub use rng::{pixel_seed, PathRng};

/// Re-export the scene model and math types
pub use glint_core::{Material, Primitive, Scene, SceneError, Shape};
pub use glint_math::{Ray, Vec3};
