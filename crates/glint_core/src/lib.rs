//! Scene model for the Glint path tracer.
//!
//! Defines the renderable primitives (spheres and axis-aligned cubes),
//! their materials, and the owning scene arena the renderer reads from.
//! The renderer itself lives in `glint_renderer`; editing tools and
//! display layers are external collaborators that mutate a `Scene`
//! strictly between render passes.

mod material;
mod primitive;
mod scene;

pub use material::Material;
pub use primitive::{Primitive, Shape};
pub use scene::{Scene, SceneError};

/// Re-export common math types
pub use glint_math::{Ray, Vec3};
