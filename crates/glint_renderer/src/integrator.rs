//! Ray-scene intersection and the per-pixel path integrator.
//!
//! The lobe mixing here is deliberately not a normalized BSDF. It is the
//! scheme existing scene content was authored against, including the
//! non-Snell `refract` with `ior' = 2 - ior`, and renders must stay
//! bit-identical across refactors. Do not "correct" it toward energy
//! conservation without flagging the compatibility break.

use glam::Vec4;
use glint_core::{Scene, SceneError};
use glint_math::{Ray, Vec3};

use crate::renderer::Settings;
use crate::rng::PathRng;

/// A resolved ray-scene intersection in world space.
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    /// Distance along the ray where it enters the primitive
    pub entry_distance: f32,
    /// Distance along the ray where it leaves the primitive
    pub exit_distance: f32,
    /// World-space hit point
    pub world_position: Vec3,
    /// World-space surface normal at the hit point
    pub world_normal: Vec3,
    /// Scene slot index of the primitive that was hit
    pub object_index: usize,
}

/// Find the nearest valid hit of `ray` against the scene.
///
/// Linear scan over every live slot. Only strictly positive entry
/// distances qualify, which keeps a ray from re-hitting the surface it
/// just left; the strict `<` comparison means the earlier slot wins
/// exact ties. Returns `None` when nothing qualifies.
pub fn trace_ray(scene: &Scene, ray: &Ray) -> Option<Hit> {
    let mut closest_entry = f32::MAX;
    let mut closest: Option<(usize, f32)> = None;

    for (index, primitive) in scene.objects() {
        if let Some((entry, exit)) = primitive.intersect(ray) {
            if entry > 0.0 && entry < closest_entry {
                closest_entry = entry;
                closest = Some((index, exit));
            }
        }
    }

    let (object_index, exit_distance) = closest?;
    // The index came from the live-slot iterator above
    let primitive = scene.object(object_index)?;

    // Normal is evaluated in primitive-local space, then the hit point
    // is translated back out to world space
    let local_position = (ray.origin - primitive.position) + ray.direction * closest_entry;
    Some(Hit {
        entry_distance: closest_entry,
        exit_distance,
        world_position: local_position + primitive.position,
        world_normal: primitive.normal(local_position),
        object_index,
    })
}

/// Linear interpolation with `t` clamped to [0, 1].
#[inline]
fn lerp3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + t.clamp(0.0, 1.0) * (b - a)
}

/// Mirror reflection of `v` about unit normal `n`.
#[inline]
fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// The transmission direction used by the lobe mix.
///
/// Not Snell refraction: the index is remapped as `2 - ior` and no
/// total-internal-reflection branch exists. Kept bit-exact for
/// compatibility with existing scenes.
#[inline]
fn refract(direction: Vec3, normal: Vec3, ior: f32) -> Vec3 {
    let ior = 2.0 - ior;
    let cos_i = normal.dot(direction);
    direction * ior - normal * (-cos_i + ior * cos_i)
}

/// Evaluate one primary ray: the full light-transport loop.
///
/// Runs at most `light_bounces + 1` iterations. Each bounce either
/// terminates (miss, roulette, bounce limit) or scatters into a
/// stochastic blend of the diffuse, specular, and refractive lobes.
/// Returns the radiance estimate with alpha 1.
///
/// The draw order against `rng` is part of the output contract:
/// diffuse direction, refractive Bernoulli, specular Bernoulli,
/// refraction jitter, roulette.
pub fn per_pixel(
    scene: &Scene,
    mut ray: Ray,
    rng: &mut PathRng,
    settings: &Settings,
) -> Result<Vec4, SceneError> {
    let mut incoming_light = Vec3::ZERO;
    let mut throughput = Vec3::ONE;

    for _ in 0..=settings.light_bounces {
        let Some(hit) = trace_ray(scene, &ray) else {
            incoming_light += scene.sky_color * throughput;
            break;
        };

        if settings.display_normals {
            // Debug view: first hit's normal as color, transport skipped
            return Ok(hit.world_normal.extend(1.0));
        }

        let Some(primitive) = scene.object(hit.object_index) else {
            // trace_ray only reports live slots
            break;
        };
        let material = *scene.material_for(hit.object_index, primitive)?;

        let incoming_direction = ray.direction;
        ray.origin = hit.world_position;

        let diffuse_direction = (hit.world_normal + rng.in_unit_sphere()).normalize();
        let specular_direction = reflect(incoming_direction, hit.world_normal);

        let refractive_bounce = material.transmission >= rng.next_f32();
        let specular_bounce = material.metallic >= rng.next_f32();

        let surface_blend = lerp3(
            diffuse_direction,
            specular_direction,
            material.smoothness * if specular_bounce { 1.0 } else { 0.0 },
        )
        .normalize();
        let transmission_blend = lerp3(
            refract(
                incoming_direction + rng.in_unit_sphere(),
                hit.world_normal,
                material.ior,
            ),
            refract(incoming_direction, hit.world_normal, material.ior),
            material.smoothness,
        )
        .normalize();

        ray.direction = lerp3(
            surface_blend,
            transmission_blend,
            if refractive_bounce { 1.0 } else { 0.0 },
        );

        incoming_light += material.emission() * throughput;
        throughput *= material.color;

        // Russian roulette: kill dim paths, reweight survivors so the
        // estimator stays unbiased
        let survival = throughput.x.max(throughput.y).max(throughput.z);
        if rng.next_f32() >= survival {
            break;
        }
        throughput /= survival;
    }

    Ok(incoming_light.extend(1.0))
}
