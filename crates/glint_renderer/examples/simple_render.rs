//! Headless progressive render example.
//!
//! Builds a small demo scene, accumulates a number of passes, and saves
//! the result as a PNG. The film's rows are top-down, matching the PNG
//! row order, so the buffer is written out without a flip.

use anyhow::{Context, Result};
use glint_renderer::{Camera, Material, Primitive, Renderer, Scene, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;
const PASSES: u32 = 64;

fn main() -> Result<()> {
    env_logger::init();

    let scene = build_scene();
    let mut camera = Camera::new(Vec3::new(0.0, 1.0, -6.0), Vec3::new(0.0, 0.0, 0.0), 45.0);
    camera.resize(WIDTH, HEIGHT);

    let mut renderer = Renderer::new();
    renderer.settings.light_bounces = 8;
    renderer.settings.rays_per_pixel = 2;
    renderer.on_resize(WIDTH, HEIGHT);

    println!(
        "Rendering {}x{}, {} passes @ {} rays/pixel...",
        WIDTH, HEIGHT, PASSES, renderer.settings.rays_per_pixel
    );

    let start = std::time::Instant::now();
    for _ in 0..PASSES {
        renderer.render(&scene, &camera)?;
    }
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.png";
    image::save_buffer(
        filename,
        renderer.film().as_rgba_bytes(),
        WIDTH,
        HEIGHT,
        image::ColorType::Rgba8,
    )
    .context("failed to save image")?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();
    scene.sky_color = Vec3::new(0.75, 0.075, 0.75);

    let pink = scene.add_material(Material {
        color: Vec3::new(1.0, 0.4, 0.7),
        smoothness: 0.4,
        ..Default::default()
    });
    let floor = scene.add_material(Material::new(Vec3::new(0.3, 0.3, 0.35)));
    let lamp = scene.add_material(Material {
        color: Vec3::new(0.9, 0.8, 0.6),
        emission_color: Vec3::new(0.9, 0.8, 0.6),
        emission_power: 6.0,
        ..Default::default()
    });
    let mirror = scene.add_material(Material {
        color: Vec3::new(0.9, 0.9, 0.9),
        smoothness: 1.0,
        metallic: 1.0,
        ..Default::default()
    });

    scene.add_object(Primitive::sphere(Vec3::new(0.0, 0.0, 0.0), 1.0, pink));
    scene.add_object(Primitive::sphere(Vec3::new(0.0, -101.0, 0.0), 100.0, floor));
    scene.add_object(Primitive::sphere(Vec3::new(3.0, 3.0, -2.0), 1.5, lamp));
    scene.add_object(Primitive::cube(
        Vec3::new(-2.5, -0.5, 1.0),
        Vec3::new(0.5, 0.5, 0.5),
        mirror,
    ));

    // Scatter a few small diffuse spheres around the centerpiece
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..12 {
        let material = scene.add_material(Material::new(Vec3::new(
            rng.gen_range(0.2..1.0),
            rng.gen_range(0.2..1.0),
            rng.gen_range(0.2..1.0),
        )));
        let position = Vec3::new(
            rng.gen_range(-4.0..4.0),
            -0.8,
            rng.gen_range(-2.0..3.0),
        );
        scene.add_object(Primitive::sphere(position, 0.2, material));
    }

    scene
}
