//! Surface material definition.

use glint_math::Vec3;

/// A surface material driving the stochastic lobe mix in the integrator.
///
/// The parameters are not a normalized BSDF; they feed the renderer's
/// lobe-selection scheme directly and are kept compatible with existing
/// scene content (see `glint_renderer::integrator`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Albedo color (RGB, 0-1)
    pub color: Vec3,

    /// Lobe sharpness (0=fully diffuse, 1=mirror-sharp)
    pub smoothness: f32,

    /// Probability of a specular bounce (0=dielectric, 1=metal)
    pub metallic: f32,

    /// Emitted light color (RGB)
    pub emission_color: Vec3,

    /// Emitted light intensity multiplier
    pub emission_power: f32,

    /// Probability of a refractive bounce (0=opaque, 1=fully transmissive)
    pub transmission: f32,

    /// Index of refraction
    pub ior: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            smoothness: 0.0,
            metallic: 0.0,
            emission_color: Vec3::ZERO,
            emission_power: 0.0,
            transmission: 0.0,
            ior: 1.0,
        }
    }
}

impl Material {
    /// Create a plain diffuse material with the given albedo.
    pub fn new(color: Vec3) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Create an emissive material.
    pub fn emissive(emission_color: Vec3, emission_power: f32) -> Self {
        Self {
            emission_color,
            emission_power,
            ..Default::default()
        }
    }

    /// Total emitted radiance: emission color scaled by power.
    #[inline]
    pub fn emission(&self) -> Vec3 {
        self.emission_color * self.emission_power
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emission_power > 0.0 && self.emission_color.length_squared() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emission() {
        let material = Material::emissive(Vec3::new(1.0, 0.5, 0.0), 2.0);
        assert_eq!(material.emission(), Vec3::new(2.0, 1.0, 0.0));
        assert!(material.is_emissive());
    }

    #[test]
    fn test_default_is_dark() {
        let material = Material::default();
        assert_eq!(material.emission(), Vec3::ZERO);
        assert!(!material.is_emissive());
    }
}
