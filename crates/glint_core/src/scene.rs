//! Scene arena owning primitives and materials.

use glint_math::Vec3;
use thiserror::Error;

use crate::{Material, Primitive};

/// Errors surfaced by scene lookups.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// A primitive references a material slot that does not exist.
    #[error(
        "object {object_index} references material {material_index} \
         but the scene only has {material_count} materials"
    )]
    InvalidMaterialIndex {
        object_index: usize,
        material_index: usize,
        material_count: usize,
    },
}

/// A complete scene: an owning arena of primitives, the material table
/// they index into, and the ambient sky radiance.
///
/// Object slots are tombstoned on removal instead of shifted, so indices
/// handed out by [`Scene::add_object`] stay valid for the lifetime of the
/// scene. Iteration skips empty slots.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Object slots; `None` marks a removed object
    objects: Vec<Option<Primitive>>,

    /// Materials referenced by `Primitive::material_index`
    pub materials: Vec<Material>,

    /// Radiance returned for rays that escape the scene
    pub sky_color: Vec3,
}

impl Scene {
    /// Create an empty scene with a black sky.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive and return its slot index.
    pub fn add_object(&mut self, primitive: Primitive) -> usize {
        let index = self.objects.len();
        self.objects.push(Some(primitive));
        index
    }

    /// Remove the primitive at `index`, leaving a tombstone so other
    /// indices stay stable. Out-of-range or already-empty slots are a
    /// no-op.
    pub fn remove_object(&mut self, index: usize) {
        match self.objects.get_mut(index) {
            Some(slot) => *slot = None,
            None => log::warn!("remove_object: index {} out of range", index),
        }
    }

    /// Get the primitive at `index`, if the slot is occupied.
    pub fn object(&self, index: usize) -> Option<&Primitive> {
        self.objects.get(index).and_then(Option::as_ref)
    }

    /// Mutable access to the primitive at `index`.
    pub fn object_mut(&mut self, index: usize) -> Option<&mut Primitive> {
        self.objects.get_mut(index).and_then(Option::as_mut)
    }

    /// Iterate occupied slots as `(index, primitive)` pairs.
    pub fn objects(&self) -> impl Iterator<Item = (usize, &Primitive)> {
        self.objects
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (i, p)))
    }

    /// Number of slots, including tombstones.
    pub fn slot_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.iter().filter(|slot| slot.is_some()).count()
    }

    /// Add a material and return its index.
    pub fn add_material(&mut self, material: Material) -> usize {
        let index = self.materials.len();
        self.materials.push(material);
        index
    }

    /// Resolve the material of a primitive.
    ///
    /// A dangling material index is a configuration error on the editing
    /// side, reported rather than defaulted.
    pub fn material_for(
        &self,
        object_index: usize,
        primitive: &Primitive,
    ) -> Result<&Material, SceneError> {
        self.materials.get(primitive.material_index).ok_or(
            SceneError::InvalidMaterialIndex {
                object_index,
                material_index: primitive.material_index,
                material_count: self.materials.len(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_math::Vec3;

    #[test]
    fn test_add_and_remove_keeps_indices_stable() {
        let mut scene = Scene::new();
        let m = scene.add_material(Material::default());

        let a = scene.add_object(Primitive::sphere(Vec3::ZERO, 1.0, m));
        let b = scene.add_object(Primitive::cube(Vec3::X, Vec3::ONE, m));
        assert_eq!((a, b), (0, 1));
        assert_eq!(scene.object_count(), 2);

        scene.remove_object(a);
        assert_eq!(scene.object_count(), 1);
        assert_eq!(scene.slot_count(), 2);
        assert!(scene.object(a).is_none());
        assert!(scene.object(b).is_some());

        // Iteration skips the tombstone
        let live: Vec<usize> = scene.objects().map(|(i, _)| i).collect();
        assert_eq!(live, vec![b]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut scene = Scene::new();
        scene.remove_object(42);
        assert_eq!(scene.slot_count(), 0);
    }

    #[test]
    fn test_material_lookup() {
        let mut scene = Scene::new();
        let m = scene.add_material(Material::new(Vec3::new(0.5, 0.5, 0.5)));
        let sphere = Primitive::sphere(Vec3::ZERO, 1.0, m);

        let material = scene.material_for(0, &sphere).unwrap();
        assert_eq!(material.color, Vec3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_dangling_material_index_is_an_error() {
        let scene = Scene::new();
        let sphere = Primitive::sphere(Vec3::ZERO, 1.0, 3);

        let err = scene.material_for(7, &sphere).unwrap_err();
        assert_eq!(
            err,
            SceneError::InvalidMaterialIndex {
                object_index: 7,
                material_index: 3,
                material_count: 0,
            }
        );
    }
}
