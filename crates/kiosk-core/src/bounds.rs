//! Bounding volume resolution for a freshly loaded kiosk model.
//!
//! The loader hands over a [`KioskModel`]: a root group carrying a uniform
//! scale that wraps the loaded scene. [`resolve`] measures the scene, moves
//! it so it sits centered on the floor plane and returns the final
//! world-space [`BoundingVolume`]. Only the scene root's translation is ever
//! written.

use crate::error::BoundsError;
use glam::{Affine3A, Quat, Vec3};

/// Axis-aligned box accumulated from points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    #[inline]
    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }
}

/// Immutable description of the model's extent once it has been placed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingVolume {
    pub center: Vec3,
    pub size: Vec3,
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingVolume {
    /// Build a volume from explicit extents, e.g. for a model measured elsewhere.
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self::from(Aabb { min, max })
    }

    pub fn max_dimension(&self) -> f32 {
        self.size.max_element()
    }
}

impl From<Aabb> for BoundingVolume {
    fn from(b: Aabb) -> Self {
        let size = b.size();
        Self {
            center: b.center(),
            size,
            min: b.min,
            max: b.min + size,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Mesh {
    pub name: String,
    /// Placement relative to the scene root.
    pub transform: Affine3A,
    pub vertices: Vec<Vec3>,
}

/// Root node of the loaded scene graph.
#[derive(Clone, Debug)]
pub struct SceneRoot {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub meshes: Vec<Mesh>,
}

impl SceneRoot {
    pub fn new(meshes: Vec<Mesh>) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            meshes,
        }
    }

    pub fn local_transform(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// The group that owns the loaded scene; its uniform scale is applied on top
/// of whatever the scene root carries.
#[derive(Clone, Debug)]
pub struct KioskModel {
    pub scale: f32,
    pub scene: SceneRoot,
}

impl KioskModel {
    pub fn new(scene: SceneRoot, scale: f32) -> Self {
        Self { scale, scene }
    }

    pub fn group_transform(&self) -> Affine3A {
        Affine3A::from_scale(Vec3::splat(self.scale))
    }
}

/// Box around every vertex of `scene`, expressed in the space `outer` maps
/// the scene's parent into.
pub fn scene_box(scene: &SceneRoot, outer: Affine3A) -> Result<Aabb, BoundsError> {
    let root = outer * scene.local_transform();
    let mut aabb = Aabb::empty();
    for mesh in &scene.meshes {
        let xf = root * mesh.transform;
        for v in &mesh.vertices {
            let p = xf.transform_point3(*v);
            if !p.is_finite() {
                return Err(BoundsError::NonFinite {
                    mesh: mesh.name.clone(),
                });
            }
            aabb.extend(p);
        }
    }
    if aabb.is_empty() {
        return Err(BoundsError::EmptyGeometry);
    }
    Ok(aabb)
}

/// Center the scene, rest it on y = 0 and measure it through the root group.
///
/// The full center (Y included) is subtracted first and the result is then
/// lifted back so its lowest point touches the floor. Running this again on
/// an already placed model moves it by (approximately) nothing.
pub fn resolve(model: &mut KioskModel) -> Result<BoundingVolume, BoundsError> {
    let loaded = scene_box(&model.scene, Affine3A::IDENTITY)?;
    model.scene.translation -= loaded.center();

    let centered = scene_box(&model.scene, Affine3A::IDENTITY)?;
    model.scene.translation.y -= centered.min.y;

    let placed = scene_box(&model.scene, model.group_transform())?;
    let bv = BoundingVolume::from(placed);
    log::info!(
        "[bounds] size=({:.3},{:.3},{:.3}) center=({:.3},{:.3},{:.3})",
        bv.size.x,
        bv.size.y,
        bv.size.z,
        bv.center.x,
        bv.center.y,
        bv.center.z
    );
    Ok(bv)
}
