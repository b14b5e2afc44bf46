//! Procedural stand-in for the kiosk asset.
//!
//! The frontends do not ship a mesh loader, so they resolve this model
//! instead. It is authored away from the origin on purpose; the bounds pass
//! has to move it.

use crate::bounds::{KioskModel, Mesh, SceneRoot};
use glam::{Affine3A, Vec3};

/// Offset of the authored geometry from the origin.
const AUTHORED_AT: Vec3 = Vec3::new(1.2, 0.4, -0.6);

/// Axis-aligned box mesh (8 corner vertices) centered at `center`.
pub fn cuboid(name: &str, center: Vec3, half_extents: Vec3) -> Mesh {
    let mut vertices = Vec::with_capacity(8);
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                vertices.push(Vec3::new(sx, sy, sz) * half_extents);
            }
        }
    }
    Mesh {
        name: name.to_string(),
        transform: Affine3A::from_translation(center),
        vertices,
    }
}

/// Plinth, tower, screen bezel and card reader.
pub fn placeholder_kiosk(scale: f32) -> KioskModel {
    let at = |x: f32, y: f32, z: f32| AUTHORED_AT + Vec3::new(x, y, z);
    let scene = SceneRoot::new(vec![
        cuboid("plinth", at(0.60, 0.08, 0.40), Vec3::new(0.60, 0.08, 0.40)),
        cuboid("tower", at(0.60, 1.54, 0.40), Vec3::new(0.48, 1.46, 0.30)),
        cuboid("bezel", at(0.45, 2.20, 0.72), Vec3::new(0.28, 0.40, 0.02)),
        cuboid("reader", at(0.85, 1.55, 0.73), Vec3::new(0.10, 0.08, 0.04)),
    ]);
    KioskModel::new(scene, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::scene_box;

    #[test]
    fn placeholder_is_authored_off_center() {
        let model = placeholder_kiosk(1.5);
        let b = scene_box(&model.scene, Affine3A::IDENTITY).unwrap();
        assert!(b.center().x.abs() > 0.5);
        assert!(b.min.y > 0.1);
        assert!((b.size().y - 3.0).abs() < 1e-5);
    }
}
