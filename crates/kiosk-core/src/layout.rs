//! Anchor placement derived from the model's bounding volume.
//!
//! Every anchor is a per-axis fraction of one of the model's extents. The
//! coefficients live in the tables below rather than inline so the layout can
//! be read (and tuned) in one place:
//!
//! | Anchor        | X            | Y        | Z             |
//! |---------------|--------------|----------|---------------|
//! | camera target | 0            | 0.75·Y   | 0             |
//! | camera        | 0            | 0.50·Y   | 2.00·max      |
//! | screen        | −0.18·X      | 0.70·Y   | 0.14·max      |
//! | screen size   | 0.18·X       | 0.26·Y   |               |
//! | card start    | 0.70·X       | 0.15·Y   | 0.65·max      |
//! | hotspot       | 0.22·X       | 0.48·Y   | 0.32·Z        |

use crate::bounds::BoundingVolume;
use glam::{Vec2, Vec3};

/// Which model extent a coefficient multiplies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extent {
    X,
    Y,
    Z,
    /// Largest of the three.
    Max,
}

pub type Term = (Extent, f32);

pub const CAMERA_TARGET: [Term; 3] = [(Extent::X, 0.0), (Extent::Y, 0.75), (Extent::Z, 0.0)];
pub const CAMERA_POS: [Term; 3] = [(Extent::X, 0.0), (Extent::Y, 0.50), (Extent::Max, 2.0)];
pub const SCREEN_POS: [Term; 3] = [(Extent::X, -0.18), (Extent::Y, 0.70), (Extent::Max, 0.14)];
pub const SCREEN_SIZE: [Term; 2] = [(Extent::X, 0.18), (Extent::Y, 0.26)];
pub const CARD_START_POS: [Term; 3] = [(Extent::X, 0.70), (Extent::Y, 0.15), (Extent::Max, 0.65)];
pub const HOTSPOT_POS: [Term; 3] = [(Extent::X, 0.22), (Extent::Y, 0.48), (Extent::Z, 0.32)];

/// Read-only anchor set consumed by the camera, screen panel, drag plane and
/// hotspot. Recomputed whenever a model (re)loads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub camera_pos: Vec3,
    pub camera_target: Vec3,
    pub screen_pos: Vec3,
    pub screen_size: Vec2,
    pub card_start_pos: Vec3,
    pub hotspot_pos: Vec3,
}

#[inline]
fn extent(size: Vec3, e: Extent) -> f32 {
    match e {
        Extent::X => size.x,
        Extent::Y => size.y,
        Extent::Z => size.z,
        Extent::Max => size.max_element(),
    }
}

#[inline]
fn term(size: Vec3, (e, k): Term) -> f32 {
    extent(size, e) * k
}

pub fn anchor3(size: Vec3, terms: &[Term; 3]) -> Vec3 {
    Vec3::new(term(size, terms[0]), term(size, terms[1]), term(size, terms[2]))
}

pub fn anchor2(size: Vec3, terms: &[Term; 2]) -> Vec2 {
    Vec2::new(term(size, terms[0]), term(size, terms[1]))
}

/// Pure: same volume in, same layout out.
pub fn plan(bv: &BoundingVolume) -> Layout {
    let size = bv.size;
    Layout {
        camera_pos: anchor3(size, &CAMERA_POS),
        camera_target: anchor3(size, &CAMERA_TARGET),
        screen_pos: anchor3(size, &SCREEN_POS),
        screen_size: anchor2(size, &SCREEN_SIZE),
        card_start_pos: anchor3(size, &CARD_START_POS),
        hotspot_pos: anchor3(size, &HOTSPOT_POS),
    }
}
