//! Footprints, quarter-turn rotations and world-space transforms
//!
//! World space follows the grid: `x` grows with the grid column (toward North),
//! `y` with the grid row (toward East) and `z` is up. Angles are in degrees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::spatial::grid::GridCoord;

/// Size of a placement in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    /// Extent along `x`
    pub width: usize,
    /// Extent along `y`
    pub height: usize,
}

impl Footprint {
    /// Create a footprint
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of cells covered
    pub const fn area(self) -> usize {
        self.width * self.height
    }

    /// Footprint with its dimensions exchanged
    #[must_use]
    pub const fn swapped(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Quarter-turn rotation of a placed mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    /// No rotation
    #[default]
    Deg0,
    /// Quarter turn
    Deg90,
    /// Half turn
    Deg180,
    /// Three-quarter turn
    Deg270,
}

impl Rotation {
    /// All rotations in ascending order
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Rotation for an angle, normalised into `[0, 360)`
    ///
    /// Returns `None` for angles that are not a multiple of 90.
    pub const fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Angle in degrees
    pub const fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Footprint occupied after rotating
    ///
    /// Quarter and three-quarter turns exchange width and height.
    pub const fn apply(self, footprint: Footprint) -> Footprint {
        match self {
            Self::Deg0 | Self::Deg180 => footprint,
            Self::Deg90 | Self::Deg270 => footprint.swapped(),
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = String;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
            .ok_or_else(|| format!("rotation must be a multiple of 90 degrees, got {degrees}"))
    }
}

impl From<Rotation> for i32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

/// Point or offset in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// Toward North
    pub x: f64,
    /// Toward East
    pub y: f64,
    /// Up
    pub z: f64,
}

impl Vec3 {
    /// Origin
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a vector
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Self) -> f64 {
        let d = self - other;
        d.z.mul_add(d.z, d.x.mul_add(d.x, d.y * d.y)).sqrt()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Euler rotation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rotator {
    /// Rotation about `y`
    pub pitch: f64,
    /// Rotation about `z`
    pub yaw: f64,
    /// Rotation about `x`
    pub roll: f64,
}

impl Rotator {
    /// No rotation
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Create a rotator
    pub const fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Yaw-only rotator
    pub const fn from_yaw(yaw: f64) -> Self {
        Self::new(0.0, yaw, 0.0)
    }

    /// Component-wise sum of two rotators
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        Self::new(
            self.pitch + other.pitch,
            self.yaw + other.yaw,
            self.roll + other.roll,
        )
    }

    /// Rotator with every angle wrapped into `[0, 360)`
    #[must_use]
    pub fn normalized(self) -> Self {
        Self::new(
            self.pitch.rem_euclid(360.0),
            self.yaw.rem_euclid(360.0),
            self.roll.rem_euclid(360.0),
        )
    }

    /// Rotate a vector by roll, then pitch, then yaw
    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        let (sp, cp) = self.pitch.to_radians().sin_cos();
        let (sy, cy) = self.yaw.to_radians().sin_cos();
        let (sr, cr) = self.roll.to_radians().sin_cos();

        let x_axis = Vec3::new(cp * cy, cp * sy, sp);
        let y_axis = Vec3::new(
            (sr * sp).mul_add(cy, -(cr * sy)),
            (sr * sp).mul_add(sy, cr * cy),
            -sr * cp,
        );
        let z_axis = Vec3::new(
            -(cr * sp).mul_add(cy, sr * sy),
            cy.mul_add(sr, -(cr * sp * sy)),
            cr * cp,
        );

        Vec3::new(
            v.z.mul_add(z_axis.x, v.x.mul_add(x_axis.x, v.y * y_axis.x)),
            v.z.mul_add(z_axis.y, v.x.mul_add(x_axis.y, v.y * y_axis.y)),
            v.z.mul_add(z_axis.z, v.x.mul_add(x_axis.z, v.y * y_axis.z)),
        )
    }
}

/// Location and orientation of a placed mesh
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// World position
    pub location: Vec3,
    /// World orientation
    pub rotation: Rotator,
}

impl Transform {
    /// Identity transform
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Rotator::ZERO);

    /// Create a transform
    pub const fn new(location: Vec3, rotation: Rotator) -> Self {
        Self { location, rotation }
    }

    /// Pure translation
    pub const fn from_location(location: Vec3) -> Self {
        Self::new(location, Rotator::ZERO)
    }

    /// Express a transform given relative to this one in world space
    ///
    /// The local location is rotated into this frame; rotations add
    /// component-wise.
    #[must_use]
    pub fn child(&self, local: &Self) -> Self {
        Self {
            location: self.location + self.rotation.rotate_vector(local.location),
            rotation: self.rotation.combine(local.rotation),
        }
    }
}

/// Cells of a `footprint` rectangle whose minimum corner is `start`
///
/// Yields row-major order: `y` outer, `x` inner.
pub fn rect_cells(start: GridCoord, footprint: Footprint) -> impl Iterator<Item = GridCoord> {
    let width = footprint.width as i32;
    let height = footprint.height as i32;
    (0..height).flat_map(move |dy| (0..width).map(move |dx| start.offset(dx, dy)))
}

/// Transform of a mesh covering `footprint` cells from `start`
///
/// The mesh is centred on its footprint at height `z`, yawed by `rotation`.
pub fn mesh_transform(
    start: GridCoord,
    footprint: Footprint,
    rotation: Rotation,
    z: f64,
    cell_size: f64,
) -> Transform {
    let location = Vec3::new(
        (footprint.width as f64 * cell_size).mul_add(0.5, start.x as f64 * cell_size),
        (footprint.height as f64 * cell_size).mul_add(0.5, start.y as f64 * cell_size),
        z,
    );
    Transform::new(location, Rotator::from_yaw(rotation.degrees() as f64))
}

/// Local-space centre of a cell
pub fn grid_to_local(coord: GridCoord, cell_size: f64) -> Vec3 {
    Vec3::new(
        (coord.x as f64 + 0.5) * cell_size,
        (coord.y as f64 + 0.5) * cell_size,
        0.0,
    )
}

/// Cell containing a local-space point
pub fn local_to_grid(point: Vec3, cell_size: f64) -> GridCoord {
    GridCoord::new(
        (point.x / cell_size).floor() as i32,
        (point.y / cell_size).floor() as i32,
    )
}
