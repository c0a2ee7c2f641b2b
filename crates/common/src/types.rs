use glam::{IVec3, UVec3};
use serde::{Deserialize, Serialize};

/// Dimensions of a voxel grid, in cells per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl GridSize {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// Total number of cells, `x * y * z`.
    ///
    /// `None` when the product overflows `usize` or an axis is too long for
    /// `IVec3` cell coordinates.
    pub fn volume(&self) -> Option<usize> {
        let max = i32::MAX as u32;
        if self.x > max || self.y > max || self.z > max {
            return None;
        }
        (self.x as usize)
            .checked_mul(self.y as usize)?
            .checked_mul(self.z as usize)
    }

    /// True when any axis is zero.
    pub fn is_empty(&self) -> bool {
        self.x == 0 || self.y == 0 || self.z == 0
    }

    pub fn as_uvec3(&self) -> UVec3 {
        UVec3::new(self.x, self.y, self.z)
    }
}

/// Errors from constructing a color.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("color out of range: h={h} (0-360) s={s} (0-100) l={l} (0-100)")]
    OutOfRange { h: u16, s: u8, l: u8 },
}

/// Hue/saturation/lightness color. Hue in degrees, the others in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    /// Build a color, rejecting components outside `h <= 360`, `s <= 100`, `l <= 100`.
    pub fn new(h: u16, s: u8, l: u8) -> Result<Self, ColorError> {
        if h > 360 || s > 100 || l > 100 {
            return Err(ColorError::OutOfRange { h, s, l });
        }
        Ok(Self { h, s, l })
    }
}

impl Default for Hsl {
    fn default() -> Self {
        Self { h: 0, s: 100, l: 50 }
    }
}

/// A colored unit cube at an integer grid position.
///
/// Voxels are immutable once placed; editing a cell replaces its voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Voxel {
    pub position: IVec3,
    pub color: Hsl,
}

impl Voxel {
    pub fn new(position: IVec3, color: Hsl) -> Self {
        Self { position, color }
    }
}

/// One of the five faces the cursor can target. The bottom face is never visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Top face, `f = 0`.
    Top,
    /// Side facing +Y, `f = 1`.
    PosY,
    /// Side facing +X, `f = 2`.
    PosX,
    /// Side facing -Y, `f = 3`.
    NegY,
    /// Side facing -X, `f = 4`.
    NegX,
}

impl Face {
    /// Numeric face id as used by the map tooling and debug output.
    pub fn id(self) -> u8 {
        match self {
            Self::Top => 0,
            Self::PosY => 1,
            Self::PosX => 2,
            Self::NegY => 3,
            Self::NegX => 4,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(Self::Top),
            1 => Some(Self::PosY),
            2 => Some(Self::PosX),
            3 => Some(Self::NegY),
            4 => Some(Self::NegX),
            _ => None,
        }
    }

    /// Outward unit normal; the neighbour across this face is `cell + normal`.
    pub fn normal(self) -> IVec3 {
        match self {
            Self::Top => IVec3::Z,
            Self::PosY => IVec3::Y,
            Self::PosX => IVec3::X,
            Self::NegY => IVec3::NEG_Y,
            Self::NegX => IVec3::NEG_X,
        }
    }
}

/// The grid cell and face currently under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub cell: IVec3,
    pub face: Face,
}

impl Cursor {
    /// Sentinel meaning "nothing under the pointer": cell `(0, 0, -1)`, top face.
    pub const NONE: Self = Self {
        cell: IVec3::new(0, 0, -1),
        face: Face::Top,
    };

    pub fn new(cell: IVec3, face: Face) -> Self {
        Self { cell, face }
    }

    /// The cell a new voxel would occupy if placed against this face.
    pub fn adjacent(&self) -> IVec3 {
        self.cell + self.face.normal()
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::NONE
    }
}
