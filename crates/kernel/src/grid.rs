use glam::{DVec3, IVec3};
use isovox_common::{GridSize, Hsl, Voxel};
use serde::{Deserialize, Serialize};

/// Errors from grid access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("cell {pos} is outside grid of size {size:?}")]
    OutOfRange { pos: IVec3, size: GridSize },
    #[error("linear index {index} is outside grid of volume {volume}")]
    IndexOutOfRange { index: usize, volume: usize },
    #[error("grid size {0:?} has a zero dimension or too many cells")]
    InvalidSize(GridSize),
}

/// Dense 3D grid of optional voxels.
///
/// Every cell exists for the lifetime of the grid; an empty cell is `None`.
/// Cells are stored in linear-index order so that a map file's `data` array
/// maps onto storage one to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoxelGrid {
    size: GridSize,
    cells: Vec<Option<Voxel>>,
}

impl VoxelGrid {
    /// Create an empty grid. Every dimension must be positive and the cell
    /// count must fit in `usize`.
    pub fn new(size: GridSize) -> Result<Self, GridError> {
        let volume = size
            .volume()
            .filter(|_| !size.is_empty())
            .ok_or(GridError::InvalidSize(size))?;
        Ok(Self {
            size,
            cells: vec![None; volume],
        })
    }

    /// Build a grid from cells already laid out in linear-index order.
    ///
    /// Each voxel's position is rewritten from its index so storage and
    /// position can never disagree.
    pub fn from_cells(
        size: GridSize,
        cells: impl IntoIterator<Item = Option<Hsl>>,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(size)?;
        let volume = grid.volume();
        let mut count = 0;
        for (index, color) in cells.into_iter().enumerate() {
            if index >= volume {
                return Err(GridError::IndexOutOfRange { index, volume });
            }
            if let Some(color) = color {
                let position = grid.position(index)?;
                grid.cells[index] = Some(Voxel::new(position, color));
            }
            count = index + 1;
        }
        if count != volume {
            return Err(GridError::IndexOutOfRange {
                index: count,
                volume,
            });
        }
        Ok(grid)
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Number of cells, occupied or not.
    pub fn volume(&self) -> usize {
        self.cells.len()
    }

    /// Number of occupied cells.
    pub fn voxel_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Horizontal center of the grid's floor, used as the default rotation pivot.
    pub fn center(&self) -> DVec3 {
        DVec3::new(self.size.x as f64 / 2.0, self.size.y as f64 / 2.0, 0.0)
    }

    /// Whether each axis of `pos` lies in `[0, size.axis)`.
    pub fn is_inside(&self, pos: IVec3) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && (pos.x as u32) < self.size.x
            && (pos.y as u32) < self.size.y
            && (pos.z as u32) < self.size.z
    }

    /// Whether `pos` is inside the grid and holds a voxel.
    pub fn is_occupied(&self, pos: IVec3) -> bool {
        matches!(self.get(pos), Ok(Some(_)))
    }

    /// Linear index of `pos`: `x + size.x * (y + size.y * z)`.
    pub fn index(&self, pos: IVec3) -> Result<usize, GridError> {
        if !self.is_inside(pos) {
            return Err(GridError::OutOfRange {
                pos,
                size: self.size,
            });
        }
        let (sx, sy) = (self.size.x as usize, self.size.y as usize);
        Ok(pos.x as usize + sx * (pos.y as usize + sy * pos.z as usize))
    }

    /// Inverse of [`index`](Self::index).
    pub fn position(&self, index: usize) -> Result<IVec3, GridError> {
        let volume = self.volume();
        if index >= volume {
            return Err(GridError::IndexOutOfRange { index, volume });
        }
        let (sx, sy) = (self.size.x as usize, self.size.y as usize);
        let layer = sx * sy;
        let z = index / layer;
        let rest = index - z * layer;
        let y = rest / sx;
        let x = rest - y * sx;
        Ok(IVec3::new(x as i32, y as i32, z as i32))
    }

    /// The voxel at `pos`, or `None` for an empty cell.
    pub fn get(&self, pos: IVec3) -> Result<Option<&Voxel>, GridError> {
        let index = self.index(pos)?;
        Ok(self.cells[index].as_ref())
    }

    /// Store `voxel` at its own position, returning the previous occupant.
    pub fn set(&mut self, voxel: Voxel) -> Result<Option<Voxel>, GridError> {
        let index = self.index(voxel.position)?;
        tracing::trace!(pos = %voxel.position, "voxel set");
        Ok(self.cells[index].replace(voxel))
    }

    /// Clear the cell at `pos`, returning what was there. Clearing an empty cell is a no-op.
    pub fn remove(&mut self, pos: IVec3) -> Result<Option<Voxel>, GridError> {
        let index = self.index(pos)?;
        let removed = self.cells[index].take();
        if removed.is_some() {
            tracing::trace!(pos = %pos, "voxel removed");
        }
        Ok(removed)
    }

    /// Occupied voxels in linear-index order.
    pub fn voxels(&self) -> impl Iterator<Item = &Voxel> {
        self.cells.iter().flatten()
    }

    /// All cells in linear-index order.
    pub fn cells(&self) -> &[Option<Voxel>] {
        &self.cells
    }
}
