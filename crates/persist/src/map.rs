use isovox_common::{GridSize, Hsl};
use isovox_kernel::{GridError, VoxelGrid};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from reading, validating or writing a map file.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed map JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("map data has {actual} cells but size {size:?} needs {expected}")]
    WrongDataLength {
        size: GridSize,
        expected: usize,
        actual: usize,
    },
    #[error("map size {0:?} has a zero dimension or too many cells")]
    InvalidSize(GridSize),
    #[error("cell {index} has color {color:?} outside h 0-360, s 0-100, l 0-100")]
    InvalidColor { index: usize, color: [u32; 3] },
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// On-disk map layout.
///
/// ```json
/// { "name": "demo", "size": { "x": 2, "y": 2, "z": 1 },
///   "data": [null, [120, 100, 50], null, null] }
/// ```
///
/// Each `data` entry is `null` for an empty cell or an `[h, s, l]` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFile {
    pub name: String,
    pub size: GridSize,
    pub data: Vec<Option<[u32; 3]>>,
}

impl MapFile {
    /// Read and parse a map file. The contents are not validated until
    /// [`into_grid`](Self::into_grid).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let map = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), name = %map.name, "map file read");
        Ok(map)
    }

    pub fn from_json(text: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Snapshot a grid under the given map name.
    pub fn capture(name: impl Into<String>, grid: &VoxelGrid) -> Self {
        let data = grid
            .cells()
            .iter()
            .map(|cell| {
                cell.map(|v| [u32::from(v.color.h), u32::from(v.color.s), u32::from(v.color.l)])
            })
            .collect();
        Self {
            name: name.into(),
            size: grid.size(),
            data,
        }
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        tracing::info!(path = %path.display(), name = %self.name, "map saved");
        Ok(())
    }

    /// Number of occupied entries.
    pub fn voxel_count(&self) -> usize {
        self.data.iter().flatten().count()
    }

    /// Validate the map and build its grid.
    pub fn into_grid(self) -> Result<VoxelGrid, MapError> {
        self.validate().inspect_err(|err| {
            tracing::warn!(name = %self.name, %err, "map rejected");
        })?;
        let colors = self
            .data
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.map(|color| to_hsl(index, color)).transpose())
            .collect::<Result<Vec<_>, _>>()?;
        let grid = VoxelGrid::from_cells(self.size, colors)?;
        tracing::info!(
            name = %self.name,
            voxels = grid.voxel_count(),
            "map loaded"
        );
        Ok(grid)
    }

    fn validate(&self) -> Result<(), MapError> {
        let expected = self
            .size
            .volume()
            .filter(|_| !self.size.is_empty())
            .ok_or(MapError::InvalidSize(self.size))?;
        if self.data.len() != expected {
            return Err(MapError::WrongDataLength {
                size: self.size,
                expected,
                actual: self.data.len(),
            });
        }
        for (index, entry) in self.data.iter().enumerate() {
            if let Some(color) = entry {
                to_hsl(index, *color)?;
            }
        }
        Ok(())
    }
}

/// Read, validate and build a grid in one step.
pub fn load_grid(path: impl AsRef<Path>) -> Result<VoxelGrid, MapError> {
    MapFile::load(path)?.into_grid()
}

fn to_hsl(index: usize, color: [u32; 3]) -> Result<Hsl, MapError> {
    let [h, s, l] = color;
    let hsl = match (u16::try_from(h), u8::try_from(s), u8::try_from(l)) {
        (Ok(h), Ok(s), Ok(l)) => Hsl::new(h, s, l).ok(),
        _ => None,
    };
    hsl.ok_or(MapError::InvalidColor { index, color })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use isovox_common::Voxel;

    const DEMO: &str = include_str!("../../../maps/demo.json");

    fn small_json(data: &str) -> String {
        format!(r#"{{"name":"t","size":{{"x":2,"y":2,"z":1}},"data":{data}}}"#)
    }

    #[test]
    fn place_then_query_on_loaded_map() {
        let json = r#"{"name":"cube","size":{"x":2,"y":2,"z":2},
            "data":[null,null,null,null,null,null,null,null]}"#;
        let mut grid = MapFile::from_json(json).unwrap().into_grid().unwrap();
        let color = Hsl::new(120, 100, 50).unwrap();
        grid.set(Voxel::new(IVec3::new(1, 1, 1), color)).unwrap();
        assert_eq!(grid.index(IVec3::new(1, 1, 1)).unwrap(), 7);
        assert_eq!(grid.get(IVec3::new(1, 1, 1)).unwrap().map(|v| v.color), Some(color));
        assert_eq!(grid.get(IVec3::new(0, 0, 0)).unwrap(), None);
    }

    #[test]
    fn entries_land_at_their_linear_index() {
        let grid = MapFile::from_json(&small_json("[null,[10,20,30],null,[0,0,0]]"))
            .unwrap()
            .into_grid()
            .unwrap();
        assert_eq!(grid.voxel_count(), 2);
        let v = grid.get(IVec3::new(1, 0, 0)).unwrap().copied().unwrap();
        assert_eq!(v.color, Hsl::new(10, 20, 30).unwrap());
        assert!(grid.is_occupied(IVec3::new(1, 1, 0)));
    }

    #[test]
    fn wrong_data_length_rejected() {
        let err = MapFile::from_json(&small_json("[null,null,null]"))
            .unwrap()
            .into_grid()
            .unwrap_err();
        assert!(matches!(
            err,
            MapError::WrongDataLength {
                expected: 4,
                actual: 3,
                ..
            }
        ));
    }

    #[test]
    fn zero_size_rejected() {
        let json = r#"{"name":"flat","size":{"x":3,"y":0,"z":1},"data":[]}"#;
        let err = MapFile::from_json(json).unwrap().into_grid().unwrap_err();
        assert!(matches!(err, MapError::InvalidSize(_)));
    }

    #[test]
    fn oversized_map_rejected_before_building() {
        let json = r#"{"name":"big","size":{"x":4194304,"y":4194304,"z":4194304},"data":[]}"#;
        let err = MapFile::from_json(json).unwrap().into_grid().unwrap_err();
        assert!(matches!(err, MapError::InvalidSize(_)));

        let json = r#"{"name":"long","size":{"x":4294967295,"y":1,"z":1},"data":[]}"#;
        let err = MapFile::from_json(json).unwrap().into_grid().unwrap_err();
        assert!(matches!(err, MapError::InvalidSize(_)));
    }

    #[test]
    fn invalid_color_rejected_with_index() {
        let err = MapFile::from_json(&small_json("[null,null,[361,50,50],null]"))
            .unwrap()
            .into_grid()
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidColor { index: 2, .. }));

        let err = MapFile::from_json(&small_json("[[0,70000,50],null,null,null]"))
            .unwrap()
            .into_grid()
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidColor { index: 0, .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            MapFile::from_json("{\"name\": \"x\"}"),
            Err(MapError::Parse(_))
        ));
        assert!(matches!(MapFile::from_json("not json"), Err(MapError::Parse(_))));
        assert!(matches!(
            MapFile::from_json(&small_json("[null,null,[1,2],null]")),
            Err(MapError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MapFile::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, MapError::Io(_)));
    }

    #[test]
    fn save_and_load_preserves_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");

        let mut grid = VoxelGrid::new(GridSize::new(3, 2, 2)).unwrap();
        grid.set(Voxel::new(IVec3::new(2, 1, 1), Hsl::new(300, 40, 60).unwrap()))
            .unwrap();
        grid.set(Voxel::new(IVec3::new(0, 0, 0), Hsl::default()))
            .unwrap();

        MapFile::capture("saved", &grid).save(&path).unwrap();
        let map = MapFile::load(&path).unwrap();
        assert_eq!(map.name, "saved");
        assert_eq!(map.voxel_count(), 2);
        assert_eq!(map.into_grid().unwrap(), grid);
        assert_eq!(load_grid(&path).unwrap(), grid);
    }

    #[test]
    fn demo_map_is_valid() {
        let map = MapFile::from_json(DEMO).unwrap();
        assert_eq!(map.name, "demo");
        let grid = map.into_grid().unwrap();
        assert_eq!(grid.size(), GridSize::new(6, 6, 4));
        assert!(grid.voxel_count() > 0);
    }
}
