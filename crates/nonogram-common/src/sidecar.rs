//! Layout records stored next to rendered images.
//!
//! A PNG written to `grid.png` gets its geometry in `grid.png.layout.json`.
//! The image stays a plain raster; overlays read the record to check the
//! caller's layout and the marking coordinates.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{FixtureError, FixtureResult, GridGeometry, LayoutConfig};

/// Suffix appended to an image path to name its layout record.
pub const SIDECAR_SUFFIX: &str = ".layout.json";

/// Grid size and layout an image was rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecord {
    pub width: usize,
    pub height: usize,
    pub layout: LayoutConfig,
}

impl LayoutRecord {
    pub fn new(width: usize, height: usize, layout: LayoutConfig) -> Self {
        Self {
            width,
            height,
            layout,
        }
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry::new(self.width, self.height, self.layout)
    }

    /// Path of the record belonging to `image_path`.
    pub fn sidecar_path(image_path: &Path) -> PathBuf {
        let mut name = OsString::from(image_path.as_os_str());
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }

    /// Write the record next to `image_path`, returning the record's path.
    pub fn write_for(&self, image_path: &Path) -> FixtureResult<PathBuf> {
        let path = Self::sidecar_path(image_path);
        let json = serde_json::to_string_pretty(self).map_err(|e| FixtureError::SidecarWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, json).map_err(|e| FixtureError::SidecarWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(path)
    }

    /// Delete any record next to `image_path`. A missing record is not an error.
    pub fn remove_for(image_path: &Path) -> FixtureResult<()> {
        let path = Self::sidecar_path(image_path);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed stale layout record");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FixtureError::SidecarWrite {
                path,
                message: e.to_string(),
            }),
        }
    }

    /// Read the record next to `image_path`; `Ok(None)` if there is none.
    pub fn read_for(image_path: &Path) -> FixtureResult<Option<Self>> {
        let path = Self::sidecar_path(image_path);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FixtureError::SidecarRead {
                    path,
                    message: e.to_string(),
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| FixtureError::SidecarRead {
                path,
                message: e.to_string(),
            })
    }

    /// Pick the layout for an overlay: the caller's, which must match the
    /// recorded one, or the recorded one when the caller gives none.
    pub fn resolve_layout(&self, requested: Option<LayoutConfig>) -> FixtureResult<LayoutConfig> {
        match requested {
            Some(requested) if requested != self.layout => Err(FixtureError::GeometryMismatch {
                recorded: self.layout,
                requested,
            }),
            _ => Ok(self.layout),
        }
    }

    /// Arguments for the downstream solver, matching this record's layout.
    pub fn solver_args(&self, input: &Path, constraints: &Path, output: &Path) -> Vec<String> {
        vec![
            "--input".to_string(),
            input.display().to_string(),
            "--constraints".to_string(),
            constraints.display().to_string(),
            "--output".to_string(),
            output.display().to_string(),
            "--cell-size".to_string(),
            self.layout.cell_size.to_string(),
            "--margin-left".to_string(),
            self.layout.margin_left.to_string(),
            "--margin-top".to_string(),
            self.layout.margin_top.to_string(),
            "--verbose".to_string(),
        ]
    }
}

/// `puzzle_empty.png` -> `puzzle_solution.png`, in the same directory.
pub fn suggested_solution_path(image_path: &Path) -> PathBuf {
    let stem = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "grid".to_string());
    let base = stem.strip_suffix("_empty").unwrap_or(&stem);
    image_path.with_file_name(format!("{}_solution.png", base))
}
