//! Path utilities for locating fixture files and system fonts.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Returns the workspace root directory.
///
/// Derived from this crate's manifest directory, two levels below the root.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// The `fixtures/` directory at the workspace root.
pub fn fixtures_dir() -> PathBuf {
    workspace_root().join("fixtures")
}

/// Path to a named file under `fixtures/`.
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Fresh temporary directory, removed when dropped.
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create scratch directory")
}

/// Locations checked by [`find_system_font`].
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
];

/// A TrueType font installed on this machine, if any.
///
/// `TEST_FONT_PATH` takes precedence. Tests that need a real font skip when
/// this returns `None`.
pub fn find_system_font() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("TEST_FONT_PATH") {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Some(path);
        }
    }
    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(Path::new)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
}
