//! Tests for compositing markings onto rendered grids.

use std::path::{Path, PathBuf};

use nonogram_common::{CellCoord, FixtureError, LayoutConfig, LayoutRecord, MarkingSet};
use renderer::canvas::{load_image, BACKGROUND, CROSS_COLOR, INK};
use renderer::{ClueFace, GridRenderer, OverlayEditor};
use tempfile::TempDir;
use test_utils::{assert_pixel_eq, fixtures, scratch_dir};

/// Render the empty 5x5 fixture at 40/100 into a scratch directory.
fn rendered_grid(write_sidecar: bool) -> (TempDir, PathBuf) {
    let dir = scratch_dir();
    let path = dir.path().join("grid_empty.png");
    GridRenderer::new(ClueFace::builtin())
        .render_to_file(&fixtures::empty_5x5(), &LayoutConfig::new(40, 100), &path, write_sidecar)
        .unwrap();
    (dir, path)
}

fn cells(coords: &[(usize, usize)]) -> Vec<CellCoord> {
    coords.iter().map(|&(row, col)| CellCoord::new(row, col)).collect()
}

fn markings(filled: &[(usize, usize)], crossed: &[(usize, usize)]) -> MarkingSet {
    MarkingSet::new(cells(filled), cells(crossed))
}

fn output_in(input: &Path, name: &str) -> PathBuf {
    input.with_file_name(name)
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn test_filled_cell_pixels() {
    let (_dir, input) = rendered_grid(true);
    let output = output_in(&input, "filled.png");
    OverlayEditor::overlay_file(&input, &output, &markings(&[(0, 0)], &[]), None).unwrap();

    let img = load_image(&output).unwrap();
    assert_pixel_eq!(img, 103, 103, INK);
    assert_pixel_eq!(img, 137, 137, INK);
    assert_pixel_eq!(img, 120, 120, INK);
    assert_pixel_eq!(img, 102, 120, BACKGROUND);
    assert_pixel_eq!(img, 138, 138, BACKGROUND);
}

#[test]
fn test_crossed_cell_pixels() {
    let (_dir, input) = rendered_grid(true);
    let output = output_in(&input, "crossed.png");
    OverlayEditor::overlay_file(&input, &output, &markings(&[], &[(4, 4)]), None).unwrap();

    // Cell (4, 4) spans 260..300; X inset 5 px from each corner
    let img = load_image(&output).unwrap();
    assert_pixel_eq!(img, 265, 265, CROSS_COLOR);
    assert_pixel_eq!(img, 280, 280, CROSS_COLOR);
    assert_pixel_eq!(img, 295, 295, CROSS_COLOR);
    assert_pixel_eq!(img, 265, 295, CROSS_COLOR);
    assert_pixel_eq!(img, 295, 265, CROSS_COLOR);
    assert_pixel_eq!(img, 270, 280, BACKGROUND);
    assert_pixel_eq!(img, 264, 264, BACKGROUND);
}

#[test]
fn test_cross_drawn_over_fill() {
    let (_dir, input) = rendered_grid(true);
    let output = output_in(&input, "both.png");
    let both = markings(&[(2, 2)], &[(2, 2)]);
    OverlayEditor::overlay_file(&input, &output, &both, None).unwrap();

    // Cell (2, 2) spans 180..220; its center lies on the first diagonal
    let img = load_image(&output).unwrap();
    assert_pixel_eq!(img, 200, 200, CROSS_COLOR);
    assert_pixel_eq!(img, 190, 200, INK);
    assert_pixel_eq!(img, 183, 217, INK);
}

#[test]
fn test_untouched_cells_unchanged() {
    let (_dir, input) = rendered_grid(true);
    let output = output_in(&input, "one.png");
    OverlayEditor::overlay_file(&input, &output, &markings(&[(1, 3)], &[(3, 1)]), None).unwrap();

    let before = load_image(&input).unwrap();
    let after = load_image(&output).unwrap();
    let marked = |x: u32, y: u32| {
        let in_cell = |row: u32, col: u32| {
            (100 + col * 40..=140 + col * 40).contains(&x)
                && (100 + row * 40..=140 + row * 40).contains(&y)
        };
        in_cell(1, 3) || in_cell(3, 1)
    };

    for (x, y, pixel) in after.enumerate_pixels() {
        if !marked(x, y) {
            assert_eq!(pixel, before.get_pixel(x, y), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_empty_markings_copy_image() {
    let (_dir, input) = rendered_grid(true);
    let output = output_in(&input, "copy.png");
    let outcome = OverlayEditor::overlay_file(&input, &output, &MarkingSet::default(), None).unwrap();
    assert_eq!((outcome.filled, outcome.crossed), (0, 0));
    assert_eq!(load_image(&input).unwrap(), load_image(&output).unwrap());
}

// ============================================================================
// Layout record handling
// ============================================================================

#[test]
fn test_recorded_layout_used_when_none_given() {
    let (_dir, input) = rendered_grid(true);
    let output = output_in(&input, "recorded.png");
    let outcome = OverlayEditor::overlay_file(&input, &output, &markings(&[(0, 0)], &[]), None).unwrap();

    assert_eq!(outcome.layout, LayoutConfig::new(40, 100));
    assert_eq!(outcome.record, Some(LayoutRecord::new(5, 5, LayoutConfig::new(40, 100))));
}

#[test]
fn test_matching_layout_accepted() {
    let (_dir, input) = rendered_grid(true);
    let output = output_in(&input, "matching.png");
    let requested = Some(LayoutConfig::new(40, 100));
    assert!(OverlayEditor::overlay_file(&input, &output, &markings(&[(0, 0)], &[]), requested).is_ok());
}

#[test]
fn test_geometry_mismatch_writes_nothing() {
    let (_dir, input) = rendered_grid(true);
    let output = output_in(&input, "mismatch.png");
    let requested = Some(LayoutConfig::new(30, 100));

    let err = OverlayEditor::overlay_file(&input, &output, &markings(&[(0, 0)], &[]), requested)
        .unwrap_err();
    assert!(matches!(err, FixtureError::GeometryMismatch { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(!output.exists());
}

#[test]
fn test_out_of_range_cell_writes_nothing() {
    let (_dir, input) = rendered_grid(true);
    let output = output_in(&input, "range.png");

    let err = OverlayEditor::overlay_file(&input, &output, &markings(&[(0, 0)], &[(5, 0)]), None)
        .unwrap_err();
    assert!(matches!(err, FixtureError::CellOutOfRange { row: 5, col: 0, .. }));
    assert!(!output.exists());
}

#[test]
fn test_output_gets_layout_record() {
    let (_dir, input) = rendered_grid(true);
    let first = output_in(&input, "first.png");
    let second = output_in(&input, "second.png");

    OverlayEditor::overlay_file(&input, &first, &markings(&[(0, 0)], &[]), None).unwrap();
    assert_eq!(
        LayoutRecord::read_for(&first).unwrap(),
        LayoutRecord::read_for(&input).unwrap()
    );

    // Chained overlay picks up the copied record
    OverlayEditor::overlay_file(&first, &second, &markings(&[], &[(1, 1)]), None).unwrap();
    let img = load_image(&second).unwrap();
    assert_pixel_eq!(img, 120, 120, INK);
    assert_pixel_eq!(img, 160, 160, CROSS_COLOR);
}

// ============================================================================
// Without a layout record
// ============================================================================

#[test]
fn test_no_record_and_no_layout_is_error() {
    let (_dir, input) = rendered_grid(false);
    let output = output_in(&input, "out.png");
    let err = OverlayEditor::overlay_file(&input, &output, &markings(&[(0, 0)], &[]), None)
        .unwrap_err();
    assert!(matches!(err, FixtureError::InvalidLayout(_)));
    assert!(!output.exists());
}

#[test]
fn test_no_record_trusts_caller_layout() {
    let (_dir, input) = rendered_grid(false);
    let output = output_in(&input, "trusted.png");

    // (0, 0) at 20/50 lands in the clue margin of a 40/100 render
    let outcome = OverlayEditor::overlay_file(
        &input,
        &output,
        &markings(&[(0, 0), (50, 50)], &[]),
        Some(LayoutConfig::new(20, 50)),
    )
    .unwrap();
    assert!(outcome.record.is_none());
    assert!(!LayoutRecord::sidecar_path(&output).exists());

    let img = load_image(&output).unwrap();
    assert_pixel_eq!(img, 53, 53, INK);
    assert_pixel_eq!(img, 67, 67, INK);
    assert_pixel_eq!(img, 68, 68, BACKGROUND);
}

#[test]
fn test_no_record_clears_stale_output_record() {
    let (_dir, input) = rendered_grid(false);
    let output = output_in(&input, "reused.png");
    LayoutRecord::new(10, 10, LayoutConfig::new(30, 80))
        .write_for(&output)
        .unwrap();

    OverlayEditor::overlay_file(
        &input,
        &output,
        &markings(&[(1, 1)], &[]),
        Some(LayoutConfig::new(40, 100)),
    )
    .unwrap();
    assert!(output.is_file());
    assert_eq!(LayoutRecord::read_for(&output).unwrap(), None);
}

#[test]
fn test_output_record_failure_leaves_no_image() {
    let (_dir, input) = rendered_grid(true);
    let output = output_in(&input, "blocked.png");
    std::fs::create_dir(LayoutRecord::sidecar_path(&output)).unwrap();

    let err = OverlayEditor::overlay_file(&input, &output, &markings(&[(0, 0)], &[]), None)
        .unwrap_err();
    assert!(matches!(err, FixtureError::SidecarWrite { .. }));
    assert!(!output.exists());
}

#[test]
fn test_zero_cell_size_rejected() {
    let (_dir, input) = rendered_grid(false);
    let output = output_in(&input, "zero.png");
    let err = OverlayEditor::overlay_file(
        &input,
        &output,
        &MarkingSet::default(),
        Some(LayoutConfig::new(0, 100)),
    )
    .unwrap_err();
    assert!(matches!(err, FixtureError::InvalidLayout(_)));
}

// ============================================================================
// Files
// ============================================================================

#[test]
fn test_in_place_overlay_rejected() {
    let (_dir, input) = rendered_grid(true);
    let before = std::fs::read(&input).unwrap();

    let err = OverlayEditor::overlay_file(&input, &input, &markings(&[(0, 0)], &[]), None)
        .unwrap_err();
    assert!(matches!(err, FixtureError::InvalidLayout(_)));
    assert_eq!(std::fs::read(&input).unwrap(), before);
}

#[test]
fn test_input_never_modified() {
    let (_dir, input) = rendered_grid(true);
    let before = std::fs::read(&input).unwrap();
    let output = output_in(&input, "marked.png");
    OverlayEditor::overlay_file(&input, &output, &markings(&[(0, 0), (4, 4)], &[(2, 2)]), None)
        .unwrap();
    assert_eq!(std::fs::read(&input).unwrap(), before);
}

#[test]
fn test_missing_input_is_image_read_error() {
    let dir = scratch_dir();
    let input = dir.path().join("absent.png");
    let output = dir.path().join("out.png");
    let err = OverlayEditor::overlay_file(
        &input,
        &output,
        &MarkingSet::default(),
        Some(LayoutConfig::default()),
    )
    .unwrap_err();
    assert!(matches!(err, FixtureError::ImageRead { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_undecodable_input_is_image_read_error() {
    let dir = scratch_dir();
    let input = dir.path().join("garbage.png");
    std::fs::write(&input, b"definitely not a png").unwrap();
    let output = dir.path().join("out.png");
    let err = OverlayEditor::overlay_file(
        &input,
        &output,
        &MarkingSet::default(),
        Some(LayoutConfig::default()),
    )
    .unwrap_err();
    assert!(matches!(err, FixtureError::ImageRead { .. }));
    assert!(!output.exists());
}

#[test]
fn test_markings_file_drives_overlay() {
    let (dir, input) = rendered_grid(true);
    let markings_path = dir.path().join("marks.json");
    std::fs::write(&markings_path, r#"{"filled": [[0, 0]], "crossed": [[1, 1]]}"#).unwrap();
    let output = output_in(&input, "from_file.png");

    let set = MarkingSet::from_file(&markings_path).unwrap();
    let outcome = OverlayEditor::overlay_file(&input, &output, &set, None).unwrap();
    assert_eq!((outcome.filled, outcome.crossed), (1, 1));
}
