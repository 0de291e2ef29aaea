//! Tests for clue font resolution.

use image::{ImageBuffer, Rgba};
use renderer::canvas::{BACKGROUND, INK};
use renderer::font::{CLUE_FONT_SIZE, PREFERRED_FONT_PATHS};
use renderer::{ClueFace, FontError};
use test_utils::{count_ink, find_system_font, scratch_dir};

// ============================================================================
// Fallback
// ============================================================================

#[test]
fn test_unparseable_font_is_parse_error() {
    let dir = scratch_dir();
    let path = dir.path().join("broken.ttf");
    std::fs::write(&path, b"this is not a font").unwrap();

    let result = ClueFace::load_truetype(&path, CLUE_FONT_SIZE);
    assert!(matches!(result, Err(FontError::Parse(_))));
}

#[test]
fn test_unparseable_font_falls_back_to_builtin() {
    let dir = scratch_dir();
    let path = dir.path().join("broken.ttf");
    std::fs::write(&path, b"this is not a font").unwrap();

    let face = ClueFace::resolve(&[path]);
    assert!(face.is_builtin());
}

#[test]
fn test_last_error_reported() {
    let dir = scratch_dir();
    let broken = dir.path().join("broken.ttf");
    std::fs::write(&broken, b"nope").unwrap();
    let missing = dir.path().join("missing.ttf");

    let result = ClueFace::resolve_preferred(&[broken, missing], CLUE_FONT_SIZE);
    assert!(matches!(result, Err(FontError::Read { .. })));
}

#[test]
fn test_builtin_measure_is_fixed() {
    let face = ClueFace::builtin();
    assert_eq!(face.measure("7"), (10, 14));
    assert_eq!(face.measure("10"), (22, 14));
    assert_eq!(face.measure("1 2"), (34, 14));
}

#[test]
fn test_builtin_draw_matches_measure() {
    let face = ClueFace::builtin();
    let mut canvas: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_pixel(60, 30, BACKGROUND);
    face.draw(&mut canvas, INK, 5, 5, "88");

    let (w, h) = face.measure("88");
    assert!(count_ink(&canvas, BACKGROUND, (5, 5), (5 + w as u32, 5 + h as u32)) > 0);
    assert_eq!(count_ink(&canvas, BACKGROUND, (0, 0), (60, 5)), 0);
    assert_eq!(count_ink(&canvas, BACKGROUND, (5 + w as u32, 0), (60, 30)), 0);
    assert_eq!(count_ink(&canvas, BACKGROUND, (0, 5 + h as u32), (60, 30)), 0);
}

#[test]
fn test_preferred_paths_are_bold_sans() {
    assert!(!PREFERRED_FONT_PATHS.is_empty());
    assert!(PREFERRED_FONT_PATHS.iter().all(|p| p.ends_with("DejaVuSans-Bold.ttf")));
}

// ============================================================================
// System font (skipped when none is installed)
// ============================================================================

#[test]
fn test_system_font_loads_and_draws() {
    let Some(path) = find_system_font() else {
        eprintln!("Skipping: no TrueType font installed");
        return;
    };

    let face = ClueFace::load_truetype(&path, CLUE_FONT_SIZE).unwrap();
    assert!(!face.is_builtin());
    assert_eq!(face.measure(""), (0, 0));

    let (w, h) = face.measure("12");
    assert!(w > 0 && h > 0);

    let mut canvas = ImageBuffer::from_pixel(80, 40, BACKGROUND);
    face.draw(&mut canvas, INK, 10, 10, "12");
    assert!(count_ink(&canvas, BACKGROUND, (0, 0), (80, 40)) > 0);
}

#[test]
fn test_system_font_preferred_over_builtin() {
    let Some(path) = find_system_font() else {
        eprintln!("Skipping: no TrueType font installed");
        return;
    };

    let face = ClueFace::resolve(&[path.clone()]);
    assert!(!face.is_builtin());
    assert!(face.to_string().contains(&*path.to_string_lossy()));
}

#[test]
fn test_system_font_ink_fills_measured_box() {
    let Some(path) = find_system_font() else {
        eprintln!("Skipping: no TrueType font installed");
        return;
    };

    let face = ClueFace::load_truetype(&path, CLUE_FONT_SIZE).unwrap();
    let (w, h) = face.measure("3");
    let (w, h) = (w as u32, h as u32);
    let mut canvas = ImageBuffer::from_pixel(60, 60, BACKGROUND);
    face.draw(&mut canvas, INK, 10, 10, "3");

    // The glyph starts at the requested corner, so the box is ink-tight
    assert!(w < 14 && h < 16);
    assert!(count_ink(&canvas, BACKGROUND, (10, 10), (10 + w, 12)) > 0);
    assert!(count_ink(&canvas, BACKGROUND, (10, 10), (12, 10 + h)) > 0);
    assert_eq!(count_ink(&canvas, BACKGROUND, (0, 0), (60, 10)), 0);
    assert_eq!(count_ink(&canvas, BACKGROUND, (0, 0), (10, 60)), 0);
    assert_eq!(count_ink(&canvas, BACKGROUND, (10 + w, 0), (60, 60)), 0);
    assert_eq!(count_ink(&canvas, BACKGROUND, (0, 10 + h), (60, 60)), 0);
}
