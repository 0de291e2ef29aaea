//! Shared test utilities for the nonogram fixture workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Sample constraint sets (the files under `fixtures/`)
//! - A generator that derives clues from an ASCII picture
//! - Scratch directories and fixture paths
//! - Pixel assertion macros
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_pixel_eq, fixtures, scratch_dir};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use generators::*;
pub use paths::*;

/// Macro asserting the color of a single pixel, with coordinates in the message.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_pixel_eq;
///
/// assert_pixel_eq!(img, 120, 120, image::Rgba([0, 0, 0, 255]));
/// ```
#[macro_export]
macro_rules! assert_pixel_eq {
    ($img:expr, $x:expr, $y:expr, $color:expr) => {{
        let x: u32 = $x;
        let y: u32 = $y;
        let actual = *$img.get_pixel(x, y);
        let expected = $color;
        if actual != expected {
            panic!(
                "assertion failed: pixel ({}, {})\n  actual: `{:?}`,\n expected: `{:?}`",
                x, y, actual, expected
            );
        }
    }};
}

/// Counts pixels that differ from `background` inside a rectangle `[x1, x2) x [y1, y2)`.
///
/// Coordinates past the image edge are ignored.
pub fn count_ink(
    img: &image::RgbaImage,
    background: image::Rgba<u8>,
    (x1, y1): (u32, u32),
    (x2, y2): (u32, u32),
) -> usize {
    let x2 = x2.min(img.width());
    let y2 = y2.min(img.height());
    let mut count = 0;
    for y in y1..y2 {
        for x in x1..x2 {
            if *img.get_pixel(x, y) != background {
                count += 1;
            }
        }
    }
    count
}
