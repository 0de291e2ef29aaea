//! Canvas helpers shared by the grid renderer and the overlay editor.
//!
//! Geometry arrives as `i64` from [`nonogram_common::layout`] and may lie
//! partly or wholly outside the image; everything here clips to the canvas.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use nonogram_common::{CellBounds, FixtureError, FixtureResult, LayoutRecord};

pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const CROSS_COLOR: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// Stroke width of the crossed-cell diagonals
pub const CROSS_STROKE: i64 = 2;

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Fill an inclusive pixel box, clipped to the canvas.
pub fn fill_box(canvas: &mut RgbaImage, area: &CellBounds, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    let x1 = area.x1.max(0);
    let y1 = area.y1.max(0);
    let x2 = area.x2.min(width as i64 - 1);
    let y2 = area.y2.min(height as i64 - 1);
    if x1 > x2 || y1 > y2 {
        return;
    }
    let rect = Rect::at(x1 as i32, y1 as i32).of_size((x2 - x1 + 1) as u32, (y2 - y1 + 1) as u32);
    draw_filled_rect_mut(canvas, rect, color);
}

/// Horizontal line of `stroke` px covering rows `[y - stroke + 1, y]` from `x1` to `x2` inclusive.
pub fn horizontal_line(canvas: &mut RgbaImage, y: i64, x1: i64, x2: i64, stroke: i64, color: Rgba<u8>) {
    let area = CellBounds {
        x1,
        y1: y - stroke + 1,
        x2,
        y2: y,
    };
    fill_box(canvas, &area, color);
}

/// Vertical line of `stroke` px covering columns `[x - stroke + 1, x]` from `y1` to `y2` inclusive.
pub fn vertical_line(canvas: &mut RgbaImage, x: i64, y1: i64, y2: i64, stroke: i64, color: Rgba<u8>) {
    let area = CellBounds {
        x1: x - stroke + 1,
        y1,
        x2: x,
        y2,
    };
    fill_box(canvas, &area, color);
}

/// Straight segment thickened by repeating it one pixel to the right per extra stroke pixel.
///
/// Segments entirely off the canvas are skipped.
pub fn thick_segment(
    canvas: &mut RgbaImage,
    start: (i64, i64),
    end: (i64, i64),
    stroke: i64,
    color: Rgba<u8>,
) {
    let stroke = stroke.max(1);
    let (width, height) = canvas.dimensions();
    let off_canvas = start.0.max(end.0) + stroke - 1 < 0
        || start.0.min(end.0) >= width as i64
        || start.1.max(end.1) < 0
        || start.1.min(end.1) >= height as i64;
    if off_canvas {
        return;
    }

    for offset in 0..stroke {
        draw_line_segment_mut(
            canvas,
            (clamp_i32(start.0 + offset) as f32, clamp_i32(start.1) as f32),
            (clamp_i32(end.0 + offset) as f32, clamp_i32(end.1) as f32),
            color,
        );
    }
}

/// Decode an image file into an RGBA canvas.
pub fn load_image(path: &Path) -> FixtureResult<RgbaImage> {
    let image = image::open(path).map_err(|e| FixtureError::ImageRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(image.to_rgba8())
}

/// Encode and write a canvas; the format follows the file extension.
pub fn save_image(canvas: &RgbaImage, path: &Path) -> FixtureResult<()> {
    canvas.save(path).map_err(|e| FixtureError::ImageWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write a canvas and bring its layout record in line with it.
///
/// With `record` set the record is written next to the image; without one any
/// existing record at that path is removed. If the record step fails the
/// image is deleted again, so the two never disagree on disk.
pub fn save_with_record(
    canvas: &RgbaImage,
    path: &Path,
    record: Option<&LayoutRecord>,
) -> FixtureResult<()> {
    save_image(canvas, path)?;

    let synced = match record {
        Some(record) => record.write_for(path).map(|_| ()),
        None => LayoutRecord::remove_for(path),
    };
    if let Err(err) = synced {
        if let Err(cleanup) = std::fs::remove_file(path) {
            tracing::warn!(
                path = %path.display(),
                error = %cleanup,
                "Failed to remove image after layout record error"
            );
        }
        return Err(err);
    }
    Ok(())
}

/// PNG bytes for a canvas.
pub fn encode_png(canvas: &RgbaImage) -> FixtureResult<Vec<u8>> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(canvas.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .map_err(|e| FixtureError::ImageWrite {
            path: "<memory>".into(),
            message: e.to_string(),
        })?;
    Ok(bytes)
}
