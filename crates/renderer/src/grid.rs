//! Empty puzzle grid rendering with row and column clues.

use std::path::Path;

use image::{ImageBuffer, RgbaImage};
use nonogram_common::constraints::{column_clue_lines, row_clue_text};
use nonogram_common::layout::{COLUMN_CLUE_PITCH, GRID_STROKE};
use nonogram_common::{ConstraintSet, FixtureResult, GridGeometry, LayoutConfig, LayoutRecord};

use crate::canvas::{self, BACKGROUND, INK};
use crate::font::ClueFace;

/// Renders empty annotated grids from constraint sets.
#[derive(Debug)]
pub struct GridRenderer {
    face: ClueFace,
}

impl GridRenderer {
    pub fn new(face: ClueFace) -> Self {
        Self { face }
    }

    /// Renderer using the first installed preferred font, or the built-in face.
    pub fn with_default_font() -> Self {
        Self::new(ClueFace::resolve_default())
    }

    pub fn face(&self) -> &ClueFace {
        &self.face
    }

    /// Draw the grid and clues for `constraints` onto a fresh white canvas.
    pub fn render(&self, constraints: &ConstraintSet, layout: &LayoutConfig) -> FixtureResult<RgbaImage> {
        layout.validate()?;
        let geometry = GridGeometry::for_constraints(constraints, *layout);
        let (width, height) = geometry.canvas_size()?;

        let mut img = ImageBuffer::from_pixel(width, height, BACKGROUND);
        draw_gridlines(&mut img, &geometry);
        self.draw_row_clues(&mut img, &geometry, constraints);
        self.draw_column_clues(&mut img, &geometry, constraints);

        Ok(img)
    }

    /// Render and write the image, plus its layout record when `write_sidecar` is set.
    ///
    /// Without `write_sidecar`, a record left at `output` by an earlier render is removed.
    pub fn render_to_file(
        &self,
        constraints: &ConstraintSet,
        layout: &LayoutConfig,
        output: &Path,
        write_sidecar: bool,
    ) -> FixtureResult<LayoutRecord> {
        let img = self.render(constraints, layout)?;
        let record = LayoutRecord::new(constraints.width(), constraints.height(), *layout);
        canvas::save_with_record(&img, output, write_sidecar.then_some(&record))?;

        tracing::info!(
            output = %output.display(),
            image_width = img.width(),
            image_height = img.height(),
            grid_width = constraints.width(),
            grid_height = constraints.height(),
            cell_size = layout.cell_size,
            margin_left = layout.margin_left,
            margin_top = layout.margin_top,
            face = %self.face,
            "Rendered grid"
        );

        Ok(record)
    }

    /// Load constraints from `constraints_path` and render them to `output`.
    ///
    /// Nothing is written if the constraints cannot be loaded.
    pub fn render_file(
        &self,
        constraints_path: &Path,
        layout: &LayoutConfig,
        output: &Path,
        write_sidecar: bool,
    ) -> FixtureResult<LayoutRecord> {
        let constraints = ConstraintSet::from_file(constraints_path)?;
        self.render_to_file(&constraints, layout, output, write_sidecar)
    }

    /// Row clue: one line of space-separated runs, left edge at the anchor,
    /// vertically centered on the row using the measured text height.
    fn draw_row_clues(&self, img: &mut RgbaImage, geometry: &GridGeometry, constraints: &ConstraintSet) {
        for (row, clue) in constraints.rows().iter().enumerate() {
            let text = row_clue_text(clue);
            if text.is_empty() {
                continue;
            }
            let (x, mid_y) = geometry.row_clue_anchor(row);
            let (_, text_height) = self.face.measure(&text);
            let y = mid_y - (text_height / 2) as i64;
            self.face.draw(img, INK, x as i32, y as i32, &text);
        }
    }

    /// Column clue: one run per line, each line centered on the column's mid-line.
    fn draw_column_clues(&self, img: &mut RgbaImage, geometry: &GridGeometry, constraints: &ConstraintSet) {
        for (col, clue) in constraints.columns().iter().enumerate() {
            let (mid_x, mut y) = geometry.column_clue_anchor(col);
            for line in column_clue_lines(clue) {
                let (text_width, _) = self.face.measure(&line);
                let x = mid_x - (text_width / 2) as i64;
                self.face.draw(img, INK, x as i32, y as i32, &line);
                y += COLUMN_CLUE_PITCH;
            }
        }
    }
}

/// `height + 1` horizontal and `width + 1` vertical lines spanning exactly the grid.
fn draw_gridlines(img: &mut RgbaImage, geometry: &GridGeometry) {
    let (left, top, right, bottom) = geometry.grid_extent();
    let stroke = GRID_STROKE as i64;

    for y in geometry.horizontal_lines() {
        canvas::horizontal_line(img, y, left, right, stroke, INK);
    }
    for x in geometry.vertical_lines() {
        canvas::vertical_line(img, x, top, bottom, stroke, INK);
    }
}
