//! Compositing filled and crossed cell markings onto a rendered grid.
//!
//! Cell positions come only from the [`LayoutConfig`]; the image's pixels
//! are never inspected. When the source image has a layout record, the
//! caller's layout and every marking are checked against it first.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use nonogram_common::{
    FixtureError, FixtureResult, LayoutConfig, LayoutRecord, MarkKind, MarkingSet,
};

use crate::canvas::{self, CROSS_COLOR, CROSS_STROKE, INK};

/// Summary of a completed overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayOutcome {
    pub output: PathBuf,
    pub layout: LayoutConfig,
    /// Present when the input carried a layout record
    pub record: Option<LayoutRecord>,
    pub filled: usize,
    pub crossed: usize,
}

/// Draws markings using a fixed layout.
#[derive(Debug, Clone, Copy)]
pub struct OverlayEditor {
    layout: LayoutConfig,
}

impl OverlayEditor {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Draw every filled cell, then every crossed cell.
    ///
    /// Coordinates are not range-checked; marks outside the canvas are clipped.
    pub fn apply(&self, img: &mut RgbaImage, markings: &MarkingSet) {
        for marking in markings.ordered() {
            let bounds = self.layout.cell_bounds(marking.cell.row, marking.cell.col);
            match marking.kind {
                MarkKind::Filled => {
                    if let Some(area) = bounds.fill_area() {
                        canvas::fill_box(img, &area, INK);
                    }
                }
                MarkKind::Crossed => {
                    if let Some(diagonals) = bounds.cross_diagonals() {
                        for (start, end) in diagonals {
                            canvas::thick_segment(img, start, end, CROSS_STROKE, CROSS_COLOR);
                        }
                    }
                }
            }
        }
    }

    /// Load `input`, draw `markings` and write the result to `output`.
    ///
    /// The layout is `requested` or, failing that, the input's layout record;
    /// with both present they must agree. All checks run before anything is
    /// written, and `input` is never modified. The output carries a copy of
    /// the input's record, or no record at all.
    pub fn overlay_file(
        input: &Path,
        output: &Path,
        markings: &MarkingSet,
        requested: Option<LayoutConfig>,
    ) -> FixtureResult<OverlayOutcome> {
        if same_file(input, output) {
            return Err(FixtureError::InvalidLayout(format!(
                "overlay output must differ from its input ({})",
                input.display()
            )));
        }

        let record = LayoutRecord::read_for(input)?;
        let layout = match (&record, requested) {
            (Some(record), requested) => record.resolve_layout(requested)?,
            (None, Some(requested)) => requested,
            (None, None) => {
                return Err(FixtureError::InvalidLayout(format!(
                    "no layout given and no layout record found for {}",
                    input.display()
                )))
            }
        };
        layout.validate()?;

        if let Some(record) = &record {
            markings.check_bounds(&record.geometry())?;
        } else {
            tracing::debug!(input = %input.display(), "No layout record, trusting caller layout");
        }

        let mut img = canvas::load_image(input)?;
        let editor = OverlayEditor::new(layout);
        editor.apply(&mut img, markings);
        canvas::save_with_record(&img, output, record.as_ref())?;

        let outcome = OverlayOutcome {
            output: output.to_path_buf(),
            layout,
            record,
            filled: markings.filled.len(),
            crossed: markings.crossed.len(),
        };

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            filled = outcome.filled,
            crossed = outcome.crossed,
            cell_size = layout.cell_size,
            margin_left = layout.margin_left,
            margin_top = layout.margin_top,
            validated = outcome.record.is_some(),
            "Overlay written"
        );

        Ok(outcome)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
