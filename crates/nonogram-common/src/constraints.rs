//! Nonogram constraint sets (grid size plus per-row and per-column clues).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FixtureError, FixtureResult};

/// Run lengths of filled cells for one row or column, in reading order.
pub type Clue = Vec<u32>;

/// A validated nonogram description.
///
/// Only the shape is checked: clue counts must match the grid dimensions.
/// Whether the clues describe a solvable puzzle is not examined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintSet {
    /// Number of columns
    width: usize,
    /// Number of rows
    height: usize,
    /// One clue per row, top to bottom
    rows: Vec<Clue>,
    /// One clue per column, left to right
    columns: Vec<Clue>,
}

/// Wire shape of a constraints file before validation.
#[derive(Debug, Deserialize)]
struct RawConstraintSet {
    width: usize,
    height: usize,
    rows: Vec<Clue>,
    columns: Vec<Clue>,
}

impl ConstraintSet {
    /// Build a constraint set, checking that clue counts match the dimensions.
    pub fn new(
        width: usize,
        height: usize,
        rows: Vec<Clue>,
        columns: Vec<Clue>,
    ) -> FixtureResult<Self> {
        if width == 0 || height == 0 {
            return Err(FixtureError::InvalidDimensions { width, height });
        }
        if rows.len() != height {
            return Err(FixtureError::RowCountMismatch {
                expected: height,
                actual: rows.len(),
            });
        }
        if columns.len() != width {
            return Err(FixtureError::ColumnCountMismatch {
                expected: width,
                actual: columns.len(),
            });
        }

        Ok(Self {
            width,
            height,
            rows,
            columns,
        })
    }

    /// Parse and validate a constraint set from JSON text.
    pub fn from_json(json_str: &str) -> FixtureResult<Self> {
        let raw: RawConstraintSet = serde_json::from_str(json_str)?;
        Self::new(raw.width, raw.height, raw.rows, raw.columns)
    }

    /// Load and validate a constraint set from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> FixtureResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| FixtureError::ConstraintsRead {
                path: path.to_path_buf(),
                source,
            })?;
        let constraints = Self::from_json(&content)?;

        tracing::debug!(
            path = %path.display(),
            width = constraints.width,
            height = constraints.height,
            "Loaded constraints"
        );

        Ok(constraints)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Clue] {
        &self.rows
    }

    pub fn columns(&self) -> &[Clue] {
        &self.columns
    }
}

/// Text drawn to the left of a row: run lengths separated by single spaces.
pub fn row_clue_text(clue: &[u32]) -> String {
    clue.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lines drawn above a column: one run length per line, top to bottom.
pub fn column_clue_lines(clue: &[u32]) -> Vec<String> {
    clue.iter().map(u32::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_constraints() {
        let rows = vec![vec![3], vec![1, 1], vec![2]];
        let columns = vec![vec![1], vec![2], vec![1, 1]];
        let constraints = ConstraintSet::new(3, 3, rows, columns).unwrap();
        assert_eq!(constraints.width(), 3);
        assert_eq!(constraints.height(), 3);
        assert_eq!(constraints.rows()[1], vec![1, 1]);
        assert_eq!(constraints.columns().len(), 3);
    }

    #[test]
    fn test_row_count_mismatch() {
        let result = ConstraintSet::new(2, 3, vec![vec![1], vec![1]], vec![vec![1], vec![1]]);
        assert!(matches!(
            result,
            Err(FixtureError::RowCountMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = ConstraintSet::new(0, 0, vec![], vec![]);
        assert!(matches!(result, Err(FixtureError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_unsatisfiable_clues_are_accepted() {
        // Clue needs 10 cells in a 3-wide grid; shape is all that is checked.
        let constraints =
            ConstraintSet::new(3, 1, vec![vec![10]], vec![vec![1], vec![1], vec![1]]);
        assert!(constraints.is_ok());
    }

    #[test]
    fn test_missing_field() {
        let err = ConstraintSet::from_json(r#"{"width": 1, "height": 1, "rows": [[1]]}"#)
            .unwrap_err();
        match err {
            FixtureError::ConstraintsParse(msg) => assert!(msg.contains("columns")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_clue_text() {
        assert_eq!(row_clue_text(&[3, 1, 2]), "3 1 2");
        assert_eq!(row_clue_text(&[]), "");
        assert_eq!(column_clue_lines(&[10, 2]), vec!["10", "2"]);
        assert!(column_clue_lines(&[]).is_empty());
    }
}
