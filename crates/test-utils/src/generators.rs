//! Constraint generators for synthetic puzzles.
//!
//! Tests describe a solved picture as rows of text and derive the clues from
//! it, so the expected runs never have to be counted by hand.

use nonogram_common::ConstraintSet;

fn is_filled(c: char) -> bool {
    matches!(c, '#' | 'X')
}

/// Lengths of the consecutive filled runs in `cells`.
///
/// ```
/// use test_utils::runs;
///
/// assert_eq!(runs([true, true, false, true]), vec![2, 1]);
/// assert!(runs([false, false]).is_empty());
/// ```
pub fn runs(cells: impl IntoIterator<Item = bool>) -> Vec<u32> {
    let mut out = Vec::new();
    let mut current = 0u32;
    for filled in cells {
        if filled {
            current += 1;
        } else if current > 0 {
            out.push(current);
            current = 0;
        }
    }
    if current > 0 {
        out.push(current);
    }
    out
}

/// Builds a constraint set from a picture where `#` or `X` marks a filled cell.
///
/// Every other character is empty. Rows shorter than the longest row are
/// padded with empty cells.
///
/// # Panics
///
/// Panics on an empty picture.
///
/// # Example
///
/// ```
/// use test_utils::constraints_from_pattern;
///
/// let set = constraints_from_pattern(&["#.#", "###"]);
/// assert_eq!(set.rows(), &[vec![1, 1], vec![3]]);
/// assert_eq!(set.columns(), &[vec![2], vec![1], vec![2]]);
/// ```
pub fn constraints_from_pattern(pattern: &[&str]) -> ConstraintSet {
    let height = pattern.len();
    let width = pattern.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    let grid: Vec<Vec<bool>> = pattern
        .iter()
        .map(|row| {
            let mut cells: Vec<bool> = row.chars().map(is_filled).collect();
            cells.resize(width, false);
            cells
        })
        .collect();

    let rows = grid.iter().map(|cells| runs(cells.iter().copied())).collect();
    let columns = (0..width)
        .map(|col| runs(grid.iter().map(|cells| cells[col])))
        .collect();

    ConstraintSet::new(width, height, rows, columns).expect("pattern must not be empty")
}
