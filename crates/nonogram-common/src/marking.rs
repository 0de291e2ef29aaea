//! Cell markings composited onto a rendered grid.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{FixtureError, FixtureResult, GridGeometry};

/// A `(row, col)` cell index. Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct CellCoord {
    pub row: usize,
    pub col: usize,
}

impl CellCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellCoord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<CellCoord> for (usize, usize) {
    fn from(coord: CellCoord) -> Self {
        (coord.row, coord.col)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for CellCoord {
    type Err = String;

    /// Parses `row,col`, surrounding whitespace allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once(',')
            .ok_or_else(|| format!("expected 'row,col', got '{}'", s))?;
        let row = row
            .trim()
            .parse()
            .map_err(|_| format!("invalid row in '{}'", s))?;
        let col = col
            .trim()
            .parse()
            .map_err(|_| format!("invalid column in '{}'", s))?;
        Ok(Self { row, col })
    }
}

/// How a cell is marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Part of the solution, drawn as a black square
    Filled,
    /// Excluded from the solution, drawn as a blue X
    Crossed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMarking {
    pub cell: CellCoord,
    pub kind: MarkKind,
}

/// Filled and crossed cells for one overlay pass.
///
/// Duplicates and cells present in both lists are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkingSet {
    #[serde(default)]
    pub filled: Vec<CellCoord>,
    #[serde(default)]
    pub crossed: Vec<CellCoord>,
}

impl MarkingSet {
    pub fn new(filled: Vec<CellCoord>, crossed: Vec<CellCoord>) -> Self {
        Self { filled, crossed }
    }

    pub fn from_json(json_str: &str) -> FixtureResult<Self> {
        serde_json::from_str(json_str).map_err(|e| FixtureError::MarkingsParse(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> FixtureResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| FixtureError::MarkingsRead {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&content)
    }

    pub fn is_empty(&self) -> bool {
        self.filled.is_empty() && self.crossed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filled.len() + self.crossed.len()
    }

    /// Append another set's cells after this set's own.
    pub fn extend(&mut self, other: MarkingSet) {
        self.filled.extend(other.filled);
        self.crossed.extend(other.crossed);
    }

    /// Markings in drawing order: every filled cell, then every crossed cell.
    pub fn ordered(&self) -> impl Iterator<Item = CellMarking> + '_ {
        let filled = self.filled.iter().map(|&cell| CellMarking {
            cell,
            kind: MarkKind::Filled,
        });
        let crossed = self.crossed.iter().map(|&cell| CellMarking {
            cell,
            kind: MarkKind::Crossed,
        });
        filled.chain(crossed)
    }

    /// Reject the first marking outside the grid.
    pub fn check_bounds(&self, geometry: &GridGeometry) -> FixtureResult<()> {
        match self
            .ordered()
            .find(|m| !geometry.contains(m.cell.row, m.cell.col))
        {
            Some(m) => Err(FixtureError::CellOutOfRange {
                row: m.cell.row,
                col: m.cell.col,
                width: geometry.width,
                height: geometry.height,
            }),
            None => Ok(()),
        }
    }
}
