//! Sample constraint sets shared by the test suites.
//!
//! The JSON texts are compiled in so tests do not depend on the working
//! directory; [`crate::paths::fixture_path`] gives the on-disk copies.

use nonogram_common::ConstraintSet;

/// 5x5 plus sign: the middle row and column are full.
pub const SIMPLE_5X5: &str = include_str!("../../../fixtures/simple_5x5.json");

/// 10x10 heart with two empty bottom rows.
pub const HEART_10X10: &str = include_str!("../../../fixtures/heart_10x10.json");

/// 5x5 puzzle with no clues at all.
pub const EMPTY_5X5: &str = r#"{
    "width": 5,
    "height": 5,
    "rows": [[], [], [], [], []],
    "columns": [[], [], [], [], []]
}"#;

/// Declares three rows but lists two.
pub const ROW_COUNT_MISMATCH: &str = r#"{
    "width": 2,
    "height": 3,
    "rows": [[1], [2]],
    "columns": [[2], [1]]
}"#;

pub fn simple_5x5() -> ConstraintSet {
    ConstraintSet::from_json(SIMPLE_5X5).expect("simple_5x5 fixture is valid")
}

pub fn heart_10x10() -> ConstraintSet {
    ConstraintSet::from_json(HEART_10X10).expect("heart_10x10 fixture is valid")
}

pub fn empty_5x5() -> ConstraintSet {
    ConstraintSet::from_json(EMPTY_5X5).expect("empty_5x5 fixture is valid")
}
