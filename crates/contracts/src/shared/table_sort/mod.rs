//! Sorting of the admin table.
//!
//! The frontend snapshots the rendered rows (group key + raw cell text),
//! asks [`plan_sort`] for the new order and then re-appends the rows.
//! Nothing here touches the DOM, so ordering rules are tested natively.

pub mod collation;
pub mod column;
pub mod engine;

pub use collation::{CodepointCollation, Collation};
pub use column::{normalize_cell_text, parse_float_prefix, ColumnKind, SortValue};
pub use engine::{plan_sort, reshade_class, GroupShade, RowSnapshot, SortMode, SortPlan};

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header class marking the active column
    pub fn class_name(self) -> &'static str {
        match self {
            SortDirection::Asc => "sort-asc",
            SortDirection::Desc => "sort-desc",
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Sort state of one table instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    /// State after a click on `column`: same column toggles, another resets to ascending
    pub fn next(&self, column: &str) -> SortState {
        let direction = match (&self.column, self.direction) {
            (Some(current), Some(direction)) if current == column => direction.toggled(),
            _ => SortDirection::Asc,
        };
        SortState {
            column: Some(column.to_string()),
            direction: Some(direction),
        }
    }
}
