//! Column widths and merged-row hover of the admin table.
//!
//! The frontend measures text and reports pointer positions; the numbers
//! and the hover bookkeeping live here.

/// Narrowest width a drag may leave a column at
pub const MIN_COLUMN_WIDTH: f64 = 50.0;
/// Widest width a double-click auto-fit produces
pub const MAX_FIT_WIDTH: f64 = 500.0;
/// Width transition applied while auto-fitting
pub const FIT_TRANSITION_MS: u32 = 200;

/// Class added to every row of the hovered order
pub const MERGED_ROW_HOVER: &str = "merged-row-hover";

/// Inline style of the hidden span used to measure header text
pub const HEADER_MEASURE_STYLE: &str = "position: absolute; visibility: hidden; white-space: nowrap; \
     font-size: 12px; font-weight: 600; text-transform: uppercase; letter-spacing: 0.5px;";
/// Inline style of the hidden span used to measure cell text
pub const CELL_MEASURE_STYLE: &str =
    "position: absolute; visibility: hidden; white-space: nowrap; font-size: 13px;";

const HEADER_PADDING: f64 = 40.0;
const CELL_PADDING: f64 = 32.0;
const BADGE_PADDING: f64 = 60.0;
const FIT_MARGIN: f64 = 10.0;

/// Rendered text width of one body cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellWidth {
    pub text: f64,
    /// Status/payment badge with its edit button
    pub badge: bool,
}

/// Width that fits the header label and every cell of a column
pub fn fit_width(header_text: Option<f64>, cells: &[CellWidth]) -> f64 {
    let header = header_text.map_or(0.0, |w| w + HEADER_PADDING);
    let widest = cells
        .iter()
        .map(|c| c.text + if c.badge { BADGE_PADDING } else { CELL_PADDING })
        .fold(header, f64::max);
    (widest + FIT_MARGIN).min(MAX_FIT_WIDTH)
}

/// A column resize in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDrag {
    pub column: usize,
    start_x: f64,
    start_width: f64,
}

impl ColumnDrag {
    pub fn start(column: usize, start_x: f64, start_width: f64) -> Self {
        Self {
            column,
            start_x,
            start_width,
        }
    }

    /// New width for pointer position `x`; `None` keeps the current width
    pub fn width_at(&self, x: f64) -> Option<f64> {
        let width = self.start_width + (x - self.start_x);
        (width > MIN_COLUMN_WIDTH).then_some(width)
    }
}

/// Rows to unmark and mark after the pointer moved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverChange {
    pub leave: Option<String>,
    pub enter: Option<String>,
}

impl HoverChange {
    pub fn is_empty(&self) -> bool {
        self.leave.is_none() && self.enter.is_none()
    }
}

/// Order whose rows currently carry [`MERGED_ROW_HOVER`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowHover {
    current: Option<String>,
}

impl RowHover {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Pointer now over a merged cell of `order_id` (or over nothing merged)
    pub fn point_at(&mut self, order_id: Option<&str>) -> HoverChange {
        let order_id = order_id.filter(|id| !id.is_empty());
        if self.current.as_deref() == order_id {
            return HoverChange::default();
        }
        let leave = self.current.take();
        self.current = order_id.map(str::to_string);
        HoverChange {
            leave,
            enter: self.current.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_width_takes_widest_of_header_and_cells() {
        let cells = [
            CellWidth { text: 80.0, badge: false },
            CellWidth { text: 50.0, badge: true },
        ];
        // 80 + 32 = 112, 50 + 60 = 110, header 60 + 40 = 100
        assert_eq!(fit_width(Some(60.0), &cells), 122.0);
        assert_eq!(fit_width(Some(100.0), &[]), 150.0);
        assert_eq!(fit_width(None, &[]), 10.0);
    }

    #[test]
    fn fit_width_is_capped() {
        let cells = [CellWidth { text: 900.0, badge: false }];
        assert_eq!(fit_width(None, &cells), MAX_FIT_WIDTH);
    }

    #[test]
    fn drag_follows_pointer_above_minimum() {
        let drag = ColumnDrag::start(3, 200.0, 120.0);
        assert_eq!(drag.width_at(260.0), Some(180.0));
        assert_eq!(drag.width_at(140.0), Some(60.0));
        assert_eq!(drag.width_at(130.0), None);
        assert_eq!(drag.width_at(0.0), None);
    }

    #[test]
    fn hover_moves_between_orders() {
        let mut hover = RowHover::default();
        assert_eq!(
            hover.point_at(Some("A1")),
            HoverChange { leave: None, enter: Some("A1".into()) }
        );
        assert!(hover.point_at(Some("A1")).is_empty());
        assert_eq!(
            hover.point_at(Some("B2")),
            HoverChange { leave: Some("A1".into()), enter: Some("B2".into()) }
        );
        assert_eq!(
            hover.point_at(None),
            HoverChange { leave: Some("B2".into()), enter: None }
        );
        assert_eq!(hover.current(), None);
        assert!(hover.point_at(Some("")).is_empty());
    }
}
