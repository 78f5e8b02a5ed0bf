use super::{attr_selector, query_all, query_all_in, query_in, text_of};
use contracts::shared::table_layout::{fit_width, CellWidth, CELL_MEASURE_STYLE, HEADER_MEASURE_STYLE};
use contracts::shared::table_sort::{
    plan_sort, reshade_class, Collation, ColumnKind, RowSnapshot, SortDirection, SortMode,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, HtmlTableElement, HtmlTableRowElement, HtmlTableSectionElement};

/// The admin data table (`<table id=...>`) and its body
pub struct TableAdapter {
    table: HtmlTableElement,
    body: HtmlTableSectionElement,
}

impl TableAdapter {
    pub fn find(table_id: &str) -> Option<Self> {
        let table = super::document()?
            .get_element_by_id(table_id)?
            .dyn_into::<HtmlTableElement>()
            .ok()?;
        let body = query_in(&table, "tbody")?
            .dyn_into::<HtmlTableSectionElement>()
            .ok()?;
        Some(Self { table, body })
    }

    /// Position of the header cell with `data-sort == column` among all `th`
    pub fn column_index(&self, column: &str) -> Option<usize> {
        query_all_in(&self.table, "th")
            .iter()
            .position(|th| th.get_attribute("data-sort").as_deref() == Some(column))
    }

    /// Grouped layout: the body contains merged order cells
    pub fn sort_mode(&self) -> SortMode {
        if query_in(&self.body, ".merged-cell").is_some() {
            SortMode::Grouped
        } else {
            SortMode::Flat
        }
    }

    /// Data rows; spacer and empty-state rows have one cell or none
    fn data_rows(&self) -> Vec<HtmlTableRowElement> {
        query_all_in(&self.body, "tr")
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlTableRowElement>().ok())
            .filter(|row| row.cells().length() > 1)
            .collect()
    }

    fn cell_text(row: &HtmlTableRowElement, index: usize, kind: ColumnKind) -> String {
        let Some(cell) = row.cells().item(index as u32) else {
            return String::new();
        };
        match kind.badge_selector() {
            Some(selector) => query_in(&cell, selector)
                .map(|badge| text_of(&badge))
                .unwrap_or_default(),
            None => text_of(&cell),
        }
    }

    /// Reorder the body rows by `column`. Returns false when the column has
    /// no header, in which case nothing is touched.
    pub fn sort(&self, column: &str, direction: SortDirection, collation: &dyn Collation) -> bool {
        let Some(index) = self.column_index(column) else {
            log::warn!("sort column '{}' has no header", column);
            return false;
        };
        let kind = ColumnKind::for_column(column);
        let mode = self.sort_mode();
        let rows = self.data_rows();
        let snapshots: Vec<RowSnapshot> = rows
            .iter()
            .map(|row| {
                let group = row.get_attribute("data-order-id");
                RowSnapshot::new(group.as_deref(), Self::cell_text(row, index, kind))
            })
            .collect();

        let plan = plan_sort(column, &snapshots, mode, direction, collation);
        for (pos, &idx) in plan.order.iter().enumerate() {
            let row = &rows[idx];
            if let Some(shade) = plan.shades.get(pos) {
                row.set_class_name(&reshade_class(&row.class_name(), *shade));
            }
            let _ = self.body.append_child(row);
        }
        log::debug!("sorted {} rows by {} ({:?}, {:?})", rows.len(), column, mode, direction);
        true
    }
}

impl TableAdapter {
    /// Header cell at `index` of the first table row
    pub fn header_cell(&self, index: usize) -> Option<HtmlElement> {
        self.table
            .rows()
            .item(0)?
            .dyn_into::<HtmlTableRowElement>()
            .ok()?
            .cells()
            .item(index as u32)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    /// Width that fits the header label and every body cell of column `index`
    pub fn fit_column_width(&self, index: usize) -> f64 {
        let header = self
            .header_cell(index)
            .and_then(|th| query_in(&th, ".th-content"))
            .map(|content| measure_text(&text_of(&content), HEADER_MEASURE_STYLE));
        let cells: Vec<CellWidth> = self
            .data_rows()
            .iter()
            .filter_map(|row| row.cells().item(index as u32))
            .map(|cell| measure_cell(&cell))
            .collect();
        fit_width(header, &cells)
    }
}

fn measure_cell(cell: &Element) -> CellWidth {
    let badge = query_in(cell, ".status-badge").or_else(|| query_in(cell, ".payment-badge"));
    let content = badge
        .clone()
        .or_else(|| query_in(cell, ".editable-value"))
        .map(|el| text_of(&el))
        .unwrap_or_else(|| text_of(cell));
    CellWidth {
        text: measure_text(&content, CELL_MEASURE_STYLE),
        badge: badge.is_some(),
    }
}

/// Rendered width of `text` in a hidden span styled with `style`
fn measure_text(text: &str, style: &str) -> f64 {
    let Some(document) = super::document() else {
        return 0.0;
    };
    let (Some(body), Ok(span)) = (document.body(), document.create_element("span")) else {
        return 0.0;
    };
    let Ok(span) = span.dyn_into::<HtmlElement>() else {
        return 0.0;
    };
    span.style().set_css_text(style);
    span.set_text_content(Some(text));
    if body.append_child(&span).is_err() {
        return 0.0;
    }
    let width = f64::from(span.offset_width());
    span.remove();
    width
}

/// Mark the active header; every other sortable header loses its marker.
pub fn mark_sorted_header(column: &str, direction: SortDirection) {
    for th in query_all(".sortable-th") {
        let _ = th.class_list().remove_2("sort-asc", "sort-desc");
    }
    if let Some(th) = super::query(&attr_selector("data-sort", column)) {
        let _ = th.class_list().add_1(direction.class_name());
    }
}
