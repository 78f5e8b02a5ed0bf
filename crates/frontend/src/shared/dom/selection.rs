use super::{attr_selector, query, query_all};
use contracts::domain::common::EntityKind;
use contracts::usecases::u501_bulk_send::collect_ids;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement};

const ROW_CHECKBOX: &str = ".row-checkbox";
const SELECT_ALL_ID: &str = "select-all-checkbox";

fn checkboxes(selector: &str) -> Vec<HtmlInputElement> {
    query_all(selector)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlInputElement>().ok())
        .collect()
}

/// Distinct ids of `kind` carried by the checked row checkboxes, in page order
pub fn checked_ids(kind: EntityKind) -> Vec<String> {
    let attribute = kind.id_attribute();
    collect_ids(
        checkboxes(&format!("{}:checked", ROW_CHECKBOX))
            .iter()
            .map(|cb| cb.get_attribute(attribute)),
    )
}

/// Uncheck the row checkboxes whose id of `kind` is in `ids`
pub fn uncheck(kind: EntityKind, ids: &[&str]) {
    let attribute = kind.id_attribute();
    for cb in checkboxes(&format!("{}:checked", ROW_CHECKBOX)) {
        let matches = cb
            .get_attribute(attribute)
            .map(|id| ids.contains(&id.as_str()))
            .unwrap_or(false);
        if matches {
            cb.set_checked(false);
        }
    }
    update_select_all();
}

/// Tri-state of the select-all box for `checked` of `total` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    Unchecked,
    Checked,
    Indeterminate,
}

impl SelectAllState {
    pub fn for_counts(checked: usize, total: usize) -> Self {
        if checked == 0 {
            SelectAllState::Unchecked
        } else if checked == total {
            SelectAllState::Checked
        } else {
            SelectAllState::Indeterminate
        }
    }
}

fn select_all_box() -> Option<HtmlInputElement> {
    super::document()?
        .get_element_by_id(SELECT_ALL_ID)?
        .dyn_into::<HtmlInputElement>()
        .ok()
}

/// Mirror the select-all box onto every row checkbox
pub fn toggle_all() {
    let Some(select_all) = select_all_box() else {
        return;
    };
    let checked = select_all.checked();
    for cb in checkboxes(ROW_CHECKBOX) {
        cb.set_checked(checked);
    }
    update_select_all();
}

/// Flip the checkbox inside a clicked cell
pub fn toggle_in_cell(cell: &Element) {
    if let Some(cb) = super::query_in(cell, ROW_CHECKBOX).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
        cb.set_checked(!cb.checked());
        update_select_all();
    }
}

pub fn update_select_all() {
    let Some(select_all) = select_all_box() else {
        return;
    };
    let total = checkboxes(ROW_CHECKBOX).len();
    let checked = checkboxes(&format!("{}:checked", ROW_CHECKBOX)).len();
    let state = SelectAllState::for_counts(checked, total);
    select_all.set_checked(state == SelectAllState::Checked);
    select_all.set_indeterminate(state == SelectAllState::Indeterminate);
}

/// First row carrying `id` of `kind`
pub fn row_for(kind: EntityKind, id: &str) -> Option<Element> {
    query(&format!("tr{}", attr_selector(kind.id_attribute(), id)))
}

/// Row of the first checkbox carrying `id` of `kind`
pub fn checkbox_row_for(kind: EntityKind, id: &str) -> Option<Element> {
    query(&format!("{}{}", ROW_CHECKBOX, attr_selector(kind.id_attribute(), id)))
        .and_then(|cb| cb.closest("tr").ok().flatten())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_state() {
        assert_eq!(SelectAllState::for_counts(0, 5), SelectAllState::Unchecked);
        assert_eq!(SelectAllState::for_counts(5, 5), SelectAllState::Checked);
        assert_eq!(SelectAllState::for_counts(2, 5), SelectAllState::Indeterminate);
        assert_eq!(SelectAllState::for_counts(0, 0), SelectAllState::Unchecked);
    }
}
