pub mod cells;
pub mod field_edit;
pub mod status_dropdown;
