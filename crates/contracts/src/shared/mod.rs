pub mod api_ack;
pub mod inline_edit;
pub mod lenient;
pub mod status_registry;
pub mod table_layout;
pub mod table_sort;
