pub mod add_order;
pub mod delete_confirm;
