//! Inline editing of table cells: the single status/payment dropdown, the
//! field edit modal rules and the payment badge fan-out.

pub mod dropdown;
pub mod field;
pub mod propagation;

pub use dropdown::{Anchor, DropdownChoice, DropdownKey, DropdownSlot, EditCommand, EditField};
pub use field::{
    display_value, field_label, is_amount_field, parse_int_prefix, patch_body, update_field_body,
    FieldKind, NEGATIVE_AMOUNT_MESSAGE,
};
pub use propagation::{payment_targets, PaymentPropagation, RowRef};
