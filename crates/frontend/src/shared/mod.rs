pub mod api_utils;
pub mod collator;
pub mod dom;
pub mod modal_frame;
pub mod modal_stack;
pub mod notify;
