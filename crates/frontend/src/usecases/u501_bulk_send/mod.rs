//! Bulk notification sending.
//!
//! - api.rs: validate, history check and send endpoints
//! - controller.rs: the flow between the modals
//! - view.rs: validation and duplicate-send dialogs

pub mod api;
mod controller;
mod view;

pub use controller::start;
