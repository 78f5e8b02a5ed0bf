//! Shared contracts for the order/request admin page.
//!
//! Everything here is platform independent: DTOs exchanged with the backend,
//! the status registry, and the pure decision logic behind the table sort,
//! inline editing and bulk notification flows. The `frontend` crate wires it
//! to the DOM.

pub mod config;
pub mod domain;
pub mod error;
pub mod shared;
pub mod usecases;
