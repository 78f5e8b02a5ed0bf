//! Types shared by Order and Request

pub mod entity_kind;
pub mod ids;

// Re-exports
pub use entity_kind::EntityKind;
pub use ids::{OrderId, RequestId};
