pub mod dto;
pub mod status;

pub use dto::*;
pub use status::{OrderStatus, ORDER_STATUSES};
