pub mod dto;
pub mod status;

pub use dto::*;
pub use status::{PaymentStatus, RequestStatus, PAYMENT_STATUSES, REQUEST_STATUSES};
