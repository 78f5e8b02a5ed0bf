pub mod u501_bulk_send;
pub mod u502_add_order;
