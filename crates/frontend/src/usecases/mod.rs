pub mod u501_bulk_send;
