pub mod global_context;
