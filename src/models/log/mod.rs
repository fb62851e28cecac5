pub mod log_entry;
