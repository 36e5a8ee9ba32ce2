pub mod file_store;
pub mod in_memory_store;
