//! Storage helpers shared by the file-backed stores.

pub mod json_array_store;
