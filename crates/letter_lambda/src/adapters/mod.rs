pub mod fragment_store;
pub mod object_store;
