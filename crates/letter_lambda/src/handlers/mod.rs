pub mod api;
pub mod compose;
