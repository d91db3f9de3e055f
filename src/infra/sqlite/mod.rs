pub mod schema;
pub mod session_store;
