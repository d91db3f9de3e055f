pub mod export;
pub mod http;
pub mod memory;
pub mod sqlite;
