pub mod claims;
pub mod debounce;
pub mod entities;
pub mod list_filter;
pub mod pagination;
