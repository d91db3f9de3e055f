pub mod auth_service;
pub mod crud_service;
pub mod session_service;
