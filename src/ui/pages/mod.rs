pub mod forgot_password;
pub mod home;
pub mod list_page;
pub mod not_found;
pub mod sections;
pub mod sign_in;
