pub mod account;
pub mod billing;
pub mod directory;
pub mod form;
pub mod messaging;
pub mod record;
