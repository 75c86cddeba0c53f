//! Application services orchestrating domain operations.

pub mod account_service;
pub mod link_service;

pub use account_service::AccountService;
pub use link_service::LinkService;
