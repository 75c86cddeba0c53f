//! Request and response DTOs for the HTTP surface.

pub mod account;
pub mod health;
pub mod link;
