//! HTTP request handlers.

pub mod account;
pub mod health;
pub mod links;
pub mod redirect;

pub use account::{delete_user_handler, login_handler, register_handler};
pub use health::{health_handler, ping_handler};
pub use links::{create_link_handler, delete_link_handler, get_link_handler, update_link_handler};
pub use redirect::redirect_handler;
