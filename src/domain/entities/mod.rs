//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! - [`ShortLink`] - A shortened URL record with access telemetry
//! - [`User`] - A registered account
//!
//! Creation inputs follow the "New Type" pattern: [`NewShortLink`] and
//! [`NewUser`] carry only the fields the caller decides.

pub mod link;
pub mod user;

pub use link::{NewShortLink, ShortLink};
pub use user::{NewUser, Role, User};
