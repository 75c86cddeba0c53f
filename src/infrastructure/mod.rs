//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces consumed by the application layer,
//! providing concrete implementations for persistence, caching, and the
//! outbound HTTP collaborators.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`geolocation`] - ipgeolocation.io client behind the [`geolocation::GeoLocator`] trait
//! - [`reachability`] - URL probe behind the [`reachability::UrlProber`] trait

pub mod cache;
pub mod geolocation;
pub mod persistence;
pub mod reachability;
