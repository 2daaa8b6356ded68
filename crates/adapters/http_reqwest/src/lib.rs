//! # autopanel-adapter-http-reqwest
//!
//! HTTP adapter using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the gateway port traits defined in `autopanel-app::ports`
//! - Decode the backend's `status` envelope: anything but `"success"` becomes
//!   a rejection carrying the server message
//! - Normalize every accepted interface schema version on the way in
//!
//! ## Dependency rule
//! Depends on `autopanel-app` (for port traits) and `autopanel-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod client;
pub mod config;
mod device;
pub mod error;
mod interface;
mod scheduler;
mod settings;
mod user_config;

pub use client::HttpBackend;
pub use config::HttpConfig;
pub use error::HttpError;
