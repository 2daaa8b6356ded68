//! # autopanel-domain
//!
//! Pure domain model for the autopanel device-automation control panel.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **interface schema** (tasks, options, controllers, resources)
//!   and normalize every accepted schema version into one canonical model
//! - **Resolve** the options a task entry exposes, following nested cases
//! - Compute **default values** per option kind
//! - **Build** the start payload from checked tasks and live option values
//! - Define **triggers**, **scheduled tasks** and **execution records**
//! - Model the panel **settings** and the connectable **devices**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod builder;
pub mod defaults;
pub mod device;
pub mod resolver;
pub mod scheduler;
pub mod schema;
pub mod settings;
pub mod user_config;
pub mod validation;
