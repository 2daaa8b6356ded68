//! # autopanel-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `InterfaceGateway` — fetch the interface schema, start and stop runs
//!   - `SchedulerGateway` — CRUD and lifecycle for scheduled tasks, execution history
//!   - `UserConfigGateway` — load, save and reset saved session preferences
//!   - `SettingsGateway` — load and save the panel settings
//!   - `DeviceGateway` — discover devices and connect one
//! - Define **driving/inbound ports** as use-case structs:
//!   - `SchemaStore` — the loaded schema, seeded option values and checked tasks
//!   - `TaskRunner` — submit or abort a run
//!   - `SchedulerStore` — scheduled tasks and executions with per-operation status
//! - Orchestrate domain objects without knowing *how* the backend is reached
//!
//! ## Dependency rule
//! Depends on `autopanel-domain` only (plus `tokio::sync` for session state).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
