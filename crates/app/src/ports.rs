//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod device_gateway;
pub mod interface_gateway;
pub mod scheduler_gateway;
pub mod settings_gateway;
pub mod user_config_gateway;

pub use device_gateway::DeviceGateway;
pub use interface_gateway::InterfaceGateway;
pub use scheduler_gateway::SchedulerGateway;
pub use settings_gateway::SettingsGateway;
pub use user_config_gateway::UserConfigGateway;
