//! Configuration management
//!
//! Handles connection parameters, `.env` credentials and user settings.

pub mod connections;
pub mod settings;

pub use connections::{ConnectionConfig, EnvFile, SslMode};
pub use settings::Settings;
