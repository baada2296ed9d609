//! Planet configuration with sensible defaults and RON persistence.

mod config;
mod error;

pub use config::PlanetConfig;
pub use error::ConfigError;
