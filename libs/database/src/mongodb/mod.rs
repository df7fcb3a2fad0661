//! MongoDB connection management
//!
//! The driver owns the connection pool; this module only builds the client
//! options and verifies the server is reachable.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{MongoError, connect, connect_from_config};
pub use health::{HealthStatus, check_health, ping};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
