//! Database connectors shared by the domain crates
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection config, connector and health probe
//! - `config` (default) - `core_config::FromEnv` support for the connection configs
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "shop");
//! let client = connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```

#[cfg(feature = "mongodb")]
pub mod mongodb;
