//! Blesspets - pet-store inventory admin CLI library
//!
//! This library provides the core functionality for the Blesspets admin
//! console: the retry-wrapped client for the remote inventory service and
//! the mock session gate, plus configuration and the CLI surface.
//!
//! # Architecture
//!
//! - `petstore`: the async API client, retry policies, wire types and list
//!   reconciliation
//! - `session`: the authentication gate and the key-value session store
//! - `config`: configuration management and validation
//! - `error`: error types and result alias
//! - `cli` / `commands`: command-line interface definition and handlers
//!
//! # Example
//!
//! ```no_run
//! use blesspets::config::ApiConfig;
//! use blesspets::petstore::{PetstoreClient, PetStatus};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = PetstoreClient::new(&ApiConfig::default())?;
//!     for pet in client.find_by_status(PetStatus::Available).await? {
//!         println!("{:?} {:?}", pet.id, pet.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod petstore;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{BlesspetsError, Result};
pub use petstore::{Pet, PetStatus, PetstoreClient, RetryPolicy};
pub use session::{SessionGate, SessionStore, User};
