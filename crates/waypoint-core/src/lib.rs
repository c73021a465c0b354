#![forbid(unsafe_code)]
//! waypoint-core library.
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::Error`] with stable [`error::ErrorCode`]
//!   identifiers; store I/O and decode failures convert via `From`.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `error!`, `debug!`,
//!   `trace!`).

pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use config::{LayoutConfig, SerializeConfig};
pub use error::{Error, ErrorCode, Result};
pub use model::{Collection, Outcome, Status};
pub use store::{JsonFileStore, MemoryStore, OutcomeStore};
