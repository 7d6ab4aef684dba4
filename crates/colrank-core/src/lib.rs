#![forbid(unsafe_code)]
//! colrank-core library.
//!
//! # Conventions
//!
//! - **Errors**: Use `anyhow::Result` at IO/config seams, typed `thiserror`
//!   enums where callers branch on the failure.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod log;
pub mod model;

pub use log::{LogError, MessageLog};
pub use model::{Agent, Message};
