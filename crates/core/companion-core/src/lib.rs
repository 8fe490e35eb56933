//! Companion Core
//!
//! Shared plumbing for the companion workspace:
//!
//! - [`CompanionError`] and the crate-wide [`Result`] alias
//! - `.env` loading and typed `COMPANION_*` lookups
//! - Tracing subscriber setup and a namespaced [`Logger`]
//!
//! The emotion pipeline itself lives in `companion-plugin-emotion`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod logging;

pub use config::{get_env_parsed, load_env, load_env_from_path};
pub use error::{CompanionError, Result};
pub use logging::{init_logging, Logger};
