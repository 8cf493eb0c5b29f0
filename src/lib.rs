pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{server, HttpDestination};
pub use crate::config::RelayConfig;
pub use crate::core::{forms::descriptor, relay::FormRelay, FormKind};
pub use crate::utils::error::{RelayError, Result};
