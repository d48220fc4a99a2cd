//! TitleKit - title command and credits configuration core
//!
//! Parses the string-encoded parameter blocks of the title command and
//! credits plugins into ordered, symbol-indexed registries. Malformed
//! parameters degrade to documented defaults with a diagnostic; nothing in
//! the parsing path aborts plugin loading.

pub mod commands;
pub mod config;
pub mod credits;
pub mod error;
pub mod hooks;
pub mod params;
pub mod plugins;
pub mod registry;
pub mod tone;
pub mod utils;

pub use config::Config;
pub use error::{Result, TitleKitError};
pub use params::ConfigParser;
pub use registry::Registry;
pub use tone::{decode_tone, ToneAdjustment};
