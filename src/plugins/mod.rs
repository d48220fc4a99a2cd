//! Plugin manifest access
//!
//! The host loads plugins from an editor-authored manifest that lists every
//! plugin with its on/off status and a flat parameter block. This module
//! reads that manifest and hands out the [`ParameterBlock`] of one plugin;
//! turning parameters into typed settings is the job of [`crate::config`].
//!
//! # Architecture
//!
//! - **types**: `PluginManifest`, `PluginEntry`, `ParameterBlock`
//! - **loader**: manifest discovery, script-wrapper stripping, validation
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use titlekit::plugins::{find_manifest, load_manifest};
//!
//! let path = find_manifest(Path::new("/home/user/games/my-game")).unwrap();
//! let manifest = load_manifest(&path).unwrap();
//! if let Some(params) = manifest.parameters_for("TitleCommands") {
//!     println!("{} parameters", params.len());
//! }
//! ```

mod loader;
pub mod types;

pub use loader::{find_manifest, load_manifest, parse_manifest, validate_manifest};
pub use types::{ParameterBlock, PluginEntry, PluginManifest};
