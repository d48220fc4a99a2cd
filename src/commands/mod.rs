//! Title command registry
//!
//! Turns the `Commands` parameter of the title command plugin into a
//! [`CommandRegistry`]. Each list element is an encoded [`RawCommand`];
//! numeric fields are coerced field by field, blank symbols get a random
//! base-36 fallback, and the result keeps the author's order.
//!
//! # Example
//!
//! ```rust
//! use titlekit::commands::{commands_from_param, Dispatch};
//! use titlekit::params::ConfigParser;
//!
//! let raw = serde_json::to_string(&vec![
//!     r#"{"Symbol":"newGame","Name":"Start"}"#,
//!     r#"{"Name":"Gallery","Script":"openGallery();"}"#,
//! ])
//! .unwrap();
//!
//! let registry = commands_from_param(&ConfigParser::new(), &raw);
//! assert_eq!(registry.count(), 2);
//! assert_eq!(registry.index_for_symbol("newGame"), Some(0));
//!
//! let gallery = registry.entry_at(1).unwrap();
//! assert!(!gallery.symbol.is_empty());
//! assert_eq!(gallery.dispatch(), Dispatch::Script("openGallery();"));
//! ```

mod builder;
pub mod types;

pub use builder::{build_commands, commands_from_param, fallback_symbol, COMMANDS_CONTEXT};
pub use types::{
    BackgroundOffset, CommandEntry, CommandRegistry, Dispatch, RawCommand, ReservedSymbol,
};
