//! Title command types
//!
//! [`RawCommand`] mirrors one encoded element of the `Commands` parameter,
//! every field still text. [`CommandEntry`] is the typed, immutable result
//! the menu layer reads.

use serde::{Deserialize, Serialize};

use crate::params::coerce::de_text;
use crate::registry::{Registry, RegistryEntry};

/// Registry of title commands in author order.
pub type CommandRegistry = Registry<CommandEntry>;

/// One element of the `Commands` parameter as the editor writes it.
///
/// ```json
/// {
///   "Symbol": "gallery",
///   "Name": "\\C[2]Gallery",
///   "Icon": "87",
///   "BackgroundImage": "Gallery_BG",
///   "OffsetX": "0",
///   "OffsetY": "24",
///   "Script": "SceneManager.push(Scene_Gallery);",
///   "Hidden": "false"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RawCommand {
    #[serde(deserialize_with = "de_text")]
    pub symbol: String,
    #[serde(deserialize_with = "de_text")]
    pub name: String,
    #[serde(deserialize_with = "de_text")]
    pub icon: String,
    #[serde(deserialize_with = "de_text")]
    pub background_image: String,
    #[serde(deserialize_with = "de_text")]
    pub offset_x: String,
    #[serde(deserialize_with = "de_text")]
    pub offset_y: String,
    #[serde(deserialize_with = "de_text")]
    pub script: String,
    #[serde(deserialize_with = "de_text")]
    pub hidden: String,
}

/// Pixel offset of a command's background image.
///
/// Components keep the host's loose conversion result, so an unparsable
/// offset is `NaN` rather than `0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundOffset {
    pub x: f64,
    pub y: f64,
}

impl BackgroundOffset {
    /// Whole-pixel offset, or `None` when either axis is not finite.
    pub fn as_pixels(&self) -> Option<(i32, i32)> {
        if self.x.is_finite() && self.y.is_finite() {
            Some((self.x.trunc() as i32, self.y.trunc() as i32))
        } else {
            None
        }
    }
}

impl Default for BackgroundOffset {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// Symbols the host handles with built-in behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReservedSymbol {
    NewGame,
    Continue,
    Options,
}

impl ReservedSymbol {
    /// All reserved symbols in menu order.
    pub const ALL: [ReservedSymbol; 3] = [
        ReservedSymbol::NewGame,
        ReservedSymbol::Continue,
        ReservedSymbol::Options,
    ];

    /// The symbol text, case-sensitive.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservedSymbol::NewGame => "newGame",
            ReservedSymbol::Continue => "continue",
            ReservedSymbol::Options => "options",
        }
    }

    /// Match an exact symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == symbol)
    }
}

impl std::fmt::Display for ReservedSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What selecting a command means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch<'a> {
    /// A host built-in; wins over any script on the same entry.
    Builtin(ReservedSymbol),
    /// Opaque script text for the host to run.
    Script(&'a str),
    /// Neither reserved nor scripted; selecting it does nothing.
    Inert,
}

/// A selectable title command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandEntry {
    /// Dispatch key. Generated when the author left it blank.
    pub symbol: String,

    /// Display text, escape codes included.
    pub name: String,

    /// Icon index; `0` means no icon.
    pub icon: u32,

    /// Background image name; empty means the default background.
    pub background_image: String,

    /// Offset applied to the background image.
    pub background_offset: BackgroundOffset,

    /// Opaque script payload; empty when absent.
    pub script: String,

    /// Whether the menu should leave this command out.
    pub hidden: bool,

    /// Whether `symbol` was generated rather than authored.
    #[serde(skip)]
    pub generated_symbol: bool,
}

impl CommandEntry {
    /// Resolve what selecting this command does.
    ///
    /// A reserved symbol always wins; otherwise a non-empty script is run.
    pub fn dispatch(&self) -> Dispatch<'_> {
        if let Some(reserved) = ReservedSymbol::from_symbol(&self.symbol) {
            return Dispatch::Builtin(reserved);
        }
        if self.script.trim().is_empty() {
            Dispatch::Inert
        } else {
            Dispatch::Script(&self.script)
        }
    }

    /// The reserved symbol this entry dispatches on, if any.
    pub fn reserved(&self) -> Option<ReservedSymbol> {
        ReservedSymbol::from_symbol(&self.symbol)
    }

    pub fn has_icon(&self) -> bool {
        self.icon != 0
    }

    pub fn has_custom_background(&self) -> bool {
        !self.background_image.is_empty()
    }
}

impl RegistryEntry for CommandEntry {
    fn symbol(&self) -> &str {
        &self.symbol
    }
}
