//! Typed plugin settings
//!
//! [`Config`] is built once from a [`PluginManifest`] and passed to whatever
//! needs it; there is no global settings namespace. Reloading means calling
//! [`Config::from_manifest`] again and replacing the old value, which drops
//! the old registries with it.
//!
//! # Parameters
//!
//! `TitleCommands` plugin:
//!
//! | Parameter                 | Kind                 | Absent           |
//! |---------------------------|----------------------|------------------|
//! | `Commands`                | list of command      | no commands      |
//! | `DefaultBackground`       | text                 | host default     |
//! | `BackgroundTone`          | tone struct          | ignored tone     |
//! | `HideContinueWithoutSave` | `"true"`/`"false"`   | `false`          |
//!
//! `Credits` plugin:
//!
//! | Parameter    | Kind                 | Absent         |
//! |--------------|----------------------|----------------|
//! | `Categories` | list of category     | no categories  |
//! | `HeaderText` | multi-line text      | empty          |
//! | `ShowUrls`   | `"true"`/`"false"`   | `false`        |
//! | `WindowTone` | tone struct          | ignored tone   |
//!
//! A parameter that is present but malformed falls back to the same value
//! as an absent one, with a diagnostic.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::commands::{commands_from_param, CommandEntry, CommandRegistry, ReservedSymbol};
use crate::credits::{credits_from_param, CreditRegistry};
use crate::error::Result;
use crate::params::{decode_note, ConfigParser};
use crate::plugins::{load_manifest, ParameterBlock, PluginManifest};
use crate::registry::Registry;
use crate::tone::{decode_tone, ToneAdjustment};

/// Manifest name of the title command plugin.
pub const TITLE_COMMANDS_PLUGIN: &str = "TitleCommands";

/// Manifest name of the credits plugin.
pub const CREDITS_PLUGIN: &str = "Credits";

fn tone_param(parser: &ConfigParser, params: &ParameterBlock, key: &str) -> ToneAdjustment {
    match params.get(key) {
        Some(raw) => decode_tone(parser, raw, key),
        None => ToneAdjustment::IGNORED,
    }
}

// ============================================================================
// Title commands
// ============================================================================

/// Settings of the title command plugin.
#[derive(Debug, Clone, Default)]
pub struct TitleCommandConfig {
    /// Commands in menu order.
    pub commands: CommandRegistry,

    /// Background used when a command has none of its own; empty keeps the
    /// host's title background.
    pub default_background: String,

    /// Tone laid over the background.
    pub background_tone: ToneAdjustment,

    /// Leave `continue` out of the menu entirely when there is no save.
    pub hide_continue_without_save: bool,
}

/// A command as the menu should show it right now.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MenuItem<'a> {
    /// Position of the command in the registry.
    pub index: usize,
    pub entry: &'a CommandEntry,
    /// Whether the command can be selected.
    pub enabled: bool,
}

impl TitleCommandConfig {
    /// Build from the plugin's parameter block.
    pub fn from_parameters(parser: &ConfigParser, params: &ParameterBlock) -> Self {
        let commands = match params.get("Commands") {
            Some(raw) => commands_from_param(parser, raw),
            None => {
                debug!("No Commands parameter, title menu is empty");
                Registry::empty()
            }
        };

        Self {
            commands,
            default_background: params.text("DefaultBackground").to_string(),
            background_tone: tone_param(parser, params, "BackgroundTone"),
            hide_continue_without_save: params.flag("HideContinueWithoutSave"),
        }
    }

    /// The menu rows for the current host state.
    ///
    /// Hidden commands are left out. `continue` is disabled when there is no
    /// save, or left out when `hide_continue_without_save` is set.
    pub fn menu(&self, has_save: bool) -> Vec<MenuItem<'_>> {
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.hidden)
            .filter_map(|(index, entry)| {
                let is_continue = entry.reserved() == Some(ReservedSymbol::Continue);
                if is_continue && !has_save && self.hide_continue_without_save {
                    return None;
                }
                Some(MenuItem {
                    index,
                    entry,
                    enabled: !is_continue || has_save,
                })
            })
            .collect()
    }

    /// Background for a command: its own image, else the default.
    pub fn background_for<'a>(&'a self, entry: &'a CommandEntry) -> &'a str {
        if entry.has_custom_background() {
            &entry.background_image
        } else {
            &self.default_background
        }
    }
}

// ============================================================================
// Credits
// ============================================================================

/// Settings of the credits plugin.
#[derive(Debug, Clone, Default)]
pub struct CreditsConfig {
    pub categories: CreditRegistry,
    /// Text above the list; explicit line breaks preserved.
    pub header_text: String,
    /// Whether entry links are shown.
    pub show_urls: bool,
    pub window_tone: ToneAdjustment,
}

impl CreditsConfig {
    /// Build from the plugin's parameter block.
    pub fn from_parameters(parser: &ConfigParser, params: &ParameterBlock) -> Self {
        let categories = match params.get("Categories") {
            Some(raw) => credits_from_param(parser, raw),
            None => {
                debug!("No Categories parameter, credits are empty");
                Registry::empty()
            }
        };

        Self {
            categories,
            header_text: decode_note(params.text("HeaderText")),
            show_urls: params.flag("ShowUrls"),
            window_tone: tone_param(parser, params, "WindowTone"),
        }
    }

    /// Total number of credited entries across categories.
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Settings of every supported plugin that is enabled in the manifest.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// `None` when the title command plugin is absent or switched off.
    pub title: Option<TitleCommandConfig>,
    /// `None` when the credits plugin is absent or switched off.
    pub credits: Option<CreditsConfig>,
}

impl Config {
    /// Build the settings of all enabled plugins.
    pub fn from_manifest(parser: &ConfigParser, manifest: &PluginManifest) -> Self {
        let title = manifest
            .parameters_for(TITLE_COMMANDS_PLUGIN)
            .map(|params| TitleCommandConfig::from_parameters(parser, params));
        let credits = manifest
            .parameters_for(CREDITS_PLUGIN)
            .map(|params| CreditsConfig::from_parameters(parser, params));

        info!(
            title_commands = title.as_ref().map(|t| t.commands.count()),
            credit_categories = credits.as_ref().map(|c| c.categories.count()),
            "Plugin configuration initialized"
        );

        Self { title, credits }
    }

    /// Load a manifest file and build the settings from it.
    ///
    /// Only reading the manifest can fail; parameter problems are reported
    /// through the parser and fall back to defaults.
    pub fn load(path: &Path, parser: &ConfigParser) -> Result<Self> {
        let manifest = load_manifest(path)?;
        Ok(Self::from_manifest(parser, &manifest))
    }
}
