//! Plugin manifest types
//!
//! The editor writes the project's plugin list as a JSON array, one entry
//! per installed plugin, in load order. Every parameter value is a string;
//! structured parameters are JSON text inside that string.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TitleKitError};
use crate::params::coerce::{is_true, to_number};

/// Flat `name -> text` parameter block of one plugin.
///
/// Values the editor wrote unquoted are kept as their JSON text, and `null`
/// reads as the empty string, so every lookup yields plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>")]
pub struct ParameterBlock(BTreeMap<String, String>);

impl ParameterBlock {
    /// Raw text of `key`, if the parameter exists.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Raw text of `key`, empty when absent.
    pub fn text(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Boolean parameter; absent or anything but `"true"` is false.
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).is_some_and(is_true)
    }

    /// Loose numeric view of `key`; absent reads like blank text.
    pub fn number(&self, key: &str) -> f64 {
        to_number(self.text(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameter names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, Value>> for ParameterBlock {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(
            map.into_iter()
                .map(|(key, value)| {
                    let text = match value {
                        Value::String(s) => s,
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    (key, text)
                })
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterBlock
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One plugin in the manifest.
///
/// ```json
/// {
///   "name": "TitleCommands",
///   "status": true,
///   "description": "Custom title menu",
///   "parameters": { "Commands": "[...]", "DefaultBackground": "" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginEntry {
    /// Plugin file name without extension.
    pub name: String,

    /// Whether the plugin is switched on.
    #[serde(default)]
    pub status: bool,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub parameters: ParameterBlock,
}

/// All plugins of a project in load order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginManifest {
    pub plugins: Vec<PluginEntry>,
}

impl PluginManifest {
    /// The enabled plugin called `name`.
    ///
    /// If a plugin is listed twice, the later enabled entry wins, matching
    /// load order.
    pub fn find(&self, name: &str) -> Option<&PluginEntry> {
        self.plugins
            .iter()
            .rev()
            .find(|p| p.status && p.name == name)
    }

    /// Parameters of the enabled plugin called `name`.
    pub fn parameters_for(&self, name: &str) -> Option<&ParameterBlock> {
        self.find(name).map(|p| &p.parameters)
    }

    /// Parameters of the enabled plugin called `name`, or
    /// [`TitleKitError::NotFound`] when it is missing or switched off.
    pub fn require_parameters(&self, name: &str) -> Result<&ParameterBlock> {
        self.parameters_for(name).ok_or_else(|| {
            TitleKitError::NotFound(format!("plugin '{}' is not enabled in the manifest", name))
        })
    }

    /// Enabled plugins in load order.
    pub fn enabled(&self) -> impl Iterator<Item = &PluginEntry> {
        self.plugins.iter().filter(|p| p.status)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
