//! Plugin manifest discovery and loading
//!
//! The manifest is either a bare JSON array or the editor's script form,
//! which wraps the same array in a variable assignment:
//!
//! ```text
//! // Generated by the editor.
//! var $plugins =
//! [
//! {"name":"TitleCommands","status":true,"description":"","parameters":{}}
//! ];
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::{Result, TitleKitError};

use super::types::PluginManifest;

/// Locations searched under a project root, in order.
pub const MANIFEST_CANDIDATES: &[&str] = &["js/plugins.js", "plugins.js", "plugins.json"];

/// Find the plugin manifest of a project directory.
///
/// Returns the first existing file from [`MANIFEST_CANDIDATES`].
pub fn find_manifest(project_dir: &Path) -> Option<PathBuf> {
    MANIFEST_CANDIDATES
        .iter()
        .map(|candidate| project_dir.join(candidate))
        .find(|path| path.is_file())
}

/// Load and validate a manifest file.
///
/// # Errors
/// - `TitleKitError::Config` if the file cannot be read
/// - `TitleKitError::Manifest` if the content is not a plugin list
pub fn load_manifest(path: &Path) -> Result<PluginManifest> {
    let content = fs::read_to_string(path).map_err(|e| {
        TitleKitError::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let manifest = parse_manifest(&content).map_err(|e| match e {
        TitleKitError::Manifest(msg) => {
            TitleKitError::Manifest(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;

    info!(
        path = %path.display(),
        plugins = manifest.len(),
        enabled = manifest.enabled().count(),
        "Loaded plugin manifest"
    );

    Ok(manifest)
}

/// Parse manifest text in either bare or script form.
pub fn parse_manifest(content: &str) -> Result<PluginManifest> {
    let body = strip_script_wrapper(content);
    let manifest: PluginManifest = serde_json::from_str(body)
        .map_err(|e| TitleKitError::Manifest(format!("not a plugin list: {}", e)))?;

    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Check that every plugin has a usable name.
///
/// Names must be non-empty and made of alphanumerics, `_` or `-`; the host
/// resolves them to file names. Duplicate names are allowed but logged.
pub fn validate_manifest(manifest: &PluginManifest) -> Result<()> {
    for (index, plugin) in manifest.plugins.iter().enumerate() {
        let valid = !plugin.name.is_empty()
            && plugin
                .name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(TitleKitError::Manifest(format!(
                "Invalid plugin name '{}' at position {}: must be non-empty alphanumeric characters, underscores and hyphens",
                plugin.name, index
            )));
        }

        let first = manifest.plugins.iter().position(|p| p.name == plugin.name);
        if first != Some(index) {
            warn!(plugin = %plugin.name, index = index, "Plugin listed more than once");
        }
    }

    Ok(())
}

/// Strip `var $plugins =` and the trailing `;` plus surrounding comments.
fn strip_script_wrapper(content: &str) -> &str {
    let start = match content.find('[') {
        Some(i) => i,
        None => return content.trim(),
    };
    let end = content.rfind(']').map(|i| i + 1).unwrap_or(content.len());
    if end <= start {
        return content.trim();
    }
    &content[start..end]
}
