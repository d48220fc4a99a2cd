//! Credits registry
//!
//! The credits plugin takes a `Categories` list parameter. Each category is
//! an encoded record whose `Entries` field is itself an encoded list, so the
//! fail-soft policy applies at both levels: a broken category is dropped
//! whole, a broken entry only drops itself.
//!
//! Decoded one level, a category record looks like:
//!
//! ```json
//! { "Label": "Programming", "Entries": "[\"{\\\"Name\\\":\\\"Ada\\\"}\"]" }
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::params::coerce::de_text;
use crate::params::{decode_note, ConfigParser, RawRecord};
use crate::registry::{Registry, RegistryEntry};

/// Parameter name used as the diagnostic context for category records.
pub const CATEGORIES_CONTEXT: &str = "Categories";

/// Registry of credit categories keyed by label.
pub type CreditRegistry = Registry<CreditCategory>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawCategory {
    #[serde(default, deserialize_with = "de_text")]
    label: String,
    #[serde(default, deserialize_with = "de_text")]
    entries: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawCreditEntry {
    #[serde(deserialize_with = "de_text")]
    name: String,
    #[serde(default, deserialize_with = "de_text")]
    comment: String,
    #[serde(default, deserialize_with = "de_text")]
    url: String,
    #[serde(default, deserialize_with = "de_text")]
    url_text: String,
}

/// One credited person or asset.
///
/// Empty strings stand for absent optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditEntry {
    pub name: String,
    /// Free text; explicit line breaks are preserved.
    pub comment: String,
    pub url: String,
    pub url_text: String,
}

impl CreditEntry {
    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }

    /// Text to show for the link: the display text if set, else the URL.
    pub fn link_text(&self) -> &str {
        if self.url_text.is_empty() {
            &self.url
        } else {
            &self.url_text
        }
    }

    /// Comment split on its explicit line breaks.
    pub fn comment_lines(&self) -> impl Iterator<Item = &str> {
        self.comment.lines()
    }
}

impl From<RawCreditEntry> for CreditEntry {
    fn from(raw: RawCreditEntry) -> Self {
        Self {
            name: raw.name,
            comment: decode_note(&raw.comment),
            url: raw.url,
            url_text: raw.url_text,
        }
    }
}

/// A labelled group of credits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreditCategory {
    pub label: String,
    pub entries: Vec<CreditEntry>,
}

impl RegistryEntry for CreditCategory {
    fn symbol(&self) -> &str {
        &self.label
    }
}

/// Decode one category's `Entries` list.
///
/// Each entry is reported under `{context}[j]`. A missing, empty or
/// whitespace-only `Name` makes the entry malformed.
fn build_entries(parser: &ConfigParser, raw: &str, context: &str) -> Vec<CreditEntry> {
    parser
        .split_list(raw, context)
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let context = format!("{}[{}]", context, index);
            let entry = parser.try_parse_record::<RawCreditEntry>(record, &context)?;
            if entry.name.trim().is_empty() {
                parser.reject(&context, "credit entry has an empty Name", record);
                return None;
            }
            Some(CreditEntry::from(entry))
        })
        .collect()
}

/// Build the credits registry from encoded category records.
///
/// Categories that fail to decode are reported and skipped. Within a
/// category, entries are decoded one by one under the context
/// `Categories[i].Entries[j]`.
pub fn build_credits(parser: &ConfigParser, records: &[RawRecord]) -> CreditRegistry {
    let mut categories = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let context = format!("{}[{}]", CATEGORIES_CONTEXT, index);
        let Some(raw) = parser.try_parse_record::<RawCategory>(record, &context) else {
            continue;
        };

        // A category with no Entries field is empty, not malformed.
        let entries = if raw.entries.trim().is_empty() {
            Vec::new()
        } else {
            build_entries(parser, &raw.entries, &format!("{}.Entries", context))
        };

        categories.push(CreditCategory {
            label: raw.label,
            entries,
        });
    }

    info!(
        categories = categories.len(),
        skipped = records.len() - categories.len(),
        "Built credits registry"
    );

    Registry::from_entries(categories)
}

/// Build the credits registry straight from the `Categories` parameter text.
pub fn credits_from_param(parser: &ConfigParser, raw: &str) -> CreditRegistry {
    let records = parser.split_list(raw, CATEGORIES_CONTEXT);
    build_credits(parser, &records)
}
