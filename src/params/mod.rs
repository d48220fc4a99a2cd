//! Fail-soft parameter parsing
//!
//! Every plugin parameter reaches us as a string. Structured parameters are
//! JSON text; list-of-struct parameters are a JSON array whose elements are
//! themselves JSON-encoded strings:
//!
//! ```text
//! Commands = "[\"{\\\"Symbol\\\":\\\"newGame\\\"}\",\"{\\\"Symbol\\\":\\\"options\\\"}\"]"
//! ```
//!
//! A malformed value never aborts loading. [`ConfigParser::parse`] hands back
//! the caller's fallback and reports one diagnostic naming the field, and the
//! list helpers apply the same policy per element so a broken element only
//! costs itself.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use titlekit::params::{ConfigParser, MemorySink};
//!
//! let sink = Arc::new(MemorySink::new());
//! let parser = ConfigParser::with_sink(sink.clone());
//!
//! let ok: Vec<u32> = parser.parse("[1, 2]", vec![9], "Numbers");
//! assert_eq!(ok, vec![1, 2]);
//!
//! let bad: Vec<u32> = parser.parse("[1, 2", vec![9], "Numbers");
//! assert_eq!(bad, vec![9]);
//! assert_eq!(sink.len(), 1);
//! ```

pub mod coerce;
mod sink;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::utils::logutil::preview;

use coerce::Object;

pub use sink::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};

/// One element of a list-of-struct parameter, still in its encoded form.
pub type RawRecord = String;

/// Parser applying the fail-soft policy to parameter text.
///
/// Cloning is cheap; clones share the same diagnostic sink.
#[derive(Clone)]
pub struct ConfigParser {
    sink: Arc<dyn DiagnosticSink>,
}

impl ConfigParser {
    /// Create a parser reporting through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create a parser reporting through the given sink.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { sink }
    }

    /// Decode `raw` as `T`, or return `fallback` if it is not valid.
    ///
    /// On failure exactly one diagnostic carrying `context` is reported.
    /// A valid but empty container (`[]`, `{}`) is a success and is returned
    /// as-is; only undecodable text produces the fallback.
    pub fn parse<T: DeserializeOwned>(&self, raw: &str, fallback: T, context: &str) -> T {
        self.try_parse(raw, context).unwrap_or(fallback)
    }

    /// Decode `raw` as `T`, reporting and returning `None` on failure.
    pub fn try_parse<T: DeserializeOwned>(&self, raw: &str, context: &str) -> Option<T> {
        match serde_json::from_str::<T>(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                self.report_failure(context, raw, &e);
                None
            }
        }
    }

    /// Decode one struct record, which must be a JSON object.
    ///
    /// An array or scalar in place of the record is malformed even when `T`
    /// has defaults for every field.
    pub fn try_parse_record<T: DeserializeOwned>(&self, raw: &str, context: &str) -> Option<T> {
        self.try_parse::<Object<T>>(raw, context).map(|Object(record)| record)
    }

    /// Split a list-of-struct parameter into its encoded elements.
    ///
    /// String elements are taken as already-encoded records. Any other JSON
    /// element (an editor occasionally inlines an object) is re-encoded so
    /// every record goes through the same per-element parse. An undecodable
    /// outer value yields an empty list and one diagnostic.
    pub fn split_list(&self, raw: &str, context: &str) -> Vec<RawRecord> {
        let elements: Vec<Value> = self.parse(raw, Vec::new(), context);
        elements
            .into_iter()
            .map(|element| match element {
                Value::String(encoded) => encoded,
                other => other.to_string(),
            })
            .collect()
    }

    /// Decode each encoded record, dropping the ones that fail.
    ///
    /// Records go through [`try_parse_record`](Self::try_parse_record). Each
    /// failure is reported under `context[index]`; siblings are kept in their
    /// original order.
    pub fn parse_records<T: DeserializeOwned>(&self, records: &[RawRecord], context: &str) -> Vec<T> {
        records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                self.try_parse_record(record, &format!("{}[{}]", context, index))
            })
            .collect()
    }

    /// [`split_list`](Self::split_list) followed by
    /// [`parse_records`](Self::parse_records).
    pub fn parse_list<T: DeserializeOwned>(&self, raw: &str, context: &str) -> Vec<T> {
        let records = self.split_list(raw, context);
        self.parse_records(&records, context)
    }

    /// Report a record that decoded but failed validation.
    pub fn reject(&self, context: &str, reason: &str, raw: &str) {
        let message = format!(
            "Rejected parameter '{}': {}; raw value: \"{}\"",
            context,
            reason,
            preview(raw)
        );
        self.sink.report(context, &message);
    }

    fn report_failure(&self, context: &str, raw: &str, error: &serde_json::Error) {
        let message = format!(
            "Failed to parse parameter '{}': {}; raw value: \"{}\"",
            context,
            error,
            preview(raw)
        );
        self.sink.report(context, &message);
    }
}

impl Default for ConfigParser {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigParser").finish_non_exhaustive()
    }
}

/// Unwrap a multi-line text parameter.
///
/// The editor stores multi-line text as a JSON string literal so explicit
/// line breaks survive (`"\"first\\nsecond\""`). Text that is not a string
/// literal is plain single-line input and is returned verbatim.
pub fn decode_note(raw: &str) -> String {
    match serde_json::from_str::<String>(raw) {
        Ok(text) => text,
        Err(_) => raw.to_string(),
    }
}
