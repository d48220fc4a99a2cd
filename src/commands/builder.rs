//! Building the command registry from encoded records.

use rand::Rng;
use tracing::{debug, info};

use crate::params::coerce::{int_or_zero, is_true, to_number};
use crate::params::{ConfigParser, RawRecord};
use crate::registry::Registry;

use super::types::{BackgroundOffset, CommandEntry, CommandRegistry, RawCommand};

/// Parameter name used as the diagnostic context for command records.
pub const COMMANDS_CONTEXT: &str = "Commands";

/// Length of a generated fallback symbol.
///
/// Longer than every reserved symbol, so a generated symbol never dispatches
/// as a built-in.
pub const FALLBACK_SYMBOL_LEN: usize = 11;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a pseudo-random base-36 symbol.
///
/// Not reproducible across builds, and two generated symbols can in
/// principle collide.
pub fn fallback_symbol() -> String {
    let mut rng = rand::thread_rng();
    (0..FALLBACK_SYMBOL_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

impl From<RawCommand> for CommandEntry {
    fn from(raw: RawCommand) -> Self {
        let icon = u32::try_from(int_or_zero(&raw.icon)).unwrap_or(0);
        let background_offset = BackgroundOffset {
            x: to_number(&raw.offset_x),
            y: to_number(&raw.offset_y),
        };

        let generated_symbol = raw.symbol.is_empty();
        let symbol = if generated_symbol {
            let symbol = fallback_symbol();
            debug!(name = %raw.name, symbol = %symbol, "Command has no symbol, generated one");
            symbol
        } else {
            raw.symbol
        };

        CommandEntry {
            symbol,
            name: raw.name,
            icon,
            background_image: raw.background_image,
            background_offset,
            script: raw.script,
            hidden: is_true(&raw.hidden),
            generated_symbol,
        }
    }
}

/// Build a command registry from encoded records.
///
/// Records that fail to decode are reported and skipped; the rest keep their
/// source order. An empty slice yields an empty registry.
pub fn build_commands(parser: &ConfigParser, records: &[RawRecord]) -> CommandRegistry {
    let raw: Vec<RawCommand> = parser.parse_records(records, COMMANDS_CONTEXT);
    let skipped = records.len() - raw.len();
    let entries: Vec<CommandEntry> = raw.into_iter().map(CommandEntry::from).collect();

    info!(
        commands = entries.len(),
        skipped = skipped,
        "Built command registry"
    );

    Registry::from_entries(entries)
}

/// Build a command registry straight from the `Commands` parameter text.
///
/// An undecodable list yields an empty registry.
pub fn commands_from_param(parser: &ConfigParser, raw: &str) -> CommandRegistry {
    let records = parser.split_list(raw, COMMANDS_CONTEXT);
    build_commands(parser, &records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::types::{Dispatch, ReservedSymbol};
    use crate::params::MemorySink;
    use std::sync::Arc;

    fn parser_with_sink() -> (ConfigParser, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (ConfigParser::with_sink(sink.clone()), sink)
    }

    fn record(symbol: &str) -> RawRecord {
        format!(r#"{{"Symbol":"{}","Name":"{}"}}"#, symbol, symbol.to_uppercase())
    }

    #[test]
    fn test_build_empty_list() {
        let (parser, sink) = parser_with_sink();
        let registry = build_commands(&parser, &[]);
        assert_eq!(registry.count(), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_build_single_malformed_record() {
        let (parser, sink) = parser_with_sink();
        let registry = build_commands(&parser, &["not json".to_string()]);
        assert_eq!(registry.count(), 0);

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].context, "Commands[0]");
    }

    #[test]
    fn test_build_skips_array_records() {
        let (parser, sink) = parser_with_sink();
        let records = vec![
            "[]".to_string(),
            r#"["newGame","Start"]"#.to_string(),
            record("options"),
        ];
        let registry = build_commands(&parser, &records);

        assert_eq!(registry.count(), 1);
        assert_eq!(registry.index_for_symbol("options"), Some(0));
        assert!(!registry.contains_symbol("newGame"));

        let contexts: Vec<String> = sink.diagnostics().into_iter().map(|d| d.context).collect();
        assert_eq!(contexts, vec!["Commands[0]", "Commands[1]"]);
    }

    #[test]
    fn test_build_preserves_order_and_lookup() {
        let (parser, _) = parser_with_sink();
        let registry = build_commands(&parser, &[record("a"), record("b")]);

        assert_eq!(registry.count(), 2);
        assert_eq!(registry.index_for_symbol("a"), Some(0));
        assert_eq!(registry.index_for_symbol("b"), Some(1));
        assert_eq!(registry.entry_at(0).unwrap().name, "A");
        assert_eq!(registry.entry_at(1).unwrap().name, "B");
    }

    #[test]
    fn test_build_duplicate_symbols_keep_both() {
        let (parser, _) = parser_with_sink();
        let first = r#"{"Symbol":"x","Name":"First"}"#.to_string();
        let second = r#"{"Symbol":"x","Name":"Second"}"#.to_string();
        let registry = build_commands(&parser, &[first, second]);

        assert_eq!(registry.count(), 2);
        assert_eq!(registry.index_for_symbol("x"), Some(1));
        assert_eq!(registry.get("x").unwrap().name, "Second");
    }

    #[test]
    fn test_build_skips_bad_record_keeps_siblings() {
        let (parser, sink) = parser_with_sink();
        let registry = build_commands(
            &parser,
            &[record("a"), "{\"Symbol\":".to_string(), record("c")],
        );

        assert_eq!(registry.count(), 2);
        assert_eq!(registry.index_for_symbol("c"), Some(1));
        assert_eq!(sink.diagnostics()[0].context, "Commands[1]");
    }

    #[test]
    fn test_missing_symbol_gets_generated_one() {
        let (parser, _) = parser_with_sink();
        let registry = build_commands(
            &parser,
            &[
                r#"{"Name":"Gallery"}"#.to_string(),
                r#"{"Symbol":"","Name":"Extras"}"#.to_string(),
            ],
        );

        for entry in registry.iter() {
            assert!(!entry.symbol.is_empty());
            assert!(entry.generated_symbol);
            assert!(entry.reserved().is_none());
            assert_eq!(registry.get(&entry.symbol).unwrap().name, entry.name);
        }
    }

    #[test]
    fn test_explicit_reserved_symbol_is_kept() {
        let (parser, _) = parser_with_sink();
        let registry = build_commands(&parser, &[record("continue")]);
        let entry = registry.entry_at(0).unwrap();
        assert!(!entry.generated_symbol);
        assert_eq!(entry.dispatch(), Dispatch::Builtin(ReservedSymbol::Continue));
    }

    #[test]
    fn test_fallback_symbol_shape() {
        let symbol = fallback_symbol();
        assert_eq!(symbol.len(), FALLBACK_SYMBOL_LEN);
        assert!(symbol
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert!(ReservedSymbol::from_symbol(&symbol).is_none());
    }

    #[test]
    fn test_numeric_coercion_per_field() {
        let (parser, _) = parser_with_sink();
        let registry = build_commands(
            &parser,
            &[
                r#"{"Symbol":"a","Icon":"abc","OffsetX":"","OffsetY":"oops"}"#.to_string(),
                r#"{"Symbol":"b","Icon":"12.8","OffsetX":"4","OffsetY":"-3"}"#.to_string(),
                r#"{"Symbol":"c","Icon":"-4"}"#.to_string(),
            ],
        );

        let a = registry.get("a").unwrap();
        assert_eq!(a.icon, 0);
        assert_eq!(a.background_offset.x, 0.0);
        assert!(a.background_offset.y.is_nan());
        assert_eq!(a.background_offset.as_pixels(), None);

        let b = registry.get("b").unwrap();
        assert_eq!(b.icon, 12);
        assert_eq!(b.background_offset.as_pixels(), Some((4, -3)));

        assert_eq!(registry.get("c").unwrap().icon, 0);
    }

    #[test]
    fn test_hidden_flag_is_literal_true() {
        let (parser, _) = parser_with_sink();
        let registry = build_commands(
            &parser,
            &[
                r#"{"Symbol":"a","Hidden":"true"}"#.to_string(),
                r#"{"Symbol":"b","Hidden":"TRUE"}"#.to_string(),
                r#"{"Symbol":"c"}"#.to_string(),
            ],
        );
        assert!(registry.get("a").unwrap().hidden);
        assert!(!registry.get("b").unwrap().hidden);
        assert!(!registry.get("c").unwrap().hidden);
    }

    #[test]
    fn test_commands_from_param_nested_encoding() {
        let (parser, sink) = parser_with_sink();
        let raw = serde_json::to_string(&vec![
            r#"{"Symbol":"newGame","Name":"New Game"}"#,
            r#"{"Symbol":"gallery","Name":"Gallery","Script":"openGallery();"}"#,
        ])
        .unwrap();

        let registry = commands_from_param(&parser, &raw);
        assert_eq!(registry.count(), 2);
        assert_eq!(
            registry.get("gallery").unwrap().dispatch(),
            Dispatch::Script("openGallery();")
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_commands_from_param_malformed_list_is_empty() {
        let (parser, sink) = parser_with_sink();
        let registry = commands_from_param(&parser, "[\"{\\\"Symbol\\\"");
        assert!(registry.is_empty());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.diagnostics()[0].context, "Commands");
    }
}
