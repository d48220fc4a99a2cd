//! Tone adjustment parameters
//!
//! A tone is a red/green/blue offset applied over a window or background.
//! Red `-256` is outside the usable range and means "leave the host's current
//! tone alone"; it is also what a missing or malformed parameter decodes to.
//!
//! Channel ranges are a contract for authors, not something decoding
//! enforces: in-range-adjacent values pass through unclamped.

use serde::{Deserialize, Serialize};

use crate::params::coerce::{de_text, int_or_zero, Object};
use crate::params::ConfigParser;

/// Red channel value marking a tone as ignored.
pub const IGNORE_RED: i32 = -256;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct RawTone {
    #[serde(deserialize_with = "de_text")]
    red: String,
    #[serde(deserialize_with = "de_text")]
    green: String,
    #[serde(deserialize_with = "de_text")]
    blue: String,
}

/// Three-channel color adjustment.
///
/// Decodes from the editor's struct form, where every channel is text:
/// `{"Red":"10","Green":"-5","Blue":"20"}`. Unparsable channels read as `0`;
/// anything other than an object is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Object<RawTone>", rename_all = "PascalCase")]
pub struct ToneAdjustment {
    /// `[-256, 255]`; `-256` marks the whole tone as ignored.
    pub red: i32,
    /// `[-255, 255]`
    pub green: i32,
    /// `[-255, 255]`
    pub blue: i32,
}

impl ToneAdjustment {
    /// The "use the host's current tone" value.
    pub const IGNORED: ToneAdjustment = ToneAdjustment {
        red: IGNORE_RED,
        green: 0,
        blue: 0,
    };

    pub const fn new(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }

    /// Whether the consumer should keep its current tone instead.
    pub fn is_ignored(&self) -> bool {
        self.red == IGNORE_RED
    }

    /// The tone to apply, or `None` when it is ignored.
    pub fn effective(&self) -> Option<ToneAdjustment> {
        if self.is_ignored() {
            None
        } else {
            Some(*self)
        }
    }

    /// Channels as an `[r, g, b]` array, in the order the host expects.
    pub fn channels(&self) -> [i32; 3] {
        [self.red, self.green, self.blue]
    }
}

impl Default for ToneAdjustment {
    fn default() -> Self {
        Self::IGNORED
    }
}

impl From<Object<RawTone>> for ToneAdjustment {
    fn from(Object(raw): Object<RawTone>) -> Self {
        Self {
            red: channel(&raw.red),
            green: channel(&raw.green),
            blue: channel(&raw.blue),
        }
    }
}

fn channel(raw: &str) -> i32 {
    let value = int_or_zero(raw);
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Decode a tone parameter, falling back to [`ToneAdjustment::IGNORED`].
///
/// Malformed text is reported through the parser's diagnostic sink under
/// `context`.
pub fn decode_tone(parser: &ConfigParser, raw: &str, context: &str) -> ToneAdjustment {
    parser.parse(raw, ToneAdjustment::IGNORED, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MemorySink;
    use std::sync::Arc;

    fn parser_with_sink() -> (ConfigParser, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (ConfigParser::with_sink(sink.clone()), sink)
    }

    #[test]
    fn test_decode_string_channels() {
        let (parser, sink) = parser_with_sink();
        let tone = decode_tone(&parser, r#"{"Red":"10","Green":"-5","Blue":"20"}"#, "Tone");
        assert_eq!(tone, ToneAdjustment::new(10, -5, 20));
        assert!(!tone.is_ignored());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_decode_numeric_channels() {
        let (parser, _) = parser_with_sink();
        let tone = decode_tone(&parser, r#"{"Red":-34,"Green":0,"Blue":68}"#, "Tone");
        assert_eq!(tone.channels(), [-34, 0, 68]);
    }

    #[test]
    fn test_empty_string_is_ignored_tone() {
        let (parser, sink) = parser_with_sink();
        let tone = decode_tone(&parser, "", "Tone");
        assert_eq!(tone, ToneAdjustment::new(-256, 0, 0));
        assert!(tone.is_ignored());
        assert_eq!(tone.effective(), None);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.diagnostics()[0].context, "Tone");
    }

    #[test]
    fn test_malformed_tone_is_ignored() {
        let (parser, sink) = parser_with_sink();
        let tone = decode_tone(&parser, r#"{"Red":"10","#, "Window Tone");
        assert!(tone.is_ignored());
        assert_eq!(sink.diagnostics()[0].context, "Window Tone");
    }

    #[test]
    fn test_explicit_sentinel_is_ignored() {
        let (parser, sink) = parser_with_sink();
        let tone = decode_tone(&parser, r#"{"Red":"-256","Green":"40","Blue":"40"}"#, "Tone");
        assert!(tone.is_ignored());
        assert_eq!(tone.green, 40);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_no_clamping() {
        let (parser, _) = parser_with_sink();
        let tone = decode_tone(&parser, r#"{"Red":"300","Green":"-400","Blue":"256"}"#, "Tone");
        assert_eq!(tone, ToneAdjustment::new(300, -400, 256));
        assert_eq!(tone.effective(), Some(tone));
    }

    #[test]
    fn test_unparsable_channel_reads_zero() {
        let (parser, sink) = parser_with_sink();
        let tone = decode_tone(&parser, r#"{"Red":"abc","Green":"7","Blue":""}"#, "Tone");
        assert_eq!(tone, ToneAdjustment::new(0, 7, 0));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_array_tone_is_malformed() {
        let (parser, sink) = parser_with_sink();

        let tone = decode_tone(&parser, "[]", "Tone");
        assert_eq!(tone, ToneAdjustment::IGNORED);

        let tone = decode_tone(&parser, r#"["10","-5","20"]"#, "Tone");
        assert!(tone.is_ignored());

        let diagnostics = sink.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.context == "Tone"));
    }

    #[test]
    fn test_empty_object_reads_zero_tone() {
        let (parser, sink) = parser_with_sink();
        let tone = decode_tone(&parser, "{}", "Tone");
        assert_eq!(tone, ToneAdjustment::new(0, 0, 0));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_default_is_ignored() {
        assert!(ToneAdjustment::default().is_ignored());
    }
}
