//! Disambiguator reply parsing.
//!
//! Best-effort extraction of a structured answer from free text. Any
//! failure is `None` to the caller; a malformed reply is a business
//! outcome here, not an error.

use tracing::debug;

use crate::domain::ParsedDisambiguation;

/// Parse a raw disambiguator reply into a validated structure.
///
/// The strict path trims the reply and parses it as JSON directly. When
/// `lenient` is set and the strict path fails, the slice from the first
/// `{` to the last `}` is tried instead, which tolerates models that wrap
/// their answer in explanatory prose.
pub fn parse_reply(raw: &str, lenient: bool) -> Option<ParsedDisambiguation> {
    if let Some(parsed) = try_parse(raw.trim()) {
        return Some(parsed);
    }

    if lenient {
        if let Some(slice) = extract_json_slice(raw) {
            if let Some(parsed) = try_parse(slice) {
                debug!("reply accepted via lenient brace extraction");
                return Some(parsed);
            }
        }
    }

    debug!(reply_len = raw.len(), "disambiguator reply did not parse");
    None
}

/// Parse and validate one candidate JSON string
fn try_parse(candidate: &str) -> Option<ParsedDisambiguation> {
    let parsed: ParsedDisambiguation = serde_json::from_str(candidate).ok()?;

    // Confidence outside [0, 1] (or NaN) means the reply does not honor
    // the requested schema; treat it as unparseable.
    if !parsed.confidence.is_finite() || !(0.0..=1.0).contains(&parsed.confidence) {
        return None;
    }

    Some(parsed)
}

/// Slice from the first `{` to the last `}`, inclusive
fn extract_json_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}
