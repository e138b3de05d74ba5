//! Wire-format detection.
//!
//! Terminals rarely declare what they send: some set a correct
//! `Content-Type`, most legacy firmwares send `text/plain` for everything or
//! nothing at all. Detection therefore trusts an explicit content-type hint
//! when present and otherwise sniffs the payload itself, confirming JSON and
//! XML candidates with a real parse before committing.
//!
//! Detection is a pure function; the detected format travels in the per-call
//! result and is never stored on any component.

use crate::xml;
use adms_core::DetectedFormat;
use adms_core::constants::TEXT_FORMAT_MARKERS;
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// First-line shape of an undelimited legacy record:
/// `user_id  YYYY-MM-DD  HH:MM:SS  status  verify`.
static TEXT_FIRST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\s+\d{4}-\d{2}-\d{2}\s+\d{2}:\d{2}:\d{2}\s+\d+\s+\d+")
        .expect("text first-line pattern is valid")
});

/// Detect the wire format of an inbound payload.
///
/// Resolution order:
///
/// 1. Empty or whitespace-only payload is [`DetectedFormat::Empty`].
/// 2. A supplied `content_type` is authoritative: substring matches for
///    `json`, `xml`, then `text`/`plain` (case-insensitive).
/// 3. A `{`/`[` prefix is JSON only if the payload actually parses as JSON;
///    a `<` prefix is XML only if the document is well-formed. Parse
///    failures fall through instead of propagating.
/// 4. A tab character or one of the `ATTLOG`/`USER`/`OPLOG` markers means
///    legacy text, as does a first line shaped like a bare punch record.
/// 5. Anything else is [`DetectedFormat::Unknown`].
#[must_use]
pub fn detect_format(payload: &str, content_type: Option<&str>) -> DetectedFormat {
    let data = payload.trim();
    if data.is_empty() {
        return DetectedFormat::Empty;
    }

    if let Some(content_type) = content_type {
        let content_type = content_type.to_ascii_lowercase();
        if content_type.contains("json") {
            return DetectedFormat::Json;
        }
        if content_type.contains("xml") {
            return DetectedFormat::Xml;
        }
        if content_type.contains("text") || content_type.contains("plain") {
            return DetectedFormat::Text;
        }
    }

    if (data.starts_with('{') || data.starts_with('['))
        && serde_json::from_str::<serde_json::Value>(data).is_ok()
    {
        return DetectedFormat::Json;
    }

    if data.starts_with('<') && xml::is_well_formed(data) {
        return DetectedFormat::Xml;
    }

    if data.contains('\t') || TEXT_FORMAT_MARKERS.iter().any(|marker| data.contains(marker)) {
        return DetectedFormat::Text;
    }

    let first_line = data.lines().next().unwrap_or_default();
    if TEXT_FIRST_LINE.is_match(first_line) {
        return DetectedFormat::Text;
    }

    let sample: String = data.chars().take(100).collect();
    warn!(%sample, "unknown payload format");
    DetectedFormat::Unknown
}
