//! Legacy tab/space-delimited text decoder.
//!
//! The oldest push firmwares (K40, F18 and friends) send one record per
//! line in three variants:
//!
//! ```text
//! ATTLOG⇥101⇥2025-10-30 09:00:00⇥0⇥1        keyword-prefixed
//! 101⇥2025-10-30 09:00:00⇥0⇥1⇥36.5⇥0       bare tab-separated
//! 101 2025-10-30 09:00:00 0 1               bare space-separated
//! ```
//!
//! Interleaved `OK`/`ERROR` command acknowledgements and blank lines are
//! skipped. Decoding is infallible at the payload level: a payload with zero
//! valid lines is an empty but successful batch.

use crate::normalize::normalize_or_drop;
use crate::record::RawRecord;
use adms_core::{DetectedFormat, NormalizedRecord};
use regex::Regex;
use std::sync::LazyLock;

/// Shape of a bare record line: `user_id`, whitespace, ISO-style date.
static BARE_RECORD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\s+\d{4}-\d{2}-\d{2}").expect("bare record line pattern is valid")
});

/// Decode a legacy text payload into normalized records.
///
/// Never fails outright; lines that do not normalize are dropped.
#[must_use]
pub fn decode(payload: &str) -> Vec<NormalizedRecord> {
    let mut records = Vec::new();

    for line in payload.trim().lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("OK") || line.starts_with("ERROR") {
            continue;
        }

        let raw = if line.starts_with("ATTLOG") {
            attlog_record(line)
        } else if line.contains('\t') || BARE_RECORD_LINE.is_match(line) {
            bare_record(line)
        } else {
            None
        };

        if let Some(raw) = raw {
            if let Some(normalized) = normalize_or_drop(&raw, DetectedFormat::Text) {
                records.push(normalized);
            }
        }
    }

    records
}

/// `ATTLOG` keyword line: tab-split, fields positional after the keyword.
///
/// Requires at least user id, timestamp and status after the keyword; a
/// missing trailing verify method defaults downstream.
fn attlog_record(line: &str) -> Option<RawRecord> {
    let parts: Vec<&str> = line.split('\t').collect();
    if parts.len() < 4 {
        return None;
    }

    let mut raw = RawRecord::new();
    raw.insert_text("user_id", parts[1]);
    raw.insert_text("timestamp", parts[2]);
    raw.insert_text("status", parts[3]);
    raw.insert_text("verify_method", *parts.get(4).unwrap_or(&"1"));
    Some(raw)
}

/// Bare record line: tab-split when tabs are present, otherwise split on
/// generic whitespace. Up to six positional fields; the trailing two are
/// scanner extras.
fn bare_record(line: &str) -> Option<RawRecord> {
    let parts: Vec<&str> = if line.contains('\t') {
        line.split('\t').collect()
    } else {
        line.split_whitespace().collect()
    };
    if parts.len() < 2 {
        return None;
    }

    let mut raw = RawRecord::new();
    raw.insert_text("user_id", parts[0]);
    raw.insert_text("timestamp", parts[1]);
    raw.insert_text("status", *parts.get(2).unwrap_or(&"0"));
    raw.insert_text("verify_method", *parts.get(3).unwrap_or(&"1"));
    if let Some(temperature) = parts.get(4) {
        raw.insert_text("temperature", *temperature);
    }
    if let Some(mask_status) = parts.get(5) {
        raw.insert_text("mask_status", *mask_status);
    }
    Some(raw)
}
