//! Common test utilities for ingestion integration tests.
//!
//! Helpers here build device payloads the way real terminals send them and
//! assert on the result envelope, so individual tests stay focused on the
//! behavior under test.

use adms_core::{DetectedFormat, IngestionResult, NormalizedRecord};

/// Build a legacy ATTLOG payload, one line per `(user, timestamp, status,
/// verify)` tuple.
pub fn attlog_payload(rows: &[(&str, &str, &str, &str)]) -> String {
    rows.iter()
        .map(|(user, timestamp, status, verify)| {
            format!("ATTLOG\t{user}\t{timestamp}\t{status}\t{verify}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build a JSON payload wrapping records under a `data` key.
pub fn json_data_payload(records: &[serde_json::Value]) -> String {
    serde_json::json!({ "serial": "TEST0001", "data": records }).to_string()
}

/// Assert a successful envelope with the expected format and record count.
pub fn assert_success(result: &IngestionResult, format: DetectedFormat, count: usize) {
    assert!(
        result.success,
        "expected success, got error: {:?}",
        result.error
    );
    assert_eq!(result.format, format);
    assert_eq!(result.records.len(), count);
    assert!(result.error.is_none());
}

/// Assert a failed envelope with the expected format and a non-empty error.
pub fn assert_failure(result: &IngestionResult, format: DetectedFormat) {
    assert!(!result.success, "expected failure, got {result:?}");
    assert_eq!(result.format, format);
    assert!(result.records.is_empty());
    assert!(
        result.error.as_deref().is_some_and(|e| !e.is_empty()),
        "failure must carry a non-empty error message"
    );
}

/// Assert the invariant every emitted record must satisfy: non-empty user
/// id and a display timestamp that round-trips through the canonical layout.
pub fn assert_record_invariant(record: &NormalizedRecord) {
    assert!(!record.user_id.is_empty(), "user_id must be non-empty");
    let reparsed = chrono::NaiveDateTime::parse_from_str(
        &record.timestamp_display,
        "%Y-%m-%d %H:%M:%S",
    )
    .expect("timestamp_display must render in the canonical layout");
    assert_eq!(reparsed, record.timestamp);
}
