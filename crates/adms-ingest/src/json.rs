//! JSON decoder for modern push terminals (uFace, SpeedFace and similar).
//!
//! Devices disagree on envelope shape: some push a bare array of records,
//! some wrap it in an object under `data`/`records`/`logs`/`attendance`,
//! and some push one record object with no wrapper at all. The decoder
//! resolves the record list by that priority and treats an unwrapped object
//! as a single-record batch.

use crate::normalize::normalize_or_drop;
use crate::record::RawRecord;
use adms_core::constants::JSON_CONTAINER_KEYS;
use adms_core::{DetectedFormat, Error, NormalizedRecord, Result};
use serde_json::{Map, Value};

/// Decode a JSON payload into normalized records.
///
/// # Errors
///
/// Returns [`Error::UnparseableJson`] when the payload is not valid JSON or
/// the root is a bare scalar. Once parsing succeeds the call succeeds, even
/// if zero records survive normalization.
pub fn decode(payload: &str) -> Result<Vec<NormalizedRecord>> {
    let root: Value = serde_json::from_str(payload.trim())
        .map_err(|e| Error::UnparseableJson(e.to_string()))?;

    let candidates: Vec<&Value> = match &root {
        Value::Array(items) => items.iter().collect(),
        Value::Object(object) => {
            locate_records(object).unwrap_or_else(|| vec![&root])
        }
        _ => {
            return Err(Error::UnparseableJson(
                "unexpected JSON structure".to_string(),
            ));
        }
    };

    Ok(candidates
        .into_iter()
        .filter_map(Value::as_object)
        .map(RawRecord::from_json_object)
        .filter_map(|raw| normalize_or_drop(&raw, DetectedFormat::Json))
        .collect())
}

/// Find the record array inside a wrapper object.
///
/// Container keys are tried in priority order; a key holding an empty array
/// or a non-array value falls through to the next candidate. `None` means
/// no container matched and the object itself is the record.
fn locate_records(object: &Map<String, Value>) -> Option<Vec<&Value>> {
    for key in JSON_CONTAINER_KEYS {
        if let Some(Value::Array(items)) = object.get(*key) {
            if !items.is_empty() {
                return Some(items.iter().collect());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use adms_core::{BiometricMethod, VerificationType};

    #[test]
    fn test_decode_wrapped_record_array() {
        let payload = r#"{
            "serial": "ZK2025001",
            "data": [
                {"user_id": "101", "timestamp": "2025-12-12 09:00:00", "punch_code": 0, "verify_method": 2},
                {"user_id": "102", "timestamp": "2025-12-12 09:15:00", "punch_code": 1, "verify_method": 15}
            ]
        }"#;

        let records = decode(payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].user_id, "101");
        assert_eq!(records[0].biometric_method, BiometricMethod::Face);
        assert_eq!(records[1].verification_type, VerificationType::CheckOut);
        assert_eq!(records[1].biometric_method, BiometricMethod::Face);
    }

    #[test]
    fn test_decode_bare_record_array() {
        let payload = r#"[{"user": "5", "time": "2025-12-12 08:00:00", "verify": 4}]"#;

        let records = decode(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, "5");
        assert_eq!(records[0].biometric_method, BiometricMethod::Card);
    }

    #[test]
    fn test_decode_unwrapped_single_record() {
        let payload = r#"{"pin": "300", "punch_time": "2025-12-12 18:00:00", "status": 1}"#;

        let records = decode(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, "300");
        assert_eq!(records[0].verification_type, VerificationType::CheckOut);
    }

    #[test]
    fn test_decode_container_key_priority() {
        // "data" outranks "records"
        let payload = r#"{
            "records": [{"user": "2", "time": "2025-12-12 09:00:00"}],
            "data": [{"user": "1", "time": "2025-12-12 09:00:00"}]
        }"#;

        let records = decode(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, "1");
    }

    #[test]
    fn test_decode_empty_container_falls_through() {
        let payload = r#"{
            "data": [],
            "logs": [{"user": "9", "time": "2025-12-12 09:00:00"}]
        }"#;

        let records = decode(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, "9");
    }

    #[test]
    fn test_decode_parse_error() {
        let result = decode(r#"{"data": [{"user": "101""#);
        match result {
            Err(Error::UnparseableJson(message)) => assert!(!message.is_empty()),
            other => panic!("expected UnparseableJson, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_scalar_root_is_rejected() {
        assert!(matches!(
            decode("42"),
            Err(Error::UnparseableJson(_))
        ));
        assert!(matches!(
            decode("\"hello\""),
            Err(Error::UnparseableJson(_))
        ));
    }

    #[test]
    fn test_decode_invalid_elements_are_dropped() {
        let payload = r#"[
            {"user": "101", "time": "2025-12-12 09:00:00"},
            {"time": "2025-12-12 09:01:00"},
            "not-a-record",
            {"user": "104", "time": "pure garbage"}
        ]"#;

        let records = decode(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, "101");
    }

    #[test]
    fn test_decode_zero_surviving_records_is_success() {
        let records = decode(r#"{"serial": "ZK1", "status": "online"}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_decode_numeric_user_and_epoch_time() {
        let payload = r#"[{"userid": 88, "att_time": 1734000000, "verify_method": 3}]"#;

        let records = decode(payload).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id, "88");
        assert_eq!(records[0].biometric_method, BiometricMethod::Palm);
        assert_eq!(records[0].timestamp_display, "2024-12-12 10:40:00");
    }
}
