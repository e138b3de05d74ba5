//! Record normalization: from vendor vocabulary to the canonical shape.
//!
//! Every decoder funnels its raw records through here. Field names are
//! reconciled through the ordered alias tables in [`adms_core::constants`];
//! punch and verify codes are coerced and mapped through the fixed semantic
//! tables on the core enums. A record missing its user id or a parseable
//! timestamp fails with a typed per-record error that the decoder absorbs:
//! the record is dropped, never emitted partially filled, and the batch
//! continues.

use crate::record::{FieldValue, RawRecord};
use crate::timestamp::parse_timestamp;
use adms_core::constants::{
    DEFAULT_PUNCH_CODE, DEFAULT_VERIFY_CODE, PUNCH_CODE_ALIASES, TIMESTAMP_ALIASES,
    TIMESTAMP_DISPLAY_LAYOUT, USER_ID_ALIASES, VERIFY_METHOD_ALIASES,
};
use adms_core::{
    BiometricMethod, DetectedFormat, Error, NormalizedRecord, Result, VerificationType,
};
use tracing::warn;

/// Normalize one raw record.
///
/// # Errors
///
/// Returns [`Error::MissingField`] when no user-id or timestamp alias
/// resolves, and [`Error::TimestampUnrecognized`] when the timestamp value
/// matches no supported layout. Both are per-record conditions; callers
/// drop the record and continue the batch. Punch and verify codes never
/// fail: non-numeric values take the field default (0 = check-in,
/// 1 = fingerprint).
pub fn normalize_record(raw: &RawRecord, source: DetectedFormat) -> Result<NormalizedRecord> {
    let user_id = raw
        .first_of(USER_ID_ALIASES)
        .map(FieldValue::to_display_string)
        .ok_or_else(|| Error::MissingField("user_id".to_string()))?;

    let timestamp_raw = raw
        .first_of(TIMESTAMP_ALIASES)
        .map(FieldValue::to_display_string)
        .ok_or_else(|| Error::MissingField("timestamp".to_string()))?;
    let timestamp = parse_timestamp(&timestamp_raw)
        .ok_or_else(|| Error::TimestampUnrecognized(timestamp_raw.clone()))?;

    let punch_code = raw
        .first_of(PUNCH_CODE_ALIASES)
        .map_or(DEFAULT_PUNCH_CODE, |value| {
            value.coerce_code(DEFAULT_PUNCH_CODE)
        });
    let verify_method_code = raw
        .first_of(VERIFY_METHOD_ALIASES)
        .map_or(DEFAULT_VERIFY_CODE, |value| {
            value.coerce_code(DEFAULT_VERIFY_CODE)
        });

    Ok(NormalizedRecord {
        user_id,
        timestamp,
        timestamp_display: timestamp.format(TIMESTAMP_DISPLAY_LAYOUT).to_string(),
        punch_code,
        verification_type: VerificationType::from_punch_code(punch_code),
        verify_method_code,
        biometric_method: BiometricMethod::from_verify_code(verify_method_code),
        source_format: source,
        temperature: raw.get("temperature").and_then(FieldValue::non_empty_string),
        mask_status: raw.get("mask_status").and_then(FieldValue::non_empty_string),
    })
}

/// Normalize a record, absorbing per-record failures.
///
/// The drop is logged at warning level with the offending raw record; the
/// failure never reaches the payload-level result.
pub(crate) fn normalize_or_drop(
    raw: &RawRecord,
    source: DetectedFormat,
) -> Option<NormalizedRecord> {
    match normalize_record(raw, source) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(record = ?raw, error = %e, "dropping invalid record");
            None
        }
    }
}
