//! Protocol constants for the ADMS ingestion layer.
//!
//! Biometric terminals from different vendors push the same attendance data
//! under dozens of synonymous field names and in three incompatible wire
//! formats. The tables in this module centralize every vendor-facing name so
//! that supporting a new device family means adding an alias here, never
//! touching decoder control flow.
//!
//! # Alias Resolution
//!
//! Each canonical field has an ordered candidate list. The normalizer walks
//! the list and takes the first key that is present with a non-empty value:
//!
//! ```
//! use adms_core::constants::USER_ID_ALIASES;
//!
//! assert_eq!(USER_ID_ALIASES[0], "user_id");
//! assert!(USER_ID_ALIASES.contains(&"pin"));
//! ```

// ============================================================================
// Field-Name Alias Tables
// ============================================================================

/// Candidate keys for the user identifier, in resolution order.
///
/// Covers ZKTeco-style (`pin`), generic (`user`, `userid`), HR-export
/// (`emp_id`, `staff_id`) and card-reader (`cardno`) vocabularies.
pub const USER_ID_ALIASES: &[&str] = &[
    "user_id", "user", "pin", "userid", "emp_id", "cardno", "staff_id",
];

/// Candidate keys for the punch timestamp, in resolution order.
pub const TIMESTAMP_ALIASES: &[&str] = &[
    "timestamp",
    "time",
    "verify_time",
    "punch_time",
    "datetime",
    "att_time",
];

/// Candidate keys for the punch/status code, in resolution order.
pub const PUNCH_CODE_ALIASES: &[&str] = &["status", "punch_code"];

/// Candidate keys for the verification-method code, in resolution order.
pub const VERIFY_METHOD_ALIASES: &[&str] = &["verify_method", "verify", "method"];

// ============================================================================
// Container Discovery
// ============================================================================

/// JSON object keys that may hold the record array, in priority order.
pub const JSON_CONTAINER_KEYS: &[&str] = &["data", "records", "logs", "attendance"];

/// XML element names that may mark one attendance record, in priority order.
///
/// The first tag name that matches at least once anywhere in the document
/// wins; documents using none of these fall back to the root's direct
/// children.
pub const XML_RECORD_TAGS: &[&str] = &["Log", "Record", "Attendance", "Entry"];

/// Keyword tokens that identify the legacy text format during detection.
pub const TEXT_FORMAT_MARKERS: &[&str] = &["ATTLOG", "USER", "OPLOG"];

// ============================================================================
// Defaults
// ============================================================================

/// Punch code assumed when a device omits or garbles the status field.
///
/// Code 0 is check-in, the overwhelmingly most common event.
pub const DEFAULT_PUNCH_CODE: i64 = 0;

/// Verify-method code assumed when a device omits or garbles the field.
///
/// Code 1 is fingerprint, the dominant modality on legacy hardware.
pub const DEFAULT_VERIFY_CODE: i64 = 1;

// ============================================================================
// Timestamp Layouts
// ============================================================================

/// Supported timestamp layouts, tried in this exact order.
///
/// Order matters: some layouts are prefixes of others (the minute-precision
/// variants must come after their second-precision counterparts). This is a
/// closed, enumerable policy, not a general date parser; do not extend it
/// with guessed layouts.
pub const TIMESTAMP_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Canonical render layout for [`NormalizedRecord::timestamp_display`].
///
/// [`NormalizedRecord::timestamp_display`]: crate::types::NormalizedRecord
pub const TIMESTAMP_DISPLAY_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// Exclusive lower bound for epoch-seconds interpretation (2001-09-09).
///
/// Rejects small integers that are almost certainly user IDs or codes, not
/// timestamps.
pub const MIN_EPOCH_SECONDS: i64 = 1_000_000_000;

/// Exclusive upper bound for epoch-seconds interpretation (year 2286).
///
/// Rejects millisecond-precision timestamps, which would otherwise decode to
/// implausible dates.
pub const MAX_EPOCH_SECONDS: i64 = 9_999_999_999;

// ============================================================================
// Diagnostics
// ============================================================================

/// Maximum length of the raw-payload sample attached to unknown-format
/// failures, in characters.
pub const RAW_SAMPLE_LIMIT: usize = 500;
