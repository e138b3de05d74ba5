//! Ingestion facade: the single entry point of the crate.
//!
//! Receives one raw device payload plus the optional `Content-Type` header
//! value, detects the wire format, dispatches to the matching decoder and
//! wraps the outcome in a uniform [`IngestionResult`]. Every failure path
//! terminates in a returned envelope; nothing propagates to the HTTP
//! boundary as an error.
//!
//! # Examples
//!
//! ```
//! use adms_ingest::PayloadParser;
//! use adms_core::DetectedFormat;
//!
//! let result = PayloadParser::parse("ATTLOG\t101\t2025-12-12 09:00:00\t0\t1\n", None);
//! assert!(result.success);
//! assert_eq!(result.format, DetectedFormat::Text);
//! assert_eq!(result.records[0].user_id, "101");
//!
//! let result = PayloadParser::parse("", None);
//! assert!(!result.success);
//! assert_eq!(result.format, DetectedFormat::Empty);
//! ```

use crate::detect::detect_format;
use crate::{json, text, xml};
use adms_core::{DetectedFormat, Error, IngestionResult};
use tracing::{debug, warn};

/// Stateless parser for attendance payloads pushed by biometric terminals.
///
/// A unit struct with an associated function only: there is deliberately no
/// instance state, so one call can never leak its detected format or
/// anything else into a concurrent one.
pub struct PayloadParser;

impl PayloadParser {
    /// Parse an attendance payload of any supported wire format.
    ///
    /// Total function: payload-level failures (empty payload, malformed
    /// JSON/XML, unrecognized format) come back as `success = false` with a
    /// human-readable `error`, and unknown-format failures additionally
    /// carry a truncated `raw_sample` for operator diagnosis. Per-record
    /// failures never fail the call; invalid records are dropped and the
    /// batch continues.
    #[must_use]
    pub fn parse(raw_payload: &str, content_type: Option<&str>) -> IngestionResult {
        let format = detect_format(raw_payload, content_type);
        debug!(%format, "detected payload format");

        let outcome = match format {
            DetectedFormat::Empty => Err(Error::EmptyPayload),
            DetectedFormat::Text => Ok(text::decode(raw_payload)),
            DetectedFormat::Json => json::decode(raw_payload),
            DetectedFormat::Xml => xml::decode(raw_payload),
            DetectedFormat::Unknown => Err(Error::UnknownFormat {
                sample: raw_payload.to_string(),
            }),
            // detect_format never returns Error; kept for exhaustiveness
            DetectedFormat::Error => Err(Error::Internal("format detection fault".to_string())),
        };

        match outcome {
            Ok(records) => IngestionResult::success(format, records),
            Err(e) => {
                warn!(%format, error = %e, "payload ingestion failed");
                match e {
                    Error::UnknownFormat { sample } => IngestionResult::failure_with_sample(
                        format,
                        "Unknown data format",
                        &sample,
                    ),
                    other => IngestionResult::failure(format, other.to_string()),
                }
            }
        }
    }
}

/// Convenience wrapper around [`PayloadParser::parse`].
#[must_use]
pub fn parse_attendance_data(raw_payload: &str, content_type: Option<&str>) -> IngestionResult {
    PayloadParser::parse(raw_payload, content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_payload() {
        let result = PayloadParser::parse("", None);
        assert!(!result.success);
        assert_eq!(result.format, DetectedFormat::Empty);
        assert_eq!(result.error.as_deref(), Some("Empty payload"));
        assert!(result.records.is_empty());
    }

    #[test]
    fn test_parse_unknown_payload_carries_sample() {
        let result = PayloadParser::parse("RANDOMDATA123456789", None);
        assert!(!result.success);
        assert_eq!(result.format, DetectedFormat::Unknown);
        assert_eq!(result.raw_sample.as_deref(), Some("RANDOMDATA123456789"));
    }

    #[test]
    fn test_parse_dispatches_on_content_type() {
        let payload = r#"{"data": [{"user": "1", "time": "2025-12-12 09:00:00"}]}"#;
        let result = PayloadParser::parse(payload, Some("application/json"));
        assert!(result.success);
        assert_eq!(result.format, DetectedFormat::Json);
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_parse_json_failure_reports_parser_message() {
        let result = PayloadParser::parse(r#"{"data": [{"#, Some("application/json"));
        assert!(!result.success);
        assert_eq!(result.format, DetectedFormat::Json);
        assert!(result.error.unwrap().starts_with("JSON parse error"));
    }

    #[test]
    fn test_parse_xml_failure_reports_parser_message() {
        let result = PayloadParser::parse("<Logs><Log></Logs>", Some("text/xml"));
        assert!(!result.success);
        assert_eq!(result.format, DetectedFormat::Xml);
        assert!(result.error.unwrap().starts_with("XML parse error"));
    }

    #[test]
    fn test_parse_text_with_zero_records_still_succeeds() {
        let result = PayloadParser::parse("OK\n", Some("text/plain"));
        assert!(result.success);
        assert_eq!(result.format, DetectedFormat::Text);
        assert!(result.records.is_empty());
    }

    #[test]
    fn test_convenience_function_matches_parser() {
        let payload = "ATTLOG\t101\t2025-12-12 09:00:00\t0\t1";
        assert_eq!(
            parse_attendance_data(payload, None),
            PayloadParser::parse(payload, None)
        );
    }
}
