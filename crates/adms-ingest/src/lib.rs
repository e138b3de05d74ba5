//! Protocol detection and normalization for attendance payloads pushed by
//! heterogeneous biometric terminals.
//!
//! Terminals push punches over HTTP in three incompatible wire formats
//! (legacy tab-delimited text, JSON, XML), under dozens of synonymous field
//! names and with vendor-specific timestamp habits. This crate turns one
//! opaque payload plus an optional `Content-Type` hint into a uniform
//! [`adms_core::IngestionResult`]: detect the format, decode it, reconcile
//! field names and codes, and drop (never emit) records that lack a user
//! id or a parseable timestamp.
//!
//! The whole pipeline is purely functional per call: no component retains
//! state between invocations, so any number of device requests can be
//! ingested concurrently.
//!
//! [`PayloadParser::parse`] is the single externally-callable entry point;
//! persistence, deduplication and business validation belong to the caller.

pub mod detect;
pub mod json;
pub mod normalize;
pub mod parser;
pub mod record;
pub mod text;
pub mod timestamp;
pub mod xml;

pub use detect::detect_format;
pub use normalize::normalize_record;
pub use parser::{PayloadParser, parse_attendance_data};
pub use record::{FieldValue, RawRecord};
pub use timestamp::parse_timestamp;
