use crate::constants::RAW_SAMPLE_LIMIT;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format of an inbound payload, as detected per call.
///
/// Detection is recomputed for every request and travels inside the
/// per-call [`IngestionResult`]; no component retains it between calls, so
/// concurrent ingestions can never observe each other's format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectedFormat {
    /// Payload was empty or whitespace-only.
    Empty,
    /// Legacy tab/space-delimited text (ATTLOG and friends).
    Text,
    /// JSON, pushed by modern terminals.
    Json,
    /// XML, pushed by some older models.
    Xml,
    /// None of the known formats matched.
    Unknown,
    /// An internal fault occurred before a format could be established.
    Error,
}

impl DetectedFormat {
    /// Lowercase wire name of the format.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectedFormat::Empty => "empty",
            DetectedFormat::Text => "text",
            DetectedFormat::Json => "json",
            DetectedFormat::Xml => "xml",
            DetectedFormat::Unknown => "unknown",
            DetectedFormat::Error => "error",
        }
    }
}

impl fmt::Display for DetectedFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Nature of a scan event, decoded from the device punch code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationType {
    CheckIn,
    CheckOut,
    BreakOut,
    BreakIn,
    OvertimeIn,
    OvertimeOut,
}

impl VerificationType {
    /// Map a device punch code to its event type.
    ///
    /// Total over all integers: codes outside 0-5 fall back to
    /// [`VerificationType::CheckIn`] rather than erroring, because devices in
    /// the field report undocumented codes and a misclassified punch is
    /// recoverable while a dropped one is not.
    #[inline]
    #[must_use]
    pub fn from_punch_code(code: i64) -> Self {
        match code {
            1 => VerificationType::CheckOut,
            2 => VerificationType::BreakOut,
            3 => VerificationType::BreakIn,
            4 => VerificationType::OvertimeIn,
            5 => VerificationType::OvertimeOut,
            _ => VerificationType::CheckIn,
        }
    }

    /// Kebab-case wire name, e.g. `"check-in"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationType::CheckIn => "check-in",
            VerificationType::CheckOut => "check-out",
            VerificationType::BreakOut => "break-out",
            VerificationType::BreakIn => "break-in",
            VerificationType::OvertimeIn => "overtime-in",
            VerificationType::OvertimeOut => "overtime-out",
        }
    }
}

impl fmt::Display for VerificationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Biometric modality that authenticated a scan, decoded from the device
/// verify-method code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricMethod {
    Password,
    Fingerprint,
    Face,
    Palm,
    Card,
    Iris,
}

impl BiometricMethod {
    /// Map a device verify-method code to its modality.
    ///
    /// Total over all integers. Code 15 is accepted as face because several
    /// face-terminal firmwares report it instead of 2; anything else outside
    /// 0-5 falls back to [`BiometricMethod::Fingerprint`].
    #[inline]
    #[must_use]
    pub fn from_verify_code(code: i64) -> Self {
        match code {
            0 => BiometricMethod::Password,
            2 | 15 => BiometricMethod::Face,
            3 => BiometricMethod::Palm,
            4 => BiometricMethod::Card,
            5 => BiometricMethod::Iris,
            _ => BiometricMethod::Fingerprint,
        }
    }

    /// Lowercase wire name, e.g. `"fingerprint"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BiometricMethod::Password => "password",
            BiometricMethod::Fingerprint => "fingerprint",
            BiometricMethod::Face => "face",
            BiometricMethod::Palm => "palm",
            BiometricMethod::Card => "card",
            BiometricMethod::Iris => "iris",
        }
    }
}

impl fmt::Display for BiometricMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One attendance event in the canonical shape the rest of the platform
/// consumes.
///
/// # Invariant
///
/// `user_id` is non-empty and `timestamp` parsed successfully in every
/// record that reaches an [`IngestionResult`]; records failing either
/// extraction are dropped during normalization and never emitted
/// partially filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub user_id: String,
    /// Device wall-clock instant; payloads carry no zone information.
    pub timestamp: NaiveDateTime,
    /// `timestamp` rendered as `YYYY-MM-DD HH:MM:SS`.
    pub timestamp_display: String,
    pub punch_code: i64,
    pub verification_type: VerificationType,
    pub verify_method_code: i64,
    pub biometric_method: BiometricMethod,
    pub source_format: DetectedFormat,
    /// Body temperature reading, passed through verbatim from palm/face
    /// scanners that report one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    /// Mask-detection flag, passed through verbatim from face scanners that
    /// report one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mask_status: Option<String>,
}

/// Per-call result envelope returned by the ingestion facade.
///
/// Constructed once per call, returned, and discarded; the core never
/// retains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionResult {
    pub success: bool,
    pub format: DetectedFormat,
    pub records: Vec<NormalizedRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Truncated copy of an unrecognized payload, for operator diagnosis
    /// only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_sample: Option<String>,
}

impl IngestionResult {
    /// Build a successful envelope.
    ///
    /// An empty `records` list is still a success: heartbeat-style device
    /// requests routinely carry zero valid records.
    #[must_use]
    pub fn success(format: DetectedFormat, records: Vec<NormalizedRecord>) -> Self {
        IngestionResult {
            success: true,
            format,
            records,
            error: None,
            raw_sample: None,
        }
    }

    /// Build a failed envelope with a human-readable error message.
    #[must_use]
    pub fn failure(format: DetectedFormat, error: impl Into<String>) -> Self {
        IngestionResult {
            success: false,
            format,
            records: Vec::new(),
            error: Some(error.into()),
            raw_sample: None,
        }
    }

    /// Build a failed envelope carrying a truncated payload sample.
    ///
    /// The sample is capped at [`RAW_SAMPLE_LIMIT`] characters on a char
    /// boundary.
    #[must_use]
    pub fn failure_with_sample(
        format: DetectedFormat,
        error: impl Into<String>,
        raw: &str,
    ) -> Self {
        let sample = raw.chars().take(RAW_SAMPLE_LIMIT).collect();
        IngestionResult {
            raw_sample: Some(sample),
            ..IngestionResult::failure(format, error)
        }
    }
}
