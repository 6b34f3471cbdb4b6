use serde::{Deserialize, Serialize};

/// One file in an upload request, exactly as the client submitted it.
/// Nothing in here is trusted until the validation pipeline has run.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadCandidate {
    pub declared_filename: String,
    pub raw_base64: String,
}

impl UploadCandidate {
    pub fn new(declared_filename: impl Into<String>, raw_base64: impl Into<String>) -> Self {
        Self {
            declared_filename: declared_filename.into(),
            raw_base64: raw_base64.into(),
        }
    }
}

/// Severity of a validation error.
///
/// `Validation` errors are user-correctable and surfaced verbatim.
/// `Security` errors flag the file for quarantine; the client gets a generic
/// message while the full detection context goes to server-side logs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Validation,
    Security,
}

/// Machine-readable validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorCode {
    MalformedEncoding,
    FileTooLarge,
    BatchTooLarge,
    UnsupportedType,
    EmptyOrLongFilename,
    ContentMismatch,
    SuspiciousContent,
}

impl ValidationErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorCode::MalformedEncoding => "MALFORMED_ENCODING",
            ValidationErrorCode::FileTooLarge => "FILE_TOO_LARGE",
            ValidationErrorCode::BatchTooLarge => "BATCH_TOO_LARGE",
            ValidationErrorCode::UnsupportedType => "UNSUPPORTED_TYPE",
            ValidationErrorCode::EmptyOrLongFilename => "EMPTY_OR_LONG_FILENAME",
            ValidationErrorCode::ContentMismatch => "CONTENT_MISMATCH",
            ValidationErrorCode::SuspiciousContent => "SUSPICIOUS_CONTENT",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ValidationErrorCode::ContentMismatch | ValidationErrorCode::SuspiciousContent => {
                Severity::Security
            }
            _ => Severity::Validation,
        }
    }
}

impl std::fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation failure for one upload candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: ValidationErrorCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Message safe to echo back to the submitting client. Security errors
    /// are reported generically so an attacker cannot calibrate evasion
    /// against the specific detection signature.
    pub fn client_message(&self) -> String {
        match self.severity() {
            Severity::Security => format!("{}: suspicious file rejected", self.code),
            Severity::Validation => format!("{}: {}", self.code, self.message),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Outcome of validating one upload candidate.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
    /// The sniffed, trusted type. May differ from the declared type, and is
    /// only set once the magic-byte check has verified it.
    pub detected_mime_type: Option<String>,
    pub requires_quarantine: bool,
    /// Display/audit form of the declared filename. Never used for path
    /// construction; storage keys are generated independently.
    pub sanitized_filename: String,
    pub size_bytes: Option<u64>,
}

impl ValidationResult {
    /// Build a result from accumulated errors, deriving `valid` and
    /// `requires_quarantine` so the invariants cannot drift.
    pub fn from_errors(
        errors: Vec<ValidationError>,
        detected_mime_type: Option<String>,
        sanitized_filename: String,
        size_bytes: Option<u64>,
    ) -> Self {
        let valid = errors.is_empty();
        let requires_quarantine = errors.iter().any(|e| e.severity() == Severity::Security);
        Self {
            valid,
            errors,
            detected_mime_type,
            requires_quarantine,
            sanitized_filename,
            size_bytes,
        }
    }
}

/// A validation result together with the decoded bytes, when decoding
/// succeeded. The bytes are needed downstream both to persist accepted files
/// and to relocate suspect ones into quarantine.
#[derive(Debug)]
pub struct FileValidation {
    pub result: ValidationResult,
    pub bytes: Option<Vec<u8>>,
}

/// Outcome of validating a batch of candidates. Per-file results are
/// independent; `batch_error` carries the aggregate-size failure, reported
/// once for the whole request rather than per file.
#[derive(Debug)]
pub struct BatchValidation {
    pub per_file: Vec<FileValidation>,
    pub batch_error: Option<ValidationError>,
}
