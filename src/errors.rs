use std::fmt;
use thiserror::Error;

/// Error type for `.splice` decoding operations
///
/// Every failure aborts the decode; no partially decoded pattern is ever handed
/// back alongside one of these. Each variant carries the offsets or sizes that
/// triggered it and maps to a stable numeric code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpliceError {
    // ========== I/O ERRORS (1000-1099) ==========
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        io_kind: Option<std::io::ErrorKind>,
    },

    /// Error reading file contents
    #[error("Failed to read file {path}: {reason}")]
    FileReadError { path: String, reason: String },

    /// Permission denied when accessing file
    #[error("Permission denied accessing file: {path}")]
    PermissionDenied { path: String },

    // ========== FORMAT ERRORS (2000-2099) ==========
    /// First bytes are not the SPLICE magic cookie
    #[error("Not a splice file: expected magic 'SPLICE', found '{found}'")]
    NotRecognizedFormat { found: String },

    /// Buffer ends inside the fixed header
    #[error("Insufficient header data for {field}: needed {needed} bytes, only {available} available")]
    InsufficientHeaderData {
        field: String,
        needed: usize,
        available: usize,
    },

    /// Declared body length runs past the end of the buffer
    #[error("Truncated splice file: header declares {expected} body bytes, only {actual} present")]
    TruncatedFile { expected: u64, actual: usize },

    // ========== TRACK ERRORS (3000-3099) ==========
    /// Not enough bytes left for a track's id slot, name length or name
    #[error("Insufficient track data at offset {offset}: needed {needed} bytes, only {available} available")]
    InsufficientTrackData {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Fewer than 16 step bytes follow a track name
    #[error("Truncated track at offset {offset}: expected {expected} step bytes, only {available} available")]
    TruncatedTrack {
        offset: usize,
        expected: usize,
        available: usize,
    },

    /// Track records ran past the body-length budget
    #[error("Track records overrun the track region: budget {budget} bytes, consumed {consumed}")]
    OverrunTrackRegion { budget: u64, consumed: u64 },

    /// Body length too short to hold the fixed header fields
    #[error("Track region underrun: body length {declared} is shorter than the {required} bytes of fixed fields")]
    UnderrunTrackRegion { declared: u64, required: usize },

    // ========== RESOURCE ERRORS (4000-4099) ==========
    /// Integer overflow in offset arithmetic
    #[error("Integer overflow in {operation}: {details}")]
    IntegerOverflow { operation: String, details: String },

    /// Data size exceeds configured limits
    #[error("Data size exceeds limit for {field}: {size} (limit: {limit})")]
    DataSizeExceedsLimit {
        field: String,
        size: usize,
        limit: usize,
    },

    // ========== RENDER / VALIDATION ERRORS (5000-5099) ==========
    /// Step byte has no glyph in the display table
    #[error("Invalid step value {value} in track {track_id} at step {step}")]
    InvalidStepValue { track_id: u8, step: usize, value: u8 },

    /// Semantic validation failure
    #[error("Validation failed for {field}: {reason}")]
    ValidationFailed { field: String, reason: String },
}

impl SpliceError {
    /// Get the error code for machine-readable processing
    pub fn code(&self) -> u16 {
        match self {
            // I/O Errors (1000-1099)
            Self::FileNotFound { .. } => 1001,
            Self::FileReadError { .. } => 1002,
            Self::PermissionDenied { .. } => 1003,

            // Format Errors (2000-2099)
            Self::NotRecognizedFormat { .. } => 2001,
            Self::InsufficientHeaderData { .. } => 2002,
            Self::TruncatedFile { .. } => 2003,

            // Track Errors (3000-3099)
            Self::InsufficientTrackData { .. } => 3001,
            Self::TruncatedTrack { .. } => 3002,
            Self::OverrunTrackRegion { .. } => 3003,
            Self::UnderrunTrackRegion { .. } => 3004,

            // Resource Errors (4000-4099)
            Self::IntegerOverflow { .. } => 4001,
            Self::DataSizeExceedsLimit { .. } => 4002,

            // Render / Validation Errors (5000-5099)
            Self::InvalidStepValue { .. } => 5001,
            Self::ValidationFailed { .. } => 5002,
        }
    }

    /// Get the error category for grouping related errors
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            1000..=1099 => ErrorCategory::IO,
            2000..=2099 => ErrorCategory::Format,
            3000..=3099 => ErrorCategory::Track,
            4000..=4099 => ErrorCategory::Resource,
            5000..=5099 => ErrorCategory::Validation,
            _ => ErrorCategory::Unknown,
        }
    }

    /// True when the input itself is malformed, as opposed to an I/O or limit failure
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Format | ErrorCategory::Track
        )
    }

    /// Get suggested action for handling this error
    pub fn suggested_action(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => "Check file path and ensure file exists",
            Self::PermissionDenied { .. } => "Check file permissions and user access rights",
            Self::NotRecognizedFormat { .. } => "Verify this is a valid splice file",
            Self::TruncatedFile { .. } | Self::TruncatedTrack { .. } => {
                "File appears to be truncated, re-export or re-download it"
            },
            Self::OverrunTrackRegion { .. } | Self::UnderrunTrackRegion { .. } => {
                "Body length disagrees with the track records, retry with the lenient parser config"
            },
            Self::DataSizeExceedsLimit { .. } => "Raise the limit in ParserConfig or use ParserConfig::permissive()",
            Self::InvalidStepValue { .. } => "Step bytes must be 0 (no hit) or 1 (hit)",
            _ => "Check file integrity against the splice format",
        }
    }
}

/// Error categories for grouping related error types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    IO,
    Format,
    Track,
    Resource,
    Validation,
    Unknown,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IO => write!(f, "I/O"),
            Self::Format => write!(f, "Format"),
            Self::Track => write!(f, "Track"),
            Self::Resource => write!(f, "Resource"),
            Self::Validation => write!(f, "Validation"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result type alias for splice operations
pub type SpliceResult<T> = Result<T, SpliceError>;

impl SpliceError {
    /// Map an I/O failure on `path` to the matching variant
    pub fn from_io(err: std::io::Error, path: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => SpliceError::FileNotFound {
                path: path.to_string(),
                io_kind: Some(err.kind()),
            },
            std::io::ErrorKind::PermissionDenied => SpliceError::PermissionDenied {
                path: path.to_string(),
            },
            _ => SpliceError::FileReadError {
                path: path.to_string(),
                reason: err.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for SpliceError {
    fn from(err: std::io::Error) -> Self {
        SpliceError::from_io(err, "unknown")
    }
}
