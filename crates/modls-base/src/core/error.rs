//! # Core Error Kinds
//!
//! The four failure kinds from the design's error-handling policy:
//! `not-found`, `unsupported`, `invariant-violated`, and `internal`.
//!
//! Per that policy, per-candidate failures during resolution are swallowed
//! and simply drive the candidate generator forward (they never become a
//! `CoreError`); only per-reference failures are surfaced to the caller as
//! one of these four.

use std::fmt;
use std::path::PathBuf;

use crate::core::error_codes;

/// A failure surfaced to a caller of the core's public operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The lookup failed but project state is consistent. Not an error in
    /// the exceptional sense — just an absent result with a reason attached
    /// for diagnostics.
    NotFound { code: &'static str, message: String },
    /// An explicit request for a resolution mode the core does not
    /// implement (currently: `definition` resolution, reserved for a
    /// future extension).
    Unsupported { code: &'static str, message: String },
    /// A precondition was breached by the caller (e.g. an empty symbol
    /// path, or a reference claiming to be absolute while carrying
    /// relative anchor data). Fatal to the current operation only; must
    /// never corrupt project state.
    InvariantViolated { code: &'static str, message: String },
    /// An unexpected failure during resolution (I/O while reading a
    /// sibling file, parse failure of a subfile). Caught at the
    /// resolver's outer boundary and reported rather than propagated as a
    /// panic.
    Internal { code: &'static str, message: String },
}

impl CoreError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            code: error_codes::RESOLVER_NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported {
            code: error_codes::RESOLVER_UNSUPPORTED_MODE,
            message: message.into(),
        }
    }

    pub fn invariant_violated(message: impl Into<String>) -> Self {
        Self::InvariantViolated {
            code: error_codes::RESOLVER_INVARIANT_VIOLATED,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            code: error_codes::RESOLVER_INTERNAL,
            message: message.into(),
        }
    }

    pub fn io_read_failed(path: &PathBuf, source: &std::io::Error) -> Self {
        Self::Internal {
            code: error_codes::IO_READ_FAILED,
            message: format!("failed to read {}: {source}", path.display()),
        }
    }

    pub fn io_directory_not_found(path: &PathBuf) -> Self {
        Self::Internal {
            code: error_codes::IO_DIRECTORY_NOT_FOUND,
            message: format!("directory not found: {}", path.display()),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound { code, .. }
            | CoreError::Unsupported { code, .. }
            | CoreError::InvariantViolated { code, .. }
            | CoreError::Internal { code, .. } => code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CoreError::NotFound { message, .. }
            | CoreError::Unsupported { message, .. }
            | CoreError::InvariantViolated { message, .. }
            | CoreError::Internal { message, .. } => message,
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for CoreError {}
