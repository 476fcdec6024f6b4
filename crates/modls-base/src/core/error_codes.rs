//! # Error Code System
//!
//! Centralized error codes, in the same range-banded style as the rest of
//! the error handling in this crate's lineage.
//!
//! ## Error Code Ranges
//!
//! - **R001-R099**: resolver / core errors (the four kinds of [`crate::core::CoreError`])
//! - **IO001-IO099**: file system and project-loading errors
//!
//! Unlike a typical diagnostics-facing error code table, these are not
//! meant to accumulate one code per distinct message — `CoreError` has
//! exactly four variants (spec §7) and each gets one code. The ranges are
//! left wide in case a future `definition`-resolution mode needs its own
//! band.

// ============================================================================
// RESOLVER / CORE ERROR CODES (R001-R099)
// ============================================================================

pub const RESOLVER_INVARIANT_VIOLATED: &str = "R001";
pub const RESOLVER_NOT_FOUND: &str = "R002";
pub const RESOLVER_UNSUPPORTED_MODE: &str = "R003";
pub const RESOLVER_INTERNAL: &str = "R004";

// ============================================================================
// FILE SYSTEM / PROJECT-LOADING ERROR CODES (IO001-IO099)
// ============================================================================

pub const IO_FILE_NOT_FOUND: &str = "IO001";
pub const IO_READ_FAILED: &str = "IO002";
pub const IO_DIRECTORY_NOT_FOUND: &str = "IO003";
pub const IO_INVALID_PATH: &str = "IO004";
