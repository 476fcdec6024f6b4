use crate::core::CoreError;
use crate::core::constants::SUPPORTED_EXTENSIONS;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads a file and returns its content as a string.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_file(path: &PathBuf) -> Result<String, CoreError> {
    fs::read_to_string(path).map_err(|e| CoreError::io_read_failed(path, &e))
}

/// Validates that a file has a supported extension (`.mo`).
///
/// # Errors
///
/// Returns an error if the extension is missing or unsupported.
pub fn validate_extension(path: &Path) -> Result<&str, CoreError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| {
            CoreError::internal(format!("invalid file extension for {}", path.display()))
        })?;

    if SUPPORTED_EXTENSIONS.contains(&ext) {
        Ok(ext)
    } else {
        Err(CoreError::internal(format!(
            "unsupported file extension: {ext}"
        )))
    }
}
