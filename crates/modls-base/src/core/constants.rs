/// Supported file extension for Modelica source files.
pub const MODELICA_EXT: &str = "mo";

/// Supported file extensions, as a slice for uniformity with
/// extension-checking call sites.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[MODELICA_EXT];

/// The reserved file name that, within a directory, declares that
/// directory's own top-level class (spec.md §6: "A library root is any
/// directory containing a `package.mo` whose top-level class declares an
/// identifier equal to the basename of the directory").
pub const PACKAGE_FILE_NAME: &str = "package.mo";

/// Checks if a file extension is supported.
pub fn is_supported_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_mo_extension() {
        assert!(is_supported_extension("mo"));
        assert!(!is_supported_extension("sysml"));
        assert!(!is_supported_extension(""));
    }
}
