//! Configuration for document refinement.

use crate::RefineError;
use crate::Result;

/// Configuration controlling how the cleaned package is written.
///
/// The transformation rules themselves are fixed; this only affects the
/// output container and naming.
///
/// # Examples
///
/// ```
/// use wordrefine_core::RefineConfig;
///
/// let config = RefineConfig::default()
///     .with_compression_level(Some(9))
///     .with_output_suffix("_clean");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct RefineConfig {
    /// Compression level for written entries.
    ///
    /// `Some(0)` stores entries uncompressed, `Some(1..=9)` deflates at that
    /// level, `None` uses the deflate default.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Carry unix permissions and modification times of source entries.
    ///
    /// Default: `true`.
    pub preserve_metadata: bool,

    /// Suffix inserted between the file stem and extension of the output.
    ///
    /// Default: `"_c"`.
    pub output_suffix: String,

    /// Replace an existing file at the output path.
    ///
    /// Default: `true`.
    pub overwrite: bool,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            compression_level: Some(6),
            preserve_metadata: true,
            output_suffix: "_c".to_string(),
            overwrite: true,
        }
    }
}

impl RefineConfig {
    /// Creates a new `RefineConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    #[must_use]
    pub fn with_compression_level(mut self, level: Option<u8>) -> Self {
        self.compression_level = level;
        self
    }

    /// Sets whether entry metadata is preserved.
    #[must_use]
    pub fn with_preserve_metadata(mut self, preserve: bool) -> Self {
        self.preserve_metadata = preserve;
        self
    }

    /// Sets the output file suffix.
    #[must_use]
    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    /// Sets whether an existing output file may be replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is above 9 or the output
    /// suffix is empty (the output would replace the input).
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(RefineError::InvalidConfig(format!(
                "compression level must be between 0 and 9, got {level}"
            )));
        }

        if self.output_suffix.is_empty() {
            return Err(RefineError::InvalidConfig(
                "output suffix must not be empty".to_string(),
            ));
        }

        if self.output_suffix.contains(['/', '\\']) {
            return Err(RefineError::InvalidConfig(format!(
                "output suffix must not contain path separators: {}",
                self.output_suffix
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RefineConfig::default();
        assert_eq!(config.compression_level, Some(6));
        assert!(config.preserve_metadata);
        assert_eq!(config.output_suffix, "_c");
        assert!(config.overwrite);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = RefineConfig::new()
            .with_compression_level(Some(0))
            .with_preserve_metadata(false)
            .with_output_suffix("_clean")
            .with_overwrite(false);

        assert_eq!(config.compression_level, Some(0));
        assert!(!config.preserve_metadata);
        assert_eq!(config.output_suffix, "_clean");
        assert!(!config.overwrite);
    }

    #[test]
    fn test_validate_compression_level() {
        assert!(
            RefineConfig::default()
                .with_compression_level(Some(9))
                .validate()
                .is_ok()
        );
        assert!(
            RefineConfig::default()
                .with_compression_level(None)
                .validate()
                .is_ok()
        );

        let err = RefineConfig::default()
            .with_compression_level(Some(10))
            .validate()
            .unwrap_err();
        assert!(matches!(err, RefineError::InvalidConfig(_)));
        assert!(err.to_string().contains("10"));
    }

    #[test]
    fn test_validate_suffix() {
        let err = RefineConfig::default()
            .with_output_suffix("")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("empty"));

        let err = RefineConfig::default()
            .with_output_suffix("../x")
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("separators"));
    }
}
