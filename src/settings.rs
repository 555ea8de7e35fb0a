//! Runtime configuration for the editing engine.
//!
//! `EditSettings` holds the thresholds used by a calculation. Missing keys in
//! a settings file fall back to the constants in [`crate::precision`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::precision::{NO_OP_EPSILON, RULED_CHECK_TOLERANCE};
use crate::{EditError, Result};

/// Thresholds applied by `ModifyContourPoints`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditSettings {
    /// Transforms smaller than this are rejected as no-ops.
    pub no_op_epsilon: f64,
    /// Maximum gap closed by the ruled check when joining segments.
    pub ruled_tolerance: f64,
    /// Drop segments that collapse below `ruled_tolerance` instead of failing.
    pub allow_degenerate: bool,
}

impl Default for EditSettings {
    fn default() -> Self {
        Self {
            no_op_epsilon: NO_OP_EPSILON,
            ruled_tolerance: RULED_CHECK_TOLERANCE,
            allow_degenerate: true,
        }
    }
}

impl EditSettings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: EditSettings = toml::from_str(text)?;
        settings.validated()
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validated(self) -> Result<Self> {
        if !(self.no_op_epsilon >= 0.0) {
            return Err(EditError::Validation(format!(
                "no_op_epsilon must be non-negative, got {}",
                self.no_op_epsilon
            )));
        }
        if !(self.ruled_tolerance > 0.0) {
            return Err(EditError::Validation(format!(
                "ruled_tolerance must be positive, got {}",
                self.ruled_tolerance
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_precision() {
        let settings = EditSettings::default();
        assert_eq!(settings.no_op_epsilon, 1.0e-4);
        assert_eq!(settings.ruled_tolerance, 1.0e-5);
        assert!(settings.allow_degenerate);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = EditSettings::from_toml_str("ruled_tolerance = 0.001\n").unwrap();
        assert_eq!(settings.ruled_tolerance, 0.001);
        assert_eq!(settings.no_op_epsilon, 1.0e-4);
        assert!(settings.allow_degenerate);
    }

    #[test]
    fn test_rejects_non_positive_tolerance() {
        let err = EditSettings::from_toml_str("ruled_tolerance = 0.0").unwrap_err();
        assert!(matches!(err, EditError::Validation(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EditSettings::from_toml_str("allow_degenerate = \"yes\"").unwrap_err();
        assert!(matches!(err, EditError::Settings(_)));
    }
}
