//! Parser options.
//!
//! Options can be built in code or loaded from a YAML file such as:
//!
//! ```yaml
//! max_nesting_depth: 64
//! source_name: intro.quill
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::QuillError;

/// Default bound on nested expressions and chained unary operators.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Largest accepted nesting bound. Each level costs several stack frames, and
/// this keeps a parse at the limit within a default 8 MiB main-thread stack.
pub const NESTING_DEPTH_CEILING: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseOptions {
    /// Deeper input is rejected with a diagnostic instead of exhausting the stack.
    pub max_nesting_depth: usize,
    /// Name shown for the source in rendered diagnostics.
    pub source_name: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            source_name: "source".to_string(),
        }
    }
}

impl ParseOptions {
    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }

    /// Sets the nesting bound, clamped to `1..=NESTING_DEPTH_CEILING`.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth.clamp(1, NESTING_DEPTH_CEILING);
        self
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, QuillError> {
        let options: ParseOptions =
            serde_yaml::from_str(text).map_err(|e| QuillError::Config {
                message: "could not read parser options".to_string(),
                source: Some(Box::new(e)),
            })?;
        if options.max_nesting_depth == 0 {
            return Err(QuillError::Config {
                message: "max_nesting_depth must be at least 1".to_string(),
                source: None,
            });
        }
        if options.max_nesting_depth > NESTING_DEPTH_CEILING {
            return Err(QuillError::Config {
                message: format!("max_nesting_depth must be at most {}", NESTING_DEPTH_CEILING),
                source: None,
            });
        }
        Ok(options)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self, QuillError> {
        let text = fs::read_to_string(path).map_err(|e| QuillError::Config {
            message: format!("could not read {}", path.display()),
            source: Some(Box::new(e)),
        })?;
        Self::from_yaml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let options = ParseOptions::from_yaml_str("max_nesting_depth: 8\n").unwrap();
        assert_eq!(options.max_nesting_depth, 8);
        assert_eq!(options.source_name, "source");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = ParseOptions::from_yaml_str("max_depth: 8\n").unwrap_err();
        assert_eq!(err.error_code(), "quill::config");
    }

    #[test]
    fn zero_depth_is_rejected() {
        assert!(ParseOptions::from_yaml_str("max_nesting_depth: 0").is_err());
    }

    #[test]
    fn depth_above_ceiling_is_rejected() {
        let err = ParseOptions::from_yaml_str("max_nesting_depth: 1000000").unwrap_err();
        assert!(err.to_string().contains("at most 128"));
        assert!(ParseOptions::from_yaml_str("max_nesting_depth: 128").is_ok());
    }

    #[test]
    fn builder_clamps_depth() {
        let options = ParseOptions::default().with_max_nesting_depth(1_000_000);
        assert_eq!(options.max_nesting_depth, NESTING_DEPTH_CEILING);
        assert_eq!(ParseOptions::default().with_max_nesting_depth(0).max_nesting_depth, 1);
    }
}
