// ============================================================================
// Options
// Immutable run configuration parsed from command-line style pairs
// ============================================================================

use std::collections::BTreeSet;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("unknown flag {0:?}")]
    UnknownFlag(String),

    #[error("flag {0:?} needs a value")]
    MissingValue(String),

    #[error("flag {flag:?} expects true or false, got {value:?}")]
    InvalidBool { flag: String, value: String },
}

/// Run configuration.
///
/// Built once, then shared read-only (typically behind `Diagnostics`).
///
/// # Example
/// ```
/// use deferred_fractions::config::Options;
///
/// let options = Options::parse_args(["-d", "true", "-T", "reduce,combine"]).unwrap();
/// assert!(options.diagnostics_enabled());
/// assert!(options.has_tag("combine"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Options {
    diagnostics: bool,
    logging: bool,
    tags: BTreeSet<String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `flag value` pairs: `-d [true|false]`, `-l [true|false]`,
    /// `-T tag,...`.
    ///
    /// # Errors
    /// Unknown flags, missing values and non-boolean values for boolean
    /// flags are rejected; callers usually print [`Options::usage`].
    pub fn parse_args<I, S>(args: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            let flag = flag.as_ref();
            let value = args
                .next()
                .ok_or_else(|| OptionsError::MissingValue(flag.to_string()))?;
            let value = value.as_ref();

            match flag {
                "-d" => options.diagnostics = parse_bool(flag, value)?,
                "-l" => options.logging = parse_bool(flag, value)?,
                "-T" => options.tags = split_tags(value),
                _ => return Err(OptionsError::UnknownFlag(flag.to_string())),
            }
        }

        Ok(options)
    }

    pub fn usage() -> &'static str {
        "Usage: -d [true|false] -l [true|false] -T [tag,...]"
    }

    /// Builder method: Enable or disable diagnostics output
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Builder method: Enable or disable log output
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.logging = enabled;
        self
    }

    /// Builder method: Replace the active debug tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics
    }

    #[inline]
    pub fn logging_enabled(&self) -> bool {
        self.logging
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

fn parse_bool(flag: &str, value: &str) -> Result<bool, OptionsError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(OptionsError::InvalidBool {
            flag: flag.to_string(),
            value: value.to_string(),
        }),
    }
}

fn split_tags(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
