use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_RELATIVE_MARKER: char = '_';

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoutesOptions {
    /// Prefix that starts the relative part of a selector.
    pub relative_marker: char,
    /// Percent-decode path segments before matching them.
    pub decode_uri: bool,
    /// Treat a trailing `/` in a location as an extra empty segment.
    pub strict_trailing_slash: bool,
}

impl Default for RoutesOptions {
    fn default() -> Self {
        Self {
            relative_marker: DEFAULT_RELATIVE_MARKER,
            decode_uri: true,
            strict_trailing_slash: false,
        }
    }
}

impl RoutesOptions {
    pub fn builder() -> RoutesOptionsBuilder {
        RoutesOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        let marker = self.relative_marker;
        if marker.is_alphanumeric() || marker.is_whitespace() || matches!(marker, '/' | '?' | ':' | '#')
        {
            return Err(OptionsError::InvalidRelativeMarker { marker });
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RoutesOptionsBuilder {
    options: RoutesOptions,
}

impl RoutesOptionsBuilder {
    pub fn relative_marker(mut self, value: char) -> Self {
        self.options.relative_marker = value;
        self
    }

    pub fn decode_uri(mut self, value: bool) -> Self {
        self.options.decode_uri = value;
        self
    }

    pub fn strict_trailing_slash(mut self, value: bool) -> Self {
        self.options.strict_trailing_slash = value;
        self
    }

    pub fn build(self) -> Result<RoutesOptions, OptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("relative marker '{marker}' collides with selector or location syntax")]
    InvalidRelativeMarker { marker: char },
}
