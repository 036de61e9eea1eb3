// ABOUTME: Recipe record model shared by storage, selection and formatting
// ABOUTME: Converts the table's Y/N flag columns to and from booleans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright ©2025 Async-IO.org

use crate::constants::flags;
use crate::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};

/// A row of the recipe table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique dish name
    pub name: String,
    /// Attribution: a URL, a cookbook, a person
    #[serde(default)]
    pub source: String,
    /// Consumption flag
    #[serde(default)]
    pub has_been_made: bool,
    /// Category flag used for the quota slot
    #[serde(default)]
    pub vegetarian: bool,
}

impl Recipe {
    /// Create an unmade recipe
    pub fn new(name: impl Into<String>, source: impl Into<String>, vegetarian: bool) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            has_been_made: false,
            vegetarian,
        }
    }

    /// Whether the attribution should be rendered as a hyperlink
    #[must_use]
    pub fn has_link_source(&self) -> bool {
        self.source.contains("https")
    }
}

/// Encode a boolean as the table's flag value
#[must_use]
pub const fn flag_to_column(value: bool) -> &'static str {
    if value {
        flags::YES
    } else {
        flags::NO
    }
}

/// Decode a flag column value
///
/// # Errors
///
/// Returns an error if the value is neither `Y` nor `N` (case-insensitive)
pub fn flag_from_column(value: &str) -> AppResult<bool> {
    match value.trim() {
        v if v.eq_ignore_ascii_case(flags::YES) => Ok(true),
        v if v.eq_ignore_ascii_case(flags::NO) => Ok(false),
        other => Err(AppError::new(
            ErrorCode::InvalidFormat,
            format!("unexpected flag value '{other}', expected Y or N"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_decoding() {
        assert!(matches!(flag_from_column("Y"), Ok(true)));
        assert!(matches!(flag_from_column("n"), Ok(false)));
        assert!(matches!(flag_from_column(" N "), Ok(false)));
        assert!(flag_from_column("yes").is_err());
        assert!(flag_from_column("").is_err());
    }

    #[test]
    fn test_flag_encoding() {
        assert_eq!(flag_to_column(true), "Y");
        assert_eq!(flag_to_column(false), "N");
    }

    #[test]
    fn test_link_source_detection() {
        let linked = Recipe::new("Dal", "https://example.com/dal", true);
        let book = Recipe::new("Ragu", "Salt Fat Acid Heat p. 312", false);
        let plain_http = Recipe::new("Soup", "http://example.com/soup", false);
        assert!(linked.has_link_source());
        assert!(!book.has_link_source());
        assert!(!plain_http.has_link_source());
    }
}
