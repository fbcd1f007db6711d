// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, FmtResult};

static RE_SPACES_OR_TABS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[ \t]*$").unwrap());

/// The largest indentation level that may be set or queued.
pub const MAX_INDENTATION_LEVEL: i64 = 1024;

/// An indentation to set or queue on a writer.
///
/// Either a number of levels,
/// or existing indentation text (spaces and tabs) to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indentation {
    Level(i64),
    /// Each tab counts as one level,
    /// each space as a fraction of a level,
    /// depending on the configured number of spaces per level.
    Text(String),
}

impl From<i32> for Indentation {
    fn from(level: i32) -> Self {
        Self::Level(level.into())
    }
}

impl From<i64> for Indentation {
    fn from(level: i64) -> Self {
        Self::Level(level)
    }
}

impl From<u32> for Indentation {
    fn from(level: u32) -> Self {
        Self::Level(level.into())
    }
}

impl From<usize> for Indentation {
    fn from(level: usize) -> Self {
        Self::Level(i64::try_from(level).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Indentation {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Indentation {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Indentation {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl Indentation {
    /// Converts this into a (possibly fractional) indentation level.
    ///
    /// # Errors
    ///
    /// - If the level is negative.
    /// - If the level is larger then [`MAX_INDENTATION_LEVEL`].
    /// - If the text contains anything other then spaces and tabs.
    pub fn to_level(&self, indent_number_of_spaces: usize) -> FmtResult<f64> {
        match self {
            Self::Level(level) => {
                if *level < 0 {
                    return Err(Error::NegativeIndentationLevel(*level));
                }
                if *level > MAX_INDENTATION_LEVEL {
                    return Err(Error::IndentationLevelTooLarge(*level));
                }
                Ok(*level as f64)
            }
            Self::Text(text) => {
                if !RE_SPACES_OR_TABS.is_match(text) {
                    return Err(Error::InvalidIndentationText(text.clone()));
                }
                let (spaces, tabs) = count_spaces_and_tabs(text);
                Ok(tabs as f64 + spaces as f64 / indent_number_of_spaces as f64)
            }
        }
    }
}

fn count_spaces_and_tabs(text: &str) -> (usize, usize) {
    text.chars().fold((0, 0), |(spaces, tabs), chr| match chr {
        ' ' => (spaces + 1, tabs),
        '\t' => (spaces, tabs + 1),
        _ => (spaces, tabs),
    })
}

/// Appends the indentation for `level` to `output`.
///
/// The fractional part of the level is written as a portion of `unit`
/// when indenting with spaces,
/// and as one more tab if it is more then half a level
/// when indenting with tabs.
pub(crate) fn write_indentation(output: &mut String, level: f64, unit: &str, use_tabs: bool) {
    let floored = level.floor();
    for _ in 0..floored as usize {
        output.push_str(unit);
    }

    let overflow = level - floored;
    if use_tabs {
        if overflow > 0.5 {
            output.push_str(unit);
        }
    } else {
        let portion = (unit.len() as f64 * overflow).round() as usize;
        output.extend(unit.chars().take(portion));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_level(indentation: impl Into<Indentation>, expected: f64) {
        let level = indentation.into().to_level(4).unwrap();
        assert!(
            (level - expected).abs() < f64::EPSILON,
            "expected {expected}, got {level}"
        );
    }

    #[test]
    fn test_levels_from_text() {
        assert_level("", 0.0);
        assert_level("    ", 1.0);
        assert_level("\t", 1.0);
        assert_level("  ", 0.5);
        assert_level("\t   ", 1.75);
        assert_level(" \t ", 1.5);
        assert_level(3, 3.0);
    }

    #[test]
    fn test_invalid_levels() {
        assert!(matches!(
            Indentation::from(-1).to_level(4),
            Err(Error::NegativeIndentationLevel(-1))
        ));
        assert!(matches!(
            Indentation::from("  a").to_level(4),
            Err(Error::InvalidIndentationText(text)) if text == "  a"
        ));
        assert!(Indentation::from(" \n").to_level(4).is_err());
    }

    #[test]
    fn test_too_large_levels() {
        assert_level(MAX_INDENTATION_LEVEL, 1024.0);
        assert!(matches!(
            Indentation::from(MAX_INDENTATION_LEVEL + 1).to_level(4),
            Err(Error::IndentationLevelTooLarge(1025))
        ));
        assert!(matches!(
            Indentation::from(usize::MAX).to_level(4),
            Err(Error::IndentationLevelTooLarge(_))
        ));
    }

    fn indentation(level: f64, unit: &str, use_tabs: bool) -> String {
        let mut output = String::new();
        write_indentation(&mut output, level, unit, use_tabs);
        output
    }

    #[test]
    fn test_write_indentation() {
        assert_eq!(indentation(0.0, "    ", false), "");
        assert_eq!(indentation(2.0, "    ", false), "        ");
        assert_eq!(indentation(0.75, "    ", false), "   ");
        assert_eq!(indentation(1.5, "  ", false), "   ");
        assert_eq!(indentation(2.0, "\t", true), "\t\t");
        assert_eq!(indentation(1.75, "\t", true), "\t\t");
        assert_eq!(indentation(1.25, "\t", true), "\t");
    }
}
