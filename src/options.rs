// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;

use crate::error::{Error, FmtResult};

/// The line terminator written by the writer.
///
/// Input may contain either of them;
/// output always uses the configured one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum NewLine {
    /// `"\n"`
    #[default]
    Lf,
    /// `"\r\n"`
    CrLf,
}

impl NewLine {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

impl FromStr for NewLine {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "\n" => Ok(Self::Lf),
            "\r\n" => Ok(Self::CrLf),
            _ => Err(Error::InvalidNewLine(s.to_owned())),
        }
    }
}

/// Settings of a [`crate::CodeBlockWriter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterOptions {
    /// The line terminator to write.
    pub new_line: NewLine,
    /// Number of spaces representing one level of indentation.
    /// Also used to convert spaces to levels
    /// when setting the indentation from indentation text,
    /// even if tabs are used for writing.
    pub indent_number_of_spaces: usize,
    /// Whether to indent with one tab per level instead of spaces.
    pub use_tabs: bool,
    /// Whether [`crate::CodeBlockWriter::quote`] and friends use `'`.
    /// By default, they use `"`.
    pub use_single_quote: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            new_line: NewLine::Lf,
            indent_number_of_spaces: 4,
            use_tabs: false,
            use_single_quote: false,
        }
    }
}

impl WriterOptions {
    /// The quote char used for string literals.
    #[must_use]
    pub const fn quote_char(&self) -> char {
        if self.use_single_quote { '\'' } else { '"' }
    }

    /// The text written for one level of indentation.
    #[must_use]
    pub fn indentation_text(&self) -> String {
        if self.use_tabs {
            "\t".to_owned()
        } else {
            " ".repeat(self.indent_number_of_spaces)
        }
    }

    /// Checks the options for consistency.
    ///
    /// # Errors
    ///
    /// If the number of spaces per indentation level is zero.
    pub fn validate(&self) -> FmtResult<()> {
        if self.indent_number_of_spaces == 0 {
            return Err(Error::InvalidIndentWidth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_from_str() {
        assert_eq!("\n".parse::<NewLine>().ok(), Some(NewLine::Lf));
        assert_eq!("\r\n".parse::<NewLine>().ok(), Some(NewLine::CrLf));
        assert!(matches!(
            "\r".parse::<NewLine>(),
            Err(Error::InvalidNewLine(nl)) if nl == "\r"
        ));
        assert!("\n\n".parse::<NewLine>().is_err());
    }

    #[test]
    fn test_indentation_text() {
        assert_eq!(WriterOptions::default().indentation_text(), "    ");
        let options = WriterOptions {
            indent_number_of_spaces: 2,
            ..WriterOptions::default()
        };
        assert_eq!(options.indentation_text(), "  ");
        let options = WriterOptions {
            use_tabs: true,
            ..WriterOptions::default()
        };
        assert_eq!(options.indentation_text(), "\t");
    }

    #[test]
    fn test_validate() {
        assert!(WriterOptions::default().validate().is_ok());
        let options = WriterOptions {
            indent_number_of_spaces: 0,
            ..WriterOptions::default()
        };
        assert!(matches!(options.validate(), Err(Error::InvalidIndentWidth)));
    }
}
