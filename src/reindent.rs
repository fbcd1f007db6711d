// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::FmtResult;
use crate::indentation::Indentation;
use crate::options::WriterOptions;
use crate::writer::CodeBlockWriter;

/// Writes `text` through a fresh writer,
/// indenting every line by `indentation`.
///
/// Lines that start within a string literal are left untouched,
/// and line endings are normalized to the configured one.
///
/// # Errors
///
/// If the options or the indentation are invalid.
pub fn reindent(
    text: &str,
    options: &WriterOptions,
    indentation: impl Into<Indentation>,
) -> FmtResult<String> {
    let mut writer = CodeBlockWriter::new(options.clone())?;
    writer.set_indentation_level(indentation)?;
    writer.write(text);
    if writer.is_in_string() || writer.is_in_comment() {
        tracing::debug!("Input ends within a string literal or comment");
    }
    Ok(writer.into_string())
}

/// Creates a unified diff from `original` to `formatted`.
#[must_use]
pub fn diff(original: &str, formatted: &str) -> String {
    diffy::create_patch(original, formatted).to_string()
}
