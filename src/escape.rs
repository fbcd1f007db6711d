// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::LazyLock;

use regex::Regex;

static RE_NEW_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new("(\r?\n)").unwrap());

/// Escapes `text` for being written in between two `quote` chars:
/// each `quote` and each line break gets prefixed with a backslash.
#[must_use]
pub fn escape_for_within_string(text: &str, quote: char) -> String {
    RE_NEW_LINE
        .replace_all(&escape_char(text, quote), "\\${1}")
        .into_owned()
}

/// Prefixes each occurrence of `chr` in `text` with a backslash.
#[must_use]
pub fn escape_char(text: &str, chr: char) -> String {
    let mut output = String::with_capacity(text.len());
    for cur in text.chars() {
        if cur == chr {
            output.push('\\');
        }
        output.push(cur);
    }
    output
}
