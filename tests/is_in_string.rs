// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use code_block_writer::CodeBlockWriter;
#[cfg(test)]
use pretty_assertions::assert_eq;

const F: bool = false;
const T: bool = true;

/// Writes `text` one char at a time,
/// recording whether the writer is in a string
/// before the first and after each char.
fn do_test(text: &str, expected: &[bool]) {
    assert_eq!(
        text.chars().count() + 1,
        expected.len(),
        "expected values do not match the length of {text:?}"
    );
    let mut writer = CodeBlockWriter::default();
    let mut actual = vec![writer.is_in_string()];
    for chr in text.chars() {
        writer.write(&chr.to_string());
        actual.push(writer.is_in_string());
    }
    assert_eq!(actual, expected, "for {text:?}");
}

#[test]
fn test_double_quotes() {
    do_test("s\"y\"", &[F, F, T, T, F]);
}

#[test]
fn test_single_quotes() {
    do_test("s'y'", &[F, F, T, T, F]);
}

#[test]
fn test_back_ticks() {
    do_test("s`y`", &[F, F, T, T, F]);
}

#[test]
fn test_string_within_template_hole() {
    do_test("`${'t'}`", &[F, T, T, F, T, T, F, T, F]);
}

#[test]
fn test_template_within_template_hole() {
    do_test("`${`t`}`", &[F, T, T, F, T, T, F, T, F]);
}

#[test]
fn test_nested_template_holes() {
    do_test(
        "`${`${'t'}`}`",
        &[F, T, T, F, T, T, F, T, T, F, T, F, T, F],
    );
}

#[test]
fn test_escaped_template_hole() {
    do_test("`\\${t}`", &[F, T, T, T, T, T, T, F]);
}

#[test]
fn test_double_quote_within_single_quotes() {
    do_test("'\"'", &[F, T, T, F]);
}

#[test]
fn test_single_quote_within_double_quotes() {
    do_test("\"'\"", &[F, T, T, F]);
}

#[test]
fn test_quotes_within_back_ticks() {
    do_test("`'\"`", &[F, T, T, T, F]);
}

#[test]
fn test_line_comment() {
    do_test("//'t'", &[F, F, F, F, F, F]);
}

#[test]
fn test_block_comment() {
    do_test("/*'t'*/", &[F, F, F, F, F, F, F, F]);
}

#[test]
fn test_string_after_block_comment() {
    do_test("/*'t'*/'t'", &[F, F, F, F, F, F, F, F, T, T, F]);
}

#[test]
fn test_string_after_line_comment_and_new_line() {
    do_test("//'\n't'", &[F, F, F, F, F, T, T, F]);
}

#[test]
fn test_block_comment_spanning_new_line() {
    do_test("/*\n'*/'t'", &[F, F, F, F, F, F, F, T, T, F]);
}

#[test]
fn test_escaped_single_quote() {
    do_test("'\\''", &[F, T, T, T, F]);
}

#[test]
fn test_escaped_double_quote() {
    do_test("\"\\\"\"", &[F, T, T, T, F]);
}

#[test]
fn test_escaped_backslash_before_closing_quote() {
    do_test("\"\\\\\"", &[F, T, T, T, F]);
}

#[test]
fn test_escaped_backslash_then_escaped_quote() {
    do_test("'\\\\\\''", &[F, T, T, T, T, T, F]);
}

#[test]
fn test_comment_markers_within_string() {
    do_test("'//'", &[F, T, T, T, F]);
}

#[test]
fn test_quote_within_regex() {
    do_test("/'/ + 'a'", &[F, F, F, F, F, F, F, T, T, F]);
}
