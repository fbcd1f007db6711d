// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::FmtResult;
use crate::escape::escape_for_within_string;
use crate::indentation::{self, Indentation};
use crate::lexer::{CommentKind, LexicalState};
use crate::options::WriterOptions;

static RE_NEW_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new("\r?\n").unwrap());

#[derive(Debug, Clone, Copy)]
struct IndentationState {
    current: f64,
    queued: Option<f64>,
}

/// Writes code, taking care of indentation and blocks.
///
/// Text is written incrementally.
/// Each line gets indented to the current indentation level,
/// unless it starts within a string literal,
/// in which case it is written exactly as given.
///
/// ```
/// use code_block_writer::CodeBlockWriter;
///
/// let mut writer = CodeBlockWriter::default();
/// writer.write("if (a)").block(|w| {
///     w.write_line("b();");
/// });
/// assert_eq!(writer.as_str(), "if (a) {\n    b();\n}");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBlockWriter {
    options: WriterOptions,
    indentation_text: String,
    text: String,
    lexical: LexicalState,
    current_indentation: f64,
    queued_indentation: Option<f64>,
    new_line_on_next_write: bool,
    is_on_first_line_of_block: bool,
}

impl Default for CodeBlockWriter {
    fn default() -> Self {
        Self::from_valid_options(WriterOptions::default())
    }
}

impl CodeBlockWriter {
    /// Creates an empty writer.
    ///
    /// # Errors
    ///
    /// If the options are inconsistent,
    /// see [`WriterOptions::validate`].
    pub fn new(options: WriterOptions) -> FmtResult<Self> {
        options.validate()?;
        Ok(Self::from_valid_options(options))
    }

    fn from_valid_options(options: WriterOptions) -> Self {
        Self {
            indentation_text: options.indentation_text(),
            options,
            text: String::new(),
            lexical: LexicalState::new(),
            current_indentation: 0.0,
            queued_indentation: None,
            new_line_on_next_write: false,
            is_on_first_line_of_block: false,
        }
    }

    /// The options this writer was created with.
    #[must_use]
    pub const fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Queues the indentation level for the lines following the next line break.
    ///
    /// # Errors
    ///
    /// If the level is negative or too large,
    /// or the indentation text contains anything but spaces and tabs.
    pub fn queue_indentation_level(
        &mut self,
        indentation: impl Into<Indentation>,
    ) -> FmtResult<&mut Self> {
        let level = indentation
            .into()
            .to_level(self.options.indent_number_of_spaces)?;
        tracing::trace!("Queued indentation level {level}");
        self.queued_indentation = Some(level);
        Ok(self)
    }

    /// Sets the current indentation level.
    ///
    /// # Errors
    ///
    /// If the level is negative or too large,
    /// or the indentation text contains anything but spaces and tabs.
    pub fn set_indentation_level(
        &mut self,
        indentation: impl Into<Indentation>,
    ) -> FmtResult<&mut Self> {
        let level = indentation
            .into()
            .to_level(self.options.indent_number_of_spaces)?;
        tracing::trace!("Set indentation level {level}");
        self.current_indentation = level;
        Ok(self)
    }

    /// The whole number part of the current indentation level.
    #[must_use]
    pub fn indentation_level(&self) -> usize {
        self.current_indentation.floor() as usize
    }

    /// Writes the text within `body` with hanging indentation,
    /// meaning only lines after the next line break are indented one more level.
    ///
    /// Nested calls before that line break indent only once.
    pub fn with_hanging_indentation(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        let level = (self.indentation_level() + 1) as f64;
        self.with_queued_indentation_level(level, body)
    }

    fn with_queued_indentation_level(
        &mut self,
        level: f64,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        let previous = self.indentation_state();
        self.queued_indentation = Some(level);
        body(self);
        self.set_indentation_state(previous);
        self
    }

    const fn indentation_state(&self) -> IndentationState {
        IndentationState {
            current: self.current_indentation,
            queued: self.queued_indentation,
        }
    }

    const fn set_indentation_state(&mut self, state: IndentationState) {
        self.current_indentation = state.current;
        self.queued_indentation = state.queued;
    }

    /// Writes a block using braces,
    /// separated from preceding text by a space.
    ///
    /// Whatever gets written after the block starts on a new line.
    pub fn block(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        if !self.text.is_empty() && !self.is_last_new_line() {
            self.space_if_last_not();
        }
        self.inline_block(body);
        self.new_line_on_next_write = true;
        self
    }

    /// Writes a block with nothing but braces.
    pub fn empty_block(&mut self) -> &mut Self {
        self.block(|_| {})
    }

    /// Writes a block with braces,
    /// right where the writer is at.
    pub fn inline_block(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        self.write("{");
        self.indent_block_internal(body);
        self.new_line_if_last_not().write("}");
        self
    }

    /// Indents the text written in `body` by one level.
    pub fn indent_block(&mut self, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.indent_block_internal(body);
        if !self.is_last_new_line() {
            self.new_line_on_next_write = true;
        }
        self
    }

    fn indent_block_internal(&mut self, body: impl FnOnce(&mut Self)) {
        if self.last_char().is_some() {
            self.new_line_if_last_not();
        }
        self.current_indentation += 1.0;
        self.is_on_first_line_of_block = true;
        body(self);
        self.is_on_first_line_of_block = false;
        self.current_indentation = (self.current_indentation - 1.0).max(0.0);
    }

    /// Writes a line of text, starting on a new line if necessary.
    pub fn write_line(&mut self, text: &str) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        if !self.text.is_empty() {
            self.new_line_if_last_not();
        }
        self.write_indenting_new_lines(text);
        self.new_line()
    }

    /// Writes a line of text if `condition` holds.
    pub fn conditional_write_line(&mut self, condition: bool, text: &str) -> &mut Self {
        if condition {
            self.write_line(text);
        }
        self
    }

    /// Like [`Self::conditional_write_line`],
    /// but the text is only produced if needed.
    pub fn conditional_write_line_with(
        &mut self,
        condition: bool,
        text: impl FnOnce() -> String,
    ) -> &mut Self {
        if condition {
            self.write_line(&text());
        }
        self
    }

    /// Writes a new-line if the last written text was not one.
    pub fn new_line_if_last_not(&mut self) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        if !self.is_last_new_line() {
            self.new_line();
        }
        self
    }

    /// Writes a blank line if the last written text was not one.
    pub fn blank_line_if_last_not(&mut self) -> &mut Self {
        if !self.is_last_blank_line() {
            self.blank_line();
        }
        self
    }

    /// Writes a blank line if `condition` holds.
    pub fn conditional_blank_line(&mut self, condition: bool) -> &mut Self {
        if condition {
            self.blank_line();
        }
        self
    }

    /// Ends the current line, if any, and writes an empty one.
    pub fn blank_line(&mut self) -> &mut Self {
        self.new_line_if_last_not().new_line()
    }

    /// Indents the current line by `times` levels.
    pub fn indent(&mut self, times: usize) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        for _ in 0..times {
            let unit = self.indentation_text.clone();
            self.write(&unit);
        }
        self
    }

    /// Writes a new-line if `condition` holds.
    pub fn conditional_new_line(&mut self, condition: bool) -> &mut Self {
        if condition {
            self.new_line();
        }
        self
    }

    /// Writes the configured line terminator.
    pub fn new_line(&mut self) -> &mut Self {
        self.new_line_on_next_write = false;
        self.base_write_new_line();
        self
    }

    /// Writes the configured quote char.
    pub fn quote(&mut self) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        let quote = self.options.quote_char();
        self.write_indenting_new_lines(quote.encode_utf8(&mut [0; 4]));
        self
    }

    /// Writes `text` as a string literal,
    /// quoted and escaped with the configured quote char.
    pub fn quote_text(&mut self, text: &str) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        let quote = self.options.quote_char();
        let literal = format!("{quote}{}{quote}", escape_for_within_string(text, quote));
        self.write_indenting_new_lines(&literal);
        self
    }

    /// Writes a space if the last written char was not one.
    pub fn space_if_last_not(&mut self) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        if !self.is_last_space() {
            self.write_indenting_new_lines(" ");
        }
        self
    }

    /// Writes `times` spaces.
    pub fn space(&mut self, times: usize) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        self.write_indenting_new_lines(&" ".repeat(times));
        self
    }

    /// Writes a tab if the last written char was not one.
    pub fn tab_if_last_not(&mut self) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        if !self.is_last_tab() {
            self.write_indenting_new_lines("\t");
        }
        self
    }

    /// Writes `times` tabs.
    pub fn tab(&mut self, times: usize) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        self.write_indenting_new_lines(&"\t".repeat(times));
        self
    }

    /// Writes `text` if `condition` holds.
    pub fn conditional_write(&mut self, condition: bool, text: &str) -> &mut Self {
        if condition {
            self.write(text);
        }
        self
    }

    /// Like [`Self::conditional_write`],
    /// but the text is only produced if needed.
    pub fn conditional_write_with(
        &mut self,
        condition: bool,
        text: impl FnOnce() -> String,
    ) -> &mut Self {
        if condition {
            self.write(&text());
        }
        self
    }

    /// Writes `text`, indenting each line it starts.
    pub fn write(&mut self, text: &str) -> &mut Self {
        self.new_line_if_new_line_on_next_write();
        self.write_indenting_new_lines(text);
        self
    }

    /// Writes what is required to leave the current comment, if any.
    pub fn close_comment(&mut self) -> &mut Self {
        match self.lexical.comment() {
            CommentKind::Line => {
                self.new_line();
            }
            CommentKind::Block => {
                if !self.is_last_new_line() {
                    self.space_if_last_not();
                }
                self.write("*/");
            }
            CommentKind::None => {}
        }
        self
    }

    /// The length of the written text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether nothing was written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the text ends within a line or block comment.
    #[must_use]
    pub const fn is_in_comment(&self) -> bool {
        self.lexical.is_in_comment()
    }

    /// Whether the text ends within a string or template literal.
    #[must_use]
    pub fn is_in_string(&self) -> bool {
        self.lexical.is_in_string()
    }

    /// Whether the text ends within a regex literal.
    #[must_use]
    pub const fn is_in_regex(&self) -> bool {
        self.lexical.is_in_regex()
    }

    /// Whether the writer is at the start of the first line
    /// of the text, block or indentation block.
    #[must_use]
    pub fn is_at_start_of_first_line_of_block(&self) -> bool {
        self.is_on_first_line_of_block() && (self.is_last_new_line() || self.text.is_empty())
    }

    /// Whether the writer is on the first line
    /// of the text, block or indentation block.
    #[must_use]
    pub const fn is_on_first_line_of_block(&self) -> bool {
        self.is_on_first_line_of_block
    }

    /// Whether the last written char is a line feed.
    #[must_use]
    pub fn is_last_new_line(&self) -> bool {
        self.last_char() == Some('\n')
    }

    /// Whether the text ends in an empty line,
    /// meaning the last two line terminators are not separated
    /// by anything but carriage returns.
    #[must_use]
    pub fn is_last_blank_line(&self) -> bool {
        let mut found_count = 0;
        for chr in self.text.chars().rev() {
            match chr {
                '\n' => {
                    found_count += 1;
                    if found_count == 2 {
                        return true;
                    }
                }
                '\r' => {}
                _ => return false,
            }
        }
        false
    }

    /// Whether the last written char is a space.
    #[must_use]
    pub fn is_last_space(&self) -> bool {
        self.last_char() == Some(' ')
    }

    /// Whether the last written char is a tab.
    #[must_use]
    pub fn is_last_tab(&self) -> bool {
        self.last_char() == Some('\t')
    }

    /// The last written char, if any.
    #[must_use]
    pub fn last_char(&self) -> Option<char> {
        self.text.chars().next_back()
    }

    /// The text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Consumes the writer, returning the written text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    fn is_at_start_of_line(&self) -> bool {
        self.text.is_empty() || self.is_last_new_line()
    }

    fn write_indenting_new_lines(&mut self, text: &str) {
        if text.is_empty() {
            self.write_individual("");
            return;
        }

        for (idx, item) in RE_NEW_LINE.split(text).enumerate() {
            if idx > 0 {
                self.base_write_new_line();
            }
            if !item.is_empty() {
                self.write_individual(item);
            }
        }
    }

    fn write_individual(&mut self, part: &str) {
        if !self.lexical.is_in_string() && self.is_at_start_of_line() {
            indentation::write_indentation(
                &mut self.text,
                self.current_indentation,
                &self.indentation_text,
                self.options.use_tabs,
            );
        }
        self.lexical.feed(&self.text, part);
        self.text.push_str(part);
    }

    fn base_write_new_line(&mut self) {
        self.lexical.end_line();
        self.text.push_str(self.options.new_line.as_str());
        self.is_on_first_line_of_block = false;
        self.dequeue_queued_indentation();
    }

    fn dequeue_queued_indentation(&mut self) {
        if let Some(queued) = self.queued_indentation.take() {
            self.current_indentation = queued;
        }
    }

    fn new_line_if_new_line_on_next_write(&mut self) {
        if self.new_line_on_next_write {
            self.new_line();
        }
    }
}

impl fmt::Write for CodeBlockWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}

impl fmt::Display for CodeBlockWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
