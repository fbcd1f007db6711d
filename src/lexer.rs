// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Best-effort lexical bookkeeping for C-like and JS-like source text.
//!
//! This is no tokenizer.
//! It only knows enough to tell, at any point of the written text,
//! whether we are within a string literal, a comment
//! or a regular expression literal.
//! State is carried forward incrementally,
//! one written character at a time;
//! already written text is never scanned again.

/// The kind of comment the writer is currently in, if any.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    #[default]
    None,
    /// `// ...`, ends with the line.
    Line,
    /// `/* ... */`
    Block,
}

/// A character that opens (and closes) a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// `'`
    Single,
    /// `"`
    Double,
    /// `` ` ``, a template string, which may contain `${ ... }` holes.
    Backtick,
}

impl QuoteKind {
    #[must_use]
    pub const fn from_char(chr: char) -> Option<Self> {
        match chr {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            '`' => Some(Self::Backtick),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Single => '\'',
            Self::Double => '"',
            Self::Backtick => '`',
        }
    }
}

/// One entry of the stack of open string contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringContext {
    /// Within a string literal opened by this quote.
    Quote(QuoteKind),
    /// Within a `${ ... }` hole of a template string.
    /// What is written in there is code, not string content.
    Interpolation,
}

/// Characters that may change the lexical state.
/// All others are skipped, unless a regex literal is open.
const fn is_significant(chr: char) -> bool {
    matches!(
        chr,
        '/' | '\\' | '\n' | '\r' | '*' | '"' | '\'' | '`' | '{' | '}'
    )
}

/// `past_past` excludes the tail of `*/` and `//`,
/// `current` excludes the start of a comment.
fn is_regex_start(past_past: Option<char>, past: Option<char>, current: char) -> bool {
    past == Some('/')
        && current != '/'
        && current != '*'
        && past_past != Some('*')
        && past_past != Some('/')
}

#[derive(Debug, Default, Clone)]
pub struct LexicalState {
    comment: CommentKind,
    string_stack: Vec<StringContext>,
    in_regex: bool,
    /// The last char is a backslash that escapes the next one.
    escaping: bool,
    /// The last char was escaped by a backslash.
    past_escaped: bool,
}

impl LexicalState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn comment(&self) -> CommentKind {
        self.comment
    }

    #[must_use]
    pub const fn is_in_comment(&self) -> bool {
        !matches!(self.comment, CommentKind::None)
    }

    /// Whether the innermost open string context is a string literal.
    /// Inside a `${ ... }` hole we are *not* in a string,
    /// even though the hole itself sits within a template string.
    #[must_use]
    pub fn is_in_string(&self) -> bool {
        matches!(self.string_stack.last(), Some(StringContext::Quote(_)))
    }

    #[must_use]
    pub const fn is_in_regex(&self) -> bool {
        self.in_regex
    }

    /// The open string contexts, outermost first.
    #[must_use]
    pub fn string_stack(&self) -> &[StringContext] {
        &self.string_stack
    }

    /// To be called whenever a line terminator got written.
    pub fn end_line(&mut self) {
        if self.comment == CommentKind::Line {
            tracing::trace!("Line comment ended");
            self.comment = CommentKind::None;
        }
        if self.in_regex {
            tracing::trace!("Regex literal ended by a new-line");
            self.in_regex = false;
        }
        self.escaping = false;
        self.past_escaped = false;
    }

    /// Updates the state with each char of `text`,
    /// which is about to be appended to `previous`.
    pub fn feed(&mut self, previous: &str, text: &str) {
        let mut tail = previous.chars().rev();
        let mut past = tail.next();
        let mut past_past = tail.next();
        for current in text.chars() {
            self.update(past_past, past, current);
            past_past = past;
            past = Some(current);
        }
    }

    /// Updates the state for a single char.
    ///
    /// `past` is the char written right before `current`,
    /// `past_past` the one before that.
    /// Calls have to follow the order the chars are written in,
    /// as escapes are tracked across them.
    pub fn update(&mut self, past_past: Option<char>, past: Option<char>, current: char) {
        let escaped = self.escaping;
        self.update_contexts(past_past, past, current, escaped);
        self.past_escaped = escaped;
        self.escaping = current == '\\' && !escaped;
    }

    fn update_contexts(
        &mut self,
        past_past: Option<char>,
        past: Option<char>,
        current: char,
        escaped: bool,
    ) {
        if self.in_regex {
            if (past == Some('/') && !self.past_escaped) || past == Some('\n') {
                tracing::trace!("Regex literal closed");
                self.in_regex = false;
            } else {
                return;
            }
        } else if !is_significant(current) {
            return;
        } else if !self.is_in_string()
            && !self.is_in_comment()
            && is_regex_start(past_past, past, current)
        {
            tracing::trace!("Regex literal opened");
            self.in_regex = true;
            return;
        }

        if !self.is_in_string() {
            self.update_comment(past, current);
        }
        if self.is_in_comment() {
            return;
        }

        self.update_string(past, current, escaped);
    }

    fn update_comment(&mut self, past: Option<char>, current: char) {
        if past == Some('/') && current == '/' && self.comment == CommentKind::None {
            self.comment = CommentKind::Line;
        } else if past == Some('/') && current == '*' && self.comment == CommentKind::None {
            self.comment = CommentKind::Block;
        } else if past == Some('*') && current == '/' && self.comment == CommentKind::Block {
            self.comment = CommentKind::None;
        }
    }

    fn update_string(&mut self, past: Option<char>, current: char, escaped: bool) {
        let top = self.string_stack.last().copied();
        if let Some(quote) = QuoteKind::from_char(current).filter(|_| !escaped) {
            match top {
                Some(StringContext::Quote(open)) if open == quote => {
                    self.string_stack.pop();
                }
                None | Some(StringContext::Interpolation) => {
                    self.string_stack.push(StringContext::Quote(quote));
                }
                // a different quote within an open string is just content
                Some(StringContext::Quote(_)) => {}
            }
        } else if current == '{'
            && past == Some('$')
            && !self.past_escaped
            && top == Some(StringContext::Quote(QuoteKind::Backtick))
        {
            self.string_stack.push(StringContext::Interpolation);
        } else if current == '}' && top == Some(StringContext::Interpolation) {
            self.string_stack.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fed(text: &str) -> LexicalState {
        let mut state = LexicalState::new();
        state.feed("", text);
        state
    }

    #[test]
    fn test_template_string_holes() {
        let state = fed("`a${b");
        assert!(!state.is_in_string());
        assert_eq!(
            state.string_stack(),
            &[
                StringContext::Quote(QuoteKind::Backtick),
                StringContext::Interpolation
            ]
        );

        let mut state = state;
        state.feed("`a${b", "}c");
        assert!(state.is_in_string());
    }

    #[test]
    fn test_escaped_hole_is_string_content() {
        let state = fed("`\\${b");
        assert!(state.is_in_string());
        assert_eq!(state.string_stack().len(), 1);
    }

    #[test]
    fn test_state_carries_over_between_feeds() {
        let mut state = fed("a = \"b");
        assert!(state.is_in_string());
        state.feed("a = \"b", "c\";");
        assert!(!state.is_in_string());
    }

    #[test]
    fn test_comments() {
        let mut state = fed("/* a");
        assert_eq!(state.comment(), CommentKind::Block);
        state.end_line();
        assert_eq!(state.comment(), CommentKind::Block);
        state.feed("/* a", " */");
        assert_eq!(state.comment(), CommentKind::None);

        let mut state = fed("// a 'b");
        assert_eq!(state.comment(), CommentKind::Line);
        assert!(!state.is_in_string());
        state.end_line();
        assert!(!state.is_in_comment());
    }

    #[test]
    fn test_comment_markers_in_strings() {
        let state = fed("'http://example.com' + \"/*\"");
        assert!(!state.is_in_comment());
        assert!(!state.is_in_string());
    }

    #[test]
    fn test_regex_literal() {
        let mut state = fed("/\"/");
        assert!(state.is_in_regex());
        assert!(!state.is_in_string());
        state.feed("/\"/", ".test(a)");
        assert!(!state.is_in_regex());
        assert!(!state.is_in_string());
    }

    #[test]
    fn test_regex_with_escaped_slash() {
        let mut state = fed("/\\//");
        assert!(state.is_in_regex());
        state.feed("/\\//", ";");
        assert!(!state.is_in_regex());
    }

    #[test]
    fn test_escaped_backslash_before_quote() {
        let state = fed("a = \"\\\\\";");
        assert!(!state.is_in_string());
        let state = fed("a = \"\\\\\\\"");
        assert!(state.is_in_string());
        let state = fed("a = '\\\\\\\\'");
        assert!(!state.is_in_string());
    }

    #[test]
    fn test_regex_ending_in_escaped_backslash() {
        let state = fed("x = /\\\\/; y = 'a");
        assert!(!state.is_in_regex());
        assert!(state.is_in_string());
    }

    #[test]
    fn test_escape_does_not_span_lines() {
        let mut state = fed("a = \"b\\");
        state.end_line();
        state.feed("a = \"b\\\n", "\"");
        assert!(!state.is_in_string());
    }

    #[test]
    fn test_regex_ends_with_line() {
        let mut state = fed("/'");
        assert!(state.is_in_regex());
        state.end_line();
        assert!(!state.is_in_regex());
        state.feed("/'\n", "'a");
        assert!(state.is_in_string());
    }

    #[test]
    fn test_division_is_no_regex() {
        let state = fed("a / b");
        assert!(!state.is_in_regex());
        let state = fed("/* a */'");
        assert!(!state.is_in_regex());
        assert!(state.is_in_string());
    }
}
