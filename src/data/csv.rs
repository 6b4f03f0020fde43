//! Tokenizer for the datastore query-result encoding
//!
//! The backend streams query results as delimited text with RFC-4180-like
//! quoting. This module turns one response body into a [`DelimitedTable`].
//!
//! Decoding rules:
//! - A field may be wrapped in double quotes; `""` inside a quoted field is a literal `"`
//! - CR, LF and CRLF outside quotes end the current row
//! - The delimiter outside quotes ends the current field
//! - Malformed input never fails: an unterminated quote runs to end of input,
//!   and text after a closing quote or after a stray `"` in a bare field is
//!   dropped up to the next delimiter or row terminator
//!
//! The table always starts with one row, so empty input decodes to `[[""]]`.
//! A trailing row terminator does not produce an extra empty row, but an
//! explicit final field (`a\n""`) is kept.

use serde::Serialize;
use std::iter::Peekable;
use std::str::Chars;
use tracing::trace;

/// Default field delimiter used by the query endpoint
pub const DEFAULT_DELIMITER: char = ',';

const QUOTE: char = '"';

/// Rows of string fields decoded from one response body
///
/// Rows may have different field counts; the table is not schema-validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DelimitedTable {
    rows: Vec<Vec<String>>,
}

impl DelimitedTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<String>> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

impl IntoIterator for DelimitedTable {
    type Item = Vec<String>;
    type IntoIter = std::vec::IntoIter<Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a DelimitedTable {
    type Item = &'a Vec<String>;
    type IntoIter = std::slice::Iter<'a, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing consumed for the current field yet
    FieldStart,
    /// Inside `"..."`
    InQuotedField,
    /// Consuming a bare field
    InUnquotedField,
    /// Discarding input until the next delimiter or row terminator
    SkipToSeparator,
}

/// Tokenize `text` using the default comma delimiter
pub fn tokenize(text: &str) -> DelimitedTable {
    tokenize_with_delimiter(text, DEFAULT_DELIMITER)
}

/// Tokenize `text` into rows of fields split on `delimiter`
///
/// The delimiter is checked before quotes and line terminators, so a
/// delimiter of `"` or `\n` takes precedence over their usual meaning.
pub fn tokenize_with_delimiter(text: &str, delimiter: char) -> DelimitedTable {
    let mut tokenizer = Tokenizer::new(text.chars().peekable(), delimiter);
    tokenizer.run();
    let ended_on_terminator = tokenizer.ended_on_terminator;
    let mut rows = tokenizer.finish();

    if ended_on_terminator {
        trim_trailing_empty_row(&mut rows);
    }

    trace!(rows = rows.len(), bytes = text.len(), "tokenized delimited text");
    DelimitedTable { rows }
}

struct Tokenizer<'a> {
    input: Peekable<Chars<'a>>,
    delimiter: char,
    state: State,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    field: String,
    ended_on_terminator: bool,
}

impl<'a> Tokenizer<'a> {
    fn new(input: Peekable<Chars<'a>>, delimiter: char) -> Self {
        Self {
            input,
            delimiter,
            state: State::FieldStart,
            rows: Vec::new(),
            row: Vec::new(),
            field: String::new(),
            ended_on_terminator: false,
        }
    }

    fn run(&mut self) {
        while let Some(c) = self.input.next() {
            self.ended_on_terminator = false;
            match self.state {
                State::InQuotedField => self.quoted(c),
                State::SkipToSeparator => self.skip(c),
                State::FieldStart | State::InUnquotedField => self.unquoted(c),
            }
        }
    }

    fn quoted(&mut self, c: char) {
        if c != QUOTE {
            self.field.push(c);
            return;
        }
        if self.input.peek() == Some(&QUOTE) {
            self.input.next();
            self.field.push(QUOTE);
        } else {
            self.state = State::SkipToSeparator;
        }
    }

    fn skip(&mut self, c: char) {
        if c == self.delimiter || c == '\r' || c == '\n' {
            self.unquoted(c);
        }
    }

    fn unquoted(&mut self, c: char) {
        if c == self.delimiter {
            self.end_field();
        } else if c == '\r' || c == '\n' {
            if c == '\r' && self.input.peek() == Some(&'\n') {
                self.input.next();
            }
            self.end_row();
            self.ended_on_terminator = true;
        } else if c == QUOTE {
            self.state = match self.state {
                State::FieldStart => State::InQuotedField,
                _ => State::SkipToSeparator,
            };
        } else {
            self.field.push(c);
            self.state = State::InUnquotedField;
        }
    }

    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
        self.state = State::FieldStart;
    }

    fn end_row(&mut self) {
        self.end_field();
        self.rows.push(std::mem::take(&mut self.row));
    }

    fn finish(mut self) -> Vec<Vec<String>> {
        self.end_row();
        self.rows
    }
}

/// Drop the spurious row produced by a trailing terminator (`"a,b\n"`).
///
/// Only called when the input ended on a terminator. A lone `[""]` table is
/// kept: it is the decoding of empty input.
fn trim_trailing_empty_row(rows: &mut Vec<Vec<String>>) {
    let trailing_empty = matches!(rows.last(), Some(last) if last.len() == 1 && last[0].is_empty());
    if rows.len() > 1 && trailing_empty {
        rows.pop();
    }
}
