//! Cursor context for editor completion
//!
//! Completion only looks at the current line. The text before the cursor is
//! split on the word delimiters `,` ` ` `(` `=`; the last piece is the word
//! being typed and the lookup key for the catalog.

/// Characters separating words on an editor line
pub const WORD_DELIMITERS: [char; 4] = [',', ' ', '(', '='];

/// What the user is typing at the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineContext<'a> {
    /// Entire line, independent of the cursor
    pub line: &'a str,
    /// Line text from column 0 up to the cursor
    pub before_cursor: &'a str,
    /// Last word before the cursor (may be empty)
    pub last_word: &'a str,
}

impl<'a> LineContext<'a> {
    /// Build the context for `line` with the cursor at `column` (in characters).
    ///
    /// Columns past the end of the line clamp to the line length.
    pub fn new(line: &'a str, column: usize) -> Self {
        let before_cursor = prefix_chars(line, column);
        Self {
            line,
            before_cursor,
            last_word: extract_last_word(before_cursor),
        }
    }

    /// Context with the cursor at the end of `line`
    pub fn at_end(line: &'a str) -> Self {
        Self {
            line,
            before_cursor: line,
            last_word: extract_last_word(line),
        }
    }

    pub fn is_empty_line(&self) -> bool {
        self.line.is_empty()
    }

    /// Whether the word being typed refers to a dotted member (`console.lo`)
    pub fn is_member_access(&self) -> bool {
        self.last_word.contains('.')
    }
}

/// Last delimiter-separated piece of `text`
pub fn extract_last_word(text: &str) -> &str {
    match text.rfind(WORD_DELIMITERS) {
        Some(index) => &text[index + 1..],
        None => text,
    }
}

fn prefix_chars(line: &str, column: usize) -> &str {
    match line.char_indices().nth(column) {
        Some((byte_index, _)) => &line[..byte_index],
        None => line,
    }
}
