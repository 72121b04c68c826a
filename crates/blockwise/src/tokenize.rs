//! Splitting raw block text into ordered key/value fields.
//!
//! The format is line-oriented: one `key: value` pair per line, except that a
//! value opening with the triple-quote marker `"""` continues across lines
//! until a line ending with the same marker. A two-state scanner ([`State`])
//! keeps the multi-line accumulation and the line-range bookkeeping explicit
//! and auditable.
//!
//! Tokenizing knows nothing about field semantics; keys come out
//! un-normalized and values verbatim. Interpretation happens in
//! [`crate::interpret`].

use crate::error::{BlockError, Result};

/// Marker that opens and closes a multi-line value.
pub const QUOTE_MARKER: &str = "\"\"\"";

/// One key/value pair extracted from raw block text.
///
/// Transient: produced and consumed within one tokenizing pass, never
/// persisted. The key is un-normalized and the value is verbatim, including
/// any whitespace around the colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// 1-based, inclusive range of source lines this field spans.
    pub line_range: (usize, usize),
    /// The exact slice of source lines for this field, joined by `\n`.
    pub raw_content: String,
    /// Everything before the first colon, un-normalized.
    pub key: String,
    /// Everything after the first colon. For a closed multi-line value the
    /// markers are stripped; a marker that opens and closes on the same line
    /// is kept verbatim (see [`tokenize`]).
    pub value: String,
}

/// Scanner state: either between fields or inside a triple-quoted value.
#[derive(Debug)]
enum State {
    Normal,
    InQuotedValue {
        key: String,
        value: String,
        start_line: usize,
    },
}

/// Tokenize raw block text into an ordered sequence of [`Field`]s.
///
/// The returned iterator is lazy and single-pass; it fuses after yielding the
/// first error. Blank and whitespace-only lines between fields are skipped.
///
/// # Errors
///
/// Yields [`BlockError::MissingColon`] or [`BlockError::EmptyValue`] naming
/// the offending 1-based line, or [`BlockError::UnterminatedField`] when the
/// input ends inside a multi-line value.
///
/// # Quirk
///
/// A value that opens with `"""` and, right-trimmed, also closes with `"""`
/// on the same line is treated as an ordinary single-line value with the
/// markers retained verbatim. Downstream consumers rely on this, so it is
/// specified behavior rather than something to normalize away.
///
/// # Examples
///
/// ```
/// use blockwise::tokenize;
///
/// let fields: Vec<_> = tokenize("title: Standup\nnotes: daily sync")
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(fields.len(), 2);
/// assert_eq!(fields[0].key, "title");
/// assert_eq!(fields[0].value, " Standup");
/// assert_eq!(fields[0].line_range, (1, 1));
/// ```
pub fn tokenize(text: &str) -> Fields<'_> {
    Fields {
        lines: text.lines().collect(),
        next_line: 0,
        state: State::Normal,
        done: false,
    }
}

/// Iterator over the fields of one block text. Created by [`tokenize`].
#[derive(Debug)]
pub struct Fields<'a> {
    lines: Vec<&'a str>,
    /// 0-based index of the next line to scan.
    next_line: usize,
    state: State,
    done: bool,
}

impl Fields<'_> {
    fn emit(&self, key: String, value: String, start_line: usize, end_line: usize) -> Field {
        Field {
            line_range: (start_line, end_line),
            raw_content: self.lines[start_line - 1..end_line].join("\n"),
            key,
            value,
        }
    }
}

impl Iterator for Fields<'_> {
    type Item = Result<Field>;

    fn next(&mut self) -> Option<Result<Field>> {
        if self.done {
            return None;
        }

        while self.next_line < self.lines.len() {
            let line = self.lines[self.next_line];
            self.next_line += 1;
            let line_no = self.next_line;

            match &mut self.state {
                State::Normal => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    let Some((key, value)) = line.split_once(':') else {
                        self.done = true;
                        return Some(Err(BlockError::MissingColon(line_no)));
                    };

                    // Only the exactly-empty value is an error; a value of
                    // pure whitespace is accepted and preserved.
                    if value.is_empty() {
                        self.done = true;
                        return Some(Err(BlockError::EmptyValue(line_no)));
                    }

                    if let Some(opened) = value.trim_start().strip_prefix(QUOTE_MARKER) {
                        if !opened.trim_end().ends_with(QUOTE_MARKER) {
                            self.state = State::InQuotedValue {
                                key: key.to_string(),
                                value: opened.to_string(),
                                start_line: line_no,
                            };
                            continue;
                        }
                        // Opens and closes on one line: fall through and emit
                        // the whole value, markers and all.
                    }

                    return Some(Ok(self.emit(
                        key.to_string(),
                        value.to_string(),
                        line_no,
                        line_no,
                    )));
                }

                State::InQuotedValue { value, .. } => {
                    value.push('\n');
                    value.push_str(line);

                    if line.trim_end().ends_with(QUOTE_MARKER) {
                        let State::InQuotedValue {
                            key,
                            value,
                            start_line,
                        } = std::mem::replace(&mut self.state, State::Normal)
                        else {
                            unreachable!()
                        };
                        let closed = value.trim_end();
                        let closed = closed[..closed.len() - QUOTE_MARKER.len()].to_string();
                        return Some(Ok(self.emit(key, closed, start_line, line_no)));
                    }
                }
            }
        }

        if matches!(self.state, State::InQuotedValue { .. }) {
            self.done = true;
            return Some(Err(BlockError::UnterminatedField));
        }
        None
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
