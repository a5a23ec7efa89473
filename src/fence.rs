//! Fenced code block removal.
//!
//! Link-like text inside code samples must never be checked, so fenced
//! regions are dropped before extraction. This is a line-level state machine,
//! not a markdown parser: a fence opens on any line starting with three
//! backticks or three tildes and closes on the next marker line of the same
//! family, whatever its length or info string.

/// Which marker character opened a fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceFamily {
    /// Three or more backticks.
    Backtick,
    /// Three or more tildes.
    Tilde,
}

impl FenceFamily {
    /// Detect a fence marker at the start of a line, ignoring leading whitespace.
    fn detect(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            return Some(Self::Backtick);
        }
        if trimmed.starts_with("~~~") {
            return Some(Self::Tilde);
        }
        return None;
    }
}

/// Position of the scanner relative to fenced blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceState {
    /// Inside a fence opened by the given family.
    Inside(FenceFamily),
    /// In ordinary markdown text.
    Outside,
}

impl FenceState {
    /// Advance past one line. Returns the next state and whether the line is kept.
    ///
    /// Marker lines are never kept. Inside a fence, a marker of the other
    /// family is treated as content and leaves the fence open.
    fn advance(self, line: &str) -> (Self, bool) {
        return match (self, FenceFamily::detect(line)) {
            (Self::Outside, None) => (Self::Outside, true),
            (Self::Outside, Some(family)) => (Self::Inside(family), false),
            (Self::Inside(open), Some(family)) if open == family => (Self::Outside, false),
            (inside @ Self::Inside(_), _) => (inside, false),
        };
    }
}

/// Document text with fenced regions removed.
///
/// Kept lines are joined with `\n`. Line numbers do not line up with the
/// original text, so the original number of every kept line is recorded
/// alongside the byte offset where that line starts in `text`.
#[derive(Debug)]
pub struct StrippedText {
    /// One-based original line number for each kept line, in order.
    line_numbers: Vec<usize>,
    /// Byte offset in `text` where each kept line starts, ascending.
    line_starts: Vec<usize>,
    /// The kept lines joined with `\n`.
    pub text: String,
}

impl StrippedText {
    /// Map a byte offset in `text` back to its one-based line in the original document.
    pub fn original_line(&self, offset: usize) -> usize {
        let index = self
            .line_starts
            .partition_point(|&start| return start <= offset)
            .saturating_sub(1);
        return self.line_numbers.get(index).copied().unwrap_or(1);
    }
}

/// Whether `ch` ends a line.
///
/// Besides `\n` and `\r` this accepts vertical tab, form feed, the file, group
/// and record separators, NEL, and the Unicode line and paragraph separators.
const fn is_line_break(ch: char) -> bool {
    return matches!(
        ch,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    );
}

/// Split into lines without their terminators.
///
/// `\r\n` is one break and a lone `\r` is another, so CR-only files split
/// like any other. A trailing break does not add an empty last line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((at, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(text.get(start..at).unwrap_or_default());
        start = at.saturating_add(ch.len_utf8());
        if ch == '\r' && chars.next_if(|&(_, next)| return next == '\n').is_some() {
            start = start.saturating_add(1);
        }
    }
    if start < text.len() {
        lines.push(text.get(start..).unwrap_or_default());
    }

    return lines;
}

/// Remove every fenced code block, marker lines included.
///
/// An unterminated fence swallows the rest of the document.
pub fn strip_fences(text: &str) -> StrippedText {
    let mut state = FenceState::Outside;
    let mut stripped = String::with_capacity(text.len());
    let mut line_numbers = Vec::new();
    let mut line_starts = Vec::new();

    for (number, line) in (1_usize..).zip(split_lines(text)) {
        let (next, keep) = state.advance(line);
        state = next;
        if keep {
            if !line_starts.is_empty() {
                stripped.push('\n');
            }
            line_starts.push(stripped.len());
            line_numbers.push(number);
            stripped.push_str(line);
        }
    }

    return StrippedText {
        line_numbers,
        line_starts,
        text: stripped,
    };
}
