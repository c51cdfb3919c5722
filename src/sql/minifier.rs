use crate::{Error, Result, sql::line_break::LineBreak};

/// Sentinel used for `previous` / `next` outside the input.
const NUL: char = '\0';

/// Scanner flags carried from one character to the next.
#[derive(Debug, Clone, Copy)]
struct ScannerState {
    previous_was_newline: bool,
    has_seen_non_whitespace: bool,
    in_single_line_comment: bool,
    /// Open `/*` markers; comments nest.
    comment_depth: usize,
}

impl Default for ScannerState {
    fn default() -> Self {
        Self {
            // Start of input behaves like the start of a line so leading blank
            // lines are dropped.
            previous_was_newline: true,
            has_seen_non_whitespace: false,
            in_single_line_comment: false,
            comment_depth: 0,
        }
    }
}

/// A simple, single pass query minifier.
///
/// Behavior:
/// - Removes `--` single line comments and `/* */` multi line comments, which
///   may nest.
/// - Collapses runs of blank or whitespace only lines into one line break.
/// - Removes leading whitespace on every line. Whitespace inside a line is
///   kept as is.
/// - Keeps every other character, including the original line break
///   characters (see [`LineBreak`]), verbatim.
///
/// Limitations:
/// - String literals are not recognised, so comment markers inside them are
///   still treated as comments.
///
/// Complexity:
/// - O(n) time, output allocated once with the input's capacity.
pub fn minify(query: &str) -> String {
    let chars = query.chars().collect::<Vec<_>>();
    let mut out = String::with_capacity(query.len());
    let mut state = ScannerState::default();
    let mut i = 0;

    while i < chars.len() {
        let previous = if i == 0 { NUL } else { chars[i - 1] };
        let current = chars[i];
        let next = chars.get(i + 1).copied().unwrap_or(NUL);

        // Entering a (possibly nested) multi line comment
        if current == '/' && next == '*' && !state.in_single_line_comment {
            state.comment_depth += 1;
            i += 2;
            continue;
        }

        // Leaving one level of multi line comment
        if state.comment_depth > 0 && previous != '/' && current == '*' && next == '/' {
            state.comment_depth -= 1;
            i += 2;
            continue;
        }

        if state.comment_depth > 0 {
            i += 1;
            continue;
        }

        if current == '-' && next == '-' {
            state.in_single_line_comment = true;
            i += 2;
            continue;
        }

        if let Some(line_break) = LineBreak::at(current, next) {
            state.in_single_line_comment = false;
            i += line_break.width();

            // Only newlines (and whitespace) since the last line break
            if state.previous_was_newline {
                continue;
            }

            state.previous_was_newline = true;
            state.has_seen_non_whitespace = false;
            out.push_str(line_break.as_str());
            continue;
        }

        i += 1;

        if state.in_single_line_comment {
            continue;
        }

        if current.is_whitespace() {
            if !state.has_seen_non_whitespace {
                continue;
            }
        } else {
            state.has_seen_non_whitespace = true;
        }

        state.previous_was_newline = false;
        out.push(current);
    }

    out
}

/// [`minify`] for callers holding optional query text.
///
/// Fails with [`Error::InvalidArgument`] when `query` is `None`.
pub fn minify_opt(query: Option<&str>) -> Result<String> {
    query
        .map(minify)
        .ok_or(Error::InvalidArgument("query must not be absent"))
}
