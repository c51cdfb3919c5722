//! Line terminators recognised by the minifier.
//!
//! The set includes CHARACTER TABULATION (U+0009): a tab is treated as a line
//! break, so runs of tabs collapse like blank lines.
//! CR LF is the only two-character terminator and is always kept as a pair.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineBreak {
    /// U+2028 LINE SEPARATOR
    LineSeparator,
    /// U+0009 CHARACTER TABULATION
    Tab,
    /// U+000B LINE TABULATION
    LineTab,
    /// U+000C FORM FEED
    FormFeed,
    /// U+0085 NEXT LINE
    NextLine,
    /// U+000D CARRIAGE RETURN
    CarriageReturn,
    /// U+000A LINE FEED
    LineFeed,
    /// U+000D U+000A
    CrLf,
}

impl LineBreak {
    /// Every single character that starts a line break.
    pub const CHARS: [char; 7] = [
        '\u{2028}', '\u{0009}', '\u{000B}', '\u{000C}', '\u{0085}', '\u{000D}', '\u{000A}',
    ];

    /// Classify a single character.
    pub const fn from_char(c: char) -> Option<Self> {
        use LineBreak::*;
        let lb = match c {
            '\u{2028}' => LineSeparator,
            '\u{0009}' => Tab,
            '\u{000B}' => LineTab,
            '\u{000C}' => FormFeed,
            '\u{0085}' => NextLine,
            '\u{000D}' => CarriageReturn,
            '\u{000A}' => LineFeed,
            _ => return None,
        };
        Some(lb)
    }

    /// Classify the line break starting at `current`, looking one character
    /// ahead to join CR LF.
    pub const fn at(current: char, next: char) -> Option<Self> {
        match (current, next) {
            ('\r', '\n') => Some(LineBreak::CrLf),
            (c, _) => Self::from_char(c),
        }
    }

    /// Number of characters this line break spans.
    pub const fn width(self) -> usize {
        match self {
            LineBreak::CrLf => 2,
            _ => 1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        use LineBreak::*;
        match self {
            LineSeparator => "\u{2028}",
            Tab => "\u{0009}",
            LineTab => "\u{000B}",
            FormFeed => "\u{000C}",
            NextLine => "\u{0085}",
            CarriageReturn => "\r",
            LineFeed => "\n",
            CrLf => "\r\n",
        }
    }
}

impl std::fmt::Display for LineBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_every_line_break_char() {
        for c in LineBreak::CHARS {
            let lb = LineBreak::from_char(c).expect("should be a line break");
            assert_eq!(lb.as_str(), c.to_string());
        }
    }

    #[test]
    fn rejects_other_whitespace() {
        for c in [' ', '\u{00A0}', '\u{2029}', '\u{3000}', 'a', '\0'] {
            assert!(LineBreak::from_char(c).is_none(), "{c:?} should NOT be a line break");
        }
    }

    #[test]
    fn joins_crlf() {
        assert_eq!(LineBreak::at('\r', '\n'), Some(LineBreak::CrLf));
        assert_eq!(LineBreak::at('\r', 'x'), Some(LineBreak::CarriageReturn));
        assert_eq!(LineBreak::at('\n', '\r'), Some(LineBreak::LineFeed));
        assert_eq!(LineBreak::CrLf.width(), 2);
        assert_eq!(LineBreak::CrLf.to_string(), "\r\n");
    }
}
