//! # Delimiter Kinds
//!
//! The delimiter tokens of the markup language live here, not scattered in
//! parser code. The parser asks [`Delimiter::at`] what starts at the cursor;
//! it never hardcodes `$$` or `[|`.
//!
//! | Kind | Token |
//! |---|---|
//! | [`Delimiter::Cursor`] | `$$` |
//! | [`Delimiter::SpanOpen`] | `[\|` |
//! | [`Delimiter::SpanClose`] | `\|]` |
//! | [`Delimiter::NamedSpanOpen`] | `{\|` followed by `name:` |
//! | [`Delimiter::NamedSpanClose`] | `\|}` |

use std::fmt;

use crate::cursor::Cursor;

/// Terminates the name of a named span: `{|name:`.
pub const NAME_TERMINATOR: u8 = b':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Cursor,
    SpanOpen,
    SpanClose,
    NamedSpanOpen,
    NamedSpanClose,
}

impl Delimiter {
    /// Match order at each scan position. The first match wins and there is
    /// no backtracking, so `[|]` is always an open followed by a literal `]`.
    pub const PRIORITY: [Delimiter; 5] = [
        Delimiter::Cursor,
        Delimiter::SpanOpen,
        Delimiter::SpanClose,
        Delimiter::NamedSpanOpen,
        Delimiter::NamedSpanClose,
    ];

    pub const fn token(self) -> &'static [u8; 2] {
        match self {
            Delimiter::Cursor => b"$$",
            Delimiter::SpanOpen => b"[|",
            Delimiter::SpanClose => b"|]",
            Delimiter::NamedSpanOpen => b"{|",
            Delimiter::NamedSpanClose => b"|}",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Delimiter::Cursor => "$$",
            Delimiter::SpanOpen => "[|",
            Delimiter::SpanClose => "|]",
            Delimiter::NamedSpanOpen => "{|",
            Delimiter::NamedSpanClose => "|}",
        }
    }

    /// Returns the delimiter starting at the cursor, if any.
    pub fn at(cur: &Cursor<'_>) -> Option<Delimiter> {
        Self::PRIORITY
            .into_iter()
            .find(|delim| cur.starts_with(delim.token()))
    }

    /// The close delimiter accepted by a span opened with a named or
    /// anonymous open.
    pub fn closing(named: bool) -> Delimiter {
        if named {
            Delimiter::NamedSpanClose
        } else {
            Delimiter::SpanClose
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_and_strings_agree() {
        for delim in Delimiter::PRIORITY {
            assert_eq!(delim.as_str().as_bytes(), delim.token());
        }
    }

    #[test]
    fn at_finds_each_delimiter() {
        assert_eq!(Delimiter::at(&Cursor::new("$$x")), Some(Delimiter::Cursor));
        assert_eq!(Delimiter::at(&Cursor::new("[|x")), Some(Delimiter::SpanOpen));
        assert_eq!(Delimiter::at(&Cursor::new("|]x")), Some(Delimiter::SpanClose));
        assert_eq!(
            Delimiter::at(&Cursor::new("{|a:")),
            Some(Delimiter::NamedSpanOpen)
        );
        assert_eq!(
            Delimiter::at(&Cursor::new("|}x")),
            Some(Delimiter::NamedSpanClose)
        );
    }

    #[test]
    fn lone_brackets_are_not_delimiters() {
        for text in ["]", "]]", "[", "|", "||", "$", "{", "}", ":"] {
            assert_eq!(Delimiter::at(&Cursor::new(text)), None, "{text:?}");
        }
    }

    #[test]
    fn closing_matches_kind() {
        assert_eq!(Delimiter::closing(true), Delimiter::NamedSpanClose);
        assert_eq!(Delimiter::closing(false), Delimiter::SpanClose);
    }
}
