use std::collections::BTreeMap;

use crate::{
    cursor::Cursor,
    error::MarkupError,
    kinds::{Delimiter, NAME_TERMINATOR},
    result::{ANONYMOUS, ParseResult},
    span::Span,
};

/// A span whose open delimiter has been seen but not its close.
#[derive(Debug)]
struct OpenSpan {
    /// Output offset at the open delimiter.
    start: usize,
    /// Empty for anonymous spans.
    name: String,
}

impl OpenSpan {
    fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// Reusable markup scanner.
///
/// Every call to [`parse`](Self::parse) starts from empty buffers, so one
/// parser can serve many fixtures. Taking `&mut self` keeps a single instance
/// from being used by two callers at once.
#[derive(Debug, Default)]
pub struct MarkupParser {
    output: String,
    cursor: Option<usize>,
    stack: Vec<OpenSpan>,
    spans: BTreeMap<String, Vec<Span>>,
}

impl MarkupParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `input` in a single left-to-right pass.
    ///
    /// At each position the delimiters are tried in [`Delimiter::PRIORITY`]
    /// order using two bytes of lookahead. Anything that is not a delimiter
    /// is copied to the output unchanged.
    pub fn parse(&mut self, input: &str) -> Result<ParseResult, MarkupError> {
        self.reset();

        let mut cur = Cursor::new(input);
        let mut text_start = cur.pos();

        while !cur.eof() {
            let Some(delim) = Delimiter::at(&cur) else {
                cur.bump();
                continue;
            };

            let offset = cur.pos();
            self.output.push_str(&input[text_start..offset]);
            cur.bump_n(delim.token().len());
            self.apply(delim, offset, &mut cur)?;
            text_start = cur.pos();
        }

        self.output.push_str(&input[text_start..]);

        if let Some(innermost) = self.stack.last() {
            return Err(MarkupError::UnterminatedSpan {
                open: self.stack.len(),
                name: innermost.name.clone(),
            });
        }

        log::debug!(
            "parsed markup: {} bytes in, {} bytes out, cursor {:?}, {} span name(s)",
            input.len(),
            self.output.len(),
            self.cursor,
            self.spans.len()
        );

        Ok(ParseResult::new(
            input.to_string(),
            std::mem::take(&mut self.output),
            self.cursor.take(),
            std::mem::take(&mut self.spans),
        ))
    }

    fn reset(&mut self) {
        self.output.clear();
        self.cursor = None;
        self.stack.clear();
        self.spans.clear();
    }

    /// Handles one delimiter. `offset` is its position in the input and the
    /// cursor already sits just past its two bytes.
    fn apply(
        &mut self,
        delim: Delimiter,
        offset: usize,
        cur: &mut Cursor<'_>,
    ) -> Result<(), MarkupError> {
        match delim {
            Delimiter::Cursor => {
                if self.cursor.is_some() {
                    return Err(MarkupError::DuplicateCursorMarker { offset });
                }
                log::trace!("cursor marker at output offset {}", self.output.len());
                self.cursor = Some(self.output.len());
            }
            Delimiter::SpanOpen => self.open(ANONYMOUS.to_string()),
            Delimiter::NamedSpanOpen => {
                if cur.peek() == Some(NAME_TERMINATOR) {
                    return Err(MarkupError::EmptyNamedSpanName { offset });
                }
                // Without a terminator the rest of the input becomes the name
                // and the marker stays open, surfacing as UnterminatedSpan.
                let (name, terminated) = cur.take_until(NAME_TERMINATOR);
                if !terminated {
                    log::trace!("named span at input offset {offset} has no `:`");
                }
                self.open(name.to_string());
            }
            Delimiter::SpanClose | Delimiter::NamedSpanClose => self.close(delim, offset)?,
        }
        Ok(())
    }

    fn open(&mut self, name: String) {
        log::trace!("open span {name:?} at output offset {}", self.output.len());
        self.stack.push(OpenSpan {
            start: self.output.len(),
            name,
        });
    }

    fn close(&mut self, delim: Delimiter, offset: usize) -> Result<(), MarkupError> {
        let named = delim == Delimiter::NamedSpanClose;
        // A mismatch is fatal, so the popped marker is never pushed back.
        let OpenSpan { start, name } = match self.stack.pop() {
            Some(top) if top.is_named() == named => top,
            top => {
                return Err(MarkupError::UnmatchedSpanClose {
                    offset,
                    delimiter: delim,
                    open: top.map(|open| open.name),
                });
            }
        };

        let span = Span::new(start, self.output.len());
        log::trace!("close span {name:?} as {span}");
        self.spans.entry(name).or_default().push(span);
        Ok(())
    }
}

/// Parses `input` with a fresh [`MarkupParser`].
pub fn parse(input: &str) -> Result<ParseResult, MarkupError> {
    MarkupParser::new().parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_plain_text() {
        let result = parse("hello world").unwrap();
        assert_eq!(result.output(), "hello world");
        assert_eq!(result.cursor(), None);
        assert_eq!(result.span_names().count(), 0);
    }

    #[test]
    fn parse_empty_input() {
        let result = parse("").unwrap();
        assert_eq!(result.output(), "");
        assert_eq!(result.cursor(), None);
    }

    #[test]
    fn parse_cursor() {
        let result = parse("ab$$c").unwrap();
        assert_eq!(result.output(), "abc");
        assert_eq!(result.cursor(), Some(2));
    }

    #[test]
    fn parse_anonymous_span() {
        let result = parse("[|abc|]").unwrap();
        assert_eq!(result.output(), "abc");
        assert_eq!(result.anonymous_spans().unwrap(), &[Span::new(0, 3)]);
    }

    #[test]
    fn parse_named_span() {
        let result = parse("{|foo:abc|}").unwrap();
        assert_eq!(result.output(), "abc");
        assert_eq!(result.span_names().collect::<Vec<_>>(), vec!["foo"]);
        assert_eq!(result.spans("foo").unwrap(), &[Span::new(0, 3)]);
    }

    #[test]
    fn inner_span_closes_first() {
        let result = parse("[|a[|b|]c|]").unwrap();
        assert_eq!(
            result.anonymous_spans().unwrap(),
            &[Span::new(1, 2), Span::new(0, 3)]
        );
    }

    #[test]
    fn trailing_single_byte_is_literal() {
        let result = parse("ab$").unwrap();
        assert_eq!(result.output(), "ab$");
        assert_eq!(result.cursor(), None);
    }

    #[test]
    fn duplicate_cursor_reports_input_offset() {
        assert_eq!(
            parse("$$a$$").unwrap_err(),
            MarkupError::DuplicateCursorMarker { offset: 3 }
        );
    }

    #[test]
    fn anonymous_close_with_named_top() {
        assert_eq!(
            parse("{|foo:abc|]").unwrap_err(),
            MarkupError::UnmatchedSpanClose {
                offset: 9,
                delimiter: Delimiter::SpanClose,
                open: Some("foo".to_string()),
            }
        );
    }

    #[test]
    fn named_close_with_anonymous_top() {
        assert_eq!(
            parse("[|abc|}").unwrap_err(),
            MarkupError::UnmatchedSpanClose {
                offset: 5,
                delimiter: Delimiter::NamedSpanClose,
                open: Some(String::new()),
            }
        );
    }

    #[test]
    fn named_close_with_empty_stack() {
        assert_eq!(
            parse("abc|}").unwrap_err(),
            MarkupError::UnmatchedSpanClose {
                offset: 3,
                delimiter: Delimiter::NamedSpanClose,
                open: None,
            }
        );
    }

    #[test]
    fn missing_name_terminator_is_unterminated() {
        assert_eq!(
            parse("abc{|foo").unwrap_err(),
            MarkupError::UnterminatedSpan {
                open: 1,
                name: "foo".to_string(),
            }
        );
    }

    #[test]
    fn named_open_at_end_of_input_is_unterminated() {
        assert!(matches!(
            parse("abc{|").unwrap_err(),
            MarkupError::UnterminatedSpan { open: 1, .. }
        ));
    }

    #[test]
    fn reused_parser_starts_clean() {
        let mut parser = MarkupParser::new();

        let first = parser.parse("{|a:x|}$$").unwrap();
        assert!(parser.parse("[|oops").is_err());
        let second = parser.parse("[|y|]").unwrap();

        assert_eq!(first.cursor(), Some(1));
        assert_eq!(second.output(), "y");
        assert_eq!(second.cursor(), None);
        assert_eq!(second.span_names().collect::<Vec<_>>(), vec![""]);
        assert!(second.spans("a").is_err());
    }

    #[test]
    fn multibyte_text_keeps_byte_offsets() {
        let result = parse("é[|ü|]$$").unwrap();
        assert_eq!(result.output(), "éü");
        let span = result.anonymous_spans().unwrap()[0];
        assert_eq!(span, Span::new(2, 4));
        assert_eq!(result.text(span), Some("ü"));
        assert_eq!(result.cursor(), Some(4));
    }

    #[test]
    fn cursor_after_multibyte_text_counts_bytes() {
        let result = parse("日本$$語").unwrap();
        assert_eq!(result.output(), "日本語");
        assert_eq!(result.cursor(), Some(6));
        assert_eq!(&result.output()[..6], "日本");
    }
}
