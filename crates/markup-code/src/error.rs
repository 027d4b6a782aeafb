use crate::kinds::Delimiter;
use crate::span::Span;

/// Everything that can go wrong while parsing markup or querying the result.
///
/// [`parse`](crate::parse) only returns `DuplicateCursorMarker`,
/// `UnmatchedSpanClose`, `EmptyNamedSpanName` and `UnterminatedSpan`. The
/// other variants come from [`ParseResult`](crate::ParseResult) queries.
///
/// Parse errors are fatal: no partial result is produced. Input offsets are
/// byte offsets into the markup, not into the output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("input has multiple occurrences of $$ (second one at offset {offset})")]
    DuplicateCursorMarker { offset: usize },

    #[error("unmatched {delimiter} at offset {offset}: {}", describe_open(.open.as_deref()))]
    UnmatchedSpanClose {
        offset: usize,
        delimiter: Delimiter,
        /// Name of the innermost open span, `Some("")` for an anonymous one,
        /// `None` when nothing is open.
        open: Option<String>,
    },

    #[error("named span at offset {offset} has no name")]
    EmptyNamedSpanName { offset: usize },

    #[error("input contains {open} span(s) with no end; innermost is {}", describe_name(.name))]
    UnterminatedSpan { open: usize, name: String },

    /// From [`ParseResult::spans`](crate::ParseResult::spans) and its callers.
    #[error("no spans recorded under {}", describe_name(.0))]
    UnknownSpanName(String),

    /// From [`ParseResult::cursor_or_err`](crate::ParseResult::cursor_or_err).
    #[error("input has no $$ cursor marker")]
    MissingCursor,

    /// From [`ParseResult::check_spans`](crate::ParseResult::check_spans).
    #[error(
        "spans under {} differ: expected {}, actual {}",
        describe_name(.name),
        format_spans(.expected),
        format_spans(.actual)
    )]
    SpanMismatch {
        name: String,
        expected: Vec<Span>,
        actual: Vec<Span>,
    },
}

fn describe_name(name: &str) -> String {
    if name.is_empty() {
        "the anonymous span".to_string()
    } else {
        format!("span `{name}`")
    }
}

fn describe_open(open: Option<&str>) -> String {
    match open {
        None => "no span is open".to_string(),
        Some(name) => format!(
            "innermost open is {}, closed by {}",
            describe_name(name),
            Delimiter::closing(!name.is_empty())
        ),
    }
}

fn format_spans(spans: &[Span]) -> String {
    let items: Vec<String> = spans.iter().map(Span::to_string).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_limited_to_markup_problems() {
        let parse_errors = [
            crate::parse("$$$$").unwrap_err(),
            crate::parse("|]").unwrap_err(),
            crate::parse("{|:|}").unwrap_err(),
            crate::parse("[|").unwrap_err(),
        ];
        for err in parse_errors {
            assert!(
                !matches!(
                    err,
                    MarkupError::UnknownSpanName(_)
                        | MarkupError::MissingCursor
                        | MarkupError::SpanMismatch { .. }
                ),
                "{err:?}"
            );
        }

        // A result without a cursor or spans is still a successful parse
        let result = crate::parse("abc").unwrap();
        assert_eq!(result.cursor_or_err(), Err(MarkupError::MissingCursor));
        assert_eq!(
            result.anonymous_spans(),
            Err(MarkupError::UnknownSpanName(String::new()))
        );
    }

    #[test]
    fn unmatched_close_messages() {
        let err = MarkupError::UnmatchedSpanClose {
            offset: 0,
            delimiter: Delimiter::SpanClose,
            open: None,
        };
        assert_eq!(err.to_string(), "unmatched |] at offset 0: no span is open");

        let err = MarkupError::UnmatchedSpanClose {
            offset: 9,
            delimiter: Delimiter::SpanClose,
            open: Some("foo".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "unmatched |] at offset 9: innermost open is span `foo`, closed by |}"
        );
    }

    #[test]
    fn unterminated_message_names_anonymous_span() {
        let err = MarkupError::UnterminatedSpan {
            open: 2,
            name: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "input contains 2 span(s) with no end; innermost is the anonymous span"
        );
    }

    #[test]
    fn mismatch_message_lists_spans() {
        let err = MarkupError::SpanMismatch {
            name: "CS0001".to_string(),
            expected: vec![Span::new(0, 3)],
            actual: vec![Span::new(0, 3), Span::new(4, 5)],
        };
        assert_eq!(
            err.to_string(),
            "spans under span `CS0001` differ: expected [[0, 3)], actual [[0, 3), [4, 5)]"
        );
    }
}
