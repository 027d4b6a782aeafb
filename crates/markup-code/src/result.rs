use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::MarkupError;
use crate::span::Span;

/// Name under which anonymous `[| |]` spans are recorded.
pub const ANONYMOUS: &str = "";

/// The outcome of a successful parse: the clean output text, the optional
/// cursor offset and every resolved span, all in output coordinates.
///
/// Immutable once built; only [`MarkupParser`](crate::MarkupParser) builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    input: String,
    output: String,
    cursor: Option<usize>,
    spans: BTreeMap<String, Vec<Span>>,
}

impl ParseResult {
    pub(crate) fn new(
        input: String,
        output: String,
        cursor: Option<usize>,
        spans: BTreeMap<String, Vec<Span>>,
    ) -> Self {
        Self {
            input,
            output,
            cursor,
            spans,
        }
    }

    /// The markup exactly as passed to the parser.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The input with every delimiter removed.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Output offset of the `$$` marker, if there was one.
    ///
    /// Like every offset in a result this counts UTF-8 bytes, not characters:
    /// `"日本$$語"` has its cursor at 6.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Like [`cursor`](Self::cursor), for fixtures that require a marker.
    pub fn cursor_or_err(&self) -> Result<usize, MarkupError> {
        self.cursor.ok_or(MarkupError::MissingCursor)
    }

    /// Names with at least one recorded span, in sorted order.
    ///
    /// The anonymous name `""` sorts first when present.
    pub fn span_names(&self) -> impl Iterator<Item = &str> {
        self.spans.keys().map(String::as_str)
    }

    /// Spans recorded under `name`, in the order their close delimiters were
    /// seen.
    ///
    /// Asking for a name that never appeared is an error rather than an empty
    /// slice, so a typo in a test does not silently pass.
    pub fn spans(&self, name: &str) -> Result<&[Span], MarkupError> {
        self.spans
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| MarkupError::UnknownSpanName(name.to_string()))
    }

    /// Spans recorded with `[| |]`.
    pub fn anonymous_spans(&self) -> Result<&[Span], MarkupError> {
        self.spans(ANONYMOUS)
    }

    /// Spans under `name` ordered by start, then end.
    pub fn sorted_spans(&self, name: &str) -> Result<Vec<Span>, MarkupError> {
        let mut spans = self.spans(name)?.to_vec();
        spans.sort();
        Ok(spans)
    }

    /// The slice of the output covered by `span`, or `None` if the span does
    /// not fit the output.
    pub fn text(&self, span: Span) -> Option<&str> {
        self.output.get(span.range())
    }

    /// Compares the spans recorded under `name` with `actual`, ignoring order.
    ///
    /// Duplicates count: two identical actual spans only match two identical
    /// recorded ones.
    pub fn check_spans<I>(&self, name: &str, actual: I) -> Result<(), MarkupError>
    where
        I: IntoIterator<Item = Span>,
    {
        let expected = self.sorted_spans(name)?;
        let mut actual: Vec<Span> = actual.into_iter().collect();
        actual.sort();

        if expected == actual {
            Ok(())
        } else {
            Err(MarkupError::SpanMismatch {
                name: name.to_string(),
                expected,
                actual,
            })
        }
    }
}
