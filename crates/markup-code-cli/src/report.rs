use crossterm::style::Stylize;
use markup_code::{ParseResult, Span};

/// Shown in coloured output where the `$$` marker was.
const CURSOR_GLYPH: &str = "│";

#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub color: bool,
    pub show_input: bool,
}

/// Renders a human-readable report: the clean output, the cursor and every
/// span with the text it covers.
pub fn render_text(result: &ParseResult, options: ReportOptions) -> String {
    let mut lines = Vec::new();

    if options.show_input {
        lines.push("input:".to_string());
        lines.push(result.input().to_string());
        lines.push(String::new());
    }

    lines.push("output:".to_string());
    if options.color {
        lines.push(highlight_output(result));
    } else {
        lines.push(result.output().to_string());
    }
    lines.push(String::new());

    match result.cursor() {
        Some(offset) => lines.push(format!("cursor: {offset}")),
        None => lines.push("cursor: none".to_string()),
    }

    if result.span_names().next().is_none() {
        lines.push("spans: none".to_string());
    } else {
        lines.push("spans:".to_string());
        for name in result.span_names() {
            let label = if name.is_empty() { "(anonymous)" } else { name };
            for span in result.sorted_spans(name).unwrap_or_default() {
                let text = result.text(span).unwrap_or_default();
                lines.push(format!("  {label} {span} {text:?}"));
            }
        }
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

pub fn render_json(result: &ParseResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// The output text with every covered byte range underlined and the cursor
/// drawn in reverse video.
fn highlight_output(result: &ParseResult) -> String {
    let output = result.output();
    let cursor = result.cursor();
    let spans: Vec<Span> = result
        .span_names()
        .flat_map(|name| result.spans(name).unwrap_or_default().iter().copied())
        .collect();

    let mut bounds: Vec<usize> = spans
        .iter()
        .flat_map(|span| [span.start, span.end])
        .chain([0, output.len()])
        .chain(cursor)
        .collect();
    bounds.sort_unstable();
    bounds.dedup();

    let mut out = String::new();
    for pair in bounds.windows(2) {
        let segment = Span::new(pair[0], pair[1]);
        if cursor == Some(segment.start) {
            out.push_str(&CURSOR_GLYPH.reverse().to_string());
        }
        let text = &output[segment.range()];
        let covered = spans
            .iter()
            .any(|span| span.start <= segment.start && segment.end <= span.end);
        if covered {
            out.push_str(&text.underlined().to_string());
        } else {
            out.push_str(text);
        }
    }
    if cursor == Some(output.len()) {
        out.push_str(&CURSOR_GLYPH.reverse().to_string());
    }
    out
}
