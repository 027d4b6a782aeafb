//! # markup-code
//!
//! Inline markup for test fixtures: write the expected cursor position and
//! expected spans straight into the example text instead of counting offsets
//! by hand.
//!
//! ## Markup
//!
//! | Delimiter | Meaning |
//! |---|---|
//! | `$$` | cursor position (at most one) |
//! | `[\| ... \|]` | anonymous span, nestable and repeatable |
//! | `{\|name: ... \|}` | named span; the name runs up to the first `:` and must not be empty |
//!
//! Everything else is copied to the output verbatim. All offsets in the
//! result are byte offsets into the output, i.e. the text with the markup
//! removed.
//!
//! ```
//! use markup_code::{Span, parse};
//!
//! let result = parse("class C { {|CS0001:void M() {$$ }|} }").unwrap();
//!
//! assert_eq!(result.output(), "class C { void M() { } }");
//! assert_eq!(result.cursor(), Some(20));
//! assert_eq!(result.spans("CS0001").unwrap(), &[Span::new(10, 22)]);
//! assert_eq!(result.text(Span::new(10, 22)), Some("void M() { }"));
//! ```
//!
//! ## Checking analyzer output
//!
//! [`ParseResult::check_spans`] compares the recorded spans for a name with
//! whatever an analyzer reported, ignoring order:
//!
//! ```
//! use markup_code::{Span, parse};
//!
//! let result = parse("[|a|] b [|c|]").unwrap();
//! let reported = vec![Span::new(4, 5), Span::new(0, 1)];
//! assert!(result.check_spans("", reported).is_ok());
//! ```
//!
//! ## Modules
//!
//! - **`parser`**: [`MarkupParser`] and [`parse`], the single-pass scanner
//! - **`result`**: [`ParseResult`], the frozen output of a parse
//! - **`kinds`**: [`Delimiter`] tokens and their match priority
//! - **`cursor`**: byte cursor used by the scanner
//! - **`span`**: [`Span`] byte ranges
//! - **`error`**: [`MarkupError`]

pub mod cursor;
pub mod error;
pub mod kinds;
pub mod parser;
pub mod result;
pub mod span;

pub use error::MarkupError;
pub use kinds::Delimiter;
pub use parser::{MarkupParser, parse};
pub use result::{ANONYMOUS, ParseResult};
pub use span::Span;
