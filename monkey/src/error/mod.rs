//! Parse diagnostics and reporting

use crate::ast::Span;
use crate::lexer::TokenKind;
use thiserror::Error;

/// A parser diagnostic
///
/// `Display` is exactly the message; the span is only used for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    /// A required token was not the next one
    pub fn unexpected_token(expected: TokenKind, got: TokenKind, span: Span) -> Self {
        Self::new(
            format!("expected next token to be {expected}, got {got} instead"),
            span,
        )
    }

    /// The current token cannot begin an expression
    pub fn no_prefix_parse_fn(kind: TokenKind, span: Span) -> Self {
        Self::new(format!("no prefix parse function for {kind} found"), span)
    }

    pub fn invalid_integer(literal: &str, span: Span) -> Self {
        Self::new(format!("could not parse {literal} as integer"), span)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type alias for parsing a whole program
pub type Result<T> = std::result::Result<T, Vec<ParseError>>;

/// Render diagnostics with ariadne on stderr
pub fn report_errors(filename: &str, source: &str, errors: &[ParseError]) -> std::io::Result<()> {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    for error in errors {
        let range: std::ops::Range<usize> = error.span.into();
        Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message("Parse error")
            .with_label(
                Label::new((filename, range))
                    .with_message(error.message())
                    .with_color(Color::Red),
            )
            .finish()
            .eprint((filename, Source::from(source)))?;
    }
    Ok(())
}
