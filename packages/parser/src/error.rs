//! Error types for the benchfile parser

use std::io;
use thiserror::Error;

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse error with the offending line and context
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unknown operation at line {line}: {text}")]
    UnknownOperation { line: usize, text: String },

    #[error("Missing argument at line {line}: {command} expects {expected}")]
    MissingArgument {
        line: usize,
        command: String,
        expected: &'static str,
    },

    #[error("Malformed number at line {line}: '{token}' is not an integer")]
    MalformedNumber { line: usize, token: String },

    #[error("Unable to open file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    pub fn unknown_operation(line: usize, text: impl Into<String>) -> Self {
        ParseError::UnknownOperation {
            line,
            text: text.into(),
        }
    }

    pub fn missing_argument(line: usize, command: impl Into<String>, expected: &'static str) -> Self {
        ParseError::MissingArgument {
            line,
            command: command.into(),
            expected,
        }
    }

    pub fn malformed_number(line: usize, token: impl Into<String>) -> Self {
        ParseError::MalformedNumber {
            line,
            token: token.into(),
        }
    }

    /// Input line the error points at, when it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnknownOperation { line, .. }
            | ParseError::MissingArgument { line, .. }
            | ParseError::MalformedNumber { line, .. } => Some(*line),
            ParseError::FileRead { .. } => None,
        }
    }
}

/// Format an error with source context using ariadne
#[cfg(feature = "pretty-errors")]
pub fn format_error(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let span = match error.line() {
        Some(line) => line_span(source, line),
        None => source.len().saturating_sub(1)..source.len(),
    };

    let label = match error {
        ParseError::UnknownOperation { .. } => "not a known operation".to_string(),
        ParseError::MissingArgument { expected, .. } => format!("expected {}", expected),
        ParseError::MalformedNumber { token, .. } => format!("'{}' is not an integer", token),
        ParseError::FileRead { source, .. } => source.to_string(),
    };

    let mut output = Vec::new();

    let report = Report::build(ReportKind::Error, filename, span.start)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, span))
                .with_color(Color::Red)
                .with_message(label),
        )
        .finish();

    report
        .write((filename, Source::from(source)), &mut output)
        .unwrap();

    String::from_utf8(output).unwrap_or_else(|_| "Error formatting failed".to_string())
}

/// Byte range of a 1-based line within `source`
#[cfg(feature = "pretty-errors")]
fn line_span(source: &str, line: usize) -> std::ops::Range<usize> {
    let mut start = 0;
    for (index, segment) in source.split_inclusive('\n').enumerate() {
        if index + 1 == line {
            let end = start + segment.trim_end_matches(['\n', '\r']).len();
            return start..end;
        }
        start += segment.len();
    }
    source.len().saturating_sub(1)..source.len()
}
