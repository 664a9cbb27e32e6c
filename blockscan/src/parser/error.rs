use std::fmt;

use codespan_reporting::diagnostic::{Diagnostic, Label};

/// Reasons a buffer could not be turned into a document.
///
/// Unrecognized markup is never an error: it degrades to paragraph text.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The buffer held no block content at all: it was zero bytes long or
    /// contained only blank lines.
    EmptyInput,
}

impl ParseError {
    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        match self {
            ParseError::EmptyInput => Diagnostic::error()
                .with_message(self.to_string())
                .with_labels(vec![Label::primary(file_id, 0..0)])
                .with_notes(vec![
                    "the input is empty or holds only blank lines".to_string(),
                    "a document needs at least one block".to_string(),
                ]),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::EmptyInput => write!(f, "empty document"),
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_explains_blank_input() {
        let diagnostic = ParseError::EmptyInput.to_diagnostic(7);
        assert_eq!(diagnostic.message, "empty document");
        assert_eq!(diagnostic.labels[0].file_id, 7);
        assert!(
            diagnostic
                .notes
                .iter()
                .any(|n| n.contains("only blank lines"))
        );
    }
}
