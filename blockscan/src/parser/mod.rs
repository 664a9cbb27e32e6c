pub mod classify;
pub mod error;
mod opener;
mod scanner;

pub use error::ParseError;

use crate::document::Document;

/// Parse a fully buffered input into a flat sequence of blocks.
///
/// The buffer is walked once, left to right. Markup that matches no block
/// opener becomes paragraph text; the only failure is an input with no
/// block content.
pub fn parse(input: &[u8]) -> Result<Document, ParseError> {
    scanner::scan(input)
}
