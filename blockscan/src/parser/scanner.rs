use tracing::{debug, trace};

use crate::document::{Document, Node, NodeType};
use crate::parser::classify::REPLACEMENT;
use crate::parser::error::ParseError;
use crate::parser::opener::{self, LineKind};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Walk `input` once, line by line, and collect the closed blocks.
pub(crate) fn scan(input: &[u8]) -> Result<Document, ParseError> {
    if input.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut scanner = Scanner::new();
    for line in Lines::new(input) {
        scanner.feed_line(line);
    }
    scanner.handle_eof()
}

// ---------------------------------------------------------------------------
// Scan state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing seen yet.
    LineStart,
    /// A block of this kind is accumulating content.
    InBlock(NodeType),
    /// The last block was emitted; the next non-blank line opens a new one.
    BlockClosed,
}

struct Scanner {
    state: State,
    /// Content of the block being built.
    block: Vec<u8>,
    /// Closed blocks, in closure order.
    children: Vec<Node>,
}

impl Scanner {
    fn new() -> Self {
        Scanner {
            state: State::LineStart,
            block: Vec::new(),
            children: Vec::new(),
        }
    }

    fn feed_line(&mut self, line: &[u8]) {
        match opener::detect(line) {
            LineKind::Blank => self.close_block(),

            LineKind::Heading { kind, content } => {
                self.close_block();
                self.mark_block_start(kind);
                push_normalized(&mut self.block, content);
                self.close_block();
            }

            LineKind::ThematicBreak(symbol) => {
                self.close_block();
                self.mark_block_start(NodeType::ThematicBreak);
                self.block.push(symbol);
                self.close_block();
            }

            LineKind::Text => match self.state {
                State::InBlock(NodeType::Paragraph) => {
                    self.block.push(b'\n');
                    push_normalized(&mut self.block, line);
                }
                _ => {
                    self.close_block();
                    self.mark_block_start(NodeType::Paragraph);
                    push_normalized(&mut self.block, line);
                }
            },
        }
    }

    fn mark_block_start(&mut self, kind: NodeType) {
        self.block.clear();
        self.state = State::InBlock(kind);
    }

    /// Emit the open block, if any.
    fn close_block(&mut self) {
        if let State::InBlock(kind) = self.state {
            self.emit_node(kind);
        }
        self.state = State::BlockClosed;
    }

    fn emit_node(&mut self, kind: NodeType) {
        let content = std::mem::take(&mut self.block);
        trace!(node = %kind, len = content.len(), "closed block");
        self.children.push(Node::new(kind, content));
    }

    fn handle_eof(mut self) -> Result<Document, ParseError> {
        self.close_block();

        if self.children.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        debug!(nodes = self.children.len(), "parsed document");
        Ok(Document {
            children: self.children,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Physical lines of a buffer, terminators excluded. `\r\n` is one terminator;
/// the end of input terminates the last line.
struct Lines<'a> {
    rest: &'a [u8],
}

impl<'a> Lines<'a> {
    fn new(input: &'a [u8]) -> Self {
        Lines { rest: input }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        let rest = self.rest;
        if rest.is_empty() {
            return None;
        }
        let Some(end) = memchr::memchr2(b'\n', b'\r', rest) else {
            self.rest = &[];
            return Some(rest);
        };
        let mut next = end + 1;
        if rest[end] == b'\r' && rest.get(next) == Some(&b'\n') {
            next += 1;
        }
        self.rest = &rest[next..];
        Some(&rest[..end])
    }
}

/// Append `text`, storing each null byte as U+FFFD.
fn push_normalized(buf: &mut Vec<u8>, text: &[u8]) {
    let mut utf8 = [0; 4];
    let replacement = REPLACEMENT.encode_utf8(&mut utf8).as_bytes();

    let mut rest = text;
    while let Some(pos) = memchr::memchr(0, rest) {
        buf.extend_from_slice(&rest[..pos]);
        buf.extend_from_slice(replacement);
        rest = &rest[pos + 1..];
    }
    buf.extend_from_slice(rest);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &str) -> Vec<String> {
        Lines::new(input.as_bytes())
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect()
    }

    #[test]
    fn line_terminators() {
        assert_eq!(lines("a"), vec!["a"]);
        assert_eq!(lines("a\n"), vec!["a"]);
        assert_eq!(lines("a\r\nb\rc"), vec!["a", "b", "c"]);
        assert_eq!(lines("\n\n"), vec!["", ""]);
        assert!(lines("").is_empty());
    }

    #[test]
    fn null_bytes_become_replacement() {
        let mut buf = Vec::new();
        push_normalized(&mut buf, b"a\0b\0");
        assert_eq!(buf, "a\u{FFFD}b\u{FFFD}".as_bytes());
    }
}
