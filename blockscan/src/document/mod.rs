mod node_type;

use std::fmt;

use bstr::ByteSlice;

pub use node_type::{NodeType, UnknownNodeType};

/// The root of a parsed buffer: blocks in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub children: Vec<Node>,
}

/// One block-level unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub node_type: NodeType,
    /// Normalized text. Heading text without markers, the break symbol, or
    /// the paragraph's lines joined by `\n`.
    pub content: Vec<u8>,
    /// Always empty for the block kinds produced today.
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(node_type: NodeType, content: impl Into<Vec<u8>>) -> Self {
        Node {
            node_type,
            content: content.into(),
            children: Vec::new(),
        }
    }
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Document { children }
    }

    /// Describe the first structural difference between `self` and
    /// `expected`, or `None` when they are equal.
    pub fn diff(&self, expected: &Document) -> Option<String> {
        diff_nodes(&self.children, &expected.children, "")
    }
}

fn diff_nodes(actual: &[Node], expected: &[Node], path: &str) -> Option<String> {
    if actual.len() != expected.len() {
        return Some(format!(
            "{}children length: expected {}, got {}",
            path,
            expected.len(),
            actual.len()
        ));
    }

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        let here = format!("{}[{}] ", path, i);
        if a.node_type != e.node_type {
            return Some(format!(
                "{}node type: expected {}, got {}",
                here, e.node_type, a.node_type
            ));
        }
        if a.content != e.content {
            return Some(format!(
                "{}node content: expected {:?}, got {:?}",
                here,
                e.content.as_bstr(),
                a.content.as_bstr()
            ));
        }
        if let Some(reason) = diff_nodes(&a.children, &e.children, &here) {
            return Some(reason);
        }
    }

    None
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Document")?;
        for node in &self.children {
            node.write_indented(f, 1)?;
        }
        Ok(())
    }
}

impl Node {
    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(
            f,
            "{}{} {:?}",
            "  ".repeat(depth),
            self.node_type,
            self.content.as_bstr()
        )?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
