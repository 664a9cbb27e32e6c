pub mod document;
pub mod parser;

pub use document::{Document, Node, NodeType};
pub use parser::{ParseError, parse};
