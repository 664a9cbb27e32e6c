use std::fmt;
use std::str::FromStr;

/// The closed set of block kinds the scanner produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    Heading4,
    Heading5,
    Heading6,
    ThematicBreak,
}

impl NodeType {
    pub const ALL: [NodeType; 8] = [
        NodeType::Paragraph,
        NodeType::Heading1,
        NodeType::Heading2,
        NodeType::Heading3,
        NodeType::Heading4,
        NodeType::Heading5,
        NodeType::Heading6,
        NodeType::ThematicBreak,
    ];

    /// Heading kind for `level` (1-6).
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(NodeType::Heading1),
            2 => Some(NodeType::Heading2),
            3 => Some(NodeType::Heading3),
            4 => Some(NodeType::Heading4),
            5 => Some(NodeType::Heading5),
            6 => Some(NodeType::Heading6),
            _ => None,
        }
    }

    pub fn heading_level(self) -> Option<u8> {
        match self {
            NodeType::Heading1 => Some(1),
            NodeType::Heading2 => Some(2),
            NodeType::Heading3 => Some(3),
            NodeType::Heading4 => Some(4),
            NodeType::Heading5 => Some(5),
            NodeType::Heading6 => Some(6),
            NodeType::Paragraph | NodeType::ThematicBreak => None,
        }
    }

    /// Stable name, used in failure messages and fixture files.
    pub fn name(self) -> &'static str {
        match self {
            NodeType::Paragraph => "Paragraph",
            NodeType::Heading1 => "Heading1",
            NodeType::Heading2 => "Heading2",
            NodeType::Heading3 => "Heading3",
            NodeType::Heading4 => "Heading4",
            NodeType::Heading5 => "Heading5",
            NodeType::Heading6 => "Heading6",
            NodeType::ThematicBreak => "ThematicBreak",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a node type name that is not one of [`NodeType::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNodeType(pub String);

impl fmt::Display for UnknownNodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown node type: {}", self.0)
    }
}

impl std::error::Error for UnknownNodeType {}

impl FromStr for NodeType {
    type Err = UnknownNodeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownNodeType(s.to_string()))
    }
}
