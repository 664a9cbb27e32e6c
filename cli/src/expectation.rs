use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use blockscan::{Document, Node, NodeType};

/// Expected outcome of parsing one fixture, read from a `.json` or `.toml`
/// file next to the fixture's `.md` input.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Expectation {
    /// Human-readable test description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// If true, the fixture is expected to fail with a parse error.
    #[serde(default, skip_serializing_if = "is_false")]
    pub expect_error: bool,

    /// Expected top-level nodes, in order.
    #[serde(default)]
    pub nodes: Vec<ExpectedNode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpectedNode {
    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ExpectedNode>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

const EXTENSIONS: &[&str] = &["json", "toml"];

/// Find the expectation file that belongs to a fixture input.
pub fn companion(input: &Path) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| input.with_extension(ext))
        .find(|p| p.is_file())
}

impl Expectation {
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Self::from_str_with_format(&text, path)
    }

    fn from_str_with_format(text: &str, path: &Path) -> Result<Self, String> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                serde_json::from_str(text).map_err(|e| format!("JSON parse error: {}", e))
            }
            Some("toml") => toml::from_str(text).map_err(|e| format!("TOML parse error: {}", e)),
            _ => Err(format!(
                "unsupported expectation format: {}",
                path.display()
            )),
        }
    }

    /// Describe a parsed document in the expectation schema.
    pub fn from_document(doc: &Document) -> Self {
        Expectation {
            description: None,
            expect_error: false,
            nodes: doc.children.iter().map(ExpectedNode::from_node).collect(),
        }
    }

    /// Build the document this expectation describes.
    pub fn to_document(&self) -> Result<Document, String> {
        let children = self
            .nodes
            .iter()
            .map(ExpectedNode::to_node)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Document::new(children))
    }
}

impl ExpectedNode {
    fn from_node(node: &Node) -> Self {
        ExpectedNode {
            node_type: node.node_type.name().to_string(),
            content: String::from_utf8_lossy(&node.content).into_owned(),
            children: node.children.iter().map(ExpectedNode::from_node).collect(),
        }
    }

    fn to_node(&self) -> Result<Node, String> {
        let node_type: NodeType = self.node_type.parse().map_err(|e| format!("{}", e))?;
        let mut node = Node::new(node_type, self.content.as_bytes());
        node.children = self
            .children
            .iter()
            .map(ExpectedNode::to_node)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(node)
    }
}
