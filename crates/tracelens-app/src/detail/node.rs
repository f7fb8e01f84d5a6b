//! Display nodes produced by the detail composer.
//!
//! The tree is renderer-agnostic: the TUI paints it with ratatui, headless
//! mode serialises it to JSON or flattens it to plain text.

use serde::Serialize;

/// Badge label used for located elements.
pub const ELEMENT_TAG: &str = "Element";

/// A leaf or inline group in the display tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DisplayNode {
    /// Plain text.
    Text(String),
    /// Pre-formatted block (serialised JSON), shown verbatim.
    Code(String),
    /// Small badge, e.g. the "Element" tag.
    Tag(String),
    /// Text styled as a failure indicator.
    Failure(String),
    /// Emphasised text.
    Bold(String),
    /// Inline sequence of nodes on one logical line.
    Row(Vec<DisplayNode>),
}

impl DisplayNode {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn code(s: impl Into<String>) -> Self {
        Self::Code(s.into())
    }

    pub fn element_tag() -> Self {
        Self::Tag(ELEMENT_TAG.to_string())
    }

    /// Plain-text rendering; inline children are joined by a space.
    pub fn plain_text(&self) -> String {
        match self {
            DisplayNode::Text(s)
            | DisplayNode::Code(s)
            | DisplayNode::Failure(s)
            | DisplayNode::Bold(s) => s.clone(),
            DisplayNode::Tag(s) => format!("[{}]", s),
            DisplayNode::Row(children) => children
                .iter()
                .map(DisplayNode::plain_text)
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl From<String> for DisplayNode {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for DisplayNode {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A titled box of content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Card {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Compact variant without a frame.
    pub lite: bool,
    /// Cross-highlighted by the current selection.
    pub highlight: bool,
    pub content: Vec<DisplayNode>,
}

impl Card {
    pub fn new(content: Vec<DisplayNode>) -> Self {
        Self {
            content,
            ..Self::default()
        }
    }

    pub fn lite(content: Vec<DisplayNode>) -> Self {
        Self {
            lite: true,
            content,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }
}

/// One entry of the planning timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimelineItem {
    pub paragraphs: Vec<DisplayNode>,
}
