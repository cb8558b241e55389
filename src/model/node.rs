//! Tree node types and class tags.

/// Unique identifier for a node within a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root node ID (always 0).
    pub const ROOT: NodeId = NodeId(0);
}

/// Class tag of a node.
///
/// The docutils/Sphinx node vocabulary is open-ended; the classes the
/// normalizer and the XML codec need to reason about are listed here and
/// everything else is carried as [`Class::Unknown`] with its tag name, so a
/// tree survives a read/write round trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Class {
    /// Root of a docutils tree.
    #[default]
    Document,
    Section,
    Title,
    Subtitle,
    Rubric,
    /// Block of inline content.
    Paragraph,
    /// Leaf text content node. References a range in the document's text buffer.
    Text,

    // Inline markup
    Emphasis,
    Strong,
    Literal,
    Reference,
    TitleReference,
    Target,
    Inline,
    Math,
    FootnoteReference,

    // Lists
    BulletList,
    EnumeratedList,
    ListItem,
    DefinitionList,
    DefinitionListItem,
    Term,
    Classifier,
    Definition,
    FieldList,
    Field,
    FieldName,
    FieldBody,

    // Tables
    Table,
    TGroup,
    ColSpec,
    THead,
    TBody,
    Row,
    Entry,

    // Other body elements
    Image,
    Figure,
    Caption,
    Legend,
    MathBlock,
    LiteralBlock,
    BlockQuote,
    LineBlock,
    Line,
    Compound,
    Container,
    Comment,
    Transition,
    Footnote,

    // Admonitions
    Note,
    Warning,
    Admonition,

    // API descriptions (Sphinx `desc` family)
    Desc,
    DescSignature,
    DescSignatureLine,
    DescName,
    DescAddname,
    DescType,
    DescReturns,
    DescParameterList,
    DescParameter,
    DescAnnotation,
    DescContent,

    /// A tag this crate has no dedicated variant for.
    Unknown(String),
}

impl Class {
    /// The docutils tag name of this class.
    pub fn name(&self) -> &str {
        match self {
            Class::Document => "document",
            Class::Section => "section",
            Class::Title => "title",
            Class::Subtitle => "subtitle",
            Class::Rubric => "rubric",
            Class::Paragraph => "paragraph",
            Class::Text => "#text",
            Class::Emphasis => "emphasis",
            Class::Strong => "strong",
            Class::Literal => "literal",
            Class::Reference => "reference",
            Class::TitleReference => "title_reference",
            Class::Target => "target",
            Class::Inline => "inline",
            Class::Math => "math",
            Class::FootnoteReference => "footnote_reference",
            Class::BulletList => "bullet_list",
            Class::EnumeratedList => "enumerated_list",
            Class::ListItem => "list_item",
            Class::DefinitionList => "definition_list",
            Class::DefinitionListItem => "definition_list_item",
            Class::Term => "term",
            Class::Classifier => "classifier",
            Class::Definition => "definition",
            Class::FieldList => "field_list",
            Class::Field => "field",
            Class::FieldName => "field_name",
            Class::FieldBody => "field_body",
            Class::Table => "table",
            Class::TGroup => "tgroup",
            Class::ColSpec => "colspec",
            Class::THead => "thead",
            Class::TBody => "tbody",
            Class::Row => "row",
            Class::Entry => "entry",
            Class::Image => "image",
            Class::Figure => "figure",
            Class::Caption => "caption",
            Class::Legend => "legend",
            Class::MathBlock => "math_block",
            Class::LiteralBlock => "literal_block",
            Class::BlockQuote => "block_quote",
            Class::LineBlock => "line_block",
            Class::Line => "line",
            Class::Compound => "compound",
            Class::Container => "container",
            Class::Comment => "comment",
            Class::Transition => "transition",
            Class::Footnote => "footnote",
            Class::Note => "note",
            Class::Warning => "warning",
            Class::Admonition => "admonition",
            Class::Desc => "desc",
            Class::DescSignature => "desc_signature",
            Class::DescSignatureLine => "desc_signature_line",
            Class::DescName => "desc_name",
            Class::DescAddname => "desc_addname",
            Class::DescType => "desc_type",
            Class::DescReturns => "desc_returns",
            Class::DescParameterList => "desc_parameterlist",
            Class::DescParameter => "desc_parameter",
            Class::DescAnnotation => "desc_annotation",
            Class::DescContent => "desc_content",
            Class::Unknown(name) => name,
        }
    }

    /// Check if this is a text leaf.
    pub fn is_text(&self) -> bool {
        matches!(self, Class::Text)
    }
}

impl std::fmt::Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Range into the document's text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextRange {
    /// Byte offset into Document.text.
    pub start: u32,
    /// Length in bytes.
    pub len: u32,
}

impl TextRange {
    /// Create a new text range.
    pub fn new(start: u32, len: u32) -> Self {
        Self { start, len }
    }

    /// Check if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the end offset.
    pub fn end(&self) -> u32 {
        self.start + self.len
    }
}

/// A node in the document tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Class tag.
    pub class: Class,
    /// Parent node (None for the root and for detached nodes).
    pub parent: Option<NodeId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Next sibling node.
    pub next_sibling: Option<NodeId>,
    /// Text content range (only for Text nodes).
    pub text: TextRange,
}

impl Node {
    /// Create a new node with default values.
    pub fn new(class: Class) -> Self {
        Self {
            class,
            parent: None,
            first_child: None,
            next_sibling: None,
            text: TextRange::default(),
        }
    }

    /// Create a text node with the given range.
    pub fn text(range: TextRange) -> Self {
        Self {
            class: Class::Text,
            parent: None,
            first_child: None,
            next_sibling: None,
            text: range,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_names() {
        assert_eq!(Class::DescContent.name(), "desc_content");
        assert_eq!(Class::EnumeratedList.name(), "enumerated_list");
        assert_eq!(Class::Text.name(), "#text");
        assert_eq!(Class::Unknown("sidebar".into()).name(), "sidebar");
        assert_eq!(Class::Table.to_string(), "table");
    }

    #[test]
    fn test_text_range() {
        let range = TextRange::new(4, 3);
        assert_eq!(range.end(), 7);
        assert!(!range.is_empty());
        assert!(TextRange::default().is_empty());
    }
}
