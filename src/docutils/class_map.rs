//! Maps docutils element names to node classes.

use crate::model::Class;

/// Map a docutils element name to its class.
pub fn tag_to_class(name: &str) -> Class {
    match name {
        // Structure
        "document" => Class::Document,
        "section" => Class::Section,
        "title" => Class::Title,
        "subtitle" => Class::Subtitle,
        "rubric" => Class::Rubric,
        "paragraph" => Class::Paragraph,

        // Inline markup
        "emphasis" => Class::Emphasis,
        "strong" => Class::Strong,
        "literal" => Class::Literal,
        "reference" => Class::Reference,
        "title_reference" => Class::TitleReference,
        "target" => Class::Target,
        "inline" => Class::Inline,
        "math" => Class::Math,
        "footnote_reference" => Class::FootnoteReference,

        // Lists
        "bullet_list" => Class::BulletList,
        "enumerated_list" => Class::EnumeratedList,
        "list_item" => Class::ListItem,
        "definition_list" => Class::DefinitionList,
        "definition_list_item" => Class::DefinitionListItem,
        "term" => Class::Term,
        "classifier" => Class::Classifier,
        "definition" => Class::Definition,
        "field_list" => Class::FieldList,
        "field" => Class::Field,
        "field_name" => Class::FieldName,
        "field_body" => Class::FieldBody,

        // Tables
        "table" => Class::Table,
        "tgroup" => Class::TGroup,
        "colspec" => Class::ColSpec,
        "thead" => Class::THead,
        "tbody" => Class::TBody,
        "row" => Class::Row,
        "entry" => Class::Entry,

        // Other body elements
        "image" => Class::Image,
        "figure" => Class::Figure,
        "caption" => Class::Caption,
        "legend" => Class::Legend,
        "math_block" => Class::MathBlock,
        "literal_block" => Class::LiteralBlock,
        "block_quote" => Class::BlockQuote,
        "line_block" => Class::LineBlock,
        "line" => Class::Line,
        "compound" => Class::Compound,
        "container" => Class::Container,
        "comment" => Class::Comment,
        "transition" => Class::Transition,
        "footnote" => Class::Footnote,

        // Admonitions
        "note" => Class::Note,
        "warning" => Class::Warning,
        "admonition" => Class::Admonition,

        // API descriptions
        "desc" => Class::Desc,
        "desc_signature" => Class::DescSignature,
        "desc_signature_line" => Class::DescSignatureLine,
        "desc_name" => Class::DescName,
        "desc_addname" => Class::DescAddname,
        "desc_type" => Class::DescType,
        "desc_returns" => Class::DescReturns,
        "desc_parameterlist" => Class::DescParameterList,
        "desc_parameter" => Class::DescParameter,
        "desc_annotation" => Class::DescAnnotation,
        "desc_content" => Class::DescContent,

        other => Class::Unknown(other.to_string()),
    }
}

/// Check if whitespace inside an element of this class is content.
///
/// Structural elements are pretty-printed with indentation between their
/// children; that whitespace is dropped on read and regenerated on write.
pub fn holds_text(class: &Class) -> bool {
    matches!(
        class,
        Class::Paragraph
            | Class::Title
            | Class::Subtitle
            | Class::Rubric
            | Class::Term
            | Class::Classifier
            | Class::FieldName
            | Class::Caption
            | Class::Line
            | Class::LiteralBlock
            | Class::MathBlock
            | Class::Comment
            | Class::Emphasis
            | Class::Strong
            | Class::Literal
            | Class::Reference
            | Class::TitleReference
            | Class::Target
            | Class::Inline
            | Class::Math
            | Class::FootnoteReference
            | Class::DescSignature
            | Class::DescSignatureLine
            | Class::DescName
            | Class::DescAddname
            | Class::DescType
            | Class::DescReturns
            | Class::DescParameterList
            | Class::DescParameter
            | Class::DescAnnotation
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for name in [
            "document",
            "desc_content",
            "enumerated_list",
            "colspec",
            "math_block",
            "desc_parameterlist",
        ] {
            assert_eq!(tag_to_class(name).name(), name);
        }
    }

    #[test]
    fn test_unknown_tag_preserved() {
        let class = tag_to_class("sidebar");
        assert_eq!(class, Class::Unknown("sidebar".to_string()));
        assert_eq!(class.name(), "sidebar");
    }

    #[test]
    fn test_holds_text() {
        assert!(holds_text(&Class::Paragraph));
        assert!(holds_text(&Class::LiteralBlock));
        assert!(!holds_text(&Class::Section));
        assert!(!holds_text(&Class::Unknown("sidebar".into())));
    }
}
