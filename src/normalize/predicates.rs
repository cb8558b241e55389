//! Shared class sets for the normalization passes.

use crate::model::Class;

/// Classes the top-level pass selects for fixing.
pub const TARGET_CLASSES: &[Class] = &[Class::Section, Class::DescContent, Class::Table];

/// Block-level classes hoisted out of paragraphs in a description body.
pub const DESC_EXTRACT_CLASSES: &[Class] = &[
    Class::BulletList,
    Class::EnumeratedList,
    Class::DefinitionList,
    Class::Table,
    Class::Desc,
    Class::Image,
    Class::Figure,
    Class::MathBlock,
];

/// Nested blocks whose own content is unwrapped after the body is flattened.
///
/// Order matters: list items first, then definitions, then notes.
pub const NESTED_BLOCK_CLASSES: &[Class] = &[Class::ListItem, Class::Definition, Class::Note];

/// Check if a class is inline content that belongs inside a paragraph.
///
/// Everything else, including unknown classes, is treated as block-level
/// and left in place.
pub fn is_inline_class(class: &Class) -> bool {
    matches!(
        class,
        Class::Text
            | Class::Emphasis
            | Class::Strong
            | Class::Literal
            | Class::Reference
            | Class::TitleReference
            | Class::Inline
            | Class::Math
            | Class::FootnoteReference
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
    fn test_inline_classes() {
        assert!(is_inline_class(&Class::Text));
        assert!(is_inline_class(&Class::Emphasis));
        assert!(!is_inline_class(&Class::Paragraph));
        assert!(!is_inline_class(&Class::Table));
        assert!(!is_inline_class(&Class::Title));
        assert!(!is_inline_class(&Class::Unknown("sidebar".into())));
    }

    #[test]
    fn test_extract_set_has_no_inline_classes() {
        assert!(DESC_EXTRACT_CLASSES.iter().all(|c| !is_inline_class(c)));
    }
}
