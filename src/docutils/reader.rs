//! Docutils XML reader.

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};
use crate::model::{Document, Node, NodeId};
use crate::normalize::is_inline_class;

use super::class_map::{holds_text, tag_to_class};

/// Parse a docutils XML document (as written by `rst2xml` or Sphinx's
/// `xml` builder) into a tree.
///
/// The outermost element becomes the root node. Attributes are kept as
/// text, character data and entity references become text nodes.
/// Whitespace-only character data is kept inside text-holding elements and
/// next to an inline sibling; elsewhere it is indentation and is dropped.
pub fn read_xml(content: &str) -> Result<Document> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);

    let mut doc = Document::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut has_root = false;
    let mut text = String::new();
    // Whitespace after a block sibling, kept only if an inline sibling follows
    let mut gap: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                flush_text(&mut doc, &stack, &mut text, &mut gap)?;
                let id = open_element(&mut doc, &e, &stack, &mut has_root, &mut gap)?;
                stack.push(id);
            }
            Event::Empty(e) => {
                flush_text(&mut doc, &stack, &mut text, &mut gap)?;
                open_element(&mut doc, &e, &stack, &mut has_root, &mut gap)?;
            }
            Event::End(e) => {
                flush_text(&mut doc, &stack, &mut text, &mut gap)?;
                gap = None;
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let open = stack
                    .pop()
                    .ok_or_else(|| Error::InvalidDocument(format!("unexpected </{name}>")))?;
                let open_name = doc.class(open).map(|c| c.name()).unwrap_or_default();
                if open_name != name {
                    return Err(Error::InvalidDocument(format!(
                        "</{name}> closes <{open_name}>"
                    )));
                }
            }
            Event::Text(e) => {
                text.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::CData(e) => {
                text.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                let resolved = resolve_entity(&entity)
                    .ok_or_else(|| Error::InvalidDocument(format!("unknown entity &{entity};")))?;
                text.push_str(&resolved);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    flush_text(&mut doc, &stack, &mut text, &mut gap)?;

    if let Some(&open) = stack.last() {
        let name = doc.class(open).map(|c| c.name()).unwrap_or_default();
        return Err(Error::InvalidDocument(format!("unclosed <{name}>")));
    }
    if !has_root {
        return Err(Error::InvalidDocument("no root element".to_string()));
    }

    Ok(doc)
}

/// Create the node for an element and attach it to the current parent.
fn open_element(
    doc: &mut Document,
    e: &BytesStart<'_>,
    stack: &[NodeId],
    has_root: &mut bool,
    gap: &mut Option<String>,
) -> Result<NodeId> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let class = tag_to_class(&name);

    let id = match stack.last() {
        Some(&parent) => {
            if let Some(space) = gap.take()
                && is_inline_class(&class)
            {
                let node = doc.alloc_text(&space);
                doc.append_child(parent, node);
            }
            let id = doc.alloc_node(Node::new(class));
            doc.append_child(parent, id);
            id
        }
        None if *has_root => {
            return Err(Error::InvalidDocument(format!(
                "second root element <{name}>"
            )));
        }
        None => {
            *has_root = true;
            if let Some(root) = doc.node_mut(NodeId::ROOT) {
                root.class = class;
            }
            NodeId::ROOT
        }
    };

    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::InvalidDocument(format!("<{name}>: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw)
            .map_err(|e| Error::InvalidDocument(format!("<{name} {key}>: {e}")))?;
        doc.attrs.set(id, &key, value.into_owned());
    }

    Ok(id)
}

/// Turn buffered character data into a text node under the current parent.
///
/// Whitespace-only data in a structural parent is kept when the previous
/// sibling is inline, and otherwise parked in `gap` until the next sibling
/// shows whether it separates inline content.
fn flush_text(
    doc: &mut Document,
    stack: &[NodeId],
    text: &mut String,
    gap: &mut Option<String>,
) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    let content = std::mem::take(text);

    let Some(&parent) = stack.last() else {
        if content.trim().is_empty() {
            return Ok(());
        }
        return Err(Error::InvalidDocument(
            "text outside the root element".to_string(),
        ));
    };

    let keep = doc.class(parent).is_some_and(holds_text)
        || !content.trim().is_empty()
        || doc
            .last_child(parent)
            .and_then(|c| doc.class(c))
            .is_some_and(is_inline_class);
    if keep {
        let node = doc.alloc_text(&content);
        doc.append_child(parent, node);
    } else {
        *gap = Some(content);
    }
    Ok(())
}

/// Resolve XML entity references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code).map(|c| c.to_string())
}
