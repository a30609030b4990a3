//! roxmltree helpers for GPIF navigation

use roxmltree::{Document, Node};

use crate::error::{TabError, TabResult};

/// Parse GPIF text into a DOM.
///
/// DOCTYPE lines are stripped (roxmltree rejects DTDs) and a leading
/// byte-order mark is skipped. Returns the cleaned text so the caller can
/// keep it alive alongside the document.
pub fn clean_source(xml: &str) -> String {
    let xml = xml.trim_start_matches('\u{feff}');
    if xml.contains("<!DOCTYPE") {
        xml.lines()
            .filter(|line| !line.trim_start().starts_with("<!DOCTYPE"))
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        xml.to_string()
    }
}

pub fn parse_document(source: &str) -> TabResult<Document<'_>> {
    Document::parse(source).map_err(|e| TabError::Xml(e.to_string()))
}

/// First element child with the given tag
pub fn child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == tag)
}

/// All element children with the given tag
pub fn children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == tag)
}

/// Follow a `/`-separated path of child tags
pub fn path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    path.split('/').try_fold(node, |n, tag| child(n, tag))
}

/// Trimmed, non-empty text of a node
pub fn text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|t| !t.is_empty())
}

pub fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    child(node, tag).and_then(text)
}

pub fn path_text<'a>(node: Node<'a, '_>, tag_path: &str) -> Option<&'a str> {
    path(node, tag_path).and_then(text)
}

/// `<Property name="...">` child of a `<Properties>` block
pub fn property<'a, 'input>(properties: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    properties
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "Property" && n.attribute("name") == Some(name))
}

/// Text of `<Property name="..."><{value_tag}>text</...></Property>`
pub fn property_text<'a>(properties: Node<'a, '_>, name: &str, value_tag: &str) -> Option<&'a str> {
    property(properties, name).and_then(|p| child_text(p, value_tag))
}

/// Whether `<Property name="..."><Enable/></Property>` is present
pub fn property_enabled(properties: Node<'_, '_>, name: &str) -> bool {
    property(properties, name)
        .map(|p| child(p, "Enable").is_some())
        .unwrap_or(false)
}

/// Whether the boolean attribute is literally `true`
pub fn attribute_true(node: Node<'_, '_>, name: &str) -> bool {
    node.attribute(name)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Parse text into a number, naming the element on failure
pub fn parse_number<T: std::str::FromStr>(element: &str, value: &str) -> TabResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| TabError::invalid(element, value, "Expected a number"))
}

/// Space-separated id list such as `<Beats>0 1 2</Beats>`
pub fn id_list(node: Node<'_, '_>) -> Vec<String> {
    node.text()
        .map(|t| t.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
