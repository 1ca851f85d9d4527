//! Namespace-aware NF-e document reader.
//!
//! Thin navigation layer over a read-only [`roxmltree`] DOM. Every lookup
//! is null-safe: a missing path yields `None` / an empty string, never an
//! error. The only fatal failure is [`parse`] on input that is not
//! well-formed XML.
//!
//! Lookups match the element's local name *within the NF-e namespace*, so
//! enveloped signature elements (`ds:` namespace) are never picked up.

use roxmltree::{Document, Node};

use crate::core::ConferenciaError;

/// NF-e document namespace.
pub const NFE_NS: &str = "http://www.portalfiscal.inf.br/nfe";

/// Parse an NF-e XML string into a navigable document.
pub fn parse(xml: &str) -> Result<Document<'_>, ConferenciaError> {
    Document::parse(xml).map_err(|e| ConferenciaError::MalformedXml(e.to_string()))
}

/// Parse raw NF-e bytes. Invalid UTF-8 is reported as [`ConferenciaError::MalformedXml`].
pub fn parse_bytes(bytes: &[u8]) -> Result<Document<'_>, ConferenciaError> {
    let xml = std::str::from_utf8(bytes)
        .map_err(|e| ConferenciaError::MalformedXml(format!("invalid UTF-8: {e}")))?;
    parse(xml)
}

fn is_nfe(node: &Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(NFE_NS)
}

/// First direct child element with the given local name in the NF-e namespace.
pub fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_nfe(n, name))
}

/// First descendant element with the given local name (the `.//name` lookup).
pub fn descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().find(|n| is_nfe(n, name))
}

/// First element child regardless of name, NF-e namespace only.
///
/// This is the decode point for the tagged-union tax groups (`ICMS`, `PIS`,
/// `COFINS`): the single child's tag identifies the regime variant, and the
/// shared fields are read from whichever variant is present.
pub fn first_element_child<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().namespace() == Some(NFE_NS))
}

/// Resolve a relative `a/b/c` child path under `node`.
pub fn find<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut current = node;
    for segment in path.split('/') {
        current = child(current, segment)?;
    }
    Some(current)
}

/// Text content at a relative child path, or the empty string when the path
/// does not resolve or the element has no text. Never fails.
pub fn find_text(node: Node, path: &str) -> String {
    find(node, path)
        .and_then(|n| n.text())
        .unwrap_or("")
        .to_string()
}

/// Like [`find_text`], but the first path segment is located among all
/// descendants of `node` (the original `.//a/b` lookup).
pub fn find_text_deep(node: Node, path: &str) -> String {
    let (head, rest) = match path.split_once('/') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };
    let Some(anchor) = descendant(node, head) else {
        return String::new();
    };
    match rest {
        Some(rest) => find_text(anchor, rest),
        None => anchor.text().unwrap_or("").to_string(),
    }
}

/// All `det` (line item) elements, in document order.
pub fn items<'a, 'input>(doc: &'a Document<'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    doc.root_element().descendants().filter(|n| is_nfe(n, "det"))
}
