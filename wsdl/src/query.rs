//! Namespace-aware element queries over parsed documents.

use roxmltree::Node;

pub use dt_builtins::XS_NAMESPACE;

pub const WSDL_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/";
pub const SOAP_1_1_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
pub const SOAP_1_2_NAMESPACE: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Elements named `(namespace, name)` that are direct children of `node`.
pub fn children<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &'static str,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name((namespace, name)))
}

/// Elements named `(namespace, name)` anywhere under `node`, in document order.
///
/// Like [`Node::descendants`], this includes `node` itself when it matches.
pub fn descendants<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &'static str,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .filter(move |child| child.is_element() && child.has_tag_name((namespace, name)))
}

pub fn first_child<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &'static str,
    name: &'static str,
) -> Option<Node<'a, 'input>> {
    children(node, namespace, name).next()
}

pub fn first_descendant<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &'static str,
    name: &'static str,
) -> Option<Node<'a, 'input>> {
    descendants(node, namespace, name).next()
}

/// 1-based line of the node's start tag.
pub fn line_of(node: Node) -> u32 {
    node.document().text_pos_at(node.range().start).row
}
