//! Canonical markup serialization.
//!
//! Image references are looked up by their serialized markup, so the page
//! loader and the transformer must agree byte for byte. Both go through
//! [`outer_markup`]: attributes in source order with double quotes, escaped
//! text, childless elements written self-closing.

use quick_xml::escape::escape;

use super::arena::{NodeData, NodeId, StorageDom};

/// Serialize a node and its subtree.
pub fn outer_markup(dom: &StorageDom, id: NodeId) -> String {
    let mut out = String::new();
    write_node(dom, id, &mut out);
    out
}

/// Serialize the children of a node, without the node itself.
pub fn inner_markup(dom: &StorageDom, id: NodeId) -> String {
    let mut out = String::new();
    for child in dom.children(id) {
        write_node(dom, child, &mut out);
    }
    out
}

fn write_node(dom: &StorageDom, id: NodeId, out: &mut String) {
    let Some(node) = dom.get(id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child in dom.children(id) {
                write_node(dom, child, out);
            }
        }
        NodeData::Text(text) => out.push_str(&escape(text.as_str())),
        NodeData::Element { name, attrs } => {
            out.push('<');
            out.push_str(name);
            for attr in attrs {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&escape(attr.value.as_str()));
                out.push('"');
            }

            if node.first_child.is_none() {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for child in dom.children(id) {
                write_node(dom, child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}
