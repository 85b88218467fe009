//! Node routing.
//!
//! Every storage node is reduced to a [`NodeKey`] and looked up in [`route`].
//! A key without an entry is a fatal error, reported by the caller.

use std::fmt;

use super::{Outcome, Transformer, block, inline, links, macros, media, table, verbatim};
use crate::error::Result;
use crate::ir::Element;
use crate::storage::{NodeId, StorageDom};

/// Node handler signature.
pub(crate) type Handler =
    for<'a> fn(&mut Transformer<'a>, &'a StorageDom, NodeId, &mut Vec<Element>) -> Result<Outcome>;

/// What a node is, for routing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKey<'a> {
    Text,
    /// Plain element, by name.
    Tag(&'a str),
    /// Macro, by `ac:name`.
    Macro(&'a str),
    /// Macro parameter, by `ac:name`.
    Parameter(&'a str),
    /// Anything else (the document root).
    Other,
}

impl<'a> NodeKey<'a> {
    pub fn of(dom: &'a StorageDom, id: NodeId) -> Self {
        if dom.is_text(id) {
            return NodeKey::Text;
        }
        let Some(name) = dom.element_name(id) else {
            return NodeKey::Other;
        };
        let macro_name = || dom.attr(id, "ac:name").unwrap_or_default();
        // Both the current and the legacy macro element name the macro in `ac:name`
        if matches!(name, "ac:structured-macro" | "ac:macro") {
            NodeKey::Macro(macro_name())
        } else if name == "ac:parameter" {
            NodeKey::Parameter(macro_name())
        } else {
            NodeKey::Tag(name)
        }
    }
}

impl fmt::Display for NodeKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Text => f.write_str("#text"),
            NodeKey::Tag(name) => write!(f, "<{name}>"),
            NodeKey::Macro(name) => write!(f, "macro \"{name}\""),
            NodeKey::Parameter(name) => write!(f, "parameter \"{name}\""),
            NodeKey::Other => f.write_str("#node"),
        }
    }
}

/// Handler for a node key, or `None` if the node is not supported.
pub(crate) fn route(key: &NodeKey<'_>) -> Option<Handler> {
    let handler: Handler = match *key {
        NodeKey::Text => inline::text,
        NodeKey::Tag(tag) => match tag {
            "p" => block::paragraph,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => block::heading,
            "em" | "strong" | "code" | "s" | "sub" | "sup" => inline::formatting,
            "a" => inline::hyperlink,
            "br" => inline::line_break,
            "span" => inline::span,
            "ol" | "ul" => block::list,
            "li" => block::list_item,
            "div" | "ac:rich-text-body" => block::splice,
            "hr" => block::rule,
            "blockquote" => block::blockquote,
            "table" => table::table,
            "pre" => verbatim::preformatted,
            "ac:link" => links::page_link,
            "ac:image" => media::image,
            "ac:emoticon" => media::emoticon,
            "ac:default-parameter" => macros::ignore,
            _ => return None,
        },
        NodeKey::Macro(name) => match name {
            "toc" => macros::toc,
            "toc-zone" => macros::toc_zone,
            "anchor" => links::anchor,
            "code" | "noformat" => verbatim::code_block,
            "info" | "note" | "tip" | "warning" => macros::admonition,
            "section" => macros::section,
            "include" => macros::include,
            "unmigrated-wiki-markup" => macros::unmigrated,
            _ => return None,
        },
        NodeKey::Parameter(name) => match name {
            "title" => macros::title_parameter,
            _ => return None,
        },
        NodeKey::Other => return None,
    };
    Some(handler)
}
