//! Block handlers: paragraphs, headings, lists, rules, quotes.

use super::{Outcome, RenderMode, Transformer};
use crate::error::{Error, Result};
use crate::ir::{Element, FontSize, SectionLevel};
use crate::storage::{NodeId, StorageDom};

pub(super) fn paragraph<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    t.wrap_children(dom, id, out, Element::Paragraph)
}

/// `h1`..`h6`.
///
/// Tables cannot hold sectioning commands, so headings there become sized
/// bold text.
pub(super) fn heading<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let level = dom
        .element_name(id)
        .and_then(|name| name.strip_prefix('h'))
        .and_then(|n| n.parse::<u8>().ok())
        .unwrap_or(6);

    if t.modes.current().in_table() {
        let size = FontSize::for_heading(level);
        return t.wrap_children(dom, id, out, |children| Element::Sized { size, children });
    }

    // Some exported pages put an image as the first child of an h2; it must
    // not end up inside a section title
    if level == 2
        && dom
            .first_child(id)
            .is_some_and(|first| dom.is_element_named(first, "ac:image"))
    {
        t.convert_children(dom, id, out)?;
        return Ok(Outcome::Converted);
    }

    match SectionLevel::for_heading(level) {
        Some(level) => t.wrap_children(dom, id, out, |children| Element::Section { level, children }),
        None => t.wrap_children(dom, id, out, Element::Bold),
    }
}

/// `ol` / `ul`.
///
/// Inside a table the list is spliced into the cell; a list within such a
/// list cannot be rendered.
pub(super) fn list<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    match t.modes.current() {
        RenderMode::Body => {
            let wrap = if dom.is_element_named(id, "ol") {
                Element::OrderedList
            } else {
                Element::UnorderedList
            };
            t.wrap_children(dom, id, out, wrap)
        }
        RenderMode::Table => {
            t.with_mode(RenderMode::TableList, |t| t.convert_children(dom, id, out))?;
            Ok(Outcome::Converted)
        }
        RenderMode::TableList => Err(Error::NestedListInTable {
            page: t.current_title().to_string(),
        }),
    }
}

pub(super) fn list_item<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let tabular = t.modes.current().in_table();
    t.wrap_children(dom, id, out, |children| Element::ListItem { tabular, children })
}

/// Transparent containers (`div`, bare rich-text bodies).
pub(super) fn splice<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    t.convert_children(dom, id, out)?;
    Ok(Outcome::Converted)
}

pub(super) fn rule<'a>(
    _t: &mut Transformer<'a>,
    _dom: &'a StorageDom,
    _id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    out.push(Element::Rule);
    Ok(Outcome::Converted)
}

pub(super) fn blockquote<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    t.wrap_children(dom, id, out, Element::Blockquote)
}
