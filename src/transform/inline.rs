//! Inline handlers: text, character formatting, hyperlinks, styled spans.

use super::style::{InlineStyle, StyleDirective, parse_inline_style};
use super::{Outcome, Transformer};
use crate::error::Result;
use crate::ir::Element;
use crate::storage::{NodeId, StorageDom};

pub(super) fn text<'a>(
    _t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    if let Some(text) = dom.text(id) {
        out.push(Element::text(text));
    }
    Ok(Outcome::Converted)
}

/// `em`, `strong`, `code`, `s`, `sub`, `sup`.
pub(super) fn formatting<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let wrap: fn(Vec<Element>) -> Element = match dom.element_name(id) {
        Some("em") => Element::Emph,
        Some("strong") => Element::Bold,
        Some("code") => Element::Typewriter,
        Some("s") => Element::Strikethrough,
        Some("sub") => Element::Subscript,
        _ => Element::Superscript,
    };
    t.wrap_children(dom, id, out, wrap)
}

/// `a href`.
pub(super) fn hyperlink<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let url = dom.attr(id, "href").unwrap_or_default().to_string();
    t.wrap_children(dom, id, out, |children| Element::Href { url, children })
}

pub(super) fn line_break<'a>(
    _t: &mut Transformer<'a>,
    _dom: &'a StorageDom,
    _id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    out.push(Element::Newline);
    Ok(Outcome::Converted)
}

/// `span`, honoring `color` and `text-decoration` in its inline style.
///
/// Recognized declarations wrap the content in declaration order, the first
/// one outermost. Anything else is reported and the content is kept.
pub(super) fn span<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let InlineStyle {
        directives,
        ignored,
    } = dom
        .attr(id, "style")
        .map(parse_inline_style)
        .unwrap_or_default();

    let mut content = t.collect_children(dom, id)?;
    for directive in directives.into_iter().rev() {
        content = vec![match directive {
            StyleDirective::Color(color) => Element::Color {
                color,
                children: content,
            },
            StyleDirective::Strikethrough => Element::Strikethrough(content),
            StyleDirective::Underline => Element::Underline(content),
        }];
    }
    out.extend(content);

    if ignored.is_empty() {
        Ok(Outcome::Converted)
    } else {
        Ok(Outcome::Recovered(format!(
            "Unsupported style ignored: {}",
            ignored.join("; ")
        )))
    }
}
