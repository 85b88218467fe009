//! Structural macros: admonitions, includes, layout, and the ones that
//! produce nothing.

use log::{debug, info};

use super::{Outcome, Transformer};
use crate::error::Result;
use crate::ir::{AdmonitionKind, Element, FontSize};
use crate::storage::{NodeId, StorageDom};

/// Elements whose content a macro handler never renders directly.
pub(super) fn ignore<'a>(
    _t: &mut Transformer<'a>,
    _dom: &'a StorageDom,
    _id: NodeId,
    _out: &mut Vec<Element>,
) -> Result<Outcome> {
    Ok(Outcome::Converted)
}

/// The table of contents is generated by LaTeX.
pub(super) fn toc<'a>(
    t: &mut Transformer<'a>,
    _dom: &'a StorageDom,
    _id: NodeId,
    _out: &mut Vec<Element>,
) -> Result<Outcome> {
    debug!("{}: toc macro omitted", t.current_title());
    Ok(Outcome::Converted)
}

pub(super) fn toc_zone<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    match dom.find_descendant(id, "ac:rich-text-body") {
        Some(body) => {
            t.convert_children(dom, body, out)?;
            Ok(Outcome::Converted)
        }
        None => Ok(Outcome::Recovered("toc-zone macro without body".to_string())),
    }
}

pub(super) fn unmigrated<'a>(
    _t: &mut Transformer<'a>,
    _dom: &'a StorageDom,
    _id: NodeId,
    _out: &mut Vec<Element>,
) -> Result<Outcome> {
    Ok(Outcome::Recovered(
        "unmigrated wiki markup ignored".to_string(),
    ))
}

/// `info`, `note`, `tip`, `warning`.
///
/// The box holds the macro's title parameter (if any) followed by its rich
/// text body, or by its other children when there is no body.
pub(super) fn admonition<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let kind = match dom.attr(id, "ac:name") {
        Some("tip") => AdmonitionKind::Tip,
        Some("warning") => AdmonitionKind::Warning,
        _ => AdmonitionKind::Info,
    };

    let mut children = Vec::new();
    if let Some(title) = dom
        .children_named(id, "ac:parameter")
        .find(|&p| dom.attr(p, "ac:name") == Some("title"))
    {
        t.convert_node(dom, title, &mut children)?;
    }

    let outcome = match dom.children_named(id, "ac:rich-text-body").next() {
        Some(body) => {
            t.convert_children(dom, body, &mut children)?;
            Outcome::Converted
        }
        None => {
            let rest = dom
                .children(id)
                .filter(|&child| !dom.is_element_named(child, "ac:parameter"));
            t.convert(dom, rest, &mut children)?;
            Outcome::Recovered(format!(
                "{} macro without rich text body",
                dom.attr(id, "ac:name").unwrap_or("admonition")
            ))
        }
    };

    out.push(Element::Admonition { kind, children });
    Ok(outcome)
}

/// `section`: only the body of the first column is kept.
pub(super) fn section<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let column_body = dom
        .find_descendant(id, "ac:rich-text-body")
        .and_then(|body| {
            dom.descendants(body).find(|&n| {
                matches!(
                    dom.element_name(n),
                    Some("ac:structured-macro" | "ac:macro")
                )
            })
        })
        .and_then(|column| dom.find_descendant(column, "ac:rich-text-body"));

    match column_body {
        Some(body) => {
            t.convert_children(dom, body, out)?;
            Ok(Outcome::Converted)
        }
        None => Ok(Outcome::Recovered(
            "section macro without column body".to_string(),
        )),
    }
}

/// `include`: splices the target page's content here.
pub(super) fn include<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let target = if dom.is_element_named(id, "ac:macro") {
        dom.find_descendant(id, "ac:default-parameter")
            .map(|p| dom.normalized_text(p))
    } else {
        dom.find_descendant(id, "ri:page")
            .and_then(|p| dom.attr(p, "ri:content-title"))
            .map(str::to_string)
    };

    let Some(title) = target.filter(|title| !title.is_empty()) else {
        return Ok(Outcome::Recovered(
            "include macro without target page".to_string(),
        ));
    };

    let pages = t.pages;
    let Some(page) = pages.get(&title) else {
        return Ok(Outcome::Recovered(format!(
            "Included page not found: {title}"
        )));
    };
    if page.is_excluded() {
        info!("{}: skipping excluded include {title}", t.current_title());
        return Ok(Outcome::Converted);
    }

    t.render_page(page, out)?;
    Ok(Outcome::Converted)
}

/// `title` parameter: a large bold line.
pub(super) fn title_parameter<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let children = t.collect_children(dom, id)?;
    out.push(Element::Sized {
        size: FontSize::Large,
        children,
    });
    out.push(Element::Newline);
    Ok(Outcome::Converted)
}
