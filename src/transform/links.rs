//! Cross-references: page links and anchors.

use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::{Outcome, Transformer};
use crate::error::Result;
use crate::ir::Element;
use crate::model::AnchorDefinition;
use crate::storage::{NodeId, StorageDom};

/// Characters kept as is in the page-title segment of a wiki URL.
const TITLE_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// `ac:link`.
///
/// Links into other spaces become external hyperlinks. Links within the
/// space reference a label: the chapter label when no anchor is given, else
/// the page/anchor label.
pub(super) fn page_link<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let text = dom.normalized_text(id);
    if t.options.is_navigation_label(&text) {
        debug!("Navigation link dropped: {text}");
        return Ok(Outcome::Converted);
    }

    let mut problems = Vec::new();
    let anchor = dom.attr(id, "ac:anchor").unwrap_or_default();
    let (page_title, mut space) = match dom.find_descendant(id, "ri:page") {
        Some(page) => (
            dom.attr(page, "ri:content-title")
                .unwrap_or_default()
                .to_string(),
            dom.attr(page, "ri:space-key").unwrap_or_default(),
        ),
        None => (t.current_title().to_string(), ""),
    };

    if !space.is_empty() && t.options.is_ignored_space(space) {
        problems.push(format!("Space {space} ignored in link to {page_title}"));
        space = "";
    }
    if space == t.document.space {
        space = "";
    }

    let children = link_body(t, dom, id, &page_title)?;

    if !space.is_empty() {
        let url = external_url(&t.document.base_url, space, &page_title);
        out.push(Element::Href { url, children });
        return Ok(outcome(problems));
    }

    if !t.pages.contains(&page_title) {
        problems.push(format!("Link to missing page: {page_title}"));
    }

    let label = if anchor.is_empty() {
        match t
            .document
            .get_chapter(&page_title, t.options.create_missing_chapters)
        {
            Some(chapter) => t.labels.reference_chapter(t.document.chapter(chapter)),
            None => t.labels.reference_anchor(&page_title, ""),
        }
    } else {
        t.labels.reference_anchor(&page_title, anchor)
    };
    let label = label.key.clone();

    out.push(Element::Link { label, children });
    Ok(outcome(problems))
}

/// Link text: a rich body, a plain-text body, or the page title.
fn link_body<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    page_title: &str,
) -> Result<Vec<Element>> {
    if let Some(body) = dom.find_descendant(id, "ac:link-body") {
        return t.collect_children(dom, body);
    }
    if let Some(body) = dom.find_descendant(id, "ac:plain-text-link-body") {
        return Ok(vec![Element::text(&dom.whole_text(body))]);
    }
    Ok(vec![Element::text(page_title)])
}

/// `base/space/Title+With+Spaces`.
fn external_url(base_url: &str, space: &str, page_title: &str) -> String {
    let title = page_title
        .split(' ')
        .map(|word| utf8_percent_encode(word, TITLE_SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("+");
    format!("{}/{}/{}", base_url.trim_end_matches('/'), space, title)
}

fn outcome(problems: Vec<String>) -> Outcome {
    if problems.is_empty() {
        Outcome::Converted
    } else {
        Outcome::Recovered(problems.join("; "))
    }
}

/// `anchor` macro: defines a label on the current page.
pub(super) fn anchor<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let name = dom.normalized_text(id);
    let page_title = t.current_title().to_string();

    match t.labels.define_anchor(&page_title, &name) {
        AnchorDefinition::Created(key) | AnchorDefinition::Resolved(key) => {
            out.push(Element::Label(key));
            Ok(Outcome::Converted)
        }
        AnchorDefinition::Duplicate(key) => Ok(Outcome::Recovered(format!(
            "Duplicate anchor dropped: {key}"
        ))),
    }
}
