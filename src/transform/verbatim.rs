//! Verbatim content: code macros and `pre` blocks.
//!
//! The literal text goes into the document's verbatim catalog; the tree only
//! gets a [`Element::VerbatimUse`] pointing at it.

use super::{Outcome, Transformer};
use crate::error::{Error, Result};
use crate::ir::Element;
use crate::storage::{NodeId, StorageDom};

/// `code` / `noformat` macros.
pub(super) fn code_block<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let Some(body) = dom.find_descendant(id, "ac:plain-text-body") else {
        return Ok(Outcome::Recovered(
            "code macro without plain text body".to_string(),
        ));
    };

    let key = t.document.verbatim.intern(&dom.whole_text(body));
    out.push(Element::VerbatimUse(key));
    Ok(Outcome::Converted)
}

/// `pre`: only text, line breaks and `span`/`code` wrappers are allowed.
pub(super) fn preformatted<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let mut text = String::new();
    collect_preformatted(t, dom, id, &mut text)?;

    let key = t.document.verbatim.intern(&text);
    out.push(Element::VerbatimUse(key));
    Ok(Outcome::Converted)
}

fn collect_preformatted(
    t: &Transformer<'_>,
    dom: &StorageDom,
    parent: NodeId,
    text: &mut String,
) -> Result<()> {
    for child in dom.children(parent) {
        if let Some(s) = dom.text(child) {
            text.push_str(s);
            continue;
        }
        match dom.element_name(child) {
            Some("br") => text.push('\n'),
            Some("span" | "code") => collect_preformatted(t, dom, child, text)?,
            other => {
                return Err(Error::UnsupportedInPreformatted {
                    page: t.current_title().to_string(),
                    node: format!("<{}>", other.unwrap_or("?")),
                });
            }
        }
    }
    Ok(())
}
