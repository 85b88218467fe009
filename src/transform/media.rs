//! Images and emoticons.

use log::error;

use super::{Outcome, Transformer};
use crate::error::Result;
use crate::ir::{Element, Emoticon};
use crate::storage::{NodeId, StorageDom, outer_markup};

/// `ac:image`, resolved through the current page's image map.
///
/// The map is keyed by the canonical markup of the whole `ac:image`
/// element. Pages that include attachments of other pages carry slightly
/// different markup, so a miss is retried with just the attachment
/// reference.
pub(super) fn image<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let Some(page) = t.current_page() else {
        return Ok(Outcome::Recovered("image outside of a page".to_string()));
    };

    let markup = outer_markup(dom, id);
    let image = page.image(&markup).or_else(|| {
        dom.find_descendant(id, "ri:attachment")
            .and_then(|attachment| page.image_containing(&outer_markup(dom, attachment)))
    });

    match image {
        Some(image) => {
            let path = t.options.image_path(&image.relative_path());
            out.push(Element::Image { path });
            Ok(Outcome::Converted)
        }
        None => {
            error!("{}: image not found: {markup}", page.title());
            Ok(Outcome::Recovered(format!("Image not found: {markup}")))
        }
    }
}

/// `ac:emoticon`.
pub(super) fn emoticon<'a>(
    _t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    let name = dom.attr(id, "ac:name").unwrap_or_default();
    match Emoticon::from_name(name) {
        Some(emoticon) => {
            out.push(Element::Emoticon(emoticon));
            Ok(Outcome::Converted)
        }
        None => Ok(Outcome::Recovered(format!("Unsupported emoticon: {name}"))),
    }
}
