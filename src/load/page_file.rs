//! Per-page files written by the space download.
//!
//! ```text
//! <page title="Setup" id="123">
//!   <wikiimages>
//!     <wikiimage pageid="123" filename="a.png"><ac:image>...</ac:image></wikiimage>
//!   </wikiimages>
//!   <content>...storage format...</content>
//! </page>
//! ```

use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::model::{ImageRef, Page, PageStore};
use crate::storage::{NodeId, StorageDom, outer_markup, parse_storage};
use crate::util::decode_markup;

/// File name prefix of page files.
pub const PAGE_FILE_PREFIX: &str = "page-";
/// File name extension of page files.
pub const PAGE_FILE_EXTENSION: &str = ".html";

/// File name a page with `title` is stored under.
pub fn page_file_name(title: &str) -> String {
    format!(
        "{PAGE_FILE_PREFIX}{}{PAGE_FILE_EXTENSION}",
        title.replace(' ', "+")
    )
}

/// Parse the contents of a page file.
pub fn parse_page_file(markup: &str) -> Result<Page> {
    let dom = parse_storage(markup)?;
    let Some(page_el) = dom.children_named(dom.document(), "page").next() else {
        return Err(Error::InvalidPageFile("missing <page> element".into()));
    };

    let title = dom
        .attr(page_el, "title")
        .filter(|title| !title.is_empty())
        .ok_or_else(|| Error::InvalidPageFile("page without title".into()))?
        .to_string();
    let id = dom.attr(page_el, "id").unwrap_or_default().to_string();

    let Some(content) = dom.children_named(page_el, "content").next() else {
        return Err(Error::InvalidPageFile(format!("page {title} has no <content>")));
    };

    let images = read_images(&dom, page_el, &title);
    let mut page = Page::new(title, id, dom, content);
    for image in images {
        page.add_image(image);
    }
    Ok(page)
}

fn read_images(dom: &StorageDom, page_el: NodeId, title: &str) -> Vec<ImageRef> {
    let mut images = Vec::new();
    for entry in dom.descendants_named(page_el, "wikiimage") {
        let owner = dom.attr(entry, "pageid").unwrap_or_default();
        let filename = dom.attr(entry, "filename").unwrap_or_default();
        let Some(image) = dom.find_descendant(entry, "ac:image") else {
            warn!("{title}: wikiimage {owner}/{filename} without ac:image");
            continue;
        };
        if filename.is_empty() {
            warn!("{title}: wikiimage without filename");
            continue;
        }

        images.push(ImageRef {
            owner_page_id: owner.to_string(),
            filename: filename.to_string(),
            markup: outer_markup(dom, image),
        });
    }
    images
}

/// Read and parse one page file.
pub fn read_page_file<P: AsRef<Path>>(path: P) -> Result<Page> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_page_file(&decode_markup(&bytes))
}

/// Load every page file of `dir`, in file name order.
pub fn load_pages<P: AsRef<Path>>(dir: P) -> Result<PageStore> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let is_page_file = path.file_name().and_then(|n| n.to_str()).is_some_and(|name| {
            name.starts_with(PAGE_FILE_PREFIX) && name.ends_with(PAGE_FILE_EXTENSION)
        });
        if is_page_file && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut store = PageStore::new();
    for path in paths {
        let page = read_page_file(&path).map_err(|e| match e {
            Error::InvalidPageFile(msg) => {
                Error::InvalidPageFile(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        debug!("Loaded page {} from {}", page.title(), path.display());
        if let Some(previous) = store.insert(page) {
            warn!("Page {} loaded twice, keeping {}", previous.title(), path.display());
        }
    }

    info!("Loaded {} pages", store.len());
    Ok(store)
}
