//! Document definitions: which pages become which parts and chapters.
//!
//! ```text
//! <documents>
//!   <document title="Guide" author="Ops" baseurl="https://wiki.example.com/display" space="DOC">
//!     <toc />
//!     <part title="Basics">
//!       <chapter title="Intro" />
//!       <chapter title="Legal notice" inline="true" />
//!     </part>
//!     <chapter title="Release notes" />
//!   </document>
//! </documents>
//! ```

use std::path::Path;

use log::{info, warn};

use crate::error::{Error, Result};
use crate::model::{DEFAULT_DATE, Document, PartId};
use crate::storage::{NodeId, StorageDom, parse_storage};
use crate::util::decode_markup;

/// Parse every enabled `document` element of a definition file.
///
/// Chapters are registered, and numbered, in the order they appear.
pub fn parse_definitions(markup: &str) -> Result<Vec<Document>> {
    let dom = parse_storage(markup)?;
    let mut documents = Vec::new();

    for doc_el in dom.descendants_named(dom.document(), "document") {
        if is_true(&dom, doc_el, "enabled") == Some(false) {
            info!(
                "Document {} disabled, skipping",
                dom.attr(doc_el, "title").unwrap_or_default()
            );
            continue;
        }
        documents.push(parse_document(&dom, doc_el)?);
    }

    if documents.is_empty() {
        warn!("No enabled document in definition");
    }
    Ok(documents)
}

/// Read and parse a definition file.
pub fn read_definitions<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let bytes = std::fs::read(path.as_ref())?;
    parse_definitions(&decode_markup(&bytes))
}

fn parse_document(dom: &StorageDom, doc_el: NodeId) -> Result<Document> {
    let title = required(dom, doc_el, "document")?;
    let mut document = Document::new(title)
        .with_author(dom.attr(doc_el, "author").unwrap_or_default())
        .with_date(
            dom.attr(doc_el, "date")
                .filter(|date| !date.is_empty())
                .unwrap_or(DEFAULT_DATE),
        )
        .with_base_url(dom.attr_ignore_case(doc_el, "baseurl").unwrap_or_default())
        .with_space(dom.attr(doc_el, "space").unwrap_or_default());

    for child in dom.children(doc_el) {
        match dom.element_name(child) {
            Some("toc") => document.add_table_of_contents(),
            Some("part") => {
                let part = document.add_part(required(dom, child, "part")?);
                for chapter in dom.children_named(child, "chapter") {
                    add_chapter(&mut document, dom, chapter, Some(part))?;
                }
            }
            Some("chapter") => add_chapter(&mut document, dom, child, None)?,
            Some(other) => warn!("Unknown element <{other}> in document {}", document.title),
            None => {}
        }
    }
    Ok(document)
}

fn add_chapter(
    document: &mut Document,
    dom: &StorageDom,
    chapter: NodeId,
    part: Option<PartId>,
) -> Result<()> {
    let title = required(dom, chapter, "chapter")?;
    let inline = is_true(dom, chapter, "inline").unwrap_or(false);
    document.add_chapter(part, title, inline);
    Ok(())
}

fn required<'a>(dom: &'a StorageDom, id: NodeId, what: &str) -> Result<&'a str> {
    dom.attr(id, "title")
        .filter(|title| !title.is_empty())
        .ok_or_else(|| Error::InvalidDefinition(format!("{what} without title")))
}

fn is_true(dom: &StorageDom, id: NodeId, attr: &str) -> Option<bool> {
    dom.attr(id, attr).map(|value| !value.trim().eq_ignore_ascii_case("false"))
}
