//! Storage-format reader built on quick-xml.
//!
//! Storage markup is XHTML with undeclared `ac:`/`ri:` prefixes and HTML named
//! entities, so it is read with a plain (non-namespace-aware) reader and entity
//! references are resolved here rather than by quick-xml.

use memchr::memchr;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::arena::{Attribute, NodeId, StorageDom};
use crate::error::{Error, Result};

/// Parse a storage-format fragment into a DOM.
///
/// The fragment may contain several top-level nodes; they become children of
/// the document root.
pub fn parse_storage(markup: &str) -> Result<StorageDom> {
    let mut dom = StorageDom::new();
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<NodeId> = vec![dom.document()];

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let element = create_element(&mut dom, &e);
                dom.append(current(&stack), element);
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = create_element(&mut dom, &e);
                dom.append(current(&stack), element);
            }
            Event::End(e) => {
                if stack.len() <= 1 {
                    return Err(Error::MalformedMarkup(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                stack.pop();
            }
            Event::Text(e) => {
                let text = String::from_utf8_lossy(e.as_ref());
                dom.append_text(current(&stack), &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                dom.append_text(current(&stack), &text);
            }
            Event::GeneralRef(e) => {
                let name = String::from_utf8_lossy(e.as_ref());
                match resolve_entity(&name) {
                    Some(resolved) => dom.append_text(current(&stack), &resolved),
                    None => dom.append_text(current(&stack), &format!("&{name};")),
                }
            }
            Event::Eof => break,
            // Comments, processing instructions, declarations and doctypes
            // carry no content
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = dom.element_name(current(&stack)).unwrap_or_default().to_string();
        return Err(Error::MalformedMarkup(format!("unclosed element <{open}>")));
    }

    Ok(dom)
}

fn current(stack: &[NodeId]) -> NodeId {
    stack.last().copied().unwrap_or(NodeId::NONE)
}

fn create_element(dom: &mut StorageDom, e: &BytesStart) -> NodeId {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let attrs = e
        .attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attr.value);
            Attribute::new(key, unescape_entities(&raw))
        })
        .collect();
    dom.create_element(name, attrs)
}

/// Replace entity references in attribute text.
///
/// Unknown or unterminated references are kept as written.
pub fn unescape_entities(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let Some(first) = memchr(b'&', bytes) else {
        return raw.to_string();
    };

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first]);
    let mut rest = &raw[first..];

    while let Some(amp) = memchr(b'&', rest.as_bytes()) {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match memchr(b';', after.as_bytes()).and_then(|semi| {
            resolve_entity(&after[..semi]).map(|resolved| (semi, resolved))
        }) {
            Some((semi, resolved)) => {
                out.push_str(&resolved);
                rest = &after[semi + 1..];
            }
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Resolve an entity reference name (without `&` and `;`) to its text.
pub(crate) fn resolve_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = if let Some(hex) = num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).ok()?
        } else {
            num.parse::<u32>().ok()?
        };
        return char::from_u32(code).map(String::from);
    }

    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "hellip" => '\u{2026}',
        "rarr" => '\u{2192}',
        "larr" => '\u{2190}',
        "laquo" => '\u{00AB}',
        "raquo" => '\u{00BB}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "bull" => '\u{2022}',
        "middot" => '\u{00B7}',
        "deg" => '\u{00B0}',
        "times" => '\u{00D7}',
        "euro" => '\u{20AC}',
        "zwnj" => '\u{200C}',
        "zwj" => '\u{200D}',
        "shy" => '\u{00AD}',
        _ => return None,
    };
    Some(c.to_string())
}
