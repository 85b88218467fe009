//! # spacetex
//!
//! Turns a downloaded wiki space, stored as storage-format XHTML pages, into a
//! LaTeX-ready document tree.
//!
//! ## Features
//!
//! - Parses storage-format markup, including `ac:` macros and `ri:` resources
//! - Maps pages onto the parts and chapters of a document definition
//! - Resolves page links and anchors to labels without a second pass
//! - Splices included pages in place, rejecting include cycles
//! - Collects code blocks into a deduplicated verbatim catalog
//!
//! ## Quick Start
//!
//! ```no_run
//! use spacetex::{FormatOptions, format, load_pages, read_definitions};
//!
//! let pages = load_pages("space/pages").unwrap();
//! for mut document in read_definitions("space/document-data.html").unwrap() {
//!     let output = format(&pages, &mut document, &FormatOptions::default()).unwrap();
//!     for label in output.labels.undefined_references() {
//!         println!("dangling reference: {}", label.key);
//!     }
//! }
//! ```
//!
//! ## Building a Document by Hand
//!
//! ```
//! use spacetex::{Document, FormatOptions, Page, PageStore, format};
//! use spacetex::ir::Element;
//!
//! let mut document = Document::new("Guide");
//! let basics = document.add_part("Basics");
//! document.add_chapter(Some(basics), "Intro", false);
//!
//! let pages: PageStore = [Page::from_storage("Intro", "1", "<p>100% done</p>").unwrap()]
//!     .into_iter()
//!     .collect();
//! format(&pages, &mut document, &FormatOptions::default()).unwrap();
//!
//! let intro = document.find_chapter("Intro").unwrap();
//! assert_eq!(intro.elements, vec![Element::Paragraph(vec![Element::text("100% done")])]);
//! ```

pub mod config;
pub mod error;
pub mod ir;
pub mod latex;
pub mod load;
pub mod model;
pub mod storage;
pub mod transform;
pub(crate) mod util;

pub use config::FormatOptions;
pub use error::{Error, Result};
pub use load::{load_pages, parse_definitions, parse_page_file, read_definitions};
pub use model::{Chapter, Document, Label, LabelKey, LabelRegistry, Page, PageStore};
pub use transform::{Diagnostic, FormatOutput, format};
