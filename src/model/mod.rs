//! Data model shared by the loader, the transformer and renderers.
//!
//! - [`Page`] / [`PageStore`]: the parsed input pages
//! - [`Document`]: parts and chapters the output tree is attached to
//! - [`LabelRegistry`]: cross-reference targets
//! - [`VerbatimCatalog`]: deduplicated code blocks

mod document;
mod label;
mod page;
mod verbatim;

pub use document::{
    APPENDIX_TITLE, Chapter, ChapterId, DEFAULT_DATE, Document, DocumentPart, Part, PartId,
};
pub use label::{AnchorDefinition, Label, LabelKey, LabelKind, LabelRegistry};
pub use page::{ImageRef, Page, PageStore};
pub use verbatim::{VerbatimCatalog, VerbatimEntry, VerbatimKey};
