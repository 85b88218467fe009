//! Storage-format markup: the source tree of every wiki page.
//!
//! Pages arrive as XHTML fragments carrying `ac:` (macro) and `ri:` (resource
//! identifier) elements. This module parses them into an arena DOM and offers
//! the traversal and serialization helpers the transformer needs.

mod arena;
mod parser;
mod serialize;

pub use arena::{Attribute, ChildrenIter, Descendants, NodeData, NodeId, StorageDom, StorageNode};
pub use parser::{parse_storage, unescape_entities};
pub use serialize::{inner_markup, outer_markup};
