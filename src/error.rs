//! Error types for spacetex operations.

use thiserror::Error;

/// Errors that can occur while loading pages or formatting a document.
///
/// The structural variants (`UnsupportedNode`, `NestedTable`, ...) abort a
/// formatting run. Conditions that only degrade a single element are not
/// errors; they surface as [`Diagnostic`](crate::transform::Diagnostic)s.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    #[error("Invalid page file: {0}")]
    InvalidPageFile(String),

    #[error("Invalid document definition: {0}")]
    InvalidDefinition(String),

    #[error("Element {node} not supported (page \"{page}\")")]
    UnsupportedNode { page: String, node: String },

    #[error("Nested tables are not supported (page \"{page}\")")]
    NestedTable { page: String },

    #[error("Nested lists inside a table are not supported (page \"{page}\")")]
    NestedListInTable { page: String },

    #[error("Element {node} not supported inside <pre> (page \"{page}\")")]
    UnsupportedInPreformatted { page: String, node: String },

    #[error("Include cycle detected: {chain}")]
    IncludeCycle { chain: String },
}

pub type Result<T> = std::result::Result<T, Error>;
