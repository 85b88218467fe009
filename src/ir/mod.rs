//! Output element tree.
//!
//! The transformer turns each page's storage tree into a sequence of
//! [`Element`]s. The tree is pure data: deciding how each variant becomes
//! LaTeX source is the renderer's job. Text runs are escaped when they are
//! built, so a renderer can emit [`Element::Text`] contents as is.

mod element;

pub use element::{
    AdmonitionKind, COLUMN_TOKEN, Element, Emoticon, FontSize, Rgb, SectionLevel, Table, TableCell,
    TableRow,
};
