//! LaTeX target-syntax helpers.
//!
//! Only the parts of LaTeX the element tree needs to decide up front live
//! here: text escaping and protection of identifiers that look like URLs.

mod escape;

pub use escape::{escape_latex, text_run};
