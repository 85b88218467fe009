//! Output element variants.

use crate::latex::text_run;
use crate::model::{LabelKey, VerbatimKey};

/// A node of the output tree.
///
/// Container variants own their children; the tree never shares nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(
    feature = "cli",
    serde(tag = "type", content = "value", rename_all = "snake_case")
)]
pub enum Element {
    /// Already-escaped LaTeX text.
    Text(String),
    Paragraph(Vec<Element>),
    /// Sectioning unit. The heading text is the children.
    Section {
        level: SectionLevel,
        children: Vec<Element>,
    },
    /// Bold text at a given font size (headings inside tables).
    Sized {
        size: FontSize,
        children: Vec<Element>,
    },
    Bold(Vec<Element>),
    Emph(Vec<Element>),
    Typewriter(Vec<Element>),
    Strikethrough(Vec<Element>),
    Underline(Vec<Element>),
    Subscript(Vec<Element>),
    Superscript(Vec<Element>),
    /// External hyperlink.
    Href { url: String, children: Vec<Element> },
    /// Internal cross-reference.
    Link {
        label: LabelKey,
        children: Vec<Element>,
    },
    OrderedList(Vec<Element>),
    UnorderedList(Vec<Element>),
    /// `tabular` items were spliced into a table cell and need the
    /// in-table item rendering.
    ListItem {
        tabular: bool,
        children: Vec<Element>,
    },
    Table(Table),
    /// Cross-reference target.
    Label(LabelKey),
    Image { path: String },
    /// Reference into the document's verbatim catalog.
    VerbatimUse(VerbatimKey),
    Color { color: Rgb, children: Vec<Element> },
    Admonition {
        kind: AdmonitionKind,
        children: Vec<Element>,
    },
    Blockquote(Vec<Element>),
    Emoticon(Emoticon),
    Rule,
    Newline,
}

impl Element {
    /// Build a text run, escaping `raw` for LaTeX.
    pub fn text(raw: &str) -> Self {
        Element::Text(text_run(raw))
    }

    /// Child elements of a container variant (empty for leaves and tables).
    pub fn children(&self) -> &[Element] {
        match self {
            Element::Paragraph(children)
            | Element::Bold(children)
            | Element::Emph(children)
            | Element::Typewriter(children)
            | Element::Strikethrough(children)
            | Element::Underline(children)
            | Element::Subscript(children)
            | Element::Superscript(children)
            | Element::OrderedList(children)
            | Element::UnorderedList(children)
            | Element::Blockquote(children)
            | Element::Section { children, .. }
            | Element::Sized { children, .. }
            | Element::Href { children, .. }
            | Element::Link { children, .. }
            | Element::ListItem { children, .. }
            | Element::Color { children, .. }
            | Element::Admonition { children, .. } => children,
            Element::Text(_)
            | Element::Table(_)
            | Element::Label(_)
            | Element::Image { .. }
            | Element::VerbatimUse(_)
            | Element::Emoticon(_)
            | Element::Rule
            | Element::Newline => &[],
        }
    }

    /// Concatenated escaped text of this element and its descendants,
    /// including table cells.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Element::Text(text) => out.push_str(text),
            Element::Table(table) => {
                for cell in table.rows.iter().flat_map(|row| &row.cells) {
                    for child in &cell.children {
                        child.collect_text(out);
                    }
                }
            }
            other => {
                for child in other.children() {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Sectioning depth available outside tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum SectionLevel {
    Section,
    Subsection,
    Subsubsection,
    Paragraph,
}

impl SectionLevel {
    /// Sectioning unit for a heading level (1..=5). Level 6 has none.
    pub fn for_heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(SectionLevel::Section),
            2 => Some(SectionLevel::Subsection),
            3 => Some(SectionLevel::Subsubsection),
            4 | 5 => Some(SectionLevel::Paragraph),
            _ => None,
        }
    }

    /// LaTeX command name.
    pub fn command(self) -> &'static str {
        match self {
            SectionLevel::Section => "section",
            SectionLevel::Subsection => "subsection",
            SectionLevel::Subsubsection => "subsubsection",
            SectionLevel::Paragraph => "paragraph",
        }
    }
}

/// LaTeX font size scale, largest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub enum FontSize {
    /// `\Huge`
    Huge2,
    /// `\huge`
    Huge,
    /// `\LARGE`
    Large3,
    /// `\Large`
    Large2,
    /// `\large`
    Large,
    /// `\normalsize`
    Normal,
}

impl FontSize {
    /// Size used for a heading of the given level inside a table.
    pub fn for_heading(level: u8) -> Self {
        match level {
            0 | 1 => FontSize::Huge2,
            2 => FontSize::Huge,
            3 => FontSize::Large3,
            4 => FontSize::Large2,
            5 => FontSize::Large,
            _ => FontSize::Normal,
        }
    }

    /// LaTeX command name.
    pub fn command(self) -> &'static str {
        match self {
            FontSize::Huge2 => "Huge",
            FontSize::Huge => "huge",
            FontSize::Large3 => "LARGE",
            FontSize::Large2 => "Large",
            FontSize::Large => "large",
            FontSize::Normal => "normalsize",
        }
    }
}

/// A table with its column preamble.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Table {
    /// Column specification, e.g. `|X[-1]|X[-1]|`.
    pub preamble: String,
    pub rows: Vec<TableRow>,
}

/// Column token appended to the preamble for each cell of the first row.
pub const COLUMN_TOKEN: &str = "X[-1]|";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct TableCell {
    /// Row was made of `th` cells.
    pub header: bool,
    pub children: Vec<Element>,
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum AdmonitionKind {
    Info,
    Tip,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(rename_all = "snake_case"))]
pub enum Emoticon {
    LightOn,
    Warning,
    Information,
    Tick,
    Smile,
}

impl Emoticon {
    /// Map a storage-format emoticon name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light-on" => Some(Emoticon::LightOn),
            "warning" => Some(Emoticon::Warning),
            "information" => Some(Emoticon::Information),
            "tick" => Some(Emoticon::Tick),
            "smile" => Some(Emoticon::Smile),
            _ => None,
        }
    }
}
