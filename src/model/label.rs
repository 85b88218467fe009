//! Cross-reference labels.
//!
//! A label is created by whichever comes first: the anchor that defines it or
//! a link that references it. Both paths go through [`LabelRegistry`], so one
//! key always maps to one [`Label`] whatever the order.

use std::collections::HashMap;
use std::fmt;

use super::document::Chapter;

/// Prefix of numbered chapter keys.
const CHAPTER_PREFIX: &str = "chapter.";
/// Prefix of inline chapter keys.
const INLINE_CHAPTER_PREFIX: &str = "inline-chapter-";

/// What a [`LabelKey`] points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LabelKind {
    /// A page or an anchor on a page.
    Anchor,
    /// A chapter heading.
    Chapter,
}

/// Cross-reference key.
///
/// Page/anchor keys are `Title` or `Title-anchor`. Chapter keys use the
/// forms `chapter.N` and `inline-chapter-Title`. The kind is part of the
/// key, so a page titled like a chapter key never collides with one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct LabelKey {
    name: String,
    #[cfg_attr(feature = "cli", serde(skip))]
    kind: LabelKind,
}

impl LabelKey {
    /// Key for an anchor on a page (or the page itself when `anchor` is empty).
    pub fn for_anchor(page_title: &str, anchor: &str) -> Self {
        let name = if anchor.is_empty() {
            page_title.to_string()
        } else {
            format!("{page_title}-{anchor}")
        };
        LabelKey {
            name,
            kind: LabelKind::Anchor,
        }
    }

    /// Key for a chapter heading.
    pub fn for_chapter(chapter: &Chapter) -> Self {
        let name = match chapter.number {
            Some(number) if !chapter.inline => format!("{CHAPTER_PREFIX}{number}"),
            _ => format!("{INLINE_CHAPTER_PREFIX}{}", chapter.title),
        };
        LabelKey {
            name,
            kind: LabelKind::Chapter,
        }
    }

    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    /// Whether this key points at a chapter heading.
    pub fn is_chapter(&self) -> bool {
        self.kind == LabelKind::Chapter
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for LabelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A cross-reference target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Label {
    pub key: LabelKey,
    pub page_title: String,
    pub anchor: String,
    /// The label's anchor point has been emitted (always true for chapters).
    pub defined: bool,
    /// At least one link points here.
    pub referenced: bool,
}

/// Result of registering an anchor definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorDefinition {
    /// No label existed; a defined one was created.
    Created(LabelKey),
    /// A forward reference existed and is now defined.
    Resolved(LabelKey),
    /// The label was already defined; the new anchor must be dropped.
    Duplicate(LabelKey),
}

/// All labels of a formatting run, in creation order.
#[derive(Debug, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct LabelRegistry {
    labels: Vec<Label>,
    #[cfg_attr(feature = "cli", serde(skip))]
    index: HashMap<LabelKey, usize>,
}

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a label.
    pub fn get(&self, key: &LabelKey) -> Option<&Label> {
        self.index.get(key).map(|&i| &self.labels[i])
    }

    /// Whether a target is defined. Chapter keys are self-defining.
    pub fn is_defined(&self, key: &LabelKey) -> bool {
        key.is_chapter() || self.get(key).is_some_and(|label| label.defined)
    }

    /// Register an anchor definition on `page_title`.
    pub fn define_anchor(&mut self, page_title: &str, anchor: &str) -> AnchorDefinition {
        let key = LabelKey::for_anchor(page_title, anchor);
        match self.index.get(&key).copied() {
            Some(i) if self.labels[i].defined => AnchorDefinition::Duplicate(key),
            Some(i) => {
                self.labels[i].defined = true;
                AnchorDefinition::Resolved(key)
            }
            None => {
                self.insert(Label {
                    key: key.clone(),
                    page_title: page_title.to_string(),
                    anchor: anchor.to_string(),
                    defined: true,
                    referenced: false,
                });
                AnchorDefinition::Created(key)
            }
        }
    }

    /// Register a reference to a page or page anchor.
    ///
    /// Creates an undefined label (forward reference) when none exists.
    pub fn reference_anchor(&mut self, page_title: &str, anchor: &str) -> &Label {
        let key = LabelKey::for_anchor(page_title, anchor);
        self.reference(key, page_title, anchor)
    }

    /// Register a reference to a chapter heading.
    pub fn reference_chapter(&mut self, chapter: &Chapter) -> &Label {
        let key = LabelKey::for_chapter(chapter);
        self.reference(key, &chapter.title, "")
    }

    fn reference(&mut self, key: LabelKey, page_title: &str, anchor: &str) -> &Label {
        let i = match self.index.get(&key).copied() {
            Some(i) => i,
            None => self.insert(Label {
                defined: key.is_chapter(),
                key,
                page_title: page_title.to_string(),
                anchor: anchor.to_string(),
                referenced: false,
            }),
        };
        let label = &mut self.labels[i];
        label.referenced = true;
        label
    }

    fn insert(&mut self, label: Label) -> usize {
        let i = self.labels.len();
        self.index.insert(label.key.clone(), i);
        self.labels.push(label);
        i
    }

    /// Labels in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Labels that are referenced but never defined.
    pub fn undefined_references(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(|l| l.referenced && !l.defined)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
