//! Document skeleton: parts, chapters and the chapter registry.

use std::collections::HashMap;

use log::warn;

use super::verbatim::VerbatimCatalog;
use crate::ir::Element;

/// Title of the part that collects chapters created on demand.
pub const APPENDIX_TITLE: &str = "Appendix";

/// Default date, rendered by LaTeX as the build date.
pub const DEFAULT_DATE: &str = "\\today";

/// Handle to a chapter owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct ChapterId(usize);

/// One page's rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Chapter {
    pub title: String,
    /// Assigned on registration; inline chapters are never numbered.
    pub number: Option<u32>,
    /// Rendered without a chapter heading of its own.
    pub inline: bool,
    pub elements: Vec<Element>,
}

/// A group of chapters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Part {
    pub title: String,
    chapters: Vec<ChapterId>,
}

impl Part {
    /// Chapters of this part, in order.
    pub fn chapter_ids(&self) -> &[ChapterId] {
        &self.chapters
    }
}

/// A top-level entry of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(tag = "type", rename_all = "snake_case"))]
pub enum DocumentPart {
    /// Where the table of contents goes.
    TableOfContents,
    Part(Part),
    Chapter { id: ChapterId },
}

/// Index of a part within [`Document::parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartId(usize);

/// The document being built.
///
/// Chapters are owned by the document and referenced by [`ChapterId`] from
/// parts and from the title registry, which always hold the same set.
#[derive(Debug)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Document {
    pub title: String,
    pub author: String,
    pub date: String,
    pub base_url: String,
    pub space: String,
    parts: Vec<DocumentPart>,
    chapters: Vec<Chapter>,
    #[cfg_attr(feature = "cli", serde(skip))]
    registry: HashMap<String, ChapterId>,
    #[cfg_attr(feature = "cli", serde(skip))]
    appendix: Option<PartId>,
    #[cfg_attr(feature = "cli", serde(skip))]
    next_number: u32,
    pub verbatim: VerbatimCatalog,
}

impl Document {
    /// Create an empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: String::new(),
            date: DEFAULT_DATE.to_string(),
            base_url: String::new(),
            space: String::new(),
            parts: Vec::new(),
            chapters: Vec::new(),
            registry: HashMap::new(),
            appendix: None,
            next_number: 1,
            verbatim: VerbatimCatalog::new(),
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_space(mut self, space: impl Into<String>) -> Self {
        self.space = space.into();
        self
    }

    /// Mark where the table of contents goes.
    pub fn add_table_of_contents(&mut self) {
        self.parts.push(DocumentPart::TableOfContents);
    }

    /// Append an empty part.
    pub fn add_part(&mut self, title: impl Into<String>) -> PartId {
        let id = PartId(self.parts.len());
        self.parts.push(DocumentPart::Part(Part {
            title: title.into(),
            chapters: Vec::new(),
        }));
        id
    }

    /// Register a chapter, inside `part` or at the top level.
    ///
    /// Non-inline chapters take the next chapter number. A title that is
    /// already registered returns the existing chapter unchanged.
    pub fn add_chapter(
        &mut self,
        part: Option<PartId>,
        title: impl Into<String>,
        inline: bool,
    ) -> ChapterId {
        let title = title.into();
        if let Some(&existing) = self.registry.get(&title) {
            warn!("Chapter registered twice: {title}");
            return existing;
        }

        let number = if inline {
            None
        } else {
            let n = self.next_number;
            self.next_number += 1;
            Some(n)
        };

        let id = ChapterId(self.chapters.len());
        self.chapters.push(Chapter {
            title: title.clone(),
            number,
            inline,
            elements: Vec::new(),
        });
        self.registry.insert(title, id);

        match part.and_then(|p| self.parts.get_mut(p.0)) {
            Some(DocumentPart::Part(part)) => part.chapters.push(id),
            _ => self.parts.push(DocumentPart::Chapter { id }),
        }
        id
    }

    /// Resolve a chapter by exact title.
    ///
    /// When absent and `create` is set, the chapter is created in the
    /// appendix part, which itself is created on first use.
    pub fn get_chapter(&mut self, title: &str, create: bool) -> Option<ChapterId> {
        if let Some(&id) = self.registry.get(title) {
            return Some(id);
        }
        if !create {
            return None;
        }

        let appendix = match self.appendix {
            Some(appendix) => appendix,
            None => {
                let appendix = self.add_part(APPENDIX_TITLE);
                self.appendix = Some(appendix);
                appendix
            }
        };
        Some(self.add_chapter(Some(appendix), title, false))
    }

    /// Look up a chapter without creating it.
    pub fn find_chapter(&self, title: &str) -> Option<&Chapter> {
        self.registry.get(title).map(|&id| self.chapter(id))
    }

    pub fn chapter(&self, id: ChapterId) -> &Chapter {
        &self.chapters[id.0]
    }

    pub fn chapter_mut(&mut self, id: ChapterId) -> &mut Chapter {
        &mut self.chapters[id.0]
    }

    /// Top-level entries in order.
    pub fn parts(&self) -> &[DocumentPart] {
        &self.parts
    }

    /// The appendix part, if any chapter was created on demand.
    pub fn appendix(&self) -> Option<&Part> {
        match self.appendix.and_then(|p| self.parts.get(p.0)) {
            Some(DocumentPart::Part(part)) => Some(part),
            _ => None,
        }
    }

    /// Chapters of a part, in order.
    pub fn chapters_of<'a>(&'a self, part: &'a Part) -> impl Iterator<Item = &'a Chapter> + 'a {
        part.chapters.iter().map(|&id| self.chapter(id))
    }

    /// Every chapter reachable from the top-level entries, in document order.
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.parts.iter().flat_map(move |entry| {
            let ids: &[ChapterId] = match entry {
                DocumentPart::TableOfContents => &[],
                DocumentPart::Part(part) => &part.chapters,
                DocumentPart::Chapter { id } => std::slice::from_ref(id),
            };
            ids.iter().map(move |&id| self.chapter(id))
        })
    }

    /// Number of registered chapters.
    pub fn chapter_count(&self) -> usize {
        self.registry.len()
    }
}
