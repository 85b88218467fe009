//! Loaded wiki pages and the page store.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};

use crate::error::Result;
use crate::storage::{NodeId, StorageDom, outer_markup, parse_storage};

/// An image attached to a page, keyed by the markup that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Id of the page the attachment belongs to (may differ from the
    /// referencing page).
    pub owner_page_id: String,
    pub filename: String,
    /// Canonical `ac:image` markup.
    pub markup: String,
}

impl ImageRef {
    /// Build an image reference from raw `ac:image` markup, canonicalizing it.
    pub fn from_markup(
        owner_page_id: impl Into<String>,
        filename: impl Into<String>,
        raw_markup: &str,
    ) -> Result<Self> {
        let dom = parse_storage(raw_markup.trim())?;
        let markup = outer_markup(&dom, dom.document());
        Ok(Self {
            owner_page_id: owner_page_id.into(),
            filename: filename.into(),
            markup,
        })
    }

    /// Path relative to the image download directory.
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.owner_page_id, self.filename)
    }
}

/// A parsed page.
///
/// The two flags are cells: the transformer updates them while it holds
/// shared borrows of other pages' content.
#[derive(Debug)]
pub struct Page {
    title: String,
    id: String,
    dom: StorageDom,
    root: NodeId,
    images: BTreeMap<String, ImageRef>,
    excluded: Cell<bool>,
    already_included: Cell<bool>,
}

impl Page {
    /// Create a page whose content is the children of `root` in `dom`.
    pub fn new(title: impl Into<String>, id: impl Into<String>, dom: StorageDom, root: NodeId) -> Self {
        Self {
            title: title.into(),
            id: id.into(),
            dom,
            root,
            images: BTreeMap::new(),
            excluded: Cell::new(false),
            already_included: Cell::new(false),
        }
    }

    /// Create a page from a storage-format fragment.
    pub fn from_storage(title: impl Into<String>, id: impl Into<String>, markup: &str) -> Result<Self> {
        let dom = parse_storage(markup)?;
        let root = dom.document();
        Ok(Self::new(title, id, dom, root))
    }

    pub fn with_image(mut self, image: ImageRef) -> Self {
        self.add_image(image);
        self
    }

    pub fn add_image(&mut self, image: ImageRef) {
        self.images.insert(image.markup.clone(), image);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The content tree.
    pub fn dom(&self) -> &StorageDom {
        &self.dom
    }

    /// Node whose children are the page content.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Exact lookup by canonical markup.
    pub fn image(&self, markup: &str) -> Option<&ImageRef> {
        self.images.get(markup)
    }

    /// First image whose markup contains `fragment`.
    pub fn image_containing(&self, fragment: &str) -> Option<&ImageRef> {
        self.images.values().find(|image| image.markup.contains(fragment))
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageRef> {
        self.images.values()
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded.get()
    }

    pub fn set_excluded(&self, excluded: bool) {
        self.excluded.set(excluded);
    }

    pub fn already_included(&self) -> bool {
        self.already_included.get()
    }

    /// Mark the page as rendered, returning whether it already was.
    pub fn mark_included(&self) -> bool {
        self.already_included.replace(true)
    }
}

/// Pages of a space, looked up by title ignoring case, iterated in insertion
/// order.
#[derive(Debug, Default)]
pub struct PageStore {
    pages: Vec<Page>,
    index: HashMap<String, usize>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page. A page with the same title (ignoring case) is replaced in
    /// place and returned.
    pub fn insert(&mut self, page: Page) -> Option<Page> {
        let key = page.title.to_lowercase();
        match self.index.get(&key).copied() {
            Some(i) => Some(std::mem::replace(&mut self.pages[i], page)),
            None => {
                self.index.insert(key, self.pages.len());
                self.pages.push(page);
                None
            }
        }
    }

    pub fn get(&self, title: &str) -> Option<&Page> {
        self.index
            .get(&title.to_lowercase())
            .map(|&i| &self.pages[i])
    }

    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(&title.to_lowercase())
    }

    /// Exclude a page from formatting. Returns false if no such page exists.
    pub fn exclude(&self, title: &str) -> bool {
        match self.get(title) {
            Some(page) => {
                page.set_excluded(true);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }

    /// Titles of pages that are neither excluded nor rendered anywhere.
    pub fn unreferenced(&self) -> Vec<&str> {
        self.pages
            .iter()
            .filter(|p| !p.is_excluded() && !p.already_included())
            .map(|p| p.title())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl<'a> IntoIterator for &'a PageStore {
    type Item = &'a Page;
    type IntoIter = std::slice::Iter<'a, Page>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

impl FromIterator<Page> for PageStore {
    fn from_iter<I: IntoIterator<Item = Page>>(iter: I) -> Self {
        let mut store = PageStore::new();
        for page in iter {
            store.insert(page);
        }
        store
    }
}
