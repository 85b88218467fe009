//! Storage tree → output element tree.
//!
//! [`format`] walks every page of a [`PageStore`] and fills the matching
//! chapters of a [`Document`]. The walk carries its state in a
//! [`Transformer`]: the stack of pages being rendered (includes push onto
//! it), the table/list rendering mode, the label registry and the collected
//! diagnostics.
//!
//! Each node is routed through a lookup table ([`dispatch`]) to a handler.
//! Handlers return `Err` for structural errors that abort the run, or an
//! [`Outcome`] that is either a clean conversion or a recovered problem
//! worth a warning.

mod block;
mod dispatch;
mod inline;
mod links;
mod macros;
mod media;
mod mode;
mod style;
mod table;
mod verbatim;

use log::{debug, info, warn};

use crate::config::FormatOptions;
use crate::error::{Error, Result};
use crate::ir::Element;
use crate::model::{Document, LabelRegistry, Page, PageStore};
use crate::storage::{NodeId, StorageDom};

pub use dispatch::NodeKey;
pub use mode::RenderMode;
use mode::ModeStack;

/// A recovered problem, attributed to the page being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Diagnostic {
    pub page: String,
    pub message: String,
}

/// Everything a formatting run produces besides the filled-in document.
#[derive(Debug, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct FormatOutput {
    pub labels: LabelRegistry,
    /// Pages neither excluded nor rendered anywhere.
    pub unreferenced_pages: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of a node handler that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Converted,
    /// The node was dropped or degraded; the message is reported.
    Recovered(String),
}

/// Format every page of `pages` into `document`.
///
/// Pages are visited in store order. Each non-excluded page is resolved to a
/// chapter with [`Document::get_chapter`]; pages without a chapter are
/// skipped.
pub fn format(
    pages: &PageStore,
    document: &mut Document,
    options: &FormatOptions,
) -> Result<FormatOutput> {
    let mut transformer = Transformer::new(pages, document, options);

    for page in pages {
        if page.is_excluded() {
            info!("Page excluded as requested: {}", page.title());
            continue;
        }

        let Some(chapter) = transformer
            .document
            .get_chapter(page.title(), options.create_missing_chapters)
        else {
            debug!("No chapter for page {}, skipping", page.title());
            continue;
        };

        info!("Formatting page: {}", page.title());
        let mut elements = Vec::new();
        transformer.render_page(page, &mut elements)?;
        transformer
            .document
            .chapter_mut(chapter)
            .elements
            .extend(elements);
    }

    let unreferenced_pages: Vec<String> = pages
        .unreferenced()
        .into_iter()
        .map(str::to_string)
        .collect();
    for title in &unreferenced_pages {
        info!("Page not referenced: {title}");
    }

    Ok(FormatOutput {
        labels: transformer.labels,
        unreferenced_pages,
        diagnostics: transformer.diagnostics,
    })
}

/// State threaded through the conversion of one document.
pub struct Transformer<'a> {
    pages: &'a PageStore,
    document: &'a mut Document,
    options: &'a FormatOptions,
    labels: LabelRegistry,
    /// Pages being rendered; the last one owns the nodes being converted.
    stack: Vec<&'a Page>,
    modes: ModeStack,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Transformer<'a> {
    pub fn new(pages: &'a PageStore, document: &'a mut Document, options: &'a FormatOptions) -> Self {
        Self {
            pages,
            document,
            options,
            labels: LabelRegistry::new(),
            stack: Vec::new(),
            modes: ModeStack::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Labels registered so far.
    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Render `page`'s content into `out`, marking it as included.
    ///
    /// Used both for top-level pages and for included ones.
    pub fn render_page(&mut self, page: &'a Page, out: &mut Vec<Element>) -> Result<()> {
        self.enter_page(page)?;
        if page.mark_included() {
            self.warn(format!("Page already included: {}", page.title()));
        }
        let result = self.convert_children(page.dom(), page.root(), out);
        self.stack.pop();
        result
    }

    fn enter_page(&mut self, page: &'a Page) -> Result<()> {
        if self.stack.iter().any(|open| std::ptr::eq(*open, page)) {
            let mut chain: Vec<&str> = self.stack.iter().map(|p| p.title()).collect();
            chain.push(page.title());
            return Err(Error::IncludeCycle {
                chain: chain.join(" -> "),
            });
        }
        self.stack.push(page);
        Ok(())
    }

    /// Page whose content is being converted.
    fn current_page(&self) -> Option<&'a Page> {
        self.stack.last().copied()
    }

    fn current_title(&self) -> &str {
        self.stack.last().map_or("", |page| page.title())
    }

    /// Record and log a recovered problem.
    fn warn(&mut self, message: String) {
        let page = self.current_title().to_string();
        warn!("{page}: {message}");
        self.diagnostics.push(Diagnostic { page, message });
    }

    /// Convert a sequence of nodes, appending to `out`.
    pub fn convert<I>(&mut self, dom: &'a StorageDom, nodes: I, out: &mut Vec<Element>) -> Result<()>
    where
        I: IntoIterator<Item = NodeId>,
    {
        for id in nodes {
            self.convert_node(dom, id, out)?;
        }
        Ok(())
    }

    /// Convert the children of `parent`, appending to `out`.
    pub fn convert_children(
        &mut self,
        dom: &'a StorageDom,
        parent: NodeId,
        out: &mut Vec<Element>,
    ) -> Result<()> {
        self.convert(dom, dom.children(parent), out)
    }

    /// Convert a single node through the dispatch table.
    pub fn convert_node(&mut self, dom: &'a StorageDom, id: NodeId, out: &mut Vec<Element>) -> Result<()> {
        let key = NodeKey::of(dom, id);
        let Some(handler) = dispatch::route(&key) else {
            return Err(Error::UnsupportedNode {
                page: self.current_title().to_string(),
                node: key.to_string(),
            });
        };

        if let Outcome::Recovered(message) = handler(self, dom, id, out)? {
            self.warn(message);
        }
        Ok(())
    }

    /// Convert the children of `parent` into a fresh sequence.
    fn collect_children(&mut self, dom: &'a StorageDom, parent: NodeId) -> Result<Vec<Element>> {
        let mut children = Vec::new();
        self.convert_children(dom, parent, &mut children)?;
        Ok(children)
    }

    /// Convert the children of `parent` and push them wrapped by `wrap`.
    fn wrap_children(
        &mut self,
        dom: &'a StorageDom,
        parent: NodeId,
        out: &mut Vec<Element>,
        wrap: impl FnOnce(Vec<Element>) -> Element,
    ) -> Result<Outcome> {
        let children = self.collect_children(dom, parent)?;
        out.push(wrap(children));
        Ok(Outcome::Converted)
    }

    /// Run `f` with `mode` pushed onto the mode stack.
    fn with_mode<T>(&mut self, mode: RenderMode, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.modes.push(mode);
        let result = f(self);
        self.modes.pop();
        result
    }
}

#[cfg(test)]
mod tests;
