//! Formatting options.

use std::path::{Path, PathBuf};

/// Options controlling a formatting run.
///
/// # Example
///
/// ```
/// use spacetex::FormatOptions;
///
/// let options = FormatOptions::default()
///     .with_create_missing_chapters(false)
///     .with_image_root("/tmp/space/images");
/// assert!(!options.create_missing_chapters);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Create appendix chapters for pages (and chapter links) that the
    /// document definition does not mention.
    pub create_missing_chapters: bool,
    /// Directory images were downloaded into.
    pub image_root: PathBuf,
    /// Space-key prefixes whose cross-space links are dropped.
    pub ignored_space_prefixes: Vec<String>,
    /// Link texts of site navigation links, which are dropped.
    pub navigation_labels: Vec<String>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            create_missing_chapters: true,
            image_root: PathBuf::from("."),
            ignored_space_prefixes: Vec::new(),
            navigation_labels: vec!["Previous".to_string(), "Next".to_string()],
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create_missing_chapters(mut self, create: bool) -> Self {
        self.create_missing_chapters = create;
        self
    }

    pub fn with_image_root(mut self, root: impl AsRef<Path>) -> Self {
        self.image_root = root.as_ref().to_path_buf();
        self
    }

    pub fn with_ignored_space_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.ignored_space_prefixes.push(prefix.into());
        self
    }

    pub fn with_navigation_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.navigation_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Whether links into `space` are dropped.
    pub fn is_ignored_space(&self, space: &str) -> bool {
        self.ignored_space_prefixes
            .iter()
            .any(|prefix| space.starts_with(prefix.as_str()))
    }

    /// Whether `text` is a navigation link text.
    pub fn is_navigation_label(&self, text: &str) -> bool {
        self.navigation_labels.iter().any(|label| label == text)
    }

    /// Path of an image below [`image_root`](Self::image_root), with `/`
    /// separators.
    pub fn image_path(&self, relative: &str) -> String {
        let root = self.image_root.to_string_lossy();
        let root = root.trim_end_matches(['/', '\\']);
        if root.is_empty() {
            format!("/{relative}")
        } else {
            format!("{root}/{relative}")
        }
    }
}
