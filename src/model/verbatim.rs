//! Content-addressed catalog of verbatim blocks.
//!
//! LaTeX cannot typeset verbatim text inside most nested arguments, so code
//! blocks are stored once here and referenced from the tree by key. The
//! renderer defines each entry up front and expands keys where they are used.

use std::collections::HashMap;
use std::fmt;

/// Key of a catalog entry. Letters only, so it is usable as a macro name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct VerbatimKey(String);

impl VerbatimKey {
    /// Key for the `index`-th entry: `verbatimA`, ..., `verbatimZ`, `verbatimAA`, ...
    fn for_index(index: usize) -> Self {
        let mut letters = Vec::new();
        let mut n = index + 1;
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        let suffix: String = letters.into_iter().map(char::from).collect();
        VerbatimKey(format!("verbatim{suffix}"))
    }

    /// Inverse of [`VerbatimKey::for_index`].
    fn index(&self) -> Option<usize> {
        let suffix = self.0.strip_prefix("verbatim")?;
        if suffix.is_empty() {
            return None;
        }
        suffix.bytes().try_fold(0usize, |n, b| {
            b.is_ascii_uppercase()
                .then(|| n.checked_mul(26)?.checked_add(usize::from(b - b'A') + 1))
                .flatten()
        })
        .map(|n| n - 1)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerbatimKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct VerbatimEntry {
    pub key: VerbatimKey,
    pub text: String,
}

/// Verbatim blocks of one document, in first-use order.
#[derive(Debug, Default)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
#[cfg_attr(feature = "cli", serde(transparent))]
pub struct VerbatimCatalog {
    entries: Vec<VerbatimEntry>,
    #[cfg_attr(feature = "cli", serde(skip))]
    by_text: HashMap<String, usize>,
}

impl VerbatimCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `text` and return its key. Identical text always yields the
    /// same key.
    pub fn intern(&mut self, text: &str) -> VerbatimKey {
        if let Some(&i) = self.by_text.get(text) {
            return self.entries[i].key.clone();
        }

        let i = self.entries.len();
        let key = VerbatimKey::for_index(i);
        self.entries.push(VerbatimEntry {
            key: key.clone(),
            text: text.to_string(),
        });
        self.by_text.insert(text.to_string(), i);
        key
    }

    /// Text stored under `key`.
    pub fn get(&self, key: &VerbatimKey) -> Option<&str> {
        let entry = self.entries.get(key.index()?)?;
        (&entry.key == key).then_some(entry.text.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerbatimEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
