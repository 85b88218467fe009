//! Rendering modes.
//!
//! Tables and lists inside tables change what the target format allows, so
//! the transformer keeps a stack of mode frames instead of loose flags. The
//! stack only ever grows `Table` → `TableList`: handlers refuse to push a
//! second table or a second in-table list.

/// Where converted elements will end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Regular body text.
    #[default]
    Body,
    /// Inside a table cell.
    Table,
    /// Inside a list that was spliced into a table cell.
    TableList,
}

impl RenderMode {
    /// Whether sectioning and nested tables are off limits.
    pub fn in_table(self) -> bool {
        !matches!(self, RenderMode::Body)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ModeStack {
    frames: Vec<RenderMode>,
}

impl ModeStack {
    pub(crate) fn current(&self) -> RenderMode {
        self.frames.last().copied().unwrap_or_default()
    }

    pub(crate) fn push(&mut self, mode: RenderMode) {
        self.frames.push(mode);
    }

    pub(crate) fn pop(&mut self) {
        self.frames.pop();
    }
}
