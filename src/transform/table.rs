//! Tables.

use super::{Outcome, RenderMode, Transformer};
use crate::error::{Error, Result};
use crate::ir::{COLUMN_TOKEN, Element, Table, TableCell, TableRow};
use crate::storage::{NodeId, StorageDom};

/// `table`: one output row per `tr`, with the column count taken from the
/// first row. A row uses its `th` cells if it has any, else its `td` cells.
pub(super) fn table<'a>(
    t: &mut Transformer<'a>,
    dom: &'a StorageDom,
    id: NodeId,
    out: &mut Vec<Element>,
) -> Result<Outcome> {
    if t.modes.current().in_table() {
        return Err(Error::NestedTable {
            page: t.current_title().to_string(),
        });
    }

    let mut table = Table {
        preamble: "|".to_string(),
        rows: Vec::new(),
    };

    t.with_mode(RenderMode::Table, |t| {
        for (index, row) in dom.descendants_named(id, "tr").into_iter().enumerate() {
            let mut cells = dom.descendants_named(row, "th");
            let header = !cells.is_empty();
            if !header {
                cells = dom.descendants_named(row, "td");
            }

            if index == 0 {
                table.preamble.push_str(&COLUMN_TOKEN.repeat(cells.len()));
            }

            let mut table_row = TableRow::default();
            for cell in cells {
                let children = t.collect_children(dom, cell)?;
                table_row.cells.push(TableCell { header, children });
            }
            table.rows.push(table_row);
        }
        Ok(())
    })?;

    out.push(Element::Table(table));
    Ok(Outcome::Converted)
}
