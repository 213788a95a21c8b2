//! Key/value views over `<table>` and `<dl>` elements.
//!
//! A table maps the first cell of each row to the remaining cells of that
//! row; rows are taken from the table itself and from its `thead`, `tbody`
//! and `tfoot` groups, in document order. A definition list maps each `dt`
//! to the run of `dd` elements that follow it up to the next `dt`.
//!
//! Keys are compared by their whitespace-normalized string value. A key with
//! no values is not listed by `table-mapped-keys`.
use crate::coerce::CoercedArgs;
use crate::model::{TreeNode, is_element_named};
use crate::runtime::{CallCtx, Error};
use crate::value::Value;

const ROW_GROUPS: [&str; 3] = ["thead", "tbody", "tfoot"];

struct Entry<N> {
    key: String,
    values: Vec<N>,
}

fn normalize_space(s: &str) -> String {
    s.split(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn table_rows<N: TreeNode>(table: &N) -> Vec<N> {
    let mut rows = Vec::new();
    for child in table.child_elements() {
        if is_element_named(&child, "tr") {
            rows.push(child);
        } else if ROW_GROUPS.iter().any(|g| is_element_named(&child, g)) {
            rows.extend(
                child
                    .child_elements()
                    .into_iter()
                    .filter(|r| is_element_named(r, "tr")),
            );
        }
    }
    rows
}

fn table_entries<N: TreeNode>(table: &N) -> Vec<Entry<N>> {
    table_rows(table)
        .into_iter()
        .filter_map(|row| {
            let mut cells = row
                .child_elements()
                .into_iter()
                .filter(|c| is_element_named(c, "th") || is_element_named(c, "td"));
            let key_cell = cells.next()?;
            Some(Entry {
                key: normalize_space(&key_cell.string_value()),
                values: cells.collect(),
            })
        })
        .collect()
}

fn definition_entries<N: TreeNode>(dl: &N) -> Vec<Entry<N>> {
    let mut entries: Vec<Entry<N>> = Vec::new();
    for child in dl.child_elements() {
        if is_element_named(&child, "dt") {
            entries.push(Entry {
                key: normalize_space(&child.string_value()),
                values: Vec::new(),
            });
        } else if is_element_named(&child, "dd")
            && let Some(current) = entries.last_mut()
        {
            current.values.push(child);
        }
    }
    entries
}

/// Entries of the subject node; `None` when there is no subject.
fn entries<N: TreeNode>(args: &CoercedArgs<N>) -> Result<Option<Vec<Entry<N>>>, Error> {
    let Some(node) = args.context_node.as_ref() else {
        return Ok(None);
    };
    if is_element_named(node, "table") {
        Ok(Some(table_entries(node)))
    } else if is_element_named(node, "dl") {
        Ok(Some(definition_entries(node)))
    } else {
        let tag = node
            .tag_name()
            .unwrap_or_else(|| format!("{:?}", node.kind()).to_ascii_lowercase());
        Err(Error::UnsupportedElement {
            function: args.function.clone(),
            tag,
        })
    }
}

/// `table-mapped-keys([node-set])`: keys in document order, as text.
pub(super) fn table_mapped_keys<N: TreeNode>(
    _ctx: &CallCtx<N>,
    args: CoercedArgs<N>,
) -> Result<Value<N>, Error> {
    let keys = entries(&args)?
        .unwrap_or_default()
        .into_iter()
        .filter(|e| !e.values.is_empty())
        .map(|e| e.key);
    Ok(Value::texts(keys))
}

/// `table-mapped-value([node-set,] key)`: value cells/definitions of every
/// entry whose key equals `key`, concatenated in document order.
pub(super) fn table_mapped_value<N: TreeNode>(
    _ctx: &CallCtx<N>,
    args: CoercedArgs<N>,
) -> Result<Value<N>, Error> {
    let key = args.string(0)?;
    let values = entries(&args)?
        .unwrap_or_default()
        .into_iter()
        .filter(|e| e.key == key)
        .flat_map(|e| e.values);
    Ok(Value::nodes(values))
}
