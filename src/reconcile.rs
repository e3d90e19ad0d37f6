//! Merging caller-supplied columns with saved widths.

use tracing::debug;

use crate::column::Column;
use crate::store::WidthStore;

/// Builds the working column list from a column spec.
///
/// The spec is copied, never modified. When `table_id` is set, widths saved
/// for it replace the spec widths of matching columns; columns without a
/// saved entry keep their own width. Without a table id, or when the saved
/// entry cannot be read, the spec passes through unchanged.
pub fn reconcile<A: Clone>(
    spec: &[Column<A>],
    table_id: Option<&str>,
    store: &WidthStore,
) -> Vec<Column<A>> {
    let mut columns = spec.to_vec();

    let Some(table_id) = table_id.filter(|id| !id.is_empty()) else {
        return columns;
    };
    let Some(saved) = store.load(table_id) else {
        return columns;
    };

    let mut restored = 0usize;
    for column in &mut columns {
        let width = column.id().and_then(|id| saved.get(id)).copied();
        if let Some(width) = width {
            column.width = Some(width);
            restored += 1;
        }
    }
    debug!(
        table = table_id,
        restored,
        total = columns.len(),
        "restored saved column widths"
    );

    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> Vec<Column> {
        vec![
            Column::new("Name", 100).with_key("name"),
            Column::new("Age", 50).with_key("age").with_resizable(false),
            Column::without_width("Notes"),
        ]
    }

    #[test]
    fn test_passthrough_without_table_id() {
        let store = WidthStore::in_memory();
        let cols: Vec<Column> = vec![Column::new("Name", 7).with_key("name")];
        store.save("users", &cols);

        assert_eq!(reconcile(&spec(), None, &store), spec());
        assert_eq!(reconcile(&spec(), Some(""), &store), spec());
    }

    #[test]
    fn test_passthrough_without_saved_widths() {
        let store = WidthStore::in_memory();
        assert_eq!(reconcile(&spec(), Some("users"), &store), spec());
    }

    #[test]
    fn test_saved_widths_override_spec() {
        let store = WidthStore::in_memory();
        let saved: Vec<Column> = vec![
            Column::new("Name", 130).with_key("name"),
            Column::new("Notes", 40),
            Column::new("Gone", 10),
        ];
        store.save("users", &saved);

        let cols = reconcile(&spec(), Some("users"), &store);
        assert_eq!(cols[0].width, Some(130));
        assert_eq!(cols[1].width, Some(50));
        assert_eq!(cols[2].width, Some(40));
        assert_eq!(cols.len(), 3);
    }

    #[test]
    fn test_spec_is_not_mutated() {
        let store = WidthStore::in_memory();
        let saved: Vec<Column> = vec![Column::new("Name", 130).with_key("name")];
        store.save("users", &saved);

        let original = spec();
        let cols = reconcile(&original, Some("users"), &store);
        assert_eq!(original[0].width, Some(100));
        assert_eq!(cols[0].width, Some(130));
    }

    #[test]
    fn test_idempotent() {
        let store = WidthStore::in_memory();
        let saved: Vec<Column> = vec![Column::new("Name", 130).with_key("name")];
        store.save("users", &saved);

        let first = reconcile(&spec(), Some("users"), &store);
        let second = reconcile(&spec(), Some("users"), &store);
        assert_eq!(first, second);
    }

    #[test]
    fn test_corrupt_entry_falls_back_to_spec() {
        use crate::store::{KeyValueStore, MemoryStore};

        let mem = MemoryStore::new();
        mem.set("table_size::users", "{\"name\":").unwrap();
        let store = WidthStore::new(mem);

        assert_eq!(reconcile(&spec(), Some("users"), &store), spec());
    }
}
