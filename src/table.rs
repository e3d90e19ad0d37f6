//! The resizable table instance.

use tracing::debug;

use crate::column::Column;
use crate::drag::{ContainerRect, DragController, DragSession, Indicator};
use crate::header::{HeaderCell, header_cell};
use crate::reconcile::reconcile;
use crate::registry::IdentityGuard;
use crate::store::WidthStore;

/// Tunables for a `ResizeTable`.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Narrowest width a resize can commit. Default: 1 cell.
    pub min_column_width: u16,
    /// Warn when another live table uses the same identity.
    /// Default: on in debug builds.
    pub dev_identity_check: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_column_width: 1,
            dev_identity_check: cfg!(debug_assertions),
        }
    }
}

impl TableConfig {
    /// Creates a config with a custom minimum column width.
    pub fn new(min_column_width: u16) -> Self {
        Self {
            min_column_width,
            ..Self::default()
        }
    }
}

/// A table whose column widths follow user drags and persist per identity.
///
/// The table owns the working column list. Callers hand in a fresh column
/// spec through `set_columns` whenever theirs changes; the collaborator that
/// draws the table reports its container through `set_geometry` and forwards
/// gestures through the handlers returned by `header_cells`.
#[derive(Debug)]
pub struct ResizeTable<A = ()> {
    table_id: Option<String>,
    store: WidthStore,
    config: TableConfig,
    /// Working column list.
    columns: Vec<Column<A>>,
    /// Bumped on every change to `columns`.
    revision: u64,
    drag: DragController,
    geometry: ContainerRect,
    _identity: Option<IdentityGuard>,
}

impl<A: Clone> ResizeTable<A> {
    /// Creates a table and reconciles `spec` against saved widths.
    ///
    /// Without a `table_id` nothing is read or written.
    pub fn new(table_id: Option<&str>, spec: &[Column<A>], store: WidthStore) -> Self {
        Self::with_config(table_id, spec, store, TableConfig::default())
    }

    /// Creates a table with explicit configuration.
    pub fn with_config(
        table_id: Option<&str>,
        spec: &[Column<A>],
        store: WidthStore,
        config: TableConfig,
    ) -> Self {
        let table_id = table_id.filter(|id| !id.is_empty()).map(str::to_string);
        let identity = match &table_id {
            Some(id) if config.dev_identity_check => Some(IdentityGuard::register(id)),
            _ => None,
        };
        let mut table = Self {
            table_id,
            store,
            drag: DragController::new(config.min_column_width),
            config,
            columns: Vec::new(),
            revision: 0,
            geometry: ContainerRect::default(),
            _identity: identity,
        };
        table.set_columns(spec);
        table
    }

    /// Replaces the column spec.
    ///
    /// Saved widths are applied again. A gesture in progress is dropped.
    pub fn set_columns(&mut self, spec: &[Column<A>]) {
        if self.drag.is_dragging() {
            debug!("column spec changed during resize, dropping gesture");
            self.drag.cancel();
        }
        self.columns = reconcile(spec, self.table_id.as_deref(), &self.store);
        self.revision += 1;
    }

    /// Working column list.
    pub fn columns(&self) -> &[Column<A>] {
        &self.columns
    }

    /// Changes whenever the working column list changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn table_id(&self) -> Option<&str> {
        self.table_id.as_deref()
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Records where the table container is drawn.
    pub fn set_geometry(&mut self, geometry: ContainerRect) {
        self.geometry = geometry;
    }

    pub fn geometry(&self) -> ContainerRect {
        self.geometry
    }

    /// Header cell configuration for every column, in order.
    pub fn header_cells(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| header_cell(col, i))
            .collect()
    }

    /// Header cell configuration for one column.
    pub fn header_cell(&self, index: usize) -> Option<HeaderCell> {
        self.columns.get(index).map(|col| header_cell(col, index))
    }

    /// Current gesture state.
    pub fn drag_session(&self) -> &DragSession {
        self.drag.session()
    }

    pub fn is_resizing(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Indicator line for the gesture in progress.
    pub fn indicator(&self) -> Option<Indicator> {
        self.drag.indicator()
    }

    /// Starts resizing `column` at pointer X.
    pub fn resize_start(&mut self, column: usize, pointer_x: i32) {
        self.drag.start(column, pointer_x, &self.geometry);
    }

    /// Moves the indicator. Returns true if it moved.
    pub fn resize_move(&mut self, pointer_x: i32) -> bool {
        self.drag.drag_to(pointer_x, &self.geometry)
    }

    /// Finishes resizing `column`, commits the new width and saves the widths.
    ///
    /// Returns the committed width.
    pub fn resize_end(&mut self, column: usize, pointer_x: i32, reported_width: u16) -> Option<u16> {
        let commit = self
            .drag
            .end(column, pointer_x, reported_width, &self.geometry)?;

        let Some(current) = self.columns.get(commit.column) else {
            debug!(column = commit.column, "resized column no longer exists");
            return None;
        };
        self.columns[commit.column] = current.resized(commit.width);
        self.revision += 1;

        if let Some(table_id) = &self.table_id {
            self.store.save(table_id, &self.columns);
        }
        Some(commit.width)
    }

    /// Abandons the gesture in progress.
    pub fn cancel_resize(&mut self) {
        self.drag.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{PointerEvent, ResizeData};
    use crate::store::{FailingStore, KeyValueStore, MemoryStore};

    fn users() -> Vec<Column> {
        vec![
            Column::new("Name", 100).with_key("name"),
            Column::new("Age", 50).with_key("age").with_resizable(false),
        ]
    }

    fn table(id: Option<&str>, store: &WidthStore) -> ResizeTable {
        let config = TableConfig {
            dev_identity_check: false,
            ..TableConfig::default()
        };
        let mut t = ResizeTable::with_config(id, &users(), store.clone(), config);
        t.set_geometry(ContainerRect::new(0, 400, 20));
        t
    }

    #[test]
    fn test_users_scenario() {
        let mem = MemoryStore::new();
        let store = WidthStore::new(mem.clone());
        let mut t = table(Some("users"), &store);

        let cells = t.header_cells();
        let handlers = cells[0].handlers().unwrap();
        assert!(cells[1].handlers().is_none());

        handlers.on_resize_start(&mut t, PointerEvent::at(100), ResizeData::new(100, 0));
        handlers.on_resize(&mut t, PointerEvent::at(115), ResizeData::new(115, 0));
        handlers.on_resize_stop(&mut t, PointerEvent::at(130), ResizeData::new(100, 0));

        assert_eq!(t.columns()[0].width, Some(130));
        let raw = mem.get("table_size::users").unwrap().unwrap();
        assert_eq!(raw, r#"{"age":50,"name":130}"#);

        let again = table(Some("users"), &store);
        assert_eq!(again.columns()[0].width, Some(130));
        assert_eq!(again.columns()[1].width, Some(50));
    }

    #[test]
    fn test_round_trip_after_spec_change() {
        let store = WidthStore::in_memory();
        let mut t = table(Some("users"), &store);
        t.resize_start(0, 100);
        assert_eq!(t.resize_end(0, 80, 100), Some(80));

        t.set_columns(&users());
        assert_eq!(t.columns()[0].width, Some(80));
    }

    #[test]
    fn test_no_identity_no_persistence() {
        let mem = MemoryStore::new();
        let store = WidthStore::new(mem.clone());
        let mut t = table(None, &store);

        t.resize_start(0, 100);
        assert_eq!(t.resize_end(0, 110, 100), Some(110));
        assert_eq!(t.columns()[0].width, Some(110));
        assert!(mem.is_empty());

        t.set_columns(&users());
        assert_eq!(t.columns()[0].width, Some(100));
    }

    #[test]
    fn test_write_failure_keeps_committed_width() {
        let store = WidthStore::new(FailingStore);
        let mut t = table(Some("users"), &store);
        assert_eq!(t.columns()[0].width, Some(100));

        t.resize_start(0, 100);
        assert_eq!(t.resize_end(0, 130, 100), Some(130));
        assert_eq!(t.columns()[0].width, Some(130));
        assert!(!t.is_resizing());
    }

    #[test]
    fn test_move_leaves_widths_alone() {
        let store = WidthStore::in_memory();
        let mut t = table(Some("users"), &store);
        let before = t.revision();

        t.resize_start(0, 100);
        assert!(t.resize_move(150));
        assert!(!t.resize_move(-1));
        assert!(!t.resize_move(401));

        assert_eq!(t.columns()[0].width, Some(100));
        assert_eq!(t.revision(), before);
        assert_eq!(t.indicator().unwrap().left, 150);
        assert_eq!(t.indicator().unwrap().height, 20);
        assert!(store.load("users").is_none());
    }

    #[test]
    fn test_spec_change_drops_gesture() {
        let store = WidthStore::in_memory();
        let mut t = table(Some("users"), &store);
        t.resize_start(0, 100);
        assert!(t.is_resizing());

        t.set_columns(&users());
        assert!(!t.is_resizing());
        assert_eq!(t.resize_end(0, 150, 100), None);
        assert_eq!(t.columns()[0].width, Some(100));
    }

    #[test]
    fn test_resize_end_replaces_column() {
        let store = WidthStore::in_memory();
        let mut t = table(Some("users"), &store);
        let before = t.revision();

        t.resize_start(0, 100);
        t.resize_end(0, 105, 100);
        assert_eq!(t.revision(), before + 1);
        assert_eq!(t.columns()[0].title, "Name");
        assert_eq!(t.columns()[0].key.as_deref(), Some("name"));
        assert_eq!(t.columns()[1], users()[1]);
    }

    #[test]
    fn test_geometry_offsets_pointer() {
        let store = WidthStore::in_memory();
        let mut t = table(Some("users"), &store);
        t.set_geometry(ContainerRect::new(50, 100, 5));

        t.resize_start(0, 60);
        assert_eq!(t.drag_session().origin_x, 10);
        assert!(!t.resize_move(49));
        assert!(!t.resize_move(151));
        assert!(t.resize_move(150));
        assert_eq!(t.resize_end(0, 70, 20), Some(30));
    }

    #[test]
    fn test_min_width_config() {
        let store = WidthStore::in_memory();
        let config = TableConfig {
            min_column_width: 5,
            dev_identity_check: false,
        };
        let mut t = ResizeTable::with_config(Some("users"), &users(), store, config);
        t.set_geometry(ContainerRect::new(0, 400, 20));

        t.resize_start(0, 300);
        assert_eq!(t.resize_end(0, 0, 100), Some(5));
    }

    #[test]
    fn test_empty_identity_treated_as_none() {
        let mem = MemoryStore::new();
        let store = WidthStore::new(mem.clone());
        let mut t = table(Some(""), &store);
        assert_eq!(t.table_id(), None);

        t.resize_start(0, 100);
        t.resize_end(0, 120, 100);
        assert!(mem.is_empty());
    }

    #[test]
    fn test_identity_registered_when_enabled() {
        let store = WidthStore::in_memory();
        let config = TableConfig {
            dev_identity_check: true,
            ..TableConfig::default()
        };
        let id = "table-test-identity";
        let a = ResizeTable::with_config(Some(id), &users(), store.clone(), config.clone());
        let b = ResizeTable::with_config(Some(id), &users(), store, config);
        assert_eq!(crate::registry::live_count(id), 2);
        drop(a);
        drop(b);
        assert_eq!(crate::registry::live_count(id), 0);
    }
}
