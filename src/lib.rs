//! resizetable - tables with drag-resizable, persisted column widths.
//!
//! Provides:
//! - `column` — column descriptors
//! - `store` — width persistence (`table_size::<id>` JSON entries)
//! - `reconcile` — merging a column spec with saved widths
//! - `drag` — resize gesture tracking
//! - `header` — per-column header cell configuration and gesture handlers
//! - `table` — the table instance tying the above together
//! - `registry` — duplicate table identity warnings
//!
//! With `tui` feature (default):
//! - `tui` — ratatui/crossterm front end driving the table with the mouse

pub mod column;
pub mod drag;
pub mod header;
pub mod reconcile;
pub mod registry;
pub mod store;
pub mod table;

#[cfg(feature = "tui")]
pub mod tui;

pub use column::{Column, ColumnId};
pub use drag::{ContainerGeometry, ContainerRect, DragSession};
pub use header::{HeaderCell, PointerEvent, ResizeData, ResizeHandlers};
pub use store::{FileStore, MemoryStore, WidthMap, WidthStore};
pub use table::{ResizeTable, TableConfig};
