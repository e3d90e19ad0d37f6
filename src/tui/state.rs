//! TUI application state.

use std::io;
use std::path::Path;

use ratatui::layout::Alignment;
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::header::ResizeHandlers;
use crate::table::ResizeTable;

/// Horizontal alignment of a column's cells.
///
/// This is the render attribute carried by every column; the table core
/// passes it through untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl From<CellAlign> for Alignment {
    fn from(align: CellAlign) -> Self {
        match align {
            CellAlign::Left => Alignment::Left,
            CellAlign::Center => Alignment::Center,
            CellAlign::Right => Alignment::Right,
        }
    }
}

/// Resize handle currently held with the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grip {
    pub handlers: ResizeHandlers,
    /// Pointer column where the drag started.
    pub start_x: u16,
    /// Column width when the drag started.
    pub start_width: u16,
}

impl Grip {
    /// Width the handle shows while dragging to `x`.
    pub fn live_width(&self, x: u16) -> u16 {
        let delta = i32::from(x) - i32::from(self.start_x);
        (i32::from(self.start_width) + delta).clamp(1, i32::from(u16::MAX)) as u16
    }
}

/// Right edge of a resizable header cell, recorded at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub handlers: ResizeHandlers,
    /// Screen column just right of the header cell.
    pub x: u16,
    pub width: u16,
}

impl Boundary {
    /// The grab zone is the last cell of the column plus the gap after it.
    pub fn hit(&self, x: u16) -> bool {
        x == self.x || x.saturating_add(1) == self.x
    }
}

/// Main application state.
#[derive(Debug)]
pub struct AppState {
    /// The table being shown.
    pub table: ResizeTable<CellAlign>,
    /// Column spec last handed to the table.
    pub spec: Vec<Column<CellAlign>>,
    /// Row cells, one string per spec column.
    pub rows: Vec<Vec<String>>,
    /// Vertical scroll offset in rows.
    pub row_offset: usize,
    /// Handle being dragged, if any.
    pub grip: Option<Grip>,
    /// Screen row of the table header (set by render).
    pub header_y: Option<u16>,
    /// Resizable header boundaries (set by render).
    pub boundaries: Vec<Boundary>,
    /// Temporary status message shown in the footer.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(
        table: ResizeTable<CellAlign>,
        spec: Vec<Column<CellAlign>>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            table,
            spec,
            rows,
            row_offset: 0,
            grip: None,
            header_y: None,
            boundaries: Vec::new(),
            status_message: None,
        }
    }

    /// Hands a new column spec to the table.
    pub fn apply_spec(&mut self, spec: Vec<Column<CellAlign>>) {
        self.grip = None;
        self.table.set_columns(&spec);
        self.spec = spec;
    }

    /// Boundary under the pointer, if any.
    pub fn boundary_at(&self, x: u16, y: u16) -> Option<Boundary> {
        if self.header_y != Some(y) {
            return None;
        }
        self.boundaries.iter().copied().find(|b| b.hit(x))
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.row_offset = self.row_offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        let max = self.rows.len().saturating_sub(1);
        self.row_offset = (self.row_offset + n).min(max);
    }
}

/// Reads a JSON array of columns.
pub fn load_columns(path: &Path) -> io::Result<Vec<Column<CellAlign>>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(io::Error::other)
}

/// Columns used when no column file is given.
pub fn default_columns() -> Vec<Column<CellAlign>> {
    vec![
        Column::new("Name", 18).with_key("name"),
        Column::<CellAlign>::new("Age", 5)
            .with_key("age")
            .with_resizable(false)
            .with_attrs(CellAlign::Right),
        Column::new("City", 14).with_key("city"),
        Column::new("Email", 28).with_key("email"),
        Column::<CellAlign>::new("Score", 7)
            .with_key("score")
            .with_attrs(CellAlign::Right),
        Column::without_width("Notes").with_key("notes"),
    ]
}

const NAMES: &[&str] = &[
    "Ada Lovelace",
    "Alan Turing",
    "Grace Hopper",
    "Edsger Dijkstra",
    "Barbara Liskov",
    "Donald Knuth",
    "Frances Allen",
    "Ken Thompson",
];

const CITIES: &[&str] = &[
    "London", "Manchester", "New York", "Rotterdam", "Boston", "Stanford", "Albany",
];

/// Generates `count` rows of demo data for `columns`.
///
/// Known keys (`name`, `age`, `city`, `email`, `score`) get plausible
/// values; other columns get `<title> <n>`.
pub fn sample_rows<A>(columns: &[Column<A>], count: usize) -> Vec<Vec<String>> {
    (0..count)
        .map(|i| {
            let name = NAMES[i % NAMES.len()];
            columns
                .iter()
                .map(|col| match col.id().unwrap_or_default() {
                    "name" => name.to_string(),
                    "age" => (20 + (i * 7) % 45).to_string(),
                    "city" => CITIES[i % CITIES.len()].to_string(),
                    "email" => format!("{}@example.org", name.to_lowercase().replace(' ', ".")),
                    "score" => format!("{:.1}", ((i * 37) % 1000) as f64 / 10.0),
                    _ => format!("{} {}", col.title.to_lowercase(), i + 1),
                })
                .collect()
        })
        .collect()
}
