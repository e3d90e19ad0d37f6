//! Terminal front end for resizable tables.
//!
//! Draws a `ResizeTable` with ratatui and turns crossterm mouse drags on the
//! header row into resize gestures. Drag a header boundary (the gap right of
//! a column title) to resize; widths are saved when the button is released.

mod app;
mod event;
mod input;
mod render;
mod state;
mod style;

pub use app::App;
pub use state::{AppState, CellAlign, default_columns, load_columns, sample_rows};
