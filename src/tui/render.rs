//! Main rendering logic for TUI.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use crate::column::Column;
use crate::drag::ContainerRect;
use crate::header::HeaderCell;

use super::state::{AppState, Boundary};
use super::style::Styles;

/// Gap between columns, in cells.
const COLUMN_SPACING: u16 = 1;

/// Main render function.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title
        Constraint::Min(2),    // Table
        Constraint::Length(1), // Footer
    ])
    .split(frame.area());

    render_title(frame, chunks[0], state);
    render_table(frame, chunks[1], state);
    render_footer(frame, chunks[2], state);
}

/// Layout constraints for the columns. Columns without a width share the
/// remaining space.
fn column_constraints<A>(columns: &[Column<A>]) -> Vec<Constraint> {
    columns
        .iter()
        .map(|c| match c.effective_width() {
            Some(w) => Constraint::Length(w),
            None => Constraint::Fill(1),
        })
        .collect()
}

/// Screen rects of the columns, computed the same way the table widget lays
/// them out.
fn column_rects(constraints: &[Constraint], area: Rect) -> Vec<Rect> {
    Layout::horizontal(constraints.iter().copied())
        .flex(Flex::Legacy)
        .spacing(COLUMN_SPACING)
        .split(area)
        .to_vec()
}

fn render_title(frame: &mut Frame, area: Rect, state: &AppState) {
    let table = &state.table;
    let mut text = format!(
        " resizetable | table: {} | {} columns | rev {}",
        table.table_id().unwrap_or("-"),
        table.columns().len(),
        table.revision()
    );
    if let Some(grip) = state.grip
        && let Some(col) = table.columns().get(grip.handlers.column())
    {
        text.push_str(&format!(" | resizing {}", col.title));
    }
    frame.render_widget(Paragraph::new(text).style(Styles::header()), area);
}

fn render_table(frame: &mut Frame, area: Rect, state: &mut AppState) {
    state.table.set_geometry(ContainerRect::new(
        i32::from(area.x),
        i32::from(area.width),
        area.height,
    ));

    let columns = state.table.columns();
    let cells = state.table.header_cells();
    let constraints = column_constraints(columns);
    let rects = column_rects(&constraints, area);
    let active = state.grip.map(|g| g.handlers.column());

    let mut boundaries = Vec::new();
    let header: Vec<Cell> = columns
        .iter()
        .zip(&cells)
        .enumerate()
        .map(|(i, (col, cell))| {
            let style = match cell {
                HeaderCell::Resizable(_) if active == Some(i) => Styles::active_header(),
                HeaderCell::Resizable(_) => Styles::resizable_header(),
                HeaderCell::Plain => Styles::table_header(),
            };
            if let (HeaderCell::Resizable(h), Some(rect)) = (cell, rects.get(i)) {
                boundaries.push(Boundary {
                    handlers: h.handlers,
                    x: rect.right(),
                    width: h.width,
                });
            }
            let align: Alignment = col.attrs.into();
            Cell::from(Line::from(col.title.as_str()).alignment(align)).style(style)
        })
        .collect();

    let visible = usize::from(area.height.saturating_sub(1));
    let rows: Vec<Row> = state
        .rows
        .iter()
        .skip(state.row_offset)
        .take(visible)
        .map(|row| {
            let cells = columns.iter().enumerate().map(|(i, col)| {
                let text = row.get(i).map(String::as_str).unwrap_or("");
                let align: Alignment = col.attrs.into();
                Cell::from(Line::from(text).alignment(align))
            });
            Row::new(cells).style(Styles::default()).height(1)
        })
        .collect();

    let table = Table::new(rows, constraints)
        .header(Row::new(header).style(Styles::table_header()).height(1))
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Legacy);
    frame.render_widget(table, area);

    state.header_y = Some(area.y);
    state.boundaries = boundaries;

    render_indicator(frame, area, state);
}

/// Draws the dashed line marking where the dragged edge will land.
fn render_indicator(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(line) = state.table.indicator() else {
        return;
    };
    let Ok(offset) = u16::try_from(line.left) else {
        return;
    };
    let x = area.x.saturating_add(offset);
    if x >= area.right() {
        return;
    }
    let height = line.height.min(area.height);
    let buf = frame.buffer_mut();
    for y in area.y..area.y + height {
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_symbol("┊").set_style(Styles::indicator());
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let line = match &state.status_message {
        Some(msg) => Line::from(Span::styled(format!(" {}", msg), Styles::status())),
        None => Line::from(Span::styled(
            " drag underlined header edges to resize | r reload columns | x forget widths | \u{2191}\u{2193} scroll | q quit",
            Styles::help(),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
