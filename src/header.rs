//! Per-column header cell configuration.

use crate::column::Column;
use crate::table::ResizeTable;

/// Pointer event delivered by the render collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerEvent {
    /// Pointer X in the collaborator's coordinate space.
    pub x: i32,
}

impl PointerEvent {
    pub fn at(x: i32) -> Self {
        Self { x }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

/// Size reported by the collaborator's resize handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeData {
    pub size: Size,
}

impl ResizeData {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: Size { width, height },
        }
    }
}

/// Gesture callbacks bound to one column index.
///
/// The index is captured when the handlers are built and stays fixed for
/// the whole gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeHandlers {
    column: usize,
}

impl ResizeHandlers {
    pub(crate) fn new(column: usize) -> Self {
        Self { column }
    }

    /// Column index these handlers act on.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Gesture start.
    pub fn on_resize_start<A: Clone>(
        &self,
        table: &mut ResizeTable<A>,
        event: PointerEvent,
        _data: ResizeData,
    ) {
        table.resize_start(self.column, event.x);
    }

    /// Gesture move. Only the indicator follows the pointer.
    pub fn on_resize<A: Clone>(
        &self,
        table: &mut ResizeTable<A>,
        event: PointerEvent,
        _data: ResizeData,
    ) {
        table.resize_move(event.x);
    }

    /// Gesture end. Commits and persists the new width.
    pub fn on_resize_stop<A: Clone>(
        &self,
        table: &mut ResizeTable<A>,
        event: PointerEvent,
        data: ResizeData,
    ) {
        table.resize_end(self.column, event.x, data.size.width);
    }
}

/// Header cell of a resizable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizableHeader {
    pub width: u16,
    pub handlers: ResizeHandlers,
}

/// How the collaborator should render a header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCell {
    /// Ordinary header, no resize handle.
    Plain,
    /// Header wrapped in a resize handle.
    Resizable(ResizableHeader),
}

impl HeaderCell {
    pub fn is_resizable(&self) -> bool {
        matches!(self, HeaderCell::Resizable(_))
    }

    pub fn handlers(&self) -> Option<ResizeHandlers> {
        match self {
            HeaderCell::Resizable(h) => Some(h.handlers),
            HeaderCell::Plain => None,
        }
    }
}

/// Decides the header cell for the column at `index`.
///
/// Columns without a width, or explicitly marked non-resizable, get a plain
/// cell.
pub fn header_cell<A>(column: &Column<A>, index: usize) -> HeaderCell {
    let Some(width) = column.effective_width() else {
        return HeaderCell::Plain;
    };
    if !column.is_resizable() {
        return HeaderCell::Plain;
    }
    HeaderCell::Resizable(ResizableHeader {
        width,
        handlers: ResizeHandlers::new(index),
    })
}
