//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use crate::header::{PointerEvent, ResizeData};

use super::state::{AppState, Grip};

/// Rows moved by PageUp/PageDown.
const PAGE_ROWS: usize = 10;

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Re-read the column spec and hand it to the table.
    ReloadColumns,
    /// Forget the saved widths of this table.
    ResetWidths,
}

/// Handles key input and updates state.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        KeyCode::Char('r') => KeyAction::ReloadColumns,
        KeyCode::Char('x') => KeyAction::ResetWidths,

        KeyCode::Esc => {
            if state.grip.take().is_some() {
                state.table.cancel_resize();
                state.status_message = Some("Resize cancelled".to_string());
            } else {
                state.status_message = None;
            }
            KeyAction::None
        }

        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll_up(1);
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.scroll_down(1);
            KeyAction::None
        }
        KeyCode::PageUp => {
            state.scroll_up(PAGE_ROWS);
            KeyAction::None
        }
        KeyCode::PageDown => {
            state.scroll_down(PAGE_ROWS);
            KeyAction::None
        }
        KeyCode::Home => {
            state.row_offset = 0;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles mouse input.
///
/// A left press on a header boundary grabs it, drags move the indicator and
/// the release commits the new width.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let x = mouse.column;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(boundary) = state.boundary_at(x, mouse.row) else {
                return;
            };
            let grip = Grip {
                handlers: boundary.handlers,
                start_x: x,
                start_width: boundary.width,
            };
            grip.handlers.on_resize_start(
                &mut state.table,
                PointerEvent::at(i32::from(x)),
                ResizeData::new(grip.start_width, 1),
            );
            state.grip = Some(grip);
            state.status_message = None;
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(grip) = state.grip {
                grip.handlers.on_resize(
                    &mut state.table,
                    PointerEvent::at(i32::from(x)),
                    ResizeData::new(grip.live_width(x), 1),
                );
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(grip) = state.grip.take() else {
                return;
            };
            // The handle reports the width it had when grabbed; the table
            // adds the pointer travel itself.
            grip.handlers.on_resize_stop(
                &mut state.table,
                PointerEvent::at(i32::from(x)),
                ResizeData::new(grip.start_width, 1),
            );
            if let Some(col) = state.table.columns().get(grip.handlers.column())
                && let Some(width) = col.width
            {
                debug!(column = %col.title, width, "column resized from terminal");
                state.status_message =
                    Some(format!("{}: {} -> {}", col.title, grip.start_width, width));
            }
        }
        MouseEventKind::ScrollUp => state.scroll_up(1),
        MouseEventKind::ScrollDown => state.scroll_down(1),
        _ => {}
    }
}
