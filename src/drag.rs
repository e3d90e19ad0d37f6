//! Column resize gesture tracking.
//!
//! A gesture runs start -> move* -> end. Pointer positions arrive in the
//! collaborator's coordinate space and are turned into container-local
//! offsets through `ContainerGeometry`, so nothing here depends on a real
//! rendering surface.

use tracing::{debug, trace};

/// Placement of the table container in pointer coordinates.
pub trait ContainerGeometry {
    /// X of the container's left edge.
    fn left(&self) -> i32;

    /// Container width.
    fn width(&self) -> i32;

    /// Container height, used for the indicator line.
    fn height(&self) -> u16 {
        0
    }

    /// Converts a pointer X into a container-local offset.
    fn to_local(&self, pointer_x: i32) -> i32 {
        pointer_x.saturating_sub(self.left())
    }
}

/// Plain rectangle implementation of `ContainerGeometry`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerRect {
    pub left: i32,
    pub width: i32,
    pub height: u16,
}

impl ContainerRect {
    pub fn new(left: i32, width: i32, height: u16) -> Self {
        Self {
            left,
            width,
            height,
        }
    }
}

impl ContainerGeometry for ContainerRect {
    fn left(&self) -> i32 {
        self.left
    }

    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }
}

/// State of an in-progress resize gesture.
///
/// All offsets are container-local. The default value is the idle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSession {
    /// Offset where the gesture started.
    pub origin_x: i32,
    /// Latest in-bounds offset.
    pub current_x: i32,
    /// Column being resized.
    pub active_column: Option<usize>,
    /// Whether the indicator line is shown.
    pub visible: bool,
}

/// Vertical line marking where the dragged boundary would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    /// Container-local X.
    pub left: i32,
    pub height: u16,
}

/// Outcome of a finished gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commit {
    pub column: usize,
    pub width: u16,
}

/// Tracks one resize gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    session: DragSession,
    /// Height captured at start for the indicator.
    height: u16,
    min_width: u16,
}

impl DragController {
    /// Creates a controller that never commits widths below `min_width`.
    pub fn new(min_width: u16) -> Self {
        Self {
            min_width: min_width.max(1),
            ..Self::default()
        }
    }

    /// Current session state.
    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Returns true while a gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.visible
    }

    /// Starts a gesture on `column`. Column widths are not touched.
    pub fn start(&mut self, column: usize, pointer_x: i32, geometry: &impl ContainerGeometry) {
        let x = geometry.to_local(pointer_x);
        self.session = DragSession {
            origin_x: x,
            current_x: x,
            active_column: Some(column),
            visible: true,
        };
        self.height = geometry.height();
        debug!(column, origin_x = x, "column resize started");
    }

    /// Moves the indicator. Positions outside the container are ignored.
    ///
    /// Returns true if the session changed.
    pub fn drag_to(&mut self, pointer_x: i32, geometry: &impl ContainerGeometry) -> bool {
        if !self.session.visible {
            return false;
        }
        let x = geometry.to_local(pointer_x);
        if x < 0 || x > geometry.width() {
            trace!(x, "resize pointer outside container");
            return false;
        }
        self.session.current_x = x;
        true
    }

    /// Finishes the gesture on `column`.
    ///
    /// The new width is `reported_width` plus the pointer travel since
    /// start, floored at the minimum width. The session is cleared either
    /// way. Returns `None` if no gesture was started for that column.
    pub fn end(
        &mut self,
        column: usize,
        pointer_x: i32,
        reported_width: u16,
        geometry: &impl ContainerGeometry,
    ) -> Option<Commit> {
        let session = std::mem::take(&mut self.session);
        self.height = 0;

        if !session.visible || session.active_column != Some(column) {
            debug!(column, "resize end without matching start, ignored");
            return None;
        }

        let delta = geometry.to_local(pointer_x).saturating_sub(session.origin_x);
        let width = i32::from(reported_width)
            .saturating_add(delta)
            .clamp(i32::from(self.min_width), i32::from(u16::MAX)) as u16;
        debug!(column, delta, width, "column resize committed");

        Some(Commit { column, width })
    }

    /// Drops the current gesture without committing.
    pub fn cancel(&mut self) {
        self.session = DragSession::default();
        self.height = 0;
    }

    /// Indicator to draw, if a gesture is in progress.
    pub fn indicator(&self) -> Option<Indicator> {
        if !self.session.visible {
            return None;
        }
        let left = if self.session.current_x != 0 {
            self.session.current_x
        } else {
            self.session.origin_x
        };
        Some(Indicator {
            left,
            height: self.height,
        })
    }
}
