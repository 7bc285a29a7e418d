//! Drag-and-drop state machine.
//!
//! A gesture moves through `Idle -> Armed -> Dragging` and ends in either a
//! commit or a cancel, both of which return to `Idle`. Only one block can be in
//! flight at a time; gesture starts on any block are ignored while a drag is
//! active, so pointer events bubbling to blocks underneath the preview cannot
//! start a nested drag.
//!
//! This module only tracks the gesture. Applying the result to blocks and
//! publishing notifications is done by [`crate::Diagram`].

use crate::geometry::limit_f32;
use crate::grid::SizeSnapshot;
use crate::types::{BlockId, CellPos, CellRect, Point};

/// Opaque token identifying one drag session.
///
/// A handle stops being accepted once its session has ended, which makes
/// duplicate end notifications harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DragHandle(u64);

/// Coarse state of the drag machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in progress
    Idle,
    /// Pointer pressed on a block, drag threshold not yet exceeded
    Armed,
    /// A block is being dragged
    Dragging,
}

/// What the presentation layer needs to start rendering a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragStart {
    /// Token for subsequent updates and the final drop
    pub handle: DragHandle,
    /// The block being dragged
    pub block: BlockId,
    /// Size tables used for the whole gesture
    pub snapshot: SizeSnapshot,
    /// Offset from the block's top-left corner to the grab point
    pub pointer_offset: Point,
}

/// Result of one pointer-move during a drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragUpdate {
    /// Cell the block would snap its top-left corner to
    pub cell: CellPos,
    /// Where the preview's top-left corner follows the pointer, in pixels
    pub preview_origin: Point,
    /// Blocks currently overlapping the candidate placement
    pub invalid: Vec<BlockId>,
    /// Whether `cell` differs from the previous update
    pub cell_changed: bool,
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The block was dropped and now sits at `to`
    Committed {
        /// The dragged block
        block: BlockId,
        /// Position before the drag
        from: CellPos,
        /// Position after clamping the drop cell into the grid
        to: CellPos,
    },
    /// The drop was rejected; the block kept its position
    Cancelled {
        /// The dragged block
        block: BlockId,
    },
}

/// State of an in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    handle: DragHandle,
    block: BlockId,
    origin: CellPos,
    row_span: i32,
    column_span: i32,
    pointer_offset: Point,
    snapshot: SizeSnapshot,
    preview_cell: Option<CellPos>,
}

/// Outcome of feeding one pointer position into a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackStep {
    /// Snapped top-left cell
    pub cell: CellPos,
    /// Unsnapped top-left corner of the preview
    pub preview_origin: Point,
    /// Whether the snapped cell moved since the last step
    pub changed: bool,
}

impl DragSession {
    /// Token of this session.
    pub fn handle(&self) -> DragHandle {
        self.handle
    }

    /// The block being dragged.
    pub fn block(&self) -> BlockId {
        self.block
    }

    /// Block position when the drag started.
    pub fn origin(&self) -> CellPos {
        self.origin
    }

    /// Cells the block would occupy at the current candidate cell.
    pub fn candidate_rect(&self) -> CellRect {
        let cell = self.preview_cell.unwrap_or(self.origin);
        CellRect::new(cell.row, cell.column, self.row_span, self.column_span)
    }

    /// Converts a pointer position into the block's intended top-left cell.
    ///
    /// The grab offset is subtracted first so the cell corresponds to the block's
    /// corner rather than to the pointer. The corner is kept within the grid's
    /// pixel extent before snapping.
    pub fn track(&mut self, pointer: Point) -> TrackStep {
        let preview_origin = pointer - self.pointer_offset;
        let extent = self.snapshot.extent();
        let top_left = Point::new(
            limit_f32(preview_origin.x, 0.0, extent.x),
            limit_f32(preview_origin.y, 0.0, extent.y),
        );
        let cell = self.snapshot.closest_cell(top_left);
        let changed = self.preview_cell != Some(cell);
        self.preview_cell = Some(cell);

        TrackStep {
            cell,
            preview_origin,
            changed,
        }
    }

    /// Candidate cell clamped so the block's full span fits into a grid of the given size.
    pub fn drop_cell(&self, rows: i32, columns: i32) -> CellPos {
        let cell = self.preview_cell.unwrap_or(self.origin);
        CellPos::new(
            cell.row.min(rows - self.row_span).max(0),
            cell.column.min(columns - self.column_span).max(0),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Armed { block: BlockId, press_point: Point },
    Dragging(DragSession),
}

/// Tracks the single gesture a diagram can have in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct DragController {
    state: DragState,
    next_handle: u64,
}

impl Default for DragController {
    fn default() -> Self {
        Self {
            state: DragState::Idle,
            next_handle: 1,
        }
    }
}

impl DragController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current coarse state.
    pub fn phase(&self) -> DragPhase {
        match self.state {
            DragState::Idle => DragPhase::Idle,
            DragState::Armed { .. } => DragPhase::Armed,
            DragState::Dragging(_) => DragPhase::Dragging,
        }
    }

    /// The block being dragged, if a drag is active.
    pub fn dragged_block(&self) -> Option<BlockId> {
        match &self.state {
            DragState::Dragging(session) => Some(session.block),
            _ => None,
        }
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }

    /// Records a press on `block`. Ignored while a drag is active.
    pub fn arm(&mut self, block: BlockId, press_point: Point) -> bool {
        if let DragState::Dragging(session) = &self.state {
            log::debug!(
                "ignoring press on block {block}: block {} is being dragged",
                session.block
            );
            return false;
        }
        self.state = DragState::Armed { block, press_point };
        true
    }

    /// Returns the armed block and its press point once the pointer has travelled
    /// further than `threshold` from the press.
    pub fn threshold_exceeded(&self, pointer: Point, threshold: f32) -> Option<(BlockId, Point)> {
        match self.state {
            DragState::Armed { block, press_point } if pointer.distance(press_point) > threshold => {
                Some((block, press_point))
            }
            _ => None,
        }
    }

    /// Drops an armed press that never became a drag.
    pub fn disarm(&mut self) -> bool {
        if matches!(self.state, DragState::Armed { .. }) {
            self.state = DragState::Idle;
            return true;
        }
        false
    }

    /// Starts dragging a block.
    ///
    /// # Arguments
    ///
    /// * `block` - The block to drag
    /// * `rect` - Its current cells
    /// * `pointer` - Grab point, in grid pixels
    /// * `snapshot` - Size tables to use for the whole gesture
    ///
    /// # Returns
    ///
    /// `None` if another drag is already active.
    pub fn begin(
        &mut self,
        block: BlockId,
        rect: CellRect,
        pointer: Point,
        snapshot: SizeSnapshot,
    ) -> Option<DragStart> {
        if let Some(active) = self.dragged_block() {
            log::debug!("ignoring drag start on block {block}: block {active} is being dragged");
            return None;
        }

        let handle = DragHandle(self.next_handle);
        self.next_handle += 1;

        let pointer_offset = pointer - snapshot.cell_origin(rect.origin());
        let session = DragSession {
            handle,
            block,
            origin: rect.origin(),
            row_span: rect.row_span,
            column_span: rect.column_span,
            pointer_offset,
            snapshot: snapshot.clone(),
            preview_cell: None,
        };
        self.state = DragState::Dragging(session);
        log::debug!("drag {handle:?} started on block {block} at {:?}", rect.origin());

        Some(DragStart {
            handle,
            block,
            snapshot,
            pointer_offset,
        })
    }

    /// Mutable access to the session behind `handle`, if it is still active.
    pub fn session_mut(&mut self, handle: DragHandle) -> Option<&mut DragSession> {
        match &mut self.state {
            DragState::Dragging(session) if session.handle == handle => Some(session),
            _ => None,
        }
    }

    /// Ends the session behind `handle` and returns it. Later calls with the same
    /// handle return `None`.
    pub fn finish(&mut self, handle: DragHandle) -> Option<DragSession> {
        self.session_mut(handle)?;
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Dragging(session) => Some(session),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn snapshot() -> SizeSnapshot {
        SizeSnapshot {
            row_sizes: vec![40.0; 5],
            column_sizes: vec![40.0; 5],
        }
    }

    #[test]
    fn test_arm_then_threshold() {
        let mut drag = DragController::new();
        let block = Uuid::new_v4();

        assert!(drag.arm(block, Point::new(10.0, 10.0)));
        assert_eq!(drag.phase(), DragPhase::Armed);
        assert!(drag.threshold_exceeded(Point::new(12.0, 10.0), 4.0).is_none());
        assert_eq!(
            drag.threshold_exceeded(Point::new(15.0, 10.0), 4.0),
            Some((block, Point::new(10.0, 10.0)))
        );

        assert!(drag.disarm());
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert!(!drag.disarm());
    }

    #[test]
    fn test_begin_captures_pointer_offset() {
        let mut drag = DragController::new();
        let block = Uuid::new_v4();

        let start = drag
            .begin(block, CellRect::new(1, 2, 1, 1), Point::new(95.0, 50.0), snapshot())
            .expect("drag should start");

        assert_eq!(start.block, block);
        assert_eq!(start.pointer_offset, Point::new(15.0, 10.0));
        assert_eq!(drag.phase(), DragPhase::Dragging);
        assert_eq!(drag.dragged_block(), Some(block));
    }

    #[test]
    fn test_second_drag_is_rejected_while_active() {
        let mut drag = DragController::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        drag.begin(first, CellRect::new(0, 0, 1, 1), Point::ZERO, snapshot())
            .unwrap();

        assert!(drag
            .begin(second, CellRect::new(2, 2, 1, 1), Point::ZERO, snapshot())
            .is_none());
        assert!(!drag.arm(second, Point::ZERO));
        assert_eq!(drag.dragged_block(), Some(first));
    }

    #[test]
    fn test_track_uses_block_corner_not_pointer() {
        let mut drag = DragController::new();
        let start = drag
            .begin(
                Uuid::new_v4(),
                CellRect::new(0, 0, 2, 2),
                Point::new(70.0, 70.0),
                snapshot(),
            )
            .unwrap();
        let session = drag.session_mut(start.handle).unwrap();

        // Corner lands at (45, 45): past the first center, before the second.
        let step = session.track(Point::new(115.0, 115.0));
        assert_eq!(step.cell, CellPos::new(1, 1));
        assert_eq!(step.preview_origin, Point::new(45.0, 45.0));
        assert!(step.changed);

        let step = session.track(Point::new(118.0, 112.0));
        assert_eq!(step.cell, CellPos::new(1, 1));
        assert!(!step.changed);
        assert_eq!(session.candidate_rect(), CellRect::new(1, 1, 2, 2));
    }

    #[test]
    fn test_track_clamps_corner_into_extent() {
        let mut drag = DragController::new();
        let start = drag
            .begin(Uuid::new_v4(), CellRect::new(2, 2, 1, 1), Point::new(90.0, 90.0), snapshot())
            .unwrap();
        let session = drag.session_mut(start.handle).unwrap();

        let step = session.track(Point::new(-500.0, -500.0));
        assert_eq!(step.cell, CellPos::new(0, 0));
        assert_eq!(step.preview_origin, Point::new(-510.0, -510.0));

        let step = session.track(Point::new(5000.0, 5000.0));
        assert_eq!(step.cell, CellPos::new(4, 4));
    }

    #[test]
    fn test_drop_cell_keeps_span_inside() {
        let mut drag = DragController::new();
        let start = drag
            .begin(Uuid::new_v4(), CellRect::new(0, 0, 2, 3), Point::ZERO, snapshot())
            .unwrap();
        let session = drag.session_mut(start.handle).unwrap();
        session.track(Point::new(1000.0, 1000.0));

        assert_eq!(session.drop_cell(5, 5), CellPos::new(3, 2));
        assert_eq!(session.drop_cell(1, 1), CellPos::new(0, 0));
    }

    #[test]
    fn test_finish_is_one_shot() {
        let mut drag = DragController::new();
        let start = drag
            .begin(Uuid::new_v4(), CellRect::new(0, 0, 1, 1), Point::ZERO, snapshot())
            .unwrap();

        assert!(drag.finish(start.handle).is_some());
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert!(drag.finish(start.handle).is_none());
        assert!(drag.session_mut(start.handle).is_none());
    }

    #[test]
    fn test_stale_handle_does_not_touch_new_session() {
        let mut drag = DragController::new();
        let first = drag
            .begin(Uuid::new_v4(), CellRect::new(0, 0, 1, 1), Point::ZERO, snapshot())
            .unwrap();
        drag.finish(first.handle);

        let second = drag
            .begin(Uuid::new_v4(), CellRect::new(0, 0, 1, 1), Point::ZERO, snapshot())
            .unwrap();

        assert_ne!(first.handle, second.handle);
        assert!(drag.finish(first.handle).is_none());
        assert_eq!(drag.phase(), DragPhase::Dragging);
    }
}
