//! The diagram: a grid, the blocks placed on it, their notifications and the
//! active drag gesture.
//!
//! This is the boundary the presentation layer talks to. Every mutation goes
//! through here so the right notification fires exactly once per applied change.

use crate::collision;
use crate::config::DiagramConfig;
use crate::drag::{DragController, DragHandle, DragOutcome, DragPhase, DragStart, DragUpdate};
use crate::events::{
    DimensionsChanged, EventHub, GridResized, InvalidChanged, PositionChanged, SubscriptionId,
};
use crate::geometry;
use crate::grid::{Grid, SizeSnapshot};
use crate::types::{Block, BlockId, CellPos, CellRect, Point};

/// A grid together with the blocks placed on it.
#[derive(Debug)]
pub struct Diagram {
    config: DiagramConfig,
    grid: Grid,
    blocks: Vec<Block>,
    events: EventHub,
    drag: DragController,
}

impl Diagram {
    /// Creates an empty diagram with the given grid size, clamped to the configured limits.
    pub fn new(rows: i32, columns: i32, config: DiagramConfig) -> Self {
        let config = config.normalized();
        let grid = Grid::new(rows, columns, &config);
        Self {
            config,
            grid,
            blocks: Vec::new(),
            events: EventHub::new(),
            drag: DragController::new(),
        }
    }

    /// The configuration this diagram was built with.
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// The grid hosting the blocks.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All blocks, in insertion order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Looks up a block by ID.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    fn block_index(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == id)
    }

    /// Places a new block on the grid.
    ///
    /// Spans are clamped to the block limits first, then the position is clamped so
    /// the block fits. No notifications are raised for the insertion itself.
    pub fn insert_block(&mut self, row: i32, column: i32, row_span: i32, column_span: i32) -> BlockId {
        let mut block = Block::new(0, 0, 1, 1);
        block.set_row_span(row_span, &self.grid);
        block.set_column_span(column_span, &self.grid);
        block.set_position(row, column, &self.grid);

        let id = block.id();
        log::debug!("inserted block {id} at {:?}", block.rect());
        self.blocks.push(block);
        id
    }

    /// Removes a block. Removing the block that is being dragged cancels the drag.
    pub fn remove_block(&mut self, id: BlockId) -> Option<Block> {
        let dragged = self.drag.session().map(|s| (s.block(), s.handle()));
        if let Some((block, handle)) = dragged {
            if block == id {
                self.end_drag(handle, false);
            }
        }
        let index = self.block_index(id)?;
        Some(self.blocks.remove(index))
    }

    /// The topmost block covering `point` in the grid's current size tables.
    pub fn block_at_point(&self, point: Point) -> Option<BlockId> {
        let extent = self.grid.snapshot().extent();
        if point.x < 0.0 || point.y < 0.0 || point.x > extent.x || point.y > extent.y {
            return None;
        }
        let cell =
            geometry::cell_for_point(point, self.grid.row_sizes(), self.grid.column_sizes());
        self.blocks
            .iter()
            .rev()
            .find(|b| b.rect().contains(cell))
            .map(|b| b.id())
    }

    /// IDs of every block currently flagged as overlapping.
    pub fn invalid_blocks(&self) -> Vec<BlockId> {
        collision::invalid_set(&self.blocks)
    }

    // Grid size

    /// Sets the number of rows, clamped to `[1, max_rows]`.
    ///
    /// # Returns
    ///
    /// The row count after clamping.
    pub fn set_row_count(&mut self, rows: i32) -> i32 {
        if let Some(event) = self.grid.set_row_count(rows) {
            self.events.emit_grid_resized(event);
        }
        self.grid.rows()
    }

    /// Sets the number of columns, clamped to `[1, max_columns]`.
    ///
    /// # Returns
    ///
    /// The column count after clamping.
    pub fn set_column_count(&mut self, columns: i32) -> i32 {
        if let Some(event) = self.grid.set_column_count(columns) {
            self.events.emit_grid_resized(event);
        }
        self.grid.columns()
    }

    /// Lays the grid out evenly over the available area.
    pub fn arrange(&mut self, width: f32, height: f32) {
        self.grid.arrange(width, height);
    }

    /// Gives mutable access to the size tables for collaborator-measured layouts.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Doubles the grid in both directions and scales every block with it.
    ///
    /// The grid grows first; then each block's spans double, followed by its
    /// position, so relative proportions are kept wherever the limits allow.
    pub fn scale_up(&mut self) {
        let rows = self.grid.rows();
        let columns = self.grid.columns();
        self.set_row_count(rows.saturating_mul(2));
        self.set_column_count(columns.saturating_mul(2));

        for block in self.blocks.iter_mut() {
            let (row, column) = (block.row(), block.column());
            let (row_span, column_span) = (block.row_span(), block.column_span());

            if let Some(event) = block.set_row_span(row_span.saturating_mul(2), &self.grid) {
                self.events.emit_dimensions_changed(event);
            }
            if let Some(event) = block.set_column_span(column_span.saturating_mul(2), &self.grid) {
                self.events.emit_dimensions_changed(event);
            }
            if let Some(event) = block.set_row(row.saturating_mul(2), &self.grid) {
                self.events.emit_position_changed(event);
            }
            if let Some(event) = block.set_column(column.saturating_mul(2), &self.grid) {
                self.events.emit_position_changed(event);
            }
        }
        log::debug!(
            "scaled grid from {rows}x{columns} to {}x{}",
            self.grid.rows(),
            self.grid.columns()
        );
    }

    // Block geometry

    fn with_block<T>(
        &mut self,
        id: BlockId,
        apply: impl FnOnce(&mut Block, &Grid) -> Option<T>,
    ) -> Option<T> {
        let index = self.block_index(id)?;
        apply(&mut self.blocks[index], &self.grid)
    }

    /// Sets a block's top row, clamped so the block stays inside the grid.
    ///
    /// # Returns
    ///
    /// `true` if the block moved.
    pub fn set_block_row(&mut self, id: BlockId, row: i32) -> bool {
        let event = self.with_block(id, |block, grid| block.set_row(row, grid));
        self.publish_position(event)
    }

    /// Sets a block's left column, clamped so the block stays inside the grid.
    pub fn set_block_column(&mut self, id: BlockId, column: i32) -> bool {
        let event = self.with_block(id, |block, grid| block.set_column(column, grid));
        self.publish_position(event)
    }

    /// Moves a block on both axes, raising a single position notification.
    pub fn move_block(&mut self, id: BlockId, row: i32, column: i32) -> bool {
        let event = self.with_block(id, |block, grid| block.set_position(row, column, grid));
        self.publish_position(event)
    }

    /// Re-applies a block's position clamps after a span change.
    pub fn reclamp_block(&mut self, id: BlockId) -> bool {
        let event = self.with_block(id, |block, grid| block.reclamp(grid));
        self.publish_position(event)
    }

    /// Sets a block's row span, clamped to `[1, max_block_height]`.
    ///
    /// The position is not re-clamped; see [`Diagram::reclamp_block`].
    pub fn set_block_row_span(&mut self, id: BlockId, row_span: i32) -> bool {
        let event = self.with_block(id, |block, grid| block.set_row_span(row_span, grid));
        self.publish_dimensions(event)
    }

    /// Sets a block's column span, clamped to `[1, max_block_width]`.
    ///
    /// The position is not re-clamped; see [`Diagram::reclamp_block`].
    pub fn set_block_column_span(&mut self, id: BlockId, column_span: i32) -> bool {
        let event = self.with_block(id, |block, grid| block.set_column_span(column_span, grid));
        self.publish_dimensions(event)
    }

    fn publish_position(&mut self, event: Option<PositionChanged>) -> bool {
        match event {
            Some(event) => {
                self.events.emit_position_changed(event);
                true
            }
            None => false,
        }
    }

    fn publish_dimensions(&mut self, event: Option<DimensionsChanged>) -> bool {
        match event {
            Some(event) => {
                self.events.emit_dimensions_changed(event);
                true
            }
            None => false,
        }
    }

    fn publish_invalid(&mut self, changes: Vec<InvalidChanged>) {
        for change in changes {
            self.events.emit_invalid_changed(change);
        }
    }

    // Drag and drop

    /// Coarse state of the drag machine.
    pub fn drag_phase(&self) -> DragPhase {
        self.drag.phase()
    }

    /// The block currently being dragged, if any.
    pub fn dragged_block(&self) -> Option<BlockId> {
        self.drag.dragged_block()
    }

    /// Handle of the active drag, if any.
    pub fn active_drag(&self) -> Option<DragHandle> {
        self.drag.session().map(|s| s.handle())
    }

    /// Cells the dragged block would occupy if dropped now.
    pub fn drag_preview(&self) -> Option<CellRect> {
        self.drag.session().map(|s| s.candidate_rect())
    }

    /// Starts a drag of `block` grabbed at `pointer` (grid pixels).
    ///
    /// The grid's current size tables are snapshotted and used for the whole gesture.
    ///
    /// The dragged block's own overlap flag is cleared; overlap is only ever
    /// reported on the blocks the dragged one lands on.
    ///
    /// # Returns
    ///
    /// `None` if the block does not exist or another drag is already active.
    pub fn begin_drag(&mut self, block: BlockId, pointer: Point) -> Option<DragStart> {
        let rect = self.block(block)?.rect();
        let start = self.drag.begin(block, rect, pointer, self.grid.snapshot())?;

        let index = self.block_index(block)?;
        if self.blocks[index].set_invalid(false) {
            self.events.emit_invalid_changed(InvalidChanged {
                block,
                invalid: false,
            });
        }
        Some(start)
    }

    /// Feeds a pointer move into the drag behind `handle`.
    ///
    /// Overlap flags are recomputed only when the snapped cell changes, so pointer
    /// jitter inside a cell does no collision work.
    ///
    /// # Returns
    ///
    /// The preview cell and the set of overlapping blocks, or `None` for a stale handle.
    pub fn update_drag(&mut self, handle: DragHandle, pointer: Point) -> Option<DragUpdate> {
        let Some(session) = self.drag.session_mut(handle) else {
            log::debug!("ignoring update for inactive drag {handle:?}");
            return None;
        };
        let step = session.track(pointer);
        let block = session.block();
        let candidate = session.candidate_rect();

        if step.changed {
            log::trace!("drag {handle:?} preview moved to {:?}", step.cell);
            let changes = collision::mark_invalid(block, &candidate, &mut self.blocks);
            self.publish_invalid(changes);
        }

        Some(DragUpdate {
            cell: step.cell,
            preview_origin: step.preview_origin,
            invalid: collision::invalid_set(&self.blocks),
            cell_changed: step.changed,
        })
    }

    /// Ends the drag behind `handle`.
    ///
    /// On commit the block moves to the last preview cell, clamped so its spans fit
    /// the grid, raising at most one position notification. On cancel the block
    /// keeps its pre-drag position. Either way the overlap flags are recomputed
    /// against the block's final placement.
    ///
    /// # Returns
    ///
    /// The outcome, or `None` if the handle is stale (for example a duplicate cancel).
    pub fn end_drag(&mut self, handle: DragHandle, committed: bool) -> Option<DragOutcome> {
        let Some(session) = self.drag.finish(handle) else {
            log::debug!("ignoring end of inactive drag {handle:?}");
            return None;
        };
        let block = session.block();

        let outcome = if committed {
            let to = session.drop_cell(self.grid.rows(), self.grid.columns());
            self.move_block(block, to.row, to.column);
            let to = self.block(block).map_or(to, |b| b.position());
            DragOutcome::Committed {
                block,
                from: session.origin(),
                to,
            }
        } else {
            DragOutcome::Cancelled { block }
        };

        if let Some(rect) = self.block(block).map(|b| b.rect()) {
            let changes = collision::mark_invalid(block, &rect, &mut self.blocks);
            self.publish_invalid(changes);
        }

        log::debug!("drag {handle:?} ended: {outcome:?}");
        Some(outcome)
    }

    /// Records a pointer press on a block. The press becomes a drag once the pointer
    /// travels past the configured threshold.
    ///
    /// # Returns
    ///
    /// `false` if the block does not exist or a drag is already active.
    pub fn press_block(&mut self, block: BlockId, pointer: Point) -> bool {
        if self.block(block).is_none() {
            return false;
        }
        self.drag.arm(block, pointer)
    }

    /// Feeds a pointer move into the gesture machine.
    ///
    /// An armed press turns into a drag once the threshold is exceeded, grabbing the
    /// block at the original press point. An active drag is updated.
    pub fn pointer_moved(&mut self, pointer: Point) -> Option<DragUpdate> {
        if let Some((block, press_point)) =
            self.drag.threshold_exceeded(pointer, self.config.drag_threshold)
        {
            self.drag.disarm();
            self.begin_drag(block, press_point)?;
        }
        let handle = self.active_drag()?;
        self.update_drag(handle, pointer)
    }

    /// Releases the pointer. An armed press is dropped; an active drag ends.
    pub fn release(&mut self, committed: bool) -> Option<DragOutcome> {
        if self.drag.disarm() {
            return None;
        }
        let handle = self.active_drag()?;
        self.end_drag(handle, committed)
    }

    // Subscriptions

    /// Subscribes to grid row/column count changes.
    pub fn on_grid_resized(&mut self, callback: impl FnMut(&GridResized) + 'static) -> SubscriptionId {
        self.events.on_grid_resized(callback)
    }

    /// Subscribes to block position changes.
    pub fn on_block_position_changed(
        &mut self,
        callback: impl FnMut(&PositionChanged) + 'static,
    ) -> SubscriptionId {
        self.events.on_block_position_changed(callback)
    }

    /// Subscribes to block span changes.
    pub fn on_block_dimensions_changed(
        &mut self,
        callback: impl FnMut(&DimensionsChanged) + 'static,
    ) -> SubscriptionId {
        self.events.on_block_dimensions_changed(callback)
    }

    /// Subscribes to changes of blocks' overlap flags.
    pub fn on_block_invalid_changed(
        &mut self,
        callback: impl FnMut(&InvalidChanged) + 'static,
    ) -> SubscriptionId {
        self.events.on_block_invalid_changed(callback)
    }

    /// Removes a subscription.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Copies the grid's current size tables.
    pub fn snapshot(&self) -> SizeSnapshot {
        self.grid.snapshot()
    }

    /// Pixel position of a cell's top-left corner in the current layout.
    pub fn cell_origin(&self, cell: CellPos) -> Point {
        geometry::cell_origin(cell, self.grid.row_sizes(), self.grid.column_sizes())
    }
}
