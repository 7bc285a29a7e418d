//! Change notifications raised by the grid and its blocks.
//!
//! Each mutable field group (grid size, block position, block dimensions, block
//! validity) has its own subscriber list and its own payload carrying the applied
//! delta. Subscribers run synchronously, in subscription order, on the thread that
//! performed the mutation.

use crate::types::BlockId;

/// The grid gained or lost rows or columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridResized {
    /// Rows added (positive) or removed (negative)
    pub row_delta: i32,
    /// Columns added (positive) or removed (negative)
    pub column_delta: i32,
}

/// A block's top-left cell moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChanged {
    /// The block that moved
    pub block: BlockId,
    /// Applied change of the block's row
    pub row_delta: i32,
    /// Applied change of the block's column
    pub column_delta: i32,
}

/// A block's row span or column span changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionsChanged {
    /// The block that was resized
    pub block: BlockId,
    /// Applied change of the block's row span
    pub row_delta: i32,
    /// Applied change of the block's column span
    pub column_delta: i32,
}

/// A block's advisory overlap flag flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidChanged {
    /// The block whose flag changed
    pub block: BlockId,
    /// New value of the flag
    pub invalid: bool,
}

/// Handle returned by every `on_*` subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

struct Subscribers<T> {
    entries: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Subscribers<T> {
    fn push(&mut self, id: SubscriptionId, callback: Callback<T>) {
        self.entries.push((id, callback));
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    fn emit(&mut self, event: &T) {
        for (_, callback) in self.entries.iter_mut() {
            callback(event);
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Subscriber lists for every notification the diagram raises.
#[derive(Default)]
pub struct EventHub {
    next_id: u64,
    grid_resized: Subscribers<GridResized>,
    position_changed: Subscribers<PositionChanged>,
    dimensions_changed: Subscribers<DimensionsChanged>,
    invalid_changed: Subscribers<InvalidChanged>,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("grid_resized", &self.grid_resized.len())
            .field("position_changed", &self.position_changed.len())
            .field("dimensions_changed", &self.dimensions_changed.len())
            .field("invalid_changed", &self.invalid_changed.len())
            .finish()
    }
}

impl EventHub {
    /// Creates a hub with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Subscribes to grid row/column count changes.
    pub fn on_grid_resized(&mut self, callback: impl FnMut(&GridResized) + 'static) -> SubscriptionId {
        let id = self.allocate_id();
        self.grid_resized.push(id, Box::new(callback));
        id
    }

    /// Subscribes to block position changes.
    pub fn on_block_position_changed(
        &mut self,
        callback: impl FnMut(&PositionChanged) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_id();
        self.position_changed.push(id, Box::new(callback));
        id
    }

    /// Subscribes to block span changes.
    pub fn on_block_dimensions_changed(
        &mut self,
        callback: impl FnMut(&DimensionsChanged) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_id();
        self.dimensions_changed.push(id, Box::new(callback));
        id
    }

    /// Subscribes to changes of blocks' overlap flags.
    pub fn on_block_invalid_changed(
        &mut self,
        callback: impl FnMut(&InvalidChanged) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_id();
        self.invalid_changed.push(id, Box::new(callback));
        id
    }

    /// Removes a subscription from whichever list holds it.
    ///
    /// # Returns
    ///
    /// `true` if the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.grid_resized.remove(id)
            || self.position_changed.remove(id)
            || self.dimensions_changed.remove(id)
            || self.invalid_changed.remove(id)
    }

    pub(crate) fn emit_grid_resized(&mut self, event: GridResized) {
        self.grid_resized.emit(&event);
    }

    pub(crate) fn emit_position_changed(&mut self, event: PositionChanged) {
        self.position_changed.emit(&event);
    }

    pub(crate) fn emit_dimensions_changed(&mut self, event: DimensionsChanged) {
        self.dimensions_changed.emit(&event);
    }

    pub(crate) fn emit_invalid_changed(&mut self, event: InvalidChanged) {
        self.invalid_changed.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use uuid::Uuid;

    #[test]
    fn test_subscribers_receive_payload_in_order() {
        let mut hub = EventHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        hub.on_grid_resized(move |e| first.borrow_mut().push(("first", e.row_delta)));
        let second = Rc::clone(&seen);
        hub.on_grid_resized(move |e| second.borrow_mut().push(("second", e.row_delta)));

        hub.emit_grid_resized(GridResized {
            row_delta: 3,
            column_delta: 0,
        });

        assert_eq!(*seen.borrow(), vec![("first", 3), ("second", 3)]);
    }

    #[test]
    fn test_lists_are_independent() {
        let mut hub = EventHub::new();
        let positions = Rc::new(RefCell::new(0));
        let dimensions = Rc::new(RefCell::new(0));

        let p = Rc::clone(&positions);
        hub.on_block_position_changed(move |_| *p.borrow_mut() += 1);
        let d = Rc::clone(&dimensions);
        hub.on_block_dimensions_changed(move |_| *d.borrow_mut() += 1);

        hub.emit_position_changed(PositionChanged {
            block: Uuid::new_v4(),
            row_delta: 1,
            column_delta: 0,
        });

        assert_eq!(*positions.borrow(), 1);
        assert_eq!(*dimensions.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut hub = EventHub::new();
        let count = Rc::new(RefCell::new(0));

        let c = Rc::clone(&count);
        let id = hub.on_block_invalid_changed(move |_| *c.borrow_mut() += 1);

        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));

        hub.emit_invalid_changed(InvalidChanged {
            block: Uuid::new_v4(),
            invalid: true,
        });
        assert_eq!(*count.borrow(), 0);
    }
}
