//! Overlap detection between a reference placement and the other blocks.
//!
//! Overlap is advisory: it only toggles each block's `invalid` flag for the
//! presentation layer to render. Nothing is moved or rejected because of it.

use crate::events::InvalidChanged;
use crate::types::{Block, BlockId, CellRect};

/// Whether two cell rectangles share at least one cell.
///
/// Each rectangle covers the closed ranges `[column, column + column_span - 1]`
/// and `[row, row + row_span - 1]`; rectangles overlap when both ranges intersect.
pub fn overlaps(a: &CellRect, b: &CellRect) -> bool {
    a.column <= b.last_column()
        && b.column <= a.last_column()
        && a.row <= b.last_row()
        && b.row <= a.last_row()
}

/// Recomputes every block's `invalid` flag against `reference`.
///
/// The block identified by `reference_id` is skipped and left untouched. Every
/// other flag is rewritten from scratch, so stale flags from earlier passes never
/// survive.
///
/// # Returns
///
/// One [`InvalidChanged`] per block whose flag actually flipped.
pub fn mark_invalid(
    reference_id: BlockId,
    reference: &CellRect,
    blocks: &mut [Block],
) -> Vec<InvalidChanged> {
    let mut changes = Vec::new();
    for block in blocks.iter_mut().filter(|b| b.id() != reference_id) {
        let invalid = overlaps(reference, &block.rect());
        if block.set_invalid(invalid) {
            changes.push(InvalidChanged {
                block: block.id(),
                invalid,
            });
        }
    }
    changes
}

/// Clears every block's `invalid` flag.
pub fn clear_invalid(blocks: &mut [Block]) -> Vec<InvalidChanged> {
    blocks
        .iter_mut()
        .filter_map(|block| {
            block.set_invalid(false).then(|| InvalidChanged {
                block: block.id(),
                invalid: false,
            })
        })
        .collect()
}

/// IDs of every block currently flagged invalid, in block order.
pub fn invalid_set(blocks: &[Block]) -> Vec<BlockId> {
    blocks
        .iter()
        .filter(|b| b.is_invalid())
        .map(|b| b.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_corner() {
        let a = CellRect::new(0, 0, 2, 2);
        let b = CellRect::new(1, 1, 1, 1);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_adjacent_blocks_do_not_overlap() {
        let a = CellRect::new(0, 0, 2, 2);
        let c = CellRect::new(2, 2, 1, 1);
        assert!(!overlaps(&a, &c));

        let right = CellRect::new(0, 2, 2, 1);
        let below = CellRect::new(2, 0, 1, 2);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let tall = CellRect::new(0, 0, 5, 1);
        let wide = CellRect::new(2, 3, 1, 4);
        assert!(!overlaps(&tall, &wide));

        let crossing = CellRect::new(2, 0, 1, 4);
        assert!(overlaps(&tall, &crossing));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let rects = [
            CellRect::new(0, 0, 2, 2),
            CellRect::new(1, 1, 1, 1),
            CellRect::new(2, 2, 1, 1),
            CellRect::new(0, 3, 4, 1),
            CellRect::new(3, 0, 1, 5),
        ];
        for a in &rects {
            assert!(overlaps(a, a));
            for b in &rects {
                assert_eq!(overlaps(a, b), overlaps(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_mark_invalid_skips_reference_and_recomputes() {
        let mut blocks = vec![
            Block::new(0, 0, 2, 2),
            Block::new(1, 1, 1, 1),
            Block::new(2, 2, 1, 1),
        ];
        let reference_id = blocks[0].id();
        let reference = blocks[0].rect();

        let changes = mark_invalid(reference_id, &reference, &mut blocks);

        assert!(!blocks[0].is_invalid());
        assert!(blocks[1].is_invalid());
        assert!(!blocks[2].is_invalid());
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].block, blocks[1].id());
        assert_eq!(invalid_set(&blocks), vec![blocks[1].id()]);

        // Moving the reference away clears the stale flag.
        let moved = CellRect::new(2, 2, 1, 1);
        let changes = mark_invalid(reference_id, &moved, &mut blocks);
        assert!(!blocks[1].is_invalid());
        assert!(blocks[2].is_invalid());
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn test_mark_invalid_reports_only_flips() {
        let mut blocks = vec![Block::new(0, 0, 1, 1), Block::new(0, 0, 1, 1)];
        let reference_id = blocks[0].id();
        let reference = blocks[0].rect();

        assert_eq!(mark_invalid(reference_id, &reference, &mut blocks).len(), 1);
        assert!(mark_invalid(reference_id, &reference, &mut blocks).is_empty());
    }

    #[test]
    fn test_clear_invalid() {
        let mut blocks = vec![Block::new(0, 0, 1, 1), Block::new(0, 0, 1, 1)];
        let reference_id = blocks[0].id();
        let reference = blocks[0].rect();
        mark_invalid(reference_id, &reference, &mut blocks);

        let changes = clear_invalid(&mut blocks);
        assert_eq!(changes.len(), 1);
        assert!(invalid_set(&blocks).is_empty());
    }
}
