use std::collections::HashSet;

/// Size of a tile in grid-cell units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileExtent {
    pub width: u32,
    pub height: u32,
}

impl TileExtent {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for TileExtent {
    fn default() -> Self {
        Self { width: 1, height: 1 }
    }
}

/// Item to be placed by the packer
#[derive(Debug, Clone)]
pub struct GridItem {
    pub extent: TileExtent,
    pub index: usize,
}

/// Cell origin assigned to one item
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    pub column: u32,
    pub row: u32,
    pub index: usize,
}

/// Result of one packing pass
#[derive(Debug, Clone)]
pub struct PackResult {
    pub placements: Vec<Placement>,
    /// Row the cursor ended on; the caller sizes the container from it.
    pub max_row: u32,
}

/// First-fit row-major packer.
///
/// Places items in input order: the cursor sweeps left to right, wrapping to
/// a new row when the item no longer fits, and skips cells already claimed by
/// earlier (taller or wider) items. Later items can fall through into gaps
/// left on previous rows. Deterministic: same input order and capacity give
/// the same placements.
pub struct GridPacker;

impl GridPacker {
    pub fn pack(items: &[GridItem], row_capacity: u32) -> PackResult {
        let row_capacity = row_capacity.max(1);

        let mut x = 0u32;
        let mut y = 0u32;
        let mut occupied: HashSet<(u32, u32)> = HashSet::new();
        let mut placements = Vec::with_capacity(items.len());

        for item in items {
            // Widths are clamped to the row capacity by the markup layer.
            let w = item.extent.width.min(row_capacity);
            let h = item.extent.height.max(1);

            // Scan for an origin cell that is free and leaves room for the
            // full width before the row boundary.
            loop {
                if x + w > row_capacity {
                    x = 0;
                    y += 1;
                }
                if !occupied.contains(&(x, y)) {
                    break;
                }
                x += 1;
            }

            placements.push(Placement {
                column: x,
                row: y,
                index: item.index,
            });

            for dx in 0..w {
                for dy in 0..h {
                    occupied.insert((x + dx, y + dy));
                }
            }

            // Cursor continues from the item's right edge; the next item may
            // share the row if space remains.
            x += w;
        }

        PackResult {
            placements,
            max_row: y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn items_from_widths(widths: &[u32]) -> Vec<GridItem> {
        widths
            .iter()
            .enumerate()
            .map(|(index, &width)| GridItem {
                extent: TileExtent::new(width, 1),
                index,
            })
            .collect()
    }

    fn cells_of(placement: &Placement, extent: TileExtent) -> Vec<(u32, u32)> {
        let mut cells = Vec::new();
        for dx in 0..extent.width {
            for dy in 0..extent.height {
                cells.push((placement.column + dx, placement.row + dy));
            }
        }
        cells
    }

    #[test]
    fn test_empty_input() {
        let result = GridPacker::pack(&[], 3);
        assert!(result.placements.is_empty());
        // Container still gets sized to one row.
        assert_eq!(result.max_row, 0);
    }

    #[test]
    fn test_full_row_then_wide_tile_wraps() {
        // Three unit tiles fill row 0; the width-2 tile cannot fit and
        // starts row 1 at column 0.
        let items = items_from_widths(&[1, 1, 1, 2]);
        let result = GridPacker::pack(&items, 3);

        let positions: Vec<(u32, u32)> = result
            .placements
            .iter()
            .map(|p| (p.column, p.row))
            .collect();
        assert_eq!(positions, vec![(0, 0), (1, 0), (2, 0), (0, 1)]);
        assert_eq!(result.max_row, 1);
    }

    #[test]
    fn test_wide_tile_first() {
        // Width-2 tile spans columns 0-1, the next unit tile takes column 2,
        // the third wraps to row 1.
        let items = items_from_widths(&[2, 1, 1]);
        let result = GridPacker::pack(&items, 3);

        let positions: Vec<(u32, u32)> = result
            .placements
            .iter()
            .map(|p| (p.column, p.row))
            .collect();
        assert_eq!(positions, vec![(0, 0), (2, 0), (0, 1)]);
    }

    #[test]
    fn test_fall_through_into_gap() {
        // A tall tile claims (0,0) and (0,1). A width-2 tile takes (1,0).
        // The next unit tile wraps to row 1, skips the tall tile's cell, and
        // lands in the gap at (1,1).
        let items = vec![
            GridItem { extent: TileExtent::new(1, 2), index: 0 },
            GridItem { extent: TileExtent::new(2, 1), index: 1 },
            GridItem { extent: TileExtent::new(1, 1), index: 2 },
        ];
        let result = GridPacker::pack(&items, 3);

        assert_eq!((result.placements[0].column, result.placements[0].row), (0, 0));
        assert_eq!((result.placements[1].column, result.placements[1].row), (1, 0));
        assert_eq!((result.placements[2].column, result.placements[2].row), (1, 1));
    }

    #[test]
    fn test_wide_tile_never_straddles_row_boundary() {
        // A tall tile occupies column 0 of rows 0-1. The width-3 tile cannot
        // start at column 1 of row 1 (it would cross the boundary), so it
        // drops to row 2.
        let items = vec![
            GridItem { extent: TileExtent::new(1, 2), index: 0 },
            GridItem { extent: TileExtent::new(3, 1), index: 1 },
        ];
        let result = GridPacker::pack(&items, 3);

        assert_eq!((result.placements[1].column, result.placements[1].row), (0, 2));
    }

    #[test]
    fn test_capacity_one_stacks_vertically() {
        let items = items_from_widths(&[1, 1, 1]);
        let result = GridPacker::pack(&items, 1);

        for (i, p) in result.placements.iter().enumerate() {
            assert_eq!(p.column, 0);
            assert_eq!(p.row, i as u32);
        }
        assert_eq!(result.max_row, 2);
    }

    #[test]
    fn test_deterministic() {
        let items = vec![
            GridItem { extent: TileExtent::new(2, 2), index: 0 },
            GridItem { extent: TileExtent::new(1, 1), index: 1 },
            GridItem { extent: TileExtent::new(1, 3), index: 2 },
            GridItem { extent: TileExtent::new(2, 1), index: 3 },
        ];
        let a = GridPacker::pack(&items, 4);
        let b = GridPacker::pack(&items, 4);

        for (pa, pb) in a.placements.iter().zip(b.placements.iter()) {
            assert_eq!((pa.column, pa.row), (pb.column, pb.row));
        }
        assert_eq!(a.max_row, b.max_row);
    }

    proptest! {
        #[test]
        fn pack_never_overlaps_and_stays_in_bounds(
            sizes in prop::collection::vec((1u32..=4, 1u32..=4), 0..24),
            capacity in 1u32..=6,
        ) {
            let items: Vec<GridItem> = sizes
                .iter()
                .enumerate()
                .map(|(index, &(w, h))| GridItem {
                    extent: TileExtent::new(w.min(capacity), h),
                    index,
                })
                .collect();

            let result = GridPacker::pack(&items, capacity);
            prop_assert_eq!(result.placements.len(), items.len());

            let mut seen: HashSet<(u32, u32)> = HashSet::new();
            for p in &result.placements {
                let extent = items[p.index].extent;
                prop_assert!(p.column < capacity);
                prop_assert!(p.column + extent.width <= capacity);
                for cell in cells_of(p, extent) {
                    // Every claimed cell must be claimed exactly once.
                    prop_assert!(seen.insert(cell));
                }
            }
        }
    }
}
