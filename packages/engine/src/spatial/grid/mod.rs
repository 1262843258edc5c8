//! Grid - Structure of Arrays cell storage
//!
//! Storage is column-major (`index = x * height + y`) so a run of whole
//! columns is one contiguous slice of every array. Band tasks borrow such
//! runs as `GridWindow`s.
//!
//! Reads through `Grid` are bounds-checked and panic on a miss. All writes
//! go through a `GridWindow`, which also marks the dirty-chunk map.

use crate::chunks::DirtyChunkMap;
use crate::elements::{ElementId, EL_EMPTY};

mod render_rects;
mod window;

pub use render_rects::RenderRect;
pub use window::{plan_bands, ColumnBand, GridWindow};

/// One grid slot. Equality looks at the element only; the shade is a
/// per-instance render detail.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub element: ElementId,
    pub shade: f32,
}

impl Cell {
    pub const EMPTY: Cell = Cell { element: EL_EMPTY, shade: 0.0 };

    #[inline]
    pub const fn new(element: ElementId, shade: f32) -> Self {
        Self { element, shade }
    }

    /// Fresh instance straight from the catalog (conversions, deposits).
    #[inline]
    pub const fn plain(element: ElementId) -> Self {
        Self { element, shade: 0.0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.element == EL_EMPTY
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl Eq for Cell {}

pub struct Grid {
    width: u32,
    height: u32,

    pub(crate) types: Vec<ElementId>,
    pub(crate) shades: Vec<f32>,
    /// 1 once a cell's occupant has moved in the running sub-step
    pub(crate) updated: Vec<u8>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let size = (width as usize) * (height as usize);
        Self {
            width,
            height,
            types: vec![EL_EMPTY; size],
            shades: vec![0.0; size],
            updated: vec![0; size],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "cell ({}, {}) is outside the {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        (x as usize) * (self.height as usize) + (y as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Cell {
        let idx = self.index(x, y);
        Cell::new(self.types[idx], self.shades[idx])
    }

    #[inline]
    pub fn element(&self, x: u32, y: u32) -> ElementId {
        self.types[self.index(x, y)]
    }

    /// Column-major element ids.
    pub fn types(&self) -> &[ElementId] {
        &self.types
    }

    pub fn shades(&self) -> &[f32] {
        &self.shades
    }

    /// Row-major copy of the element ids, the layout renderers expect.
    pub fn types_row_major(&self) -> Vec<ElementId> {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut out = vec![EL_EMPTY; w * h];
        for (x, column) in self.types.chunks_exact(h).enumerate() {
            for (y, &id) in column.iter().enumerate() {
                out[y * w + x] = id;
            }
        }
        out
    }

    pub fn count_non_empty(&self) -> usize {
        self.types.iter().filter(|&&t| t != EL_EMPTY).count()
    }

    pub fn reset_updated(&mut self) {
        self.updated.fill(0);
    }

    /// Wipe every cell. Callers decide how to wake the dirty map.
    pub fn clear(&mut self) {
        self.types.fill(EL_EMPTY);
        self.shades.fill(0.0);
        self.updated.fill(0);
    }

    /// Rewrite ids through `table` (old id -> new id). Ids past the end of
    /// the table, and anything mapped to Empty, become Empty.
    pub fn remap(&mut self, table: &[ElementId]) {
        for (t, shade) in self.types.iter_mut().zip(self.shades.iter_mut()) {
            let next = table.get(*t as usize).copied().unwrap_or(EL_EMPTY);
            if next == EL_EMPTY {
                *shade = 0.0;
            }
            *t = next;
        }
    }

    /// Mutable view over every column.
    pub fn window_mut<'a>(&'a mut self, dirty: &'a DirtyChunkMap) -> GridWindow<'a> {
        let (width, height) = (self.width, self.height);
        GridWindow::new(
            &mut self.types,
            &mut self.shades,
            &mut self.updated,
            0..width,
            width,
            height,
            dirty,
        )
    }

    /// Split the grid into one mutable view per column range.
    ///
    /// Ranges must be ascending and non-overlapping (touching is fine); a
    /// violation panics rather than aliasing cells.
    pub fn split_windows<'a, I>(&'a mut self, ranges: I, dirty: &'a DirtyChunkMap) -> Vec<GridWindow<'a>>
    where
        I: IntoIterator<Item = std::ops::Range<u32>>,
    {
        let (width, height) = (self.width, self.height);
        let h = height as usize;

        let mut types: &'a mut [ElementId] = &mut self.types;
        let mut shades: &'a mut [f32] = &mut self.shades;
        let mut updated: &'a mut [u8] = &mut self.updated;
        let mut consumed = 0u32;

        let mut out = Vec::new();
        for cols in ranges {
            assert!(
                cols.start >= consumed && cols.start <= cols.end && cols.end <= width,
                "band window {:?} overlaps or exceeds the grid (next free column {})",
                cols,
                consumed
            );
            let skip = (cols.start - consumed) as usize * h;
            let take = (cols.end - cols.start) as usize * h;

            let t = carve(&mut types, skip, take);
            let s = carve(&mut shades, skip, take);
            let u = carve(&mut updated, skip, take);
            consumed = cols.end;

            out.push(GridWindow::new(t, s, u, cols, width, height, dirty));
        }
        out
    }
}

/// Drop `skip` items from the front of `rest`, hand out the next `take`.
fn carve<'a, T>(rest: &mut &'a mut [T], skip: usize, take: usize) -> &'a mut [T] {
    let (_, tail) = std::mem::take(rest).split_at_mut(skip);
    let (head, tail) = tail.split_at_mut(take);
    *rest = tail;
    head
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_compare_by_element_only() {
        assert_eq!(Cell::new(3, 0.1), Cell::new(3, 0.5));
        assert_ne!(Cell::new(3, 0.1), Cell::new(4, 0.1));
        assert!(Cell::EMPTY.is_empty());
    }

    #[test]
    #[should_panic(expected = "outside the 10x10 grid")]
    fn out_of_range_read_panics() {
        let grid = Grid::new(10, 10);
        grid.get(10, 0);
    }

    #[test]
    fn window_writes_land_in_grid_and_mark_dirty() {
        let mut grid = Grid::new(20, 20);
        let mut dirty = DirtyChunkMap::new(20, 20, 10);
        dirty.begin_step();

        grid.window_mut(&dirty).set(12, 3, Cell::new(7, 0.3));
        assert_eq!(grid.get(12, 3), Cell::plain(7));
        assert!((grid.get(12, 3).shade - 0.3).abs() < f32::EPSILON);
        assert_eq!(dirty.dirty_chunk_count(), 4);
    }

    #[test]
    fn row_major_copy_transposes() {
        let mut grid = Grid::new(3, 2);
        let dirty = DirtyChunkMap::new(3, 2, 10);
        {
            let mut w = grid.window_mut(&dirty);
            w.set(2, 0, Cell::plain(5));
            w.set(0, 1, Cell::plain(6));
        }
        assert_eq!(grid.types_row_major(), vec![0, 0, 5, 6, 0, 0]);
        assert_eq!(grid.count_non_empty(), 2);
    }

    #[test]
    fn remap_drops_unknown_ids() {
        let mut grid = Grid::new(4, 1);
        let dirty = DirtyChunkMap::new(4, 1, 10);
        {
            let mut w = grid.window_mut(&dirty);
            w.set(0, 0, Cell::new(1, 0.2));
            w.set(1, 0, Cell::new(2, 0.2));
            w.set(2, 0, Cell::new(9, 0.2));
        }
        grid.remap(&[0, 2, 0]);
        assert_eq!(grid.element(0, 0), 2);
        assert_eq!(grid.element(1, 0), EL_EMPTY);
        assert_eq!(grid.element(2, 0), EL_EMPTY);
        assert_eq!(grid.shades()[2], 0.0);
    }

    #[test]
    fn split_windows_are_disjoint_views() {
        let mut grid = Grid::new(12, 4);
        let dirty = DirtyChunkMap::new(12, 4, 4);
        {
            let mut windows = grid.split_windows([0..3, 3..7, 9..12], &dirty);
            assert_eq!(windows.len(), 3);
            windows[0].set(2, 1, Cell::plain(1));
            windows[1].set(3, 1, Cell::plain(2));
            windows[2].set(11, 3, Cell::plain(3));
        }
        assert_eq!(grid.element(2, 1), 1);
        assert_eq!(grid.element(3, 1), 2);
        assert_eq!(grid.element(11, 3), 3);
    }

    #[test]
    #[should_panic(expected = "overlaps")]
    fn overlapping_windows_panic() {
        let mut grid = Grid::new(12, 4);
        let dirty = DirtyChunkMap::new(12, 4, 4);
        let _ = grid.split_windows([0..5, 4..8], &dirty);
    }
}
