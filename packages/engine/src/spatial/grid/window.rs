use std::ops::Range;

use super::Cell;
use crate::chunks::DirtyChunkMap;
use crate::elements::ElementId;

/// A run of whole columns borrowed mutably from the grid.
///
/// Coordinates stay global. Touching a column outside `columns()` panics:
/// the scheduler sizes windows so resolution never needs to.
pub struct GridWindow<'a> {
    types: &'a mut [ElementId],
    shades: &'a mut [f32],
    updated: &'a mut [u8],
    x0: u32,
    x1: u32,
    width: u32,
    height: u32,
    dirty: &'a DirtyChunkMap,
}

impl<'a> GridWindow<'a> {
    pub(super) fn new(
        types: &'a mut [ElementId],
        shades: &'a mut [f32],
        updated: &'a mut [u8],
        columns: Range<u32>,
        width: u32,
        height: u32,
        dirty: &'a DirtyChunkMap,
    ) -> Self {
        debug_assert_eq!(types.len(), (columns.end - columns.start) as usize * height as usize);
        Self {
            types,
            shades,
            updated,
            x0: columns.start,
            x1: columns.end,
            width,
            height,
            dirty,
        }
    }

    pub fn columns(&self) -> Range<u32> {
        self.x0..self.x1
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bounds of the whole grid, not the window.
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn local(&self, x: u32, y: u32) -> usize {
        assert!(
            x >= self.x0 && x < self.x1 && y < self.height,
            "cell ({}, {}) is outside band window {}..{}",
            x,
            y,
            self.x0,
            self.x1
        );
        ((x - self.x0) as usize) * (self.height as usize) + (y as usize)
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Cell {
        let idx = self.local(x, y);
        Cell::new(self.types[idx], self.shades[idx])
    }

    #[inline]
    pub fn element(&self, x: u32, y: u32) -> ElementId {
        self.types[self.local(x, y)]
    }

    /// Write a cell and mark its chunk neighbourhood dirty.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, cell: Cell) {
        let idx = self.local(x, y);
        self.types[idx] = cell.element;
        self.shades[idx] = cell.shade;
        self.dirty.mark_dirty(x, y);
    }

    #[inline]
    pub fn clear(&mut self, x: u32, y: u32) {
        self.set(x, y, Cell::EMPTY);
    }

    #[inline]
    pub fn is_updated(&self, x: u32, y: u32) -> bool {
        self.updated[self.local(x, y)] != 0
    }

    #[inline]
    pub fn mark_updated(&mut self, x: u32, y: u32) {
        let idx = self.local(x, y);
        self.updated[idx] = 1;
    }

    #[inline]
    pub fn is_chunk_active(&self, x: u32, y: u32) -> bool {
        self.dirty.is_chunk_active(x, y)
    }
}

/// Columns a task resolves plus the wider window it may touch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnBand {
    pub columns: Range<u32>,
    pub window: Range<u32>,
}

/// Cut `[0, width)` into bands `2 * reach` columns wide.
///
/// A cell in a band reads and writes at most `reach` columns away, so its
/// window pads the band by `reach` on each side. Bands with the same parity
/// then never share a column: run evens together, then odds.
pub fn plan_bands(width: u32, reach: u32) -> Vec<ColumnBand> {
    let reach = reach.max(1);
    let band_width = reach.saturating_mul(2);
    let mut bands = Vec::new();
    let mut start = 0u32;
    while start < width {
        let end = start.saturating_add(band_width).min(width);
        bands.push(ColumnBand {
            columns: start..end,
            window: start.saturating_sub(reach)..end.saturating_add(reach).min(width),
        });
        start = end;
    }
    bands
}
