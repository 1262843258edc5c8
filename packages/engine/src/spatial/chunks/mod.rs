//! Dirty-chunk tracker - two generations of chunk flags.
//!
//! `previous` answers "did anything here change last sub-step" and gates
//! resolution. `current` collects writes made during this sub-step. Every
//! write marks the chunk it lands in plus the 8 surrounding chunks.

mod bitset;
mod merged_rects;

pub use bitset::{AtomicBitSet, BitSet};
pub use merged_rects::{DirtyRect, MergedDirtyRects};

/// Default chunk edge in cells.
pub const DEFAULT_CHUNK_SIZE: u32 = 10;

#[derive(Debug)]
pub struct DirtyChunkMap {
    chunk_size: u32,
    chunks_x: u32,
    chunks_y: u32,
    previous: BitSet,
    current: AtomicBitSet,
}

impl DirtyChunkMap {
    /// Everything starts dirty so the first sub-step looks at every cell.
    pub fn new(world_width: u32, world_height: u32, chunk_size: u32) -> Self {
        let chunk_size = chunk_size.max(1);
        let chunks_x = world_width.div_ceil(chunk_size);
        let chunks_y = world_height.div_ceil(chunk_size);
        let count = (chunks_x * chunks_y) as usize;

        let mut current = AtomicBitSet::new(count);
        current.fill();

        Self {
            chunk_size,
            chunks_x,
            chunks_y,
            previous: BitSet::new(count),
            current,
        }
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.chunks_x, self.chunks_y)
    }

    pub fn total_chunks(&self) -> usize {
        (self.chunks_x * self.chunks_y) as usize
    }

    #[inline]
    pub fn chunk_coords(&self, x: u32, y: u32) -> (u32, u32) {
        (x / self.chunk_size, y / self.chunk_size)
    }

    #[inline]
    pub fn chunk_idx_from_coords(&self, cx: u32, cy: u32) -> usize {
        (cy * self.chunks_x + cx) as usize
    }

    /// Snapshot current into previous, then clear current.
    ///
    /// Takes `&mut self`, so it can only run once every band task of the
    /// prior sub-step has finished with its shared borrow.
    pub fn begin_step(&mut self) {
        self.current.copy_into(&mut self.previous);
        self.current.clear();
    }

    /// Mark the chunk holding (x, y) and its 8 neighbours, clipped at edges.
    #[inline]
    pub fn mark_dirty(&self, x: u32, y: u32) {
        let (cx, cy) = self.chunk_coords(x, y);
        let x0 = cx.saturating_sub(1);
        let y0 = cy.saturating_sub(1);
        let x1 = (cx + 1).min(self.chunks_x.saturating_sub(1));
        let y1 = (cy + 1).min(self.chunks_y.saturating_sub(1));
        for ny in y0..=y1 {
            for nx in x0..=x1 {
                self.current.set(self.chunk_idx_from_coords(nx, ny));
            }
        }
    }

    /// True if the chunk holding (x, y) saw a write last sub-step.
    #[inline]
    pub fn is_chunk_active(&self, x: u32, y: u32) -> bool {
        let (cx, cy) = self.chunk_coords(x, y);
        self.previous.get(self.chunk_idx_from_coords(cx, cy))
    }

    /// Current-generation flag for a chunk (debug overlay).
    #[inline]
    pub fn is_dirty(&self, cx: u32, cy: u32) -> bool {
        cx < self.chunks_x && cy < self.chunks_y && self.current.get(self.chunk_idx_from_coords(cx, cy))
    }

    /// Force every chunk to be resolved on the next sub-step.
    pub fn mark_all_dirty(&mut self) {
        self.current.fill();
    }

    /// Chunks gating the running sub-step.
    pub fn active_chunk_count(&self) -> usize {
        self.previous.count_ones()
    }

    pub fn dirty_chunk_count(&self) -> usize {
        self.current.count_ones()
    }

    /// Row-major copy of the current generation.
    pub fn current_flags(&self) -> Vec<bool> {
        (0..self.total_chunks()).map(|idx| self.current.get(idx)).collect()
    }
}
