//! Dirty-chunk overlay rectangles.
//!
//! Row run-length encoding over the current generation, then runs with the
//! same x span on consecutive rows are folded together. Output is in chunk
//! units.

use super::DirtyChunkMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyRect {
    pub cx: u32,
    pub cy: u32,
    pub cw: u32,
    pub ch: u32,
}

/// Reusable output buffer.
#[derive(Debug, Default)]
pub struct MergedDirtyRects {
    rects: Vec<DirtyRect>,
}

impl MergedDirtyRects {
    pub fn new(capacity: usize) -> Self {
        Self { rects: Vec::with_capacity(capacity) }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.rects.clear();
    }

    #[inline]
    pub fn push(&mut self, rect: DirtyRect) {
        self.rects.push(rect);
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.rects.len()
    }

    pub fn as_slice(&self) -> &[DirtyRect] {
        &self.rects
    }
}

impl DirtyChunkMap {
    /// Fill `output` with horizontal runs of dirty chunks. Returns the count.
    pub fn collect_merged_dirty_rects(&self, output: &mut MergedDirtyRects) -> usize {
        output.clear();

        for cy in 0..self.chunks_y {
            let mut run_start: Option<u32> = None;

            for cx in 0..self.chunks_x {
                match (self.is_dirty(cx, cy), run_start) {
                    (true, None) => run_start = Some(cx),
                    (false, Some(start)) => {
                        output.push(DirtyRect { cx: start, cy, cw: cx - start, ch: 1 });
                        run_start = None;
                    }
                    _ => {}
                }
            }

            if let Some(start) = run_start {
                output.push(DirtyRect { cx: start, cy, cw: self.chunks_x - start, ch: 1 });
            }
        }

        output.count()
    }

    /// Fold rectangles sharing x and width on adjacent rows.
    pub fn merge_vertical(&self, rects: &mut MergedDirtyRects) {
        let list = &mut rects.rects;
        if list.len() < 2 {
            return;
        }

        let mut i = 0;
        while i < list.len() {
            let mut j = i + 1;
            while j < list.len() {
                let (a, b) = (list[i], list[j]);
                if b.cx == a.cx && b.cw == a.cw && b.cy == a.cy + a.ch {
                    list[i].ch += b.ch;
                    list.remove(j);
                } else {
                    j += 1;
                }
            }
            i += 1;
        }
    }
}
