//! Render coalescer: greedy same-element rectangles for drawing.
//!
//! Column-first scan. From each unvisited non-empty cell grow right while
//! the element matches, then grow down while the whole row span matches.
//! Covered cells are marked visited whether or not the rectangle is kept.

use super::Grid;
use crate::elements::{ElementId, EL_EMPTY};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub element: ElementId,
}

impl Grid {
    /// Cover every non-empty cell with a rectangle. With
    /// `include_single_pixel` off, lone 1x1 cells are left out.
    pub fn render_rects(&self, include_single_pixel: bool) -> Vec<RenderRect> {
        let (w, h) = (self.width(), self.height());
        let mut visited = vec![false; self.size()];
        let at = |x: u32, y: u32| (x as usize) * (h as usize) + (y as usize);
        let mut out = Vec::new();

        for x in 0..w {
            for y in 0..h {
                let element = self.types[at(x, y)];
                if element == EL_EMPTY || visited[at(x, y)] {
                    continue;
                }

                let mut rect_w = 1;
                while x + rect_w < w
                    && self.types[at(x + rect_w, y)] == element
                    && !visited[at(x + rect_w, y)]
                {
                    rect_w += 1;
                }

                let mut rect_h = 1;
                while y + rect_h < h
                    && (x..x + rect_w).all(|i| {
                        !visited[at(i, y + rect_h)] && self.types[at(i, y + rect_h)] == element
                    })
                {
                    rect_h += 1;
                }

                for i in x..x + rect_w {
                    for j in y..y + rect_h {
                        visited[at(i, j)] = true;
                    }
                }

                if rect_w == 1 && rect_h == 1 && !include_single_pixel {
                    continue;
                }
                out.push(RenderRect { x, y, width: rect_w, height: rect_h, element });
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunks::DirtyChunkMap;
    use crate::grid::Cell;

    fn paint(grid: &mut Grid, cells: &[(u32, u32, ElementId)]) {
        let dirty = DirtyChunkMap::new(grid.width(), grid.height(), 10);
        let mut w = grid.window_mut(&dirty);
        for &(x, y, id) in cells {
            w.set(x, y, Cell::plain(id));
        }
    }

    fn covered(rects: &[RenderRect]) -> usize {
        rects.iter().map(|r| (r.width * r.height) as usize).sum()
    }

    #[test]
    fn solid_block_is_one_rect() {
        let mut grid = Grid::new(8, 8);
        let mut cells = Vec::new();
        for x in 2..5 {
            for y in 1..4 {
                cells.push((x, y, 3));
            }
        }
        paint(&mut grid, &cells);

        let rects = grid.render_rects(true);
        assert_eq!(rects, vec![RenderRect { x: 2, y: 1, width: 3, height: 3, element: 3 }]);
    }

    #[test]
    fn single_pixels_follow_the_switch() {
        let mut grid = Grid::new(6, 6);
        paint(&mut grid, &[(0, 0, 1), (4, 4, 2), (5, 4, 2)]);

        let with = grid.render_rects(true);
        assert_eq!(with.len(), 2);
        assert_eq!(covered(&with), 3);

        let without = grid.render_rects(false);
        assert_eq!(without, vec![RenderRect { x: 4, y: 4, width: 2, height: 1, element: 2 }]);
    }

    #[test]
    fn rects_partition_non_empty_cells() {
        let mut grid = Grid::new(10, 10);
        let mut cells = Vec::new();
        for x in 0..10 {
            for y in 0..10 {
                if (x * 7 + y * 3) % 5 != 0 {
                    cells.push((x, y, ((x + y) % 3 + 1) as ElementId));
                }
            }
        }
        paint(&mut grid, &cells);

        let rects = grid.render_rects(true);
        assert_eq!(covered(&rects), grid.count_non_empty());

        let mut seen = vec![false; 100];
        for r in &rects {
            for x in r.x..r.x + r.width {
                for y in r.y..r.y + r.height {
                    assert_eq!(grid.element(x, y), r.element);
                    assert!(!seen[(x * 10 + y) as usize]);
                    seen[(x * 10 + y) as usize] = true;
                }
            }
        }
    }
}
