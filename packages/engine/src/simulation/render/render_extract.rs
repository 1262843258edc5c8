use crate::chunks::DirtyRect;
use crate::grid::RenderRect;

use super::WorldCore;

/// Shaded ABGR colour per cell, row-major. Empty cells are transparent.
pub(super) fn extract_colors(world: &mut WorldCore) -> &[u32] {
    let (width, height) = (world.grid.width(), world.grid.height());
    world.color_buffer.clear();
    world.color_buffer.reserve(world.grid.size());

    for y in 0..height {
        for x in 0..width {
            let cell = world.grid.get(x, y);
            let rgba = if cell.is_empty() {
                0
            } else {
                world.catalog.get(cell.element).shaded_color(cell.shade).to_abgr()
            };
            world.color_buffer.push(rgba);
        }
    }

    &world.color_buffer
}

pub(super) fn collect_render_rects(world: &mut WorldCore) -> usize {
    world.render_rects = world.grid.render_rects(world.include_single_pixel);
    world.render_rects.len()
}

pub(super) fn render_rect(world: &WorldCore, idx: usize) -> Option<RenderRect> {
    world.render_rects.get(idx).copied()
}

/// Rebuild the dirty-chunk overlay from the chunks written this sub-step.
pub(super) fn collect_merged_rects(world: &mut WorldCore) -> usize {
    world.dirty.collect_merged_dirty_rects(&mut world.merged_rects);
    world.dirty.merge_vertical(&mut world.merged_rects);
    world.merged_rects.count()
}

/// Merged overlay rectangle `idx` in cell units, clipped to the grid.
pub(super) fn merged_rect_cells(world: &WorldCore, idx: usize) -> Option<(u32, u32, u32, u32)> {
    let rect: &DirtyRect = world.merged_rects.as_slice().get(idx)?;
    let size = world.dirty.chunk_size();
    let x = rect.cx * size;
    let y = rect.cy * size;
    let w = (rect.cw * size).min(world.grid.width().saturating_sub(x));
    let h = (rect.ch * size).min(world.grid.height().saturating_sub(y));
    Some((x, y, w, h))
}

pub(super) fn count_dirty_chunks(world: &WorldCore) -> usize {
    world.dirty.dirty_chunk_count()
}
