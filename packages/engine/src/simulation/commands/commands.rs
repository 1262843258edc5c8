use rand::Rng;

use crate::elements::{ElementId, EL_EMPTY, SHADE_SPAN};
use crate::grid::Cell;

use super::settings::MAX_BRUSH_RADIUS;
use super::WorldCore;

/// Shade factors handed out to painted cells: 0.1, 0.2 ... 0.5.
const SHADE_STEPS: u32 = 5;
const SHADE_STEP: f32 = SHADE_SPAN / SHADE_STEPS as f32;

/// Direct write. Ids the catalog does not know are refused.
pub(super) fn set_cell(world: &mut WorldCore, x: u32, y: u32, cell: Cell) -> bool {
    if !world.catalog.is_valid_id(cell.element) {
        log::warn!("set_cell({}, {}): unknown element id {}", x, y, cell.element);
        return false;
    }
    world.grid.window_mut(&world.dirty).set(x, y, cell);
    true
}

pub(super) fn clear_cell(world: &mut WorldCore, x: u32, y: u32) {
    world.grid.window_mut(&world.dirty).clear(x, y);
}

/// Place one cell of `element` if the slot is empty. Returns whether it was placed.
pub(super) fn add_cell(world: &mut WorldCore, x: u32, y: u32, element: ElementId) -> bool {
    if x >= world.grid.width() || y >= world.grid.height() {
        return false;
    }
    if element == EL_EMPTY || !world.catalog.is_valid_id(element) {
        return false;
    }
    if !world.grid.get(x, y).is_empty() {
        return false;
    }

    let shade = rand::rng().random_range(1..=SHADE_STEPS) as f32 * SHADE_STEP;
    set_cell(world, x, y, Cell::new(element, shade))
}

/// Circular brush. Frozen elements fill the whole disc; everything else
/// paints a checkerboard so loose material does not land as a solid slab.
pub(super) fn paint(world: &mut WorldCore, cx: i32, cy: i32, radius: i32, element: ElementId) -> u32 {
    if element == EL_EMPTY || !world.catalog.is_valid_id(element) {
        return 0;
    }
    let solid_fill = world.catalog.get(element).is_frozen();
    let mut placed = 0;

    for_each_in_disc(world, cx, cy, radius, |world, x, y| {
        if (solid_fill || (x + y) % 2 == 0) && add_cell(world, x, y, element) {
            placed += 1;
        }
    });
    placed
}

pub(super) fn erase(world: &mut WorldCore, cx: i32, cy: i32, radius: i32) -> u32 {
    let mut removed = 0;
    for_each_in_disc(world, cx, cy, radius, |world, x, y| {
        if !world.grid.get(x, y).is_empty() {
            clear_cell(world, x, y);
            removed += 1;
        }
    });
    removed
}

pub(super) fn clear(world: &mut WorldCore) {
    world.grid.clear();
    world.dirty.mark_all_dirty();
    world.frame = 0;
}

/// Visit every in-grid cell of the disc. The radius is capped at the brush
/// maximum and only the part of the bounding box inside the grid is walked.
fn for_each_in_disc<F>(world: &mut WorldCore, cx: i32, cy: i32, radius: i32, mut f: F)
where
    F: FnMut(&mut WorldCore, u32, u32),
{
    let r = i64::from(radius.clamp(0, MAX_BRUSH_RADIUS as i32));
    let r2 = r * r;
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let (width, height) = (i64::from(world.grid.width()), i64::from(world.grid.height()));

    for y in (cy - r).max(0)..=(cy + r).min(height - 1) {
        for x in (cx - r).max(0)..=(cx + r).min(width - 1) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r2 {
                f(world, x as u32, y as u32);
            }
        }
    }
}
