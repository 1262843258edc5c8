use crate::grid::GridWindow;

/// True when every cell strictly between column `x` and `to_x` on `row`
/// is inside the grid and empty. Adjacent columns have nothing between
/// them and are always clear.
#[inline]
pub(super) fn path_clear(window: &GridWindow<'_>, x: i32, to_x: i32, row: i32) -> bool {
    let step = (to_x - x).signum();
    if step == 0 {
        return true;
    }
    let mut cx = x + step;
    while cx != to_x {
        if !window.in_bounds(cx, row) || !window.get(cx as u32, row as u32).is_empty() {
            return false;
        }
        cx += step;
    }
    true
}

/// True when every cell strictly between (x, y) and (to_x, to_y) along the
/// straight line joining them is inside the grid and empty. One cell is
/// visited per column, on the row nearest the line (halves round toward
/// the destination).
#[inline]
pub(super) fn diagonal_clear(window: &GridWindow<'_>, (x, y): (i32, i32), (to_x, to_y): (i32, i32)) -> bool {
    let steps = (to_x - x).abs();
    let step = (to_x - x).signum();
    let rise = to_y - y;
    for i in 1..steps {
        let cx = x + step * i;
        let cy = y + (2 * rise * i + steps * rise.signum()) / (2 * steps);
        if !window.in_bounds(cx, cy) || !window.get(cx as u32, cy as u32).is_empty() {
            return false;
        }
    }
    true
}
