use rand::Rng;

use super::super::{displace, GeneratorSource, Outcome, ResolveContext};
use crate::elements::ElementDef;
use crate::grid::{Cell, GridWindow};

/// Liquid displacement: empty or strictly lighter destinations accept the
/// mover. Returns `None` when the destination refuses or is off-grid.
#[inline]
pub(super) fn try_move<R: Rng>(
    ctx: &mut ResolveContext<'_, R>,
    window: &mut GridWindow<'_>,
    from: (u32, u32),
    to: (i32, i32),
    moving: Cell,
    mover: &ElementDef,
    generator: Option<GeneratorSource>,
) -> Option<Outcome> {
    if !window.in_bounds(to.0, to.1) {
        return None;
    }
    let to = (to.0 as u32, to.1 as u32);

    let dest = window.get(to.0, to.1);
    if dest.is_empty() || ctx.catalog.get(dest.element).density < mover.density {
        Some(displace(window, from, to, moving, generator, ctx.rng))
    } else {
        None
    }
}
