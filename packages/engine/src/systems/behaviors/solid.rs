//! Solid movement - walk the behavior groups in order.
//!
//! Each group contributes one random direction (after the global rotation).
//! Off-grid or same-element destinations skip to the next group. Reactions
//! and decay end the attempt, a frozen occupant aborts it, and the first
//! lower-density destination takes the move.

use rand::Rng;

use super::{displace, GeneratorSource, Outcome, ResolveContext};
use crate::elements::ElementDef;
use crate::grid::{Cell, GridWindow};
use crate::systems::reactions::{contact_reaction, roll_decay};

pub(super) fn resolve<R: Rng>(
    ctx: &mut ResolveContext<'_, R>,
    window: &mut GridWindow<'_>,
    (x, y): (u32, u32),
    moving: Cell,
    mover: &ElementDef,
    generator: Option<GeneratorSource>,
) -> Outcome {
    let catalog = ctx.catalog;

    for group in &mover.behavior {
        if group.is_empty() {
            continue;
        }
        let pick = group[ctx.rng.random_range(0..group.len())];
        let (dx, dy) = pick.rotated(ctx.settings.rotation_offset).offset();
        let (tx, ty) = (x as i32 + dx, y as i32 + dy);
        if !window.in_bounds(tx, ty) {
            continue;
        }
        let (tx, ty) = (tx as u32, ty as u32);

        let dest = window.get(tx, ty);
        if dest.element == mover.id {
            continue;
        }
        let target = catalog.get(dest.element);

        if let Some(reaction) = contact_reaction(mover, target, catalog) {
            window.clear(x, y);
            window.set(tx, ty, Cell::plain(reaction.product()));
            return Outcome::Converted;
        }

        if generator.is_none() && roll_decay(mover, ctx.rng) {
            window.clear(x, y);
            return Outcome::Decayed;
        }

        if !target.is_empty() && target.is_frozen() {
            return Outcome::Blocked;
        }

        if target.density < mover.density {
            return displace(window, (x, y), (tx, ty), moving, generator, ctx.rng);
        }
    }

    Outcome::Idle
}
