//! Liquid flow - fall (or rise), spread, then climb.
//!
//! Philosophy:
//! - No pressure model, a liquid just looks for somewhere to go
//! - Straight along its vertical direction first
//! - Then up to `max_spread` cells sideways on the next row, one side
//!   chosen at random, stopping at the first cell it can take
//! - Then the same reach toward the row behind it, along the diagonal
//!
//! Liquids never burn, melt or decay. Those rules belong to solids.

mod r#move;
mod scan;

use rand::Rng;

use self::r#move::try_move;
use self::scan::{diagonal_clear, path_clear};
use super::{GeneratorSource, Outcome, ResolveContext};
use crate::elements::ElementDef;
use crate::grid::{Cell, GridWindow};

pub(super) fn resolve<R: Rng>(
    ctx: &mut ResolveContext<'_, R>,
    window: &mut GridWindow<'_>,
    (x, y): (u32, u32),
    moving: Cell,
    mover: &ElementDef,
    generator: Option<GeneratorSource>,
) -> Outcome {
    let vertical: i32 = if mover.rises { -1 } else { 1 };
    let (xi, yi) = (x as i32, y as i32);

    if let Some(outcome) = try_move(ctx, window, (x, y), (xi, yi + vertical), moving, mover, generator) {
        return outcome;
    }

    let side: i32 = if ctx.rng.random_bool(0.5) { 1 } else { -1 };
    let reach = i32::try_from(ctx.settings.max_spread.max(1)).unwrap_or(i32::MAX);

    let ahead = yi + vertical;
    for spread in 1..=reach {
        let tx = xi.saturating_add(side * spread);
        if !window.in_bounds(tx, yi) {
            break;
        }
        if !path_clear(window, xi, tx, ahead) {
            continue;
        }
        if let Some(outcome) = try_move(ctx, window, (x, y), (tx, ahead), moving, mover, generator) {
            return outcome;
        }
    }

    let behind = yi - vertical;
    for spread in 1..=reach {
        let tx = xi.saturating_add(side * spread);
        if !window.in_bounds(tx, yi) {
            break;
        }
        if !diagonal_clear(window, (xi, yi), (tx, behind)) {
            continue;
        }
        if let Some(outcome) = try_move(ctx, window, (x, y), (tx, behind), moving, mover, generator) {
            return outcome;
        }
    }

    Outcome::Idle
}
