//! Cell resolution - decides where one cell's content goes this sub-step.
//!
//! Entry point is `resolve_cell`. Generator substitution and gating happen
//! here, then the mover's `solid` flag picks the solid path (behavior
//! groups with reactions) or the liquid path (fall, spread, climb).
//! Both paths end in the shared `displace` primitive.

mod liquid;
mod solid;

use rand::Rng;

use crate::domain::content::ElementCatalog;
use crate::grid::{Cell, GridWindow};
use crate::systems::reactions::roll_deposit;

/// Per-sub-step tuning that resolution needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveSettings {
    pub rotation_offset: u8,
    pub max_spread: u32,
    pub chain_budget: u32,
}

impl ResolveSettings {
    /// Farthest column a single `resolve_cell` call can read or write,
    /// measured from the starting cell.
    pub fn reach(&self) -> u32 {
        self.max_spread.max(1).saturating_mul(self.chain_budget.max(1))
    }
}

impl Default for ResolveSettings {
    fn default() -> Self {
        Self {
            rotation_offset: 0,
            max_spread: 20,
            chain_budget: 1,
        }
    }
}

pub struct ResolveContext<'a, R: Rng> {
    pub catalog: &'a ElementCatalog,
    pub settings: ResolveSettings,
    pub rng: &'a mut R,
}

/// What happened to the resolved cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to do, or nothing possible.
    Idle,
    /// Content ended up at (x, y). For chained moves this is the last hop.
    Moved { x: u32, y: u32 },
    /// Burn or melt consumed the source.
    Converted,
    /// The source vanished.
    Decayed,
    /// A frozen, occupied destination stopped the attempt.
    Blocked,
}

impl Outcome {
    #[inline]
    pub fn is_move(self) -> bool {
        matches!(self, Outcome::Moved { .. })
    }
}

/// The generator that stands behind a substituted resolution.
#[derive(Clone, Copy, Debug)]
pub(crate) struct GeneratorSource {
    pub(crate) cell: Cell,
    pub(crate) frequency: u32,
}

/// Resolve the cell at (x, y), following successful moves while the chain
/// budget lasts.
pub fn resolve_cell<R: Rng>(ctx: &mut ResolveContext<'_, R>, window: &mut GridWindow<'_>, x: u32, y: u32) -> Outcome {
    let mut budget = ctx.settings.chain_budget.max(1);
    let (mut cx, mut cy) = (x, y);
    let mut last_move = None;

    loop {
        let outcome = resolve_once(ctx, window, cx, cy);
        budget -= 1;
        match outcome {
            Outcome::Moved { x: nx, y: ny } => {
                last_move = Some((nx, ny));
                if budget == 0 {
                    break;
                }
                cx = nx;
                cy = ny;
            }
            _ if last_move.is_none() => return outcome,
            _ => break,
        }
    }

    match last_move {
        Some((x, y)) => Outcome::Moved { x, y },
        None => Outcome::Idle,
    }
}

fn resolve_once<R: Rng>(ctx: &mut ResolveContext<'_, R>, window: &mut GridWindow<'_>, x: u32, y: u32) -> Outcome {
    let source = window.get(x, y);
    if source.is_empty() || !window.is_chunk_active(x, y) {
        return Outcome::Idle;
    }

    let catalog = ctx.catalog;
    let own = catalog.get(source.element);
    let (mover, generator) = match own.generates {
        Some(target) if own.is_generator() => (
            catalog.get(target),
            Some(GeneratorSource {
                cell: source,
                frequency: own.generator_frequency,
            }),
        ),
        _ => (own, None),
    };

    if mover.is_frozen() || mover.is_inert() {
        return Outcome::Idle;
    }

    // A generator moves fresh units of its material, anything else moves itself.
    let moving = if generator.is_some() { Cell::plain(mover.id) } else { source };

    if mover.solid {
        solid::resolve(ctx, window, (x, y), moving, mover, generator)
    } else {
        liquid::resolve(ctx, window, (x, y), moving, mover, generator)
    }
}

/// Shared move primitive. The caller has already decided the move is legal.
///
/// Plain move: mover goes to `to`, whatever was there goes to `from`.
/// Generator move: `from` keeps the generator and `to` receives a fresh unit
/// of the generated material when the deposit roll succeeds. A failed roll
/// changes nothing and reports `Idle`.
pub(crate) fn displace<R: Rng>(
    window: &mut GridWindow<'_>,
    from: (u32, u32),
    to: (u32, u32),
    mover: Cell,
    generator: Option<GeneratorSource>,
    rng: &mut R,
) -> Outcome {
    match generator {
        Some(source) => {
            // Rewriting the source keeps the generator's chunk awake.
            window.set(from.0, from.1, source.cell);
            if !roll_deposit(source.frequency, rng) {
                return Outcome::Idle;
            }
            window.set(to.0, to.1, Cell::plain(mover.element));
            window.mark_updated(to.0, to.1);
        }
        None => {
            let displaced = window.get(to.0, to.1);
            window.set(to.0, to.1, mover);
            window.set(from.0, from.1, displaced);
            window.mark_updated(to.0, to.1);
        }
    }
    Outcome::Moved { x: to.0, y: to.1 }
}
