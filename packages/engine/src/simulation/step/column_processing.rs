use std::ops::{Add, AddAssign, Range};

use rand::Rng;

use crate::behaviors::{resolve_cell, Outcome, ResolveContext, ResolveSettings};
use crate::domain::content::ElementCatalog;
use crate::elements::EL_EMPTY;
use crate::grid::GridWindow;

/// Counters one band task hands back to the scheduler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct BandStats {
    pub(crate) resolved: u32,
    pub(crate) moved: u32,
    pub(crate) transformed: u32,
    pub(crate) skipped: u32,
}

impl Add for BandStats {
    type Output = BandStats;

    fn add(self, rhs: BandStats) -> BandStats {
        BandStats {
            resolved: self.resolved + rhs.resolved,
            moved: self.moved + rhs.moved,
            transformed: self.transformed + rhs.transformed,
            skipped: self.skipped + rhs.skipped,
        }
    }
}

impl AddAssign for BandStats {
    fn add_assign(&mut self, rhs: BandStats) {
        *self = *self + rhs;
    }
}

/// Resolve every column of `columns`, left to right, rows bottom to top.
///
/// Cells that already moved this sub-step and cells in quiet chunks are
/// skipped. `window` must cover `columns` plus the resolution reach.
pub(super) fn process_band<R: Rng>(
    window: &mut GridWindow<'_>,
    columns: Range<u32>,
    catalog: &ElementCatalog,
    settings: ResolveSettings,
    rng: &mut R,
) -> BandStats {
    let mut ctx = ResolveContext { catalog, settings, rng };
    let mut stats = BandStats::default();
    let height = window.height();

    for x in columns {
        for y in (0..height).rev() {
            if window.element(x, y) == EL_EMPTY || window.is_updated(x, y) {
                continue;
            }
            if !window.is_chunk_active(x, y) {
                stats.skipped += 1;
                continue;
            }

            stats.resolved += 1;
            match resolve_cell(&mut ctx, window, x, y) {
                Outcome::Moved { .. } => stats.moved += 1,
                Outcome::Converted | Outcome::Decayed => stats.transformed += 1,
                Outcome::Idle | Outcome::Blocked => {}
            }
        }
    }

    stats
}
