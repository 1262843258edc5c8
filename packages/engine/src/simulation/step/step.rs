use crate::behaviors::ResolveSettings;
use crate::chunks::DirtyChunkMap;
use crate::domain::content::ElementCatalog;
use crate::grid::{plan_bands, ColumnBand, Grid};

use super::column_processing::{process_band, BandStats};
use super::{PerfTimer, WorldCore};

/// One rendered frame: `speed_multiplier` sub-steps, nothing while paused.
pub(super) fn step(world: &mut WorldCore) {
    if world.paused {
        return;
    }

    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.reset();
    }
    let step_start = if perf_on { Some(PerfTimer::start()) } else { None };

    let sub_steps = world.settings.speed_multiplier;
    let mut totals = BandStats::default();
    for _ in 0..sub_steps {
        totals += sub_step(world);
    }

    if perf_on {
        let stats = &mut world.perf_stats;
        stats.sub_steps = sub_steps;
        stats.cells_resolved = totals.resolved;
        stats.cells_moved = totals.moved;
        stats.cells_transformed = totals.transformed;
        stats.cells_skipped = totals.skipped;
        stats.active_chunks = world.dirty.active_chunk_count() as u32;
        stats.dirty_chunks = world.dirty.dirty_chunk_count() as u32;
        stats.non_empty_cells = world.grid.count_non_empty() as u32;
        stats.grid_size = world.grid.size() as u32;
        if let Some(start) = step_start {
            stats.step_ms = start.elapsed_ms();
        }
    }

    world.frame += 1;
}

/// One full pass over the grid.
///
/// The dirty generations swap first, then even bands run, then odd bands.
/// Each phase joins before the next starts.
pub(super) fn sub_step(world: &mut WorldCore) -> BandStats {
    world.dirty.begin_step();
    world.grid.reset_updated();

    let settings = world.settings.resolve_settings();
    let parallel = world.settings.parallel;
    let bands = plan_bands(world.grid.width(), settings.reach());
    let perf_on = world.perf_enabled;
    if perf_on {
        world.perf_stats.bands = bands.len() as u32;
    }

    let mut totals = BandStats::default();
    for parity in 0..2 {
        let phase: Vec<&ColumnBand> = bands.iter().skip(parity).step_by(2).collect();
        let t0 = if perf_on { Some(PerfTimer::start()) } else { None };

        totals += run_phase(&mut world.grid, &world.dirty, &world.catalog, settings, &phase, parallel);

        if let Some(t0) = t0 {
            let ms = t0.elapsed_ms();
            if parity == 0 {
                world.perf_stats.even_phase_ms += ms;
            } else {
                world.perf_stats.odd_phase_ms += ms;
            }
        }
    }

    totals
}

/// Bands of one phase on the rayon pool. Same-phase windows are disjoint
/// slices of the grid, so each task owns everything it can touch.
#[cfg(feature = "parallel")]
fn run_phase(
    grid: &mut Grid,
    dirty: &DirtyChunkMap,
    catalog: &ElementCatalog,
    settings: ResolveSettings,
    phase: &[&ColumnBand],
    parallel: bool,
) -> BandStats {
    use rayon::prelude::*;

    if !parallel || phase.len() < 2 {
        return run_sequential(grid, dirty, catalog, settings, phase);
    }

    let windows = grid.split_windows(phase.iter().map(|band| band.window.clone()), dirty);
    windows
        .into_par_iter()
        .zip(phase.par_iter())
        .map(|(mut window, band)| {
            let mut rng = rand::rng();
            process_band(&mut window, band.columns.clone(), catalog, settings, &mut rng)
        })
        .reduce(BandStats::default, |a, b| a + b)
}

#[cfg(not(feature = "parallel"))]
fn run_phase(
    grid: &mut Grid,
    dirty: &DirtyChunkMap,
    catalog: &ElementCatalog,
    settings: ResolveSettings,
    phase: &[&ColumnBand],
    _parallel: bool,
) -> BandStats {
    run_sequential(grid, dirty, catalog, settings, phase)
}

/// Same band order on the calling thread, over a full-grid window.
fn run_sequential(
    grid: &mut Grid,
    dirty: &DirtyChunkMap,
    catalog: &ElementCatalog,
    settings: ResolveSettings,
    phase: &[&ColumnBand],
) -> BandStats {
    let mut window = grid.window_mut(dirty);
    let mut rng = rand::rng();
    phase.iter().fold(BandStats::default(), |acc, band| {
        acc + process_band(&mut window, band.columns.clone(), catalog, settings, &mut rng)
    })
}
