use std::sync::Arc;

use crate::chunks::{DirtyChunkMap, MergedDirtyRects};
use crate::core::EngineResult;
use crate::domain::content::ElementCatalog;
use crate::elements::EL_EMPTY;
use crate::grid::Grid;

use super::perf_stats::PerfStats;
use super::settings::EngineSettings;
use super::WorldCore;

pub(super) fn create_world_core(width: u32, height: u32, settings: EngineSettings) -> WorldCore {
    let settings = settings.clamped();
    let grid = Grid::new(width, height);
    let dirty = DirtyChunkMap::new(grid.width(), grid.height(), settings.chunk_size);
    let (chunks_x, chunks_y) = dirty.dimensions();

    WorldCore {
        catalog: Arc::new(ElementCatalog::empty()),
        settings,
        grid,
        dirty,
        selected: EL_EMPTY,
        paused: false,
        frame: 0,
        include_single_pixel: true,
        render_rects: Vec::new(),
        merged_rects: MergedDirtyRects::new((chunks_x * chunks_y) as usize),
        color_buffer: Vec::new(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}

/// Swap in a new catalog. On error nothing changes.
///
/// Cells are remapped by element name, anything the new catalog lacks
/// becomes Empty, and every chunk is woken so the new rules apply at once.
pub(super) fn load_catalog(world: &mut WorldCore, json: &str) -> EngineResult<()> {
    let next = match ElementCatalog::from_json(json, &world.settings.catalog_refs()) {
        Ok(catalog) => catalog,
        Err(err) => {
            log::warn!("catalog rejected, keeping the current {} elements: {}", world.catalog.len() - 1, err);
            return Err(err);
        }
    };

    let table = next.remap_table(&world.catalog);
    world.grid.remap(&table);
    world.dirty.mark_all_dirty();

    let first_load = world.catalog.is_empty() || world.selected == EL_EMPTY;
    world.selected = if first_load {
        next.default_selection()
    } else {
        let name = &world.catalog.get(world.selected).name;
        next.id_by_name(name).unwrap_or_else(|| next.first_element())
    };

    world.catalog = Arc::new(next);
    log::info!(
        "catalog loaded: {} elements, selected \"{}\"",
        world.catalog.len() - 1,
        world.catalog.get(world.selected).name
    );
    Ok(())
}
