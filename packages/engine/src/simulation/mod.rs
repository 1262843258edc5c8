//! World - owned simulation state and the frame loop
//!
//! `WorldCore` holds the catalog, the grid and the dirty-chunk map and
//! delegates the actual work:
//! - step/      frame and sub-step scheduling, per-band column sweeps
//! - commands/  brush and direct cell writes
//! - init/      construction, catalog loading, settings
//! - render/    renderer-facing queries
//! - perf/      per-frame stats
//!
//! `facade.rs` wraps it for JavaScript.

use std::sync::Arc;

use crate::chunks::{DirtyChunkMap, MergedDirtyRects};
use crate::core::EngineResult;
use crate::domain::content::ElementCatalog;
use crate::elements::{ElementId, EL_EMPTY};
use crate::grid::{Cell, Grid, RenderRect};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/step.rs"]
mod step;
#[path = "step/column_processing.rs"]
mod column_processing;
#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
pub mod settings;
#[path = "render/render_extract.rs"]
mod render_extract;
mod facade;

pub use facade::{World, DEFAULT_CATALOG_JSON};
pub use perf_stats::PerfStats;
pub use settings::EngineSettings;

use perf_timer::PerfTimer;

/// The simulation world
pub struct WorldCore {
    catalog: Arc<ElementCatalog>,
    settings: EngineSettings,
    grid: Grid,
    dirty: DirtyChunkMap,

    // Brush / UI state
    selected: ElementId,
    paused: bool,
    frame: u64,

    // Render queries
    include_single_pixel: bool,
    render_rects: Vec<RenderRect>,
    merged_rects: MergedDirtyRects,
    color_buffer: Vec<u32>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Empty world with default settings and no elements loaded.
    pub fn new(width: u32, height: u32) -> Self {
        init::create_world_core(width, height, EngineSettings::default())
    }

    pub fn with_settings(width: u32, height: u32, settings: EngineSettings) -> Self {
        init::create_world_core(width, height, settings)
    }

    /// World with `catalog_json` already loaded.
    pub fn with_catalog(width: u32, height: u32, settings: EngineSettings, catalog_json: &str) -> EngineResult<Self> {
        let mut world = init::create_world_core(width, height, settings);
        world.load_catalog_json(catalog_json)?;
        Ok(world)
    }

    /// Load or hot-reload the element catalog. The previous catalog and
    /// grid stay untouched when this returns `Err`.
    pub fn load_catalog_json(&mut self, json: &str) -> EngineResult<()> {
        init::load_catalog(self, json)
    }

    pub fn catalog(&self) -> &ElementCatalog {
        &self.catalog
    }

    pub fn manifest_json(&self) -> String {
        self.catalog.manifest_json()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dirty_chunks(&self) -> &DirtyChunkMap {
        &self.dirty
    }

    pub fn width(&self) -> u32 { self.grid.width() }

    pub fn height(&self) -> u32 { self.grid.height() }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn particle_count(&self) -> usize { self.grid.count_non_empty() }

    // === SETTINGS ===

    pub fn set_speed_multiplier(&mut self, multiplier: u32) {
        settings::set_speed_multiplier(self, multiplier);
    }

    pub fn set_rotation_offset(&mut self, offset: u8) {
        settings::set_rotation_offset(self, offset);
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        settings::set_parallel(self, parallel);
    }

    pub fn set_max_spread_distance(&mut self, distance: u32) {
        settings::set_max_spread_distance(self, distance);
    }

    pub fn set_chain_budget(&mut self, budget: u32) {
        settings::set_chain_budget(self, budget);
    }

    pub fn set_brush_radius(&mut self, radius: u32) {
        settings::set_brush_radius(self, radius);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_include_single_pixel(&mut self, include: bool) {
        self.include_single_pixel = include;
    }

    /// Enable or disable per-frame perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Last frame's perf snapshot (zeros when perf disabled)
    pub fn perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === BRUSH ===

    pub fn selected_element(&self) -> ElementId {
        self.selected
    }

    /// Select a brush element. Unknown ids and Empty are refused.
    pub fn select_element(&mut self, id: ElementId) -> bool {
        if id == EL_EMPTY || !self.catalog.is_valid_id(id) {
            return false;
        }
        self.selected = id;
        true
    }

    pub fn select_element_by_name(&mut self, name: &str) -> bool {
        match self.catalog.id_by_name(name) {
            Some(id) => self.select_element(id),
            None => false,
        }
    }

    /// Write one cell. Panics outside the grid; returns false for an id
    /// the loaded catalog does not have.
    pub fn set_cell(&mut self, x: u32, y: u32, cell: Cell) -> bool {
        commands::set_cell(self, x, y, cell)
    }

    /// Empty one cell. Panics outside the grid.
    pub fn clear_cell(&mut self, x: u32, y: u32) {
        commands::clear_cell(self, x, y);
    }

    pub fn get_cell(&self, x: u32, y: u32) -> Cell {
        self.grid.get(x, y)
    }

    /// Paint the selected element with the configured brush radius.
    pub fn paint(&mut self, cx: i32, cy: i32) -> u32 {
        let radius = self.settings.brush_radius as i32;
        let element = self.selected;
        commands::paint(self, cx, cy, radius, element)
    }

    pub fn paint_element(&mut self, cx: i32, cy: i32, radius: i32, element: ElementId) -> u32 {
        commands::paint(self, cx, cy, radius, element)
    }

    pub fn erase(&mut self, cx: i32, cy: i32) -> u32 {
        let radius = self.settings.brush_radius as i32;
        commands::erase(self, cx, cy, radius)
    }

    pub fn erase_radius(&mut self, cx: i32, cy: i32, radius: i32) -> u32 {
        commands::erase(self, cx, cy, radius)
    }

    /// Clear all cells
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === SIMULATION ===

    /// Advance one rendered frame.
    pub fn step(&mut self) {
        step::step(self);
    }

    /// Run exactly one sub-step, ignoring pause and the speed multiplier.
    pub fn sub_step(&mut self) {
        step::sub_step(self);
    }

    // === QUERIES ===

    pub fn types_row_major(&self) -> Vec<ElementId> {
        self.grid.types_row_major()
    }

    pub fn colors(&mut self) -> &[u32] {
        render_extract::extract_colors(self)
    }

    pub fn render_rects(&self) -> Vec<RenderRect> {
        self.grid.render_rects(self.include_single_pixel)
    }

    pub fn collect_render_rects(&mut self) -> usize {
        render_extract::collect_render_rects(self)
    }

    pub fn render_rect(&self, idx: usize) -> Option<RenderRect> {
        render_extract::render_rect(self, idx)
    }

    /// Dirty flags of the current generation, row-major over chunks.
    pub fn dirty_chunk_flags(&self) -> Vec<bool> {
        self.dirty.current_flags()
    }

    pub fn collect_merged_rects(&mut self) -> usize {
        render_extract::collect_merged_rects(self)
    }

    /// Merged overlay rect as (x, y, width, height) in cells.
    pub fn merged_rect(&self, idx: usize) -> Option<(u32, u32, u32, u32)> {
        render_extract::merged_rect_cells(self, idx)
    }

    pub fn count_dirty_chunks(&self) -> usize {
        render_extract::count_dirty_chunks(self)
    }

    pub fn active_chunks(&self) -> usize {
        self.dirty.active_chunk_count()
    }

    pub fn total_chunks(&self) -> usize {
        self.dirty.total_chunks()
    }

    pub fn chunks_x(&self) -> u32 {
        self.dirty.dimensions().0
    }

    pub fn chunks_y(&self) -> u32 {
        self.dirty.dimensions().1
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
