use wasm_bindgen::prelude::*;

use crate::grid::Cell;

use super::perf_stats::PerfStats;
use super::settings::EngineSettings;
use super::WorldCore;

/// Catalog shipped with the engine, used until the host loads its own.
pub const DEFAULT_CATALOG_JSON: &str = include_str!("../../content/elements.json");

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a new world with given dimensions and the bundled catalog
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<World, JsError> {
        let core = WorldCore::with_catalog(width, height, EngineSettings::default(), DEFAULT_CATALOG_JSON)?;
        Ok(World { core })
    }

    /// Create a world from a JSON settings object (camelCase keys, all optional)
    pub fn with_settings(width: u32, height: u32, settings_json: &str) -> Result<World, JsError> {
        let settings = EngineSettings::from_json(settings_json)?;
        let core = WorldCore::with_catalog(width, height, settings, DEFAULT_CATALOG_JSON)?;
        Ok(World { core })
    }

    /// Replace the element catalog. The world is unchanged when this throws.
    pub fn load_catalog(&mut self, json: &str) -> Result<(), JsError> {
        self.core.load_catalog_json(json)?;
        Ok(())
    }

    pub fn manifest_json(&self) -> String {
        self.core.manifest_json()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.height() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> f64 { self.core.frame() as f64 }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    // === SIMULATION ===

    /// Advance one rendered frame
    pub fn step(&mut self) {
        self.core.step();
    }

    pub fn sub_step(&mut self) {
        self.core.sub_step();
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.core.set_paused(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.core.is_paused()
    }

    pub fn set_speed_multiplier(&mut self, multiplier: u32) {
        self.core.set_speed_multiplier(multiplier);
    }

    /// Global direction bias, 0..=7 clockwise steps
    pub fn set_rotation_offset(&mut self, offset: u8) {
        self.core.set_rotation_offset(offset);
    }

    /// Banded parallel stepping (needs `initThreadPool` first) or sequential
    pub fn set_parallel(&mut self, parallel: bool) {
        self.core.set_parallel(parallel);
    }

    pub fn set_max_spread_distance(&mut self, distance: u32) {
        self.core.set_max_spread_distance(distance);
    }

    pub fn set_chain_budget(&mut self, budget: u32) {
        self.core.set_chain_budget(budget);
    }

    /// Enable or disable per-frame perf metrics
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.perf_stats()
    }

    // === BRUSH ===

    pub fn selected_element(&self) -> u8 {
        self.core.selected_element()
    }

    pub fn select_element(&mut self, id: u8) -> bool {
        self.core.select_element(id)
    }

    pub fn select_element_by_name(&mut self, name: &str) -> bool {
        self.core.select_element_by_name(name)
    }

    pub fn set_brush_radius(&mut self, radius: u32) {
        self.core.set_brush_radius(radius);
    }

    /// Paint the selected element around (x, y). Returns cells placed.
    pub fn paint(&mut self, x: i32, y: i32) -> u32 {
        self.core.paint(x, y)
    }

    pub fn paint_element(&mut self, x: i32, y: i32, radius: i32, element: u8) -> u32 {
        self.core.paint_element(x, y, radius, element)
    }

    /// Erase around (x, y). Returns cells cleared.
    pub fn erase(&mut self, x: i32, y: i32) -> u32 {
        self.core.erase(x, y)
    }

    /// Write one cell with no shade. Out-of-grid coordinates are ignored.
    pub fn set_cell(&mut self, x: u32, y: u32, element: u8) -> bool {
        if x >= self.core.width() || y >= self.core.height() {
            return false;
        }
        self.core.set_cell(x, y, Cell::plain(element))
    }

    pub fn clear_cell(&mut self, x: u32, y: u32) -> bool {
        if x >= self.core.width() || y >= self.core.height() {
            return false;
        }
        self.core.clear_cell(x, y);
        true
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    // === RENDERING ===

    /// Element id per cell, row-major
    pub fn types(&self) -> Vec<u8> {
        self.core.types_row_major()
    }

    /// Shaded ABGR colour per cell, row-major
    pub fn colors(&mut self) -> Vec<u32> {
        self.core.colors().to_vec()
    }

    /// Coalesce cells into same-element rectangles. Returns the count;
    /// read each with `render_rect_*`.
    pub fn collect_render_rects(&mut self) -> usize {
        self.core.collect_render_rects()
    }

    pub fn set_include_single_pixel(&mut self, include: bool) {
        self.core.set_include_single_pixel(include);
    }

    pub fn render_rect_x(&self, idx: usize) -> u32 {
        self.core.render_rect(idx).map(|r| r.x).unwrap_or(0)
    }

    pub fn render_rect_y(&self, idx: usize) -> u32 {
        self.core.render_rect(idx).map(|r| r.y).unwrap_or(0)
    }

    pub fn render_rect_w(&self, idx: usize) -> u32 {
        self.core.render_rect(idx).map(|r| r.width).unwrap_or(0)
    }

    pub fn render_rect_h(&self, idx: usize) -> u32 {
        self.core.render_rect(idx).map(|r| r.height).unwrap_or(0)
    }

    pub fn render_rect_element(&self, idx: usize) -> u8 {
        self.core.render_rect(idx).map(|r| r.element).unwrap_or(0)
    }

    // === DEBUG OVERLAY ===

    /// Dirty flags of the chunks written this sub-step, 1 byte per chunk, row-major
    pub fn dirty_chunk_flags(&self) -> Vec<u8> {
        self.core.dirty_chunk_flags().into_iter().map(u8::from).collect()
    }

    /// Merge dirty chunks into rectangles. Returns number of merged rectangles
    pub fn collect_merged_rects(&mut self) -> usize {
        self.core.collect_merged_rects()
    }

    pub fn count_dirty_chunks(&self) -> usize {
        self.core.count_dirty_chunks()
    }

    /// Get merged rect X (in cells)
    pub fn get_merged_rect_x(&self, idx: usize) -> u32 {
        self.core.merged_rect(idx).map(|r| r.0).unwrap_or(0)
    }

    /// Get merged rect Y (in cells)
    pub fn get_merged_rect_y(&self, idx: usize) -> u32 {
        self.core.merged_rect(idx).map(|r| r.1).unwrap_or(0)
    }

    /// Get merged rect Width (in cells)
    pub fn get_merged_rect_w(&self, idx: usize) -> u32 {
        self.core.merged_rect(idx).map(|r| r.2).unwrap_or(0)
    }

    /// Get merged rect Height (in cells)
    pub fn get_merged_rect_h(&self, idx: usize) -> u32 {
        self.core.merged_rect(idx).map(|r| r.3).unwrap_or(0)
    }

    pub fn active_chunks(&self) -> usize {
        self.core.active_chunks()
    }

    pub fn total_chunks(&self) -> usize {
        self.core.total_chunks()
    }

    pub fn chunks_x(&self) -> u32 {
        self.core.chunks_x()
    }

    pub fn chunks_y(&self) -> u32 {
        self.core.chunks_y()
    }
}
