use wasm_bindgen::prelude::*;

/// Per-frame snapshot. All zeros while perf metrics are disabled.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(crate) step_ms: f64,
    pub(crate) even_phase_ms: f64,
    pub(crate) odd_phase_ms: f64,
    pub(crate) sub_steps: u32,
    pub(crate) bands: u32,
    pub(crate) cells_resolved: u32,
    pub(crate) cells_moved: u32,
    pub(crate) cells_transformed: u32,
    pub(crate) cells_skipped: u32,
    pub(crate) active_chunks: u32,
    pub(crate) dirty_chunks: u32,
    pub(crate) non_empty_cells: u32,
    pub(crate) grid_size: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn even_phase_ms(&self) -> f64 { self.even_phase_ms }
    #[wasm_bindgen(getter)]
    pub fn odd_phase_ms(&self) -> f64 { self.odd_phase_ms }
    #[wasm_bindgen(getter)]
    pub fn sub_steps(&self) -> u32 { self.sub_steps }
    #[wasm_bindgen(getter)]
    pub fn bands(&self) -> u32 { self.bands }
    #[wasm_bindgen(getter)]
    pub fn cells_resolved(&self) -> u32 { self.cells_resolved }
    #[wasm_bindgen(getter)]
    pub fn cells_moved(&self) -> u32 { self.cells_moved }
    #[wasm_bindgen(getter)]
    pub fn cells_transformed(&self) -> u32 { self.cells_transformed }
    #[wasm_bindgen(getter)]
    pub fn cells_skipped(&self) -> u32 { self.cells_skipped }
    #[wasm_bindgen(getter)]
    pub fn active_chunks(&self) -> u32 { self.active_chunks }
    #[wasm_bindgen(getter)]
    pub fn dirty_chunks(&self) -> u32 { self.dirty_chunks }
    #[wasm_bindgen(getter)]
    pub fn non_empty_cells(&self) -> u32 { self.non_empty_cells }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
}
