//! Sandfall Engine - falling-sand cellular simulation in WASM
//!
//! Architecture:
//! - core/        - errors, logging
//! - domain/      - element definitions and the loaded catalog
//! - spatial/     - grid storage, band windows, dirty chunks
//! - systems/     - cell resolution (solid and liquid paths) and reactions
//! - simulation/  - world state, scheduling, brush, queries, JS facade

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

// Short paths used across the crate
pub use spatial::chunks;
pub use spatial::grid;
pub use domain::elements;
pub use systems::behaviors;
pub use systems::reactions;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    crate::core::logging::init_logging(log::LevelFilter::Info);
    log::info!("sandfall engine {} initialized", env!("CARGO_PKG_VERSION"));
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use crate::core::{EngineError, EngineResult};
pub use domain::content::{CatalogRefs, ElementCatalog};
pub use domain::elements::{Direction, ElementDef, ElementId, EL_EMPTY};
pub use simulation::{EngineSettings, PerfStats, World, WorldCore};

/// Id of the always-present Empty element
#[wasm_bindgen]
pub fn el_empty() -> u8 { domain::elements::EL_EMPTY }
