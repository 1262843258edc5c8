//! Engine settings - JSON-configurable tuning plus the runtime setters.
//!
//! Every field has a default and out-of-range values are clamped, so a
//! partial or sloppy settings object still yields a usable engine.

use serde::{Deserialize, Serialize};

use crate::behaviors::ResolveSettings;
use crate::core::{EngineError, EngineResult};
use crate::domain::content::CatalogRefs;

use super::perf_stats::PerfStats;
use super::WorldCore;

pub const MIN_SPEED_MULTIPLIER: u32 = 1;
pub const MAX_SPEED_MULTIPLIER: u32 = 6;
pub const MIN_BRUSH_RADIUS: u32 = 1;
pub const MAX_BRUSH_RADIUS: u32 = 100;
/// A spread wider than any sensible grid only lengthens the per-cell scan.
pub const MAX_SPREAD_DISTANCE: u32 = 4096;
pub const MAX_CHAIN_BUDGET: u32 = 64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    pub chunk_size: u32,
    pub speed_multiplier: u32,
    pub max_spread_distance: u32,
    pub chain_budget: u32,
    pub parallel: bool,
    pub rotation_offset: u8,
    pub fire_element: String,
    pub molten_element: String,
    pub default_selection: String,
    pub brush_radius: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            chunk_size: crate::chunks::DEFAULT_CHUNK_SIZE,
            speed_multiplier: 3,
            max_spread_distance: 20,
            chain_budget: 1,
            parallel: true,
            rotation_offset: 0,
            fire_element: "fire".to_string(),
            molten_element: "lava".to_string(),
            default_selection: "sand".to_string(),
            brush_radius: 20,
        }
    }
}

impl EngineSettings {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let parsed: EngineSettings = serde_json::from_str(json).map_err(EngineError::SettingsParse)?;
        Ok(parsed.clamped())
    }

    /// Pull every field back into its legal range.
    pub fn clamped(mut self) -> Self {
        self.chunk_size = self.chunk_size.max(1);
        self.speed_multiplier = self.speed_multiplier.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
        self.max_spread_distance = self.max_spread_distance.clamp(1, MAX_SPREAD_DISTANCE);
        self.chain_budget = self.chain_budget.clamp(1, MAX_CHAIN_BUDGET);
        self.rotation_offset %= 8;
        self.brush_radius = self.brush_radius.clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS);
        self
    }

    pub fn resolve_settings(&self) -> ResolveSettings {
        ResolveSettings {
            rotation_offset: self.rotation_offset,
            max_spread: self.max_spread_distance,
            chain_budget: self.chain_budget,
        }
    }

    pub fn catalog_refs(&self) -> CatalogRefs<'_> {
        CatalogRefs {
            fire_element: &self.fire_element,
            molten_element: &self.molten_element,
            default_selection: &self.default_selection,
        }
    }
}

pub(super) fn enable_perf_metrics(world: &mut WorldCore, enabled: bool) {
    world.perf_enabled = enabled;
    if !enabled {
        world.perf_stats = PerfStats::default();
    }
}

pub(super) fn get_perf_stats(world: &WorldCore) -> PerfStats {
    world.perf_stats.clone()
}

pub(super) fn set_speed_multiplier(world: &mut WorldCore, multiplier: u32) {
    let clamped = multiplier.clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
    log::debug!("speed multiplier {} -> {}", world.settings.speed_multiplier, clamped);
    world.settings.speed_multiplier = clamped;
}

pub(super) fn set_rotation_offset(world: &mut WorldCore, offset: u8) {
    world.settings.rotation_offset = offset % 8;
    log::debug!("rotation offset set to {}", world.settings.rotation_offset);
}

pub(super) fn set_parallel(world: &mut WorldCore, parallel: bool) {
    world.settings.parallel = parallel;
    log::debug!("parallel scheduling {}", if parallel { "on" } else { "off" });
}

pub(super) fn set_brush_radius(world: &mut WorldCore, radius: u32) {
    world.settings.brush_radius = radius.clamp(MIN_BRUSH_RADIUS, MAX_BRUSH_RADIUS);
}

pub(super) fn set_max_spread_distance(world: &mut WorldCore, distance: u32) {
    world.settings.max_spread_distance = distance.clamp(1, MAX_SPREAD_DISTANCE);
    log::debug!("max spread distance set to {}", world.settings.max_spread_distance);
}

pub(super) fn set_chain_budget(world: &mut WorldCore, budget: u32) {
    world.settings.chain_budget = budget.clamp(1, MAX_CHAIN_BUDGET);
    log::debug!("chain budget set to {}", world.settings.chain_budget);
}
