use sandfall_engine::grid::Cell;
use sandfall_engine::{EngineSettings, WorldCore};
use sandfall_engine::simulation::DEFAULT_CATALOG_JSON;

#[test]
fn perf_smoke_step() {
    let mut world = WorldCore::with_catalog(128, 64, EngineSettings::default(), DEFAULT_CATALOG_JSON).unwrap();
    let sand = world.catalog().id_by_name("sand").unwrap();
    world.enable_perf_metrics(true);
    for x in 0..128 {
        for y in 0..32 {
            world.set_cell(x, y, Cell::plain(sand));
        }
    }
    world.step();
    let stats = world.perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.sub_steps(), world.settings().speed_multiplier);
    assert_eq!(stats.non_empty_cells(), 128 * 32);
    assert!(stats.cells_moved() > 0);
}

#[test]
fn perf_disabled_reports_zeros() {
    let mut world = WorldCore::with_catalog(32, 32, EngineSettings::default(), DEFAULT_CATALOG_JSON).unwrap();
    world.paint(16, 16);
    world.step();
    assert_eq!(world.perf_stats().cells_resolved(), 0);
    assert_eq!(world.frame(), 1);
}
