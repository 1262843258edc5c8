use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::domain::content::fixtures::*;
use crate::core::EngineError;

fn test_settings(parallel: bool) -> EngineSettings {
    EngineSettings { parallel, speed_multiplier: 1, ..EngineSettings::default() }
}

fn world(width: u32, height: u32, parallel: bool) -> WorldCore {
    WorldCore::with_catalog(width, height, test_settings(parallel), BASIC).unwrap()
}

fn census(world: &WorldCore) -> BTreeMap<ElementId, usize> {
    let mut counts = BTreeMap::new();
    for &t in world.grid.types() {
        if t != EL_EMPTY {
            *counts.entry(t).or_insert(0) += 1;
        }
    }
    counts
}

fn scatter(world: &mut WorldCore, seed: u64, palette: &[ElementId], fill: f64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for x in 0..world.width() {
        for y in 0..world.height() {
            if rng.random_bool(fill) {
                let id = palette[rng.random_range(0..palette.len())];
                world.set_cell(x, y, Cell::plain(id));
            }
        }
    }
}

#[test]
fn generator_keeps_its_identity_and_deposits_about_half_the_time() {
    let mut world = world(10, 10, false);
    world.set_cell(5, 5, Cell::plain(SPOUT));

    let trials = 400;
    let mut deposits = 0;
    for _ in 0..trials {
        world.sub_step();
        assert_eq!(world.grid.element(5, 5), SPOUT);
        if world.grid.element(5, 6) == SAND {
            deposits += 1;
            world.clear_cell(5, 6);
        }
        assert_eq!(world.grid.count_non_empty(), 1);
    }
    assert!((140..260).contains(&deposits), "deposits = {}", deposits);
}

fn perishable_world() -> WorldCore {
    let settings = EngineSettings { default_selection: PERISHABLE_SELECTION.to_string(), ..test_settings(false) };
    WorldCore::with_catalog(10, 10, settings, PERISHABLE).unwrap()
}

#[test]
fn generators_of_perishable_material_never_decay() {
    for (generator, product) in [(ASH_VENT, ASH), (BRINE_TAP, BRINE)] {
        let mut world = perishable_world();
        world.set_cell(5, 5, Cell::plain(generator));

        let mut deposits = 0;
        for _ in 0..300 {
            world.sub_step();
            assert_eq!(world.grid.element(5, 5), generator);
            if world.grid.element(5, 6) == product {
                deposits += 1;
                world.clear_cell(5, 6);
            }
        }
        assert!(deposits > 50, "{} deposits from generator {}", deposits, generator);
    }
}

#[test]
fn failed_deposits_are_not_counted_as_moves() {
    let json = r#"{ "sand":  { "minSpeed": 1, "maxSpeed": 1, "density": 2, "solid": true, "behavior": [[2]] },
                    "spout": { "density": 10, "solid": true, "generatorFrequency": 1, "generatesMaterial": "sand" } }"#;
    let mut world = WorldCore::with_catalog(10, 10, test_settings(false), json).unwrap();
    world.enable_perf_metrics(true);
    world.set_cell(5, 5, Cell::plain(2));
    for _ in 0..10 {
        world.step();
        assert_eq!(world.perf_stats().cells_moved(), 0);
    }
    assert_eq!(world.particle_count(), 1);
}

#[test]
fn plain_moves_conserve_every_element() {
    for parallel in [false, true] {
        let mut world = world(64, 48, parallel);
        world.set_speed_multiplier(3);
        scatter(&mut world, 7, &[SAND, WATER, STONE, OIL], 0.45);
        let before = census(&world);

        for _ in 0..40 {
            world.step();
        }

        assert_eq!(census(&world), before, "parallel = {}", parallel);
    }
}

#[test]
fn heavier_sinks_to_the_bottom_of_a_single_column() {
    let mut world = world(1, 10, false);
    world.set_cell(0, 0, Cell::plain(SAND));
    for y in 5..10 {
        world.set_cell(0, y, Cell::plain(WATER));
    }

    for _ in 0..12 {
        world.sub_step();
    }

    assert_eq!(world.grid.element(0, 9), SAND);
    for y in 4..9 {
        assert_eq!(world.grid.element(0, y), WATER, "row {}", y);
    }
    for y in 0..4 {
        assert_eq!(world.grid.element(0, y), EL_EMPTY);
    }
}

#[test]
fn stone_never_moves() {
    let mut world = world(32, 32, true);
    scatter(&mut world, 3, &[SAND, WATER, OIL], 0.3);
    for x in 0..32 {
        world.set_cell(x, 20, Cell::plain(STONE));
    }
    for _ in 0..30 {
        world.step();
    }
    for x in 0..32 {
        assert_eq!(world.grid.element(x, 20), STONE);
    }
}

#[test]
fn quiet_chunks_are_not_resolved() {
    let mut world = world(40, 10, false);
    world.enable_perf_metrics(true);
    world.sub_step();
    world.sub_step();
    assert_eq!(world.active_chunks(), 0);

    // Slip a grain in without marking its chunk.
    world.grid.types[25 * 10 + 2] = SAND;
    world.step();
    assert_eq!(world.grid.element(25, 2), SAND);
    assert_eq!(world.perf_stats().cells_skipped(), 1);
    assert_eq!(world.perf_stats().cells_resolved(), 0);

    // A write elsewhere in the chunk wakes it for the following sub-step.
    world.set_cell(21, 9, Cell::plain(STONE));
    world.sub_step();
    assert_eq!(world.grid.element(25, 2), EL_EMPTY);
    assert_eq!(world.grid.element(25, 3), SAND);
}

#[test]
fn sequential_and_parallel_agree_on_totals() {
    let mut seq = world(120, 60, false);
    let mut par = world(120, 60, true);
    for w in [&mut seq, &mut par] {
        w.set_max_spread_distance(5);
        scatter(w, 11, &[SAND, WATER, OIL], 0.5);
    }
    let start = census(&seq);
    assert_eq!(census(&par), start);

    for _ in 0..25 {
        seq.step();
        par.step();
    }
    assert_eq!(census(&seq), start);
    assert_eq!(census(&par), start);
}

#[test]
fn paused_world_does_not_advance() {
    let mut world = world(10, 10, false);
    world.set_cell(5, 0, Cell::plain(SAND));
    world.set_paused(true);
    world.step();
    assert_eq!(world.frame(), 0);
    assert_eq!(world.grid.element(5, 0), SAND);

    world.set_paused(false);
    world.step();
    assert_eq!(world.frame(), 1);
    assert_eq!(world.grid.element(5, 1), SAND);
}

#[test]
fn speed_multiplier_sets_sub_steps_per_frame() {
    let mut world = world(10, 10, false);
    world.enable_perf_metrics(true);
    world.set_speed_multiplier(4);
    world.set_cell(5, 0, Cell::plain(SAND));
    world.step();
    assert_eq!(world.perf_stats().sub_steps(), 4);
    assert_eq!(world.grid.element(5, 4), SAND);

    world.set_speed_multiplier(60);
    assert_eq!(world.settings().speed_multiplier, settings::MAX_SPEED_MULTIPLIER);
}

#[test]
fn brush_paints_a_checkerboard_for_loose_elements() {
    let mut world = world(30, 30, false);
    let placed = world.paint_element(15, 15, 4, SAND);
    assert!(placed > 0);

    let mut seen = 0;
    for x in 0..30 {
        for y in 0..30 {
            let cell = world.get_cell(x, y);
            if cell.element == SAND {
                assert_eq!((x + y) % 2, 0);
                assert!((0.05..0.55).contains(&cell.shade), "shade {}", cell.shade);
                seen += 1;
            }
        }
    }
    assert_eq!(seen, placed);
}

#[test]
fn brush_fills_solid_for_frozen_elements_and_skips_occupied_cells() {
    let mut world = world(30, 30, false);
    world.set_cell(15, 15, Cell::plain(WATER));
    let placed = world.paint_element(15, 15, 2, STONE);
    // 13 cells in a radius-2 disc, one already taken.
    assert_eq!(placed, 12);
    assert_eq!(world.grid.element(15, 15), WATER);

    assert_eq!(world.erase_radius(15, 15, 2), 13);
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn oversized_brush_is_capped_and_stays_on_the_grid() {
    let mut world = world(8, 8, false);
    assert_eq!(world.paint_element(4, 4, 50_000, STONE), 64);
    assert_eq!(world.erase_radius(4, 4, i32::MAX), 64);
    assert_eq!(world.paint_element(i32::MAX, i32::MIN, 50_000, STONE), 0);
    assert_eq!(world.particle_count(), 0);
}

#[test]
fn huge_spread_distance_still_spreads() {
    let mut world = world(16, 2, false);
    world.set_max_spread_distance(u32::MAX);
    assert_eq!(world.settings().max_spread_distance, settings::MAX_SPREAD_DISTANCE);

    world.set_cell(8, 1, Cell::plain(STONE));
    world.set_cell(8, 0, Cell::plain(WATER));
    world.sub_step();
    assert_eq!(world.grid.element(8, 0), EL_EMPTY);
    assert_eq!(world.grid.element(7, 1) + world.grid.element(9, 1), WATER);
}

#[test]
fn brush_clips_at_the_grid_edge() {
    let mut world = world(10, 10, false);
    let placed = world.paint_element(0, 0, 3, STONE);
    assert!(placed > 0);
    assert_eq!(world.particle_count() as u32, placed);
}

#[test]
fn reload_remaps_by_name_and_keeps_the_selection() {
    let mut world = world(10, 10, false);
    assert!(world.select_element_by_name("oil"));
    world.set_cell(1, 1, Cell::new(SAND, 0.3));
    world.set_cell(2, 2, Cell::plain(WATER));
    world.set_cell(3, 3, Cell::plain(OIL));

    let reordered = r#"{
        "oil":  { "minSpeed": 1, "maxSpeed": 1, "density": 1, "behavior": [[2]] },
        "sand": { "minSpeed": 1, "maxSpeed": 1, "density": 3, "solid": true, "behavior": [[2]] }
    }"#;
    world.load_catalog_json(reordered).unwrap();

    let oil = world.catalog().id_by_name("oil").unwrap();
    let sand = world.catalog().id_by_name("sand").unwrap();
    assert_eq!(world.grid.get(1, 1), Cell::plain(sand));
    assert!((world.grid.get(1, 1).shade - 0.3).abs() < f32::EPSILON);
    assert_eq!(world.grid.element(2, 2), EL_EMPTY);
    assert_eq!(world.grid.element(3, 3), oil);
    assert_eq!(world.selected_element(), oil);
    assert_eq!(world.dirty.dirty_chunk_count(), world.dirty.total_chunks());
}

#[test]
fn reload_falls_back_to_first_element_when_selection_disappears() {
    let mut world = world(10, 10, false);
    assert!(world.select_element_by_name("water"));
    world
        .load_catalog_json(r#"{ "grit": { "density": 2, "solid": true }, "sand": { "density": 3, "solid": true } }"#)
        .unwrap();
    assert_eq!(world.catalog().get(world.selected_element()).name, "grit");
}

#[test]
fn rejected_reload_keeps_everything() {
    let mut world = world(10, 10, false);
    world.set_cell(4, 4, Cell::plain(WATER));
    let before = world.grid.types().to_vec();

    let err = world
        .load_catalog_json(r#"{ "spout": { "generatorFrequency": 2, "generatesMaterial": "nothing" } }"#)
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownGeneratedMaterial { .. }));
    assert!(world.load_catalog_json("not json").is_err());

    assert_eq!(world.grid.types(), &before[..]);
    assert_eq!(world.catalog().len(), 11);
    assert_eq!(world.selected_element(), SAND);
}

#[test]
fn set_cell_refuses_unknown_ids() {
    let mut world = world(10, 10, false);
    assert!(!world.set_cell(1, 1, Cell::plain(200)));
    assert_eq!(world.grid.element(1, 1), EL_EMPTY);
}

#[test]
#[should_panic(expected = "outside")]
fn set_cell_outside_the_grid_panics() {
    let mut world = world(10, 10, false);
    world.set_cell(10, 0, Cell::plain(SAND));
}

#[test]
fn render_queries_cover_the_grid() {
    let mut world = world(12, 12, false);
    for x in 2..6 {
        for y in 8..12 {
            world.set_cell(x, y, Cell::plain(STONE));
        }
    }
    world.set_cell(9, 11, Cell::plain(SAND));

    assert_eq!(world.collect_render_rects(), 2);
    assert_eq!(
        world.render_rect(0),
        Some(RenderRect { x: 2, y: 8, width: 4, height: 4, element: STONE })
    );
    world.set_include_single_pixel(false);
    assert_eq!(world.render_rects().len(), 1);

    let colors = world.colors().to_vec();
    assert_eq!(colors.len(), 144);
    assert_eq!(colors[0], 0);
    assert_ne!(colors[11 * 12 + 9], 0);

    // Painted instances land along the catalog's colour range.
    let ranged = r#"{ "sand": { "minColor": [100, 0, 0], "maxColor": [200, 0, 0], "density": 1, "solid": true } }"#;
    world.load_catalog_json(ranged).unwrap();
    world.set_cell(0, 0, Cell::new(1, 0.0));
    world.set_cell(1, 0, Cell::new(1, 0.5));
    let colors = world.colors().to_vec();
    assert_eq!(colors[0], 0xFF00_0064);
    assert_eq!(colors[1], 0xFF00_00C8);

    let types = world.types_row_major();
    assert_eq!(types[11 * 12 + 9], SAND);
}

#[test]
fn dirty_overlay_tracks_the_last_writes() {
    let mut world = world(40, 40, false);
    world.sub_step();
    world.sub_step();
    assert_eq!(world.count_dirty_chunks(), 0);

    world.set_cell(5, 5, Cell::plain(STONE));
    let flags = world.dirty_chunk_flags();
    assert_eq!(flags.iter().filter(|&&f| f).count(), 4);

    assert_eq!(world.collect_merged_rects(), 1);
    assert_eq!(world.merged_rect(0), Some((0, 0, 20, 20)));
}

#[test]
fn clear_empties_the_grid_and_resets_the_frame() {
    let mut world = world(10, 10, false);
    scatter(&mut world, 5, &[SAND], 0.5);
    world.step();
    world.clear();
    assert_eq!(world.particle_count(), 0);
    assert_eq!(world.frame(), 0);
}
