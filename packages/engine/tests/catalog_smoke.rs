use std::fs;

use sandfall_engine::domain::content::{CatalogRefs, ElementCatalog};
use sandfall_engine::elements::EL_EMPTY;
use sandfall_engine::simulation::DEFAULT_CATALOG_JSON;

#[test]
fn bundled_catalog_parses_and_has_core_invariants() {
    let json = fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/content/elements.json"))
        .expect("content/elements.json should exist");
    assert_eq!(json, DEFAULT_CATALOG_JSON);

    let catalog = ElementCatalog::from_json(&json, &CatalogRefs::default()).expect("elements.json should parse");

    assert!(catalog.len() > 1);
    assert!(catalog.get(EL_EMPTY).is_empty());

    // Reaction products and the brush default resolve by name.
    let fire = catalog.fire().expect("fire element");
    let lava = catalog.molten().expect("molten element");
    assert_eq!(catalog.get(fire).name, "fire");
    assert_eq!(catalog.get(lava).name, "lava");
    assert_eq!(catalog.get(catalog.default_selection()).name, "sand");

    // Every generator points at a movable material.
    for def in catalog.iter().filter(|d| d.is_generator()) {
        let target = catalog.get(def.generates.expect("generator target"));
        assert!(!target.is_frozen(), "{} generates frozen {}", def.name, target.name);
    }
}

#[test]
fn manifest_lists_every_element_in_id_order() {
    let catalog = ElementCatalog::from_json(DEFAULT_CATALOG_JSON, &CatalogRefs::default()).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&catalog.manifest_json()).unwrap();

    let elements = manifest["elements"].as_array().unwrap();
    assert_eq!(elements.len(), catalog.len() - 1);
    for (i, e) in elements.iter().enumerate() {
        assert_eq!(e["id"].as_u64(), Some(i as u64 + 1));
    }
    assert_eq!(manifest["defaultSelection"].as_u64(), Some(catalog.default_selection() as u64));
}
