use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, EngineResult};
use crate::elements::{Direction, ElementDef, ElementId, Rgb, EL_EMPTY, MAX_ELEMENT_ID};

/// Names the catalog needs to resolve besides generator targets.
#[derive(Clone, Copy, Debug)]
pub struct CatalogRefs<'a> {
    pub fire_element: &'a str,
    pub molten_element: &'a str,
    pub default_selection: &'a str,
}

impl Default for CatalogRefs<'static> {
    fn default() -> Self {
        Self {
            fire_element: "fire",
            molten_element: "lava",
            default_selection: "sand",
        }
    }
}

/// Immutable element table. Index == id, slot 0 is Empty.
#[derive(Clone, Debug)]
pub struct ElementCatalog {
    elements: Vec<ElementDef>,
    ids_by_name: HashMap<String, ElementId>,
    fire: Option<ElementId>,
    molten: Option<ElementId>,
    default_selection: ElementId,
}

impl ElementCatalog {
    /// Catalog with nothing but Empty. Used before the first load.
    pub fn empty() -> Self {
        Self {
            elements: vec![ElementDef::empty()],
            ids_by_name: HashMap::new(),
            fire: None,
            molten: None,
            default_selection: EL_EMPTY,
        }
    }

    /// Parse a `{ "name": { ...fields } }` catalog. Ids follow key order.
    pub fn from_json(json: &str, refs: &CatalogRefs<'_>) -> EngineResult<Self> {
        let root: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(EngineError::CatalogParse)?;

        if root.len() > MAX_ELEMENT_ID {
            return Err(EngineError::TooManyElements(root.len()));
        }

        let mut raws = Vec::with_capacity(root.len());
        for (name, value) in root {
            let raw: RawElement = serde_json::from_value(value).map_err(|e| {
                EngineError::InvalidElement {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            raws.push((name, raw));
        }

        Self::from_raw(raws, refs)
    }

    fn from_raw(raws: Vec<(String, RawElement)>, refs: &CatalogRefs<'_>) -> EngineResult<Self> {
        let mut ids_by_name = HashMap::with_capacity(raws.len());
        for (idx, (name, _)) in raws.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(EngineError::InvalidElement {
                    name: name.clone(),
                    reason: "element name is blank".to_string(),
                });
            }
            ids_by_name.insert(name.clone(), (idx + 1) as ElementId);
        }

        let mut elements = Vec::with_capacity(raws.len() + 1);
        elements.push(ElementDef::empty());

        for (idx, (name, raw)) in raws.into_iter().enumerate() {
            let id = (idx + 1) as ElementId;
            let behavior = decode_behavior(&name, &raw.behavior)?;
            let rises = raw.behavior.iter().any(|group| group.contains(&Direction::North.keypad()));

            let generates = match raw.generates_material.as_deref() {
                Some(material) if raw.generator_frequency > 0 && !material.is_empty() => {
                    let target = ids_by_name.get(material).copied().ok_or_else(|| {
                        EngineError::UnknownGeneratedMaterial {
                            element: name.clone(),
                            material: material.to_string(),
                        }
                    })?;
                    if target == id {
                        return Err(EngineError::InvalidElement {
                            name,
                            reason: "a generator cannot generate itself".to_string(),
                        });
                    }
                    Some(target)
                }
                _ => None,
            };

            let color = raw
                .color
                .map(|[r, g, b]| Rgb::new(r, g, b))
                .or_else(|| raw.min_color.map(rgb_from_floats))
                .unwrap_or(Rgb::new(255, 255, 255));

            elements.push(ElementDef {
                id,
                name,
                color,
                min_color: raw.min_color,
                max_color: raw.max_color,
                min_speed: raw.min_speed,
                max_speed: raw.max_speed,
                density: raw.density,
                death_chance: raw.death_chance,
                solid: raw.solid,
                flaming: raw.flaming,
                flammable: raw.flammable,
                melting: raw.melting,
                meltable: raw.meltable,
                generator_frequency: raw.generator_frequency,
                generates,
                behavior,
                rises,
            });
        }

        // Products are only required when something can produce them.
        let fire = ids_by_name.get(refs.fire_element).copied();
        if fire.is_none() && elements.iter().any(|e| e.flaming) {
            return Err(EngineError::MissingReactionProduct {
                role: "fire",
                name: refs.fire_element.to_string(),
            });
        }
        let molten = ids_by_name.get(refs.molten_element).copied();
        if molten.is_none() && elements.iter().any(|e| e.melting) {
            return Err(EngineError::MissingReactionProduct {
                role: "molten",
                name: refs.molten_element.to_string(),
            });
        }

        let pattern = refs.default_selection.to_lowercase();
        let default_selection = elements
            .iter()
            .skip(1)
            .find(|e| e.name.to_lowercase().contains(&pattern))
            .map(|e| e.id)
            .ok_or_else(|| EngineError::NoDefaultSelection {
                pattern: refs.default_selection.to_string(),
            })?;

        Ok(Self {
            elements,
            ids_by_name,
            fire,
            molten,
            default_selection,
        })
    }

    /// Number of definitions including Empty.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.len() <= 1
    }

    pub fn is_valid_id(&self, id: ElementId) -> bool {
        (id as usize) < self.elements.len()
    }

    /// Definition for `id`. Ids come from this catalog, so a miss is a bug.
    #[inline]
    pub fn get(&self, id: ElementId) -> &ElementDef {
        &self.elements[id as usize]
    }

    pub fn id_by_name(&self, name: &str) -> Option<ElementId> {
        self.ids_by_name.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementDef> {
        self.elements.iter()
    }

    pub fn fire(&self) -> Option<ElementId> {
        self.fire
    }

    pub fn molten(&self) -> Option<ElementId> {
        self.molten
    }

    pub fn default_selection(&self) -> ElementId {
        self.default_selection
    }

    /// First non-empty element, used when a reload drops the selection.
    pub fn first_element(&self) -> ElementId {
        if self.elements.len() > 1 {
            1
        } else {
            EL_EMPTY
        }
    }

    /// Old id -> new id table. Names missing from `self` map to Empty.
    pub fn remap_table(&self, old: &ElementCatalog) -> Vec<ElementId> {
        old.elements
            .iter()
            .map(|def| {
                if def.is_empty() {
                    EL_EMPTY
                } else {
                    self.id_by_name(&def.name).unwrap_or(EL_EMPTY)
                }
            })
            .collect()
    }

    pub fn manifest_json(&self) -> String {
        let elements: Vec<ManifestElement<'_>> = self
            .elements
            .iter()
            .skip(1)
            .map(|e| ManifestElement {
                id: e.id,
                name: &e.name,
                color: e.color.to_abgr(),
                solid: e.solid,
                frozen: e.is_frozen(),
                generator: e.is_generator(),
            })
            .collect();
        let out = Manifest {
            format_version: 1,
            default_selection: self.default_selection,
            elements,
        };
        serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
    }
}

fn decode_behavior(name: &str, groups: &[Vec<i32>]) -> EngineResult<Vec<Vec<Direction>>> {
    groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|&code| {
                    Direction::from_keypad(code).ok_or_else(|| EngineError::InvalidDirection {
                        element: name.to_string(),
                        code,
                    })
                })
                .collect()
        })
        .collect()
}

fn rgb_from_floats(c: [f32; 3]) -> Rgb {
    let ch = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    Rgb::new(ch(c[0]), ch(c[1]), ch(c[2]))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Manifest<'a> {
    format_version: u32,
    default_selection: ElementId,
    elements: Vec<ManifestElement<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ManifestElement<'a> {
    id: ElementId,
    name: &'a str,
    color: u32,
    solid: bool,
    frozen: bool,
    generator: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElement {
    #[serde(default)]
    color: Option<[u8; 3]>,
    #[serde(default)]
    min_color: Option<[f32; 3]>,
    #[serde(default)]
    max_color: Option<[f32; 3]>,
    #[serde(default)]
    min_speed: u32,
    #[serde(default)]
    max_speed: u32,
    #[serde(default)]
    density: i32,
    #[serde(default)]
    death_chance: u32,
    #[serde(default)]
    solid: bool,
    #[serde(default)]
    flaming: bool,
    #[serde(default)]
    flammable: bool,
    #[serde(default)]
    melting: bool,
    #[serde(default)]
    meltable: bool,
    #[serde(default)]
    generator_frequency: u32,
    #[serde(default)]
    generates_material: Option<String>,
    #[serde(default)]
    behavior: Vec<Vec<i32>>,
}
