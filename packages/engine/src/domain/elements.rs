//! Element Definitions - immutable per-material rules
//!
//! Definitions are produced by `ElementCatalog` at load time and never
//! mutated while a step runs. Grid cells only carry an `ElementId` plus a
//! per-instance shade; everything else is looked up here.

/// Numeric element id. Assigned by catalog order, 0 is always Empty.
pub type ElementId = u8;

pub const EL_EMPTY: ElementId = 0;

/// Highest id a catalog can hand out.
pub const MAX_ELEMENT_ID: usize = ElementId::MAX as usize;

/// Largest per-instance shade the brush hands out.
pub const SHADE_SPAN: f32 = 0.5;

/// Compass direction, stored in clockwise order so a rotation offset is a
/// plain modular add.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    pub const COUNT: u8 = 8;

    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    #[inline]
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index % Self::COUNT) as usize]
    }

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Rotate clockwise by `offset` eighths of a turn (wraps).
    #[inline]
    pub fn rotated(self, offset: u8) -> Self {
        Self::from_index(self.index().wrapping_add(offset % Self::COUNT))
    }

    /// Grid offset, y grows downward.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Decode the catalog's keypad layout (7 8 9 / 4 _ 6 / 1 2 3).
    pub fn from_keypad(code: i32) -> Option<Self> {
        match code {
            1 => Some(Direction::SouthWest),
            2 => Some(Direction::South),
            3 => Some(Direction::SouthEast),
            4 => Some(Direction::West),
            6 => Some(Direction::East),
            7 => Some(Direction::NorthWest),
            8 => Some(Direction::North),
            9 => Some(Direction::NorthEast),
            _ => None,
        }
    }

    pub fn keypad(self) -> i32 {
        match self {
            Direction::SouthWest => 1,
            Direction::South => 2,
            Direction::SouthEast => 3,
            Direction::West => 4,
            Direction::East => 6,
            Direction::NorthWest => 7,
            Direction::North => 8,
            Direction::NorthEast => 9,
        }
    }
}

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Brightness correction: positive factors blend toward white,
    /// negative toward black. `factor` is clamped to [-1, 1].
    pub fn brightened(self, factor: f32) -> Self {
        let f = factor.clamp(-1.0, 1.0);
        let adjust = |c: u8| -> u8 {
            let c = c as f32;
            let out = if f < 0.0 { c * (1.0 + f) } else { c + (255.0 - c) * f };
            out.round().clamp(0.0, 255.0) as u8
        };
        Self::new(adjust(self.r), adjust(self.g), adjust(self.b))
    }

    /// Packed 0xAABBGGRR (little-endian RGBA bytes), opaque.
    pub fn to_abgr(self) -> u32 {
        0xFF00_0000 | ((self.b as u32) << 16) | ((self.g as u32) << 8) | self.r as u32
    }
}

/// A loaded, immutable element definition.
#[derive(Clone, Debug)]
pub struct ElementDef {
    pub id: ElementId,
    pub name: String,
    pub color: Rgb,
    pub min_color: Option<[f32; 3]>,
    pub max_color: Option<[f32; 3]>,
    pub min_speed: u32,
    pub max_speed: u32,
    /// Movement requires strictly lower density on the destination side.
    pub density: i32,
    /// 0 = never decays, otherwise 1-in-N per resolution attempt.
    pub death_chance: u32,
    pub solid: bool,
    pub flaming: bool,
    pub flammable: bool,
    pub melting: bool,
    pub meltable: bool,
    pub generator_frequency: u32,
    /// Resolved id of the generated material, `None` for non-generators.
    pub generates: Option<ElementId>,
    /// Ordered direction-candidate groups.
    pub behavior: Vec<Vec<Direction>>,
    /// True when any behavior group contains North.
    pub rises: bool,
}

impl ElementDef {
    /// The reserved Empty definition (id 0).
    pub fn empty() -> Self {
        Self {
            id: EL_EMPTY,
            name: "None".to_string(),
            color: Rgb::default(),
            min_color: None,
            max_color: None,
            min_speed: 0,
            max_speed: 0,
            density: 0,
            death_chance: 0,
            solid: false,
            flaming: false,
            flammable: false,
            melting: false,
            meltable: false,
            generator_frequency: 0,
            generates: None,
            behavior: Vec::new(),
            rises: false,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id == EL_EMPTY
    }

    /// Frozen elements never move and block solids that try to enter them.
    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.min_speed == 0 && self.max_speed == 0
    }

    #[inline]
    pub fn is_generator(&self) -> bool {
        self.generator_frequency > 0 && self.generates.is_some()
    }

    /// True when the element has nothing to try this tick.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.behavior.first().map_or(true, |group| group.is_empty())
    }

    /// Colour for a cell of this element carrying `shade`.
    ///
    /// Elements with a min/max colour range place the cell along that range
    /// (shade 0 is the min colour, `SHADE_SPAN` and above the max). The rest
    /// brighten their base colour by the shade.
    pub fn shaded_color(&self, shade: f32) -> Rgb {
        match (self.min_color, self.max_color) {
            (Some(lo), Some(hi)) => {
                let t = (shade / SHADE_SPAN).clamp(0.0, 1.0);
                let channel = |i: usize| -> u8 {
                    let v = lo[i] + (hi[i] - lo[i]) * t;
                    v.round().clamp(0.0, 255.0) as u8
                };
                Rgb::new(channel(0), channel(1), channel(2))
            }
            _ => self.color.brightened(shade),
        }
    }
}
