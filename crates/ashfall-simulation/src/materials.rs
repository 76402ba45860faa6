//! Material definitions and registry

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Built-in material IDs
pub struct MaterialId;

impl MaterialId {
    pub const EMPTY: u16 = 0;
    pub const SAND: u16 = 1;
    pub const WATER: u16 = 2;
    pub const STONE: u16 = 3;
    pub const FIRE: u16 = 4;
    pub const WOOD: u16 = 5;
    pub const OIL: u16 = 6;
    pub const SALT: u16 = 7;
    pub const GUNPOWDER: u16 = 8;
    pub const LAVA: u16 = 9;
    pub const ICE: u16 = 10;
    pub const STEAM: u16 = 11;
    pub const SMOKE: u16 = 12;
    pub const ACID: u16 = 13;
    pub const PLANT: u16 = 14;
    pub const EMBER: u16 = 15;

    /// Number of registered materials; the id space is closed
    pub const COUNT: u16 = 16;
}

/// How a material behaves physically
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Neither falls nor flows; the default for inert matter
    Solid,
    /// Falls, piles up, slides down slopes (sand, salt, ember)
    Powder,
    /// Falls, spreads laterally, seeks level (water, oil, acid)
    Liquid,
    /// Rises and disperses (fire, steam, smoke)
    Gas,
}

bitflags! {
    /// Reactive flags checked by the neighbor-reaction rules
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Reactivity: u8 {
        /// Can be ignited by a hot neighbor
        const FLAMMABLE = 1 << 0;
        /// Ignition detonates a blast instead of a single flame
        const EXPLOSIVE = 1 << 1;
        /// Dissolved away by adjacent water
        const DISSOLVES = 1 << 2;
        /// Erodes non-stone neighbors
        const CORROSIVE = 1 << 3;
        /// Acts as an ignition source
        const HOT = 1 << 4;
        /// Freezes adjacent water
        const COLD = 1 << 5;
        /// Spreads into empty cells when watered
        const GROWS = 1 << 6;
    }
}

/// Definition of a material's properties
#[derive(Clone, Debug)]
pub struct Material {
    pub id: u16,
    pub name: String,

    /// Base color (RGB); `None` means the renderer draws background
    pub color: Option<[u8; 3]>,

    /// Integer density ranking; higher sinks below lower
    pub density: i32,

    /// Movement rule class
    pub phase: Phase,

    /// Immovable; the movement engine never evaluates this material
    pub is_static: bool,

    /// Ticks before forced decay; 0 means immortal
    pub lifetime: i16,

    pub reactivity: Reactivity,
}

impl Material {
    pub fn is_powder(&self) -> bool {
        self.phase == Phase::Powder
    }

    pub fn is_liquid(&self) -> bool {
        self.phase == Phase::Liquid
    }

    pub fn is_gas(&self) -> bool {
        self.phase == Phase::Gas
    }

    pub fn has_lifetime(&self) -> bool {
        self.lifetime > 0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            id: MaterialId::EMPTY,
            name: "unknown".to_string(),
            color: None,
            density: 0,
            phase: Phase::Solid,
            is_static: false,
            lifetime: 0,
            reactivity: Reactivity::empty(),
        }
    }
}

/// Registry of all materials
pub struct Materials {
    materials: Vec<Material>,
}

impl Materials {
    pub fn new() -> Self {
        let mut materials = Self {
            materials: Vec::new(),
        };
        materials.register_defaults();
        materials
    }

    fn register_defaults(&mut self) {
        // Empty space (doubles as the eraser tool)
        self.register(Material {
            id: MaterialId::EMPTY,
            name: "empty".to_string(),
            phase: Phase::Gas,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::SAND,
            name: "sand".to_string(),
            color: Some([224, 188, 128]),
            density: 3,
            phase: Phase::Powder,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::WATER,
            name: "water".to_string(),
            color: Some([50, 120, 200]),
            density: 2,
            phase: Phase::Liquid,
            ..Default::default()
        });

        // Stone is also the out-of-bounds boundary material
        self.register(Material {
            id: MaterialId::STONE,
            name: "stone".to_string(),
            color: Some([128, 128, 128]),
            density: 10,
            is_static: true,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::FIRE,
            name: "fire".to_string(),
            color: Some([255, 100, 20]),
            phase: Phase::Gas,
            lifetime: 30,
            reactivity: Reactivity::HOT,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::WOOD,
            name: "wood".to_string(),
            color: Some([139, 90, 43]),
            density: 10,
            is_static: true,
            reactivity: Reactivity::FLAMMABLE,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::OIL,
            name: "oil".to_string(),
            color: Some([80, 60, 20]),
            density: 1,
            phase: Phase::Liquid,
            reactivity: Reactivity::FLAMMABLE,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::SALT,
            name: "salt".to_string(),
            color: Some([240, 240, 245]),
            density: 3,
            phase: Phase::Powder,
            reactivity: Reactivity::DISSOLVES,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::GUNPOWDER,
            name: "gunpowder".to_string(),
            color: Some([60, 60, 60]),
            density: 3,
            phase: Phase::Powder,
            reactivity: Reactivity::FLAMMABLE.union(Reactivity::EXPLOSIVE),
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::LAVA,
            name: "lava".to_string(),
            color: Some([255, 80, 0]),
            density: 4,
            phase: Phase::Liquid,
            reactivity: Reactivity::HOT,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::ICE,
            name: "ice".to_string(),
            color: Some([180, 220, 255]),
            density: 10,
            is_static: true,
            reactivity: Reactivity::COLD,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::STEAM,
            name: "steam".to_string(),
            color: Some([200, 200, 220]),
            phase: Phase::Gas,
            lifetime: 100,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::SMOKE,
            name: "smoke".to_string(),
            color: Some([80, 80, 80]),
            phase: Phase::Gas,
            lifetime: 80,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::ACID,
            name: "acid".to_string(),
            color: Some([120, 255, 80]),
            density: 2,
            phase: Phase::Liquid,
            reactivity: Reactivity::CORROSIVE,
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::PLANT,
            name: "plant".to_string(),
            color: Some([34, 139, 34]),
            density: 10,
            is_static: true,
            reactivity: Reactivity::FLAMMABLE.union(Reactivity::GROWS),
            ..Default::default()
        });

        self.register(Material {
            id: MaterialId::EMBER,
            name: "ember".to_string(),
            color: Some([255, 150, 50]),
            density: 3,
            phase: Phase::Powder,
            lifetime: 60,
            reactivity: Reactivity::HOT,
            ..Default::default()
        });
    }

    fn register(&mut self, material: Material) {
        let id = material.id as usize;

        if self.materials.len() <= id {
            self.materials.resize(id + 1, Material::default());
        }

        self.materials[id] = material;
    }

    /// Get material definition by ID.
    ///
    /// The id space is closed; an out-of-range id is a caller bug and
    /// panics rather than being silently substituted.
    pub fn get(&self, id: u16) -> &Material {
        &self.materials[id as usize]
    }

    /// Base color for a material
    pub fn color(&self, id: u16) -> Option<[u8; 3]> {
        self.get(id).color
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::new()
    }
}
