//! Cell type and grid dimension constants
//!
//! Foundational types for the grid-based simulation.

use crate::MaterialId;
use serde::{Deserialize, Serialize};

/// Reference grid width in cells
pub const GRID_WIDTH: usize = 300;

/// Reference grid height in cells
pub const GRID_HEIGHT: usize = 200;

/// A single cell in the grid
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Material type (0 = empty)
    pub material_id: u16,
    /// Remaining ticks before forced decay; 0 for immortal materials
    pub lifetime: i16,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        material_id: MaterialId::EMPTY,
        lifetime: 0,
    };

    pub fn new(material_id: u16) -> Self {
        Self {
            material_id,
            lifetime: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.material_id == MaterialId::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cell() {
        assert!(Cell::EMPTY.is_empty());
        assert_eq!(Cell::EMPTY.lifetime, 0);
        assert_eq!(Cell::default(), Cell::EMPTY);
    }

    #[test]
    fn test_occupied_cell() {
        let cell = Cell::new(MaterialId::SAND);
        assert!(!cell.is_empty());
        assert_eq!(cell.material_id, MaterialId::SAND);
        assert_eq!(cell.lifetime, 0);
    }
}
