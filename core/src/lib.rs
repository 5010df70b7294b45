#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use block::*;
pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use gravity::*;
pub use refill::*;
pub use resolver::*;
pub use types::*;

mod analysis;
mod block;
mod board;
mod engine;
mod error;
mod generator;
mod gravity;
mod refill;
mod resolver;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, columns)`
    pub size: Coord2,
    pub palette: Palette,
    pub min_group_size: CellCount,
    /// Fixed default seed when missing
    pub seed: Option<u64>,
}

impl GameConfig {
    pub const DEFAULT_SIZE: Coord2 = (8, 8);
    pub const DEFAULT_MIN_GROUP_SIZE: CellCount = 2;

    pub fn new(size: Coord2, palette_size: u8) -> Result<Self> {
        let config = Self {
            size,
            palette: Palette::new(palette_size)?,
            min_group_size: Self::DEFAULT_MIN_GROUP_SIZE,
            seed: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn with_min_group_size(mut self, min_group_size: CellCount) -> Self {
        self.min_group_size = min_group_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 < 2 || self.size.1 < 2 {
            return Err(GameError::InvalidDimensions);
        }
        if self.min_group_size < 2 {
            return Err(GameError::InvalidMinGroupSize);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
            palette: Palette::full(),
            min_group_size: Self::DEFAULT_MIN_GROUP_SIZE,
            seed: None,
        }
    }
}
