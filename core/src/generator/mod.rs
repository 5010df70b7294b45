use crate::*;
pub use random::*;

mod random;

/// Produces the board a game starts from.
pub trait BoardGenerator {
    fn generate<R: RandomSource>(&self, config: &GameConfig, random: &mut R) -> Result<Board>;
}

/// Uniform block picks, the only source of randomness the engine uses.
pub trait RandomSource {
    fn pick_block(&mut self, palette: Palette) -> BlockType;
}
