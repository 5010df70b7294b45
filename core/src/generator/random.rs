use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Seed used when the configuration does not provide one.
pub const DEFAULT_SEED: u64 = 0x7461_7067_7269_6421;

/// Seedable uniform picks, identical sequences for identical seeds.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_block(&mut self, palette: Palette) -> BlockType {
        let index: u8 = self.rng.random_range(0..palette.size());
        BlockType::ALL[usize::from(index)]
    }
}

/// Replays a fixed sequence of blocks, wrapping around at the end. Blocks outside the palette are folded back
/// into it by index.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceRandom {
    sequence: Vec<BlockType>,
    position: usize,
    picks: usize,
}

impl SequenceRandom {
    pub fn new(sequence: impl IntoIterator<Item = BlockType>) -> Self {
        let mut sequence: Vec<_> = sequence.into_iter().collect();
        if sequence.is_empty() {
            sequence.push(BlockType::Blue);
        }
        Self {
            sequence,
            position: 0,
            picks: 0,
        }
    }

    /// How many blocks have been handed out so far.
    pub fn picks(&self) -> usize {
        self.picks
    }
}

impl RandomSource for SequenceRandom {
    fn pick_block(&mut self, palette: Palette) -> BlockType {
        let block = self.sequence[self.position];
        self.position = (self.position + 1) % self.sequence.len();
        self.picks += 1;
        if palette.contains(block) {
            block
        } else {
            BlockType::ALL[usize::from(block.index() % palette.size())]
        }
    }
}

/// Fills every cell at random and starts over from scratch while the result has no legal move.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    max_attempts: u16,
}

impl RandomBoardGenerator {
    pub const DEFAULT_MAX_ATTEMPTS: u16 = 64;

    pub fn new(max_attempts: u16) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }
}

impl Default for RandomBoardGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS)
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate<R: RandomSource>(&self, config: &GameConfig, random: &mut R) -> Result<Board> {
        config.validate()?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            let mut board = Board::new(config.size)?;
            for coords in board.iter_coords_column_major() {
                board.place(coords, random.pick_block(config.palette))?;
            }

            if has_any_legal_move(&board, config.min_group_size) {
                log::debug!("Generated playable board on attempt {}", attempt);
                return Ok(board);
            }
            if attempt >= self.max_attempts {
                log::warn!(
                    "No legal move available after {} generation attempts, keeping last board",
                    attempt
                );
                return Ok(board);
            }
            log::debug!("Generated board has no legal move, regenerating (attempt {})", attempt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BlockType::*;

    fn config(size: Coord2, palette_size: u8) -> GameConfig {
        GameConfig::new(size, palette_size).unwrap()
    }

    #[test]
    fn seeded_picks_are_reproducible() {
        let palette = Palette::full();
        let mut a = SeededRandom::new(7);
        let mut b = SeededRandom::new(7);

        let picks_a: Vec<_> = (0..32).map(|_| a.pick_block(palette)).collect();
        let picks_b: Vec<_> = (0..32).map(|_| b.pick_block(palette)).collect();

        assert_eq!(picks_a, picks_b);
        assert!(picks_a.iter().all(|&block| palette.contains(block)));
    }

    #[test]
    fn seeded_picks_stay_in_small_palette() {
        let palette = Palette::new(2).unwrap();
        let mut random = SeededRandom::new(99);

        assert!((0..200).all(|_| palette.contains(random.pick_block(palette))));
    }

    #[test]
    fn sequence_wraps_and_folds_into_palette() {
        let palette = Palette::new(2).unwrap();
        let mut random = SequenceRandom::new([Blue, Pink]);

        assert_eq!(random.pick_block(palette), Blue);
        // Pink has index 2, folded to 0
        assert_eq!(random.pick_block(palette), Blue);
        assert_eq!(random.pick_block(Palette::full()), Blue);
        assert_eq!(random.pick_block(Palette::full()), Pink);
        assert_eq!(random.picks(), 4);
    }

    #[test]
    fn generated_board_is_full_and_playable() {
        let config = config((8, 8), 6);
        let mut random = SeededRandom::new(1);

        let board = RandomBoardGenerator::default()
            .generate(&config, &mut random)
            .unwrap();

        assert!(board.is_full());
        assert!(has_any_legal_move(&board, config.min_group_size));
    }

    #[test]
    fn deadlocked_board_is_regenerated_from_scratch() {
        // column-major fill of a 2x2 board: (0,0) (1,0) (0,1) (1,1)
        let checkerboard = [Blue, Green, Green, Blue];
        let playable = [Red, Red, Red, Red];
        let mut random = SequenceRandom::new(checkerboard.into_iter().chain(playable));

        let board = RandomBoardGenerator::default()
            .generate(&config((2, 2), 6), &mut random)
            .unwrap();

        assert_eq!(random.picks(), 8);
        assert_eq!(board, Board::parse("RR\nRR").unwrap());
    }

    #[test]
    fn exhausted_attempts_keep_last_board() {
        let mut random = SequenceRandom::new([Blue, Green, Green, Blue]);

        let board = RandomBoardGenerator::new(3)
            .generate(&config((2, 2), 2), &mut random)
            .unwrap();

        assert_eq!(random.picks(), 12);
        assert!(board.is_full());
        assert!(!has_any_legal_move(&board, 2));
    }
}
