use serde::{Deserialize, Serialize};

use crate::*;

/// Block colors, in palette order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BlockType {
    Blue,
    Green,
    Pink,
    Purple,
    Red,
    Yellow,
}

impl BlockType {
    pub const ALL: [BlockType; 6] = [
        Self::Blue,
        Self::Green,
        Self::Pink,
        Self::Purple,
        Self::Red,
        Self::Yellow,
    ];

    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Single letter used by the board text format.
    pub const fn symbol(self) -> char {
        use BlockType::*;
        match self {
            Blue => 'B',
            Green => 'G',
            Pink => 'P',
            Purple => 'U',
            Red => 'R',
            Yellow => 'Y',
        }
    }

    pub fn from_symbol(symbol: char) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|block| block.symbol() == symbol.to_ascii_uppercase())
            .ok_or(GameError::InvalidSymbol)
    }
}

/// State of one board position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardCell {
    Empty,
    Occupied(BlockType),
}

impl BoardCell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn block(self) -> Option<BlockType> {
        match self {
            Self::Empty => None,
            Self::Occupied(block) => Some(block),
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Occupied(block) => block.symbol(),
        }
    }
}

impl Default for BoardCell {
    fn default() -> Self {
        Self::Empty
    }
}

impl From<BlockType> for BoardCell {
    fn from(block: BlockType) -> Self {
        Self::Occupied(block)
    }
}

/// The first `size` block types are in play. Serialized as the bare size, which is range checked on the way in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Palette {
    size: u8,
}

impl Palette {
    pub const MIN_SIZE: u8 = 2;
    pub const MAX_SIZE: u8 = BlockType::ALL.len() as u8;

    pub fn new(size: u8) -> Result<Self> {
        if (Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            Ok(Self { size })
        } else {
            Err(GameError::InvalidPalette)
        }
    }

    pub const fn full() -> Self {
        Self {
            size: Self::MAX_SIZE,
        }
    }

    pub const fn size(self) -> u8 {
        self.size
    }

    pub fn get(self, index: u8) -> Option<BlockType> {
        if index < self.size {
            BlockType::ALL.get(usize::from(index)).copied()
        } else {
            None
        }
    }

    pub fn contains(self, block: BlockType) -> bool {
        block.index() < self.size
    }

    pub fn iter(self) -> impl Iterator<Item = BlockType> {
        BlockType::ALL.into_iter().take(usize::from(self.size))
    }
}

impl TryFrom<u8> for Palette {
    type Error = GameError;

    fn try_from(size: u8) -> Result<Self> {
        Self::new(size)
    }
}

impl From<Palette> for u8 {
    fn from(palette: Palette) -> Self {
        palette.size
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::full()
    }
}

/// Display variant picked from the size of the group a block belongs to. Has no effect on game logic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VisualTier {
    Plain,
    First,
    Second,
    Third,
}

impl VisualTier {
    pub const fn from_group_size(group_size: CellCount) -> Self {
        match group_size {
            0..=4 => Self::Plain,
            5..=7 => Self::First,
            8..=9 => Self::Second,
            _ => Self::Third,
        }
    }
}
