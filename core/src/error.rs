use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Group search must start on an occupied cell")]
    InvalidStart,
    #[error("A tap is still being processed, input ignored")]
    Busy,
    #[error("Cell already holds a block")]
    CellOccupied,
    #[error("Cell holds no block")]
    CellEmpty,
    #[error("Board needs at least 2 rows and 2 columns")]
    InvalidDimensions,
    #[error("Palette needs between 2 and 6 block types")]
    InvalidPalette,
    #[error("Minimum group size must be at least 2")]
    InvalidMinGroupSize,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Unknown block symbol")]
    InvalidSymbol,
}

pub type Result<T> = core::result::Result<T, GameError>;
