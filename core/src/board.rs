use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned value matrix of cells, indexed by `(row, column)`. Every block lives at exactly one position and
/// positions never alias, moving a block copies its value and empties the source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardCells")]
pub struct Board {
    cells: Array2<BoardCell>,
}

/// Wire shape of a [`Board`], checked by `Board::from_cells` before use.
#[derive(Deserialize)]
struct BoardCells {
    cells: Array2<BoardCell>,
}

impl TryFrom<BoardCells> for Board {
    type Error = GameError;

    fn try_from(raw: BoardCells) -> Result<Self> {
        Self::from_cells(raw.cells)
    }
}

impl Board {
    /// An all-empty board.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 < 2 || size.1 < 2 {
            return Err(GameError::InvalidDimensions);
        }
        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
        })
    }

    pub fn from_cells(cells: Array2<BoardCell>) -> Result<Self> {
        let (rows, columns) = cells.dim();
        if rows > usize::from(Coord::MAX) || columns > usize::from(Coord::MAX) {
            return Err(GameError::InvalidBoardShape);
        }
        if rows < 2 || columns < 2 {
            return Err(GameError::InvalidDimensions);
        }
        Ok(Self { cells })
    }

    /// Parses one line per row, top row first, one symbol per column (`.` is empty). Blank lines and
    /// surrounding whitespace are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let columns = lines.first().map_or(0, |line| line.chars().count());
        if lines.iter().any(|line| line.chars().count() != columns) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut cells = Array2::default([rows, columns]);
        for (line_index, line) in lines.iter().enumerate() {
            let row = rows - 1 - line_index;
            for (column, symbol) in line.chars().enumerate() {
                cells[[row, column]] = match symbol {
                    '.' => BoardCell::Empty,
                    symbol => BoardCell::Occupied(BlockType::from_symbol(symbol)?),
                };
            }
        }
        Self::from_cells(cells)
    }

    /// `(rows, columns)`
    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.cells.dim();
        // dimensions are checked against `Coord::MAX` on construction
        (rows as Coord, columns as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, columns) = self.size();
        mult(rows, columns)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> BoardCell {
        self[coords]
    }

    pub fn block_at(&self, coords: Coord2) -> Option<BlockType> {
        self.cell_at(coords).block()
    }

    pub fn is_empty_at(&self, coords: Coord2) -> bool {
        self.cell_at(coords).is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn empty_count(&self) -> CellCount {
        // bounded by `total_cells`
        self.cells.iter().filter(|cell| cell.is_empty()).count() as CellCount
    }

    /// Empties the cell, returning the block it held.
    pub fn clear(&mut self, coords: Coord2) -> Result<Option<BlockType>> {
        let coords = self.validate_coords(coords)?;
        let previous = self.cell_at(coords).block();
        self.cells[coords.to_nd_index()] = BoardCell::Empty;
        Ok(previous)
    }

    /// Puts a block into an empty cell.
    pub fn place(&mut self, coords: Coord2, block: BlockType) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if !self.is_empty_at(coords) {
            return Err(GameError::CellOccupied);
        }
        self.cells[coords.to_nd_index()] = BoardCell::Occupied(block);
        Ok(())
    }

    /// Overwrites whatever the cell holds, returning the previous block.
    pub fn replace(&mut self, coords: Coord2, block: BlockType) -> Result<Option<BlockType>> {
        let coords = self.validate_coords(coords)?;
        let previous = self.cell_at(coords).block();
        self.cells[coords.to_nd_index()] = BoardCell::Occupied(block);
        Ok(previous)
    }

    /// Relocates the block at `from` into the empty cell `to`.
    pub fn move_block(&mut self, from: Coord2, to: Coord2) -> Result<BlockType> {
        let from = self.validate_coords(from)?;
        let to = self.validate_coords(to)?;
        let block = self.block_at(from).ok_or(GameError::CellEmpty)?;
        if !self.is_empty_at(to) {
            return Err(GameError::CellOccupied);
        }
        self.cells[from.to_nd_index()] = BoardCell::Empty;
        self.cells[to.to_nd_index()] = BoardCell::Occupied(block);
        Ok(block)
    }

    /// Empty positions in column-major order, bottom row first within each column.
    pub fn empty_cells(&self) -> Vec<Coord2> {
        self.iter_coords_column_major()
            .filter(|&coords| self.is_empty_at(coords))
            .collect()
    }

    pub fn iter_coords_column_major(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, columns) = self.size();
        (0..columns).flat_map(move |column| (0..rows).map(move |row| (row, column)))
    }

    pub fn iter_occupied(&self) -> impl Iterator<Item = (Coord2, BlockType)> + '_ {
        self.iter_coords_column_major()
            .filter_map(|coords| self.block_at(coords).map(|block| (coords, block)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

impl Index<Coord2> for Board {
    type Output = BoardCell;

    fn index(&self, (row, column): Coord2) -> &Self::Output {
        &self.cells[(usize::from(row), usize::from(column))]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, columns) = self.size();
        for row in (0..rows).rev() {
            for column in 0..columns {
                write!(f, "{}", self.cell_at((row, column)).symbol())?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
