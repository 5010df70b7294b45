use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Maximal set of same-colored, orthogonally connected blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedGroup {
    block: BlockType,
    /// Sorted, so two searches of the same group always compare equal whatever cell they started from.
    cells: Vec<Coord2>,
}

impl ConnectedGroup {
    pub fn block(&self) -> BlockType {
        self.block
    }

    pub fn cells(&self) -> &[Coord2] {
        &self.cells
    }

    pub fn size(&self) -> CellCount {
        // a group never exceeds the board, which fits in `CellCount`
        self.cells.len() as CellCount
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.binary_search(&coords).is_ok()
    }

    pub fn into_cells(self) -> Vec<Coord2> {
        self.cells
    }
}

/// Breadth-first search from `start` over occupied neighbors of the same block type.
///
/// Starting from an empty cell is a caller bug. It is reported as `Err(GameError::InvalidStart)` rather than a
/// panic, so hosts must not treat the error as a recoverable game state.
pub fn find_group(board: &Board, start: Coord2) -> Result<ConnectedGroup> {
    let start = board.validate_coords(start)?;
    let block = board.block_at(start).ok_or(GameError::InvalidStart)?;
    Ok(flood(board, start, block))
}

/// Size of the group containing `coords`, `0` for an empty cell. Never mutates the board.
pub fn group_size(board: &Board, coords: Coord2) -> Result<CellCount> {
    let coords = board.validate_coords(coords)?;
    Ok(match board.block_at(coords) {
        Some(block) => flood(board, coords, block).size(),
        None => 0,
    })
}

/// Partitions every occupied cell into its group, in column-major order of each group's first cell.
pub fn groups(board: &Board) -> Vec<ConnectedGroup> {
    let mut seen: Array2<bool> = Array2::default(board.size().to_nd_index());
    let mut found = Vec::new();
    for (coords, block) in board.iter_occupied() {
        if seen[coords.to_nd_index()] {
            continue;
        }
        let group = flood(board, coords, block);
        for &cell in group.cells() {
            seen[cell.to_nd_index()] = true;
        }
        found.push(group);
    }
    found
}

/// Every group that a tap could clear.
pub fn legal_moves(board: &Board, min_group_size: CellCount) -> Vec<ConnectedGroup> {
    groups(board)
        .into_iter()
        .filter(|group| group.size() >= min_group_size)
        .collect()
}

/// Whether any occupied cell belongs to a group of at least `min_group_size`.
pub fn has_any_legal_move(board: &Board, min_group_size: CellCount) -> bool {
    let mut seen: Array2<bool> = Array2::default(board.size().to_nd_index());
    for (coords, block) in board.iter_occupied() {
        if seen[coords.to_nd_index()] {
            continue;
        }
        let group = flood(board, coords, block);
        if group.size() >= min_group_size {
            return true;
        }
        for &cell in group.cells() {
            seen[cell.to_nd_index()] = true;
        }
    }
    false
}

/// Caller guarantees `start` holds `block`.
pub(crate) fn flood(board: &Board, start: Coord2, block: BlockType) -> ConnectedGroup {
    let mut visited = BTreeSet::from([start]);
    let mut to_visit = VecDeque::from([start]);

    while let Some(visit_coords) = to_visit.pop_front() {
        for pos in board.iter_neighbors(visit_coords) {
            if board.block_at(pos) == Some(block) && visited.insert(pos) {
                log::trace!("Group of {:?} from {:?} reached {:?}", block, start, pos);
                to_visit.push_back(pos);
            }
        }
    }

    ConnectedGroup {
        block,
        cells: visited.into_iter().collect(),
    }
}
