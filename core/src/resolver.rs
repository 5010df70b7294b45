use crate::*;

/// Outcome of tapping a cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Nothing to match at an empty cell
    Empty,
    /// Group found but below the threshold, carries its size
    TooSmall(CellCount),
    /// Group removed from the board
    Cleared(ConnectedGroup),
}

impl MatchOutcome {
    /// Whether this outcome mutated the board
    pub const fn has_update(&self) -> bool {
        matches!(self, Self::Cleared(_))
    }

    pub fn into_group(self) -> Option<ConnectedGroup> {
        match self {
            Self::Cleared(group) => Some(group),
            Self::Empty | Self::TooSmall(_) => None,
        }
    }
}

/// Clears the group at `tapped` when it reaches `min_group_size`. The board is left untouched otherwise.
pub fn resolve_match(
    board: &mut Board,
    tapped: Coord2,
    min_group_size: CellCount,
) -> Result<MatchOutcome> {
    let tapped = board.validate_coords(tapped)?;
    let Some(block) = board.block_at(tapped) else {
        log::debug!("Tapped empty cell at {:?}", tapped);
        return Ok(MatchOutcome::Empty);
    };

    let group = flood(board, tapped, block);
    if group.size() < min_group_size {
        log::debug!(
            "Not enough connected blocks at {:?}: {} < {}",
            tapped,
            group.size(),
            min_group_size
        );
        return Ok(MatchOutcome::TooSmall(group.size()));
    }

    for &coords in group.cells() {
        board.clear(coords)?;
    }
    log::debug!(
        "Cleared {} {:?} blocks from {:?}",
        group.size(),
        group.block(),
        tapped
    );
    Ok(MatchOutcome::Cleared(group))
}

/// `Some(group)` when the tap cleared blocks.
pub fn try_resolve(
    board: &mut Board,
    tapped: Coord2,
    min_group_size: CellCount,
) -> Result<Option<ConnectedGroup>> {
    resolve_match(board, tapped, min_group_size).map(MatchOutcome::into_group)
}
