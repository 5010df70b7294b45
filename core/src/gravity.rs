use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Relocation of one block while a column settles. `to` is always below `from` in the same column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord2,
    pub to: Coord2,
    pub block: BlockType,
}

impl Move {
    /// Rows travelled
    pub const fn distance(&self) -> Coord {
        self.from.0 - self.to.0
    }
}

/// Compacts every column toward row `0`, keeping the vertical order of the blocks. The returned moves can be
/// replayed in order against the pre-gravity board; the board itself is already in its final state.
pub fn apply_gravity(board: &mut Board) -> Result<Vec<Move>> {
    let mut moves = Vec::new();
    for column in 0..board.columns() {
        settle_column(board, column, &mut moves)?;
    }
    Ok(moves)
}

fn settle_column(board: &mut Board, column: Coord, moves: &mut Vec<Move>) -> Result<()> {
    // lowest row not yet holding a settled block
    let mut write_row: Coord = 0;
    for row in 0..board.rows() {
        if board.is_empty_at((row, column)) {
            continue;
        }
        if row != write_row {
            let from = (row, column);
            let to = (write_row, column);
            let block = board.move_block(from, to)?;
            log::trace!("Block {:?} falls from {:?} to {:?}", block, from, to);
            moves.push(Move { from, to, block });
        }
        write_row += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        Board::parse(text).unwrap()
    }

    #[test]
    fn compacted_board_produces_no_moves() {
        let mut board = board(
            "
            ..R
            B.G
            BYG
            ",
        );
        let before = board.clone();

        let moves = apply_gravity(&mut board).unwrap();

        assert!(moves.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn blocks_fall_in_order() {
        let mut board = board(
            "
            R.
            ..
            G.
            ..
            ",
        );

        let moves = apply_gravity(&mut board).unwrap();

        assert_eq!(
            moves,
            [
                Move {
                    from: (1, 0),
                    to: (0, 0),
                    block: BlockType::Green
                },
                Move {
                    from: (3, 0),
                    to: (1, 0),
                    block: BlockType::Red
                },
            ]
        );
        assert_eq!(board, Board::parse("..\n..\nR.\nG.").unwrap());
        assert_eq!(moves[1].distance(), 2);
    }

    #[test]
    fn columns_settle_independently() {
        let mut board = board(
            "
            BP
            R.
            ..
            ",
        );

        let moves = apply_gravity(&mut board).unwrap();

        assert!(moves.iter().all(|m| m.from.1 == m.to.1 && m.to.0 < m.from.0));
        assert_eq!(
            board,
            Board::parse(
                "
                ..
                B.
                RP
                "
            )
            .unwrap()
        );
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let mut board = board(
            "
            Y.Y
            .G.
            B.R
            ",
        );

        apply_gravity(&mut board).unwrap();
        let settled = board.clone();
        let moves = apply_gravity(&mut board).unwrap();

        assert!(moves.is_empty());
        assert_eq!(board, settled);
    }
}
