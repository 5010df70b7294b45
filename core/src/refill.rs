use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// A new block placed into an empty cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub coords: Coord2,
    pub block: BlockType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefillReport {
    /// One entry per filled cell, column-major, carrying the final block of each cell.
    pub spawns: Vec<Spawn>,
    /// Cell whose random pick was swapped to restore a legal move.
    pub fixed_up: Option<Coord2>,
    /// No legal move could be restored, the board was accepted as is.
    pub deadlocked: bool,
}

/// Fills every empty cell with a random block. When the filled board has no legal move, one of the new blocks
/// is swapped for a type that forms a group, trying the most recently filled cell first.
pub fn refill<R: RandomSource>(
    board: &mut Board,
    palette: Palette,
    min_group_size: CellCount,
    random: &mut R,
) -> Result<RefillReport> {
    let mut spawns = Vec::new();
    for coords in board.empty_cells() {
        let block = random.pick_block(palette);
        board.place(coords, block)?;
        log::trace!("Spawned {:?} at {:?}", block, coords);
        spawns.push(Spawn { coords, block });
    }

    let mut report = RefillReport {
        spawns,
        fixed_up: None,
        deadlocked: false,
    };
    if has_any_legal_move(board, min_group_size) {
        return Ok(report);
    }

    log::debug!("Refilled board has no legal move, looking for a fix-up");
    let mut trial = board.clone();
    for index in (0..report.spawns.len()).rev() {
        let Spawn { coords, block: picked } = report.spawns[index];
        let Some(block) = pick_fix_up(&mut trial, coords, palette, min_group_size)? else {
            continue;
        };
        board.replace(coords, block)?;
        log::debug!(
            "Swapped {:?} for {:?} at {:?} to keep a legal move",
            picked,
            block,
            coords
        );
        report.spawns[index].block = block;
        report.fixed_up = Some(coords);
        return Ok(report);
    }

    log::warn!("No legal move available after refill, keeping the board as is");
    report.deadlocked = true;
    Ok(report)
}

/// Tries every palette type at `coords` on the scratch board, which is restored afterwards. Prefers a type
/// whose group lands in `[min, min + 1]` so the fix-up does not hand out a large group for free.
fn pick_fix_up(
    trial: &mut Board,
    coords: Coord2,
    palette: Palette,
    min_group_size: CellCount,
) -> Result<Option<BlockType>> {
    let original = trial.block_at(coords);
    let mut fallback = None;
    let mut chosen = None;

    for block in palette.iter() {
        trial.replace(coords, block)?;
        let size = flood(trial, coords, block).size();
        if size < min_group_size {
            continue;
        }
        if size <= min_group_size.saturating_add(1) {
            chosen = Some(block);
            break;
        }
        fallback.get_or_insert(block);
    }

    match original {
        Some(block) => {
            trial.replace(coords, block)?;
        }
        None => {
            trial.clear(coords)?;
        }
    }
    Ok(chosen.or(fallback))
}
