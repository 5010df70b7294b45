use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Step of an accepted tap that still has to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Falling,
    Refilling,
    Settling,
}

/// Valid transitions:
/// - Idle -> Processing(Falling), on a tap that clears a group
/// - Processing(Falling) -> Processing(Refilling)
/// - Processing(Refilling) -> Processing(Settling)
/// - Processing(Settling) -> Idle
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Idle,
    Processing(Phase),
}

impl EngineState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_processing(self) -> bool {
        matches!(self, Self::Processing(_))
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Plain-data changes handed to the presentation layer, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    BlocksCleared {
        cells: Vec<Coord2>,
        block: BlockType,
    },
    BlocksMoved {
        moves: Vec<Move>,
    },
    BlocksSpawned {
        spawns: Vec<Spawn>,
    },
    TransactionSettled,
}

impl From<ConnectedGroup> for EngineEvent {
    fn from(group: ConnectedGroup) -> Self {
        Self::BlocksCleared {
            block: group.block(),
            cells: group.into_cells(),
        }
    }
}

/// Outcome of a tap
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// Tapped an empty cell
    Empty,
    /// Group smaller than the threshold, nothing changed
    TooSmall(CellCount),
    /// Group cleared, the engine is now processing the cascade
    Accepted(ConnectedGroup),
}

impl TapOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Owns the board and sequences match, gravity, and refill for every tap.
#[derive(Clone, Debug)]
pub struct GridEngine<R: RandomSource = SeededRandom> {
    config: GameConfig,
    board: Board,
    random: R,
    state: EngineState,
}

impl GridEngine<SeededRandom> {
    /// Starts a game on a freshly generated board, seeded from the configuration.
    pub fn new(config: GameConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or(DEFAULT_SEED);
        Self::with_random(config, SeededRandom::new(seed))
    }
}

impl<R: RandomSource> GridEngine<R> {
    pub fn with_random(config: GameConfig, mut random: R) -> Result<Self> {
        config.validate()?;
        let board = RandomBoardGenerator::default().generate(&config, &mut random)?;
        log::debug!("New {}x{} board:\n{}", config.size.0, config.size.1, board);
        Ok(Self {
            config,
            board,
            random,
            state: Default::default(),
        })
    }

    /// Starts from a prepared board, which must match the configured size and only hold palette colors.
    pub fn from_board(config: GameConfig, board: Board, random: R) -> Result<Self> {
        config.validate()?;
        if board.size() != config.size {
            return Err(GameError::InvalidBoardShape);
        }
        if let Some((coords, block)) = board
            .iter_occupied()
            .find(|&(_, block)| !config.palette.contains(block))
        {
            log::debug!("{:?} at {:?} is outside the palette", block, coords);
            return Err(GameError::InvalidPalette);
        }
        Ok(Self {
            config,
            board,
            random,
            state: Default::default(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_processing(&self) -> bool {
        self.state.is_processing()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<BoardCell> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.board.cell_at(coords))
    }

    /// Size of the group the block at `coords` belongs to, `0` when empty. Only meant for display.
    pub fn group_size_at(&self, coords: Coord2) -> Result<CellCount> {
        group_size(&self.board, coords)
    }

    pub fn visual_tier_at(&self, coords: Coord2) -> Result<VisualTier> {
        self.group_size_at(coords).map(VisualTier::from_group_size)
    }

    pub fn has_any_legal_move(&self) -> bool {
        has_any_legal_move(&self.board, self.config.min_group_size)
    }

    pub fn legal_moves(&self) -> Vec<ConnectedGroup> {
        legal_moves(&self.board, self.config.min_group_size)
    }

    /// Runs the match phase. On success the engine enters `Processing` and rejects taps with `Busy` until
    /// `advance` has run every remaining phase.
    pub fn tap(&mut self, coords: Coord2) -> Result<TapOutcome> {
        if let EngineState::Processing(phase) = self.state {
            log::debug!("Tap at {:?} ignored, still processing {:?}", coords, phase);
            return Err(GameError::Busy);
        }
        let coords = self.board.validate_coords(coords).inspect_err(|_| {
            log::debug!("Tap at {:?} is outside {:?}", coords, self.board.size());
        })?;

        Ok(
            match resolve_match(&mut self.board, coords, self.config.min_group_size)? {
                MatchOutcome::Empty => TapOutcome::Empty,
                MatchOutcome::TooSmall(size) => TapOutcome::TooSmall(size),
                MatchOutcome::Cleared(group) => {
                    self.state = EngineState::Processing(Phase::Falling);
                    TapOutcome::Accepted(group)
                }
            },
        )
    }

    /// Runs the next pending phase and reports what it changed, `None` when idle.
    pub fn advance(&mut self) -> Result<Option<EngineEvent>> {
        use EngineState::*;
        use Phase::*;

        Ok(match self.state {
            Idle => None,
            Processing(Falling) => {
                let moves = apply_gravity(&mut self.board)?;
                log::trace!("{} blocks fell", moves.len());
                self.state = Processing(Refilling);
                Some(EngineEvent::BlocksMoved { moves })
            }
            Processing(Refilling) => {
                let report = refill(
                    &mut self.board,
                    self.config.palette,
                    self.config.min_group_size,
                    &mut self.random,
                )?;
                self.state = Processing(Settling);
                Some(EngineEvent::BlocksSpawned {
                    spawns: report.spawns,
                })
            }
            Processing(Settling) => {
                self.state = Idle;
                log::trace!("Settled board:\n{}", self.board);
                Some(EngineEvent::TransactionSettled)
            }
        })
    }

    /// Taps and runs the whole cascade at once. Returns no events when the tap did not clear anything.
    pub fn handle_tap(&mut self, coords: Coord2) -> Result<Vec<EngineEvent>> {
        let mut events = Vec::new();
        if let TapOutcome::Accepted(group) = self.tap(coords)? {
            events.push(group.into());
            while let Some(event) = self.advance()? {
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Entry point for hosts that address cells by separate row and column.
    pub fn on_tap(&mut self, row: Coord, column: Coord) -> Result<Vec<EngineEvent>> {
        self.handle_tap((row, column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BlockType::*;

    fn engine(text: &str, picks: &[BlockType]) -> GridEngine<SequenceRandom> {
        let board = Board::parse(text).unwrap();
        let config = GameConfig::new(board.size(), 6).unwrap();
        GridEngine::from_board(config, board, SequenceRandom::new(picks.iter().copied())).unwrap()
    }

    #[test]
    fn tap_on_single_block_stays_idle() {
        let mut engine = engine("BG\nGB", &[Red]);
        let before = engine.board().clone();

        assert_eq!(engine.tap((0, 0)), Ok(TapOutcome::TooSmall(1)));
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.handle_tap((1, 1)), Ok(Vec::new()));
    }

    #[test]
    fn phases_run_in_order() {
        let mut engine = engine(
            "
            RG
            BB
            ",
            &[Yellow, Yellow],
        );

        let outcome = engine.tap((0, 0)).unwrap();
        assert!(outcome.has_update());
        assert_eq!(engine.state(), EngineState::Processing(Phase::Falling));

        assert_eq!(
            engine.advance(),
            Ok(Some(EngineEvent::BlocksMoved {
                moves: Vec::from([
                    Move {
                        from: (1, 0),
                        to: (0, 0),
                        block: Red
                    },
                    Move {
                        from: (1, 1),
                        to: (0, 1),
                        block: Green
                    },
                ])
            }))
        );
        assert_eq!(engine.state(), EngineState::Processing(Phase::Refilling));

        assert_eq!(
            engine.advance(),
            Ok(Some(EngineEvent::BlocksSpawned {
                spawns: Vec::from([
                    Spawn {
                        coords: (1, 0),
                        block: Yellow
                    },
                    Spawn {
                        coords: (1, 1),
                        block: Yellow
                    },
                ])
            }))
        );
        assert_eq!(engine.advance(), Ok(Some(EngineEvent::TransactionSettled)));
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.advance(), Ok(None));
        assert_eq!(engine.board(), &Board::parse("YY\nRG").unwrap());
    }

    #[test]
    fn taps_are_rejected_while_processing() {
        let mut engine = engine("RG\nBB", &[Red]);

        engine.tap((0, 1)).unwrap();
        let mid_transaction = engine.board().clone();

        assert_eq!(engine.tap((1, 0)), Err(GameError::Busy));
        assert_eq!(engine.handle_tap((1, 0)), Err(GameError::Busy));
        assert_eq!(engine.board(), &mid_transaction);
        assert_eq!(engine.state(), EngineState::Processing(Phase::Falling));
    }

    #[test]
    fn out_of_bounds_tap_is_rejected() {
        let mut engine = engine("RG\nBB", &[Red]);

        assert_eq!(engine.on_tap(2, 0), Err(GameError::OutOfBounds));
        assert_eq!(engine.group_size_at((0, 9)), Err(GameError::OutOfBounds));
        assert!(engine.state().is_idle());
    }

    #[test]
    fn handle_tap_reports_full_transaction() {
        let mut engine = engine(
            "
            GGR
            BRR
            ",
            &[Blue, Yellow, Pink],
        );

        let events = engine.handle_tap((1, 0)).unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            EngineEvent::BlocksCleared {
                cells: Vec::from([(1, 0), (1, 1)]),
                block: Green
            }
        );
        assert!(matches!(events[1], EngineEvent::BlocksMoved { ref moves } if moves.is_empty()));
        assert_eq!(events[3], EngineEvent::TransactionSettled);
        assert!(engine.board().is_full());
        assert!(engine.has_any_legal_move());
        assert!(!engine.is_processing());
    }

    #[test]
    fn query_does_not_mutate() {
        let engine = engine(
            "
            BBBBB
            BBBBB
            ",
            &[Red],
        );

        assert_eq!(engine.group_size_at((0, 0)), Ok(10));
        assert_eq!(engine.visual_tier_at((1, 4)), Ok(VisualTier::Third));
        assert_eq!(engine.legal_moves().len(), 1);
        assert!(engine.board().is_full());
    }

    #[test]
    fn from_board_checks_size() {
        let board = Board::parse("RG\nBB").unwrap();
        let config = GameConfig::new((3, 3), 6).unwrap();

        assert_eq!(
            GridEngine::from_board(config, board, SeededRandom::new(0)).err(),
            Some(GameError::InvalidBoardShape)
        );
    }

    #[test]
    fn from_board_checks_palette() {
        let board = Board::parse("BY\nGB").unwrap();
        let two_colors = GameConfig::new((2, 2), 2).unwrap();

        assert_eq!(
            GridEngine::from_board(two_colors, board.clone(), SeededRandom::new(0)).err(),
            Some(GameError::InvalidPalette)
        );
        let full = GameConfig::new((2, 2), 6).unwrap();
        assert!(GridEngine::from_board(full, board, SeededRandom::new(0)).is_ok());
    }

    #[test]
    fn new_engine_starts_idle_and_playable() {
        let config = GameConfig::default().with_seed(42);

        let engine = GridEngine::new(config).unwrap();

        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.size(), (8, 8));
        assert!(engine.board().is_full());
        assert!(engine.has_any_legal_move());
    }
}
