use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Running (first successful reveal)
/// - Ready -> Won | Lost
/// - Running -> Won | Lost
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    Ready,
    Running,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
    Won,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
            Self::Won => true,
        }
    }
}

/// Outcome of revealing a cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Revealed => true,
            Self::Exploded => true,
        }
    }
}

/// A single game from first reveal to win or loss.
///
/// The game is won when the flagged set equals the mine set. Flags are capped
/// at the mine count, so tracking how many flags sit on mines is enough: once
/// that number reaches the mine count no incorrect flag can remain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    mine_grid: MineGrid,
    board: Array2<CellState>,
    revealed_count: Cells,
    flag_count: Cells,
    correct_flag_count: Cells,
    state: GameState,
    triggered_mine: Option<Pos>,
}

impl Game {
    pub fn new(mine_grid: MineGrid) -> Self {
        let size = mine_grid.size();
        Self {
            mine_grid,
            board: Array2::default(size.to_grid_index()),
            revealed_count: 0,
            flag_count: 0,
            correct_flag_count: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Pos {
        self.mine_grid.size()
    }

    pub fn board_spec(&self) -> BoardSpec {
        self.mine_grid.board_spec()
    }

    pub fn total_mines(&self) -> Cells {
        self.mine_grid.mine_count()
    }

    /// Mines minus placed flags; never negative because flags are capped.
    pub fn mines_left(&self) -> Cells {
        self.mine_grid.mine_count() - self.flag_count
    }

    /// Flags that actually sit on mines, shown on the result screen.
    pub fn mines_flagged(&self) -> Cells {
        self.correct_flag_count
    }

    pub fn cell_at(&self, pos: Pos) -> CellState {
        self.board[pos.to_grid_index()]
    }

    pub fn triggered_mine(&self) -> Option<Pos> {
        self.triggered_mine
    }

    pub fn has_mine_at(&self, pos: Pos) -> bool {
        self.mine_grid.contains_mine(pos)
    }

    /// Place or remove a flag. Revealed cells are ignored and placing is
    /// refused once every flag is spent.
    pub fn toggle_flag(&mut self, pos: Pos) -> Result<FlagOutcome> {
        use CellState::*;
        use FlagOutcome::*;

        let pos = self.mine_grid.validate_pos(pos)?;
        self.check_not_finished()?;

        Ok(match self.board[pos.to_grid_index()] {
            Hidden => {
                if self.flag_count == self.mine_grid.mine_count() {
                    return Ok(NoChange);
                }
                self.board[pos.to_grid_index()] = Flagged;
                self.flag_count += 1;
                if self.mine_grid.contains_mine(pos) {
                    self.correct_flag_count += 1;
                }

                if self.correct_flag_count == self.mine_grid.mine_count() {
                    self.end_game(true);
                    Won
                } else {
                    Changed
                }
            }
            Flagged => {
                self.board[pos.to_grid_index()] = Hidden;
                self.flag_count -= 1;
                if self.mine_grid.contains_mine(pos) {
                    self.correct_flag_count -= 1;
                }
                Changed
            }
            Revealed(_) => NoChange,
        })
    }

    /// Reveal a hidden cell, flood-filling outward from zero-count cells.
    pub fn reveal(&mut self, pos: Pos) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let pos = self.mine_grid.validate_pos(pos)?;
        self.check_not_finished()?;

        if !matches!(self.board[pos.to_grid_index()], CellState::Hidden) {
            return Ok(NoChange);
        }

        if self.mine_grid.contains_mine(pos) {
            self.triggered_mine = Some(pos);
            self.end_game(false);
            return Ok(Exploded);
        }

        let adjacent_mines = self.mine_grid.adjacent_mine_count(pos);
        self.board[pos.to_grid_index()] = CellState::Revealed(adjacent_mines);
        self.revealed_count += 1;
        log::debug!("revealed {:?}, adjacent mines: {}", pos, adjacent_mines);

        if adjacent_mines == 0 {
            self.flood_fill_from(pos);
        }

        self.mark_started();
        Ok(RevealOutcome::Revealed)
    }

    /// Opens the connected zero-count region around `start` plus its
    /// nonzero-count boundary. Flagged cells are never opened.
    fn flood_fill_from(&mut self, start: Pos) {
        use CellState::*;

        let mut visited = BTreeSet::from([start]);
        let mut to_visit: VecDeque<_> = self
            .mine_grid
            .neighbors(start)
            .filter(|&pos| matches!(self.board[pos.to_grid_index()], Hidden))
            .collect();

        while let Some(visit_pos) = to_visit.pop_front() {
            if !visited.insert(visit_pos) {
                continue;
            }

            // skip flagged or already opened cells
            if matches!(self.board[visit_pos.to_grid_index()], Revealed(_) | Flagged) {
                continue;
            }

            let visit_adjacent_mines = self.mine_grid.adjacent_mine_count(visit_pos);
            self.board[visit_pos.to_grid_index()] = Revealed(visit_adjacent_mines);
            self.revealed_count += 1;
            log::trace!(
                "flood opened {:?}, adjacent mines: {}",
                visit_pos,
                visit_adjacent_mines
            );

            if visit_adjacent_mines == 0 {
                to_visit.extend(
                    self.mine_grid
                        .neighbors(visit_pos)
                        .filter(|&pos| matches!(self.board[pos.to_grid_index()], Hidden))
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.state, GameState::Ready) {
            self.state = GameState::Running;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        if won {
            self.triggered_mine = None;
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Pos, mines: &[Pos]) -> Game {
        Game::new(MineGrid::from_mine_positions(size, mines).unwrap())
    }

    #[test]
    fn reveal_hits_mine_and_sets_triggered_cell() {
        let mut game = game((2, 2), &[(0, 0)]);

        let outcome = game.reveal((0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Exploded);
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(game.triggered_mine(), Some((0, 0)));
    }

    #[test]
    fn reveal_memoizes_adjacent_counts() {
        let mut game = game((3, 3), &[(0, 0), (2, 0)]);

        assert_eq!(game.reveal((1, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.cell_at((1, 0)), CellState::Revealed(2));

        assert_eq!(game.reveal((1, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.cell_at((1, 1)), CellState::Revealed(2));
    }

    #[test]
    fn flood_fill_opens_zero_region_up_to_numbered_boundary() {
        let mut game = game((4, 4), &[(3, 3)]);

        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);

        // the whole zero region plus the numbered boundary opens
        assert_eq!(game.cell_at((0, 0)), CellState::Revealed(0));
        assert_eq!(game.cell_at((2, 2)), CellState::Revealed(1));
        assert_eq!(game.cell_at((3, 2)), CellState::Revealed(1));
        // the mine itself stays hidden
        assert_eq!(game.cell_at((3, 3)), CellState::Hidden);
    }

    #[test]
    fn flood_fill_skips_flagged_cells() {
        let mut game = game((4, 1), &[(3, 0)]);

        assert_eq!(game.toggle_flag((1, 0)).unwrap(), FlagOutcome::Changed);
        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);

        assert_eq!(game.cell_at((0, 0)), CellState::Revealed(0));
        assert_eq!(game.cell_at((1, 0)), CellState::Flagged);
        // the flag blocks the fill from continuing past it
        assert_eq!(game.cell_at((2, 0)), CellState::Hidden);
    }

    #[test]
    fn reveal_ignores_flagged_and_already_revealed_cells() {
        let mut game = game((3, 1), &[(2, 0)]);

        game.toggle_flag((0, 0)).unwrap();
        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::NoChange);

        game.toggle_flag((0, 0)).unwrap();
        assert_eq!(game.reveal((1, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(game.reveal((1, 0)).unwrap(), RevealOutcome::NoChange);
    }

    #[test]
    fn first_reveal_starts_the_game_but_flags_do_not() {
        let mut game = game((3, 3), &[(2, 2), (0, 2)]);

        assert!(game.state().is_ready());
        game.toggle_flag((0, 0)).unwrap();
        assert!(game.state().is_ready());

        game.toggle_flag((0, 0)).unwrap();
        game.reveal((0, 0)).unwrap();
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn flag_count_is_capped_at_mine_count() {
        let mut game = game((3, 1), &[(0, 0)]);

        assert_eq!(game.toggle_flag((1, 0)).unwrap(), FlagOutcome::Changed);
        assert_eq!(game.toggle_flag((2, 0)).unwrap(), FlagOutcome::NoChange);
        assert_eq!(game.mines_left(), 0);

        // removing the misplaced flag makes room for another
        assert_eq!(game.toggle_flag((1, 0)).unwrap(), FlagOutcome::Changed);
        assert_eq!(game.mines_left(), 1);
    }

    #[test]
    fn flagging_every_mine_wins() {
        let mut game = game((3, 2), &[(0, 0), (2, 1)]);

        game.reveal((1, 0)).unwrap();
        assert_eq!(game.toggle_flag((0, 0)).unwrap(), FlagOutcome::Changed);
        assert_eq!(game.toggle_flag((2, 1)).unwrap(), FlagOutcome::Won);

        assert_eq!(game.state(), GameState::Won);
        assert_eq!(game.mines_flagged(), 2);
        assert_eq!(game.mines_left(), 0);
    }

    #[test]
    fn misplaced_flag_blocks_the_win_until_moved() {
        let mut game = game((3, 1), &[(0, 0)]);

        assert_eq!(game.toggle_flag((2, 0)).unwrap(), FlagOutcome::Changed);
        assert_eq!(game.state(), GameState::Ready);
        assert_eq!(game.mines_flagged(), 0);

        game.toggle_flag((2, 0)).unwrap();
        assert_eq!(game.toggle_flag((0, 0)).unwrap(), FlagOutcome::Won);
    }

    #[test]
    fn no_moves_are_accepted_after_the_game_ends() {
        let mut game = game((2, 1), &[(0, 0)]);

        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::Exploded);
        assert_eq!(game.reveal((1, 0)).unwrap_err(), GameError::AlreadyEnded);
        assert_eq!(
            game.toggle_flag((1, 0)).unwrap_err(),
            GameError::AlreadyEnded
        );
    }

    #[test]
    fn out_of_bounds_moves_are_rejected() {
        let mut game = game((2, 2), &[(0, 0)]);

        assert_eq!(game.reveal((2, 0)).unwrap_err(), GameError::OutOfBounds);
        assert_eq!(game.toggle_flag((0, 5)).unwrap_err(), GameError::OutOfBounds);
    }

    #[test]
    fn toggle_flag_on_revealed_cell_is_a_no_op() {
        let mut game = game((3, 1), &[(2, 0)]);

        game.reveal((0, 0)).unwrap();
        assert_eq!(game.toggle_flag((0, 0)).unwrap(), FlagOutcome::NoChange);
    }
}
