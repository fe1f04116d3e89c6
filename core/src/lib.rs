#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use types::*;

mod cell;
mod error;
mod game;
mod generator;
mod types;

/// Board dimensions and mine count for a single game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSpec {
    pub size: Pos,
    pub mines: Cells,
}

impl BoardSpec {
    pub const fn new_unchecked(size: Pos, mines: Cells) -> Self {
        Self { size, mines }
    }

    pub fn new((size_x, size_y): Pos, mines: Cells) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        let mines = mines.clamp(1, area(size_x, size_y));
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub const fn total_cells(&self) -> Cells {
        area(self.size.0, self.size.1)
    }
}

/// The three fixed board presets offered by the level selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    pub const fn board_spec(self) -> BoardSpec {
        match self {
            Level::Easy => BoardSpec::new_unchecked((10, 8), 10),
            Level::Medium => BoardSpec::new_unchecked((18, 14), 40),
            Level::Hard => BoardSpec::new_unchecked((24, 20), 99),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }

    /// Capitalized form shown in the level selector.
    pub const fn label(self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.name() == name)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::Medium
    }
}

/// Mine placement for one board: a boolean mask plus the cached mine count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineGrid {
    mine_mask: Array2<bool>,
    mine_count: Cells,
}

impl MineGrid {
    /// Builds a grid from a raw mask.
    ///
    /// # Panics
    ///
    /// Panics if either mask dimension exceeds `Coord::MAX` cells.
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let dim = mine_mask.dim();
        assert!(
            dim.0 <= Coord::MAX as usize && dim.1 <= Coord::MAX as usize,
            "mask dimensions must fit in Coord"
        );

        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_positions(size: Pos, mine_positions: &[Pos]) -> Result<Self> {
        if mine_positions.len() > usize::from(area(size.0, size.1)) {
            return Err(GameError::TooManyMines);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_grid_index());

        for &pos in mine_positions {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[pos.to_grid_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn board_spec(&self) -> BoardSpec {
        BoardSpec {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        let size = self.size();
        if pos.0 < size.0 && pos.1 < size.1 {
            Ok(pos)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Pos {
        let dim = self.mine_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> Cells {
        self.mine_mask.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> Cells {
        self.mine_count
    }

    pub fn contains_mine(&self, pos: Pos) -> bool {
        self[pos]
    }

    pub fn adjacent_mine_count(&self, pos: Pos) -> u8 {
        self.mine_mask
            .neighbors(pos)
            .filter(|&pos| self[pos])
            .count()
            .try_into()
            .unwrap()
    }

    pub(crate) fn neighbors(&self, pos: Pos) -> Neighbors {
        self.mine_mask.neighbors(pos)
    }
}

impl Index<Pos> for MineGrid {
    type Output = bool;

    fn index(&self, (x, y): Pos) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}
