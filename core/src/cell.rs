use serde::{Deserialize, Serialize};

/// Player-visible state of a single board cell.
///
/// `Revealed` memoizes the adjacent-mine count computed when the cell was
/// opened, so rendering never recounts neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Revealed(u8),
    Flagged,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
