use crate::*;
pub use random::*;

mod random;

/// Strategy for placing mines on a fresh board.
pub trait GridGenerator {
    fn generate(self, spec: BoardSpec) -> MineGrid;
}
