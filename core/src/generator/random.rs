use super::*;
use ndarray::Array2;

/// Seeded generator that places the requested number of mines at uniformly
/// random distinct cells.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, spec: BoardSpec) -> MineGrid {
        use rand::prelude::*;

        let total_cells = spec.total_cells();

        // full (or over-full) boards need no sampling
        if spec.mines >= total_cells {
            if spec.mines > total_cells {
                log::warn!(
                    "Board already full, requested {} mines but only {} cells",
                    spec.mines,
                    total_cells
                );
            }
            return MineGrid::from_mine_mask(Array2::from_elem(spec.size.to_grid_index(), true));
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let picks =
            rand::seq::index::sample(&mut rng, total_cells as usize, spec.mines as usize);

        let mut mine_mask: Array2<bool> = Array2::default(spec.size.to_grid_index());
        {
            let cells = mine_mask.as_slice_mut().expect("layout should be standard");
            for pick in picks {
                cells[pick] = true;
            }
        }

        MineGrid::from_mine_mask(mine_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_mine_count() {
        for level in Level::ALL {
            let spec = level.board_spec();
            let grid = RandomGridGenerator::new(42).generate(spec);
            assert_eq!(grid.mine_count(), spec.mines);
            assert_eq!(grid.size(), spec.size);
        }
    }

    #[test]
    fn same_seed_gives_same_board() {
        let spec = Level::Medium.board_spec();
        let a = RandomGridGenerator::new(7).generate(spec);
        let b = RandomGridGenerator::new(7).generate(spec);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_give_different_boards() {
        let spec = Level::Hard.board_spec();
        let a = RandomGridGenerator::new(1).generate(spec);
        let b = RandomGridGenerator::new(2).generate(spec);
        assert_ne!(a, b);
    }

    #[test]
    fn full_board_is_all_mines() {
        let spec = BoardSpec::new_unchecked((3, 3), 9);
        let grid = RandomGridGenerator::new(0).generate(spec);
        assert_eq!(grid.mine_count(), 9);
    }
}
