use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Uniform generation by rejection sampling: draw a random cell, keep it unless it already holds a mine or is the
/// excluded start cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&self, config: GameConfig, exclude: Coord2) -> Result<Minefield> {
        let config = GameConfig::new(config.size, config.mines)?;
        let exclude = config.validate_coords(exclude)?;
        let (rows, cols) = config.size;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut placed: CellCount = 0;

        while placed < config.mines {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            if coords == exclude || mines[coords.to_nd_index()] {
                continue;
            }
            mines[coords.to_nd_index()] = true;
            placed += 1;
        }

        let minefield = Minefield::from_mine_mask(mines)?;
        if minefield.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                minefield.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "Placed {} mines on {}x{} with seed {}, start {:?} kept safe",
            minefield.mine_count(),
            rows,
            cols,
            self.seed,
            exclude
        );
        Ok(minefield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seed_gives_same_layout() {
        let config = Difficulty::Medium.config();
        let a = RandomMinefieldGenerator::new(7).generate(config, (3, 3)).unwrap();
        let b = RandomMinefieldGenerator::new(7).generate(config, (3, 3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn densest_board_fills_everything_but_start() {
        let config = GameConfig::new((3, 3), 8).unwrap();
        let field = RandomMinefieldGenerator::new(1).generate(config, (1, 1)).unwrap();

        assert_eq!(field.mine_count(), 8);
        assert!(!field.contains_mine((1, 1)));
        assert_eq!(field.adjacent_mine_count((1, 1)), 8);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = GameConfig::new_unchecked((2, 2), 4);
        assert_eq!(
            RandomMinefieldGenerator::new(0).generate(config, (0, 0)),
            Err(GameError::Configuration(ConfigError::TooManyMines {
                mines: 4,
                cells: 4
            }))
        );
    }

    #[test]
    fn rejects_start_outside_board() {
        let config = Difficulty::Easy.config();
        assert_eq!(
            RandomMinefieldGenerator::new(0).generate(config, (0, 9)),
            Err(GameError::OutOfBounds { row: 0, col: 9 })
        );
    }

    proptest! {
        #[test]
        fn start_cell_is_never_a_mine(
            seed in any::<u64>(),
            difficulty in prop::sample::select(Difficulty::ALL.to_vec()),
            row_frac in 0.0f64..1.0,
            col_frac in 0.0f64..1.0,
        ) {
            let config = difficulty.config();
            let start = (
                (row_frac * config.rows() as f64) as Coord,
                (col_frac * config.cols() as f64) as Coord,
            );
            let field = RandomMinefieldGenerator::new(seed).generate(config, start).unwrap();

            prop_assert!(!field.contains_mine(start));
            prop_assert_eq!(field.mine_count(), config.mines);
            prop_assert_eq!(field.mine_positions().len(), config.mines as usize);
        }
    }
}
