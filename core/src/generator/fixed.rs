use super::*;

/// Replays a known layout instead of generating one.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMinefieldGenerator {
    minefield: Minefield,
}

impl FixedMinefieldGenerator {
    pub fn new(minefield: Minefield) -> Self {
        Self { minefield }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        Minefield::from_mine_coords(size, mine_coords).map(Self::new)
    }
}

impl MinefieldGenerator for FixedMinefieldGenerator {
    fn generate(&self, config: GameConfig, exclude: Coord2) -> Result<Minefield> {
        let exclude = config.validate_coords(exclude)?;
        check_layout(&self.minefield, config, exclude)?;
        Ok(self.minefield.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hands_back_matching_layout() {
        let generator = FixedMinefieldGenerator::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let config = GameConfig::new((2, 2), 1).unwrap();

        let field = generator.generate(config, (1, 1)).unwrap();

        assert!(field.contains_mine((0, 0)));
    }

    #[test]
    fn refuses_mine_on_start() {
        let generator = FixedMinefieldGenerator::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let config = GameConfig::new((2, 2), 1).unwrap();

        assert_eq!(
            generator.generate(config, (0, 0)),
            Err(ConfigError::MineOnStart.into())
        );
    }

    #[test]
    fn refuses_layout_for_other_config() {
        let generator = FixedMinefieldGenerator::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        assert_eq!(
            generator.generate(Difficulty::Easy.config(), (1, 1)),
            Err(ConfigError::LayoutMismatch.into())
        );
    }
}
