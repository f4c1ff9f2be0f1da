use super::*;

/// Replays the same layout every round, for scripted play and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator {
    layout: MineLayout,
}

impl FixedMineGenerator {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(GameConfig::STANDARD.size, mine_coords).map(Self::new)
    }
}

impl MineGenerator for FixedMineGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        if self.layout.size() != config.size {
            return Err(GameError::InvalidLayout);
        }
        if self.layout.mine_count() != config.mines {
            return Err(GameError::MineCountMismatch);
        }
        Ok(self.layout.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_layout_every_round() {
        let mut generator =
            FixedMineGenerator::from_mine_coords(&[(0, 0), (7, 7), (3, 3), (5, 1)]).unwrap();

        let first = generator.generate(GameConfig::STANDARD).unwrap();
        let second = generator.generate(GameConfig::STANDARD).unwrap();

        assert_eq!(first, second);
        assert!(first.contains_mine((5, 1)));
    }

    #[test]
    fn rejects_wrong_mine_count() {
        let mut generator = FixedMineGenerator::from_mine_coords(&[(0, 0)]).unwrap();

        assert_eq!(
            generator.generate(GameConfig::STANDARD),
            Err(GameError::MineCountMismatch)
        );
    }

    #[test]
    fn rejects_wrong_size() {
        let layout = MineLayout::from_mine_coords((4, 4), &[(0, 0), (1, 1), (2, 2), (3, 3)]);
        let mut generator = FixedMineGenerator::new(layout.unwrap());

        assert_eq!(
            generator.generate(GameConfig::STANDARD),
            Err(GameError::InvalidLayout)
        );
    }
}
