use rand::prelude::*;

use super::*;

/// Uniform placement by rejection sampling: draw a position, retry if it is already mined.
///
/// Seeding with the same value reproduces the same sequence of layouts.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        place_mines(config, &mut self.rng)
    }
}

/// Places `config.mines` distinct mines using `rng`.
pub fn place_mines<R: Rng>(config: GameConfig, rng: &mut R) -> Result<MineLayout> {
    let (size_x, size_y) = config.size;
    if size_x == 0 || size_y == 0 {
        return Err(GameError::InvalidLayout);
    }
    if config.mines > config.total_cells() {
        log::warn!(
            "Cannot place {} mines on {} cells",
            config.mines,
            config.total_cells()
        );
        return Err(GameError::MineCountMismatch);
    }

    let mut layout = MineLayout::empty(config.size);
    let mut draws: u32 = 0;
    while layout.mine_count() < config.mines {
        let coords = (rng.random_range(0..size_x), rng.random_range(0..size_y));
        draws += 1;
        layout.place_mine(coords);
    }

    log::debug!(
        "Placed {} mines after {} draws",
        layout.mine_count(),
        draws
    );
    Ok(layout)
}
