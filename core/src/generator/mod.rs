use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Source of the hidden mine layout for each new round.
pub trait MineGenerator {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout>;
}

impl<G: MineGenerator + ?Sized> MineGenerator for &mut G {
    fn generate(&mut self, config: GameConfig) -> Result<MineLayout> {
        (**self).generate(config)
    }
}
