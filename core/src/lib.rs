#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use scan::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod scan;
mod session;
mod types;

/// Board width shared by every round.
pub const BOARD_WIDTH: Coord = 8;
/// Board height shared by every round.
pub const BOARD_HEIGHT: Coord = 8;
/// Number of mines placed at the start of every round.
pub const MINE_COUNT: CellCount = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// The one configuration the engine plays.
    pub const STANDARD: Self = Self {
        size: (BOARD_WIDTH, BOARD_HEIGHT),
        mines: MINE_COUNT,
    };

    pub const fn total_cells(&self) -> CellCount {
        self.size.0 as CellCount * self.size.1 as CellCount
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Hidden truth of a round: which positions hold a mine.
///
/// Serialized as the bare mine mask; size and mine count are always derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Array2<bool>", into = "Array2<bool>")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn empty(size: Coord2) -> Self {
        Self::from_mine_mask(Array2::default(size.to_nd_index()))
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout from explicit mine positions. Repeated positions count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut layout = Self::empty(size);
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            layout.place_mine(coords);
        }
        Ok(layout)
    }

    /// Marks `coords` as mined, returning `false` if it already was.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let slot = &mut self.mine_mask[coords.to_nd_index()];
        if *slot {
            return false;
        }
        *slot = true;
        self.mine_count += 1;
        true
    }

    /// Dimensions of the mask. An axis too long for [`Coord`] reads as `Coord::MAX`, which no
    /// board accepts.
    pub fn size(&self) -> Coord2 {
        let (size_x, size_y) = self.mine_mask.dim();
        (
            size_x.try_into().unwrap_or(Coord::MAX),
            size_y.try_into().unwrap_or(Coord::MAX),
        )
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl From<Array2<bool>> for MineLayout {
    fn from(mine_mask: Array2<bool>) -> Self {
        Self::from_mine_mask(mine_mask)
    }
}

impl From<MineLayout> for Array2<bool> {
    fn from(layout: MineLayout) -> Self {
        layout.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mine_mask[(x as usize, y as usize)]
    }
}
