use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
pub use reveal::*;

mod reveal;

/// Tally of flags at the end of a round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagTally {
    pub correct: CellCount,
    pub incorrect: CellCount,
    pub unmarked_mines: CellCount,
}

/// The grid of cells for the current round.
///
/// This is the only place cell state changes: setup happens in [`Board::new_round`], play goes
/// through [`Board::reveal`] and [`Board::flag`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    /// Flood-fill markers, only meaningful during a single `reveal` call.
    visited: Array2<bool>,
}

impl Board {
    /// Creates a board with no mines and every cell unexplored.
    pub fn new(config: GameConfig) -> Self {
        let shape = config.size.to_nd_index();
        Self {
            config,
            cells: Array2::default(shape),
            visited: Array2::default(shape),
        }
    }

    /// Creates a standard board already set up with `layout`.
    pub fn from_layout(layout: &MineLayout) -> Result<Self> {
        let mut board = Self::new(GameConfig::STANDARD);
        board.load_layout(layout)?;
        Ok(board)
    }

    /// Clears all cell state, places a fresh layout and precomputes adjacency counts.
    pub fn new_round(&mut self, generator: &mut impl MineGenerator) -> Result<()> {
        let layout = generator.generate(self.config)?;
        self.load_layout(&layout)
    }

    /// Resets the board to `layout`. The board is left untouched if the layout does not fit.
    pub fn load_layout(&mut self, layout: &MineLayout) -> Result<()> {
        if layout.size() != self.config.size {
            return Err(GameError::InvalidLayout);
        }
        if layout.mine_count() != self.config.mines {
            return Err(GameError::MineCountMismatch);
        }

        self.cells.fill(Cell::default());
        self.visited.fill(false);
        for coords in layout.iter_mines() {
            self.cells[coords.to_nd_index()].has_mine = true;
        }
        self.compute_adjacency();

        log::debug!("Board set up with {} mines", layout.mine_count());
        Ok(())
    }

    fn compute_adjacency(&mut self) {
        let (size_x, size_y) = self.config.size;
        for x in 0..size_x {
            for y in 0..size_y {
                let coords = (x, y);
                if self.cells[coords.to_nd_index()].has_mine {
                    continue;
                }
                let count = self
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].has_mine)
                    .count() as u8;
                self.cells[coords.to_nd_index()].adjacent_mines = count;
            }
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn in_bounds(&self, (x, y): Coord2) -> bool {
        let (size_x, size_y) = self.config.size;
        x < size_x && y < size_y
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.config.size)
    }

    /// All cells with their coordinates, `x` major.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), cell)| ((x as Coord, y as Coord), cell))
    }

    pub fn flagged_count(&self) -> CellCount {
        self.iter_cells().filter(|(_, cell)| cell.is_flagged).count() as CellCount
    }

    pub fn all_mines_flagged(&self) -> bool {
        self.iter_cells()
            .all(|(_, cell)| !cell.has_mine || cell.is_flagged)
    }

    /// Every flag is spent but some mine is still unflagged.
    ///
    /// Only reachable if a flag landed on a safe cell, which already ends the round.
    pub fn flags_exhausted(&self) -> bool {
        self.flagged_count() == self.config.mines && !self.all_mines_flagged()
    }

    pub fn flag_tally(&self) -> FlagTally {
        let mut tally = FlagTally::default();
        for (_, cell) in self.iter_cells() {
            match (cell.has_mine, cell.is_flagged) {
                (true, true) => tally.correct += 1,
                (true, false) => tally.unmarked_mines += 1,
                (false, true) => tally.incorrect += 1,
                (false, false) => {}
            }
        }
        tally
    }
}

/// Player-visible grid, one row per line.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (size_x, size_y) = self.config.size;
        for y in 0..size_y {
            for x in 0..size_x {
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", self.cells[(x, y).to_nd_index()].display)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    const EXAMPLE_MINES: [Coord2; 4] = [(0, 0), (7, 7), (3, 3), (5, 1)];

    fn example_board() -> Board {
        let layout = MineLayout::from_mine_coords((8, 8), &EXAMPLE_MINES).unwrap();
        Board::from_layout(&layout).unwrap()
    }

    fn count_mined_neighbors(board: &Board, coords: Coord2) -> u8 {
        board
            .iter_neighbors(coords)
            .filter(|&pos| board.cell_at(pos).unwrap().has_mine())
            .count() as u8
    }

    #[test]
    fn adjacency_matches_neighbor_mines() {
        let board = example_board();

        for (coords, cell) in board.iter_cells() {
            if !cell.has_mine() {
                assert_eq!(cell.adjacent_mines(), count_mined_neighbors(&board, coords));
            }
        }
        assert_eq!(board.cell_at((1, 1)).unwrap().adjacent_mines(), 1);
        assert_eq!(board.cell_at((7, 0)).unwrap().adjacent_mines(), 0);
        assert_eq!(board.cell_at((1, 6)).unwrap().adjacent_mines(), 0);
        assert_eq!(board.cell_at((6, 1)).unwrap().adjacent_mines(), 1);
        assert_eq!(board.cell_at((4, 2)).unwrap().adjacent_mines(), 2);
        assert_eq!(board.cell_at((6, 6)).unwrap().adjacent_mines(), 1);
    }

    #[test]
    fn every_round_has_exactly_the_configured_mines() {
        let mut board = Board::new(GameConfig::STANDARD);
        let mut generator = RandomMineGenerator::new(11);

        for _ in 0..50 {
            board.new_round(&mut generator).unwrap();
            let mines = board.iter_cells().filter(|(_, cell)| cell.has_mine()).count();
            assert_eq!(mines, MINE_COUNT as usize);
            for (coords, cell) in board.iter_cells() {
                if !cell.has_mine() {
                    assert_eq!(cell.adjacent_mines(), count_mined_neighbors(&board, coords));
                }
            }
        }
    }

    #[test]
    fn new_round_clears_previous_state() {
        let mut board = example_board();
        board.flag((0, 0)).unwrap();
        board.reveal((1, 6)).unwrap();

        let mut generator = FixedMineGenerator::from_mine_coords(&EXAMPLE_MINES).unwrap();
        board.new_round(&mut generator).unwrap();

        assert!(
            board
                .iter_cells()
                .all(|(_, cell)| !cell.is_revealed() && !cell.is_flagged())
        );
        assert!(
            board
                .iter_cells()
                .all(|(_, cell)| cell.display() == Symbol::Unexplored)
        );
    }

    #[test]
    fn rejected_layout_leaves_board_untouched() {
        let mut board = example_board();
        board.flag((7, 7)).unwrap();
        let before = board.clone();

        let layout = MineLayout::from_mine_coords((8, 8), &[(1, 1)]).unwrap();

        assert_eq!(board.load_layout(&layout), Err(GameError::MineCountMismatch));
        assert_eq!(board, before);
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let mut board = example_board();
        let mut mask: Array2<bool> = Array2::default((9, 8));
        for (x, y) in [(8, 0), (1, 1), (2, 2), (3, 3)] {
            mask[(x, y)] = true;
        }
        let layout = MineLayout::from_mine_mask(mask);

        assert_eq!(layout.mine_count(), 4);
        assert_eq!(board.load_layout(&layout), Err(GameError::InvalidLayout));
    }

    #[test]
    fn bounds_are_checked() {
        let board = example_board();

        assert!(board.in_bounds((7, 7)));
        assert!(!board.in_bounds((8, 0)));
        assert!(!board.in_bounds((0, 8)));
        assert_eq!(board.cell_at((8, 3)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn flag_tally_splits_flags() {
        let mut board = example_board();
        board.flag((0, 0)).unwrap();
        board.flag((3, 3)).unwrap();
        board.flag((4, 4)).unwrap();

        assert_eq!(
            board.flag_tally(),
            FlagTally {
                correct: 2,
                incorrect: 1,
                unmarked_mines: 2,
            }
        );
    }

    #[test]
    fn flags_exhausted_only_when_a_flag_was_wasted() {
        let mut board = example_board();
        for coords in [(0, 0), (7, 7), (3, 3)] {
            board.flag(coords).unwrap();
        }
        assert!(!board.flags_exhausted());

        board.flag((4, 4)).unwrap();
        assert_eq!(board.flagged_count(), MINE_COUNT);
        assert!(board.flags_exhausted());
        assert!(!board.all_mines_flagged());
    }

    #[test]
    fn display_shows_visible_state_only() {
        let mut board = example_board();
        board.flag((0, 0)).unwrap();
        board.reveal((6, 1)).unwrap();

        let text = board.to_string();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("f u u u u u u u"));
        assert_eq!(lines.next(), Some("u u u u u u 1 u"));
        assert_eq!(text.lines().count(), 8);
    }
}
