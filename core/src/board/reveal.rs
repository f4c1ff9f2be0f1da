use alloc::vec;
use alloc::vec::Vec;

use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell held a mine; it now shows [`Symbol::Mine`] and nothing else changed.
    HitMine,
    /// Positions that were revealed by this call, in visiting order.
    Revealed(Vec<Coord2>),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    FlaggedMine,
    /// A safe cell was flagged, which is a fatal misplay.
    FlaggedEmpty,
}

impl Board {
    /// Reveals `coords`, flood-filling through connected cells without adjacent mines.
    ///
    /// Numbered cells on the rim of a clear region are revealed but not expanded. Mines are
    /// never entered by the flood-fill.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.has_mine {
            cell.display = Symbol::Mine;
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        self.visited.fill(false);
        let mut revealed = Vec::new();
        let mut to_visit = vec![coords];
        let mut steps: CellCount = 0;

        while let Some(visit_coords) = to_visit.pop() {
            let index = visit_coords.to_nd_index();
            if self.visited[index] {
                continue;
            }
            self.visited[index] = true;
            steps += 1;

            let cell = &mut self.cells[index];
            if cell.has_mine {
                continue;
            }
            if !cell.is_revealed {
                revealed.push(visit_coords);
            }
            cell.is_revealed = true;
            cell.display = Symbol::revealed(cell.adjacent_mines);

            if cell.adjacent_mines == 0 {
                let visited = &self.visited;
                to_visit.extend(
                    NeighborIter::new(visit_coords, self.config.size)
                        .filter(|pos| !visited[pos.to_nd_index()]),
                );
            }
        }

        debug_assert!(steps <= self.config.total_cells());
        log::debug!(
            "Reveal at {:?} visited {} cells, revealed {}",
            coords,
            steps,
            revealed.len()
        );
        Ok(RevealOutcome::Revealed(revealed))
    }

    /// Flags `coords`. Flagging an already flagged cell is a no-op that reports the same outcome.
    pub fn flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;

        let cell = &mut self.cells[coords.to_nd_index()];
        cell.is_flagged = true;
        cell.display = Symbol::Flagged;

        Ok(if cell.has_mine {
            FlagOutcome::FlaggedMine
        } else {
            FlagOutcome::FlaggedEmpty
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;

    fn board(mines: &[Coord2]) -> Board {
        let layout = MineLayout::from_mine_coords((8, 8), mines).unwrap();
        Board::from_layout(&layout).unwrap()
    }

    fn example_board() -> Board {
        board(&[(0, 0), (7, 7), (3, 3), (5, 1)])
    }

    fn display(board: &Board, coords: Coord2) -> Symbol {
        board.cell_at(coords).unwrap().display()
    }

    fn newly_revealed(outcome: RevealOutcome) -> Vec<Coord2> {
        match outcome {
            RevealOutcome::Revealed(revealed) => revealed,
            RevealOutcome::HitMine => panic!("unexpected mine"),
        }
    }

    #[test]
    fn reveal_mine_only_marks_that_cell() {
        let mut board = example_board();

        assert_eq!(board.reveal((0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(display(&board, (0, 0)), Symbol::Mine);
        assert!(
            board
                .iter_cells()
                .all(|(_, cell)| !cell.is_revealed())
        );
    }

    #[test]
    fn reveal_numbered_cell_does_not_expand() {
        let mut board = example_board();

        assert_eq!(newly_revealed(board.reveal((6, 1)).unwrap()), [(6, 1)]);
        assert_eq!(display(&board, (6, 1)), Symbol::Count(1));
        assert_eq!(display(&board, (7, 0)), Symbol::Unexplored);
    }

    #[test]
    fn reveal_cascades_from_top_right_corner() {
        let mut board = example_board();
        assert_eq!(board.cell_at((7, 0)).unwrap().adjacent_mines(), 0);

        let revealed = newly_revealed(board.reveal((7, 0)).unwrap());

        assert!(revealed.len() > 1);
        assert_eq!(display(&board, (7, 0)), Symbol::Clear);
        assert_eq!(display(&board, (6, 1)), Symbol::Count(1));
        assert_eq!(display(&board, (7, 7)), Symbol::Unexplored);
        assert!(!board.cell_at((7, 7)).unwrap().is_revealed());
        assert!(revealed.iter().all(|&coords| !board.cell_at(coords).unwrap().has_mine()));
    }

    #[test]
    fn cascade_reveals_clear_region_and_its_rim() {
        let mut board = example_board();

        let revealed = newly_revealed(board.reveal((1, 6)).unwrap());
        let revealed_set: BTreeSet<_> = revealed.iter().copied().collect();

        // no position is reported twice
        assert_eq!(revealed_set.len(), revealed.len());
        assert!(revealed.len() <= 64);

        for (coords, cell) in board.iter_cells() {
            if cell.is_revealed() && cell.adjacent_mines() == 0 {
                for neighbor in board.iter_neighbors(coords) {
                    let neighbor_cell = board.cell_at(neighbor).unwrap();
                    assert!(neighbor_cell.has_mine() || neighbor_cell.is_revealed());
                }
            }
            assert_eq!(cell.is_revealed(), revealed_set.contains(&coords));
        }
    }

    #[test]
    fn clustered_mines_leave_one_clear_region() {
        let mut board = board(&[(4, 4), (4, 5), (5, 4), (5, 5)]);

        let revealed = newly_revealed(board.reveal((0, 0)).unwrap());

        assert_eq!(revealed.len(), 60);
        assert_eq!(display(&board, (3, 3)), Symbol::Count(1));
        assert_eq!(display(&board, (4, 3)), Symbol::Count(2));
        assert_eq!(display(&board, (4, 4)), Symbol::Unexplored);
    }

    #[test]
    fn second_reveal_reports_nothing_new() {
        let mut board = example_board();
        let first = newly_revealed(board.reveal((1, 6)).unwrap());

        let second = newly_revealed(board.reveal((1, 6)).unwrap());

        assert!(!first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn reveal_out_of_bounds_is_rejected() {
        let mut board = example_board();
        let before = board.clone();

        assert_eq!(board.reveal((8, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.flag((0, 9)), Err(GameError::OutOfBounds));
        assert_eq!(board, before);
    }

    #[test]
    fn flag_reports_mine_or_empty() {
        let mut board = example_board();

        assert_eq!(board.flag((5, 1)).unwrap(), FlagOutcome::FlaggedMine);
        assert_eq!(board.flag((5, 2)).unwrap(), FlagOutcome::FlaggedEmpty);
        assert_eq!(display(&board, (5, 1)), Symbol::Flagged);
        assert_eq!(display(&board, (5, 2)), Symbol::Flagged);
    }

    #[test]
    fn reflagging_is_idempotent() {
        let mut board = example_board();

        board.flag((3, 3)).unwrap();
        assert_eq!(board.flag((3, 3)).unwrap(), FlagOutcome::FlaggedMine);

        assert_eq!(board.flagged_count(), 1);
    }

    #[test]
    fn flagging_all_mines_flags_all_mines() {
        let mut board = example_board();

        for coords in [(0, 0), (7, 7), (3, 3)] {
            board.flag(coords).unwrap();
            assert!(!board.all_mines_flagged());
        }
        board.flag((5, 1)).unwrap();

        assert!(board.all_mines_flagged());
        assert!(!board.flags_exhausted());
    }
}
