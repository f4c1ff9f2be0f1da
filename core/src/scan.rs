use serde::{Deserialize, Serialize};

use crate::*;

/// Distance from the focus to the edge of the scan window.
pub const SCAN_RADIUS: i8 = 2;
/// Side length of the square scan window.
pub const SCAN_SIDE: usize = 5;
/// Number of slots in a scan window.
pub const SCAN_CELLS: usize = SCAN_SIDE * SCAN_SIDE;

/// Slot labels in enumeration order. The first letter is the row (`dy`), the second the column
/// (`dx`), both counting `a..=e` for offsets `-2..=2`.
pub const SCAN_SLOTS: [&str; SCAN_CELLS] = [
    "aa", "ab", "ac", "ad", "ae", //
    "ba", "bb", "bc", "bd", "be", //
    "ca", "cb", "cc", "cd", "ce", //
    "da", "db", "dc", "dd", "de", //
    "ea", "eb", "ec", "ed", "ee",
];

/// Offset of slot `index` from the focus, as `(dx, dy)`.
pub const fn slot_offset(index: usize) -> Offset {
    let dx = (index % SCAN_SIDE) as i8 - SCAN_RADIUS;
    let dy = (index / SCAN_SIDE) as i8 - SCAN_RADIUS;
    (dx, dy)
}

/// Read-only 5×5 view of display symbols centered on a focus cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWindow {
    focus: Coord2,
    symbols: [Symbol; SCAN_CELLS],
}

impl ScanWindow {
    pub fn focus(&self) -> Coord2 {
        self.focus
    }

    /// Symbols in row-major order, offsets `(-2, -2)` through `(2, 2)`.
    pub fn symbols(&self) -> &[Symbol; SCAN_CELLS] {
        &self.symbols
    }

    /// Symbol at offset `(dx, dy)` from the focus, if the offset lies inside the window.
    pub fn get(&self, (dx, dy): Offset) -> Option<Symbol> {
        if !(-SCAN_RADIUS..=SCAN_RADIUS).contains(&dx) || !(-SCAN_RADIUS..=SCAN_RADIUS).contains(&dy)
        {
            return None;
        }
        let index = (dy + SCAN_RADIUS) as usize * SCAN_SIDE + (dx + SCAN_RADIUS) as usize;
        Some(self.symbols[index])
    }

    pub fn center(&self) -> Symbol {
        self.symbols[SCAN_CELLS / 2]
    }

    /// Pairs every slot label with its symbol, in enumeration order.
    pub fn slots(&self) -> impl Iterator<Item = (&'static str, Symbol)> + '_ {
        SCAN_SLOTS.iter().copied().zip(self.symbols.iter().copied())
    }
}

impl Board {
    /// Scans the 5×5 neighborhood of `focus`. Slots off the board read [`Symbol::Outside`].
    pub fn scan(&self, focus: Coord2) -> Result<ScanWindow> {
        let focus = self.validate_coords(focus)?;

        let mut symbols = [Symbol::Outside; SCAN_CELLS];
        for (index, symbol) in symbols.iter_mut().enumerate() {
            if let Some(coords) = offset_within(focus, slot_offset(index), self.size()) {
                *symbol = self.cell_at(coords)?.display();
            }
        }

        log::trace!("Scanned around {:?}", focus);
        Ok(ScanWindow { focus, symbols })
    }
}
