use core::slice;

/// Position along one board axis.
pub type Coord = u8;

/// Number of cells or mines on a board.
pub type CellCount = u16;

/// Board position `(x, y)`, `x` growing rightwards and `y` downwards.
pub type Coord2 = (Coord, Coord);

/// Signed step `(dx, dy)` between two positions.
pub type Offset = (i8, i8);

pub trait ToNdIndex {
    fn to_nd_index(self) -> [usize; 2];
}

impl ToNdIndex for Coord2 {
    fn to_nd_index(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

/// Offsets of the eight cells touching a position, row by row.
pub const NEIGHBOR_OFFSETS: [Offset; 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Moves `coords` by `offset`, or `None` if that leaves a board of size `bounds`.
pub fn offset_within(coords: Coord2, (dx, dy): Offset, bounds: Coord2) -> Option<Coord2> {
    let x = coords.0.checked_add_signed(dx).filter(|&x| x < bounds.0)?;
    let y = coords.1.checked_add_signed(dy).filter(|&y| y < bounds.1)?;
    Some((x, y))
}

/// In-bounds neighbors of a position. Edges clip, nothing wraps around.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    offsets: slice::Iter<'static, Offset>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            offsets: NEIGHBOR_OFFSETS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, bounds) = (self.center, self.bounds);
        self.offsets
            .find_map(|&offset| offset_within(center, offset, bounds))
    }
}
