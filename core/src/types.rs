/// Single coordinate axis, used for the grid dimension and for rows/columns.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Row-major linear position of a cell, `row * dim + col`.
pub type CellIndex = usize;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Splits a linear index into `(row, col)` on a `dim x dim` grid.
///
/// Callers must have validated `index < dim * dim`.
pub const fn coords_of(index: CellIndex, dim: Coord) -> Coord2 {
    let dim = dim as usize;
    ((index / dim) as Coord, (index % dim) as Coord)
}

pub const fn index_of((row, col): Coord2, dim: Coord) -> CellIndex {
    row as usize * dim as usize + col as usize
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains inside the grid.
fn apply_delta(coords: Coord2, delta: (isize, isize), dim: Coord) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= dim {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= dim {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the linear indices of the up-to-8 neighbours of a cell.
///
/// Offsets are applied on `(row, col)` rather than on the linear index, so a
/// cell on the last column never sees the first column of the next row.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    dim: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: CellIndex, dim: Coord) -> Self {
        Self {
            center: coords_of(center, dim),
            dim,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.dim);
            self.index += 1;

            if let Some(coords) = next_item {
                return Some(index_of(coords, self.dim));
            }
        }
    }
}
