use std::fmt::Write;
use tilesweep_core::*;

const fn digit(count: u8) -> char {
    (b'0' + count) as char
}

pub(crate) const fn board_glyph(cell: BoardCell) -> char {
    match cell {
        BoardCell::Mine => 'M',
        BoardCell::Count(count) => digit(count),
    }
}

pub(crate) const fn visible_glyph(cell: VisibleCell) -> char {
    match cell {
        VisibleCell::Hidden => '*',
        VisibleCell::Revealed(count) => digit(count),
    }
}

pub(crate) fn visibility(mask: &VisibilityMask) -> String {
    grid(mask.dim(), mask.iter().map(visible_glyph))
}

pub(crate) fn board(board: &Board) -> String {
    grid(board.dim(), board.iter().map(board_glyph))
}

/// Row-major glyphs laid out with row and column labels, so a cell can be
/// typed back in as `row col`.
fn grid(dim: Coord, mut glyphs: impl Iterator<Item = char>) -> String {
    let mut out = String::from("   ");
    for col in 0..dim {
        let _ = write!(out, "{col:^3}");
    }
    out.push('\n');

    for row in 0..dim {
        let _ = write!(out, "{row:>2} ");
        for _ in 0..dim {
            let _ = write!(out, "[{}]", glyphs.next().unwrap_or(' '));
        }
        out.push('\n');
    }
    out
}
