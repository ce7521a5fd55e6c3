use tilesweep_core::*;

/// Parses a cell either as a linear index (`7`) or as `row col` (`2 1`,
/// `2,1`). Anything off the `dim x dim` grid is rejected here so the core
/// never sees an out-of-range index.
pub(crate) fn parse_cell(line: &str, dim: Coord) -> Option<CellIndex> {
    let dim = usize::from(dim);
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse::<usize>);

    let index = match (parts.next()?, parts.next(), parts.next()) {
        (Ok(index), None, None) => index,
        (Ok(row), Some(Ok(col)), None) if row < dim && col < dim => row * dim + col,
        _ => return None,
    };

    (index < dim * dim).then_some(index)
}
