//! Repair of rows whose cell count does not match the header.

use std::cmp::Ordering;

/// Separator used when re-joining the fragments of an overflowing column.
const OVERFLOW_JOIN: &str = ", ";

/// Normalizes a split line to exactly `header.len()` cells.
///
/// - Rows of the right width are returned unchanged.
/// - Short rows are padded on the right with empty cells.
/// - Long rows are assumed to have overflowed inside the second column (a
///   free-text category holding unescaped delimiters). The last
///   `header.len() - 2` cells are kept as the trailing columns, the first cell
///   is kept as is, and everything in between is joined with `", "` to rebuild
///   the second column.
///
/// The overflow repair is a heuristic: when the extra delimiters are in any
/// other column the merge is wrong and nothing reports it.
pub fn normalize_row(mut cells: Vec<String>, header: &[String]) -> Vec<String> {
    let expected = header.len();
    match cells.len().cmp(&expected) {
        Ordering::Equal => cells,
        Ordering::Less => {
            cells.resize(expected, String::new());
            cells
        }
        Ordering::Greater => merge_overflow(cells, expected),
    }
}

fn merge_overflow(mut cells: Vec<String>, expected: usize) -> Vec<String> {
    // No second column to merge into; keep the width.
    if expected < 2 {
        cells.truncate(expected);
        return cells;
    }

    let tail_len = expected - 2;
    let tail = cells.split_off(cells.len() - tail_len);
    let merged = cells[1..].join(OVERFLOW_JOIN);
    cells.truncate(1);
    cells.push(merged);
    cells.extend(tail);
    cells
}
