//! Winning-line table for a square board.

use tracing::instrument;

/// A `(row, col)` board coordinate.
pub type Coord = (usize, usize);

/// An ordered run of coordinates checked together for a win.
pub type Line = Vec<Coord>;

/// Computes every winning line for an `size × size` board.
///
/// Lines come in table order: each row top to bottom, each column left to
/// right, then the main diagonal and the anti-diagonal. Win detection scans
/// in this order, so the first match here is the one reported.
///
/// The table holds `2 * size + 2` lines of `size` coordinates each. On a
/// 1×1 board every line is the single cell.
#[instrument]
pub fn winning_lines(size: usize) -> Vec<Line> {
    let rows = (0..size).map(|row| (0..size).map(|col| (row, col)).collect::<Line>());
    let columns = (0..size).map(|col| (0..size).map(|row| (row, col)).collect::<Line>());
    let main_diagonal: Line = (0..size).map(|i| (i, i)).collect();
    let anti_diagonal: Line = (0..size).map(|i| (i, size - 1 - i)).collect();

    rows.chain(columns)
        .chain([main_diagonal, anti_diagonal])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_by_three_table_order() {
        let lines = winning_lines(3);
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], vec![(0, 0), (0, 1), (0, 2)]);
        assert_eq!(lines[2], vec![(2, 0), (2, 1), (2, 2)]);
        assert_eq!(lines[3], vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(lines[5], vec![(0, 2), (1, 2), (2, 2)]);
        assert_eq!(lines[6], vec![(0, 0), (1, 1), (2, 2)]);
        assert_eq!(lines[7], vec![(0, 2), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_single_cell_board() {
        let lines = winning_lines(1);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| line == &vec![(0, 0)]));
    }
}
