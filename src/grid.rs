//! Square grid layout for string collections
//!
//! Strings are padded with empty placeholders to the next perfect square,
//! stably sorted by length and reshaped row-major into a `dim × dim` grid.

use log::debug;

/// Side length of the smallest square holding `n` cells
///
/// Integer-only `ceil(sqrt(n))`.
pub fn padded_dim(n: usize) -> usize {
    // Binary search for the first d with d*d >= n
    let (mut lo, mut hi) = (0usize, n.min(1 << (usize::BITS / 2)));
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if mid * mid >= n {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    lo
}

/// Displayed length of a string, in characters
#[inline]
pub fn display_len(s: &str) -> usize {
    s.chars().count()
}

/// A square grid of strings, shortest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dim: usize,
    cells: Vec<Vec<Option<String>>>,
}

impl Grid {
    /// Lay out a copy of `strings`; the caller's collection is not modified
    pub fn from_strings<S: AsRef<str>>(strings: &[S]) -> Self {
        let mut padded: Vec<String> = strings.iter().map(|s| s.as_ref().to_string()).collect();

        let dim = padded_dim(padded.len());
        let padding = dim * dim - padded.len();
        padded.resize(dim * dim, String::new());

        // Stable: equal-length strings keep their input order
        padded.sort_by_key(|s| display_len(s));

        let cells = (0..dim)
            .map(|row| {
                (0..dim)
                    .map(|col| padded.get(row * dim + col).cloned())
                    .collect()
            })
            .collect();

        debug!(
            "Grid {}x{} from {} strings ({} padding cells)",
            dim,
            dim,
            strings.len(),
            padding
        );

        Self { dim, cells }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col)?.as_deref()
    }

    /// Length of each cell's string; absent cells have no value
    pub fn lengths(&self) -> Vec<Vec<Option<usize>>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|c| c.as_deref().map(display_len)).collect())
            .collect()
    }

    /// Smallest and largest populated length, if any cell is populated
    pub fn length_range(&self) -> Option<(usize, usize)> {
        self.lengths()
            .into_iter()
            .flatten()
            .flatten()
            .fold(None, |acc, len| match acc {
                None => Some((len, len)),
                Some((lo, hi)) => Some((lo.min(len), hi.max(len))),
            })
    }

    /// Cells in row-major order
    pub fn flattened(&self) -> impl Iterator<Item = Option<&str>> {
        self.cells.iter().flat_map(|row| row.iter().map(|c| c.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_dim() {
        assert_eq!(padded_dim(0), 0);
        assert_eq!(padded_dim(1), 1);
        assert_eq!(padded_dim(2), 2);
        assert_eq!(padded_dim(4), 2);
        assert_eq!(padded_dim(5), 3);
        assert_eq!(padded_dim(9), 3);
        assert_eq!(padded_dim(10), 4);
        assert_eq!(padded_dim(1_000_000), 1000);
        assert_eq!(padded_dim(1_000_001), 1001);
    }

    #[test]
    fn test_perfect_square_needs_no_padding() {
        let strings = ["dddd", "ccc", "bb", "a"];
        let grid = Grid::from_strings(&strings);

        assert_eq!(grid.dim(), 2);
        let order: Vec<_> = grid.flattened().collect();
        assert_eq!(order, vec![Some("a"), Some("bb"), Some("ccc"), Some("dddd")]);
    }

    #[test]
    fn test_three_items_get_one_placeholder() {
        let strings = vec!["ab".to_string(), "c".to_string(), "def".to_string()];
        let grid = Grid::from_strings(&strings);

        assert_eq!(grid.dim(), 2);
        assert_eq!(grid.cell(0, 0), Some(""));
        assert_eq!(grid.cell(0, 1), Some("c"));
        assert_eq!(grid.cell(1, 0), Some("ab"));
        assert_eq!(grid.cell(1, 1), Some("def"));

        // Caller's list is untouched
        assert_eq!(strings.len(), 3);
    }

    #[test]
    fn test_sort_is_stable() {
        let grid = Grid::from_strings(&["b", "a", "dd", "cc"]);
        let order: Vec<_> = grid.flattened().collect();

        assert_eq!(order, vec![Some("b"), Some("a"), Some("dd"), Some("cc")]);
    }

    #[test]
    fn test_lengths() {
        let grid = Grid::from_strings(&["héé", "x", "yz"]);

        assert_eq!(
            grid.lengths(),
            vec![vec![Some(0), Some(1)], vec![Some(2), Some(3)]]
        );
        assert_eq!(grid.length_range(), Some((0, 3)));
    }

    #[test]
    fn test_empty_input_is_zero_size() {
        let strings: Vec<String> = Vec::new();
        let grid = Grid::from_strings(&strings);

        assert!(grid.is_empty());
        assert!(grid.rows().is_empty());
        assert_eq!(grid.length_range(), None);
        assert_eq!(grid.cell(0, 0), None);
    }

    #[test]
    fn test_single_item() {
        let grid = Grid::from_strings(&["only"]);

        assert_eq!(grid.dim(), 1);
        assert_eq!(grid.cell(0, 0), Some("only"));
    }
}
