// src/core/qubit.rs

use std::fmt;

/// A two-level unit addressed by its position on a 2-D grid.
///
/// Qubits order by row, then column. That order fixes their position in the
/// simulator's state vector: the smallest qubit is the most significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridQubit {
    row: i32,
    col: i32,
}

impl GridQubit {
    /// Creates the qubit at `(row, col)`.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }
}

impl fmt::Display for GridQubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_grid_coordinate() {
        assert_eq!(GridQubit::new(0, 0).to_string(), "(0, 0)");
        assert_eq!(GridQubit::new(-1, 3).to_string(), "(-1, 3)");
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut qubits = vec![GridQubit::new(1, 0), GridQubit::new(0, 2), GridQubit::new(0, 1)];
        qubits.sort();
        assert_eq!(qubits, vec![GridQubit::new(0, 1), GridQubit::new(0, 2), GridQubit::new(1, 0)]);
    }
}
