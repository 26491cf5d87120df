//! Assignment result type shared by both LAP solvers and the Murty
//! enumerator.

/// A row-to-column assignment together with its total cost.
///
/// `mapping[row]` holds the column assigned to `row`, or `None` when
/// the row could only be paired with a forbidden entry and is left
/// unassigned. Each column appears at most once across the mapping.
/// The cost is the sum of the matrix entries of the assigned pairs;
/// unassigned rows contribute nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column assigned to each row, in row order.
    pub mapping: Vec<Option<usize>>,
    /// Total cost over the assigned pairs.
    pub cost: f64,
}

impl Assignment {
    pub fn new(mapping: Vec<Option<usize>>, cost: f64) -> Self {
        Self { mapping, cost }
    }

    /// Number of rows that received a column.
    pub fn num_assigned(&self) -> usize {
        self.mapping.iter().filter(|col| col.is_some()).count()
    }

    /// True when every row received a column.
    pub fn is_complete(&self) -> bool {
        self.mapping.iter().all(|col| col.is_some())
    }

    /// Iterator over the assigned `(row, col)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mapping
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|c| (row, c)))
    }
}
