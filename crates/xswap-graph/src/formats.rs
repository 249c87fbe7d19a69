use serde::{Deserialize, Serialize};
use xswap_core::errors::{ErrorInfo, XswapError};
use xswap_core::{Edge, NodeId};

/// Dense row-major (bi)adjacency matrix of edge counts.
///
/// Row `i` is source node `i` and column `j` is target node `j`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMatrix {
    rows: usize,
    cols: usize,
    counts: Vec<u32>,
}

impl AdjacencyMatrix {
    /// Creates an all-zero matrix with the given `(rows, cols)` shape.
    ///
    /// Fails with [`XswapError::Input`] when the cell count does not fit in `usize`.
    pub fn zeros(shape: (usize, usize)) -> Result<Self, XswapError> {
        let (rows, cols) = shape;
        let cells = Self::cell_count(shape)?;
        Ok(Self {
            rows,
            cols,
            counts: vec![0; cells],
        })
    }

    /// Number of cells of a `(rows, cols)` matrix.
    pub fn cell_count(shape: (usize, usize)) -> Result<usize, XswapError> {
        shape.0.checked_mul(shape.1).ok_or_else(|| {
            XswapError::Input(
                ErrorInfo::new("shape-too-large", "matrix cell count overflows usize")
                    .with_context("rows", shape.0)
                    .with_context("cols", shape.1),
            )
        })
    }

    /// Builds the matrix of an edge list.
    ///
    /// With `add_reverse_edges` the matrix is symmetrised and clamped to 0/1, so `(1, 0)`
    /// marks both `[1, 0]` and `[0, 1]`. That requires a square shape.
    pub fn from_edges(
        edges: &[Edge],
        add_reverse_edges: bool,
        shape: (usize, usize),
    ) -> Result<Self, XswapError> {
        let mut matrix = Self::zeros(shape)?;
        if add_reverse_edges && matrix.rows != matrix.cols {
            return Err(XswapError::Input(
                ErrorInfo::new(
                    "non-square-shape",
                    "reverse edges can only be added to a square matrix",
                )
                .with_context("rows", matrix.rows)
                .with_context("cols", matrix.cols),
            ));
        }
        for edge in edges {
            let slot = matrix.slot(edge)?;
            matrix.counts[slot] += 1;
        }
        if add_reverse_edges {
            let n = matrix.rows;
            for row in 0..n {
                for col in row..n {
                    let present = matrix.counts[row * n + col] + matrix.counts[col * n + row] > 0;
                    matrix.counts[row * n + col] = u32::from(present);
                    matrix.counts[col * n + row] = u32::from(present);
                }
            }
        }
        Ok(matrix)
    }

    /// Shape as `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Count stored at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.counts[row * self.cols + col]
    }

    /// Row-major view of all counts.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Sum of every row (source degrees for a 0/1 matrix).
    pub fn row_sums(&self) -> Vec<u64> {
        if self.cols == 0 {
            return vec![0; self.rows];
        }
        self.counts
            .chunks(self.cols)
            .map(|row| row.iter().map(|&value| u64::from(value)).sum())
            .collect()
    }

    /// Sum of every column (target degrees for a 0/1 matrix).
    pub fn col_sums(&self) -> Vec<u64> {
        let mut sums = vec![0u64; self.cols];
        for (slot, &value) in self.counts.iter().enumerate() {
            sums[slot % self.cols] += u64::from(value);
        }
        sums
    }

    /// Adds `other` cell by cell.
    pub fn accumulate(&mut self, other: &AdjacencyMatrix) -> Result<(), XswapError> {
        if self.shape() != other.shape() {
            return Err(XswapError::Input(
                ErrorInfo::new("shape-mismatch", "matrices must share a shape")
                    .with_context("left", format!("{:?}", self.shape()))
                    .with_context("right", format!("{:?}", other.shape())),
            ));
        }
        for (cell, value) in self.counts.iter_mut().zip(&other.counts) {
            *cell += value;
        }
        Ok(())
    }

    /// Lists the non-zero cells as edges in row-major order.
    ///
    /// Without `include_reverse_edges` only cells with `row <= col` are returned, which
    /// recovers the original edges of a symmetrised matrix.
    pub fn to_edges(&self, include_reverse_edges: bool) -> Vec<Edge> {
        let mut edges = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                if self.get(row, col) == 0 || (!include_reverse_edges && row > col) {
                    continue;
                }
                edges.push(Edge::new(row as NodeId, col as NodeId));
            }
        }
        edges
    }

    fn slot(&self, edge: &Edge) -> Result<usize, XswapError> {
        let row = edge.source as usize;
        let col = edge.target as usize;
        if row >= self.rows || col >= self.cols {
            return Err(XswapError::Input(
                ErrorInfo::new("edge-outside-shape", "edge does not fit in the matrix shape")
                    .with_context("edge", edge)
                    .with_context("rows", self.rows)
                    .with_context("cols", self.cols),
            ));
        }
        Ok(row * self.cols + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xswap_core::edges_from_pairs;

    #[test]
    fn symmetrised_matrix_round_trips_upper_triangle() {
        let edges = edges_from_pairs(&[(0, 1), (1, 2), (2, 2)]);
        let matrix = AdjacencyMatrix::from_edges(&edges, true, (3, 3)).unwrap();
        assert_eq!(matrix.get(1, 0), 1);
        assert_eq!(matrix.get(2, 1), 1);
        assert_eq!(matrix.get(2, 2), 1);
        assert_eq!(matrix.to_edges(false), edges);
        assert_eq!(matrix.to_edges(true).len(), 5);
    }

    #[test]
    fn biadjacency_keeps_direction() {
        let edges = edges_from_pairs(&[(0, 2), (1, 0), (1, 2)]);
        let matrix = AdjacencyMatrix::from_edges(&edges, false, (2, 3)).unwrap();
        assert_eq!(matrix.row_sums(), vec![1, 2]);
        assert_eq!(matrix.col_sums(), vec![1, 0, 2]);
        assert_eq!(matrix.to_edges(true), edges);
    }

    #[test]
    fn edges_outside_shape_are_rejected() {
        let err = AdjacencyMatrix::from_edges(&edges_from_pairs(&[(0, 3)]), false, (2, 3))
            .unwrap_err();
        assert_eq!(err.info().code, "edge-outside-shape");
        let err = AdjacencyMatrix::from_edges(&[], true, (2, 3)).unwrap_err();
        assert_eq!(err.info().code, "non-square-shape");
    }

    #[test]
    fn accumulate_adds_counts() {
        let a = AdjacencyMatrix::from_edges(&edges_from_pairs(&[(0, 1)]), false, (2, 2)).unwrap();
        let mut total = AdjacencyMatrix::zeros((2, 2)).unwrap();
        total.accumulate(&a).unwrap();
        total.accumulate(&a).unwrap();
        assert_eq!(total.get(0, 1), 2);
        assert!(total
            .accumulate(&AdjacencyMatrix::zeros((1, 2)).unwrap())
            .is_err());
    }

    #[test]
    fn overflowing_shape_is_an_input_error() {
        let err = AdjacencyMatrix::zeros((usize::MAX / 2, 4)).unwrap_err();
        assert_eq!(err.info().code, "shape-too-large");
        let err = AdjacencyMatrix::from_edges(&[], false, (usize::MAX, 2)).unwrap_err();
        assert_eq!(err.info().code, "shape-too-large");
    }
}
