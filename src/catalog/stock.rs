// src/catalog/stock.rs

use super::variant::stock_index;

/// Flat stock sequence for `sizes × colors` variants.
///
/// A cell is `None` until the user enters a value for it. The shape is always
/// `size_count × color_count`; when either dimension is zero the matrix is
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockMatrix {
    size_count: usize,
    color_count: usize,
    cells: Vec<Option<u32>>,
}

impl StockMatrix {
    pub fn new(size_count: usize, color_count: usize) -> Self {
        let (size_count, color_count) = if size_count == 0 || color_count == 0 {
            (0, 0)
        } else {
            (size_count, color_count)
        };
        Self {
            size_count,
            color_count,
            cells: vec![None; size_count * color_count],
        }
    }

    /// Builds a fully populated matrix from a row-major stock list
    pub fn from_values(size_count: usize, color_count: usize, values: &[u32]) -> Self {
        let mut matrix = Self::new(size_count, color_count);
        for (cell, value) in matrix.cells.iter_mut().zip(values) {
            *cell = Some(*value);
        }
        matrix
    }

    pub fn size_count(&self) -> usize {
        self.size_count
    }

    pub fn color_count(&self) -> usize {
        self.color_count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Option<u32>] {
        &self.cells
    }

    pub fn get(&self, size_index: usize, color_index: usize) -> Option<u32> {
        if size_index >= self.size_count || color_index >= self.color_count {
            return None;
        }
        self.cells[stock_index(size_index, color_index, self.color_count)]
    }

    /// Sets one cell; out-of-range coordinates are ignored
    pub fn set(&mut self, size_index: usize, color_index: usize, value: Option<u32>) {
        if size_index < self.size_count && color_index < self.color_count {
            let idx = stock_index(size_index, color_index, self.color_count);
            self.cells[idx] = value;
        }
    }

    pub fn set_flat(&mut self, index: usize, value: Option<u32>) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = value;
        }
    }

    /// Overwrites every cell with `value`. Zero leaves the matrix untouched.
    pub fn fill(&mut self, value: u32) -> bool {
        if value == 0 || self.cells.is_empty() {
            return false;
        }
        self.cells.iter_mut().for_each(|cell| *cell = Some(value));
        true
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Reshapes to `size_count × color_count`, carrying over cells whose
    /// coordinates `origin` maps back into the current shape
    pub fn reshape<F>(&mut self, size_count: usize, color_count: usize, origin: F)
    where
        F: Fn(usize, usize) -> Option<(usize, usize)>,
    {
        let mut next = Self::new(size_count, color_count);
        for i in 0..next.size_count {
            for j in 0..next.color_count {
                if let Some((oi, oj)) = origin(i, j) {
                    next.set(i, j, self.get(oi, oj));
                }
            }
        }
        *self = next;
    }

    /// Values in row-major order, `None` if any cell is missing
    pub fn values(&self) -> Option<Vec<u32>> {
        self.cells.iter().copied().collect()
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().map(|v| u64::from(*v)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_is_sizes_times_colors() {
        for s in 0..4 {
            for c in 0..4 {
                let matrix = StockMatrix::new(s, c);
                assert_eq!(matrix.len(), s * c);
            }
        }
    }

    #[test]
    fn test_zero_dimension_resets() {
        let mut matrix = StockMatrix::from_values(2, 2, &[1, 2, 3, 4]);
        matrix.reshape(0, 2, |i, j| Some((i, j)));
        assert!(matrix.is_empty());

        let mut matrix = StockMatrix::from_values(2, 2, &[1, 2, 3, 4]);
        matrix.reshape(2, 0, |i, j| Some((i, j)));
        assert!(matrix.is_empty());
        assert_eq!(matrix.color_count(), 0);
    }

    #[test]
    fn test_bulk_fill_overwrites_cell_edits() {
        let mut matrix = StockMatrix::new(2, 3);
        matrix.set(0, 1, Some(7));
        assert!(matrix.fill(5));
        assert_eq!(matrix.values(), Some(vec![5; 6]));

        assert!(!matrix.fill(0));
        assert_eq!(matrix.values(), Some(vec![5; 6]));
    }

    #[test]
    fn test_reshape_keeps_coordinates() {
        let mut matrix = StockMatrix::from_values(2, 2, &[10, 20, 30, 40]);
        // third color appended
        matrix.reshape(2, 3, |i, j| (j < 2).then_some((i, j)));
        assert_eq!(
            matrix.cells(),
            &[Some(10), Some(20), None, Some(30), Some(40), None]
        );
        assert_eq!(matrix.get(1, 1), Some(40));
    }

    #[test]
    fn test_values_require_every_cell() {
        let mut matrix = StockMatrix::new(1, 2);
        matrix.set_flat(0, Some(3));
        assert_eq!(matrix.values(), None);
        matrix.set_flat(1, Some(4));
        assert_eq!(matrix.values(), Some(vec![3, 4]));
        assert_eq!(matrix.total(), 7);
    }
}
