use crate::simulation::cell::Cell;

/// Ping-pong cell buffers for the wave grid.
///
/// Reads only ever see the previous step's settled state; the back buffer is
/// written in full and then the roles swap.
#[derive(Clone, Debug)]
pub struct Grid {
    /// Buffer A - ping
    buffer_a: Vec<Cell>,
    /// Buffer B - pong
    buffer_b: Vec<Cell>,
    /// Which buffer holds the current state (true = A)
    read_from_a: bool,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid with every cell at rest
    pub fn new(width: usize, height: usize) -> Self {
        let cell_count = width * height;
        Self {
            buffer_a: vec![Cell::ZERO; cell_count],
            buffer_b: vec![Cell::ZERO; cell_count],
            read_from_a: true,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Current (last settled) state
    pub fn current(&self) -> &[Cell] {
        if self.read_from_a {
            &self.buffer_a
        } else {
            &self.buffer_b
        }
    }

    /// Mutable view of the current state, for impulses between steps
    pub fn current_mut(&mut self) -> &mut [Cell] {
        if self.read_from_a {
            &mut self.buffer_a
        } else {
            &mut self.buffer_b
        }
    }

    /// (previous, next) for one step: read the settled state, write the back buffer
    pub fn io_buffers(&mut self) -> (&[Cell], &mut [Cell]) {
        if self.read_from_a {
            (&self.buffer_a, &mut self.buffer_b)
        } else {
            (&self.buffer_b, &mut self.buffer_a)
        }
    }

    /// Swap roles after the back buffer has been written
    pub fn swap(&mut self) {
        self.read_from_a = !self.read_from_a;
    }

    /// Cell at `(x, y)` of the current state, `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.current().get(self.index(x, y))
        } else {
            None
        }
    }

    /// Previous-state pressure with out-of-range reads returning 0
    #[inline]
    pub fn pressure_or_zero(cells: &[Cell], width: usize, height: usize, x: isize, y: isize) -> f64 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0.0
        } else {
            cells[y as usize * width + x as usize].pressure
        }
    }

    /// Put every cell in both buffers back at rest
    pub fn clear(&mut self) {
        self.buffer_a.fill(Cell::ZERO);
        self.buffer_b.fill(Cell::ZERO);
        self.read_from_a = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(100, 100);
        assert_eq!(grid.len(), 10000);
        assert!(grid.current().iter().all(Cell::is_at_rest));
    }

    #[test]
    fn test_swap_exchanges_roles() {
        let mut grid = Grid::new(2, 2);
        {
            let (_, next) = grid.io_buffers();
            next[3].pressure = 1.0;
        }
        assert_eq!(grid.current()[3].pressure, 0.0);

        grid.swap();
        assert_eq!(grid.current()[3].pressure, 1.0);

        let (previous, next) = grid.io_buffers();
        assert_eq!(previous[3].pressure, 1.0);
        assert_eq!(next[3].pressure, 0.0);
    }

    #[test]
    fn test_out_of_range_reads_zero() {
        let mut grid = Grid::new(3, 3);
        grid.current_mut().iter_mut().for_each(|c| c.pressure = 2.0);
        let cells = grid.current();
        assert_eq!(Grid::pressure_or_zero(cells, 3, 3, -1, 0), 0.0);
        assert_eq!(Grid::pressure_or_zero(cells, 3, 3, 0, 3), 0.0);
        assert_eq!(Grid::pressure_or_zero(cells, 3, 3, 2, 2), 2.0);
    }

    #[test]
    fn test_get_bounds() {
        let grid = Grid::new(4, 2);
        assert!(grid.get(3, 1).is_some());
        assert!(grid.get(4, 0).is_none());
        assert!(grid.get(0, 2).is_none());
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::new(2, 2);
        grid.current_mut()[0].velocity = 1.0;
        grid.swap();
        grid.clear();
        assert!(grid.current().iter().all(Cell::is_at_rest));
    }
}
