// grid.rs - Bounded grid state for Conway's Game of Life

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::codec;
use crate::shapes::Shape;

/// Errors raised when constructing a grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Width or height was zero.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// `width * height` cells can't be addressed in memory.
    #[error("grid of {width}x{height} cells is too large")]
    TooLarge {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
}

/// Number of cells in a `width` by `height` board, if such a board can exist.
pub fn cell_count(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::EmptyDimensions { width, height });
    }
    width
        .checked_mul(height)
        .filter(|&cells| isize::try_from(cells).is_ok())
        .ok_or(GridError::TooLarge { width, height })
}

/// Anything that can name a cell coordinate.
///
/// Integers map directly; floats are floored so that pointer-derived
/// positions land on the cell underneath them. `None` means the value
/// names no cell at all (NaN or an infinity).
pub trait ToCell: Copy {
    fn to_cell(self) -> Option<i64>;
}

impl ToCell for i64 {
    fn to_cell(self) -> Option<i64> {
        Some(self)
    }
}

impl ToCell for i32 {
    fn to_cell(self) -> Option<i64> {
        Some(i64::from(self))
    }
}

impl ToCell for isize {
    fn to_cell(self) -> Option<i64> {
        i64::try_from(self).ok()
    }
}

impl ToCell for usize {
    fn to_cell(self) -> Option<i64> {
        i64::try_from(self).ok()
    }
}

impl ToCell for f64 {
    fn to_cell(self) -> Option<i64> {
        // `as` saturates, and saturated values are off any real board.
        self.is_finite().then(|| self.floor() as i64)
    }
}

impl ToCell for f32 {
    fn to_cell(self) -> Option<i64> {
        f64::from(self).to_cell()
    }
}

/// Moore neighbourhood offsets.
const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// A fixed-size board of live/dead cells.
///
/// Cells are stored row-major in a flat buffer indexed by `x + y * width`.
/// Everything outside `[0, width) x [0, height)` is permanently dead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let cells = cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![false; cells],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat view of the cells, in `x + y * width` order.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Mutable flat view of the cells. The length can't change through it.
    pub fn cells_mut(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    /// Map a coordinate pair to a buffer index, if it lies on the board.
    fn index(&self, x: impl ToCell, y: impl ToCell) -> Option<usize> {
        let x = usize::try_from(x.to_cell()?).ok()?;
        let y = usize::try_from(y.to_cell()?).ok()?;
        (x < self.width && y < self.height).then(|| x + y * self.width)
    }

    /// Whether the cell at `(x, y)` is alive. Off-board cells are dead.
    pub fn get_state(&self, x: impl ToCell, y: impl ToCell) -> bool {
        self.index(x, y).is_some_and(|i| self.cells[i])
    }

    /// Set the cell at `(x, y)`. Off-board writes are ignored.
    pub fn set_state(&mut self, x: impl ToCell, y: impl ToCell, alive: bool) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = alive;
        }
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.contains(&true)
    }

    fn live_neighbours(&self, x: i64, y: i64) -> u8 {
        NEIGHBOURS
            .iter()
            .map(|&(dx, dy)| u8::from(self.get_state(x + dx, y + dy)))
            .sum()
    }

    /// Advance one generation.
    ///
    /// The next generation is computed into a fresh buffer from the current
    /// one and swapped in afterwards, so every neighbour count sees the
    /// pre-step board. Returns `true` when nothing changed.
    pub fn step(&mut self) -> bool {
        let mut next = vec![false; self.cells.len()];
        let mut stable = true;

        for (i, slot) in next.iter_mut().enumerate() {
            // Grid dimensions came from a Vec allocation, so they fit in i64.
            let x = (i % self.width) as i64;
            let y = (i / self.width) as i64;
            let alive = self.cells[i];

            let next_state = match (alive, self.live_neighbours(x, y)) {
                (true, 2) | (_, 3) => true, // Survival or birth
                _                  => false,
            };

            *slot = next_state;
            stable &= alive == next_state;
        }

        self.cells = next;
        stable
    }

    /// Overwrite a rectangle of cells with `shape`, centred on `(center_x, center_y)`.
    ///
    /// Even-sized shapes round down-left. Portions falling off the board are
    /// clipped.
    pub fn stamp_shape(&mut self, center_x: f64, center_y: f64, shape: Shape) {
        let x_offset = -((shape.width() as f64) - 1.0) / 2.0;
        let y_offset = -((shape.height() as f64) - 1.0) / 2.0;

        for (yy, row) in shape.rows().iter().enumerate() {
            for (xx, glyph) in row.chars().enumerate() {
                self.set_state(
                    center_x + xx as f64 + x_offset,
                    center_y + yy as f64 + y_offset,
                    glyph == '*',
                );
            }
        }
    }

    /// Hash of the cell buffer, for spotting repeated generations.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.cells.hash(&mut hasher);
        hasher.finish()
    }

    /// Encode the board with the run-length codec.
    pub fn save(&self) -> String {
        codec::encode(&self.cells)
    }

    /// Overwrite the board from an encoded string. Returns the number of
    /// cells written; cells past the decoded data keep their old value.
    pub fn restore(&mut self, encoded: &str) -> usize {
        codec::decode(encoded, &mut self.cells)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &alive in row {
                f.write_str(if alive { "*" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(width: usize, height: usize) -> Grid {
        Grid::new(width, height).unwrap()
    }

    fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
        let mut out = Vec::new();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if grid.get_state(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }

    #[test]
    fn new_grid_is_dead() {
        let g = grid(7, 5);
        assert_eq!(g.cells().len(), 35);
        assert!(g.is_empty());
        assert_eq!(g.population(), 0);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 4),
            Err(GridError::EmptyDimensions { width: 0, height: 4 })
        );
        assert!(Grid::new(3, 0).is_err());
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(1 << 33, 1 << 31),
            Err(GridError::TooLarge { width: 1 << 33, height: 1 << 31 })
        );
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(GridError::TooLarge { width: usize::MAX, height: 2 })
        );
        // Fits in usize but not in isize, so no Vec could hold it.
        assert!(matches!(cell_count(usize::MAX, 1), Err(GridError::TooLarge { .. })));
        assert_eq!(cell_count(7, 5), Ok(35));
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut g = grid(4, 3);
        g.set_state(3, 2, true);
        assert!(g.get_state(3, 2));
        assert!(g.cells()[3 + 2 * 4]);
        g.set_state(3, 2, false);
        assert!(!g.get_state(3, 2));
    }

    #[test]
    fn fractional_coordinates_are_floored() {
        let mut g = grid(4, 4);
        g.set_state(1.9, 2.2, true);
        assert!(g.get_state(1, 2));
        assert!(g.get_state(1.5_f32, 2.999_f32));
        // -0.5 floors to -1, which is off the board.
        g.set_state(-0.5, 0.0, true);
        assert_eq!(g.population(), 1);
    }

    #[test]
    fn off_board_writes_are_ignored() {
        let mut g = grid(3, 3);
        g.set_state(-1, 0, true);
        g.set_state(3, 0, true);
        g.set_state(0, 3, true);
        g.set_state(f64::NAN, 1.0, true);
        g.set_state(f64::INFINITY, 1.0, true);
        assert!(g.is_empty());
    }

    #[test]
    fn block_is_still_life() {
        let mut g = grid(6, 6);
        g.stamp_shape(2.0, 2.0, Shape::Block);
        let before = g.clone();
        assert!(g.step());
        assert_eq!(g, before);
    }

    #[test]
    fn blinker_oscillates() {
        let mut g = grid(5, 5);
        g.stamp_shape(2.0, 2.0, Shape::HorizontalBar);
        assert!(!g.step());
        assert_eq!(live_cells(&g), vec![(2, 1), (2, 2), (2, 3)]);
        assert!(!g.step());
        assert_eq!(live_cells(&g), vec![(1, 2), (2, 2), (3, 2)]);
    }

    #[test]
    fn glider_translates_diagonally() {
        let mut g = grid(12, 12);
        g.stamp_shape(4.0, 4.0, Shape::GliderSe);
        for _ in 0..4 {
            assert!(!g.step());
        }

        let mut expected = grid(12, 12);
        expected.stamp_shape(5.0, 5.0, Shape::GliderSe);
        assert_eq!(g, expected, "\n{g}\n{expected}");
    }

    #[test]
    fn cleared_grid_is_stable() {
        let mut g = grid(8, 8);
        g.stamp_shape(4.0, 4.0, Shape::RPentomino);
        g.clear();
        assert!(g.is_empty());
        assert!(g.step());
    }

    #[test]
    fn corners_see_dead_border() {
        // A full 2x2 board is a block; nothing wraps around.
        let mut g = grid(2, 2);
        g.cells_mut().fill(true);
        assert!(g.step());
        assert_eq!(g.population(), 4);

        // A lone corner cell dies.
        let mut g = grid(3, 3);
        g.set_state(0, 0, true);
        assert!(!g.step());
        assert!(g.is_empty());
    }

    #[test]
    fn update_is_simultaneous() {
        // Row-major in-place updating would let the first born cell feed
        // the next count. Three in a row must become a vertical bar only.
        let mut g = grid(3, 3);
        g.set_state(0, 1, true);
        g.set_state(1, 1, true);
        g.set_state(2, 1, true);
        g.step();
        assert_eq!(live_cells(&g), vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn even_shapes_round_down_left() {
        let mut g = grid(6, 6);
        g.stamp_shape(3.0, 3.0, Shape::Block);
        assert_eq!(live_cells(&g), vec![(2, 2), (3, 2), (2, 3), (3, 3)]);
    }

    #[test]
    fn stamping_clips_at_edges() {
        let mut g = grid(4, 4);
        g.stamp_shape(0.0, 0.0, Shape::RPentomino);
        // Only the left column of the lower two rows lands on the board.
        assert_eq!(live_cells(&g), vec![(0, 0), (0, 1)]);
    }

    #[test]
    fn erase_shape_kills_a_cell() {
        let mut g = grid(4, 4);
        g.set_state(1, 1, true);
        g.stamp_shape(1.3, 1.7, Shape::Erase);
        assert!(g.is_empty());
    }

    #[test]
    fn display_draws_rows() {
        let mut g = grid(3, 2);
        g.set_state(1, 0, true);
        assert_eq!(g.to_string(), ".*.\n...\n");
    }

    #[test]
    fn save_then_restore() {
        let mut g = grid(16, 16);
        g.stamp_shape(8.0, 8.0, Shape::RPentomino);
        let encoded = g.save();

        let mut copy = grid(16, 16);
        assert_eq!(copy.restore(&encoded), 256);
        assert_eq!(copy, g);
    }

    proptest! {
        #[test]
        fn off_board_reads_are_dead(
            width in 1usize..20,
            height in 1usize..20,
            x in -50i64..50,
            y in -50i64..50,
        ) {
            let mut g = grid(width, height);
            g.cells_mut().fill(true);
            let on_board = x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height;
            prop_assert_eq!(g.get_state(x, y), on_board);
        }
    }
}
