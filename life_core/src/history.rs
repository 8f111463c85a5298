// history.rs - Recent-generation fingerprints for spotting oscillators

use crate::grid::Grid;

/// How many past generations are remembered.
pub const HISTORY_LEN: usize = 10;

/// Ring buffer of grid fingerprints.
///
/// A fixed point is already reported by [`Grid::step`]; this catches the
/// short-period oscillators (blinkers, toads, pulsars) that never settle.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    history: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `grid` and report whether it matches one of the last
    /// [`HISTORY_LEN`] generations seen.
    pub fn observe(&mut self, grid: &Grid) -> bool {
        let hash = grid.fingerprint();
        let filled = self.count.min(HISTORY_LEN);
        if self.history[..filled].contains(&hash) {
            return true;
        }
        self.history[self.count % HISTORY_LEN] = hash;
        self.count += 1;
        false
    }

    /// Forget everything, e.g. after the grid is edited.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Shape;

    #[test]
    fn blinker_is_caught_after_one_period() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.stamp_shape(2.0, 2.0, Shape::VerticalBar);
        let mut detector = CycleDetector::new();

        assert!(!detector.observe(&grid));
        grid.step();
        assert!(!detector.observe(&grid));
        grid.step();
        assert!(detector.observe(&grid));
    }

    #[test]
    fn glider_does_not_repeat() {
        let mut grid = Grid::new(40, 40).unwrap();
        grid.stamp_shape(5.0, 5.0, Shape::GliderSe);
        let mut detector = CycleDetector::new();
        for _ in 0..30 {
            assert!(!detector.observe(&grid));
            grid.step();
        }
    }

    #[test]
    fn empty_history_does_not_match_zero_hash_slots() {
        // Unfilled slots must not count as remembered generations.
        let grid = Grid::new(3, 3).unwrap();
        let mut detector = CycleDetector::new();
        assert!(!detector.observe(&grid));
    }

    #[test]
    fn reset_forgets_history() {
        let grid = Grid::new(3, 3).unwrap();
        let mut detector = CycleDetector::new();
        detector.observe(&grid);
        detector.reset();
        assert!(!detector.observe(&grid));
    }
}
