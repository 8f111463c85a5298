// shapes.rs - Predefined patterns that can be stamped onto a grid

use serde::Deserialize;

/// A fixed pattern of live (`*`) and dead (space) cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    #[default]
    Point,
    Erase,
    Block,
    HorizontalBar,
    VerticalBar,
    GliderNe,
    GliderNw,
    GliderSe,
    GliderSw,
    RPentomino,
}

impl Shape {
    /// Every shape, in menu order.
    pub const ALL: [Shape; 10] = [
        Shape::Point,
        Shape::Erase,
        Shape::Block,
        Shape::HorizontalBar,
        Shape::VerticalBar,
        Shape::GliderNe,
        Shape::GliderNw,
        Shape::GliderSe,
        Shape::GliderSw,
        Shape::RPentomino,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Shape::Point         => "Point",
            Shape::Erase         => "Erase",
            Shape::Block         => "Block",
            Shape::HorizontalBar => "Horizontal bar",
            Shape::VerticalBar   => "Vertical bar",
            Shape::GliderNe      => "Glider NE",
            Shape::GliderNw      => "Glider NW",
            Shape::GliderSe      => "Glider SE",
            Shape::GliderSw      => "Glider SW",
            Shape::RPentomino    => "R-pentomino",
        }
    }

    /// Pattern rows, top to bottom. All rows have the same length.
    pub fn rows(self) -> &'static [&'static str] {
        match self {
            Shape::Point         => &["*"],
            Shape::Erase         => &[" "],
            Shape::Block         => &["**", "**"],
            Shape::HorizontalBar => &["***"],
            Shape::VerticalBar   => &["*", "*", "*"],
            Shape::GliderNe      => &["***", "  *", " * "],
            Shape::GliderNw      => &["***", "*  ", " * "],
            Shape::GliderSe      => &[" * ", "  *", "***"],
            Shape::GliderSw      => &[" * ", "*  ", "***"],
            Shape::RPentomino    => &[" **", "** ", " * "],
        }
    }

    pub fn width(self) -> usize {
        self.rows().first().map_or(0, |row| row.len())
    }

    pub fn height(self) -> usize {
        self.rows().len()
    }

    /// Number of live cells in the pattern.
    pub fn population(self) -> usize {
        self.rows()
            .iter()
            .map(|row| row.chars().filter(|&c| c == '*').count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn rows_are_rectangular() {
        for shape in Shape::ALL {
            let width = shape.width();
            assert!(width > 0, "{}", shape.name());
            assert!(shape.rows().iter().all(|row| row.len() == width), "{}", shape.name());
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Shape::ALL.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Shape::ALL.len());
    }

    #[test]
    fn stamped_population_matches_pattern() {
        for shape in Shape::ALL {
            let mut grid = Grid::new(9, 9).unwrap();
            grid.stamp_shape(4.0, 4.0, shape);
            assert_eq!(grid.population(), shape.population(), "{}", shape.name());
        }
    }

    #[test]
    fn every_glider_moves_diagonally() {
        let moves = [
            (Shape::GliderNe, 1.0, -1.0),
            (Shape::GliderNw, -1.0, -1.0),
            (Shape::GliderSe, 1.0, 1.0),
            (Shape::GliderSw, -1.0, 1.0),
        ];
        for (shape, dx, dy) in moves {
            let mut grid = Grid::new(15, 15).unwrap();
            grid.stamp_shape(7.0, 7.0, shape);
            for _ in 0..4 {
                assert!(!grid.step(), "{}", shape.name());
            }

            let mut expected = Grid::new(15, 15).unwrap();
            expected.stamp_shape(7.0 + dx, 7.0 + dy, shape);
            assert_eq!(grid, expected, "{}\n{grid}", shape.name());
        }
    }

    #[test]
    fn deserializes_from_kebab_case() {
        let shape: Shape = serde_yml::from_str("r-pentomino").unwrap();
        assert_eq!(shape, Shape::RPentomino);
        let shape: Shape = serde_yml::from_str("glider-se").unwrap();
        assert_eq!(shape, Shape::GliderSe);
    }
}
