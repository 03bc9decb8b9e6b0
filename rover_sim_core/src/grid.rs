use std::collections::HashSet;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// The bounded plane the rover drives on.
///
/// Stores the dimensions and the set of obstacle cells. A grid is built once
/// from the mission inputs and never mutated afterwards; rovers only hold a
/// shared reference to it.
///
/// Valid cells satisfy `0 <= x < width` and `0 <= y < height`. Zero or
/// negative dimensions are accepted but produce a grid with no valid cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    obstacles: HashSet<Coordinate>,
}

impl Grid {
    /// Creates a grid with the given dimensions and obstacle cells.
    ///
    /// Duplicate obstacles are collapsed.
    pub fn new<I>(width: i32, height: i32, obstacles: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let obstacles: HashSet<Coordinate> = obstacles.into_iter().collect();
        let outside = obstacles
            .iter()
            .filter(|c| !(0..width).contains(&c.x) || !(0..height).contains(&c.y))
            .count();
        if outside > 0 {
            debug!(
                "{} obstacle(s) lie outside the {}x{} grid and can never be reached",
                outside, width, height
            );
        }
        Grid {
            width,
            height,
            obstacles,
        }
    }

    /// Returns the width of the grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Returns the height of the grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Checks if the given coordinates are within the grid boundaries.
    #[inline]
    pub fn is_within_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Checks if an obstacle occupies the given coordinates.
    #[inline]
    pub fn has_obstacle(&self, x: i32, y: i32) -> bool {
        self.obstacles.contains(&Coordinate { x, y })
    }

    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        self.is_within_bounds(c.x, c.y)
    }

    /// True if a rover may enter `c`: inside the bounds and obstacle free.
    #[inline]
    pub fn is_open(&self, c: Coordinate) -> bool {
        self.contains(c) && !self.has_obstacle(c.x, c.y)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn c(x: i32, y: i32) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn bounds_edges() {
        let grid = Grid::new(5, 3, []);
        assert!(grid.is_within_bounds(0, 0));
        assert!(grid.is_within_bounds(4, 2));
        assert!(!grid.is_within_bounds(5, 2));
        assert!(!grid.is_within_bounds(4, 3));
        assert!(!grid.is_within_bounds(-1, 0));
        assert!(!grid.is_within_bounds(0, -1));
    }

    #[test]
    fn degenerate_grids_have_no_cells() {
        for (w, h) in [(0, 0), (0, 5), (5, 0), (-3, 4), (4, -3)] {
            let grid = Grid::new(w, h, []);
            assert!(!grid.is_within_bounds(0, 0), "{}x{}", w, h);
        }
    }

    #[test]
    fn duplicate_obstacles_collapse() {
        let grid = Grid::new(3, 3, [c(1, 0), c(1, 0), c(2, 2)]);
        assert_eq!(grid.obstacle_count(), 2);
        assert!(grid.has_obstacle(1, 0));
        assert!(grid.has_obstacle(2, 2));
        assert!(!grid.has_obstacle(0, 1));
    }

    #[test]
    fn is_open_combines_bounds_and_obstacles() {
        let grid = Grid::new(2, 2, [c(1, 1), c(5, 5)]);
        assert!(grid.is_open(c(0, 0)));
        assert!(!grid.is_open(c(1, 1)));
        assert!(!grid.is_open(c(2, 0)));
        // kept even though it can never be entered
        assert!(grid.has_obstacle(5, 5));
        assert!(!grid.is_open(c(5, 5)));
    }

    proptest! {
        #[test]
        fn bounds_predicate(
            w in -5i32..20,
            h in -5i32..20,
            x in -30i32..30,
            y in -30i32..30,
        ) {
            let grid = Grid::new(w, h, []);
            let expected = 0 <= x && x < w && 0 <= y && y < h;
            prop_assert_eq!(grid.is_within_bounds(x, y), expected);
            prop_assert_eq!(grid.contains(c(x, y)), expected);
        }

        #[test]
        fn obstacle_membership(
            cells in prop::collection::vec((-10i32..10, -10i32..10), 0..30),
            probe in (-10i32..10, -10i32..10),
        ) {
            let mut shuffled = cells.clone();
            shuffled.reverse();
            shuffled.extend(cells.iter().copied());

            let grid = Grid::new(10, 10, shuffled.into_iter().map(|(x, y)| c(x, y)));
            for &(x, y) in &cells {
                prop_assert!(grid.has_obstacle(x, y));
            }
            prop_assert_eq!(grid.has_obstacle(probe.0, probe.1), cells.contains(&probe));
        }
    }
}
