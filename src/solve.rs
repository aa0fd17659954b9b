use crate::grid::{Maze, Point};
use crate::search::shortest_path;

impl Maze {
    /// Shortest route from start to end, both included, or `None` when the
    /// end cannot be reached.
    pub fn solve(&self) -> Option<Vec<Point>> {
        shortest_path(self, self.start, self.end)
    }
}
