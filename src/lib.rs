//! Seeded maze generation with an optional central den.
//!
//! A [`Maze`] is carved by a biased randomized depth-first search, its den is
//! joined to the corridors through a single door, and start and end are
//! placed by two farthest-point searches. [`Maze::solve`] returns the
//! shortest route between them.
//!
//! ```
//! use mazegen::{GenerateOptions, Maze};
//!
//! let mut maze = Maze::new(21, 11, 5, 3).unwrap();
//! maze.generate(&GenerateOptions::new(42).with_bias(0.7)).unwrap();
//! let path = maze.solve().unwrap();
//! assert_eq!(path.first(), Some(&maze.start()));
//! assert_eq!(path.last(), Some(&maze.end()));
//! ```

mod carve;
mod den;
mod error;
mod generate;
mod grid;
pub mod render;
pub mod search;
mod solve;

pub use carve::carve_corridors;
pub use den::{connect_den, DoorSide, DoorSpec};
pub use error::{MazeError, Result};
pub use generate::{GenerateOptions, DEFAULT_BIAS};
pub use grid::{Cell, Dir, Maze, Point, MIN_DIMENSION};
