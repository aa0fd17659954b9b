use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::carve::carve_corridors;
use crate::den::{connect_den, DoorSide, DoorSpec};
use crate::error::{MazeError, Result};
use crate::grid::{Cell, Maze, Point};
use crate::search::farthest_point;

pub const DEFAULT_BIAS: f64 = 0.5;

/// Inputs for [`Maze::generate`].
///
/// A door side overrides a door point. Explicit `start` and `end` replace the
/// farthest-point choice for that endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub seed: u64,
    pub start: Option<Point>,
    pub end: Option<Point>,
    pub door: Option<Point>,
    pub door_side: Option<DoorSide>,
    pub bias: f64,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            start: None,
            end: None,
            door: None,
            door_side: None,
            bias: DEFAULT_BIAS,
        }
    }
}

impl GenerateOptions {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_bias(mut self, bias: f64) -> Self {
        self.bias = bias;
        self
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: Point) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_door(mut self, door: Point) -> Self {
        self.door = Some(door);
        self
    }

    pub fn with_door_side(mut self, side: DoorSide) -> Self {
        self.door_side = Some(side);
        self
    }

    /// Parses a side name. An empty name clears the side.
    pub fn with_door_side_name(mut self, name: &str) -> Result<Self> {
        self.door_side = if name.trim().is_empty() {
            None
        } else {
            Some(name.parse()?)
        };
        Ok(self)
    }
}

impl Maze {
    /// Generates the maze from a seeded [`StdRng`]. See
    /// [`Maze::generate_with_rng`].
    pub fn generate(&mut self, opts: &GenerateOptions) -> Result<()> {
        let mut rng = StdRng::seed_from_u64(opts.seed);
        self.generate_with_rng(&mut rng, opts)
    }

    /// Carves corridors, opens the den door and places start and end.
    ///
    /// The maze is rebuilt from its constructed state on every call. On error
    /// it is left exactly as it was before the call.
    pub fn generate_with_rng(&mut self, rng: &mut impl Rng, opts: &GenerateOptions) -> Result<()> {
        if let Some(start) = opts.start {
            self.check_endpoint(start, MazeError::InvalidStart, MazeError::StartInsideDen)?;
        }
        if let Some(end) = opts.end {
            self.check_endpoint(end, MazeError::InvalidEnd, MazeError::EndInsideDen)?;
        }
        if let (Some(start), Some(end)) = (opts.start, opts.end) {
            if start == end {
                return Err(MazeError::CoincidentEndpoints(start));
            }
        }

        let mut work = self.clone();
        work.reset();

        let seed = match opts.start {
            Some(start) => start,
            None => work.random_seed_cell(rng),
        };
        debug!(
            "generating {}x{} maze from {seed} with bias {}",
            work.width, work.height, opts.bias
        );

        carve_corridors(&mut work, rng, seed, opts.bias);
        connect_den(&mut work, rng, DoorSpec::resolve(opts.door_side, opts.door))?;
        work.place_endpoints(seed, opts.start, opts.end)?;

        *self = work;
        Ok(())
    }

    fn check_endpoint(
        &self,
        p: Point,
        malformed: fn(Point) -> MazeError,
        in_den: fn(Point) -> MazeError,
    ) -> Result<()> {
        if !self.is_interior(p) || p.x % 2 == 0 || p.y % 2 == 0 {
            return Err(malformed(p));
        }
        if self.is_inside_den(p) {
            return Err(in_den(p));
        }
        Ok(())
    }

    /// A uniformly drawn odd cell outside the den.
    fn random_seed_cell(&self, rng: &mut impl Rng) -> Point {
        loop {
            let x = rng.gen_range(0..(self.width - 1) / 2) * 2 + 1;
            let y = rng.gen_range(0..(self.height - 1) / 2) * 2 + 1;
            let p = Point::new(x, y);
            if !self.is_inside_den(p) {
                return p;
            }
        }
    }

    fn place_endpoints(
        &mut self,
        seed: Point,
        start: Option<Point>,
        end: Option<Point>,
    ) -> Result<()> {
        // Two farthest-point passes approximate the longest route in the maze.
        self.start = match (start, end) {
            (Some(start), _) => start,
            (None, Some(end)) => {
                let from_seed = farthest_point(self, seed).0;
                if from_seed == end {
                    farthest_point(self, end).0
                } else {
                    from_seed
                }
            }
            (None, None) => farthest_point(self, seed).0,
        };
        self.end = match end {
            Some(end) => end,
            None => farthest_point(self, self.start).0,
        };
        if end.is_some() && self.start == self.end {
            return Err(MazeError::CoincidentEndpoints(self.end));
        }
        debug!("start {} end {}", self.start, self.end);

        self.set(self.start, Cell::Start);
        self.set(self.end, Cell::End);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builder() {
        let opts = GenerateOptions::new(7)
            .with_bias(0.9)
            .with_start(Point::new(1, 1))
            .with_door(Point::new(6, 9))
            .with_door_side_name("left")
            .unwrap();
        assert_eq!(opts.seed, 7);
        assert_eq!(opts.bias, 0.9);
        assert_eq!(opts.start, Some(Point::new(1, 1)));
        assert_eq!(opts.door_side, Some(DoorSide::Left));
        assert_eq!(opts.end, None);
    }

    #[test]
    fn empty_side_name_means_none() {
        let opts = GenerateOptions::new(1)
            .with_door_side(DoorSide::Top)
            .with_door_side_name("")
            .unwrap();
        assert_eq!(opts.door_side, None);
        assert!(GenerateOptions::new(1).with_door_side_name("up").is_err());
    }

    #[test]
    fn random_seed_cell_is_odd_and_outside_den() {
        let maze = Maze::new(11, 11, 5, 5).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let p = maze.random_seed_cell(&mut rng);
            assert!(p.x % 2 == 1 && p.y % 2 == 1, "{p}");
            assert!(maze.is_interior(p));
            assert!(!maze.is_inside_den(p));
        }
    }

    #[test]
    fn rejects_malformed_start() {
        let mut maze = Maze::new(21, 21, 5, 5).unwrap();
        let malformed = [
            Point::new(2, 1),
            Point::new(1, 4),
            Point::new(0, 1),
            Point::new(21, 1),
            Point::new(-1, 3),
        ];
        for p in malformed {
            assert_eq!(
                maze.generate(&GenerateOptions::new(1).with_start(p)),
                Err(MazeError::InvalidStart(p))
            );
        }
        let inside = Point::new(maze.den_start_x() + 2, maze.den_start_y() + 2);
        assert_eq!(
            maze.generate(&GenerateOptions::new(1).with_start(inside)),
            Err(MazeError::StartInsideDen(inside))
        );
    }

    #[test]
    fn rejects_malformed_end() {
        let mut maze = Maze::new(21, 21, 0, 0).unwrap();
        let p = Point::new(20, 19);
        assert_eq!(
            maze.generate(&GenerateOptions::new(1).with_end(p)),
            Err(MazeError::InvalidEnd(p))
        );
    }

    #[test]
    fn rejects_coincident_endpoints() {
        let mut maze = Maze::new(21, 21, 0, 0).unwrap();
        let p = Point::new(5, 5);
        assert_eq!(
            maze.generate(&GenerateOptions::new(1).with_start(p).with_end(p)),
            Err(MazeError::CoincidentEndpoints(p))
        );
    }

    #[test]
    fn failure_leaves_maze_untouched() {
        let mut maze = Maze::new(21, 21, 5, 5).unwrap();
        maze.generate(&GenerateOptions::new(4)).unwrap();
        let before = maze.clone();

        // (2, 2) is a grid intersection, never a door.
        let err = maze.generate(&GenerateOptions::new(5).with_door(Point::new(2, 2)));
        assert_eq!(err, Err(MazeError::InvalidDoorPoint(Point::new(2, 2))));
        assert_eq!(maze, before);
    }

    #[test]
    fn regeneration_rebuilds_from_scratch() {
        let opts = GenerateOptions::new(12).with_bias(0.3);
        let mut fresh = Maze::new(25, 15, 3, 3).unwrap();
        fresh.generate(&opts).unwrap();

        let mut reused = Maze::new(25, 15, 3, 3).unwrap();
        reused.generate(&GenerateOptions::new(99)).unwrap();
        reused.generate(&opts).unwrap();
        assert_eq!(reused, fresh);
    }

    #[test]
    fn markers_are_written() {
        let mut maze = Maze::new(15, 9, 0, 0).unwrap();
        maze.generate(&GenerateOptions::new(2)).unwrap();
        assert_eq!(maze.cell_at(maze.start()), Some(Cell::Start));
        assert_eq!(maze.cell_at(maze.end()), Some(Cell::End));
        assert_ne!(maze.start(), maze.end());
    }

    #[test]
    fn explicit_end_never_shares_the_start() {
        let mut maze = Maze::new(21, 21, 0, 0).unwrap();
        maze.generate(&GenerateOptions::new(7)).unwrap();
        let first_start = maze.start();

        // Same seed, so the farthest-point pass lands on the requested end.
        maze.generate(&GenerateOptions::new(7).with_end(first_start)).unwrap();
        assert_eq!(maze.end(), first_start);
        assert_ne!(maze.start(), maze.end());
        assert_eq!(maze.cell_at(maze.start()), Some(Cell::Start));
        assert_eq!(maze.cell_at(maze.end()), Some(Cell::End));
        assert!(maze.solve().unwrap().len() > 1);
    }

    #[test]
    fn explicit_end_in_single_cell_maze() {
        let mut maze = Maze::new(3, 3, 0, 0).unwrap();
        let p = Point::new(1, 1);
        assert_eq!(
            maze.generate(&GenerateOptions::new(1).with_end(p)),
            Err(MazeError::CoincidentEndpoints(p))
        );
    }
}
