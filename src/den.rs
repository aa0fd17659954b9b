use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{MazeError, Result};
use crate::grid::{Cell, Maze, Point};
use crate::search::carve_path_to_nearest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl DoorSide {
    pub fn name(self) -> &'static str {
        match self {
            DoorSide::Top => "top",
            DoorSide::Bottom => "bottom",
            DoorSide::Left => "left",
            DoorSide::Right => "right",
        }
    }
}

impl fmt::Display for DoorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DoorSide {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(DoorSide::Top),
            "bottom" => Ok(DoorSide::Bottom),
            "left" => Ok(DoorSide::Left),
            "right" => Ok(DoorSide::Right),
            _ => Err(MazeError::UnknownDoorSide(s.to_string())),
        }
    }
}

/// How the den door gets placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorSpec {
    /// Middle of the named den edge, tunneling to the maze if needed.
    Side(DoorSide),
    /// An exact wall cell that already separates den and maze.
    At(Point),
    /// Any wall cell that separates den and maze.
    Random,
}

impl DoorSpec {
    /// A side wins over a point; with neither the door is random.
    pub fn resolve(side: Option<DoorSide>, point: Option<Point>) -> Self {
        match (side, point) {
            (Some(side), _) => DoorSpec::Side(side),
            (None, Some(point)) => DoorSpec::At(point),
            (None, None) => DoorSpec::Random,
        }
    }
}

/// Opens the single door between den and maze. Without a den this is a
/// no-op returning `None`; a random search with no candidates also returns
/// `None`.
pub fn connect_den(maze: &mut Maze, rng: &mut impl Rng, spec: DoorSpec) -> Result<Option<Point>> {
    if !maze.has_den() {
        return Ok(None);
    }

    let door = match spec {
        DoorSpec::Side(side) => Some(connect_at_side(maze, side)?),
        DoorSpec::At(point) => Some(connect_at_point(maze, point)?),
        DoorSpec::Random => connect_random(maze, rng),
    };

    match door {
        Some(door) => debug!("den door opened at {door}"),
        None => warn!("no wall separates the den from the maze; den has no door"),
    }
    maze.door = door;
    Ok(door)
}

fn side_door(maze: &Maze, side: DoorSide) -> (Point, Point) {
    let x0 = maze.den_start_x();
    let y0 = maze.den_start_y();
    let (w, h) = (maze.den_width(), maze.den_height());
    match side {
        DoorSide::Top => {
            let door = Point::new(x0 + w / 2, y0 - 1);
            (door, door.offset(0, -1))
        }
        DoorSide::Bottom => {
            let door = Point::new(x0 + w / 2, y0 + h);
            (door, door.offset(0, 1))
        }
        DoorSide::Left => {
            let door = Point::new(x0 - 1, y0 + h / 2);
            (door, door.offset(-1, 0))
        }
        DoorSide::Right => {
            let door = Point::new(x0 + w, y0 + h / 2);
            (door, door.offset(1, 0))
        }
    }
}

fn connect_at_side(maze: &mut Maze, side: DoorSide) -> Result<Point> {
    let (door, outside) = side_door(maze, side);
    if !maze.is_interior(door) || !maze.is_interior(outside) {
        return Err(MazeError::DoorTooCloseToEdge(side));
    }

    if !maze.is_walkable(outside) {
        carve_path_to_nearest(maze, outside)?;
    }
    maze.set(door, Cell::Path);
    Ok(door)
}

fn connect_at_point(maze: &mut Maze, door: Point) -> Result<Point> {
    if !maze.is_interior(door) || !maze.is_wall(door) || !is_den_seam(maze, door) {
        return Err(MazeError::InvalidDoorPoint(door));
    }
    maze.set(door, Cell::Path);
    Ok(door)
}

fn connect_random(maze: &mut Maze, rng: &mut impl Rng) -> Option<Point> {
    let mut candidates = Vec::new();
    for y in 1..maze.height - 1 {
        for x in 1..maze.width - 1 {
            let p = Point::new(x, y);
            if maze.is_wall(p) && is_den_seam(maze, p) {
                candidates.push(p);
            }
        }
    }
    debug!("{} candidate den doors", candidates.len());

    let door = candidates.choose(rng).copied()?;
    maze.set(door, Cell::Path);
    Some(door)
}

/// A wall whose horizontal or vertical neighbors are both open paths, with
/// exactly one of them inside the den.
fn is_den_seam(maze: &Maze, p: Point) -> bool {
    let pairs = [
        (p.offset(-1, 0), p.offset(1, 0)),
        (p.offset(0, -1), p.offset(0, 1)),
    ];
    pairs.iter().any(|&(a, b)| {
        maze.cell_at(a) == Some(Cell::Path)
            && maze.cell_at(b) == Some(Cell::Path)
            && maze.is_inside_den(a) != maze.is_inside_den(b)
    })
}
