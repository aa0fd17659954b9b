use std::fmt;

use crate::error::{MazeError, Result};

/// Smallest width or height a maze is allowed to have after adjustment.
pub const MIN_DIMENSION: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Wall,
    Path,
    Start,
    End,
    /// Overlay marker for drawn solutions. Never stored in a maze grid.
    Solution,
}

impl Cell {
    pub fn is_walkable(self) -> bool {
        self != Cell::Wall
    }

    pub fn glyph(self) -> char {
        match self {
            Cell::Wall => '█',
            Cell::Path => ' ',
            Cell::Start => 'S',
            Cell::End => 'E',
            Cell::Solution => '.',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn step(self, dir: Dir) -> Self {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    /// Scan order used by every neighbor walk. Seeded runs depend on it.
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Inclusive bounds of the den interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DenBounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl DenBounds {
    fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }
}

/// A rectangular maze grid, addressed `[y][x]`, with an optional central den.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    pub(crate) width: i32,
    pub(crate) height: i32,
    pub(crate) grid: Vec<Vec<Cell>>,
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) door: Option<Point>,
    den_width: i32,
    den_height: i32,
    den: Option<DenBounds>,
}

fn adjust_to_odd(dim: i32) -> i32 {
    if dim > 0 && dim % 2 == 0 {
        dim + 1
    } else {
        dim
    }
}

fn den_origin(maze: i32, den: i32) -> i32 {
    // Den edges sit on odd coordinates so the seam with the maze is one wall thick.
    let origin = (maze - den) / 2;
    if origin > 0 && origin % 2 == 0 {
        origin - 1
    } else {
        origin
    }
}

impl Maze {
    /// Creates an all-wall maze with the den pre-carved.
    ///
    /// Even dimensions are rounded up to the next odd value and the maze is
    /// never smaller than [`MIN_DIMENSION`] on either axis. A zero den
    /// dimension means no den.
    pub fn new(width: i32, height: i32, den_width: i32, den_height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        if den_width < 0 || den_height < 0 {
            return Err(MazeError::NegativeDen {
                width: den_width,
                height: den_height,
            });
        }

        let width = adjust_to_odd(width).max(MIN_DIMENSION);
        let height = adjust_to_odd(height).max(MIN_DIMENSION);
        let den_width = adjust_to_odd(den_width);
        let den_height = adjust_to_odd(den_height);

        if den_width > 0 && den_width >= width - 2 {
            return Err(MazeError::DenTooLarge {
                axis: "width",
                den: den_width,
                maze: width,
            });
        }
        if den_height > 0 && den_height >= height - 2 {
            return Err(MazeError::DenTooLarge {
                axis: "height",
                den: den_height,
                maze: height,
            });
        }

        let den = (den_width > 0 && den_height > 0).then(|| {
            let x0 = den_origin(width, den_width);
            let y0 = den_origin(height, den_height);
            DenBounds {
                x0,
                y0,
                x1: x0 + den_width - 1,
                y1: y0 + den_height - 1,
            }
        });

        let mut maze = Maze {
            width,
            height,
            grid: Vec::new(),
            start: Point::default(),
            end: Point::default(),
            door: None,
            den_width,
            den_height,
            den,
        };
        maze.reset();
        Ok(maze)
    }

    /// Builds a den-less maze from explicit rows. Markers are taken as given.
    pub fn from_rows(rows: Vec<Vec<Cell>>, start: Point, end: Point) -> Result<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return Err(MazeError::MalformedGrid);
        }
        Ok(Maze {
            width: width as i32,
            height: rows.len() as i32,
            grid: rows,
            start,
            end,
            door: None,
            den_width: 0,
            den_height: 0,
            den: None,
        })
    }

    /// Restores the freshly constructed state: walls everywhere but the den.
    pub(crate) fn reset(&mut self) {
        let mut grid = vec![vec![Cell::Wall; self.width as usize]; self.height as usize];
        for (y, row) in grid.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if self.is_inside_den(Point::new(x as i32, y as i32)) {
                    *cell = Cell::Path;
                }
            }
        }
        self.grid = grid;
        self.start = Point::default();
        self.end = Point::default();
        self.door = None;
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn den_width(&self) -> i32 {
        self.den_width
    }

    pub fn den_height(&self) -> i32 {
        self.den_height
    }

    pub fn den_start_x(&self) -> i32 {
        self.den.map_or(0, |den| den.x0)
    }

    pub fn den_start_y(&self) -> i32 {
        self.den.map_or(0, |den| den.y0)
    }

    pub fn has_den(&self) -> bool {
        self.den.is_some()
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    /// The opened den door, if a den exists and a door could be placed.
    pub fn door(&self) -> Option<Point> {
        self.door
    }

    pub fn is_inside_den(&self, p: Point) -> bool {
        self.den.is_some_and(|den| den.contains(p))
    }

    /// True for points beside (not diagonal to) the den but not inside it.
    pub fn is_adjacent_to_den(&self, p: Point) -> bool {
        if self.den.is_none() || self.is_inside_den(p) {
            return false;
        }
        Dir::ALL
            .iter()
            .any(|&dir| self.is_inside_den(p.step(dir)))
    }

    /// Returns the cell and whether `(x, y)` is in bounds. Out of bounds
    /// yields `(Cell::default(), false)`.
    pub fn cell(&self, x: i32, y: i32) -> (Cell, bool) {
        match self.cell_at(Point::new(x, y)) {
            Some(cell) => (cell, true),
            None => (Cell::default(), false),
        }
    }

    pub fn cell_at(&self, p: Point) -> Option<Cell> {
        if !self.in_bounds(p) {
            return None;
        }
        Some(self.grid[p.y as usize][p.x as usize])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.iter().map(Vec::as_slice)
    }

    pub(crate) fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Strictly inside the outer border.
    pub(crate) fn is_interior(&self, p: Point) -> bool {
        p.x > 0 && p.x < self.width - 1 && p.y > 0 && p.y < self.height - 1
    }

    pub(crate) fn is_wall(&self, p: Point) -> bool {
        self.cell_at(p) == Some(Cell::Wall)
    }

    pub(crate) fn is_walkable(&self, p: Point) -> bool {
        self.cell_at(p).is_some_and(Cell::is_walkable)
    }

    pub(crate) fn set(&mut self, p: Point, cell: Cell) {
        self.grid[p.y as usize][p.x as usize] = cell;
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
