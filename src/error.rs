use thiserror::Error;

use crate::den::DoorSide;
use crate::grid::Point;

pub type Result<T> = std::result::Result<T, MazeError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MazeError {
    #[error("width and height must be positive (got {width}x{height})")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("den dimensions must be non-negative (got {width}x{height})")]
    NegativeDen { width: i32, height: i32 },

    #[error("den {axis} ({den}) is too large for the maze {axis} ({maze})")]
    DenTooLarge {
        axis: &'static str,
        den: i32,
        maze: i32,
    },

    #[error("grid rows must be non-empty and of equal length")]
    MalformedGrid,

    #[error("invalid start point {0}: must be inside the border with odd coordinates")]
    InvalidStart(Point),

    #[error("invalid start point {0}: cannot start inside the den")]
    StartInsideDen(Point),

    #[error("invalid end point {0}: must be inside the border with odd coordinates")]
    InvalidEnd(Point),

    #[error("invalid end point {0}: cannot end inside the den")]
    EndInsideDen(Point),

    #[error("start and end cannot both be {0}")]
    CoincidentEndpoints(Point),

    #[error("invalid door side '{0}': use 'top', 'bottom', 'left' or 'right'")]
    UnknownDoorSide(String),

    #[error("cannot place door on side '{0}': too close to maze edge")]
    DoorTooCloseToEdge(DoorSide),

    #[error("invalid door location {0}: does not connect the den to a maze path")]
    InvalidDoorPoint(Point),

    #[error("no path found to connect {0} to the maze")]
    NoPathToMaze(Point),
}
