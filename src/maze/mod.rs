//! # Maze
//!
//! A static grid the robot controller problem is scored against. Cells are encoded as
//!
//! | code | cell |
//! |------|------|
//! | 0 | empty |
//! | 1 | wall |
//! | 2 | start |
//! | 3 | route |
//! | 4 | goal |
//!
//! Coordinates are `(x, y)` with `x` the column and `y` the row. Anything outside the
//! grid reads as a wall, each axis checked against its own extent.
//!
//! ## Example
//!
//! ```rust
//! use gaze::maze::{Cell, Maze, Position};
//!
//! let maze = Maze::new(vec![
//!     vec![2, 3, 1],
//!     vec![0, 3, 4],
//! ])
//! .unwrap();
//!
//! assert_eq!(maze.starting_position(), Position::new(0, 0));
//! assert_eq!(maze.position_value(2, 1), Cell::Goal);
//! assert!(maze.is_wall(3, 0));
//! assert_eq!(maze.score_route(&[Position::new(1, 0), Position::new(1, 0)]), 1);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use tracing::warn;

use crate::error::{GeneticError, Result};

mod challenge;
mod robot;

pub use challenge::{MazeChallenge, DEFAULT_MAX_MOVES};
pub use robot::{Action, Heading, Robot, RouteStep, StopReason, SENSOR_STATES};

/// Start used when a grid has no start cell. On grids narrower than nine columns it lies
/// outside the grid, and the robot's first eastward step clamps it to the last column.
pub const FALLBACK_START: Position = Position { x: 8, y: 0 };

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    Wall = 1,
    Start = 2,
    Route = 3,
    Goal = 4,
}

impl TryFrom<u8> for Cell {
    type Error = GeneticError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Wall),
            2 => Ok(Cell::Start),
            3 => Ok(Cell::Route),
            4 => Ok(Cell::Goal),
            other => Err(GeneticError::Configuration(format!(
                "Unknown maze cell code {}",
                other
            ))),
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone)]
pub struct Maze {
    cells: Vec<Vec<Cell>>,
    width: usize,
    start: OnceLock<Position>,
}

impl Maze {
    /// Builds a maze from rows of cell codes.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the grid is empty, not rectangular, or holds a code
    /// outside `0..=4`.
    pub fn new(grid: Vec<Vec<u8>>) -> Result<Self> {
        let width = grid.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GeneticError::Configuration(
                "Maze needs at least one row and one column".to_string(),
            ));
        }

        let cells = grid
            .into_iter()
            .enumerate()
            .map(|(y, row)| {
                if row.len() != width {
                    return Err(GeneticError::Configuration(format!(
                        "Maze row {} has {} cells, expected {}",
                        y,
                        row.len(),
                        width
                    )));
                }
                row.into_iter().map(Cell::try_from).collect::<Result<Vec<Cell>>>()
            })
            .collect::<Result<Vec<Vec<Cell>>>>()?;

        Ok(Self {
            cells,
            width,
            start: OnceLock::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Largest valid `x`.
    pub fn max_x(&self) -> usize {
        self.width - 1
    }

    /// Largest valid `y`.
    pub fn max_y(&self) -> usize {
        self.cells.len() - 1
    }

    /// First start cell in row-major order, looked up once and cached.
    /// Falls back to [`FALLBACK_START`] if the grid has none.
    pub fn starting_position(&self) -> Position {
        *self.start.get_or_init(|| {
            self.positions_of(Cell::Start).next().unwrap_or_else(|| {
                warn!(fallback = %FALLBACK_START, "maze has no start cell");
                FALLBACK_START
            })
        })
    }

    /// Cell at `(x, y)`. Out-of-bounds coordinates read as [`Cell::Wall`].
    pub fn position_value(&self, x: isize, y: isize) -> Cell {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return Cell::Wall;
        };
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Cell::Wall)
    }

    pub fn is_wall(&self, x: isize, y: isize) -> bool {
        self.position_value(x, y) == Cell::Wall
    }

    /// Number of route cells, the best score a route can reach.
    pub fn route_cell_count(&self) -> usize {
        self.positions_of(Cell::Route).count()
    }

    /// Counts the distinct route cells visited by `route`. Revisits score nothing.
    pub fn score_route(&self, route: &[Position]) -> usize {
        route
            .iter()
            .filter(|p| self.cell_at(**p) == Cell::Route)
            .collect::<HashSet<_>>()
            .len()
    }

    fn cell_at(&self, position: Position) -> Cell {
        self.cells
            .get(position.y)
            .and_then(|row| row.get(position.x))
            .copied()
            .unwrap_or(Cell::Wall)
    }

    fn positions_of(&self, wanted: Cell) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(move |(_, cell)| **cell == wanted)
                .map(move |(x, _)| Position::new(x, y))
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 9×9 maze with 29 route cells, start at (8, 0) and goal at (8, 8).
    pub(crate) fn reference_maze() -> Maze {
        Maze::new(vec![
            vec![0, 0, 0, 0, 1, 0, 1, 3, 2],
            vec![1, 0, 1, 1, 1, 0, 1, 3, 1],
            vec![1, 0, 0, 1, 3, 3, 3, 3, 1],
            vec![3, 3, 3, 1, 3, 1, 1, 0, 1],
            vec![3, 1, 3, 3, 3, 1, 1, 0, 0],
            vec![3, 3, 1, 1, 1, 1, 0, 1, 1],
            vec![1, 3, 0, 1, 3, 3, 3, 3, 3],
            vec![0, 3, 1, 1, 3, 1, 0, 1, 3],
            vec![1, 3, 3, 3, 3, 1, 1, 1, 4],
        ])
        .unwrap()
    }

    #[test]
    fn test_reference_maze_layout() {
        let maze = reference_maze();

        assert_eq!(maze.starting_position(), Position::new(8, 0));
        assert_eq!(maze.position_value(8, 8), Cell::Goal);
        assert_eq!(maze.route_cell_count(), 29);
        assert_eq!((maze.max_x(), maze.max_y()), (8, 8));
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let maze = reference_maze();

        assert!(maze.is_wall(-1, 0));
        assert!(maze.is_wall(0, -1));
        assert!(maze.is_wall(9, 0));
        assert!(maze.is_wall(0, 9));
        assert!(!maze.is_wall(0, 0));
    }

    #[test]
    fn test_bounds_use_each_axis() {
        // Three columns, one row: (2, 0) is inside even though 2 >= height.
        let maze = Maze::new(vec![vec![2, 0, 3]]).unwrap();

        assert_eq!(maze.position_value(2, 0), Cell::Route);
        assert!(maze.is_wall(0, 1));
        assert!(maze.is_wall(3, 0));
        assert_eq!((maze.max_x(), maze.max_y()), (2, 0));
    }

    #[test]
    fn test_missing_start_falls_back() {
        let maze = Maze::new(vec![vec![0, 3], vec![1, 4]]).unwrap();
        assert_eq!(maze.starting_position(), FALLBACK_START);
    }

    #[test]
    fn test_score_route_counts_distinct_route_cells() {
        let maze = reference_maze();
        let a = Position::new(7, 0);
        let b = Position::new(7, 1);
        let start = Position::new(8, 0);

        assert_eq!(maze.score_route(&[a, a, b]), maze.score_route(&[a, b]));
        assert_eq!(maze.score_route(&[a, b]), 2);
        assert_eq!(maze.score_route(&[start, a, start, a]), 1);
        assert_eq!(maze.score_route(&[]), 0);
    }

    #[test]
    fn test_invalid_grids_rejected() {
        assert!(matches!(Maze::new(Vec::new()), Err(GeneticError::Configuration(_))));
        assert!(Maze::new(vec![Vec::new()]).is_err());
        assert!(Maze::new(vec![vec![0, 0], vec![0]]).is_err());
        assert!(Maze::new(vec![vec![0, 5]]).is_err());
    }
}
