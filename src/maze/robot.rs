use tracing::trace;

use super::{Cell, Maze, Position};
use crate::error::{GeneticError, Result};
use crate::individual::Gene;

/// Number of distinct sensor readings, one action slot per reading.
pub const SENSOR_STATES: usize = 64;

const SENSOR_FRONT: u8 = 1;
const SENSOR_FRONT_LEFT: u8 = 2;
const SENSOR_FRONT_RIGHT: u8 = 4;
const SENSOR_LEFT: u8 = 8;
const SENSOR_RIGHT: u8 = 16;
const SENSOR_BACK: u8 = 32;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub fn clockwise(self) -> Self {
        match self {
            Heading::North => Heading::East,
            Heading::East => Heading::South,
            Heading::South => Heading::West,
            Heading::West => Heading::North,
        }
    }

    pub fn counter_clockwise(self) -> Self {
        match self {
            Heading::North => Heading::West,
            Heading::West => Heading::South,
            Heading::South => Heading::East,
            Heading::East => Heading::North,
        }
    }

    /// Offsets of the six sensors as `(dx, dy, bit)`, rotated to this heading.
    fn sensor_offsets(self) -> [(isize, isize, u8); 6] {
        match self {
            Heading::North => [
                (0, -1, SENSOR_FRONT),
                (-1, -1, SENSOR_FRONT_LEFT),
                (1, -1, SENSOR_FRONT_RIGHT),
                (-1, 0, SENSOR_LEFT),
                (1, 0, SENSOR_RIGHT),
                (0, 1, SENSOR_BACK),
            ],
            Heading::East => [
                (1, 0, SENSOR_FRONT),
                (1, -1, SENSOR_FRONT_LEFT),
                (1, 1, SENSOR_FRONT_RIGHT),
                (0, -1, SENSOR_LEFT),
                (0, 1, SENSOR_RIGHT),
                (-1, 0, SENSOR_BACK),
            ],
            Heading::South => [
                (0, 1, SENSOR_FRONT),
                (1, 1, SENSOR_FRONT_LEFT),
                (-1, 1, SENSOR_FRONT_RIGHT),
                (1, 0, SENSOR_LEFT),
                (-1, 0, SENSOR_RIGHT),
                (0, -1, SENSOR_BACK),
            ],
            Heading::West => [
                (-1, 0, SENSOR_FRONT),
                (-1, 1, SENSOR_FRONT_LEFT),
                (-1, -1, SENSOR_FRONT_RIGHT),
                (0, 1, SENSOR_LEFT),
                (0, -1, SENSOR_RIGHT),
                (1, 0, SENSOR_BACK),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Stop,
    MoveForward,
    TurnClockwise,
    TurnCounterClockwise,
}

impl Action {
    /// Decodes a gene pair as action code `2 * b0 + b1`. Any non-zero gene counts as 1.
    pub fn from_genes(b0: Gene, b1: Gene) -> Self {
        match (b0 != 0, b1 != 0) {
            (false, false) => Action::Stop,
            (false, true) => Action::MoveForward,
            (true, false) => Action::TurnClockwise,
            (true, true) => Action::TurnCounterClockwise,
        }
    }
}

/// Why a simulation ended.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The sensor-action table said stop.
    Action,
    /// The robot stands on the goal.
    Goal,
    /// The move budget ran out.
    MoveLimit,
}

/// One event of a robot's walk, as drawn by a visualisation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStep {
    Move(Position),
    Turn(Heading),
}

/// A robot walking a maze, driven by a sensor-action table decoded from a genome.
///
/// The robot starts on the maze's start cell heading east. At every decision point it
/// reads its six wall sensors, looks the reading up in the table and acts on it.
#[derive(Debug, Clone)]
pub struct Robot<'m> {
    maze: &'m Maze,
    actions: Vec<Action>,
    max_moves: usize,
    position: Position,
    heading: Heading,
    moves: usize,
    sensor: Option<u8>,
    route: Vec<Position>,
    drawing_route: Vec<RouteStep>,
}

impl<'m> Robot<'m> {
    /// Decodes the first [`SENSOR_STATES`] gene pairs of `genome` into the action table.
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the genome holds fewer than `2 * SENSOR_STATES` genes.
    pub fn new(genome: &[Gene], maze: &'m Maze, max_moves: usize) -> Result<Self> {
        if genome.len() < 2 * SENSOR_STATES {
            return Err(GeneticError::OutOfBounds(format!(
                "Robot needs {} genes for its action table, got {}",
                2 * SENSOR_STATES,
                genome.len()
            )));
        }

        let actions = genome
            .chunks_exact(2)
            .take(SENSOR_STATES)
            .map(|pair| Action::from_genes(pair[0], pair[1]))
            .collect();
        let start = maze.starting_position();

        Ok(Self {
            maze,
            actions,
            max_moves,
            position: start,
            heading: Heading::East,
            moves: 0,
            sensor: None,
            route: vec![start],
            drawing_route: vec![RouteStep::Move(start)],
        })
    }

    /// Walks until the table says stop, the goal is reached, or `max_moves` is exceeded.
    pub fn run(&mut self) -> StopReason {
        let reason = loop {
            self.moves += 1;

            if self.next_action() == Action::Stop {
                break StopReason::Action;
            }
            if self.current_cell() == Cell::Goal {
                break StopReason::Goal;
            }
            if self.moves > self.max_moves {
                break StopReason::MoveLimit;
            }
            self.make_next_action();
        };

        trace!(?reason, moves = self.moves, route_len = self.route.len(), "robot stopped");
        reason
    }

    /// Action the table holds for the current sensor reading.
    pub fn next_action(&mut self) -> Action {
        let sensor = usize::from(self.sensor_value());
        self.actions[sensor]
    }

    /// Six-bit wall reading around the robot, cached until the next action.
    pub fn sensor_value(&mut self) -> u8 {
        if let Some(sensor) = self.sensor {
            return sensor;
        }

        let x = self.position.x as isize;
        let y = self.position.y as isize;
        let sensor = self
            .heading
            .sensor_offsets()
            .iter()
            .filter(|&&(dx, dy, _)| self.maze.is_wall(x + dx, y + dy))
            .fold(0u8, |acc, &(_, _, bit)| acc | bit);

        self.sensor = Some(sensor);
        sensor
    }

    fn make_next_action(&mut self) {
        match self.next_action() {
            Action::Stop => {}
            Action::MoveForward => self.move_forward(),
            Action::TurnClockwise => self.turn(self.heading.clockwise()),
            Action::TurnCounterClockwise => self.turn(self.heading.counter_clockwise()),
        }
        self.sensor = None;
    }

    fn move_forward(&mut self) {
        let Position { x, y } = self.position;
        let target = match self.heading {
            Heading::North => Position::new(x, y.saturating_sub(1)),
            Heading::East => Position::new((x + 1).min(self.maze.max_x()), y),
            Heading::South => Position::new(x, (y + 1).min(self.maze.max_y())),
            Heading::West => Position::new(x.saturating_sub(1), y),
        };

        if target == self.position || self.maze.is_wall(target.x as isize, target.y as isize) {
            return;
        }
        self.position = target;
        self.route.push(target);
        self.drawing_route.push(RouteStep::Move(target));
    }

    fn turn(&mut self, heading: Heading) {
        self.heading = heading;
        self.drawing_route.push(RouteStep::Turn(heading));
    }

    fn current_cell(&self) -> Cell {
        self.maze
            .position_value(self.position.x as isize, self.position.y as isize)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Decision points visited so far, including the one that stopped the run.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Cells the robot occupied, starting with the start cell. Blocked moves add nothing.
    pub fn route(&self) -> &[Position] {
        &self.route
    }

    /// Moves and turns in the order they happened, starting with the start cell.
    pub fn drawing_route(&self) -> &[RouteStep] {
        &self.drawing_route
    }
}
