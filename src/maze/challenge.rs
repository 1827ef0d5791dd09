use super::{Maze, Robot};
use crate::error::Result;
use crate::evolution::Challenge;
use crate::individual::Individual;

/// Move budget of a robot when none is configured.
pub const DEFAULT_MAX_MOVES: usize = 100;

/// Scores a genome by letting the robot it encodes walk the maze and counting the
/// distinct route cells it visits.
#[derive(Debug, Clone)]
pub struct MazeChallenge {
    maze: Maze,
    max_moves: usize,
}

impl MazeChallenge {
    pub fn new(maze: Maze) -> Self {
        Self {
            maze,
            max_moves: DEFAULT_MAX_MOVES,
        }
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn max_moves(&self) -> usize {
        self.max_moves
    }

    /// Runs the robot encoded by `individual` and hands it back, so its route can be
    /// inspected or persisted.
    pub fn replay(&self, individual: &Individual) -> Result<Robot<'_>> {
        let mut robot = Robot::new(individual.genome(), &self.maze, self.max_moves)?;
        robot.run();
        Ok(robot)
    }
}

impl Challenge for MazeChallenge {
    fn score(&self, individual: &Individual) -> Result<f64> {
        let robot = self.replay(individual)?;
        Ok(self.maze.score_route(robot.route()) as f64)
    }
}
