//! The bot capability interface.
//!
//! The evaluator performs every host side effect, and reads every piece of
//! host state, through this trait. It never inspects or mutates grid or
//! agent internals directly.

use std::fmt;

/// Compass heading of the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Heading after a 90° left turn.
    pub fn turned_left(self) -> Self {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// Heading after a 90° right turn.
    pub fn turned_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::North => f.write_str("north"),
            Direction::East => f.write_str("east"),
            Direction::South => f.write_str("south"),
            Direction::West => f.write_str("west"),
        }
    }
}

/// Capability object injected into a script run as the global `bot`.
///
/// The four movement/turn commands perform one host-side effect each and
/// return a result value (conventionally `true`). `can_move` is a pure
/// predicate. The accessors reflect current agent state.
pub trait BotCapability {
    /// Move one cell in the current heading.
    fn move_forward(&mut self) -> bool;
    /// Move one cell against the current heading.
    fn move_backward(&mut self) -> bool;
    /// Turn 90° left.
    fn turn_left(&mut self) -> bool;
    /// Turn 90° right.
    fn turn_right(&mut self) -> bool;
    /// Whether a forward move is currently possible. Does not mutate state.
    fn can_move(&self) -> bool;

    /// Current column.
    fn x(&self) -> i64;
    /// Current row.
    fn y(&self) -> i64;
    /// Current heading.
    fn direction(&self) -> Direction;
    /// Number of keys collected so far.
    fn keys(&self) -> i64;
}
