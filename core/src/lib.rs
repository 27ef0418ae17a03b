#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Snake engine.
//!
//! This crate defines the message surface that connects adapters and the
//! authoritative world. Adapters submit [`Command`] values describing desired
//! mutations, the world executes those commands via its `apply` entry point,
//! and then broadcasts [`Event`] values describing what actually happened.
//! Rendering shells consume read-only queries and never mutate state
//! directly.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the snake travel in a new direction from the next step.
    RequestDirection {
        /// Direction the snake should adopt.
        direction: Direction,
    },
    /// Advances the simulation by exactly one discrete step.
    Step,
    /// Suspends a running round.
    Pause,
    /// Resumes a paused round.
    Resume,
    /// Abandons the current round and starts a fresh one.
    Restart,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the snake adopted a new travel direction.
    DirectionChanged {
        /// Direction used by subsequent steps.
        direction: Direction,
    },
    /// Confirms that the snake completed a step and survived it.
    SnakeAdvanced {
        /// Cell occupied by the head after the step.
        head: GridPosition,
        /// Whether the tail was kept, lengthening the body by one.
        grew: bool,
    },
    /// Confirms that the snake consumed the food item.
    FoodEaten {
        /// Cell the food occupied when it was eaten.
        position: GridPosition,
        /// Score total after applying the reward.
        score: u32,
    },
    /// Announces the position of a freshly placed food item.
    FoodPlaced {
        /// Cell assigned to the new food item.
        position: GridPosition,
    },
    /// Reports that crossing a score milestone shortened the move interval.
    SpeedIncreased {
        /// Move interval in effect after the speed-up.
        move_interval: Duration,
    },
    /// Reports that the round terminated.
    RoundEnded {
        /// Collision that ended the round.
        cause: CollisionKind,
    },
    /// Confirms that a running round was suspended.
    RoundPaused,
    /// Confirms that a paused round resumed.
    RoundResumed,
    /// Confirms that a fresh round replaced the previous one.
    RoundRestarted,
}

/// Cardinal movement directions available to the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Unit offset applied to a position when stepping in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Direction whose offset is the exact negation of this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that the terminal snapshot of a boundary
/// violation, where the head sits one cell outside the grid, remains
/// representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPosition {
    column: i32,
    row: i32,
}

impl GridPosition {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Neighbouring cell reached by moving one step in the given direction.
    #[must_use]
    pub const fn stepped(self, direction: Direction) -> Self {
        let (column_delta, row_delta) = direction.delta();
        Self {
            column: self.column + column_delta,
            row: self.row + row_delta,
        }
    }
}

/// Playable dimensions of the grid, fixed for the duration of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    columns: u32,
    rows: u32,
}

impl GridSize {
    /// Creates a new grid size description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the position lies inside the playable boundary.
    #[must_use]
    pub const fn contains(&self, position: GridPosition) -> bool {
        position.column() >= 0
            && position.row() >= 0
            && (position.column() as u32) < self.columns
            && (position.row() as u32) < self.rows
    }

    /// Central cell of the grid, used as the snake's starting head position.
    #[must_use]
    pub const fn center(&self) -> GridPosition {
        GridPosition::new((self.columns / 2) as i32, (self.rows / 2) as i32)
    }
}

/// Lifecycle states of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RoundStatus {
    /// Steps advance the simulation.
    Running,
    /// Steps are suspended until the round resumes.
    Paused,
    /// A collision terminated the round; only a restart revives it.
    Ended,
}

/// Collisions that terminate a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    /// The head left the playable boundary.
    Wall,
    /// The head entered a cell occupied by another body segment.
    SelfBody,
}

/// Configuration surface supplied once at engine construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Number of body segments the snake starts with.
    pub initial_snake_length: u32,
    /// Wall-clock time represented by one step at the start of a round.
    pub initial_move_interval: Duration,
    /// Score awarded per consumed food item.
    pub food_reward: u32,
    /// Score multiple at which the move interval shortens.
    pub speedup_milestone: u32,
    /// Factor below one applied to the move interval at each milestone.
    pub speedup_factor: f32,
    /// Lower bound the move interval never drops beneath.
    pub min_move_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: 32,
            rows: 24,
            initial_snake_length: 5,
            initial_move_interval: Duration::from_millis(120),
            food_reward: 10,
            speedup_milestone: 50,
            speedup_factor: 0.92,
            min_move_interval: Duration::from_millis(40),
        }
    }
}

impl EngineConfig {
    /// Checks every construction precondition, rejecting configurations a
    /// correctly wired shell would never produce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::ZeroGridDimension {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptyInitialBody);
        }
        // The body spawns at the grid center and extends leftward.
        if self.initial_snake_length > self.columns / 2 + 1 {
            return Err(ConfigError::InitialBodyOutOfBounds {
                length: self.initial_snake_length,
                columns: self.columns,
            });
        }
        if self.initial_move_interval.is_zero() {
            return Err(ConfigError::ZeroMoveInterval);
        }
        if self.food_reward == 0 {
            return Err(ConfigError::ZeroFoodReward);
        }
        if self.speedup_milestone == 0 {
            return Err(ConfigError::ZeroMilestone);
        }
        if !(self.speedup_factor > 0.0 && self.speedup_factor < 1.0) {
            return Err(ConfigError::SpeedupFactorOutOfRange {
                factor: self.speedup_factor,
            });
        }
        if self.min_move_interval.is_zero() {
            return Err(ConfigError::ZeroIntervalFloor);
        }
        if self.min_move_interval > self.initial_move_interval {
            return Err(ConfigError::FloorAboveInitialInterval);
        }
        Ok(())
    }

    /// Grid dimensions described by this configuration.
    #[must_use]
    pub const fn grid_size(&self) -> GridSize {
        GridSize::new(self.columns, self.rows)
    }
}

/// Reasons an engine configuration fails validation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// One or both grid dimensions are zero.
    #[error("grid dimensions must be positive, got {columns}x{rows}")]
    ZeroGridDimension {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// The snake must start with at least one segment.
    #[error("initial snake length must be at least 1")]
    EmptyInitialBody,
    /// The initial body would extend past the left edge of the grid.
    #[error("initial snake length {length} does not fit a {columns}-column grid")]
    InitialBodyOutOfBounds {
        /// Configured initial length.
        length: u32,
        /// Configured column count.
        columns: u32,
    },
    /// The initial move interval must be positive.
    #[error("initial move interval must be positive")]
    ZeroMoveInterval,
    /// The food reward must be positive.
    #[error("food reward must be positive")]
    ZeroFoodReward,
    /// The speed-up milestone must be positive.
    #[error("speed-up milestone must be positive")]
    ZeroMilestone,
    /// The speed-up factor must shrink the interval without zeroing it.
    #[error("speed-up factor must lie strictly between 0 and 1, got {factor}")]
    SpeedupFactorOutOfRange {
        /// Configured factor.
        factor: f32,
    },
    /// The move interval floor must be positive.
    #[error("move interval floor must be positive")]
    ZeroIntervalFloor,
    /// The floor may not start above the initial interval.
    #[error("move interval floor exceeds the initial move interval")]
    FloorAboveInitialInterval,
}
