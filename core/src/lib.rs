#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tiny World engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// Signed integer position or displacement on the tile grid.
///
/// All distance comparisons in the engine use squared magnitudes; no
/// floating point enters the core.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridVector {
    x: i32,
    y: i32,
}

impl GridVector {
    /// Creates a new grid vector from its components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal component of the vector.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical component of the vector.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Squared euclidean length of the vector.
    ///
    /// Widened to `i64` so squared distances between far-apart positions on
    /// the conceptually infinite plain do not overflow.
    #[must_use]
    pub const fn length_squared(&self) -> i64 {
        let x = self.x as i64;
        let y = self.y as i64;
        x * x + y * y
    }
}

impl Add for GridVector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for GridVector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<i32> for GridVector {
    type Output = Self;

    fn mul(self, factor: i32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// Discrete movement directions produced by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing y.
    Up,
    /// Movement toward increasing y.
    Down,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward increasing x.
    Right,
}

impl Direction {
    /// Unit displacement applied by one step in this direction.
    #[must_use]
    pub const fn unit_offset(self) -> GridVector {
        match self {
            Self::Up => GridVector::new(0, -1),
            Self::Down => GridVector::new(0, 1),
            Self::Left => GridVector::new(-1, 0),
            Self::Right => GridVector::new(1, 0),
        }
    }
}

/// Closed enumeration of every renderable kind in the game.
///
/// Each kind resolves to exactly one asset name; extending this enumeration
/// requires extending the asset mapping as well, and that coupling is
/// intentional and total.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKind {
    /// The player character.
    Player,
    /// A pursuing enemy.
    Enemy,
    /// Walkable grass terrain.
    Grass,
    /// Solid wood terrain.
    Wood,
    /// Impassable water terrain.
    Water,
}

impl VisualKind {
    /// Reports whether terrain of this kind can be walked on.
    ///
    /// Only meaningful for cell kinds; entity kinds are never terrain.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Grass)
    }
}

/// Governs whether player movement is gated on terrain walkability.
///
/// The reference behaviour applies moves unconditionally; the solid-cells
/// variant restores the walkability gate from the game's earliest iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkabilityPolicy {
    /// Moves are applied without consulting the terrain.
    #[default]
    Unchecked,
    /// Moves onto non-walkable or absent cells are rejected.
    SolidCells,
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// A single static grid tile with a fixed visual kind.
///
/// Cells are immutable once created and owned exclusively by the level that
/// produced them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    position: GridVector,
    kind: VisualKind,
}

impl Cell {
    /// Creates a new cell at the provided position.
    #[must_use]
    pub const fn new(position: GridVector, kind: VisualKind) -> Self {
        Self { position, kind }
    }

    /// Grid position occupied by the cell.
    #[must_use]
    pub const fn position(&self) -> GridVector {
        self.position
    }

    /// Visual kind rendered for the cell.
    #[must_use]
    pub const fn kind(&self) -> VisualKind {
        self.kind
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player advance one step in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that an enemy advance one step in the given direction.
    StepEnemy {
        /// Identifier of the enemy attempting to move.
        enemy: EnemyId,
        /// Direction of travel for the step.
        direction: Direction,
    },
    /// Switches the movement gate applied to player steps.
    SetWalkabilityPolicy {
        /// Policy the world should activate.
        policy: WalkabilityPolicy,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player moved between two positions.
    PlayerMoved {
        /// Position the player occupied before the move.
        from: GridVector,
        /// Position the player occupies after the move.
        to: GridVector,
    },
    /// Reports that a player step was rejected by the walkability gate.
    PlayerBlocked {
        /// Direction of the rejected step.
        direction: Direction,
        /// Position the step would have reached.
        at: GridVector,
    },
    /// Reports that the player ran into an enemy and the move was reverted.
    EnemyTouched {
        /// Identifier of the enemy occupying the attempted destination.
        enemy: EnemyId,
        /// Position where the contact occurred.
        at: GridVector,
    },
    /// Confirms that an enemy advanced one step.
    EnemyAdvanced {
        /// Identifier of the enemy that advanced.
        enemy: EnemyId,
        /// Position the enemy occupied before moving.
        from: GridVector,
        /// Position the enemy occupies after the move.
        to: GridVector,
    },
    /// Announces that the walkability gate changed.
    WalkabilityPolicyChanged {
        /// Policy that became active.
        policy: WalkabilityPolicy,
    },
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Grid position currently occupied by the enemy.
    pub position: GridVector,
}

/// Read-only snapshot describing all enemies in the world.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}
