#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Tiny World.
//!
//! The world owns the cell arena, the player, and the enemies parsed from a
//! level. All mutation flows through [`apply`]; adapters and systems observe
//! state exclusively through the [`query`] module and the events produced by
//! each command.

mod level;

pub use level::{Level, LevelError};

use tinyworld_core::{Cell, Command, EnemyId, Event, GridVector, WalkabilityPolicy};

/// Represents the authoritative Tiny World game state.
#[derive(Debug)]
pub struct World {
    cells: Vec<Cell>,
    player: GridVector,
    enemies: Vec<Enemy>,
    policy: WalkabilityPolicy,
}

impl World {
    /// Creates a world from a parsed level.
    ///
    /// The player spawns at the level's start position and enemies receive
    /// identifiers in the order the level declared them. The world adopts
    /// ownership of every cell the level produced.
    #[must_use]
    pub fn from_level(level: Level) -> Self {
        let player = level.start();
        let enemies = level
            .enemies()
            .iter()
            .copied()
            .enumerate()
            .map(|(index, position)| Enemy {
                id: EnemyId::new(index as u32),
                position,
            })
            .collect();

        Self {
            player,
            enemies,
            cells: level.into_cells(),
            policy: WalkabilityPolicy::default(),
        }
    }

    fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|enemy| enemy.id == id)
    }

    /// A position is walkable when some cell occupies it and that cell's
    /// terrain kind permits walking. The infinite plain outside the loaded
    /// cells is not walkable terrain.
    fn is_walkable(&self, position: GridVector) -> bool {
        self.cells
            .iter()
            .any(|cell| cell.position() == position && cell.kind().is_walkable())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePlayer { direction } => {
            let from = world.player;
            let destination = from + direction.unit_offset();

            if world.policy == WalkabilityPolicy::SolidCells && !world.is_walkable(destination) {
                out_events.push(Event::PlayerBlocked {
                    direction,
                    at: destination,
                });
                return;
            }

            let mut touched = false;
            for enemy in &world.enemies {
                if enemy.position == destination {
                    touched = true;
                    out_events.push(Event::EnemyTouched {
                        enemy: enemy.id,
                        at: destination,
                    });
                }
            }

            // The revert is idempotent: however many enemies coincide with
            // the destination, the player ends the step back at `from`.
            if !touched {
                world.player = destination;
                out_events.push(Event::PlayerMoved {
                    from,
                    to: destination,
                });
            }
        }
        Command::StepEnemy { enemy, direction } => {
            if let Some(entity) = world.enemy_mut(enemy) {
                let from = entity.position;
                entity.position = from + direction.unit_offset();
                out_events.push(Event::EnemyAdvanced {
                    enemy,
                    from,
                    to: entity.position,
                });
            }
        }
        Command::SetWalkabilityPolicy { policy } => {
            world.policy = policy;
            out_events.push(Event::WalkabilityPolicyChanged { policy });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use tinyworld_core::{Cell, EnemySnapshot, EnemyView, GridVector, WalkabilityPolicy};

    /// Current position of the player, which also serves as the camera.
    #[must_use]
    pub fn player_position(world: &World) -> GridVector {
        world.player
    }

    /// Provides read-only access to the cell arena.
    #[must_use]
    pub fn cells(world: &World) -> &[Cell] {
        &world.cells
    }

    /// Captures a read-only view of the enemies inhabiting the world.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(
            world
                .enemies
                .iter()
                .map(|enemy| EnemySnapshot {
                    id: enemy.id,
                    position: enemy.position,
                })
                .collect(),
        )
    }

    /// Reports the movement gate currently applied to player steps.
    #[must_use]
    pub fn walkability_policy(world: &World) -> WalkabilityPolicy {
        world.policy
    }
}

#[derive(Clone, Copy, Debug)]
struct Enemy {
    id: EnemyId,
    position: GridVector,
}
