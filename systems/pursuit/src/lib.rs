#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic pursuit system that proposes enemy steps toward the player.
//!
//! Pursuit is purely reactive: it consumes the event stream produced by the
//! world and emits one step command per enemy whenever the player actually
//! changed position. Every enemy's step is derived from the same post-move
//! player position, so enemies never react to each other.

use tinyworld_core::{Command, Direction, EnemyView, Event, GridVector};

/// Pure system that reacts to player movement and emits enemy step commands.
#[derive(Debug, Default)]
pub struct Pursuit;

impl Pursuit {
    /// Consumes world events and the enemy view to emit pursuit commands.
    ///
    /// Only [`Event::PlayerMoved`] triggers pursuit; a reverted or blocked
    /// player step produces no enemy movement that tick.
    pub fn handle(&self, events: &[Event], enemy_view: &EnemyView, out: &mut Vec<Command>) {
        for event in events {
            let Event::PlayerMoved { to, .. } = event else {
                continue;
            };

            for enemy in enemy_view.iter() {
                if let Some(direction) = pursuit_direction(enemy.position, *to) {
                    out.push(Command::StepEnemy {
                        enemy: enemy.id,
                        direction,
                    });
                }
            }
        }
    }
}

/// Greedy axis-priority chase rule.
///
/// The horizontal axis wins only on a strict majority; otherwise the enemy
/// closes vertically, but only while both components are nonzero. An enemy
/// aligned with the player on the x axis therefore holds still, a quirk
/// carried over from the reference behaviour.
fn pursuit_direction(enemy: GridVector, player: GridVector) -> Option<Direction> {
    let rel = enemy - player;

    if rel.x().abs() > rel.y().abs() {
        Some(if rel.x() < 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if rel.x() != 0 && rel.y() != 0 {
        Some(if rel.y() < 0 {
            Direction::Down
        } else {
            Direction::Up
        })
    } else {
        None
    }
}
