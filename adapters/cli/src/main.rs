#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Tiny World experience.
//!
//! The binary loads the run configuration and the level, then hands a frame
//! closure to the rendering backend. Each frame: directional input becomes
//! player move commands, the resulting events feed the pursuit system, its
//! step commands are applied, and the culling pass rebuilds the scene.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use tinyworld_core::{Command, Event, GridVector, VisualKind, WalkabilityPolicy};
use tinyworld_rendering::{Color, Presentation, RenderingBackend, Scene, SpriteInstance};
use tinyworld_rendering_macroquad::MacroquadBackend;
use tinyworld_system_pursuit::Pursuit;
use tinyworld_system_visibility::Viewport;
use tinyworld_world::{self as world, query, Level, World};

use crate::config::RunConfig;

/// Background grey behind the visible tiles.
const CLEAR_COLOR: Color = Color::from_rgb_u8(50, 50, 50);

#[derive(Debug, Parser)]
#[command(name = "tinyworld", about = "A tiny tile-based exploration game")]
struct Args {
    /// Path to a TOML run configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Level file to load, overriding the configuration.
    #[arg(long)]
    level: Option<PathBuf>,
    /// Restore the walkability gate from the earliest iteration.
    #[arg(long)]
    solid_cells: bool,
    /// Print a frame-rate line once per second.
    #[arg(long)]
    show_fps: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = RunConfig::load(args.config.as_deref())?;

    let level_path = args.level.unwrap_or_else(|| config.level.clone());
    let level = Level::from_path(&level_path)
        .with_context(|| format!("failed to load level from {}", level_path.display()))?;

    let viewport = Viewport::new(config.view_size(), config.cell_size)?;

    let mut world = World::from_level(level);
    if args.solid_cells || config.walkability == WalkabilityPolicy::SolidCells {
        let mut events = Vec::new();
        world::apply(
            &mut world,
            Command::SetWalkabilityPolicy {
                policy: WalkabilityPolicy::SolidCells,
            },
            &mut events,
        );
    }

    let (window_width, window_height) = viewport.window_size_px();
    let presentation = Presentation::new(
        config.window_title.clone(),
        CLEAR_COLOR,
        window_width,
        window_height,
        Scene::new(config.cell_size as f32),
    );

    let backend = MacroquadBackend::new()
        .with_vsync(config.vsync)
        .with_show_fps(args.show_fps);

    let pursuit = Pursuit::default();
    let mut events = Vec::new();
    let mut commands = Vec::new();

    backend.run(presentation, move |_dt, input, scene| {
        events.clear();
        // Each directional event is one complete interaction step: the
        // player moves, then every enemy takes its pursuit step, before the
        // next event is considered.
        for direction in input.steps {
            let step_start = events.len();
            world::apply(&mut world, Command::MovePlayer { direction }, &mut events);

            commands.clear();
            pursuit.handle(
                &events[step_start..],
                &query::enemy_view(&world),
                &mut commands,
            );
            for command in commands.drain(..) {
                world::apply(&mut world, command, &mut events);
            }
        }

        for event in &events {
            if let Event::EnemyTouched { .. } = event {
                println!("Touched enemy");
            }
        }

        populate_scene(&world, &viewport, scene);
    })
}

/// Rebuilds the scene for the current frame: visible cells first, enemies on
/// top, and the player pinned to the viewport centre.
fn populate_scene(world: &World, viewport: &Viewport, scene: &mut Scene) {
    scene.sprites.clear();
    let camera = query::player_position(world);

    let cells = query::cells(world)
        .iter()
        .map(|cell| (cell.kind(), cell.position()));
    scene
        .sprites
        .extend(viewport.cull(camera, cells).map(to_instance));

    let enemies = query::enemy_view(world);
    let enemy_candidates = enemies
        .iter()
        .map(|enemy| (VisualKind::Enemy, enemy.position));
    scene
        .sprites
        .extend(viewport.cull(camera, enemy_candidates).map(to_instance));

    scene.sprites.push(SpriteInstance::new(
        VisualKind::Player,
        to_screen(viewport.center_offset()),
    ));
}

fn to_instance(sprite: tinyworld_system_visibility::Sprite) -> SpriteInstance {
    SpriteInstance::new(sprite.kind, to_screen(sprite.offset))
}

fn to_screen(offset: GridVector) -> Vec2 {
    Vec2::new(offset.x() as f32, offset.y() as f32)
}
