#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tiny World adapters.
//!
//! The core emits draw requests; a backend implementing
//! [`RenderingBackend`] owns the window, polls input, and composites the
//! requests to a surface at a fixed frame-rate cap. Nothing in this crate
//! touches a graphics API.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use tinyworld_core::{Direction, VisualKind};

/// Every renderable kind, in the order backends preload assets.
pub const ALL_VISUAL_KINDS: [VisualKind; 5] = [
    VisualKind::Player,
    VisualKind::Enemy,
    VisualKind::Grass,
    VisualKind::Wood,
    VisualKind::Water,
];

/// Canonical asset name for a renderable kind.
///
/// The mapping is total and injective: every kind resolves to exactly one
/// name and no two kinds share one. Backends load `assets/<name>.png`.
#[must_use]
pub const fn asset_name(kind: VisualKind) -> &'static str {
    match kind {
        VisualKind::Player => "player",
        VisualKind::Enemy => "enemy",
        VisualKind::Grass => "grass",
        VisualKind::Wood => "wood",
        VisualKind::Water => "water",
    }
}

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// A single culled draw request: which kind, and where on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInstance {
    /// Renderable kind resolved through the asset mapping.
    pub kind: VisualKind,
    /// Top-left corner of the sprite in screen-space pixels.
    pub position: Vec2,
}

impl SpriteInstance {
    /// Creates a new draw request.
    #[must_use]
    pub const fn new(kind: VisualKind, position: Vec2) -> Self {
        Self { kind, position }
    }
}

/// Scene content rebuilt by the simulation each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Draw requests in back-to-front order.
    pub sprites: Vec<SpriteInstance>,
    /// Side length of a sprite in pixels; sprites are square cells.
    pub sprite_size_px: f32,
}

impl Scene {
    /// Creates an empty scene whose sprites are drawn at the given size.
    #[must_use]
    pub const fn new(sprite_size_px: f32) -> Self {
        Self {
            sprites: Vec::new(),
            sprite_size_px,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Fixed window width in pixels; the window is not resizable.
    pub window_width: i32,
    /// Fixed window height in pixels; the window is not resizable.
    pub window_height: i32,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        window_width: i32,
        window_height: i32,
        scene: Scene,
    ) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            window_width,
            window_height,
            scene,
        }
    }
}

/// Input snapshot gathered by the backend before updating the scene.
///
/// Directional events are edge-triggered: each entry is one discrete step.
/// Window-close and escape never reach the simulation; the backend owns
/// them and terminates the loop.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Directional steps detected this frame, in polling order.
    pub steps: Vec<Direction>,
}

/// Rendering backend capable of presenting Tiny World scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
