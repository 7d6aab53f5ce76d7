#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Tiny World.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The backend owns the window lifecycle: it creates a fixed-size,
//! non-resizable window, polls the keyboard once per frame, and terminates
//! on escape or window close. Directional presses are forwarded to the
//! simulation through [`FrameInput`]; everything else stays here.

mod assets;

pub use self::assets::AssetRegistry;

use anyhow::{Context, Result};
use macroquad::input::{is_key_pressed, KeyCode};
use std::{path::PathBuf, sync::mpsc, time::Duration};
use tinyworld_core::Direction;
use tinyworld_rendering::{Color, FrameInput, Presentation, RenderingBackend, Scene};

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    assets_dir: PathBuf,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            assets_dir: AssetRegistry::default_assets_dir(),
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the
    /// platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible. Synchronised
    /// presentation is how the 60 Hz frame cap is realised on stock
    /// displays.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints a frame-rate line once per
    /// second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Overrides the directory textures are resolved from.
    #[must_use]
    pub fn with_assets_dir(mut self, assets_dir: PathBuf) -> Self {
        self.assets_dir = assets_dir;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            assets_dir,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            window_width,
            window_height,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        // Asset loading happens inside the window closure where a GL context
        // exists; failures are reported back out through the channel so the
        // caller still observes them as a fatal result.
        let (init_sender, init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let registry = match AssetRegistry::from_assets_dir(&assets_dir)
                .context("failed to initialise asset registry")
            {
                Ok(registry) => registry,
                Err(error) => {
                    let _ = init_sender.send(Err(error));
                    return;
                }
            };
            let _ = init_sender.send(Ok(()));

            let background = to_macroquad_color(clear_color);
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = poll_frame_input();

                update_scene(frame_dt, frame_input, &mut scene);

                draw_scene(&registry, &scene);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }

            registry.dispose();
        });

        match init_receiver.try_recv() {
            Ok(result) => result,
            Err(_) => Ok(()),
        }
    }
}

fn draw_scene(registry: &AssetRegistry, scene: &Scene) {
    let dest_size = macroquad::math::Vec2::new(scene.sprite_size_px, scene.sprite_size_px);
    for instance in &scene.sprites {
        // Every kind is preloaded, so a miss is impossible; skipping keeps
        // the draw path infallible.
        let Some(texture) = registry.texture(instance.kind) else {
            continue;
        };
        macroquad::texture::draw_texture_ex(
            texture,
            instance.position.x,
            instance.position.y,
            macroquad::color::WHITE,
            macroquad::texture::DrawTextureParams {
                dest_size: Some(dest_size),
                ..macroquad::texture::DrawTextureParams::default()
            },
        );
    }
}

/// Edge-triggered directional polling in a fixed, deterministic order.
fn poll_frame_input() -> FrameInput {
    let mut steps = Vec::new();
    if is_key_pressed(KeyCode::Up) {
        steps.push(Direction::Up);
    }
    if is_key_pressed(KeyCode::Down) {
        steps.push(Direction::Down);
    }
    if is_key_pressed(KeyCode::Left) {
        steps.push(Direction::Left);
    }
    if is_key_pressed(KeyCode::Right) {
        steps.push(Direction::Right);
    }
    FrameInput { steps }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second average once one
    /// second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();

        for _ in 0..59 {
            assert_eq!(counter.record_frame(Duration::from_millis(16)), None);
        }
        let per_second = counter
            .record_frame(Duration::from_millis(64))
            .expect("a full second elapsed");
        assert!(per_second > 0.0);

        // The window resets after reporting.
        assert_eq!(counter.record_frame(Duration::from_millis(16)), None);
    }

    #[test]
    fn color_conversion_preserves_channels() {
        let converted = to_macroquad_color(Color::from_rgb_u8(50, 50, 50));

        assert!((converted.r - 50.0 / 255.0).abs() < 1e-6);
        assert!((converted.g - 50.0 / 255.0).abs() < 1e-6);
        assert!((converted.b - 50.0 / 255.0).abs() < 1e-6);
        assert_eq!(converted.a, 1.0);
    }
}
