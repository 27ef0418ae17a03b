#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering shell for Grid Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.

use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use gridsnake_core::{Direction, GridPosition};
use gridsnake_rendering::{
    control_hints, palette, score_label, status_banner, Color, FrameInput, GridPresentation,
    Presentation, RenderingBackend, Scene,
};
use macroquad::input::{is_key_pressed, KeyCode};

const SCORE_FONT_SIZE: f32 = 18.0;
const HINT_FONT_SIZE: f32 = 20.0;
const BANNER_FONT_SIZE: f32 = 36.0;

/// Pixels shaved off a ground cell so the checkerboard shows seams.
const GROUND_INSET: f32 = 1.0;
/// Pixels shaved off food and snake rectangles inside their cell.
const ACTOR_INSET: f32 = 2.0;
/// Amount the head rectangle is lightened relative to the body.
const HEAD_LIGHTEN: f32 = 0.25;

/// Snapshot of edge-triggered keyboard shortcuts observed during one frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the frame loop.
    quit_requested: bool,
    /// `P` toggles between pause and resume.
    toggle_pause: bool,
    /// `R` restarts the round.
    restart: bool,
    /// Arrow keys or WASD request a travel direction.
    direction: Option<Direction>,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let toggle_pause = is_key_pressed(KeyCode::P);
        let restart = is_key_pressed(KeyCode::R);
        let direction = direction_from_flags(
            is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W),
            is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S),
            is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A),
            is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D),
        );

        Self {
            quit_requested,
            toggle_pause,
            restart,
            direction,
        }
    }
}

fn direction_from_flags(up: bool, down: bool, left: bool, right: bool) -> Option<Direction> {
    if up {
        Some(Direction::Up)
    } else if down {
        Some(Direction::Down)
    } else if left {
        Some(Direction::Left)
    } else if right {
        Some(Direction::Right)
    } else {
        None
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Configures the backend to request a specific swap interval from the
    /// platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: i32) -> Self {
        self.swap_interval = Some(swap_interval);
        self
    }

    /// Configures whether the backend prints frame timing metrics once per
    /// second.
    #[must_use]
    pub fn with_show_fps(mut self, show_fps: bool) -> Self {
        self.show_fps = show_fps;
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
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.grid.width().round() as i32,
            window_height: scene.grid.height().round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = FrameInput {
                    direction: keyboard.direction,
                    toggle_pause: keyboard.toggle_pause,
                    restart: keyboard.restart,
                };

                update_scene(frame_dt, frame_input, &mut scene);

                draw_ground(&scene.grid);
                draw_food(&scene);
                draw_snake(&scene);
                draw_overlay_text(&scene);

                if show_fps {
                    if let Some(frames_per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {frames_per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn draw_ground(grid: &GridPresentation) {
    let side = grid.cell_size() - GROUND_INSET;
    for column in 0..grid.columns() {
        for row in 0..grid.rows() {
            let origin = grid.cell_origin(GridPosition::new(column as i32, row as i32));
            let color = grid.checker_color(column, row);
            draw_cell_rect(origin, Vec2::ZERO, side, color);
        }
    }
}

fn draw_food(scene: &Scene) {
    let side = scene.grid.cell_size() - ACTOR_INSET;
    let origin = scene.grid.cell_origin(scene.food);
    draw_cell_rect(origin, Vec2::splat(ACTOR_INSET / 2.0), side, palette::FOOD);
}

fn draw_snake(scene: &Scene) {
    let side = scene.grid.cell_size() - ACTOR_INSET;
    let inset = Vec2::splat(ACTOR_INSET / 2.0);
    for (index, segment) in scene.snake.iter().enumerate() {
        let color = if index == 0 {
            palette::SNAKE_BODY.lighten(HEAD_LIGHTEN)
        } else {
            palette::SNAKE_BODY
        };
        let origin = scene.grid.cell_origin(*segment);
        draw_cell_rect(origin, inset, side, color);
    }
}

fn draw_cell_rect(origin: Vec2, inset: Vec2, side: f32, color: Color) {
    macroquad::shapes::draw_rectangle(
        origin.x + inset.x,
        origin.y + inset.y,
        side,
        side,
        to_macroquad_color(color),
    );
}

fn draw_overlay_text(scene: &Scene) {
    let text_color = to_macroquad_color(palette::TEXT);
    macroquad::text::draw_text(
        &score_label(scene.score),
        8.0,
        4.0 + SCORE_FONT_SIZE,
        SCORE_FONT_SIZE,
        text_color,
    );

    macroquad::text::draw_text(
        control_hints(scene.status),
        8.0,
        scene.grid.height() - 8.0,
        HINT_FONT_SIZE,
        text_color,
    );

    if let Some(banner) = status_banner(scene.status) {
        let dimensions =
            macroquad::text::measure_text(banner, None, BANNER_FONT_SIZE as u16, 1.0);
        macroquad::text::draw_text(
            banner,
            (scene.grid.width() - dimensions.width) / 2.0,
            scene.grid.height() / 2.0 - 40.0,
            BANNER_FONT_SIZE,
            text_color,
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

/// Counts frames and reports the rate once per elapsed second.
#[derive(Debug, Default)]
struct FpsCounter {
    frames: u32,
    elapsed: Duration,
}

impl FpsCounter {
    fn record_frame(&mut self, dt: Duration) -> Option<f64> {
        self.frames += 1;
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }
        let frames_per_second = f64::from(self.frames) / self.elapsed.as_secs_f64();
        self.frames = 0;
        self.elapsed = Duration::ZERO;
        Some(frames_per_second)
    }
}
