#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Grid Snake adapters.
//!
//! Backends receive a [`Presentation`] and drive a frame loop: each frame
//! they gather a [`FrameInput`], hand it with the frame delta to the update
//! closure, and then draw the repopulated [`Scene`]. Nothing in this crate
//! touches a window or an event queue.

use std::time::Duration;

use anyhow::Result;
use glam::Vec2;
use gridsnake_core::{Direction, GridPosition, GridSize, RoundStatus};

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

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Default colors used by backends that present the round.
pub mod palette {
    use super::Color;

    /// Window clear color behind the checkerboard.
    pub const BACKGROUND: Color = Color::from_rgb_u8(30, 30, 30);
    /// Checkerboard cells whose column and row indices share parity.
    pub const CHECKER_PRIMARY: Color = Color::from_rgb_u8(38, 38, 38);
    /// The remaining checkerboard cells.
    pub const CHECKER_SECONDARY: Color = Color::from_rgb_u8(34, 34, 34);
    /// Food rectangles.
    pub const FOOD: Color = Color::from_rgb_u8(200, 40, 40);
    /// Snake body rectangles; the head is drawn lightened.
    pub const SNAKE_BODY: Color = Color::from_rgb_u8(80, 180, 80);
    /// Score and hint text.
    pub const TEXT: Color = Color::from_rgb_u8(235, 235, 235);
}

/// Describes the cell grid that backends lay out in pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    columns: u32,
    rows: u32,
    cell_size: f32,
}

impl GridPresentation {
    /// Creates a presentation for the provided grid with square cells.
    #[must_use]
    pub const fn new(grid: GridSize, cell_size: f32) -> Self {
        Self {
            columns: grid.columns(),
            rows: grid.rows(),
            cell_size,
        }
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

    /// Side length of a single square cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Total width of the grid in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Total height of the grid in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Pixel-space origin of the cell at the provided position.
    #[must_use]
    pub fn cell_origin(&self, position: GridPosition) -> Vec2 {
        Vec2::new(
            position.column() as f32 * self.cell_size,
            position.row() as f32 * self.cell_size,
        )
    }

    /// Checkerboard color for the cell at the provided indices.
    #[must_use]
    pub fn checker_color(&self, column: u32, row: u32) -> Color {
        if (column + row) % 2 == 0 {
            palette::CHECKER_PRIMARY
        } else {
            palette::CHECKER_SECONDARY
        }
    }
}

/// Renderable snapshot of the round, rebuilt by the shell every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Pixel-space layout of the cell grid.
    pub grid: GridPresentation,
    /// Snake body segments, head first.
    pub snake: Vec<GridPosition>,
    /// Position of the current food item.
    pub food: GridPosition,
    /// Score accumulated during the round.
    pub score: u32,
    /// Lifecycle state of the round.
    pub status: RoundStatus,
}

impl Scene {
    /// Creates an empty scene for the provided grid layout.
    #[must_use]
    pub fn new(grid: GridPresentation) -> Self {
        Self {
            grid,
            snake: Vec::new(),
            food: GridPosition::new(0, 0),
            score: 0,
            status: RoundStatus::Running,
        }
    }
}

/// Input snapshot gathered by backends before updating the scene.
///
/// All actions are edge-triggered: they fire on the frame the key goes down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction requested by the player this frame, if any.
    pub direction: Option<Direction>,
    /// Whether the player asked to pause or resume the round.
    pub toggle_pause: bool,
    /// Whether the player asked to restart the round.
    pub restart: bool,
}

/// Top-level description of what a backend should present.
#[derive(Clone, Debug)]
pub struct Presentation {
    /// Title applied to the backend's window.
    pub window_title: String,
    /// Color used to clear the frame before drawing.
    pub clear_color: Color,
    /// Initial scene handed to the update closure each frame.
    pub scene: Scene,
}

/// Frame-loop contract implemented by concrete rendering backends.
pub trait RenderingBackend {
    /// Runs the frame loop until the player quits.
    ///
    /// The closure is invoked once per frame with the frame delta and the
    /// gathered input; it owns the simulation and repopulates the scene the
    /// backend draws afterwards.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Banner text drawn centered over the grid, if the status warrants one.
#[must_use]
pub fn status_banner(status: RoundStatus) -> Option<&'static str> {
    match status {
        RoundStatus::Ended => Some("Game Over"),
        RoundStatus::Running | RoundStatus::Paused => None,
    }
}

/// Key-binding hint line drawn along the bottom edge.
#[must_use]
pub fn control_hints(status: RoundStatus) -> &'static str {
    match status {
        RoundStatus::Running => "[Arrows / WASD] Move  [P] Pause  [R] Restart  [Esc] Quit",
        RoundStatus::Paused => "[P] Resume  [R] Restart  [Esc] Quit  (Paused)",
        RoundStatus::Ended => "[R] Restart  [Esc] Quit",
    }
}

/// Score line drawn in the top-left corner.
#[must_use]
pub fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_moves_channels_toward_white() {
        let color = Color::from_rgb_u8(80, 180, 80);
        let lightened = color.lighten(0.5);
        assert!(lightened.red > color.red);
        assert!(lightened.green > color.green);
        assert!(lightened.blue > color.blue);
        assert_eq!(lightened.alpha, color.alpha);
    }

    #[test]
    fn lighten_clamps_the_amount() {
        let color = Color::from_rgb_u8(10, 20, 30);
        let white = color.lighten(5.0);
        assert_eq!(white.red, 1.0);
        assert_eq!(white.green, 1.0);
        assert_eq!(white.blue, 1.0);
        assert_eq!(color.lighten(-1.0), color);
    }

    #[test]
    fn checker_colors_alternate_by_parity() {
        let grid = GridPresentation::new(GridSize::new(4, 4), 20.0);
        assert_eq!(grid.checker_color(0, 0), palette::CHECKER_PRIMARY);
        assert_eq!(grid.checker_color(1, 0), palette::CHECKER_SECONDARY);
        assert_eq!(grid.checker_color(1, 1), palette::CHECKER_PRIMARY);
    }

    #[test]
    fn cell_origin_scales_by_cell_size() {
        let grid = GridPresentation::new(GridSize::new(32, 24), 20.0);
        let origin = grid.cell_origin(GridPosition::new(3, 2));
        assert_eq!(origin, Vec2::new(60.0, 40.0));
        assert_eq!(grid.width(), 640.0);
        assert_eq!(grid.height(), 480.0);
    }

    #[test]
    fn banner_appears_only_after_the_round_ends() {
        assert_eq!(status_banner(RoundStatus::Running), None);
        assert_eq!(status_banner(RoundStatus::Paused), None);
        assert_eq!(status_banner(RoundStatus::Ended), Some("Game Over"));
    }

    #[test]
    fn hints_track_the_round_status() {
        assert!(control_hints(RoundStatus::Running).contains("[P] Pause"));
        assert!(control_hints(RoundStatus::Paused).contains("(Paused)"));
        assert!(control_hints(RoundStatus::Ended).starts_with("[R] Restart"));
    }

    #[test]
    fn score_label_formats_the_total() {
        assert_eq!(score_label(120), "Score: 120");
    }
}
