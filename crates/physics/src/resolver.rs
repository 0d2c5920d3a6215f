//! Swept, axis-separated player movement against solid rectangles.
//!
//! Each step runs the horizontal phase to completion before the vertical
//! phase. Both phases decide the side of a collision from the position the
//! player held *before* the move, which keeps a fast fall from being
//! mistaken for a wall hit and stops the player tunnelling through corners.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Rect, SolidQuery};

/// Tunable movement constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Player body width.
    pub player_width: f64,
    /// Player body height.
    pub player_height: f64,
    /// Horizontal distance moved per step while a direction is held.
    pub move_speed: f64,
    /// Downward acceleration added to the vertical velocity each step.
    pub gravity: f64,
    /// Upward velocity applied by a jump.
    pub jump_power: f64,
    /// Terminal fall speed.
    pub max_fall_speed: f64,
    /// Optional world floor (y of the floor surface). The player rests on it.
    pub floor_y: Option<f64>,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            player_width: 50.0,
            player_height: 50.0,
            move_speed: 4.0,
            gravity: 0.5,
            jump_power: 12.0,
            max_fall_speed: 10.0,
            floor_y: None,
        }
    }
}

/// Kinematic state of the player body.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    /// Left edge in world units.
    pub x: f64,
    /// Top edge in world units.
    pub y: f64,
    /// Vertical speed; positive is downward.
    pub velocity_y: f64,
    /// True when the last vertical phase ended resting on a surface.
    pub on_ground: bool,
}

impl PlayerState {
    /// A motionless, airborne player at `(x, y)`.
    pub fn spawn_at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            velocity_y: 0.0,
            on_ground: false,
        }
    }

    /// The player's body rectangle.
    pub fn rect(&self, params: &PhysicsParams) -> Rect {
        Rect::new(self.x, self.y, params.player_width, params.player_height)
    }
}

/// Directional input for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveInput {
    /// Move toward -x.
    pub left: bool,
    /// Move toward +x.
    pub right: bool,
    /// Jump if grounded.
    pub jump: bool,
}

impl MoveInput {
    /// No keys held.
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        jump: false,
    };

    /// Net horizontal direction in {-1, 0, 1}.
    pub fn direction(&self) -> f64 {
        let mut dir = 0.0;
        if self.left {
            dir -= 1.0;
        }
        if self.right {
            dir += 1.0;
        }
        dir
    }
}

/// Inclusive horizontal range the player's body must stay within.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalBounds {
    /// Leftmost allowed x of the body's left edge.
    pub min_x: f64,
    /// Rightmost allowed x of the body's right edge.
    pub max_x: f64,
}

/// Advances [`PlayerState`] one step at a time.
#[derive(Debug, Clone, Default)]
pub struct PhysicsResolver {
    params: PhysicsParams,
}

impl PhysicsResolver {
    /// Create a resolver with the given constants.
    pub fn new(params: PhysicsParams) -> Self {
        Self { params }
    }

    /// Movement constants in use.
    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    /// Run one full step: horizontal phase, jump, vertical phase.
    pub fn step<W: SolidQuery + ?Sized>(
        &self,
        state: &mut PlayerState,
        input: MoveInput,
        world: &W,
        bounds: Option<HorizontalBounds>,
    ) {
        self.resolve_horizontal(state, input.direction() * self.params.move_speed, world);
        if let Some(bounds) = bounds {
            self.clamp_to_bounds(state, bounds);
        }

        if input.jump && state.on_ground {
            state.velocity_y = -self.params.jump_power;
            state.on_ground = false;
        }

        self.resolve_vertical(state, world);
    }

    /// Apply `dx` to x and push the player out of any block it now overlaps.
    pub fn resolve_horizontal<W: SolidQuery + ?Sized>(
        &self,
        state: &mut PlayerState,
        dx: f64,
        world: &W,
    ) {
        let old_x = state.x;
        state.x += dx;

        let width = self.params.player_width;
        let moved = state.rect(&self.params);
        for block in world.solids_overlapping(&moved) {
            if old_x <= block.x - width {
                state.x = block.x - width;
                trace!(x = state.x, "clamped left of block");
            } else if old_x >= block.right() {
                state.x = block.right();
                trace!(x = state.x, "clamped right of block");
            }
        }
    }

    /// Integrate gravity, apply the vertical velocity, and settle against blocks.
    pub fn resolve_vertical<W: SolidQuery + ?Sized>(&self, state: &mut PlayerState, world: &W) {
        state.velocity_y = (state.velocity_y + self.params.gravity).min(self.params.max_fall_speed);

        let old_y = state.y;
        state.y += state.velocity_y;
        state.on_ground = false;

        let height = self.params.player_height;
        let moved = state.rect(&self.params);
        for block in world.solids_overlapping(&moved) {
            if state.velocity_y > 0.0 && old_y <= block.y - height {
                state.y = block.y - height;
                state.velocity_y = 0.0;
                state.on_ground = true;
                trace!(y = state.y, "landed on block");
            } else if state.velocity_y < 0.0 && old_y >= block.bottom() {
                state.y = block.bottom();
                state.velocity_y = 0.0;
                trace!(y = state.y, "bumped block from below");
            }
        }

        if let Some(floor) = self.params.floor_y {
            if state.y > floor - height {
                state.y = floor - height;
                state.velocity_y = 0.0;
                state.on_ground = true;
            }
        }
    }

    fn clamp_to_bounds(&self, state: &mut PlayerState, bounds: HorizontalBounds) {
        if state.x < bounds.min_x {
            state.x = bounds.min_x;
        } else if state.x > bounds.max_x - self.params.player_width {
            state.x = bounds.max_x - self.params.player_width;
        }
    }
}
