use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel convention: positive `delta_y` zooms out.
    #[must_use]
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 { Self::Out } else { Self::In }
    }

    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::In => 1.0,
            Self::Out => -1.0,
        }
    }
}

/// Controller button directions for step scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// Unit vector in scroll space; `Down`/`Right` increase the offsets.
    #[must_use]
    pub fn unit(self) -> (f64, f64) {
        match self {
            Self::Up => (0.0, -1.0),
            Self::Down => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
        }
    }
}

/// Tuning for accelerated zoom stepping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomAccelConfig {
    /// Velocity increment per zoom request, in zoom-scale units.
    pub step: f64,
    /// Pause after which accumulated velocity is dropped.
    pub reset_timeout_ms: i64,
}

impl Default for ZoomAccelConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            reset_timeout_ms: 300,
        }
    }
}

/// Public zoom acceleration runtime state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoomAccelState {
    pub velocity: f64,
    pub prev_direction: Option<ZoomDirection>,
    pub last_zoom_at: Option<DateTime<Utc>>,
}

/// Velocity proposed for one zoom request, applied only if the zoom proceeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStep {
    pub direction: ZoomDirection,
    pub velocity: f64,
    pub reset: bool,
}

/// Drag-pan and zoom-acceleration state of one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    mode: InteractionMode,
    zoom_config: ZoomAccelConfig,
    zoom: ZoomAccelState,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Idle,
            zoom_config: ZoomAccelConfig::default(),
            zoom: ZoomAccelState::default(),
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn zoom_config(self) -> ZoomAccelConfig {
        self.zoom_config
    }

    pub fn set_zoom_config(&mut self, config: ZoomAccelConfig) {
        self.zoom_config = config;
    }

    #[must_use]
    pub fn zoom_state(self) -> ZoomAccelState {
        self.zoom
    }

    /// Computes the velocity for the next zoom request without mutating state.
    ///
    /// Velocity restarts from zero when the direction flips or when more than
    /// `reset_timeout_ms` elapsed since the last applied zoom.
    #[must_use]
    pub fn propose_zoom_step(self, direction: ZoomDirection, now: DateTime<Utc>) -> ZoomStep {
        let reversed = self
            .zoom
            .prev_direction
            .is_some_and(|previous| previous != direction);
        let paused = self.zoom.last_zoom_at.is_some_and(|last| {
            (now - last).num_milliseconds() > self.zoom_config.reset_timeout_ms
        });
        let reset = reversed || paused;
        let base = if reset { 0.0 } else { self.zoom.velocity };
        ZoomStep {
            direction,
            velocity: base + direction.sign() * self.zoom_config.step,
            reset,
        }
    }

    pub fn commit_zoom_step(&mut self, step: ZoomStep, now: DateTime<Utc>) {
        self.zoom.velocity = step.velocity;
        self.zoom.prev_direction = Some(step.direction);
        self.zoom.last_zoom_at = Some(now);
    }

    pub fn on_pan_start(&mut self) {
        self.mode = InteractionMode::Panning;
    }

    pub fn on_pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    /// Scroll delta for a pointer movement; `None` unless the primary button
    /// is held. Content follows the pointer, so the sign is inverted.
    #[must_use]
    pub fn drag_scroll_delta(
        self,
        movement_x: f64,
        movement_y: f64,
        primary_pressed: bool,
    ) -> Option<(f64, f64)> {
        if !primary_pressed {
            return None;
        }
        Some((-movement_x, -movement_y))
    }
}
