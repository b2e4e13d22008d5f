use serde::{Deserialize, Serialize};

use crate::core::{ScrollPosition, Viewport};
use crate::interaction::{InteractionMode, ZoomDirection};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub cell_width: f64,
    pub cell_height: f64,
    pub zoom_scale: f64,
    pub scroll: ScrollPosition,
    pub entity_count: usize,
    pub intersecting_rows: usize,
    pub geometry_epoch: u64,
    pub interaction_mode: InteractionMode,
}

/// Lifecycle events exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    Rendered {
        entity_count: usize,
        header_cell_count: usize,
    },
    CanvasRendered,
    Refreshed {
        repositioned_rows: usize,
    },
    Zoomed {
        direction: ZoomDirection,
        scale: f64,
        velocity: f64,
    },
    Scrolled {
        left: f64,
        top: f64,
    },
    RowPainted {
        row: usize,
    },
    RowRepainted {
        row: usize,
    },
    Resized {
        viewport: Viewport,
    },
}

/// Extension hook interface for bounded custom logic.
///
/// Plugins observe lifecycle events and read chart context without mutating
/// engine internals.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: ChartEvent, context: PluginContext);
}
