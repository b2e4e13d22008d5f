use tracing::debug;

use crate::core::{
    ChartData, Clock, CoordinateMapper, EntityAccessor, ScrollPosition, SystemClock, TimeWindow,
    Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartPlugin;
use crate::interaction::{InteractionState, ZoomAccelState};
use crate::render::{PaneHandles, Surface};
use crate::virtualization::RowPool;

use super::chart_state::ChartState;
use super::row_painter::{MountedLayers, Painter};
use super::validation::{validate_settings, validate_viewport};
use super::{ChartOptions, ChartRenderers, ChartSettings};

/// Main orchestration facade consumed by host applications.
///
/// `TimelineChart` owns the drawing surface, the resolved configuration, the
/// row pool and the zoom/scroll state. Lifecycle: [`Self::create`] once,
/// then any sequence of `set_options`, `set_data`, `render` and the
/// interaction entry points.
pub struct TimelineChart<S: Surface, A: EntityAccessor> {
    pub(super) surface: S,
    pub(super) accessor: A,
    pub(super) clock: Box<dyn Clock>,
    pub(super) state: ChartState,
    pub(super) interaction: InteractionState,
    pub(super) renderers: ChartRenderers<S, A>,
    pub(super) data: Option<ChartData<A>>,
    pub(super) panes: Option<PaneHandles>,
    pub(super) layers: MountedLayers,
    pub(super) rows: RowPool,
    pub(super) plugins: Vec<Box<dyn ChartPlugin>>,
}

impl<S: Surface, A: EntityAccessor> TimelineChart<S, A> {
    #[must_use]
    pub fn new(surface: S, accessor: A) -> Self {
        let state = ChartState::default();
        let mut interaction = InteractionState::default();
        interaction.set_zoom_config(state.settings.zoom_accel_config());
        Self {
            surface,
            accessor,
            clock: Box::new(SystemClock),
            state,
            interaction,
            renderers: ChartRenderers::default(),
            data: None,
            panes: None,
            layers: MountedLayers::default(),
            rows: RowPool::default(),
            plugins: Vec::new(),
        }
    }

    /// Replaces the wall clock used for zoom acceleration timing.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Mounts the chart skeleton on the surface. Must be called exactly once.
    pub fn create(&mut self, viewport: Viewport) -> ChartResult<()> {
        if self.panes.is_some() {
            return Err(ChartError::AlreadyCreated);
        }
        let viewport = validate_viewport(viewport)?;
        let panes = self.surface.mount()?;
        self.panes = Some(panes);
        self.state.viewport = viewport;
        Painter::new(
            &mut self.surface,
            &mut self.renderers,
            &self.accessor,
            &self.state,
            panes,
        )
        .publish_layout_variables();
        debug!(
            width = viewport.width,
            height = viewport.height,
            "timeline chart created"
        );
        Ok(())
    }

    /// Merges a configuration patch and render callbacks.
    ///
    /// The merged settings are validated before anything is applied, so a
    /// rejected patch leaves the chart untouched.
    pub fn set_options(&mut self, options: ChartOptions<S, A>) -> ChartResult<()> {
        let ChartOptions { config, renderers } = options;
        let next = config.merged_into(&self.state.settings);
        validate_settings(&next)?;
        let window = next.time_window()?;

        self.state
            .apply_settings(next, window, config.sets_cell_size());
        self.interaction
            .set_zoom_config(self.state.settings.zoom_accel_config());
        self.renderers.merge(renderers);

        if let Some(panes) = self.panes {
            Painter::new(
                &mut self.surface,
                &mut self.renderers,
                &self.accessor,
                &self.state,
                panes,
            )
            .publish_layout_variables();
        }
        debug!(
            cell_width = self.state.geometry.cell_width,
            cell_height = self.state.geometry.cell_height,
            cell_minutes = self.state.settings.cell_minutes,
            header_cells = self.state.window.header_cell_count(),
            "chart options applied"
        );
        Ok(())
    }

    /// Replaces the dataset. Does not render.
    pub fn set_data(&mut self, data: ChartData<A>) {
        debug!(
            entities = data.entities.len(),
            side_points = data.side_point_events.len(),
            global_ranges = data.global_range_events.len(),
            "chart data replaced"
        );
        self.data = Some(data);
    }

    #[must_use]
    pub fn data(&self) -> Option<&ChartData<A>> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        self.panes.is_some()
    }

    #[must_use]
    pub fn settings(&self) -> &ChartSettings {
        &self.state.settings
    }

    #[must_use]
    pub fn time_window(&self) -> TimeWindow {
        self.state.window
    }

    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        self.state.mapper()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.state.viewport
    }

    #[must_use]
    pub fn cell_width(&self) -> f64 {
        self.state.geometry.cell_width
    }

    #[must_use]
    pub fn cell_height(&self) -> f64 {
        self.state.geometry.cell_height
    }

    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        self.state.zoom_scale
    }

    #[must_use]
    pub fn zoom_state(&self) -> ZoomAccelState {
        self.interaction.zoom_state()
    }

    #[must_use]
    pub fn scroll_position(&self) -> ScrollPosition {
        self.state.scroll
    }

    /// Counter bumped on every zoom, resize or option change.
    #[must_use]
    pub fn geometry_epoch(&self) -> u64 {
        self.state.geometry_epoch
    }

    #[must_use]
    pub fn rows(&self) -> &RowPool {
        &self.rows
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    pub(super) fn require_created(&self) -> ChartResult<PaneHandles> {
        self.panes.ok_or(ChartError::NotCreated)
    }

    pub(super) fn entity_count(&self) -> usize {
        self.data
            .as_ref()
            .map_or(0, |data| data.entities.len())
    }
}
