use crate::core::EntityAccessor;
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartEvent, ChartPlugin, PluginContext};
use crate::render::Surface;

use super::TimelineChart;

impl<S: Surface, A: EntityAccessor> TimelineChart<S, A> {
    /// Registers a plugin with unique identifier.
    pub fn register_plugin(&mut self, plugin: Box<dyn ChartPlugin>) -> ChartResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            return Err(ChartError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.has_plugin(&plugin_id) {
            return Err(ChartError::InvalidData(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        if let Some(position) = self
            .plugins
            .iter()
            .position(|entry| entry.id() == plugin_id)
        {
            self.plugins.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.plugins.iter().any(|plugin| plugin.id() == plugin_id)
    }

    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.state.viewport,
            cell_width: self.state.geometry.cell_width,
            cell_height: self.state.geometry.cell_height,
            zoom_scale: self.state.zoom_scale,
            scroll: self.state.scroll,
            entity_count: self.entity_count(),
            intersecting_rows: self.rows.intersecting_count(),
            geometry_epoch: self.state.geometry_epoch,
            interaction_mode: self.interaction.mode(),
        }
    }

    pub(super) fn emit_chart_event(&mut self, event: ChartEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
