use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::EntityAccessor;
use crate::error::{ChartError, ChartResult};
use crate::render::Surface;

use super::{ChartRenderers, ChartSettings};

/// Partial configuration update.
///
/// Only `Some` fields overwrite the chart's current settings, so the same
/// chart can be reconfigured incrementally. Serialized form skips unset
/// fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_cell_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_panel_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_title_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_header_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_canvas_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_canvas_content_height_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_range_content_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_point_content_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_zoom_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_step: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accel_reset_timeout_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_horizontal_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_vertical_line: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_auto_width: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h_zoom_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_zoom_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_time_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_scroll_step_x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_scroll_step_y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_event_search_scroll_offset: Option<f64>,
}

impl ChartConfig {
    /// Parses a patch from JSON using snake_case keys.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse chart config: {e}")))
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart config: {e}")))
    }

    /// Sets the nominal chart window.
    #[must_use]
    pub fn with_time_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.chart_start_time = Some(start);
        self.chart_end_time = Some(end);
        self
    }

    #[must_use]
    pub fn with_cell_size(mut self, width: f64, height: f64) -> Self {
        self.cell_width = Some(width);
        self.cell_height = Some(height);
        self
    }

    #[must_use]
    pub fn with_cell_minutes(mut self, cell_minutes: f64) -> Self {
        self.cell_minutes = Some(cell_minutes);
        self
    }

    /// `true` when the patch sets an explicit cell size.
    #[must_use]
    pub fn sets_cell_size(&self) -> bool {
        self.cell_width.is_some() || self.cell_height.is_some()
    }

    /// Returns `base` with every `Some` field of this patch applied.
    #[must_use]
    pub fn merged_into(&self, base: &ChartSettings) -> ChartSettings {
        let mut next = base.clone();
        macro_rules! patch {
            ($($field:ident),+ $(,)?) => {
                $(
                    if let Some(value) = &self.$field {
                        next.$field = value.clone();
                    }
                )+
            };
        }
        patch!(
            chart_start_time,
            chart_end_time,
            padding_cell_count,
            main_title,
            column_title,
            left_panel_width,
            column_title_height,
            column_header_height,
            side_canvas_height,
            side_canvas_content_height_ratio,
            scroll_width,
            cell_minutes,
            cell_width,
            cell_height,
            main_range_content_ratio,
            main_point_content_ratio,
            min_zoom_scale,
            max_zoom_scale,
            zoom_step,
            accel_reset_timeout_ms,
            has_horizontal_line,
            has_vertical_line,
            column_auto_width,
            h_zoom_enabled,
            v_zoom_enabled,
            header_time_format,
            button_scroll_step_x,
            button_scroll_step_y,
            entity_event_search_scroll_offset,
        );
        next
    }
}

/// Argument of `TimelineChart::set_options`: a configuration patch plus
/// render callbacks merged the same way.
pub struct ChartOptions<S: Surface, A: EntityAccessor> {
    pub config: ChartConfig,
    pub renderers: ChartRenderers<S, A>,
}

impl<S: Surface, A: EntityAccessor> ChartOptions<S, A> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ChartConfig::default(),
            renderers: ChartRenderers::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: ChartConfig) -> Self {
        Self {
            config,
            renderers: ChartRenderers::default(),
        }
    }

    #[must_use]
    pub fn with_renderers(mut self, renderers: ChartRenderers<S, A>) -> Self {
        self.renderers = renderers;
        self
    }
}

impl<S: Surface, A: EntityAccessor> Default for ChartOptions<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface, A: EntityAccessor> From<ChartConfig> for ChartOptions<S, A> {
    fn from(config: ChartConfig) -> Self {
        Self::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;
    use crate::api::ChartSettings;

    #[test]
    fn unset_fields_keep_current_settings() {
        let base = ChartSettings {
            cell_width: 55.0,
            ..ChartSettings::default()
        };
        let patch = ChartConfig {
            cell_height: Some(30.0),
            ..ChartConfig::default()
        };

        let merged = patch.merged_into(&base);
        assert_eq!(merged.cell_width, 55.0);
        assert_eq!(merged.cell_height, 30.0);
        assert_eq!(merged.padding_cell_count, 2);
    }

    #[test]
    fn json_patch_parses_only_given_keys() {
        let patch = ChartConfig::from_json_str(
            r#"{ "cell_minutes": 60, "v_zoom_enabled": true, "chart_start_time": "2020-01-01T00:00:00Z" }"#,
        )
        .expect("valid patch");
        assert_eq!(patch.cell_minutes, Some(60.0));
        assert_eq!(patch.v_zoom_enabled, Some(true));
        assert!(patch.chart_start_time.is_some());
        assert!(patch.cell_width.is_none());
    }

    #[test]
    fn json_patch_rejects_unknown_keys() {
        assert!(ChartConfig::from_json_str(r#"{ "cellWidth": 10 }"#).is_err());
    }
}
