use chrono::format::{Item, StrftimeItems};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

use super::ChartSettings;

pub(super) fn validate_viewport(viewport: Viewport) -> ChartResult<Viewport> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(viewport)
}

/// Checks merged settings before any of them is applied.
pub(super) fn validate_settings(settings: &ChartSettings) -> ChartResult<()> {
    for (name, value) in [
        ("cell_minutes", settings.cell_minutes),
        ("cell_width", settings.cell_width),
        ("cell_height", settings.cell_height),
        ("min_zoom_scale", settings.min_zoom_scale),
        ("max_zoom_scale", settings.max_zoom_scale),
        ("zoom_step", settings.zoom_step),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "`{name}` must be finite and > 0"
            )));
        }
    }

    for (name, value) in [
        ("left_panel_width", settings.left_panel_width),
        ("column_title_height", settings.column_title_height),
        ("column_header_height", settings.column_header_height),
        ("side_canvas_height", settings.side_canvas_height),
        ("scroll_width", settings.scroll_width),
        ("button_scroll_step_x", settings.button_scroll_step_x),
        ("button_scroll_step_y", settings.button_scroll_step_y),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "`{name}` must be finite and >= 0"
            )));
        }
    }

    for (name, value) in [
        (
            "side_canvas_content_height_ratio",
            settings.side_canvas_content_height_ratio,
        ),
        ("main_range_content_ratio", settings.main_range_content_ratio),
        ("main_point_content_ratio", settings.main_point_content_ratio),
    ] {
        if !value.is_finite() || value <= 0.0 || value > 1.0 {
            return Err(ChartError::InvalidData(format!(
                "`{name}` must be in (0, 1]"
            )));
        }
    }

    if !settings.entity_event_search_scroll_offset.is_finite() {
        return Err(ChartError::InvalidData(
            "`entity_event_search_scroll_offset` must be finite".to_owned(),
        ));
    }
    if settings.min_zoom_scale > settings.max_zoom_scale {
        return Err(ChartError::InvalidData(
            "`min_zoom_scale` must be <= `max_zoom_scale`".to_owned(),
        ));
    }
    if settings.accel_reset_timeout_ms < 0 {
        return Err(ChartError::InvalidData(
            "`accel_reset_timeout_ms` must be >= 0".to_owned(),
        ));
    }
    if settings.chart_end_time < settings.chart_start_time {
        return Err(ChartError::InvalidData(
            "`chart_end_time` must not precede `chart_start_time`".to_owned(),
        ));
    }
    if StrftimeItems::new(&settings.header_time_format).any(|item| matches!(item, Item::Error)) {
        return Err(ChartError::InvalidData(format!(
            "`header_time_format` is not a valid strftime pattern: {}",
            settings.header_time_format
        )));
    }
    Ok(())
}
