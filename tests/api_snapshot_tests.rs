use approx::assert_relative_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use timeline_rs::api::{ChartConfig, ChartOptions, ChartSnapshot, TimelineChart};
use timeline_rs::core::{ChartData, Entity, ManualClock, StandardAccessor, Viewport};
use timeline_rs::render::HeadlessSurface;

type Chart = TimelineChart<HeadlessSurface, StandardAccessor>;

fn day_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
        .single()
        .expect("valid time")
}

fn rendered_chart() -> Chart {
    let mut chart: Chart = TimelineChart::new(HeadlessSurface::new(), StandardAccessor::new())
        .with_clock(ManualClock::starting_at(day_start()));
    chart.create(Viewport::new(1000, 600)).expect("create");
    chart
        .set_options(ChartOptions::from_config(
            ChartConfig::default().with_time_range(day_start(), day_start() + Duration::hours(24)),
        ))
        .expect("options");
    chart.set_data(ChartData::new(
        (0..100)
            .map(|index| Entity::new(format!("entity-{index}")))
            .collect(),
    ));
    chart.render().expect("render");
    chart
}

#[test]
fn snapshot_reports_window_and_geometry() {
    let chart = rendered_chart();
    let snapshot = chart.snapshot();

    assert_eq!(snapshot.chart_start_time, day_start());
    assert_eq!(snapshot.render_start_time, day_start() - Duration::hours(1));
    assert_eq!(
        snapshot.render_end_time,
        day_start() + Duration::hours(25)
    );
    assert_eq!(snapshot.header_cell_count, 52.0);
    assert_eq!(snapshot.canvas.width, 2080.0);
    assert_eq!(snapshot.canvas.height, 4000.0);
    assert_eq!(snapshot.canvas_box.width, 785.0);
    assert_eq!(snapshot.canvas_box.height, 465.0);
    assert_eq!(snapshot.entity_count, 100);
    assert_eq!(snapshot.painted_rows, 12);
    assert_eq!(snapshot.intersecting_rows, (0..12).collect::<Vec<_>>());
    assert_eq!(snapshot.zoom_scale, 1.0);
}

#[test]
fn snapshot_json_roundtrip() {
    let mut chart = rendered_chart();
    chart.zoom_in(None).expect("zoom");

    let json = chart.snapshot_json_pretty().expect("serialize");
    let restored: ChartSnapshot = serde_json::from_str(&json).expect("deserialize");

    let snapshot = chart.snapshot();
    assert_eq!(restored.geometry_epoch, snapshot.geometry_epoch);
    assert_eq!(restored.intersecting_rows, snapshot.intersecting_rows);
    assert_eq!(restored.chart_end_time, snapshot.chart_end_time);
    assert_eq!(restored.zoom.prev_direction, snapshot.zoom.prev_direction);
    assert_eq!(restored.zoom.last_zoom_at, snapshot.zoom.last_zoom_at);
    assert_relative_eq!(restored.cell_width, snapshot.cell_width, epsilon = 1e-9);
    assert_relative_eq!(restored.canvas.width, snapshot.canvas.width, epsilon = 1e-9);
}

#[test]
fn snapshot_tracks_zoom_base_and_current_size() {
    let mut chart = rendered_chart();
    chart.zoom_in(None).expect("zoom");

    let snapshot = chart.snapshot();
    assert_eq!(snapshot.base_cell_width, 40.0);
    assert!(snapshot.cell_width > snapshot.base_cell_width);
    assert_eq!(snapshot.cell_height, snapshot.base_cell_height);
    assert!(snapshot.zoom.last_zoom_at.is_some());
}
