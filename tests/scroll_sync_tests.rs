use approx::assert_relative_eq;
use chrono::{DateTime, Duration, TimeZone, Utc};
use timeline_rs::ChartError;
use timeline_rs::api::{ChartConfig, ChartOptions, TimelineChart};
use timeline_rs::core::{
    ChartData, Entity, PointEvent, RangeEvent, ScrollPosition, StandardAccessor, Viewport,
};
use timeline_rs::interaction::{InteractionMode, ScrollDirection};
use timeline_rs::render::{HeadlessSurface, Pane, ScrollAxis};

type Chart = TimelineChart<HeadlessSurface, StandardAccessor>;

fn day_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
        .single()
        .expect("valid time")
}

fn rendered_chart(entities: Vec<Entity>, config: ChartConfig) -> Chart {
    let mut chart: Chart = TimelineChart::new(HeadlessSurface::new(), StandardAccessor::new());
    chart.create(Viewport::new(1000, 600)).expect("create");
    chart
        .set_options(ChartOptions::from_config(
            config.with_time_range(day_start(), day_start() + Duration::hours(24)),
        ))
        .expect("options");
    chart.set_data(ChartData::new(entities));
    chart.render().expect("render");
    chart
}

fn plain_entities(count: usize) -> Vec<Entity> {
    (0..count)
        .map(|index| Entity::new(format!("entity-{index}")))
        .collect()
}

fn assert_panes_follow(chart: &Chart, left: f64, top: f64) {
    let surface = chart.surface();
    assert_eq!(surface.scroll(Pane::MainCanvas, ScrollAxis::Horizontal), left);
    assert_eq!(surface.scroll(Pane::MainCanvas, ScrollAxis::Vertical), top);
    assert_eq!(surface.scroll(Pane::ColumnHeader, ScrollAxis::Horizontal), left);
    assert_eq!(surface.scroll(Pane::SideCanvas, ScrollAxis::Horizontal), left);
    assert_eq!(surface.scroll(Pane::EntityList, ScrollAxis::Vertical), top);
}

#[test]
fn main_canvas_scroll_is_mirrored_to_linked_panes() {
    let mut chart = rendered_chart(plain_entities(100), ChartConfig::default());

    let applied = chart
        .scroll_to(ScrollPosition::new(300.0, 500.0))
        .expect("scroll");

    assert_eq!(applied, ScrollPosition::new(300.0, 500.0));
    assert_eq!(chart.scroll_position(), applied);
    assert_panes_follow(&chart, 300.0, 500.0);
}

#[test]
fn scroll_is_clamped_to_canvas_extent() {
    let mut chart = rendered_chart(plain_entities(100), ChartConfig::default());

    // canvas 2080x4000, box 785x465
    let applied = chart
        .scroll_to(ScrollPosition::new(-50.0, 1e9))
        .expect("scroll");
    assert_eq!(applied, ScrollPosition::new(0.0, 3535.0));

    let applied = chart
        .scroll_to(ScrollPosition::new(1e9, f64::NAN))
        .expect("scroll");
    assert_eq!(applied, ScrollPosition::new(1295.0, 0.0));
    assert_panes_follow(&chart, 1295.0, 0.0);
}

#[test]
fn short_canvas_cannot_scroll_vertically() {
    let mut chart = rendered_chart(plain_entities(3), ChartConfig::default());
    let applied = chart.scroll_by(0.0, 250.0).expect("scroll");
    assert_eq!(applied.top, 0.0);
}

#[test]
fn drag_pans_while_primary_button_is_held() {
    let mut chart = rendered_chart(plain_entities(100), ChartConfig::default());

    chart.on_pointer_down();
    assert_eq!(chart.interaction_mode(), InteractionMode::Panning);

    let moved = chart
        .on_pointer_move(-30.0, -20.0, true)
        .expect("drag")
        .expect("button held");
    assert_eq!(moved, ScrollPosition::new(30.0, 20.0));

    assert_eq!(chart.on_pointer_move(10.0, 10.0, false).expect("hover"), None);
    assert_eq!(chart.scroll_position(), ScrollPosition::new(30.0, 20.0));

    chart.on_pointer_up();
    assert_eq!(chart.interaction_mode(), InteractionMode::Idle);
}

#[test]
fn controller_buttons_step_by_configured_amounts() {
    let mut chart = rendered_chart(plain_entities(100), ChartConfig::default());

    assert_eq!(
        chart.step_scroll(ScrollDirection::Right).expect("right"),
        ScrollPosition::new(400.0, 0.0)
    );
    assert_eq!(
        chart.step_scroll(ScrollDirection::Down).expect("down"),
        ScrollPosition::new(400.0, 200.0)
    );
    assert_eq!(
        chart
            .step_scroll_repeat(ScrollDirection::Right)
            .expect("hold right"),
        ScrollPosition::new(600.0, 200.0)
    );
    assert_eq!(
        chart.step_scroll(ScrollDirection::Left).expect("left"),
        ScrollPosition::new(200.0, 200.0)
    );
    assert_eq!(
        chart.step_scroll(ScrollDirection::Up).expect("up"),
        ScrollPosition::new(200.0, 0.0)
    );
}

#[test]
fn entity_list_wheel_scrolls_main_canvas() {
    let mut chart = rendered_chart(plain_entities(100), ChartConfig::default());

    let applied = chart.on_entity_list_wheel(120.0).expect("wheel");

    assert_eq!(applied, ScrollPosition::new(0.0, 120.0));
    assert_panes_follow(&chart, 0.0, 120.0);
    assert_eq!(chart.rows().intersecting(), (3..15).collect::<Vec<_>>());
}

#[test]
fn focus_entity_scrolls_to_earliest_visible_event() {
    let entities = vec![
        Entity::new("mixed")
            .with_point_event(PointEvent::at(day_start() + Duration::hours(1)))
            .with_range_event(RangeEvent::between(
                day_start() + Duration::hours(2),
                day_start() + Duration::hours(4),
            )),
        Entity::new("late").with_point_event(PointEvent::at(day_start() + Duration::hours(10))),
        Entity::new("idle"),
        Entity::new("early").with_range_event(RangeEvent::between(
            day_start() - Duration::minutes(30),
            day_start() + Duration::hours(3),
        )),
    ];
    let mut chart = rendered_chart(entities, ChartConfig::default());

    // 1h after start = 4 cells from the padded origin, minus the 100px offset
    let focused = chart.focus_entity(0).expect("focus").expect("has events");
    assert_eq!(focused.left, 60.0);

    let focused = chart.focus_entity(1).expect("focus").expect("has events");
    assert_eq!(focused.left, 880.0 - 100.0);

    assert_eq!(chart.focus_entity(2).expect("focus"), None);

    // 40px minus the offset is negative, clamped at zero
    let focused = chart.focus_entity(3).expect("focus").expect("has events");
    assert_eq!(focused.left, 0.0);

    let err = chart.focus_entity(9).expect_err("out of range");
    assert!(matches!(err, ChartError::InvalidRow { index: 9, len: 4 }));
}

#[test]
fn resize_updates_canvas_box_and_visible_rows() {
    let mut chart = rendered_chart(plain_entities(100), ChartConfig::default());
    let epoch = chart.geometry_epoch();

    chart.resize(Viewport::new(1200, 800)).expect("resize");

    assert_eq!(chart.viewport(), Viewport::new(1200, 800));
    // 800 - 120 - 15 = 665 -> ceil(665 / 40) rows
    assert_eq!(chart.rows().intersecting(), (0..17).collect::<Vec<_>>());
    assert_eq!(chart.geometry_epoch(), epoch);

    let err = chart.resize(Viewport::new(0, 0)).expect_err("empty viewport");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn auto_width_refits_cells_on_resize() {
    let mut chart = rendered_chart(
        plain_entities(10),
        ChartConfig {
            column_auto_width: Some(true),
            ..ChartConfig::default()
        },
    );
    assert_relative_eq!(chart.cell_width(), 785.0 / 52.0, epsilon = 1e-9);

    let epoch = chart.geometry_epoch();
    chart.resize(Viewport::new(1200, 600)).expect("resize");

    assert_relative_eq!(chart.cell_width(), 985.0 / 52.0, epsilon = 1e-9);
    assert!(chart.geometry_epoch() > epoch);
}

#[test]
fn scroll_before_create_is_rejected() {
    let mut chart: Chart = TimelineChart::new(HeadlessSurface::new(), StandardAccessor::new());
    let err = chart
        .scroll_to(ScrollPosition::new(10.0, 10.0))
        .expect_err("not created");
    assert!(matches!(err, ChartError::NotCreated));
}
