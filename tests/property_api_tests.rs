use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use timeline_rs::api::{ChartConfig, ChartOptions, TimelineChart};
use timeline_rs::core::{
    CellGeometry, ChartData, CoordinateMapper, Entity, ManualClock, PixelPoint, ScrollPosition,
    StandardAccessor, TimeWindow, Viewport,
};
use timeline_rs::render::{HeadlessSurface, Pane, ScrollAxis};
use timeline_rs::virtualization::visible_row_range;

type Chart = TimelineChart<HeadlessSurface, StandardAccessor>;

const HOUR: i64 = 60 * 60 * 1000;

fn day_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0)
        .single()
        .expect("valid time")
}

fn rendered_chart(entity_count: usize) -> Chart {
    rendered_chart_with(entity_count, ChartConfig::default(), ManualClock::starting_at(day_start()))
}

fn rendered_chart_with(entity_count: usize, config: ChartConfig, clock: ManualClock) -> Chart {
    let mut chart: Chart = TimelineChart::new(HeadlessSurface::new(), StandardAccessor::new())
        .with_clock(clock);
    chart.create(Viewport::new(1000, 600)).expect("create");
    chart
        .set_options(ChartOptions::from_config(
            config.with_time_range(day_start(), day_start() + Duration::hours(24)),
        ))
        .expect("options");
    chart.set_data(ChartData::new(
        (0..entity_count)
            .map(|index| Entity::new(format!("entity-{index}")))
            .collect(),
    ));
    chart.render().expect("render");
    chart
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scroll_stays_inside_canvas_and_panes_agree(
        left in -10_000.0f64..10_000.0,
        top in -10_000.0f64..10_000.0
    ) {
        let mut chart = rendered_chart(100);
        let applied = chart.scroll_to(ScrollPosition::new(left, top)).expect("scroll");
        let snapshot = chart.snapshot();
        let max_left = snapshot.canvas.width - snapshot.canvas_box.width;
        let max_top = snapshot.canvas.height - snapshot.canvas_box.height;

        prop_assert!((0.0..=max_left).contains(&applied.left));
        prop_assert!((0.0..=max_top).contains(&applied.top));

        let surface = chart.surface();
        prop_assert_eq!(surface.scroll(Pane::ColumnHeader, ScrollAxis::Horizontal), applied.left);
        prop_assert_eq!(surface.scroll(Pane::SideCanvas, ScrollAxis::Horizontal), applied.left);
        prop_assert_eq!(surface.scroll(Pane::EntityList, ScrollAxis::Vertical), applied.top);
    }

    #[test]
    fn visible_rows_are_always_painted(top in 0.0f64..4_000.0) {
        let mut chart = rendered_chart(100);
        let applied = chart.scroll_to(ScrollPosition::new(0.0, top)).expect("scroll");

        let snapshot = chart.snapshot();
        let visible = visible_row_range(applied.top, snapshot.canvas_box.height, 40.0, 100);
        let mut intersecting = chart.rows().intersecting();
        intersecting.sort_unstable();
        prop_assert_eq!(intersecting, visible.clone().collect::<Vec<_>>());
        for index in visible {
            let row = chart.rows().row(index).expect("row");
            prop_assert!(row.last_render.is_some());
        }
    }

    #[test]
    fn zoom_in_keeps_pivot_content_fixed(
        scroll_left in 0.0f64..1_000.0,
        pivot_offset in 0.0f64..785.0
    ) {
        let mut chart = rendered_chart(100);
        let before = chart.scroll_to(ScrollPosition::new(scroll_left, 0.0)).expect("scroll");
        let pivot_x = before.left + pivot_offset;
        let time_under_pivot = chart.mapper().time_at_x(pivot_x);

        prop_assert!(chart.zoom_in(Some(PixelPoint::new(pivot_x, 0.0))).expect("zoom"));

        let after = chart.scroll_position();
        let time_after = chart.mapper().time_at_x(after.left + pivot_offset);
        prop_assert!((time_after - time_under_pivot).abs() < 1e-2);
    }

    #[test]
    fn clipped_ranges_stay_inside_canvas(
        start_hours in -48i64..48,
        length_minutes in 0i64..6_000,
        row in 0usize..50
    ) {
        let window = TimeWindow::from_millis(0, 24 * HOUR, 30.0, 2).expect("window");
        let mapper = CoordinateMapper::new(window, CellGeometry::default());
        let start = start_hours * HOUR;
        let end = start + length_minutes * 60 * 1000;
        prop_assume!(window.overlaps(start, end));

        let placement = mapper.range(start, end, row);
        let canvas = mapper.canvas_size(50);
        prop_assert!(placement.left >= 0.0);
        prop_assert!(placement.width >= 0.0);
        prop_assert!(placement.left + placement.width <= canvas.width + 1e-9);
        prop_assert!(placement.top + placement.height <= canvas.height);
    }

    #[test]
    fn ranges_spanning_the_padded_window_fill_the_canvas(
        before_ms in 1i64..(48 * HOUR),
        after_ms in 1i64..(48 * HOUR),
        cell_width in 10.0f64..200.0,
        cell_minutes in prop::sample::select(vec![15.0f64, 30.0, 60.0]),
        padding in 0u32..4
    ) {
        let window = TimeWindow::from_millis(0, 24 * HOUR, cell_minutes, padding).expect("window");
        let mapper = CoordinateMapper::new(
            window,
            CellGeometry {
                cell_width,
                ..CellGeometry::default()
            },
        );
        let (render_start, render_end) = window.render_millis();

        let placement = mapper.range(render_start - before_ms, render_end + after_ms, 3);
        let canvas = mapper.canvas_size(10);

        prop_assert_eq!(placement.left, 0.0);
        prop_assert!((placement.width - canvas.width).abs() <= 1e-9 * canvas.width);
    }

    #[test]
    fn zoom_in_then_out_restores_cell_size(steps in 1usize..=8, gap_ms in 0i64..=300) {
        let clock = ManualClock::starting_at(day_start());
        let mut chart = rendered_chart_with(20, ChartConfig::default(), clock.clone());

        for _ in 0..steps {
            prop_assert!(chart.zoom_in(None).expect("in"));
            clock.advance_millis(gap_ms);
        }
        for _ in 0..steps {
            chart.zoom_out(None).expect("out");
            clock.advance_millis(gap_ms);
        }

        prop_assert!((chart.zoom_scale() - 1.0).abs() < 1e-9);
        prop_assert!((chart.cell_width() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_scale_never_leaves_bounds(
        max_scale in 1.0f64..5.0,
        in_steps in 1usize..30,
        out_steps in 0usize..30
    ) {
        let clock = ManualClock::starting_at(day_start());
        let mut chart = rendered_chart_with(
            20,
            ChartConfig {
                max_zoom_scale: Some(max_scale),
                ..ChartConfig::default()
            },
            clock.clone(),
        );

        for _ in 0..in_steps {
            chart.zoom_in(None).expect("in");
            prop_assert!(chart.zoom_scale() <= max_scale);
            clock.advance_millis(10);
        }
        for _ in 0..out_steps {
            chart.zoom_out(None).expect("out");
            prop_assert!(chart.zoom_scale() >= 1.0);
            clock.advance_millis(10);
        }
        prop_assert!(chart.cell_width() <= 40.0 * max_scale);
        prop_assert!(chart.cell_width() >= 40.0);
    }
}
