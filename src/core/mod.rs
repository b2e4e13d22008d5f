pub mod clock;
pub mod data;
pub mod geometry;
pub mod time_units;
pub mod types;
pub mod window;
pub mod windowing;

pub use clock::{Clock, ManualClock, SystemClock};
pub use data::{ChartData, Entity, EntityAccessor, PointEvent, RangeEvent, StandardAccessor};
pub use geometry::{
    BORDER_COMPENSATION_PX, CellGeometry, CoordinateMapper, PointPlacement, RangePlacement,
};
pub use time_units::{datetime_to_millis, millis_to_datetime, to_millis, to_minutes};
pub use types::{CanvasSize, PixelPoint, ScrollPosition, Viewport};
pub use window::TimeWindow;
pub use windowing::{first_visible_event_time, visible_point_times, visible_range_starts};
