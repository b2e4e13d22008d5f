//! Optional feature modules live here.
//!
//! Extensions observe the engine or help renderers; they never reach into
//! core paths.

pub mod lazy_detail;
pub mod plugins;

pub use lazy_detail::LazyDetail;
pub use plugins::{ChartEvent, ChartPlugin, PluginContext};
