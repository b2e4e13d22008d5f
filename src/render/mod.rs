mod headless;
mod primitives;

pub use headless::{HeadlessNode, HeadlessSurface};
pub use primitives::{ElementId, ElementKind, LayoutVariable, Pane, PaneHandles, ScrollAxis};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// The engine works on a retained element tree: it creates elements once,
/// repositions them on zoom/resize, and clears whole panes on full re-render.
/// Operations are infallible at this layer; backend failures are the host's
/// concern. Only `mount` reports errors since it binds to host resources.
pub trait Surface {
    /// Builds the static chart skeleton and returns its pane handles.
    fn mount(&mut self) -> ChartResult<PaneHandles>;

    fn create_element(&mut self, kind: ElementKind) -> ElementId;

    /// Appends `child` to `parent`, detaching it from any previous parent.
    fn append(&mut self, parent: ElementId, child: ElementId);

    /// Removes every descendant of `parent`.
    fn clear(&mut self, parent: ElementId);

    fn set_position(&mut self, element: ElementId, left: f64, top: f64);

    /// Sets pixel size; `None` leaves that dimension to the backend's styling.
    fn set_size(&mut self, element: ElementId, width: Option<f64>, height: Option<f64>);

    fn set_text(&mut self, element: ElementId, text: &str);

    fn set_variable(&mut self, variable: LayoutVariable, value_px: f64);

    fn set_scroll(&mut self, pane: Pane, axis: ScrollAxis, offset: f64);
}
