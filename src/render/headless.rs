use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::trace;

use crate::error::{ChartError, ChartResult};
use crate::render::{ElementId, ElementKind, LayoutVariable, Pane, PaneHandles, ScrollAxis, Surface};

/// One retained element of a [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessNode {
    pub kind: ElementKind,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub text: Option<String>,
}

impl HeadlessNode {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            left: None,
            top: None,
            width: None,
            height: None,
            text: None,
        }
    }
}

/// In-memory surface used by tests and headless hosts.
///
/// It keeps the full element tree so tests can assert geometry, and counts
/// element creation so incremental repaints can be told apart from rebuilds.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    nodes: IndexMap<ElementId, HeadlessNode>,
    next_id: u64,
    panes: Option<PaneHandles>,
    variables: IndexMap<LayoutVariable, f64>,
    scroll: IndexMap<(Pane, ScrollAxis), f64>,
    created_count: usize,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn panes(&self) -> Option<PaneHandles> {
        self.panes
    }

    #[must_use]
    pub fn node(&self, id: ElementId) -> Option<&HeadlessNode> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn children(&self, parent: ElementId) -> &[ElementId] {
        self.nodes
            .get(&parent)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Children of a mounted pane, in append order.
    #[must_use]
    pub fn pane_children(&self, pane: Pane) -> Vec<ElementId> {
        self.panes
            .map(|panes| self.children(panes.get(pane)).to_vec())
            .unwrap_or_default()
    }

    /// Live elements in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = (ElementId, &HeadlessNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Live elements of `kind`, in creation order.
    #[must_use]
    pub fn elements_of_kind(&self, kind: ElementKind) -> Vec<(ElementId, &HeadlessNode)> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.kind == kind)
            .map(|(id, node)| (*id, node))
            .collect()
    }

    #[must_use]
    pub fn count_of_kind(&self, kind: ElementKind) -> usize {
        self.nodes.values().filter(|node| node.kind == kind).count()
    }

    #[must_use]
    pub fn variable(&self, variable: LayoutVariable) -> Option<f64> {
        self.variables.get(&variable).copied()
    }

    #[must_use]
    pub fn scroll(&self, pane: Pane, axis: ScrollAxis) -> f64 {
        self.scroll.get(&(pane, axis)).copied().unwrap_or(0.0)
    }

    /// Total number of elements ever created, including removed ones.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.created_count
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks that every placed element has finite geometry.
    pub fn validate(&self) -> ChartResult<()> {
        for (id, node) in &self.nodes {
            for (field, value) in [
                ("left", node.left),
                ("top", node.top),
                ("width", node.width),
                ("height", node.height),
            ] {
                if let Some(value) = value {
                    if !value.is_finite() {
                        return Err(ChartError::InvalidData(format!(
                            "element {} has non-finite `{field}`",
                            id.raw()
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn allocate(&mut self, kind: ElementKind) -> ElementId {
        let id = ElementId::from_raw(self.next_id);
        self.next_id += 1;
        self.created_count += 1;
        self.nodes.insert(id, HeadlessNode::new(kind));
        id
    }

    /// Drops every node under `roots` in one pass over the map, keeping
    /// insertion order for the survivors.
    fn remove_subtrees(&mut self, roots: Vec<ElementId>) {
        let mut doomed = IndexSet::with_capacity(roots.len());
        let mut stack = roots;
        while let Some(id) = stack.pop() {
            if doomed.insert(id) {
                if let Some(node) = self.nodes.get(&id) {
                    stack.extend(node.children.iter().copied());
                }
            }
        }
        if doomed.is_empty() {
            return;
        }
        self.nodes.retain(|id, _| !doomed.contains(id));
    }
}

impl Surface for HeadlessSurface {
    fn mount(&mut self) -> ChartResult<PaneHandles> {
        if let Some(panes) = self.panes {
            return Ok(panes);
        }
        let mut mount_pane = |pane: Pane| self.allocate(ElementKind::Pane(pane));
        let panes = PaneHandles {
            main_title: mount_pane(Pane::MainTitle),
            table_column: mount_pane(Pane::TableColumn),
            column_title: mount_pane(Pane::ColumnTitle),
            column_header: mount_pane(Pane::ColumnHeader),
            side_canvas: mount_pane(Pane::SideCanvas),
            main_canvas: mount_pane(Pane::MainCanvas),
            entity_list: mount_pane(Pane::EntityList),
        };
        self.panes = Some(panes);
        Ok(panes)
    }

    fn create_element(&mut self, kind: ElementKind) -> ElementId {
        self.allocate(kind)
    }

    fn append(&mut self, parent: ElementId, child: ElementId) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            trace!(parent = parent.raw(), child = child.raw(), "append on unknown element");
            return;
        }
        let previous = self.nodes.get(&child).and_then(|node| node.parent);
        if let Some(previous) = previous {
            if let Some(node) = self.nodes.get_mut(&previous) {
                node.children.retain(|id| *id != child);
            }
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn clear(&mut self, parent: ElementId) {
        let children = match self.nodes.get_mut(&parent) {
            Some(node) => std::mem::take(&mut node.children),
            None => return,
        };
        self.remove_subtrees(children);
    }

    fn set_position(&mut self, element: ElementId, left: f64, top: f64) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.left = Some(left);
            node.top = Some(top);
        }
    }

    fn set_size(&mut self, element: ElementId, width: Option<f64>, height: Option<f64>) {
        if let Some(node) = self.nodes.get_mut(&element) {
            if width.is_some() {
                node.width = width;
            }
            if height.is_some() {
                node.height = height;
            }
        }
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.text = Some(text.to_owned());
        }
    }

    fn set_variable(&mut self, variable: LayoutVariable, value_px: f64) {
        self.variables.insert(variable, value_px);
    }

    fn set_scroll(&mut self, pane: Pane, axis: ScrollAxis, offset: f64) {
        self.scroll.insert((pane, axis), offset);
    }
}

#[cfg(test)]
mod tests {
    use super::HeadlessSurface;
    use crate::render::{ElementKind, Pane, Surface};

    #[test]
    fn clear_removes_nested_descendants() {
        let mut surface = HeadlessSurface::new();
        let panes = surface.mount().expect("mount");
        let row = surface.create_element(ElementKind::EntityRow);
        let label = surface.create_element(ElementKind::HeaderCell);
        surface.append(panes.entity_list, row);
        surface.append(row, label);

        surface.clear(panes.entity_list);

        assert!(surface.node(row).is_none());
        assert!(surface.node(label).is_none());
        assert!(surface.pane_children(Pane::EntityList).is_empty());
        assert_eq!(surface.created_count(), 9);
    }

    #[test]
    fn clear_keeps_survivors_in_creation_order() {
        let mut surface = HeadlessSurface::new();
        let panes = surface.mount().expect("mount");
        let mut cells = Vec::new();
        for _ in 0..3 {
            let cell = surface.create_element(ElementKind::HeaderCell);
            surface.append(panes.column_header, cell);
            let line = surface.create_element(ElementKind::MainGridLine);
            surface.append(panes.main_canvas, line);
            cells.push(cell);
        }

        surface.clear(panes.main_canvas);

        let remaining: Vec<_> = surface
            .elements_of_kind(ElementKind::HeaderCell)
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(remaining, cells);
        assert_eq!(surface.count_of_kind(ElementKind::MainGridLine), 0);
        assert_eq!(surface.live_count(), 7 + 3);
    }

    #[test]
    fn append_moves_child_between_parents() {
        let mut surface = HeadlessSurface::new();
        let panes = surface.mount().expect("mount");
        let cell = surface.create_element(ElementKind::HeaderCell);
        surface.append(panes.column_header, cell);
        surface.append(panes.side_canvas, cell);

        assert!(surface.pane_children(Pane::ColumnHeader).is_empty());
        assert_eq!(surface.pane_children(Pane::SideCanvas), vec![cell]);
    }

    #[test]
    fn validate_rejects_non_finite_geometry() {
        let mut surface = HeadlessSurface::new();
        let line = surface.create_element(ElementKind::MainGridLine);
        surface.set_position(line, f64::NAN, 0.0);
        assert!(surface.validate().is_err());
    }
}
