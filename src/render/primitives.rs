use serde::{Deserialize, Serialize};

/// Opaque handle of one surface element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Fixed regions of the chart skeleton.
///
/// ```text
/// |---------------|-------------------|
/// | main title    | column title      |
/// |---------------|-------------------|
/// | table column  | column header     |
/// |               |-------------------|
/// |               | side canvas       |
/// |---------------|-------------------|
/// | entity list   | main canvas       |
/// |---------------|-------------------|
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pane {
    MainTitle,
    TableColumn,
    ColumnTitle,
    ColumnHeader,
    SideCanvas,
    MainCanvas,
    EntityList,
}

/// Role of an element created by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Pane(Pane),
    HeaderCell,
    HeaderBorder,
    SideGridLine,
    SidePointEvent,
    MainGridLine,
    RowDivider,
    EntityRow,
    EntityPointEvent,
    EntityRangeEvent,
    GlobalRangeEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

/// Layout variables published on the chart root, one per custom property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutVariable {
    ChartWidth,
    ChartHeight,
    LeftPanelWidth,
    ColumnTitleHeight,
    ColumnHeaderHeight,
    SideCanvasHeight,
    SideCanvasContentHeight,
    CellHeight,
    MainRangeContentHeight,
    MainPointContentHeight,
    ScrollWidth,
}

impl LayoutVariable {
    /// CSS custom property name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ChartWidth => "--tc-width",
            Self::ChartHeight => "--tc-height",
            Self::LeftPanelWidth => "--tc-list-width",
            Self::ColumnTitleHeight => "--tc-column-title-height",
            Self::ColumnHeaderHeight => "--tc-column-header-height",
            Self::SideCanvasHeight => "--tc-side-canvas-height",
            Self::SideCanvasContentHeight => "--tc-side-canvas-content-height",
            Self::CellHeight => "--tc-cell-height",
            Self::MainRangeContentHeight => "--tc-main-range-content-height",
            Self::MainPointContentHeight => "--tc-main-point-content-height",
            Self::ScrollWidth => "--tc-scroll-width",
        }
    }
}

/// Handles of the mounted skeleton panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneHandles {
    pub main_title: ElementId,
    pub table_column: ElementId,
    pub column_title: ElementId,
    pub column_header: ElementId,
    pub side_canvas: ElementId,
    pub main_canvas: ElementId,
    pub entity_list: ElementId,
}

impl PaneHandles {
    #[must_use]
    pub fn get(&self, pane: Pane) -> ElementId {
        match pane {
            Pane::MainTitle => self.main_title,
            Pane::TableColumn => self.table_column,
            Pane::ColumnTitle => self.column_title,
            Pane::ColumnHeader => self.column_header,
            Pane::SideCanvas => self.side_canvas,
            Pane::MainCanvas => self.main_canvas,
            Pane::EntityList => self.entity_list,
        }
    }
}
