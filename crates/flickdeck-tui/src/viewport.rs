use flickdeck_core::settings::DisplaySettings;
use flickdeck_core::transform::Point;
use flickdeck_core::Viewport;
use ratatui::layout::Rect;

/// Maps terminal cells onto the px plane of the table. The origin sits at
/// the centre of the table area, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSpace {
    area: Rect,
    cell_width: f64,
    cell_height: f64,
}

impl TableSpace {
    pub fn new(area: Rect, display: &DisplaySettings) -> Self {
        Self {
            area,
            cell_width: f64::from(display.cell_width_px),
            cell_height: f64::from(display.cell_height_px),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    fn origin(&self) -> (f64, f64) {
        (
            f64::from(self.area.x) + f64::from(self.area.width) / 2.0,
            f64::from(self.area.y) + f64::from(self.area.height) / 2.0,
        )
    }

    /// Centre of a cell, in table px.
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        let (origin_col, origin_row) = self.origin();
        [
            (f64::from(column) + 0.5 - origin_col) * self.cell_width,
            (f64::from(row) + 0.5 - origin_row) * self.cell_height,
        ]
    }

    /// Fractional cell position of a table point.
    pub fn to_cells(&self, point: Point) -> (f64, f64) {
        let (origin_col, origin_row) = self.origin();
        (
            point[0] / self.cell_width + origin_col,
            point[1] / self.cell_height + origin_row,
        )
    }
}

impl Viewport for TableSpace {
    fn width(&self) -> f64 {
        f64::from(self.area.width) * self.cell_width
    }
}
